//! Built-in style implementations
//!
//! Each style supplies the line-level matchers and render hooks for one
//! docstring convention; the shared engine does the rest.

pub mod google;
pub mod numpy;

pub use google::GoogleStyle;
pub use numpy::NumpyStyle;
