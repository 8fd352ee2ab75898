//! The fixed section keyword table shared by all styles.
//!
//! Header recognition is closed over this set: a header-shaped line whose
//! keyword is not listed here is not a header and folds back into prose.
//! The set and the alias pairs follow the napoleon section vocabulary.

use serde::{Deserialize, Serialize};

/// What a section's body may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    /// Named, typed, described entries (parameters, attributes, raises).
    Items,
    /// Free paragraphs and code blocks only.
    Prose,
    /// Bulleted actionable notes.
    Todos,
}

static KEYWORDS: &[(&str, SectionKind)] = &[
    ("Args", SectionKind::Items),
    ("Arguments", SectionKind::Items),
    ("Parameters", SectionKind::Items),
    ("Keyword Args", SectionKind::Items),
    ("Keyword Arguments", SectionKind::Items),
    ("Other Parameters", SectionKind::Items),
    ("Attributes", SectionKind::Items),
    ("Raises", SectionKind::Items),
    ("Warns", SectionKind::Items),
    ("Returns", SectionKind::Items),
    ("Return", SectionKind::Items),
    ("Yields", SectionKind::Items),
    ("Yield", SectionKind::Items),
    ("Receives", SectionKind::Items),
    ("Note", SectionKind::Prose),
    ("Notes", SectionKind::Prose),
    ("Warning", SectionKind::Prose),
    ("Warnings", SectionKind::Prose),
    ("Example", SectionKind::Prose),
    ("Examples", SectionKind::Prose),
    ("References", SectionKind::Prose),
    ("See Also", SectionKind::Prose),
    ("Todo", SectionKind::Todos),
    ("Todos", SectionKind::Todos),
];

static ALIASES: &[(&str, &str)] = &[
    ("Args", "Parameters"),
    ("Arguments", "Parameters"),
    ("Keyword Args", "Keyword Arguments"),
    ("Return", "Returns"),
    ("Yield", "Yields"),
    ("Warnings", "Warning"),
];

/// Look up a section keyword, case-insensitively.
///
/// Returns the canonical casing and the body kind.
pub fn lookup(title: &str) -> Option<(&'static str, SectionKind)> {
    KEYWORDS
        .iter()
        .find(|(kw, _)| kw.eq_ignore_ascii_case(title))
        .map(|(kw, kind)| (*kw, *kind))
}

/// Kind of body a section title admits. Unknown titles (and SUMMARY) are
/// prose-only.
pub fn kind_of(title: &str) -> SectionKind {
    lookup(title).map(|(_, kind)| kind).unwrap_or(SectionKind::Prose)
}

/// Resolve a title to its standard form for alias-aware lookups.
pub fn canonical(title: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(title))
        .map(|(_, standard)| *standard)
        .unwrap_or(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("args"), Some(("Args", SectionKind::Items)));
        assert_eq!(lookup("ARGS"), Some(("Args", SectionKind::Items)));
        assert_eq!(lookup("see also"), Some(("See Also", SectionKind::Prose)));
        assert_eq!(lookup("Bogus"), None);
    }

    #[test]
    fn test_kind_of_unknown_is_prose() {
        assert_eq!(kind_of("Whatever"), SectionKind::Prose);
        assert_eq!(kind_of("Todo"), SectionKind::Todos);
        assert_eq!(kind_of("Raises"), SectionKind::Items);
    }

    #[test]
    fn test_canonical_resolves_aliases() {
        assert_eq!(canonical("Args"), "Parameters");
        assert_eq!(canonical("Arguments"), "Parameters");
        assert_eq!(canonical("Yield"), "Yields");
        assert_eq!(canonical("Returns"), "Returns");
        assert_eq!(canonical("Unknown"), "Unknown");
    }
}
