use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the views from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const VIEWS: &[&str] = &["tree", "json"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("docstr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and formatting docstrings")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Path to the docstring file")
                .required_unless_present("list-styles")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("view")
                .help("View to render (tree or json)")
                .required(false)
                .value_parser(clap::builder::PossibleValuesParser::new(VIEWS))
                .index(2)
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("list-styles")
                .long("list-styles")
                .help("List available styles")
                .action(ArgAction::SetTrue),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "docstr", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "docstr", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "docstr", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
