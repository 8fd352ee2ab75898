// Command-line interface for docstr
//
// This binary provides commands for inspecting, formatting and classifying
// docstrings. It is a thin shell over the docstr-core library: reading
// files, layering configuration and printing results happen here, parsing
// and rendering happen in the library.
//
// Usage:
//  docstr <input> [--style <style>] [--output <file>]   - Format a docstring (default)
//  docstr format <input> [--style <style>] [-o <file>]  - Same as above (explicit)
//  docstr parse <input> [<view>] [--style <style>]      - Inspect the parsed tree (tree or json)
//  docstr detect <input>                                - Print the detected style
//  docstr --list-styles                                 - List available styles
//
// The style is auto-detected unless --style is given. Detection priority is
// configurable via [detect] priority in docstr.toml.

use clap::{Arg, ArgAction, Command, ValueHint};
use docstr_config::{DocstrConfig, Loader};
use docstr_core::treeviz::{to_treeviz_str_with_options, TreevizOptions};
use docstr_core::{Document, FormattingRules, StyleRegistry, StyleResolver};
use std::fs;

const VIEWS: &[&str] = &["tree", "json"];

fn build_cli() -> Command {
    Command::new("docstr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and formatting docstrings")
        .long_about(
            "docstr is a command-line tool for working with documentation comments.\n\n\
            Commands:\n  \
            - parse:  View the parsed document tree (treeviz or JSON)\n  \
            - format: Re-render a docstring canonically\n  \
            - detect: Report which style a docstring follows\n\n\
            Examples:\n  \
            docstr parse doc.txt                 # Tree visualization\n  \
            docstr parse doc.txt json            # JSON dump of the tree\n  \
            docstr format doc.txt                # Canonical text to stdout\n  \
            docstr doc.txt                       # 'format' is the default command\n  \
            docstr detect doc.txt                # Print 'google' or 'numpy'",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-styles")
                .long("list-styles")
                .help("List available styles")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a docstr.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("parse")
                .about("Inspect the parsed document tree")
                .long_about(
                    "Parse a docstring and print its internal representation.\n\n\
                    Views:\n  \
                    - tree: Box-drawing tree with one icon per node kind (default)\n  \
                    - json: Tree serialized as JSON\n\n\
                    Examples:\n  \
                    docstr parse doc.txt                # Tree visualization (default)\n  \
                    docstr parse doc.txt json           # JSON output\n  \
                    docstr parse doc.txt --style numpy  # Skip auto-detection",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
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
                .arg(style_arg()),
        )
        .subcommand(
            Command::new("format")
                .about("Re-render a docstring canonically (default command)")
                .long_about(
                    "Parse a docstring and re-render it with standard indentation\n\
                    and spacing rules. Output goes to stdout unless -o is given.\n\n\
                    Examples:\n  \
                    docstr format doc.txt                 # Canonical text to stdout\n  \
                    docstr format doc.txt -o out.txt      # Write to a file\n  \
                    docstr format doc.txt --style google  # Skip auto-detection",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(style_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("detect")
                .about("Report which style a docstring follows")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn style_arg() -> Arg {
    Arg::new("style")
        .long("style")
        .help("Style to parse with (auto-detected if not specified)")
        .value_hint(ValueHint::Other)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // If the first argument looks like a file rather than a subcommand,
    // inject "format" as the default command.
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "parse"
                && args[1] != "format"
                && args[1] != "detect"
                && args[1] != "help"
            {
                let mut new_args = vec![args[0].clone(), "format".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-styles") {
        handle_list_styles_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("parse", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or("tree");
            let style = sub_matches.get_one::<String>("style").map(|s| s.as_str());
            handle_parse_command(input, view, style, &config);
        }
        Some(("format", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let style = sub_matches.get_one::<String>("style").map(|s| s.as_str());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_format_command(input, style, output, &config);
        }
        Some(("detect", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_detect_command(input, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn load_cli_config(path: Option<&str>) -> DocstrConfig {
    let loader = match path {
        Some(p) => Loader::new().with_file(p),
        None => Loader::new().with_optional_file("docstr.toml"),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    })
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Parse with the named style, or auto-detect per the configured priority.
fn parse_input(source: &str, style: Option<&str>, config: &DocstrConfig) -> (String, Document) {
    match style {
        Some(name) => {
            let registry = StyleRegistry::with_defaults();
            let doc = registry.parse(source, name).unwrap_or_else(|e| {
                eprintln!("Parse error: {e}");
                std::process::exit(1);
            });
            (name.to_string(), doc)
        }
        None => {
            let resolver = StyleResolver::with_priority(
                StyleRegistry::with_defaults(),
                config.detect.priority.clone(),
            );
            resolver.resolve(source).unwrap_or_else(|e| {
                eprintln!("Parse error: {e}");
                std::process::exit(1);
            })
        }
    }
}

fn handle_parse_command(input: &str, view: &str, style: Option<&str>, config: &DocstrConfig) {
    let source = read_input(input);
    let (_, doc) = parse_input(&source, style, config);

    match view {
        "json" => {
            let json = serde_json::to_string_pretty(&doc).unwrap_or_else(|e| {
                eprintln!("Serialization error: {e}");
                std::process::exit(1);
            });
            println!("{json}");
        }
        _ => {
            let options = TreevizOptions {
                show_text: config.inspect.show_text,
            };
            print!("{}", to_treeviz_str_with_options(&doc, options));
        }
    }
}

fn handle_format_command(
    input: &str,
    style: Option<&str>,
    output: Option<&str>,
    config: &DocstrConfig,
) {
    let source = read_input(input);
    let (style_name, doc) = parse_input(&source, style, config);

    let rules: FormattingRules = (&config.formatting.rules).into();
    let registry = StyleRegistry::with_defaults();
    let text = registry
        .format_document_with_rules(&doc, &style_name, &rules)
        .unwrap_or_else(|e| {
            eprintln!("Format error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

fn handle_detect_command(input: &str, config: &DocstrConfig) {
    let source = read_input(input);
    let (style_name, _) = parse_input(&source, None, config);
    println!("{style_name}");
}

fn handle_list_styles_command() {
    println!("Available styles:\n");
    let registry = StyleRegistry::with_defaults();
    for name in registry.list_styles() {
        match registry.get(&name) {
            Ok(style) => println!("  {name:<10} {}", style.description()),
            Err(_) => println!("  {name}"),
        }
    }
}
