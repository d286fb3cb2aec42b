//! Command-line interface for rml
//! Converts RML documents (with optional RSS styles) to HTML, and back.
//!
//! Usage:
//!   rml convert `<path>` [--format `<format>`] [--styles `<rss>`] [--config `<toml>`]  - RML → html / page / tree
//!   rml style `<path>`                                                           - Block-form RSS → CSS
//!   rml reverse `<path>`                                                         - HTML → RML (best effort)
//!   rml tags [--json]                                                          - List the tag table
//!   rml list-formats                                                           - List output formats
//!
//! Without `--config`, `convert` layers `./rml.toml` over the defaults when it exists.
//!
//! Logging goes through env_logger: `RUST_LOG=rml=debug rml convert doc.rml`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use rml::rml::config::Loader;
use rml::rml::formats::FormatRegistry;
use rml::rml::processor::{self, ProcessingError, ProcessingSpec};
use rml::rml::tags::{tag_description, TagResolver, TagRule};
use serde::Serialize;

/// Read from the working directory when no `--config` is given
const LOCAL_CONFIG: &str = "rml.toml";

fn main() {
    env_logger::init();

    let matches = Command::new("rml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Transpile RML markup and RSS styles to HTML and CSS")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("convert")
                .about("Convert an RML file to the given output format")
                .arg(
                    Arg::new("path")
                        .help("Path to the RML file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (html, page, tree); defaults to the configured one"),
                )
                .arg(
                    Arg::new("styles")
                        .long("styles")
                        .short('s')
                        .help("Block-form RSS file whose stylesheet is embedded in the output"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("TOML configuration file layered over the defaults"),
                )
                .arg(
                    Arg::new("escape")
                        .long("escape")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("raw")
                        .help("HTML-escape text content"),
                )
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .action(ArgAction::SetTrue)
                        .help("Copy text content through unescaped"),
                ),
        )
        .subcommand(
            Command::new("style")
                .about("Convert a block-form RSS file to CSS")
                .arg(
                    Arg::new("path")
                        .help("Path to the RSS file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("reverse")
                .about("Convert an HTML file back to RML (best effort)")
                .arg(
                    Arg::new("path")
                        .help("Path to the HTML file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("tags").about("List the RML tag table").arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("Print the table as JSON"),
            ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    let result = match matches.subcommand() {
        Some(("convert", convert_matches)) => handle_convert_command(convert_matches),
        Some(("style", style_matches)) => {
            let path = style_matches.get_one::<String>("path").unwrap();
            processor::style_file(path)
        }
        Some(("reverse", reverse_matches)) => {
            let path = reverse_matches.get_one::<String>("path").unwrap();
            processor::reverse_file(path)
        }
        Some(("tags", tags_matches)) => handle_tags_command(tags_matches.get_flag("json")),
        Some(("list-formats", _)) => Ok(handle_list_formats_command()),
        _ => unreachable!(),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches) -> Result<String, ProcessingError> {
    let path = matches.get_one::<String>("path").unwrap();

    let mut loader = Loader::new();
    loader = match matches.get_one::<String>("config") {
        Some(config_path) => loader.with_file(config_path),
        None => loader.with_optional_file(LOCAL_CONFIG),
    };
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("escape") {
        loader = loader.set_override("transpile.escape_text", true)?;
    }
    if matches.get_flag("raw") {
        loader = loader.set_override("transpile.escape_text", false)?;
    }

    let spec = ProcessingSpec::from_config(&loader.build()?);
    let styles = matches.get_one::<String>("styles");
    processor::process_file(path, styles, &spec)
}

#[derive(Serialize)]
struct TagListing {
    #[serde(flatten)]
    rule: &'static TagRule,
    description: &'static str,
}

/// Handle the tags command
fn handle_tags_command(json: bool) -> Result<String, ProcessingError> {
    let mut listings: Vec<TagListing> = TagResolver::global()
        .rules()
        .iter()
        .map(|rule| TagListing {
            rule,
            description: tag_description(rule.rml_name),
        })
        .collect();
    listings.sort_by_key(|listing| listing.rule.rml_name);

    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&listings)?));
    }

    let mut out = String::new();
    for listing in &listings {
        let rule = listing.rule;
        let class = rule.css_class.map(|c| format!(".{}", c)).unwrap_or_default();
        out.push_str(&format!(
            "{:<16} {:<12} {:<20} {:<8} {}\n",
            rule.rml_name,
            format!("<{}>", rule.html_element),
            class,
            rule.special.to_string(),
            listing.description
        ));
    }
    Ok(out)
}

/// Handle the list-formats command
fn handle_list_formats_command() -> String {
    let mut out = String::from("Available formats:\n\n");
    for (name, description) in FormatRegistry::with_defaults().describe_formats() {
        out.push_str(&format!("  {}\n    {}\n", name, description));
    }
    out
}
