//! Command-line interface for report-tree
//!
//! Inspects, converts and renders saved report records.
//!
//! Usage:
//!   report-tree outline `<record>` [--sections-only] [--style `<style>`] [--ids]
//!   report-tree convert `<record>` [--to json|yaml] [--output `<path>`]
//!   report-tree html `<record>` --output `<path>`
//!   report-tree template `<output>` [--pretext `<text>`] [--section `<title>`]...
//!
//! Record files ending in `.yaml` or `.yml` are read and written as YAML, anything else as JSON.
//! Set `RUST_LOG` (e.g. `RUST_LOG=report_tree=debug`) for diagnostics on stderr.

use clap::{Arg, ArgAction, ArgMatches, Command};
use report_tree::config::{Loader, ReportConfig};
use report_tree::formats::outline::{render_with, sections_only, OutlineStyle};
use report_tree::persist::storage::{self, RecordFormat};
use report_tree::persist::serialize;
use report_tree::render::{render_document, BasicLeafRenderer};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

type CliResult = Result<(), Box<dyn Error>>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("report-tree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect, convert and render report trees")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("outline")
                .about("Print the tree outline of a saved report")
                .arg(record_arg())
                .arg(
                    Arg::new("sections-only")
                        .long("sections-only")
                        .short('s')
                        .action(ArgAction::SetTrue)
                        .help("Only show the report and its sections"),
                )
                .arg(
                    Arg::new("style")
                        .long("style")
                        .value_parser(["plain", "terminal", "html"])
                        .help("Outline style (defaults to the configured one)"),
                )
                .arg(
                    Arg::new("ids")
                        .long("ids")
                        .action(ArgAction::SetTrue)
                        .help("Print node ids in place of titles"),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a saved report between JSON and YAML")
                .arg(record_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .short('t')
                        .value_parser(["json", "yaml"])
                        .help("Target format (defaults to the configured one)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file (defaults to stdout)"),
                ),
        )
        .subcommand(
            Command::new("html")
                .about("Render a saved report to an HTML page")
                .arg(record_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .required(true)
                        .help("HTML file to write"),
                ),
        )
        .subcommand(
            Command::new("template")
                .about("Save an untitled report template")
                .arg(
                    Arg::new("output")
                        .help("Template file to write (.json is added when there is no extension)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("pretext")
                        .long("pretext")
                        .default_value("")
                        .help("Text shown above the report title"),
                )
                .arg(
                    Arg::new("section")
                        .long("section")
                        .action(ArgAction::Append)
                        .help("Title of a top-level section (repeatable)"),
                ),
        )
}

fn record_arg() -> Arg {
    Arg::new("record")
        .help("Saved report record (.json, .yaml or .yml)")
        .required(true)
        .index(1)
}

fn run(matches: &ArgMatches) -> CliResult {
    let config = load_config(matches.get_one::<String>("config"))?;
    match matches.subcommand() {
        Some(("outline", sub)) => handle_outline_command(sub, &config),
        Some(("convert", sub)) => handle_convert_command(sub, &config),
        Some(("html", sub)) => handle_html_command(sub, &config),
        Some(("template", sub)) => handle_template_command(sub),
        _ => unreachable!(),
    }
}

fn load_config(path: Option<&String>) -> Result<ReportConfig, Box<dyn Error>> {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    Ok(loader.build()?)
}

fn record_path(matches: &ArgMatches) -> Result<&Path, Box<dyn Error>> {
    matches
        .get_one::<String>("record")
        .map(Path::new)
        .ok_or_else(|| "missing record path".into())
}

fn handle_outline_command(matches: &ArgMatches, config: &ReportConfig) -> CliResult {
    let (tree, root) = storage::load(record_path(matches)?)?;

    let mut options = config.outline.options();
    if let Some(style) = matches.get_one::<String>("style") {
        options.style = style.parse::<OutlineStyle>()?;
    }
    if matches.get_flag("ids") {
        options.show_ids = true;
    }

    let outline = if matches.get_flag("sections-only") {
        render_with(&tree, root, Some(&sections_only), &options)
    } else {
        render_with(&tree, root, None, &options)
    };
    print!("{outline}");
    Ok(())
}

fn handle_convert_command(matches: &ArgMatches, config: &ReportConfig) -> CliResult {
    let (tree, root) = storage::load(record_path(matches)?)?;
    let format = matches
        .get_one::<String>("to")
        .map(|to| to.parse::<RecordFormat>())
        .transpose()?
        .unwrap_or(config.persistence.format);
    let record = serialize(&tree, root)?;

    match matches.get_one::<String>("output") {
        Some(output) => {
            storage::write_record(Path::new(output), &record, format, config.persistence.pretty)?
        }
        None => println!("{}", format.to_text(&record, config.persistence.pretty)?),
    }
    Ok(())
}

fn handle_html_command(matches: &ArgMatches, config: &ReportConfig) -> CliResult {
    let (tree, root) = storage::load(record_path(matches)?)?;
    let html = render_document(&tree, root, &BasicLeafRenderer, &config.html.options())?;

    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .ok_or("missing output path")?;
    std::fs::write(&output, html)
        .map_err(|e| format!("cannot write {}: {e}", output.display()))?;
    Ok(())
}

fn handle_template_command(matches: &ArgMatches) -> CliResult {
    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .ok_or("missing template path")?;
    let pretext = matches
        .get_one::<String>("pretext")
        .map(String::as_str)
        .unwrap_or_default();
    let sections: Vec<&str> = matches
        .get_many::<String>("section")
        .map(|titles| titles.map(String::as_str).collect())
        .unwrap_or_default();

    let (tree, root) = storage::create_template(&output, pretext, &sections)?;
    eprintln!(
        "Saved template with {} section(s) to {}",
        tree.sections(root).len(),
        storage::template_path(&output).display()
    );
    Ok(())
}
