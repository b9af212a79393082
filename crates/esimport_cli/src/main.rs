//! esimports: list the import declarations of ECMAScript modules.
//!
//! Usage:
//!   esimports [options] [file...]
//!
//! Reads standard input when no files are given. Exits with 0 on success, 1
//! when a source fails to parse and 2 on I/O or configuration errors.

use clap::Parser as ClapParser;
use esimport_parser::{parse_imports_with, ImportGrammar, ImportStatement, ParseOptions};
use miette::NamedSource;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

#[derive(ClapParser, Debug)]
#[command(name = "esimports", about = "List the import declarations of ECMAScript modules", version)]
struct Cli {
    /// Source files to scan. Standard input is read when none are given.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Print the records as JSON.
    #[arg(long)]
    json: bool,

    /// Accept only default, plain named and namespace imports.
    #[arg(long)]
    basic: bool,

    /// Treat `//` and `/* */` comments as whitespace.
    #[arg(long = "skip-comments")]
    skip_comments: bool,

    /// JSON file with parse options (`grammar`, `skipComments`).
    #[arg(short = 'c', long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log every recognized declaration.
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Failures that stop the run before any parsing happens.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config '{path}': {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One parsed input.
#[derive(Debug, Serialize)]
struct FileImports {
    file: String,
    imports: Vec<ImportStatement>,
}

const STDIN_NAME: &str = "<stdin>";

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    process::exit(run(&cli));
}

/// Compact stderr logging without timestamps or targets.
fn init_logger(verbose: bool) {
    let filter = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_filter(filter);

    Registry::default().with(layer).init();
}

fn run(cli: &Cli) -> i32 {
    let options = match resolve_options(cli) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {}", e);
            return 2;
        }
    };
    tracing::debug!(grammar = ?options.grammar, skip_comments = options.skip_comments, "resolved options");

    let inputs = match read_inputs(&cli.files) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("error: {}", e);
            return 2;
        }
    };

    let mut results = Vec::with_capacity(inputs.len());
    for (name, text) in inputs {
        match parse_imports_with(&text, &options) {
            Ok(imports) => {
                tracing::debug!(file = %name, count = imports.len(), "parsed");
                results.push(FileImports { file: name, imports });
            }
            Err(e) => {
                tracing::debug!(
                    file = %name,
                    code = e.code(),
                    position = e.span().start,
                    lexical = e.is_lexical(),
                    "parse failed"
                );
                let report = miette::Report::new(e).with_source_code(NamedSource::new(name, text));
                eprintln!("{:?}", report);
                return 1;
            }
        }
    }

    if cli.json {
        match render_json(&results) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                return 2;
            }
        }
    } else {
        print!("{}", render_text(&results));
    }
    0
}

/// Options from the config file, then command-line flags on top.
fn resolve_options(cli: &Cli) -> Result<ParseOptions, CliError> {
    let mut options = match &cli.config {
        Some(path) => load_config(path)?,
        None => ParseOptions::default(),
    };
    if cli.basic {
        options.grammar = ImportGrammar::Basic;
    }
    if cli.skip_comments {
        options.skip_comments = true;
    }
    Ok(options)
}

fn load_config(path: &Path) -> Result<ParseOptions, CliError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Config { path: display, source })
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<(String, String)>, CliError> {
    if files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Io {
                path: STDIN_NAME.to_string(),
                source,
            })?;
        return Ok(vec![(STDIN_NAME.to_string(), text)]);
    }

    files
        .iter()
        .map(|path| {
            let name = path.display().to_string();
            std::fs::read_to_string(path)
                .map(|text| (name.clone(), text))
                .map_err(|source| CliError::Io { path: name, source })
        })
        .collect()
}

/// A single input prints as a bare array; several print as `{file, imports}` objects.
fn render_json(results: &[FileImports]) -> serde_json::Result<String> {
    match results {
        [single] => serde_json::to_string_pretty(&single.imports),
        _ => serde_json::to_string_pretty(results),
    }
}

fn render_text(results: &[FileImports]) -> String {
    let mut out = String::new();
    let with_headers = results.len() > 1;
    for result in results {
        if with_headers {
            out.push_str(&format!("{}:\n", result.file));
        }
        for record in &result.imports {
            if with_headers {
                out.push_str("  ");
            }
            out.push_str(&format_record(record));
            out.push('\n');
        }
    }
    out
}

fn format_record(record: &ImportStatement) -> String {
    let names = match record {
        ImportStatement::NamedImport { imports, .. } => {
            let specifiers: Vec<String> = imports
                .iter()
                .map(|s| match &s.alias {
                    Some(alias) => format!("{} as {}", s.name, alias),
                    None => s.name.clone(),
                })
                .collect();
            format!("{{ {} }}", specifiers.join(", "))
        }
        _ => record.local_names().join(", "),
    };
    if names.is_empty() {
        format!("{:<11} {:?}", record.kind_name(), record.source())
    } else {
        format!("{:<11} {} from {:?}", record.kind_name(), names, record.source())
    }
}
