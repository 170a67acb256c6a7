//! `opacity-fallback` command-line tool.
//!
//! Reads a stylesheet from a file or stdin, applies the opacity fallback
//! transform and writes the result to a file or stdout.
//!
//! ```text
//! opacity-fallback styles.css -o styles.out.css
//! cat styles.css | opacity-fallback -p color -p fill > out.css
//! opacity-fallback styles.css -c opacity.yaml -vv
//! ```
//!
//! Diagnostics go to stderr. `RUST_LOG` takes precedence over `-v`.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use opacity_fallback::{apply, Options, Stylesheet};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "opacity-fallback",
    version,
    about = "Rewrite opacity-suffixed utilities that read color custom properties"
)]
struct Cli {
    /// Input stylesheet; stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// YAML or JSON options file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Property eligible for rewriting (repeatable, replaces the configured list)
    #[arg(short, long = "property", value_name = "NAME")]
    properties: Vec<String>,

    /// Do not add the framework's `--tw-*` custom properties to the list
    #[arg(long)]
    no_framework_props: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let options = resolve_options(cli)?;
    let css = read_input(cli.input.as_deref())?;

    let mut sheet = Stylesheet::parse(&css).with_context(|| match &cli.input {
        Some(path) if !is_stdin(path) => format!("failed to parse {}", path.display()),
        _ => "failed to parse stdin".to_string(),
    })?;
    let report = apply(&mut sheet, &options);
    tracing::info!(
        triplets_generated = report.triplets_generated,
        triplets_existing = report.triplets_existing,
        dark_colors_recorded = report.dark_colors_recorded,
        declarations_rewritten = report.declarations_rewritten,
        dark_overrides = report.dark_overrides,
        "transform finished"
    );

    write_output(cli.output.as_deref(), &sheet.to_css())
}

/// Config file first, then command-line overrides.
fn resolve_options(cli: &Cli) -> Result<Options> {
    let mut options = match &cli.config {
        Some(path) => Options::from_path(path)
            .with_context(|| format!("failed to load options from {}", path.display()))?,
        None => Options::default(),
    };

    if !cli.properties.is_empty() {
        options = options.with_properties(cli.properties.iter().map(String::as_str));
    }
    if cli.no_framework_props {
        options = options.include_framework_custom_props(false);
    }

    tracing::debug!(
        properties = options.property_set().len(),
        framework = options.include_framework_custom_props,
        "options resolved"
    );
    Ok(options)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if !is_stdin(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&Path>, css: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, css).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(css.as_bytes())
                .and_then(|_| stdout.flush())
                .context("failed to write stdout")
        }
    }
}
