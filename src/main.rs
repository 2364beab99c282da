//! jshift CLI - apply a shift spec to a JSON document
//!
//! Usage: jshift --spec spec.json [INPUT] [--in-place] [--require] [--pretty]

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use jshift::{ShiftConfig, Shifter, Spec};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jshift", version, about = "Restructure JSON documents with a declarative shift spec")]
struct Cli {
    /// Spec file: a bare spec object or a full config with "spec", "inPlace", "require"
    #[arg(short, long, value_name = "FILE")]
    spec: PathBuf,

    /// Input document, "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Start from a copy of the input instead of an empty object
    #[arg(long)]
    in_place: bool,

    /// Fail when a source path is missing
    #[arg(long)]
    require: bool,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = load_config(&cli.spec)?;
    config.in_place |= cli.in_place;
    config.require |= cli.require;

    tracing::info!(
        spec = %cli.spec.display(),
        entries = config.spec.len(),
        in_place = config.in_place,
        require = config.require,
        "Loaded shift config"
    );

    let input = read_input(&cli.input)?;
    let input: Value = serde_json::from_slice(&input)
        .with_context(|| format!("input '{}' is not valid JSON", cli.input))?;

    let output = Shifter::new(&config)
        .shift_value(&input)
        .context("shift failed")?;

    let mut stdout = io::stdout().lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut stdout, &output)?;
    } else {
        serde_json::to_writer(&mut stdout, &output)?;
    }
    writeln!(stdout)?;
    Ok(())
}

/// A file holding an object whose "spec" member is itself an object is a
/// full config; anything else is read as a bare spec.
fn load_config(path: &Path) -> Result<ShiftConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file '{}'", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("spec file '{}' is not valid JSON", path.display()))?;

    // The shape is decided on the parsed value; the config itself is built
    // from the text so duplicate destinations survive.
    let is_full_config = value.get("spec").is_some_and(Value::is_object);
    let config = if is_full_config {
        ShiftConfig::from_json_str(&text)?
    } else {
        ShiftConfig::new(Spec::from_json_str(&text)?)
    };
    Ok(config)
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read(input).with_context(|| format!("failed to read input '{}'", input))
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
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
        .compact()
        .init();
}
