use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use weektime_engine::wire::{parse_ranges, parse_selections, to_json};
use weektime_engine::{
    builtin_templates, merge_time_range, normalize_time_ranges, split_time_range, week_cells,
    TemplateCategory,
};

/// Environment variable holding the log filter (e.g. `debug`, `weektime_engine=trace`).
const LOG_ENV: &str = "WEEKTIME_LOG";

#[derive(Parser)]
#[command(name = "weektime")]
#[command(version, about = "Merge and split weekly access windows (JSON in, JSON out)")]
struct Cli {
    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Log engine activity to stderr (overrides WEEKTIME_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge per-weekday slot selections into weekday-grouped ranges
    Merge {
        /// JSON file with `[{"day": 1, "value": ["09:00~09:30"]}]` (stdin if omitted or `-`)
        input: Option<PathBuf>,
    },
    /// Split weekday-grouped ranges into per-weekday half-hour slots
    Split {
        /// JSON file with `[{"weekdays": [1], "start_time": "09:00", "end_time": "10:00"}]`
        input: Option<PathBuf>,
    },
    /// Rewrite weekday-grouped ranges in canonical merged form
    Normalize {
        /// JSON file with merged ranges (stdin if omitted or `-`)
        input: Option<PathBuf>,
    },
    /// Print the 7 x 48 week grid layout
    Grid,
    /// Print the built-in time templates
    Templates {
        /// Only the template of this category
        #[arg(long)]
        category: Option<TemplateCategory>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = match &cli.command {
        Command::Merge { input } => {
            let selections = parse_selections(&read_input(input.as_deref())?)
                .context("failed to parse day selections")?;
            to_json(&merge_time_range(&selections), cli.pretty)?
        }
        Command::Split { input } => {
            let ranges = parse_ranges(&read_input(input.as_deref())?)
                .context("failed to parse merged ranges")?;
            to_json(&split_time_range(&ranges), cli.pretty)?
        }
        Command::Normalize { input } => {
            let ranges = parse_ranges(&read_input(input.as_deref())?)
                .context("failed to parse merged ranges")?;
            to_json(&normalize_time_ranges(&ranges), cli.pretty)?
        }
        Command::Grid => to_json(&week_cells(), cli.pretty)?,
        Command::Templates { category } => {
            let templates: Vec<_> = builtin_templates()
                .into_iter()
                .filter(|t| category.is_none_or(|c| t.category == c))
                .collect();
            to_json(&templates, cli.pretty)?
        }
    };

    println!("{output}");
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read the whole input file, or stdin for `None` / `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            debug!(path = %p.display(), "reading input file");
            fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
