//! `availability` CLI - compute practitioner availabilities from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Generate availabilities for one practitioner of a schedule document
//! availability generate --practitioner 1 -i schedule.json
//!
//! # Generate for every practitioner in the document, writing to a file
//! availability generate --all -i schedule.json -o availabilities.json
//!
//! # Merge a JSON array of intervals (stdin → stdout)
//! echo '[{"practitioner_id":1,"start":"2020-02-05T11:00:00","end":"2020-02-05T12:00:00"}]' \
//!   | availability merge
//!
//! # Subtract appointments from clean intervals
//! availability subtract -i carve.json
//!
//! # Verbose logging (otherwise controlled by RUST_LOG)
//! availability -v generate --all -i schedule.json
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use availability_engine::{
    generate_availabilities, merge_per_practitioner, subtract_per_practitioner, InMemoryStore,
    Interval, PractitionerId, ScheduleDocument, StoredAvailability,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "availability",
    version,
    about = "Compute practitioner availabilities from time slots and appointments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate availabilities from a schedule document
    Generate {
        /// Input schedule document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Practitioner to generate availabilities for
        #[arg(long, conflicts_with = "all", required_unless_present = "all")]
        practitioner: Option<i64>,
        /// Generate for every practitioner in the document
        #[arg(long)]
        all: bool,
    },
    /// Merge a JSON array of intervals into a minimal cover per practitioner
    Merge {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Subtract each practitioner's appointments from their clean intervals
    Subtract {
        /// Input JSON file with "clean" and "appointments" arrays (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Input of the `subtract` subcommand.
#[derive(Deserialize)]
struct SubtractInput {
    clean: Vec<Interval>,
    #[serde(default)]
    appointments: Vec<Interval>,
}

/// Per-practitioner entry of `generate --all` output.
#[derive(Serialize)]
struct PractitionerAvailabilities {
    practitioner_id: PractitionerId,
    availabilities: Vec<StoredAvailability>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            input,
            output,
            practitioner,
            all: _,
        } => {
            let json = read_input(input.as_deref())?;
            let document =
                ScheduleDocument::from_json(&json).context("Failed to parse schedule document")?;
            let mut store = InMemoryStore::from_document(&document);
            debug!(practitioners = store.practitioners().len(), "loaded schedule document");

            let rendered = match practitioner {
                Some(id) => {
                    let id = PractitionerId(id);
                    let availabilities = generate_availabilities(&mut store, id).with_context(
                        || format!("Failed to generate availabilities for practitioner {id}"),
                    )?;
                    serde_json::to_string_pretty(&availabilities)?
                }
                // clap only lets --practitioner be absent together with --all
                None => {
                    let mut results = Vec::new();
                    for id in store.practitioners() {
                        let availabilities = generate_availabilities(&mut store, id).with_context(
                            || format!("Failed to generate availabilities for practitioner {id}"),
                        )?;
                        results.push(PractitionerAvailabilities {
                            practitioner_id: id,
                            availabilities,
                        });
                    }
                    serde_json::to_string_pretty(&results)?
                }
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Merge { input, output } => {
            let json = read_input(input.as_deref())?;
            let windows: Vec<Interval> =
                serde_json::from_str(&json).context("Failed to parse intervals")?;
            validate_all(&windows)?;
            let merged = merge_per_practitioner(&windows);
            write_output(output.as_deref(), &serde_json::to_string_pretty(&merged)?)?;
        }
        Commands::Subtract { input, output } => {
            let json = read_input(input.as_deref())?;
            let parsed: SubtractInput =
                serde_json::from_str(&json).context("Failed to parse subtract input")?;
            validate_all(&parsed.clean)?;
            validate_all(&parsed.appointments)?;
            let free = subtract_per_practitioner(&parsed.clean, &parsed.appointments);
            write_output(output.as_deref(), &serde_json::to_string_pretty(&free)?)?;
        }
    }

    Ok(())
}

fn validate_all(intervals: &[Interval]) -> Result<()> {
    for interval in intervals {
        interval
            .validate()
            .with_context(|| format!("Rejected input interval {}", interval))?;
    }
    Ok(())
}

/// Read the whole input, from `path` or stdin.
fn read_input(path: Option<&Path>) -> Result<String> {
    let Some(path) = path else {
        return io::read_to_string(io::stdin()).context("Failed to read from stdin");
    };
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write rendered JSON plus a trailing newline, to `path` or stdout.
fn write_output(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("Failed to write to stdout")
        }
    }
}
