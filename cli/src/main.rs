//! MEDCHECK command-line front end
//!
//! Checks a patient's medications for pairwise interactions and allergy
//! conflicts, against either the built-in sample table or an uploaded
//! CSV/JSON dataset.
//!
//! Usage:
//!   cargo run -p medcheck-cli -- analyze --med Aspirin --med "Warfarin:5 mg:daily" --allergies penicillin
//!   cargo run -p medcheck-cli -- analyze --dataset interactions.csv --med Aspirin --med Warfarin
//!   cargo run -p medcheck-cli -- ingest interactions.csv
//!   cargo run -p medcheck-cli -- export interactions.csv --out exports/
//!   cargo run -p medcheck-cli -- scenarios

mod render;
mod scenarios;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use medcheck_contracts::{
    error::{MedCheckError, MedCheckResult},
    medication::MedicationEntry,
};
use medcheck_engine::CheckerConfig;
use medcheck_session::Session;

// ── CLI definition ────────────────────────────────────────────────────────────

/// MEDCHECK: medication interaction and allergy checker.
#[derive(Parser)]
#[command(
    name = "medcheck",
    about = "Medication interaction and allergy checker",
    long_about = "Checks entered medications for pairwise drug interactions and allergy\n\
                  conflicts, using the built-in sample table or an uploaded dataset."
)]
struct Cli {
    /// Checker configuration file (TOML). Built-in defaults are used if omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze medications and allergies.
    Analyze {
        /// Medication as NAME[:DOSAGE[:FREQUENCY]]. Repeat for each entry.
        #[arg(long = "med", required = true)]
        medications: Vec<String>,
        /// Comma-separated allergy list.
        #[arg(long, default_value = "")]
        allergies: String,
        /// Upload and activate this dataset (.csv or .json) before analyzing.
        #[arg(long)]
        dataset: Option<PathBuf>,
    },
    /// Upload a dataset and show its summary and preview.
    Ingest {
        file: PathBuf,
    },
    /// Upload a dataset and write it back out as `<name>_export.json`.
    Export {
        file: PathBuf,
        /// Directory to write the export into.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Run the four walk-through scenarios.
    Scenarios,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match load_config(cli.config.as_deref()) {
        Ok(config) => run(cli.command, config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("medcheck: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> MedCheckResult<CheckerConfig> {
    match path {
        Some(path) => CheckerConfig::from_file(path),
        None => Ok(CheckerConfig::default()),
    }
}

async fn run(command: Command, config: CheckerConfig) -> MedCheckResult<()> {
    match command {
        Command::Analyze {
            medications,
            allergies,
            dataset,
        } => run_analyze(config, &medications, &allergies, dataset.as_deref()).await,
        Command::Ingest { file } => run_ingest(config, &file).await,
        Command::Export { file, out } => run_export(config, &file, &out).await,
        Command::Scenarios => scenarios::run_all(&config).await,
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Parse `NAME[:DOSAGE[:FREQUENCY]]`.
fn parse_medication(arg: &str) -> MedicationEntry {
    let mut parts = arg.splitn(3, ':').map(str::trim);
    let name = parts.next().unwrap_or_default();
    let dosage = parts.next().unwrap_or_default();
    let frequency = parts.next().unwrap_or_default();
    MedicationEntry::new(name, dosage, frequency)
}

async fn run_analyze(
    config: CheckerConfig,
    medications: &[String],
    allergies: &str,
    dataset: Option<&Path>,
) -> MedCheckResult<()> {
    let mut session = Session::new(config);

    if let Some(path) = dataset {
        let id = session.upload_file(path).await?.id.clone();
        session.activate_dataset(&id)?;
    }

    for arg in medications {
        let entry = parse_medication(arg);
        debug!(name = %entry.name, dosage = %entry.dosage, "medication parsed");
        session.add_medication(entry);
    }
    session.set_allergies(allergies);

    println!();
    println!("Analyzing {} medication(s)...", session.medications().len());
    println!();

    let report = session.analyze().await?;
    render::print_report(report);

    if report.is_clear() {
        println!("No interactions or allergy conflicts found.");
    }
    Ok(())
}

async fn run_ingest(config: CheckerConfig, file: &Path) -> MedCheckResult<()> {
    let mut session = Session::new(config);
    let id = session.upload_file(file).await?.id.clone();

    println!();
    render::print_dataset(session.dataset(&id)?);
    println!();
    println!("  Preview:");
    render::print_records(session.preview_dataset(&id)?);
    println!();
    Ok(())
}

async fn run_export(config: CheckerConfig, file: &Path, out: &Path) -> MedCheckResult<()> {
    let mut session = Session::new(config);
    let id = session.upload_file(file).await?.id.clone();
    session.activate_dataset(&id)?;

    let export = session.export_active()?;
    let target = out.join(&export.file_name);
    tokio::fs::write(&target, export.contents.as_bytes())
        .await
        .map_err(|e| MedCheckError::Io {
            reason: format!("failed to write '{}': {}", target.display(), e),
        })?;

    println!("Exported {} row(s) to {}", session.dataset(&id)?.row_count, target.display());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
