use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod batch;
mod cli_output;
mod color;
mod error;
mod generator;
mod gradient;
mod rewriter;

use batch::{BatchOptions, BatchRun, FileOutcome, MonsterBatch};
use cli_output::{CommandResult, OutputMode, OutputWriter};

/// Where monster species resources live, relative to the project root
const DEFAULT_MONSTERS_DIR: &str = "resources/monsters";
/// Fixed seed so repeated runs over the same files produce the same colors
const DEFAULT_SEED: u64 = 42;

#[derive(Parser)]
#[command(name = "monster-tint")]
#[command(
    about = "Derive secondary colors and gradient types for monster .tres files",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Directory containing the monster .tres files
    #[arg(short, long, default_value = DEFAULT_MONSTERS_DIR)]
    dir: PathBuf,

    /// Seed for the color and gradient sequence
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Write each file through a temp file and rename
    #[arg(long)]
    atomic: bool,

    /// Emit JSON progress lines and a final result object
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let output = if cli.json {
        OutputWriter::new(OutputMode::Json)
    } else {
        OutputWriter::auto()
    };

    info!(
        "🎨 Tinting monsters in {} (seed {})",
        cli.dir.display(),
        cli.seed
    );
    let started = Instant::now();

    let options = BatchOptions {
        dir: cli.dir.clone(),
        dry_run: cli.dry_run,
        atomic: cli.atomic,
    };
    let mut rng = StdRng::seed_from_u64(cli.seed);
    let run = MonsterBatch::new(options, &output).run(&mut rng)?;

    output.emit_result(&command_result(&cli, &run, started.elapsed().as_millis() as u64));
    Ok(())
}

fn command_result(cli: &Cli, run: &BatchRun, duration_ms: u64) -> CommandResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut files = Vec::new();

    match run {
        BatchRun::DirectoryMissing(dir) => {
            errors.push(format!("{} not found", dir.display()));
        }
        BatchRun::Completed(outcomes) => {
            for outcome in outcomes {
                if let FileOutcome::Skipped { file, reason } = outcome {
                    warnings.push(format!("{}: {}", file, reason));
                }
                files.push(outcome.to_json());
            }
        }
    }

    CommandResult {
        success: errors.is_empty(),
        command: "tint".to_string(),
        duration_ms,
        output: json!({
            "directory": cli.dir.display().to_string(),
            "seed": cli.seed,
            "dry_run": cli.dry_run,
            "updated": run.updated(),
            "total": run.total(),
            "files": files,
        }),
        errors,
        warnings,
    }
}
