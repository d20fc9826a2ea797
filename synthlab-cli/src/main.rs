//! SynthLab CLI: generate synthetic index, futures, and option chain data.
//!
//! Commands:
//! - `generate`: run the pipeline and write the spot, futures, and options CSVs
//! - `init-config`: emit the default config as TOML
//! - `check`: validate a config file and report the size of its time index

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use synthlab_core::{build_time_index, GeneratorConfig};
use synthlab_runner::{run_generation, RunSummary};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "synthlab",
    about = "SynthLab CLI: synthetic intraday index, futures, and options data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the spot, futures, and options files.
    Generate {
        /// Path to a TOML config file. Defaults to the built-in NIFTY 2024 config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the random seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Override the start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// Override the end date (YYYY-MM-DD, inclusive).
        #[arg(long)]
        end: Option<String>,

        /// Write all outputs into this directory, keeping their file names.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Write the default config as TOML.
    InitConfig {
        /// Destination file. Prints to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Validate a config file without generating data.
    Check {
        /// Path to a TOML config file.
        #[arg(long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            seed,
            start,
            end,
            output_dir,
        } => run_generate(config, seed, start, end, output_dir),
        Commands::InitConfig { output, force } => run_init_config(output, force),
        Commands::Check { config } => run_check(&config),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

fn run_generate(
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    start: Option<String>,
    end: Option<String>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config(config_path.as_deref())?;

    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(start) = start.as_deref() {
        config.calendar.start_date = parse_date(start)?;
    }
    if let Some(end) = end.as_deref() {
        config.calendar.end_date = parse_date(end)?;
    }
    if let Some(dir) = output_dir.as_deref() {
        config.output.relocate(dir);
    }

    info!(
        seed = config.seed,
        config = %config_path.as_deref().map_or("<default>".into(), |p| p.display().to_string()),
        "starting generation"
    );
    let summary = run_generation(&config)?;
    print_summary(&config, &summary);
    Ok(())
}

fn run_init_config(output: Option<PathBuf>, force: bool) -> Result<()> {
    let toml_str = GeneratorConfig::default().to_toml()?;

    match output {
        Some(path) => {
            if path.exists() && !force {
                bail!(
                    "{} already exists (pass --force to overwrite)",
                    path.display()
                );
            }
            std::fs::write(&path, toml_str)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Default config written to: {}", path.display());
        }
        None => print!("{toml_str}"),
    }
    Ok(())
}

fn run_check(path: &Path) -> Result<()> {
    let config = load_config(Some(path))?;
    let cal = &config.calendar;
    let timestamps = build_time_index(cal.start_date, cal.end_date, cal.interval, cal.session);
    let rows_per_ts = config.options.rows_per_timestamp();

    println!("Config OK: {}", path.display());
    println!("Period:         {} to {}", cal.start_date, cal.end_date);
    println!(
        "Session:        {} to {} every {}",
        cal.session.open, cal.session.close, cal.interval
    );
    println!("Timestamps:     {}", timestamps.len());
    println!(
        "Option rows:    {} ({} per timestamp)",
        timestamps.len() * rows_per_ts,
        rows_per_ts
    );
    println!("Config hash:    {}", config.config_hash()?);
    if timestamps.is_empty() {
        println!();
        println!("WARNING: time index is empty; outputs will contain headers only");
    }
    Ok(())
}

fn print_summary(config: &GeneratorConfig, summary: &RunSummary) {
    println!();
    println!("=== Generation Complete ===");
    println!("Seed:           {}", config.seed);
    println!(
        "Period:         {} to {}",
        config.calendar.start_date, config.calendar.end_date
    );
    println!("Timestamps:     {}", summary.timestamp_count);
    println!();
    println!("--- Outputs ---");
    println!(
        "Spot:           {} rows -> {}",
        summary.spot_rows,
        summary.outputs.spot.display()
    );
    println!(
        "Futures:        {} rows -> {}",
        summary.futures_rows,
        summary.outputs.futures.display()
    );
    println!(
        "Options:        {} rows -> {}",
        summary.options_rows,
        summary.outputs.options.display()
    );
    if let Some(path) = &summary.outputs.manifest {
        println!("Manifest:       {}", path.display());
    }
    if summary.timestamp_count == 0 {
        println!();
        println!("WARNING: time index was empty; files contain headers only");
    }
    println!();
}
