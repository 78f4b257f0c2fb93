//! Solve every cash flow series in a CSV file
//!
//! Series are solved in parallel with one shared solver configuration.
//! Solver settings come from IRR_* environment variables (see
//! `SolverConfig::apply_env`) unless a JSON config file is given.
//!
//! Usage:
//!   batch_irr flows.csv --output irr_results.csv
//!   batch_irr dated.csv --dated --json

use anyhow::{Context, Result};
use clap::Parser;
use irr_solver::cashflow::{load_dated_series, load_series};
use irr_solver::report::{write_reports_csv, IrrReport};
use irr_solver::{BatchRunner, SolverConfig};
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "batch_irr", version, about = "Solve IRR for every series in a CSV file")]
struct Args {
    /// Input CSV (SeriesId,Period,Amount or SeriesId,Date,Amount with --dated)
    input: PathBuf,

    /// Input rows are dated; solve with the XIRR entry point
    #[arg(long)]
    dated: bool,

    /// JSON solver configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also report rates annualized at this frequency
    #[arg(long)]
    periods_per_year: Option<u32>,

    /// CSV output path
    #[arg(long, default_value = "irr_results.csv")]
    output: PathBuf,

    /// Print results as JSON to stdout instead of writing CSV
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let config = match &args.config {
        Some(path) => SolverConfig::from_json_path(path)
            .with_context(|| format!("Failed to load solver config from {}", path.display()))?,
        None => SolverConfig::from_env(),
    };
    config.validate()?;

    let mut runner = BatchRunner::new(config);
    if let Some(periods_per_year) = args.periods_per_year {
        runner = runner.periods_per_year(periods_per_year);
    }

    let reports: Vec<IrrReport> = if args.dated {
        let series = load_dated_series(&args.input)
            .with_context(|| format!("Failed to load {}", args.input.display()))?;
        info!("Loaded {} dated series in {:?}", series.len(), start.elapsed());
        runner.run_dated_batch(&series)
    } else {
        let series = load_series(&args.input)
            .with_context(|| format!("Failed to load {}", args.input.display()))?;
        info!("Loaded {} series in {:?}", series.len(), start.elapsed());
        runner.run_batch(&series)
    };

    if args.json {
        println!("{}", serde_json::to_string(&reports)?);
        return Ok(());
    }

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    write_reports_csv(&reports, BufWriter::new(file))?;

    let converged = reports.iter().filter(|r| r.converged).count();
    println!("Solved {} series ({} without result)", reports.len(), reports.len() - converged);
    for report in reports.iter().take(10) {
        println!(
            "  {:<20} {:>10}",
            report.series_id.as_deref().unwrap_or("-"),
            report.display_rate()
        );
    }
    if reports.len() > 10 {
        println!("  ... ({} more)", reports.len() - 10);
    }
    println!("\nResults written to: {}", args.output.display());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
