//! IRR CLI
//!
//! Solve one cash flow series given inline or from CSV.
//!
//! Usage:
//!   irr --flows "-1000,300,300,300,300,300"
//!   irr --csv flows.csv --series fund-a --periods-per-year 12 --json
//!   irr --csv dated.csv --dated

use anyhow::{bail, Context, Result};
use clap::Parser;
use irr_solver::cashflow::{
    find_series, load_dated_series, load_series, CashFlowSeries, DatedCashFlow,
};
use irr_solver::irr::{parse_rate_list, xirr_detailed};
use irr_solver::{IrrReport, IrrSolver, SolverConfig};
use log::debug;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "irr", version, about = "Internal Rate of Return solver")]
struct Cli {
    /// Comma separated amounts, period 0 first
    #[arg(long, allow_hyphen_values = true, conflicts_with = "csv")]
    flows: Option<String>,

    /// CSV file (SeriesId,Period,Amount or SeriesId,Date,Amount with --dated)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Series to solve when the CSV holds more than one
    #[arg(long, requires = "csv")]
    series: Option<String>,

    /// Read SeriesId,Date,Amount rows and use the XIRR entry point
    #[arg(long, requires = "csv")]
    dated: bool,

    /// JSON solver configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial guess (disables the default fallback seed unless --fallback-seeds is given)
    #[arg(long, allow_hyphen_values = true)]
    guess: Option<f64>,

    #[arg(long)]
    tolerance: Option<f64>,

    #[arg(long)]
    max_iterations: Option<u32>,

    /// Comma separated seeds tried after the initial guess
    #[arg(long, allow_hyphen_values = true)]
    fallback_seeds: Option<String>,

    /// Also report the rate annualized at this frequency (12 = monthly flows)
    #[arg(long)]
    periods_per_year: Option<u32>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// File config, then IRR_* environment, then flags
    fn solver_config(&self) -> Result<SolverConfig> {
        let base = match &self.config {
            Some(path) => SolverConfig::from_json_path(path)
                .with_context(|| format!("Failed to load solver config from {}", path.display()))?,
            None => SolverConfig::default(),
        };
        let mut config = base.apply_env(|key| std::env::var(key).ok());

        if let Some(guess) = self.guess {
            config.initial_guess = guess;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(raw) = &self.fallback_seeds {
            let seeds = parse_rate_list(raw)
                .with_context(|| format!("Invalid --fallback-seeds '{}'", raw))?;
            config.fallback_seeds = Some(seeds);
        }

        config.validate()?;
        Ok(config)
    }
}

enum Input {
    Periodic(Vec<f64>),
    Dated(Vec<DatedCashFlow>),
}

fn read_input(cli: &Cli) -> Result<Input> {
    if let Some(raw) = &cli.flows {
        let series = CashFlowSeries::parse(raw).context("Invalid --flows")?;
        return Ok(Input::Periodic(series.into()));
    }

    let Some(path) = &cli.csv else {
        bail!("Provide cash flows with --flows or --csv");
    };

    if cli.dated {
        let mut all = load_dated_series(path)
            .with_context(|| format!("Failed to load dated cash flows from {}", path.display()))?;
        let chosen = match &cli.series {
            Some(id) => all
                .into_iter()
                .find(|s| &s.id == id)
                .with_context(|| format!("Series '{}' not found", id))?,
            None if all.len() == 1 => all.remove(0),
            None => bail!("{} series in file, choose one with --series", all.len()),
        };
        return Ok(Input::Dated(chosen.flows));
    }

    let all = load_series(path)
        .with_context(|| format!("Failed to load cash flows from {}", path.display()))?;
    let chosen = match &cli.series {
        Some(id) => find_series(&all, id)?,
        None if all.len() == 1 => &all[0],
        None => bail!("{} series in file, choose one with --series", all.len()),
    };
    Ok(Input::Periodic(chosen.amounts.clone()))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.solver_config()?;
    debug!("Solver config: {:?}", config);

    let solver = IrrSolver::new(config);
    let (periods, outcome) = match read_input(&cli)? {
        Input::Periodic(amounts) => (amounts.len(), solver.solve(&amounts)),
        Input::Dated(flows) => (flows.len(), xirr_detailed(&solver, &flows)),
    };
    let report = IrrReport::new(periods, &outcome, cli.periods_per_year);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Periods:        {}", report.periods);
    println!("IRR (periodic): {}", report.display_rate());
    if cli.periods_per_year.is_some() {
        println!("IRR (annual):   {}", report.display_annualized());
    }
    match (&report.seed, &report.iterations, &report.failure) {
        (Some(seed), Some(iterations), _) => {
            println!("Converged from seed {} in {} iterations", seed, iterations)
        }
        (_, _, Some(reason)) => println!("No result: {}", reason),
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn periodic(args: &[&str]) -> Result<Vec<f64>> {
        let cli = Cli::parse_from(args.iter().copied());
        match read_input(&cli)? {
            Input::Periodic(amounts) => Ok(amounts),
            Input::Dated(_) => bail!("unexpected dated input"),
        }
    }

    #[test]
    fn test_inline_flows_parsed() {
        let amounts = periodic(&["irr", "--flows", "-100,110"]).unwrap();
        assert_eq!(amounts, vec![-100.0, 110.0]);
    }

    #[test]
    fn test_inline_flows_validated() {
        assert!(periodic(&["irr", "--flows", "-100"]).is_err());
        assert!(periodic(&["irr", "--flows", "-100,inf"]).is_err());
        assert!(periodic(&["irr", "--flows", "-100,abc"]).is_err());
    }
}
