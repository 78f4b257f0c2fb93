//! Batch IRR runner
//!
//! Holds one solver configuration and applies it to many independent
//! series in parallel. A series that fails to solve only affects its own row.

use crate::cashflow::{NamedDatedSeries, NamedSeries};
use crate::irr::{xirr_detailed, IrrSolver, SolverConfig};
use crate::report::IrrReport;
use log::info;
use rayon::prelude::*;

/// Solver plus output options shared across a batch
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::new(SolverConfig::default()).periods_per_year(12);
/// let reports = runner.run_batch(&load_series("flows.csv")?);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    solver: IrrSolver,
    periods_per_year: Option<u32>,
}

impl BatchRunner {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            solver: IrrSolver::new(config),
            periods_per_year: None,
        }
    }

    /// Also report rates annualized at this frequency
    pub fn periods_per_year(mut self, periods_per_year: u32) -> Self {
        self.periods_per_year = Some(periods_per_year);
        self
    }

    pub fn solver(&self) -> &IrrSolver {
        &self.solver
    }

    /// Solve a single unnamed series
    pub fn run(&self, amounts: &[f64]) -> IrrReport {
        IrrReport::new(amounts.len(), &self.solver.solve(amounts), self.periods_per_year)
    }

    /// Solve every periodic series, preserving input order
    pub fn run_batch(&self, series: &[NamedSeries]) -> Vec<IrrReport> {
        let reports: Vec<IrrReport> = series
            .par_iter()
            .map(|s| self.run(&s.amounts).with_series_id(s.id.as_str()))
            .collect();

        log_summary(&reports);
        reports
    }

    /// Solve every dated series through the XIRR entry point
    pub fn run_dated_batch(&self, series: &[NamedDatedSeries]) -> Vec<IrrReport> {
        let reports: Vec<IrrReport> = series
            .par_iter()
            .map(|s| {
                let outcome = xirr_detailed(&self.solver, &s.flows);
                IrrReport::new(s.flows.len(), &outcome, self.periods_per_year)
                    .with_series_id(s.id.as_str())
            })
            .collect();

        log_summary(&reports);
        reports
    }
}

fn log_summary(reports: &[IrrReport]) {
    let converged = reports.iter().filter(|r| r.converged).count();
    info!(
        "Solved {} series: {} converged, {} without result",
        reports.len(),
        converged,
        reports.len() - converged
    );
}
