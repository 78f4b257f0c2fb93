//! Newton-Raphson IRR solver with re-seeding
//!
//! Solves NPV(r) = 0 for the periodic rate r. Each seed in the configured
//! list gets the full iteration budget; the first seed that converges wins.

use super::config::{SolverConfig, DERIVATIVE_FLOOR, FLAT_SLOPE_NUDGE};
use super::npv::npv_and_derivative;
use crate::error::SolverError;
use log::debug;
use serde::Serialize;

/// A converged rate and how it was reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IrrSolution {
    /// Periodic rate as a decimal (0.05 = 5% per period)
    pub rate: f64,
    /// Seed the successful attempt started from
    pub seed: f64,
    /// Iterations used by the successful attempt
    pub iterations: u32,
    /// NPV at `rate`
    pub npv: f64,
}

/// IRR solver bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct IrrSolver {
    config: SolverConfig,
}

impl IrrSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for the IRR of `cash_flows`, trying each seed in turn
    ///
    /// # Errors
    /// * `TooFewCashFlows` - fewer than 2 entries
    /// * `NoSignChange` - all flows share a sign (or are zero)
    /// * `ConvergenceFailure` - every seed exhausted its iteration budget
    pub fn solve(&self, cash_flows: &[f64]) -> Result<IrrSolution, SolverError> {
        if cash_flows.len() < 2 {
            return Err(SolverError::TooFewCashFlows(cash_flows.len()));
        }

        let has_positive = cash_flows.iter().any(|&cf| cf > 0.0);
        let has_negative = cash_flows.iter().any(|&cf| cf < 0.0);
        if !has_positive || !has_negative {
            return Err(SolverError::NoSignChange);
        }

        let seeds = self.config.seeds();
        for (attempt, &seed) in seeds.iter().enumerate() {
            if attempt > 0 {
                debug!("IRR retry {} with seed {}", attempt, seed);
            }
            if let Some(solution) = self.newton_from(cash_flows, seed) {
                debug!(
                    "IRR converged to {:.10} from seed {} in {} iterations",
                    solution.rate, seed, solution.iterations
                );
                return Ok(solution);
            }
        }

        debug!("IRR failed to converge from seeds {:?}", seeds);
        Err(SolverError::ConvergenceFailure {
            seeds_tried: seeds,
            max_iterations: self.config.max_iterations,
        })
    }

    /// Single Newton-Raphson run from `seed`
    fn newton_from(&self, cash_flows: &[f64], seed: f64) -> Option<IrrSolution> {
        let tolerance = self.config.tolerance;
        let mut guess = seed;

        for iteration in 1..=self.config.max_iterations {
            let (npv, dnpv) = npv_and_derivative(cash_flows, guess);

            // A NaN/inf guess can never meet the tolerance
            if !npv.is_finite() || !dnpv.is_finite() {
                debug!("Non-finite NPV at rate {} (seed {})", guess, seed);
                return None;
            }

            if npv.abs() < tolerance {
                return Some(IrrSolution { rate: guess, seed, iterations: iteration, npv });
            }

            if dnpv.abs() < DERIVATIVE_FLOOR {
                guess += FLAT_SLOPE_NUDGE;
                continue;
            }

            let new_guess = guess - npv / dnpv;

            if (new_guess - guess).abs() < tolerance {
                let (npv, _) = npv_and_derivative(cash_flows, new_guess);
                return Some(IrrSolution { rate: new_guess, seed, iterations: iteration, npv });
            }

            guess = new_guess;
        }

        None
    }
}

/// IRR with default settings (10% seed, 1% fallback, 1e-10 tolerance, 1000 iterations)
///
/// `None` means no rate was found; callers should show a neutral value.
pub fn irr(cash_flows: &[f64]) -> Option<f64> {
    irr_with_config(cash_flows, &SolverConfig::default())
}

/// IRR with explicit settings
pub fn irr_with_config(cash_flows: &[f64], config: &SolverConfig) -> Option<f64> {
    IrrSolver::new(config.clone())
        .solve(cash_flows)
        .ok()
        .map(|solution| solution.rate)
}
