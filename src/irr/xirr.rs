//! XIRR entry points
//!
//! Dated cash flows are solved as a plain periodic IRR: the dates are
//! dropped and each entry counts as one period, in the order given. No
//! day-count weighting is applied.

use super::config::SolverConfig;
use super::solver::{irr_with_config, IrrSolution, IrrSolver};
use crate::cashflow::DatedCashFlow;
use crate::error::SolverError;

/// XIRR with default settings
pub fn xirr(flows: &[DatedCashFlow]) -> Option<f64> {
    xirr_with_config(flows, &SolverConfig::default())
}

/// XIRR with explicit settings
pub fn xirr_with_config(flows: &[DatedCashFlow], config: &SolverConfig) -> Option<f64> {
    irr_with_config(&amounts(flows), config)
}

/// XIRR through a solver, keeping the diagnostics
pub fn xirr_detailed(solver: &IrrSolver, flows: &[DatedCashFlow]) -> Result<IrrSolution, SolverError> {
    solver.solve(&amounts(flows))
}

fn amounts(flows: &[DatedCashFlow]) -> Vec<f64> {
    flows.iter().map(|flow| flow.amount).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irr::irr;
    use chrono::NaiveDate;

    fn dated(y: i32, m: u32, d: u32, amount: f64) -> DatedCashFlow {
        DatedCashFlow::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), amount)
    }

    #[test]
    fn test_matches_periodic_irr() {
        let flows = vec![
            dated(2024, 1, 1, -1000.0),
            dated(2024, 3, 15, 300.0),
            dated(2025, 1, 1, 400.0),
            dated(2025, 2, 1, 500.0),
        ];

        let expected = irr(&[-1000.0, 300.0, 400.0, 500.0]);
        assert!(expected.is_some());
        assert_eq!(xirr(&flows), expected);
    }

    #[test]
    fn test_spacing_is_ignored() {
        let tight = vec![dated(2024, 1, 1, -100.0), dated(2024, 1, 2, 110.0)];
        let wide = vec![dated(2024, 1, 1, -100.0), dated(2030, 1, 1, 110.0)];
        assert_eq!(xirr(&tight), xirr(&wide));
    }

    #[test]
    fn test_no_result_passthrough() {
        assert_eq!(xirr(&[dated(2024, 1, 1, -100.0)]), None);
        let err = xirr_detailed(&IrrSolver::default(), &[dated(2024, 1, 1, 5.0), dated(2024, 2, 1, 5.0)]);
        assert_eq!(err, Err(SolverError::NoSignChange));
    }
}
