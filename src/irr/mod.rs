//! Internal Rate of Return solving
//!
//! Newton-Raphson on NPV with a flat-slope nudge and fallback seeds.

mod config;
mod npv;
mod solver;
mod xirr;

pub use config::{
    parse_rate_list, SolverConfig, DEFAULT_FALLBACK_SEED, DEFAULT_INITIAL_GUESS,
    DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, DERIVATIVE_FLOOR, FLAT_SLOPE_NUDGE,
};
pub use npv::{annualize, npv, npv_and_derivative};
pub use solver::{irr, irr_with_config, IrrSolution, IrrSolver};
pub use xirr::{xirr, xirr_detailed, xirr_with_config};
