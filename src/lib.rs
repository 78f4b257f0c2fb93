//! IRR Solver - Internal Rate of Return for calculator cash flows
//!
//! This library provides:
//! - Newton-Raphson IRR with a flat-slope nudge and fallback seeds
//! - XIRR entry points over dated cash flows (solved as periodic IRR)
//! - NPV helpers and periodic-to-annual rate conversion
//! - CSV loading of many series and parallel batch solving
//! - Report output with "N/A" for series that do not converge

pub mod error;
pub mod cashflow;
pub mod irr;
pub mod batch;
pub mod report;

// Re-export commonly used types
pub use error::{InputError, SolverError};
pub use cashflow::{CashFlowSeries, DatedCashFlow};
pub use irr::{irr, irr_with_config, xirr, IrrSolution, IrrSolver, SolverConfig};
pub use batch::BatchRunner;
pub use report::IrrReport;
