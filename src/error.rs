//! Error types for cash flow input and the IRR solver

use thiserror::Error;

/// Problems with cash flow input (loading, parsing, validation)
#[derive(Error, Debug)]
pub enum InputError {
    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date '{value}': {source}")]
    Date {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid amount '{0}'")]
    Amount(String),

    #[error("Cash flow series needs at least 2 entries, got {0}")]
    TooShort(usize),

    #[error("Cash flow at period {period} is not finite ({value})")]
    NonFinite { period: usize, value: f64 },

    #[error("Series '{series}' has a gap: expected period {expected}, found {found}")]
    PeriodGap {
        series: String,
        expected: u32,
        found: u32,
    },

    #[error("Series '{series}' repeats period {period}")]
    DuplicatePeriod { series: String, period: u32 },

    #[error("Series '{0}' not found")]
    UnknownSeries(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Reasons the solver produced no rate
///
/// Only `ConvergenceFailure` comes out of the iteration itself; the other two
/// are shapes rejected before iterating.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Need at least 2 cash flows, got {0}")]
    TooFewCashFlows(usize),

    #[error("Cash flows have no sign change, no IRR exists")]
    NoSignChange,

    #[error("No convergence after {max_iterations} iterations from seeds {seeds_tried:?}")]
    ConvergenceFailure {
        seeds_tried: Vec<f64>,
        max_iterations: u32,
    },
}
