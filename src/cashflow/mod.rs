//! Cash flow input: series types and CSV loading

mod dated;
mod series;
pub mod loader;

pub use dated::DatedCashFlow;
pub use series::{parse_amounts, CashFlowSeries};
pub use loader::{
    find_series, load_dated_series, load_dated_series_from_reader, load_series,
    load_series_from_reader, NamedDatedSeries, NamedSeries,
};
