//! Cash flows keyed by calendar date

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated amount (positive = inflow, negative = outflow)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedCashFlow {
    pub date: NaiveDate,
    pub amount: f64,
}

impl DatedCashFlow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}
