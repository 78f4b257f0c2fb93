//! Periodic cash flow series

use crate::error::InputError;
use serde::{Deserialize, Serialize};

/// Signed amounts indexed by period, period 0 being the initial outlay
///
/// Construction checks the series is long enough to solve and holds only
/// finite amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CashFlowSeries {
    amounts: Vec<f64>,
}

impl CashFlowSeries {
    pub fn new(amounts: Vec<f64>) -> Result<Self, InputError> {
        if amounts.len() < 2 {
            return Err(InputError::TooShort(amounts.len()));
        }
        if let Some((period, &value)) = amounts.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InputError::NonFinite { period, value });
        }
        Ok(Self { amounts })
    }

    /// Parse a comma separated list such as "-1000, 300, 300"
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        Self::new(parse_amounts(raw)?)
    }

    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// True when both an inflow and an outflow are present
    pub fn has_sign_change(&self) -> bool {
        self.amounts.iter().any(|&cf| cf > 0.0) && self.amounts.iter().any(|&cf| cf < 0.0)
    }

    /// Undiscounted sum
    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }
}

impl TryFrom<Vec<f64>> for CashFlowSeries {
    type Error = InputError;

    fn try_from(amounts: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(amounts)
    }
}

impl From<CashFlowSeries> for Vec<f64> {
    fn from(series: CashFlowSeries) -> Self {
        series.amounts
    }
}

impl AsRef<[f64]> for CashFlowSeries {
    fn as_ref(&self) -> &[f64] {
        &self.amounts
    }
}

/// Parse comma separated amounts without checking the series shape
pub fn parse_amounts(raw: &str) -> Result<Vec<f64>, InputError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| InputError::Amount(s.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline() {
        let series = CashFlowSeries::parse("-1000, 300,300 ,400").unwrap();
        assert_eq!(series.amounts(), &[-1000.0, 300.0, 300.0, 400.0]);
        assert_eq!(series.len(), 4);
        assert!(series.has_sign_change());
        assert_eq!(series.total(), 0.0);
    }

    #[test]
    fn test_rejects_short_series() {
        assert!(matches!(CashFlowSeries::new(vec![-5.0]), Err(InputError::TooShort(1))));
        assert!(matches!(CashFlowSeries::parse(""), Err(InputError::TooShort(0))));
    }

    #[test]
    fn test_rejects_bad_amounts() {
        assert!(matches!(CashFlowSeries::parse("-100,abc"), Err(InputError::Amount(s)) if s == "abc"));
        assert!(matches!(
            CashFlowSeries::new(vec![-100.0, f64::INFINITY]),
            Err(InputError::NonFinite { period: 1, .. })
        ));
    }

    #[test]
    fn test_sign_change() {
        assert!(!CashFlowSeries::new(vec![100.0, 50.0]).unwrap().has_sign_change());
        assert!(!CashFlowSeries::new(vec![0.0, 0.0]).unwrap().has_sign_change());
    }

    #[test]
    fn test_json_shape() {
        let series: CashFlowSeries = serde_json::from_str("[-100.0, 110.0]").unwrap();
        assert_eq!(series.amounts(), &[-100.0, 110.0]);
        assert_eq!(serde_json::to_string(&series).unwrap(), "[-100.0,110.0]");
        assert!(serde_json::from_str::<CashFlowSeries>("[1.0]").is_err());
    }
}
