//! Solver output for display and export
//!
//! A missing rate is a normal outcome and renders as "N/A".

use crate::error::{InputError, SolverError};
use crate::irr::{annualize, IrrSolution};
use serde::Serialize;
use std::io::Write;

/// Displayed when no rate was found
pub const NO_RESULT: &str = "N/A";

/// One IRR computation, flattened for JSON/CSV output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrrReport {
    pub series_id: Option<String>,
    pub periods: usize,
    pub converged: bool,
    /// Periodic rate as a decimal
    pub rate: Option<f64>,
    pub rate_pct: Option<f64>,
    pub annualized_rate_pct: Option<f64>,
    pub seed: Option<f64>,
    pub iterations: Option<u32>,
    /// Why no rate was produced
    pub failure: Option<String>,
}

impl IrrReport {
    /// Build from a solver outcome; `periods_per_year` adds an annualized rate
    pub fn new(
        periods: usize,
        outcome: &Result<IrrSolution, SolverError>,
        periods_per_year: Option<u32>,
    ) -> Self {
        match outcome {
            Ok(solution) => Self {
                series_id: None,
                periods,
                converged: true,
                rate: Some(solution.rate),
                rate_pct: Some(solution.rate * 100.0),
                annualized_rate_pct: periods_per_year.map(|p| annualize(solution.rate, p) * 100.0),
                seed: Some(solution.seed),
                iterations: Some(solution.iterations),
                failure: None,
            },
            Err(err) => Self {
                series_id: None,
                periods,
                converged: false,
                rate: None,
                rate_pct: None,
                annualized_rate_pct: None,
                seed: None,
                iterations: None,
                failure: Some(err.to_string()),
            },
        }
    }

    pub fn with_series_id(mut self, id: impl Into<String>) -> Self {
        self.series_id = Some(id.into());
        self
    }

    /// Periodic rate as "15.24%" or "N/A"
    pub fn display_rate(&self) -> String {
        format_pct(self.rate_pct)
    }

    /// Annualized rate as "15.24%" or "N/A"
    pub fn display_annualized(&self) -> String {
        format_pct(self.annualized_rate_pct)
    }
}

/// Format a percentage to two decimals, "N/A" when absent
pub fn format_pct(pct: Option<f64>) -> String {
    match pct {
        Some(pct) => format!("{:.2}%", pct),
        None => NO_RESULT.to_string(),
    }
}

/// Write reports as CSV with a header row
pub fn write_reports_csv<W: Write>(reports: &[IrrReport], writer: W) -> Result<(), InputError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for report in reports {
        csv_writer.serialize(report)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn solved(rate: f64) -> Result<IrrSolution, SolverError> {
        Ok(IrrSolution { rate, seed: 0.1, iterations: 4, npv: 0.0 })
    }

    #[test]
    fn test_converged_report() {
        let report = IrrReport::new(13, &solved(0.01), Some(12));
        assert!(report.converged);
        assert_eq!(report.display_rate(), "1.00%");
        assert_abs_diff_eq!(report.annualized_rate_pct.unwrap(), 12.682503, epsilon = 1e-5);
        assert_eq!(report.display_annualized(), "12.68%");
        assert_eq!(report.failure, None);
    }

    #[test]
    fn test_failed_report_degrades() {
        let report = IrrReport::new(2, &Err(SolverError::NoSignChange), Some(12)).with_series_id("x");
        assert!(!report.converged);
        assert_eq!(report.display_rate(), NO_RESULT);
        assert_eq!(report.display_annualized(), NO_RESULT);
        assert_eq!(report.series_id.as_deref(), Some("x"));
        assert!(report.failure.unwrap().contains("sign change"));
    }

    #[test]
    fn test_json_missing_id_is_null() {
        let report = IrrReport::new(2, &solved(0.1), None);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["series_id"].is_null());
        assert_eq!(json["converged"], true);
        assert!(json["annualized_rate_pct"].is_null());
    }

    #[test]
    fn test_csv_mixed_ids() {
        let reports = vec![
            IrrReport::new(2, &solved(0.1), None),
            IrrReport::new(2, &solved(0.2), None).with_series_id("a"),
        ];
        let mut buf = Vec::new();
        write_reports_csv(&reports, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with(",2,true,0.1"));
        assert!(lines[2].starts_with("a,2,true,0.2"));
        let widths: Vec<usize> = lines.iter().map(|l| l.split(',').count()).collect();
        assert!(widths.iter().all(|&w| w == widths[0]));
    }

    #[test]
    fn test_csv_output() {
        let reports = vec![
            IrrReport::new(2, &solved(0.1), None).with_series_id("a"),
            IrrReport::new(1, &Err(SolverError::TooFewCashFlows(1)), None).with_series_id("b"),
        ];
        let mut buf = Vec::new();
        write_reports_csv(&reports, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("series_id,periods,converged,rate"));
        assert!(lines.next().unwrap().starts_with("a,2,true,0.1"));
        assert!(lines.next().unwrap().starts_with("b,1,false,,"));
    }
}
