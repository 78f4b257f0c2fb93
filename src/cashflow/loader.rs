//! Load cash flow series from CSV
//!
//! Two long-form layouts are supported:
//! - periodic: `SeriesId,Period,Amount` with periods 0..n per series
//! - dated:    `SeriesId,Date,Amount` with `YYYY-MM-DD` dates
//!
//! Series keep the order in which their ids first appear in the file.

use super::DatedCashFlow;
use crate::error::InputError;
use chrono::NaiveDate;
use csv::Reader;
use log::debug;
use std::path::Path;

/// A periodic series as read from file (shape not yet validated)
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub id: String,
    pub amounts: Vec<f64>,
}

/// A dated series as read from file, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct NamedDatedSeries {
    pub id: String,
    pub flows: Vec<DatedCashFlow>,
}

#[derive(Debug, serde::Deserialize)]
struct PeriodRow {
    #[serde(rename = "SeriesId")]
    series_id: String,
    #[serde(rename = "Period")]
    period: u32,
    #[serde(rename = "Amount")]
    amount: f64,
}

#[derive(Debug, serde::Deserialize)]
struct DatedRow {
    #[serde(rename = "SeriesId")]
    series_id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Amount")]
    amount: f64,
}

impl DatedRow {
    fn to_flow(&self) -> Result<DatedCashFlow, InputError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|source| {
            InputError::Date {
                value: self.date.clone(),
                source,
            }
        })?;
        Ok(DatedCashFlow::new(date, self.amount))
    }
}

/// Index of `id` in `groups`, appending a new group if unseen
fn group_index<T>(groups: &mut Vec<(String, Vec<T>)>, id: &str) -> usize {
    match groups.iter().position(|(existing, _)| existing == id) {
        Some(idx) => idx,
        None => {
            groups.push((id.to_string(), Vec::new()));
            groups.len() - 1
        }
    }
}

/// Load periodic series from a CSV file
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<Vec<NamedSeries>, InputError> {
    let reader = Reader::from_path(path)?;
    read_series(reader)
}

/// Load periodic series from any reader (e.g., string buffer, stdin)
pub fn load_series_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<NamedSeries>, InputError> {
    read_series(Reader::from_reader(reader))
}

fn read_series<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<NamedSeries>, InputError> {
    let mut groups: Vec<(String, Vec<(u32, f64)>)> = Vec::new();

    for result in reader.deserialize() {
        let row: PeriodRow = result?;
        let idx = group_index(&mut groups, &row.series_id);
        groups[idx].1.push((row.period, row.amount));
    }

    let mut series = Vec::with_capacity(groups.len());
    for (id, mut rows) in groups {
        rows.sort_by_key(|&(period, _)| period);
        for (expected, &(found, _)) in rows.iter().enumerate() {
            if expected > 0 && found == rows[expected - 1].0 {
                return Err(InputError::DuplicatePeriod { series: id, period: found });
            }
            if found != expected as u32 {
                return Err(InputError::PeriodGap {
                    series: id,
                    expected: expected as u32,
                    found,
                });
            }
        }
        series.push(NamedSeries {
            id,
            amounts: rows.into_iter().map(|(_, amount)| amount).collect(),
        });
    }

    debug!("Loaded {} periodic series", series.len());
    Ok(series)
}

/// Load dated series from a CSV file
pub fn load_dated_series<P: AsRef<Path>>(path: P) -> Result<Vec<NamedDatedSeries>, InputError> {
    let reader = Reader::from_path(path)?;
    read_dated_series(reader)
}

/// Load dated series from any reader
pub fn load_dated_series_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<NamedDatedSeries>, InputError> {
    read_dated_series(Reader::from_reader(reader))
}

fn read_dated_series<R: std::io::Read>(
    mut reader: Reader<R>,
) -> Result<Vec<NamedDatedSeries>, InputError> {
    let mut groups: Vec<(String, Vec<DatedCashFlow>)> = Vec::new();

    for result in reader.deserialize() {
        let row: DatedRow = result?;
        let flow = row.to_flow()?;
        let idx = group_index(&mut groups, &row.series_id);
        groups[idx].1.push(flow);
    }

    debug!("Loaded {} dated series", groups.len());
    Ok(groups
        .into_iter()
        .map(|(id, flows)| NamedDatedSeries { id, flows })
        .collect())
}

/// Pick one series by id
pub fn find_series<'a>(series: &'a [NamedSeries], id: &str) -> Result<&'a NamedSeries, InputError> {
    series
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| InputError::UnknownSeries(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIODIC: &str = "\
SeriesId,Period,Amount
fund-a,0,-1000
fund-b,0,-100
fund-a,2,300
fund-a,1,300
fund-b,1,110
";

    #[test]
    fn test_load_periodic_grouped_and_sorted() {
        let series = load_series_from_reader(PERIODIC.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);

        assert_eq!(series[0].id, "fund-a");
        assert_eq!(series[0].amounts, vec![-1000.0, 300.0, 300.0]);
        assert_eq!(series[1].id, "fund-b");
        assert_eq!(series[1].amounts, vec![-100.0, 110.0]);

        assert_eq!(find_series(&series, "fund-b").unwrap().amounts.len(), 2);
        assert!(matches!(find_series(&series, "nope"), Err(InputError::UnknownSeries(_))));
    }

    #[test]
    fn test_period_gap_rejected() {
        let csv = "SeriesId,Period,Amount\nx,0,-10\nx,2,12\n";
        let err = load_series_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::PeriodGap { expected: 1, found: 2, .. }));
    }

    #[test]
    fn test_duplicate_period_rejected() {
        let csv = "SeriesId,Period,Amount\nx,0,-10\nx,0,-5\nx,1,20\n";
        let err = load_series_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::DuplicatePeriod { ref series, period: 0 } if series == "x"));
    }

    #[test]
    fn test_bad_amount_is_csv_error() {
        let csv = "SeriesId,Period,Amount\nx,0,ten\n";
        assert!(matches!(load_series_from_reader(csv.as_bytes()), Err(InputError::Csv(_))));
    }

    #[test]
    fn test_load_dated_keeps_file_order() {
        let csv = "\
SeriesId,Date,Amount
deal,2024-01-15,-5000
deal,2025-06-30,2000
other,2024-02-01,-10
deal,2024-12-31,3500
";
        let series = load_dated_series_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);

        let amounts: Vec<f64> = series[0].flows.iter().map(|f| f.amount).collect();
        assert_eq!(amounts, vec![-5000.0, 2000.0, 3500.0]);
        assert_eq!(series[0].flows[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_bad_date_rejected() {
        let csv = "SeriesId,Date,Amount\ndeal,15/01/2024,-5000\n";
        let err = load_dated_series_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::Date { ref value, .. } if value == "15/01/2024"));
    }
}
