//! Raw-table scanning shared by the dataset loaders: header-noise stripping,
//! canonical column resolution, and row-level coercion with an explicit
//! data-quality report instead of silent drops.

use chrono::{Datelike, NaiveDate};
use csv::ReaderBuilder;
use serde::Serialize;

use crate::config::constants::DATE_LABEL;
use crate::data::storage::StorageError;
use crate::models::series::{PricePoint, PriceSeries, YearMonth};

#[derive(Debug)]
pub enum PriceLoadError {
    Storage(StorageError),
    Csv(csv::Error),
    EmptySeries { key: String },
}

impl From<StorageError> for PriceLoadError {
    fn from(err: StorageError) -> Self {
        PriceLoadError::Storage(err)
    }
}

impl From<csv::Error> for PriceLoadError {
    fn from(err: csv::Error) -> Self {
        PriceLoadError::Csv(err)
    }
}

impl std::fmt::Display for PriceLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceLoadError::Storage(e) => write!(f, "Storage error: {}", e),
            PriceLoadError::Csv(e) => write!(f, "CSV error: {}", e),
            PriceLoadError::EmptySeries { key } => {
                write!(f, "No usable rows survived cleaning of '{}'", key)
            }
        }
    }
}

impl std::error::Error for PriceLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PriceLoadError::Storage(e) => Some(e),
            PriceLoadError::Csv(e) => Some(e),
            PriceLoadError::EmptySeries { .. } => None,
        }
    }
}

/// A row dropped during cleaning, and why. `line` is the 1-based source line
/// where one can be attributed.
#[derive(Debug, Clone, Serialize)]
pub struct RowIssue {
    pub line: Option<usize>,
    pub reason: String,
}

/// Aggregate data-quality outcome of cleaning one dataset. Rows outside the
/// requested year window are expected losses and tracked separately from
/// genuine issues.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanReport {
    pub rows_read: usize,
    pub rows_used: usize,
    pub rows_out_of_range: usize,
    pub issues: Vec<RowIssue>,
}

impl CleanReport {
    pub fn push_issue(&mut self, line: Option<usize>, reason: impl Into<String>) {
        self.issues.push(RowIssue {
            line,
            reason: reason.into(),
        });
    }
}

/// A cleaned series together with its data-quality report.
#[derive(Debug, Clone)]
pub struct CleanedSeries {
    pub series: PriceSeries,
    pub report: CleanReport,
}

/// A raw tabular blob: trimmed header labels plus positioned string records.
#[derive(Debug)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<(usize, Vec<String>)>,
}

impl RawTable {
    /// Parses CSV text, skipping `header_offset` leading noise rows; the next
    /// row becomes the header. Header labels are whitespace-trimmed.
    pub fn parse(text: &str, header_offset: usize) -> Result<Self, csv::Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut headers = Vec::new();
        let mut rows = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            if idx < header_offset {
                continue;
            }
            let cells: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
            if idx == header_offset {
                headers = cells;
            } else {
                rows.push((idx + 1, cells));
            }
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[(usize, Vec<String>)] {
        &self.rows
    }

    /// Index of the column whose trimmed label matches, if any.
    pub fn column(&self, label: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == label)
    }
}

/// Scans data rows into price points: parses the date cell with the supplied
/// format, coerces the price cell to a number, keeps years inside
/// `[start_year, end_year]`, and truncates dates to `YearMonth`. Every
/// dropped row is recorded in the returned report.
pub fn scan_price_rows(
    table: &RawTable,
    date_col: usize,
    price_col: usize,
    parse_date: fn(&str) -> Option<NaiveDate>,
    start_year: i32,
    end_year: i32,
) -> (Vec<PricePoint>, CleanReport) {
    let mut report = CleanReport::default();
    let mut points = Vec::new();

    for (line, cells) in table.rows() {
        report.rows_read += 1;

        let raw_date = match cells.get(date_col) {
            Some(cell) if !cell.is_empty() => cell,
            _ => {
                report.push_issue(Some(*line), "missing date cell");
                continue;
            }
        };

        // Some exports repeat the header mid-file when sheets are appended.
        if raw_date == DATE_LABEL {
            report.push_issue(Some(*line), "repeated header row");
            continue;
        }

        let date = match parse_date(raw_date) {
            Some(d) => d,
            None => {
                report.push_issue(Some(*line), format!("unparseable date '{}'", raw_date));
                continue;
            }
        };

        if date.year() < start_year || date.year() > end_year {
            report.rows_out_of_range += 1;
            continue;
        }

        let raw_price = match cells.get(price_col) {
            Some(cell) if !cell.is_empty() => cell,
            _ => {
                report.push_issue(Some(*line), "missing price cell");
                continue;
            }
        };

        let value: f64 = match raw_price.parse() {
            Ok(v) => v,
            Err(_) => {
                report.push_issue(Some(*line), format!("unparseable price '{}'", raw_price));
                continue;
            }
        };

        points.push(PricePoint {
            month: YearMonth::from_date(date),
            value,
        });
    }

    (points, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    #[test]
    fn header_offset_skips_noise_rows() {
        let text = "junk line one\njunk,line,two\nmore junk\nDate,Price\n2020-01-01,1.5\n";
        let table = RawTable::parse(text, 3).unwrap();
        assert_eq!(table.headers(), ["Date", "Price"]);
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.column("Price"), Some(1));
    }

    #[test]
    fn header_labels_are_trimmed() {
        let table = RawTable::parse(" Date , Value (USD/kWh) \n2020-01-01,0.2\n", 0).unwrap();
        assert_eq!(table.column("Value (USD/kWh)"), Some(1));
    }

    #[test]
    fn bad_rows_are_dropped_and_reported() {
        let text = "Date,Price\nN/A,1.0\n2020-01-01,abc\n2020-02-01,2.0\n";
        let table = RawTable::parse(text, 0).unwrap();
        let (points, report) = scan_price_rows(&table, 0, 1, iso, 2000, 2024);

        assert_eq!(points.len(), 1);
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.issues.len(), 2);
        assert!(report.issues[0].reason.contains("unparseable date"));
        assert!(report.issues[1].reason.contains("unparseable price"));
    }

    #[test]
    fn year_window_is_inclusive_and_not_an_issue() {
        let text = "Date,Price\n1999-12-01,1.0\n2000-01-01,1.1\n2024-12-01,3.0\n2025-01-01,3.1\n";
        let table = RawTable::parse(text, 0).unwrap();
        let (points, report) = scan_price_rows(&table, 0, 1, iso, 2000, 2024);

        assert_eq!(points.len(), 2);
        assert_eq!(report.rows_out_of_range, 2);
        assert!(report.issues.is_empty());
    }
}
