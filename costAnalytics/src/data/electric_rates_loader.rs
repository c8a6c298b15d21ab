use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::constants::{
    DATE_LABEL, ELECTRIC_HEADER_OFFSET, ELECTRIC_RATE_LABEL, ELECTRIC_RATE_SOURCE_LABEL,
};
use crate::data::cleaning::{scan_price_rows, CleanedSeries, PriceLoadError, RawTable};
use crate::data::storage::ObjectStore;
use crate::models::series::PriceSeries;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// Loads and cleans the California electric rate dataset ($/kWh).
///
/// The export usually labels the rate column `Value (USD/kWh)`; that label is
/// renamed to the canonical `Electric Rate`, falling back to the second
/// column when neither label is present. Dates are ISO-like.
pub fn load_electric_rates(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    start_year: i32,
    end_year: i32,
) -> Result<CleanedSeries, PriceLoadError> {
    let _timing = logging::start_timing(
        "load_electric_rates",
        OperationCategory::FileIO {
            subcategory: FileIOType::DataLoad,
        },
    );

    let text = store.get_text(bucket, key)?;
    let table = RawTable::parse(&text, ELECTRIC_HEADER_OFFSET)?;

    let date_col = table.column(DATE_LABEL).unwrap_or(0);
    let rate_col = table
        .column(ELECTRIC_RATE_SOURCE_LABEL)
        .or_else(|| table.column(ELECTRIC_RATE_LABEL))
        .unwrap_or(1);

    let (points, mut report) =
        scan_price_rows(&table, date_col, rate_col, parse_iso_date, start_year, end_year);

    let (series, duplicates) = PriceSeries::from_points(points);
    for month in duplicates {
        report.push_issue(None, format!("duplicate month {}, first value kept", month));
    }
    report.rows_used = series.len();

    for issue in &report.issues {
        warn!(line = issue.line, "{}: {}", key, issue.reason);
    }
    debug!(
        "Electric rates: {} of {} rows usable ({} outside year window)",
        report.rows_used, report.rows_read, report.rows_out_of_range
    );

    if series.is_empty() {
        return Err(PriceLoadError::EmptySeries {
            key: key.to_string(),
        });
    }

    Ok(CleanedSeries { series, report })
}

/// ISO day stamps (`2020-01-01`), with month-only stamps (`2020-01`)
/// accepted as the first of the month.
fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").ok())
}
