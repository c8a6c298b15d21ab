use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::constants::{DATE_LABEL, GAS_HEADER_OFFSET, GAS_PRICE_LABEL};
use crate::data::cleaning::{scan_price_rows, CleanedSeries, PriceLoadError, RawTable};
use crate::data::storage::ObjectStore;
use crate::models::series::PriceSeries;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// Loads and cleans the monthly gas price dataset ($/gallon).
///
/// The published export carries three rows of noise before the header line.
/// When the header row is not the stable `Date,...` header, the first two
/// columns are taken positionally and treated as date and price.
pub fn load_gas_prices(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    start_year: i32,
    end_year: i32,
) -> Result<CleanedSeries, PriceLoadError> {
    let _timing = logging::start_timing(
        "load_gas_prices",
        OperationCategory::FileIO {
            subcategory: FileIOType::DataLoad,
        },
    );

    let text = store.get_text(bucket, key)?;
    let table = RawTable::parse(&text, GAS_HEADER_OFFSET)?;

    let (date_col, price_col) = match (table.column(DATE_LABEL), table.column(GAS_PRICE_LABEL)) {
        (Some(date), Some(price)) => (date, price),
        _ => (0, 1),
    };

    let (points, mut report) =
        scan_price_rows(&table, date_col, price_col, parse_month_year, start_year, end_year);

    let (series, duplicates) = PriceSeries::from_points(points);
    for month in duplicates {
        report.push_issue(None, format!("duplicate month {}, first value kept", month));
    }
    report.rows_used = series.len();

    for issue in &report.issues {
        warn!(line = issue.line, "{}: {}", key, issue.reason);
    }
    debug!(
        "Gas prices: {} of {} rows usable ({} outside year window)",
        report.rows_used, report.rows_read, report.rows_out_of_range
    );

    if series.is_empty() {
        return Err(PriceLoadError::EmptySeries {
            key: key.to_string(),
        });
    }

    Ok(CleanedSeries { series, report })
}

/// `Mon-YYYY` month labels, e.g. `Jan-2020`.
fn parse_month_year(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01-{}", raw), "%d-%b-%Y").ok()
}
