use std::cmp::Ordering;

use tracing::debug;

use crate::models::merged::{MergedRecord, MergedSeries};
use crate::models::series::PriceSeries;
use crate::utils::logging::{self, OperationCategory};

#[derive(Debug)]
pub enum MergeError {
    EmptyInput { which: &'static str },
    EmptyIntersection { gas_months: usize, electric_months: usize },
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeError::EmptyInput { which } => {
                write!(f, "Cannot merge: the {} series is empty", which)
            }
            MergeError::EmptyIntersection {
                gas_months,
                electric_months,
            } => write!(
                f,
                "No overlapping months between the series ({} gas, {} electric)",
                gas_months, electric_months
            ),
        }
    }
}

impl std::error::Error for MergeError {}

/// Inner-joins the two series on their month key. Months present in only one
/// series are excluded; a join with no overlap at all is a hard error so the
/// metrics stage never sees an empty dataset.
pub fn merge_on_month(
    gas: &PriceSeries,
    electric: &PriceSeries,
) -> Result<MergedSeries, MergeError> {
    let _timing = logging::start_timing("merge_on_month", OperationCategory::Merge);

    if gas.is_empty() {
        return Err(MergeError::EmptyInput { which: "gas" });
    }
    if electric.is_empty() {
        return Err(MergeError::EmptyInput { which: "electric" });
    }

    // Both series are month-sorted, so a linear two-pointer walk suffices.
    let gas_points = gas.points();
    let electric_points = electric.points();
    let mut records = Vec::with_capacity(gas_points.len().min(electric_points.len()));
    let (mut i, mut j) = (0, 0);

    while i < gas_points.len() && j < electric_points.len() {
        match gas_points[i].month.cmp(&electric_points[j].month) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                records.push(MergedRecord {
                    month: gas_points[i].month,
                    gas_price: gas_points[i].value,
                    electric_rate: electric_points[j].value,
                });
                i += 1;
                j += 1;
            }
        }
    }

    if records.is_empty() {
        return Err(MergeError::EmptyIntersection {
            gas_months: gas.len(),
            electric_months: electric.len(),
        });
    }

    debug!(
        "Merged {} months from {} gas and {} electric",
        records.len(),
        gas.len(),
        electric.len()
    );

    Ok(MergedSeries::new(records))
}
