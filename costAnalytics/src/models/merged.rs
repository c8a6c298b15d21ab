use serde::{Deserialize, Serialize};

use crate::models::series::YearMonth;

/// One month of joined prices. Derived values (percentage change, cost per
/// mile) are computed from the series and an efficiency config, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub month: YearMonth,
    pub gas_price: f64,
    pub electric_rate: f64,
}

/// Inner-join of the gas and electric series, ordered by month.
/// Constructed only by the merge step, which guarantees it is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedSeries {
    records: Vec<MergedRecord>,
}

impl MergedSeries {
    pub(crate) fn new(records: Vec<MergedRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MergedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn months(&self) -> Vec<YearMonth> {
        self.records.iter().map(|r| r.month).collect()
    }

    pub fn gas_prices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.gas_price).collect()
    }

    pub fn electric_rates(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.electric_rate).collect()
    }

    pub fn first_month(&self) -> Option<YearMonth> {
        self.records.first().map(|r| r.month)
    }

    pub fn last_month(&self) -> Option<YearMonth> {
        self.records.last().map(|r| r.month)
    }
}
