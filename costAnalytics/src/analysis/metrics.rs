use serde::{Deserialize, Serialize};

use crate::config::efficiency::EfficiencyConfig;
use crate::models::series::YearMonth;

/// Scalar summary statistics for one price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Scalar outputs of one full pipeline pass over the merged series.
///
/// Correlation and change fields are `None` when the merged window is too
/// short (or too flat) to define them; they are never NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostMetrics {
    pub months: usize,
    pub first_month: YearMonth,
    pub last_month: YearMonth,

    // Long-term co-movement of the two raw price series
    pub price_correlation: Option<f64>,

    // Month-over-month behavior; means exclude the undefined first record
    pub mean_gas_change_pct: Option<f64>,
    pub mean_electric_change_pct: Option<f64>,
    pub gas_change_volatility: Option<f64>,
    pub electric_change_volatility: Option<f64>,
    pub rate_change_correlation: Option<f64>,

    // Per-series summaries
    pub gas_stats: Option<DescriptiveStats>,
    pub electric_stats: Option<DescriptiveStats>,

    // Cost per mile under the supplied efficiency assumptions
    pub efficiency: EfficiencyConfig,
    pub mean_gas_cost_per_mile: Option<f64>,
    pub mean_ev_cost_per_mile: Option<f64>,
}
