use serde::Serialize;

use crate::analysis::metrics::CostMetrics;
use crate::analysis::metrics_calculation as calc;
use crate::config::efficiency::EfficiencyConfig;
use crate::models::merged::MergedSeries;
use crate::models::series::YearMonth;
use crate::utils::logging::{self, OperationCategory};

/// Cost-per-mile series for both energy sources, aligned to the merged
/// series' month index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostPerMileSeries {
    pub months: Vec<YearMonth>,
    pub gas: Vec<f64>,
    pub ev: Vec<f64>,
}

/// Holds the merged series and derives everything else on demand.
///
/// An efficiency change (the dashboard sliders) is served by calling
/// [`CostModel::cost_per_mile`] or [`CostModel::metrics`] again with the new
/// config: a full recompute over a few hundred rows, not an incremental
/// update. Identical inputs always produce identical outputs.
#[derive(Debug, Clone)]
pub struct CostModel {
    merged: MergedSeries,
}

impl CostModel {
    pub fn new(merged: MergedSeries) -> Self {
        Self { merged }
    }

    pub fn merged(&self) -> &MergedSeries {
        &self.merged
    }

    pub fn cost_per_mile(&self, efficiency: &EfficiencyConfig) -> CostPerMileSeries {
        CostPerMileSeries {
            months: self.merged.months(),
            gas: calc::cost_per_mile(&self.merged.gas_prices(), efficiency.gas_mpg),
            ev: calc::cost_per_mile(&self.merged.electric_rates(), efficiency.ev_miles_per_kwh),
        }
    }

    /// Gas month-over-month change, length `merged.len() - 1`.
    pub fn gas_change_pct(&self) -> Vec<f64> {
        calc::percentage_change(&self.merged.gas_prices())
    }

    /// Electric month-over-month change, length `merged.len() - 1`.
    pub fn electric_change_pct(&self) -> Vec<f64> {
        calc::percentage_change(&self.merged.electric_rates())
    }

    pub fn metrics(&self, efficiency: &EfficiencyConfig) -> CostMetrics {
        let _timing = logging::start_timing("cost_metrics", OperationCategory::Pipeline);

        let gas_prices = self.merged.gas_prices();
        let electric_rates = self.merged.electric_rates();

        let gas_changes = calc::percentage_change(&gas_prices);
        let electric_changes = calc::percentage_change(&electric_rates);

        let cost = self.cost_per_mile(efficiency);

        CostMetrics {
            months: self.merged.len(),
            first_month: self.merged.first_month().unwrap_or(YearMonth::new(0, 1)),
            last_month: self.merged.last_month().unwrap_or(YearMonth::new(0, 1)),
            price_correlation: calc::pearson_correlation(&gas_prices, &electric_rates),
            mean_gas_change_pct: calc::mean(&gas_changes),
            mean_electric_change_pct: calc::mean(&electric_changes),
            gas_change_volatility: calc::std_dev(&gas_changes),
            electric_change_volatility: calc::std_dev(&electric_changes),
            rate_change_correlation: calc::pearson_correlation(&gas_changes, &electric_changes),
            gas_stats: calc::descriptive_stats(&gas_prices),
            electric_stats: calc::descriptive_stats(&electric_rates),
            efficiency: *efficiency,
            mean_gas_cost_per_mile: calc::mean(&cost.gas),
            mean_ev_cost_per_mile: calc::mean(&cost.ev),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::merge::merge_on_month;
    use crate::models::series::{PricePoint, PriceSeries};

    fn model() -> CostModel {
        let gas = PriceSeries::from_points(vec![
            PricePoint { month: YearMonth::new(2020, 1), value: 3.00 },
            PricePoint { month: YearMonth::new(2020, 2), value: 3.30 },
        ])
        .0;
        let electric = PriceSeries::from_points(vec![
            PricePoint { month: YearMonth::new(2020, 1), value: 0.20 },
            PricePoint { month: YearMonth::new(2020, 2), value: 0.22 },
        ])
        .0;
        CostModel::new(merge_on_month(&gas, &electric).unwrap())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn default_efficiencies_reproduce_dashboard_figures() {
        let model = model();
        let cost = model.cost_per_mile(&EfficiencyConfig::default());

        assert_eq!(cost.months.len(), 2);
        assert_close(cost.gas[0], 0.12);
        assert_close(cost.gas[1], 0.132);
        assert_close(cost.ev[0], 0.05);
        assert_close(cost.ev[1], 0.055);
    }

    #[test]
    fn doubling_ev_efficiency_halves_ev_cost() {
        let model = model();
        let at_four = model.cost_per_mile(&EfficiencyConfig::new(25.0, 4.0).unwrap());
        let at_eight = model.cost_per_mile(&EfficiencyConfig::new(25.0, 8.0).unwrap());

        assert_close(at_four.ev[0], 0.05);
        assert_close(at_eight.ev[0], 0.025);
        // Gas side is untouched by the EV slider.
        assert_eq!(at_four.gas, at_eight.gas);
    }

    #[test]
    fn gas_change_matches_dashboard_scenario() {
        let model = model();
        let changes = model.gas_change_pct();
        assert_eq!(changes.len(), 1);
        assert_close(changes[0], 10.0);
    }

    #[test]
    fn metrics_are_deterministic_across_recomputes() {
        let model = model();
        let config = EfficiencyConfig::default();
        assert_eq!(model.metrics(&config), model.metrics(&config));
    }

    #[test]
    fn two_month_window_defines_price_correlation_only() {
        let metrics = model().metrics(&EfficiencyConfig::default());
        assert_eq!(metrics.months, 2);
        assert!(metrics.price_correlation.is_some());
        // Only one change observation exists, not enough to correlate.
        assert_eq!(metrics.rate_change_correlation, None);
        assert_close(metrics.mean_gas_change_pct.unwrap(), 10.0);
    }
}
