use crate::analysis::metrics::DescriptiveStats;
use crate::utils::logging::{self, MetricsCalcType, OperationCategory};

/// Pearson correlation coefficient over paired observations. `None` when
/// fewer than two pairs exist or either side has zero variance.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let _timing = logging::start_timing(
        "pearson_correlation",
        OperationCategory::MetricsCalculation {
            subcategory: MetricsCalcType::Correlation,
        },
    );

    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x == 0.0 || variance_y == 0.0 {
        return None;
    }

    Some(covariance / (variance_x.sqrt() * variance_y.sqrt()))
}

/// Month-over-month percentage change. The first observation has no
/// predecessor, so the output is one shorter than the input and the first
/// month is excluded from any mean taken over the result.
pub fn percentage_change(values: &[f64]) -> Vec<f64> {
    let _timing = logging::start_timing(
        "percentage_change",
        OperationCategory::MetricsCalculation {
            subcategory: MetricsCalcType::RateChange,
        },
    );

    values
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0] * 100.0)
        .collect()
}

/// Price per unit fuel divided by vehicle efficiency, per month.
pub fn cost_per_mile(prices: &[f64], efficiency: f64) -> Vec<f64> {
    let _timing = logging::start_timing(
        "cost_per_mile",
        OperationCategory::MetricsCalculation {
            subcategory: MetricsCalcType::CostPerMile,
        },
    );

    prices.iter().map(|price| price / efficiency).collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sample standard deviation (n - 1 denominator). `None` below two values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

pub fn descriptive_stats(values: &[f64]) -> Option<DescriptiveStats> {
    let _timing = logging::start_timing(
        "descriptive_stats",
        OperationCategory::MetricsCalculation {
            subcategory: MetricsCalcType::Descriptive,
        },
    );

    if values.is_empty() {
        return None;
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    Some(DescriptiveStats {
        mean: mean(values)?,
        median: median(values)?,
        std_dev: std_dev(values).unwrap_or(0.0),
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn perfectly_linear_series_correlate_at_one() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        assert_close(pearson_correlation(&xs, &ys).unwrap(), 1.0);

        let inverted = [8.0, 6.0, 4.0, 2.0];
        assert_close(pearson_correlation(&xs, &inverted).unwrap(), -1.0);
    }

    #[test]
    fn correlation_stays_in_unit_interval() {
        let xs = [3.1, 2.7, 3.9, 3.3, 2.5, 4.1];
        let ys = [0.21, 0.19, 0.24, 0.20, 0.22, 0.23];
        let r = pearson_correlation(&xs, &ys).unwrap();
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn degenerate_correlation_inputs_yield_none() {
        assert_eq!(pearson_correlation(&[1.0], &[2.0]), None);
        assert_eq!(pearson_correlation(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]), None);
        assert_eq!(pearson_correlation(&[], &[]), None);
    }

    #[test]
    fn percentage_change_is_one_shorter_than_input() {
        let changes = percentage_change(&[3.00, 3.30]);
        assert_eq!(changes.len(), 1);
        assert_close(changes[0], 10.0);

        assert!(percentage_change(&[3.00]).is_empty());
        assert!(percentage_change(&[]).is_empty());
    }

    #[test]
    fn cost_per_mile_divides_by_efficiency() {
        let gas = cost_per_mile(&[3.00, 3.30], 25.0);
        assert_close(gas[0], 0.12);
        assert_close(gas[1], 0.132);

        let ev = cost_per_mile(&[0.20, 0.22], 4.0);
        assert_close(ev[0], 0.05);
        assert_close(ev[1], 0.055);
    }

    #[test]
    fn higher_efficiency_strictly_lowers_cost_per_mile() {
        let prices = [0.20, 0.25, 0.30];
        let at_four = cost_per_mile(&prices, 4.0);
        let at_eight = cost_per_mile(&prices, 8.0);
        for (low, high) in at_eight.iter().zip(at_four.iter()) {
            assert!(low < high);
            assert!(*low >= 0.0);
        }
        assert_close(at_eight[0], at_four[0] / 2.0);
    }

    #[test]
    fn descriptive_stats_cover_the_spread() {
        let stats = descriptive_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_close(stats.mean, 2.5);
        assert_close(stats.median, 2.5);
        assert_close(stats.min, 1.0);
        assert_close(stats.max, 4.0);
        // Sample std dev of 1..4.
        assert_close(stats.std_dev, (5.0f64 / 3.0).sqrt());

        assert_eq!(descriptive_stats(&[]), None);
    }

    #[test]
    fn median_of_odd_length_is_the_middle_value() {
        assert_close(median(&[5.0, 1.0, 3.0]).unwrap(), 3.0);
    }
}
