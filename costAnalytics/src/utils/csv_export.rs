//! CSV export of the merged series and its derived columns, mirroring the
//! column labels the dashboard charts used.

use std::path::Path;

use anyhow::Context;
use csv::Writer;

use crate::config::efficiency::EfficiencyConfig;
use crate::core::cost_model::CostModel;
use crate::utils::logging::{self, FileIOType, OperationCategory};

pub fn export_merged_series(
    path: &Path,
    model: &CostModel,
    efficiency: &EfficiencyConfig,
) -> anyhow::Result<()> {
    let _timing = logging::start_timing(
        "export_merged_series",
        OperationCategory::FileIO {
            subcategory: FileIOType::ResultsSave,
        },
    );

    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;

    writer.write_record([
        "Month",
        "Gas Price",
        "Electric Rate",
        "Gas Rate Change (%)",
        "Electric Rate Change (%)",
        "Gas Cost per Mile",
        "EV Cost per Mile",
    ])?;

    let cost = model.cost_per_mile(efficiency);
    let gas_changes = model.gas_change_pct();
    let electric_changes = model.electric_change_pct();

    for (i, record) in model.merged().records().iter().enumerate() {
        // The first month has no predecessor, so its change cells stay empty.
        let gas_change = match i {
            0 => String::new(),
            _ => format!("{:.6}", gas_changes[i - 1]),
        };
        let electric_change = match i {
            0 => String::new(),
            _ => format!("{:.6}", electric_changes[i - 1]),
        };

        writer.write_record([
            record.month.to_string(),
            format!("{:.3}", record.gas_price),
            format!("{:.4}", record.electric_rate),
            gas_change,
            electric_change,
            format!("{:.4}", cost.gas[i]),
            format!("{:.4}", cost.ev[i]),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::merge::merge_on_month;
    use crate::models::series::{PricePoint, PriceSeries, YearMonth};

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

    #[test]
    fn exports_one_row_per_merged_month() {
        let path = std::env::temp_dir().join("evcost_export_test.csv");
        export_merged_series(&path, &model(), &EfficiencyConfig::default()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Month,Gas Price"));
        assert!(lines[1].starts_with("2020-01,3.000,0.2000,,"));
        assert!(lines[2].contains("0.132"));

        std::fs::remove_file(&path).ok();
    }
}
