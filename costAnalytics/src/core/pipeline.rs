//! End-to-end orchestration: fetch -> clean -> merge -> compute. The whole
//! pass is synchronous and stateless; re-running on identical input bytes
//! and config yields identical output.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::metrics::CostMetrics;
use crate::config::constants::{
    BUCKET_ENV_VAR, DEFAULT_BUCKET, ELECTRIC_RATES_KEY, END_YEAR, GAS_PRICES_KEY, START_YEAR,
};
use crate::config::efficiency::EfficiencyConfig;
use crate::core::cost_model::CostModel;
use crate::core::merge::{self, MergeError};
use crate::data::cleaning::{CleanReport, PriceLoadError};
use crate::data::storage::ObjectStore;
use crate::data::{electric_rates_loader, gas_prices_loader};
use crate::utils::logging::{self, OperationCategory};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub bucket: String,
    pub gas_key: String,
    pub electric_key: String,
    pub start_year: i32,
    pub end_year: i32,
    pub efficiency: EfficiencyConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bucket: bucket_from_env(),
            gas_key: GAS_PRICES_KEY.to_string(),
            electric_key: ELECTRIC_RATES_KEY.to_string(),
            start_year: START_YEAR,
            end_year: END_YEAR,
            efficiency: EfficiencyConfig::default(),
        }
    }
}

/// Reads `BUCKET_NAME` from the environment, falling back to the default.
pub fn bucket_from_env() -> String {
    std::env::var(BUCKET_ENV_VAR).unwrap_or_else(|_| DEFAULT_BUCKET.to_string())
}

#[derive(Debug)]
pub enum PipelineError {
    Load(PriceLoadError),
    Merge(MergeError),
}

impl From<PriceLoadError> for PipelineError {
    fn from(err: PriceLoadError) -> Self {
        PipelineError::Load(err)
    }
}

impl From<MergeError> for PipelineError {
    fn from(err: MergeError) -> Self {
        PipelineError::Merge(err)
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Load(e) => write!(f, "{}", e),
            PipelineError::Merge(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Load(e) => Some(e),
            PipelineError::Merge(e) => Some(e),
        }
    }
}

/// Everything one pipeline pass produces: the model (for recomputes), the
/// scalar metrics, and the per-dataset data-quality reports.
pub struct PipelineOutput {
    pub model: CostModel,
    pub metrics: CostMetrics,
    pub gas_report: CleanReport,
    pub electric_report: CleanReport,
}

impl PipelineOutput {
    /// Writes the metrics and data-quality reports as pretty JSON.
    pub fn save_json(&self, path: &Path) -> anyhow::Result<()> {
        #[derive(Serialize)]
        struct Document<'a> {
            metrics: &'a CostMetrics,
            gas_report: &'a CleanReport,
            electric_report: &'a CleanReport,
        }

        let json = serde_json::to_string_pretty(&Document {
            metrics: &self.metrics,
            gas_report: &self.gas_report,
            electric_report: &self.electric_report,
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

pub fn run(
    store: &dyn ObjectStore,
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    let _timing = logging::start_timing("pipeline_run", OperationCategory::Pipeline);

    let gas = gas_prices_loader::load_gas_prices(
        store,
        &config.bucket,
        &config.gas_key,
        config.start_year,
        config.end_year,
    )?;
    info!(
        "Cleaned gas series: {} months ({} rows read)",
        gas.series.len(),
        gas.report.rows_read
    );

    let electric = electric_rates_loader::load_electric_rates(
        store,
        &config.bucket,
        &config.electric_key,
        config.start_year,
        config.end_year,
    )?;
    info!(
        "Cleaned electric series: {} months ({} rows read)",
        electric.series.len(),
        electric.report.rows_read
    );

    let merged = merge::merge_on_month(&gas.series, &electric.series)?;
    let model = CostModel::new(merged);
    let metrics = model.metrics(&config.efficiency);

    Ok(PipelineOutput {
        model,
        metrics,
        gas_report: gas.report,
        electric_report: electric.report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::storage::MemoryObjectStore;

    const GAS_CSV: &str = "Monthly Gas Prices\nSource: energy data portal\nExtracted 2025-03-02\nDate,Gas Price\nJan-2020,3.00\nN/A,9.99\nFeb-2020,3.30\nMar-2020,3.10\n";
    const ELECTRIC_CSV: &str =
        "Date,Value (USD/kWh)\n2020-01-01,0.20\n2020-02-01,0.22\n2020-04-01,0.23\n";

    fn test_config() -> PipelineConfig {
        PipelineConfig {
            bucket: "bucket".to_string(),
            ..PipelineConfig::default()
        }
    }

    fn test_store() -> MemoryObjectStore {
        let mut store = MemoryObjectStore::new();
        store.insert("bucket", GAS_PRICES_KEY, GAS_CSV);
        store.insert("bucket", ELECTRIC_RATES_KEY, ELECTRIC_CSV);
        store
    }

    #[test]
    fn end_to_end_merges_only_shared_months() {
        let output = run(&test_store(), &test_config()).unwrap();

        // Jan and Feb overlap; gas Mar and electric Apr do not.
        assert_eq!(output.metrics.months, 2);
        assert_eq!(output.gas_report.issues.len(), 1);
        assert!(output.electric_report.issues.is_empty());

        let cost = output.model.cost_per_mile(&EfficiencyConfig::default());
        assert!((cost.gas[0] - 0.12).abs() < 1e-9);
        assert!((cost.ev[1] - 0.055).abs() < 1e-9);
    }

    #[test]
    fn rerunning_identical_inputs_is_bit_identical() {
        let store = test_store();
        let config = test_config();

        let first = run(&store, &config).unwrap();
        let second = run(&store, &config).unwrap();

        assert_eq!(first.metrics, second.metrics);
        assert_eq!(first.model.merged(), second.model.merged());
    }

    #[test]
    fn missing_gas_object_fails_cleanly() {
        let mut store = MemoryObjectStore::new();
        store.insert("bucket", ELECTRIC_RATES_KEY, ELECTRIC_CSV);

        let err = run(&store, &test_config()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Load(PriceLoadError::Storage(_))
        ));
    }

    #[test]
    fn disjoint_date_ranges_surface_as_merge_error() {
        let mut store = MemoryObjectStore::new();
        store.insert(
            "bucket",
            GAS_PRICES_KEY,
            "a\nb\nc\nDate,Gas Price\nJan-2010,2.80\n",
        );
        store.insert("bucket", ELECTRIC_RATES_KEY, ELECTRIC_CSV);

        let err = run(&store, &test_config()).unwrap_err();
        assert!(matches!(err, PipelineError::Merge(_)));
    }
}
