use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::warn;

use evcost::analysis::reporting;
use evcost::cli::cli::Args;
use evcost::config::efficiency::EfficiencyConfig;
use evcost::core::pipeline::{self, PipelineConfig};
use evcost::data::storage::LocalObjectStore;
use evcost::utils::{csv_export, logging};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    logging::init_logging(args.enable_timing());

    println!(
        "EV vs Gasoline Energy-Cost Analytics ({}-{})",
        args.start_year(),
        args.end_year()
    );

    if args.start_year() > args.end_year() {
        bail!(
            "Invalid year window: {} > {}",
            args.start_year(),
            args.end_year()
        );
    }

    let efficiency = EfficiencyConfig::new(args.gas_mpg(), args.ev_miles_per_kwh())?;
    if !efficiency.within_ui_bounds() {
        warn!(
            "Efficiency assumptions ({} MPG, {} mi/kWh) are outside the usual slider range",
            efficiency.gas_mpg, efficiency.ev_miles_per_kwh
        );
    }

    let config = PipelineConfig {
        bucket: args
            .bucket()
            .map(str::to_string)
            .unwrap_or_else(pipeline::bucket_from_env),
        gas_key: args.gas_key().to_string(),
        electric_key: args.electric_key().to_string(),
        start_year: args.start_year(),
        end_year: args.end_year(),
        efficiency,
    };

    let store = LocalObjectStore::new(args.data_dir());
    let output = pipeline::run(&store, &config).context("Analysis pipeline failed")?;

    reporting::print_analysis_summary(&output);

    if let Some(path) = args.export_csv() {
        csv_export::export_merged_series(Path::new(path), &output.model, &config.efficiency)?;
        println!("Merged series exported to {}", path);
    }

    if let Some(path) = args.export_json() {
        output.save_json(Path::new(path))?;
        println!("Metrics report written to {}", path);
    }

    logging::print_timing_report();

    Ok(())
}
