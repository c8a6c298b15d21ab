use crate::analysis::metrics::DescriptiveStats;
use crate::core::pipeline::PipelineOutput;
use crate::data::cleaning::CleanReport;

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a (insufficient data)".to_string(),
    }
}

pub fn print_analysis_summary(output: &PipelineOutput) {
    let m = &output.metrics;

    println!("\nEV vs Gasoline Cost Summary ({} to {})", m.first_month, m.last_month);
    println!("----------------------------------------");
    println!("Months analyzed: {}", m.months);

    println!("Price Levels:");
    print_series_stats("Gas ($/gallon)", &m.gas_stats);
    print_series_stats("Electric ($/kWh)", &m.electric_stats);

    println!("Long-Term Correlation:");
    println!("  Gas vs electric prices: r = {}", fmt_opt(m.price_correlation, 2));

    println!("Monthly Rate of Change:");
    println!("  Gas mean change: {}%", fmt_opt(m.mean_gas_change_pct, 2));
    println!("  Electric mean change: {}%", fmt_opt(m.mean_electric_change_pct, 2));
    println!("  Gas volatility (std dev): {}%", fmt_opt(m.gas_change_volatility, 2));
    println!(
        "  Electric volatility (std dev): {}%",
        fmt_opt(m.electric_change_volatility, 2)
    );
    println!(
        "  Change correlation: r = {}",
        fmt_opt(m.rate_change_correlation, 3)
    );

    println!(
        "Cost per Mile (at {} MPG, {} mi/kWh):",
        m.efficiency.gas_mpg, m.efficiency.ev_miles_per_kwh
    );
    println!("  Gas: ${} per mile", fmt_opt(m.mean_gas_cost_per_mile, 3));
    println!("  EV: ${} per mile", fmt_opt(m.mean_ev_cost_per_mile, 3));

    println!("Data Quality:");
    print_series_quality("Gas", &output.gas_report);
    print_series_quality("Electric", &output.electric_report);
    println!("----------------------------------------");
}

fn print_series_stats(label: &str, stats: &Option<DescriptiveStats>) {
    match stats {
        Some(s) => println!(
            "  {}: mean={:.3}, median={:.3}, std={:.3}, range=[{:.3}, {:.3}]",
            label, s.mean, s.median, s.std_dev, s.min, s.max
        ),
        None => println!("  {}: n/a", label),
    }
}

fn print_series_quality(label: &str, report: &CleanReport) {
    println!(
        "  {}: {} of {} rows used, {} outside year window, {} dropped with issues",
        label,
        report.rows_used,
        report.rows_read,
        report.rows_out_of_range,
        report.issues.len()
    );
    for issue in &report.issues {
        match issue.line {
            Some(line) => println!("    line {}: {}", line, issue.reason),
            None => println!("    {}", issue.reason),
        }
    }
}
