use clap::Parser;

use crate::config::constants::{
    DEFAULT_DATA_DIR, DEFAULT_EV_MILES_PER_KWH, DEFAULT_GAS_MPG, ELECTRIC_RATES_KEY, END_YEAR,
    GAS_PRICES_KEY, START_YEAR,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Root directory holding bucket contents
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: String,

    /// Bucket name; falls back to $BUCKET_NAME, then the built-in default
    #[arg(short, long)]
    bucket: Option<String>,

    #[arg(long, default_value = GAS_PRICES_KEY)]
    gas_key: String,

    #[arg(long, default_value = ELECTRIC_RATES_KEY)]
    electric_key: String,

    /// Assumed gasoline vehicle efficiency in miles per gallon
    #[arg(short = 'm', long, default_value_t = DEFAULT_GAS_MPG)]
    gas_mpg: f64,

    /// Assumed EV efficiency in miles per kWh
    #[arg(short = 'e', long, default_value_t = DEFAULT_EV_MILES_PER_KWH)]
    ev_miles_per_kwh: f64,

    #[arg(long, default_value_t = START_YEAR)]
    start_year: i32,

    #[arg(long, default_value_t = END_YEAR)]
    end_year: i32,

    /// Write the merged series and derived columns to this CSV file
    #[arg(long)]
    export_csv: Option<String>,

    /// Write the metrics and data-quality reports to this JSON file
    #[arg(long)]
    export_json: Option<String>,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,
}

// Add getter methods for all fields
impl Args {
    pub fn data_dir(&self) -> &str {
        &self.data_dir
    }

    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    pub fn gas_key(&self) -> &str {
        &self.gas_key
    }

    pub fn electric_key(&self) -> &str {
        &self.electric_key
    }

    pub fn gas_mpg(&self) -> f64 {
        self.gas_mpg
    }

    pub fn ev_miles_per_kwh(&self) -> f64 {
        self.ev_miles_per_kwh
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn export_csv(&self) -> Option<&str> {
        self.export_csv.as_deref()
    }

    pub fn export_json(&self) -> Option<&str> {
        self.export_json.as_deref()
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }
}
