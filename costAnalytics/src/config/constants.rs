// Analysis Window
pub const START_YEAR: i32 = 2000;
pub const END_YEAR: i32 = 2024;

// Default Efficiency Assumptions
pub const DEFAULT_GAS_MPG: f64 = 25.0;            // Average gasoline vehicle, miles per gallon
pub const DEFAULT_EV_MILES_PER_KWH: f64 = 4.0;    // Average EV, miles per kWh

// Dashboard Slider Bounds
// The computation accepts any positive value; these only mirror the UI range.
pub const MIN_GAS_MPG: f64 = 10.0;
pub const MAX_GAS_MPG: f64 = 50.0;
pub const MIN_EV_MILES_PER_KWH: f64 = 2.0;
pub const MAX_EV_MILES_PER_KWH: f64 = 10.0;

// Object Storage Defaults
pub const BUCKET_ENV_VAR: &str = "BUCKET_NAME";
pub const DEFAULT_BUCKET: &str = "evenergy163.appspot.com";
pub const GAS_PRICES_KEY: &str = "data/Monthly Gas Prices.csv";
pub const ELECTRIC_RATES_KEY: &str = "data/California Electric Rates.csv";
pub const DEFAULT_DATA_DIR: &str = "costAnalytics/assets";

// Canonical Column Labels
pub const DATE_LABEL: &str = "Date";
pub const GAS_PRICE_LABEL: &str = "Gas Price";
pub const ELECTRIC_RATE_LABEL: &str = "Electric Rate";
pub const ELECTRIC_RATE_SOURCE_LABEL: &str = "Value (USD/kWh)";

// Source File Layout
pub const GAS_HEADER_OFFSET: usize = 3;   // Rows of export noise before the gas header line
pub const ELECTRIC_HEADER_OFFSET: usize = 0;
