use serde::{Deserialize, Serialize};

use crate::config::constants::{
    DEFAULT_EV_MILES_PER_KWH, DEFAULT_GAS_MPG, MAX_EV_MILES_PER_KWH, MAX_GAS_MPG,
    MIN_EV_MILES_PER_KWH, MIN_GAS_MPG,
};

/// User-supplied fuel efficiency assumptions parameterizing the
/// cost-per-mile derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyConfig {
    pub gas_mpg: f64,
    pub ev_miles_per_kwh: f64,
}

#[derive(Debug)]
pub enum EfficiencyError {
    NonPositiveMpg(f64),
    NonPositiveMilesPerKwh(f64),
}

impl std::fmt::Display for EfficiencyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EfficiencyError::NonPositiveMpg(v) => {
                write!(f, "Gas efficiency must be positive, got {} MPG", v)
            }
            EfficiencyError::NonPositiveMilesPerKwh(v) => {
                write!(f, "EV efficiency must be positive, got {} miles/kWh", v)
            }
        }
    }
}

impl std::error::Error for EfficiencyError {}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            gas_mpg: DEFAULT_GAS_MPG,
            ev_miles_per_kwh: DEFAULT_EV_MILES_PER_KWH,
        }
    }
}

impl EfficiencyConfig {
    pub fn new(gas_mpg: f64, ev_miles_per_kwh: f64) -> Result<Self, EfficiencyError> {
        if !(gas_mpg > 0.0) {
            return Err(EfficiencyError::NonPositiveMpg(gas_mpg));
        }
        if !(ev_miles_per_kwh > 0.0) {
            return Err(EfficiencyError::NonPositiveMilesPerKwh(ev_miles_per_kwh));
        }
        Ok(Self {
            gas_mpg,
            ev_miles_per_kwh,
        })
    }

    /// Whether both values fall inside the dashboard slider ranges.
    pub fn within_ui_bounds(&self) -> bool {
        (MIN_GAS_MPG..=MAX_GAS_MPG).contains(&self.gas_mpg)
            && (MIN_EV_MILES_PER_KWH..=MAX_EV_MILES_PER_KWH).contains(&self.ev_miles_per_kwh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_assumptions() {
        let config = EfficiencyConfig::default();
        assert_eq!(config.gas_mpg, 25.0);
        assert_eq!(config.ev_miles_per_kwh, 4.0);
        assert!(config.within_ui_bounds());
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(EfficiencyConfig::new(0.0, 4.0).is_err());
        assert!(EfficiencyConfig::new(25.0, -1.0).is_err());
        assert!(EfficiencyConfig::new(f64::NAN, 4.0).is_err());
    }

    #[test]
    fn accepts_positive_values_outside_slider_range() {
        let config = EfficiencyConfig::new(80.0, 1.0).unwrap();
        assert!(!config.within_ui_bounds());
    }
}
