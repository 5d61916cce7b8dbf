//! Per-pilot tuning.

use serde::{Deserialize, Serialize};

use mecha_core::constants::*;

use crate::error::ConfigError;
use crate::sensor::SensorConfig;

/// Tunables for the default pilot tree. Loadable from JSON; every field
/// falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotProfile {
    pub sensor: SensorConfig,
    /// A new target must be this much closer (in distance units, compared
    /// squared) to replace the current one.
    pub target_hysteresis: f64,
    pub orbit_weight: f64,
    /// Tolerance around the desired range before the strafe corrects it.
    pub range_margin: f64,
    pub min_toggle_time: f64,
    pub max_toggle_time: f64,
    pub evade_min_interval: f64,
    pub evade_dash_tti: f64,
    pub evade_toggle_enter_tti: f64,
    pub evade_toggle_exit_tti: f64,
    pub evade_toggle_cooldown: f64,
    pub evade_clearance: f64,
    /// Gap beyond the desired range that triggers an assault boost.
    pub boost_gap: f64,
    /// Maximum attack distance; `0` uses the longest weapon range.
    pub attack_range: f64,
    /// Minimum stop distance for the approach.
    pub stop_distance: f64,
}

impl Default for PilotProfile {
    fn default() -> Self {
        Self {
            sensor: SensorConfig::default(),
            target_hysteresis: TARGET_HYSTERESIS,
            orbit_weight: DEFAULT_ORBIT_WEIGHT,
            range_margin: DEFAULT_RANGE_MARGIN,
            min_toggle_time: DEFAULT_MIN_TOGGLE_TIME,
            max_toggle_time: DEFAULT_MAX_TOGGLE_TIME,
            evade_min_interval: DEFAULT_EVADE_MIN_INTERVAL,
            evade_dash_tti: DEFAULT_EVADE_DASH_TTI,
            evade_toggle_enter_tti: DEFAULT_EVADE_TOGGLE_ENTER_TTI,
            evade_toggle_exit_tti: DEFAULT_EVADE_TOGGLE_EXIT_TTI,
            evade_toggle_cooldown: DEFAULT_EVADE_TOGGLE_COOLDOWN,
            evade_clearance: DEFAULT_EVADE_CLEARANCE,
            boost_gap: DEFAULT_BOOST_GAP,
            attack_range: 0.0,
            stop_distance: DEFAULT_DESIRED_RANGE,
        }
    }
}

impl PilotProfile {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::json("pilot profile"))
    }
}
