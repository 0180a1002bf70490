//! Engine parameters — the global tunables of the repricing loop.

use serde::{Deserialize, Serialize};

/// Global repricing parameters. All fields are optional in a config
/// file; missing ones take these defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    /// Weight of the demand signal in the price factor.
    pub alpha: f64,
    /// Weight of the inventory-pressure signal in the price factor.
    pub beta: f64,
    /// Maximum upward factor swing per cycle.
    pub cap_up: f64,
    /// Maximum downward factor swing per cycle.
    pub cap_down: f64,
    /// Relative price-change threshold below which a candidate is held.
    pub hysteresis_pct: f64,
    /// Trailing window for the velocity estimate, in minutes.
    pub sale_window_minutes: f64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            alpha: 0.15,
            beta: 0.25,
            cap_up: 0.08,
            cap_down: 0.05,
            hysteresis_pct: 0.01,
            sale_window_minutes: 0.1,
        }
    }
}
