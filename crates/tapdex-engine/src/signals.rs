//! Demand and inventory signals.
//!
//! The velocity estimate reduces a sale ledger and a trailing time
//! window to units/hour; the two signals and the combined price factor
//! are dimensionless, individually bounded, and capped per cycle.

use tapdex_core::{EngineParams, SaleEvent};

use crate::{EPS, clamp};

/// Units/hour sold inside `[now - window, now]`, inclusive on both
/// ends.
///
/// The ledger may be empty or unsorted; membership is decided per
/// event, never by position. A zero or sub-minute window is guarded so
/// the scaling division cannot blow up.
pub fn velocity_per_hour(ledger: &[SaleEvent], window_minutes: f64, now_ms: i64) -> f64 {
    let window_start = now_ms as f64 - window_minutes * 60_000.0;
    let units: u64 = ledger
        .iter()
        .filter(|ev| {
            let ts = ev.timestamp_ms as f64;
            ts >= window_start && ts <= now_ms as f64
        })
        .map(|ev| u64::from(ev.quantity))
        .sum();
    (units as f64 / window_minutes.max(EPS)) * 60.0
}

/// Bounded deviation of observed velocity from the baseline, in
/// [-2, 2].
///
/// The baseline is floored at 1 in the numerator so tiny baselines
/// cannot produce runaway positive demand.
pub fn demand_signal(velocity: f64, baseline: f64) -> f64 {
    clamp((velocity - baseline.max(1.0)) / baseline.max(EPS), -2.0, 2.0)
}

/// Scarcity signal in [0, 1]; 1 means fully depleted relative to
/// target.
///
/// No target configured means no pressure, and overstock is never
/// rewarded with a negative value.
pub fn inventory_pressure(on_hand: u32, target: u32) -> f64 {
    if target == 0 {
        return 0.0;
    }
    clamp(1.0 - f64::from(on_hand) / f64::from(target), 0.0, 1.0)
}

/// Combine the two signals into a single multiplicative factor, capped
/// per cycle.
///
/// The unclamped linear combination is evaluated first and only then
/// clamped, so extreme signals saturate the cap rather than escaping
/// it.
pub fn price_factor(demand: f64, pressure: f64, params: &EngineParams) -> f64 {
    let raw = 1.0 + params.alpha * demand + params.beta * pressure;
    clamp(raw, 1.0 - params.cap_down, 1.0 + params.cap_up)
}
