//! Price resolution — margin bounds, hysteresis, and rounding.
//!
//! Steps run in strict order: derive the raw candidate from cost and
//! the price factor, clamp it into the margin band, hold it if the
//! relative change against the reference is below the hysteresis
//! threshold, then round. A held price still passes through rounding;
//! since every reference came out of an earlier rounding pass, the
//! result equals the reference exactly.

use tapdex_core::{PricingConfig, RoundingMode};

use crate::{EPS, clamp};

/// Round up to the nearest quarter unit. Always up — the asymmetry is
/// a deliberate seller-favoring bias and must not become
/// round-to-nearest.
pub fn round_to_quarter(x: f64) -> f64 {
    (x * 4.0).ceil() / 4.0
}

/// Round to the nearest cent.
pub fn round_to_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Resolve the next price for an item.
///
/// `current_price` and `last_applied` supply the hysteresis reference:
/// the last applied price when one exists, the current price otherwise.
/// The result always lies within
/// `[cost·(1+min_margin), cost·(1+max_margin)]` and, unless held,
/// differs from the reference by at least `hysteresis_pct`.
pub fn resolve_price(
    config: &PricingConfig,
    factor: f64,
    current_price: f64,
    last_applied: Option<f64>,
    hysteresis_pct: f64,
) -> f64 {
    let base = config.cost * (1.0 + config.base_margin);
    let raw = base * factor;

    let min_price = config.cost * (1.0 + config.min_margin);
    let max_price = config.cost * (1.0 + config.max_margin);
    let mut bounded = clamp(raw, min_price, max_price);

    let reference = last_applied.unwrap_or(current_price);
    let change = (bounded - reference).abs() / reference.max(EPS);
    if change < hysteresis_pct {
        bounded = reference;
    }

    let rounded = match config.rounding {
        RoundingMode::Quarter => round_to_quarter(bounded),
        RoundingMode::Cent => round_to_cents(bounded),
    };
    // Snap to cents regardless of mode to shed float dust.
    round_to_cents(rounded)
}
