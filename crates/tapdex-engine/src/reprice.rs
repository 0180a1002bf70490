//! The recompute pass and sale recording.
//!
//! Both entry points are value-in/value-out: they return a new item
//! collection and never mutate in place, so callers can replace the
//! shared collection atomically. The two never touch the same fields —
//! recording owns the ledger, inventory, and sale count; repricing
//! owns price, status, and the last-applied/last-change bookkeeping.

use tracing::debug;

use tapdex_core::{EngineParams, Item, SaleEvent, SignalReadout};

use crate::resolver::resolve_price;
use crate::signals::{demand_signal, inventory_pressure, price_factor, velocity_per_hour};
use crate::trend::classify;

/// Reprice every item independently and return the new collection.
///
/// Status is classified against each item's original listing price, so
/// the board arrows read "above or below the listed price", not "moved
/// since the last tick". The last-change timestamp refreshes only when
/// the resolved price actually differs from the previous cycle's.
pub fn reprice(items: &[Item], params: &EngineParams, now_ms: i64) -> Vec<Item> {
    items
        .iter()
        .map(|item| reprice_item(item, params, now_ms))
        .collect()
}

fn reprice_item(item: &Item, params: &EngineParams, now_ms: i64) -> Item {
    let velocity = velocity_per_hour(&item.ledger, params.sale_window_minutes, now_ms);
    let demand = demand_signal(velocity, item.config.baseline_velocity);
    let pressure = inventory_pressure(item.inventory_on_hand, item.config.inventory_target);
    let factor = price_factor(demand, pressure, params);

    let price = resolve_price(
        &item.config,
        factor,
        item.current_price,
        item.last_applied_price,
        params.hysteresis_pct,
    );

    let changed = price != item.current_price;
    if changed {
        debug!(
            item = %item.id,
            from = item.current_price,
            to = price,
            factor,
            "price adjusted"
        );
    }

    Item {
        current_price: price,
        status: classify(item.original_price, price),
        last_applied_price: Some(price),
        last_price_change_ms: if changed {
            now_ms
        } else {
            item.last_price_change_ms
        },
        signals: Some(SignalReadout {
            demand,
            pressure,
            factor,
        }),
        ..item.clone()
    }
}

/// Record a sale against the matching item and return the new
/// collection.
///
/// Appends to the ledger, adds to the sale count, and decrements
/// on-hand inventory flooring at zero. An unknown id is a silent
/// no-op: every item passes through unchanged. Prices and status are
/// never touched here.
pub fn record_sale(
    items: &[Item],
    item_id: &str,
    quantity: u32,
    now_ms: i64,
    price: Option<f64>,
) -> Vec<Item> {
    items
        .iter()
        .map(|item| {
            if item.id != item_id {
                return item.clone();
            }
            let mut updated = item.clone();
            updated.ledger.push(SaleEvent {
                timestamp_ms: now_ms,
                quantity,
                price,
            });
            updated.sale_count += u64::from(quantity);
            updated.inventory_on_hand = updated.inventory_on_hand.saturating_sub(quantity);
            debug!(
                item = %item.id,
                quantity,
                on_hand = updated.inventory_on_hand,
                "sale recorded"
            );
            updated
        })
        .collect()
}

/// Render "time since last change" as a minutes-ago phrase.
pub fn minutes_ago_phrase(now_ms: i64, last_change_ms: i64) -> String {
    let minutes = ((now_ms - last_change_ms) / 60_000).max(0);
    match minutes {
        0 => "now".to_string(),
        1 => "1 minute ago".to_string(),
        n => format!("{n} minutes ago"),
    }
}
