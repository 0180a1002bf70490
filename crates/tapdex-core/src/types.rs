//! Domain types for the TapDex price board.
//!
//! An [`Item`] is one tap on the board: its catalog identity, its
//! append-only sale ledger, its pricing configuration, and the mutable
//! price/inventory state the engine and the recorder maintain. All
//! types serialize to/from JSON for board dumps.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::rules::ItemRules;

/// Unique identifier for an item on the board.
pub type ItemId = String;

// ── Sale events ───────────────────────────────────────────────────

/// A single recorded sale. Immutable once appended to a ledger.
///
/// Ledgers are append-only in insertion order; timestamps are not
/// guaranteed to be sorted, so consumers filter on a window test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleEvent {
    /// Unix timestamp in milliseconds.
    pub timestamp_ms: i64,
    /// Units sold; always positive.
    pub quantity: u32,
    /// Board price in effect at sale time, if the caller captured it.
    pub price: Option<f64>,
}

// ── Pricing configuration ─────────────────────────────────────────

/// Rounding granularity applied to resolved prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round up to the nearest quarter unit.
    Quarter,
    /// Round to the nearest cent.
    Cent,
}

/// Per-item pricing configuration, fixed at initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Margin fraction the listed price carries over cost.
    pub base_margin: f64,
    /// Lower margin bound; floor price is `cost * (1 + min_margin)`.
    pub min_margin: f64,
    /// Upper margin bound; ceiling price is `cost * (1 + max_margin)`.
    pub max_margin: f64,
    pub rounding: RoundingMode,
    /// Expected steady-state velocity in units/hour.
    pub baseline_velocity: f64,
    /// Desired on-hand stock in units.
    pub inventory_target: u32,
    /// Unit cost, derived from the original price and the base margin.
    pub cost: f64,
}

impl PricingConfig {
    /// Build a config from a rules record, deriving cost from the
    /// item's original listed price.
    pub fn from_rules(rules: &ItemRules, original_price: f64) -> Self {
        Self {
            base_margin: rules.margins.base,
            min_margin: rules.margins.min,
            max_margin: rules.margins.max,
            rounding: rules.rounding,
            baseline_velocity: rules.baseline_velocity,
            inventory_target: rules.inventory_target,
            cost: original_price / (1.0 + rules.margins.base),
        }
    }
}

// ── Trend status ──────────────────────────────────────────────────

/// Price trend relative to the item's original listing price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStatus {
    Rising,
    Falling,
    Stable,
}

impl TrendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TrendStatus::Rising => "RISING",
            TrendStatus::Falling => "FALLING",
            TrendStatus::Stable => "STABLE",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TrendStatus::Rising => "▲",
            TrendStatus::Falling => "▼",
            TrendStatus::Stable => "–",
        }
    }
}

// ── Signal readout ────────────────────────────────────────────────

/// Diagnostic trace of the last repricing cycle for an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalReadout {
    /// Demand signal in [-2, 2].
    pub demand: f64,
    /// Inventory pressure in [0, 1].
    pub pressure: f64,
    /// Applied price factor after capping.
    pub factor: f64,
}

// ── Item ──────────────────────────────────────────────────────────

/// One tap on the board.
///
/// The ledger and inventory are mutated exclusively by sale recording;
/// price, status, and the last-applied/last-change fields are mutated
/// exclusively by the repricing pass. The collection is replaced
/// wholesale when a panel session resets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Short exchange-style code shown under the name.
    pub stock_name: String,
    /// Listed price at initialization; the trend baseline.
    pub original_price: f64,
    /// Append-only sale ledger.
    pub ledger: Vec<SaleEvent>,
    pub config: PricingConfig,
    pub inventory_on_hand: u32,
    pub current_price: f64,
    /// Reference price for hysteresis; `None` only before the first
    /// price has ever been applied.
    pub last_applied_price: Option<f64>,
    /// Unix timestamp (ms) of the last actual price change.
    pub last_price_change_ms: i64,
    /// Total units ever sold.
    pub sale_count: u64,
    pub status: TrendStatus,
    /// Signals from the last repricing cycle; `None` until the first.
    pub signals: Option<SignalReadout>,
}

impl Item {
    /// Construct a fresh item from a catalog entry and its rules.
    ///
    /// Inventory is seeded at the target, the hysteresis reference at
    /// the listed price, and the trend at stable.
    pub fn new(entry: &CatalogEntry, rules: &ItemRules, now_ms: i64) -> Self {
        let config = PricingConfig::from_rules(rules, entry.price);
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            stock_name: entry.stock_name.clone(),
            original_price: entry.price,
            ledger: Vec::new(),
            inventory_on_hand: config.inventory_target,
            current_price: entry.price,
            last_applied_price: Some(entry.price),
            last_price_change_ms: now_ms,
            sale_count: 0,
            status: TrendStatus::Stable,
            signals: None,
            config,
        }
    }
}
