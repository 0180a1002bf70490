//! tapdex-core — shared domain types for the TapDex price board.
//!
//! Holds the item and sale-event model, per-item pricing rules, the
//! engine parameter set, and the TOML catalog parser. The repricing
//! math itself lives in `tapdex-engine`; this crate is the vocabulary
//! both the engine and the session speak.

pub mod catalog;
pub mod params;
pub mod rules;
pub mod types;

pub use catalog::{Catalog, CatalogEntry, CoreError, CoreResult};
pub use params::EngineParams;
pub use rules::{DEFAULT_RULE, ItemRules, Margins, RuleTable};
pub use types::*;
