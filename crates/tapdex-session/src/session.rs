//! The panel session — item collection ownership and board views.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use tapdex_core::{CatalogEntry, EngineParams, Item, RuleTable, SaleEvent, TrendStatus};
use tapdex_engine::{minutes_ago_phrase, record_sale, reprice};

/// One display row of the board.
#[derive(Debug, Clone, Serialize)]
pub struct BoardRow {
    pub id: String,
    pub name: String,
    pub stock_name: String,
    pub price: f64,
    pub original_price: f64,
    pub status: TrendStatus,
    pub sale_count: u64,
    pub inventory_on_hand: u32,
    /// Minutes-ago phrase for the last price change.
    pub updated: String,
}

/// A running panel: the item collection plus the parameters and rules
/// it was built with.
///
/// All mutation goes through [`record_sale`](Self::record_sale) and
/// [`reprice`](Self::reprice); both swap in a freshly built collection
/// rather than editing in place. The board stays sorted by price
/// descending after every mutation.
#[derive(Debug)]
pub struct PanelSession {
    catalog: Vec<CatalogEntry>,
    rules: RuleTable,
    params: EngineParams,
    items: Vec<Item>,
}

impl PanelSession {
    /// Build a session from catalog entries and a rule table.
    ///
    /// Each entry's rules come from the table, falling back to the
    /// default rule record for unknown identities.
    pub fn from_catalog(
        catalog: Vec<CatalogEntry>,
        rules: RuleTable,
        params: EngineParams,
        now_ms: i64,
    ) -> crate::SessionResult<Self> {
        if catalog.is_empty() {
            return Err(crate::SessionError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for entry in &catalog {
            if !seen.insert(entry.id.as_str()) {
                return Err(crate::SessionError::DuplicateItem(entry.id.clone()));
            }
        }

        let items = build_items(&catalog, &rules, now_ms);
        info!(
            items = items.len(),
            rules = rules.len(),
            "panel session initialized"
        );
        let mut session = Self {
            catalog,
            rules,
            params,
            items,
        };
        session.sort_board();
        Ok(session)
    }

    /// Record a sale against an item. Unknown ids are a silent no-op.
    pub fn record_sale(&mut self, item_id: &str, quantity: u32, now_ms: i64, price: Option<f64>) {
        if !self.items.iter().any(|i| i.id == item_id) {
            debug!(item = %item_id, "sale for unknown item ignored");
            return;
        }
        self.items = record_sale(&self.items, item_id, quantity, now_ms, price);
        self.sort_board();
    }

    /// Run one repricing pass over the whole board.
    ///
    /// Returns the number of items whose price changed this tick.
    pub fn reprice(&mut self, now_ms: i64) -> usize {
        let next = reprice(&self.items, &self.params, now_ms);
        let changed = next
            .iter()
            .zip(&self.items)
            .filter(|(after, before)| after.current_price != before.current_price)
            .count();
        self.items = next;
        self.sort_board();
        debug!(changed, "board repriced");
        changed
    }

    /// Replace the collection wholesale: ledgers cleared, inventory
    /// back at target, prices back at the listing.
    pub fn reset(&mut self, now_ms: i64) {
        self.items = build_items(&self.catalog, &self.rules, now_ms);
        self.sort_board();
        info!(items = self.items.len(), "panel session reset");
    }

    /// The board rows in display order.
    pub fn board(&self, now_ms: i64) -> Vec<BoardRow> {
        self.items
            .iter()
            .map(|item| BoardRow {
                id: item.id.clone(),
                name: item.name.clone(),
                stock_name: item.stock_name.clone(),
                price: item.current_price,
                original_price: item.original_price,
                status: item.status,
                sale_count: item.sale_count,
                inventory_on_hand: item.inventory_on_hand,
                updated: minutes_ago_phrase(now_ms, item.last_price_change_ms),
            })
            .collect()
    }

    /// The sale ledger for one item, for history views.
    pub fn history(&self, item_id: &str) -> Option<&[SaleEvent]> {
        self.items
            .iter()
            .find(|i| i.id == item_id)
            .map(|i| i.ledger.as_slice())
    }

    /// The current board price for one item.
    pub fn current_price(&self, item_id: &str) -> Option<f64> {
        self.items
            .iter()
            .find(|i| i.id == item_id)
            .map(|i| i.current_price)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Price descending, ties broken by id for a deterministic board.
    fn sort_board(&mut self) {
        self.items.sort_by(|a, b| {
            b.current_price
                .partial_cmp(&a.current_price)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
    }
}

fn build_items(catalog: &[CatalogEntry], rules: &RuleTable, now_ms: i64) -> Vec<Item> {
    catalog
        .iter()
        .map(|entry| Item::new(entry, rules.rules_for(&entry.id), now_ms))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapdex_core::{DEFAULT_RULE, ItemRules, Margins, RoundingMode};

    const NOW: i64 = 1_700_000_000_000;

    fn entry(id: &str, price: f64) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            name: id.to_string(),
            stock_name: id.to_uppercase(),
            price,
        }
    }

    fn session() -> PanelSession {
        let catalog = vec![
            entry("brahma", 8.25),
            entry("mojito", 12.50),
            entry("half-pint", 6.50),
        ];
        let rules: RuleTable = [(
            "mojito".to_string(),
            ItemRules {
                baseline_velocity: 16.0,
                inventory_target: 120,
                margins: Margins {
                    base: 0.75,
                    min: 0.65,
                    max: 0.85,
                },
                rounding: RoundingMode::Quarter,
            },
        )]
        .into_iter()
        .collect();
        PanelSession::from_catalog(catalog, rules, EngineParams::default(), NOW).unwrap()
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err =
            PanelSession::from_catalog(vec![], RuleTable::new(), EngineParams::default(), NOW)
                .unwrap_err();
        assert!(matches!(err, crate::SessionError::EmptyCatalog));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = PanelSession::from_catalog(
            vec![entry("brahma", 8.25), entry("brahma", 9.0)],
            RuleTable::new(),
            EngineParams::default(),
            NOW,
        )
        .unwrap_err();
        assert!(matches!(err, crate::SessionError::DuplicateItem(id) if id == "brahma"));
    }

    #[test]
    fn board_starts_sorted_by_price_descending() {
        let s = session();
        let prices: Vec<f64> = s.items().iter().map(|i| i.current_price).collect();
        assert_eq!(prices, vec![12.50, 8.25, 6.50]);
    }

    #[test]
    fn known_rules_apply_and_unknown_fall_back() {
        let s = session();
        let mojito = s.items().iter().find(|i| i.id == "mojito").unwrap();
        assert_eq!(mojito.config.inventory_target, 120);
        assert_eq!(mojito.config.baseline_velocity, 16.0);
        // 12.50 / 1.75
        assert!((mojito.config.cost - 12.50 / 1.75).abs() < 1e-9);

        let brahma = s.items().iter().find(|i| i.id == "brahma").unwrap();
        assert_eq!(brahma.config.inventory_target, DEFAULT_RULE.inventory_target);
    }

    #[test]
    fn sale_then_reprice_keeps_board_sorted() {
        let mut s = session();
        s.record_sale("half-pint", 8, NOW, Some(6.50));
        s.reprice(NOW);
        let prices: Vec<f64> = s.items().iter().map(|i| i.current_price).collect();
        let mut sorted = prices.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(prices, sorted);
    }

    #[test]
    fn reprice_reports_changed_count() {
        let mut s = session();
        // Every idle item drifts off its listing on the first pass.
        let changed = s.reprice(NOW);
        assert_eq!(changed, 3);
        // A settled board immediately repriced again changes nothing.
        let changed = s.reprice(NOW);
        assert_eq!(changed, 0);
    }

    #[test]
    fn unknown_sale_is_a_silent_noop() {
        let mut s = session();
        let before = s.items().to_vec();
        s.record_sale("heineken", 2, NOW, None);
        assert_eq!(s.items(), &before[..]);
    }

    #[test]
    fn history_returns_the_ledger() {
        let mut s = session();
        s.record_sale("brahma", 2, NOW, Some(8.25));
        s.record_sale("brahma", 1, NOW + 1_000, Some(8.25));
        let history = s.history("brahma").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].quantity, 2);
        assert!(s.history("heineken").is_none());
    }

    #[test]
    fn reset_restores_the_initial_board() {
        let mut s = session();
        s.record_sale("brahma", 10, NOW, Some(8.25));
        s.reprice(NOW);
        s.reset(NOW + 60_000);

        for item in s.items() {
            assert_eq!(item.current_price, item.original_price);
            assert!(item.ledger.is_empty());
            assert_eq!(item.sale_count, 0);
            assert_eq!(item.inventory_on_hand, item.config.inventory_target);
            assert_eq!(item.status, TrendStatus::Stable);
        }
    }

    #[test]
    fn board_rows_carry_the_minutes_phrase() {
        let mut s = session();
        let changed = s.reprice(NOW);
        assert!(changed > 0);
        let rows = s.board(NOW + 2 * 60_000);
        assert!(rows.iter().all(|r| r.updated == "2 minutes ago"));
    }

    #[test]
    fn current_price_lookup() {
        let s = session();
        assert_eq!(s.current_price("mojito"), Some(12.50));
        assert_eq!(s.current_price("heineken"), None);
    }
}
