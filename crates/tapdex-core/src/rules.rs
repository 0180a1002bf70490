//! Per-item pricing rules and the rule table.
//!
//! Rules are an immutable mapping from item identity to a
//! configuration record, injected once at session initialization.
//! Identities with no entry fall back to [`DEFAULT_RULE`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{ItemId, RoundingMode};

/// Margin triple defining the price band around cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Margin the listed price carries.
    pub base: f64,
    /// Lower bound margin.
    pub min: f64,
    /// Upper bound margin.
    pub max: f64,
}

/// Pricing rules for one item identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemRules {
    /// Expected steady-state velocity in units/hour.
    pub baseline_velocity: f64,
    /// Desired on-hand stock in units.
    pub inventory_target: u32,
    pub margins: Margins,
    pub rounding: RoundingMode,
}

/// Fallback rules for identities the table does not know.
pub const DEFAULT_RULE: ItemRules = ItemRules {
    baseline_velocity: 10.0,
    inventory_target: 150,
    margins: Margins {
        base: 0.65,
        min: 0.55,
        max: 0.75,
    },
    rounding: RoundingMode::Quarter,
};

/// Immutable id → rules mapping.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<ItemId, ItemRules>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules for the given identity, or [`DEFAULT_RULE`] on a miss.
    pub fn rules_for(&self, id: &str) -> &ItemRules {
        self.rules.get(id).unwrap_or(&DEFAULT_RULE)
    }

    /// Whether the table carries an explicit entry for the identity.
    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<HashMap<ItemId, ItemRules>> for RuleTable {
    fn from(rules: HashMap<ItemId, ItemRules>) -> Self {
        Self { rules }
    }
}

impl FromIterator<(ItemId, ItemRules)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (ItemId, ItemRules)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_falls_back_to_default() {
        let table = RuleTable::new();
        let rules = table.rules_for("nonexistent");
        assert_eq!(*rules, DEFAULT_RULE);
        assert!(!table.contains("nonexistent"));
    }

    #[test]
    fn known_id_returns_its_entry() {
        let custom = ItemRules {
            baseline_velocity: 16.0,
            inventory_target: 120,
            margins: Margins {
                base: 0.75,
                min: 0.65,
                max: 0.85,
            },
            rounding: RoundingMode::Quarter,
        };
        let table: RuleTable = [("mojito".to_string(), custom)].into_iter().collect();
        assert_eq!(table.rules_for("mojito").baseline_velocity, 16.0);
        assert_eq!(*table.rules_for("other"), DEFAULT_RULE);
    }

    #[test]
    fn rules_parse_from_toml() {
        let toml_str = r#"
baseline_velocity = 12.0
inventory_target = 100
margins = { base = 0.75, min = 0.65, max = 0.85 }
rounding = "quarter"
"#;
        let rules: ItemRules = toml::from_str(toml_str).unwrap();
        assert_eq!(rules.inventory_target, 100);
        assert_eq!(rules.rounding, RoundingMode::Quarter);
        assert!((rules.margins.max - 0.85).abs() < 1e-12);
    }

    #[test]
    fn default_rule_values() {
        assert_eq!(DEFAULT_RULE.baseline_velocity, 10.0);
        assert_eq!(DEFAULT_RULE.inventory_target, 150);
        assert_eq!(DEFAULT_RULE.rounding, RoundingMode::Quarter);
    }
}
