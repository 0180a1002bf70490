//! Catalog file parser.
//!
//! A catalog is a TOML file describing the items on a panel, optional
//! per-item rules keyed by identity, and optional engine parameter
//! overrides:
//!
//! ```toml
//! [params]
//! alpha = 0.15
//!
//! [[items]]
//! id = "brahma"
//! name = "Brahma"
//! stock_name = "BRH"
//! price = 8.25
//!
//! [rules.brahma]
//! baseline_velocity = 14.0
//! inventory_target = 220
//! margins = { base = 0.65, min = 0.55, max = 0.75 }
//! rounding = "quarter"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::EngineParams;
use crate::rules::ItemRules;
use crate::types::ItemId;

/// Result type alias for catalog operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("catalog contains no items")]
    EmptyCatalog,
}

/// One item as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ItemId,
    pub name: String,
    /// Short exchange-style code.
    pub stock_name: String,
    /// Listed price.
    pub price: f64,
}

/// A parsed catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub params: EngineParams,
    pub items: Vec<CatalogEntry>,
    #[serde(default)]
    pub rules: HashMap<ItemId, ItemRules>,
}

impl Catalog {
    /// Load and validate a catalog from a TOML file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a catalog from a TOML string.
    pub fn from_toml(content: &str) -> CoreResult<Self> {
        let catalog: Catalog = toml::from_str(content)?;
        if catalog.items.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        Ok(catalog)
    }
}
