//! # Catalog
//!
//! The authoritative name → (price, quantity rule) mapping.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Vec<CatalogEntry> ──► Catalog::construct ──► Catalog (immutable)      │
//! │                           │                        │                    │
//! │                           ├── validate entries     ├── lookup(name)     │
//! │                           └── resolve duplicates   └── shared by any    │
//! │                               (DuplicatePolicy)        number of        │
//! │                                                        readers          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A catalog has no mutating methods. Once built it can be shared across
//! threads behind an `Arc` with no locking.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PricingConfig;
use crate::error::{CatalogError, CatalogResult, ConfigError};
use crate::money::Money;
use crate::rules::QuantityRule;
use crate::validation::validate_entry;

// =============================================================================
// Catalog Entry
// =============================================================================

/// A sellable item: its name, unit price and quantity rule.
///
/// Fields are private so an entry cannot change after it is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    name: String,
    unit_price: Money,
    #[serde(default)]
    quantity_rule: QuantityRule,
}

impl CatalogEntry {
    /// Creates an entry billed per unit ([`QuantityRule::Normal`]).
    pub fn new(name: impl Into<String>, unit_price: Money) -> Self {
        Self::with_rule(name, unit_price, QuantityRule::Normal)
    }

    /// Creates an entry with an explicit quantity rule.
    pub fn with_rule(name: impl Into<String>, unit_price: Money, quantity_rule: QuantityRule) -> Self {
        CatalogEntry {
            name: name.into(),
            unit_price,
            quantity_rule,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity_rule(&self) -> QuantityRule {
        self.quantity_rule
    }

    /// Line total for `count` units of this item, or `None` when it does
    /// not fit an exact decimal.
    pub fn line_total(&self, count: u64) -> Option<Money> {
        self.unit_price
            .checked_multiply_quantity(self.quantity_rule.apply(count))
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CatalogEntry{{name='{}', unit_price={}, quantity_rule={}}}",
            self.name, self.unit_price, self.quantity_rule
        )
    }
}

// =============================================================================
// Duplicate Policy
// =============================================================================

/// What to do when two entries handed to a catalog share a name.
///
/// ## Policy Comparison
/// ```text
/// entries: [Apple 0.35, Banana 0.20, Apple 0.40]
///
/// REJECT (default)                 KEEP_LAST
/// ────────────────                 ─────────
/// Err(DuplicateName "Apple")       Apple → 0.40 (later entry wins)
///                                  Banana → 0.20
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Refuse to build the catalog.
    #[default]
    Reject,

    /// The entry that comes later in iteration order replaces the earlier one.
    KeepLast,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Reject => write!(f, "reject"),
            DuplicatePolicy::KeepLast => write!(f, "keep_last"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "keep_last" | "last" | "last_wins" => Ok(DuplicatePolicy::KeepLast),
            other => Err(ConfigError::InvalidValue {
                key: "duplicate_policy".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Immutable registry of sellable items keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate names.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Catalog, CatalogEntry, Money, QuantityRule};
    ///
    /// let catalog = Catalog::construct(vec![
    ///     CatalogEntry::new("Apple", Money::from_cents(35)),
    ///     CatalogEntry::with_rule("Melon", Money::from_cents(50), QuantityRule::TwoForOne),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(catalog.len(), 2);
    /// assert!(catalog.lookup("Kiwi").is_none());
    /// ```
    pub fn construct<I>(entries: I) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        Self::with_policy(entries, DuplicatePolicy::default())
    }

    /// Builds a catalog with the duplicate policy from `config`.
    pub fn from_config<I>(entries: I, config: &PricingConfig) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        Self::with_policy(entries, config.duplicate_policy)
    }

    /// Builds a catalog with an explicit duplicate policy.
    pub fn with_policy<I>(entries: I, policy: DuplicatePolicy) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut map: HashMap<String, CatalogEntry> = HashMap::new();

        for entry in entries {
            validate_entry(&entry)?;

            if map.contains_key(entry.name()) {
                match policy {
                    DuplicatePolicy::Reject => {
                        return Err(CatalogError::DuplicateName {
                            name: entry.name().to_string(),
                        });
                    }
                    DuplicatePolicy::KeepLast => {
                        warn!(name = %entry.name(), "Duplicate catalog item replaced by later entry");
                    }
                }
            }

            map.insert(entry.name().to_string(), entry);
        }

        debug!(entries = map.len(), policy = %policy, "Catalog built");

        Ok(Catalog { entries: map })
    }

    /// Returns the entry for `name`, if the catalog sells it.
    pub fn lookup(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Item names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
