//! # Validation Module
//!
//! Checks run on every catalog entry before it is admitted to a catalog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      When Validation Runs                               │
//! │                                                                         │
//! │  Catalog::construct(entries)                                           │
//! │       │                                                                 │
//! │       ├── per entry: THIS MODULE                                       │
//! │       │     ├── name non-empty                                         │
//! │       │     ├── unit price >= 0                                        │
//! │       │     └── quantity rule well-formed                              │
//! │       │                                                                 │
//! │       └── across entries: duplicate policy (catalog.rs)                │
//! │                                                                         │
//! │  calculate(basket) never re-validates: the catalog is already sound.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::catalog::CatalogEntry;
use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty or whitespace only
///
/// Names are otherwise kept verbatim: `"Apple"` and `"apple"` are different
/// items, and surrounding whitespace is not trimmed.
///
/// ## Example
/// ```rust
/// use basket_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Apple").is_ok());
/// assert!(validate_item_name("  ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Runs every entry-level check.
pub fn validate_entry(entry: &CatalogEntry) -> ValidationResult<()> {
    validate_item_name(entry.name())?;
    validate_unit_price(entry.unit_price())?;
    entry.quantity_rule().validate(entry.name())
}

// =============================================================================
// Unit Tests
// =============================================================================
