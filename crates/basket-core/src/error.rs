//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Construction time                                                     │
//! │  ├── ValidationError  - A single catalog entry is malformed            │
//! │  ├── CatalogError     - The entry set cannot form a catalog            │
//! │  └── ConfigError      - Pricing configuration could not be read        │
//! │                                                                         │
//! │  Calculation time                                                      │
//! │  └── BasketError      - The basket cannot be priced                    │
//! │                                                                         │
//! │  Flow: ValidationError → CatalogError → caller                         │
//! │        BasketError ─────────────────→ caller                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, basket contents)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Basket Error
// =============================================================================

/// Errors raised while pricing a basket.
///
/// Every variant is caused by the input, so the engine never retries and never
/// returns a partial total alongside one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BasketError {
    /// The caller passed no basket at all.
    ///
    /// Distinct from an empty basket, which prices to zero.
    #[error("Basket is null")]
    NullBasket,

    /// At least one item name in the basket is unknown to the catalog.
    ///
    /// ## User Workflow
    /// ```text
    /// calculate(["Apple", "Avocado"])
    ///      │
    ///      ▼
    /// Coverage check: "Avocado" not in catalog
    ///      │
    ///      ▼
    /// UnsupportedBasket { basket: ["Apple", "Avocado"] }
    ///      │
    ///      ▼
    /// "Basket [Apple, Avocado] is not fully supported by this catalog."
    /// ```
    #[error("Basket [{}] is not fully supported by this catalog.", .basket.join(", "))]
    UnsupportedBasket {
        /// The full basket exactly as supplied, duplicates and order kept.
        basket: Vec<String>,
    },

    /// A line total or the grand total does not fit an exact decimal.
    ///
    /// Raised instead of rounding or overflowing: `Decimal` carries at most
    /// 28-29 significant digits.
    #[error("Basket [{}] total exceeds the exact decimal range.", .basket.join(", "))]
    AmountOutOfRange {
        /// The full basket exactly as supplied.
        basket: Vec<String>,
    },
}

/// Discriminant for [`BasketError`], for callers that branch on the kind
/// without caring about the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasketErrorKind {
    NullBasket,
    UnsupportedBasket,
    AmountOutOfRange,
}

impl BasketError {
    /// Builds an unsupported-basket error from the caller's basket.
    pub fn unsupported<S: AsRef<str>>(basket: &[S]) -> Self {
        BasketError::UnsupportedBasket {
            basket: basket.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Builds an out-of-range error from the caller's basket.
    pub fn out_of_range<S: AsRef<str>>(basket: &[S]) -> Self {
        BasketError::AmountOutOfRange {
            basket: basket.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Returns the error discriminant.
    pub fn kind(&self) -> BasketErrorKind {
        match self {
            BasketError::NullBasket => BasketErrorKind::NullBasket,
            BasketError::UnsupportedBasket { .. } => BasketErrorKind::UnsupportedBasket,
            BasketError::AmountOutOfRange { .. } => BasketErrorKind::AmountOutOfRange,
        }
    }

    /// Returns the rejected basket, if the error carries one.
    pub fn basket(&self) -> Option<&[String]> {
        match self {
            BasketError::NullBasket => None,
            BasketError::UnsupportedBasket { basket }
            | BasketError::AmountOutOfRange { basket } => Some(basket),
        }
    }
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Errors raised while building a [`Catalog`](crate::catalog::Catalog).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two entries share a name and the duplicate policy is `Reject`.
    #[error("Duplicate catalog item: '{name}' already exists")]
    DuplicateName { name: String },

    /// An individual entry failed validation (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog entry validation errors.
///
/// Used for early validation before an entry is admitted to a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// A quantity rule's parameters make no sense.
    #[error("{item} has an invalid quantity rule: {reason}")]
    InvalidRule { item: String, reason: String },
}

// =============================================================================
// Config Error
// =============================================================================

/// Pricing configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Failed to parse pricing config: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with BasketError.
pub type BasketResult<T> = Result<T, BasketError>;

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convenience type alias for Results with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
