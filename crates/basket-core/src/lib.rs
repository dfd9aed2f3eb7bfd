//! # basket-core: Pure Basket Pricing
//!
//! Prices a basket of named items against an immutable catalog, applying
//! each item's quantity rule ("two for one", "three for two", ...).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Caller (checkout, API, batch job, ...)                               │
//! │        │  builds entries, supplies baskets                             │
//! │        ▼                                                                │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   rules   │  │  catalog  │  │  pricing  │  │   │
//! │  │   │   Money   │  │ Quantity  │  │  Catalog  │  │  Pricing  │  │   │
//! │  │   │ (Decimal) │  │   Rule    │  │   Entry   │  │  Engine   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • PURE FUNCTIONS                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Exact decimal `Money` (no floating point!)
//! - [`rules`] - Quantity rules mapping a raw count to a billable count
//! - [`catalog`] - Immutable name → (price, rule) registry
//! - [`pricing`] - `PricingEngine`: basket in, total out
//! - [`config`] - Catalog construction settings
//! - [`validation`] - Catalog entry checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{Catalog, CatalogEntry, Money, PricingEngine, QuantityRule};
//!
//! let catalog = Catalog::construct(vec![
//!     CatalogEntry::new("Apple", "0.35".parse().unwrap()),
//!     CatalogEntry::new("Banana", "0.20".parse().unwrap()),
//!     CatalogEntry::with_rule("Melon", "0.50".parse().unwrap(), QuantityRule::TwoForOne),
//!     CatalogEntry::with_rule("Lime", "0.15".parse().unwrap(), QuantityRule::ThreeForTwo),
//! ])
//! .unwrap();
//!
//! let engine = PricingEngine::construct(catalog);
//!
//! let basket = ["Apple", "Apple", "Banana", "Melon", "Melon", "Lime", "Lime", "Lime"];
//! let total = engine.total(&basket).unwrap();
//! assert_eq!(total.to_string(), "1.70");
//! assert_eq!(total, Money::from_cents(170));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod money;
pub mod pricing;
pub mod rules;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use basket_core::Money` instead of
// `use basket_core::money::Money`

pub use catalog::{Catalog, CatalogEntry, DuplicatePolicy};
pub use config::PricingConfig;
pub use error::{BasketError, BasketErrorKind, CatalogError, ConfigError, ValidationError};
pub use money::Money;
pub use pricing::{LineTotal, PricedBasket, PricingEngine};
pub use rules::QuantityRule;
