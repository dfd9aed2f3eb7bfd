//! # Pricing Engine
//!
//! Computes the grand total of a basket against a catalog.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  basket: Option<&[name]>                                               │
//! │       │                                                                 │
//! │       ├── None ──────────────────────────► Err(NullBasket)             │
//! │       ▼                                                                 │
//! │  tally: name → count          ["Melon","Apple","Melon"]                │
//! │       │                        → {Apple: 1, Melon: 2}                   │
//! │       ▼                                                                 │
//! │  coverage: every name known? ─── no ─────► Err(UnsupportedBasket)      │
//! │       │                                    (whole basket, no partial)   │
//! │       ▼                                                                 │
//! │  per name: rule(count) × unit price = line total                       │
//! │       │                        Apple 1 × 0.35 = 0.35                    │
//! │       │                        Melon 1 × 0.50 = 0.50  (2 for 1)         │
//! │       ▼                                                                 │
//! │  Σ line totals from exact zero ──────────► Ok(0.85)                    │
//! │       │                                                                 │
//! │       └── not exact ─────────────────────► Err(AmountOutOfRange)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The engine holds nothing but an `Arc<Catalog>` that no one can mutate, so
//! `calculate` takes `&self` and runs on any number of threads without a
//! lock. Each call keeps its tally and accumulator on its own stack.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::{BasketError, BasketResult};
use crate::money::Money;

// =============================================================================
// Results
// =============================================================================

/// The priced line for one distinct item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineTotal {
    /// Item name.
    pub name: String,
    /// Raw occurrences in the basket.
    pub count: u64,
    /// Units billed after the quantity rule.
    pub billable: u64,
    /// Catalog unit price.
    pub unit_price: Money,
    /// `billable × unit_price`.
    pub total: Money,
}

impl LineTotal {
    fn new(entry: &CatalogEntry, count: u64) -> Option<Self> {
        Some(LineTotal {
            name: entry.name().to_string(),
            count,
            billable: entry.quantity_rule().apply(count),
            unit_price: entry.unit_price(),
            total: entry.line_total(count)?,
        })
    }

    /// What the customer would have paid without the quantity rule, minus
    /// what they pay with it. `None` if the undiscounted amount is out of
    /// exact range.
    pub fn saving(&self) -> Option<Money> {
        self.unit_price
            .checked_multiply_quantity(self.count)?
            .checked_sub(self.total)
    }
}

/// A fully priced basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedBasket {
    /// One line per distinct item, ordered by name.
    pub lines: Vec<LineTotal>,
    /// Sum of all line totals.
    pub total: Money,
}

impl PricedBasket {
    /// Total raw units in the basket.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| l.count).sum()
    }

    /// Total units billed.
    pub fn billable_count(&self) -> u64 {
        self.lines.iter().map(|l| l.billable).sum()
    }

    /// Total saved by quantity rules across all lines.
    pub fn savings(&self) -> Option<Money> {
        self.lines
            .iter()
            .try_fold(Money::zero(), |acc, line| acc.checked_add(line.saving()?))
    }
}

// =============================================================================
// Tally
// =============================================================================

/// Groups a basket by item name.
///
/// ## Example
/// ```rust
/// use basket_core::pricing::tally;
///
/// let counts = tally(&["Melon", "Apple", "Melon"]);
/// assert_eq!(counts.get("Melon"), Some(&2));
/// assert_eq!(counts.get("Apple"), Some(&1));
/// ```
pub fn tally<S: AsRef<str>>(basket: &[S]) -> BTreeMap<&str, u64> {
    let mut counts = BTreeMap::new();
    for name in basket {
        *counts.entry(name.as_ref()).or_insert(0) += 1;
    }
    counts
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Prices baskets against one immutable catalog.
///
/// ## Usage
/// ```rust
/// use basket_core::{Catalog, CatalogEntry, Money, PricingEngine, QuantityRule};
///
/// let catalog = Catalog::construct(vec![
///     CatalogEntry::new("Apple", Money::from_cents(35)),
///     CatalogEntry::with_rule("Lime", Money::from_cents(15), QuantityRule::ThreeForTwo),
/// ])
/// .unwrap();
/// let engine = PricingEngine::construct(catalog);
///
/// let basket = vec!["Apple", "Lime", "Lime", "Lime"];
/// let total = engine.calculate(Some(basket.as_slice())).unwrap();
/// assert_eq!(total.to_string(), "0.65");
///
/// assert!(engine.calculate::<&str>(None).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PricingEngine {
    catalog: Arc<Catalog>,
}

impl PricingEngine {
    /// Creates an engine over `catalog`.
    ///
    /// Accepts either an owned `Catalog` or an `Arc<Catalog>` already shared
    /// with other engines.
    pub fn construct(catalog: impl Into<Arc<Catalog>>) -> Self {
        PricingEngine {
            catalog: catalog.into(),
        }
    }

    /// The catalog this engine prices against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Computes the grand total of `basket`.
    ///
    /// ## Errors
    /// - [`BasketError::NullBasket`] when `basket` is `None`
    /// - [`BasketError::UnsupportedBasket`] when any name is not in the
    ///   catalog; no partial total is produced
    /// - [`BasketError::AmountOutOfRange`] when a line total or the grand
    ///   total cannot be held exactly
    pub fn calculate<S: AsRef<str>>(&self, basket: Option<&[S]>) -> BasketResult<Money> {
        self.price(basket).map(|priced| priced.total)
    }

    /// Shorthand for [`calculate`](Self::calculate) with a basket that is
    /// known to be present.
    pub fn total<S: AsRef<str>>(&self, basket: &[S]) -> BasketResult<Money> {
        self.calculate(Some(basket))
    }

    /// Prices `basket` and returns the per-line breakdown with the total.
    pub fn price<S: AsRef<str>>(&self, basket: Option<&[S]>) -> BasketResult<PricedBasket> {
        let basket = basket.ok_or(BasketError::NullBasket)?;
        let counts = tally(basket);

        // Coverage first: nothing is priced unless every name is known.
        let covered = counts
            .into_iter()
            .map(|(name, count)| self.catalog.lookup(name).map(|entry| (entry, count)))
            .collect::<Option<Vec<_>>>();

        let Some(covered) = covered else {
            let err = BasketError::unsupported(basket);
            warn!(items = basket.len(), "{}", err);
            return Err(err);
        };

        let priced = covered
            .into_iter()
            .map(|(entry, count)| LineTotal::new(entry, count))
            .collect::<Option<Vec<_>>>()
            .and_then(|lines| {
                let total = Money::checked_sum(lines.iter().map(|l| l.total))?;
                Some((lines, total))
            });

        let Some((lines, total)) = priced else {
            let err = BasketError::out_of_range(basket);
            warn!(items = basket.len(), "{}", err);
            return Err(err);
        };

        debug!(
            items = basket.len(),
            distinct = lines.len(),
            total = %total,
            "Basket priced"
        );

        Ok(PricedBasket { lines, total })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BasketErrorKind;
    use crate::rules::QuantityRule;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Barrier;

    fn fruit() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("Apple", Money::from_cents(35)),
            CatalogEntry::new("Banana", Money::from_cents(20)),
            CatalogEntry::with_rule("Melon", Money::from_cents(50), QuantityRule::TwoForOne),
            CatalogEntry::with_rule("Lime", Money::from_cents(15), QuantityRule::ThreeForTwo),
        ]
    }

    fn engine() -> PricingEngine {
        PricingEngine::construct(Catalog::construct(fruit()).unwrap())
    }

    fn total_of(basket: &[&str]) -> Money {
        engine().total(basket).unwrap()
    }

    #[test]
    fn test_one_apple() {
        assert_eq!(total_of(&["Apple"]), Money::new(dec!(0.35)));
    }

    #[test]
    fn test_one_banana() {
        assert_eq!(total_of(&["Banana"]), Money::new(dec!(0.20)));
    }

    #[test]
    fn test_two_apples_one_banana() {
        let total = total_of(&["Apple", "Apple", "Banana"]);
        assert_eq!(total, Money::new(dec!(0.90)));
        assert_eq!(total.to_string(), "0.90");
    }

    #[test]
    fn test_two_melons() {
        assert_eq!(total_of(&["Melon", "Melon"]), Money::new(dec!(0.50)));
    }

    #[test]
    fn test_three_limes() {
        assert_eq!(total_of(&["Lime", "Lime", "Lime"]), Money::new(dec!(0.30)));
    }

    #[test]
    fn test_mixed_basket() {
        let basket = [
            "Apple", "Apple", "Banana", "Melon", "Melon", "Lime", "Lime", "Lime",
        ];
        let total = total_of(&basket);
        assert_eq!(total, Money::new(dec!(1.70)));
        assert_eq!(total.to_string(), "1.70");
    }

    #[test]
    fn test_empty_basket_is_zero() {
        let empty: [&str; 0] = [];
        let total = total_of(&empty);
        assert!(total.is_zero());
        assert_eq!(total, Money::new(dec!(0.00)));
    }

    #[test]
    fn test_null_basket() {
        let err = engine().calculate::<&str>(None).unwrap_err();
        assert_eq!(err, BasketError::NullBasket);
        assert_eq!(err.kind(), BasketErrorKind::NullBasket);
        assert_eq!(err.to_string(), "Basket is null");
    }

    #[test]
    fn test_unknown_item() {
        let basket = vec!["Avocado".to_string()];
        let err = engine().calculate(Some(basket.as_slice())).unwrap_err();
        assert_eq!(err.kind(), BasketErrorKind::UnsupportedBasket);
        assert_eq!(
            err.to_string(),
            "Basket [Avocado] is not fully supported by this catalog."
        );
    }

    #[test]
    fn test_one_unknown_item_fails_whole_basket() {
        let basket = ["Apple", "Melon", "Avocado", "Apple"];
        let err = engine().total(&basket).unwrap_err();
        assert_eq!(err.basket().unwrap(), &["Apple", "Melon", "Avocado", "Apple"]);
        assert!(err
            .to_string()
            .contains("[Apple, Melon, Avocado, Apple]"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(engine().total(&["apple"]).is_err());
    }

    #[test]
    fn test_order_independence() {
        let basket = vec![
            "Apple", "Apple", "Banana", "Melon", "Melon", "Lime", "Lime", "Lime",
        ];
        let engine = engine();
        let expected = engine.total(&basket).unwrap();

        let mut reversed = basket.clone();
        reversed.reverse();
        assert_eq!(engine.total(&reversed).unwrap(), expected);

        for shift in 0..basket.len() {
            let mut rotated = basket.clone();
            rotated.rotate_left(shift);
            assert_eq!(engine.total(&rotated).unwrap(), expected);
        }

        let mut sorted = basket.clone();
        sorted.sort_unstable();
        assert_eq!(engine.total(&sorted).unwrap(), expected);
    }

    #[test]
    fn test_total_matches_rule_formula() {
        let engine = engine();
        let catalog = engine.catalog();

        for apples in 0..5u64 {
            for melons in 0..7u64 {
                for limes in 0..8u64 {
                    let mut basket = Vec::new();
                    basket.extend(std::iter::repeat("Apple").take(apples as usize));
                    basket.extend(std::iter::repeat("Melon").take(melons as usize));
                    basket.extend(std::iter::repeat("Lime").take(limes as usize));

                    let expected = [("Apple", apples), ("Melon", melons), ("Lime", limes)]
                        .into_iter()
                        .map(|(name, n)| catalog.lookup(name).unwrap().line_total(n).unwrap());
                    let expected = Money::checked_sum(expected).unwrap();

                    assert_eq!(engine.total(&basket).unwrap(), expected);
                }
            }
        }
    }

    #[test]
    fn test_price_breakdown() {
        let basket = ["Lime", "Melon", "Lime", "Melon", "Lime", "Melon"];
        let priced = engine().price(Some(&basket[..])).unwrap();

        let names: Vec<&str> = priced.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Lime", "Melon"]);

        let lime = &priced.lines[0];
        assert_eq!((lime.count, lime.billable), (3, 2));
        assert_eq!(lime.total, Money::new(dec!(0.30)));
        assert_eq!(lime.saving(), Some(Money::new(dec!(0.15))));

        let melon = &priced.lines[1];
        assert_eq!((melon.count, melon.billable), (3, 2));
        assert_eq!(melon.total, Money::new(dec!(1.00)));

        assert_eq!(priced.total, Money::new(dec!(1.30)));
        assert_eq!(priced.item_count(), 6);
        assert_eq!(priced.billable_count(), 4);
        assert_eq!(priced.savings(), Some(Money::new(dec!(0.65))));
    }

    fn extreme() -> PricingEngine {
        let mut entries = fruit();
        entries.push(CatalogEntry::new("Gold", Money::new(Decimal::MAX)));
        entries.push(CatalogEntry::new("Big", Money::new(dec!(10000000000000000000))));
        entries.push(CatalogEntry::new(
            "Tiny",
            Money::new(dec!(0.000000000000000000000000001)),
        ));
        PricingEngine::construct(Catalog::construct(entries).unwrap())
    }

    #[test]
    fn test_largest_price_alone_is_exact() {
        assert_eq!(
            extreme().total(&["Gold"]).unwrap(),
            Money::new(Decimal::MAX)
        );
    }

    #[test]
    fn test_line_overflow_is_an_error() {
        let err = extreme().total(&["Gold", "Gold"]).unwrap_err();
        assert_eq!(err.kind(), BasketErrorKind::AmountOutOfRange);
        assert_eq!(err.basket().unwrap(), &["Gold", "Gold"]);
        assert_eq!(
            err.to_string(),
            "Basket [Gold, Gold] total exceeds the exact decimal range."
        );
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let err = extreme().total(&["Gold", "Apple"]).unwrap_err();
        assert_eq!(err.kind(), BasketErrorKind::AmountOutOfRange);
    }

    #[test]
    fn test_coverage_checked_before_pricing() {
        let err = extreme().total(&["Gold", "Gold", "Avocado"]).unwrap_err();
        assert_eq!(err.kind(), BasketErrorKind::UnsupportedBasket);
    }

    #[test]
    fn test_total_that_would_round_is_an_error() {
        let err = extreme().total(&["Big", "Tiny"]).unwrap_err();
        assert_eq!(err.kind(), BasketErrorKind::AmountOutOfRange);

        assert_eq!(
            extreme().total(&["Big"]).unwrap(),
            Money::new(dec!(10000000000000000000))
        );
    }

    #[test]
    fn test_tally() {
        let counts = tally(&["b", "a", "b", "c", "b"]);
        assert_eq!(counts.into_iter().collect::<Vec<_>>(), vec![("a", 1), ("b", 3), ("c", 1)]);

        let empty: [String; 0] = [];
        assert!(tally(&empty).is_empty());
    }

    #[test]
    fn test_repeated_calls_are_deterministic() {
        let engine = engine();
        let basket = ["Melon", "Lime", "Apple", "Melon"];
        let first = engine.total(&basket).unwrap();
        for _ in 0..100 {
            assert_eq!(engine.total(&basket).unwrap(), first);
        }
    }

    #[test]
    fn test_engines_share_catalog() {
        let catalog = Arc::new(Catalog::construct(fruit()).unwrap());
        let a = PricingEngine::construct(Arc::clone(&catalog));
        let b = PricingEngine::construct(Arc::clone(&catalog));
        assert_eq!(a.total(&["Apple"]).unwrap(), b.total(&["Apple"]).unwrap());
        assert_eq!(Arc::strong_count(&catalog), 3);
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PricingEngine>();
        assert_send_sync::<Catalog>();
    }

    /// Every thread waits at the barrier, then all price their single-item
    /// basket at once, many times over.
    #[test]
    fn test_concurrent_single_item_baskets() {
        let engine = engine();
        let entries: Vec<&CatalogEntry> = engine.catalog().entries().collect();
        let start = Barrier::new(entries.len());

        std::thread::scope(|s| {
            let handles: Vec<_> = entries
                .iter()
                .map(|entry| {
                    let engine = &engine;
                    let start = &start;
                    s.spawn(move || {
                        start.wait();
                        for _ in 0..1_000 {
                            let total = engine.total(&[entry.name()]).unwrap();
                            assert_eq!(total, entry.unit_price());
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_tasks_share_engine() {
        let engine = Arc::new(engine());
        let names: Vec<String> = engine.catalog().names().map(String::from).collect();
        let start = Arc::new(tokio::sync::Barrier::new(names.len() * 4));

        let mut handles = Vec::new();
        for _ in 0..4 {
            for name in &names {
                let engine = Arc::clone(&engine);
                let start = Arc::clone(&start);
                let name = name.clone();
                handles.push(tokio::spawn(async move {
                    start.wait().await;
                    let price = engine.catalog().lookup(&name).unwrap().unit_price();
                    let total = engine.total(&[name.as_str()]).unwrap();
                    (total, price)
                }));
            }
        }

        for handle in handles {
            let (total, price) = handle.await.unwrap();
            assert_eq!(total, price);
        }
    }
}
