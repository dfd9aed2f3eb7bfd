//! # Quantity Rules
//!
//! A quantity rule turns the raw number of units in a basket into the number
//! of units the customer is billed for.
//!
//! ## Built-in Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  count        0   1   2   3   4   5   6                                 │
//! │  ───────────────────────────────────────                               │
//! │  Normal       0   1   2   3   4   5   6    billable = count            │
//! │  TwoForOne    0   1   1   2   2   3   3    count/2 + count%2           │
//! │  ThreeForTwo  0   1   2   2   3   4   4    (count/3)*2 + count%3       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule is a pure, total function of the count alone.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// How many units of an item are billed for a given basket count.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuantityRule {
    /// Every unit is billed.
    #[default]
    Normal,

    /// Buy two, pay for one. An odd leftover is billed individually.
    TwoForOne,

    /// Buy three, pay for two. Up to two leftovers are billed individually.
    ThreeForTwo,

    /// Buy `buy`, pay for `pay`. Leftovers are billed individually.
    MultiBuy { buy: u64, pay: u64 },

    /// Caller-supplied rule. Must be pure: same count, same result.
    #[serde(skip)]
    Custom(fn(u64) -> u64),
}

impl QuantityRule {
    /// Returns the billable quantity for `count` units.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::rules::QuantityRule;
    ///
    /// assert_eq!(QuantityRule::TwoForOne.apply(5), 3);
    /// assert_eq!(QuantityRule::ThreeForTwo.apply(6), 4);
    /// ```
    pub fn apply(&self, count: u64) -> u64 {
        match *self {
            QuantityRule::Normal => count,
            QuantityRule::TwoForOne => multi_buy(count, 2, 1),
            QuantityRule::ThreeForTwo => multi_buy(count, 3, 2),
            QuantityRule::MultiBuy { buy, pay } => multi_buy(count, buy, pay),
            QuantityRule::Custom(rule) => rule(count),
        }
    }

    /// Checks the rule's parameters for the item called `item`.
    ///
    /// ## Rules
    /// - `MultiBuy.buy` must be positive
    /// - `MultiBuy.pay` must not exceed `buy`
    pub fn validate(&self, item: &str) -> Result<(), ValidationError> {
        if let QuantityRule::MultiBuy { buy, pay } = *self {
            if buy == 0 {
                return Err(ValidationError::InvalidRule {
                    item: item.to_string(),
                    reason: "buy quantity must be positive".to_string(),
                });
            }
            if pay > buy {
                return Err(ValidationError::InvalidRule {
                    item: item.to_string(),
                    reason: format!("pay quantity {} exceeds buy quantity {}", pay, buy),
                });
            }
        }
        Ok(())
    }
}

/// For every full group of `buy` units bill `pay`, then bill the remainder.
///
/// A zero group size bills every unit.
fn multi_buy(count: u64, buy: u64, pay: u64) -> u64 {
    if buy == 0 {
        return count;
    }
    count / buy * pay + count % buy
}

impl fmt::Display for QuantityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityRule::Normal => write!(f, "normal"),
            QuantityRule::TwoForOne => write!(f, "two_for_one"),
            QuantityRule::ThreeForTwo => write!(f, "three_for_two"),
            QuantityRule::MultiBuy { buy, pay } => write!(f, "{}_for_{}", buy, pay),
            QuantityRule::Custom(_) => write!(f, "custom"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
