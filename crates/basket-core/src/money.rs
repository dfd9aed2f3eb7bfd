//! # Money Module
//!
//! Provides the `Money` type for handling monetary values exactly.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.35 + 0.35 = 0.7 (0.69999999999999995559...)  ❌ WRONG!             │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    0.35 + 0.35 = 0.70 exactly                                          │
//! │    Scale is carried along, so 0.35 × 2 + 0.20 displays as 0.90         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Range and Precision
//! `Decimal` holds a 96-bit mantissa: at most 28-29 significant digits. An
//! amount that needs more than that is either too large (overflow) or would
//! have to be rounded. The `checked_*` operations return `None` in both cases,
//! so a total is exact or it is not produced at all. The check is on scale: a
//! result that only fits by dropping decimal places is refused even when the
//! dropped places happen to be zeros.
//!
//! ## Usage
//! ```rust
//! use basket_core::money::Money;
//!
//! let apple: Money = "0.35".parse().unwrap();
//! let banana = Money::from_cents(20);
//!
//! let total = apple
//!     .checked_multiply_quantity(2)
//!     .and_then(|line| line.checked_add(banana))
//!     .unwrap();
//! assert_eq!(total.to_string(), "0.90");
//!
//! // NEVER do this:
//! // let bad = Money::from_float(0.35); // NO SUCH METHOD EXISTS!
//! ```

use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Money Type
// =============================================================================

/// An exact monetary amount.
///
/// ## Design Decisions
/// - **Decimal, not cents**: catalog prices are given as decimal text
///   (`"0.35"`) and totals must compare equal to decimal literals
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **Numeric equality**: `0.9 == 0.90`; scale only affects `Display`
/// - **Serde**: serialized as a string (`"0.35"`), never a JSON float
///
/// ## Where Money is Used
/// ```text
/// CatalogEntry.unit_price ──► LineTotal.total ──► PricedBasket.total
///                                (× billable)        (Σ line totals)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an existing decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents, keeping two decimal places.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let price = Money::from_cents(35);
    /// assert_eq!(price.to_string(), "0.35");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiplies money by a billable quantity.
    ///
    /// Returns `None` if the product overflows or does not fit at the price's
    /// scale (which is where `Decimal` would start rounding).
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(15);
    /// let line_total = unit_price.checked_multiply_quantity(2);
    /// assert_eq!(line_total, Some(Money::from_cents(30)));
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Lime: 0.15, ThreeForTwo
    /// Basket count: 3 → billable: 2
    ///      │
    ///      ▼
    /// checked_multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: 0.30
    /// ```
    pub fn checked_multiply_quantity(&self, qty: u64) -> Option<Self> {
        let qty = Decimal::from(qty);
        let product = self.0.checked_mul(qty)?;
        exact(product, self.0.scale(), self.0.is_zero() || qty.is_zero())
    }

    /// Adds two amounts. `None` on overflow or lost digits.
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        let sum = self.0.checked_add(other.0)?;
        exact(sum, self.0.scale().max(other.0.scale()), self.is_zero() || other.is_zero())
    }

    /// Subtracts `other`. `None` on overflow or lost digits.
    pub fn checked_sub(&self, other: Money) -> Option<Self> {
        let difference = self.0.checked_sub(other.0)?;
        exact(
            difference,
            self.0.scale().max(other.0.scale()),
            self.is_zero() || other.is_zero(),
        )
    }

    /// Sums amounts from an exact zero. `None` if any partial sum is not
    /// exact. An empty iterator yields zero.
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }
}

/// An exact result of integer multiplication or of addition keeps at least
/// the operands' scale. `Decimal` lowers the scale (rounding) only when the
/// mantissa would not fit in 96 bits. A zero operand short-circuits: the
/// result is the other operand (or zero) as-is, whatever its scale.
fn exact(result: Decimal, scale: u32, zero_operand: bool) -> Option<Money> {
    (zero_operand || result.scale() >= scale).then_some(Money(result))
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the plain decimal amount with its scale (`0.90`, `1.70`).
///
/// ## Note
/// No currency symbol. Currency formatting belongs to whoever renders the
/// total for a human.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Panics on overflow, like the integer operators. Pricing code uses
/// [`Money::checked_add`].
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
