//! Monetary amounts and compensation percentages.
//!
//! Both are exact decimals. Keeping them as distinct types stops a price
//! being used where a fraction is expected, and vice versa.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;

use super::DomainError;

/// A non-negative amount of money.
///
/// # Examples
///
/// ```
/// use repay_server::domain::Money;
/// use rust_decimal::Decimal;
///
/// let price = Money::new(Decimal::new(1250, 2)).unwrap();
/// assert_eq!(price.to_string(), "12.50");
///
/// // Negative amounts are rejected, as are absurdly large ones
/// assert!(Money::new(Decimal::new(-1, 0)).is_err());
/// assert!(Money::new(Money::MAX.value() + Decimal::ONE).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted amount. Sums of any realistic number of tickets
    /// stay far inside `Decimal`'s range, so adding never overflows.
    pub const MAX: Self = Self(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

    /// Create an amount, rejecting negative values and values above
    /// [`Money::MAX`].
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value.is_zero() {
            return Ok(Self::ZERO);
        }
        if value.is_sign_negative() {
            return Err(DomainError::NegativeAmount(value.to_string()));
        }
        if value > Self::MAX.0 {
            return Err(DomainError::AmountTooLarge(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the share of this amount given by `percentage`.
    pub fn share(&self, percentage: Percentage) -> Money {
        Money(self.0 * percentage.value())
    }

    /// Rounds to whole pence for output.
    pub fn round_to_pence(&self) -> Money {
        Money(self.0.round_dp(2))
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A compensation fraction in `[0, 1]`.
///
/// Whether a rate is offered at all is expressed with `Option<Percentage>`,
/// never with a zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(Decimal);

impl Percentage {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a percentage from a fraction, rejecting values outside `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use repay_server::domain::Percentage;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Percentage::new(Decimal::new(25, 2)).is_ok());
    /// assert!(Percentage::new(Decimal::new(101, 2)).is_err());
    /// assert!(Percentage::new(Decimal::new(-1, 2)).is_err());
    /// ```
    pub fn new(fraction: Decimal) -> Result<Self, DomainError> {
        if fraction < Decimal::ZERO || fraction > Decimal::ONE {
            return Err(DomainError::InvalidPercentage(fraction.to_string()));
        }
        Ok(Self(fraction))
    }

    /// Returns the fraction as a decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}
