//! Prices in minor currency units.
//!
//! Catalog prices arrive as decimal dollars; they are rounded once to cents
//! here so that range checks, price sorting and cart totals all work on exact
//! integers.
//!
//! The rounding is lossy: feed prices that differ by less than half a cent
//! become the same `Money`, so they tie when sorting by price and are
//! indistinguishable to a price range.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies a catalog can be priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount of money in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Round a decimal amount to the nearest cent, half away from zero.
    ///
    /// Sub-cent precision is discarded; `10.001` and `10.004` both become
    /// `1000` cents.
    ///
    /// ```
    /// use storefront_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(109.95, Currency::USD);
    /// assert_eq!(price.amount_cents, 10995);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    pub fn usd(amount_cents: i64) -> Self {
        Self::new(amount_cents, Currency::USD)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Format for display, e.g. `$109.95`.
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            cents / 100,
            cents % 100
        )
    }

    /// Checked addition; `None` on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let cents = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(cents, self.currency))
    }

    /// Checked multiplication by a quantity.
    pub fn try_multiply(&self, quantity: i64) -> Option<Money> {
        let cents = self.amount_cents.checked_mul(quantity)?;
        Some(Money::new(cents, self.currency))
    }

    /// Checked sum, starting from zero in `currency`.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |total, m| total.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(22.3, Currency::USD).amount_cents, 2230);
        assert_eq!(Money::from_decimal(19.999, Currency::USD).amount_cents, 2000);
        assert_eq!(Money::from_decimal(695.0, Currency::USD).amount_cents, 69500);
    }

    #[test]
    fn test_from_decimal_collapses_sub_cent_differences() {
        let a = Money::from_decimal(10.001, Currency::USD);
        let b = Money::from_decimal(10.004, Currency::USD);
        assert_eq!(a, b);
        assert_eq!(a.amount_cents, 1000);
        assert_ne!(a, Money::from_decimal(10.006, Currency::USD));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::usd(10995).display(), "$109.95");
        assert_eq!(Money::usd(5).display(), "$0.05");
        assert_eq!(Money::usd(-250).to_string(), "-$2.50");
        assert_eq!(Money::new(1000, Currency::EUR).display(), "\u{20ac}10.00");
    }

    #[test]
    fn test_try_add_rejects_mixed_currencies() {
        let usd = Money::usd(1000);
        let eur = Money::new(1000, Currency::EUR);
        assert_eq!(usd.try_add(&eur), None);
        assert_eq!(usd.try_add(&usd), Some(Money::usd(2000)));
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        assert_eq!(Money::usd(16800).try_multiply(4), Some(Money::usd(67200)));
        assert_eq!(Money::usd(i64::MAX).try_multiply(2), None);
        let huge = [Money::usd(i64::MAX), Money::usd(1)];
        assert_eq!(Money::try_sum(huge.iter(), Currency::USD), None);
    }
}
