//! Money type for representing currency amounts
//!
//! Amounts are stored as signed cents (i64). Percentage-of-income limits are
//! the only place a float enters, and the result is rounded back to cents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use budgetline::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// `pct` percent of this amount, rounded to the nearest cent
    ///
    /// # Examples
    /// ```
    /// use budgetline::models::Money;
    /// let income = Money::from_units(5000);
    /// assert_eq!(income.percentage(20.0), Money::from_units(1000));
    /// ```
    pub fn percentage(&self, pct: f64) -> Self {
        Self((self.0 as f64 * pct / 100.0).round() as i64)
    }

    /// `part` as a percentage of `whole`; zero when `whole` is not positive
    pub fn ratio_percent(part: Money, whole: Money) -> f64 {
        if whole.0 > 0 {
            part.0 as f64 / whole.0 as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "-$10.50", "10".
    /// A sign after the currency symbol and amounts outside the `i64` cent
    /// range are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };
        let body = body.strip_prefix('$').unwrap_or(body);

        let (units, frac) = body.split_once('.').unwrap_or((body, ""));
        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (units.is_empty() && frac.is_empty()) || !is_digits(units) || !is_digits(frac) {
            return Err(invalid());
        }

        let units: i64 = if units.is_empty() {
            0
        } else {
            units.parse().map_err(|_| invalid())?
        };
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac[..2].parse().map_err(|_| invalid())?,
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a custom currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.units().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
    }

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("{:>8}", Money::from_cents(1050)), "  $10.50");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("$").is_err());
        assert_eq!(Money::parse("-$5").unwrap().cents(), -500);
    }

    #[test]
    fn test_parse_rejects_sign_after_symbol() {
        assert!(Money::parse("$-1.50").is_err());
        assert!(Money::parse("-$-5").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("+5").is_err());
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(Money::parse("100000000000000000").is_err());
        assert!(Money::parse("92233720368547758.08").is_err());
        assert_eq!(
            Money::parse("92233720368547758.07").unwrap().cents(),
            i64::MAX
        );
    }

    #[test]
    fn test_percentage_is_exact_for_whole_percents() {
        let income = Money::from_units(5000);
        assert_eq!(income.percentage(20.0), Money::from_units(1000));
        assert_eq!(income.percentage(0.0), Money::zero());
        assert_eq!(income.percentage(100.0), income);
    }

    #[test]
    fn test_percentage_rounds_to_cent() {
        // 33.333% of $100.00 = $33.333
        assert_eq!(Money::from_units(100).percentage(33.333).cents(), 3333);
    }

    #[test]
    fn test_ratio_percent_guards_zero() {
        assert_eq!(Money::ratio_percent(Money::from_units(5), Money::zero()), 0.0);
        assert_eq!(
            Money::ratio_percent(Money::from_units(5), Money::from_units(-10)),
            0.0
        );
        assert_eq!(
            Money::ratio_percent(Money::from_units(25), Money::from_units(100)),
            25.0
        );
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);

        let total: Money = vec![a, b, -b].into_iter().sum();
        assert_eq!(total, a);
    }

    #[test]
    fn test_serialization_is_plain_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(serde_json::to_string(&m).unwrap(), "1050");
    }
}
