//! Money type for representing statement amounts
//!
//! Internally stores amounts in pence (i64) to avoid floating-point drift in
//! running totals. Negative amounts are outgoing, positive amounts income.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Largest magnitude accepted by [`Money::parse`]: one trillion pounds.
/// Keeps sums over any realistic number of rows inside `i64`.
pub const MAX_PARSE_PENCE: i64 = 100_000_000_000_000;

/// Represents a monetary amount stored as pence (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from pence
    ///
    /// # Examples
    /// ```
    /// use statement_tracker::models::Money;
    /// let amount = Money::from_pence(2350); // £23.50
    /// assert_eq!(amount.to_string(), "£23.50");
    /// ```
    pub const fn from_pence(pence: i64) -> Self {
        Self(pence)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in pence
    pub const fn pence(&self) -> i64 {
        self.0
    }

    /// Get the whole pounds portion (truncated toward zero)
    pub const fn pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Get the pence portion (0-99)
    pub const fn pence_part(&self) -> i64 {
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

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a statement value such as "-23.50", "2000.00", "+5", ".5" or "£12.40"
    ///
    /// More than two decimal places are rounded half away from zero to the
    /// nearest penny. Amounts above [`MAX_PARSE_PENCE`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.strip_prefix('£').unwrap_or(rest);

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(invalid());
        }

        let pounds: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let pence: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => {
                let cents: i64 = fraction[..2].parse().map_err(|_| invalid())?;
                let round_up = fraction.as_bytes().get(2).is_some_and(|d| *d >= b'5');
                cents + i64::from(round_up)
            }
        };

        let total = pounds
            .checked_mul(100)
            .and_then(|p| p.checked_add(pence))
            .filter(|total| *total <= MAX_PARSE_PENCE)
            .ok_or_else(|| MoneyParseError::OutOfRange(trimmed.to_string()))?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Plain decimal rendering without a currency symbol ("-23.50")
    pub fn to_decimal_string(&self) -> String {
        if self.is_negative() {
            format!("-{}.{:02}", self.pounds().abs(), self.pence_part())
        } else {
            format!("{}.{:02}", self.pounds(), self.pence_part())
        }
    }

    /// Value as floating point pounds, for ratios only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = if self.is_negative() {
            format!("-£{}.{:02}", self.pounds().abs(), self.pence_part())
        } else {
            format!("£{}.{:02}", self.pounds(), self.pence_part())
        };
        f.pad(&rendered)
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

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pence() {
        let m = Money::from_pence(1050);
        assert_eq!(m.pence(), 1050);
        assert_eq!(m.pounds(), 10);
        assert_eq!(m.pence_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_pence(1050)), "£10.50");
        assert_eq!(format!("{}", Money::from_pence(0)), "£0.00");
        assert_eq!(format!("{}", Money::from_pence(-1050)), "-£10.50");
        assert_eq!(format!("{}", Money::from_pence(5)), "£0.05");
        assert_eq!(format!("{:>8}", Money::from_pence(5)), "   £0.05");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_pence(-2350).to_decimal_string(), "-23.50");
        assert_eq!(Money::from_pence(200000).to_decimal_string(), "2000.00");
        assert_eq!(Money::from_pence(-5).to_decimal_string(), "-0.05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("-23.50").unwrap().pence(), -2350);
        assert_eq!(Money::parse("2000.00").unwrap().pence(), 200000);
        assert_eq!(Money::parse("10").unwrap().pence(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().pence(), 1050);
        assert_eq!(Money::parse("+4.20").unwrap().pence(), 420);
        assert_eq!(Money::parse(".5").unwrap().pence(), 50);
        assert_eq!(Money::parse("-0.50").unwrap().pence(), -50);
        assert_eq!(Money::parse("£12.40").unwrap().pence(), 1240);
    }

    #[test]
    fn test_parse_rounds_extra_decimals() {
        assert_eq!(Money::parse("0.994").unwrap().pence(), 99);
        assert_eq!(Money::parse("0.995").unwrap().pence(), 100);
        assert_eq!(Money::parse(" 7.999 ").unwrap().pence(), 800);
        assert_eq!(Money::parse("-2.345").unwrap().pence(), -235);
        assert_eq!(Money::parse("1.00499").unwrap().pence(), 100);
    }

    #[test]
    fn test_parse_bounds_magnitude() {
        assert_eq!(
            Money::parse("1000000000000.00").unwrap().pence(),
            MAX_PARSE_PENCE
        );
        assert_eq!(
            Money::parse("-1000000000000").unwrap().pence(),
            -MAX_PARSE_PENCE
        );
        assert!(matches!(
            Money::parse("1000000000000.01"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("90000000000000000.00"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1,234.00").is_err());
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("1.é").is_err());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_pence(1000);
        let b = Money::from_pence(500);

        assert_eq!((a + b).pence(), 1500);
        assert_eq!((a - b).pence(), 500);
        assert_eq!((-a).pence(), -1000);

        let total: Money = vec![a, b, -b].into_iter().sum();
        assert_eq!(total, a);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_pence(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
