use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use thiserror::Error;

/// Number of fractional units in one whole unit of currency (four decimal places)
pub const SCALE: i64 = 10_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Overflow error while applying {0} operation on {1} and {2}")]
    Overflow(&'static str, Money, Money),

    #[error("Underflow error while applying {0} operation on {1} and {2}")]
    Underflow(&'static str, Money, Money),

    #[error("Money parse error: {0}, {1:?}")]
    Parse(&'static str, String),
}

/// Fixed-point decimal amount, stored as ten-thousandths of a currency unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(i64::MAX);
    pub const MIN: Self = Self(i64::MIN);

    /// Whole currency units, e.g. `Money::whole(1000)` is 1000.0000
    pub const fn whole(units: i64) -> Self {
        return Self(units * SCALE);
    }

    pub fn parse(string: &str) -> Result<Self, MoneyError> {
        return parse_fixed(string).map(Self);
    }

    pub fn is_positive(&self) -> bool {
        return self.0 > 0;
    }

    pub fn add(&mut self, other: &Self) -> Result<(), MoneyError> {
        let a = self.0;
        let b = other.0;

        self.0 = match a.checked_add(b) {
            Some(sum) => sum,
            None if b > 0 => Err(MoneyError::Overflow("add", Money(a), *other))?,
            None => Err(MoneyError::Underflow("add", Money(a), *other))?,
        };

        return Ok(());
    }

    pub fn sub(&mut self, other: &Self) -> Result<(), MoneyError> {
        let a = self.0;
        let b = other.0;

        self.0 = match a.checked_sub(b) {
            Some(diff) => diff,
            None if b < 0 => Err(MoneyError::Overflow("sub", Money(a), *other))?,
            None => Err(MoneyError::Underflow("sub", Money(a), *other))?,
        };

        return Ok(());
    }
}

/// Parses a decimal string with at most four fractional digits into ten-thousandths
pub(crate) fn parse_fixed(string: &str) -> Result<i64, MoneyError> {
    let trimmed = string.trim();

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let mut parts = digits.split('.');

    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();

    if parts.next().is_some() {
        Err(MoneyError::Parse("Too many decimal points", string.to_string()))?
    }

    if whole.is_empty() && fraction.is_empty() {
        Err(MoneyError::Parse("No digits", string.to_string()))?
    }

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        Err(MoneyError::Parse("Unexpected character", string.to_string()))?
    }

    if fraction.len() > 4 {
        Err(MoneyError::Parse("More than four decimal places", string.to_string()))?
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| MoneyError::Parse("Value out of range", string.to_string()))?
    };

    let fraction: i64 = format!("{fraction:0<4}")
        .parse()
        .map_err(|_| MoneyError::Parse("Unexpected character", string.to_string()))?;

    let units = whole
        .checked_mul(SCALE)
        .and_then(|units| units.checked_add(fraction))
        .ok_or_else(|| MoneyError::Parse("Value out of range", string.to_string()))?;

    return Ok(if negative { -units } else { units });
}

/// Formats ten-thousandths with exactly four fractional digits
pub(crate) fn format_fixed(value: i64, f: &mut fmt::Formatter) -> fmt::Result {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    let scale = SCALE as u64;

    return write!(f, "{sign}{}.{:04}", abs / scale, abs % scale);
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return format_fixed(self.0, f);
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return serializer.collect_str(self);
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        return Money::parse(&string).map_err(de::Error::custom);
    }
}
