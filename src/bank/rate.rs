use crate::money::{format_fixed, parse_fixed, MoneyError, SCALE};

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Annual percentage with four fractional digits, `Rate(50_000)` is 5%
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rate(pub i64);

impl Rate {
    pub const fn percent(whole: i64) -> Self {
        return Self(whole * SCALE);
    }

    pub fn parse(string: &str) -> Result<Self, MoneyError> {
        let value = parse_fixed(string)?;

        if value < 0 {
            Err(MoneyError::Parse("Negative rate", string.to_string()))?
        }

        return Ok(Self(value));
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        format_fixed(self.0, f)?;
        return write!(f, "%");
    }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return serializer.collect_str(self);
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        return Rate::parse(string.trim_end_matches('%')).map_err(de::Error::custom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        assert_eq!(Rate::parse("5").unwrap(), Rate::percent(5));
        assert_eq!(Rate::parse("2.75").unwrap(), Rate(27_500));
        assert_eq!(Rate(27_500).to_string(), "2.7500%");
    }

    #[test]
    fn negative_rates_are_rejected() {
        assert!(Rate::parse("-1").is_err());
    }
}
