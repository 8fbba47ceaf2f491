//! Fixed-point payment amount with 2 decimal places.
//!
//! Uses `rust_decimal` internally so that the amount line of a payment code
//! is reproducible: no float formatting, no locale, always `.` as separator.

use crate::error::ValidationError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A non-negative amount that always renders with exactly 2 decimal places.
///
/// Values with more precision are rounded half away from zero on
/// construction, so `2.345` becomes `2.35` and `0.005` becomes `0.01`.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use swiss_qr_bill::Amount;
///
/// let amount = Amount::from_str("674.4").unwrap();
/// assert_eq!(amount.to_string(), "674.40");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places printed in the payment code.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates an amount from a `Decimal`, rounding to 2 decimal places.
    ///
    /// Fails for negative values; payment codes only carry amounts owed.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::NegativeAmount(value));
        }
        if value.is_zero() {
            return Ok(Self::ZERO);
        }
        let rounded =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        Ok(Amount(rounded))
    }

    /// Returns the underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)
            .map_err(|_| ValidationError::MalformedAmount(trimmed.to_string()))?;
        Amount::new(decimal)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> std::result::Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // value is already rounded to SCALE, this only pads
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_pads_to_two_places() {
        let a = Amount::from_str("674.45").unwrap();
        assert_eq!(a.to_string(), "674.45");

        let a = Amount::from_str("10").unwrap();
        assert_eq!(a.to_string(), "10.00");

        let a = Amount::from_str("  3.5  ").unwrap();
        assert_eq!(a.to_string(), "3.50");

        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(Amount::from_str("2.345").unwrap().to_string(), "2.35");
        assert_eq!(Amount::from_str("2.344").unwrap().to_string(), "2.34");
        assert_eq!(Amount::from_str("0.005").unwrap().to_string(), "0.01");
        assert_eq!(Amount::from_str("0.125").unwrap().to_string(), "0.13");
    }

    #[test]
    fn test_no_thousands_separator() {
        let a = Amount::from_str("1234567.8").unwrap();
        assert_eq!(a.to_string(), "1234567.80");
    }

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            Amount::from_str("-1.00"),
            Err(ValidationError::NegativeAmount(_))
        ));
        assert!(Amount::from_str("-0").is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            Amount::from_str("12,50"),
            Err(ValidationError::MalformedAmount("12,50".to_string()))
        );
        assert!(Amount::from_str("").is_err());
    }

    #[test]
    fn test_equal_regardless_of_input_scale() {
        assert_eq!(
            Amount::from_str("5").unwrap(),
            Amount::from_str("5.00").unwrap()
        );
    }

    #[test]
    fn test_value_and_zero() {
        let a = Amount::from_str("12.345").unwrap();
        assert_eq!(a.value(), Decimal::new(1235, 2));
        assert!(!a.is_zero());
        assert!(Amount::from_str("0.004").unwrap().is_zero());
        assert!(Amount::ZERO.is_zero());
    }

    #[test]
    fn test_serializes_as_padded_string() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize([Amount::from_str("7.5").unwrap()]).unwrap();
        let data = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(data, "7.50\n");
    }
}
