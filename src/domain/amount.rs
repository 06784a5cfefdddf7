use crate::domain::webhook::Rejection;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};
use std::fmt;

/// A non-zero monetary amount, kept exactly as it arrived.
///
/// Transfers can only be built from an `Amount`, so no transfer ever
/// carries a zero value. `0`, `0.0` and `-0` are all zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: impl Into<Decimal>) -> Result<Self, Rejection> {
        let value = value.into();
        if value.is_zero() {
            Err(Rejection::AmountZero)
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = Rejection;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whole amounts go on the wire as integers, fractional ones as floats.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract().is_zero()
            && let Some(whole) = self.0.to_i64()
        {
            return serializer.serialize_i64(whole);
        }
        match self.0.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => Err(serde::ser::Error::custom(format!(
                "amount {} is not representable as a number",
                self.0
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_is_rejected_in_any_scale() {
        assert_eq!(Amount::new(0), Err(Rejection::AmountZero));
        assert_eq!(Amount::new(dec!(0.0)), Err(Rejection::AmountZero));
        assert_eq!(Amount::new(dec!(-0.00)), Err(Rejection::AmountZero));
    }

    #[test]
    fn test_value_is_kept_unchanged() {
        assert_eq!(Amount::new(1).unwrap().value(), dec!(1));
        assert_eq!(Amount::new(-250).unwrap().value(), dec!(-250));
        assert_eq!(Amount::new(dec!(12.5)).unwrap().value(), dec!(12.5));
    }

    #[test]
    fn test_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&Amount::new(1500).unwrap()).unwrap(), "1500");
        assert_eq!(serde_json::to_string(&Amount::new(dec!(1.0)).unwrap()).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Amount::new(dec!(12.5)).unwrap()).unwrap(), "12.5");
    }
}
