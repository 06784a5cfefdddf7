use crate::domain::amount::Amount;
use crate::domain::webhook::Rejection;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use std::str::FromStr;

/// Typed view of an inbound invoice event: `event.log.invoice.amount`.
///
/// Every level is optional. A missing or `null` level reads as an absent
/// amount; unrelated fields are ignored. The amount is read from any JSON
/// number, integer or not, without rounding.
#[derive(Debug, Default, Deserialize, PartialEq, Clone)]
pub struct InboundEvent {
    #[serde(default)]
    pub event: Option<EventEnvelope>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Clone)]
pub struct EventEnvelope {
    #[serde(default)]
    pub log: Option<EventLog>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Clone)]
pub struct EventLog {
    #[serde(default)]
    pub invoice: Option<InvoiceRecord>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Clone)]
pub struct InvoiceRecord {
    #[serde(default, deserialize_with = "decimal_from_number")]
    pub amount: Option<Decimal>,
}

/// Reads a JSON number as an exact decimal. Non-numbers and numbers outside
/// the decimal range fail to decode.
fn decimal_from_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("amount {text} is out of range: {e}")))
}

impl InboundEvent {
    /// Decodes an already parsed JSON body.
    pub fn from_json(value: &Value) -> serde_json::Result<Self> {
        Self::deserialize(value)
    }

    /// Raw amount at `event.log.invoice.amount`, if any.
    pub fn invoice_amount(&self) -> Option<Decimal> {
        self.event
            .as_ref()?
            .log
            .as_ref()?
            .invoice
            .as_ref()?
            .amount
    }

    /// Validates the nominal amount of the event.
    pub fn nominal_amount(&self) -> Result<Amount, Rejection> {
        let amount = self.invoice_amount().ok_or(Rejection::AmountMissing)?;
        Amount::new(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(json: &str) -> InboundEvent {
        serde_json::from_str(json).expect("valid event")
    }

    #[test]
    fn test_amount_present() {
        let event = parse(r#"{"event":{"log":{"invoice":{"amount":1}}}}"#);
        assert_eq!(event.nominal_amount().unwrap().value(), dec!(1));
    }

    #[test]
    fn test_amount_zero() {
        let event = parse(r#"{"event":{"log":{"invoice":{"amount":0}}}}"#);
        assert_eq!(event.nominal_amount(), Err(Rejection::AmountZero));
    }

    #[test]
    fn test_float_zero_is_zero() {
        for json in [
            r#"{"event":{"log":{"invoice":{"amount":0.0}}}}"#,
            r#"{"event":{"log":{"invoice":{"amount":-0.0}}}}"#,
            r#"{"event":{"log":{"invoice":{"amount":0e5}}}}"#,
        ] {
            assert_eq!(parse(json).nominal_amount(), Err(Rejection::AmountZero), "{json}");
        }
    }

    #[test]
    fn test_non_integer_amounts_are_kept_exactly() {
        let event = parse(r#"{"event":{"log":{"invoice":{"amount":1.0}}}}"#);
        assert_eq!(event.nominal_amount().unwrap().value(), dec!(1));

        let event = parse(r#"{"event":{"log":{"invoice":{"amount":12.5}}}}"#);
        assert_eq!(event.nominal_amount().unwrap().value(), dec!(12.5));

        let event = parse(r#"{"event":{"log":{"invoice":{"amount":1e-7}}}}"#);
        assert_eq!(event.nominal_amount().unwrap().value(), dec!(0.0000001));
    }

    #[test]
    fn test_out_of_range_amount_fails_to_decode() {
        let result: Result<InboundEvent, _> =
            serde_json::from_str(r#"{"event":{"log":{"invoice":{"amount":1e300}}}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_amount_missing_at_every_level() {
        for json in [
            r#"{"event":{"log":{"invoice":{}}}}"#,
            r#"{"event":{"log":{"invoice":{"amount":null}}}}"#,
            r#"{"event":{"log":{}}}"#,
            r#"{"event":{"log":null}}"#,
            r#"{"event":{}}"#,
            r#"{}"#,
        ] {
            assert_eq!(
                parse(json).nominal_amount(),
                Err(Rejection::AmountMissing),
                "{json}"
            );
        }
    }

    #[test]
    fn test_alternate_field_name_is_not_read() {
        let event = parse(r#"{"event":{"log":{"invoice":{"nominalAmount":5}}}}"#);
        assert_eq!(event.nominal_amount(), Err(Rejection::AmountMissing));
    }

    #[test]
    fn test_from_parsed_json() {
        let value = serde_json::json!({"event": {"log": {"invoice": {"amount": 7}}}, "extra": true});
        let event = InboundEvent::from_json(&value).unwrap();
        assert_eq!(event.invoice_amount(), Some(dec!(7)));
    }

    #[test]
    fn test_non_object_body_fails_to_decode() {
        assert!(InboundEvent::from_json(&serde_json::json!([1, 2])).is_err());
    }

    #[test]
    fn test_non_numeric_amount_fails_to_decode() {
        let result: Result<InboundEvent, _> =
            serde_json::from_str(r#"{"event":{"log":{"invoice":{"amount":"ten"}}}}"#);
        assert!(result.is_err());
    }
}
