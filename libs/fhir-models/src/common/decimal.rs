//! FHIR `decimal` on the wire
//!
//! FHIR decimals keep their written precision: `1.50` and `107.0` must come
//! back exactly as read. Values are held as [`Decimal`] and exchanged through
//! `serde_json::Number` (built with `arbitrary_precision`), so the digits are
//! never routed through `f64`.
//!
//! Use with `#[serde(with = "crate::common::decimal")]`, or the [`option`]
//! module for optional fields.

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::str::FromStr;

/// Parse a JSON number's text, keeping its scale
pub fn parse(text: &str) -> Result<Decimal, rust_decimal::Error> {
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text)
    } else {
        Decimal::from_str_exact(text)
    }
}

pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let number = Number::from_str(&value.to_string()).map_err(S::Error::custom)?;
    number.serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    from_value(Value::deserialize(deserializer)?).map_err(D::Error::custom)
}

fn from_value(value: Value) -> Result<Decimal, String> {
    match value {
        Value::Number(number) => {
            let text = number.to_string();
            parse(&text).map_err(|e| format!("invalid decimal {text}: {e}"))
        }
        other => Err(format!("expected a decimal number, found {other}")),
    }
}

/// `Option<Decimal>` fields; pair with `default` and `skip_serializing_if`
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            Some(value) => from_value(value).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "super")]
        exact: Decimal,
        #[serde(default, with = "option", skip_serializing_if = "Option::is_none")]
        optional: Option<Decimal>,
    }

    #[test]
    fn test_written_precision_survives_text() {
        for text in [
            r#"{"exact":107}"#,
            r#"{"exact":107.0}"#,
            r#"{"exact":1.50,"optional":-0.001}"#,
        ] {
            let sample: Sample = serde_json::from_str(text).unwrap();
            assert_eq!(serde_json::to_string(&sample).unwrap(), text);
        }
    }

    #[test]
    fn test_written_precision_survives_value() {
        let source: Value = serde_json::from_str(r#"{"exact":107.0,"optional":1.50}"#).unwrap();
        let sample: Sample = serde_json::from_value(source.clone()).unwrap();

        assert_eq!(sample.exact.scale(), 1);
        assert_eq!(sample.optional, Some(Decimal::new(150, 2)));
        assert_eq!(serde_json::to_value(&sample).unwrap(), source);
    }

    #[test]
    fn test_scientific_notation() {
        let sample: Sample = serde_json::from_str(r#"{"exact":1.5e2}"#).unwrap();
        assert_eq!(sample.exact, Decimal::new(150, 0));
    }

    #[test]
    fn test_rejects_strings() {
        let err = serde_json::from_value::<Sample>(json!({ "exact": "1.5" })).unwrap_err();
        assert!(err.to_string().contains("expected a decimal number"));
    }
}
