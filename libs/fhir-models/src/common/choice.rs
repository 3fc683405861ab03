//! Decoding of flattened `x[x]` choice fields
//!
//! A choice field is an externally tagged enum flattened into its parent, so
//! `valueQuantity` lands in `Observation.value`. Decoding takes exactly the
//! parent's keys that name a variant and fails on a malformed value instead
//! of dropping it.

use serde::de::{DeserializeOwned, Error as _, MapAccess, Visitor};
use serde::Deserializer;
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// An enum standing for one `x[x]` field (or its `_x[x]` shadow)
pub trait ChoiceType: DeserializeOwned {
    const NAME: &'static str;

    /// Wire key of every variant, e.g. `valueQuantity`
    const KEYS: &'static [&'static str];
}

/// `deserialize_with` target for `#[serde(flatten)] Option<impl ChoiceType>`
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: ChoiceType,
{
    deserializer.deserialize_struct(T::NAME, T::KEYS, ChoiceVisitor(PhantomData))
}

struct ChoiceVisitor<T>(PhantomData<T>);

impl<'de, T: ChoiceType> Visitor<'de> for ChoiceVisitor<T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at most one of {}", T::KEYS.join(", "))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Option<T>, A::Error> {
        let mut entry: Option<(String, Value)> = None;

        while let Some(key) = map.next_key::<String>()? {
            let value: Value = map.next_value()?;
            if !T::KEYS.contains(&key.as_str()) {
                continue;
            }
            if let Some((first, _)) = &entry {
                return Err(A::Error::custom(format!(
                    "{} has more than one value: {first} and {key}",
                    T::NAME
                )));
            }
            entry = Some((key, value));
        }

        let Some((key, value)) = entry else {
            return Ok(None);
        };

        let mut tagged = Map::new();
        tagged.insert(key.clone(), value);
        serde_json::from_value(Value::Object(tagged))
            .map(Some)
            .map_err(|e| A::Error::custom(format!("invalid {key}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    enum Sample {
        #[serde(rename = "valueString")]
        String(String),
        #[serde(rename = "valueInteger")]
        Integer(i32),
    }

    impl_choice!(Sample {
        "valueString",
        "valueInteger"
    });

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(
            flatten,
            deserialize_with = "deserialize",
            skip_serializing_if = "Option::is_none"
        )]
        value: Option<Sample>,
        #[serde(flatten)]
        rest: Map<String, Value>,
    }

    #[test]
    fn test_absent_choice_is_none() {
        let holder: Holder = serde_json::from_value(json!({ "id": "a", "other": 1 })).unwrap();
        assert_eq!(holder.value, None);
        assert_eq!(holder.rest.get("other"), Some(&json!(1)));
    }

    #[test]
    fn test_choice_taken_out_of_rest() {
        let holder: Holder = serde_json::from_str(r#"{"valueInteger":3,"other":true}"#).unwrap();
        assert_eq!(holder.value, Some(Sample::Integer(3)));
        assert!(!holder.rest.contains_key("valueInteger"));
        assert_eq!(
            serde_json::to_value(&holder).unwrap(),
            json!({ "valueInteger": 3, "other": true })
        );
    }

    #[test]
    fn test_malformed_choice_fails() {
        let err = serde_json::from_value::<Holder>(json!({ "valueInteger": "three" })).unwrap_err();
        assert!(err.to_string().contains("invalid valueInteger"));
    }

    #[test]
    fn test_two_variants_fail() {
        let err = serde_json::from_value::<Holder>(json!({ "valueInteger": 3, "valueString": "x" }))
            .unwrap_err();
        assert!(err.to_string().contains("more than one value"));
    }
}
