//! Custom field values
//!
//! YouTrack sends the `value` of a custom field in a shape that depends on the
//! field's declared type: an object for text and enum fields, an array of
//! objects for multi-value fields, a bare number for numeric fields, and
//! `null` when unset. [`DecodedValue`] folds all four into one type by looking
//! at the JSON shape alone, so the decoder never needs to know which field it
//! is decoding.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DecodedValue {
    /// A single object. `text` carries free-text payloads, `name` enum labels.
    Scalar { text: String, name: String },
    /// An array of objects, each decoded as a `Scalar`.
    List(Vec<DecodedValue>),
    /// A bare number.
    Numeric(f64),
    /// `null` or a missing value.
    #[default]
    Empty,
}

impl DecodedValue {
    /// Decode a value from raw JSON text.
    pub fn parse(raw: &str) -> Result<Self> {
        let json: Value =
            serde_json::from_str(raw).map_err(|e| Error::Decode(format!("malformed value: {}", e)))?;
        Self::from_json(&json)
    }

    /// Decode an already parsed JSON value by dispatching on its shape.
    pub fn from_json(json: &Value) -> Result<Self> {
        match json {
            Value::Null => Ok(Self::Empty),
            Value::Object(map) => Ok(Self::from_object(map)),
            Value::Array(elements) => elements
                .iter()
                .enumerate()
                .map(|(index, element)| match element {
                    Value::Object(map) => Ok(Self::from_object(map)),
                    other => Err(Error::Shape(format!(
                        "array element {} is {}, expected an object",
                        index,
                        describe(other)
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            Value::Number(number) => number.as_f64().map(Self::Numeric).ok_or_else(|| {
                Error::Decode(format!("number {} does not fit in a float", number))
            }),
            other => Err(Error::Decode(format!(
                "expected an object, array, number or null, found {}",
                describe(other)
            ))),
        }
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        let text = map.get("text").and_then(Value::as_str);
        let name = map.get("name").and_then(Value::as_str);

        // Some numeric fields arrive wrapped as {"number": n}.
        if text.is_none() && name.is_none() {
            if let Some(number) = map.get("number").and_then(Value::as_f64) {
                return Self::Numeric(number);
            }
        }

        Self::Scalar {
            text: text.unwrap_or_default().to_string(),
            name: name.unwrap_or_default().to_string(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Scalar { text, .. } => text,
            _ => "",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Scalar { name, .. } => name,
            _ => "",
        }
    }

    /// The numeric payload, `0.0` for every other shape.
    pub fn number(&self) -> f64 {
        match self {
            Self::Numeric(number) => *number,
            _ => 0.0,
        }
    }

    pub fn items(&self) -> &[DecodedValue] {
        match self {
            Self::List(items) => items,
            _ => &[],
        }
    }
}

impl<'de> Deserialize<'de> for DecodedValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = Value::deserialize(deserializer)?;
        Self::from_json(&json).map_err(serde::de::Error::custom)
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(text: &str, name: &str) -> DecodedValue {
        DecodedValue::Scalar {
            text: text.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_object_with_text() {
        let value = DecodedValue::parse(r#"{"text": "As a user I want"}"#).unwrap();
        assert_eq!(value, scalar("As a user I want", ""));
    }

    #[test]
    fn test_object_with_name() {
        let value = DecodedValue::parse(r#"{"name": "Critical", "$type": "EnumBundleElement"}"#)
            .unwrap();
        assert_eq!(value, scalar("", "Critical"));
        assert_eq!(value.name(), "Critical");
        assert_eq!(value.text(), "");
    }

    #[test]
    fn test_object_ignores_other_keys() {
        let value = DecodedValue::parse(
            r#"{"id": "67-1", "markdownText": "x", "nested": {"name": "inner"}, "text": "outer"}"#,
        )
        .unwrap();
        assert_eq!(value, scalar("outer", ""));
    }

    #[test]
    fn test_object_without_known_keys_is_empty_scalar() {
        assert_eq!(DecodedValue::parse("{}").unwrap(), scalar("", ""));
        assert_eq!(
            DecodedValue::parse(r#"{"text": 12, "name": null}"#).unwrap(),
            scalar("", "")
        );
    }

    #[test]
    fn test_escaped_strings_are_unescaped() {
        let value = DecodedValue::parse(r#"{"text": "say \"hi\"\nbye"}"#).unwrap();
        assert_eq!(value.text(), "say \"hi\"\nbye");
    }

    #[test]
    fn test_wrapped_number() {
        let value = DecodedValue::parse(r#"{"number": 5}"#).unwrap();
        assert_eq!(value, DecodedValue::Numeric(5.0));

        // A label wins over a stray number property.
        let value = DecodedValue::parse(r#"{"name": "Five", "number": 5}"#).unwrap();
        assert_eq!(value, scalar("", "Five"));
    }

    #[test]
    fn test_array_preserves_order() {
        let value = DecodedValue::parse(
            r#"[{"name": "Sprint 1"}, {"name": "Sprint 2"}, {"name": "Sprint 3", "text": "t"}]"#,
        )
        .unwrap();

        assert_eq!(value.items().len(), 3);
        assert_eq!(
            value,
            DecodedValue::List(vec![
                scalar("", "Sprint 1"),
                scalar("", "Sprint 2"),
                scalar("t", "Sprint 3"),
            ])
        );
    }

    #[test]
    fn test_array_with_braces_inside_strings() {
        let value = DecodedValue::parse(r#"[{"name": "a}b"}, {"name": "{c}"}]"#).unwrap();
        let names: Vec<&str> = value.items().iter().map(DecodedValue::name).collect();
        assert_eq!(names, vec!["a}b", "{c}"]);
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(
            DecodedValue::parse("[]").unwrap(),
            DecodedValue::List(Vec::new())
        );
    }

    #[test]
    fn test_array_of_non_objects_is_shape_error() {
        let err = DecodedValue::parse(r#"[{"name": "ok"}, "loose"]"#).unwrap_err();
        assert!(matches!(err, Error::Shape(_)));
        assert!(err.to_string().contains("array element 1"));

        assert!(matches!(
            DecodedValue::parse("[1, 2]"),
            Err(Error::Shape(_))
        ));
    }

    #[test]
    fn test_bare_numbers() {
        assert_eq!(DecodedValue::parse("8").unwrap(), DecodedValue::Numeric(8.0));
        assert_eq!(DecodedValue::parse("2.5").unwrap(), DecodedValue::Numeric(2.5));
        assert_eq!(DecodedValue::parse("-1e2").unwrap(), DecodedValue::Numeric(-100.0));
        assert_eq!(DecodedValue::parse("0").unwrap().number(), 0.0);
    }

    #[test]
    fn test_null_is_empty_every_time() {
        for _ in 0..3 {
            let value = DecodedValue::parse("null").unwrap();
            assert_eq!(value, DecodedValue::Empty);
            assert_eq!(value.text(), "");
            assert_eq!(value.name(), "");
            assert_eq!(value.number(), 0.0);
            assert!(value.items().is_empty());
        }
    }

    #[test]
    fn test_other_tokens_are_decode_errors() {
        assert!(matches!(DecodedValue::parse(r#""5""#), Err(Error::Decode(_))));
        assert!(matches!(DecodedValue::parse("true"), Err(Error::Decode(_))));
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        assert!(matches!(
            DecodedValue::parse(r#"{"text": "trunc"#),
            Err(Error::Decode(_))
        ));
        assert!(matches!(DecodedValue::parse("[{"), Err(Error::Decode(_))));
        assert!(matches!(DecodedValue::parse("nul"), Err(Error::Decode(_))));
        assert!(matches!(DecodedValue::parse(""), Err(Error::Decode(_))));
    }

    #[test]
    fn test_deserialize_through_serde() {
        let values: Vec<DecodedValue> =
            serde_json::from_str(r#"[null, 3, {"name": "High"}, [{"name": "S1"}]]"#).unwrap();
        assert_eq!(
            values,
            vec![
                DecodedValue::Empty,
                DecodedValue::Numeric(3.0),
                scalar("", "High"),
                DecodedValue::List(vec![scalar("", "S1")]),
            ]
        );
    }

    #[test]
    fn test_deserialize_error_surfaces_reason() {
        let err = serde_json::from_str::<DecodedValue>(r#"["x"]"#).unwrap_err();
        assert!(err.to_string().contains("expected an object"));
    }

    #[test]
    fn test_accessors_on_non_matching_shapes() {
        let list = DecodedValue::List(vec![scalar("", "a")]);
        assert_eq!(list.text(), "");
        assert_eq!(list.number(), 0.0);
        assert_eq!(DecodedValue::Numeric(4.0).items().len(), 0);
        assert_eq!(DecodedValue::Numeric(4.0).name(), "");
    }
}
