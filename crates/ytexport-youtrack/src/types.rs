//! YouTrack API types

use crate::value::DecodedValue;
use serde::{Deserialize, Deserializer};

/// A custom field attached to an issue. Names are not unique per issue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedField {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub value: DecodedValue,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    #[serde(rename = "idReadable", default, deserialize_with = "null_as_default")]
    pub id_readable: String,
    /// Epoch milliseconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub created: i64,
    /// Epoch milliseconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "$type", default, deserialize_with = "null_as_default")]
    pub issue_type: String,
    #[serde(rename = "customFields", default, deserialize_with = "null_as_default")]
    pub custom_fields: Vec<NamedField>,
}

impl Issue {
    /// First custom field with exactly this name.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.custom_fields.iter().find(|field| field.name == name)
    }

    /// Text of the named field, falling back to its label, then to "".
    pub fn string_by_name(&self, name: &str) -> String {
        self.field(name)
            .map(|field| {
                let value = &field.value;
                if value.text().is_empty() {
                    value.name().to_string()
                } else {
                    value.text().to_string()
                }
            })
            .unwrap_or_default()
    }

    /// Numeric value of the named field.
    ///
    /// Returns `0.0` both for a missing field and for one explicitly set to
    /// zero; callers cannot tell the two apart.
    pub fn number_by_name(&self, name: &str) -> f64 {
        self.field(name)
            .map(|field| field.value.number())
            .filter(|number| *number != 0.0)
            .unwrap_or(0.0)
    }

    /// Labels of every item in the named multi-value field, in order.
    pub fn list_by_name(&self, name: &str) -> Vec<String> {
        match self.field(name).map(|field| &field.value) {
            Some(DecodedValue::List(items)) if !items.is_empty() => {
                items.iter().map(|item| item.name().to_string()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Treat an explicit `null` the same as a missing property.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
