//! Theme option values and typed accessors with fallbacks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// A single option value as stored by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// String value.
    Str(String),
    /// Nested values, e.g. `{"top": "10px", "bottom": "0px"}`.
    Map(BTreeMap<String, OptionValue>),
}

impl OptionValue {
    /// Host truthiness: `false`, `0`, `""` and `"0"` are falsy, maps are truthy
    /// when non-empty.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Str(s) => !s.is_empty() && s != "0",
            Self::Map(m) => !m.is_empty(),
        }
    }

    /// Renders scalars as strings. Maps have no string form.
    #[must_use]
    pub fn as_string(&self) -> Option<String> {
        match self {
            Self::Bool(true) => Some("1".to_string()),
            Self::Bool(false) => Some(String::new()),
            Self::Int(i) => Some(i.to_string()),
            Self::Str(s) => Some(s.clone()),
            Self::Map(_) => None,
        }
    }

    /// Reads an integer, parsing numeric strings (`"800"`, `"64px"`).
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Str(s) => parse_leading_int(s),
            Self::Map(_) => None,
        }
    }

    /// Converts to a JSON value for localization payloads.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Bool(b) => serde_json::json!(b),
            Self::Int(i) => serde_json::json!(i),
            Self::Str(s) => serde_json::json!(s),
            Self::Map(m) => serde_json::Value::Object(
                m.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    let end = trimmed
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && *c == '-')))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().ok()
}

/// Read-only view over the theme's configured options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionStore {
    values: BTreeMap<String, OptionValue>,
}

impl OptionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Returns the raw value, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// Returns a nested value such as `title_margin.top`.
    #[must_use]
    pub fn get_sub(&self, key: &str, sub: &str) -> Option<&OptionValue> {
        match self.values.get(key) {
            Some(OptionValue::Map(m)) => m.get(sub),
            _ => None,
        }
    }

    /// Whether the option is set and truthy. Absent options are falsy.
    #[must_use]
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(OptionValue::is_truthy)
    }

    /// Whether the option's string form equals `expected`.
    #[must_use]
    pub fn equals(&self, key: &str, expected: &str) -> bool {
        self.get(key)
            .and_then(OptionValue::as_string)
            .is_some_and(|s| s == expected)
    }

    /// String value or `default` when absent or not a scalar.
    #[must_use]
    pub fn str_or(&self, key: &str, default: &str) -> String {
        if let Some(s) = self.get(key).and_then(OptionValue::as_string) {
            return s;
        }
        debug!(option = key, default, "Option missing, using default");
        default.to_string()
    }

    /// Nested string value or `default`.
    #[must_use]
    pub fn sub_str_or(&self, key: &str, sub: &str, default: &str) -> String {
        if let Some(s) = self.get_sub(key, sub).and_then(OptionValue::as_string) {
            return s;
        }
        debug!(option = key, sub, default, "Nested option missing, using default");
        default.to_string()
    }

    /// Integer value or `default` when absent or malformed.
    #[must_use]
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        if let Some(i) = self.get(key).and_then(OptionValue::as_int) {
            return i;
        }
        debug!(option = key, default, "Option missing or malformed, using default");
        default
    }

    /// Integer value, treating zero like an absent value. Used for settings
    /// such as breakpoints where `0` means "unset".
    #[must_use]
    pub fn nonzero_int_or(&self, key: &str, default: i64) -> i64 {
        match self.int_or(key, default) {
            0 => default,
            value => value,
        }
    }

    /// Raw value as JSON, `""` when absent.
    #[must_use]
    pub fn json(&self, key: &str) -> serde_json::Value {
        self.get(key)
            .map_or_else(|| serde_json::json!(""), OptionValue::to_json)
    }

    /// Number of stored options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for OptionStore {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
