//! Classification of raw form values.
//!
//! Form submissions hand over each catalog field as either an existing id
//! (a JSON number) or free text typed by the user. Everything is decided
//! here, once, so the resolver never inspects JSON types itself.

use serde_json::Value;

/// A raw catalog field value after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// No selection: missing, blank, zero, `"0"`, or an unusable type.
    Empty,
    /// An existing entry id, taken as-is.
    Identifier(i64),
    /// A trimmed, non-empty name to look up or create.
    FreeText(String),
}

impl RawValue {
    /// Classify a JSON form value.
    ///
    /// Only positive integers are identifiers. Strings are always names,
    /// including digit-only strings, except for `"0"`. Floats, negatives,
    /// booleans, null, arrays and objects are treated as no selection.
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(id) if id > 0 => Self::Identifier(id),
                _ => Self::Empty,
            },
            Value::String(s) => Self::from_text(s),
            _ => Self::Empty,
        }
    }

    /// Classify a free-text value.
    pub fn from_text(text: &str) -> Self {
        let name = text.trim();
        if name.is_empty() || name == "0" {
            Self::Empty
        } else {
            Self::FreeText(name.to_string())
        }
    }

    /// Classify an optional value; a missing field is no selection.
    pub fn classify_opt(value: Option<&Value>) -> Self {
        value.map_or(Self::Empty, Self::classify)
    }
}

impl From<i64> for RawValue {
    fn from(id: i64) -> Self {
        if id > 0 {
            Self::Identifier(id)
        } else {
            Self::Empty
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}
