//! Identifiers shared by users and majors.
//!
//! The Stitch API sends identifiers either as JSON numbers or as strings, and
//! the client compares them strictly: the number `5` and the string `"5"` are
//! different identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a JSON value counts as set.
///
/// Missing keys, `null`, `false`, the empty string and numeric zero are all
/// treated as unset, matching how the web client tested these fields.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Errors returned when parsing an [`Identifier`] from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The input was blank.
    Empty,
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
        }
    }
}

impl std::error::Error for IdentifierError {}

/// Identifier of a user or a major as sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    /// Integer identifier.
    Number(i64),
    /// Opaque textual identifier.
    Text(String),
}

impl Identifier {
    /// Read an identifier from a JSON value that is set and is an integer or
    /// a string.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use stitch_client::domain::Identifier;
    ///
    /// assert_eq!(Identifier::from_value(&json!(7)), Some(Identifier::Number(7)));
    /// assert_eq!(Identifier::from_value(&json!("")), None);
    /// assert_eq!(Identifier::from_value(&json!({"id": 1})), None);
    /// ```
    pub fn from_value(value: &Value) -> Option<Self> {
        if !is_present(value) {
            return None;
        }
        match value {
            Value::Number(number) => number.as_i64().map(Self::Number),
            Value::String(text) => Some(Self::Text(text.clone())),
            _ => None,
        }
    }

    /// JSON representation sent back to the server.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(number) => Value::from(*number),
            Self::Text(text) => Value::from(text.as_str()),
        }
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    /// Parse user input: integers become [`Identifier::Number`], anything else
    /// is kept verbatim as [`Identifier::Text`].
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }
        Ok(trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_owned()), Self::Number))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}
