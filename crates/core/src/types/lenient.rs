//! Serde helpers for loosely typed text fields.
//!
//! Hand-edited JSON and older stored data mix `"price": "5"` with
//! `"price": 5`, and leave fields `null`. These helpers accept a string or
//! a number, and swallow values of any other shape instead of failing the
//! whole collection. Every text field of a stored record goes through them.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Other(serde::de::IgnoredAny),
}

impl Loose {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Other(_) => None,
        }
    }
}

/// Deserialize a string or number into a `String`.
///
/// `null` and values of other shapes become the empty string.
///
/// # Errors
///
/// Only fails if the underlying deserializer fails.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?
        .and_then(Loose::into_text)
        .unwrap_or_default())
}

/// Deserialize a string or number into an `Option<String>`.
///
/// `null` and values of other shapes become `None`.
///
/// # Errors
///
/// Only fails if the underlying deserializer fails.
pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Loose>::deserialize(deserializer)?.and_then(Loose::into_text))
}
