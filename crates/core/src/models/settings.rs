//! Admin settings record.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use crate::types::lenient;

/// Singleton admin profile settings.
///
/// Stored under one key as `{ name, email, password }`. The password is
/// written in plain text, the same as every other stored field; in memory it
/// is held as a secret and redacted from `Debug` output.
#[derive(Clone, Deserialize)]
#[serde(from = "StoredSettings")]
pub struct Settings {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

#[derive(Default, Deserialize)]
struct StoredSettings {
    #[serde(default, deserialize_with = "lenient::optional_string_or_number")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string_or_number")]
    email: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string_or_number")]
    password: Option<String>,
}

#[derive(Serialize)]
struct StoredSettingsRef<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

impl From<StoredSettings> for Settings {
    fn from(stored: StoredSettings) -> Self {
        Self::new(
            stored.name.unwrap_or_default(),
            stored.email.unwrap_or_default(),
            stored.password.unwrap_or_default(),
        )
    }
}

impl Serialize for Settings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StoredSettingsRef {
            name: &self.name,
            email: &self.email,
            password: self.password.expose_secret(),
        }
        .serialize(serializer)
    }
}

impl Settings {
    /// Create settings from plain field values.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl PartialEq for Settings {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.email == other.email
            && self.password.expose_secret() == other.password.expose_secret()
    }
}

impl Eq for Settings {}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
