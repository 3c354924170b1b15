//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREDASH_DATA_DIR` - Directory holding persisted keys (default: `.storedash`)
//! - `STOREDASH_BASELINE` - Baseline product file path or URL (default: `products.json`)
//! - `STOREDASH_CURRENCY_SUFFIX` - Suffix shown after product prices (default: `EGP`)
//! - `STOREDASH_LOG_JSON` - Emit logs as JSON when set to `1`/`true`
//! - `RUST_LOG` - Standard tracing filter

use std::path::PathBuf;

use thiserror::Error;

use crate::loader::BaselineSource;
use crate::views::CellFormat;

const DEFAULT_DATA_DIR: &str = ".storedash";
const DEFAULT_BASELINE: &str = "products.json";
const DEFAULT_CURRENCY_SUFFIX: &str = "EGP";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Directory of the file storage backend
    pub data_dir: PathBuf,
    /// Baseline product source (path or URL)
    pub baseline: String,
    /// Suffix appended to product prices
    pub currency_suffix: String,
    /// Whether to log as JSON
    pub log_json: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            baseline: DEFAULT_BASELINE.to_string(),
            currency_suffix: DEFAULT_CURRENCY_SUFFIX.to_string(),
            log_json: false,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let data_dir = non_empty("STOREDASH_DATA_DIR", get("STOREDASH_DATA_DIR", DEFAULT_DATA_DIR))?;
        let baseline = non_empty("STOREDASH_BASELINE", get("STOREDASH_BASELINE", DEFAULT_BASELINE))?;
        let currency_suffix = get("STOREDASH_CURRENCY_SUFFIX", DEFAULT_CURRENCY_SUFFIX);
        let log_json = parse_bool("STOREDASH_LOG_JSON", lookup("STOREDASH_LOG_JSON"))?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            baseline,
            currency_suffix,
            log_json,
        })
    }

    /// The baseline location, interpreted.
    #[must_use]
    pub fn baseline_source(&self) -> BaselineSource {
        BaselineSource::parse(&self.baseline)
    }

    /// Cell formatting derived from this configuration.
    #[must_use]
    pub fn cell_format(&self) -> CellFormat {
        CellFormat {
            currency_suffix: self.currency_suffix.clone(),
        }
    }
}

fn non_empty(key: &str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        ));
    }
    Ok(value)
}

fn parse_bool(key: &str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") => {
            Ok(true)
        }
        Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.eq_ignore_ascii_case("no") => {
            Ok(false)
        }
        Some(v) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got {v:?}"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<DashboardConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("STOREDASH_DATA_DIR", "/tmp/dash"),
            ("STOREDASH_BASELINE", "https://shop.test/products.json"),
            ("STOREDASH_CURRENCY_SUFFIX", "USD"),
            ("STOREDASH_LOG_JSON", "true"),
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/dash"));
        assert!(matches!(config.baseline_source(), BaselineSource::Url(_)));
        assert_eq!(config.cell_format().currency_suffix, "USD");
        assert!(config.log_json);
    }

    #[test]
    fn test_empty_baseline_rejected() {
        assert!(matches!(
            config(&[("STOREDASH_BASELINE", "  ")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "STOREDASH_BASELINE"
        ));
    }

    #[test]
    fn test_bad_bool_rejected() {
        assert!(config(&[("STOREDASH_LOG_JSON", "maybe")]).is_err());
    }
}
