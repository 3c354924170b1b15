//! Unified error handling for the dashboard.

use thiserror::Error;

use crate::loader::LoadError;
use crate::storage::StorageError;
use crate::store::StoreError;

/// A required form field was left empty.
///
/// The display text is the alert shown to the admin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Product save with one or more of name, price, category, image empty.
    #[error("Please fill all fields!")]
    MissingProductFields { missing: Vec<&'static str> },

    /// Settings save with name or email empty.
    #[error("Please fill in name and email!")]
    MissingSettingsFields { missing: Vec<&'static str> },
}

impl ValidationError {
    /// The empty fields, by name.
    #[must_use]
    pub fn missing(&self) -> &[&'static str] {
        match self {
            Self::MissingProductFields { missing } | Self::MissingSettingsFields { missing } => {
                missing
            }
        }
    }
}

/// Application-level error type for the dashboard.
#[derive(Debug, Error)]
pub enum AppError {
    /// A collection operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A form was submitted with required fields missing.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Loading the baseline or an image failed.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
}

impl AppError {
    /// Whether the admin should see this as a blocking alert rather than a
    /// failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Collect the names of empty (whitespace-only) fields.
pub(crate) fn missing_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}
