//! Order record.

use serde::{Deserialize, Serialize};

use crate::types::{Amount, lenient};

/// A synthetic order.
///
/// `id` is a display label of the form `ORD<n>` and is not guaranteed to be
/// unique. `total` is optional so stored rows with a missing or `null`
/// total still load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub customer: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub status: String,
}

impl Order {
    /// The order total as a number, zero when absent or malformed.
    #[must_use]
    pub fn total_amount(&self) -> Amount {
        Amount::coerce(self.total.as_deref())
    }
}
