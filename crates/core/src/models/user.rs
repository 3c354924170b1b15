//! User record.

use serde::{Deserialize, Serialize};

use crate::types::lenient;

/// A registered storefront user.
///
/// `id` is a display label of the form `USR<n>`; `joined` is a local date
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub joined: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_become_empty() {
        let user: User =
            serde_json::from_str(r#"{"id":"USR1","name":null,"email":"u@x.test","joined":7}"#)
                .unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.joined, "7");
        assert_eq!(user.email, "u@x.test");
    }
}
