//! Product record.

use serde::{Deserialize, Serialize};

use crate::types::lenient;

/// A catalog product.
///
/// Persisted as `{ name, price, category, image }`. `price` keeps the text
/// the admin entered; `image` is a data URI or URL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub image: String,
}

impl Product {
    /// Create a product from its four fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        category: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            category: category.into(),
            image: image.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_record_without_image() {
        let product: Product =
            serde_json::from_str(r#"{"name":"Pen","price":5,"category":"Stationery"}"#).unwrap();
        assert_eq!(product, Product::new("Pen", "5", "Stationery", ""));
    }

    #[test]
    fn test_null_and_numeric_text_fields_load() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"name":"Pen","price":"5","category":"Stationery","image":"p"},
                {"name":"Cup","price":"20","category":null,"image":null},
                {"name":42,"price":"1","category":"Misc"}]"#,
        )
        .unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[1], Product::new("Cup", "20", "", ""));
        assert_eq!(products[2].name, "42");
    }

    #[test]
    fn test_serializes_plain_shape() {
        let json = serde_json::to_value(Product::new("Cup", "20", "Kitchen", "x.png")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name":"Cup","price":"20","category":"Kitchen","image":"x.png"})
        );
    }
}
