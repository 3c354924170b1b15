//! CSV export of the product catalog.
//!
//! Fields are written as-is: a comma or quote inside a name or category is
//! not escaped and will shift the columns of that line.

use storedash_core::Product;

/// Default download name.
pub const EXPORT_FILE_NAME: &str = "products.csv";

/// Header line of the export.
pub const CSV_HEADER: &str = "Name,Price,Category";

/// Build the CSV text for `products`.
#[must_use]
pub fn products_csv<'a>(products: impl IntoIterator<Item = &'a Product>) -> String {
    let mut csv = format!("{CSV_HEADER}\n");
    for product in products {
        csv.push_str(&product.name);
        csv.push(',');
        csv.push_str(&product.price);
        csv.push(',');
        csv.push_str(&product.category);
        csv.push('\n');
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_is_header_only() {
        assert_eq!(products_csv(&[]), "Name,Price,Category\n");
    }

    #[test]
    fn test_one_line_per_product() {
        let products = [
            Product::new("Pen", "5", "Stationery", "a.png"),
            Product::new("Cup", "20", "Kitchen", "b.png"),
        ];
        assert_eq!(
            products_csv(&products),
            "Name,Price,Category\nPen,5,Stationery\nCup,20,Kitchen\n"
        );
    }

    #[test]
    fn test_no_escaping() {
        let products = [Product::new("Pen, blue", "5", "Stationery", "")];
        assert_eq!(
            products_csv(&products),
            "Name,Price,Category\nPen, blue,5,Stationery\n"
        );
    }
}
