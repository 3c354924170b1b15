//! Data table component types.
//!
//! These types describe the shape of each dashboard table: its columns, the
//! copy shown when it has no rows, and whether rows carry edit/delete
//! actions. Renderers read cells by column key rather than by position.

use serde::{Deserialize, Serialize};

/// Column definition for a data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
}

impl TableColumn {
    /// Create a new column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// Option for a select filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Option value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FilterOption {
    /// Value of the sentinel option that disables filtering.
    pub const ALL: &'static str = "all";

    /// Create a new filter option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    /// The "no filter" sentinel.
    #[must_use]
    pub fn all() -> Self {
        Self::new(Self::ALL, "All")
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Message for the single placeholder row shown when empty.
    pub empty_title: String,
    /// Whether rows carry edit/delete actions.
    pub has_actions: bool,
}

impl Default for DataTableConfig {
    fn default() -> Self {
        Self {
            columns: vec![],
            empty_title: "No items found".to_string(),
            has_actions: false,
        }
    }
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set the empty-state message.
    #[must_use]
    pub fn empty_state(mut self, title: &str) -> Self {
        self.empty_title = title.to_string();
        self
    }

    /// Give every row edit/delete actions.
    #[must_use]
    pub const fn with_actions(mut self) -> Self {
        self.has_actions = true;
        self
    }

    /// Position of the column with `key`.
    #[must_use]
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }
}

/// Build the products table configuration.
#[must_use]
pub fn products_table_config() -> DataTableConfig {
    DataTableConfig::new()
        .column(TableColumn::new("image", "Image"))
        .column(TableColumn::new("name", "Name"))
        .column(TableColumn::new("price", "Price"))
        .column(TableColumn::new("category", "Category"))
        .with_actions()
        .empty_state("No products yet.")
}

/// Build the orders table configuration.
#[must_use]
pub fn orders_table_config() -> DataTableConfig {
    DataTableConfig::new()
        .column(TableColumn::new("id", "Order ID"))
        .column(TableColumn::new("customer", "Customer"))
        .column(TableColumn::new("total", "Total"))
        .column(TableColumn::new("date", "Date"))
        .column(TableColumn::new("status", "Status"))
        .empty_state("No orders yet.")
}

/// Build the users table configuration.
#[must_use]
pub fn users_table_config() -> DataTableConfig {
    DataTableConfig::new()
        .column(TableColumn::new("id", "User ID"))
        .column(TableColumn::new("name", "Name"))
        .column(TableColumn::new("email", "Email"))
        .column(TableColumn::new("joined", "Joined"))
        .empty_state("No users registered.")
}
