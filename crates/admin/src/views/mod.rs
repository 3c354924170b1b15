//! View-models for the dashboard's surfaces.
//!
//! Nothing here draws anything. Rendering a collection produces a
//! [`TableView`]: an ordered list of rows of display strings that a front
//! end turns into whatever widgets it uses. A [`Screen`] holds the latest
//! view-model for every surface, so re-rendering replaces a surface
//! wholesale and never leaves stale or duplicate rows behind.

pub mod dashboard;
pub mod settings;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use storedash_core::{Order, Product, RecordId, User};

use crate::components::data_table::{
    DataTableConfig, FilterOption, orders_table_config, products_table_config,
    users_table_config,
};
use crate::store::Collection;

pub use dashboard::DashboardMetrics;
pub use settings::SettingsView;

/// A table surface rows are rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Products,
    Orders,
    Users,
}

impl Surface {
    /// Surface identifier as used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Products => "productTable2",
            Self::Orders => "ordersBody",
            Self::Users => "usersBody",
        }
    }
}

/// A select control whose options are derived from data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectId {
    CategoryFilter,
}

impl SelectId {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CategoryFilter => "categoryFilter2",
        }
    }
}

/// What a rendered row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A record, addressable for row actions.
    Data(RecordId),
    /// The single empty-state row.
    Placeholder,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub kind: RowKind,
    pub cells: Vec<String>,
    /// Toggled by search and filter; rendering always starts visible.
    pub visible: bool,
}

impl TableRow {
    /// The cell at column `index`, if the row has one.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self.kind, RowKind::Placeholder)
    }
}

/// A rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub config: DataTableConfig,
    pub rows: Vec<TableRow>,
}

impl TableView {
    /// Rows not hidden by search or filter.
    pub fn visible_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|r| r.visible)
    }
}

/// Display settings shared by all cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFormat {
    /// Appended to product prices, e.g. `5 EGP`.
    pub currency_suffix: String,
}

impl Default for CellFormat {
    fn default() -> Self {
        Self {
            currency_suffix: "EGP".to_string(),
        }
    }
}

/// A record type that renders as a table row.
pub trait Tabular: Serialize + DeserializeOwned {
    /// Column layout and empty-state copy.
    fn table_config() -> DataTableConfig;

    /// Cell text, one per column in [`Tabular::table_config`] order.
    fn cells(&self, format: &CellFormat) -> Vec<String>;
}

impl Tabular for Product {
    fn table_config() -> DataTableConfig {
        products_table_config()
    }

    fn cells(&self, format: &CellFormat) -> Vec<String> {
        vec![
            self.image.clone(),
            self.name.clone(),
            format!("{} {}", self.price, format.currency_suffix),
            self.category.clone(),
        ]
    }
}

impl Tabular for Order {
    fn table_config() -> DataTableConfig {
        orders_table_config()
    }

    fn cells(&self, _format: &CellFormat) -> Vec<String> {
        vec![
            self.id.clone(),
            self.customer.clone(),
            format!("${}", self.total.as_deref().unwrap_or_default()),
            self.date.clone(),
            self.status.clone(),
        ]
    }
}

impl Tabular for User {
    fn table_config() -> DataTableConfig {
        users_table_config()
    }

    fn cells(&self, _format: &CellFormat) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.joined.clone(),
        ]
    }
}

/// Build the view-model for a collection.
///
/// An empty collection yields exactly one placeholder row carrying the
/// table's empty-state message.
#[must_use]
pub fn build_table<T: Tabular>(collection: &Collection<T>, format: &CellFormat) -> TableView {
    let config = T::table_config();

    let rows = if collection.is_empty() {
        vec![TableRow {
            kind: RowKind::Placeholder,
            cells: vec![config.empty_title.clone()],
            visible: true,
        }]
    } else {
        collection
            .records()
            .iter()
            .map(|record| TableRow {
                kind: RowKind::Data(record.id),
                cells: record.value.cells(format),
                visible: true,
            })
            .collect()
    };

    TableView { config, rows }
}

/// The latest view-model of every surface.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    tables: HashMap<Surface, TableView>,
    selects: HashMap<SelectId, Vec<FilterOption>>,
    metrics: DashboardMetrics,
    settings: Option<SettingsView>,
}

impl Screen {
    /// Render `collection` into `surface`, replacing whatever was there.
    pub fn render<T: Tabular>(&mut self, collection: &Collection<T>, surface: Surface, format: &CellFormat) {
        let view = build_table(collection, format);
        tracing::debug!(surface = surface.as_str(), rows = view.rows.len(), "Rendered table");
        self.tables.insert(surface, view);
    }

    /// The table currently shown on `surface`.
    #[must_use]
    pub fn table(&self, surface: Surface) -> Option<&TableView> {
        self.tables.get(&surface)
    }

    pub(crate) fn table_mut(&mut self, surface: Surface) -> Option<&mut TableView> {
        self.tables.get_mut(&surface)
    }

    /// Options currently in a select control.
    #[must_use]
    pub fn options(&self, select: SelectId) -> &[FilterOption] {
        self.selects
            .get(&select)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replace every option in a select control.
    pub fn set_options(&mut self, select: SelectId, options: Vec<FilterOption>) {
        self.selects.insert(select, options);
    }

    /// The dashboard cards.
    #[must_use]
    pub const fn metrics(&self) -> &DashboardMetrics {
        &self.metrics
    }

    pub fn set_metrics(&mut self, metrics: DashboardMetrics) {
        self.metrics = metrics;
    }

    /// The settings form, once loaded.
    #[must_use]
    pub const fn settings(&self) -> Option<&SettingsView> {
        self.settings.as_ref()
    }

    pub fn set_settings(&mut self, settings: SettingsView) {
        self.settings = Some(settings);
    }
}
