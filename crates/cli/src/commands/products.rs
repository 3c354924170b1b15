//! Product catalog commands.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use storedash_admin::app::DELETE_PROMPT;
use storedash_admin::editor::ProductForm;
use storedash_admin::export::EXPORT_FILE_NAME;
use storedash_admin::loader::preview_image;
use storedash_admin::{AdminDashboard, Section};

use super::{CliError, print_section, row_index};

/// Values given on the command line. `None` leaves a field as it is.
#[derive(Debug, Default)]
pub struct FieldUpdate {
    pub name: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    /// A file path, URL, or data URI; loaded into a preview before use.
    pub image: Option<String>,
}

impl FieldUpdate {
    fn apply(self, form: &mut ProductForm, image: Option<String>) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(image) = image {
            form.image = image;
        }
    }

    async fn load_image(&self) -> Option<String> {
        match self.image.as_deref() {
            Some(input) => preview_image(input).await,
            None => None,
        }
    }
}

/// Add a product from the given fields.
pub async fn add(dashboard: &mut AdminDashboard, fields: FieldUpdate) -> Result<(), CliError> {
    let image = fields.load_image().await;
    fields.apply(dashboard.open_new_product(), image);
    save(dashboard)
}

/// Edit the product at `row`, keeping omitted fields.
pub async fn edit(dashboard: &mut AdminDashboard, row: usize, fields: FieldUpdate) -> Result<(), CliError> {
    let id = dashboard.product_id_at(row_index(row)?)?;
    let image = fields.load_image().await;
    fields.apply(dashboard.open_edit_product(id)?, image);
    save(dashboard)
}

fn save(dashboard: &mut AdminDashboard) -> Result<(), CliError> {
    let result = dashboard.save_product();
    if result.is_err() {
        dashboard.close_product_modal();
    }
    result?;
    dashboard.show_section(Section::Products);
    print_section(dashboard, false)
}

/// Delete the product at `row`, asking first unless `yes` is set.
pub fn delete(dashboard: &mut AdminDashboard, row: usize, yes: bool) -> Result<(), CliError> {
    let id = dashboard.product_id_at(row_index(row)?)?;
    let confirmed = yes || confirm(DELETE_PROMPT)?;

    if dashboard.delete_product(id, confirmed)?.is_none() {
        tracing::info!("Delete cancelled");
        return Ok(());
    }
    dashboard.show_section(Section::Products);
    print_section(dashboard, false)
}

/// Print the products whose name contains `query`.
pub fn search(dashboard: &mut AdminDashboard, query: &str) -> Result<(), CliError> {
    dashboard.show_section(Section::Products);
    let shown = dashboard.search_products(query).unwrap_or_default();
    tracing::info!(query, shown, "Search applied");
    print_section(dashboard, false)
}

/// Print the products in `category`.
pub fn filter(dashboard: &mut AdminDashboard, category: &str) -> Result<(), CliError> {
    dashboard.show_section(Section::Products);
    let shown = dashboard.filter_products(category).unwrap_or_default();
    tracing::info!(category, shown, "Filter applied");
    print_section(dashboard, false)
}

/// Write the catalog to `out` (default `products.csv`).
pub async fn export(dashboard: &AdminDashboard, out: Option<PathBuf>) -> Result<(), CliError> {
    let path = out.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
    tokio::fs::write(&path, dashboard.export_csv()).await?;
    tracing::info!(path = %path.display(), "Products exported");
    Ok(())
}

/// Ask a yes/no question on stderr and read the answer from stdin.
fn confirm(question: &str) -> io::Result<bool> {
    let mut stderr = io::stderr().lock();
    write!(stderr, "{question} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
