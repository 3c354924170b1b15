//! Views derived from the collections: dashboard counts, category filter
//! options, and the search/filter visibility toggles.
//!
//! Search and filter work on the rows already rendered to a surface, not on
//! the collections. A surface must be re-rendered after a mutation before
//! its filtered view reflects the new data.

use std::collections::HashSet;

use storedash_core::{Order, Product, User};

use crate::components::data_table::FilterOption;
use crate::store::Collection;
use crate::views::{DashboardMetrics, Screen, SelectId, Surface};

/// Recompute the dashboard cards.
///
/// Revenue sums every order total; absent, `null`, or non-numeric totals
/// count as zero.
#[must_use]
pub fn refresh_counts(
    products: &Collection<Product>,
    orders: &Collection<Order>,
    users: &Collection<User>,
) -> DashboardMetrics {
    DashboardMetrics {
        products: products.len(),
        orders: orders.len(),
        users: users.len(),
        revenue: orders.values().map(Order::total_amount).sum(),
    }
}

/// Category filter options: the `all` sentinel, then each distinct
/// category in order of first appearance.
#[must_use]
pub fn category_options<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<FilterOption> {
    let mut seen = HashSet::new();
    let mut options = vec![FilterOption::all()];
    for product in products {
        if seen.insert(product.category.as_str()) {
            options.push(FilterOption::new(&product.category, &product.category));
        }
    }
    options
}

/// Replace the options of `select` with the categories in `products`.
pub fn refresh_filter_options(products: &Collection<Product>, select: SelectId, screen: &mut Screen) {
    let options = category_options(products.values());
    tracing::debug!(select = select.as_str(), options = options.len(), "Refreshed filter options");
    screen.set_options(select, options);
}

/// Show only rows whose category matches `value`, ignoring case.
///
/// `all` shows every row. Placeholder rows are never hidden. Returns the
/// number of visible data rows, or `None` if nothing has been rendered to
/// `surface`.
pub fn apply_category_filter(screen: &mut Screen, surface: Surface, value: &str) -> Option<usize> {
    let wanted = value.to_lowercase();
    let show_all = wanted == FilterOption::ALL;
    apply_visibility(screen, surface, "category", |cell| {
        show_all || cell.to_lowercase() == wanted
    })
}

/// Show only rows whose name contains `query`, ignoring case.
///
/// Visibility is recomputed from scratch, so a search replaces any earlier
/// category filter. Placeholder rows are never hidden. Returns the number
/// of visible data rows, or `None` if nothing has been rendered to
/// `surface`.
pub fn apply_search(screen: &mut Screen, surface: Surface, query: &str) -> Option<usize> {
    let needle = query.to_lowercase();
    apply_visibility(screen, surface, "name", |cell| {
        cell.to_lowercase().contains(&needle)
    })
}

fn apply_visibility(
    screen: &mut Screen,
    surface: Surface,
    column: &str,
    keep: impl Fn(&str) -> bool,
) -> Option<usize> {
    let table = screen.table_mut(surface)?;
    let index = table.config.column_index(column)?;

    let mut shown = 0;
    for row in table.rows.iter_mut().filter(|r| !r.is_placeholder()) {
        row.visible = keep(row.cell(index).unwrap_or_default());
        shown += usize::from(row.visible);
    }
    tracing::debug!(surface = surface.as_str(), column, shown, "Applied row visibility");
    Some(shown)
}
