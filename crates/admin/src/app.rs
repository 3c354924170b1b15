//! The dashboard application object.
//!
//! [`AdminDashboard`] owns the store, the rendered screen, the section
//! router, and the product editor. Every user action follows the same
//! sequence: mutate a collection (which persists it), re-render the table
//! that shows it, then refresh the derived views (counts, filter options).

use chrono::NaiveDate;
use rand::Rng;

use storedash_core::{Order, Product, RecordId, User};

use crate::derived;
use crate::editor::{ProductEditor, ProductForm, SettingsForm};
use crate::error::AppError;
use crate::export;
use crate::loader::{self, BaselineSource};
use crate::router::{NavItem, Section, SectionRefresh, SectionRouter};
use crate::storage::StorageAdapter;
use crate::store::{DashboardStore, StoreError};
use crate::views::{
    CellFormat, DashboardMetrics, Screen, SelectId, SettingsView, Surface, TableView,
};

/// Alert shown after a successful settings save.
pub const SETTINGS_SAVED: &str = "Settings saved successfully!";

/// Question asked before a product is deleted.
pub const DELETE_PROMPT: &str = "Are you sure to delete this product?";

/// Upper bound (exclusive) of a synthetic order total.
const MAX_SYNTHETIC_TOTAL: f64 = 500.0;

/// The store plus everything drawn from it.
#[derive(Debug)]
struct DashboardView {
    store: DashboardStore,
    screen: Screen,
    format: CellFormat,
}

impl DashboardView {
    fn render_products(&mut self) {
        self.screen
            .render(self.store.products(), Surface::Products, &self.format);
    }

    fn render_orders(&mut self) {
        self.screen
            .render(self.store.orders(), Surface::Orders, &self.format);
    }

    fn render_users(&mut self) {
        self.screen
            .render(self.store.users(), Surface::Users, &self.format);
    }

    fn refresh_counts(&mut self) {
        let metrics = derived::refresh_counts(
            self.store.products(),
            self.store.orders(),
            self.store.users(),
        );
        self.screen.set_metrics(metrics);
    }

    fn populate_filter(&mut self) {
        derived::refresh_filter_options(
            self.store.products(),
            SelectId::CategoryFilter,
            &mut self.screen,
        );
    }

    fn load_settings(&mut self) {
        let settings = self.store.settings();
        self.screen.set_settings(SettingsView::from_settings(&settings));
    }

    fn after_product_change(&mut self) {
        self.render_products();
        self.refresh_counts();
        self.populate_filter();
    }
}

impl SectionRefresh for DashboardView {
    fn refresh(&mut self, section: Section) {
        match section {
            Section::Dashboard => self.refresh_counts(),
            Section::Products => {
                self.render_products();
                self.populate_filter();
            }
            Section::Orders => self.render_orders(),
            Section::Users => self.render_users(),
            Section::Settings => self.load_settings(),
        }
    }
}

/// A running dashboard.
#[derive(Debug)]
pub struct AdminDashboard {
    router: SectionRouter,
    view: DashboardView,
    editor: ProductEditor,
}

impl AdminDashboard {
    /// A dashboard whose collections are all empty.
    ///
    /// This is the state left behind by a failed baseline fetch: nothing is
    /// read from storage. Settings are still loaded.
    #[must_use]
    pub fn new(storage: StorageAdapter, format: CellFormat) -> Self {
        Self::from_store(DashboardStore::empty(storage), format)
    }

    /// A dashboard seeded from `baseline` plus everything persisted.
    #[must_use]
    pub fn with_baseline(storage: StorageAdapter, baseline: Vec<Product>, format: CellFormat) -> Self {
        let mut dashboard = Self::from_store(DashboardStore::initialize(storage, baseline), format);
        dashboard.view.render_products();
        dashboard.view.populate_filter();
        dashboard
    }

    fn from_store(store: DashboardStore, format: CellFormat) -> Self {
        let mut dashboard = Self {
            router: SectionRouter::new(),
            view: DashboardView {
                store,
                screen: Screen::default(),
                format,
            },
            editor: ProductEditor::new(),
        };
        dashboard.show_section(Section::Dashboard);
        dashboard.view.load_settings();
        dashboard
    }

    /// Start the dashboard: fetch the baseline once and seed the store.
    ///
    /// A failed fetch is logged and leaves every collection empty.
    pub async fn start(storage: StorageAdapter, source: &BaselineSource, format: CellFormat) -> Self {
        tracing::info!("Admin dashboard loading");
        let dashboard = match loader::load_baseline(source).await {
            Ok(baseline) => Self::with_baseline(storage, baseline, format),
            Err(e) => {
                tracing::error!(error = %e, source = %source, "Error loading products");
                Self::new(storage, format)
            }
        };
        tracing::info!(products = dashboard.store().products().len(), "Admin dashboard loaded");
        dashboard
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub const fn store(&self) -> &DashboardStore {
        &self.view.store
    }

    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.view.screen
    }

    #[must_use]
    pub const fn editor(&self) -> &ProductEditor {
        &self.editor
    }

    /// The visible section.
    #[must_use]
    pub const fn active_section(&self) -> Section {
        self.router.active()
    }

    /// Sidebar entries.
    #[must_use]
    pub fn nav_items(&self) -> Vec<NavItem> {
        self.router.nav_items()
    }

    /// The table rendered on `surface`, if any.
    #[must_use]
    pub fn table(&self, surface: Surface) -> Option<&TableView> {
        self.view.screen.table(surface)
    }

    #[must_use]
    pub const fn metrics(&self) -> &DashboardMetrics {
        self.view.screen.metrics()
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Show `section` and refresh what it displays.
    pub fn show_section(&mut self, section: Section) {
        self.router.activate(section, &mut self.view);
    }

    // -------------------------------------------------------------------------
    // Orders and users
    // -------------------------------------------------------------------------

    /// Append a synthetic order numbered after the current count.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; nothing changes in that case.
    pub fn add_order(&mut self, rng: &mut impl Rng, today: NaiveDate) -> Result<RecordId, AppError> {
        let n = self.view.store.orders().len() + 1;
        let order = Order {
            id: format!("ORD{n}"),
            customer: format!("Customer {n}"),
            total: Some(format!("{:.2}", rng.random_range(0.0..MAX_SYNTHETIC_TOTAL))),
            date: local_date(today),
            status: "Pending".to_string(),
        };

        let id = self.view.store.append_order(order)?;
        self.view.render_orders();
        self.view.refresh_counts();
        tracing::info!(order = n, "Order added");
        Ok(id)
    }

    /// [`Self::add_order`] with the thread RNG and today's local date.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn add_order_now(&mut self) -> Result<RecordId, AppError> {
        self.add_order(&mut rand::rng(), chrono::Local::now().date_naive())
    }

    /// Append a synthetic user numbered after the current count.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; nothing changes in that case.
    pub fn add_user(&mut self, today: NaiveDate) -> Result<RecordId, AppError> {
        let n = self.view.store.users().len() + 1;
        let user = User {
            id: format!("USR{n}"),
            name: format!("User {n}"),
            email: format!("user{n}@example.com"),
            joined: local_date(today),
        };

        let id = self.view.store.append_user(user)?;
        self.view.render_users();
        self.view.refresh_counts();
        tracing::info!(user = n, "User added");
        Ok(id)
    }

    /// [`Self::add_user`] with today's local date.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn add_user_now(&mut self) -> Result<RecordId, AppError> {
        self.add_user(chrono::Local::now().date_naive())
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// The ID of the product shown at display row `index` (zero-based).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfBounds`] if there is no such row.
    pub fn product_id_at(&self, index: usize) -> Result<RecordId, AppError> {
        let products = self.view.store.products();
        products.id_at(index).ok_or_else(|| {
            StoreError::IndexOutOfBounds {
                index,
                len: products.len(),
            }
            .into()
        })
    }

    /// Open the product modal with a blank form.
    pub fn open_new_product(&mut self) -> &mut ProductForm {
        self.editor.open_new()
    }

    /// Open the product modal to edit product `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the product is gone.
    pub fn open_edit_product(&mut self, id: RecordId) -> Result<&mut ProductForm, AppError> {
        let product = self
            .view
            .store
            .products()
            .get(id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.editor.open_edit(id, product))
    }

    /// Close the product modal, discarding the form.
    pub fn close_product_modal(&mut self) {
        self.editor.close();
    }

    /// Save the open product form.
    ///
    /// Replaces the product being edited, or appends a new one. On success
    /// the modal closes and the edit pointer is cleared.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if a field is empty; nothing changes and
    ///   the modal stays open.
    /// - [`StoreError::NotFound`] if the edited product was deleted in the
    ///   meantime; the stale pointer is cleared.
    /// - [`StoreError::Storage`] if persisting fails.
    pub fn save_product(&mut self) -> Result<RecordId, AppError> {
        let product = self.editor.form().validate()?;

        let id = match self.editor.editing() {
            Some(id) => match self.view.store.replace_product(id, product) {
                Ok(_) => id,
                Err(e @ StoreError::NotFound(_)) => {
                    self.editor.close();
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            },
            None => self.view.store.append_product(product)?,
        };

        self.editor.close();
        self.view.after_product_change();
        tracing::info!(product = %id, "Product saved");
        Ok(id)
    }

    /// Delete product `id` once the admin has confirmed.
    ///
    /// Unconfirmed requests do nothing and return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the product is gone, or a storage
    /// error if persisting fails.
    pub fn delete_product(&mut self, id: RecordId, confirmed: bool) -> Result<Option<Product>, AppError> {
        if !confirmed {
            tracing::debug!(product = %id, "Delete not confirmed");
            return Ok(None);
        }

        let removed = self.view.store.remove_product(id)?;
        if self.editor.editing() == Some(id) {
            self.editor.close();
        }
        self.view.after_product_change();
        tracing::info!(product = %id, name = %removed.name, "Product deleted");
        Ok(Some(removed))
    }

    /// Show only rendered product rows whose name contains `query`.
    ///
    /// Returns the number of matching rows.
    pub fn search_products(&mut self, query: &str) -> Option<usize> {
        derived::apply_search(&mut self.view.screen, Surface::Products, query)
    }

    /// Show only rendered product rows in `category` (`all` for every row).
    ///
    /// Returns the number of matching rows.
    pub fn filter_products(&mut self, category: &str) -> Option<usize> {
        derived::apply_category_filter(&mut self.view.screen, Surface::Products, category)
    }

    /// The product catalog as CSV text.
    #[must_use]
    pub fn export_csv(&self) -> String {
        export::products_csv(self.view.store.products().values())
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// The settings form as last loaded.
    #[must_use]
    pub fn settings_view(&self) -> Option<&SettingsView> {
        self.view.screen.settings()
    }

    /// Validate and persist the settings form.
    ///
    /// Returns the confirmation message.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if name or email is empty, or a
    /// storage error if persisting fails.
    pub fn save_settings(&mut self, form: &SettingsForm) -> Result<&'static str, AppError> {
        let settings = form.validate()?;
        self.view.store.save_settings(&settings)?;
        self.view.load_settings();
        tracing::info!("Settings saved");
        Ok(SETTINGS_SAVED)
    }
}

/// Format a date the way the dashboard shows it, e.g. `3/7/2026`.
fn local_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::storage::{MemoryStorage, StorageKey};
    use crate::views::RowKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    fn dashboard(baseline: Vec<Product>) -> AdminDashboard {
        AdminDashboard::with_baseline(StorageAdapter::in_memory(), baseline, CellFormat::default())
    }

    fn fill(form: &mut ProductForm, name: &str, category: &str) {
        form.name = name.to_string();
        form.price = "10".to_string();
        form.category = category.to_string();
        form.image = "data:image/png;base64,AA==".to_string();
    }

    fn persisted_products(dashboard: &AdminDashboard) -> Vec<Product> {
        dashboard.store().storage().load(StorageKey::Products)
    }

    #[test]
    fn test_starts_on_dashboard_with_counts() {
        let dashboard = dashboard(vec![Product::new("Pen", "5", "Stationery", "")]);
        assert_eq!(dashboard.active_section(), Section::Dashboard);
        assert_eq!(dashboard.metrics().products, 1);
        assert_eq!(
            dashboard.screen().options(SelectId::CategoryFilter).len(),
            2
        );
    }

    #[test]
    fn test_new_is_empty_even_with_stored_data() {
        let backend = MemoryStorage::with_items([("addedOrders", r#"[{"id":"ORD1"}]"#)]);
        let dashboard = AdminDashboard::new(StorageAdapter::new(backend), CellFormat::default());
        assert!(dashboard.store().orders().is_empty());
        assert_eq!(dashboard.metrics().orders, 0);
    }

    #[test]
    fn test_add_order_numbers_and_persists() {
        let mut dashboard = dashboard(vec![]);
        let mut rng = StdRng::seed_from_u64(7);
        dashboard.add_order(&mut rng, today()).unwrap();
        dashboard.add_order(&mut rng, today()).unwrap();

        let orders: Vec<Order> = dashboard.store().storage().load(StorageKey::Orders);
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].id, "ORD2");
        assert_eq!(orders[1].customer, "Customer 2");
        assert_eq!(orders[1].date, "3/7/2026");
        assert_eq!(orders[1].status, "Pending");

        let total = orders[0].total.as_deref().unwrap();
        let (_, decimals) = total.split_once('.').unwrap();
        assert_eq!(decimals.len(), 2);
        assert!(orders[0].total_amount() < storedash_core::Amount::coerce(Some("500")));

        assert_eq!(dashboard.metrics().orders, 2);
        assert_eq!(dashboard.table(Surface::Orders).unwrap().rows.len(), 2);
    }

    #[test]
    fn test_add_user() {
        let mut dashboard = dashboard(vec![]);
        dashboard.add_user(today()).unwrap();
        let users: Vec<User> = dashboard.store().storage().load(StorageKey::Users);
        assert_eq!(
            users,
            [User {
                id: "USR1".to_string(),
                name: "User 1".to_string(),
                email: "user1@example.com".to_string(),
                joined: "3/7/2026".to_string(),
            }]
        );
        assert_eq!(dashboard.metrics().users, 1);
    }

    #[test]
    fn test_show_section_refreshes() {
        let mut dashboard = dashboard(vec![]);
        assert!(dashboard.table(Surface::Orders).is_none());
        dashboard.show_section(Section::Orders);
        let table = dashboard.table(Surface::Orders).unwrap();
        assert_eq!(table.rows[0].cells, ["No orders yet."]);
        assert_eq!(dashboard.active_section(), Section::Orders);
    }

    #[test]
    fn test_save_new_product() {
        let mut dashboard = dashboard(vec![]);
        fill(dashboard.open_new_product(), "Cup", "Kitchen");
        let id = dashboard.save_product().unwrap();

        assert!(!dashboard.editor().is_open());
        assert_eq!(dashboard.store().products().get(id).unwrap().name, "Cup");
        assert_eq!(persisted_products(&dashboard).len(), 1);
        let options = dashboard.screen().options(SelectId::CategoryFilter);
        assert_eq!(options[1].value, "Kitchen");
    }

    #[test]
    fn test_edit_product_keeps_position() {
        let mut dashboard = dashboard(vec![
            Product::new("Pen", "5", "Stationery", "p"),
            Product::new("Cup", "20", "Kitchen", "c"),
        ]);
        let id = dashboard.product_id_at(1).unwrap();
        let form = dashboard.open_edit_product(id).unwrap();
        assert_eq!(form.name, "Cup");
        form.name = "Mug".to_string();
        assert_eq!(dashboard.save_product().unwrap(), id);

        assert_eq!(dashboard.editor().editing(), None);
        let names: Vec<String> = persisted_products(&dashboard).into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["Pen", "Mug"]);
        let table = dashboard.table(Surface::Products).unwrap();
        assert_eq!(table.rows[1].cell(1), Some("Mug"));
    }

    #[test]
    fn test_invalid_save_changes_nothing() {
        let mut dashboard = dashboard(vec![Product::new("Pen", "5", "Stationery", "p")]);
        let id = dashboard.product_id_at(0).unwrap();
        dashboard.open_edit_product(id).unwrap().name.clear();
        let before = dashboard.store().storage().raw(StorageKey::Products).unwrap();

        let err = dashboard.save_product().unwrap_err();
        assert!(err.is_user_facing());
        assert_eq!(dashboard.store().products().get(id).unwrap().name, "Pen");
        assert_eq!(dashboard.store().storage().raw(StorageKey::Products).unwrap(), before);
        assert_eq!(dashboard.editor().editing(), Some(id));
    }

    #[test]
    fn test_stale_edit_pointer_is_rejected() {
        let mut dashboard = dashboard(vec![Product::new("Pen", "5", "Stationery", "p")]);
        let id = dashboard.product_id_at(0).unwrap();
        fill(dashboard.open_edit_product(id).unwrap(), "Pen 2", "Stationery");

        // Remove behind the editor's back, as a second action would.
        dashboard.view.store.remove_product(id).unwrap();

        let err = dashboard.save_product().unwrap_err();
        assert!(matches!(err, AppError::Store(StoreError::NotFound(x)) if x == id));
        assert_eq!(dashboard.editor().editing(), None);
        assert!(dashboard.store().products().is_empty());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut dashboard = dashboard(vec![Product::new("Pen", "5", "Stationery", "p")]);
        let id = dashboard.product_id_at(0).unwrap();
        assert!(dashboard.delete_product(id, false).unwrap().is_none());
        assert_eq!(dashboard.store().products().len(), 1);

        let removed = dashboard.delete_product(id, true).unwrap().unwrap();
        assert_eq!(removed.name, "Pen");
        assert!(persisted_products(&dashboard).is_empty());
        let table = dashboard.table(Surface::Products).unwrap();
        assert!(table.rows[0].is_placeholder());
        assert_eq!(dashboard.metrics().products, 0);
    }

    #[test]
    fn test_delete_clears_matching_edit_pointer() {
        let mut dashboard = dashboard(vec![Product::new("Pen", "5", "Stationery", "p")]);
        let id = dashboard.product_id_at(0).unwrap();
        dashboard.open_edit_product(id).unwrap();
        dashboard.delete_product(id, true).unwrap();
        assert_eq!(dashboard.editor().editing(), None);
    }

    #[test]
    fn test_row_ids_survive_delete() {
        let mut dashboard = dashboard(vec![
            Product::new("A", "1", "X", "a"),
            Product::new("B", "1", "X", "b"),
            Product::new("C", "1", "X", "c"),
        ]);
        let c = dashboard.product_id_at(2).unwrap();
        let a = dashboard.product_id_at(0).unwrap();
        dashboard.delete_product(a, true).unwrap();

        let rows = &dashboard.table(Surface::Products).unwrap().rows;
        assert_eq!(rows[1].kind, RowKind::Data(c));
        assert!(dashboard.product_id_at(2).is_err());
    }

    #[test]
    fn test_search_and_filter() {
        let mut dashboard = dashboard(vec![
            Product::new("Blue Pen", "5", "Stationery", "p"),
            Product::new("Cup", "20", "Kitchen", "c"),
        ]);
        dashboard.show_section(Section::Products);
        assert_eq!(dashboard.search_products("PEN"), Some(1));
        assert_eq!(dashboard.filter_products("kitchen"), Some(1));
        assert_eq!(dashboard.filter_products("all"), Some(2));
    }

    #[test]
    fn test_export_csv() {
        let dashboard = dashboard(vec![Product::new("Pen", "5", "Stationery", "p")]);
        assert_eq!(dashboard.export_csv(), "Name,Price,Category\nPen,5,Stationery\n");
    }

    #[test]
    fn test_settings_flow() {
        let mut dashboard = dashboard(vec![]);
        let form = SettingsForm {
            name: "Admin".to_string(),
            email: String::new(),
            password: "pw".to_string(),
        };
        assert!(dashboard.save_settings(&form).is_err());
        assert_eq!(dashboard.store().storage().raw(StorageKey::Settings).unwrap(), None);

        let form = SettingsForm {
            email: "admin@shop.test".to_string(),
            ..form
        };
        assert_eq!(dashboard.save_settings(&form).unwrap(), SETTINGS_SAVED);

        dashboard.show_section(Section::Settings);
        let view = dashboard.settings_view().unwrap();
        assert_eq!(view.email, "admin@shop.test");
        assert_eq!(view.password_display(), "••");
    }

    #[test]
    fn test_local_date_format() {
        assert_eq!(local_date(NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()), "12/25/2026");
    }
}
