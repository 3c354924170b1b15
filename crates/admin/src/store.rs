//! In-memory collections with write-through persistence.
//!
//! Each [`Collection`] is an ordered list of records mirrored to one storage
//! key. Every mutation persists the whole collection before returning; if
//! the write fails the mutation is undone, so memory and storage never
//! disagree.
//!
//! Records are addressed two ways:
//! - by [`RecordId`], handed out at insertion and stable across deletes
//! - by display index, which shifts whenever an earlier record is removed

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use storedash_core::{Order, Product, RecordId, Settings, User};

use crate::storage::{StorageAdapter, StorageError, StorageKey};

/// Errors from collection operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A display index past the end of the collection.
    #[error("index {index} is out of bounds for a collection of {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// No record with this ID is in the collection.
    #[error("record {0} not found")]
    NotFound(RecordId),

    /// Persisting the collection failed; the mutation was rolled back.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A record together with the ID the collection assigned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<T> {
    pub id: RecordId,
    pub value: T,
}

/// An ordered, persisted list of records.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    key: StorageKey,
    records: Vec<Record<T>>,
    next_id: RecordId,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// An empty collection bound to `key`.
    #[must_use]
    pub const fn empty(key: StorageKey) -> Self {
        Self {
            key,
            records: Vec::new(),
            next_id: RecordId::new(1),
        }
    }

    /// Build a collection from `baseline` followed by `overlay`.
    ///
    /// Order is preserved and nothing is de-duplicated: a record present in
    /// both inputs appears twice.
    #[must_use]
    pub fn initialize(key: StorageKey, baseline: Vec<T>, overlay: Vec<T>) -> Self {
        let mut collection = Self::empty(key);
        for value in baseline.into_iter().chain(overlay) {
            collection.push(value);
        }
        collection
    }

    /// Load the collection from storage alone.
    #[must_use]
    pub fn load(key: StorageKey, storage: &StorageAdapter) -> Self {
        Self::initialize(key, storage.load(key), Vec::new())
    }

    /// The storage key this collection is mirrored to.
    #[must_use]
    pub const fn key(&self) -> StorageKey {
        self.key
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in display order.
    #[must_use]
    pub fn records(&self) -> &[Record<T>] {
        &self.records
    }

    /// Record values in display order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.records.iter().map(|r| &r.value)
    }

    /// Look up a record by ID.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id == id).map(|r| &r.value)
    }

    /// Current display index of a record.
    #[must_use]
    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// ID of the record currently at display index `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<RecordId> {
        self.records.get(index).map(|r| r.id)
    }

    /// Append a record and persist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write fails; the record is not
    /// kept in that case.
    pub fn append(&mut self, value: T, storage: &mut StorageAdapter) -> Result<RecordId, StoreError> {
        let id = self.push(value);
        if let Err(e) = self.persist(storage) {
            self.records.pop();
            self.next_id = id;
            return Err(e);
        }
        tracing::debug!(key = %self.key, id = %id, len = self.len(), "Appended record");
        Ok(id)
    }

    /// Replace the record at display index `index` and persist.
    ///
    /// The record keeps its ID. Returns the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfBounds`] if `index` is past the end,
    /// or [`StoreError::Storage`] if the write fails.
    pub fn replace_at(
        &mut self,
        index: usize,
        value: T,
        storage: &mut StorageAdapter,
    ) -> Result<T, StoreError> {
        let len = self.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfBounds { index, len })?;
        let previous = std::mem::replace(&mut slot.value, value);

        if let Err(e) = self.persist(storage) {
            if let Some(slot) = self.records.get_mut(index) {
                slot.value = previous;
            }
            return Err(e);
        }
        tracing::debug!(key = %self.key, index, "Replaced record");
        Ok(previous)
    }

    /// Remove the record at display index `index` and persist.
    ///
    /// Every later record shifts down by one, so any index held from before
    /// this call is stale afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfBounds`] if `index` is past the end,
    /// or [`StoreError::Storage`] if the write fails.
    pub fn remove_at(&mut self, index: usize, storage: &mut StorageAdapter) -> Result<T, StoreError> {
        let len = self.len();
        if index >= len {
            return Err(StoreError::IndexOutOfBounds { index, len });
        }
        let removed = self.records.remove(index);

        if let Err(e) = self.persist(storage) {
            self.records.insert(index, removed);
            return Err(e);
        }
        tracing::debug!(key = %self.key, index, len = self.len(), "Removed record");
        Ok(removed.value)
    }

    /// Replace the record with ID `id` and persist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such record exists, or
    /// [`StoreError::Storage`] if the write fails.
    pub fn replace(&mut self, id: RecordId, value: T, storage: &mut StorageAdapter) -> Result<T, StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        self.replace_at(index, value, storage)
    }

    /// Remove the record with ID `id` and persist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such record exists, or
    /// [`StoreError::Storage`] if the write fails.
    pub fn remove(&mut self, id: RecordId, storage: &mut StorageAdapter) -> Result<T, StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        self.remove_at(index, storage)
    }

    fn push(&mut self, value: T) -> RecordId {
        let id = self.next_id;
        self.next_id = id.next();
        self.records.push(Record { id, value });
        id
    }

    fn persist(&self, storage: &mut StorageAdapter) -> Result<(), StoreError> {
        let values: Vec<&T> = self.values().collect();
        storage.save(self.key, &values)?;
        Ok(())
    }
}

/// The dashboard's three collections and their storage.
#[derive(Debug)]
pub struct DashboardStore {
    storage: StorageAdapter,
    products: Collection<Product>,
    orders: Collection<Order>,
    users: Collection<User>,
}

impl DashboardStore {
    /// A store with every collection empty.
    ///
    /// Nothing is read from storage; this is the state after a failed
    /// baseline fetch.
    #[must_use]
    pub fn empty(storage: StorageAdapter) -> Self {
        Self {
            storage,
            products: Collection::empty(StorageKey::Products),
            orders: Collection::empty(StorageKey::Orders),
            users: Collection::empty(StorageKey::Users),
        }
    }

    /// Seed the store from a baseline product list plus everything persisted.
    #[must_use]
    pub fn initialize(storage: StorageAdapter, baseline: Vec<Product>) -> Self {
        let overlay: Vec<Product> = storage.load(StorageKey::Products);
        let products = Collection::initialize(StorageKey::Products, baseline, overlay);
        let orders = Collection::load(StorageKey::Orders, &storage);
        let users = Collection::load(StorageKey::Users, &storage);

        tracing::info!(
            products = products.len(),
            orders = orders.len(),
            users = users.len(),
            "Store initialized"
        );

        Self {
            storage,
            products,
            orders,
            users,
        }
    }

    #[must_use]
    pub const fn products(&self) -> &Collection<Product> {
        &self.products
    }

    #[must_use]
    pub const fn orders(&self) -> &Collection<Order> {
        &self.orders
    }

    #[must_use]
    pub const fn users(&self) -> &Collection<User> {
        &self.users
    }

    #[must_use]
    pub const fn storage(&self) -> &StorageAdapter {
        &self.storage
    }

    /// Append a product and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn append_product(&mut self, product: Product) -> Result<RecordId, StoreError> {
        self.products.append(product, &mut self.storage)
    }

    /// Replace a product by ID and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is gone or persisting fails.
    pub fn replace_product(&mut self, id: RecordId, product: Product) -> Result<Product, StoreError> {
        self.products.replace(id, product, &mut self.storage)
    }

    /// Remove a product by ID and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is gone or persisting fails.
    pub fn remove_product(&mut self, id: RecordId) -> Result<Product, StoreError> {
        self.products.remove(id, &mut self.storage)
    }

    /// Append an order and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn append_order(&mut self, order: Order) -> Result<RecordId, StoreError> {
        self.orders.append(order, &mut self.storage)
    }

    /// Append a user and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn append_user(&mut self, user: User) -> Result<RecordId, StoreError> {
        self.users.append(user, &mut self.storage)
    }

    /// The persisted settings, or defaults.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.storage.load(StorageKey::Settings)
    }

    /// Persist the settings record.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        self.storage.save(StorageKey::Settings, settings)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, Storage};

    /// A backend whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_writes: std::sync::Arc<std::sync::atomic::AtomicBool>,
    }

    impl Storage for FlakyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(std::io::Error::other("disk full").into());
            }
            self.inner.set_item(key, value)
        }
    }

    fn product(name: &str) -> Product {
        Product::new(name, "1", "Misc", "img")
    }

    fn persisted(storage: &StorageAdapter) -> Vec<Product> {
        storage.load(StorageKey::Products)
    }

    #[test]
    fn test_initialize_concatenates_without_dedup() {
        let c = Collection::initialize(
            StorageKey::Products,
            vec![product("Pen")],
            vec![product("Pen"), product("Cup")],
        );
        let names: Vec<&str> = c.values().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Pen", "Pen", "Cup"]);
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let mut storage = StorageAdapter::in_memory();
        let mut c = Collection::initialize(StorageKey::Products, vec![product("A")], vec![]);
        let b = c.append(product("B"), &mut storage).unwrap();
        let first = c.id_at(0).unwrap();
        assert_ne!(first, b);

        c.remove(first, &mut storage).unwrap();
        assert_eq!(c.position(b), Some(0));
        assert_eq!(c.get(b).unwrap().name, "B");
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut storage = StorageAdapter::in_memory();
        let mut c = Collection::empty(StorageKey::Products);
        let a = c.append(product("A"), &mut storage).unwrap();
        c.remove(a, &mut storage).unwrap();
        let b = c.append(product("B"), &mut storage).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_append_writes_through() {
        let mut storage = StorageAdapter::in_memory();
        let mut c = Collection::empty(StorageKey::Products);
        c.append(product("A"), &mut storage).unwrap();
        c.append(product("B"), &mut storage).unwrap();
        assert_eq!(persisted(&storage), [product("A"), product("B")]);
    }

    #[test]
    fn test_replace_at_out_of_bounds() {
        let mut storage = StorageAdapter::in_memory();
        let mut c = Collection::initialize(StorageKey::Products, vec![product("A")], vec![]);
        let err = c.replace_at(1, product("X"), &mut storage).unwrap_err();
        assert!(matches!(err, StoreError::IndexOutOfBounds { index: 1, len: 1 }));
        assert_eq!(c.values().next().unwrap().name, "A");
        assert_eq!(storage.raw(StorageKey::Products).unwrap(), None);
    }

    #[test]
    fn test_remove_at_out_of_bounds() {
        let mut storage = StorageAdapter::in_memory();
        let mut c: Collection<Product> = Collection::empty(StorageKey::Products);
        assert!(matches!(
            c.remove_at(0, &mut storage),
            Err(StoreError::IndexOutOfBounds { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut storage = StorageAdapter::in_memory();
        let mut c: Collection<Product> = Collection::empty(StorageKey::Products);
        let id = RecordId::new(99);
        assert!(matches!(c.remove(id, &mut storage), Err(StoreError::NotFound(x)) if x == id));
    }

    #[test]
    fn test_replace_keeps_id_and_position() {
        let mut storage = StorageAdapter::in_memory();
        let mut c = Collection::initialize(
            StorageKey::Products,
            vec![product("A"), product("B")],
            vec![],
        );
        let id = c.id_at(1).unwrap();
        let previous = c.replace(id, product("B2"), &mut storage).unwrap();
        assert_eq!(previous.name, "B");
        assert_eq!(c.id_at(1), Some(id));
        assert_eq!(persisted(&storage)[1].name, "B2");
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let backend = FlakyStorage::default();
        let fail = backend.fail_writes.clone();
        let mut storage = StorageAdapter::new(backend);
        let mut c = Collection::empty(StorageKey::Products);
        let a = c.append(product("A"), &mut storage).unwrap();

        fail.store(true, std::sync::atomic::Ordering::SeqCst);
        assert!(matches!(
            c.append(product("B"), &mut storage),
            Err(StoreError::Storage(_))
        ));
        assert!(c.replace(a, product("A2"), &mut storage).is_err());
        assert!(c.remove(a, &mut storage).is_err());

        let names: Vec<&str> = c.values().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A"]);
        assert_eq!(persisted(&storage), [product("A")]);

        fail.store(false, std::sync::atomic::Ordering::SeqCst);
        let b = c.append(product("B"), &mut storage).unwrap();
        assert_eq!(b, a.next());
    }

    #[test]
    fn test_store_initialize_reads_overlay() {
        let backend = MemoryStorage::with_items([
            ("addedProducts", r#"[{"name":"Cup","price":"20","category":"Kitchen","image":"x"}]"#),
            ("addedOrders", r#"[{"id":"ORD1","customer":"C","total":"5","date":"1/1/2026","status":"Pending"}]"#),
            ("addedUsers", "garbage"),
        ]);
        let store = DashboardStore::initialize(
            StorageAdapter::new(backend),
            vec![Product::new("Pen", "5", "Stationery", "")],
        );
        assert_eq!(store.products().len(), 2);
        assert_eq!(store.products().values().next().unwrap().name, "Pen");
        assert_eq!(store.orders().len(), 1);
        assert!(store.users().is_empty());
    }

    #[test]
    fn test_settings_round_trip() {
        let mut store = DashboardStore::empty(StorageAdapter::in_memory());
        assert_eq!(store.settings(), Settings::default());
        let settings = Settings::new("Admin", "admin@shop.test", "pw");
        store.save_settings(&settings).unwrap();
        assert_eq!(store.settings(), settings);
    }
}
