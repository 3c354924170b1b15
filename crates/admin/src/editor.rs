//! Form state: the product add/edit modal and the settings form.
//!
//! The product editor remembers which product (if any) the open form is editing.
//! That pointer is set only by [`ProductEditor::open_edit`] and is cleared
//! by [`ProductEditor::open_new`], [`ProductEditor::close`], and every
//! completed save.

use storedash_core::{Product, RecordId, Settings};

use crate::error::{ValidationError, missing_fields};

/// The four product form inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub category: String,
    /// The image preview: a data URI or URL. Empty until an image loads.
    pub image: String,
}

impl ProductForm {
    /// Turn the form into a product.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingProductFields`] if any field is
    /// empty.
    pub fn validate(&self) -> Result<Product, ValidationError> {
        let missing = missing_fields(&[
            ("name", self.name.as_str()),
            ("price", self.price.as_str()),
            ("category", self.category.as_str()),
            ("image", self.image.as_str()),
        ]);
        if !missing.is_empty() {
            return Err(ValidationError::MissingProductFields { missing });
        }
        Ok(Product::new(
            self.name.trim(),
            self.price.trim(),
            self.category.trim(),
            self.image.clone(),
        ))
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }
}

/// The settings form inputs.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SettingsForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SettingsForm {
    /// Turn the form into a settings record.
    ///
    /// The password may be left empty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingSettingsFields`] if the name or
    /// email is empty.
    pub fn validate(&self) -> Result<Settings, ValidationError> {
        let missing = missing_fields(&[("name", self.name.as_str()), ("email", self.email.as_str())]);
        if !missing.is_empty() {
            return Err(ValidationError::MissingSettingsFields { missing });
        }
        Ok(Settings::new(
            self.name.trim(),
            self.email.trim(),
            self.password.clone(),
        ))
    }
}

impl std::fmt::Debug for SettingsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Modal open/closed state plus the edit pointer.
#[derive(Debug, Clone, Default)]
pub struct ProductEditor {
    open: bool,
    editing: Option<RecordId>,
    form: ProductForm,
}

impl ProductEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a blank form for a new product.
    pub fn open_new(&mut self) -> &mut ProductForm {
        self.open = true;
        self.editing = None;
        self.form = ProductForm::default();
        &mut self.form
    }

    /// Open the form pre-filled with `product`, remembering `id`.
    pub fn open_edit(&mut self, id: RecordId, product: &Product) -> &mut ProductForm {
        self.open = true;
        self.editing = Some(id);
        self.form = ProductForm::from(product);
        &mut self.form
    }

    /// Close the modal and forget the edit pointer.
    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// The product being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<RecordId> {
        self.editing
    }

    #[must_use]
    pub const fn form(&self) -> &ProductForm {
        &self.form
    }
}
