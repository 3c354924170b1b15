//! Settings form view.

use secrecy::ExposeSecret;

use storedash_core::Settings;

/// The settings form as displayed.
#[derive(Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub name: String,
    pub email: String,
    password: String,
    /// Whether the password field shows its text.
    pub password_visible: bool,
}

impl SettingsView {
    /// Build the form from stored settings, password hidden.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            name: settings.name.clone(),
            email: settings.email.clone(),
            password: settings.password.expose_secret().to_owned(),
            password_visible: false,
        }
    }

    /// Flip the password between shown and masked.
    pub const fn toggle_password(&mut self) {
        self.password_visible = !self.password_visible;
    }

    /// The password field's text: the password itself, or a mask of the
    /// same length.
    #[must_use]
    pub fn password_display(&self) -> String {
        if self.password_visible {
            self.password.clone()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }
}

impl std::fmt::Debug for SettingsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsView")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_visible", &self.password_visible)
            .finish()
    }
}
