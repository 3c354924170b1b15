//! Settings commands.

use std::io::{self, Write};

use storedash_admin::editor::SettingsForm;
use storedash_admin::{AdminDashboard, Section};

use super::{CliError, print_section};

/// Validate and save the settings form, then print it.
pub fn set(dashboard: &mut AdminDashboard, name: String, email: String, password: String) -> Result<(), CliError> {
    let form = SettingsForm {
        name,
        email,
        password,
    };
    let message = dashboard.save_settings(&form)?;

    let mut out = io::stdout().lock();
    writeln!(out, "{message}")?;
    drop(out);

    dashboard.show_section(Section::Settings);
    print_section(dashboard, false)
}
