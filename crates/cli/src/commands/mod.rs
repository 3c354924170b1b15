//! Command implementations.
//!
//! Every command prints the view it changed, so the terminal always shows
//! what the dashboard would after the same click.

pub mod products;
pub mod settings;

use std::io::{self, Write};

use thiserror::Error;

use storedash_admin::storage::StorageError;
use storedash_admin::views::Surface;
use storedash_admin::{AdminDashboard, AppError, Section};

use crate::output;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The data directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The dashboard rejected the action.
    #[error("{0}")]
    App(#[from] AppError),

    /// Row numbers start at 1.
    #[error("Invalid row: {0}. Rows are numbered from 1")]
    InvalidRow(usize),

    /// Writing output or reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Whether this is a validation alert for the admin rather than a failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::App(e) if e.is_user_facing())
    }
}

/// Show `section` and print it.
pub fn show(dashboard: &mut AdminDashboard, section: Section, reveal: bool) -> Result<(), CliError> {
    dashboard.show_section(section);
    print_section(dashboard, reveal)
}

/// Generate one order and print the orders table.
pub fn add_order(dashboard: &mut AdminDashboard) -> Result<(), CliError> {
    dashboard.add_order_now()?;
    show(dashboard, Section::Orders, false)
}

/// Generate one user and print the users table.
pub fn add_user(dashboard: &mut AdminDashboard) -> Result<(), CliError> {
    dashboard.add_user_now()?;
    show(dashboard, Section::Users, false)
}

/// Print the active section.
pub(crate) fn print_section(dashboard: &AdminDashboard, reveal: bool) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    output::nav(&mut out, &dashboard.nav_items())?;

    match dashboard.active_section() {
        Section::Dashboard => output::metrics(&mut out, dashboard.metrics())?,
        Section::Products => print_table(&mut out, dashboard, Surface::Products)?,
        Section::Orders => print_table(&mut out, dashboard, Surface::Orders)?,
        Section::Users => print_table(&mut out, dashboard, Surface::Users)?,
        Section::Settings => {
            if let Some(view) = dashboard.settings_view() {
                let mut view = view.clone();
                if reveal {
                    view.toggle_password();
                }
                output::settings(&mut out, &view)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn print_table(out: &mut impl Write, dashboard: &AdminDashboard, surface: Surface) -> io::Result<()> {
    match dashboard.table(surface) {
        Some(table) => output::table(out, table),
        None => Ok(()),
    }
}

/// Convert a 1-based row number to a display index.
pub(crate) fn row_index(row: usize) -> Result<usize, CliError> {
    match row.checked_sub(1) {
        Some(index) => Ok(index),
        None => Err(CliError::InvalidRow(row)),
    }
}

#[cfg(test)]
mod tests {
    use storedash_admin::ValidationError;

    use super::*;

    #[test]
    fn test_row_index() {
        assert!(matches!(row_index(1), Ok(0)));
        assert!(matches!(row_index(0), Err(CliError::InvalidRow(0))));
    }

    #[test]
    fn test_validation_errors_are_alerts() {
        let err = CliError::from(AppError::from(ValidationError::MissingProductFields {
            missing: vec!["price"],
        }));
        assert!(err.is_user_facing());
        assert_eq!(err.to_string(), "Please fill all fields!");
        assert!(!CliError::InvalidRow(0).is_user_facing());
    }
}
