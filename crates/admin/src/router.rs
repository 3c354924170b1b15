//! Section routing.
//!
//! Exactly one section is visible at a time. Activating a section hides the
//! others and asks the section's owner to refresh it. There is no history
//! and no guard: any section can follow any other.

use std::fmt;
use std::str::FromStr;

/// A top-level dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Products,
    Orders,
    Users,
    Settings,
}

impl Section {
    /// All sections in sidebar order.
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Products,
        Self::Orders,
        Self::Users,
        Self::Settings,
    ];

    /// Section identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Users => "users",
            Self::Settings => "settings",
        }
    }

    /// Sidebar label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Products => "Products",
            Self::Orders => "Orders",
            Self::Users => "Users",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown section: {s}"))
    }
}

/// Something that can redraw a section when it becomes visible.
pub trait SectionRefresh {
    fn refresh(&mut self, section: Section);
}

/// A sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub section: Section,
    pub label: &'static str,
    pub active: bool,
}

/// Tracks which section is visible.
#[derive(Debug, Clone, Default)]
pub struct SectionRouter {
    active: Section,
}

impl SectionRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The visible section.
    #[must_use]
    pub const fn active(&self) -> Section {
        self.active
    }

    /// Whether `section` is the one shown.
    #[must_use]
    pub fn is_visible(&self, section: Section) -> bool {
        self.active == section
    }

    /// Show `section`, hide the rest, and refresh it through `target`.
    ///
    /// Re-activating the visible section refreshes it again.
    pub fn activate(&mut self, section: Section, target: &mut impl SectionRefresh) {
        if self.active != section {
            tracing::debug!(from = %self.active, to = %section, "Switching section");
        }
        self.active = section;
        target.refresh(section);
    }

    /// Sidebar entries with the visible section marked active.
    #[must_use]
    pub fn nav_items(&self) -> Vec<NavItem> {
        Section::ALL
            .into_iter()
            .map(|section| NavItem {
                section,
                label: section.label(),
                active: self.is_visible(section),
            })
            .collect()
    }
}
