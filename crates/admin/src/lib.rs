//! storedash admin library.
//!
//! A single-operator store dashboard: products, orders, users, and admin
//! settings, held in memory and written through to a key/value store on
//! every change.
//!
//! The crate draws nothing. [`AdminDashboard`] keeps view-models of every
//! surface current; a front end (the `storedash` CLI) displays them.
//!
//! # Data flow
//!
//! Every action runs the same sequence: mutate a [`store::Collection`]
//! (which persists it), re-render the affected table, then refresh the
//! derived views (dashboard counts, category filter options).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod components;
pub mod config;
pub mod derived;
pub mod editor;
pub mod error;
pub mod export;
pub mod loader;
pub mod router;
pub mod storage;
pub mod store;
pub mod views;

pub use app::AdminDashboard;
pub use config::DashboardConfig;
pub use error::{AppError, ValidationError};
pub use router::Section;
pub use storage::{FileStorage, MemoryStorage, StorageAdapter, StorageKey};
