//! storedash core - shared record types.
//!
//! This crate provides the plain records the dashboard keeps in its
//! collections. It is shared by:
//! - `storedash-admin` - collection store, view-models, and persistence
//! - `storedash-cli` - the `storedash` terminal front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! rendering. Every record here is JSON-serializable and round-trips
//! through the storage backend unchanged.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and lenient amount parsing
//! - [`models`] - Product, order, user, and settings records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
