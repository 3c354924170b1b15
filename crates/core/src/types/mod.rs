//! Core types for storedash.
//!
//! This module provides type-safe wrappers for identifiers and the lenient
//! number handling shared by product prices and order totals.

pub mod amount;
pub mod id;
pub mod lenient;

pub use amount::Amount;
pub use id::*;
