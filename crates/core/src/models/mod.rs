//! Dashboard records.
//!
//! Every record is a plain, JSON-serializable value. None of them carry an
//! identity the store relies on: the `id` strings on orders and users are
//! display labels, not keys.

pub mod order;
pub mod product;
pub mod settings;
pub mod user;

pub use order::Order;
pub use product::Product;
pub use settings::Settings;
pub use user::User;
