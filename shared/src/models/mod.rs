//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64`; timestamps are Unix milliseconds (UTC).

pub mod category;
pub mod customer;
pub mod order;
pub mod product;
pub mod report;
pub mod serde_helpers;

// Re-exports
pub use category::*;
pub use customer::*;
pub use order::*;
pub use product::*;
pub use report::*;
