//! POS backend
//!
//! REST service for products, customers and orders with inventory tracking
//! and sales reports, backed by SQLite.
//!
//! - [`api`] HTTP routes and handlers
//! - [`orders`] order workflow (stock is taken and restored transactionally)
//! - [`db`] connection pool, migrations and repositories
//! - [`core`] configuration, shared state and the server loop

pub mod api;
pub mod core;
pub mod db;
pub mod error;
pub mod orders;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use core::{Config, Server, ServerState};
