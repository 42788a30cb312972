//! Shared types for the POS service
//!
//! Data models exchanged over the HTTP API, the unified error system and a few
//! utilities used by both the server and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
