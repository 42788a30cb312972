//! Report API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/dashboard", get(handler::dashboard))
        .route("/inventory", get(handler::inventory))
        .route("/sales", get(handler::sales))
        .route("/customers", get(handler::customers))
        .route("/category-sales", get(handler::category_sales))
}
