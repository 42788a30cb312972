//! HTTP API
//!
//! - [`health`] - liveness and service banner
//! - [`products`] - catalog CRUD and low-stock alerts
//! - [`customers`] - customer CRUD and purchase history
//! - [`orders`] - order lifecycle
//! - [`reports`] - read-only aggregations
//! - [`categories`] - product categories

pub mod extract;

pub mod categories;
pub mod customers;
pub mod health;
pub mod orders;
pub mod products;
pub mod reports;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use shared::error::{AppError, ErrorCode};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub use crate::error::ServiceResult;
pub use extract::{ApiJson, ApiPath, ApiQuery};

/// Full application router with middleware and state
pub fn build_app(state: ServerState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .merge(health::router())
        .merge(products::router())
        .merge(customers::router())
        .merge(orders::router())
        .merge(reports::router())
        .merge(categories::router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::with_message(ErrorCode::NotFound, "Endpoint not found")
}

/// Any origin when `origins` is empty, otherwise the listed ones with credentials
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
}
