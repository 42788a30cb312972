//! Health API Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub products: &'static str,
    pub customers: &'static str,
    pub orders: &'static str,
    pub reports: &'static str,
    pub categories: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

/// GET /health - database reachability
pub async fn health(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database: "connected",
                timestamp: Some(chrono::Utc::now().to_rfc3339()),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "unhealthy",
                    database: "disconnected",
                    timestamp: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

/// GET / - service banner
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "POS API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            products: "/api/products",
            customers: "/api/customers",
            orders: "/api/orders",
            reports: "/api/reports",
            categories: "/api/categories",
        },
    })
}
