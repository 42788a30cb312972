//! Order API Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderCreate, OrderDetail, OrderUpdate};

use crate::api::{ApiJson, ApiPath, ServiceResult};
use crate::core::ServerState;
use crate::db::repository::order;

/// GET /api/orders - newest first, with items
pub async fn list(State(state): State<ServerState>) -> ServiceResult<Json<Vec<OrderDetail>>> {
    let mut conn = state.pool().acquire().await?;
    let orders = order::find_all(&mut conn).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<Json<OrderDetail>> {
    let mut conn = state.pool().acquire().await?;
    let detail = order::find_by_id(&mut conn, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
    })?;
    Ok(Json(detail))
}

/// POST /api/orders - create and take stock
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<OrderCreate>,
) -> ServiceResult<(StatusCode, Json<OrderDetail>)> {
    let detail = state.orders.create(payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/orders/{id} - status and notes only
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<OrderUpdate>,
) -> ServiceResult<Json<Order>> {
    let order = state.orders.update(id, payload).await?;
    Ok(Json(order))
}

/// DELETE /api/orders/{id} - delete and restore stock
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<Json<Value>> {
    let detail = state.orders.delete(id).await?;
    Ok(Json(json!({
        "message": "Order deleted successfully",
        "order": detail,
    })))
}
