//! Product API Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use shared::error::{AppError, ErrorCode};
use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::api::{ApiJson, ApiPath, ApiQuery, ServiceResult};
use crate::core::ServerState;
use crate::db::repository::{RepoError, product};
use crate::db::unit_of_work::transaction;
use crate::error::ServiceError;

#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    pub threshold: Option<i64>,
}

/// GET /api/products - newest first
pub async fn list(State(state): State<ServerState>) -> ServiceResult<Json<Vec<Product>>> {
    let products = product::find_all(state.pool()).await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<Json<Product>> {
    let product = product::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<ProductCreate>,
) -> ServiceResult<(StatusCode, Json<Product>)> {
    validate_create(&payload)?;

    let product = transaction(state.pool(), move |conn| {
        Box::pin(product::create(conn, payload))
    })
    .await
    .map_err(conflict_as_product_code)?;

    tracing::info!(product_id = product.id, product_code = %product.product_code, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<ProductUpdate>,
) -> ServiceResult<Json<Product>> {
    validate_update(&payload)?;

    let product = transaction(state.pool(), move |conn| {
        Box::pin(product::update(conn, id, payload))
    })
    .await
    .map_err(conflict_as_product_code)?
    .ok_or_else(|| not_found(id))?;

    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<Json<Value>> {
    let product = product::delete(state.pool(), id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(product_id = id, "Product deleted");
    Ok(Json(json!({
        "message": "Product deleted successfully",
        "product": product,
    })))
}

/// GET /api/products/alerts/low-stock?threshold=N
///
/// Products with `0 < remaining_items <= threshold`.
pub async fn low_stock(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<LowStockQuery>,
) -> ServiceResult<Json<Vec<Product>>> {
    let threshold = query.threshold.unwrap_or(state.config.low_stock_threshold);
    let products = product::find_low_stock(state.pool(), threshold).await?;
    Ok(Json(products))
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, format!("Product {id} not found"))
}

fn conflict_as_product_code(err: RepoError) -> ServiceError {
    match err {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::ProductCodeExists).into(),
        other => other.into(),
    }
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")).with_detail("field", field));
    }
    Ok(())
}

fn check_price(price: Option<f64>) -> Result<(), AppError> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(AppError::validation(
            "price must be a non-negative number",
        )
        .with_detail("field", "price")),
        _ => Ok(()),
    }
}

fn check_stock(total_stock: Option<i64>) -> Result<(), AppError> {
    match total_stock {
        Some(s) if s < 0 => Err(AppError::validation("total_stock must not be negative")
            .with_detail("field", "total_stock")),
        _ => Ok(()),
    }
}

fn validate_create(data: &ProductCreate) -> Result<(), AppError> {
    require_text("serial_no", &data.serial_no)?;
    require_text("product_code", &data.product_code)?;
    require_text("item_name", &data.item_name)?;
    check_price(data.price)?;
    check_stock(data.total_stock)
}

fn validate_update(data: &ProductUpdate) -> Result<(), AppError> {
    for (field, value) in [
        ("serial_no", &data.serial_no),
        ("product_code", &data.product_code),
        ("item_name", &data.item_name),
    ] {
        if let Some(v) = value {
            require_text(field, v)?;
        }
    }
    check_price(data.price)?;
    check_stock(data.total_stock)
}
