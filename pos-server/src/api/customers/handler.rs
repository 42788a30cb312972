//! Customer API Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::{Value, json};
use shared::error::{AppError, ErrorCode};
use shared::models::{Customer, CustomerCreate, CustomerUpdate, CustomerWithProducts, OrderDetail};

use crate::api::{ApiJson, ApiPath, ServiceResult};
use crate::core::ServerState;
use crate::db::repository::{customer, order};

/// Customer with their order history
#[derive(Debug, Serialize)]
pub struct CustomerOrders {
    pub customer: Customer,
    pub orders: Vec<OrderDetail>,
}

/// GET /api/customers - newest first
pub async fn list(State(state): State<ServerState>) -> ServiceResult<Json<Vec<Customer>>> {
    let customers = customer::find_all(state.pool()).await?;
    Ok(Json(customers))
}

/// GET /api/customers/with-products
pub async fn list_with_products(
    State(state): State<ServerState>,
) -> ServiceResult<Json<Vec<CustomerWithProducts>>> {
    let mut conn = state.pool().acquire().await?;
    let customers = customer::find_all_with_products(&mut conn).await?;
    Ok(Json(customers))
}

/// GET /api/customers/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<Json<Customer>> {
    let customer = customer::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(customer))
}

/// GET /api/customers/{id}/orders
pub async fn orders(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<Json<CustomerOrders>> {
    let mut conn = state.pool().acquire().await?;
    let customer = customer::find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let orders = order::find_by_customer(&mut conn, id).await?;
    Ok(Json(CustomerOrders { customer, orders }))
}

/// POST /api/customers
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CustomerCreate>,
) -> ServiceResult<(StatusCode, Json<Customer>)> {
    require_name(&payload.customer_name)?;
    let customer = customer::create(state.pool(), payload).await?;
    tracing::info!(customer_id = customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// PUT /api/customers/{id}
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<CustomerUpdate>,
) -> ServiceResult<Json<Customer>> {
    if let Some(name) = &payload.customer_name {
        require_name(name)?;
    }
    let customer = customer::update(state.pool(), id, payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(customer))
}

/// DELETE /api/customers/{id}
///
/// Orders keep their customer name snapshot.
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> ServiceResult<Json<Value>> {
    let customer = customer::delete(state.pool(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(customer_id = id, "Customer deleted");
    Ok(Json(json!({
        "message": "Customer deleted successfully",
        "customer": customer,
    })))
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::CustomerNotFound, format!("Customer {id} not found"))
}

fn require_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("customer_name is required")
            .with_detail("field", "customer_name"));
    }
    Ok(())
}
