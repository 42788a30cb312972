//! Report API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::models::{CategorySales, CustomerSpend, Dashboard, InventoryRow, SalesReport};

use crate::api::{ApiQuery, ServiceResult};
use crate::core::ServerState;
use crate::db::repository::report;
use crate::utils::time::DateRange;

#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/reports/dashboard
pub async fn dashboard(State(state): State<ServerState>) -> ServiceResult<Json<Dashboard>> {
    let mut conn = state.pool().acquire().await?;
    let dashboard = report::dashboard(&mut conn, state.config.low_stock_threshold).await?;
    Ok(Json(dashboard))
}

/// GET /api/reports/inventory
pub async fn inventory(State(state): State<ServerState>) -> ServiceResult<Json<Vec<InventoryRow>>> {
    let rows = report::inventory(state.pool()).await?;
    Ok(Json(rows))
}

/// GET /api/reports/sales?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
pub async fn sales(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<SalesQuery>,
) -> ServiceResult<Json<SalesReport>> {
    let range = DateRange::parse(query.start_date.as_deref(), query.end_date.as_deref())?;
    let mut conn = state.pool().acquire().await?;
    let report = report::sales(&mut conn, range).await?;
    Ok(Json(report))
}

/// GET /api/reports/customers
pub async fn customers(State(state): State<ServerState>) -> ServiceResult<Json<Vec<CustomerSpend>>> {
    let rows = report::customers(state.pool()).await?;
    Ok(Json(rows))
}

/// GET /api/reports/category-sales
pub async fn category_sales(
    State(state): State<ServerState>,
) -> ServiceResult<Json<Vec<CategorySales>>> {
    let rows = report::category_sales(state.pool()).await?;
    Ok(Json(rows))
}
