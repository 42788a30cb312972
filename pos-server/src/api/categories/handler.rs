//! Category API Handlers

use axum::{Json, extract::State};
use shared::models::Category;

use crate::api::ServiceResult;
use crate::core::ServerState;
use crate::db::repository::category;

/// GET /api/categories
pub async fn list(State(state): State<ServerState>) -> ServiceResult<Json<Vec<Category>>> {
    let categories = category::find_all(state.pool()).await?;
    Ok(Json(categories))
}
