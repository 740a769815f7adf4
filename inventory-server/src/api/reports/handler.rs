//! Report API Handlers

use axum::{Json, extract::State};
use shared::models::DashboardStats;
use shared::response::ApiResponse;

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::AppResult;

/// GET /api/reports/summary - 在售商品统计
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let stats = product::stats(&state.pool).await?;
    Ok(Json(ApiResponse::success(stats)))
}
