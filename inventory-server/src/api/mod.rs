//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`products`] - 商品管理接口
//! - [`reports`] - 仪表盘统计接口

pub mod health;
pub mod products;
pub mod reports;

use crate::utils::{AppError, ErrorCode};

/// Fallback for unmatched `/api/*` routes
pub async fn api_not_found(uri: http::Uri) -> AppError {
    AppError::with_message(ErrorCode::NotFound, format!("Route {} not found", uri.path()))
}
