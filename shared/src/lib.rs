//! Shared types for the inventory admin panel
//!
//! Product models, the unified error system and the JSON response envelopes
//! used by the HTTP API.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
pub use models::{
    DashboardStats, Product, ProductCreate, ProductFilter, ProductListQuery, ProductUpdate,
};
pub use response::{ApiResponse, Pagination, ProductCreated, ProductPage};
