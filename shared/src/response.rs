//! API Response types
//!
//! Every success body carries `"success": true`; failures are rendered by
//! [`crate::error::ErrorBody`] with `"success": false`.

use serde::{Deserialize, Serialize};

use crate::models::Product;

/// Generic success envelope
///
/// ```json
/// { "success": true, "message": "...", "data": { ... } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response carrying only a message
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Pagination metadata of a product listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total_items: i64) -> Self {
        let total_pages = if limit > 0 {
            (total_items + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total_pages,
            total_items,
        }
    }
}

/// `GET /api/products` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub success: bool,
    pub data: Vec<Product>,
    pub pagination: Pagination,
}

impl ProductPage {
    pub fn new(data: Vec<Product>, pagination: Pagination) -> Self {
        Self {
            success: true,
            data,
            pagination,
        }
    }
}

/// `POST /api/products` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreated {
    pub success: bool,
    pub message: String,
    pub product: Product,
}

impl ProductCreated {
    pub fn new(product: Product) -> Self {
        Self {
            success: true,
            message: "Product created successfully".to_string(),
            product,
        }
    }
}
