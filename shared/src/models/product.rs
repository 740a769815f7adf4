//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub stock_quantity: i64,
    /// Public path of the uploaded image (`/uploads/...`)
    pub image: Option<String>,
    pub is_active: bool,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}

/// Create product payload (already validated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub stock_quantity: i64,
}

/// Update product payload (already validated)
///
/// Overwrites every field; the image is handled separately since it is only
/// replaced when a new file is uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub stock_quantity: i64,
    pub is_active: bool,
}

/// Raw query string of `GET /api/products`
///
/// Kept as strings so malformed numbers surface as our own validation error
/// instead of an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub include_inactive: Option<String>,
}

/// Validated listing filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    /// 1-based page number
    pub page: i64,
    pub limit: i64,
    /// Case-insensitive substring of `name`, `None` when blank
    pub search: Option<String>,
    pub include_inactive: bool,
}

impl ProductFilter {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    /// Rows to skip for the requested page
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
            search: None,
            include_inactive: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_offset() {
        let filter = ProductFilter {
            page: 3,
            limit: 10,
            ..Default::default()
        };
        assert_eq!(filter.offset(), 20);
        assert_eq!(ProductFilter::default().offset(), 0);
    }

    #[test]
    fn test_filter_offset_saturates() {
        let filter = ProductFilter {
            page: i64::MAX,
            limit: ProductFilter::MAX_LIMIT,
            ..Default::default()
        };
        assert_eq!(filter.offset(), i64::MAX);
    }

    #[test]
    fn test_product_serialize_field_names() {
        let product = Product {
            id: 1,
            name: "Widget".into(),
            description: None,
            price: 9.5,
            category: "Tools".into(),
            stock_quantity: 3,
            image: Some("/uploads/image-1.png".into()),
            is_active: true,
            created_at: 1,
            updated_at: 1,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["stock_quantity"], 3);
        assert_eq!(json["is_active"], true);
        assert_eq!(json["image"], "/uploads/image-1.png");
        assert!(json["description"].is_null());
    }
}
