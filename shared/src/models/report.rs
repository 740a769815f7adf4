//! Dashboard report models

use serde::{Deserialize, Serialize};

/// Aggregate over active products
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    /// Σ price × stock_quantity
    pub total_value: f64,
    pub total_quantity: i64,
}
