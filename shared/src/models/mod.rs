//! Data models
//!
//! Shared between inventory-server and the dashboard (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod product;
pub mod report;

// Re-exports
pub use product::*;
pub use report::*;
