//! Product API 模块
//!
//! | 路径 | 方法 | 门禁 |
//! |------|------|------|
//! | /api/products | GET | 无 |
//! | /api/products | POST | x-admin-auth |
//! | /api/products/{id} | GET | 无 |
//! | /api/products/{id} | PUT | x-admin-auth |
//! | /api/products/{id} | DELETE | x-admin-auth |
//!
//! `GET /api/products` 默认只列出启用中的商品; 传 `include_inactive=true`
//! 时包含已软删除的商品。`GET /api/products/{id}` 总是返回该行。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::admin_gate;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    let public = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let gated = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route_layer(middleware::from_fn(admin_gate));

    public.merge(gated)
}
