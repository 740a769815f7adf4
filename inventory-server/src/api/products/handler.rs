//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use shared::models::{Product, ProductListQuery};
use shared::response::{ApiResponse, Pagination, ProductCreated, ProductPage};

use crate::core::ServerState;
use crate::db::repository::product;
use crate::upload::ProductForm;
use crate::utils::validation;
use crate::utils::{AppError, AppResult, ErrorCode};

fn product_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::ProductNotFound).with_detail("id", id)
}

fn name_taken(name: &str) -> AppError {
    AppError::new(ErrorCode::ProductNameExists).with_detail("name", name)
}

/// GET /api/products - 分页 + 搜索
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> AppResult<Json<ProductPage>> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;
    let filter = validation::product_filter(&query)?;

    let total_items = product::count(&state.pool, &filter).await?;
    let products = product::find_page(&state.pool, &filter).await?;

    Ok(Json(ProductPage::new(
        products,
        Pagination::new(filter.page, filter.limit, total_items),
    )))
}

/// GET /api/products/:id - 获取单个商品 (包括已停用)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let id = validation::parse_id(&id)?;
    let product = product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(Json(ApiResponse::success(product)))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    form: ProductForm,
) -> AppResult<(StatusCode, Json<ProductCreated>)> {
    let data = validation::product_create(&form.fields)?;

    if product::exists_active_name(&state.pool, &data.name, None).await? {
        return Err(name_taken(&data.name));
    }

    let image = match &form.image {
        Some(upload) => Some(state.images.save(upload).await?),
        None => None,
    };

    let created = match product::create(&state.pool, &data, image.as_deref()).await {
        Ok(p) => p,
        Err(e) => {
            if let Some(path) = &image {
                state.images.discard(path).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(id = created.id, name = %created.name, "Product created");
    Ok((StatusCode::CREATED, Json(ProductCreated::new(created))))
}

/// PUT /api/products/:id - 更新商品 (全量字段, 图片可选)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    form: ProductForm,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = validation::parse_id(&id)?;
    let current = product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;

    let data = validation::product_update(&form.fields, current.is_active)?;

    // 停用的商品不参与名称唯一性
    if data.is_active && product::exists_active_name(&state.pool, &data.name, Some(id)).await? {
        return Err(name_taken(&data.name));
    }

    let image = match &form.image {
        Some(upload) => Some(state.images.save(upload).await?),
        None => None,
    };

    let updated = match product::update(&state.pool, id, &data, image.as_deref()).await {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(path) = &image {
                state.images.discard(path).await;
            }
            return Err(e.into());
        }
    };
    if !updated {
        if let Some(path) = &image {
            state.images.discard(path).await;
        }
        return Err(product_not_found(id));
    }

    tracing::info!(id, is_active = data.is_active, "Product updated");
    Ok(Json(ApiResponse::ok("Product updated successfully")))
}

/// DELETE /api/products/:id - 软删除 (is_active = false)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = validation::parse_id(&id)?;
    if !product::soft_delete(&state.pool, id).await? {
        return Err(product_not_found(id));
    }

    tracing::info!(id, "Product soft-deleted");
    Ok(Json(ApiResponse::ok("Product deleted successfully")))
}
