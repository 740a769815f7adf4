//! Server State
//!
//! 所有 handler 共享的状态 (cheap to clone)

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::upload::ImageStore;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub images: ImageStore,
}

impl ServerState {
    /// 打开数据库 (含迁移) 并准备上传目录
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url, config.max_connections).await?;

        let images = ImageStore::new(&config.upload_dir);
        images.ensure_dir().await?;
        tracing::info!(upload_dir = %config.upload_dir.display(), "Upload directory ready");

        Ok(Self {
            config: Arc::new(config.clone()),
            pool: db.pool,
            images,
        })
    }
}
