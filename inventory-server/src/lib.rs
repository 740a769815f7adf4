//! Inventory Server - 商品库存管理后台
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite (sqlx) + 迁移
//! - **门禁** (`auth`): `x-admin-auth` 管理员门禁
//! - **上传** (`upload`): 商品表单解析、图片校验与存储
//! - **HTTP API** (`api`): RESTful API 接口
//! - **静态页面** (`routes`): dashboard / login / uploads
//!
//! # 模块结构
//!
//! ```text
//! inventory-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── db/            # 连接池与 repository
//! ├── auth/          # 管理员门禁
//! ├── upload/        # 表单与图片
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志
//! ├── routes/        # 路由装配
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod upload;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use routes::{build_app, build_router};
pub use utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 按配置初始化日志 (控制台或按天滚动文件)
pub fn setup_environment(config: &Config) {
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
}
