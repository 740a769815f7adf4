use std::path::{Path, PathBuf};

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_HOST | 0.0.0.0 | 监听地址 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_URL | sqlite:data/inventory.db | SQLite 数据库 |
/// | MAX_CONNECTIONS | 10 | 连接池大小 |
/// | PUBLIC_DIR | public | 静态页面目录 |
/// | UPLOAD_DIR | public/uploads | 上传图片目录 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (unset) | 日志文件目录 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_URL=sqlite:/tmp/inventory.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 监听地址
    pub http_host: String,
    /// HTTP 服务端口
    pub http_port: u16,
    /// SQLite 连接串 (`sqlite:<path>` 或 `sqlite::memory:`)
    pub database_url: String,
    /// 连接池最大连接数
    pub max_connections: u32,
    /// dashboard.html / login.html / js / css
    pub public_dir: PathBuf,
    /// 上传图片存放目录，通过 `/uploads` 对外提供
    pub upload_dir: PathBuf,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    /// 设置后日志按天滚动写入该目录
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:data/inventory.db".into()),
            max_connections: std::env::var("MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            public_dir: std::env::var("PUBLIC_DIR")
                .unwrap_or_else(|_| "public".into())
                .into(),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "public/uploads".into())
                .into(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        }
    }

    /// 测试用配置: 内存数据库 + 临时目录
    pub fn for_tests(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            http_host: "127.0.0.1".into(),
            http_port: 0,
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
            public_dir: dir.join("public"),
            upload_dir: dir.join("uploads"),
            environment: "test".into(),
            log_level: "debug".into(),
            log_dir: None,
        }
    }

    /// 监听地址 `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
