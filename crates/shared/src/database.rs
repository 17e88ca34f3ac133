//! 数据库连接管理模块
//!
//! 基于 sqlx `Any` 驱动统一 SQLite（本地开发）与 PostgreSQL（生产环境）的连接池，
//! 支持健康检查和连接配置。
//!
//! 仓储层 SQL 统一使用 `$N` 占位符，两种数据库均可识别；
//! 时间戳统一以 RFC 3339 UTC 文本存储，保证两种数据库下排序一致。

use crate::config::DatabaseConfig;
use crate::error::{Result, SharedError};
use chrono::{SecondsFormat, Utc};
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;
use std::time::Duration;
use tracing::{info, instrument};

/// 数据库类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Sqlite,
    Postgres,
}

impl DatabaseKind {
    /// 根据连接串 scheme 判断数据库类型
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url.split(':').next().unwrap_or_default().to_ascii_lowercase();
        match scheme.as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(SharedError::Config(format!(
                "不支持的数据库类型: {}",
                scheme
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
        }
    }
}

/// 是否为 SQLite 内存库
fn is_sqlite_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// 规范化 SQLite 连接串：文件库默认 `mode=rwc`，不存在时自动创建
fn normalize_sqlite_url(url: &str) -> String {
    if is_sqlite_memory(url) || url.contains("mode=") {
        return url.to_string();
    }
    if url.contains('?') {
        format!("{}&mode=rwc", url)
    } else {
        format!("{}?mode=rwc", url)
    }
}

/// 当前时间的存储格式（毫秒精度，`Z` 结尾）
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 数据库连接池包装
#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
    kind: DatabaseKind,
}

impl Database {
    /// 创建数据库连接池
    #[instrument(skip(config))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let kind = DatabaseKind::from_url(&config.url)?;
        info!(kind = kind.as_str(), "Connecting to database...");

        let mut options = AnyPoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds));

        let url = match kind {
            DatabaseKind::Sqlite if is_sqlite_memory(&config.url) => {
                // 内存库的每个连接都是独立数据库，只能保持单连接且不回收
                options = options
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
                config.url.clone()
            }
            DatabaseKind::Sqlite => {
                options = options
                    .max_connections(config.max_connections)
                    .min_connections(config.min_connections)
                    .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));
                normalize_sqlite_url(&config.url)
            }
            DatabaseKind::Postgres => {
                options = options
                    .max_connections(config.max_connections)
                    .min_connections(config.min_connections)
                    .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));
                config.url.clone()
            }
        };

        let pool = options.connect(&url).await?;

        info!(kind = kind.as_str(), "Database connection pool created");

        Ok(Self { pool, kind })
    }

    /// 获取连接池引用
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// 数据库类型
    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    /// 健康检查
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(SharedError::from)
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::ops::Deref for Database {
    type Target = AnyPool;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}
