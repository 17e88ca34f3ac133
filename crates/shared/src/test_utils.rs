//! 测试工具模块
//!
//! 提供集成测试所需的辅助函数和测试数据生成器。

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::config::{AppConfig, AuthConfig, DatabaseConfig};

/// 创建测试用数据库配置
///
/// 优先使用 TEST_DATABASE_URL，否则使用 SQLite 内存库
pub fn test_database_config() -> DatabaseConfig {
    DatabaseConfig {
        url: std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string()),
        max_connections: 5,
        min_connections: 1,
        connect_timeout_seconds: 10,
        idle_timeout_seconds: 300,
        seed_demo_data: true,
    }
}

/// 创建测试用应用配置
///
/// bcrypt 成本取最小值，避免测试中哈希耗时过长
pub fn test_app_config() -> AppConfig {
    AppConfig {
        service_name: "marketplace-service-test".to_string(),
        environment: "test".to_string(),
        database: test_database_config(),
        auth: AuthConfig {
            password_hash_cost: 4,
        },
        ..Default::default()
    }
}

/// 生成唯一的测试邮箱
pub fn test_email(prefix: &str) -> String {
    format!("{}-{}@test.greentech.local", prefix, Uuid::new_v4().simple())
}

/// 生成单调递增的测试序号
///
/// 使用原子计数器确保并行测试时的唯一性
pub fn next_test_seq() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::SeqCst)
}
