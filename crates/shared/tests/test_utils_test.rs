//! test_utils 模块的集成测试
//!
//! 验证测试工具生成的配置可以直接用于连接数据库

use greentech_shared::database::{Database, DatabaseKind};
use greentech_shared::test_utils::*;

#[test]
fn test_database_config_defaults_to_memory() {
    // 未设置 TEST_DATABASE_URL 时使用内存库
    if std::env::var("TEST_DATABASE_URL").is_err() {
        let config = test_database_config();
        assert_eq!(config.url, "sqlite::memory:");
    }
}

#[test]
fn test_app_config_is_test_environment() {
    let config = test_app_config();
    assert_eq!(config.environment, "test");
    assert!(!config.is_production());
    assert_eq!(config.server.port, 3002);
}

#[test]
fn test_email_shape() {
    let email = test_email("collector");
    assert!(email.starts_with("collector-"));
    assert!(email.ends_with("@test.greentech.local"));
}

#[tokio::test]
async fn test_connect_with_test_config() {
    let db = Database::connect(&test_database_config()).await.unwrap();
    if std::env::var("TEST_DATABASE_URL").is_err() {
        assert_eq!(db.kind(), DatabaseKind::Sqlite);
    }
    db.health_check().await.unwrap();
    db.close().await;
}
