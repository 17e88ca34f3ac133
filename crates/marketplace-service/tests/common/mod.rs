//! 集成测试公共工具
//!
//! 每个测试使用独立的数据库：迁移、写入演示数据后组装完整路由。
//! 默认是单连接内存库，并发场景使用多连接的临时文件库

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::PathBuf;
use tower::ServiceExt;

use greentech_shared::config::DatabaseConfig;
use greentech_shared::database::Database;
use greentech_shared::test_utils::{next_test_seq, test_app_config, test_database_config};
use marketplace::{AppState, routes, schema, seed};

/// 测试应用
pub struct TestApp {
    pub router: Router,
    pub db: Database,
    db_file: Option<PathBuf>,
}

/// 演示数据中的账号 ID（空库首次写入，自增从 1 开始）
pub const DEMO_PRODUCER_ID: i64 = 1;
pub const DEMO_COLLECTOR_ID: i64 = 1;

impl TestApp {
    pub async fn spawn() -> Self {
        // 固定使用内存库，保证演示账号 ID 与测试间隔离
        let db_config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..test_database_config()
        };
        Self::spawn_with(db_config, None).await
    }

    /// 使用临时文件库与多连接池，请求可以真正并发地落到数据库
    pub async fn spawn_file_backed() -> Self {
        let path = std::env::temp_dir().join(format!(
            "greentech-test-{}-{}.db",
            std::process::id(),
            next_test_seq()
        ));
        let db_config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            max_connections: 5,
            ..test_database_config()
        };
        Self::spawn_with(db_config, Some(path)).await
    }

    async fn spawn_with(db_config: DatabaseConfig, db_file: Option<PathBuf>) -> Self {
        let config = test_app_config();
        let db = Database::connect(&db_config)
            .await
            .expect("connect test database");
        schema::migrate(&db).await.expect("run migrations");
        seed::seed_demo_data(db.pool(), config.auth.effective_cost())
            .await
            .expect("seed demo data");

        let state = AppState::new(db.clone(), &config);
        let router = routes::app(state, &config.server);

        Self {
            router,
            db,
            db_file,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// 以演示生产者身份发布物品，返回物品 ID
    pub async fn post_item(&self, item_type: &str, title: &str, weight_kg: f64) -> i64 {
        let (status, body) = self
            .post(
                "/api/items",
                serde_json::json!({
                    "type": item_type,
                    "title": title,
                    "weight_kg": weight_kg,
                    "lat": -23.56,
                    "lng": -46.64,
                    "address": "Rua Augusta, 500",
                    "producer_id": DEMO_PRODUCER_ID
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "post item failed: {}", body);
        body["id"].as_i64().expect("created id")
    }

    /// 修改物品状态
    pub async fn set_status(&self, item_id: i64, status: &str, collector_id: i64) -> (StatusCode, Value) {
        self.put(
            &format!("/api/items/{}/status", item_id),
            serde_json::json!({ "status": status, "collector_id": collector_id }),
        )
        .await
    }

    /// 直接插入一个回收者，返回 ID
    pub async fn insert_collector(&self, email: &str, name: &str) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO collectors (email, password_hash, name) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(email.to_string())
        .bind("not-a-valid-hash".to_string())
        .bind(name.to_string())
        .fetch_one(self.db.pool())
        .await
        .expect("insert collector")
    }

    /// 直接插入一个生产者，返回 ID
    pub async fn insert_producer(&self, email: &str, name: &str, points: i64) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO producers (email, password_hash, name, points) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(email.to_string())
        .bind("not-a-valid-hash".to_string())
        .bind(name.to_string())
        .bind(points)
        .fetch_one(self.db.pool())
        .await
        .expect("insert producer")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(path) = &self.db_file {
            for suffix in ["", "-wal", "-shm", "-journal"] {
                let mut file = path.clone().into_os_string();
                file.push(suffix);
                let _ = std::fs::remove_file(file);
            }
        }
    }
}
