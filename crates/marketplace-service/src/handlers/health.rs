//! 健康检查处理器

use axum::{Json, extract::State, http::StatusCode};

use crate::{dto::HealthResponse, state::AppState};

/// 存活探针：服务进程正常即返回 ok
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: state.service_name.clone(),
        database: None,
    })
}

/// 就绪探针：检查数据库连接是否可用
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_ok = state.db.health_check().await.is_ok();
    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if db_ok { "ok" } else { "degraded" },
            service: state.service_name.clone(),
            database: Some(if db_ok { "ok" } else { "fail" }),
        }),
    )
}
