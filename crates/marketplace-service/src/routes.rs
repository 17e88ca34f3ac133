//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射，并组装完整的应用

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use greentech_shared::config::ServerConfig;
use greentech_shared::observability::middleware as obs_middleware;

use crate::{handlers, middleware::security_headers, state::AppState};

/// 用户与通知路由
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route(
            "/user",
            get(handlers::user::get_user).put(handlers::user::update_user),
        )
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
}

/// 物品市场路由
fn item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items",
            get(handlers::item::list_items).post(handlers::item::create_item),
        )
        .route(
            "/items/{id}",
            delete(handlers::item::delete_item),
        )
        .route("/items/{id}/status", put(handlers::item::update_status))
        .route("/history", get(handlers::history::list_history))
}

/// 地址与服务区域路由
fn location_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/addresses",
            get(handlers::address::list_addresses).post(handlers::address::create_address),
        )
        .route(
            "/addresses/{id}",
            delete(handlers::address::delete_address),
        )
        .route(
            "/zones",
            get(handlers::address::list_zones).post(handlers::address::create_zone),
        )
        .route(
            "/zones/{id}",
            delete(handlers::address::delete_zone),
        )
}

/// 聊天路由
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/chats",
            get(handlers::chat::list_chats).post(handlers::chat::open_chat),
        )
        .route(
            "/chats/{id}/messages",
            get(handlers::chat::list_messages).post(handlers::chat::send_message),
        )
}

/// 游戏化路由
fn gamification_routes() -> Router<AppState> {
    Router::new()
        .route("/garden", get(handlers::gamification::garden))
        .route("/leaderboard", get(handlers::gamification::leaderboard))
        .route("/guide", get(handlers::gamification::guide))
}

/// 所有 `/api` 下的路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(account_routes())
        .merge(item_routes())
        .merge(location_routes())
        .merge(chat_routes())
        .merge(gamification_routes())
}

/// 根据配置构建 CORS 层
///
/// `*` 允许任意来源，否则按逗号分隔的来源列表放行
pub fn cors_layer(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        info!("CORS allowed_origins: * (all origins)");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!("CORS allowed_origins: {}", origins);
    let origins: Vec<HeaderValue> = origins
        .split(',')
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 组装完整应用：API、探针与中间件
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer(&server.cors_origins))
        // 可观测性中间件：请求追踪和指标收集
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
