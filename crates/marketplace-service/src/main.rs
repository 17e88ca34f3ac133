//! 可回收物交易市场服务入口

use greentech_shared::{config::AppConfig, database::Database, observability};
use marketplace::{routes, schema, seed, state::AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};

const SERVICE_NAME: &str = "marketplace-service";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(SERVICE_NAME).unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        AppConfig {
            service_name: SERVICE_NAME.to_string(),
            ..Default::default()
        }
    });

    let _guard = observability::init(&config.observability, &config.service_name).await?;

    info!("Starting {} on {}", config.service_name, config.server_addr());

    if config.is_production() && config.server.cors_origins.trim() == "*" {
        warn!("cors_origins=\"*\" 在生产环境中不安全，请设置为具体域名");
    }

    // 初始化基础设施
    let db = Database::connect(&config.database).await?;
    schema::migrate(&db).await?;

    if config.database.seed_demo_data
        && seed::seed_demo_data(db.pool(), config.auth.effective_cost()).await?
    {
        info!(
            "Demo accounts available: {} / {}",
            seed::DEMO_PRODUCER_EMAIL,
            seed::DEMO_COLLECTOR_EMAIL
        );
    }

    let state = AppState::new(db.clone(), &config);
    let app = routes::app(state, &config.server);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 优雅关闭：收到 SIGTERM 或 Ctrl+C 时停止接收新连接，等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// 监听关闭信号
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("注册 Ctrl+C 处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("注册 SIGTERM 处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
