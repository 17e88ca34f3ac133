//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集与导出。
//! 指标通过独立的 HTTP 端口暴露，供 Prometheus 抓取。
//!
//! 未安装 recorder 时，所有记录函数都是空操作，测试中可直接调用。

use anyhow::Result;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::ObservabilityConfig;

/// Metrics 资源守卫
pub struct MetricsHandle {
    server_handle: tokio::task::JoinHandle<()>,
}

impl Drop for MetricsHandle {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

/// 初始化 Prometheus 指标导出
///
/// 启动一个独立的 HTTP 服务器在指定端口暴露 `/metrics` 端点。
pub async fn init(config: &ObservabilityConfig, service_name: &str) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    register_common_metrics(service_name);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    let server_handle = start_metrics_server(addr, handle).await?;

    Ok(MetricsHandle { server_handle })
}

/// 注册通用指标
///
/// 描述信息会出现在 /metrics 端点的 HELP 注释中
fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!("http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!(
        "marketplace_items_posted_total",
        "Total number of items listed by producers"
    );
    metrics::describe_counter!(
        "marketplace_items_reserved_total",
        "Total number of item reservations"
    );
    metrics::describe_counter!(
        "marketplace_items_collected_total",
        "Total number of collected items"
    );
    metrics::describe_counter!(
        "marketplace_collected_weight_grams",
        "Total collected weight in grams"
    );
    metrics::describe_counter!("marketplace_logins_total", "Login attempts by result");

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

/// 启动指标 HTTP 服务器
async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = Router::new()
        .route("/metrics", get(move || std::future::ready(handle.render())))
        .route("/health", get(|| async { "OK" }));

    let listener = TcpListener::bind(addr).await?;
    info!("Metrics server listening on {}", addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(server_handle)
}

// ============================================================================
// 便捷的指标记录函数
// ============================================================================

/// 记录 HTTP 请求
#[inline]
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status_str = status.to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str
    )
    .record(duration_secs);
}

/// 记录物品发布
#[inline]
pub fn record_item_posted(item_type: &str) {
    metrics::counter!("marketplace_items_posted_total", "type" => item_type.to_string())
        .increment(1);
}

/// 记录物品预约
#[inline]
pub fn record_item_reserved() {
    metrics::counter!("marketplace_items_reserved_total").increment(1);
}

/// 记录物品回收完成
///
/// 计数器只接受整数，重量换算为克累加
#[inline]
pub fn record_item_collected(weight_kg: f64) {
    metrics::counter!("marketplace_items_collected_total").increment(1);
    let grams = (weight_kg.max(0.0) * 1000.0).round() as u64;
    metrics::counter!("marketplace_collected_weight_grams").increment(grams);
}

/// 记录登录结果
#[inline]
pub fn record_login(success: bool) {
    let result = if success { "success" } else { "failure" };
    metrics::counter!("marketplace_logins_total", "result" => result).increment(1);
}
