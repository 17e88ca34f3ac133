//! 市场服务错误类型定义
//!
//! 覆盖认证、参数校验、资源不存在、物品状态冲突以及基础设施错误

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use greentech_shared::error::SharedError;

use crate::models::ItemStatus;

/// 市场服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    // 认证错误
    #[error("邮箱或密码错误")]
    InvalidCredentials,
    #[error("禁止访问: {0}")]
    Forbidden(String),

    // 验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    // 资源不存在
    #[error("用户不存在: {0}")]
    UserNotFound(i64),
    #[error("物品不存在: {0}")]
    ItemNotFound(i64),
    #[error("通知不存在: {0}")]
    NotificationNotFound(i64),
    #[error("地址不存在: {0}")]
    AddressNotFound(i64),
    #[error("服务区域不存在: {0}")]
    ZoneNotFound(i64),
    #[error("会话不存在: {0}")]
    ChatNotFound(i64),

    // 业务冲突
    #[error("物品状态不允许从 {from} 变更为 {to}")]
    InvalidTransition { from: ItemStatus, to: ItemStatus },
    #[error("物品未被该回收者预约")]
    NotReservedByCollector,
    #[error("物品已回收，无法删除")]
    ItemAlreadyCollected,
    #[error("邮箱已被使用")]
    EmailAlreadyExists,

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl MarketplaceError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,

            Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::UserNotFound(_)
            | Self::ItemNotFound(_)
            | Self::NotificationNotFound(_)
            | Self::AddressNotFound(_)
            | Self::ZoneNotFound(_)
            | Self::ChatNotFound(_) => StatusCode::NOT_FOUND,

            Self::InvalidTransition { .. }
            | Self::NotReservedByCollector
            | Self::ItemAlreadyCollected
            | Self::EmailAlreadyExists => StatusCode::CONFLICT,

            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::NotificationNotFound(_) => "NOTIFICATION_NOT_FOUND",
            Self::AddressNotFound(_) => "ADDRESS_NOT_FOUND",
            Self::ZoneNotFound(_) => "ZONE_NOT_FOUND",
            Self::ChatNotFound(_) => "CHAT_NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotReservedByCollector => "NOT_RESERVED_BY_COLLECTOR",
            Self::ItemAlreadyCollected => "ITEM_ALREADY_COLLECTED",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 数据库行无法转换为领域模型
    pub fn corrupt_row(detail: impl std::fmt::Display) -> Self {
        Self::Internal(format!("数据行格式错误: {}", detail))
    }
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for MarketplaceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 请求体无法解析（缺少字段、类型不符、未知枚举值等）
impl From<JsonRejection> for MarketplaceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for MarketplaceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for MarketplaceError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// 从基础设施错误转换
impl From<SharedError> for MarketplaceError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::Database(e) => Self::Database(e),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, MarketplaceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: MarketplaceError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            MarketplaceError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            MarketplaceError::ItemNotFound(1).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            MarketplaceError::InvalidTransition {
                from: ItemStatus::Collected,
                to: ItemStatus::Reserved,
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            MarketplaceError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_transition_message() {
        let err = MarketplaceError::InvalidTransition {
            from: ItemStatus::Available,
            to: ItemStatus::Collected,
        };
        assert_eq!(err.to_string(), "物品状态不允许从 available 变更为 collected");
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
    }

    #[tokio::test]
    async fn test_envelope_for_business_error() {
        let (status, body) = body_json(MarketplaceError::ItemAlreadyCollected).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "ITEM_ALREADY_COLLECTED");
        assert_eq!(body["message"], "物品已回收，无法删除");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_envelope_hides_internal_details() {
        let (status, body) =
            body_json(MarketplaceError::Internal("connection string leaked".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "服务内部错误，请稍后重试");
        assert!(!body.to_string().contains("leaked"));
    }

    #[test]
    fn test_from_shared_error() {
        let err: MarketplaceError = SharedError::Config("bad".into()).into();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
