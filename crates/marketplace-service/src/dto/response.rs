//! 响应 DTO 定义

use serde::Serialize;

use crate::models::{CollectionReward, ItemStatus, LoginUser};

/// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: LoginUser,
}

impl LoginResponse {
    pub fn new(user: LoginUser) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

/// 写操作响应
#[derive(Debug, Default, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<u64>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn created(id: i64) -> Self {
        Self {
            success: true,
            id: Some(id),
            changes: None,
        }
    }

    pub fn changed(changes: u64) -> Self {
        Self {
            success: true,
            id: None,
            changes: Some(changes),
        }
    }
}

/// 物品状态变更响应
#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub changes: u64,
    pub status: ItemStatus,
    /// 仅回收时返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<CollectionReward>,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}
