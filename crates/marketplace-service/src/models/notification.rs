//! 通知模型

use serde::{Deserialize, Serialize};

/// 通知类型，与客户端图标一一对应
pub mod kinds {
    pub const SYSTEM: &str = "system";
    pub const TIP: &str = "tip";
    pub const ALERT: &str = "alert";
    pub const SUCCESS: &str = "success";
}

/// 站内通知
///
/// 生产者与回收者的通知分表存储，`user_id` 指向对应角色的用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
    pub created_at: String,
}

/// 通知数据库行，`is_read` 以 0/1 存储
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NotificationRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub is_read: i64,
    pub created_at: String,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            message: row.message,
            kind: row.kind,
            is_read: row.is_read != 0,
            created_at: row.created_at,
        }
    }
}

/// 新通知
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub kind: String,
}

impl NewNotification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, kind: &str) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: kind.to_string(),
        }
    }

    /// 回收完成后发给生产者的通知
    pub fn collection_completed(points: i64) -> Self {
        Self::new(
            "Coleta Realizada!",
            format!("Você ganhou {} pontos.", points),
            kinds::SUCCESS,
        )
    }
}
