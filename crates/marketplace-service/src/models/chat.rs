//! 聊天模型

use serde::{Deserialize, Serialize};

use super::Role;

/// 生产者与回收者之间的会话，每对用户至多一个
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Chat {
    pub id: i64,
    pub producer_id: i64,
    pub collector_id: i64,
    pub last_message: Option<String>,
    pub last_message_time: Option<String>,
}

/// 会话列表项，附带对方名称
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub chat: Chat,
    pub partner_name: Option<String>,
}

/// 聊天消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    pub sender_role: Role,
    pub content: String,
    pub timestamp: String,
    pub is_read: bool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRow {
    pub id: i64,
    pub chat_id: i64,
    pub sender_role: String,
    pub content: String,
    pub timestamp: String,
    pub is_read: i64,
}

impl TryFrom<MessageRow> for Message {
    type Error = String;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Self {
            sender_role: row.sender_role.parse()?,
            id: row.id,
            chat_id: row.chat_id,
            content: row.content,
            timestamp: row.timestamp,
            is_read: row.is_read != 0,
        })
    }
}
