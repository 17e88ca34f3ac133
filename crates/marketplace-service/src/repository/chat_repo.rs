//! 聊天仓储

use async_trait::async_trait;
use sqlx::AnyPool;

use super::traits::ChatRepositoryTrait;
use crate::error::{MarketplaceError, Result};
use crate::models::{Chat, ChatSummary, Message, MessageRow, Role};
use greentech_shared::database::timestamp_now;

/// 聊天仓储
pub struct ChatRepository {
    pool: AnyPool,
}

impl ChatRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// 用户参与的会话，最近活跃的在前
    pub async fn list_chats(&self, role: Role, user_id: i64) -> Result<Vec<ChatSummary>> {
        let sql = match role {
            Role::Producer => {
                r#"
                SELECT c.id, c.producer_id, c.collector_id, c.last_message, c.last_message_time,
                       u.name AS partner_name
                FROM chats c
                LEFT JOIN collectors u ON u.id = c.collector_id
                WHERE c.producer_id = $1
                ORDER BY CASE WHEN c.last_message_time IS NULL THEN 1 ELSE 0 END,
                         c.last_message_time DESC, c.id DESC
                "#
            }
            Role::Collector => {
                r#"
                SELECT c.id, c.producer_id, c.collector_id, c.last_message, c.last_message_time,
                       u.name AS partner_name
                FROM chats c
                LEFT JOIN producers u ON u.id = c.producer_id
                WHERE c.collector_id = $1
                ORDER BY CASE WHEN c.last_message_time IS NULL THEN 1 ELSE 0 END,
                         c.last_message_time DESC, c.id DESC
                "#
            }
        };

        let chats = sqlx::query_as::<_, ChatSummary>(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(chats)
    }

    /// 打开会话，每对生产者与回收者只保留一个
    ///
    /// 依赖 `(producer_id, collector_id)` 唯一约束，并发打开同一会话时返回同一个 ID
    pub async fn open_chat(&self, producer_id: i64, collector_id: i64) -> Result<i64> {
        sqlx::query(
            r#"
            INSERT INTO chats (producer_id, collector_id) VALUES ($1, $2)
            ON CONFLICT (producer_id, collector_id) DO NOTHING
            "#,
        )
        .bind(producer_id)
        .bind(collector_id)
        .execute(&self.pool)
        .await?;

        let id = sqlx::query_scalar(
            "SELECT id FROM chats WHERE producer_id = $1 AND collector_id = $2",
        )
        .bind(producer_id)
        .bind(collector_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn get_chat(&self, id: i64) -> Result<Option<Chat>> {
        let chat = sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, producer_id, collector_id, last_message, last_message_time
            FROM chats
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(chat)
    }

    /// 会话消息，按时间正序
    pub async fn list_messages(&self, chat_id: i64) -> Result<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, chat_id, sender_role, content, timestamp, is_read
            FROM messages
            WHERE chat_id = $1
            ORDER BY timestamp ASC, id ASC
            "#,
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Message::try_from(row).map_err(MarketplaceError::corrupt_row))
            .collect()
    }

    /// 发送消息并刷新会话摘要
    pub async fn send_message(&self, chat_id: i64, sender_role: Role, content: String) -> Result<i64> {
        let now = timestamp_now();
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO messages (chat_id, sender_role, content, timestamp, is_read)
            VALUES ($1, $2, $3, $4, 0)
            RETURNING id
            "#,
        )
        .bind(chat_id)
        .bind(sender_role.as_str())
        .bind(content.clone())
        .bind(now.clone())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE chats SET last_message = $1, last_message_time = $2 WHERE id = $3")
            .bind(content)
            .bind(now)
            .bind(chat_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(id)
    }
}

#[async_trait]
impl ChatRepositoryTrait for ChatRepository {
    async fn list_chats(&self, role: Role, user_id: i64) -> Result<Vec<ChatSummary>> {
        self.list_chats(role, user_id).await
    }

    async fn open_chat(&self, producer_id: i64, collector_id: i64) -> Result<i64> {
        self.open_chat(producer_id, collector_id).await
    }

    async fn get_chat(&self, id: i64) -> Result<Option<Chat>> {
        self.get_chat(id).await
    }

    async fn list_messages(&self, chat_id: i64) -> Result<Vec<Message>> {
        self.list_messages(chat_id).await
    }

    async fn send_message(&self, chat_id: i64, sender_role: Role, content: String) -> Result<i64> {
        self.send_message(chat_id, sender_role, content).await
    }
}
