//! 通知仓储
//!
//! 生产者通知与回收者通知分表存储

use async_trait::async_trait;
use sqlx::AnyPool;

use super::traits::NotificationRepositoryTrait;
use crate::error::Result;
use crate::models::{NewNotification, Notification, NotificationRow, Role};
use greentech_shared::database::timestamp_now;

/// 通知仓储
pub struct NotificationRepository {
    pool: AnyPool,
}

impl NotificationRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// 列出用户通知，最新的在前
    pub async fn list(&self, role: Role, user_id: i64) -> Result<Vec<Notification>> {
        let sql = match role {
            Role::Producer => {
                r#"
                SELECT id, producer_id AS user_id, title, message, type, is_read, created_at
                FROM producer_notifications
                WHERE producer_id = $1
                ORDER BY created_at DESC, id DESC
                "#
            }
            Role::Collector => {
                r#"
                SELECT id, collector_id AS user_id, title, message, type, is_read, created_at
                FROM collector_notifications
                WHERE collector_id = $1
                ORDER BY created_at DESC, id DESC
                "#
            }
        };

        let rows = sqlx::query_as::<_, NotificationRow>(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }

    pub async fn create(
        &self,
        role: Role,
        user_id: i64,
        notification: NewNotification,
    ) -> Result<i64> {
        let sql = match role {
            Role::Producer => {
                r#"
                INSERT INTO producer_notifications (producer_id, title, message, type, is_read, created_at)
                VALUES ($1, $2, $3, $4, 0, $5)
                RETURNING id
                "#
            }
            Role::Collector => {
                r#"
                INSERT INTO collector_notifications (collector_id, title, message, type, is_read, created_at)
                VALUES ($1, $2, $3, $4, 0, $5)
                RETURNING id
                "#
            }
        };

        let id: i64 = sqlx::query_scalar(sql)
            .bind(user_id)
            .bind(notification.title)
            .bind(notification.message)
            .bind(notification.kind)
            .bind(timestamp_now())
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    pub async fn mark_read(&self, role: Role, id: i64) -> Result<u64> {
        let sql = match role {
            Role::Producer => "UPDATE producer_notifications SET is_read = 1 WHERE id = $1",
            Role::Collector => "UPDATE collector_notifications SET is_read = 1 WHERE id = $1",
        };

        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    async fn list(&self, role: Role, user_id: i64) -> Result<Vec<Notification>> {
        self.list(role, user_id).await
    }

    async fn create(&self, role: Role, user_id: i64, notification: NewNotification) -> Result<i64> {
        self.create(role, user_id, notification).await
    }

    async fn mark_read(&self, role: Role, id: i64) -> Result<u64> {
        self.mark_read(role, id).await
    }
}
