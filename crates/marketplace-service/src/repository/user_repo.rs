//! 用户仓储
//!
//! 生产者与回收者分表存储，按角色选择表

use async_trait::async_trait;
use sqlx::AnyPool;

use super::traits::UserRepositoryTrait;
use crate::error::{MarketplaceError, Result};
use crate::models::{Collector, Credentials, Producer, ProfileUpdate, RankedProducer, Role};

/// 用户仓储
pub struct UserRepository {
    pool: AnyPool,
}

impl UserRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// 按邮箱查询登录凭据
    pub async fn find_credentials(&self, role: Role, email: &str) -> Result<Option<Credentials>> {
        let sql = match role {
            Role::Producer => "SELECT id, password_hash FROM producers WHERE email = $1",
            Role::Collector => "SELECT id, password_hash FROM collectors WHERE email = $1",
        };

        let credentials = sqlx::query_as::<_, Credentials>(sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(credentials)
    }

    pub async fn get_producer(&self, id: i64) -> Result<Option<Producer>> {
        let producer = sqlx::query_as::<_, Producer>(
            r#"
            SELECT id, email, name, phone, points, weight_recycled, level, avatar_url
            FROM producers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(producer)
    }

    pub async fn get_collector(&self, id: i64) -> Result<Option<Collector>> {
        let collector = sqlx::query_as::<_, Collector>(
            r#"
            SELECT id, email, name, phone, earnings, collections_count, vehicle_type,
                   rating, avatar_url
            FROM collectors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(collector)
    }

    /// 更新资料，未提供的字段保持原值
    pub async fn update_profile(&self, role: Role, id: i64, update: ProfileUpdate) -> Result<u64> {
        let sql = match role {
            Role::Producer => {
                r#"
                UPDATE producers
                SET name = COALESCE($1, name), email = COALESCE($2, email), phone = COALESCE($3, phone)
                WHERE id = $4
                "#
            }
            Role::Collector => {
                r#"
                UPDATE collectors
                SET name = COALESCE($1, name), email = COALESCE($2, email), phone = COALESCE($3, phone)
                WHERE id = $4
                "#
            }
        };

        let result = sqlx::query(sql)
            .bind(update.name)
            .bind(update.email)
            .bind(update.phone)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    MarketplaceError::EmailAlreadyExists
                }
                other => MarketplaceError::Database(other),
            })?;

        Ok(result.rows_affected())
    }

    // ==================== 排行榜 ====================

    /// 积分最高的生产者，积分相同按 ID 升序
    pub async fn top_producers(&self, limit: i64) -> Result<Vec<RankedProducer>> {
        let rows = sqlx::query_as::<_, RankedProducer>(
            r#"
            SELECT id, name, points, avatar_url
            FROM producers
            ORDER BY points DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn producer_rank(&self, id: i64, points: i64) -> Result<i64> {
        let ahead: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM producers WHERE points > $1 OR (points = $2 AND id < $3)",
        )
        .bind(points)
        .bind(points)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ahead + 1)
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_credentials(&self, role: Role, email: &str) -> Result<Option<Credentials>> {
        self.find_credentials(role, email).await
    }

    async fn get_producer(&self, id: i64) -> Result<Option<Producer>> {
        self.get_producer(id).await
    }

    async fn get_collector(&self, id: i64) -> Result<Option<Collector>> {
        self.get_collector(id).await
    }

    async fn update_profile(&self, role: Role, id: i64, update: ProfileUpdate) -> Result<u64> {
        self.update_profile(role, id, update).await
    }

    async fn top_producers(&self, limit: i64) -> Result<Vec<RankedProducer>> {
        self.top_producers(limit).await
    }

    async fn producer_rank(&self, id: i64, points: i64) -> Result<i64> {
        self.producer_rank(id, points).await
    }
}
