//! 物品仓储
//!
//! 状态迁移全部使用带守卫条件的 UPDATE，并发请求中只有一个能成功

use async_trait::async_trait;
use sqlx::AnyPool;
use tracing::debug;

use super::traits::ItemRepositoryTrait;
use crate::error::{MarketplaceError, Result};
use crate::models::{
    CollectionReward, FeedItem, FeedItemRow, Item, ItemRow, NewItem, NewNotification, Role,
};
use greentech_shared::database::timestamp_now;

const ITEM_COLUMNS: &str = "id, producer_id, collector_id, type, title, description, weight_kg, \
                            status, lat, lng, address, created_at, collected_at";

/// 物品仓储
pub struct ItemRepository {
    pool: AnyPool,
}

impl ItemRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    fn to_items(rows: Vec<ItemRow>) -> Result<Vec<Item>> {
        rows.into_iter()
            .map(|row| Item::try_from(row).map_err(MarketplaceError::corrupt_row))
            .collect()
    }

    /// 物品流：所有可预约物品，加上该回收者已预约的物品
    pub async fn list_feed(&self, collector_id: Option<i64>) -> Result<Vec<FeedItem>> {
        let rows = sqlx::query_as::<_, FeedItemRow>(
            r#"
            SELECT i.id, i.producer_id, i.collector_id, i.type, i.title, i.description,
                   i.weight_kg, i.status, i.lat, i.lng, i.address, i.created_at, i.collected_at,
                   p.name AS producer_name, p.avatar_url AS producer_avatar,
                   p.level AS producer_level
            FROM items i
            LEFT JOIN producers p ON p.id = i.producer_id
            WHERE i.status = 'available'
               OR (i.status = 'reserved' AND i.collector_id = $1)
            ORDER BY i.created_at DESC, i.id DESC
            "#,
        )
        .bind(collector_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| FeedItem::try_from(row).map_err(MarketplaceError::corrupt_row))
            .collect()
    }

    pub async fn get_item(&self, id: i64) -> Result<Option<Item>> {
        let sql = format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS);
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| Item::try_from(r).map_err(MarketplaceError::corrupt_row))
            .transpose()
    }

    /// 创建物品，初始状态为 available
    pub async fn create_item(&self, item: NewItem) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO items
                (producer_id, type, title, description, weight_kg, status, lat, lng, address, created_at)
            VALUES ($1, $2, $3, $4, $5, 'available', $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(item.producer_id)
        .bind(item.item_type)
        .bind(item.title)
        .bind(item.description)
        .bind(item.weight_kg)
        .bind(item.lat)
        .bind(item.lng)
        .bind(item.address)
        .bind(timestamp_now())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn delete_item(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // ==================== 状态迁移 ====================

    /// available → reserved
    pub async fn reserve(&self, id: i64, collector_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET status = 'reserved', collector_id = $1
            WHERE id = $2 AND status = 'available'
            "#,
        )
        .bind(collector_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// reserved → available，只有预约者本人可以释放
    pub async fn release(&self, id: i64, collector_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET status = 'available', collector_id = NULL
            WHERE id = $1 AND status = 'reserved' AND collector_id = $2
            "#,
        )
        .bind(id)
        .bind(collector_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// reserved → collected
    ///
    /// 同一事务内完成：物品状态、生产者积分与回收重量、回收者收益与次数、生产者通知。
    /// 任一步失败或守卫条件不满足时整体回滚。
    pub async fn complete_collection(
        &self,
        id: i64,
        collector_id: i64,
        collected_at: String,
        reward: CollectionReward,
    ) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE items
            SET status = 'collected', collected_at = $1
            WHERE id = $2 AND status = 'reserved' AND collector_id = $3
            "#,
        )
        .bind(collected_at.clone())
        .bind(id)
        .bind(collector_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() != 1 {
            tx.rollback().await?;
            debug!(item_id = id, collector_id, "collect guard rejected");
            return Ok(false);
        }

        let (producer_id, weight_kg): (i64, f64) =
            sqlx::query_as("SELECT producer_id, weight_kg FROM items WHERE id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        sqlx::query(
            r#"
            UPDATE producers
            SET points = points + $1, weight_recycled = weight_recycled + $2
            WHERE id = $3
            "#,
        )
        .bind(reward.points)
        .bind(weight_kg)
        .bind(producer_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE collectors
            SET earnings = earnings + $1, collections_count = collections_count + 1
            WHERE id = $2
            "#,
        )
        .bind(reward.earnings)
        .bind(collector_id)
        .execute(&mut *tx)
        .await?;

        let notification = NewNotification::collection_completed(reward.points);
        sqlx::query(
            r#"
            INSERT INTO producer_notifications (producer_id, title, message, type, is_read, created_at)
            VALUES ($1, $2, $3, $4, 0, $5)
            "#,
        )
        .bind(producer_id)
        .bind(notification.title)
        .bind(notification.message)
        .bind(notification.kind)
        .bind(collected_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(true)
    }

    /// 历史记录
    ///
    /// 生产者按发布时间倒序；回收者按回收时间倒序，尚未回收的预约排在最后
    pub async fn history(&self, role: Role, user_id: i64) -> Result<Vec<Item>> {
        let sql = match role {
            Role::Producer => format!(
                "SELECT {} FROM items WHERE producer_id = $1 ORDER BY created_at DESC, id DESC",
                ITEM_COLUMNS
            ),
            Role::Collector => format!(
                "SELECT {} FROM items WHERE collector_id = $1 \
                 ORDER BY CASE WHEN collected_at IS NULL THEN 1 ELSE 0 END, collected_at DESC, id DESC",
                ITEM_COLUMNS
            ),
        };

        let rows = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Self::to_items(rows)
    }
}

#[async_trait]
impl ItemRepositoryTrait for ItemRepository {
    async fn list_feed(&self, collector_id: Option<i64>) -> Result<Vec<FeedItem>> {
        self.list_feed(collector_id).await
    }

    async fn get_item(&self, id: i64) -> Result<Option<Item>> {
        self.get_item(id).await
    }

    async fn create_item(&self, item: NewItem) -> Result<i64> {
        self.create_item(item).await
    }

    async fn delete_item(&self, id: i64) -> Result<u64> {
        self.delete_item(id).await
    }

    async fn reserve(&self, id: i64, collector_id: i64) -> Result<bool> {
        self.reserve(id, collector_id).await
    }

    async fn release(&self, id: i64, collector_id: i64) -> Result<bool> {
        self.release(id, collector_id).await
    }

    async fn complete_collection(
        &self,
        id: i64,
        collector_id: i64,
        collected_at: String,
        reward: CollectionReward,
    ) -> Result<bool> {
        self.complete_collection(id, collector_id, collected_at, reward)
            .await
    }

    async fn history(&self, role: Role, user_id: i64) -> Result<Vec<Item>> {
        self.history(role, user_id).await
    }
}
