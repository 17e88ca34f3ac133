//! 物品服务
//!
//! 处理物品发布、删除、状态流转与历史查询，包括：
//! - 发布前的参数校验与生产者存在性检查
//! - 删除时的归属与状态检查
//! - 预约 / 释放 / 回收三种状态迁移及其冲突诊断
//! - 回收奖励计算
//!
//! ## 状态流转
//!
//! available -> reserved -> collected，reserved 可释放回 available

use std::sync::Arc;

use tracing::{info, instrument, warn};
use validator::Validate;

use greentech_shared::database::timestamp_now;
use greentech_shared::observability::metrics;

use crate::dto::CreateItemRequest;
use crate::error::{MarketplaceError, Result};
use crate::models::{CollectionReward, FeedItem, Item, ItemStatus, NewItem, RewardPolicy, Role};
use crate::repository::{ItemRepositoryTrait, UserRepositoryTrait};

/// 状态变更结果
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub status: ItemStatus,
    /// 仅回收时有值
    pub reward: Option<CollectionReward>,
}

pub struct ItemService<IR = crate::repository::ItemRepository, UR = crate::repository::UserRepository>
where
    IR: ItemRepositoryTrait,
    UR: UserRepositoryTrait,
{
    item_repo: Arc<IR>,
    user_repo: Arc<UR>,
    rewards: RewardPolicy,
}

impl<IR, UR> ItemService<IR, UR>
where
    IR: ItemRepositoryTrait,
    UR: UserRepositoryTrait,
{
    pub fn new(item_repo: Arc<IR>, user_repo: Arc<UR>, rewards: RewardPolicy) -> Self {
        Self {
            item_repo,
            user_repo,
            rewards,
        }
    }

    /// 物品流：可预约物品 + 该回收者已预约的物品，最新的在前
    pub async fn feed(&self, collector_id: Option<i64>) -> Result<Vec<FeedItem>> {
        self.item_repo.list_feed(collector_id).await
    }

    #[instrument(skip(self, request), fields(producer_id = request.producer_id))]
    pub async fn post_item(&self, mut request: CreateItemRequest) -> Result<i64> {
        request.normalize();
        request.validate()?;

        if self.user_repo.get_producer(request.producer_id).await?.is_none() {
            return Err(MarketplaceError::UserNotFound(request.producer_id));
        }

        let item_type = request.item_type.clone();
        let id = self
            .item_repo
            .create_item(NewItem {
                producer_id: request.producer_id,
                item_type: request.item_type,
                title: request.title,
                description: request.description,
                weight_kg: request.weight_kg,
                lat: request.lat,
                lng: request.lng,
                address: request.address,
            })
            .await?;

        metrics::record_item_posted(&item_type);
        info!(item_id = id, item_type = %item_type, "物品发布成功");

        Ok(id)
    }

    /// 删除物品
    ///
    /// 提供 `producer_id` 时校验归属；已回收的物品保留作为历史记录
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64, producer_id: Option<i64>) -> Result<u64> {
        let item = self
            .item_repo
            .get_item(id)
            .await?
            .ok_or(MarketplaceError::ItemNotFound(id))?;

        if let Some(producer_id) = producer_id {
            if item.producer_id != producer_id {
                return Err(MarketplaceError::Forbidden(format!(
                    "物品 {} 不属于生产者 {}",
                    id, producer_id
                )));
            }
        }

        if item.status.is_terminal() {
            return Err(MarketplaceError::ItemAlreadyCollected);
        }

        let changes = self.item_repo.delete_item(id).await?;
        info!(item_id = id, changes, "物品已删除");

        Ok(changes)
    }

    /// 更新物品状态
    ///
    /// 目标状态决定迁移动作：reserved 为预约，available 为释放，collected 为回收。
    /// 守卫条件不满足时重新读取物品以给出准确的错误。
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: i64,
        target: ItemStatus,
        collector_id: Option<i64>,
    ) -> Result<StatusChange> {
        let collector_id = collector_id
            .ok_or_else(|| MarketplaceError::Validation("缺少 collector_id".to_string()))?;

        if self.user_repo.get_collector(collector_id).await?.is_none() {
            return Err(MarketplaceError::UserNotFound(collector_id));
        }

        match target {
            ItemStatus::Reserved => {
                if !self.item_repo.reserve(id, collector_id).await? {
                    return Err(self.diagnose(id, collector_id, target).await);
                }
                metrics::record_item_reserved();
                info!(item_id = id, collector_id, "物品已预约");
                Ok(StatusChange {
                    status: target,
                    reward: None,
                })
            }
            ItemStatus::Available => {
                if !self.item_repo.release(id, collector_id).await? {
                    return Err(self.diagnose(id, collector_id, target).await);
                }
                info!(item_id = id, collector_id, "预约已释放");
                Ok(StatusChange {
                    status: target,
                    reward: None,
                })
            }
            ItemStatus::Collected => self.collect(id, collector_id).await,
        }
    }

    async fn collect(&self, id: i64, collector_id: i64) -> Result<StatusChange> {
        let item = self
            .item_repo
            .get_item(id)
            .await?
            .ok_or(MarketplaceError::ItemNotFound(id))?;
        Self::check_transition(&item, collector_id, ItemStatus::Collected)?;

        let reward = self.rewards.reward_for(item.weight_kg);
        let completed = self
            .item_repo
            .complete_collection(id, collector_id, timestamp_now(), reward)
            .await?;
        if !completed {
            // 读取与更新之间被其他请求抢先
            return Err(self.diagnose(id, collector_id, ItemStatus::Collected).await);
        }

        metrics::record_item_collected(item.weight_kg);
        info!(
            item_id = id,
            collector_id,
            points = reward.points,
            earnings = reward.earnings,
            "物品回收完成"
        );

        Ok(StatusChange {
            status: ItemStatus::Collected,
            reward: Some(reward),
        })
    }

    /// 根据物品当前状态判断迁移失败的原因
    fn check_transition(item: &Item, collector_id: i64, target: ItemStatus) -> Result<()> {
        if !item.status.can_transition_to(target) {
            return Err(MarketplaceError::InvalidTransition {
                from: item.status,
                to: target,
            });
        }
        if item.status == ItemStatus::Reserved && item.collector_id != Some(collector_id) {
            return Err(MarketplaceError::NotReservedByCollector);
        }
        Ok(())
    }

    async fn diagnose(&self, id: i64, collector_id: i64, target: ItemStatus) -> MarketplaceError {
        let item = match self.item_repo.get_item(id).await {
            Ok(Some(item)) => item,
            Ok(None) => return MarketplaceError::ItemNotFound(id),
            Err(e) => return e,
        };

        warn!(
            item_id = id,
            collector_id,
            current = %item.status,
            target = %target,
            "状态迁移被拒绝"
        );

        match Self::check_transition(&item, collector_id, target) {
            Err(e) => e,
            // 重新读取时状态已满足条件，说明并发修改在两次读取之间发生
            Ok(()) => MarketplaceError::InvalidTransition {
                from: item.status,
                to: target,
            },
        }
    }

    /// 生产者：自己发布的物品；回收者：自己预约或回收的物品
    pub async fn history(&self, role: Role, user_id: i64) -> Result<Vec<Item>> {
        self.item_repo.history(role, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Collector, Producer};
    use crate::repository::{MockItemRepositoryTrait, MockUserRepositoryTrait};
    use mockall::predicate::{always, eq};

    fn item(status: ItemStatus, collector_id: Option<i64>) -> Item {
        Item {
            id: 10,
            producer_id: 1,
            collector_id,
            item_type: "paper".to_string(),
            title: "Papelão Limpo".to_string(),
            description: None,
            weight_kg: 5.0,
            status,
            lat: None,
            lng: None,
            address: None,
            created_at: "2026-10-18T10:00:00.000Z".to_string(),
            collected_at: None,
        }
    }

    fn collector_repo() -> MockUserRepositoryTrait {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_get_collector().returning(|id| {
            Ok(Some(Collector {
                id,
                email: "collector@test.com".to_string(),
                name: "Maria Coletora".to_string(),
                phone: None,
                earnings: 0.0,
                collections_count: 0,
                vehicle_type: None,
                rating: 5.0,
                avatar_url: None,
            }))
        });
        repo
    }

    fn service(
        items: MockItemRepositoryTrait,
        users: MockUserRepositoryTrait,
    ) -> ItemService<MockItemRepositoryTrait, MockUserRepositoryTrait> {
        ItemService::new(Arc::new(items), Arc::new(users), RewardPolicy::default())
    }

    fn create_request() -> CreateItemRequest {
        CreateItemRequest {
            item_type: "glass".to_string(),
            title: "Garrafas de Vidro".to_string(),
            description: Some("20 garrafas de cerveja".to_string()),
            weight_kg: 8.0,
            lat: Some(-23.555),
            lng: Some(-46.635),
            address: Some("Av. Paulista, 1000".to_string()),
            producer_id: 1,
        }
    }

    #[tokio::test]
    async fn test_post_item() {
        let mut users = MockUserRepositoryTrait::new();
        users.expect_get_producer().with(eq(1)).returning(|id| {
            Ok(Some(Producer {
                id,
                email: "producer@test.com".to_string(),
                name: "João".to_string(),
                phone: None,
                points: 0,
                weight_recycled: 0.0,
                level: "Iniciante".to_string(),
                avatar_url: None,
            }))
        });
        let mut items = MockItemRepositoryTrait::new();
        items
            .expect_create_item()
            .withf(|new| new.item_type == "glass" && new.weight_kg == 8.0)
            .returning(|_| Ok(42));

        let id = service(items, users).post_item(create_request()).await.unwrap();
        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn test_post_item_rejects_invalid_weight() {
        let mut items = MockItemRepositoryTrait::new();
        items.expect_create_item().never();

        let mut request = create_request();
        request.weight_kg = -1.0;
        let err = service(items, MockUserRepositoryTrait::new())
            .post_item(request)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_post_item_rejects_blank_title() {
        let mut users = MockUserRepositoryTrait::new();
        users.expect_get_producer().never();
        let mut items = MockItemRepositoryTrait::new();
        items.expect_create_item().never();

        let mut request = create_request();
        request.title = "   ".to_string();
        let err = service(items, users).post_item(request).await.unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_post_item_unknown_producer() {
        let mut users = MockUserRepositoryTrait::new();
        users.expect_get_producer().returning(|_| Ok(None));

        let err = service(MockItemRepositoryTrait::new(), users)
            .post_item(create_request())
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::UserNotFound(1)));
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let mut items = MockItemRepositoryTrait::new();
        items
            .expect_get_item()
            .with(eq(10))
            .returning(|_| Ok(Some(item(ItemStatus::Collected, Some(2)))));
        items.expect_get_item().with(eq(11)).returning(|_| Ok(None));
        items.expect_delete_item().never();
        let service = service(items, MockUserRepositoryTrait::new());

        assert!(matches!(
            service.delete_item(10, Some(99)).await,
            Err(MarketplaceError::Forbidden(_))
        ));
        assert!(matches!(
            service.delete_item(10, Some(1)).await,
            Err(MarketplaceError::ItemAlreadyCollected)
        ));
        assert!(matches!(
            service.delete_item(11, None).await,
            Err(MarketplaceError::ItemNotFound(11))
        ));
    }

    #[tokio::test]
    async fn test_delete_available_item() {
        let mut items = MockItemRepositoryTrait::new();
        items
            .expect_get_item()
            .returning(|_| Ok(Some(item(ItemStatus::Available, None))));
        items.expect_delete_item().with(eq(10)).returning(|_| Ok(1));

        let changes = service(items, MockUserRepositoryTrait::new())
            .delete_item(10, Some(1))
            .await
            .unwrap();
        assert_eq!(changes, 1);
    }

    #[tokio::test]
    async fn test_update_status_requires_collector() {
        let err = service(MockItemRepositoryTrait::new(), MockUserRepositoryTrait::new())
            .update_status(10, ItemStatus::Reserved, None)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_reserve() {
        let mut items = MockItemRepositoryTrait::new();
        items
            .expect_reserve()
            .with(eq(10), eq(2))
            .returning(|_, _| Ok(true));

        let change = service(items, collector_repo())
            .update_status(10, ItemStatus::Reserved, Some(2))
            .await
            .unwrap();
        assert_eq!(change.status, ItemStatus::Reserved);
        assert!(change.reward.is_none());
    }

    #[tokio::test]
    async fn test_reserve_already_reserved_by_other() {
        let mut items = MockItemRepositoryTrait::new();
        items.expect_reserve().returning(|_, _| Ok(false));
        items
            .expect_get_item()
            .returning(|_| Ok(Some(item(ItemStatus::Reserved, Some(3)))));

        let err = service(items, collector_repo())
            .update_status(10, ItemStatus::Reserved, Some(2))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MarketplaceError::InvalidTransition {
                from: ItemStatus::Reserved,
                to: ItemStatus::Reserved
            }
        ));
    }

    #[tokio::test]
    async fn test_reserve_missing_item() {
        let mut items = MockItemRepositoryTrait::new();
        items.expect_reserve().returning(|_, _| Ok(false));
        items.expect_get_item().returning(|_| Ok(None));

        let err = service(items, collector_repo())
            .update_status(10, ItemStatus::Reserved, Some(2))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::ItemNotFound(10)));
    }

    #[tokio::test]
    async fn test_release_by_other_collector() {
        let mut items = MockItemRepositoryTrait::new();
        items.expect_release().returning(|_, _| Ok(false));
        items
            .expect_get_item()
            .returning(|_| Ok(Some(item(ItemStatus::Reserved, Some(3)))));

        let err = service(items, collector_repo())
            .update_status(10, ItemStatus::Available, Some(2))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::NotReservedByCollector));
    }

    #[tokio::test]
    async fn test_collect_computes_reward() {
        let mut items = MockItemRepositoryTrait::new();
        items
            .expect_get_item()
            .returning(|_| Ok(Some(item(ItemStatus::Reserved, Some(2)))));
        items
            .expect_complete_collection()
            .with(
                eq(10),
                eq(2),
                always(),
                eq(CollectionReward {
                    points: 50,
                    earnings: 2.5,
                }),
            )
            .returning(|_, _, _, _| Ok(true));

        let change = service(items, collector_repo())
            .update_status(10, ItemStatus::Collected, Some(2))
            .await
            .unwrap();
        assert_eq!(change.status, ItemStatus::Collected);
        assert_eq!(change.reward.unwrap().points, 50);
    }

    #[tokio::test]
    async fn test_collect_from_available_is_rejected() {
        let mut items = MockItemRepositoryTrait::new();
        items
            .expect_get_item()
            .returning(|_| Ok(Some(item(ItemStatus::Available, None))));
        items.expect_complete_collection().never();

        let err = service(items, collector_repo())
            .update_status(10, ItemStatus::Collected, Some(2))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MarketplaceError::InvalidTransition {
                from: ItemStatus::Available,
                to: ItemStatus::Collected
            }
        ));
    }

    #[tokio::test]
    async fn test_collect_twice_is_rejected() {
        let mut items = MockItemRepositoryTrait::new();
        items
            .expect_get_item()
            .returning(|_| Ok(Some(item(ItemStatus::Collected, Some(2)))));
        items.expect_complete_collection().never();

        let err = service(items, collector_repo())
            .update_status(10, ItemStatus::Collected, Some(2))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unknown_collector() {
        let mut users = MockUserRepositoryTrait::new();
        users.expect_get_collector().returning(|_| Ok(None));

        let err = service(MockItemRepositoryTrait::new(), users)
            .update_status(10, ItemStatus::Reserved, Some(77))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::UserNotFound(77)));
    }
}
