//! 仓储 Trait 定义
//!
//! 服务层依赖这些接口而非具体实现，便于 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Address, Chat, ChatSummary, CollectionReward, Collector, CollectorZone, Credentials, FeedItem,
    Item, Message, NewAddress, NewItem, NewNotification, NewZone, Notification, Producer,
    ProfileUpdate, RankedProducer, Role,
};

/// 用户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn find_credentials(&self, role: Role, email: &str) -> Result<Option<Credentials>>;
    async fn get_producer(&self, id: i64) -> Result<Option<Producer>>;
    async fn get_collector(&self, id: i64) -> Result<Option<Collector>>;
    /// 返回受影响行数
    async fn update_profile(&self, role: Role, id: i64, update: ProfileUpdate) -> Result<u64>;

    // 排行榜
    async fn top_producers(&self, limit: i64) -> Result<Vec<RankedProducer>>;
    /// 积分严格高于给定值的生产者数量 + 1
    /// 按榜单相同的排序（积分降序、ID 升序）计算名次
    async fn producer_rank(&self, id: i64, points: i64) -> Result<i64>;
}

/// 物品仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepositoryTrait: Send + Sync {
    async fn list_feed(&self, collector_id: Option<i64>) -> Result<Vec<FeedItem>>;
    async fn get_item(&self, id: i64) -> Result<Option<Item>>;
    async fn create_item(&self, item: NewItem) -> Result<i64>;
    async fn delete_item(&self, id: i64) -> Result<u64>;

    // 状态迁移，守卫条件不满足时返回 false
    async fn reserve(&self, id: i64, collector_id: i64) -> Result<bool>;
    async fn release(&self, id: i64, collector_id: i64) -> Result<bool>;
    async fn complete_collection(
        &self,
        id: i64,
        collector_id: i64,
        collected_at: String,
        reward: CollectionReward,
    ) -> Result<bool>;

    async fn history(&self, role: Role, user_id: i64) -> Result<Vec<Item>>;
}

/// 通知仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    async fn list(&self, role: Role, user_id: i64) -> Result<Vec<Notification>>;
    async fn create(&self, role: Role, user_id: i64, notification: NewNotification) -> Result<i64>;
    async fn mark_read(&self, role: Role, id: i64) -> Result<u64>;
}

/// 生产者地址仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepositoryTrait: Send + Sync {
    async fn list(&self, producer_id: i64) -> Result<Vec<Address>>;
    async fn create(&self, address: NewAddress) -> Result<i64>;
    async fn delete(&self, id: i64) -> Result<u64>;
}

/// 回收者服务区域仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ZoneRepositoryTrait: Send + Sync {
    async fn list(&self, collector_id: i64) -> Result<Vec<CollectorZone>>;
    async fn create(&self, zone: NewZone) -> Result<i64>;
    async fn delete(&self, id: i64) -> Result<u64>;
}

/// 聊天仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepositoryTrait: Send + Sync {
    async fn list_chats(&self, role: Role, user_id: i64) -> Result<Vec<ChatSummary>>;
    /// 已存在则返回原会话 ID
    async fn open_chat(&self, producer_id: i64, collector_id: i64) -> Result<i64>;
    async fn get_chat(&self, id: i64) -> Result<Option<Chat>>;
    async fn list_messages(&self, chat_id: i64) -> Result<Vec<Message>>;
    async fn send_message(&self, chat_id: i64, sender_role: Role, content: String) -> Result<i64>;
}
