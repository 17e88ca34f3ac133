//! 市场服务领域模型
//!
//! 包含用户、物品、通知、地址、聊天与游戏化实体定义

pub mod address;
pub mod chat;
pub mod enums;
pub mod gamification;
pub mod item;
pub mod notification;
pub mod user;

// 重新导出常用类型
pub use address::{Address, AddressRow, CollectorZone, NewAddress, NewZone};
pub use chat::{Chat, ChatSummary, Message, MessageRow};
pub use enums::{ItemStatus, Role, WasteType};
pub use gamification::{
    GardenStage, GardenStatus, GuideEntry, LeaderboardEntry, RankedProducer, recycling_guide,
};
pub use item::{CollectionReward, FeedItem, FeedItemRow, Item, ItemRow, NewItem, RewardPolicy};
pub use notification::{NewNotification, Notification, NotificationRow, kinds as notification_kinds};
pub use user::{Collector, Credentials, LoginUser, Producer, ProfileUpdate, UserProfile};
