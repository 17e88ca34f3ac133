//! 数据库仓储层
//!
//! 封装 SQL 细节，所有语句使用 `$N` 占位符，在 SQLite 与 Postgres 上通用。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - 物品状态迁移使用带守卫条件的 UPDATE
//! - 定义 trait 接口以支持 mock 测试

mod address_repo;
mod chat_repo;
mod item_repo;
mod notification_repo;
mod traits;
mod user_repo;

pub use address_repo::{AddressRepository, ZoneRepository};
pub use chat_repo::ChatRepository;
pub use item_repo::ItemRepository;
pub use notification_repo::NotificationRepository;
pub use traits::*;
pub use user_repo::UserRepository;
