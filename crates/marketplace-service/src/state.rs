//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use greentech_shared::{config::AppConfig, database::Database};

use crate::models::RewardPolicy;
use crate::repository::{
    AddressRepository, ChatRepository, ItemRepository, NotificationRepository, UserRepository,
    ZoneRepository,
};
use crate::service::{
    AccountService, AuthService, ChatService, GamificationService, ItemService, LocationService,
};

/// Axum 应用共享状态
///
/// 仓储共享同一个连接池，服务通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub service_name: String,
    pub auth: Arc<AuthService>,
    pub accounts: Arc<AccountService>,
    pub items: Arc<ItemService>,
    pub locations: Arc<LocationService>,
    pub chats: Arc<ChatService>,
    pub gamification: Arc<GamificationService>,
}

impl AppState {
    /// 基于连接池与配置组装仓储和服务
    pub fn new(db: Database, config: &AppConfig) -> Self {
        let pool = db.pool().clone();

        let users = Arc::new(UserRepository::new(pool.clone()));
        let items = Arc::new(ItemRepository::new(pool.clone()));
        let notifications = Arc::new(NotificationRepository::new(pool.clone()));
        let addresses = Arc::new(AddressRepository::new(pool.clone()));
        let zones = Arc::new(ZoneRepository::new(pool.clone()));
        let chats = Arc::new(ChatRepository::new(pool));

        Self {
            service_name: config.service_name.clone(),
            auth: Arc::new(AuthService::new(users.clone())),
            accounts: Arc::new(AccountService::new(users.clone(), notifications)),
            items: Arc::new(ItemService::new(
                items,
                users.clone(),
                RewardPolicy::from(&config.rewards),
            )),
            locations: Arc::new(LocationService::new(addresses, zones, users.clone())),
            chats: Arc::new(ChatService::new(chats, users.clone())),
            gamification: Arc::new(GamificationService::new(users)),
            db,
        }
    }
}
