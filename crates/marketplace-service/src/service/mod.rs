//! 业务服务层
//!
//! 服务对仓储 trait 泛型，生产环境使用 sqlx 实现，测试使用 mockall 生成的 mock

mod account_service;
mod auth_service;
mod chat_service;
mod gamification_service;
mod item_service;
mod location_service;

pub use account_service::AccountService;
pub use auth_service::AuthService;
pub use chat_service::ChatService;
pub use gamification_service::{
    DEFAULT_LEADERBOARD_LIMIT, GamificationService, MAX_LEADERBOARD_LIMIT,
};
pub use item_service::{ItemService, StatusChange};
pub use location_service::LocationService;
