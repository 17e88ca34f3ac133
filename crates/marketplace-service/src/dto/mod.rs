//! DTO 模块
//!
//! 包含所有请求和响应的数据传输对象

pub mod request;
pub mod response;

// 重新导出常用类型
pub use request::{
    CreateAddressRequest, CreateItemRequest, CreateZoneRequest, DeleteItemQuery, FeedQuery,
    GardenQuery, LeaderboardQuery, LoginRequest, OpenChatRequest, RoleQuery, SendMessageRequest,
    UpdateStatusRequest, UpdateUserRequest, UserQuery, UserRoleQuery, ZoneQuery, require_id,
    require_role,
};
pub use response::{HealthResponse, LoginResponse, MutationResponse, StatusUpdateResponse};
