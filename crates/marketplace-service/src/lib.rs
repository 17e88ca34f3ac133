//! 可回收物交易市场服务
//!
//! 连接废品投放者（生产者）与回收者：生产者发布可回收物品，
//! 回收者浏览、预约并完成回收，双方累计积分或收益。
//!
//! ## 核心功能
//!
//! - **物品市场**：发布、浏览、删除物品，预约 / 释放 / 回收状态流转
//! - **回收结算**：回收时在同一事务内累计生产者积分与回收者收益，并通知生产者
//! - **账户**：登录、资料维护、站内通知、地址与服务区域
//! - **聊天**：生产者与回收者一对一会话
//! - **游戏化**：花园成长、积分排行榜、回收指南
//!
//! ## 模块结构
//!
//! - `models`: 领域模型
//! - `repository`: 数据访问（sqlx Any 驱动，兼容 SQLite 与 Postgres）
//! - `service`: 业务逻辑
//! - `dto`: 请求和响应的数据传输对象
//! - `handlers` / `routes` / `extract`: HTTP 层
//! - `schema` / `seed`: 数据库迁移与演示数据

pub mod auth;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod seed;
pub mod service;
pub mod state;

// 重新导出核心类型
pub use error::{MarketplaceError, Result};
pub use models::{ItemStatus, Role, WasteType};
pub use state::AppState;
