//! HTTP 请求处理器
//!
//! 处理器只负责参数提取与响应组装，业务逻辑在服务层

pub mod address;
pub mod auth;
pub mod chat;
pub mod gamification;
pub mod health;
pub mod history;
pub mod item;
pub mod notification;
pub mod user;
