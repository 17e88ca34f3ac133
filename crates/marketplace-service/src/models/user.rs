//! 用户模型
//!
//! 生产者与回收者分表存储，字段各不相同；密码哈希只在仓储层流转

use serde::{Deserialize, Serialize};

use super::Role;

/// 生产者（投放者）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Producer {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    /// 累计积分
    pub points: i64,
    /// 累计回收重量（千克）
    pub weight_recycled: f64,
    /// 称号，如 "Iniciante"
    pub level: String,
    pub avatar_url: Option<String>,
}

/// 回收者（拾荒者）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Collector {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    /// 累计收益（雷亚尔）
    pub earnings: f64,
    pub collections_count: i64,
    /// 运输工具：carroca / bike / truck
    pub vehicle_type: Option<String>,
    pub rating: f64,
    pub avatar_url: Option<String>,
}

/// 用户资料
///
/// JSON 中平铺字段并附带 `role` 标记
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum UserProfile {
    Producer(Producer),
    Collector(Collector),
}

impl UserProfile {
    pub fn id(&self) -> i64 {
        match self {
            Self::Producer(p) => p.id,
            Self::Collector(c) => c.id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Producer(_) => Role::Producer,
            Self::Collector(_) => Role::Collector,
        }
    }
}

/// 登录校验所需的最小字段
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credentials {
    pub id: i64,
    pub password_hash: String,
}

/// 登录成功后返回给客户端的用户摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<f64>,
    pub role: Role,
    pub avatar_url: Option<String>,
}

impl From<UserProfile> for LoginUser {
    fn from(profile: UserProfile) -> Self {
        match profile {
            UserProfile::Producer(p) => Self {
                id: p.id,
                name: p.name,
                email: p.email,
                points: Some(p.points),
                earnings: None,
                role: Role::Producer,
                avatar_url: p.avatar_url,
            },
            UserProfile::Collector(c) => Self {
                id: c.id,
                name: c.name,
                email: c.email,
                points: None,
                earnings: Some(c.earnings),
                role: Role::Collector,
                avatar_url: c.avatar_url,
            },
        }
    }
}

/// 资料更新，未提供的字段保持不变
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
