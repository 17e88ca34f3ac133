//! 市场服务枚举类型定义
//!
//! 数据库中统一以小写文本存储，JSON 中同样使用小写

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 用户角色
///
/// 生产者与回收者分表存储，角色决定查询哪张表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 生产者 - 发布可回收物品
    Producer,
    /// 回收者 - 预约并回收物品
    Collector,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Producer => "producer",
            Self::Collector => "collector",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "producer" => Ok(Self::Producer),
            "collector" => Ok(Self::Collector),
            other => Err(format!("未知角色: {}", other)),
        }
    }
}

/// 物品状态
///
/// 状态机：available → reserved → collected，预约可释放回 available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// 可预约
    Available,
    /// 已被某个回收者预约
    Reserved,
    /// 已回收（终态）
    Collected,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Collected => "collected",
        }
    }

    /// 是否允许从当前状态迁移到目标状态
    pub fn can_transition_to(&self, next: ItemStatus) -> bool {
        matches!(
            (self, next),
            (Self::Available, Self::Reserved)
                | (Self::Reserved, Self::Available)
                | (Self::Reserved, Self::Collected)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Collected)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "reserved" => Ok(Self::Reserved),
            "collected" => Ok(Self::Collected),
            other => Err(format!("未知物品状态: {}", other)),
        }
    }
}

/// 可回收物类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteType {
    Paper,
    Plastic,
    Glass,
    Metal,
    Electronic,
    Organic,
    Other,
}

impl WasteType {
    pub const ALL: [WasteType; 7] = [
        Self::Paper,
        Self::Plastic,
        Self::Glass,
        Self::Metal,
        Self::Electronic,
        Self::Organic,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Plastic => "plastic",
            Self::Glass => "glass",
            Self::Metal => "metal",
            Self::Electronic => "electronic",
            Self::Organic => "organic",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("未知物品类型: {}", s))
    }
}
