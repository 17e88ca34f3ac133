//! 物品模型与回收奖励计算

use greentech_shared::config::RewardConfig;
use serde::{Deserialize, Serialize};

use super::ItemStatus;

/// 物品
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: i64,
    pub producer_id: i64,
    /// 预约或回收后才有值
    pub collector_id: Option<i64>,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: Option<String>,
    pub weight_kg: f64,
    pub status: ItemStatus,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,
    pub created_at: String,
    pub collected_at: Option<String>,
}

/// 物品数据库行，状态以文本存储
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub producer_id: i64,
    pub collector_id: Option<i64>,
    #[sqlx(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: Option<String>,
    pub weight_kg: f64,
    pub status: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,
    pub created_at: String,
    pub collected_at: Option<String>,
}

impl TryFrom<ItemRow> for Item {
    type Error = String;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: row.status.parse()?,
            id: row.id,
            producer_id: row.producer_id,
            collector_id: row.collector_id,
            item_type: row.item_type,
            title: row.title,
            description: row.description,
            weight_kg: row.weight_kg,
            lat: row.lat,
            lng: row.lng,
            address: row.address,
            created_at: row.created_at,
            collected_at: row.collected_at,
        })
    }
}

/// 物品流（带生产者展示信息）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub item: Item,
    pub producer_name: Option<String>,
    pub producer_avatar: Option<String>,
    pub producer_level: Option<String>,
}

/// 物品流数据库行
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedItemRow {
    #[sqlx(flatten)]
    pub item: ItemRow,
    pub producer_name: Option<String>,
    pub producer_avatar: Option<String>,
    pub producer_level: Option<String>,
}

impl TryFrom<FeedItemRow> for FeedItem {
    type Error = String;

    fn try_from(row: FeedItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            item: Item::try_from(row.item)?,
            producer_name: row.producer_name,
            producer_avatar: row.producer_avatar,
            producer_level: row.producer_level,
        })
    }
}

/// 新物品
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub producer_id: i64,
    pub item_type: String,
    pub title: String,
    pub description: Option<String>,
    pub weight_kg: f64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,
}

/// 一次回收产生的奖励
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectionReward {
    /// 生产者获得的积分
    pub points: i64,
    /// 回收者获得的收益
    pub earnings: f64,
}

/// 奖励策略：按重量线性计算积分与收益
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardPolicy {
    pub points_per_kg: f64,
    pub earnings_per_kg: f64,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self::from(&RewardConfig::default())
    }
}

impl From<&RewardConfig> for RewardPolicy {
    fn from(config: &RewardConfig) -> Self {
        Self {
            points_per_kg: config.points_per_kg,
            earnings_per_kg: config.earnings_per_kg,
        }
    }
}

impl RewardPolicy {
    /// 积分四舍五入取整，收益保留原始精度
    pub fn reward_for(&self, weight_kg: f64) -> CollectionReward {
        let weight = weight_kg.max(0.0);
        CollectionReward {
            points: (weight * self.points_per_kg).round() as i64,
            earnings: weight * self.earnings_per_kg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_row(status: &str) -> ItemRow {
        ItemRow {
            id: 3,
            producer_id: 1,
            collector_id: None,
            item_type: "paper".to_string(),
            title: "Papelão Limpo".to_string(),
            description: None,
            weight_kg: 5.0,
            status: status.to_string(),
            lat: Some(-23.55),
            lng: Some(-46.63),
            address: None,
            created_at: "2026-10-18T10:00:00.000Z".to_string(),
            collected_at: None,
        }
    }

    #[test]
    fn test_default_reward() {
        let reward = RewardPolicy::default().reward_for(5.0);
        assert_eq!(reward.points, 50);
        assert!((reward.earnings - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reward_rounds_points() {
        let policy = RewardPolicy::default();
        assert_eq!(policy.reward_for(0.04).points, 0);
        assert_eq!(policy.reward_for(0.05).points, 1);
        assert_eq!(policy.reward_for(2.34).points, 23);
        assert_eq!(policy.reward_for(-1.0).points, 0);
    }

    #[test]
    fn test_row_conversion_rejects_unknown_status() {
        assert!(Item::try_from(sample_row("available")).is_ok());
        assert!(Item::try_from(sample_row("lost")).is_err());
    }

    #[test]
    fn test_item_serializes_type_field() {
        let item = Item::try_from(sample_row("reserved")).unwrap();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], json!("paper"));
        assert_eq!(value["status"], json!("reserved"));
        assert!(value.get("item_type").is_none());
    }

    #[test]
    fn test_feed_item_is_flat() {
        let feed = FeedItem {
            item: Item::try_from(sample_row("available")).unwrap(),
            producer_name: Some("João".to_string()),
            producer_avatar: None,
            producer_level: Some("Iniciante".to_string()),
        };
        let value = serde_json::to_value(&feed).unwrap();
        assert_eq!(value["id"], json!(3));
        assert_eq!(value["producer_name"], json!("João"));
    }
}
