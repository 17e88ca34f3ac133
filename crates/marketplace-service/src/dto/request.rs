//! 请求 DTO 定义
//!
//! 字段名与现有客户端保持一致：请求体使用 snake_case，
//! 查询参数沿用 `userId` / `collectorId` / `producerId`

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::{MarketplaceError, Result};
use crate::models::{ItemStatus, Role, WasteType};

/// 解析必填的角色参数
pub fn require_role(role: Option<&str>) -> Result<Role> {
    let raw = role
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| MarketplaceError::Validation("缺少 role 参数".to_string()))?;
    raw.parse().map_err(MarketplaceError::Validation)
}

/// 解析必填的 ID 参数
pub fn require_id(id: Option<i64>, name: &str) -> Result<i64> {
    id.ok_or_else(|| MarketplaceError::Validation(format!("缺少 {} 参数", name)))
}

fn validate_waste_type(value: &str) -> std::result::Result<(), ValidationError> {
    value
        .parse::<WasteType>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("waste_type").with_message("不支持的物品类型".into()))
}

fn validate_not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("不能只包含空白字符".into()));
    }
    Ok(())
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// 登录请求
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255, message = "邮箱不能为空"))]
    pub email: String,
    #[validate(length(min = 1, message = "密码不能为空"))]
    pub password: String,
}

/// 用户查询参数
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub id: Option<i64>,
    pub role: Option<String>,
}

/// 更新用户资料请求
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub id: Option<i64>,
    pub role: Option<String>,
    #[validate(length(min = 1, max = 100, message = "姓名长度必须在1-100个字符之间"))]
    pub name: Option<String>,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: Option<String>,
    #[validate(length(max = 30, message = "电话长度不能超过30个字符"))]
    pub phone: Option<String>,
}

impl UpdateUserRequest {
    /// 去除首尾空白，须在 `validate()` 之前调用
    pub fn normalize(&mut self) {
        for field in [&mut self.name, &mut self.email, &mut self.phone]
            .into_iter()
            .flatten()
        {
            trim_in_place(field);
        }
    }
}

/// 物品流查询参数
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    #[serde(rename = "collectorId")]
    pub collector_id: Option<i64>,
}

/// 发布物品请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_waste_type"))]
    pub item_type: String,
    #[validate(length(min = 1, max = 120, message = "标题长度必须在1-120个字符之间"))]
    pub title: String,
    #[validate(length(max = 1000, message = "描述不能超过1000个字符"))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, max = 10000.0, message = "重量必须大于0且不超过10000千克"))]
    pub weight_kg: f64,
    #[validate(range(min = -90.0, max = 90.0, message = "纬度必须在-90到90之间"))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "经度必须在-180到180之间"))]
    pub lng: Option<f64>,
    #[validate(length(max = 255, message = "地址不能超过255个字符"))]
    pub address: Option<String>,
    pub producer_id: i64,
}

impl CreateItemRequest {
    /// 去除标题首尾空白，须在 `validate()` 之前调用
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.title);
    }
}

/// 删除物品查询参数
#[derive(Debug, Default, Deserialize)]
pub struct DeleteItemQuery {
    #[serde(rename = "producerId")]
    pub producer_id: Option<i64>,
}

/// 更新物品状态请求
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ItemStatus,
    pub collector_id: Option<i64>,
}

/// 按用户与角色查询（历史、通知、地址、会话）
#[derive(Debug, Default, Deserialize)]
pub struct UserRoleQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    pub role: Option<String>,
}

/// 仅角色参数
#[derive(Debug, Default, Deserialize)]
pub struct RoleQuery {
    pub role: Option<String>,
}

/// 新增地址请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAddressRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    pub role: Option<String>,
    #[validate(
        length(min = 1, max = 60, message = "地址名称长度必须在1-60个字符之间"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,
    #[validate(
        length(min = 1, max = 255, message = "地址长度必须在1-255个字符之间"),
        custom(function = "validate_not_blank")
    )]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0, message = "纬度必须在-90到90之间"))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "经度必须在-180到180之间"))]
    pub lng: Option<f64>,
}

/// 服务区域查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ZoneQuery {
    #[serde(rename = "collectorId")]
    pub collector_id: Option<i64>,
}

/// 新增服务区域请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateZoneRequest {
    pub collector_id: i64,
    #[validate(
        length(min = 1, max = 60, message = "区域名称长度必须在1-60个字符之间"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,
    #[validate(range(min = -90.0, max = 90.0, message = "纬度必须在-90到90之间"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "经度必须在-180到180之间"))]
    pub lng: f64,
    #[validate(range(exclusive_min = 0.0, max = 100.0, message = "半径必须大于0且不超过100公里"))]
    pub radius_km: f64,
}

/// 打开会话请求
#[derive(Debug, Deserialize)]
pub struct OpenChatRequest {
    pub producer_id: i64,
    pub collector_id: i64,
}

/// 发送消息请求
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub sender_role: Role,
    #[validate(
        length(min = 1, max = 2000, message = "消息长度必须在1-2000个字符之间"),
        custom(function = "validate_not_blank")
    )]
    pub content: String,
}

/// 花园查询参数
#[derive(Debug, Default, Deserialize)]
pub struct GardenQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

/// 排行榜查询参数
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item_request() -> CreateItemRequest {
        serde_json::from_value(json!({
            "type": "paper",
            "title": "Papelão Limpo",
            "description": "Caixas de mudança desmontadas",
            "weight_kg": 5.0,
            "lat": -23.55,
            "lng": -46.63,
            "address": "Rua das Flores, 123",
            "producer_id": 1
        }))
        .unwrap()
    }

    #[test]
    fn test_require_role() {
        assert_eq!(require_role(Some("producer")).unwrap(), Role::Producer);
        assert!(matches!(
            require_role(None),
            Err(MarketplaceError::Validation(_))
        ));
        assert!(matches!(
            require_role(Some("admin")),
            Err(MarketplaceError::Validation(_))
        ));
    }

    #[test]
    fn test_item_request_valid() {
        assert!(item_request().validate().is_ok());
    }

    #[test]
    fn test_item_request_rejects_bad_values() {
        let mut req = item_request();
        req.weight_kg = 0.0;
        assert!(req.validate().is_err());

        let mut req = item_request();
        req.title = String::new();
        assert!(req.validate().is_err());

        let mut req = item_request();
        req.lat = Some(91.0);
        assert!(req.validate().is_err());

        let mut req = item_request();
        req.item_type = "furniture".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_blank_title_is_rejected_after_normalize() {
        let mut req = item_request();
        req.title = "   \t ".to_string();
        req.normalize();
        assert!(req.title.is_empty());
        assert!(req.validate().is_err());

        let mut req = item_request();
        req.title = "  Garrafas PET  ".to_string();
        req.normalize();
        assert_eq!(req.title, "Garrafas PET");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_profile_update_normalize() {
        let mut req: UpdateUserRequest = serde_json::from_value(json!({
            "name": "   ",
            "email": "  joao@email.com  "
        }))
        .unwrap();
        req.normalize();
        assert_eq!(req.email.as_deref(), Some("joao@email.com"));
        assert!(req.validate().is_err());

        req.name = Some(" João ".to_string());
        req.normalize();
        assert_eq!(req.name.as_deref(), Some("João"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_blank_message_and_address_rejected() {
        let msg: SendMessageRequest =
            serde_json::from_value(json!({"sender_role": "producer", "content": "  \n "}))
                .unwrap();
        assert!(msg.validate().is_err());

        let addr: CreateAddressRequest = serde_json::from_value(json!({
            "title": "Casa",
            "address": "   "
        }))
        .unwrap();
        assert!(addr.validate().is_err());
    }

    #[test]
    fn test_query_uses_camel_case_names() {
        let q: UserRoleQuery =
            serde_json::from_value(json!({"userId": 4, "role": "collector"})).unwrap();
        assert_eq!(q.user_id, Some(4));
        assert_eq!(q.role.as_deref(), Some("collector"));
    }
}
