//! 地址与服务区域模型

use serde::{Deserialize, Serialize};

/// 生产者常用地址
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub producer_id: i64,
    pub title: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub is_default: bool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AddressRow {
    pub id: i64,
    pub producer_id: i64,
    pub title: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub is_default: i64,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            producer_id: row.producer_id,
            title: row.title,
            address: row.address,
            lat: row.lat,
            lng: row.lng,
            is_default: row.is_default != 0,
        }
    }
}

/// 新地址，未提供坐标时按 0 存储
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub producer_id: i64,
    pub title: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

/// 回收者服务区域（圆形）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CollectorZone {
    pub id: i64,
    pub collector_id: i64,
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    pub radius_km: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewZone {
    pub collector_id: i64,
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    pub radius_km: f64,
}
