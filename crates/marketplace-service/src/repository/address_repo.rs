//! 地址与服务区域仓储

use async_trait::async_trait;
use sqlx::AnyPool;

use super::traits::{AddressRepositoryTrait, ZoneRepositoryTrait};
use crate::error::Result;
use crate::models::{Address, AddressRow, CollectorZone, NewAddress, NewZone};

/// 生产者地址仓储
pub struct AddressRepository {
    pool: AnyPool,
}

impl AddressRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, producer_id: i64) -> Result<Vec<Address>> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, producer_id, title, address, lat, lng, is_default
            FROM producer_addresses
            WHERE producer_id = $1
            ORDER BY is_default DESC, id ASC
            "#,
        )
        .bind(producer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    pub async fn create(&self, address: NewAddress) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO producer_addresses (producer_id, title, address, lat, lng, is_default)
            VALUES ($1, $2, $3, $4, $5, 0)
            RETURNING id
            "#,
        )
        .bind(address.producer_id)
        .bind(address.title)
        .bind(address.address)
        .bind(address.lat)
        .bind(address.lng)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM producer_addresses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl AddressRepositoryTrait for AddressRepository {
    async fn list(&self, producer_id: i64) -> Result<Vec<Address>> {
        self.list(producer_id).await
    }

    async fn create(&self, address: NewAddress) -> Result<i64> {
        self.create(address).await
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        self.delete(id).await
    }
}

/// 回收者服务区域仓储
pub struct ZoneRepository {
    pool: AnyPool,
}

impl ZoneRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, collector_id: i64) -> Result<Vec<CollectorZone>> {
        let zones = sqlx::query_as::<_, CollectorZone>(
            r#"
            SELECT id, collector_id, title, lat, lng, radius_km
            FROM collector_zones
            WHERE collector_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(collector_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(zones)
    }

    pub async fn create(&self, zone: NewZone) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO collector_zones (collector_id, title, lat, lng, radius_km)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(zone.collector_id)
        .bind(zone.title)
        .bind(zone.lat)
        .bind(zone.lng)
        .bind(zone.radius_km)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM collector_zones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ZoneRepositoryTrait for ZoneRepository {
    async fn list(&self, collector_id: i64) -> Result<Vec<CollectorZone>> {
        self.list(collector_id).await
    }

    async fn create(&self, zone: NewZone) -> Result<i64> {
        self.create(zone).await
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        self.delete(id).await
    }
}
