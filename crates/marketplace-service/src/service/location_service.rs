//! 地点服务：生产者地址与回收者服务区域

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::dto::{CreateAddressRequest, CreateZoneRequest};
use crate::error::{MarketplaceError, Result};
use crate::models::{Address, CollectorZone, NewAddress, NewZone, Role};
use crate::repository::{AddressRepositoryTrait, UserRepositoryTrait, ZoneRepositoryTrait};

pub struct LocationService<
    AR = crate::repository::AddressRepository,
    ZR = crate::repository::ZoneRepository,
    UR = crate::repository::UserRepository,
> where
    AR: AddressRepositoryTrait,
    ZR: ZoneRepositoryTrait,
    UR: UserRepositoryTrait,
{
    address_repo: Arc<AR>,
    zone_repo: Arc<ZR>,
    user_repo: Arc<UR>,
}

impl<AR, ZR, UR> LocationService<AR, ZR, UR>
where
    AR: AddressRepositoryTrait,
    ZR: ZoneRepositoryTrait,
    UR: UserRepositoryTrait,
{
    pub fn new(address_repo: Arc<AR>, zone_repo: Arc<ZR>, user_repo: Arc<UR>) -> Self {
        Self {
            address_repo,
            zone_repo,
            user_repo,
        }
    }

    // ==================== 地址 ====================

    /// 只有生产者保存地址，回收者返回空列表
    pub async fn addresses(&self, role: Role, user_id: i64) -> Result<Vec<Address>> {
        match role {
            Role::Producer => self.address_repo.list(user_id).await,
            Role::Collector => Ok(Vec::new()),
        }
    }

    /// 新增地址，未提供坐标时按 0 存储
    pub async fn add_address(
        &self,
        role: Role,
        user_id: i64,
        request: CreateAddressRequest,
    ) -> Result<i64> {
        if role != Role::Producer {
            return Err(MarketplaceError::Validation(
                "目前只有生产者可以保存地址".to_string(),
            ));
        }
        request.validate()?;

        if self.user_repo.get_producer(user_id).await?.is_none() {
            return Err(MarketplaceError::UserNotFound(user_id));
        }

        let id = self
            .address_repo
            .create(NewAddress {
                producer_id: user_id,
                title: request.title,
                address: request.address,
                lat: request.lat.unwrap_or(0.0),
                lng: request.lng.unwrap_or(0.0),
            })
            .await?;

        info!(address_id = id, producer_id = user_id, "地址已保存");
        Ok(id)
    }

    pub async fn delete_address(&self, id: i64) -> Result<()> {
        if self.address_repo.delete(id).await? == 0 {
            return Err(MarketplaceError::AddressNotFound(id));
        }
        Ok(())
    }

    // ==================== 服务区域 ====================

    pub async fn zones(&self, collector_id: i64) -> Result<Vec<CollectorZone>> {
        self.zone_repo.list(collector_id).await
    }

    pub async fn add_zone(&self, request: CreateZoneRequest) -> Result<i64> {
        request.validate()?;

        if self
            .user_repo
            .get_collector(request.collector_id)
            .await?
            .is_none()
        {
            return Err(MarketplaceError::UserNotFound(request.collector_id));
        }

        let id = self
            .zone_repo
            .create(NewZone {
                collector_id: request.collector_id,
                title: request.title,
                lat: request.lat,
                lng: request.lng,
                radius_km: request.radius_km,
            })
            .await?;

        info!(zone_id = id, collector_id = request.collector_id, "服务区域已保存");
        Ok(id)
    }

    pub async fn delete_zone(&self, id: i64) -> Result<()> {
        if self.zone_repo.delete(id).await? == 0 {
            return Err(MarketplaceError::ZoneNotFound(id));
        }
        Ok(())
    }
}
