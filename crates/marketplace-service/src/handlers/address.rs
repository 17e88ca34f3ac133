//! 地址与服务区域 API 处理器

use axum::extract::State;

use crate::{
    dto::{
        CreateAddressRequest, CreateZoneRequest, MutationResponse, UserRoleQuery, ZoneQuery,
        require_id, require_role,
    },
    error::MarketplaceError,
    extract::{Json, Path, Query},
    models::{Address, CollectorZone},
    state::AppState,
};

/// 地址列表
///
/// GET /api/addresses?userId=&role=
pub async fn list_addresses(
    State(state): State<AppState>,
    Query(query): Query<UserRoleQuery>,
) -> Result<Json<Vec<Address>>, MarketplaceError> {
    let user_id = require_id(query.user_id, "userId")?;
    let role = require_role(query.role.as_deref())?;

    let addresses = state.locations.addresses(role, user_id).await?;
    Ok(Json(addresses))
}

/// 新增地址
///
/// POST /api/addresses
pub async fn create_address(
    State(state): State<AppState>,
    Json(req): Json<CreateAddressRequest>,
) -> Result<Json<MutationResponse>, MarketplaceError> {
    let user_id = require_id(req.user_id, "userId")?;
    let role = require_role(req.role.as_deref())?;

    let id = state.locations.add_address(role, user_id, req).await?;
    Ok(Json(MutationResponse::created(id)))
}

/// DELETE /api/addresses/{id}
pub async fn delete_address(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MutationResponse>, MarketplaceError> {
    state.locations.delete_address(id).await?;
    Ok(Json(MutationResponse::ok()))
}

/// 服务区域列表
///
/// GET /api/zones?collectorId=
pub async fn list_zones(
    State(state): State<AppState>,
    Query(query): Query<ZoneQuery>,
) -> Result<Json<Vec<CollectorZone>>, MarketplaceError> {
    let collector_id = require_id(query.collector_id, "collectorId")?;

    let zones = state.locations.zones(collector_id).await?;
    Ok(Json(zones))
}

/// POST /api/zones
pub async fn create_zone(
    State(state): State<AppState>,
    Json(req): Json<CreateZoneRequest>,
) -> Result<Json<MutationResponse>, MarketplaceError> {
    let id = state.locations.add_zone(req).await?;
    Ok(Json(MutationResponse::created(id)))
}

/// DELETE /api/zones/{id}
pub async fn delete_zone(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MutationResponse>, MarketplaceError> {
    state.locations.delete_zone(id).await?;
    Ok(Json(MutationResponse::ok()))
}
