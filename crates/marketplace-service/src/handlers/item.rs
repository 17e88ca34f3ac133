//! 物品 API 处理器
//!
//! 物品流、发布、删除与状态流转

use axum::extract::State;

use crate::{
    dto::{
        CreateItemRequest, DeleteItemQuery, FeedQuery, MutationResponse, StatusUpdateResponse,
        UpdateStatusRequest,
    },
    error::MarketplaceError,
    extract::{Json, Path, Query},
    models::FeedItem,
    state::AppState,
};

/// 物品流
///
/// GET /api/items?collectorId=
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<FeedItem>>, MarketplaceError> {
    let items = state.items.feed(query.collector_id).await?;
    Ok(Json(items))
}

/// 发布物品
///
/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<Json<MutationResponse>, MarketplaceError> {
    let id = state.items.post_item(req).await?;
    Ok(Json(MutationResponse::created(id)))
}

/// 删除物品
///
/// DELETE /api/items/{id}?producerId=
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteItemQuery>,
) -> Result<Json<MutationResponse>, MarketplaceError> {
    let changes = state.items.delete_item(id, query.producer_id).await?;
    Ok(Json(MutationResponse::changed(changes)))
}

/// 预约 / 释放 / 回收
///
/// PUT /api/items/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<StatusUpdateResponse>, MarketplaceError> {
    let change = state
        .items
        .update_status(id, req.status, req.collector_id)
        .await?;

    Ok(Json(StatusUpdateResponse {
        success: true,
        changes: 1,
        status: change.status,
        reward: change.reward,
    }))
}
