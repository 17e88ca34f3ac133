//! 用户资料 API 处理器

use axum::extract::State;

use crate::{
    dto::{MutationResponse, UpdateUserRequest, UserQuery, require_id, require_role},
    error::MarketplaceError,
    extract::{Json, Query},
    models::UserProfile,
    state::AppState,
};

/// 获取用户资料
///
/// GET /api/user?id=&role=
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<UserProfile>, MarketplaceError> {
    let id = require_id(query.id, "id")?;
    let role = require_role(query.role.as_deref())?;

    let profile = state.accounts.profile(role, id).await?;

    Ok(Json(profile))
}

/// 更新用户资料
///
/// PUT /api/user
pub async fn update_user(
    State(state): State<AppState>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<MutationResponse>, MarketplaceError> {
    let id = require_id(req.id, "id")?;
    let role = require_role(req.role.as_deref())?;

    state.accounts.update_profile(role, id, req).await?;
    Ok(Json(MutationResponse::ok()))
}
