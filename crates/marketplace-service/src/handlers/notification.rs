//! 通知 API 处理器

use axum::extract::State;

use crate::{
    dto::{MutationResponse, RoleQuery, UserRoleQuery, require_id, require_role},
    error::MarketplaceError,
    extract::{Json, Path, Query},
    models::Notification,
    state::AppState,
};

/// 用户通知列表
///
/// GET /api/notifications?userId=&role=
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<UserRoleQuery>,
) -> Result<Json<Vec<Notification>>, MarketplaceError> {
    let user_id = require_id(query.user_id, "userId")?;
    let role = require_role(query.role.as_deref())?;

    let notifications = state.accounts.notifications(role, user_id).await?;
    Ok(Json(notifications))
}

/// 标记已读
///
/// PUT /api/notifications/{id}/read?role=
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<RoleQuery>,
) -> Result<Json<MutationResponse>, MarketplaceError> {
    let role = require_role(query.role.as_deref())?;

    state.accounts.mark_notification_read(role, id).await?;
    Ok(Json(MutationResponse::ok()))
}
