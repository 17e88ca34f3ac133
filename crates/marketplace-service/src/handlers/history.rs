//! 历史记录 API 处理器

use axum::extract::State;

use crate::{
    dto::{UserRoleQuery, require_id, require_role},
    error::MarketplaceError,
    extract::{Json, Query},
    models::Item,
    state::AppState,
};

/// GET /api/history?userId=&role=
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<UserRoleQuery>,
) -> Result<Json<Vec<Item>>, MarketplaceError> {
    let user_id = require_id(query.user_id, "userId")?;
    let role = require_role(query.role.as_deref())?;

    let items = state.items.history(role, user_id).await?;
    Ok(Json(items))
}
