//! 游戏化 API 处理器

use axum::extract::State;

use crate::{
    dto::{GardenQuery, LeaderboardQuery, require_id},
    error::MarketplaceError,
    extract::{Json, Query},
    models::{GardenStatus, GuideEntry, LeaderboardEntry},
    state::AppState,
};

/// GET /api/garden?userId=
pub async fn garden(
    State(state): State<AppState>,
    Query(query): Query<GardenQuery>,
) -> Result<Json<GardenStatus>, MarketplaceError> {
    let user_id = require_id(query.user_id, "userId")?;

    let garden = state.gamification.garden(user_id).await?;
    Ok(Json(garden))
}

/// GET /api/leaderboard?limit=&userId=
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, MarketplaceError> {
    let entries = state
        .gamification
        .leaderboard(query.limit, query.user_id)
        .await?;
    Ok(Json(entries))
}

/// GET /api/guide
pub async fn guide(State(state): State<AppState>) -> Json<Vec<GuideEntry>> {
    Json(state.gamification.guide())
}
