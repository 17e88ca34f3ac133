//! 登录 API 处理器

use axum::extract::State;
use validator::Validate;

use crate::{
    dto::{LoginRequest, LoginResponse},
    error::MarketplaceError,
    extract::Json,
    state::AppState,
};

/// 登录
///
/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, MarketplaceError> {
    req.validate()?;

    let user = state.auth.login(req.email.trim(), &req.password).await?;

    Ok(Json(LoginResponse::new(user)))
}
