//! 聊天 API 处理器

use axum::extract::State;

use crate::{
    dto::{
        MutationResponse, OpenChatRequest, SendMessageRequest, UserRoleQuery, require_id,
        require_role,
    },
    error::MarketplaceError,
    extract::{Json, Path, Query},
    models::{ChatSummary, Message},
    state::AppState,
};

/// GET /api/chats?userId=&role=
pub async fn list_chats(
    State(state): State<AppState>,
    Query(query): Query<UserRoleQuery>,
) -> Result<Json<Vec<ChatSummary>>, MarketplaceError> {
    let user_id = require_id(query.user_id, "userId")?;
    let role = require_role(query.role.as_deref())?;

    let chats = state.chats.chats(role, user_id).await?;
    Ok(Json(chats))
}

/// 打开会话，已存在时返回原会话
///
/// POST /api/chats
pub async fn open_chat(
    State(state): State<AppState>,
    Json(req): Json<OpenChatRequest>,
) -> Result<Json<MutationResponse>, MarketplaceError> {
    let id = state
        .chats
        .open_chat(req.producer_id, req.collector_id)
        .await?;
    Ok(Json(MutationResponse::created(id)))
}

/// GET /api/chats/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Message>>, MarketplaceError> {
    let messages = state.chats.messages(id).await?;
    Ok(Json(messages))
}

/// POST /api/chats/{id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<MutationResponse>, MarketplaceError> {
    let message_id = state.chats.send_message(id, req).await?;
    Ok(Json(MutationResponse::created(message_id)))
}
