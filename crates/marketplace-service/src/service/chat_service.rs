//! 聊天服务
//!
//! 会话在生产者与回收者之间一对一建立，消息按时间正序返回

use std::sync::Arc;

use tracing::{debug, instrument};
use validator::Validate;

use crate::dto::SendMessageRequest;
use crate::error::{MarketplaceError, Result};
use crate::models::{ChatSummary, Message, Role};
use crate::repository::{ChatRepositoryTrait, UserRepositoryTrait};

pub struct ChatService<CR = crate::repository::ChatRepository, UR = crate::repository::UserRepository>
where
    CR: ChatRepositoryTrait,
    UR: UserRepositoryTrait,
{
    chat_repo: Arc<CR>,
    user_repo: Arc<UR>,
}

impl<CR, UR> ChatService<CR, UR>
where
    CR: ChatRepositoryTrait,
    UR: UserRepositoryTrait,
{
    pub fn new(chat_repo: Arc<CR>, user_repo: Arc<UR>) -> Self {
        Self {
            chat_repo,
            user_repo,
        }
    }

    pub async fn chats(&self, role: Role, user_id: i64) -> Result<Vec<ChatSummary>> {
        self.chat_repo.list_chats(role, user_id).await
    }

    /// 打开会话，双方必须存在；已有会话时返回原 ID
    #[instrument(skip(self))]
    pub async fn open_chat(&self, producer_id: i64, collector_id: i64) -> Result<i64> {
        if self.user_repo.get_producer(producer_id).await?.is_none() {
            return Err(MarketplaceError::UserNotFound(producer_id));
        }
        if self.user_repo.get_collector(collector_id).await?.is_none() {
            return Err(MarketplaceError::UserNotFound(collector_id));
        }

        self.chat_repo.open_chat(producer_id, collector_id).await
    }

    pub async fn messages(&self, chat_id: i64) -> Result<Vec<Message>> {
        self.ensure_chat(chat_id).await?;
        self.chat_repo.list_messages(chat_id).await
    }

    #[instrument(skip(self, request), fields(sender_role = %request.sender_role))]
    pub async fn send_message(&self, chat_id: i64, request: SendMessageRequest) -> Result<i64> {
        request.validate()?;
        self.ensure_chat(chat_id).await?;

        let id = self
            .chat_repo
            .send_message(chat_id, request.sender_role, request.content)
            .await?;

        debug!(chat_id, message_id = id, "message stored");
        Ok(id)
    }

    async fn ensure_chat(&self, chat_id: i64) -> Result<()> {
        self.chat_repo
            .get_chat(chat_id)
            .await?
            .map(|_| ())
            .ok_or(MarketplaceError::ChatNotFound(chat_id))
    }
}
