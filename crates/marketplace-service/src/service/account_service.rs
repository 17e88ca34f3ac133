//! 账户服务：用户资料与站内通知

use std::sync::Arc;

use tracing::{info, instrument};
use validator::Validate;

use crate::dto::UpdateUserRequest;
use crate::error::{MarketplaceError, Result};
use crate::models::{Notification, ProfileUpdate, Role, UserProfile};
use crate::repository::{NotificationRepositoryTrait, UserRepositoryTrait};

pub struct AccountService<
    UR = crate::repository::UserRepository,
    NR = crate::repository::NotificationRepository,
> where
    UR: UserRepositoryTrait,
    NR: NotificationRepositoryTrait,
{
    user_repo: Arc<UR>,
    notification_repo: Arc<NR>,
}

impl<UR, NR> AccountService<UR, NR>
where
    UR: UserRepositoryTrait,
    NR: NotificationRepositoryTrait,
{
    pub fn new(user_repo: Arc<UR>, notification_repo: Arc<NR>) -> Self {
        Self {
            user_repo,
            notification_repo,
        }
    }

    pub async fn profile(&self, role: Role, id: i64) -> Result<UserProfile> {
        let profile = match role {
            Role::Producer => self
                .user_repo
                .get_producer(id)
                .await?
                .map(UserProfile::Producer),
            Role::Collector => self
                .user_repo
                .get_collector(id)
                .await?
                .map(UserProfile::Collector),
        };

        profile.ok_or(MarketplaceError::UserNotFound(id))
    }

    /// 更新资料，未提供的字段保持不变
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        role: Role,
        id: i64,
        mut request: UpdateUserRequest,
    ) -> Result<()> {
        request.normalize();
        request.validate()?;

        let update = ProfileUpdate {
            name: request.name,
            email: request.email,
            phone: request.phone,
        };

        let changes = self.user_repo.update_profile(role, id, update).await?;
        if changes == 0 {
            return Err(MarketplaceError::UserNotFound(id));
        }

        info!(user_id = id, role = %role, "用户资料已更新");
        Ok(())
    }

    pub async fn notifications(&self, role: Role, user_id: i64) -> Result<Vec<Notification>> {
        self.notification_repo.list(role, user_id).await
    }

    pub async fn mark_notification_read(&self, role: Role, id: i64) -> Result<()> {
        if self.notification_repo.mark_read(role, id).await? == 0 {
            return Err(MarketplaceError::NotificationNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockNotificationRepositoryTrait, MockUserRepositoryTrait};
    use mockall::predicate::eq;

    fn update_request(email: Option<&str>) -> UpdateUserRequest {
        UpdateUserRequest {
            id: Some(1),
            role: Some("producer".to_string()),
            name: Some("  João  ".to_string()),
            email: email.map(String::from),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_profile_not_found() {
        let mut users = MockUserRepositoryTrait::new();
        users.expect_get_collector().returning(|_| Ok(None));
        let service = AccountService::new(
            Arc::new(users),
            Arc::new(MockNotificationRepositoryTrait::new()),
        );

        let err = service.profile(Role::Collector, 3).await.unwrap_err();
        assert!(matches!(err, MarketplaceError::UserNotFound(3)));
    }

    #[tokio::test]
    async fn test_update_profile_trims_and_keeps_missing_fields() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_update_profile()
            .withf(|role, id, update| {
                *role == Role::Producer
                    && *id == 1
                    && update.name.as_deref() == Some("João")
                    && update.email.is_none()
                    && update.phone.is_none()
            })
            .returning(|_, _, _| Ok(1));
        let service = AccountService::new(
            Arc::new(users),
            Arc::new(MockNotificationRepositoryTrait::new()),
        );

        service
            .update_profile(Role::Producer, 1, update_request(None))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_profile_rejects_bad_email() {
        let mut users = MockUserRepositoryTrait::new();
        users.expect_update_profile().never();
        let service = AccountService::new(
            Arc::new(users),
            Arc::new(MockNotificationRepositoryTrait::new()),
        );

        let err = service
            .update_profile(Role::Producer, 1, update_request(Some("not-an-email")))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_blank_name() {
        let mut users = MockUserRepositoryTrait::new();
        users.expect_update_profile().never();
        let service = AccountService::new(
            Arc::new(users),
            Arc::new(MockNotificationRepositoryTrait::new()),
        );

        let mut request = update_request(Some("joao@email.com"));
        request.name = Some(" \t ".to_string());
        let err = service
            .update_profile(Role::Producer, 1, request)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_profile_accepts_padded_email() {
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_update_profile()
            .withf(|_, _, update| update.email.as_deref() == Some("joao@email.com"))
            .returning(|_, _, _| Ok(1));
        let service = AccountService::new(
            Arc::new(users),
            Arc::new(MockNotificationRepositoryTrait::new()),
        );

        service
            .update_profile(Role::Producer, 1, update_request(Some("  joao@email.com ")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_mark_read_missing() {
        let mut notifications = MockNotificationRepositoryTrait::new();
        notifications
            .expect_mark_read()
            .with(eq(Role::Collector), eq(4))
            .returning(|_, _| Ok(0));
        let service = AccountService::new(
            Arc::new(MockUserRepositoryTrait::new()),
            Arc::new(notifications),
        );

        let err = service
            .mark_notification_read(Role::Collector, 4)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::NotificationNotFound(4)));
    }
}
