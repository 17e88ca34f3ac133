//! 登录服务
//!
//! 先查生产者表，再查回收者表；邮箱存在但密码不匹配时继续查下一张表

use std::sync::Arc;

use tracing::{info, instrument, warn};

use greentech_shared::observability::metrics;

use crate::auth::verify_password;
use crate::error::{MarketplaceError, Result};
use crate::models::{LoginUser, Role, UserProfile};
use crate::repository::UserRepositoryTrait;

pub struct AuthService<UR = crate::repository::UserRepository>
where
    UR: UserRepositoryTrait,
{
    user_repo: Arc<UR>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepositoryTrait,
{
    pub fn new(user_repo: Arc<UR>) -> Self {
        Self { user_repo }
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginUser> {
        for role in [Role::Producer, Role::Collector] {
            let Some(credentials) = self.user_repo.find_credentials(role, email).await? else {
                continue;
            };
            if !verify_password(password, &credentials.password_hash)? {
                continue;
            }

            let profile = match role {
                Role::Producer => self
                    .user_repo
                    .get_producer(credentials.id)
                    .await?
                    .map(UserProfile::Producer),
                Role::Collector => self
                    .user_repo
                    .get_collector(credentials.id)
                    .await?
                    .map(UserProfile::Collector),
            }
            .ok_or(MarketplaceError::UserNotFound(credentials.id))?;

            metrics::record_login(true);
            info!(user_id = credentials.id, role = %role, "登录成功");
            return Ok(LoginUser::from(profile));
        }

        metrics::record_login(false);
        warn!("登录失败：凭据无效");
        Err(MarketplaceError::InvalidCredentials)
    }
}
