//! 游戏化服务：花园、排行榜、回收指南

use std::sync::Arc;

use tracing::instrument;

use crate::error::{MarketplaceError, Result};
use crate::models::{GardenStatus, GuideEntry, LeaderboardEntry, recycling_guide};
use crate::repository::UserRepositoryTrait;

/// 排行榜默认条数
pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;
/// 排行榜最大条数
pub const MAX_LEADERBOARD_LIMIT: i64 = 100;

pub struct GamificationService<UR = crate::repository::UserRepository>
where
    UR: UserRepositoryTrait,
{
    user_repo: Arc<UR>,
}

impl<UR> GamificationService<UR>
where
    UR: UserRepositoryTrait,
{
    pub fn new(user_repo: Arc<UR>) -> Self {
        Self { user_repo }
    }

    /// 按生产者积分计算花园状态
    pub async fn garden(&self, producer_id: i64) -> Result<GardenStatus> {
        let producer = self
            .user_repo
            .get_producer(producer_id)
            .await?
            .ok_or(MarketplaceError::UserNotFound(producer_id))?;

        Ok(GardenStatus::from_points(producer.points))
    }

    /// 排行榜
    ///
    /// 指定用户不在榜单内时，在末尾追加其真实名次。
    /// 同分按 ID 排序，追加的名次与榜单继续延伸时的位置一致，不会与榜内名次重复
    #[instrument(skip(self))]
    pub async fn leaderboard(
        &self,
        limit: Option<i64>,
        user_id: Option<i64>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let limit = limit
            .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
            .clamp(1, MAX_LEADERBOARD_LIMIT);

        let mut entries: Vec<LeaderboardEntry> = self
            .user_repo
            .top_producers(limit)
            .await?
            .into_iter()
            .zip(1..)
            .map(|(producer, rank)| producer.into_entry(rank))
            .collect();

        if let Some(user_id) = user_id {
            if !entries.iter().any(|e| e.id == user_id) {
                if let Some(producer) = self.user_repo.get_producer(user_id).await? {
                    let rank = self
                        .user_repo
                        .producer_rank(producer.id, producer.points)
                        .await?;
                    entries.push(LeaderboardEntry {
                        rank,
                        id: producer.id,
                        name: producer.name,
                        points: producer.points,
                        level: LeaderboardEntry::level_for(producer.points),
                        avatar_url: producer.avatar_url,
                    });
                }
            }
        }

        Ok(entries)
    }

    pub fn guide(&self) -> Vec<GuideEntry> {
        recycling_guide()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GardenStage, Producer, RankedProducer};
    use crate::repository::MockUserRepositoryTrait;
    use mockall::predicate::eq;

    fn producer(id: i64, points: i64) -> Producer {
        Producer {
            id,
            email: format!("p{}@test.com", id),
            name: format!("Produtor {}", id),
            phone: None,
            points,
            weight_recycled: 0.0,
            level: "Iniciante".to_string(),
            avatar_url: None,
        }
    }

    fn ranked(id: i64, points: i64) -> RankedProducer {
        RankedProducer {
            id,
            name: format!("Produtor {}", id),
            points,
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_garden() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_get_producer()
            .with(eq(1))
            .returning(|id| Ok(Some(producer(id, 350))));

        let garden = GamificationService::new(Arc::new(repo)).garden(1).await.unwrap();
        assert_eq!(garden.stage, GardenStage::Plant);
        assert_eq!(garden.next_level, 600);
    }

    #[tokio::test]
    async fn test_garden_unknown_producer() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_get_producer().returning(|_| Ok(None));

        let err = GamificationService::new(Arc::new(repo)).garden(5).await.unwrap_err();
        assert!(matches!(err, MarketplaceError::UserNotFound(5)));
    }

    #[tokio::test]
    async fn test_leaderboard_ranks_and_levels() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_top_producers()
            .with(eq(DEFAULT_LEADERBOARD_LIMIT))
            .returning(|_| Ok(vec![ranked(3, 1250), ranked(1, 980)]));

        let board = GamificationService::new(Arc::new(repo))
            .leaderboard(None, None)
            .await
            .unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].level, 13);
        assert_eq!(board[1].rank, 2);
    }

    #[tokio::test]
    async fn test_leaderboard_appends_user_outside_top() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_top_producers()
            .with(eq(2))
            .returning(|_| Ok(vec![ranked(3, 1250), ranked(1, 980)]));
        repo.expect_get_producer()
            .with(eq(7))
            .returning(|id| Ok(Some(producer(id, 120))));
        repo.expect_producer_rank()
            .with(eq(7), eq(120))
            .returning(|_, _| Ok(12));

        let board = GamificationService::new(Arc::new(repo))
            .leaderboard(Some(2), Some(7))
            .await
            .unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board[2].id, 7);
        assert_eq!(board[2].rank, 12);
        assert_eq!(board[2].level, 2);
    }

    #[tokio::test]
    async fn test_leaderboard_tied_user_ranks_after_listed_tie() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_top_producers()
            .with(eq(1))
            .returning(|_| Ok(vec![ranked(2, 500)]));
        repo.expect_get_producer()
            .with(eq(9))
            .returning(|id| Ok(Some(producer(id, 500))));
        repo.expect_producer_rank()
            .with(eq(9), eq(500))
            .returning(|_, _| Ok(2));

        let board = GamificationService::new(Arc::new(repo))
            .leaderboard(Some(1), Some(9))
            .await
            .unwrap();
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].id, 9);
        assert_eq!(board[1].rank, 2);
    }

    #[tokio::test]
    async fn test_leaderboard_does_not_duplicate_user_in_top() {
        let mut repo = MockUserRepositoryTrait::new();
        repo.expect_top_producers()
            .returning(|_| Ok(vec![ranked(3, 1250), ranked(1, 980)]));
        repo.expect_get_producer().never();

        let board = GamificationService::new(Arc::new(repo))
            .leaderboard(Some(500), Some(1))
            .await
            .unwrap();
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_guide() {
        let service = GamificationService::new(Arc::new(MockUserRepositoryTrait::new()));
        assert_eq!(service.guide().len(), 6);
    }
}
