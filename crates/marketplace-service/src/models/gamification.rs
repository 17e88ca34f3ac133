//! 游戏化模型：花园成长、排行榜、回收指南

use serde::{Deserialize, Serialize};

use super::WasteType;

/// 花园成长阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GardenStage {
    Seed,
    Sprout,
    Plant,
    Tree,
    Forest,
}

impl GardenStage {
    /// 各阶段的积分门槛，升序
    const THRESHOLDS: [(i64, GardenStage); 5] = [
        (0, Self::Seed),
        (100, Self::Sprout),
        (300, Self::Plant),
        (600, Self::Tree),
        (1000, Self::Forest),
    ];

    pub fn for_points(points: i64) -> Self {
        Self::THRESHOLDS
            .iter()
            .rev()
            .find(|(min, _)| points >= *min)
            .map(|(_, stage)| *stage)
            .unwrap_or(Self::Seed)
    }

    /// 升到下一阶段所需的积分，最高阶段返回 0
    pub fn next_level(&self) -> i64 {
        Self::THRESHOLDS
            .iter()
            .find(|(_, stage)| stage > self)
            .map(|(min, _)| *min)
            .unwrap_or(0)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Seed => "Uma pequena semente foi plantada!",
            Self::Sprout => "Está crescendo! Continue reciclando.",
            Self::Plant => "Olha que linda! Já é uma planta forte.",
            Self::Tree => "Incrível! Virou uma árvore frondosa.",
            Self::Forest => "Você criou uma verdadeira floresta!",
        }
    }
}

/// 花园状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenStatus {
    pub points: i64,
    pub stage: GardenStage,
    pub next_level: i64,
    /// 当前进度百分比，0..=100
    pub progress: f64,
    pub message: String,
}

impl GardenStatus {
    pub fn from_points(points: i64) -> Self {
        let points = points.max(0);
        let stage = GardenStage::for_points(points);
        let next_level = stage.next_level();
        let progress = if next_level == 0 {
            100.0
        } else {
            (points as f64 / next_level as f64 * 100.0).min(100.0)
        };

        Self {
            points,
            stage,
            next_level,
            progress,
            message: stage.message().to_string(),
        }
    }
}

/// 排行榜条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub id: i64,
    pub name: String,
    pub points: i64,
    pub level: i64,
    pub avatar_url: Option<String>,
}

impl LeaderboardEntry {
    pub fn level_for(points: i64) -> i64 {
        points.max(0) / 100 + 1
    }
}

/// 排行榜原始行
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RankedProducer {
    pub id: i64,
    pub name: String,
    pub points: i64,
    pub avatar_url: Option<String>,
}

impl RankedProducer {
    pub fn into_entry(self, rank: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            rank,
            id: self.id,
            name: self.name,
            level: LeaderboardEntry::level_for(self.points),
            points: self.points,
            avatar_url: self.avatar_url,
        }
    }
}

/// 回收指南条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideEntry {
    pub id: WasteType,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// 回收指南
pub fn recycling_guide() -> Vec<GuideEntry> {
    vec![
        GuideEntry {
            id: WasteType::Paper,
            title: "Papel",
            description: "Jornais, revistas, caixas de papelão. Devem estar secos e limpos.",
            icon: "📄",
        },
        GuideEntry {
            id: WasteType::Plastic,
            title: "Plástico",
            description: "Garrafas PET, embalagens de limpeza. Lave para retirar resíduos.",
            icon: "🥤",
        },
        GuideEntry {
            id: WasteType::Glass,
            title: "Vidro",
            description: "Garrafas, potes de conserva. Cuidado ao manusear se estiver quebrado.",
            icon: "🍾",
        },
        GuideEntry {
            id: WasteType::Metal,
            title: "Metal",
            description: "Latas de alumínio (cerveja/refri), latas de conserva.",
            icon: "🥫",
        },
        GuideEntry {
            id: WasteType::Electronic,
            title: "Eletrônicos",
            description: "Celulares antigos, cabos, baterias. Nunca descarte no lixo comum!",
            icon: "🔌",
        },
        GuideEntry {
            id: WasteType::Organic,
            title: "Orgânico",
            description: "Restos de comida, cascas de frutas. Ideal para compostagem.",
            icon: "🍎",
        },
    ]
}
