use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display family of an achievement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AchievementType {
    Milestone,
    Collection,
    Streak,
    Special,
}

/// What an achievement counts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AchievementCriterion {
    /// Total number of watched movies
    WatchedCount { threshold: u32 },
    Genre { genre: String },
    /// Every catalog film by one director
    Director { director: String },
    /// Films released in the decade starting at `start_year`
    Era { start_year: i32 },
    /// Longest daily streak, in days
    Streak { days: u32 },
}

impl AchievementCriterion {
    pub fn achievement_type(&self) -> AchievementType {
        match self {
            AchievementCriterion::WatchedCount { .. } => AchievementType::Milestone,
            AchievementCriterion::Genre { .. }
            | AchievementCriterion::Director { .. }
            | AchievementCriterion::Era { .. } => AchievementType::Collection,
            AchievementCriterion::Streak { .. } => AchievementType::Streak,
        }
    }
}

/// Progress toward one achievement, recomputed on every evaluation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub achievement_type: AchievementType,
    pub progress: u32,
    pub max: u32,
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
    /// Tier reached, for tiered genre collections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    pub criterion: AchievementCriterion,
}

impl Achievement {
    /// progress / max, 1.0 when there is nothing to collect
    pub fn completion_ratio(&self) -> f64 {
        if self.max == 0 {
            return 1.0;
        }
        f64::from(self.progress) / f64::from(self.max)
    }

    pub fn remaining(&self) -> u32 {
        self.max.saturating_sub(self.progress)
    }
}
