use serde::{Deserialize, Serialize};

use super::Movie;

/// Why a movie was recommended
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReasonType {
    Achievement,
    Streak,
    Collection,
    Director,
    Era,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationReason {
    #[serde(rename = "type")]
    pub reason_type: ReasonType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement_id: Option<String>,
    /// Higher is more important
    pub priority: u32,
}

/// A movie with the reasons it was picked; `score` is the sum of reason priorities
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecommendation {
    pub movie: Movie,
    pub reasons: Vec<RecommendationReason>,
    pub score: u32,
}

impl MovieRecommendation {
    pub fn new(movie: Movie, reason: RecommendationReason) -> Self {
        let score = reason.priority;
        Self {
            movie,
            reasons: vec![reason],
            score,
        }
    }

    /// Adds a reason, keeping only the higher-priority one per (type, achievement)
    pub fn add_reason(&mut self, reason: RecommendationReason) {
        let existing = self.reasons.iter_mut().find(|r| {
            r.reason_type == reason.reason_type && r.achievement_id == reason.achievement_id
        });

        match existing {
            Some(current) if current.priority < reason.priority => {
                self.score = self.score - current.priority + reason.priority;
                *current = reason;
            }
            Some(_) => {}
            None => {
                self.score += reason.priority;
                self.reasons.push(reason);
            }
        }
    }

    /// Reason with the highest priority, first added wins ties
    pub fn primary_reason(&self) -> Option<&RecommendationReason> {
        self.reasons
            .iter()
            .reduce(|best, r| if r.priority > best.priority { r } else { best })
    }
}
