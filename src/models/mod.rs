mod achievement;
mod movie;
mod recommendation;
mod stats;
mod streak;
mod user;
mod user_preferences;

pub use achievement::{Achievement, AchievementCriterion, AchievementType};
pub use movie::{Movie, MovieFilter};
pub use recommendation::{MovieRecommendation, ReasonType, RecommendationReason};
pub use stats::{DecadeCount, DirectorCount, GenreCount, WatchStats};
pub use streak::{StreakData, WatchHistory};
pub use user::{User, UserUpdate};
pub use user_preferences::UserPreferences;
