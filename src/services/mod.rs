pub mod achievement_recommendations;
pub mod achievements;
pub mod ratings;
pub mod recommendations;
pub mod session;
pub mod stats;
pub mod streak;

pub use achievement_recommendations::{achievement_recommendations, next_achievement_for_movie};
pub use achievements::{calculate_achievements, AchievementTracker};
pub use ratings::RatingStore;
pub use recommendations::{analyze_preferences, get_recommendations, PreferenceProfile};
pub use session::SessionStore;
pub use stats::watch_stats;
pub use streak::{derive_streak, StreakTracker};
