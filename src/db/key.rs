use std::fmt::Display;

/// Every key the tracker persists
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The logged-in user record
    CurrentUser,
    /// Rating for a movie id
    MovieRating(String),
    /// Notification settings for a user id
    UserPreferences(String),
    /// Date → movie ids log for a user id
    WatchHistory(String),
    /// Streak snapshot for a user id
    StreakData(String),
    /// First-seen unlock times for a user id
    AchievementUnlocks(String),
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::CurrentUser => write!(f, "current_user"),
            StorageKey::MovieRating(movie_id) => write!(f, "movie_rating:{}", movie_id),
            StorageKey::UserPreferences(user_id) => write!(f, "preferences:{}", user_id),
            StorageKey::WatchHistory(user_id) => write!(f, "watch_history:{}", user_id),
            StorageKey::StreakData(user_id) => write!(f, "streak_data:{}", user_id),
            StorageKey::AchievementUnlocks(user_id) => {
                write!(f, "achievement_unlocks:{}", user_id)
            }
        }
    }
}
