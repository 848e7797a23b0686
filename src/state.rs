use std::sync::Arc;
use std::time::Duration;

use crate::{
    catalog::Catalog,
    clock::{Clock, SystemClock},
    config::Config,
    db::{KeyValueStore, MemoryStore, RedisStore},
    error::AppResult,
    models::{Achievement, Movie, MovieRecommendation, StreakData, User, WatchStats},
    services::{
        achievement_recommendations, next_achievement_for_movie, recommendations, stats,
        AchievementTracker, RatingStore, SessionStore, StreakTracker,
    },
};

/// Shared application context
///
/// Cheap to clone; every engine call goes through it so they all see the same
/// catalog, storage and clock.
///
/// ```no_run
/// use cinetrack::{config::Config, AppState};
///
/// # async fn run() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// cinetrack::telemetry::init_tracing(&config.log_filter)?;
///
/// let state = AppState::from_config(config)?;
/// let mut session = state.open_session();
/// session.login("Ana", None).await?;
/// session.mark_watched("1")?;
///
/// let picks = state.achievement_recommendations(session.current_user());
/// # let _ = picks;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub store: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            catalog: Arc::new(Catalog::builtin()),
            store,
            clock,
        }
    }

    /// Redis when `redis_url` is set, otherwise an in-memory store
    pub fn from_config(config: Config) -> AppResult<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.redis_url {
            Some(url) => {
                let store = RedisStore::connect(url)?;
                tracing::info!("Using Redis storage");
                Arc::new(store)
            }
            None => {
                tracing::info!("Using in-memory storage");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::new(config, store, Arc::new(SystemClock)))
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Session picking up any persisted user
    pub fn open_session(&self) -> SessionStore {
        SessionStore::restore(
            self.store.clone(),
            self.catalog.clone(),
            self.clock.clone(),
            Duration::from_millis(self.config.login_delay_ms),
        )
    }

    pub fn streaks(&self) -> StreakTracker {
        StreakTracker::new(self.store.clone(), self.clock.clone())
    }

    pub fn achievements(&self) -> AchievementTracker {
        AchievementTracker::new(self.catalog.clone(), self.store.clone(), self.clock.clone())
    }

    pub fn ratings(&self) -> RatingStore {
        RatingStore::new(self.store.clone())
    }

    pub fn calculate_streak(&self, user: Option<&User>) -> StreakData {
        self.streaks().calculate_streak(user)
    }

    pub fn calculate_achievements(&self, user: Option<&User>) -> Vec<Achievement> {
        self.achievements().evaluate(user)
    }

    /// "For you" list of `config.recommendation_count` films
    pub fn recommendations(&self, user: Option<&User>) -> Vec<Movie> {
        let ratings = self.user_ratings(user);
        recommendations::get_recommendations(
            &self.catalog,
            user,
            &ratings,
            self.config.recommendation_count,
            &mut rand::thread_rng(),
        )
    }

    pub fn preference_profile(&self, user: Option<&User>) -> recommendations::PreferenceProfile {
        recommendations::analyze_preferences(&self.catalog, user, &self.user_ratings(user))
    }

    pub fn achievement_recommendations(&self, user: Option<&User>) -> Vec<MovieRecommendation> {
        let achievements = self.calculate_achievements(user);
        achievement_recommendations(
            &self.catalog,
            user,
            &achievements,
            self.config.achievement_recommendation_count,
        )
    }

    pub fn next_achievement_for_movie(&self, user: Option<&User>, movie: &Movie) -> Option<Achievement> {
        let streak = user.and_then(|u| self.achievements().streak_snapshot(u));
        next_achievement_for_movie(&self.catalog, user, streak.as_ref(), movie)
    }

    pub fn watch_stats(&self, user: Option<&User>) -> WatchStats {
        stats::watch_stats(&self.catalog, user, &self.user_ratings(user))
    }

    pub fn movie_of_the_day(&self) -> Option<&Movie> {
        self.catalog.movie_of_the_day(self.clock.today())
    }

    fn user_ratings(&self, user: Option<&User>) -> std::collections::HashMap<String, u8> {
        user.map(|u| self.ratings().ratings_for(&u.watched_movies))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn state() -> AppState {
        let config = Config {
            login_delay_ms: 0,
            ..Config::default()
        };
        let clock = Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
        AppState::new(config, Arc::new(MemoryStore::new()), clock)
    }

    #[test]
    fn test_from_config_without_redis_uses_memory() {
        let state = AppState::from_config(Config::default()).unwrap();
        assert_eq!(state.catalog.len(), 10);
        assert!(state.open_session().current_user().is_none());
    }

    #[test]
    fn test_sessions_share_storage() {
        let state = state();
        let mut session = state.open_session();
        tokio_test::block_on(session.login("Ana", None)).unwrap();
        session.mark_watched("1").unwrap();

        let reopened = state.open_session();
        assert!(reopened.is_watched("1"));
        assert_eq!(state.calculate_streak(reopened.current_user()).current_streak, 1);
    }

    #[test]
    fn test_movie_of_the_day_is_stable() {
        let state = state();
        let first = state.movie_of_the_day().map(|m| m.id.clone());
        assert!(first.is_some());
        assert_eq!(state.movie_of_the_day().map(|m| m.id.clone()), first);
    }

    #[test]
    fn test_anonymous_calls_degrade() {
        let state = state();
        assert!(state.calculate_achievements(None).is_empty());
        assert!(state.achievement_recommendations(None).is_empty());
        assert_eq!(state.calculate_streak(None), StreakData::default());
        assert_eq!(state.recommendations(None).len(), 6);
    }
}
