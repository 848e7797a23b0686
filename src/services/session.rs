use std::sync::Arc;
use std::time::Duration;

use crate::{
    catalog::Catalog,
    clock::Clock,
    db::{load_json_or_discard, save_json, KeyValueStore, StorageKey},
    error::{AppError, AppResult},
    models::{User, UserPreferences, UserUpdate},
    services::{
        ratings::RatingStore,
        streak::{streak_milestone_message, StreakTracker},
    },
};

/// Owns the single active user
///
/// Mutations persist the whole record first and only then swap it in.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    streaks: StreakTracker,
    ratings: RatingStore,
    login_delay: Duration,
    current: Option<User>,
}

impl SessionStore {
    /// Starts logged out
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<Catalog>,
        clock: Arc<dyn Clock>,
        login_delay: Duration,
    ) -> Self {
        Self {
            streaks: StreakTracker::new(store.clone(), clock.clone()),
            ratings: RatingStore::new(store.clone()),
            store,
            catalog,
            clock,
            login_delay,
            current: None,
        }
    }

    /// Picks up the persisted user, if any
    pub fn restore(
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<Catalog>,
        clock: Arc<dyn Clock>,
        login_delay: Duration,
    ) -> Self {
        let mut session = Self::new(store, catalog, clock, login_delay);
        session.current = load_json_or_discard(session.store.as_ref(), &StorageKey::CurrentUser);
        if let Some(user) = &session.current {
            tracing::info!(user_id = %user.id, "Restored session");
        }
        session
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Creates a fresh user with empty lists and makes it current
    ///
    /// No credentials are checked; the configured delay stands in for a
    /// server round-trip. Replaces any user already logged in.
    pub async fn login(&mut self, name: &str, email: Option<&str>) -> AppResult<&User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("Name must not be empty".to_string()));
        }
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        let user = User::new(name.to_string(), email, self.clock.now());
        tracing::info!(user_id = %user.id, name = %user.name, "User logged in");
        self.persist(user)
    }

    pub fn logout(&mut self) -> AppResult<()> {
        self.store.remove(&StorageKey::CurrentUser)?;
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = %user.id, "User logged out");
        }
        Ok(())
    }

    /// Shallow merge; listed movie ids must exist in the catalog
    pub fn update_user(&mut self, update: UserUpdate) -> AppResult<&User> {
        let mut user = self.require_user()?.clone();

        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(AppError::InvalidInput("Name must not be empty".to_string()));
            }
        }
        for id in update.movie_ids() {
            self.require_movie(id)?;
        }

        user.apply(update);
        self.persist(user)
    }

    /// Adds the movie to the watched set and records today's watch
    ///
    /// Returns false, without writing, if it was already watched.
    pub fn mark_watched(&mut self, movie_id: &str) -> AppResult<bool> {
        let mut user = self.require_user()?.clone();
        self.require_movie(movie_id)?;
        if !user.mark_watched(movie_id) {
            return Ok(false);
        }

        let user_id = user.id.clone();
        self.persist(user)?;

        match self.streaks.record_watch(&user_id, movie_id) {
            Ok(streak) => {
                if let Some(milestone) = streak_milestone_message(streak.current_streak) {
                    tracing::info!(
                        user_id = %user_id,
                        streak = streak.current_streak,
                        milestone,
                        "Streak milestone"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    movie_id = %movie_id,
                    error = %e,
                    "Failed to record watch"
                );
            }
        }

        Ok(true)
    }

    /// Removes the movie from the watched set and drops its rating
    ///
    /// The watch history keeps the day it was watched.
    pub fn unmark_watched(&mut self, movie_id: &str) -> AppResult<bool> {
        let mut user = self.require_user()?.clone();
        self.require_movie(movie_id)?;
        if !user.unmark_watched(movie_id) {
            return Ok(false);
        }

        self.persist(user)?;
        if let Err(e) = self.ratings.remove_rating(movie_id) {
            tracing::warn!(movie_id = %movie_id, error = %e, "Failed to remove rating");
        }
        Ok(true)
    }

    pub fn add_to_watchlist(&mut self, movie_id: &str) -> AppResult<bool> {
        let mut user = self.require_user()?.clone();
        self.require_movie(movie_id)?;
        if !user.add_to_watchlist(movie_id) {
            return Ok(false);
        }
        self.persist(user)?;
        Ok(true)
    }

    pub fn remove_from_watchlist(&mut self, movie_id: &str) -> AppResult<bool> {
        let mut user = self.require_user()?.clone();
        self.require_movie(movie_id)?;
        if !user.remove_from_watchlist(movie_id) {
            return Ok(false);
        }
        self.persist(user)?;
        Ok(true)
    }

    pub fn is_watched(&self, movie_id: &str) -> bool {
        self.current.as_ref().is_some_and(|u| u.has_watched(movie_id))
    }

    pub fn is_in_watchlist(&self, movie_id: &str) -> bool {
        self.current.as_ref().is_some_and(|u| u.in_watchlist(movie_id))
    }

    pub fn rate_movie(&self, movie_id: &str, rating: u8) -> AppResult<()> {
        self.require_user()?;
        self.require_movie(movie_id)?;
        self.ratings.set_rating(movie_id, rating)
    }

    pub fn rating(&self, movie_id: &str) -> Option<u8> {
        self.ratings.rating(movie_id)
    }

    /// Notification settings; missing or unreadable records read as defaults
    pub fn preferences(&self) -> AppResult<UserPreferences> {
        let user = self.require_user()?;
        Ok(load_json_or_discard(
            self.store.as_ref(),
            &StorageKey::UserPreferences(user.id.clone()),
        )
        .unwrap_or_default())
    }

    pub fn update_preferences(&self, preferences: UserPreferences) -> AppResult<()> {
        let user = self.require_user()?;
        save_json(
            self.store.as_ref(),
            &StorageKey::UserPreferences(user.id.clone()),
            &preferences,
        )
    }

    fn require_user(&self) -> AppResult<&User> {
        self.current.as_ref().ok_or(AppError::Unauthenticated)
    }

    fn require_movie(&self, movie_id: &str) -> AppResult<()> {
        if self.catalog.contains(movie_id) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Movie '{}'", movie_id)))
        }
    }

    fn persist(&mut self, user: User) -> AppResult<&User> {
        save_json(self.store.as_ref(), &StorageKey::CurrentUser, &user)?;
        Ok(self.current.insert(user))
    }
}
