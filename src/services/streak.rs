use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    clock::Clock,
    db::{load_json, load_json_or_discard, save_json, KeyValueStore, StorageKey},
    error::AppResult,
    models::{StreakData, User, WatchHistory},
};

/// Streak lengths that get a celebratory message
pub const STREAK_MILESTONES: [u32; 7] = [3, 7, 14, 30, 50, 100, 365];

/// Result of deriving a streak for a given day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak: StreakData,
    /// A watch today extended or restarted the streak; the snapshot must be saved
    pub changed: bool,
}

/// Derives the streak as of `today` from the previous snapshot and the history
///
/// Multiple watches on one day count once; `longest_streak` never decreases.
pub fn derive_streak(previous: &StreakData, history: &WatchHistory, today: NaiveDate) -> StreakUpdate {
    let mut streak = previous.clone();
    streak.longest_streak = streak.longest_streak.max(streak.current_streak);
    let yesterday = today.pred_opt();

    if history.has_watch_on(today) {
        streak.is_streak_active = true;

        if matches!(previous.last_watched_date, Some(last) if last >= today) {
            return StreakUpdate {
                streak,
                changed: false,
            };
        }

        if previous.last_watched_date.is_some() && previous.last_watched_date == yesterday {
            streak.current_streak = streak.current_streak.saturating_add(1);
            if streak.streak_start_date.is_none() {
                streak.streak_start_date = Some(today);
            }
        } else {
            streak.current_streak = 1;
            streak.streak_start_date = Some(today);
        }

        streak.last_watched_date = Some(today);
        streak.longest_streak = streak.longest_streak.max(streak.current_streak);

        return StreakUpdate {
            streak,
            changed: true,
        };
    }

    match previous.last_watched_date {
        // Grace period: still alive until today ends
        Some(last) if Some(last) == yesterday || last >= today => {
            streak.is_streak_active = true;
        }
        Some(_) => {
            streak.is_streak_active = false;
            streak.current_streak = 0;
            streak.streak_start_date = None;
        }
        None => {
            streak.is_streak_active = false;
            streak.current_streak = 0;
        }
    }

    StreakUpdate {
        streak,
        changed: false,
    }
}

/// Message for a streak that just hit a milestone length
pub fn streak_milestone_message(streak: u32) -> Option<&'static str> {
    match streak {
        3 => Some("Three days in a row! You're building a habit!"),
        7 => Some("Congrats on a week-long streak! Keep going!"),
        14 => Some("Two weeks strong! You're becoming a movie buff!"),
        30 => Some("Amazing! A month-long streak - that's dedication!"),
        50 => Some("50 days straight! You're a movie marathon master!"),
        100 => Some("Incredible 100-day streak! You're a true cinephile!"),
        365 => Some("A full year of movies every day! Legendary status achieved!"),
        _ => None,
    }
}

pub fn is_streak_milestone(streak: u32) -> bool {
    STREAK_MILESTONES.contains(&streak)
}

/// Reads and writes per-user streak state
///
/// `record_watch` appends to the watch history and saves a fresh snapshot.
/// `calculate_streak` derives the view for today from what is stored.
#[derive(Clone)]
pub struct StreakTracker {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl StreakTracker {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Watch log for a user; unreadable logs read as empty
    pub fn watch_history(&self, user_id: &str) -> WatchHistory {
        load_json_or_discard(
            self.store.as_ref(),
            &StorageKey::WatchHistory(user_id.to_string()),
        )
        .unwrap_or_default()
    }

    /// Persisted snapshot, without deriving anything
    ///
    /// Fails if the stored snapshot is corrupt.
    pub fn stored_streak(&self, user_id: &str) -> AppResult<Option<StreakData>> {
        load_json(
            self.store.as_ref(),
            &StorageKey::StreakData(user_id.to_string()),
        )
    }

    /// Records that `movie_id` was watched today and persists the new streak
    pub fn record_watch(&self, user_id: &str, movie_id: &str) -> AppResult<StreakData> {
        let today = self.clock.today();
        let history_key = StorageKey::WatchHistory(user_id.to_string());

        let mut history = self.watch_history(user_id);
        if history.record(today, movie_id) {
            save_json(self.store.as_ref(), &history_key, &history)?;
        }

        let previous = self.previous_snapshot(user_id);
        let update = derive_streak(&previous, &history, today);
        save_json(
            self.store.as_ref(),
            &StorageKey::StreakData(user_id.to_string()),
            &update.streak,
        )?;

        tracing::debug!(
            user_id = %user_id,
            movie_id = %movie_id,
            current_streak = update.streak.current_streak,
            longest_streak = update.streak.longest_streak,
            "Recorded watch"
        );

        Ok(update.streak)
    }

    /// Current streak view for display
    ///
    /// Never fails: no user or no watched movies yields an empty streak, and
    /// unreadable state is treated as absent. Writes only when a watch recorded
    /// today is not yet reflected in the snapshot.
    pub fn calculate_streak(&self, user: Option<&User>) -> StreakData {
        let user = match user {
            Some(user) if !user.watched_movies.is_empty() => user,
            _ => return StreakData::default(),
        };

        let previous = self.previous_snapshot(&user.id);
        let history = self.watch_history(&user.id);
        let update = derive_streak(&previous, &history, self.clock.today());

        if update.changed {
            let key = StorageKey::StreakData(user.id.clone());
            if let Err(e) = save_json(self.store.as_ref(), &key, &update.streak) {
                tracing::warn!(user_id = %user.id, error = %e, "Failed to persist streak");
            }
        }

        update.streak
    }

    fn previous_snapshot(&self, user_id: &str) -> StreakData {
        load_json_or_discard(
            self.store.as_ref(),
            &StorageKey::StreakData(user_id.to_string()),
        )
        .unwrap_or_default()
    }
}
