use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily watching streak snapshot, persisted per user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub last_watched_date: Option<NaiveDate>,
    #[serde(default)]
    pub streak_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_streak_active: bool,
}

impl StreakData {
    /// Highest streak this user has reached
    pub fn best(&self) -> u32 {
        self.current_streak.max(self.longest_streak)
    }
}

/// Movies watched per calendar day; append-only
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WatchHistory(BTreeMap<NaiveDate, Vec<String>>);

impl WatchHistory {
    /// Returns false if the pair was already recorded
    pub fn record(&mut self, date: NaiveDate, movie_id: &str) -> bool {
        let day = self.0.entry(date).or_default();
        if day.iter().any(|id| id == movie_id) {
            return false;
        }
        day.push(movie_id.to_string());
        true
    }

    pub fn watched_on(&self, date: NaiveDate) -> &[String] {
        self.0.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_watch_on(&self, date: NaiveDate) -> bool {
        !self.watched_on(date).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_record_is_idempotent_per_day() {
        let mut history = WatchHistory::default();
        assert!(history.record(day(1), "1"));
        assert!(!history.record(day(1), "1"));
        assert!(history.record(day(1), "2"));
        assert!(history.record(day(2), "1"));

        assert_eq!(history.watched_on(day(1)), ["1", "2"]);
        assert!(history.has_watch_on(day(2)));
        assert!(!history.has_watch_on(day(3)));
    }

    #[test]
    fn test_history_json_is_keyed_by_iso_date() {
        let mut history = WatchHistory::default();
        history.record(day(7), "4");
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"{"2024-05-07":["4"]}"#);

        let back: WatchHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }

    #[test]
    fn test_streak_data_reads_partial_records() {
        let data: StreakData =
            serde_json::from_str(r#"{"currentStreak":2,"lastWatchedDate":"2024-05-07"}"#).unwrap();
        assert_eq!(data.current_streak, 2);
        assert_eq!(data.longest_streak, 0);
        assert_eq!(data.best(), 2);
        assert_eq!(data.last_watched_date, Some(day(7)));
    }
}
