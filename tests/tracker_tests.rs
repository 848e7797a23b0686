use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use cinetrack::{
    clock::{Clock, FixedClock},
    config::Config,
    db::{KeyValueStore, MemoryStore, StorageKey},
    models::AchievementType,
    services::SessionStore,
    AppState,
};

struct Harness {
    state: AppState,
    store: Arc<MemoryStore>,
    clock: Arc<FixedClock>,
}

fn create_harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::at_date(
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
    ));
    let config = Config {
        login_delay_ms: 0,
        ..Config::default()
    };
    let state = AppState::new(config, store.clone(), clock.clone());
    Harness {
        state,
        store,
        clock,
    }
}

async fn logged_in(harness: &Harness) -> SessionStore {
    let mut session = harness.state.open_session();
    session.login("Ana", Some("ana@example.com")).await.unwrap();
    session
}

fn stored_json(store: &MemoryStore, key: &StorageKey) -> Value {
    let raw = store.get(key).unwrap().expect("value should be stored");
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_five_watched_end_to_end() {
    let harness = create_harness();
    let mut session = logged_in(&harness).await;

    for id in ["1", "2", "3", "4", "5"] {
        session.mark_watched(id).unwrap();
    }
    session.rate_movie("1", 5).unwrap();
    session.rate_movie("2", 4).unwrap();
    let user = session.current_user().cloned();

    let achievements = harness.state.calculate_achievements(user.as_ref());
    let five = achievements.iter().find(|a| a.id == "watched-5").unwrap();
    assert!(five.unlocked);
    assert_eq!(five.unlocked_at, Some(harness.clock.now()));
    let ten = achievements.iter().find(|a| a.id == "watched-10").unwrap();
    assert_eq!((ten.progress, ten.max, ten.unlocked), (5, 10, false));

    let picks = harness.state.achievement_recommendations(user.as_ref());
    assert_eq!(picks[0].movie.id, "6");
    assert_eq!(picks[0].score, 6);

    let stats = harness.state.watch_stats(user.as_ref());
    assert_eq!(stats.watched_count, 5);
    assert_eq!(stats.remaining_count, 996);
    assert_eq!(stats.average_rating, Some(4.5));
    assert_eq!(stats.genres[0].genre, "Drama");

    let streak = harness.state.calculate_streak(user.as_ref());
    assert_eq!(streak.current_streak, 1);
    assert!(streak.is_streak_active);
}

#[tokio::test]
async fn test_empty_user() {
    let harness = create_harness();
    let session = logged_in(&harness).await;
    let user = session.current_user();

    let achievements = harness.state.calculate_achievements(user);
    assert!(!achievements.is_empty());
    assert!(achievements
        .iter()
        .all(|a| !a.unlocked && a.achievement_type == AchievementType::Milestone));

    assert!(harness.state.achievement_recommendations(user).is_empty());
    assert_eq!(harness.state.calculate_streak(user).current_streak, 0);
    assert_eq!(harness.state.recommendations(user).len(), 6);
}

#[tokio::test]
async fn test_streak_over_several_days() {
    let harness = create_harness();
    let mut session = logged_in(&harness).await;

    session.mark_watched("1").unwrap();
    harness.clock.advance_days(1);
    session.mark_watched("2").unwrap();
    session.mark_watched("3").unwrap();
    harness.clock.advance_days(1);
    session.mark_watched("4").unwrap();

    let streak = harness.state.calculate_streak(session.current_user());
    assert_eq!(streak.current_streak, 3);
    assert_eq!(streak.longest_streak, 3);
    assert_eq!(
        streak.streak_start_date,
        NaiveDate::from_ymd_opt(2024, 3, 10)
    );

    // Two days without watching breaks the streak but keeps the record
    harness.clock.advance_days(2);
    let streak = harness.state.calculate_streak(session.current_user());
    assert_eq!(streak.current_streak, 0);
    assert_eq!(streak.longest_streak, 3);
    assert!(!streak.is_streak_active);

    let achievements = harness.state.calculate_achievements(session.current_user());
    assert!(achievements.iter().any(|a| a.id == "streak-3" && a.unlocked));

    // Watching again starts over from one
    session.mark_watched("5").unwrap();
    let streak = harness.state.calculate_streak(session.current_user());
    assert_eq!(streak.current_streak, 1);
    assert_eq!(streak.longest_streak, 3);
}

#[tokio::test]
async fn test_persisted_records_use_camel_case() {
    let harness = create_harness();
    let mut session = logged_in(&harness).await;
    session.mark_watched("7").unwrap();
    session.add_to_watchlist("8").unwrap();
    let user_id = session.current_user().unwrap().id.clone();

    let user = stored_json(&harness.store, &StorageKey::CurrentUser);
    assert_eq!(user["name"], "Ana");
    assert_eq!(user["watchedMovies"], serde_json::json!(["7"]));
    assert_eq!(user["watchlist"], serde_json::json!(["8"]));
    assert!(user["joinedDate"].is_string());

    let streak = stored_json(&harness.store, &StorageKey::StreakData(user_id.clone()));
    assert_eq!(streak["currentStreak"], 1);
    assert_eq!(streak["lastWatchedDate"], "2024-03-10");
    assert_eq!(streak["isStreakActive"], true);

    let history = stored_json(&harness.store, &StorageKey::WatchHistory(user_id));
    assert_eq!(history["2024-03-10"], serde_json::json!(["7"]));
}

#[tokio::test]
async fn test_session_survives_reopen() {
    let harness = create_harness();
    let mut session = logged_in(&harness).await;
    session.mark_watched("2").unwrap();
    let before = session.current_user().cloned();

    let reopened = harness.state.open_session();
    assert_eq!(reopened.current_user().cloned(), before);
    assert!(reopened.is_watched("2"));

    let mut reopened = reopened;
    reopened.logout().unwrap();
    assert!(harness.state.open_session().current_user().is_none());
}

#[tokio::test]
async fn test_reopen_preserves_list_order() {
    let harness = create_harness();
    let mut session = logged_in(&harness).await;

    for id in ["9", "2", "7", "1"] {
        session.mark_watched(id).unwrap();
    }
    session.add_to_watchlist("10").unwrap();
    session.add_to_watchlist("3").unwrap();

    let reopened = harness.state.open_session();
    let user = reopened.current_user().unwrap();
    assert_eq!(user.watched_movies, vec!["9", "2", "7", "1"]);
    assert_eq!(user.watchlist, vec!["10", "3"]);
    assert_eq!(reopened.current_user(), session.current_user());
}

#[tokio::test]
async fn test_unlock_time_survives_later_evaluations() {
    let harness = create_harness();
    let mut session = logged_in(&harness).await;
    session.mark_watched("1").unwrap();
    let first_seen = harness.clock.now();
    harness.state.calculate_achievements(session.current_user());

    harness.clock.advance_days(10);
    let achievements = harness.state.calculate_achievements(session.current_user());
    let first = achievements.iter().find(|a| a.id == "watched-1").unwrap();
    assert_eq!(first.unlocked_at, Some(first_seen));
}

#[tokio::test]
async fn test_recommendations_never_include_watched() {
    let harness = create_harness();
    let mut session = logged_in(&harness).await;

    for id in ["1", "4", "6", "9"] {
        session.mark_watched(id).unwrap();
        let user = session.current_user();

        for movie in harness.state.recommendations(user) {
            assert!(!session.is_watched(&movie.id));
        }
        for pick in harness.state.achievement_recommendations(user) {
            assert!(!session.is_watched(&pick.movie.id));
        }
    }
}

#[tokio::test]
async fn test_next_achievement_for_movie() {
    let harness = create_harness();
    let mut session = logged_in(&harness).await;
    let psycho = harness.state.catalog.get_by_id("4").unwrap().clone();

    let next = harness
        .state
        .next_achievement_for_movie(session.current_user(), &psycho)
        .unwrap();
    assert_eq!(next.id, "watched-1");

    session.mark_watched("4").unwrap();
    assert!(harness
        .state
        .next_achievement_for_movie(session.current_user(), &psycho)
        .is_none());
}
