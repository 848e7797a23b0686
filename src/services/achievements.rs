use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    catalog::Catalog,
    clock::Clock,
    db::{load_json_or_discard, save_json, KeyValueStore, StorageKey},
    models::{Achievement, AchievementCriterion, Movie, StreakData, User},
    services::streak::StreakTracker,
};

struct Milestone {
    threshold: u32,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
}

const MILESTONES: [Milestone; 11] = [
    Milestone { threshold: 1, name: "First Steps", description: "Watch your first movie", icon: "🎬" },
    Milestone { threshold: 5, name: "Getting Started", description: "Watch 5 movies", icon: "🎞️" },
    Milestone { threshold: 10, name: "Movie Enthusiast", description: "Watch 10 movies", icon: "🎦" },
    Milestone { threshold: 25, name: "Film Buff", description: "Watch 25 movies", icon: "🍿" },
    Milestone { threshold: 50, name: "Movie Marathon", description: "Watch 50 movies", icon: "🏆" },
    Milestone { threshold: 100, name: "Movie Maestro", description: "Watch 100 movies", icon: "🎭" },
    Milestone { threshold: 250, name: "Film Fanatic", description: "Watch 250 movies", icon: "💎" },
    Milestone { threshold: 500, name: "Movie Master", description: "Watch 500 movies", icon: "🌟" },
    Milestone { threshold: 750, name: "Cinematic Legend", description: "Watch 750 movies", icon: "👑" },
    Milestone { threshold: 1000, name: "1001 Movies Conqueror", description: "Watch 1000 movies", icon: "🏅" },
    Milestone { threshold: 1001, name: "Completed Journey", description: "Watch all 1001 movies", icon: "🌈" },
];

/// Genres with a tiered collection achievement
pub const COLLECTION_GENRES: [&str; 8] = [
    "Drama",
    "Comedy",
    "Action",
    "Romance",
    "Thriller",
    "Horror",
    "Sci-Fi",
    "Documentary",
];

/// Watched-count thresholds for genre tiers 1..=5
pub const GENRE_LEVELS: [u32; 5] = [5, 10, 25, 50, 100];

/// Directors whose complete catalog filmography is an achievement
pub const CURATED_DIRECTORS: [&str; 5] = [
    "Alfred Hitchcock",
    "Steven Spielberg",
    "Martin Scorsese",
    "Stanley Kubrick",
    "Akira Kurosawa",
];

struct Era {
    start_year: i32,
    name: &'static str,
    icon: &'static str,
}

const ERAS: [Era; 10] = [
    Era { start_year: 1920, name: "Roaring 20s", icon: "🎩" },
    Era { start_year: 1930, name: "Golden Age", icon: "🕰️" },
    Era { start_year: 1940, name: "The Forties", icon: "📻" },
    Era { start_year: 1950, name: "The Fifties", icon: "🏎️" },
    Era { start_year: 1960, name: "The Sixties", icon: "☮️" },
    Era { start_year: 1970, name: "The Seventies", icon: "🪩" },
    Era { start_year: 1980, name: "The Eighties", icon: "🕹️" },
    Era { start_year: 1990, name: "The Nineties", icon: "💽" },
    Era { start_year: 2000, name: "The Aughts", icon: "📱" },
    Era { start_year: 2010, name: "Twenty-Tens", icon: "📲" },
];

/// Most films an era asks for
const ERA_TARGET: u32 = 10;

/// Streak lengths, in days, with an achievement
pub const STREAK_THRESHOLDS: [u32; 6] = [3, 7, 14, 30, 50, 100];

/// Every achievement for `user`, unlocked first, then by completion ratio
///
/// `streak` is the stored snapshot; without one no streak achievements are
/// listed. Collection achievements with no progress are omitted.
pub fn calculate_achievements(
    catalog: &Catalog,
    user: Option<&User>,
    streak: Option<&StreakData>,
) -> Vec<Achievement> {
    let Some(user) = user else {
        return Vec::new();
    };

    let watched: HashSet<&str> = user.watched_movies.iter().map(String::as_str).collect();
    let watched_count = u32::try_from(user.watched_movies.len()).unwrap_or(u32::MAX);

    let mut achievements = milestone_achievements(watched_count);
    achievements.extend(genre_achievements(catalog, &watched));
    achievements.extend(director_achievements(catalog, &watched));
    achievements.extend(era_achievements(catalog, &watched));
    if let Some(streak) = streak {
        achievements.extend(streak_achievements(streak));
    }

    sort_achievements(&mut achievements);
    achievements
}

/// Unlocked before locked; within each group by descending completion ratio
pub fn sort_achievements(achievements: &mut [Achievement]) {
    achievements.sort_by(|a, b| {
        b.unlocked.cmp(&a.unlocked).then_with(|| {
            b.completion_ratio()
                .partial_cmp(&a.completion_ratio())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
}

struct Progress {
    current: u32,
    max: u32,
    unlocked: bool,
}

fn achievement(
    id: String,
    name: String,
    description: String,
    icon: &str,
    progress: Progress,
    criterion: AchievementCriterion,
) -> Achievement {
    Achievement {
        id,
        name,
        description,
        icon: icon.to_string(),
        achievement_type: criterion.achievement_type(),
        progress: progress.current,
        max: progress.max,
        unlocked: progress.unlocked,
        unlocked_at: None,
        level: None,
        criterion,
    }
}

fn milestone_achievements(watched_count: u32) -> Vec<Achievement> {
    MILESTONES
        .iter()
        .map(|m| {
            achievement(
                format!("watched-{}", m.threshold),
                m.name.to_string(),
                m.description.to_string(),
                m.icon,
                Progress {
                    current: watched_count.min(m.threshold),
                    max: m.threshold,
                    unlocked: watched_count >= m.threshold,
                },
                AchievementCriterion::WatchedCount {
                    threshold: m.threshold,
                },
            )
        })
        .collect()
}

fn count_watched<'a>(
    movies: impl IntoIterator<Item = &'a Movie>,
    watched: &HashSet<&str>,
) -> u32 {
    let count = movies
        .into_iter()
        .filter(|m| watched.contains(m.id.as_str()))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// (level, max shown) for a genre count; max is the next unreached tier
fn genre_level(count: u32) -> (u8, u32) {
    let level = GENRE_LEVELS.iter().filter(|&&t| count >= t).count();
    let max = GENRE_LEVELS
        .get(level)
        .copied()
        .unwrap_or(GENRE_LEVELS[GENRE_LEVELS.len() - 1]);
    (level as u8, max)
}

fn genre_achievements(catalog: &Catalog, watched: &HashSet<&str>) -> Vec<Achievement> {
    COLLECTION_GENRES
        .iter()
        .filter_map(|&genre| {
            let count = count_watched(catalog.by_genre(genre), watched);
            if count == 0 {
                return None;
            }

            let (level, max) = genre_level(count);
            let mut a = achievement(
                format!("genre-{}", genre.to_lowercase()),
                format!("{} Aficionado", genre),
                format!("Watch {} {} movies", max, genre),
                genre_icon(genre),
                Progress {
                    current: count.min(max),
                    max,
                    unlocked: level > 0,
                },
                AchievementCriterion::Genre {
                    genre: genre.to_string(),
                },
            );
            a.level = Some(level);
            Some(a)
        })
        .collect()
}

fn director_achievements(catalog: &Catalog, watched: &HashSet<&str>) -> Vec<Achievement> {
    CURATED_DIRECTORS
        .iter()
        .filter_map(|&director| {
            let films = catalog.by_director(director);
            let total = u32::try_from(films.len()).unwrap_or(u32::MAX);
            let count = count_watched(films, watched);
            if total == 0 || count == 0 {
                return None;
            }

            Some(achievement(
                format!("director-{}", director_slug(director)),
                format!("{} Expert", surname(director)),
                format!("Watch {} movies by {}", total, director),
                "🎬",
                Progress {
                    current: count,
                    max: total,
                    unlocked: count == total,
                },
                AchievementCriterion::Director {
                    director: director.to_string(),
                },
            ))
        })
        .collect()
}

fn era_achievements(catalog: &Catalog, watched: &HashSet<&str>) -> Vec<Achievement> {
    ERAS.iter()
        .filter_map(|era| {
            let films = catalog.by_decade(era.start_year, era.start_year + 9);
            let total = u32::try_from(films.len()).unwrap_or(u32::MAX);
            let count = count_watched(films, watched);
            if total == 0 || count == 0 {
                return None;
            }

            let threshold = ERA_TARGET.min(total);
            Some(achievement(
                format!("era-{}s", era.start_year),
                format!("{} Explorer", era.name),
                format!("Watch {} movies from {}s", threshold, era.start_year),
                era.icon,
                Progress {
                    current: count.min(threshold),
                    max: threshold,
                    unlocked: count >= threshold,
                },
                AchievementCriterion::Era {
                    start_year: era.start_year,
                },
            ))
        })
        .collect()
}

fn streak_achievements(streak: &StreakData) -> Vec<Achievement> {
    let best = streak.best();
    STREAK_THRESHOLDS
        .iter()
        .filter(|&&days| days <= best)
        .map(|&days| {
            achievement(
                format!("streak-{}", days),
                streak_achievement_name(days),
                format!("Maintain a movie watching streak for {} days", days),
                "🔥",
                Progress {
                    current: streak.longest_streak.min(days),
                    max: days,
                    unlocked: streak.longest_streak >= days,
                },
                AchievementCriterion::Streak { days },
            )
        })
        .collect()
}

fn streak_achievement_name(days: u32) -> String {
    match days {
        3 => "3-Day Streak".to_string(),
        7 => "Weekly Watcher".to_string(),
        14 => "Fortnight Cinephile".to_string(),
        30 => "Monthly Movie Buff".to_string(),
        50 => "The Committed".to_string(),
        100 => "Century Club".to_string(),
        _ => format!("{}-Day Streak", days),
    }
}

pub fn genre_icon(genre: &str) -> &'static str {
    match genre {
        "Drama" => "🎭",
        "Comedy" => "😂",
        "Action" => "💥",
        "Romance" => "❤️",
        "Thriller" => "😰",
        "Horror" => "👻",
        "Sci-Fi" => "🚀",
        "Documentary" => "📽️",
        "Western" => "🤠",
        "Adventure" => "🗺️",
        "Crime" => "🔪",
        "Fantasy" => "🧙",
        "Animation" => "🧸",
        "Family" => "👨‍👩‍👧‍👦",
        "Mystery" => "🔍",
        "Biography" => "📚",
        "Music" => "🎵",
        "War" => "⚔️",
        "History" => "📜",
        _ => "🎬",
    }
}

/// "Alfred Hitchcock" → "alfred-hitchcock"
pub fn director_slug(director: &str) -> String {
    director
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Last word of a name
pub(crate) fn surname(name: &str) -> &str {
    name.split_whitespace().last().unwrap_or(name)
}

/// Evaluates achievements against stored state and keeps the unlock ledger
#[derive(Clone)]
pub struct AchievementTracker {
    catalog: Arc<Catalog>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    streaks: StreakTracker,
}

impl AchievementTracker {
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let streaks = StreakTracker::new(store.clone(), clock.clone());
        Self {
            catalog,
            store,
            clock,
            streaks,
        }
    }

    /// Stored streak snapshot, `None` if missing or unreadable
    pub fn streak_snapshot(&self, user: &User) -> Option<StreakData> {
        match self.streaks.stored_streak(&user.id) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(
                    user_id = %user.id,
                    error = %e,
                    "Unreadable streak data, skipping streak achievements"
                );
                None
            }
        }
    }

    /// Full achievement list with `unlocked_at` filled from the ledger
    ///
    /// Achievements seen unlocked for the first time are stamped with the
    /// current time; achievements that became locked again lose their stamp.
    pub fn evaluate(&self, user: Option<&User>) -> Vec<Achievement> {
        let Some(user) = user else {
            return Vec::new();
        };

        let streak = self.streak_snapshot(user);
        let mut achievements = calculate_achievements(&self.catalog, Some(user), streak.as_ref());

        let key = StorageKey::AchievementUnlocks(user.id.clone());
        let previous: BTreeMap<String, DateTime<Utc>> =
            load_json_or_discard(self.store.as_ref(), &key).unwrap_or_default();

        let now = self.clock.now();
        let mut ledger = BTreeMap::new();
        for a in achievements.iter_mut().filter(|a| a.unlocked) {
            let unlocked_at = previous.get(&a.id).copied().unwrap_or(now);
            a.unlocked_at = Some(unlocked_at);
            ledger.insert(a.id.clone(), unlocked_at);
        }

        if ledger != previous {
            let newly: Vec<&String> = ledger.keys().filter(|id| !previous.contains_key(*id)).collect();
            if !newly.is_empty() {
                tracing::info!(user_id = %user.id, unlocked = ?newly, "Achievements unlocked");
            }
            if let Err(e) = save_json(self.store.as_ref(), &key, &ledger) {
                tracing::warn!(user_id = %user.id, error = %e, "Failed to persist unlock ledger");
            }
        }

        achievements
    }
}
