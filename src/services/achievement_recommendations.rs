use std::collections::HashMap;

use crate::{
    catalog::Catalog,
    models::{
        Achievement, AchievementCriterion, AchievementType, Movie, MovieRecommendation, ReasonType,
        RecommendationReason, StreakData, User,
    },
    services::achievements::{calculate_achievements, surname},
};

/// Unwatched films suggested per genre or era achievement
const FILMS_PER_ACHIEVEMENT: usize = 2;

fn percent_at_least(a: &Achievement, percent: u32) -> bool {
    u64::from(a.progress) * 100 >= u64::from(a.max) * u64::from(percent)
}

fn genre_priority(a: &Achievement) -> u32 {
    if percent_at_least(a, 80) {
        5
    } else if percent_at_least(a, 60) {
        4
    } else if percent_at_least(a, 40) {
        3
    } else {
        2
    }
}

fn director_priority(a: &Achievement) -> u32 {
    if percent_at_least(a, 75) {
        6
    } else if percent_at_least(a, 50) {
        5
    } else if percent_at_least(a, 25) {
        4
    } else {
        3
    }
}

fn era_priority(a: &Achievement) -> u32 {
    if percent_at_least(a, 80) {
        4
    } else if percent_at_least(a, 60) {
        3
    } else if percent_at_least(a, 40) {
        2
    } else {
        1
    }
}

fn unwatched<'a>(movies: Vec<&'a Movie>, user: &User) -> Vec<&'a Movie> {
    movies
        .into_iter()
        .filter(|m| !user.has_watched(&m.id))
        .collect()
}

/// Merges reasons per movie while keeping first-seen order
#[derive(Default)]
struct RecommendationSet {
    items: Vec<MovieRecommendation>,
    index: HashMap<String, usize>,
}

impl RecommendationSet {
    fn add(&mut self, movie: &Movie, reason: RecommendationReason) {
        match self.index.get(&movie.id) {
            Some(&i) => self.items[i].add_reason(reason),
            None => {
                self.index.insert(movie.id.clone(), self.items.len());
                self.items.push(MovieRecommendation::new(movie.clone(), reason));
            }
        }
    }
}

/// Unwatched films that advance the user's locked, started achievements
///
/// Genre achievements come first, then directors, then eras; a film picked
/// for several achievements collects every reason and their summed priority.
/// The result is ordered by score, highest first, and holds at most `count`.
pub fn achievement_recommendations(
    catalog: &Catalog,
    user: Option<&User>,
    achievements: &[Achievement],
    count: usize,
) -> Vec<MovieRecommendation> {
    let Some(user) = user else {
        return Vec::new();
    };

    let in_progress: Vec<&Achievement> = achievements
        .iter()
        .filter(|a| !a.unlocked && a.progress > 0)
        .collect();

    let mut set = RecommendationSet::default();

    for a in &in_progress {
        if let AchievementCriterion::Genre { genre } = &a.criterion {
            let priority = genre_priority(a);
            for movie in unwatched(catalog.by_genre(genre), user)
                .into_iter()
                .take(FILMS_PER_ACHIEVEMENT)
            {
                set.add(
                    movie,
                    RecommendationReason {
                        reason_type: ReasonType::Collection,
                        message: format!(
                            "Watch to progress your {} collection ({} more needed)",
                            genre,
                            a.remaining()
                        ),
                        achievement_id: Some(a.id.clone()),
                        priority,
                    },
                );
            }
        }
    }

    for a in &in_progress {
        if let AchievementCriterion::Director { director } = &a.criterion {
            let priority = director_priority(a);
            for movie in unwatched(catalog.by_director(director), user) {
                set.add(
                    movie,
                    RecommendationReason {
                        reason_type: ReasonType::Director,
                        message: format!(
                            "Watch to complete your {} filmography ({} more needed)",
                            surname(director),
                            a.remaining()
                        ),
                        achievement_id: Some(a.id.clone()),
                        priority,
                    },
                );
            }
        }
    }

    for a in &in_progress {
        if let AchievementCriterion::Era { start_year } = a.criterion {
            let priority = era_priority(a);
            for movie in unwatched(catalog.by_decade(start_year, start_year + 9), user)
                .into_iter()
                .take(FILMS_PER_ACHIEVEMENT)
            {
                set.add(
                    movie,
                    RecommendationReason {
                        reason_type: ReasonType::Era,
                        message: format!(
                            "Watch to explore more of the {}s ({} more needed)",
                            start_year,
                            a.remaining()
                        ),
                        achievement_id: Some(a.id.clone()),
                        priority,
                    },
                );
            }
        }
    }

    let mut recommendations = set.items;
    recommendations.sort_by(|a, b| b.score.cmp(&a.score));
    recommendations.truncate(count);

    tracing::debug!(
        user_id = %user.id,
        count = recommendations.len(),
        "Built achievement recommendations"
    );

    recommendations
}

/// The achievement watching `movie` would unlock or advance the most
///
/// A newly unlocked milestone wins, then a newly unlocked collection, then any
/// other unlock. Without an unlock, the achievement whose completion ratio
/// grows the most is returned. `None` if the movie is already watched or
/// nothing moves.
pub fn next_achievement_for_movie(
    catalog: &Catalog,
    user: Option<&User>,
    streak: Option<&StreakData>,
    movie: &Movie,
) -> Option<Achievement> {
    let user = user?;
    if user.has_watched(&movie.id) {
        return None;
    }

    let current = calculate_achievements(catalog, Some(user), streak);
    let current: HashMap<&str, &Achievement> =
        current.iter().map(|a| (a.id.as_str(), a)).collect();

    let mut simulated_user = user.clone();
    simulated_user.mark_watched(&movie.id);
    let simulated = calculate_achievements(catalog, Some(&simulated_user), streak);

    let newly_unlocked: Vec<&Achievement> = simulated
        .iter()
        .filter(|a| a.unlocked && !current.get(a.id.as_str()).is_some_and(|c| c.unlocked))
        .collect();

    if !newly_unlocked.is_empty() {
        let pick = newly_unlocked
            .iter()
            .find(|a| a.achievement_type == AchievementType::Milestone)
            .or_else(|| {
                newly_unlocked
                    .iter()
                    .find(|a| a.achievement_type == AchievementType::Collection)
            })
            .unwrap_or(&newly_unlocked[0]);
        return Some((*pick).clone());
    }

    let mut best: Option<(&Achievement, f64)> = None;
    for a in simulated.iter().filter(|a| !a.unlocked) {
        let (before_progress, before_ratio) = match current.get(a.id.as_str()) {
            Some(c) => (c.progress, c.completion_ratio()),
            None => (0, 0.0),
        };
        if a.progress <= before_progress {
            continue;
        }

        let gain = a.completion_ratio() - before_ratio;
        if best.map_or(true, |(_, top)| gain > top) {
            best = Some((a, gain));
        }
    }

    best.map(|(a, _)| a.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user_with(watched: &[&str]) -> User {
        let mut user = User::new("Ana".to_string(), None, Utc::now());
        for id in watched {
            user.mark_watched(id);
        }
        user
    }

    fn recommend(watched: &[&str], count: usize) -> Vec<MovieRecommendation> {
        let catalog = Catalog::builtin();
        let user = user_with(watched);
        let achievements = calculate_achievements(&catalog, Some(&user), None);
        achievement_recommendations(&catalog, Some(&user), &achievements, count)
    }

    fn next_for(watched: &[&str], movie_id: &str) -> Option<Achievement> {
        let catalog = Catalog::builtin();
        let movie = catalog.get_by_id(movie_id).unwrap();
        next_achievement_for_movie(&catalog, Some(&user_with(watched)), None, movie)
    }

    #[test]
    fn test_five_watched_recommendations() {
        let recs = recommend(&["1", "2", "3", "4", "5"], 5);
        let ids: Vec<&str> = recs.iter().map(|r| r.movie.id.as_str()).collect();
        assert_eq!(ids, vec!["6", "8", "9"]);

        let casablanca = &recs[0];
        assert_eq!(casablanca.score, 6);
        assert_eq!(casablanca.reasons.len(), 2);
        assert_eq!(
            casablanca.reasons[0].message,
            "Watch to progress your Drama collection (2 more needed)"
        );
        assert_eq!(casablanca.reasons[0].priority, 4);
        assert_eq!(casablanca.reasons[1].reason_type, ReasonType::Era);
        assert_eq!(
            casablanca.reasons[1].message,
            "Watch to explore more of the 1940s (1 more needed)"
        );

        assert_eq!(recs[1].score, 4);
        assert_eq!(recs[2].score, 2);
    }

    #[test]
    fn test_recommendations_skip_watched_and_respect_count() {
        let watched = ["1", "2", "3", "4", "5"];
        let recs = recommend(&watched, 2);
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| !watched.contains(&r.movie.id.as_str())));

        for pair in recs.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_no_user_or_no_progress_gives_nothing() {
        let catalog = Catalog::builtin();
        assert!(achievement_recommendations(&catalog, None, &[], 5).is_empty());
        assert!(recommend(&[], 5).is_empty());
    }

    #[test]
    fn test_director_reason_priority() {
        let catalog = Catalog::new(vec![
            Movie {
                id: "h1".to_string(),
                director: "Alfred Hitchcock".to_string(),
                ..Catalog::builtin().movies()[3].clone()
            },
            Movie {
                id: "h2".to_string(),
                director: "Alfred Hitchcock".to_string(),
                ..Catalog::builtin().movies()[3].clone()
            },
        ]);
        let user = user_with(&["h1"]);
        let achievements = calculate_achievements(&catalog, Some(&user), None);
        let recs = achievement_recommendations(&catalog, Some(&user), &achievements, 5);

        assert_eq!(recs.len(), 1);
        let director = recs[0]
            .reasons
            .iter()
            .find(|r| r.reason_type == ReasonType::Director)
            .unwrap();
        assert_eq!(director.priority, 5);
        assert_eq!(
            director.message,
            "Watch to complete your Hitchcock filmography (1 more needed)"
        );
    }

    #[test]
    fn test_priority_bands() {
        let mut a = calculate_achievements(&Catalog::builtin(), Some(&user_with(&["1"])), None)
            .into_iter()
            .find(|a| a.id == "genre-drama")
            .unwrap();

        a.progress = 4;
        assert_eq!(genre_priority(&a), 5);
        a.progress = 2;
        assert_eq!(genre_priority(&a), 3);
        assert_eq!(era_priority(&a), 2);
        a.progress = 1;
        assert_eq!(director_priority(&a), 3);
    }

    #[test]
    fn test_next_achievement_prefers_milestone() {
        let next = next_for(&["1", "2", "3", "4"], "5").unwrap();
        assert_eq!(next.id, "watched-5");
        assert!(next.unlocked);
    }

    #[test]
    fn test_next_achievement_first_movie() {
        assert_eq!(next_for(&[], "4").unwrap().id, "watched-1");
    }

    #[test]
    fn test_next_achievement_other_unlock() {
        assert_eq!(next_for(&["1"], "4").unwrap().id, "director-alfred-hitchcock");
    }

    #[test]
    fn test_next_achievement_largest_gain() {
        let next = next_for(&["1"], "2").unwrap();
        assert_eq!(next.id, "era-1940s");
        assert!(!next.unlocked);
        assert_eq!((next.progress, next.max), (1, 2));
    }

    #[test]
    fn test_next_achievement_watched_movie_is_none() {
        assert!(next_for(&["1"], "1").is_none());
    }
}
