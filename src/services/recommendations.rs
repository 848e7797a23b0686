use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use serde::Serialize;

use crate::{
    catalog::Catalog,
    models::{Movie, User},
};

/// Rating assumed for watched films the user never rated
pub const DEFAULT_RATING: u8 = 3;

const GENRE_WEIGHT: f64 = 2.0;
const DIRECTOR_WEIGHT: f64 = 1.5;

/// How much the user likes one genre or director
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Preference {
    pub name: String,
    /// Watched films contributing
    pub count: usize,
    /// Mean rating over those films
    pub score: f64,
}

/// Genre and director preferences, best liked first
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PreferenceProfile {
    pub genres: Vec<Preference>,
    pub directors: Vec<Preference>,
}

impl PreferenceProfile {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.directors.is_empty()
    }

    fn genre_score(&self, genre: &str) -> f64 {
        self.genres
            .iter()
            .find(|p| p.name == genre)
            .map_or(0.0, |p| p.score)
    }

    fn director_score(&self, director: &str) -> f64 {
        self.directors
            .iter()
            .find(|p| p.name == director)
            .map_or(0.0, |p| p.score)
    }
}

/// An unwatched film with its preference score
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredMovie {
    pub movie: Movie,
    pub score: f64,
}

#[derive(Default)]
struct Tally {
    count: usize,
    total: u32,
}

fn to_preferences(tallies: BTreeMap<&str, Tally>) -> Vec<Preference> {
    let mut preferences: Vec<Preference> = tallies
        .into_iter()
        .map(|(name, tally)| Preference {
            name: name.to_string(),
            count: tally.count,
            score: f64::from(tally.total) / tally.count as f64,
        })
        .collect();
    preferences.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    preferences
}

/// Builds the user's taste profile from watched films and their ratings
///
/// Each watched film adds its rating (or [`DEFAULT_RATING`]) to every one of
/// its genres and to its director. Ids missing from the catalog are skipped.
pub fn analyze_preferences(
    catalog: &Catalog,
    user: Option<&User>,
    ratings: &HashMap<String, u8>,
) -> PreferenceProfile {
    let Some(user) = user else {
        return PreferenceProfile::default();
    };

    let mut genres: BTreeMap<&str, Tally> = BTreeMap::new();
    let mut directors: BTreeMap<&str, Tally> = BTreeMap::new();

    for movie in user
        .watched_movies
        .iter()
        .filter_map(|id| catalog.get_by_id(id))
    {
        let rating = u32::from(ratings.get(&movie.id).copied().unwrap_or(DEFAULT_RATING));

        for genre in &movie.genre {
            let tally = genres.entry(genre.as_str()).or_default();
            tally.count += 1;
            tally.total += rating;
        }

        let tally = directors.entry(movie.director.as_str()).or_default();
        tally.count += 1;
        tally.total += rating;
    }

    PreferenceProfile {
        genres: to_preferences(genres),
        directors: to_preferences(directors),
    }
}

/// Genre scores count double, the director score one and a half times
pub fn score_movie(movie: &Movie, profile: &PreferenceProfile) -> f64 {
    let genre_score: f64 = movie.genre.iter().map(|g| profile.genre_score(g)).sum();
    GENRE_WEIGHT * genre_score + DIRECTOR_WEIGHT * profile.director_score(&movie.director)
}

/// Every unwatched film scored against the profile, highest first
///
/// Ties keep catalog order.
pub fn rank_movies(catalog: &Catalog, user: &User, profile: &PreferenceProfile) -> Vec<ScoredMovie> {
    let mut scored: Vec<ScoredMovie> = catalog
        .movies()
        .iter()
        .filter(|m| !user.has_watched(&m.id))
        .map(|m| ScoredMovie {
            movie: m.clone(),
            score: score_movie(m, profile),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored
}

/// Generates personalized watch recommendations
///
/// Users without a watch history (or without a user at all) get a random
/// sample of the catalog instead.
pub fn get_recommendations<R: Rng + ?Sized>(
    catalog: &Catalog,
    user: Option<&User>,
    ratings: &HashMap<String, u8>,
    count: usize,
    rng: &mut R,
) -> Vec<Movie> {
    let user = match user {
        Some(user) if !user.watched_movies.is_empty() => user,
        _ => return catalog.sample(count, rng),
    };

    let profile = analyze_preferences(catalog, Some(user), ratings);
    let recommendations: Vec<Movie> = rank_movies(catalog, user, &profile)
        .into_iter()
        .take(count)
        .map(|scored| scored.movie)
        .collect();

    tracing::debug!(
        user_id = %user.id,
        watched = user.watched_movies.len(),
        count = recommendations.len(),
        "Built preference recommendations"
    );

    recommendations
}
