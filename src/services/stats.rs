use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{
    catalog::{Catalog, FULL_LIST_SIZE},
    models::{DecadeCount, DirectorCount, GenreCount, Movie, User, WatchStats},
};

const TOP_DIRECTORS: usize = 5;

/// Counts keyed by name, most frequent first, ties alphabetical
fn ranked(counts: BTreeMap<&str, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

pub fn watch_stats(
    catalog: &Catalog,
    user: Option<&User>,
    ratings: &HashMap<String, u8>,
) -> WatchStats {
    let Some(user) = user else {
        return WatchStats {
            remaining_count: FULL_LIST_SIZE,
            ..Default::default()
        };
    };

    let watched_ids: HashSet<&str> = user.watched_movies.iter().map(String::as_str).collect();
    let watched: Vec<&Movie> = catalog
        .movies()
        .iter()
        .filter(|m| watched_ids.contains(m.id.as_str()))
        .collect();

    let rated: Vec<u8> = user
        .watched_movies
        .iter()
        .filter_map(|id| ratings.get(id).copied())
        .collect();
    let average_rating = if rated.is_empty() {
        None
    } else {
        Some(rated.iter().map(|&r| f64::from(r)).sum::<f64>() / rated.len() as f64)
    };

    let mut genres: BTreeMap<&str, usize> = BTreeMap::new();
    let mut directors: BTreeMap<&str, usize> = BTreeMap::new();
    let mut decades: BTreeMap<i32, usize> = BTreeMap::new();
    for movie in &watched {
        for genre in &movie.genre {
            *genres.entry(genre.as_str()).or_default() += 1;
        }
        *directors.entry(movie.director.as_str()).or_default() += 1;
        if let Some(decade) = movie.decade_start() {
            *decades.entry(decade).or_default() += 1;
        }
    }

    let total = watched.len();
    let genres = ranked(genres)
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre,
            count,
            percentage: count as f64 * 100.0 / total as f64,
        })
        .collect();

    let top_directors = ranked(directors)
        .into_iter()
        .take(TOP_DIRECTORS)
        .map(|(director, count)| DirectorCount { director, count })
        .collect();

    let decades = decades
        .into_iter()
        .map(|(start, count)| DecadeCount {
            decade: format!("{}s", start),
            count,
        })
        .collect();

    WatchStats {
        watched_count: user.watched_movies.len(),
        remaining_count: FULL_LIST_SIZE.saturating_sub(user.watched_movies.len()),
        average_rating,
        rated_count: rated.len(),
        genres,
        top_directors,
        decades,
    }
}
