use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use rand::{seq::SliceRandom, Rng};

use crate::error::{AppError, AppResult};
use crate::models::{Movie, MovieFilter};

mod builtin;

/// Size of the full "1001 movies" list the milestones and stats count against
pub const FULL_LIST_SIZE: usize = 1001;

/// Read-only access to the reference film list
///
/// Lookups never fail: unknown ids yield `None` and filters that match nothing
/// yield an empty list. Lists keep catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    /// The bundled reference list
    pub fn builtin() -> Self {
        Self::new(builtin::movies())
    }

    /// Parses a JSON array of movies; ids must be unique
    pub fn from_json(json: &str) -> AppResult<Self> {
        let movies: Vec<Movie> = serde_json::from_str(json)?;

        let mut seen = BTreeSet::new();
        for movie in &movies {
            if !seen.insert(movie.id.as_str()) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate movie id in catalog: {}",
                    movie.id
                )));
            }
        }

        Ok(Self::new(movies))
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_by_id(id).is_some()
    }

    /// Uniformly random film
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Movie> {
        self.movies.choose(rng)
    }

    pub fn random_movie(&self) -> Option<&Movie> {
        self.random(&mut rand::thread_rng())
    }

    /// Film of the day: a fixed function of the date and catalog order
    pub fn movie_of_the_day(&self, date: NaiveDate) -> Option<&Movie> {
        if self.movies.is_empty() {
            return None;
        }
        let index = date.num_days_from_ce().rem_euclid(self.movies.len() as i32);
        self.movies.get(index as usize)
    }

    /// Up to `count` distinct films in random order
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Movie> {
        let mut shuffled = self.movies.clone();
        shuffled.shuffle(rng);
        shuffled.truncate(count);
        shuffled
    }

    pub fn by_genre(&self, genre: &str) -> Vec<&Movie> {
        self.movies.iter().filter(|m| m.has_genre(genre)).collect()
    }

    pub fn by_director(&self, director: &str) -> Vec<&Movie> {
        self.movies
            .iter()
            .filter(|m| m.director == director)
            .collect()
    }

    /// Films released between the two years, both inclusive
    pub fn by_decade(&self, start_year: i32, end_year: i32) -> Vec<&Movie> {
        self.movies
            .iter()
            .filter(|m| {
                m.release_year()
                    .is_some_and(|year| year >= start_year && year <= end_year)
            })
            .collect()
    }

    pub fn filter(&self, criteria: &MovieFilter) -> Vec<&Movie> {
        self.movies.iter().filter(|m| criteria.matches(m)).collect()
    }

    pub fn all_genres(&self) -> Vec<String> {
        let genres: BTreeSet<&str> = self
            .movies
            .iter()
            .flat_map(|m| m.genre.iter().map(String::as_str))
            .collect();
        genres.into_iter().map(str::to_string).collect()
    }

    pub fn all_directors(&self) -> Vec<String> {
        let directors: BTreeSet<&str> = self.movies.iter().map(|m| m.director.as_str()).collect();
        directors.into_iter().map(str::to_string).collect()
    }

    pub fn all_countries(&self) -> Vec<String> {
        let countries: BTreeSet<&str> = self.movies.iter().flat_map(Movie::countries).collect();
        countries.into_iter().map(str::to_string).collect()
    }

    /// Decade labels present in the catalog, e.g. "1940s", oldest first
    pub fn decades(&self) -> Vec<String> {
        let decades: BTreeSet<i32> = self.movies.iter().filter_map(Movie::decade_start).collect();
        decades.into_iter().map(|d| format!("{}s", d)).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn ids(movies: &[&Movie]) -> Vec<String> {
        movies.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 10);
        assert_eq!(
            catalog.get_by_id("1").map(|m| m.title.as_str()),
            Some("The Godfather")
        );
        assert!(catalog.get_by_id("1002").is_none());
    }

    #[test]
    fn test_by_genre_preserves_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            ids(&catalog.by_genre("Drama")),
            vec!["1", "2", "3", "6", "8", "10"]
        );
        assert!(catalog.by_genre("Documentary").is_empty());
    }

    #[test]
    fn test_by_director() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.by_director("Alfred Hitchcock")), vec!["4"]);
        assert!(catalog.by_director("Steven Spielberg").is_empty());
    }

    #[test]
    fn test_by_decade_is_inclusive() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.by_decade(1950, 1959)), vec!["3", "9"]);
        assert_eq!(ids(&catalog.by_decade(1994, 1994)), vec!["8", "10"]);
        assert!(catalog.by_decade(1920, 1929).is_empty());
    }

    #[test]
    fn test_filter_combinations() {
        let catalog = Catalog::builtin();

        let drama_forties = MovieFilter {
            genre: Some("Drama".to_string()),
            decade: Some(1940),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.filter(&drama_forties)), vec!["2", "6"]);

        let japan = MovieFilter {
            country: Some("Japan".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.filter(&japan)), vec!["3", "7"]);

        let by_cast = MovieFilter {
            search_term: Some("pacino".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.filter(&by_cast)), vec!["1"]);

        let nothing = MovieFilter {
            director: Some("Nobody".to_string()),
            ..Default::default()
        };
        assert!(catalog.filter(&nothing).is_empty());
    }

    #[test]
    fn test_distinct_lists_are_sorted() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.all_countries(), vec!["Japan", "UK", "USA"]);
        assert_eq!(
            catalog.decades(),
            vec!["1940s", "1950s", "1960s", "1970s", "1990s", "2000s"]
        );
        let genres = catalog.all_genres();
        assert_eq!(genres.first().map(String::as_str), Some("Action"));
        assert!(genres.contains(&"Sci-Fi".to_string()));
        assert_eq!(catalog.all_directors().len(), 10);
    }

    #[test]
    fn test_movie_of_the_day_is_stable_per_date() {
        let catalog = Catalog::builtin();
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let first = catalog.movie_of_the_day(day).map(|m| m.id.clone());
        let second = catalog.movie_of_the_day(day).map(|m| m.id.clone());
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_movie_of_the_day_rotates_through_catalog() {
        let catalog = Catalog::builtin();
        let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(catalog.movie_of_the_day(new_year).map(|m| m.id.as_str()), Some("7"));

        let next = new_year.succ_opt().unwrap();
        assert_eq!(catalog.movie_of_the_day(next).map(|m| m.id.as_str()), Some("8"));

        let mut seen = BTreeSet::new();
        for offset in 0..10 {
            let day = new_year + chrono::Duration::days(offset);
            seen.insert(catalog.movie_of_the_day(day).map(|m| m.id.clone()));
        }
        assert_eq!(seen.len(), catalog.len());
        assert!(Catalog::new(Vec::new()).movie_of_the_day(new_year).is_none());
    }

    #[test]
    fn test_random_on_empty_catalog() {
        let catalog = Catalog::new(Vec::new());
        assert!(catalog.random_movie().is_none());
        assert!(catalog.sample(3, &mut rand::thread_rng()).is_empty());
    }

    #[test]
    fn test_sample_is_distinct() {
        let catalog = Catalog::builtin();
        let sample = catalog.sample(4, &mut StdRng::seed_from_u64(7));
        assert_eq!(sample.len(), 4);
        let unique: BTreeSet<_> = sample.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let json = serde_json::to_string(&vec![
            Catalog::builtin().movies()[0].clone(),
            Catalog::builtin().movies()[0].clone(),
        ])
        .unwrap();
        assert!(matches!(
            Catalog::from_json(&json),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_json_roundtrip() {
        let json = serde_json::to_string(Catalog::builtin().movies()).unwrap();
        assert_eq!(Catalog::from_json(&json).unwrap(), Catalog::builtin());
    }
}
