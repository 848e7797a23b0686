use serde::{Deserialize, Serialize};

/// A film in the reference catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    /// Release year as printed in the list (e.g. "1972")
    pub year: String,
    pub director: String,
    /// One or more countries, comma separated
    pub country: String,
    pub genre: Vec<String>,
    pub synopsis: String,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub awards: Vec<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub cinematography: Option<String>,
    #[serde(default)]
    pub music_by: Option<String>,
}

impl Movie {
    /// Release year as a number, if the catalog entry is well formed
    pub fn release_year(&self) -> Option<i32> {
        self.year.trim().parse().ok()
    }

    /// First year of the decade the film was released in
    pub fn decade_start(&self) -> Option<i32> {
        self.release_year().map(|year| year.div_euclid(10) * 10)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genre.iter().any(|g| g == genre)
    }

    /// Individual countries from the comma separated `country` field
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.country
            .split(',')
            .map(str::trim)
            .filter(|country| !country.is_empty())
    }

    /// Case-insensitive match against title, director, synopsis or cast
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.director.to_lowercase().contains(&term)
            || self.synopsis.to_lowercase().contains(&term)
            || self
                .cast
                .iter()
                .any(|actor| actor.to_lowercase().contains(&term))
    }
}

/// Conjunctive catalog filter; unset fields match everything
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieFilter {
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    /// First year of the decade, e.g. 1970
    #[serde(default)]
    pub decade: Option<i32>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub search_term: Option<String>,
}

impl MovieFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(genre) = &self.genre {
            if !movie.has_genre(genre) {
                return false;
            }
        }

        if let Some(director) = &self.director {
            if &movie.director != director {
                return false;
            }
        }

        if let Some(decade) = self.decade {
            match movie.release_year() {
                Some(year) if year >= decade && year < decade + 10 => {}
                _ => return false,
            }
        }

        if let Some(country) = &self.country {
            if !movie.country.contains(country.as_str()) {
                return false;
            }
        }

        match self.search_term.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => movie.matches_term(term),
            _ => true,
        }
    }
}
