use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The logged-in viewer and their lists
///
/// `watched_movies` and `watchlist` behave as ordered sets: no duplicates,
/// insertion order preserved (for `watched_movies`, that is watch order).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub joined_date: DateTime<Utc>,
    #[serde(default)]
    pub watched_movies: Vec<String>,
    #[serde(default)]
    pub watchlist: Vec<String>,
}

impl User {
    /// Creates a user with empty lists
    pub fn new(name: String, email: Option<String>, joined_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            joined_date,
            watched_movies: Vec::new(),
            watchlist: Vec::new(),
        }
    }

    pub fn has_watched(&self, movie_id: &str) -> bool {
        self.watched_movies.iter().any(|id| id == movie_id)
    }

    pub fn in_watchlist(&self, movie_id: &str) -> bool {
        self.watchlist.iter().any(|id| id == movie_id)
    }

    /// Returns false if the movie was already watched
    pub fn mark_watched(&mut self, movie_id: &str) -> bool {
        if self.has_watched(movie_id) {
            return false;
        }
        self.watched_movies.push(movie_id.to_string());
        true
    }

    /// Returns false if the movie was not in the watched list
    pub fn unmark_watched(&mut self, movie_id: &str) -> bool {
        let before = self.watched_movies.len();
        self.watched_movies.retain(|id| id != movie_id);
        self.watched_movies.len() != before
    }

    pub fn add_to_watchlist(&mut self, movie_id: &str) -> bool {
        if self.in_watchlist(movie_id) {
            return false;
        }
        self.watchlist.push(movie_id.to_string());
        true
    }

    pub fn remove_from_watchlist(&mut self, movie_id: &str) -> bool {
        let before = self.watchlist.len();
        self.watchlist.retain(|id| id != movie_id);
        self.watchlist.len() != before
    }

    /// Shallow merge of the fields present in `update`
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(watched) = update.watched_movies {
            self.watched_movies.clear();
            for id in watched {
                self.mark_watched(&id);
            }
        }
        if let Some(watchlist) = update.watchlist {
            self.watchlist.clear();
            for id in watchlist {
                self.add_to_watchlist(&id);
            }
        }
    }
}

/// Partial user record for `SessionStore::update_user`
///
/// `email: Some(None)` clears the address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub watched_movies: Option<Vec<String>>,
    pub watchlist: Option<Vec<String>>,
}

impl UserUpdate {
    /// Movie ids referenced by the update
    pub fn movie_ids(&self) -> impl Iterator<Item = &String> {
        self.watched_movies
            .iter()
            .flatten()
            .chain(self.watchlist.iter().flatten())
    }
}
