use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    db::{load_json_or_discard, save_json, KeyValueStore, StorageKey},
    error::{AppError, AppResult},
};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Star ratings, one stored value per movie
#[derive(Clone)]
pub struct RatingStore {
    store: Arc<dyn KeyValueStore>,
}

impl RatingStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored rating; unreadable or out-of-range values read as unrated
    pub fn rating(&self, movie_id: &str) -> Option<u8> {
        let key = StorageKey::MovieRating(movie_id.to_string());
        load_json_or_discard::<u8>(self.store.as_ref(), &key)
            .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
    }

    pub fn set_rating(&self, movie_id: &str, rating: u8) -> AppResult<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::InvalidInput(format!(
                "Rating must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, rating
            )));
        }

        save_json(
            self.store.as_ref(),
            &StorageKey::MovieRating(movie_id.to_string()),
            &rating,
        )?;
        tracing::debug!(movie_id = %movie_id, rating, "Rated movie");
        Ok(())
    }

    pub fn remove_rating(&self, movie_id: &str) -> AppResult<()> {
        self.store
            .remove(&StorageKey::MovieRating(movie_id.to_string()))
    }

    /// Ratings for the given movies, leaving out unrated ones
    pub fn ratings_for<'a, I>(&self, movie_ids: I) -> HashMap<String, u8>
    where
        I: IntoIterator<Item = &'a String>,
    {
        movie_ids
            .into_iter()
            .filter_map(|id| self.rating(id).map(|r| (id.clone(), r)))
            .collect()
    }
}
