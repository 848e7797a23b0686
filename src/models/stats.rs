use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
    /// Share of watched films carrying this genre, 0..=100
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DirectorCount {
    pub director: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DecadeCount {
    /// Label such as "1970s"
    pub decade: String,
    pub count: usize,
}

/// Aggregates over a user's watched films
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchStats {
    pub watched_count: usize,
    /// Films left on the full list
    pub remaining_count: usize,
    /// Mean over rated watched films, `None` when nothing is rated
    pub average_rating: Option<f64>,
    pub rated_count: usize,
    /// Most watched first
    pub genres: Vec<GenreCount>,
    /// Top five, most watched first
    pub top_directors: Vec<DirectorCount>,
    /// Chronological
    pub decades: Vec<DecadeCount>,
}
