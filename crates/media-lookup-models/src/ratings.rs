use serde::{Deserialize, Serialize};

/// Third-party ratings from OMDb, already stripped of "N/A" placeholders
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalRatings {
    pub awards: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub dvd_release: Option<String>,
    /// Percentage without the trailing "%"
    pub rotten_tomatoes: Option<String>,
    /// Score without the trailing "/100"
    pub metacritic: Option<String>,
}

impl ExternalRatings {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
