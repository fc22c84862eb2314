use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Listing filters applied while building a person's filmography
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterOptions {
    /// Hide credits released more than `filter_day_delta` days from today
    #[serde(default = "default_true")]
    pub filter_upcoming: bool,
    #[serde(default = "default_day_delta")]
    pub filter_day_delta: i64,
    /// Hide "himself"/"herself" documentary appearances and filler crew jobs
    #[serde(default = "default_true")]
    pub filter_movies_documentaries: bool,
    /// TMDb TV genre ids to hide (news, reality, talk); empty disables the show filter
    #[serde(default = "default_shows_blacklist")]
    pub filter_shows_blacklist: BTreeSet<u32>,
}

fn default_true() -> bool {
    true
}

fn default_day_delta() -> i64 {
    30
}

/// News (10763), Reality (10764) and Talk (10767)
pub fn default_shows_blacklist() -> BTreeSet<u32> {
    [10763, 10764, 10767].into_iter().collect()
}

impl FilterOptions {
    /// All filters off
    pub fn disabled() -> Self {
        Self {
            filter_upcoming: false,
            filter_day_delta: 0,
            filter_movies_documentaries: false,
            filter_shows_blacklist: BTreeSet::new(),
        }
    }

    pub fn filters_shows(&self) -> bool {
        !self.filter_shows_blacklist.is_empty()
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            filter_upcoming: default_true(),
            filter_day_delta: default_day_delta(),
            filter_movies_documentaries: default_true(),
            filter_shows_blacklist: default_shows_blacklist(),
        }
    }
}
