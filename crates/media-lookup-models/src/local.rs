use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::MediaKind;

/// Library row id used when nothing in the local library matched
pub const NO_LOCAL_MATCH: i64 = -1;

/// One entry of the local catalog index
///
/// Built once per session from a bulk library query and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalMediaItem {
    pub kind: MediaKind,
    pub title: String,
    pub original_title: String,
    /// `None` when the library had no usable numeric year
    pub year: Option<i32>,
    /// IMDb number for movies, scraper id for shows
    pub external_id: Option<String>,
    pub local_id: i64,
    pub play_count: u32,
    pub episode_count: Option<u32>,
    pub watched_episode_count: Option<u32>,
    pub file_path: Option<String>,
}

/// Snapshot of both library tables for one listing session
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LocalLibrary {
    pub movies: Vec<LocalMediaItem>,
    pub shows: Vec<LocalMediaItem>,
}

impl LocalLibrary {
    pub fn items(&self, kind: MediaKind) -> &[LocalMediaItem] {
        match kind {
            MediaKind::Movie => &self.movies,
            MediaKind::Show => &self.shows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.shows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.movies.len() + self.shows.len()
    }
}

/// A row as returned by `VideoLibrary.GetMovies` / `VideoLibrary.GetTVShows`
///
/// Every field is optional; the host omits properties it has no value for.
/// `year` is kept as raw JSON because hosts return numbers, strings or nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawLibraryRow {
    #[serde(default, alias = "movieid", alias = "tvshowid")]
    pub dbid: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub originaltitle: Option<String>,
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub imdbnumber: Option<String>,
    #[serde(default)]
    pub playcount: Option<u32>,
    #[serde(default)]
    pub episode: Option<u32>,
    #[serde(default)]
    pub watchedepisodes: Option<u32>,
    #[serde(default)]
    pub file: Option<String>,
}
