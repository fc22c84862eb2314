use serde::{Deserialize, Serialize};
use std::fmt;

/// Which local library table a record belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Show,
}

impl MediaKind {
    /// Kodi database type name ("movie" / "tvshow")
    pub fn dbtype(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "tvshow",
        }
    }

    /// TMDb path segment ("movie" / "tv")
    pub fn tmdb_path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Show => write!(f, "show"),
        }
    }
}
