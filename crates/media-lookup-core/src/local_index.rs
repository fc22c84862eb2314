// Local catalog index built from bulk library rows

use media_lookup_models::{LocalLibrary, LocalMediaItem, MediaKind, RawLibraryRow, NO_LOCAL_MATCH};
use media_lookup_sources::{library_properties, LibrarySource, SourceError};
use serde_json::Value;
use tracing::{debug, info};

/// Convert raw library rows into index items, keeping the host's order
pub fn build_items(rows: Vec<RawLibraryRow>, kind: MediaKind) -> Vec<LocalMediaItem> {
    rows.into_iter().map(|row| build_item(row, kind)).collect()
}

fn build_item(row: RawLibraryRow, kind: MediaKind) -> LocalMediaItem {
    LocalMediaItem {
        kind,
        title: row.title.unwrap_or_default(),
        original_title: row.originaltitle.unwrap_or_default(),
        year: row.year.as_ref().and_then(parse_year),
        external_id: non_empty(row.imdbnumber),
        local_id: row.dbid.unwrap_or(NO_LOCAL_MATCH),
        play_count: row.playcount.unwrap_or(0),
        episode_count: row.episode,
        watched_episode_count: row.watchedepisodes,
        file_path: non_empty(row.file),
    }
}

/// Hosts report 0 or "" for unknown years; only positive numbers are usable
fn parse_year(value: &Value) -> Option<i32> {
    let year = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    if year > 0 {
        i32::try_from(year).ok()
    } else {
        None
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn build_library(movie_rows: Vec<RawLibraryRow>, show_rows: Vec<RawLibraryRow>) -> LocalLibrary {
    LocalLibrary {
        movies: build_items(movie_rows, MediaKind::Movie),
        shows: build_items(show_rows, MediaKind::Show),
    }
}

/// Snapshot both library tables once for a listing session
pub async fn fetch_local_library(source: &dyn LibrarySource) -> Result<LocalLibrary, SourceError> {
    let movie_rows = source.query(MediaKind::Movie, library_properties(MediaKind::Movie)).await?;
    let show_rows = source.query(MediaKind::Show, library_properties(MediaKind::Show)).await?;
    debug!(source = source.source_name(), movies = movie_rows.len(), shows = show_rows.len(), "Fetched library rows");

    let library = build_library(movie_rows, show_rows);
    info!("Local library: {} movies, {} shows", library.movies.len(), library.shows.len());
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    fn row(value: Value) -> RawLibraryRow {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_build_items_defaults() {
        let items = build_items(vec![row(json!({}))], MediaKind::Movie);
        let item = &items[0];
        assert_eq!(item.title, "");
        assert_eq!(item.original_title, "");
        assert_eq!(item.year, None);
        assert_eq!(item.external_id, None);
        assert_eq!(item.local_id, NO_LOCAL_MATCH);
        assert_eq!(item.play_count, 0);
        assert_eq!(item.episode_count, None);
        assert_eq!(item.file_path, None);
    }

    #[test]
    fn test_year_parsing() {
        let items = build_items(
            vec![
                row(json!({"year": 2021})),
                row(json!({"year": "1984"})),
                row(json!({"year": ""})),
                row(json!({"year": 0})),
                row(json!({"year": "unknown"})),
            ],
            MediaKind::Movie,
        );
        let years: Vec<Option<i32>> = items.iter().map(|i| i.year).collect();
        assert_eq!(years, vec![Some(2021), Some(1984), None, None, None]);
    }

    #[test]
    fn test_build_items_keeps_order_and_fields() {
        let items = build_items(
            vec![
                row(json!({"tvshowid": 9, "title": "Dark", "originaltitle": "Dark", "year": 2017, "imdbnumber": "334824", "playcount": 1, "episode": 26, "watchedepisodes": 10})),
                row(json!({"tvshowid": 2, "title": "Dune", "imdbnumber": "", "file": ""})),
            ],
            MediaKind::Show,
        );
        assert_eq!(items[0].local_id, 9);
        assert_eq!(items[0].external_id.as_deref(), Some("334824"));
        assert_eq!(items[0].episode_count, Some(26));
        assert_eq!(items[0].watched_episode_count, Some(10));
        assert_eq!(items[1].local_id, 2);
        assert_eq!(items[1].external_id, None);
        assert_eq!(items[1].file_path, None);
        assert!(items.iter().all(|i| i.kind == MediaKind::Show));
    }

    struct StaticLibrary {
        movies: Vec<RawLibraryRow>,
        shows: Vec<RawLibraryRow>,
    }

    #[async_trait]
    impl LibrarySource for StaticLibrary {
        fn source_name(&self) -> &str {
            "static"
        }

        async fn query(&self, kind: MediaKind, properties: &[&str]) -> Result<Vec<RawLibraryRow>, SourceError> {
            assert!(properties.contains(&"originaltitle"));
            Ok(match kind {
                MediaKind::Movie => self.movies.clone(),
                MediaKind::Show => self.shows.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_fetch_local_library() {
        let source = StaticLibrary {
            movies: vec![row(json!({"movieid": 1, "title": "Dune", "year": 2021}))],
            shows: vec![],
        };
        let library = fetch_local_library(&source).await.unwrap();
        assert_eq!(library.movies.len(), 1);
        assert_eq!(library.movies[0].kind, MediaKind::Movie);
        assert!(library.shows.is_empty());
    }
}
