use crate::error::SourceError;
use crate::tmdb::client::{TmdbClient, TmdbQuery};
use media_lookup_models::{MediaKind, Results, Season, TmdbMovie, TmdbPerson, TmdbShow, Video};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MOVIE_APPEND: &str = "credits,release_dates,translations";
const TV_APPEND: &str = "credits,content_ratings,external_ids,translations";
const PERSON_APPEND: &str = "translations,movie_credits,tv_credits,images";

/// Response of `/find/{external_id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindResults {
    #[serde(default)]
    pub movie_results: Vec<TmdbMovie>,
    #[serde(default)]
    pub tv_results: Vec<TmdbShow>,
}

const YOUTUBE: &str = "YouTube";

/// IMDb numbers start with "tt", everything else is treated as a TVDb id
pub fn external_source(external_id: &str) -> &'static str {
    if external_id.starts_with("tt") {
        "imdb_id"
    } else {
        "tvdb_id"
    }
}

impl TmdbClient {
    pub async fn search_movies(&self, query: &str, year: Option<i32>, include_adult: bool) -> Result<Vec<TmdbMovie>, SourceError> {
        let request = TmdbQuery::new("search")
            .call("movie")
            .param("query", query)
            .param_opt("year", year)
            .param("include_adult", include_adult)
            .error_check();
        let results: Results<TmdbMovie> = self.query(&request).await?;
        debug!(query, count = results.results.len(), "Movie search finished");
        Ok(results.results)
    }

    pub async fn search_shows(&self, query: &str, year: Option<i32>, include_adult: bool) -> Result<Vec<TmdbShow>, SourceError> {
        let request = TmdbQuery::new("search")
            .call("tv")
            .param("query", query)
            .param_opt("first_air_date_year", year)
            .param("include_adult", include_adult)
            .error_check();
        let results: Results<TmdbShow> = self.query(&request).await?;
        debug!(query, count = results.results.len(), "Show search finished");
        Ok(results.results)
    }

    pub async fn search_people(&self, query: &str, include_adult: bool) -> Result<Vec<TmdbPerson>, SourceError> {
        let request = TmdbQuery::new("search")
            .call("person")
            .param("query", query)
            .param("include_adult", include_adult)
            .error_check();
        let results: Results<TmdbPerson> = self.query(&request).await?;
        debug!(query, count = results.results.len(), "Person search finished");
        Ok(results.results)
    }

    /// Look up TMDb entries by an IMDb or TVDb id
    pub async fn find(&self, external_id: &str) -> Result<FindResults, SourceError> {
        let request = TmdbQuery::new("find")
            .call(external_id)
            .param("external_source", external_source(external_id))
            .without_language();
        self.query(&request).await
    }

    /// TMDb id of the first `find` hit of the given kind
    pub async fn find_id(&self, kind: MediaKind, external_id: &str) -> Result<u64, SourceError> {
        let results = self.find(external_id).await?;
        let id = match kind {
            MediaKind::Movie => results.movie_results.first().map(|m| m.id),
            MediaKind::Show => results.tv_results.first().map(|s| s.id),
        };
        id.ok_or(SourceError::NotFound)
    }

    pub async fn movie(&self, id: u64) -> Result<TmdbMovie, SourceError> {
        let request = TmdbQuery::new("movie")
            .call(id)
            .param("append_to_response", MOVIE_APPEND)
            .error_check();
        self.query(&request).await
    }

    pub async fn tv(&self, id: u64) -> Result<TmdbShow, SourceError> {
        let request = TmdbQuery::new("tv")
            .call(id)
            .param("append_to_response", TV_APPEND)
            .error_check();
        self.query(&request).await
    }

    /// Full season document including its episodes
    pub async fn season(&self, tv_id: u64, season_number: u32) -> Result<Season, SourceError> {
        let request = TmdbQuery::new("tv")
            .call(tv_id)
            .get("season")
            .season(season_number, None)
            .error_check();
        self.query(&request).await
    }

    /// YouTube videos in the request language, else in any language
    pub async fn videos(&self, kind: MediaKind, id: u64) -> Result<Vec<Video>, SourceError> {
        let request = TmdbQuery::new(kind.tmdb_path()).call(id).get("videos");
        let localized: Results<Video> = self.query(&request).await?;
        let mut videos = youtube_only(localized.results);

        if videos.is_empty() {
            debug!(id, language = self.language(), "No localized videos, retrying without language");
            let all: Results<Video> = self.query(&request.without_language()).await?;
            videos = youtube_only(all.results);
        }
        Ok(videos)
    }

    pub async fn person(&self, id: u64) -> Result<TmdbPerson, SourceError> {
        let request = TmdbQuery::new("person")
            .call(id)
            .param("append_to_response", PERSON_APPEND)
            .error_check();
        self.query(&request).await
    }
}

fn youtube_only(videos: Vec<Video>) -> Vec<Video> {
    videos.into_iter().filter(|v| v.site == YOUTUBE && !v.key.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_only_drops_other_sites() {
        let video = |key: &str, site: &str| Video { key: key.to_string(), name: "Trailer".to_string(), site: site.to_string(), kind: "Trailer".to_string() };
        let videos = youtube_only(vec![video("n9xhJrPXop4", "YouTube"), video("12345", "Vimeo"), video("", "YouTube")]);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].key, "n9xhJrPXop4");
    }

    #[test]
    fn test_external_source_by_prefix() {
        assert_eq!(external_source("tt1160419"), "imdb_id");
        assert_eq!(external_source("81189"), "tvdb_id");
        assert_eq!(external_source(""), "tvdb_id");
    }

    #[test]
    fn test_find_results_deserialize() {
        let json = r#"{
            "movie_results": [{"id": 438631, "title": "Dune", "release_date": "2021-09-15"}],
            "person_results": [],
            "tv_results": []
        }"#;
        let results: FindResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.movie_results[0].id, 438631);
        assert!(results.tv_results.is_empty());
    }
}
