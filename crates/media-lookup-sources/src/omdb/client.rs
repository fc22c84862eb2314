use crate::error::SourceError;
use media_lookup_models::{ExternalRatings, MediaKind};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub const OMDB_URL: &str = "http://www.omdbapi.com/";

#[derive(Debug, Deserialize)]
struct OmdbRating {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(rename = "Awards", default)]
    awards: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes", default)]
    imdb_votes: Option<String>,
    #[serde(rename = "DVD", default)]
    dvd: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<OmdbRating>,
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key,
            base_url: OMDB_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn ratings(&self, imdb_id: &str) -> Result<ExternalRatings, SourceError> {
        let url = format!(
            "{}?i={}&apikey={}",
            self.base_url,
            urlencoding::encode(imdb_id),
            urlencoding::encode(&self.api_key)
        );
        debug!(imdb_id, "OMDb lookup by id");
        self.fetch(&url).await
    }

    /// Fallback for records without an IMDb number
    pub async fn ratings_by_title(&self, title: &str, year: i32, kind: MediaKind) -> Result<ExternalRatings, SourceError> {
        let content_type = match kind {
            MediaKind::Movie => "movie",
            MediaKind::Show => "series",
        };
        let url = format!(
            "{}?t={}&year={}&type={}&apikey={}",
            self.base_url,
            urlencoding::encode(title),
            year,
            content_type,
            urlencoding::encode(&self.api_key)
        );
        debug!(title, year, "OMDb lookup by title");
        self.fetch(&url).await
    }

    async fn fetch(&self, url: &str) -> Result<ExternalRatings, SourceError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SourceError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Http { status, body });
        }

        let body = response.text().await?;
        parse_ratings(&body)
    }
}

/// Parse an OMDb document, dropping "N/A" placeholders and unit suffixes
pub fn parse_ratings(body: &str) -> Result<ExternalRatings, SourceError> {
    let response: OmdbResponse = serde_json::from_str(body)?;

    if response.response.as_deref() == Some("False") {
        debug!(error = ?response.error, "OMDb returned no result");
        return Err(SourceError::NotFound);
    }

    let mut ratings = ExternalRatings {
        awards: available(response.awards),
        imdb_rating: available(response.imdb_rating),
        imdb_votes: available(response.imdb_votes),
        dvd_release: available(response.dvd),
        rotten_tomatoes: None,
        metacritic: None,
    };

    for rating in response.ratings {
        match rating.source.as_str() {
            "Rotten Tomatoes" => {
                ratings.rotten_tomatoes = Some(rating.value.trim_end_matches('%').to_string());
            }
            "Metacritic" => {
                ratings.metacritic = Some(rating.value.trim_end_matches("/100").to_string());
            }
            _ => {}
        }
    }

    Ok(ratings)
}

fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "N/A" && v != "NA")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratings_strips_suffixes() {
        let body = r#"{
            "Title": "Dune",
            "Awards": "Won 6 Oscars. 173 wins & 288 nominations total",
            "imdbRating": "8.0",
            "imdbVotes": "812,345",
            "DVD": "N/A",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "8.0/10"},
                {"Source": "Rotten Tomatoes", "Value": "83%"},
                {"Source": "Metacritic", "Value": "74/100"}
            ],
            "Response": "True"
        }"#;
        let ratings = parse_ratings(body).unwrap();
        assert_eq!(ratings.imdb_rating.as_deref(), Some("8.0"));
        assert_eq!(ratings.imdb_votes.as_deref(), Some("812,345"));
        assert_eq!(ratings.dvd_release, None);
        assert_eq!(ratings.rotten_tomatoes.as_deref(), Some("83"));
        assert_eq!(ratings.metacritic.as_deref(), Some("74"));
    }

    #[test]
    fn test_parse_ratings_not_found() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        assert!(matches!(parse_ratings(body), Err(SourceError::NotFound)));
    }

    #[test]
    fn test_parse_ratings_without_ratings_block() {
        let ratings = parse_ratings(r#"{"Response": "True", "Awards": "N/A"}"#).unwrap();
        assert!(ratings.is_empty());
    }
}
