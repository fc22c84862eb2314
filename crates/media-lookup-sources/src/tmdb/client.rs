use crate::error::SourceError;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const API_URL: &str = "https://api.themoviedb.org/3/";
pub const IMAGE_PATH: &str = "https://image.tmdb.org/t/p/original";

/// TMDb answers 5xx under load; total attempts including the first one
const MAX_ATTEMPTS: u32 = 9;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// One TMDb request: `{action}/{call}/{get}/{season}/{season_get}?params`
#[derive(Debug, Clone)]
pub struct TmdbQuery {
    action: String,
    call: Option<String>,
    get: Option<String>,
    season: Option<u32>,
    season_get: Option<String>,
    params: Vec<(String, String)>,
    use_language: bool,
    error_check: bool,
}

impl TmdbQuery {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            call: None,
            get: None,
            season: None,
            season_get: None,
            params: Vec::new(),
            use_language: true,
            error_check: false,
        }
    }

    pub fn call(mut self, call: impl ToString) -> Self {
        self.call = Some(call.to_string());
        self
    }

    pub fn get(mut self, get: impl Into<String>) -> Self {
        self.get = Some(get.into());
        self
    }

    pub fn season(mut self, season: u32, season_get: Option<&str>) -> Self {
        self.season = Some(season);
        self.season_get = season_get.map(str::to_string);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Skip parameters whose value is `None` (e.g. an unknown year)
    pub fn param_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn without_language(mut self) -> Self {
        self.use_language = false;
        self
    }

    /// Treat an empty document or an empty `results` array as an error
    pub fn error_check(mut self) -> Self {
        self.error_check = true;
        self
    }

    fn path(&self) -> String {
        let mut path = self.action.clone();
        for segment in [
            self.call.clone(),
            self.get.clone(),
            self.season.map(|s| s.to_string()),
            self.season_get.clone(),
        ]
        .into_iter()
        .flatten()
        {
            path.push('/');
            path.push_str(&segment);
        }
        path
    }
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: String,
    language: String,
    base_url: String,
    retry_delay: Duration,
}

impl TmdbClient {
    pub fn new(api_key: String, language: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key,
            language,
            base_url: API_URL.to_string(),
            retry_delay: RETRY_DELAY,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Full request URL including the API key
    pub fn build_url(&self, query: &TmdbQuery) -> Result<Url, SourceError> {
        let mut params: Vec<(String, String)> = vec![("api_key".to_string(), self.api_key.clone())];
        if query.use_language {
            params.push(("language".to_string(), self.language.clone()));
        }
        params.extend(query.params.iter().cloned());

        let url = format!("{}{}", self.base_url, query.path());
        Url::parse_with_params(&url, &params).map_err(|e| SourceError::Http {
            status: StatusCode::BAD_REQUEST,
            body: format!("Invalid TMDb URL {}: {}", url, e),
        })
    }

    /// Run a query and return the raw JSON document
    pub async fn query_value(&self, query: &TmdbQuery) -> Result<Value, SourceError> {
        let url = self.build_url(query)?;
        debug!(path = %query.path(), "TMDb request");

        let mut attempt = 0;
        let response = loop {
            attempt += 1;
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();

            if should_retry(status, attempt) {
                warn!(path = %query.path(), status = status.as_u16(), attempt, "TMDb server error, retrying");
                tokio::time::sleep(self.retry_delay).await;
                continue;
            }

            break response;
        };

        let status = response.status();
        match status {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => return Err(SourceError::Unauthorized),
            StatusCode::NOT_FOUND => return Err(SourceError::NotFound),
            _ => {
                let body = response.text().await.unwrap_or_default();
                return Err(SourceError::Http { status, body });
            }
        }

        let value: Value = response.json().await?;
        check_results(value, query.error_check)
    }

    /// Run a query and deserialize into `T`
    pub async fn query<T: DeserializeOwned>(&self, query: &TmdbQuery) -> Result<T, SourceError> {
        let value = self.query_value(query).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Retry only server-side failures, and only while attempts remain
fn should_retry(status: StatusCode, attempt: u32) -> bool {
    status.is_server_error() && attempt < MAX_ATTEMPTS
}

fn check_results(value: Value, error_check: bool) -> Result<Value, SourceError> {
    if !error_check {
        return Ok(value);
    }

    let empty_document = match &value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Null => true,
        _ => false,
    };
    let empty_results = value
        .get("results")
        .and_then(Value::as_array)
        .map(|results| results.is_empty())
        .unwrap_or(false);

    if empty_document || empty_results {
        return Err(SourceError::EmptyResult);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> TmdbClient {
        TmdbClient::new("KEY".to_string(), "en-US".to_string())
    }

    #[test]
    fn test_build_url_with_all_segments() {
        let query = TmdbQuery::new("tv").call(1399).get("season").season(2, Some("credits"));
        let url = client().build_url(&query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/tv/1399/season/2/credits?api_key=KEY&language=en-US"
        );
    }

    #[test]
    fn test_build_url_encodes_params_and_skips_language() {
        let query = TmdbQuery::new("search")
            .call("movie")
            .param("query", "Crouching Tiger & Dragon")
            .param_opt::<i32>("year", None)
            .without_language();
        let url = client().build_url(&query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/search/movie?api_key=KEY&query=Crouching+Tiger+%26+Dragon"
        );
    }

    #[test]
    fn test_custom_base_url_gets_trailing_slash() {
        let query = TmdbQuery::new("person").call(31);
        let url = client().with_base_url("http://localhost:9000/3").build_url(&query).unwrap();
        assert!(url.as_str().starts_with("http://localhost:9000/3/person/31?"));
    }

    #[test]
    fn test_retry_only_on_server_errors() {
        assert!(should_retry(StatusCode::INTERNAL_SERVER_ERROR, 1));
        assert!(should_retry(StatusCode::SERVICE_UNAVAILABLE, 8));
        assert!(!should_retry(StatusCode::SERVICE_UNAVAILABLE, 9));
        assert!(!should_retry(StatusCode::NOT_FOUND, 1));
        assert!(!should_retry(StatusCode::OK, 1));
    }

    #[test]
    fn test_error_check_rejects_empty_results() {
        assert!(matches!(check_results(json!({"results": []}), true), Err(SourceError::EmptyResult)));
        assert!(matches!(check_results(json!({}), true), Err(SourceError::EmptyResult)));
        assert!(check_results(json!({"results": [{"id": 1}]}), true).is_ok());
        assert!(check_results(json!({"results": []}), false).is_ok());
    }
}
