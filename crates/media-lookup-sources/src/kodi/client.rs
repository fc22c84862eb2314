use crate::error::SourceError;
use crate::kodi::api;
use crate::traits::LibrarySource;
use async_trait::async_trait;
use media_lookup_models::{MediaKind, RawLibraryRow};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Kodi's HTTP JSON-RPC endpoint used as the local library
#[derive(Clone)]
pub struct KodiJsonRpc {
    client: Arc<Client>,
    url: String,
    username: Option<String>,
    password: Option<String>,
}

impl KodiJsonRpc {
    pub fn new(url: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            url,
            username: None,
            password: None,
        }
    }

    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LibrarySource for KodiJsonRpc {
    fn source_name(&self) -> &str {
        "kodi"
    }

    async fn query(&self, kind: MediaKind, properties: &[&str]) -> Result<Vec<RawLibraryRow>, SourceError> {
        let body = api::build_request(kind, properties);
        debug!(method = api::method_for(kind), url = %self.url, "JSON-RPC request");

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_ref());
        }

        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SourceError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Http { status, body });
        }

        let value: Value = response.json().await?;
        let rows = api::parse_rows(kind, value)?;
        debug!(kind = %kind, rows = rows.len(), "Library table fetched");
        Ok(rows)
    }
}
