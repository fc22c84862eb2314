use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// 401 from TMDb, almost always a bad API key
    #[error("Invalid API key or unauthorized request")]
    Unauthorized,

    #[error("Requested item was not found")]
    NotFound,

    /// The request succeeded but returned nothing to show
    #[error("No results")]
    EmptyResult,

    #[error("HTTP error {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc { code: i64, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    /// Errors that mean "nothing to list" rather than a broken setup
    pub fn is_empty_result(&self) -> bool {
        matches!(self, SourceError::NotFound | SourceError::EmptyResult)
    }
}
