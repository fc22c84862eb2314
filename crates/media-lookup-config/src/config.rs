use media_lookup_models::FilterOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub omdb: Option<OmdbConfig>,
    #[serde(default)]
    pub library: Option<LibraryConfig>,
    #[serde(default)]
    pub filters: FilterOptions,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    /// Request language, e.g. "en-US"
    #[serde(default = "default_language")]
    pub language: String,
    /// ISO 3166-1 country used for certifications
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default)]
    pub include_adult: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    pub enabled: bool,
}

/// Kodi JSON-RPC endpoint of the local library
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LibraryConfig {
    #[serde(default = "default_jsonrpc_url")]
    pub jsonrpc_url: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub file: Option<PathBuf>,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_country_code() -> String {
    "US".to_string()
}

fn default_jsonrpc_url() -> String {
    "http://localhost:8080/jsonrpc".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            country_code: default_country_code(),
            include_adult: false,
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            jsonrpc_url: default_jsonrpc_url(),
            username: None,
        }
    }
}

/// Configuration written on first run
pub fn default_config() -> Config {
    Config {
        tmdb: TmdbConfig::default(),
        omdb: None,
        library: Some(LibraryConfig::default()),
        filters: FilterOptions::default(),
        logging: None,
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(default_config())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.language.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.language cannot be empty"));
        }

        let country = &self.tmdb.country_code;
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(anyhow::anyhow!("tmdb.country_code must be a two-letter ISO 3166-1 code, got '{}'", country));
        }

        if self.filters.filter_day_delta < 0 {
            return Err(anyhow::anyhow!("filters.filter_day_delta must be non-negative"));
        }

        if let Some(library) = &self.library {
            if !library.jsonrpc_url.starts_with("http://") && !library.jsonrpc_url.starts_with("https://") {
                return Err(anyhow::anyhow!("library.jsonrpc_url must be an http(s) URL, got '{}'", library.jsonrpc_url));
            }
        }

        Ok(())
    }

    pub fn is_omdb_enabled(&self) -> bool {
        self.omdb.as_ref().map(|omdb| omdb.enabled).unwrap_or(false)
    }

    /// Country code in the upper-case form TMDb uses
    pub fn country_code(&self) -> String {
        self.tmdb.country_code.to_uppercase()
    }
}
