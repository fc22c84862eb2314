use super::ui::Busy;
use crate::output::Output;
use color_eyre::Result;
use media_lookup_config::{Config, CredentialStore, LoggingConfig, PathManager};
use media_lookup_core::{fetch_local_library, ReconcileSession};
use media_lookup_models::LocalLibrary;
use media_lookup_sources::{KodiJsonRpc, OmdbClient, TmdbClient};
use tracing::{debug, warn};

/// `[logging]` settings, read before the subscriber exists
///
/// A section without `file` logs to `logs/reelmatch.log` under the config directory.
pub fn configured_logging() -> Option<LoggingConfig> {
    let path_manager = PathManager::default();
    let config = Config::load_from_file(&path_manager.config_file()).ok()?;
    let mut logging = config.logging?;
    if logging.file.is_none() {
        logging.file = Some(path_manager.log_file());
    }
    Some(logging)
}

/// Configuration and credentials shared by every lookup command
pub struct AppContext {
    pub config: Config,
    pub credentials: CredentialStore,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let path_manager = PathManager::default();
        let config_file = path_manager.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

        let credentials_file = path_manager.credentials_file();
        let mut credentials = CredentialStore::new(credentials_file.clone());
        credentials
            .load()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

        Ok(Self { config, credentials })
    }

    pub fn tmdb(&self) -> Result<TmdbClient> {
        let api_key = self.credentials.get_tmdb_api_key().ok_or_else(|| {
            color_eyre::eyre::eyre!("No TMDb API key configured. Run 'reelmatch config tmdb' first.")
        })?;
        Ok(TmdbClient::new(api_key.clone(), self.config.tmdb.language.clone()))
    }

    /// OMDb client when enabled and a key is stored
    pub fn omdb(&self) -> Option<OmdbClient> {
        if !self.config.is_omdb_enabled() {
            return None;
        }
        match self.credentials.get_omdb_api_key() {
            Some(key) => Some(OmdbClient::new(key.clone())),
            None => {
                warn!("OMDb is enabled but no API key is stored");
                None
            }
        }
    }

    pub fn library_source(&self) -> Option<KodiJsonRpc> {
        let library = self.config.library.as_ref()?;
        Some(
            KodiJsonRpc::new(library.jsonrpc_url.clone())
                .with_credentials(library.username.clone(), self.credentials.get_kodi_password().cloned()),
        )
    }

    /// Snapshot the local library once; an unreachable library reads as empty
    pub async fn session(&self, output: &Output) -> ReconcileSession {
        let library = match self.library_source() {
            Some(source) => {
                let busy = Busy::start(output, "Reading local library...");
                let result = fetch_local_library(&source).await;
                busy.finish();
                match result {
                    Ok(library) => library,
                    Err(e) => {
                        output.warn(format!("Local library unavailable ({}), nothing will be marked as local", e));
                        LocalLibrary::default()
                    }
                }
            }
            None => {
                debug!("No [library] section configured, skipping local matching");
                LocalLibrary::default()
            }
        };

        ReconcileSession::new(library, self.config.filters.clone())
    }

    pub fn country_code(&self) -> String {
        self.config.country_code()
    }
}

pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
