pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, LibraryConfig, LoggingConfig, OmdbConfig, TmdbConfig, default_config};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
pub use media_lookup_models::FilterOptions;
