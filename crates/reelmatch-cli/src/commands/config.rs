use super::prompts;
use crate::output::{check_mark, details_table, Output};
use crate::ConfigCommands;
use color_eyre::Result;
use media_lookup_config::{default_config, Config, CredentialStore, LibraryConfig, OmdbConfig, PathManager};
use serde_json::json;
use std::collections::BTreeSet;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Tmdb { api_key, language, country_code, include_adult } => {
            configure_tmdb(api_key, language, country_code, include_adult, output)
        }
        ConfigCommands::Omdb { api_key, enabled } => configure_omdb(api_key, enabled, output),
        ConfigCommands::Library { url, username, password } => configure_library(url, username, password, output),
        ConfigCommands::Filters { upcoming, day_delta, documentaries, shows_blacklist } => {
            configure_filters(upcoming, day_delta, documentaries, shows_blacklist, output)
        }
    }
}

fn load_config(path_manager: &PathManager, output: &Output) -> Result<Config> {
    let config_file = path_manager.config_file();
    if config_file.exists() {
        Config::load_from_file(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))
    } else {
        output.info("Configuration file not found. Creating default configuration...");
        Ok(default_config())
    }
}

fn save_config(config: &Config, path_manager: &PathManager) -> Result<()> {
    config.validate().map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;
    let config_file = path_manager.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))
}

fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(store)
}

fn save_credentials(store: &CredentialStore) -> Result<()> {
    store.save().map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

fn secret(value: Option<&String>, full: bool) -> String {
    match value {
        Some(v) if full => v.clone(),
        Some(v) => mask_string(v),
        None => "<not set>".to_string(),
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Run 'reelmatch config tmdb' to create it.");
        return Ok(());
    }

    let config = Config::load_from_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let store = load_credentials(&path_manager)?;

    let tmdb_key = secret(store.get_tmdb_api_key(), full);
    let omdb_key = secret(store.get_omdb_api_key(), full);
    let kodi_password = secret(store.get_kodi_password(), full);
    let blacklist = config
        .filters
        .filter_shows_blacklist
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "tmdb": {
                "api_key": tmdb_key,
                "language": config.tmdb.language,
                "country_code": config.tmdb.country_code,
                "include_adult": config.tmdb.include_adult,
            },
            "omdb": {"enabled": config.is_omdb_enabled(), "api_key": omdb_key},
            "library": config.library.as_ref().map(|l| json!({
                "jsonrpc_url": l.jsonrpc_url,
                "username": l.username,
                "password": kodi_password,
            })),
            "filters": config.filters,
        }));
        return Ok(());
    }

    output.table("Configuration", &details_table(&[("Config file", config_file.display().to_string())]));

    output.table(
        "TMDb",
        &details_table(&[
            ("API key", tmdb_key),
            ("Language", config.tmdb.language.clone()),
            ("Country", config.country_code()),
            ("Include adult", check_mark(config.tmdb.include_adult)),
        ]),
    );

    output.table(
        "OMDb",
        &details_table(&[("Enabled", check_mark(config.is_omdb_enabled())), ("API key", omdb_key)]),
    );

    match &config.library {
        Some(library) => output.table(
            "Library (Kodi JSON-RPC)",
            &details_table(&[
                ("URL", library.jsonrpc_url.clone()),
                ("Username", library.username.clone().unwrap_or_default()),
                ("Password", kodi_password),
            ]),
        ),
        None => output.info("\nLibrary: Not configured"),
    }

    output.table(
        "Filters",
        &details_table(&[
            ("Hide upcoming", check_mark(config.filters.filter_upcoming)),
            ("Day delta", config.filters.filter_day_delta.to_string()),
            ("Hide documentaries", check_mark(config.filters.filter_movies_documentaries)),
            ("Show genre blacklist", if blacklist.is_empty() { "<disabled>".to_string() } else { blacklist }),
        ]),
    );

    Ok(())
}

fn configure_tmdb(
    api_key: Option<String>,
    language: Option<String>,
    country_code: Option<String>,
    include_adult: Option<bool>,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let mut config = load_config(&path_manager, output)?;
    let mut store = load_credentials(&path_manager)?;

    let api_key = match api_key {
        Some(key) => key,
        None => prompts::prompt_password("TMDb API key (v3)")?,
    };
    if !api_key.trim().is_empty() {
        store.set_tmdb_api_key(api_key.trim().to_string());
    }

    if let Some(language) = language {
        config.tmdb.language = language;
    }
    if let Some(country_code) = country_code {
        config.tmdb.country_code = country_code.to_uppercase();
    }
    if let Some(include_adult) = include_adult {
        config.tmdb.include_adult = include_adult;
    }

    save_config(&config, &path_manager)?;
    save_credentials(&store)?;
    output.success("TMDb configuration saved");
    Ok(())
}

fn configure_omdb(api_key: Option<String>, enabled: Option<bool>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let mut config = load_config(&path_manager, output)?;
    let mut store = load_credentials(&path_manager)?;

    let enabled = match enabled {
        Some(enabled) => enabled,
        None => prompts::prompt_yes_no("Fetch ratings from OMDb?", true)?,
    };

    if enabled {
        let api_key = match api_key {
            Some(key) => key,
            None if store.get_omdb_api_key().is_some() => String::new(),
            None => prompts::prompt_password("OMDb API key")?,
        };
        if !api_key.trim().is_empty() {
            store.set_omdb_api_key(api_key.trim().to_string());
        }
        if store.get_omdb_api_key().is_none() {
            output.warn("OMDb enabled without an API key; ratings will be skipped");
        }
    }

    config.omdb = Some(OmdbConfig { enabled });
    save_config(&config, &path_manager)?;
    save_credentials(&store)?;
    output.success(format!("OMDb {}", if enabled { "enabled" } else { "disabled" }));
    Ok(())
}

fn configure_library(url: Option<String>, username: Option<String>, password: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let mut config = load_config(&path_manager, output)?;
    let mut store = load_credentials(&path_manager)?;
    let current = config.library.clone().unwrap_or_default();

    let jsonrpc_url = match url {
        Some(url) => url,
        None => prompts::prompt_string("Kodi JSON-RPC URL", Some(&current.jsonrpc_url))?,
    };
    let username = username.or(current.username).filter(|u| !u.is_empty());

    if password {
        let secret = prompts::prompt_password("Kodi HTTP password")?;
        store.set_kodi_password(secret);
    }

    config.library = Some(LibraryConfig { jsonrpc_url, username });
    save_config(&config, &path_manager)?;
    save_credentials(&store)?;
    output.success("Library configuration saved");
    Ok(())
}

fn configure_filters(
    upcoming: Option<bool>,
    day_delta: Option<i64>,
    documentaries: Option<bool>,
    shows_blacklist: Option<Vec<u32>>,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let mut config = load_config(&path_manager, output)?;

    if let Some(upcoming) = upcoming {
        config.filters.filter_upcoming = upcoming;
    }
    if let Some(day_delta) = day_delta {
        config.filters.filter_day_delta = day_delta;
    }
    if let Some(documentaries) = documentaries {
        config.filters.filter_movies_documentaries = documentaries;
    }
    if let Some(genres) = shows_blacklist {
        config.filters.filter_shows_blacklist = genres.into_iter().collect::<BTreeSet<u32>>();
    }

    save_config(&config, &path_manager)?;
    output.success("Filter settings saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("0123456789abcdef"), "01***ef");
    }

    #[test]
    fn test_mask_string_non_ascii() {
        assert_eq!(mask_string("€uro-pass"), "€u***ss");
        assert_eq!(mask_string("pässwört"), "pä***rt");
        assert_eq!(mask_string("äöü"), "***");
    }
}
