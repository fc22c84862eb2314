use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// API keys and passwords, kept out of `config.toml`
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key).filter(|value| !value.is_empty())
    }

    fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn get_tmdb_api_key(&self) -> Option<&String> {
        self.get("tmdb_api_key")
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.set("tmdb_api_key".to_string(), key);
    }

    pub fn get_omdb_api_key(&self) -> Option<&String> {
        self.get("omdb_api_key")
    }

    pub fn set_omdb_api_key(&mut self, key: String) {
        self.set("omdb_api_key".to_string(), key);
    }

    pub fn get_kodi_password(&self) -> Option<&String> {
        self.get("kodi_password")
    }

    pub fn set_kodi_password(&mut self, password: String) {
        self.set("kodi_password".to_string(), password);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_tmdb_api_key("tmdb_key".to_string());
        store.set_kodi_password("secret".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.get_tmdb_api_key(), Some(&"tmdb_key".to_string()));
        assert_eq!(loaded_store.get_kodi_password(), Some(&"secret".to_string()));
        assert_eq!(loaded_store.get_omdb_api_key(), None);
    }

    #[test]
    fn test_empty_value_reads_as_missing() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set_omdb_api_key(String::new());
        assert_eq!(store.get_omdb_api_key(), None);
    }

    #[test]
    fn test_accessors_use_separate_keys() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set_tmdb_api_key("tmdb".to_string());
        store.set_omdb_api_key("omdb".to_string());

        assert_eq!(store.get_tmdb_api_key(), Some(&"tmdb".to_string()));
        assert_eq!(store.get_omdb_api_key(), Some(&"omdb".to_string()));
        assert_eq!(store.get_kodi_password(), None);
    }
}
