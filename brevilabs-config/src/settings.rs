//! Plus-mode settings and the shared store the client reads them from.

use anyhow::Result;
use brevilabs_commons::{PlusToggle, SettingsSource};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::loader::BrevilabsConfig;

/// `[plus]` section of `brevilabs.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlusSettings {
    /// Stored license key, plain or `enc_`-prefixed
    #[serde(default)]
    pub license_key: String,

    /// Result of the last successful validation
    #[serde(default)]
    pub is_plus_user: bool,
}

/// Settings shared between the client and its host.
///
/// When file-backed, plus-mode changes are written back to disk. A license
/// key supplied through the environment shadows the configured one without
/// ever being persisted.
#[derive(Debug)]
pub struct SettingsStore {
    config: RwLock<BrevilabsConfig>,
    path: Option<PathBuf>,
    license_override: Option<String>,
}

impl SettingsStore {
    pub fn in_memory(config: BrevilabsConfig) -> Self {
        Self {
            config: RwLock::new(config),
            path: None,
            license_override: None,
        }
    }

    pub fn file_backed(config: BrevilabsConfig, path: impl Into<PathBuf>) -> Self {
        Self {
            config: RwLock::new(config),
            path: Some(path.into()),
            license_override: None,
        }
    }

    pub fn with_license_override(mut self, key: Option<String>) -> Self {
        self.license_override = key;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn snapshot(&self) -> BrevilabsConfig {
        self.config.read().clone()
    }

    pub fn plus(&self) -> PlusSettings {
        self.config.read().plus.clone()
    }

    /// Replace the stored license key and persist it.
    pub fn set_license_key(&self, stored: impl Into<String>) -> Result<()> {
        self.config.write().plus.license_key = stored.into();
        self.persist()
    }

    pub fn persist(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let snapshot = self.snapshot();
        snapshot.save_to_file(path)
    }

    fn set_plus_user(&self, enabled: bool) {
        {
            let mut config = self.config.write();
            if config.plus.is_plus_user == enabled {
                return;
            }
            config.plus.is_plus_user = enabled;
        }

        tracing::info!(enabled, "Plus mode updated");
        if let Err(err) = self.persist() {
            tracing::warn!(error = %err, "Failed to persist plus mode");
        }
    }
}

impl SettingsSource for SettingsStore {
    fn license_key(&self) -> Option<String> {
        if let Some(key) = &self.license_override {
            return Some(key.clone());
        }
        let key = self.config.read().plus.license_key.clone();
        (!key.is_empty()).then_some(key)
    }

    fn is_plus_user(&self) -> bool {
        self.config.read().plus.is_plus_user
    }
}

impl PlusToggle for SettingsStore {
    fn turn_on_plus(&self) {
        self.set_plus_user(true);
    }

    fn turn_off_plus(&self) {
        self.set_plus_user(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    #[test]
    fn empty_key_reads_as_missing() {
        let store = SettingsStore::in_memory(BrevilabsConfig::default());
        assert_eq!(store.license_key(), None);
        assert!(!store.has_license_key());
    }

    #[test]
    fn env_override_shadows_configured_key() {
        let mut config = BrevilabsConfig::default();
        config.plus.license_key = "from-file".to_string();

        let store = SettingsStore::in_memory(config)
            .with_license_override(Some("from-env".to_string()));
        assert_eq!(store.license_key().as_deref(), Some("from-env"));
        assert_eq!(store.plus().license_key, "from-file");
    }

    #[test]
    fn plus_toggle_persists_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("brevilabs.toml");

        let store = SettingsStore::file_backed(BrevilabsConfig::default(), &path);
        store.turn_on_plus();
        assert!(store.is_plus_user());

        let on_disk = BrevilabsConfig::load_from_file(&path).unwrap();
        assert!(on_disk.plus.is_plus_user);

        store.turn_off_plus();
        let on_disk = BrevilabsConfig::load_from_file(&path).unwrap();
        assert!(!on_disk.plus.is_plus_user);
    }

    #[test]
    fn override_key_is_never_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("brevilabs.toml");

        let store = SettingsStore::file_backed(BrevilabsConfig::default(), &path)
            .with_license_override(Some("secret-env-key".to_string()));
        store.turn_on_plus();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("secret-env-key"));
    }

    #[test]
    fn set_license_key_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("brevilabs.toml");

        let store = SettingsStore::file_backed(BrevilabsConfig::default(), &path);
        store.set_license_key("enc_stored").unwrap();

        let on_disk = BrevilabsConfig::load_from_file(&path).unwrap();
        assert_eq!(on_disk.plus.license_key, "enc_stored");
        assert_eq!(store.path(), Some(path.as_path()));
    }
}
