use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig;
use crate::constants::files::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_PATH_ENV};
use crate::debug::DebugConfig;
use crate::settings::PlusSettings;

/// Contents of `brevilabs.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BrevilabsConfig {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// License key and plus-mode state
    #[serde(default)]
    pub plus: PlusSettings,

    /// Debug and tracing settings
    #[serde(default)]
    pub debug: DebugConfig,
}

impl BrevilabsConfig {
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            bail!("api.base_url must start with http:// or https:// (got '{base_url}')");
        }
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        // The file may hold a license key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .context("Failed to set config file permissions")?;
        }

        Ok(())
    }

    /// Write the default template to `path`. Returns `false` when the file
    /// already exists and `force` is not set.
    pub fn bootstrap(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            return Ok(false);
        }
        ensure_parent_dir(path)?;
        fs::write(path, Self::default_toml_template())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(true)
    }

    /// Default `brevilabs.toml` written by `brevilabs init`.
    pub fn default_toml_template() -> &'static str {
        r#"# Brevilabs client configuration

[api]
# Base URL every endpoint path is appended to
base_url = "https://api.brevilabs.com/v1"

# Whole-request timeout in seconds (omit for no timeout)
# timeout_secs = 60

[plus]
# License key; `brevilabs license set <KEY>` stores it encrypted
license_key = ""

# Set by `brevilabs license validate`
is_plus_user = false

[debug]
enable_tracing = false
trace_level = "info"
trace_targets = []
"#
    }
}

/// Locate the config file.
///
/// Order: explicit path, `BREVILABS_CONFIG`, `./brevilabs.toml` when present,
/// then the per-user config directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .unwrap_or(local)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use serial_test::serial;

    #[test]
    fn template_parses_to_defaults() {
        let parsed: BrevilabsConfig =
            toml::from_str(BrevilabsConfig::default_toml_template()).unwrap();
        assert_eq!(parsed, BrevilabsConfig::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("brevilabs.toml");

        let mut config = BrevilabsConfig::default();
        config.api.timeout_secs = Some(45);
        config.plus.license_key = "enc_abc".to_string();
        config.plus.is_plus_user = true;

        config.save_to_file(&path).unwrap();
        let loaded = BrevilabsConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = BrevilabsConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, BrevilabsConfig::default());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("brevilabs.toml");
        fs::write(&path, "[api]\nbase_url = \"ftp://example.com\"\n").unwrap();

        let err = BrevilabsConfig::load_from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("http:// or https://"));
    }

    #[test]
    fn bootstrap_respects_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("brevilabs.toml");

        assert!(BrevilabsConfig::bootstrap(&path, false).unwrap());
        fs::write(&path, "# edited\n").unwrap();
        assert!(!BrevilabsConfig::bootstrap(&path, false).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# edited\n");

        assert!(BrevilabsConfig::bootstrap(&path, true).unwrap());
        assert!(fs::read_to_string(&path).unwrap().contains("[plus]"));
    }

    #[test]
    #[serial]
    fn explicit_path_wins_over_env() {
        unsafe {
            std::env::set_var(CONFIG_PATH_ENV, "/tmp/from-env.toml");
        }
        let explicit = PathBuf::from("/tmp/explicit.toml");
        assert_eq!(resolve_config_path(Some(&explicit)), explicit);
        assert_eq!(
            resolve_config_path(None),
            PathBuf::from("/tmp/from-env.toml")
        );
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
    }
}
