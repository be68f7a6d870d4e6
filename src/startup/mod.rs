//! Process startup: config resolution and client wiring.

use anyhow::{Context, Result};
use brevilabs_client::{BrevilabsClient, BrevilabsClientBuilder};
use brevilabs_config::api_keys::license_key_from_env;
use brevilabs_config::{BrevilabsConfig, KeyCipher, SettingsStore};
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::args::Cli;
use crate::notice::StderrNoticeSink;

/// Everything a command handler needs
pub struct StartupContext {
    pub config_path: PathBuf,
    pub config: BrevilabsConfig,
    pub store: Arc<SettingsStore>,
    pub cipher: Arc<KeyCipher>,
    pub client: BrevilabsClient,
}

impl StartupContext {
    pub fn load(args: &Cli, config_path: PathBuf) -> Result<Self> {
        let config = BrevilabsConfig::load_or_default(&config_path)?;

        // CLI overrides apply to this run only and never reach the file
        let mut api = config.api.clone();
        if let Some(base_url) = &args.base_url {
            api.base_url = base_url.clone();
            BrevilabsConfig {
                api: api.clone(),
                ..config.clone()
            }
            .validate()
            .context("Invalid --base-url")?;
        }

        let store = Arc::new(
            SettingsStore::file_backed(config.clone(), &config_path)
                .with_license_override(license_key_from_env()),
        );
        let cipher = Arc::new(
            KeyCipher::for_machine().context("Failed to derive license key encryption key")?,
        );

        let client = BrevilabsClientBuilder::with_store(store.clone())
            .with_api_config(&api)
            .with_decryptor(cipher.clone())
            .with_notice_sink(Arc::new(StderrNoticeSink))
            .build()
            .context("Failed to create Brevilabs client")?;

        if let Some(version) = &args.plugin_version {
            client.set_plugin_version(version.clone());
        }

        tracing::debug!(
            config = %config_path.display(),
            base_url = client.base_url(),
            "Startup complete"
        );

        Ok(Self {
            config_path,
            config,
            store,
            cipher,
            client,
        })
    }
}
