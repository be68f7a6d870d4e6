//! Environment-based overrides for the license key.
//!
//! The environment wins over the config file so CI jobs and scripts can
//! supply a key without touching `brevilabs.toml`.

use anyhow::Result;
use std::env;

use crate::constants::license::LICENSE_KEY_ENV;

/// Load environment variables from a `.env` file in the current directory.
///
/// A missing file is not an error; a malformed one is logged and ignored.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment variables from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            tracing::warn!("Failed to load .env file: {}", e);
            Ok(())
        }
    }
}

/// License key supplied through `BREVILABS_LICENSE_KEY`, if set and non-empty.
pub fn license_key_from_env() -> Option<String> {
    env::var(LICENSE_KEY_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
