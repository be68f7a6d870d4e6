use anyhow::{Context, Result, bail};
use brevilabs_commons::SettingsSource;

use crate::cli::args::LicenseCommand;
use crate::startup::StartupContext;

pub async fn handle_license_command(
    startup: &StartupContext,
    command: &LicenseCommand,
) -> Result<()> {
    match command {
        LicenseCommand::Set { key } => handle_set(startup, key),
        LicenseCommand::Validate => {
            let status = startup.client.validate_license().await;
            println!("{status}");
            Ok(())
        }
        LicenseCommand::Status => {
            let configured = if startup.store.has_license_key() {
                "configured"
            } else {
                "missing"
            };
            let plus = if startup.store.is_plus_user() {
                "on"
            } else {
                "off"
            };
            println!("license key: {configured}");
            println!("plus mode: {plus}");
            Ok(())
        }
    }
}

fn handle_set(startup: &StartupContext, key: &str) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        bail!("License key must not be empty");
    }

    let sealed = startup
        .cipher
        .encrypt(key)
        .context("Failed to encrypt license key")?;
    startup.store.set_license_key(sealed)?;

    println!("License key saved to {}", startup.config_path.display());
    Ok(())
}
