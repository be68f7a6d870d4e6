use anyhow::Result;
use brevilabs_config::BrevilabsConfig;
use std::path::Path;

pub fn handle_init_command(config_path: &Path, force: bool) -> Result<()> {
    if BrevilabsConfig::bootstrap(config_path, force)? {
        println!("Configuration written to {}", config_path.display());
    } else {
        println!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }
    Ok(())
}
