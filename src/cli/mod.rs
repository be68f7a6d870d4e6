pub mod args;
pub mod endpoints;
pub mod init;
pub mod license;

use anyhow::{Context, Result};
use serde::Serialize;

/// Print a response as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render response")?;
    println!("{rendered}");
    Ok(())
}
