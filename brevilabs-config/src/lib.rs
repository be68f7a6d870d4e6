//! Configuration, settings storage and key encryption for the Brevilabs
//! gateway client.
//!
//! - [`loader`] reads and writes `brevilabs.toml`
//! - [`settings`] exposes the `[plus]` section through the collaborator
//!   traits from `brevilabs-commons`
//! - [`encryption`] seals license keys at rest with a machine-derived key
//! - [`api_keys`] applies `.env` and environment overrides

pub mod api;
pub mod api_keys;
pub mod constants;
pub mod debug;
pub mod encryption;
pub mod loader;
pub mod settings;

pub use api::ApiConfig;
pub use debug::{DebugConfig, TraceLevel};
pub use encryption::KeyCipher;
pub use loader::BrevilabsConfig;
pub use settings::{PlusSettings, SettingsStore};
