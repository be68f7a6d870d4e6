//! Shared traits and helper types used to keep the Brevilabs gateway client
//! decoupled from the host that embeds it. The client never reaches into a
//! settings file, an encryption service or a UI directly; it talks to the
//! narrow contracts defined here.
//!
//! `reference` holds in-memory adapters that tests and small embedders can
//! use without writing their own.

pub mod http;
pub mod notice;
pub mod reference;
pub mod secrets;
pub mod settings;

pub use notice::{NoopNoticeSink, NoticeSink, TracingNoticeSink};
pub use reference::{MemoryNoticeSink, MemorySettings};
pub use secrets::{KeyDecryptor, PlainKeyDecryptor};
pub use settings::{PlusToggle, SettingsSource};
