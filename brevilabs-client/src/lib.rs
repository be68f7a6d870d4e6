//! Gateway client for the Brevilabs backend.
//!
//! One typed method per remote capability, all funnelled through a single
//! request builder that gates on the stored license key, decrypts it just
//! before use and attaches the auth and client-version headers.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use brevilabs_client::BrevilabsClientBuilder;
//! use brevilabs_config::{BrevilabsConfig, KeyCipher, SettingsStore};
//!
//! let store = Arc::new(SettingsStore::in_memory(BrevilabsConfig::default()));
//! let client = BrevilabsClientBuilder::with_store(store)
//!     .with_decryptor(Arc::new(KeyCipher::for_machine()?))
//!     .build()?;
//! client.set_plugin_version("2.7.0");
//!
//! let status = client.validate_license().await;
//! let ranked = client.rerank("cats", vec!["a".into(), "b".into()]).await?;
//! ```

pub mod client;
pub mod endpoint;
pub mod error;
pub mod license;
pub mod types;

pub use client::{BrevilabsClient, BrevilabsClientBuilder};
pub use endpoint::{Endpoint, RequestMethod};
pub use error::{BrevilabsError, BrevilabsResult, ErrorDetail, extract_error_detail};
pub use license::LicenseStatus;
pub use types::{
    BrocaPayload, BrocaRequest, BrocaResponse, EndpointRequest, LicenseRequest, Pdf4llmRequest,
    Pdf4llmResponse, RerankPayload, RerankRequest, RerankResponse, RerankScore, RerankUsage,
    ToolCall, Url4llmRequest, Url4llmResponse, WebSearchChoice, WebSearchMessage,
    WebSearchPayload, WebSearchRequest, WebSearchResponse, Youtube4llmRequest,
    Youtube4llmResponse, YoutubeTranscript,
};
