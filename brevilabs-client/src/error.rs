//! Error types for the gateway client

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::endpoint::Endpoint;

/// Errors raised while talking to the Brevilabs backend
#[derive(Debug, Error)]
pub enum BrevilabsError {
    /// No license key is configured; the call was aborted before any I/O
    #[error("License key not initialized")]
    LicenseKeyMissing,

    /// The stored license key could not be decrypted
    #[error("Failed to decrypt license key: {0:#}")]
    KeyDecryption(#[source] anyhow::Error),

    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("Request to {endpoint} failed: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status
    #[error("{endpoint} returned HTTP {status}: {body}")]
    HttpStatus {
        endpoint: Endpoint,
        status: u16,
        body: Value,
    },

    /// The response body was not JSON or did not match the endpoint's shape
    #[error("Failed to parse {endpoint} response: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be encoded
    #[error("Failed to encode {endpoint} request: {source}")]
    Encode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

pub type BrevilabsResult<T> = Result<T, BrevilabsError>;

/// Structured detail the backend attaches to error responses, usually as
/// `{"detail": {"reason": "...", ...}}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorDetail {
    fn from_reason(reason: &str) -> Self {
        Self {
            reason: Some(reason.to_string()),
            ..Self::default()
        }
    }

    fn from_body(body: &Value) -> Self {
        match body.get("detail") {
            Some(Value::String(reason)) => Self::from_reason(reason),
            Some(detail @ Value::Object(_)) => {
                serde_json::from_value(detail.clone()).unwrap_or_default()
            }
            Some(_) => Self::default(),
            None if body.get("reason").is_some() => {
                serde_json::from_value(body.clone()).unwrap_or_default()
            }
            None => Self::default(),
        }
    }
}

/// Extract the backend's error detail from a failed call.
///
/// Only HTTP status errors carry a detail; everything else yields an empty
/// one.
pub fn extract_error_detail(error: &BrevilabsError) -> ErrorDetail {
    match error {
        BrevilabsError::HttpStatus { body, .. } => ErrorDetail::from_body(body),
        _ => ErrorDetail::default(),
    }
}
