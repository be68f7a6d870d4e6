//! Brevilabs gateway client
//!
//! Every operation goes through [`BrevilabsClient::make_request`]:
//! 1. Gate on a stored license key (notice + abort when missing)
//! 2. Join the base URL with the endpoint path
//! 3. Encode the payload as query parameters (GET) or a JSON body (POST)
//! 4. Attach `Content-Type`, `X-Client-Version` and, unless excluded, the
//!    decrypted key as a bearer token
//! 5. Send, parse the body as JSON, log it and hand it back typed

use brevilabs_commons::http::create_client;
use brevilabs_commons::{
    KeyDecryptor, NoticeSink, PlainKeyDecryptor, PlusToggle, SettingsSource, TracingNoticeSink,
};
use brevilabs_config::ApiConfig;
use brevilabs_config::constants::api::{
    BREVILABS_API_BASE_URL, CLIENT_VERSION_HEADER, UNKNOWN_CLIENT_VERSION,
};
use brevilabs_config::constants::license::{INVALID_LICENSE_REASON, LICENSE_KEY_MISSING_NOTICE};
use parking_lot::RwLock;
use reqwest::Client as HttpClient;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::endpoint::{Endpoint, RequestMethod};
use crate::error::{BrevilabsError, BrevilabsResult, extract_error_detail};
use crate::license::LicenseStatus;
use crate::types::{
    BrocaRequest, BrocaResponse, EndpointRequest, LicenseRequest, Pdf4llmRequest,
    Pdf4llmResponse, RerankRequest, RerankResponse, Url4llmRequest, Url4llmResponse,
    WebSearchRequest, WebSearchResponse, Youtube4llmRequest, Youtube4llmResponse,
};

/// Client for the Brevilabs backend.
///
/// Construct one per process with [`BrevilabsClientBuilder`] and share it
/// behind an `Arc`; all methods take `&self`.
pub struct BrevilabsClient {
    http_client: HttpClient,
    base_url: String,
    plugin_version: RwLock<String>,
    settings: Arc<dyn SettingsSource>,
    plus: Arc<dyn PlusToggle>,
    decryptor: Arc<dyn KeyDecryptor>,
    notices: Arc<dyn NoticeSink>,
}

/// Builder for [`BrevilabsClient`]
pub struct BrevilabsClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    plugin_version: Option<String>,
    settings: Arc<dyn SettingsSource>,
    plus: Arc<dyn PlusToggle>,
    decryptor: Arc<dyn KeyDecryptor>,
    notices: Arc<dyn NoticeSink>,
    http_client: Option<HttpClient>,
}

impl BrevilabsClientBuilder {
    /// Create a builder from separate settings and plus-mode collaborators.
    pub fn new(settings: Arc<dyn SettingsSource>, plus: Arc<dyn PlusToggle>) -> Self {
        Self {
            base_url: BREVILABS_API_BASE_URL.to_string(),
            timeout: None,
            plugin_version: None,
            settings,
            plus,
            decryptor: Arc::new(PlainKeyDecryptor),
            notices: Arc::new(TracingNoticeSink),
            http_client: None,
        }
    }

    /// Create a builder from one store that both holds settings and owns the
    /// plus flag.
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: SettingsSource + PlusToggle + 'static,
    {
        let settings: Arc<dyn SettingsSource> = store.clone();
        let plus: Arc<dyn PlusToggle> = store;
        Self::new(settings, plus)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Bound every request; the default is no timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Apply `[api]` settings from `brevilabs.toml`.
    pub fn with_api_config(mut self, config: &ApiConfig) -> Self {
        self.base_url = config.base_url.clone();
        self.timeout = config.timeout();
        self
    }

    pub fn with_plugin_version(mut self, version: impl Into<String>) -> Self {
        self.plugin_version = Some(version.into());
        self
    }

    pub fn with_decryptor(mut self, decryptor: Arc<dyn KeyDecryptor>) -> Self {
        self.decryptor = decryptor;
        self
    }

    pub fn with_notice_sink(mut self, notices: Arc<dyn NoticeSink>) -> Self {
        self.notices = notices;
        self
    }

    /// Reuse an existing HTTP client; `with_timeout` is then ignored.
    pub fn with_http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> BrevilabsResult<BrevilabsClient> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => create_client(self.timeout).map_err(BrevilabsError::Client)?,
        };

        Ok(BrevilabsClient {
            http_client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            plugin_version: RwLock::new(
                self.plugin_version
                    .unwrap_or_else(|| UNKNOWN_CLIENT_VERSION.to_string()),
            ),
            settings: self.settings,
            plus: self.plus,
            decryptor: self.decryptor,
            notices: self.notices,
        })
    }
}

impl BrevilabsClient {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Version sent in `X-Client-Version` on every subsequent request.
    pub fn set_plugin_version(&self, version: impl Into<String>) {
        *self.plugin_version.write() = version.into();
    }

    pub fn plugin_version(&self) -> String {
        self.plugin_version.read().clone()
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    // ========================================================================
    // Request pipeline
    // ========================================================================

    /// Abort with a notice when no license key is stored.
    fn ensure_license_key(&self) -> BrevilabsResult<()> {
        if self.settings.has_license_key() {
            return Ok(());
        }
        warn!("No license key configured; refusing to contact backend");
        self.notices.notice(LICENSE_KEY_MISSING_NOTICE);
        Err(BrevilabsError::LicenseKeyMissing)
    }

    fn decrypted_license_key(&self) -> BrevilabsResult<String> {
        let stored = self.settings.license_key().unwrap_or_default();
        self.decryptor
            .decrypt(&stored)
            .map_err(BrevilabsError::KeyDecryption)
    }

    /// Gate on the license key, then send `request` to its endpoint.
    pub async fn make_request<R: EndpointRequest>(
        &self,
        request: &R,
    ) -> BrevilabsResult<R::Response> {
        self.ensure_license_key()?;
        self.send(request).await
    }

    async fn send<R: EndpointRequest>(&self, request: &R) -> BrevilabsResult<R::Response> {
        let endpoint = R::ENDPOINT;
        let url = self.endpoint_url(endpoint);

        let mut builder = match R::METHOD {
            RequestMethod::Get => self.http_client.get(&url),
            RequestMethod::Post => self.http_client.post(&url),
        }
        .header(CONTENT_TYPE, "application/json")
        .header(CLIENT_VERSION_HEADER, self.plugin_version());

        if R::AUTHENTICATED {
            builder = builder.bearer_auth(self.decrypted_license_key()?);
        }

        builder = match R::METHOD {
            RequestMethod::Get => builder.query(&query_pairs(endpoint, request)?),
            RequestMethod::Post => builder.json(request),
        };

        debug!(endpoint = %endpoint, method = ?R::METHOD, "Sending Brevilabs request");

        let response = builder
            .send()
            .await
            .map_err(|source| BrevilabsError::Network { endpoint, source })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| BrevilabsError::Network { endpoint, source })?;

        let data = match serde_json::from_str::<Value>(&body) {
            Ok(data) => data,
            Err(_) if !status.is_success() => {
                return Err(BrevilabsError::HttpStatus {
                    endpoint,
                    status: status.as_u16(),
                    body: Value::String(body),
                });
            }
            Err(source) => return Err(BrevilabsError::Decode { endpoint, source }),
        };

        info!(endpoint = %endpoint, body = %data, "==== {} request ====", endpoint);

        if !status.is_success() {
            return Err(BrevilabsError::HttpStatus {
                endpoint,
                status: status.as_u16(),
                body: data,
            });
        }

        serde_json::from_value(data).map_err(|source| BrevilabsError::Decode { endpoint, source })
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Validate the stored license key and update plus mode.
    ///
    /// The gate still applies: with no key configured a notice is shown and
    /// the outcome is [`LicenseStatus::Indeterminate`].
    pub async fn validate_license(&self) -> LicenseStatus {
        debug!(
            has_license_key = self.settings.has_license_key(),
            plus = self.settings.is_plus_user(),
            "Validating license key"
        );

        match self.request_license_validation().await {
            Ok(_) => {
                info!("validate_license: valid");
                self.plus.turn_on_plus();
                LicenseStatus::Valid
            }
            Err(err) => {
                let detail = extract_error_detail(&err);
                if detail.reason.as_deref() == Some(INVALID_LICENSE_REASON) {
                    info!("validate_license: invalid");
                    self.plus.turn_off_plus();
                    LicenseStatus::Invalid
                } else {
                    warn!(error = %err, "validate_license: outcome unknown");
                    LicenseStatus::Indeterminate
                }
            }
        }
    }

    async fn request_license_validation(&self) -> BrevilabsResult<Value> {
        self.ensure_license_key()?;
        let request = LicenseRequest {
            license_key: self.decrypted_license_key()?,
        };
        self.send(&request).await
    }

    /// Plan tool calls for a user message.
    pub async fn broca(&self, user_message: impl Into<String>) -> BrevilabsResult<BrocaResponse> {
        self.make_request(&BrocaRequest {
            message: user_message.into(),
        })
        .await
    }

    /// Score `documents` against `query`; scores carry the original index.
    pub async fn rerank(
        &self,
        query: impl Into<String>,
        documents: Vec<String>,
    ) -> BrevilabsResult<RerankResponse> {
        self.make_request(&RerankRequest::new(query, documents)).await
    }

    pub async fn url4llm(&self, url: impl Into<String>) -> BrevilabsResult<Url4llmResponse> {
        self.make_request(&Url4llmRequest { url: url.into() }).await
    }

    /// Extract text from a PDF; the bytes are sent base64-encoded.
    pub async fn pdf4llm(&self, binary_content: &[u8]) -> BrevilabsResult<Pdf4llmResponse> {
        self.make_request(&Pdf4llmRequest::from_bytes(binary_content))
            .await
    }

    pub async fn web_search(&self, query: impl Into<String>) -> BrevilabsResult<WebSearchResponse> {
        self.make_request(&WebSearchRequest {
            query: query.into(),
        })
        .await
    }

    pub async fn youtube4llm(
        &self,
        url: impl Into<String>,
    ) -> BrevilabsResult<Youtube4llmResponse> {
        self.make_request(&Youtube4llmRequest { url: url.into() })
            .await
    }
}

/// Flatten a payload's top-level fields into query parameters. Strings are
/// sent verbatim, everything else as its JSON text.
fn query_pairs<P: Serialize>(
    endpoint: Endpoint,
    payload: &P,
) -> BrevilabsResult<Vec<(String, String)>> {
    let value = serde_json::to_value(payload)
        .map_err(|source| BrevilabsError::Encode { endpoint, source })?;

    let Value::Object(fields) = value else {
        return Ok(Vec::new());
    };

    Ok(fields
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brevilabs_commons::{MemoryNoticeSink, MemorySettings};
    use serde_json::json;

    fn client_with(settings: MemorySettings) -> (BrevilabsClient, Arc<MemoryNoticeSink>) {
        let notices = Arc::new(MemoryNoticeSink::new());
        let client = BrevilabsClientBuilder::with_store(Arc::new(settings))
            .with_base_url("http://localhost:9/v1/")
            .with_notice_sink(notices.clone())
            .build()
            .unwrap();
        (client, notices)
    }

    #[test]
    fn test_builder_trims_base_url() {
        let (client, _) = client_with(MemorySettings::new());
        assert_eq!(client.base_url(), "http://localhost:9/v1");
        assert_eq!(
            client.endpoint_url(Endpoint::Rerank),
            "http://localhost:9/v1/rerank"
        );
    }

    #[test]
    fn test_builder_defaults_to_brevilabs() {
        let client = BrevilabsClientBuilder::with_store(Arc::new(MemorySettings::new()))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://api.brevilabs.com/v1");
    }

    #[test]
    fn test_builder_applies_api_config() {
        let config = ApiConfig {
            base_url: "https://staging.example.com/v2".to_string(),
            timeout_secs: Some(15),
        };
        let client = BrevilabsClientBuilder::with_store(Arc::new(MemorySettings::new()))
            .with_api_config(&config)
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://staging.example.com/v2");
    }

    #[test]
    fn test_plugin_version_defaults_to_unknown() {
        let (client, _) = client_with(MemorySettings::new());
        assert_eq!(client.plugin_version(), "Unknown");

        client.set_plugin_version("2.7.0");
        assert_eq!(client.plugin_version(), "2.7.0");
    }

    #[test]
    fn test_builder_plugin_version() {
        let client = BrevilabsClientBuilder::with_store(Arc::new(MemorySettings::new()))
            .with_plugin_version("1.0.0")
            .build()
            .unwrap();
        assert_eq!(client.plugin_version(), "1.0.0");
    }

    #[test]
    fn test_gate_emits_single_notice() {
        let (client, notices) = client_with(MemorySettings::new());
        let err = client.ensure_license_key().unwrap_err();

        assert!(matches!(err, BrevilabsError::LicenseKeyMissing));
        assert_eq!(notices.notices(), vec![LICENSE_KEY_MISSING_NOTICE]);
    }

    #[test]
    fn test_query_pairs_coerce_to_strings() {
        #[derive(Serialize)]
        struct Probe {
            query: String,
            limit: u32,
            tags: Vec<&'static str>,
        }

        let pairs = query_pairs(
            Endpoint::WebSearch,
            &Probe {
                query: "rust async".to_string(),
                limit: 5,
                tags: vec!["a", "b"],
            },
        )
        .unwrap();

        assert!(pairs.contains(&("query".to_string(), "rust async".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "5".to_string())));
        assert!(pairs.contains(&("tags".to_string(), json!(["a", "b"]).to_string())));
    }

    #[tokio::test]
    async fn test_missing_key_makes_validation_indeterminate() {
        let settings = Arc::new(MemorySettings::new());
        settings.set_plus_user(true);
        let notices = Arc::new(MemoryNoticeSink::new());

        let client = BrevilabsClientBuilder::with_store(settings.clone())
            .with_base_url("http://localhost:9")
            .with_notice_sink(notices.clone())
            .build()
            .unwrap();

        assert_eq!(client.validate_license().await, LicenseStatus::Indeterminate);
        assert!(settings.is_plus_user());
        assert_eq!(notices.len(), 1);
    }
}
