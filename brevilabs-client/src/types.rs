//! Request and response records, one pair per endpoint.
//!
//! Response records mirror what the backend sends; unknown fields are
//! ignored and nothing is validated beyond the shape.

use base64::{Engine, engine::general_purpose::STANDARD};
use brevilabs_config::constants::api::RERANK_MODEL;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::endpoint::{Endpoint, RequestMethod};

/// A payload bound to one endpoint and its response shape.
pub trait EndpointRequest: Serialize + Send + Sync {
    const ENDPOINT: Endpoint;
    const METHOD: RequestMethod = RequestMethod::Post;
    /// Whether the decrypted license key is sent as a bearer token.
    const AUTHENTICATED: bool = true;

    type Response: DeserializeOwned;
}

// ---------------------------------------------------------------------------
// /license
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseRequest {
    pub license_key: String,
}

impl EndpointRequest for LicenseRequest {
    const ENDPOINT: Endpoint = Endpoint::License;
    const AUTHENTICATED: bool = false;
    type Response = Value;
}

// ---------------------------------------------------------------------------
// /broca
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrocaRequest {
    pub message: String,
}

impl EndpointRequest for BrocaRequest {
    const ENDPOINT: Endpoint = Endpoint::Broca;
    type Response = BrocaResponse;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrocaResponse {
    /// Absent when the backend answers with `detail` only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<BrocaPayload>,
    #[serde(default)]
    pub elapsed_time_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrocaPayload {
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default)]
    pub salience_terms: Vec<String>,
}

/// A tool the planner suggests invoking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// /rerank
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RerankRequest {
    pub query: String,
    pub documents: Vec<String>,
    pub model: String,
}

impl RerankRequest {
    pub fn new(query: impl Into<String>, documents: Vec<String>) -> Self {
        Self {
            query: query.into(),
            documents,
            model: RERANK_MODEL.to_string(),
        }
    }
}

impl EndpointRequest for RerankRequest {
    const ENDPOINT: Endpoint = Endpoint::Rerank;
    type Response = RerankResponse;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankResponse {
    pub response: RerankPayload,
    #[serde(default)]
    pub elapsed_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankPayload {
    #[serde(default)]
    pub object: String,
    pub data: Vec<RerankScore>,
    pub model: String,
    pub usage: RerankUsage,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RerankScore {
    pub relevance_score: f64,
    /// Position of the document in the request
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RerankUsage {
    pub total_tokens: u64,
}

// ---------------------------------------------------------------------------
// /url4llm, /pdf4llm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Url4llmRequest {
    pub url: String,
}

impl EndpointRequest for Url4llmRequest {
    const ENDPOINT: Endpoint = Endpoint::Url4llm;
    type Response = Url4llmResponse;
}

/// Extracted page content; the shape is owned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Url4llmResponse {
    pub response: Value,
    #[serde(default)]
    pub elapsed_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pdf4llmRequest {
    /// Base64 of the raw document bytes
    pub pdf: String,
}

impl Pdf4llmRequest {
    pub fn from_bytes(content: &[u8]) -> Self {
        Self {
            pdf: STANDARD.encode(content),
        }
    }
}

impl EndpointRequest for Pdf4llmRequest {
    const ENDPOINT: Endpoint = Endpoint::Pdf4llm;
    type Response = Pdf4llmResponse;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pdf4llmResponse {
    pub response: Value,
    #[serde(default)]
    pub elapsed_time_ms: f64,
}

// ---------------------------------------------------------------------------
// /websearch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebSearchRequest {
    pub query: String,
}

impl EndpointRequest for WebSearchRequest {
    const ENDPOINT: Endpoint = Endpoint::WebSearch;
    type Response = WebSearchResponse;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSearchResponse {
    pub response: WebSearchPayload,
    #[serde(default)]
    pub elapsed_time_ms: f64,
}

impl WebSearchResponse {
    /// Text of the first choice, which is the only one the backend sends.
    pub fn content(&self) -> Option<&str> {
        self.response
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }

    pub fn citations(&self) -> &[String] {
        &self.response.citations
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSearchPayload {
    pub choices: Vec<WebSearchChoice>,
    #[serde(default)]
    pub citations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSearchChoice {
    pub message: WebSearchMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSearchMessage {
    pub content: String,
}

// ---------------------------------------------------------------------------
// /youtube4llm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Youtube4llmRequest {
    pub url: String,
}

impl EndpointRequest for Youtube4llmRequest {
    const ENDPOINT: Endpoint = Endpoint::Youtube4llm;
    type Response = Youtube4llmResponse;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Youtube4llmResponse {
    pub response: YoutubeTranscript,
    #[serde(default)]
    pub elapsed_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YoutubeTranscript {
    pub transcript: String,
}
