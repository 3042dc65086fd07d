//! HTTP transport seam.
//!
//! Flows talk to the orchestrator only through `Transport`, so tests can
//! script responses without a server. `HttpTransport` is the reqwest-backed
//! implementation: JSON in, JSON out, no auth, no retry.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use calc_core::config::ServerConfig;
use calc_core::wire::ErrorBody;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

/// A request relative to the orchestrator origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Raw response. The body is parsed lazily by the caller.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The orchestrator's `{"error": ...}` message, if the body carries one.
    pub fn error_detail(&self) -> Option<String> {
        self.json::<ErrorBody>().ok().map(|b| b.error)
    }
}

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

// ── reqwest ───────────────────────────────────────────────────────────────────

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ServerConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.base_url, request.path);
        let transport_err = |e: reqwest::Error| ClientError::Transport {
            path: request.path.clone(),
            message: e.to_string(),
        };

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        }
        .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_err)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_err)?.to_vec();

        tracing::debug!(method = ?request.method, path = %request.path, status, "response received");
        Ok(ApiResponse { status, body })
    }
}
