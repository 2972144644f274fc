#![warn(missing_docs)]
//! # sneaker-lens-upload
//!
//! ## Purpose
//! Sends one analyze request to the backend and classifies the outcome.
//!
//! ## Responsibilities
//! - Validate the configured base URL and derive `/api/analyze`.
//! - Abstract HTTP behind [`AnalysisTransport`] so the controller can be
//!   driven by a scripted transport in tests.
//! - Map non-success responses to [`UploadError::Backend`] with the backend's
//!   message and malformed success bodies to [`UploadError::Decode`].
//!
//! ## Data flow
//! [`AnalyzeRequest`] -> JSON bytes -> transport `POST` ->
//! [`TransportResponse`] -> [`AnalysisResult`] or [`UploadError`].
//!
//! ## Error model
//! Every failure is terminal for the attempt; this crate never retries.
//!
//! ## Security and privacy notes
//! Request bodies contain the full image; they are never logged. Only byte
//! counts and status codes are traced.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use sneaker_lens_analysis_contract::{
    AnalysisContractError, AnalysisResult, error_message_from_body, parse_analysis_response,
};
use sneaker_lens_core::{AnalyzeRequest, CoreError};
use thiserror::Error;
use url::Url;

/// Path of the analysis endpoint relative to the base URL.
pub const ANALYZE_PATH: &str = "api/analyze";

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl TransportResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract transport used by [`AnalyzeClient`].
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Posts a JSON body and returns the raw response.
    ///
    /// # Errors
    /// Returns [`UploadError::Network`] or [`UploadError::Timeout`] when no
    /// response was received.
    async fn post_json(
        &self,
        endpoint: &Url,
        body: Vec<u8>,
    ) -> Result<TransportResponse, UploadError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpAnalysisTransport {
    client: reqwest::Client,
}

impl HttpAnalysisTransport {
    /// Builds a transport with a whole-request timeout.
    ///
    /// # Errors
    /// Returns [`UploadError::Network`] when the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| UploadError::Network(format!("http client build failed: {error}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AnalysisTransport for HttpAnalysisTransport {
    async fn post_json(
        &self,
        endpoint: &Url,
        body: Vec<u8>,
    ) -> Result<TransportResponse, UploadError> {
        tracing::debug!(
            stage = "upload",
            action = "request_sent",
            endpoint = %endpoint,
            body_bytes = body.len()
        );

        let response = self
            .client
            .post(endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        tracing::debug!(
            stage = "upload",
            action = "response_received",
            status,
            body_bytes = body.len()
        );

        Ok(TransportResponse { status, body })
    }
}

fn map_reqwest_error(error: reqwest::Error) -> UploadError {
    if error.is_timeout() {
        UploadError::Timeout
    } else {
        UploadError::Network(error.to_string())
    }
}

/// Client for the analysis endpoint.
#[derive(Clone)]
pub struct AnalyzeClient {
    endpoint: Url,
    transport: Arc<dyn AnalysisTransport>,
}

impl AnalyzeClient {
    /// Creates a client for `{base_url}/api/analyze`.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidEndpoint`] when the base URL does not
    /// parse or is not `http`/`https`.
    pub fn new(base_url: &str, transport: Arc<dyn AnalysisTransport>) -> Result<Self, UploadError> {
        Ok(Self {
            endpoint: analyze_endpoint(base_url)?,
            transport,
        })
    }

    /// Returns the resolved endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one analyze request.
    ///
    /// # Errors
    /// - [`UploadError::Network`] / [`UploadError::Timeout`]: no response.
    /// - [`UploadError::Backend`]: non-2xx status, with the extracted message.
    /// - [`UploadError::Decode`]: 2xx body violating the response contract.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, UploadError> {
        let body = request.to_json_bytes()?;
        let response = self.transport.post_json(&self.endpoint, body).await?;

        if !response.is_success() {
            return Err(UploadError::Backend {
                status: response.status,
                message: error_message_from_body(response.status, &response.body),
            });
        }

        Ok(parse_analysis_response(&response.body)?)
    }
}

/// Resolves the analyze endpoint from a base URL.
///
/// # Errors
/// Returns [`UploadError::InvalidEndpoint`] for unparsable or non-HTTP URLs.
pub fn analyze_endpoint(base_url: &str) -> Result<Url, UploadError> {
    let base = base_url.trim().trim_end_matches('/');
    let parsed = Url::parse(base)
        .map_err(|error| UploadError::InvalidEndpoint(format!("invalid base url: {error}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(UploadError::InvalidEndpoint(format!(
            "base url must use http or https, got '{}'",
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none() {
        return Err(UploadError::InvalidEndpoint(
            "base url has no host".to_string(),
        ));
    }

    // The analyze path is appended to the base, so anything after the path
    // would swallow it.
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(UploadError::InvalidEndpoint(
            "base url must not carry a query or fragment".to_string(),
        ));
    }

    Url::parse(&format!("{base}/{ANALYZE_PATH}"))
        .map_err(|error| UploadError::InvalidEndpoint(format!("invalid endpoint: {error}")))
}

/// Coarse failure category used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// No response reached the client.
    Network,
    /// The backend answered with a non-success status.
    Backend,
    /// The backend answered 2xx with an unusable body.
    Decode,
    /// The request never left the client.
    Local,
}

/// Classifies an upload failure.
pub fn classify_upload_error(error: &UploadError) -> FailureClass {
    match error {
        UploadError::Network(_) | UploadError::Timeout => FailureClass::Network,
        UploadError::Backend { .. } => FailureClass::Backend,
        UploadError::Decode(_) => FailureClass::Decode,
        UploadError::InvalidEndpoint(_) | UploadError::Codec(_) => FailureClass::Local,
    }
}

/// Errors produced while talking to the analysis service.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Configured base URL is unusable.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Request timed out.
    #[error("request timed out")]
    Timeout,
    /// Connection-level failure.
    #[error("network failure: {0}")]
    Network(String),
    /// Non-success status; `message` is what the user sees.
    #[error("{message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Backend-provided or fallback message.
        message: String,
    },
    /// Success body failed contract validation.
    #[error(transparent)]
    Decode(#[from] AnalysisContractError),
    /// Request body could not be encoded.
    #[error(transparent)]
    Codec(#[from] CoreError),
}
