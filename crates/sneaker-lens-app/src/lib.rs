#![warn(missing_docs)]
//! # sneaker-lens-app
//!
//! ## Purpose
//! Orchestrates selection, upload, rendering and reset for `sneaker-lens`.
//!
//! ## Responsibilities
//! - Drive the flow through [`UploadAnalyzeController`].
//! - Resolve runtime configuration ([`AppConfig`]).
//! - Wire the reqwest transport into the controller.
//! - Keep image payloads out of logs ([`redact_data_uri`]).
//!
//! ## Data flow
//! File path -> [`load_image_file`] -> controller select -> analyze ->
//! [`sneaker_lens_ui::ViewSnapshot`] -> front end.
//!
//! ## Ownership and lifetimes
//! The controller owns all flow state; front ends borrow snapshots per frame.
//! In-flight requests hold an owned [`AnalysisTicket`] rather than a borrow of
//! the controller.
//!
//! ## Error model
//! Flow failures are [`ControllerError`] values whose `Display` is the text
//! shown to the user. Setup failures (config, file IO) are [`AppError`].
//!
//! ## Security and privacy notes
//! Images are identified in logs by SHA-256 fingerprint only.

mod config;
mod controller;

pub use config::{API_BASE_URL_ENV, AppConfig, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use controller::{
    AnalysisOutcome, AnalysisTicket, Completion, ControllerError, DECODE_FAILURE_MESSAGE,
    INVALID_FILE_MESSAGE, NO_IMAGE_MESSAGE, UNKNOWN_ERROR_MESSAGE, UploadAnalyzeController,
};

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sneaker_lens_core::ImageInput;
use sneaker_lens_upload::{AnalyzeClient, HttpAnalysisTransport, UploadError};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("SNEAKER_LENS_VERSION");

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str =
    "sneaker_lens_app=info,sneaker_lens_upload=info,sneaker_lens_ui=info";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Installs the global `tracing` subscriber writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Builds a controller talking HTTP to the configured backend.
///
/// # Errors
/// Returns [`AppError::Upload`] when the HTTP client or endpoint is invalid.
pub fn build_controller(config: &AppConfig) -> Result<UploadAnalyzeController, AppError> {
    let transport = HttpAnalysisTransport::new(config.request_timeout)?;
    let client = AnalyzeClient::new(config.api_base_url.as_str(), Arc::new(transport))?;
    tracing::info!(
        stage = "startup",
        action = "client_ready",
        endpoint = %client.endpoint(),
        timeout_secs = config.request_timeout.as_secs()
    );
    Ok(UploadAnalyzeController::new(client))
}

/// Reads an image file into an [`ImageInput`].
///
/// Without `media_type` the controller sniffs the type from the bytes.
///
/// # Errors
/// Returns [`AppError::Io`] when the file cannot be read.
pub async fn load_image_file(path: &Path, media_type: Option<&str>) -> Result<ImageInput, AppError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(ImageInput::new(file_name, media_type, bytes))
}

/// Replaces base64 payloads following `base64,` with a length marker.
pub fn redact_data_uri(input: &str) -> String {
    const MARKER: &str = "base64,";

    let mut redacted = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(position) = rest.find(MARKER) {
        let payload_start = position + MARKER.len();
        redacted.push_str(&rest[..payload_start]);

        let payload = &rest[payload_start..];
        let payload_len = payload
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=')))
            .unwrap_or(payload.len());
        if payload_len > 0 {
            let _ = write!(redacted, "<redacted {payload_len} chars>");
        }
        rest = &payload[payload_len..];
    }
    redacted.push_str(rest);
    redacted
}

/// App setup error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration is unusable.
    #[error("config error: {0}")]
    Config(String),
    /// Image file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Transport or endpoint setup failure.
    #[error("upload setup error: {0}")]
    Upload(#[from] UploadError),
    /// Flow failure.
    #[error(transparent)]
    Controller(#[from] ControllerError),
    /// Result could not be encoded for output.
    #[error("output encoding failed: {0}")]
    Output(#[from] serde_json::Error),
}
