//! Runtime configuration.

use std::time::Duration;

use sneaker_lens_upload::analyze_endpoint;
use url::Url;

use crate::AppError;

/// Env var holding the backend base URL.
pub const API_BASE_URL_ENV: &str = "SNEAKER_LENS_API_BASE_URL";
/// Base URL used when neither flag nor env var is set.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
/// Whole-request timeout used when no flag is given.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL; `/api/analyze` is appended.
    pub api_base_url: Url,
    /// Timeout for the analyze request.
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Resolves configuration with precedence flag > env > default.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] for a base URL that is not `http(s)` or a
    /// zero timeout.
    pub fn resolve(
        flag_base_url: Option<&str>,
        env_base_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, AppError> {
        let raw = non_blank(flag_base_url)
            .or_else(|| non_blank(env_base_url))
            .unwrap_or(DEFAULT_API_BASE_URL);

        analyze_endpoint(raw).map_err(|error| AppError::Config(error.to_string()))?;
        let api_base_url = Url::parse(raw)
            .map_err(|error| AppError::Config(format!("invalid base url: {error}")))?;

        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Resolves configuration, reading [`API_BASE_URL_ENV`] from the process.
    ///
    /// # Errors
    /// Same as [`Self::resolve`].
    pub fn from_env(flag_base_url: Option<&str>, timeout_secs: Option<u64>) -> Result<Self, AppError> {
        let env_base_url = std::env::var(API_BASE_URL_ENV).ok();
        Self::resolve(flag_base_url, env_base_url.as_deref(), timeout_secs)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
