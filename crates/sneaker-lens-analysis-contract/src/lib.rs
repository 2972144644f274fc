#![warn(missing_docs)]
//! # sneaker-lens-analysis-contract
//!
//! ## Purpose
//! Defines the analysis service response schema and its client-side checks.
//!
//! ## Responsibilities
//! - Parse success bodies of `POST /api/analyze` into [`AnalysisResult`].
//! - Reject bodies that decode but violate the contract (blank identity,
//!   mismatched price history series).
//! - Extract a user-facing message from error bodies.
//!
//! ## Data flow
//! Raw JSON body -> [`parse_analysis_response`] (2xx) or
//! [`error_message_from_body`] (non-2xx) -> controller state.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs to avoid borrowing from transient network
//! buffers.
//!
//! ## Error model
//! Invalid JSON or missing fields return [`AnalysisContractError::Decode`];
//! semantic violations return [`AnalysisContractError::InvalidContract`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parsed success response of the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Identity of the recognised sneaker.
    pub sneaker_info: SneakerInfo,
    /// Marketplace offers, in backend order.
    pub price_listings: Vec<Listing>,
    /// Time-ordered aggregate prices for the trend chart.
    pub price_history: PriceHistory,
}

/// Identity of the recognised sneaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SneakerInfo {
    /// Official model and colorway name.
    pub name: String,
    /// Manufacturer style code (SKU).
    pub style_code: String,
    /// Brand, when the recogniser reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// One marketplace's offer for the identified sneaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Marketplace name.
    pub name: String,
    /// Marketplace logo URL.
    pub logo: String,
    /// Item condition, e.g. `New` or `Used (9/10)`.
    pub condition: String,
    /// Size label; numeric sizes are accepted and kept as text.
    #[serde(with = "size_text")]
    pub size: String,
    /// Asking price in dollars.
    pub price: Decimal,
}

/// Price series backing the trend chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceHistory {
    /// X-axis labels, one per point.
    pub labels: Vec<String>,
    /// Prices, one per label.
    pub data: Vec<f64>,
}

/// Parses a success body into a validated [`AnalysisResult`].
///
/// # Errors
/// Returns [`AnalysisContractError::Decode`] for invalid JSON or missing
/// fields.
/// Returns [`AnalysisContractError::InvalidContract`] when identity fields
/// are blank or the history series lengths differ.
pub fn parse_analysis_response(raw: &str) -> Result<AnalysisResult, AnalysisContractError> {
    let parsed: AnalysisResult =
        serde_json::from_str(raw).map_err(AnalysisContractError::Decode)?;

    if parsed.sneaker_info.name.trim().is_empty() {
        return Err(AnalysisContractError::InvalidContract(
            "sneaker_info.name is empty".to_string(),
        ));
    }

    if parsed.sneaker_info.style_code.trim().is_empty() {
        return Err(AnalysisContractError::InvalidContract(
            "sneaker_info.style_code is empty".to_string(),
        ));
    }

    let history = &parsed.price_history;
    if history.labels.len() != history.data.len() {
        return Err(AnalysisContractError::InvalidContract(format!(
            "price_history has {} labels but {} data points",
            history.labels.len(),
            history.data.len()
        )));
    }

    Ok(parsed)
}

/// Extracts the message to show for a non-success response.
///
/// Uses the body's `error` string when present and non-blank, otherwise
/// `"Request failed with status {status}"`.
pub fn error_message_from_body(status: u16, raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|body| {
            body.get("error")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback_error_message(status))
}

/// Generic message for a failed status code.
pub fn fallback_error_message(status: u16) -> String {
    format!("Request failed with status {status}")
}

/// Analysis contract errors.
#[derive(Debug, Error)]
pub enum AnalysisContractError {
    /// JSON decode failure.
    #[error("analysis decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Parsed payload violates contract invariants.
    #[error("analysis contract violation: {0}")]
    InvalidContract(String),
}

mod size_text {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSize {
        Text(String),
        Number(serde_json::Number),
    }

    pub fn serialize<S>(size: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(size)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawSize::deserialize(deserializer)? {
            RawSize::Text(text) => text,
            RawSize::Number(number) => number.to_string(),
        })
    }
}
