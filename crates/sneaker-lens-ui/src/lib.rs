#![warn(missing_docs)]
//! # sneaker-lens-ui
//!
//! ## Purpose
//! Defines the UI-facing state model and view models for `sneaker-lens`.
//!
//! ## Responsibilities
//! - Represent the upload/analyze flow as a single [`UiState`] value with a
//!   pure [`transition`] function.
//! - Project a state into visible view regions ([`ViewRegions`]).
//! - Render listings ([`ListingsPanel`]) and the price chart
//!   ([`ChartCanvas`]) into owned view models.
//! - Render a full [`ViewSnapshot`] as terminal text.
//!
//! ## Data flow
//! Controller events -> [`transition`] -> [`UiState`] -> [`ViewRegions`] ->
//! rendered snapshot.
//!
//! ## Ownership and lifetimes
//! Listing rows and chart instances own their data; a [`ViewSnapshot`]
//! borrows them for the duration of one frame.
//!
//! ## Error model
//! Illegal transitions return [`TransitionError`]; callers treat them as
//! programming errors and leave state unchanged.

mod chart;
mod listings;
mod view;

pub use chart::{
    CHART_SERIES_LABEL, ChartCanvas, LineChart, MAX_X_TICKS, XTick, format_axis_price,
    sparkline, thin_tick_indices, y_axis_ticks,
};
pub use listings::{ListingRow, ListingsPanel, NO_LISTINGS_MESSAGE, ResultHeader, format_price};
pub use view::{ViewSnapshot, render_text};

use thiserror::Error;

/// Progress text shown while the request is in flight.
pub const PROGRESS_UPLOADING: &str = "Uploading and identifying...";
/// Progress text shown once results are rendered.
pub const PROGRESS_COMPLETE: &str = "Analysis complete!";

/// Phase of the upload/analyze flow. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiState {
    /// Nothing selected.
    Idle,
    /// A valid image is selected and can be analyzed.
    ImageSelected,
    /// One analysis request is in flight.
    Loading,
    /// Results are rendered.
    Result,
    /// The current attempt failed; only reset leaves this state.
    Error,
}

/// Inputs that drive [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// A file passed image validation.
    ImageAccepted,
    /// A file failed image validation.
    ImageRejected,
    /// Analysis was requested for the current selection.
    AnalyzeRequested,
    /// The analysis request completed with a usable result.
    ResponseSucceeded,
    /// The request, the backend or response decoding failed.
    ResponseFailed,
    /// User reset the flow.
    Reset,
}

/// Computes the next state for an event.
///
/// # Errors
/// Returns [`TransitionError`] when the event is not allowed in `state`.
pub fn transition(state: UiState, event: UiEvent) -> Result<UiState, TransitionError> {
    use UiEvent as E;
    use UiState as S;

    let next = match (state, event) {
        (_, E::Reset) => S::Idle,
        (S::Idle | S::ImageSelected, E::ImageAccepted) => S::ImageSelected,
        (S::Idle | S::ImageSelected, E::ImageRejected) => S::Error,
        (S::ImageSelected, E::AnalyzeRequested) => S::Loading,
        (S::Loading, E::ResponseSucceeded) => S::Result,
        (S::Loading, E::ResponseFailed) => S::Error,
        // Analyze without a selection surfaces in the error view.
        (S::Idle, E::AnalyzeRequested) => S::Error,
        (from, event) => return Err(TransitionError { from, event }),
    };

    Ok(next)
}

/// Rejected state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("event {event:?} is not allowed in state {from:?}")]
pub struct TransitionError {
    /// State the event was applied to.
    pub from: UiState,
    /// Rejected event.
    pub event: UiEvent,
}

/// Visibility of each view region for one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRegions {
    /// Upload area (drop zone, prompt or preview, analyze button).
    pub upload_section: bool,
    /// "Drop an image" prompt inside the upload area.
    pub upload_prompt: bool,
    /// Preview of the selected image.
    pub image_preview: bool,
    /// Whether the analyze control accepts input.
    pub analyze_enabled: bool,
    /// Results area (loader, content or error).
    pub results_section: bool,
    /// Progress indicator.
    pub loader: bool,
    /// Header, listings and chart.
    pub result_content: bool,
    /// Error banner.
    pub error_message: bool,
}

impl ViewRegions {
    /// Projects a state into region visibility.
    pub fn for_state(state: UiState) -> Self {
        let hidden = Self {
            upload_section: false,
            upload_prompt: false,
            image_preview: false,
            analyze_enabled: false,
            results_section: false,
            loader: false,
            result_content: false,
            error_message: false,
        };

        match state {
            UiState::Idle => Self {
                upload_section: true,
                upload_prompt: true,
                ..hidden
            },
            UiState::ImageSelected => Self {
                upload_section: true,
                image_preview: true,
                analyze_enabled: true,
                ..hidden
            },
            UiState::Loading => Self {
                results_section: true,
                loader: true,
                ..hidden
            },
            UiState::Result => Self {
                results_section: true,
                result_content: true,
                ..hidden
            },
            UiState::Error => Self {
                results_section: true,
                error_message: true,
                ..hidden
            },
        }
    }
}
