//! The upload/analyze controller.
//!
//! Owns the selection, the last result and the rendered views, and moves the
//! flow through [`UiState`] via [`sneaker_lens_ui::transition`].
//!
//! Every analysis is stamped with a generation. [`UploadAnalyzeController::reset`]
//! and new selections advance it, so an [`AnalysisOutcome`] produced for an
//! older generation is discarded instead of overwriting fresh state.

use sneaker_lens_analysis_contract::{AnalysisResult, Listing, PriceHistory};
use sneaker_lens_core::{AnalyzeRequest, CoreError, ImageInput, ImagePreview, SelectedImage};
use sneaker_lens_ui::{
    ChartCanvas, ListingsPanel, PROGRESS_COMPLETE, PROGRESS_UPLOADING, ResultHeader,
    TransitionError, UiEvent, UiState, ViewRegions, ViewSnapshot, transition,
};
use sneaker_lens_upload::{AnalyzeClient, UploadError, classify_upload_error};
use thiserror::Error;

use crate::redact_data_uri;

/// Message for any rejected file.
pub const INVALID_FILE_MESSAGE: &str = "Please upload a valid image file.";
/// Message when analysis is requested without a selection.
pub const NO_IMAGE_MESSAGE: &str = "No image selected.";
/// Message for a success response that failed validation.
pub const DECODE_FAILURE_MESSAGE: &str = "The analysis service returned an unexpected response.";
/// Message when a failure carries no text of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred during analysis.";

/// One analysis request detached from the controller.
///
/// Produced by [`UploadAnalyzeController::begin_analysis`]; running it does
/// not borrow the controller, so the flow can be reset while it is in flight.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    generation: u64,
    request: AnalyzeRequest,
}

impl AnalysisTicket {
    /// Generation this ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sends the request and captures the outcome.
    pub async fn run(self, client: &AnalyzeClient) -> AnalysisOutcome {
        AnalysisOutcome {
            generation: self.generation,
            result: client.analyze(&self.request).await,
        }
    }
}

/// Result of a finished request, tagged with its generation.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Generation of the ticket that produced this outcome.
    pub generation: u64,
    /// Parsed result or failure.
    pub result: Result<AnalysisResult, UploadError>,
}

/// What [`UploadAnalyzeController::complete_analysis`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome was rendered.
    Applied,
    /// The outcome belonged to a superseded analysis and was dropped.
    Stale,
}

/// Stateful orchestrator of select -> analyze -> render -> reset.
pub struct UploadAnalyzeController {
    client: AnalyzeClient,
    state: UiState,
    generation: u64,
    selected: Option<SelectedImage>,
    preview: Option<ImagePreview>,
    result: Option<AnalysisResult>,
    header: Option<ResultHeader>,
    listings: ListingsPanel,
    chart: ChartCanvas,
    progress: Option<&'static str>,
    error: Option<String>,
}

impl UploadAnalyzeController {
    /// Creates an idle controller.
    pub fn new(client: AnalyzeClient) -> Self {
        Self {
            client,
            state: UiState::Idle,
            generation: 0,
            selected: None,
            preview: None,
            result: None,
            header: None,
            listings: ListingsPanel::new(),
            chart: ChartCanvas::new(),
            progress: None,
            error: None,
        }
    }

    /// Current flow state.
    pub fn state(&self) -> UiState {
        self.state
    }

    /// Region visibility for the current state.
    pub fn regions(&self) -> ViewRegions {
        ViewRegions::for_state(self.state)
    }

    /// Whether the analyze control is enabled.
    pub fn analyze_enabled(&self) -> bool {
        self.regions().analyze_enabled
    }

    /// Current selection.
    pub fn selected_image(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    /// Result of the last applied analysis.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Error banner text.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Identity header of the last result.
    pub fn header(&self) -> Option<&ResultHeader> {
        self.header.as_ref()
    }

    /// Rendered listings.
    pub fn listings(&self) -> &ListingsPanel {
        &self.listings
    }

    /// Chart owner.
    pub fn chart(&self) -> &ChartCanvas {
        &self.chart
    }

    /// Current analysis generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Client used by [`Self::analyze`].
    pub fn client(&self) -> &AnalyzeClient {
        &self.client
    }

    /// Borrows everything needed to draw the current frame.
    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        ViewSnapshot {
            state: self.state,
            preview: self.preview.as_ref(),
            progress: self.progress,
            error: self.error.as_deref(),
            header: self.header.as_ref(),
            listings: &self.listings,
            chart: self.chart.current(),
        }
    }

    /// Validates and selects one file.
    ///
    /// # Errors
    /// Returns [`ControllerError::InvalidFile`] (and enters `Error`) for
    /// non-image files, or [`ControllerError::Transition`] when the flow is
    /// not accepting selections.
    pub fn select_image(&mut self, input: ImageInput) -> Result<&ImagePreview, ControllerError> {
        // Gate on the machine before touching any state.
        transition(self.state, UiEvent::ImageAccepted)?;

        match SelectedImage::from_input(input) {
            Ok(image) => {
                self.apply(UiEvent::ImageAccepted)?;
                self.generation += 1;
                tracing::info!(
                    stage = "selection",
                    action = "accepted",
                    file_name = image.file_name(),
                    media_type = image.media_type(),
                    bytes = image.bytes().len(),
                    fingerprint = %image.fingerprint()
                );
                let preview = image.preview();
                self.selected = Some(image);
                self.error = None;
                Ok(&*self.preview.insert(preview))
            }
            Err(error) => {
                tracing::warn!(stage = "selection", action = "rejected", detail = %error);
                self.selected = None;
                self.preview = None;
                self.generation += 1;
                self.apply(UiEvent::ImageRejected)?;
                self.error = Some(INVALID_FILE_MESSAGE.to_string());
                Err(ControllerError::InvalidFile(error))
            }
        }
    }

    /// Selects the first file of a drop; an empty drop changes nothing.
    ///
    /// # Errors
    /// Same as [`Self::select_image`].
    pub fn select_first(
        &mut self,
        inputs: Vec<ImageInput>,
    ) -> Result<Option<&ImagePreview>, ControllerError> {
        match inputs.into_iter().next() {
            Some(first) => self.select_image(first).map(Some),
            None => {
                tracing::debug!(stage = "selection", action = "empty_drop");
                Ok(None)
            }
        }
    }

    /// Returns to `Idle`, dropping selection, result, views and the chart.
    ///
    /// Any in-flight analysis becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.selected = None;
        self.preview = None;
        self.result = None;
        self.header = None;
        self.listings.clear();
        let released = self.chart.release();
        self.progress = None;
        self.error = None;
        self.state = UiState::Idle;
        tracing::info!(
            stage = "ui",
            action = "reset",
            generation = self.generation,
            chart_released = released
        );
    }

    /// Enters `Loading` and detaches the request for the current selection.
    ///
    /// # Errors
    /// Returns [`ControllerError::NoImage`] (and enters `Error`) without a
    /// selection, or [`ControllerError::Transition`] when an analysis is
    /// already running or finished.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, ControllerError> {
        let Some(image) = self.selected.as_ref() else {
            if self.state == UiState::Idle {
                self.apply(UiEvent::AnalyzeRequested)?;
                self.error = Some(NO_IMAGE_MESSAGE.to_string());
                return Err(ControllerError::NoImage);
            }
            return Err(TransitionError {
                from: self.state,
                event: UiEvent::AnalyzeRequested,
            }
            .into());
        };

        let request = AnalyzeRequest::for_image(image);
        let fingerprint = image.fingerprint();

        self.apply(UiEvent::AnalyzeRequested)?;
        self.generation += 1;
        tracing::info!(
            stage = "analysis",
            action = "started",
            endpoint = %self.client.endpoint(),
            fingerprint = %fingerprint,
            generation = self.generation
        );
        self.result = None;
        self.header = None;
        self.error = None;
        self.progress = Some(PROGRESS_UPLOADING);

        Ok(AnalysisTicket {
            generation: self.generation,
            request,
        })
    }

    /// Applies a finished outcome when it is still current.
    ///
    /// # Errors
    /// Returns the mapped failure after entering `Error`.
    pub fn complete_analysis(
        &mut self,
        outcome: AnalysisOutcome,
    ) -> Result<Completion, ControllerError> {
        if outcome.generation != self.generation || self.state != UiState::Loading {
            tracing::info!(
                stage = "analysis",
                action = "stale_discarded",
                outcome_generation = outcome.generation,
                current_generation = self.generation
            );
            return Ok(Completion::Stale);
        }

        match outcome.result {
            Ok(result) => {
                self.header = Some(ResultHeader::from(&result.sneaker_info));
                self.render_listings(&result.price_listings);
                self.render_chart(&result.price_history);
                tracing::info!(
                    stage = "analysis",
                    action = "completed",
                    listings = result.price_listings.len(),
                    history_points = result.price_history.data.len()
                );
                self.result = Some(result);
                self.progress = Some(PROGRESS_COMPLETE);
                self.apply(UiEvent::ResponseSucceeded)?;
                Ok(Completion::Applied)
            }
            Err(error) => {
                tracing::warn!(
                    stage = "analysis",
                    action = "failed",
                    failure_class = ?classify_upload_error(&error),
                    detail = %redact_data_uri(&error.to_string())
                );
                let error = ControllerError::from(error);
                self.fail(error.to_string())?;
                Err(error)
            }
        }
    }

    /// Runs one full analysis of the current selection.
    ///
    /// # Errors
    /// Any [`ControllerError`]; the state is `Error` afterwards except for
    /// rejected transitions, which leave it unchanged.
    pub async fn analyze(&mut self) -> Result<(), ControllerError> {
        let ticket = self.begin_analysis()?;
        let client = self.client.clone();
        let outcome = ticket.run(&client).await;
        self.complete_analysis(outcome).map(|_| ())
    }

    /// Replaces the rendered listings.
    pub fn render_listings(&mut self, listings: &[Listing]) {
        self.listings.render(listings);
    }

    /// Replaces the chart, destroying the previous instance first.
    pub fn render_chart(&mut self, history: &PriceHistory) {
        self.chart.render(history);
    }

    fn fail(&mut self, message: String) -> Result<(), ControllerError> {
        self.apply(UiEvent::ResponseFailed)?;
        self.listings.clear();
        self.chart.release();
        self.header = None;
        self.result = None;
        self.progress = None;
        self.error = Some(if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        });
        Ok(())
    }

    fn apply(&mut self, event: UiEvent) -> Result<(), ControllerError> {
        let next = transition(self.state, event)?;
        tracing::debug!(stage = "ui", action = "transition", from = ?self.state, to = ?next);
        self.state = next;
        Ok(())
    }
}

/// Failures surfaced by the controller. `Display` is the user-facing text.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The selected file is not an image.
    #[error("{}", INVALID_FILE_MESSAGE)]
    InvalidFile(#[source] CoreError),
    /// Analysis requested without a selection.
    #[error("{}", NO_IMAGE_MESSAGE)]
    NoImage,
    /// No response from the backend.
    #[error("{0}")]
    Network(String),
    /// Backend answered with a failure status.
    #[error("{message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Backend-provided or fallback message.
        message: String,
    },
    /// Backend answered 2xx with a malformed body.
    #[error("{}", DECODE_FAILURE_MESSAGE)]
    Decode(String),
    /// The action is not available in the current state.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl From<UploadError> for ControllerError {
    fn from(error: UploadError) -> Self {
        match error {
            UploadError::Backend { status, message } => Self::Backend { status, message },
            UploadError::Decode(error) => Self::Decode(error.to_string()),
            other => Self::Network(other.to_string()),
        }
    }
}
