//! Whole-screen projection and its terminal rendering.

use std::fmt::Write as _;

use sneaker_lens_core::ImagePreview;

use crate::{LineChart, ListingsPanel, ResultHeader, UiState, ViewRegions, sparkline};

const SPARKLINE_WIDTH: usize = 48;
const IDLE_PROMPT: &str = "Drop a sneaker photo here or choose a file.";

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewSnapshot<'a> {
    /// Current flow state; region visibility is derived from it.
    pub state: UiState,
    /// Preview of the selection, if any.
    pub preview: Option<&'a ImagePreview>,
    /// Progress text of the results area.
    pub progress: Option<&'a str>,
    /// Error banner text.
    pub error: Option<&'a str>,
    /// Identity header.
    pub header: Option<&'a ResultHeader>,
    /// Rendered listings.
    pub listings: &'a ListingsPanel,
    /// Rendered chart.
    pub chart: Option<&'a LineChart>,
}

impl ViewSnapshot<'_> {
    /// Region visibility for [`Self::state`].
    pub fn regions(&self) -> ViewRegions {
        ViewRegions::for_state(self.state)
    }
}

/// Renders the visible regions of a snapshot as plain text.
pub fn render_text(view: &ViewSnapshot<'_>) -> String {
    let mut out = String::new();
    let regions = view.regions();

    if regions.upload_section {
        if regions.upload_prompt {
            let _ = writeln!(out, "{IDLE_PROMPT}");
        }
        if let (true, Some(preview)) = (regions.image_preview, view.preview) {
            let _ = write!(out, "Selected {} ({}", preview.file_name, preview.media_type);
            if let Some((width, height)) = preview.dimensions {
                let _ = write!(out, ", {width}x{height}");
            }
            let _ = writeln!(out, ", {} bytes)", preview.byte_len);
        }
        if regions.analyze_enabled {
            let _ = writeln!(out, "Ready to identify.");
        }
    }

    if !regions.results_section {
        return out;
    }

    if let Some(progress) = view.progress {
        let _ = writeln!(out, "{progress}");
    }

    if regions.error_message {
        let _ = writeln!(out, "Error: {}", view.error.unwrap_or_default());
    }

    if regions.result_content {
        if let Some(header) = view.header {
            let _ = writeln!(out, "{}", header.name);
            let _ = writeln!(out, "{}", header.style_line);
            if let Some(brand) = &header.brand {
                let _ = writeln!(out, "Brand: {brand}");
            }
        }

        let _ = writeln!(out, "\nListings");
        if let Some(notice) = view.listings.empty_notice() {
            let _ = writeln!(out, "  {notice}");
        }
        for row in view.listings.rows() {
            let _ = writeln!(out, "  {:<14} {:<24} {:>10}", row.name, row.detail, row.price);
        }

        if let Some(chart) = view.chart {
            let _ = writeln!(out, "\n{}", chart.series_label);
            let _ = writeln!(out, "  {}", sparkline(&chart.points, SPARKLINE_WIDTH));
            if let (Some(low), Some(high)) = (chart.y_ticks.first(), chart.y_ticks.last()) {
                let _ = writeln!(out, "  range {low} .. {high}");
            }
            let ticks: Vec<&str> = chart.x_ticks.iter().map(|tick| tick.label.as_str()).collect();
            if !ticks.is_empty() {
                let _ = writeln!(out, "  {}", ticks.join(" | "));
            }
        }
    }

    out
}
