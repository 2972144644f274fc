//! Price history chart model with scoped instance ownership.
//!
//! A [`ChartCanvas`] holds at most one live [`LineChart`]. Every chart carries
//! a lease on the canvas' live counter that is returned on drop, so the count
//! observed through [`ChartCanvas::live_charts`] is exactly the number of
//! chart instances still alive.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sneaker_lens_analysis_contract::PriceHistory;

/// Legend label of the single price series.
pub const CHART_SERIES_LABEL: &str = "Average Sale Price";
/// Upper bound on visible x-axis labels.
pub const MAX_X_TICKS: usize = 8;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const Y_TICK_COUNT: usize = 5;

/// Visible x-axis label at a point index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XTick {
    /// Index into the series.
    pub index: usize,
    /// Label text.
    pub label: String,
}

/// One rendered line chart instance.
#[derive(Debug)]
pub struct LineChart {
    /// Series legend label.
    pub series_label: &'static str,
    /// All x labels, one per point.
    pub labels: Vec<String>,
    /// Prices, one per label.
    pub points: Vec<f64>,
    /// Thinned x-axis labels.
    pub x_ticks: Vec<XTick>,
    /// Currency-prefixed y-axis labels, ascending.
    pub y_ticks: Vec<String>,
    _lease: ChartLease,
}

#[derive(Debug)]
struct ChartLease {
    live: Arc<AtomicUsize>,
}

impl ChartLease {
    fn acquire(live: &Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self {
            live: Arc::clone(live),
        }
    }
}

impl Drop for ChartLease {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Owner of the single chart instance.
#[derive(Debug, Default)]
pub struct ChartCanvas {
    live: Arc<AtomicUsize>,
    current: Option<LineChart>,
}

impl ChartCanvas {
    /// Creates an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroys the previous chart, then draws `history`.
    pub fn render(&mut self, history: &PriceHistory) -> &LineChart {
        self.release();

        let x_ticks = thin_tick_indices(history.labels.len(), MAX_X_TICKS)
            .into_iter()
            .map(|index| XTick {
                index,
                label: history.labels[index].clone(),
            })
            .collect();

        let chart = LineChart {
            series_label: CHART_SERIES_LABEL,
            labels: history.labels.clone(),
            points: history.data.clone(),
            x_ticks,
            y_ticks: y_axis_ticks(&history.data)
                .into_iter()
                .map(format_axis_price)
                .collect(),
            _lease: ChartLease::acquire(&self.live),
        };

        self.current.insert(chart)
    }

    /// Destroys the current chart. Returns `true` when one was alive.
    pub fn release(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Current chart, if any.
    pub fn current(&self) -> Option<&LineChart> {
        self.current.as_ref()
    }

    /// Number of chart instances created by this canvas that are still alive.
    pub fn live_charts(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// Evenly spaced label indices, at most `max_ticks` of them.
///
/// The first label is always kept; every `ceil(len / max_ticks)`-th label
/// after it is shown.
pub fn thin_tick_indices(len: usize, max_ticks: usize) -> Vec<usize> {
    if len == 0 || max_ticks == 0 {
        return Vec::new();
    }

    let step = len.div_ceil(max_ticks).max(1);
    (0..len).step_by(step).collect()
}

/// Ascending y-axis tick values spanning the series.
pub fn y_axis_ticks(data: &[f64]) -> Vec<f64> {
    let Some((min, max)) = bounds(data) else {
        return Vec::new();
    };

    if (max - min).abs() < f64::EPSILON {
        return vec![min];
    }

    let span = max - min;
    (0..Y_TICK_COUNT)
        .map(|step| min + span * step as f64 / (Y_TICK_COUNT - 1) as f64)
        .collect()
}

/// Formats an axis value with a `$` prefix and no trailing zeros.
pub fn format_axis_price(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let mut text = format!("{rounded:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    if text == "-0" {
        text = "0".to_string();
    }
    format!("${text}")
}

/// Renders the series as a one-line block sparkline at most `width` wide.
pub fn sparkline(data: &[f64], width: usize) -> String {
    let Some((min, max)) = bounds(data) else {
        return String::new();
    };
    if width == 0 {
        return String::new();
    }

    let buckets = data.len().min(width);
    let span = max - min;
    (0..buckets)
        .map(|bucket| {
            let start = bucket * data.len() / buckets;
            let end = ((bucket + 1) * data.len() / buckets).max(start + 1);
            let slice = &data[start..end];
            let mean = slice.iter().sum::<f64>() / slice.len() as f64;
            let level = if span <= f64::EPSILON {
                SPARK_LEVELS.len() / 2
            } else {
                (((mean - min) / span) * (SPARK_LEVELS.len() - 1) as f64).round() as usize
            };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

fn bounds(data: &[f64]) -> Option<(f64, f64)> {
    data.iter().copied().fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}
