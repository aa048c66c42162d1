use crate::config::DetectorConfig;
use crate::detectors::correlation::detect_beats;
use serde::{Deserialize, Serialize};

/// Inclusive time interval `[min, max]` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub min: f64,
    pub max: f64,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 60.0,
        }
    }
}

impl TimeWindow {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, t: f64) -> bool {
        self.min <= t && t <= self.max
    }
}

/// Keep the samples whose time lies in `[min_time, max_time]`, filtering
/// both series in lockstep.
pub fn truncate(
    min_time: f64,
    max_time: f64,
    time: &[f64],
    correlation: &[f64],
) -> (Vec<f64>, Vec<f64>) {
    let window = TimeWindow::new(min_time, max_time);
    time.iter()
        .zip(correlation)
        .filter(|(t, _)| window.contains(**t))
        .map(|(&t, &c)| (t, c))
        .unzip()
}

/// Beat count inside a truncated window.
///
/// Detection is re-run on the windowed series, so the refractory skip
/// restarts at the window edge.
pub fn beats_in_window(
    window_time: &[f64],
    window_correlation: &[f64],
    cfg: &DetectorConfig,
) -> usize {
    detect_beats(window_time, window_correlation, cfg).count()
}
