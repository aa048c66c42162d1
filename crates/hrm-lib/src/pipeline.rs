use crate::{
    config::DetectorConfig,
    detectors::{
        correlation::{correlate, detect_beats},
        template::extract_template,
    },
    error::{HrmError, Result},
    io::csv::load_recording,
    metrics::{assemble, extrema, mean_bpm, positive_duration, MetricsRecord},
    preprocess::normalize,
    signal::{Beats, Recording},
    window::{beats_in_window, truncate, TimeWindow},
};
use log::info;
use std::path::{Path, PathBuf};

/// Inputs of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub source: Option<PathBuf>,
    /// Known-good recording whose leading samples form the template.
    pub reference: PathBuf,
    pub window: TimeWindow,
    pub config: DetectorConfig,
}

impl AnalysisRequest {
    pub fn new(source: impl Into<PathBuf>, reference: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(source.into()),
            reference: reference.into(),
            window: TimeWindow::default(),
            config: DetectorConfig::default(),
        }
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    /// The source to load, once the request is known to be runnable.
    pub fn checked_source(&self) -> Result<&Path> {
        let source = self
            .source
            .as_deref()
            .ok_or(HrmError::MissingArgument("source"))?;
        self.config.validate()?;
        Ok(source)
    }
}

/// Everything computed for one strip, kept around for plotting.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub source: PathBuf,
    /// Strip after range normalization.
    pub recording: Recording,
    pub correlation: Vec<f64>,
    pub beats: Beats,
    pub window: TimeWindow,
    pub window_beat_count: usize,
    pub metrics: MetricsRecord,
}

/// Load the requested source and analyse it.
pub fn analyze(request: &AnalysisRequest) -> Result<Analysis> {
    let source = request.checked_source()?;
    let recording = load_recording(source)?;
    analyze_recording(source, recording, request)
}

/// Entry point for callers that only need the metrics record.
pub fn run(request: &AnalysisRequest) -> Result<MetricsRecord> {
    analyze(request).map(|analysis| analysis.metrics)
}

/// Analyse a strip that was already loaded from `source`.
pub fn analyze_recording(
    source: &Path,
    mut recording: Recording,
    request: &AnalysisRequest,
) -> Result<Analysis> {
    let cfg = &request.config;
    if recording.len() < 2 {
        return Err(HrmError::DegenerateWindow {
            len: recording.len(),
        });
    }
    if let Some(index) = recording.first_time_reversal() {
        return Err(HrmError::UnorderedTime { index });
    }
    let raw = std::mem::take(&mut recording.voltage);
    let recording = recording.with_voltage(normalize(raw, cfg.voltage_bound));

    let voltage_extremes = extrema(&recording.voltage)?;
    let strip_duration = positive_duration(&recording.time)?;

    let reference = load_recording(&request.reference)?;
    let template = extract_template(&reference, cfg.template_len)?;

    let correlation = correlate(&recording.voltage, &template.voltage);
    let beats = detect_beats(&recording.time, &correlation, cfg);

    let window = request.window;
    let (window_time, window_correlation) =
        truncate(window.min, window.max, &recording.time, &correlation);
    let window_beat_count = beats_in_window(&window_time, &window_correlation, cfg);
    let mean_heart_rate = mean_bpm(&window_time, window_beat_count)?;

    info!(
        "{}: {} beat(s) over {:.3} s, {} in [{}, {}] s, mean {:.1} bpm",
        source.display(),
        beats.count(),
        strip_duration,
        window_beat_count,
        window.min,
        window.max,
        mean_heart_rate
    );

    let metrics = assemble(
        mean_heart_rate,
        voltage_extremes,
        strip_duration,
        beats.count(),
        beats.times.clone(),
    );
    Ok(Analysis {
        source: source.to_path_buf(),
        recording,
        correlation,
        beats,
        window,
        window_beat_count,
        metrics,
    })
}
