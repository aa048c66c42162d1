pub mod config;
pub mod detectors;
pub mod error;
pub mod io;
pub mod metrics;
pub mod pipeline;
pub mod plot;
pub mod preprocess;
pub mod signal;
pub mod window;

pub use config::*;
pub use error::{HrmError, Result};
pub use metrics::MetricsRecord;
pub use pipeline::{analyze, run, Analysis, AnalysisRequest};
pub use signal::*;
pub use window::TimeWindow;
