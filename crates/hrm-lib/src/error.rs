use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the analysis pipeline.
///
/// Malformed rows and out-of-range voltages are not errors: the loader skips
/// the former and the normalizer rescales the latter.
#[derive(Debug, Error)]
pub enum HrmError {
    #[error("source {} does not exist", path.display())]
    SourceNotFound { path: PathBuf },
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("time goes backwards at sample {index}")]
    UnorderedTime { index: usize },
    #[error("signal holds no samples")]
    EmptySignal,
    #[error("window holds {len} sample(s), at least 2 are needed")]
    DegenerateWindow { len: usize },
    #[error("window duration is not positive ({start} s to {end} s)")]
    ZeroDuration { start: f64, end: f64 },
    #[error("reference recording holds {found} sample(s), template needs {needed}")]
    ShortReference { needed: usize, found: usize },
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to write metrics to {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("metrics serialization failed")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = HrmError> = std::result::Result<T, E>;
