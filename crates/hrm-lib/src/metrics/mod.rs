pub mod extrema;
pub mod rate;
pub mod record;

pub use extrema::{duration, extrema, positive_duration};
pub use rate::mean_bpm;
pub use record::{assemble, MetricsRecord};
