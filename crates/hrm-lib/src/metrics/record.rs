use crate::signal::VoltageExtremes;
use serde::{Deserialize, Serialize};

/// Summary of one analysed strip, handed to persistence as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Mean heart rate over the requested window (bpm).
    pub mean_heart_rate: f64,
    pub voltage_extremes: VoltageExtremes,
    /// Strip duration in seconds.
    pub duration: f64,
    pub beat_count: usize,
    pub beat_times: Vec<f64>,
}

pub fn assemble(
    mean_heart_rate: f64,
    voltage_extremes: VoltageExtremes,
    duration: f64,
    beat_count: usize,
    beat_times: Vec<f64>,
) -> MetricsRecord {
    MetricsRecord {
        mean_heart_rate,
        voltage_extremes,
        duration,
        beat_count,
        beat_times,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_plain_lists() {
        let record = assemble(
            72.0,
            VoltageExtremes {
                min: -0.5,
                max: 1.0,
            },
            10.0,
            2,
            vec![0.25, 1.125],
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["voltage_extremes"], serde_json::json!([-0.5, 1.0]));
        assert_eq!(value["beat_times"], serde_json::json!([0.25, 1.125]));
        assert_eq!(value["beat_count"], 2);
    }
}
