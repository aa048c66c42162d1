use serde::{Deserialize, Serialize};

/// Two-column ECG strip: time in seconds, voltage in millivolts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub time: Vec<f64>,
    pub voltage: Vec<f64>,
}

impl Recording {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (time, voltage) = pairs.into_iter().unzip();
        Self { time, voltage }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// True when no sample goes back in time.
    pub fn is_time_monotonic(&self) -> bool {
        self.first_time_reversal().is_none()
    }

    /// Index of the first sample whose time is earlier than its predecessor's.
    pub fn first_time_reversal(&self) -> Option<usize> {
        self.time
            .windows(2)
            .position(|w| w[1] < w[0])
            .map(|i| i + 1)
    }

    /// Replace the voltage column, keeping the time axis.
    pub fn with_voltage(self, voltage: Vec<f64>) -> Self {
        debug_assert_eq!(voltage.len(), self.time.len());
        Self {
            time: self.time,
            voltage,
        }
    }
}

/// Minimum and maximum voltage of a strip, serialized as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct VoltageExtremes {
    pub min: f64,
    pub max: f64,
}

impl From<[f64; 2]> for VoltageExtremes {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<VoltageExtremes> for [f64; 2] {
    fn from(ext: VoltageExtremes) -> Self {
        [ext.min, ext.max]
    }
}

/// Detected heartbeats: sample indices into the analysed series and their times.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Beats {
    pub indices: Vec<usize>,
    pub times: Vec<f64>,
}

impl Beats {
    pub fn count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
