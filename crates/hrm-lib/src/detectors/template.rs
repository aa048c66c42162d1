use crate::error::{HrmError, Result};
use crate::signal::Recording;

/// Canonical single-beat waveform used as the correlation kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub time: Vec<f64>,
    pub voltage: Vec<f64>,
}

impl Template {
    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }
}

/// Take the first `len` samples of a known-good reference recording.
pub fn extract_template(reference: &Recording, len: usize) -> Result<Template> {
    if reference.len() < len {
        return Err(HrmError::ShortReference {
            needed: len,
            found: reference.len(),
        });
    }
    Ok(Template {
        time: reference.time[..len].to_vec(),
        voltage: reference.voltage[..len].to_vec(),
    })
}
