use crate::config::{DetectorConfig, ThresholdPolarity};
use crate::signal::Beats;

/// Same-length cross-correlation of `voltage` against `template`.
///
/// `out[i] = sum_j template[j] * voltage[i + j - m / 2]` with `m` the template
/// length and samples outside the strip taken as zero, so the template is
/// centred on `i` and `out.len() == voltage.len()`.
pub fn correlate(voltage: &[f64], template: &[f64]) -> Vec<f64> {
    let n = voltage.len();
    let lag = template.len() / 2;
    (0..n)
        .map(|i| {
            let mut acc = 0.0;
            for (j, &k) in template.iter().enumerate() {
                let Some(idx) = (i + j).checked_sub(lag) else {
                    continue;
                };
                if idx >= n {
                    break;
                }
                acc += k * voltage[idx];
            }
            acc
        })
        .collect()
}

/// Greedy threshold detector with a refractory skip.
///
/// Scans left to right; the first sample whose correlation exceeds the
/// threshold is recorded as a beat and the scan jumps ahead by
/// `refractory_samples`. No search for the lobe's true maximum is made.
pub fn detect_beats(time: &[f64], correlation: &[f64], cfg: &DetectorConfig) -> Beats {
    let n = time.len().min(correlation.len());
    let step = cfg.refractory_samples.max(1);
    let mut beats = Beats::default();
    let mut i = 0;
    while i < n {
        if crosses(correlation[i], cfg) {
            beats.indices.push(i);
            beats.times.push(time[i]);
            i += step;
        } else {
            i += 1;
        }
    }
    beats
}

fn crosses(value: f64, cfg: &DetectorConfig) -> bool {
    match cfg.polarity {
        ThresholdPolarity::Absolute => value.abs() > cfg.threshold,
        ThresholdPolarity::Positive => value > cfg.threshold,
    }
}
