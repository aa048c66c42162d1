use crate::error::Result;
use crate::metrics::extrema::positive_duration;

/// Mean heart rate in beats per minute over the span of `window_time`.
///
/// The span uses the same rule as
/// [`duration`](crate::metrics::extrema::duration), so the first sample of
/// the window does not count towards it.
pub fn mean_bpm(window_time: &[f64], beat_count: usize) -> Result<f64> {
    let span = positive_duration(window_time)?;
    Ok(60.0 * beat_count as f64 / span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HrmError;

    #[test]
    fn six_beats_over_five_seconds() {
        let time: Vec<f64> = (0..=500).map(|i| i as f64 * 0.01).collect();
        let span = time[500] - time[1];
        let bpm = mean_bpm(&time, 6).unwrap();
        assert_eq!(bpm, 60.0 * 6.0 / span);
        assert!((bpm - 72.144).abs() < 1e-3);
    }

    #[test]
    fn no_beats_is_zero_bpm() {
        assert_eq!(mean_bpm(&[0.0, 1.0, 2.0], 0).unwrap(), 0.0);
    }

    #[test]
    fn single_sample_window_fails() {
        assert!(matches!(
            mean_bpm(&[3.0], 1),
            Err(HrmError::DegenerateWindow { len: 1 })
        ));
    }

    #[test]
    fn zero_span_fails_instead_of_dividing() {
        assert!(matches!(
            mean_bpm(&[0.0, 1.0], 1),
            Err(HrmError::ZeroDuration { .. })
        ));
        assert!(matches!(
            mean_bpm(&[0.0, 2.0, 2.0], 1),
            Err(HrmError::ZeroDuration { .. })
        ));
    }
}
