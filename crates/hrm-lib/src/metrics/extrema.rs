use crate::error::{HrmError, Result};
use crate::signal::VoltageExtremes;

/// Minimum and maximum of a non-empty voltage series.
pub fn extrema(voltage: &[f64]) -> Result<VoltageExtremes> {
    let (&first, rest) = voltage.split_first().ok_or(HrmError::EmptySignal)?;
    let (min, max) = rest
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    Ok(VoltageExtremes { min, max })
}

/// Strip duration measured from the *second* sample to the last one.
///
/// The first sample is excluded from the lower bound, so a two-sample strip
/// has a duration of zero.
pub fn duration(time: &[f64]) -> Result<f64> {
    match time {
        [_, second, .., last] => Ok(last - second),
        [_, _] => Ok(0.0),
        _ => Err(HrmError::DegenerateWindow { len: time.len() }),
    }
}

/// [`duration`] that also rejects a span that is zero or negative.
pub fn positive_duration(time: &[f64]) -> Result<f64> {
    let span = duration(time)?;
    if span.is_nan() || span <= 0.0 {
        return Err(HrmError::ZeroDuration {
            start: time[1],
            end: time[time.len() - 1],
        });
    }
    Ok(span)
}
