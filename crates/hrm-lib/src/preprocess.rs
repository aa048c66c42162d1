use log::warn;

/// Rescale a strip whose voltage leaves `[-bound, bound]`.
///
/// Every sample is divided by `max(voltage) / bound`, which pins the maximum
/// at `bound` but can leave a deeper minimum outside the range. In-range
/// input is returned untouched.
pub fn normalize(voltage: Vec<f64>, bound: f64) -> Vec<f64> {
    if !voltage.iter().any(|v| v.abs() > bound) {
        return voltage;
    }
    let max = voltage.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // A non-positive maximum would flip or blow up the strip.
    let reference = if max > 0.0 {
        max
    } else {
        voltage.iter().map(|v| v.abs()).fold(0.0, f64::max)
    };
    let scale = reference / bound;
    warn!(
        "voltage outside normal range; scaling applied (max {:.3} mV, factor 1/{:.3})",
        max, scale
    );
    voltage.into_iter().map(|v| v / scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn in_range_passes_through() {
        let mut rng = StdRng::seed_from_u64(17);
        let v: Vec<f64> = (0..500).map(|_| rng.gen_range(-2.0..=2.0)).collect();
        assert_eq!(normalize(v.clone(), 2.0), v);
    }

    #[test]
    fn boundary_values_are_in_range() {
        let v = vec![-2.0, 0.0, 2.0];
        assert_eq!(normalize(v.clone(), 2.0), v);
    }

    #[test]
    fn max_of_four_is_scaled_to_two() {
        let out = normalize(vec![-1.0, 0.5, 4.0, 3.0], 2.0);
        assert_eq!(out, vec![-0.5, 0.25, 2.0, 1.5]);
    }

    #[test]
    fn deep_minimum_can_stay_out_of_range() {
        let out = normalize(vec![-6.0, 0.0, 3.0], 2.0);
        assert_eq!(out, vec![-4.0, 0.0, 2.0]);
    }

    #[test]
    fn all_negative_strip_keeps_its_sign() {
        let out = normalize(vec![-4.0, -1.0, -0.5], 2.0);
        assert_eq!(out, vec![-2.0, -0.5, -0.25]);
    }

    #[test]
    fn empty_is_identity() {
        assert!(normalize(Vec::new(), 2.0).is_empty());
    }
}
