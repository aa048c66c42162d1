use crate::error::{HrmError, Result};
use crate::metrics::record::MetricsRecord;
use std::path::{Path, PathBuf};

/// Output path for a source: same location and stem, `.json` extension.
pub fn metrics_path_for(source: &Path) -> PathBuf {
    source.with_extension("json")
}

pub fn write_metrics(path: &Path, record: &MetricsRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json).map_err(|source| HrmError::Persist {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_metrics(path: &Path) -> Result<MetricsRecord> {
    if !path.is_file() {
        return Err(HrmError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| HrmError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::record::assemble;
    use crate::signal::VoltageExtremes;

    #[test]
    fn output_name_follows_source() {
        assert_eq!(
            metrics_path_for(Path::new("data/test_data1.csv")),
            PathBuf::from("data/test_data1.json")
        );
        assert_eq!(
            metrics_path_for(Path::new("strip")),
            PathBuf::from("strip.json")
        );
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        let record = assemble(
            73.455_278_697_969_18,
            VoltageExtremes {
                min: -0.68,
                max: 1.05,
            },
            27.772,
            3,
            vec![0.383, 1.172, 0.1 + 0.2],
        );
        write_metrics(&path, &record).unwrap();
        let back = read_metrics(&path).unwrap();
        assert_eq!(back, record);
        let rate = record.mean_heart_rate;
        assert_eq!(back.mean_heart_rate.to_bits(), rate.to_bits());
        assert_eq!(back.beat_times[2].to_bits(), (0.1f64 + 0.2).to_bits());
    }

    #[test]
    fn reading_missing_metrics_fails() {
        let err = read_metrics(Path::new("nope.json")).unwrap_err();
        assert!(matches!(err, HrmError::SourceNotFound { .. }));
    }
}
