use crate::error::{HrmError, Result};
use crate::signal::Recording;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Row accounting for one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub kept: usize,
    pub skipped: usize,
}

/// Load a two-column `time,voltage` CSV, dropping rows that are not a numeric pair.
pub fn load_recording(path: &Path) -> Result<Recording> {
    load_recording_with_report(path).map(|(rec, _)| rec)
}

pub fn load_recording_with_report(path: &Path) -> Result<(Recording, LoadReport)> {
    if !path.is_file() {
        return Err(HrmError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let reader = csv_reader()
        .from_path(path)
        .map_err(|source| read_error(path, source))?;
    read_pairs(reader, path)
}

/// Parse CSV text already held in memory; `origin` only labels errors and logs.
pub fn parse_recording(text: &str, origin: &Path) -> Result<(Recording, LoadReport)> {
    read_pairs(csv_reader().from_reader(text.as_bytes()), origin)
}

fn csv_reader() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(false).flexible(true).trim(Trim::All);
    builder
}

fn read_pairs<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    origin: &Path,
) -> Result<(Recording, LoadReport)> {
    let mut pairs = Vec::new();
    let mut report = LoadReport::default();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|source| read_error(origin, source))?;
        match numeric_pair(&record) {
            Some(pair) => {
                pairs.push(pair);
                report.kept += 1;
            }
            None => {
                let line = row + 1;
                debug!("{}: skipping row {}: {:?}", origin.display(), line, record);
                report.skipped += 1;
            }
        }
    }
    let recording = Recording::from_pairs(pairs);
    if !recording.is_time_monotonic() {
        warn!("{}: time column is not non-decreasing", origin.display());
    }
    info!(
        "loaded {} sample(s) from {} ({} row(s) skipped)",
        report.kept,
        origin.display(),
        report.skipped
    );
    Ok((recording, report))
}

fn numeric_pair(record: &StringRecord) -> Option<(f64, f64)> {
    let time = parse_finite(record.get(0)?)?;
    let voltage = parse_finite(record.get(1)?)?;
    Some((time, voltage))
}

fn parse_finite(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn read_error(path: &Path, source: csv::Error) -> HrmError {
    HrmError::Read {
        path: path.to_path_buf(),
        source,
    }
}

/// Supplies a replacement source after a failed load.
pub trait SourcePrompt {
    /// Return the next source to try, or `None` to give up.
    fn next_source(&mut self, failed: &Path, err: &HrmError) -> Option<PathBuf>;
}

impl<F> SourcePrompt for F
where
    F: FnMut(&Path, &HrmError) -> Option<PathBuf>,
{
    fn next_source(&mut self, failed: &Path, err: &HrmError) -> Option<PathBuf> {
        self(failed, err)
    }
}

/// Try `initial`, then whatever `prompt` offers, for at most `max_attempts` loads.
///
/// Returns the source that finally loaded together with its recording.
pub fn load_with_retry<P>(
    initial: &Path,
    prompt: &mut P,
    max_attempts: usize,
) -> Result<(PathBuf, Recording)>
where
    P: SourcePrompt + ?Sized,
{
    let mut source = initial.to_path_buf();
    let mut attempt = 1;
    loop {
        let err = match load_recording(&source) {
            Ok(rec) => return Ok((source, rec)),
            Err(err) => err,
        };
        if attempt >= max_attempts.max(1) {
            return Err(err);
        }
        warn!("attempt {} failed: {}", attempt, err);
        match prompt.next_source(&source, &err) {
            Some(next) => source = next,
            None => return Err(err),
        }
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_path(relative: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .and_then(|p| p.parent())
            .expect("workspace root")
            .join(relative)
    }

    #[test]
    fn keeps_only_numeric_pairs() {
        let text = "time,voltage\n1.0,2.0\n3.0,string\n,4.0\n5.0,6.0,extra\n\
                    7.0\nnan,1.0\n8.0,inf\n";
        let (rec, report) = parse_recording(text, Path::new("inline")).unwrap();
        assert_eq!(rec.time, vec![1.0, 5.0]);
        assert_eq!(rec.voltage, vec![2.0, 6.0]);
        assert_eq!(report.kept, 2);
        assert_eq!(report.skipped, 6);
    }

    #[test]
    fn trims_whitespace_around_fields() {
        let (rec, _) = parse_recording(" 0.5 , -0.25 \n", Path::new("inline")).unwrap();
        assert_eq!(rec.time, vec![0.5]);
        assert_eq!(rec.voltage, vec![-0.25]);
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let err = load_recording(Path::new("test_data.csv")).unwrap_err();
        assert!(matches!(err, HrmError::SourceNotFound { .. }));
    }

    #[test]
    fn loads_strip_fixture() {
        let path = sample_path("test_data/strip.csv");
        let (rec, report) = load_recording_with_report(&path).unwrap();
        assert_eq!(rec.len(), 10_000);
        assert_eq!(report.kept, 10_000);
        assert!(report.skipped >= 4);
        assert_eq!((rec.time[0], rec.voltage[0]), (0.0, -0.005));
        assert_eq!(*rec.time.last().unwrap(), 27.775);
        assert!(rec.is_time_monotonic());
    }

    #[test]
    fn retry_uses_prompted_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.0,0.1\n0.1,0.2").unwrap();
        let good = file.path().to_path_buf();
        let mut asked = Vec::new();
        let mut prompt = |failed: &Path, _: &HrmError| {
            asked.push(failed.to_path_buf());
            Some(good.clone())
        };
        let (source, rec) = load_with_retry(Path::new("missing.csv"), &mut prompt, 3).unwrap();
        assert_eq!(source, file.path());
        assert_eq!(rec.len(), 2);
        assert_eq!(asked, vec![PathBuf::from("missing.csv")]);
    }

    #[test]
    fn retry_is_bounded() {
        let mut calls = 0;
        let mut prompt = |_: &Path, _: &HrmError| {
            calls += 1;
            Some(PathBuf::from("still-missing.csv"))
        };
        let err = load_with_retry(Path::new("missing.csv"), &mut prompt, 3).unwrap_err();
        assert!(matches!(err, HrmError::SourceNotFound { .. }));
        assert_eq!(calls, 2);
    }

    #[test]
    fn retry_stops_when_prompt_gives_up() {
        let mut prompt = |_: &Path, _: &HrmError| None;
        let err = load_with_retry(Path::new("missing.csv"), &mut prompt, 5).unwrap_err();
        assert!(matches!(err, HrmError::SourceNotFound { .. }));
    }
}
