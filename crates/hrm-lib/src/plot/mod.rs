use crate::config::DetectorConfig;
use crate::pipeline::Analysis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Axis {
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub width: f32,
    pub dash: Option<[f32; 2]>,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub style: Style,
}

/// Unconnected markers, e.g. detected beats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub radius: u32,
    pub color: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Series {
    Line(LineSeries),
    Points(PointSeries),
}

impl Series {
    pub fn points(&self) -> &[[f64; 2]] {
        match self {
            Series::Line(line) => &line.points,
            Series::Points(points) => &points.points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub title: Option<String>,
    pub x: Axis,
    pub y: Axis,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn new(title: impl Into<Option<String>>) -> Self {
        Self {
            title: title.into(),
            x: Axis { label: None },
            y: Axis { label: None },
            series: Vec::new(),
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// `(x_min, x_max, y_min, y_max)` over every series, `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.series.iter().flat_map(|s| s.points().iter());
        let first = points.next()?;
        Some(points.fold(
            (first[0], first[0], first[1], first[1]),
            |(x0, x1, y0, y1), p| (x0.min(p[0]), x1.max(p[0]), y0.min(p[1]), y1.max(p[1])),
        ))
    }
}

pub fn decimate_points(points: &[[f64; 2]], max_points: usize) -> Vec<[f64; 2]> {
    if points.len() <= max_points {
        return points.to_vec();
    }
    let bucket_size = points.len() as f64 / max_points as f64;
    let mut result = Vec::with_capacity(max_points);
    for i in 0..max_points {
        let start = (i as f64 * bucket_size).floor() as usize;
        if start >= points.len() {
            break;
        }
        result.push(points[start]);
    }
    result
}

/// Voltage trace with a marker at every detected beat.
pub fn figure_from_analysis(analysis: &Analysis, max_points: usize) -> Figure {
    let rec = &analysis.recording;
    let trace: Vec<[f64; 2]> = rec
        .time
        .iter()
        .zip(&rec.voltage)
        .map(|(&t, &v)| [t, v])
        .collect();
    let markers = analysis
        .beats
        .indices
        .iter()
        .map(|&i| [rec.time[i], rec.voltage[i]])
        .collect();
    let mut fig = Figure::new(Some(format!("ECG {}", analysis.source.display())));
    fig.x.label = Some("time (s)".into());
    fig.y.label = Some("voltage (mV)".into());
    fig.add_series(Series::Line(LineSeries {
        name: "voltage".into(),
        points: decimate_points(&trace, max_points),
        style: Style {
            width: 1.4,
            dash: None,
            color: Color(0x1F77B4),
        },
    }));
    fig.add_series(Series::Points(PointSeries {
        name: "beats".into(),
        points: markers,
        radius: 3,
        color: Color(0xFF0077),
    }));
    fig
}

/// Correlation series against the detection threshold.
pub fn figure_from_correlation(
    analysis: &Analysis,
    cfg: &DetectorConfig,
    max_points: usize,
) -> Figure {
    let time = &analysis.recording.time;
    let points: Vec<[f64; 2]> = time
        .iter()
        .zip(&analysis.correlation)
        .map(|(&t, &c)| [t, c])
        .collect();
    let mut fig = Figure::new(Some("Template correlation".to_string()));
    fig.x.label = Some("time (s)".into());
    fig.add_series(Series::Line(LineSeries {
        name: "correlation".into(),
        points: decimate_points(&points, max_points),
        style: Style {
            width: 1.0,
            dash: None,
            color: Color(0x2CA02C),
        },
    }));
    if let (Some(&start), Some(&end)) = (time.first(), time.last()) {
        for level in [cfg.threshold, -cfg.threshold] {
            fig.add_series(Series::Line(LineSeries {
                name: format!("threshold {:+}", level),
                points: vec![[start, level], [end, level]],
                style: Style {
                    width: 1.0,
                    dash: Some([4.0, 4.0]),
                    color: Color(0x7F7F7F),
                },
            }));
        }
    }
    fig
}
