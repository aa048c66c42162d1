use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use hrm_lib::{
    io::{
        csv::{load_with_retry, SourcePrompt},
        metrics::{metrics_path_for, write_metrics},
    },
    pipeline::{analyze, analyze_recording, Analysis, AnalysisRequest},
    plot::{figure_from_analysis, figure_from_correlation, Figure, Series},
    DetectorConfig, HrmError, TimeWindow,
};
use log::info;
use plotters::{coord::Shift, prelude::*};
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(
    name = "hrm",
    version,
    about = "Heart rate metrics from a two-column time/voltage ECG strip"
)]
struct Cli {
    /// ECG strip as `time,voltage` CSV (seconds, millivolts)
    input: Option<PathBuf>,
    /// Start of the heart-rate window (seconds, inclusive)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    min_time: f64,
    /// End of the heart-rate window (seconds, inclusive)
    #[arg(long, default_value_t = 60.0, allow_hyphen_values = true)]
    max_time: f64,
    /// Known-good recording whose leading samples form the beat template
    #[arg(long, default_value = "test_data/reference.csv")]
    reference: PathBuf,
    /// TOML file overriding detector parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Metrics JSON path (defaults to the input path with a .json extension)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Render voltage and correlation to a PNG
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Ask for another file on stdin when the input cannot be loaded
    #[arg(long)]
    interactive: bool,
    #[arg(long, default_value_t = 3)]
    max_attempts: usize,
    /// Also print the metrics record to stdout
    #[arg(long)]
    stdout: bool,
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    let config = match &cli.config {
        Some(path) => DetectorConfig::load(path)
            .with_context(|| format!("loading detector config {}", path.display()))?,
        None => DetectorConfig::default(),
    };
    let request = AnalysisRequest {
        source: cli.input.clone(),
        reference: cli.reference.clone(),
        window: TimeWindow::new(cli.min_time, cli.max_time),
        config,
    };

    let analysis = if cli.interactive {
        analyze_interactive(&request, cli.max_attempts)?
    } else {
        analyze(&request)?
    };

    let out = cli
        .out
        .clone()
        .unwrap_or_else(|| metrics_path_for(&analysis.source));
    write_metrics(&out, &analysis.metrics)?;
    info!("wrote metrics to {}", out.display());

    if cli.stdout {
        println!("{}", serde_json::to_string(&analysis.metrics)?);
    }
    if let Some(path) = &cli.plot {
        render_plot(path, &analysis, &config)
            .with_context(|| format!("rendering {}", path.display()))?;
        info!("wrote plot to {}", path.display());
    }
    Ok(())
}

fn analyze_interactive(request: &AnalysisRequest, max_attempts: usize) -> Result<Analysis> {
    let initial = request.checked_source()?;
    let (source, recording) = load_with_retry(initial, &mut StdinPrompt, max_attempts)?;
    Ok(analyze_recording(&source, recording, request)?)
}

/// Re-prompts on the terminal; an empty line or EOF gives up.
struct StdinPrompt;

impl SourcePrompt for StdinPrompt {
    fn next_source(&mut self, failed: &Path, err: &HrmError) -> Option<PathBuf> {
        eprintln!("{}: {}", failed.display(), err);
        eprint!("Input a valid .csv file: ");
        io::stderr().flush().ok()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let answer = line.trim();
                (!answer.is_empty()).then(|| PathBuf::from(answer))
            }
        }
    }
}

fn render_plot(path: &Path, analysis: &Analysis, cfg: &DetectorConfig) -> Result<()> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 1));
    draw_figure(&panels[0], &figure_from_analysis(analysis, 4096))?;
    draw_figure(&panels[1], &figure_from_correlation(analysis, cfg, 4096))?;
    root.present()?;
    Ok(())
}

fn draw_figure(area: &DrawingArea<BitMapBackend<'_>, Shift>, fig: &Figure) -> Result<()> {
    let (x_min, x_max, y_min, y_max) = fig.bounds().unwrap_or((0.0, 1.0, 0.0, 1.0));
    let (x_min, x_max) = padded(x_min, x_max, 0.0);
    let (y_min, y_max) = padded(y_min, y_max, 0.05);
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption(
            fig.title.clone().unwrap_or_else(|| "Plot".into()),
            ("sans-serif", 20),
        )
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    let mut mesh = chart.configure_mesh();
    if let Some(label) = &fig.x.label {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &fig.y.label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw()?;
    for series in &fig.series {
        match series {
            Series::Line(line) => {
                let (r, g, b) = line.style.color.rgb();
                let width = line.style.width.round().max(1.0) as u32;
                let style = RGBColor(r, g, b).stroke_width(width);
                chart.draw_series(LineSeries::new(
                    line.points.iter().map(|p| (p[0], p[1])),
                    style,
                ))?;
            }
            Series::Points(points) => {
                let (r, g, b) = points.color.rgb();
                chart.draw_series(points.points.iter().map(|p| {
                    Circle::new((p[0], p[1]), points.radius, RGBColor(r, g, b).filled())
                }))?;
            }
        }
    }
    Ok(())
}

/// Widen a range by `margin` of its span; flat ranges get a unit span.
fn padded(lo: f64, hi: f64, margin: f64) -> (f64, f64) {
    let span = hi - lo;
    if span <= 0.0 {
        return (lo - 0.5, hi + 0.5);
    }
    (lo - span * margin, hi + span * margin)
}
