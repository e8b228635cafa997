//! Command-line interface for painting a target image with brush strokes

use crate::algorithm::executor::StageScheduler;
use crate::io::configuration::{
    DEFAULT_BRUSH_COUNT, DEFAULT_GENERATIONS, DEFAULT_SEED, DEFAULT_STAGES, DEFAULT_STROKES,
    GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX, RunConfig,
};
use crate::io::error::Result;
use crate::io::image::{export_png, load_brushes, load_grayscale};
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use clap::Parser;
use ndarray::Array2;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "gendraw")]
#[command(
    author,
    version,
    about = "Approximate an image with evolved brush strokes"
)]
/// Command-line arguments for the painting tool
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Target image to approximate (converted to grayscale)
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory holding numbered brush stamps (0.png, 1.png, ...)
    #[arg(short, long, default_value = "brushes")]
    pub brushes: PathBuf,

    /// Number of brush stamps to load
    #[arg(long, default_value_t = DEFAULT_BRUSH_COUNT)]
    pub brush_count: usize,

    /// Grayscale image used as the sampling density for every stage
    #[arg(short, long)]
    pub mask: Option<PathBuf>,

    /// Random seed for reproducible painting
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of stages
    #[arg(long, default_value_t = DEFAULT_STAGES)]
    pub stages: usize,

    /// Generations per stage
    #[arg(short, long, default_value_t = DEFAULT_GENERATIONS)]
    pub generations: usize,

    /// Strokes added per stage
    #[arg(long, default_value_t = DEFAULT_STROKES)]
    pub strokes: usize,

    /// Range swept by the stage minimum stroke scale, as `min,max`
    #[arg(long, value_parser = parse_range)]
    pub min_range: Option<[f64; 2]>,

    /// Range swept by the stage maximum stroke scale, as `min,max`
    #[arg(long, value_parser = parse_range)]
    pub max_range: Option<[f64; 2]>,

    /// Output path (defaults to `<target>_painted.png` next to the target)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also save the canvas after every stage
    #[arg(long)]
    pub history: bool,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log per-generation details (honours `RUST_LOG`)
    #[arg(long)]
    pub debug: bool,
}

/// Parse a `min,max` pair of positive numbers
///
/// # Errors
///
/// Returns a message if the text is not two comma-separated numbers
pub fn parse_range(text: &str) -> std::result::Result<[f64; 2], String> {
    let mut parts = text.split(',').map(str::trim);
    let (Some(min), Some(max), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected `min,max`, got `{text}`"));
    };
    let min: f64 = min.parse().map_err(|e| format!("invalid min `{min}`: {e}"))?;
    let max: f64 = max.parse().map_err(|e| format!("invalid max `{max}`: {e}"))?;
    Ok([min, max])
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Run configuration assembled from the arguments
    pub fn run_config(&self) -> RunConfig {
        let defaults = RunConfig::default();
        RunConfig {
            stages: self.stages,
            generations_per_stage: self.generations,
            strokes_per_stage: self.strokes,
            brush_size_ranges: [
                self.min_range.unwrap_or(defaults.brush_size_ranges[0]),
                self.max_range.unwrap_or(defaults.brush_size_ranges[1]),
            ],
            seed: self.seed,
            show_progress: self.should_show_progress(),
        }
    }

    /// Path the final painting is written to
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| sibling_path(&self.target, OUTPUT_SUFFIX, "png"))
    }
}

/// `<stem><suffix>.<extension>` next to `input_path`
pub fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Path of the image saved after `stage` (one-based) next to `output_path`
pub fn stage_path(output_path: &Path, stage: usize) -> PathBuf {
    sibling_path(output_path, &format!("_stage_{stage}"), "png")
}

/// Path of the progress animation next to `output_path`
pub fn visualization_path(output_path: &Path) -> PathBuf {
    sibling_path(output_path, "_progress", "gif")
}

/// Loads inputs, runs the stages and writes every requested output
pub struct Painter {
    cli: Cli,
}

impl Painter {
    /// Create a painter for the parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Arguments this painter runs with
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Paint the target and write the outputs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target, a brush or the mask cannot be loaded
    /// - The configuration or the mask is invalid
    /// - A stage fails to place its strokes
    /// - An output file cannot be written
    pub fn process(&self) -> Result<Array2<u8>> {
        let start_time = Instant::now();
        let target = load_grayscale(&self.cli.target)?;
        let brushes = load_brushes(&self.cli.brushes, self.cli.brush_count)?;
        tracing::info!(
            target = %self.cli.target.display(),
            rows = target.nrows(),
            cols = target.ncols(),
            brushes = brushes.len(),
            "loaded inputs"
        );

        let config = self.cli.run_config();
        let mut scheduler = StageScheduler::new(target, brushes, config)?;
        if let Some(mask_path) = &self.cli.mask {
            scheduler.set_sampling_mask(&load_grayscale(mask_path)?)?;
        }

        let progress = config.show_progress.then(|| ProgressManager::new(config.stages));
        let capture = self.cli.visualize.then(VisualizationCapture::new);
        let mut observers = (progress, capture);
        let painting = scheduler.generate(&mut observers)?;

        let output_path = self.cli.output_path();
        export_png(&painting, &output_path)?;

        if self.cli.history {
            for (stage, image) in scheduler.history().iter().enumerate().skip(1) {
                export_png(image, &stage_path(&output_path, stage))?;
            }
        }

        if let (_, Some(capture)) = &observers {
            capture.export_gif(&visualization_path(&output_path), GIF_FRAME_DELAY_MS)?;
        }

        tracing::info!(
            output = %output_path.display(),
            error = scheduler.reports().last().map(|r| r.final_error),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "painting written"
        );
        Ok(painting)
    }
}
