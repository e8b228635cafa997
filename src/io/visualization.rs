//! Frame capture and GIF generation for painting progress

use crate::algorithm::observer::{GenerationObserver, GenerationProgress};
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{PaintError, Result, invalid_input};
use image::{Delay, Frame, Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// Final frame is held this many frame delays
const FINAL_FRAME_HOLD: u32 = 25;

/// Records the cached rendering after every generation
///
/// Frames are stored as grayscale arrays and only converted when the GIF is
/// written.
#[derive(Default)]
pub struct VisualizationCapture {
    frames: Vec<Array2<u8>>,
}

impl VisualizationCapture {
    /// Empty capture
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured frames in generation order
    pub fn frames(&self) -> &[Array2<u8>] {
        &self.frames
    }

    /// Number of captured frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// Requested delays below what viewers honour are raised, and frames are
    /// skipped so the animation keeps its apparent speed. The last frame is
    /// always included and held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(invalid_input(
                "visualize",
                &output_path.display(),
                &"no frames captured for visualization",
            ));
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let frames = self.build_frames(effective_delay_ms, skip_factor);

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PaintError::FileSystem {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source: e,
                })?;
            }
        }

        let file = std::fs::File::create(output_path).map_err(|e| PaintError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| PaintError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        tracing::info!(
            path = %output_path.display(),
            frames = self.frames.len(),
            skip_factor,
            "wrote progress animation"
        );
        Ok(())
    }

    fn build_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let last = self.frames.len().saturating_sub(1);
        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .enumerate()
            .filter(|(index, _)| index % skip_factor == 0 || *index == last)
            .map(|(_, image)| render_frame(image, delay_ms))
            .collect();

        if let Some(buffer) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                buffer,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * FINAL_FRAME_HOLD, 1),
            ));
        }
        frames
    }
}

fn render_frame(image: &Array2<u8>, delay_ms: u32) -> Frame {
    let (rows, cols) = image.dim();
    let buffer = RgbaImage::from_fn(cols as u32, rows as u32, |x, y| {
        let v = image.get([y as usize, x as usize]).copied().unwrap_or(0);
        Rgba([v, v, v, 255])
    });
    Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
}

impl GenerationObserver for VisualizationCapture {
    fn on_generation(&mut self, progress: &GenerationProgress<'_>) {
        self.frames.push(progress.image.to_owned());
    }
}
