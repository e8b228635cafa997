//! Tests for frame capture and GIF export

#[cfg(test)]
mod tests {
    use gendraw::PaintError;
    use gendraw::algorithm::genome::GenerationReport;
    use gendraw::algorithm::observer::{GenerationObserver, GenerationProgress};
    use gendraw::io::visualization::VisualizationCapture;
    use ndarray::Array2;
    use tempfile::TempDir;

    fn capture_frames(count: usize) -> VisualizationCapture {
        let mut capture = VisualizationCapture::new();
        for generation in 1..=count {
            let image = Array2::from_elem((6, 8), (generation * 20) as u8);
            capture.on_generation(&GenerationProgress {
                stage: 0,
                stages: 1,
                generation,
                generations: count,
                image: image.view(),
                report: GenerationReport {
                    error_before: 10,
                    error_after: 10,
                    accepted: 0,
                    out_of_bounds: 0,
                },
            });
        }
        capture
    }

    // Tests each generation stores one frame
    // Verified by capturing only accepted generations
    #[test]
    fn test_capture_frames() {
        let capture = capture_frames(4);
        assert_eq!(capture.frame_count(), 4);
        assert_eq!(capture.frames()[2][[0, 0]], 60);
    }

    // Tests exporting without frames fails
    // Verified by writing an empty animation
    #[test]
    fn test_export_gif_no_frames() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.gif");
        assert!(matches!(
            VisualizationCapture::new().export_gif(&path, 80),
            Err(PaintError::InvalidInput { .. })
        ));
        assert!(!path.exists());
    }

    // Tests the animation is written with the canvas size
    // Verified by swapping frame width and height
    #[test]
    fn test_export_gif() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("anim").join("progress.gif");
        capture_frames(5).export_gif(&path, 10).unwrap();

        assert!(path.exists());
        let first = image::open(&path).unwrap();
        assert_eq!((first.width(), first.height()), (8, 6));
    }
}
