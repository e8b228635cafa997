//! Tests for stamp preparation and alpha compositing

#[cfg(test)]
mod tests {
    use gendraw::PaintError;
    use gendraw::algorithm::brush::BrushSet;
    use gendraw::algorithm::compositor::{Stamp, composite, placement, render};
    use gendraw::algorithm::stroke::Stroke;
    use gendraw::spatial::canvas::Canvas;
    use image::{GrayImage, Luma};

    fn stroke(color: u8, position: [usize; 2]) -> Stroke {
        Stroke {
            color,
            position,
            size: 1.0,
            rotation: 0.0,
            brush: 0,
        }
    }

    // Tests an opaque stamp replaces the background with the stroke color
    // Verified by swapping alpha and background weights
    #[test]
    fn test_opaque_stamp_paints_color() {
        let brush = GrayImage::from_pixel(4, 4, Luma([255]));
        let stamp = Stamp::prepare(&brush, 1.0, 0.0);
        assert_eq!(stamp.dimensions(), (4, 4));

        let mut canvas = Canvas::blank(10, 10, 3);
        composite(&mut canvas, &stroke(200, [5, 5]), &stamp).unwrap();

        let image = canvas.to_image();
        for r in 3..7 {
            for c in 3..7 {
                assert_eq!(image[[r, c]], 200, "pixel ({r}, {c})");
            }
        }
        assert_eq!(image[[2, 5]], 0);
        assert_eq!(image[[5, 7]], 0);
    }

    // Tests a transparent stamp leaves the canvas unchanged
    // Verified by ignoring alpha
    #[test]
    fn test_transparent_stamp_is_noop() {
        let brush = GrayImage::from_pixel(4, 4, Luma([0]));
        let stamp = Stamp::prepare(&brush, 1.0, 0.0);
        let base = ndarray::Array2::from_elem((8, 8), 77_u8);
        let mut canvas = Canvas::from_image(&base, 3);
        composite(&mut canvas, &stroke(255, [4, 4]), &stamp).unwrap();
        assert_eq!(canvas.to_image(), base);
    }

    // Tests partial opacity mixes color and background
    // Verified by using alpha squared
    #[test]
    fn test_partial_opacity_blends() {
        let brush = GrayImage::from_pixel(2, 2, Luma([128]));
        let stamp = Stamp::prepare(&brush, 1.0, 0.0);
        let mut canvas = Canvas::blank(6, 6, 2);
        composite(&mut canvas, &stroke(255, [3, 3]), &stamp).unwrap();

        let value = canvas.to_image()[[3, 3]];
        assert!((127..=128).contains(&value), "blended value {value}");
    }

    // Tests placement centers the stamp on the padded position
    // Verified by ignoring the padding offset
    #[test]
    fn test_placement() {
        let brush = GrayImage::from_pixel(10, 10, Luma([255]));
        let stamp = Stamp::prepare(&brush, 1.0, 0.0);
        let canvas = Canvas::blank(20, 20, 5);
        let rect = placement(&canvas, &stroke(0, [3, 4]), &stamp);
        assert_eq!(rect.as_array(), [3, 4, 13, 14]);
    }

    // Tests scaling changes the stamp extent
    // Verified by ignoring the stroke size
    #[test]
    fn test_stamp_scaling() {
        let brush = GrayImage::from_pixel(10, 6, Luma([255]));
        let stamp = Stamp::prepare(&brush, 0.5, 30.0);
        assert_eq!(stamp.dimensions(), (3, 5));
        assert!(stamp.alpha().iter().all(|&a| (-1e-5..=1.0 + 1e-5).contains(&a)));
    }

    // Tests out-of-bounds strokes fail and leave the canvas untouched
    // Verified by writing before checking bounds
    #[test]
    fn test_out_of_bounds_is_atomic() {
        let brush = GrayImage::from_pixel(10, 10, Luma([255]));
        let stamp = Stamp::prepare(&brush, 1.0, 0.0);
        let mut canvas = Canvas::blank(10, 10, 0);
        let before = canvas.clone();

        let result = composite(&mut canvas, &stroke(255, [0, 0]), &stamp);
        assert!(matches!(
            result,
            Err(PaintError::GeometryOutOfBounds { .. })
        ));
        assert_eq!(canvas, before);
    }

    // Tests rendering leaves the input canvas untouched
    // Verified by compositing in place
    #[test]
    fn test_render_is_pure() {
        let brush = GrayImage::from_pixel(3, 3, Luma([255]));
        let canvas = Canvas::blank(6, 6, 3);
        let painted = render(&canvas, &stroke(90, [2, 2]), &brush).unwrap();

        assert_eq!(canvas, Canvas::blank(6, 6, 3));
        assert_eq!(painted.to_image()[[2, 2]], 90);
    }

    // Tests unknown brush indices are rejected
    // Verified by clamping the index
    #[test]
    fn test_unknown_brush_rejected() {
        let brushes = BrushSet::new(vec![GrayImage::from_pixel(3, 3, Luma([255]))]).unwrap();
        let mut bad = stroke(10, [1, 1]);
        bad.brush = 1;
        assert!(matches!(
            Stamp::for_stroke(&bad, &brushes),
            Err(PaintError::InvalidInput { .. })
        ));
        assert!(Stamp::for_stroke(&stroke(10, [1, 1]), &brushes).is_ok());
    }
}
