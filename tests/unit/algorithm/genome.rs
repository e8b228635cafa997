//! Tests for genome initialization, cache consistency and greedy acceptance

#[cfg(test)]
mod tests {
    use gendraw::PaintError;
    use gendraw::algorithm::brush::BrushSet;
    use gendraw::algorithm::genome::Genome;
    use gendraw::algorithm::schedule::SizeRange;
    use gendraw::analysis::gradient::GradientField;
    use gendraw::math::probability::WeightedPositionSampler;
    use gendraw::spatial::canvas::absolute_error;
    use image::{GrayImage, Luma};
    use ndarray::Array2;

    const SIZES: SizeRange = SizeRange { min: 0.5, max: 1.0 };

    fn radial_brush() -> BrushSet {
        let brush = GrayImage::from_fn(9, 9, |x, y| {
            let dx = f64::from(x) - 4.0;
            let dy = f64::from(y) - 4.0;
            let falloff = (1.0 - dx.hypot(dy) / 4.5).max(0.0);
            Luma([(falloff * 255.0) as u8])
        });
        BrushSet::new(vec![brush]).unwrap()
    }

    fn diagonal_target() -> Array2<u8> {
        Array2::from_shape_fn((20, 20), |(r, c)| ((r + c) * 6) as u8)
    }

    // Tests initialization paints the requested strokes and caches their error
    // Verified by leaving the cached error at its sentinel
    #[test]
    fn test_init_caches_error() {
        let target = diagonal_target();
        let field = GradientField::from_image(&target);
        let brushes = radial_brush();
        let base = Array2::zeros(target.dim());
        let positions = WeightedPositionSampler::uniform(20, 20);

        let mut genome = Genome::new(&base, &field, &brushes, positions, SIZES).unwrap();
        assert_eq!(genome.cached_error(), u64::MAX);

        genome.init(&target, 6, 1).unwrap();
        assert_eq!(genome.strokes().len(), 6);
        let image = genome.cached_image();
        assert_eq!(image.dim(), (20, 20));
        assert_eq!(genome.cached_error(), absolute_error(image.view(), &target));
    }

    // Tests generations never raise the error and keep the cache consistent
    // Verified by accepting equal-error candidates without re-rendering
    #[test]
    fn test_generations_monotonic_and_consistent() {
        let target = diagonal_target();
        let field = GradientField::from_image(&target);
        let brushes = radial_brush();
        let base = Array2::zeros(target.dim());
        let positions = WeightedPositionSampler::uniform(20, 20);

        let mut genome = Genome::new(&base, &field, &brushes, positions, SIZES).unwrap();
        genome.init(&target, 8, 2).unwrap();

        let mut previous = genome.cached_error();
        let mut accepted = 0;
        for generation in 1..=10 {
            let report = genome.evolve_generation(&target, generation).unwrap();
            assert_eq!(report.error_before, previous);
            assert!(report.error_after <= report.error_before);
            assert_eq!(report.out_of_bounds, 0);
            assert_eq!(
                genome.cached_error(),
                absolute_error(genome.cached_image().view(), &target)
            );
            accepted += report.accepted;
            previous = report.error_after;
        }
        assert!(accepted > 0);
        assert_eq!(genome.strokes().len(), 8);
    }

    // Tests identical seeds give identical genomes
    // Verified by sharing the trial generator across strokes
    #[test]
    fn test_deterministic() {
        let target = diagonal_target();
        let field = GradientField::from_image(&target);
        let brushes = radial_brush();
        let base = Array2::from_elem(target.dim(), 30_u8);

        let run = || {
            let positions = WeightedPositionSampler::uniform(20, 20);
            let mut genome = Genome::new(&base, &field, &brushes, positions, SIZES).unwrap();
            genome.init(&target, 5, 3).unwrap();
            for generation in 1..=4 {
                genome.evolve_generation(&target, generation).unwrap();
            }
            (genome.strokes().to_vec(), genome.into_image())
        };

        assert_eq!(run(), run());
    }

    // Tests strokes paint over the inherited canvas
    // Verified by starting every genome from black
    #[test]
    fn test_base_canvas_preserved_outside_strokes() {
        let target = Array2::from_elem((30, 30), 200_u8);
        let field = GradientField::from_image(&target);
        let brushes = radial_brush();
        let base = Array2::from_elem((30, 30), 50_u8);
        let positions = WeightedPositionSampler::uniform(30, 30);

        let genome = Genome::new(&base, &field, &brushes, positions, SIZES).unwrap();
        assert_eq!(genome.cached_image(), base);
        assert_eq!(genome.cached_canvas().padding(), 9);
    }

    // Tests mismatched inputs are rejected
    // Verified by skipping the dimension checks
    #[test]
    fn test_dimension_mismatch() {
        let target = diagonal_target();
        let field = GradientField::from_image(&target);
        let brushes = radial_brush();

        let small = Array2::zeros((10, 20));
        assert!(matches!(
            Genome::new(
                &small,
                &field,
                &brushes,
                WeightedPositionSampler::uniform(10, 20),
                SIZES
            ),
            Err(PaintError::InvalidInput { .. })
        ));

        let base = Array2::zeros(target.dim());
        let mut genome = Genome::new(
            &base,
            &field,
            &brushes,
            WeightedPositionSampler::uniform(20, 20),
            SIZES,
        )
        .unwrap();
        assert!(matches!(
            genome.init(&small, 3, 0),
            Err(PaintError::InvalidInput { .. })
        ));
    }

    // Tests an empty genome evolves without changes
    // Verified by indexing strokes without a length check
    #[test]
    fn test_empty_genome_generation() {
        let target = diagonal_target();
        let field = GradientField::from_image(&target);
        let brushes = radial_brush();
        let base = Array2::zeros(target.dim());
        let mut genome = Genome::new(
            &base,
            &field,
            &brushes,
            WeightedPositionSampler::uniform(20, 20),
            SIZES,
        )
        .unwrap();

        let report = genome.evolve_generation(&target, 1).unwrap();
        assert_eq!(report.accepted, 0);
        assert_eq!(report.error_before, report.error_after);
        assert!((genome.sizes().max - 1.0).abs() < f64::EPSILON);
    }

    // Tests candidates leaving the canvas are rejected without side effects
    // Verified by propagating the geometry error out of the generation
    #[test]
    fn test_out_of_bounds_candidate_rejected() {
        let target = Array2::from_elem((3, 3), 180_u8);
        let field = GradientField::from_image(&target);
        let brushes = BrushSet::new(vec![
            GrayImage::from_pixel(1, 1, Luma([255])),
            GrayImage::from_pixel(9, 9, Luma([255])),
        ])
        .unwrap();
        let base = Array2::zeros((3, 3));
        let fixed = SizeRange { min: 1.0, max: 1.0 };

        // Only the single-pixel brush fits an unpadded 3x3 canvas
        let mut genome = (0..64)
            .find_map(|seed| {
                let positions = WeightedPositionSampler::uniform(3, 3);
                let mut genome =
                    Genome::with_padding(&base, &field, &brushes, positions, fixed, 0).unwrap();
                genome.init(&target, 1, seed).ok().map(|()| genome)
            })
            .unwrap();
        assert_eq!(genome.cached_canvas().padding(), 0);

        let mut rejected = false;
        for generation in 1..=200 {
            let strokes = genome.strokes().to_vec();
            let canvas = genome.cached_canvas().clone();
            let error = genome.cached_error();

            let report = genome.evolve_generation(&target, generation).unwrap();
            assert!(report.accepted + report.out_of_bounds <= 1);
            if report.out_of_bounds == 1 {
                assert_eq!(report.accepted, 0);
                assert_eq!(report.error_after, error);
                assert_eq!(genome.strokes(), strokes.as_slice());
                assert_eq!(genome.cached_canvas(), &canvas);
                assert_eq!(genome.cached_error(), error);
                rejected = true;
                break;
            }
        }
        assert!(rejected);
    }
}
