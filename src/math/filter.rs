//! Separable convolution filters on 2D float arrays
//!
//! Borders follow the reflect-101 convention (`gfedcb|abcdefgh|gfedcba`), so
//! a constant image stays constant under blurring and has zero derivative.

use crate::io::configuration::GAUSSIAN_RADIUS_SIGMAS;
use ndarray::{Array2, Axis};

/// Map a possibly out-of-range index into `0..len` by reflect-101 mirroring
pub fn reflect_101(index: isize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let wrapped = index.rem_euclid(period);
    if wrapped < len as isize {
        wrapped as usize
    } else {
        (period - wrapped) as usize
    }
}

/// First derivatives `(d/dx, d/dy)` with the aperture-1 kernel `[-1, 0, 1]`
pub fn central_difference(image: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    let (rows, cols) = image.dim();
    let at = |r: isize, c: isize| -> f64 {
        image
            .get([reflect_101(r, rows), reflect_101(c, cols)])
            .copied()
            .unwrap_or(0.0)
    };

    let dx = Array2::from_shape_fn((rows, cols), |(r, c)| {
        let (r, c) = (r as isize, c as isize);
        at(r, c + 1) - at(r, c - 1)
    });
    let dy = Array2::from_shape_fn((rows, cols), |(r, c)| {
        let (r, c) = (r as isize, c as isize);
        at(r + 1, c) - at(r - 1, c)
    });
    (dx, dy)
}

/// Normalized 1D Gaussian kernel for `sigma`, odd length
pub fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return vec![1.0];
    }
    let size = ((sigma * GAUSSIAN_RADIUS_SIGMAS).mul_add(2.0, 1.0).round() as usize) | 1;
    let radius = (size / 2) as isize;
    let denom = 2.0 * sigma * sigma;

    let mut weights: Vec<f64> = (-radius..=radius)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        for w in &mut weights {
            *w /= sum;
        }
    }
    weights
}

/// Gaussian blur with standard deviation `sigma` in pixels
pub fn gaussian_blur(image: &Array2<f64>, sigma: f64) -> Array2<f64> {
    let kernel = gaussian_kernel(sigma);
    if kernel.len() == 1 {
        return image.clone();
    }
    let horizontal = convolve_axis(image, &kernel, Axis(1));
    convolve_axis(&horizontal, &kernel, Axis(0))
}

fn convolve_axis(image: &Array2<f64>, kernel: &[f64], axis: Axis) -> Array2<f64> {
    let (rows, cols) = image.dim();
    let radius = (kernel.len() / 2) as isize;
    let len = image.len_of(axis);

    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let mut acc = 0.0;
        for (k, &weight) in kernel.iter().enumerate() {
            let offset = k as isize - radius;
            let (sr, sc) = if axis == Axis(1) {
                (r, reflect_101(c as isize + offset, len))
            } else {
                (reflect_101(r as isize + offset, len), c)
            };
            acc += weight * image.get([sr, sc]).copied().unwrap_or(0.0);
        }
        acc
    })
}
