//! Image resampling: cubic scaling and bilinear rotation of brush stamps

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use imageproc::geometric_transformations::{self, Interpolation};
use ndarray::Array2;

/// Scaled side length for a stamp dimension, never below one pixel
pub fn scaled_extent(extent: u32, scale: f64) -> u32 {
    let scaled = (f64::from(extent) * scale).round();
    if scaled < 1.0 { 1 } else { scaled as u32 }
}

/// Scale a grayscale stamp by `scale` using Catmull-Rom cubic interpolation
pub fn resize_cubic(stamp: &GrayImage, scale: f64) -> GrayImage {
    let width = scaled_extent(stamp.width(), scale);
    let height = scaled_extent(stamp.height(), scale);
    imageops::resize(stamp, width, height, FilterType::CatmullRom)
}

/// Rotate `stamp` about its center by `degrees`, keeping the frame size
///
/// Positive angles turn the content counter-clockwise as displayed. Corners
/// that leave the frame are clipped and uncovered pixels become black.
/// Whole turns return the stamp unchanged.
pub fn rotate_about_center(stamp: &GrayImage, degrees: f64) -> GrayImage {
    if degrees.rem_euclid(360.0).abs() < f64::EPSILON {
        return stamp.clone();
    }
    // imageproc turns clockwise for positive angles
    let theta = -degrees.to_radians() as f32;
    geometric_transformations::rotate_about_center(
        stamp,
        theta,
        Interpolation::Bilinear,
        Luma([0]),
    )
}

/// Convert a grayscale stamp into a normalized `[0, 1]` alpha array
pub fn to_alpha(stamp: &GrayImage) -> Array2<f32> {
    let (width, height) = stamp.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
        f32::from(stamp.get_pixel(c as u32, r as u32).0[0]) / 255.0
    })
}
