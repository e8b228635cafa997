//! Immutable set of brush stamp images

use crate::io::error::{Result, invalid_input};
use image::GrayImage;

/// Brush stamps whose brightness doubles as their opacity
#[derive(Debug, Clone)]
pub struct BrushSet {
    stamps: Vec<GrayImage>,
}

impl BrushSet {
    /// Wrap a list of stamps
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the list is empty or a stamp has no pixels
    pub fn new(stamps: Vec<GrayImage>) -> Result<Self> {
        if stamps.is_empty() {
            return Err(invalid_input(
                "brushes",
                &0,
                &"at least one brush stamp is required",
            ));
        }
        if let Some(index) = stamps
            .iter()
            .position(|stamp| stamp.width() == 0 || stamp.height() == 0)
        {
            return Err(invalid_input("brushes", &index, &"brush stamp is empty"));
        }
        Ok(Self { stamps })
    }

    /// Number of stamps
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    /// Always false: construction rejects empty sets
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Stamp at `index`
    pub fn get(&self, index: usize) -> Option<&GrayImage> {
        self.stamps.get(index)
    }

    /// Largest stamp dimension, the reference side for stroke scales
    pub fn stamp_side(&self) -> u32 {
        self.stamps
            .iter()
            .map(|stamp| stamp.width().max(stamp.height()))
            .max()
            .unwrap_or(0)
    }
}
