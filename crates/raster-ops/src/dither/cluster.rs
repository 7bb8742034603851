//! Clustered-dot ordered dithering.

use crate::raster::{intensity, Raster, BLUE, GREEN, RED};

use super::{BLACK, WHITE};

/// 4x4 clustered-dot threshold matrix, indexed `[row % 4][col % 4]`,
/// in `0..1` before scaling by 255.
pub const CLUSTER_MATRIX: [[f32; 4]; 4] = [
    [0.7059, 0.3529, 0.5882, 0.2353],
    [0.0588, 0.9412, 0.8235, 0.4118],
    [0.4706, 0.7647, 0.8824, 0.1176],
    [0.1765, 0.5294, 0.2941, 0.6471],
];

/// Threshold applied at `(x, y)`, in byte scale.
#[inline]
pub fn cluster_threshold(x: u32, y: u32) -> f32 {
    CLUSTER_MATRIX[y as usize % 4][x as usize % 4] * 255.0
}

impl Raster {
    /// Ordered dither against [`CLUSTER_MATRIX`]; no error propagation.
    pub fn dither_cluster(&mut self) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let [r, g, b, _] = self.pixel(x, y);
                let value = if intensity(r, g, b) as f32 >= cluster_threshold(x, y) {
                    WHITE
                } else {
                    BLACK
                };
                self.set_gray(x, y, value);
            }
        }
    }
}
