//! Grayscale Floyd-Steinberg error diffusion.

use crate::raster::{luminance, Grid, Raster, COLOR_CHANNELS};

use super::kernel::FLOYD_STEINBERG;
use super::scan::serpentine;
use super::{BLACK, WHITE};

/// Luminance cutoff in the normalized `0..1` plane.
pub const FS_THRESHOLD: f32 = 0.5;

impl Raster {
    /// Floyd-Steinberg dither to black and white.
    ///
    /// Works on a floating-point copy of R, G and B scaled to `0..1`.
    /// Pixels are visited in serpentine order; each is set by thresholding
    /// its luminance at 0.5, and the per-channel error is pushed to the
    /// in-bounds kernel neighbors. Alpha is untouched.
    pub fn dither_fs(&mut self) {
        let width = self.width() as usize;
        let height = self.height() as usize;
        let mut plane = Grid::from_raster(self, |v| v as f32 / 255.0);

        for step in serpentine(width, height) {
            let (x, y) = (step.x, step.y);
            let lum = luminance(
                plane.get(x, y, 0) as f64,
                plane.get(x, y, 1) as f64,
                plane.get(x, y, 2) as f64,
            ) as f32;
            let white = lum >= FS_THRESHOLD;
            self.set_gray(x as u32, y as u32, if white { WHITE } else { BLACK });

            let target = if white { 1.0 } else { 0.0 };
            for c in 0..COLOR_CHANNELS {
                let error = plane.get(x, y, c) - target;
                for (tx, ty, fraction) in step.targets(&FLOYD_STEINBERG, width, height) {
                    *plane.get_mut(tx, ty, c) += error * fraction;
                }
            }
        }
    }
}
