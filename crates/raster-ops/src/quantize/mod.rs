//! Color reduction to an 8-bit-equivalent palette.
//!
//! - [`Raster::quant_uniform`]: fixed per-channel steps (36, 36, 85)
//! - [`Raster::quant_populosity`]: the 256 most frequent colors of a
//!   32-level histogram, each pixel mapped to the nearest one

mod histogram;

pub use histogram::{nearest, Histogram, HistogramEntry, BUCKET_COUNT, LEVEL_STEP};

use crate::raster::{Raster, BLUE, GREEN, RED};

/// Uniform quantization steps for R, G and B.
pub const UNIFORM_STEPS: [u8; 3] = [36, 36, 85];

/// Palette size for popularity quantization.
pub const POPULOSITY_PALETTE_SIZE: usize = 256;

/// Truncate `value` down to a multiple of `step`.
#[inline]
pub fn truncate_to_step(value: u8, step: u8) -> u8 {
    value / step * step
}

impl Raster {
    /// Truncate R and G to multiples of 36 and B to multiples of 85.
    ///
    /// Truncation, not rounding. Alpha is untouched. Idempotent.
    pub fn quant_uniform(&mut self) {
        for px in self.pixels_mut() {
            for (c, &step) in UNIFORM_STEPS.iter().enumerate() {
                px[c] = truncate_to_step(px[c], step);
            }
        }
    }

    /// Popularity quantization.
    ///
    /// Reduces every channel to 32 levels, histograms the result, keeps
    /// the [`POPULOSITY_PALETTE_SIZE`] most frequent colors and replaces
    /// each pixel with its nearest palette color. Cost is
    /// `O(pixels * palette)`.
    pub fn quant_populosity(&mut self) {
        if self.is_empty() {
            return;
        }

        for px in self.pixels_mut() {
            for c in [RED, GREEN, BLUE] {
                px[c] = truncate_to_step(px[c], LEVEL_STEP);
            }
        }

        let histogram = Histogram::from_raster(self);
        let palette = histogram.into_palette(POPULOSITY_PALETTE_SIZE);
        tracing::debug!(colors = palette.len(), "Built populosity palette");

        for px in self.pixels_mut() {
            let chosen = palette[nearest(&palette, [px[RED], px[GREEN], px[BLUE]])];
            px[RED] = chosen[0];
            px[GREEN] = chosen[1];
            px[BLUE] = chosen[2];
        }
    }
}
