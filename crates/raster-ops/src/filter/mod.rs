//! Convolution filter engine.
//!
//! A square, odd-sized integer [`Kernel`] is slid over the color channels
//! of a raster (alpha is neither read nor written). Each output channel is
//! `sum(weight * input) / normalizer` with integer division truncating
//! toward zero, then written back according to an [`OutputPolicy`].
//!
//! Two border policies exist and are selected by the filter, not by the
//! caller:
//!
//! - [`BorderPolicy::ZeroPad`]: the fixed 5x5 presets convolve a copy of
//!   the image surrounded by a zero border of half the kernel width.
//! - [`BorderPolicy::SkipTaps`]: the N x N Gaussian skips taps that fall
//!   outside the image.
//!
//! Neither renormalizes at the border, so edge pixels are darkened
//! relative to the interior.

mod binomial;
mod presets;

pub use binomial::{binomial, gaussian_kernel, pascal_row, MAX_GAUSSIAN_SIZE};
pub use presets::{FixedKernel, BARTLETT, BOX, EDGE, GAUSSIAN};

use crate::raster::{Grid, Raster, COLOR_CHANNELS};

/// An odd-sized square convolution kernel, weights stored row-major
/// (`weights[dy * size + dx]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    size: usize,
    weights: Vec<i64>,
    normalizer: i64,
}

impl Kernel {
    /// Build a kernel from row-major weights.
    ///
    /// # Panics
    ///
    /// Panics if `size` is even, `weights.len() != size * size` or
    /// `normalizer` is zero.
    pub fn new(size: usize, weights: Vec<i64>, normalizer: i64) -> Self {
        assert!(size % 2 == 1, "kernel size {size} must be odd");
        assert_eq!(weights.len(), size * size, "kernel weight count");
        assert!(normalizer != 0, "kernel normalizer must be non-zero");
        Self {
            size,
            weights,
            normalizer,
        }
    }

    /// Kernel from a fixed-size weight table.
    pub fn from_rows<const N: usize>(rows: &[[i64; N]; N], normalizer: i64) -> Self {
        Self::new(N, rows.iter().flatten().copied().collect(), normalizer)
    }

    /// Separable kernel `row ⊗ row`, normalized by the sum of its weights.
    pub fn outer(row: &[i64]) -> Self {
        let size = row.len();
        let weights: Vec<i64> = row
            .iter()
            .flat_map(|&a| row.iter().map(move |&b| a * b))
            .collect();
        let normalizer = weights.iter().sum();
        Self::new(size, weights, normalizer)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn normalizer(&self) -> i64 {
        self.normalizer
    }

    #[inline]
    pub fn weight(&self, dx: usize, dy: usize) -> i64 {
        self.weights[dy * self.size + dx]
    }

    pub fn weights(&self) -> &[i64] {
        &self.weights
    }
}

/// How taps outside the image are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderPolicy {
    /// Convolve a zero-bordered copy of the image.
    ZeroPad,
    /// Leave out-of-bounds taps out of the sum.
    SkipTaps,
}

/// How a filtered value is written back to the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPolicy {
    /// Replace the channel with the filtered value.
    Replace,
    /// Replace, with negative values written as 0.
    ClampNegative,
    /// Add a positive filtered value to the original channel, unless the
    /// sum would exceed 255; in that case the channel is left unmodified.
    AddWithoutOverflow,
}

impl OutputPolicy {
    #[inline]
    fn apply(self, original: u8, filtered: i64) -> u8 {
        match self {
            OutputPolicy::Replace => filtered.clamp(0, 255) as u8,
            OutputPolicy::ClampNegative => {
                if filtered > 0 {
                    filtered.min(255) as u8
                } else {
                    0
                }
            }
            OutputPolicy::AddWithoutOverflow => {
                let sum = original as i64 + filtered;
                if filtered > 0 && sum < 256 {
                    sum as u8
                } else {
                    original
                }
            }
        }
    }
}

/// Filtered values (before write-back) for every color channel.
pub fn convolve(raster: &Raster, kernel: &Kernel, border: BorderPolicy) -> Grid<i64> {
    match border {
        BorderPolicy::ZeroPad => convolve_padded(raster, kernel),
        BorderPolicy::SkipTaps => convolve_skipping(raster, kernel),
    }
}

fn convolve_padded(raster: &Raster, kernel: &Kernel) -> Grid<i64> {
    let width = raster.width() as usize;
    let height = raster.height() as usize;
    let size = kernel.size();
    let padded = Grid::from_raster_padded(raster, kernel.radius(), |v| v as i64);
    let mut out = Grid::new(width, height, COLOR_CHANNELS);

    for y in 0..height {
        for x in 0..width {
            for c in 0..COLOR_CHANNELS {
                let mut sum: i128 = 0;
                for dy in 0..size {
                    for dx in 0..size {
                        // (x, y) in the padded copy is the window's top-left
                        sum += kernel.weight(dx, dy) as i128 * padded.get(x + dx, y + dy, c) as i128;
                    }
                }
                out.set(x, y, c, (sum / kernel.normalizer() as i128) as i64);
            }
        }
    }
    out
}

fn convolve_skipping(raster: &Raster, kernel: &Kernel) -> Grid<i64> {
    let width = raster.width() as usize;
    let height = raster.height() as usize;
    let size = kernel.size();
    let radius = kernel.radius() as i64;
    let source = Grid::from_raster(raster, |v| v as i64);
    let mut out = Grid::new(width, height, COLOR_CHANNELS);

    for y in 0..height {
        for x in 0..width {
            for c in 0..COLOR_CHANNELS {
                let mut sum: i128 = 0;
                for dy in 0..size {
                    for dx in 0..size {
                        let sx = x as i64 + dx as i64 - radius;
                        let sy = y as i64 + dy as i64 - radius;
                        if let Some(v) = source.get_checked(sx, sy, c) {
                            sum += kernel.weight(dx, dy) as i128 * v as i128;
                        }
                    }
                }
                out.set(x, y, c, (sum / kernel.normalizer() as i128) as i64);
            }
        }
    }
    out
}

impl Raster {
    /// Convolve the color channels with `kernel` and write the result back.
    pub fn apply_kernel(&mut self, kernel: &Kernel, border: BorderPolicy, output: OutputPolicy) {
        let filtered = convolve(self, kernel, border);
        for y in 0..self.height() {
            for x in 0..self.width() {
                for c in 0..COLOR_CHANNELS {
                    let original = self.channel(x, y, c);
                    let value = output.apply(original, filtered.get(x as usize, y as usize, c));
                    self.set_channel(x, y, c, value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ALPHA;

    fn ramp(width: u32, height: u32) -> Raster {
        let mut raster = Raster::new(width, height);
        for y in 0..height {
            for x in 0..width {
                raster.set_pixel(x, y, [(x * 30) as u8, (y * 40) as u8, 200, 99]);
            }
        }
        raster
    }

    #[test]
    fn test_outer_normalizer_is_weight_sum() {
        let kernel = Kernel::outer(&[1, 2, 1]);
        assert_eq!(kernel.weights(), &[1, 2, 1, 2, 4, 2, 1, 2, 1]);
        assert_eq!(kernel.normalizer(), 16);
    }

    #[test]
    #[should_panic(expected = "must be odd")]
    fn test_even_kernel_rejected() {
        Kernel::new(2, vec![1; 4], 4);
    }

    #[test]
    fn test_identity_kernel() {
        let kernel = Kernel::new(1, vec![1], 1);
        let mut raster = ramp(4, 3);
        let before = raster.clone();
        raster.apply_kernel(&kernel, BorderPolicy::ZeroPad, OutputPolicy::Replace);
        assert_eq!(raster, before);
    }

    #[test]
    fn test_border_policies_agree() {
        let raster = ramp(6, 5);
        let kernel = GAUSSIAN.kernel();
        assert_eq!(
            convolve(&raster, &kernel, BorderPolicy::ZeroPad),
            convolve(&raster, &kernel, BorderPolicy::SkipTaps)
        );
    }

    #[test]
    fn test_corner_darkened() {
        // A 3x3 box over a uniform field: the corner only sees 4 of 9 taps
        let kernel = Kernel::new(3, vec![1; 9], 9);
        let mut raster = Raster::filled(3, 3, [90, 90, 90, 255]);
        raster.apply_kernel(&kernel, BorderPolicy::SkipTaps, OutputPolicy::Replace);
        assert_eq!(raster.pixel(1, 1), [90, 90, 90, 255]);
        assert_eq!(raster.pixel(0, 0), [40, 40, 40, 255]);
        assert_eq!(raster.pixel(1, 0), [60, 60, 60, 255]);
    }

    #[test]
    fn test_alpha_untouched() {
        let kernel = Kernel::new(3, vec![1; 9], 9);
        let mut raster = ramp(4, 4);
        raster.apply_kernel(&kernel, BorderPolicy::ZeroPad, OutputPolicy::Replace);
        assert!(raster.pixels().all(|px| px[ALPHA] == 99));
    }

    #[test]
    fn test_output_policies() {
        assert_eq!(OutputPolicy::Replace.apply(10, 77), 77);
        assert_eq!(OutputPolicy::ClampNegative.apply(10, -5), 0);
        assert_eq!(OutputPolicy::ClampNegative.apply(10, 0), 0);
        assert_eq!(OutputPolicy::ClampNegative.apply(10, 42), 42);
        assert_eq!(OutputPolicy::AddWithoutOverflow.apply(100, 50), 150);
        assert_eq!(OutputPolicy::AddWithoutOverflow.apply(100, -50), 100);
        assert_eq!(OutputPolicy::AddWithoutOverflow.apply(100, 0), 100);
        // Overflow leaves the value alone rather than clamping
        assert_eq!(OutputPolicy::AddWithoutOverflow.apply(200, 56), 200);
        assert_eq!(OutputPolicy::AddWithoutOverflow.apply(200, 55), 255);
    }

    #[test]
    fn test_negative_sum_truncates_toward_zero() {
        let kernel = Kernel::new(1, vec![-1], 2);
        let raster = Raster::filled(1, 1, [3, 3, 3, 255]);
        let out = convolve(&raster, &kernel, BorderPolicy::ZeroPad);
        // -3 / 2 == -1, not -2
        assert_eq!(out.get(0, 0, 0), -1);
    }
}
