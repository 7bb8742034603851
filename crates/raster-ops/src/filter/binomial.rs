//! Arbitrary-size binomial (Gaussian-approximating) filter.

use crate::error::RasterError;
use crate::raster::Raster;

use super::{BorderPolicy, Kernel, OutputPolicy};

/// Largest supported kernel size. The weight total is `4^(N-1)`; at
/// `N = 31` a full-intensity window no longer fits in 64 bits.
pub const MAX_GAUSSIAN_SIZE: u32 = 29;

/// `n` choose `k`, exact.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    // Each partial product is itself a binomial coefficient, so the
    // division is exact.
    (1..=k).fold(1, |acc, i| acc * (n - i + 1) / i)
}

/// Row `n` of Pascal's triangle (`n + 1` entries).
pub fn pascal_row(n: u32) -> Vec<i64> {
    (0..=n as u64).map(|k| binomial(n as u64, k) as i64).collect()
}

/// `size x size` binomial kernel: row `size - 1` of Pascal's triangle
/// with itself, normalized by the weight total.
///
/// # Errors
///
/// [`RasterError::UnsupportedKernelSize`] for even sizes, zero, and sizes
/// above [`MAX_GAUSSIAN_SIZE`].
pub fn gaussian_kernel(size: u32) -> Result<Kernel, RasterError> {
    if size == 0 || size % 2 == 0 || size > MAX_GAUSSIAN_SIZE {
        return Err(RasterError::UnsupportedKernelSize {
            size,
            max: MAX_GAUSSIAN_SIZE,
        });
    }
    Ok(Kernel::outer(&pascal_row(size - 1)))
}

impl Raster {
    /// `size x size` binomial blur.
    ///
    /// Out-of-bounds taps are skipped and the sum is still divided by the
    /// full weight total, so borders come out darker than the interior.
    ///
    /// # Errors
    ///
    /// Rejects unsupported sizes (see [`gaussian_kernel`]) without touching
    /// the raster.
    pub fn filter_gaussian_n(&mut self, size: u32) -> Result<(), RasterError> {
        let kernel = gaussian_kernel(size).inspect_err(|e| {
            tracing::warn!(%e, "Gaussian filter rejected");
        })?;
        self.apply_kernel(&kernel, BorderPolicy::SkipTaps, OutputPolicy::Replace);
        Ok(())
    }
}
