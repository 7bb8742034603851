//! Parity-selected 4x4 interpolation kernels.
//!
//! Each kernel is indexed `[dx + 1][dy + 1]` for tap offsets
//! `dx, dy in -1..=2` around a base source pixel. An axis at phase 0 uses
//! the weights `1 2 1` (centered on the base), an axis at phase 1/2 uses
//! `1 3 3 1` (between the base and the next pixel). Every kernel sums to
//! [`PHASE_NORMALIZER`].

use crate::raster::Grid;

pub type PhaseKernel = [[u32; 4]; 4];

pub const PHASE_NORMALIZER: u32 = 64;

/// Even x, even y.
pub const EVEN_EVEN: PhaseKernel = [
    [4, 8, 4, 0],
    [8, 16, 8, 0],
    [4, 8, 4, 0],
    [0, 0, 0, 0],
];

/// Odd x, odd y.
pub const ODD_ODD: PhaseKernel = [
    [1, 3, 3, 1],
    [3, 9, 9, 3],
    [3, 9, 9, 3],
    [1, 3, 3, 1],
];

/// Odd x, even y.
pub const ODD_EVEN: PhaseKernel = [
    [2, 4, 2, 0],
    [6, 12, 6, 0],
    [6, 12, 6, 0],
    [2, 4, 2, 0],
];

/// Even x, odd y.
pub const EVEN_ODD: PhaseKernel = [
    [2, 6, 6, 2],
    [4, 12, 12, 4],
    [2, 6, 6, 2],
    [0, 0, 0, 0],
];

/// Kernel for a destination pixel, chosen by coordinate parity.
pub fn phase_kernel(x: usize, y: usize) -> &'static PhaseKernel {
    match (x % 2 == 1, y % 2 == 1) {
        (false, false) => &EVEN_EVEN,
        (true, true) => &ODD_ODD,
        (true, false) => &ODD_EVEN,
        (false, true) => &EVEN_ODD,
    }
}

/// Weighted sum of the 4x4 taps for channel `c`, divided by the
/// normalizer. `tap` maps an offset to a source coordinate; taps outside
/// `source` are skipped.
pub(crate) fn sample(
    source: &Grid<u32>,
    kernel: &PhaseKernel,
    c: usize,
    tap: impl Fn(i64, i64) -> (i64, i64),
) -> u8 {
    let mut sum = 0u32;
    for dx in -1..=2i64 {
        for dy in -1..=2i64 {
            let (sx, sy) = tap(dx, dy);
            if let Some(v) = source.get_checked(sx, sy, c) {
                sum += kernel[(dx + 1) as usize][(dy + 1) as usize] * v;
            }
        }
    }
    // Weights sum to the normalizer, so the quotient never exceeds 255
    (sum / PHASE_NORMALIZER) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernels_sum_to_normalizer() {
        for kernel in [&EVEN_EVEN, &ODD_ODD, &ODD_EVEN, &EVEN_ODD] {
            let sum: u32 = kernel.iter().flatten().sum();
            assert_eq!(sum, PHASE_NORMALIZER);
        }
    }

    #[test]
    fn test_parity_selection() {
        assert_eq!(phase_kernel(0, 0), &EVEN_EVEN);
        assert_eq!(phase_kernel(3, 5), &ODD_ODD);
        assert_eq!(phase_kernel(1, 2), &ODD_EVEN);
        assert_eq!(phase_kernel(4, 7), &EVEN_ODD);
    }

    #[test]
    fn test_odd_x_axis_is_half_phase() {
        // Summing over dy leaves the per-dx weights
        let per_dx: Vec<u32> = ODD_EVEN.iter().map(|col| col.iter().sum()).collect();
        assert_eq!(per_dx, vec![8, 24, 24, 8]);
    }

    #[test]
    fn test_sample_skips_outside_taps() {
        let mut source = Grid::new(2, 2, 3);
        for y in 0..2 {
            for x in 0..2 {
                source.set(x, y, 0, 64);
            }
        }
        // Centered on (0, 0): only the 2x2 taps 16 + 8 + 8 + 4 land inside
        let value = sample(&source, &EVEN_EVEN, 0, |dx, dy| (dx, dy));
        assert_eq!(value, 36);
    }

    #[test]
    fn test_sample_first_index_is_x() {
        // Values rise along x only
        let mut source = Grid::new(4, 4, 1);
        for y in 0..4 {
            for x in 0..4 {
                source.set(x, y, 0, x as u32 * 10);
            }
        }
        // Per-dx weights 8, 24, 24, 8 over 0, 10, 20, 30
        let value = sample(&source, &ODD_EVEN, 0, |dx, dy| (1 + dx, 1 + dy));
        assert_eq!(value, 15);
        // Per-dx weights 16, 32, 16, 0
        let value = sample(&source, &EVEN_ODD, 0, |dx, dy| (1 + dx, 1 + dy));
        assert_eq!(value, 10);
    }
}
