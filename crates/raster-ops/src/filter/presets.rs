//! Fixed 5x5 filters. All of them use [`BorderPolicy::ZeroPad`].

use crate::raster::Raster;

use super::{BorderPolicy, Kernel, OutputPolicy};

/// A compile-time 5x5 weight table with its normalizer.
#[derive(Debug, Clone, Copy)]
pub struct FixedKernel {
    pub rows: [[i64; 5]; 5],
    pub normalizer: i64,
}

impl FixedKernel {
    pub fn kernel(&self) -> Kernel {
        Kernel::from_rows(&self.rows, self.normalizer)
    }
}

pub const BOX: FixedKernel = FixedKernel {
    rows: [
        [1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1],
    ],
    normalizer: 25,
};

pub const BARTLETT: FixedKernel = FixedKernel {
    rows: [
        [1, 2, 3, 2, 1],
        [2, 4, 6, 4, 2],
        [3, 6, 9, 6, 3],
        [2, 4, 6, 4, 2],
        [1, 2, 3, 2, 1],
    ],
    normalizer: 81,
};

pub const GAUSSIAN: FixedKernel = FixedKernel {
    rows: [
        [1, 4, 6, 4, 1],
        [4, 16, 24, 16, 4],
        [6, 24, 36, 24, 6],
        [4, 16, 24, 16, 4],
        [1, 4, 6, 4, 1],
    ],
    normalizer: 256,
};

/// High-pass kernel shared by edge detection and enhancement. The
/// weights sum to zero.
pub const EDGE: FixedKernel = FixedKernel {
    rows: [
        [-1, -4, -6, -4, -1],
        [-4, -16, -24, -16, -4],
        [-6, -24, 220, -24, -6],
        [-4, -16, -24, -16, -4],
        [-1, -4, -6, -4, -1],
    ],
    normalizer: 256,
};

impl Raster {
    /// 5x5 box blur.
    pub fn filter_box(&mut self) {
        self.apply_kernel(&BOX.kernel(), BorderPolicy::ZeroPad, OutputPolicy::Replace);
    }

    /// 5x5 Bartlett (triangle) blur.
    pub fn filter_bartlett(&mut self) {
        self.apply_kernel(&BARTLETT.kernel(), BorderPolicy::ZeroPad, OutputPolicy::Replace);
    }

    /// 5x5 binomial Gaussian blur.
    pub fn filter_gaussian(&mut self) {
        self.apply_kernel(&GAUSSIAN.kernel(), BorderPolicy::ZeroPad, OutputPolicy::Replace);
    }

    /// High-pass edge detection; negative responses become 0.
    pub fn filter_edge(&mut self) {
        self.apply_kernel(&EDGE.kernel(), BorderPolicy::ZeroPad, OutputPolicy::ClampNegative);
    }

    /// Edge enhancement: adds the positive high-pass response.
    ///
    /// A channel whose enhanced value would exceed 255 is left as it was.
    pub fn filter_enhance(&mut self) {
        self.apply_kernel(
            &EDGE.kernel(),
            BorderPolicy::ZeroPad,
            OutputPolicy::AddWithoutOverflow,
        );
    }
}
