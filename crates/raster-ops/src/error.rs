//! Error type for raster operations.
//!
//! Every fallible operation in this crate reports failure through
//! [`RasterError`]. A failed operation leaves the raster unmodified, with
//! one exception: the unimplemented compositing operators clear the
//! receiver before returning [`RasterError::Unimplemented`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Two rasters that must share dimensions do not.
    #[error("{op}: images not the same size ({}x{} vs {}x{})", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        op: &'static str,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Kernel size outside the range the accumulator can represent exactly.
    #[error("unsupported kernel size {size} (must be odd and at most {max})")]
    UnsupportedKernelSize { size: u32, max: u32 },

    /// Operator exists for interface completeness only.
    #[error("{op} is not implemented")]
    Unimplemented { op: &'static str },

    /// Byte buffer length does not match `width * height * 4`.
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}
