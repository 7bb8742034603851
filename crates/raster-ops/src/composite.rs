//! Two-image operations.
//!
//! Every operator first requires both rasters to share dimensions; on a
//! mismatch it logs a warning and returns
//! [`RasterError::DimensionMismatch`] without touching either buffer.
//!
//! Only [`Raster::difference`] is implemented. The Porter-Duff operators
//! clear the receiver to black and report [`RasterError::Unimplemented`].

use std::fmt;

use crate::error::RasterError;
use crate::raster::{composite_over_black, Raster, OPAQUE};

/// Porter-Duff compositing operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositor {
    Over,
    In,
    Out,
    Atop,
    Xor,
}

impl Compositor {
    pub const ALL: [Compositor; 5] = [
        Compositor::Over,
        Compositor::In,
        Compositor::Out,
        Compositor::Atop,
        Compositor::Xor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Compositor::Over => "comp_over",
            Compositor::In => "comp_in",
            Compositor::Out => "comp_out",
            Compositor::Atop => "comp_atop",
            Compositor::Xor => "comp_xor",
        }
    }
}

impl fmt::Display for Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Raster {
    fn require_same_size(&self, other: &Raster, op: &'static str) -> Result<(), RasterError> {
        if self.dimensions() == other.dimensions() {
            return Ok(());
        }
        let error = RasterError::DimensionMismatch {
            op,
            expected: self.dimensions(),
            actual: other.dimensions(),
        };
        tracing::warn!(%error, "composite rejected");
        Err(error)
    }

    /// Composite `other` onto this raster with `op`.
    ///
    /// # Errors
    ///
    /// [`RasterError::DimensionMismatch`] leaves both rasters untouched.
    /// Otherwise the receiver is cleared to black and
    /// [`RasterError::Unimplemented`] is returned.
    pub fn composite(&mut self, op: Compositor, other: &Raster) -> Result<(), RasterError> {
        self.require_same_size(other, op.name())?;
        self.clear_to_black();
        Err(RasterError::Unimplemented { op: op.name() })
    }

    pub fn comp_over(&mut self, other: &Raster) -> Result<(), RasterError> {
        self.composite(Compositor::Over, other)
    }

    pub fn comp_in(&mut self, other: &Raster) -> Result<(), RasterError> {
        self.composite(Compositor::In, other)
    }

    pub fn comp_out(&mut self, other: &Raster) -> Result<(), RasterError> {
        self.composite(Compositor::Out, other)
    }

    pub fn comp_atop(&mut self, other: &Raster) -> Result<(), RasterError> {
        self.composite(Compositor::Atop, other)
    }

    pub fn comp_xor(&mut self, other: &Raster) -> Result<(), RasterError> {
        self.composite(Compositor::Xor, other)
    }

    /// Per-channel absolute difference of both images composited over
    /// black. Alpha becomes fully opaque.
    ///
    /// # Errors
    ///
    /// [`RasterError::DimensionMismatch`] when the sizes differ.
    pub fn difference(&mut self, other: &Raster) -> Result<(), RasterError> {
        self.require_same_size(other, "difference")?;
        for (px, theirs) in self.pixels_mut().zip(other.pixels()) {
            let a = composite_over_black([px[0], px[1], px[2], px[3]]);
            let b = composite_over_black(theirs);
            for c in 0..3 {
                px[c] = a[c].abs_diff(b[c]);
            }
            px[3] = OPAQUE;
        }
        Ok(())
    }
}
