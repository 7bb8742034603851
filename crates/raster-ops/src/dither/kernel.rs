//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`. `dx` is relative to the scan
/// direction: positive means "ahead", so it is mirrored on right-to-left
/// rows. `dy` is always non-negative. A neighbor receives
/// `error * weight / divisor`.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
}

impl Kernel {
    /// Fraction of the error that `weight` represents.
    #[inline]
    pub fn fraction(&self, weight: u8) -> f32 {
        weight as f32 / self.divisor as f32
    }
}

/// Floyd-Steinberg kernel, 100% propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Entries are listed forward, forward-diagonal below, straight below,
/// backward-diagonal below.
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // ahead
        (1, 1, 1),  // ahead, next row
        (0, 1, 5),  // below
        (-1, 1, 3), // behind, next row
    ],
    divisor: 16,
};
