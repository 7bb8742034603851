//! Dithering to black and white, and color error diffusion.
//!
//! Every monochrome variant writes `0` or `255` to R, G and B and leaves
//! alpha untouched:
//!
//! - [`Raster::dither_threshold`]: fixed cutoff at luminance 127
//! - [`Raster::dither_random`]: uniform noise before the cutoff
//! - [`Raster::dither_cluster`]: 4x4 clustered-dot ordered dither
//! - [`Raster::dither_bright`]: cutoff chosen to preserve mean brightness
//! - [`Raster::dither_fs`]: serpentine Floyd-Steinberg
//!
//! [`Raster::dither_color`] runs the same Floyd-Steinberg diffusion per
//! channel against the uniform quantization levels instead.

mod cluster;
mod color;
mod floyd_steinberg;
pub mod kernel;
pub mod scan;
mod threshold;

pub use cluster::{cluster_threshold, CLUSTER_MATRIX};
pub use color::nearest_level;
pub use floyd_steinberg::FS_THRESHOLD;
pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use scan::{serpentine, Direction, ScanStep};
pub use threshold::{MIDPOINT, NOISE_MAX, NOISE_MIN};

/// Output value for "off".
pub const BLACK: u8 = 0;
/// Output value for "on".
pub const WHITE: u8 = 255;
