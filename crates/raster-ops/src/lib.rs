//! raster-ops: in-memory RGBA image processing
//!
//! A [`Raster`] owns a top-to-bottom, row-major RGBA8 buffer. Every
//! operation is a method on it that runs to completion and rewrites the
//! buffer in place; operations that change dimensions swap in a new buffer
//! in one step.
//!
//! # Quick Start
//!
//! ```
//! use raster_ops::Raster;
//!
//! let mut raster = Raster::filled(4, 4, [200, 120, 40, 255]);
//! raster.to_grayscale();
//! raster.dither_threshold();
//!
//! assert!(raster.pixels().all(|px| px == [255, 255, 255, 255]));
//! ```
//!
//! # Operation Families
//!
//! - Color reduction: [`Raster::to_grayscale`], [`Raster::quant_uniform`],
//!   [`Raster::quant_populosity`]
//! - Dithering: see [`dither`] for the monochrome variants and
//!   [`Raster::dither_color`]
//! - Convolution: the fixed 5x5 presets in [`filter`] and the N x N
//!   binomial [`Raster::filter_gaussian_n`]
//! - Resampling: [`Raster::half_size`], [`Raster::double_size`],
//!   [`Raster::rotate`]
//! - Two-image operations: [`Raster::difference`] and the
//!   [`Compositor`] stubs
//! - Painting: [`Raster::paint_stroke`]
//!
//! # Alpha
//!
//! Color operations leave alpha as they found it. The exceptions are
//! [`Raster::double_size`] and [`Raster::difference`], which write fully
//! opaque pixels, and [`Raster::paint_stroke`], which paints the stroke's
//! alpha.
//!
//! # Errors
//!
//! Only size validation and kernel-size limits can fail; see
//! [`RasterError`]. Everything else is infallible for a well-formed
//! raster.

pub mod composite;
pub mod dither;
pub mod error;
pub mod filter;
pub mod quantize;
pub mod raster;
pub mod resample;
pub mod stroke;


pub use composite::Compositor;
pub use error::RasterError;
pub use filter::{BorderPolicy, Kernel, OutputPolicy, MAX_GAUSSIAN_SIZE};
pub use raster::{composite_over_black, intensity, luminance, Grid, Raster};
pub use stroke::Stroke;
