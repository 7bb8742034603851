//! The RGBA raster buffer and its channel utilities.
//!
//! [`Raster`] owns a contiguous, row-major, top-to-bottom byte array with
//! four bytes per pixel in R, G, B, A order. Algorithms address pixels by
//! `(x, y)` or `(x, y, channel)`; byte offsets never leave this module.

mod grid;

pub use grid::Grid;

use crate::error::RasterError;

/// Bytes per pixel.
pub const CHANNELS: usize = 4;
/// Color channels processed by the filters (alpha excluded).
pub const COLOR_CHANNELS: usize = 3;

pub const RED: usize = 0;
pub const GREEN: usize = 1;
pub const BLUE: usize = 2;
pub const ALPHA: usize = 3;

/// Color that fully transparent pixels composite onto.
pub const BACKGROUND: [u8; 3] = [0, 0, 0];

/// Alpha value of a fully opaque pixel.
pub const OPAQUE: u8 = 255;

/// Luminance weights for R, G, B.
///
/// These are the simple NTSC weights applied directly to gamma-encoded
/// bytes, not a colorimetric conversion.
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Weighted luminance of an RGB triple in the input's own scale.
#[inline]
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
}

/// Luminance of a byte triple, rounded to the nearest byte.
#[inline]
pub fn intensity(r: u8, g: u8, b: u8) -> u8 {
    luminance(r as f64, g as f64, b as f64)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Composite a single RGBA pixel over [`BACKGROUND`].
///
/// Undoes premultiplication: each channel becomes
/// `floor(channel * 255 / alpha)`, clamped to a byte. A zero alpha yields
/// the background color.
pub fn composite_over_black(rgba: [u8; 4]) -> [u8; 3] {
    let alpha = rgba[ALPHA];
    if alpha == 0 {
        return BACKGROUND;
    }

    let scale = 255.0_f32 / alpha as f32;
    let mut rgb = [0u8; 3];
    for (out, &c) in rgb.iter_mut().zip(&rgba[..COLOR_CHANNELS]) {
        *out = (c as f32 * scale).floor().clamp(0.0, 255.0) as u8;
    }
    rgb
}

/// An owned 32-bit RGBA image.
///
/// Invariant: `pixels.len() == width * height * 4`. Dimension changes go
/// through a single internal swap so no half-resized state is observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Create an all-black, fully transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    /// Create a raster with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap an existing RGBA byte vector.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::BufferSize`] when the vector length is not
    /// `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected {
            return Err(RasterError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw RGBA bytes, row-major, top row first.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Whether signed coordinates fall inside the raster.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} raster",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// The four channels of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the raster.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.pixels[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    #[inline]
    pub fn channel(&self, x: u32, y: u32, channel: usize) -> u8 {
        assert!(channel < CHANNELS, "channel {channel} out of range");
        self.pixels[self.offset(x, y) + channel]
    }

    #[inline]
    pub fn set_channel(&mut self, x: u32, y: u32, channel: usize, value: u8) {
        assert!(channel < CHANNELS, "channel {channel} out of range");
        let i = self.offset(x, y);
        self.pixels[i + channel] = value;
    }

    /// Set R, G and B of a pixel to the same value, leaving alpha alone.
    #[inline]
    pub fn set_gray(&mut self, x: u32, y: u32, value: u8) {
        let i = self.offset(x, y);
        self.pixels[i..i + COLOR_CHANNELS].fill(value);
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Mutable per-pixel slices of length 4, row-major.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        self.pixels.chunks_exact_mut(CHANNELS)
    }

    /// Swap in a buffer of new dimensions.
    pub(crate) fn replace(&mut self, replacement: Raster) {
        *self = replacement;
    }

    /// RGB copy composited over a black background, three bytes per pixel.
    ///
    /// The source is not modified.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.len() * COLOR_CHANNELS);
        for px in self.pixels() {
            rgb.extend_from_slice(&composite_over_black(px));
        }
        rgb
    }

    /// Copy of this raster with the row order flipped top to bottom.
    pub fn reverse_rows(&self) -> Raster {
        let row_len = self.width as usize * CHANNELS;
        let mut pixels = Vec::with_capacity(self.pixels.len());
        if row_len > 0 {
            for row in self.pixels.chunks_exact(row_len).rev() {
                pixels.extend_from_slice(row);
            }
        }
        Raster {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Zero every byte, alpha included.
    pub fn clear_to_black(&mut self) {
        self.pixels.fill(0);
    }

    /// Replace R, G and B with the rounded luminance; alpha is untouched.
    pub fn to_grayscale(&mut self) {
        for px in self.pixels_mut() {
            let value = intensity(px[RED], px[GREEN], px[BLUE]);
            px[..COLOR_CHANNELS].fill(value);
        }
    }
}
