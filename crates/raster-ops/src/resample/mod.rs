//! Half-size, double-size and rotation.
//!
//! All three read the color channels into a scratch [`Grid`], compute the
//! destination pixels, and swap the result into the raster in one step.
//! Taps that fall outside the source are skipped and the sum is still
//! divided by the full normalizer.

mod phase;

pub use phase::{
    phase_kernel, PhaseKernel, EVEN_EVEN, EVEN_ODD, ODD_EVEN, ODD_ODD, PHASE_NORMALIZER,
};

use crate::raster::{Grid, Raster, ALPHA, COLOR_CHANNELS, OPAQUE};

/// 3x3 binomial used for down-sampling.
pub const HALF_KERNEL: [[u32; 3]; 3] = [[4, 8, 4], [8, 16, 8], [4, 8, 4]];
pub const HALF_NORMALIZER: u32 = 64;

fn color_grid(raster: &Raster) -> Grid<u32> {
    Grid::from_raster(raster, u32::from)
}

impl Raster {
    /// Halve both dimensions (integer division).
    ///
    /// Destination `(i, j)` is the 3x3 binomial average centered on source
    /// `(2i, 2j)`. Alpha is copied from that source pixel.
    pub fn half_size(&mut self) {
        let source = color_grid(self);
        let (width, height) = (self.width() / 2, self.height() / 2);
        let mut out = Raster::new(width, height);

        for j in 0..height {
            for i in 0..width {
                let (cx, cy) = (2 * i as i64, 2 * j as i64);
                let mut px = [0u8; 4];
                for (c, value) in px.iter_mut().enumerate().take(COLOR_CHANNELS) {
                    let mut sum = 0u32;
                    for (kx, column) in HALF_KERNEL.iter().enumerate() {
                        for (ky, &weight) in column.iter().enumerate() {
                            let sx = cx + kx as i64 - 1;
                            let sy = cy + ky as i64 - 1;
                            if let Some(v) = source.get_checked(sx, sy, c) {
                                sum += weight * v;
                            }
                        }
                    }
                    *value = (sum / HALF_NORMALIZER) as u8;
                }
                px[ALPHA] = self.channel(2 * i, 2 * j, ALPHA);
                out.set_pixel(i, j, px);
            }
        }

        tracing::debug!(width, height, "half size");
        self.replace(out);
    }

    /// Double both dimensions with the parity-selected phase kernels.
    ///
    /// Destination `(i, j)` samples around source `(i / 2, j / 2)`. Every
    /// output pixel is fully opaque.
    pub fn double_size(&mut self) {
        let source = color_grid(self);
        let (width, height) = (self.width() * 2, self.height() * 2);
        let mut out = Raster::new(width, height);

        for j in 0..height as usize {
            for i in 0..width as usize {
                let kernel = phase_kernel(i, j);
                let (bx, by) = ((i / 2) as i64, (j / 2) as i64);
                let mut px = [0, 0, 0, OPAQUE];
                for (c, value) in px.iter_mut().enumerate().take(COLOR_CHANNELS) {
                    *value = phase::sample(&source, kernel, c, |dx, dy| (bx + dx, by + dy));
                }
                out.set_pixel(i as u32, j as u32, px);
            }
        }

        tracing::debug!(width, height, "double size");
        self.replace(out);
    }

    /// Rotate clockwise by `degrees` about the image center, keeping the
    /// dimensions.
    ///
    /// Each destination pixel is mapped back through the inverse rotation
    /// and resampled with the same parity-selected kernels as
    /// [`Raster::double_size`]; source coordinates are truncated toward
    /// zero per tap. Pixels whose taps all miss the image become black.
    /// Alpha is left as it was.
    pub fn rotate(&mut self, degrees: f32) {
        let source = color_grid(self);
        let width = self.width() as usize;
        let height = self.height() as usize;
        let (sin, cos) = (-(degrees as f64).to_radians()).sin_cos();
        let (half_w, half_h) = ((width / 2) as f64, (height / 2) as f64);
        let mut rotated = Grid::<u8>::new(width, height, COLOR_CHANNELS);

        for j in 0..height {
            for i in 0..width {
                let ox = i as f64 - half_w;
                let oy = j as f64 - half_h;
                let fx = ox * cos - oy * sin + half_w;
                let fy = ox * sin + oy * cos + half_h;
                let kernel = phase_kernel(i, j);
                for c in 0..COLOR_CHANNELS {
                    let value = phase::sample(&source, kernel, c, |dx, dy| {
                        ((fx + dx as f64) as i64, (fy + dy as f64) as i64)
                    });
                    rotated.set(i, j, c, value);
                }
            }
        }

        for j in 0..height {
            for i in 0..width {
                for c in 0..COLOR_CHANNELS {
                    self.set_channel(i as u32, j as u32, c, rotated.get(i, j, c));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_size_dimensions() {
        let mut raster = Raster::filled(7, 5, [10, 10, 10, 255]);
        raster.half_size();
        assert_eq!(raster.dimensions(), (3, 2));
        assert_eq!(raster.len(), 3 * 2 * 4);
    }

    #[test]
    fn test_half_size_uniform_interior() {
        let mut raster = Raster::filled(8, 8, [200, 100, 40, 90]);
        raster.half_size();
        assert_eq!(raster.pixel(2, 2), [200, 100, 40, 90]);
        // Top-left taps at -1 are skipped: 36 of 64 remain
        assert_eq!(raster.pixel(0, 0), [112, 56, 22, 90]);
    }

    #[test]
    fn test_half_size_of_tiny_image_is_empty() {
        let mut raster = Raster::filled(1, 3, [1, 2, 3, 4]);
        raster.half_size();
        assert_eq!(raster.dimensions(), (0, 1));
        assert!(raster.is_empty());
    }

    #[test]
    fn test_double_size_dimensions_and_alpha() {
        let mut raster = Raster::filled(3, 2, [50, 60, 70, 10]);
        raster.double_size();
        assert_eq!(raster.dimensions(), (6, 4));
        assert!(raster.pixels().all(|px| px[ALPHA] == OPAQUE));
    }

    #[test]
    fn test_double_size_uniform_interior() {
        let mut raster = Raster::filled(6, 6, [90, 30, 150, 255]);
        raster.double_size();
        for y in 2..=8 {
            for x in 2..=8 {
                assert_eq!(raster.pixel(x, y), [90, 30, 150, 255], "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_half_then_double_keeps_interior() {
        let mut raster = Raster::filled(16, 16, [120, 80, 200, 255]);
        raster.half_size();
        raster.double_size();
        assert_eq!(raster.dimensions(), (16, 16));
        for y in 5..=11 {
            for x in 5..=11 {
                assert_eq!(raster.pixel(x, y), [120, 80, 200, 255], "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_rotate_zero_keeps_uniform_interior() {
        let mut raster = Raster::filled(8, 8, [70, 140, 210, 33]);
        raster.rotate(0.0);
        assert_eq!(raster.dimensions(), (8, 8));
        for y in 1..=5 {
            for x in 1..=5 {
                assert_eq!(raster.pixel(x, y), [70, 140, 210, 33]);
            }
        }
    }

    #[test]
    fn test_rotate_keeps_alpha() {
        let mut raster = Raster::filled(5, 4, [255, 255, 255, 17]);
        raster.rotate(45.0);
        assert!(raster.pixels().all(|px| px[ALPHA] == 17));
    }

    #[test]
    fn test_rotate_source_outside_is_black() {
        // A quarter turn of a wide strip maps its ends far outside the
        // two-row source
        let mut raster = Raster::filled(20, 2, [255, 255, 255, 255]);
        raster.rotate(90.0);
        assert_eq!(raster.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(raster.pixel(19, 1), [0, 0, 0, 255]);
    }

    #[test]
    fn test_double_size_phase_orientation() {
        let mut raster = Raster::from_rgba(
            2,
            2,
            vec![
                0, 0, 0, 255, 64, 64, 64, 255, //
                128, 128, 128, 255, 192, 192, 192, 255,
            ],
        )
        .unwrap();
        raster.double_size();
        // Odd x, even y: 12 * 64 + 6 * 128 + 6 * 192 over 64
        assert_eq!(raster.pixel(1, 0), [42, 42, 42, 255]);
        // Even x, odd y: 6 * 64 + 12 * 128 + 6 * 192 over 64
        assert_eq!(raster.pixel(0, 1), [48, 48, 48, 255]);
        assert_eq!(raster.pixel(0, 0), [36, 36, 36, 255]);
    }

    #[test]
    fn test_rotate_quarter_turn_is_clockwise() {
        let mut raster = Raster::filled(16, 16, [0, 0, 0, 255]);
        for y in 0..4 {
            for x in 0..16 {
                raster.set_pixel(x, y, [255, 255, 255, 255]);
            }
        }
        raster.rotate(90.0);
        // The top band ends up along the right edge
        for y in 4..=12 {
            assert!(raster.channel(14, y, 0) > 200, "at (14, {y})");
            assert_eq!(raster.pixel(2, y), [0, 0, 0, 255], "at (2, {y})");
        }
        assert_eq!(raster.pixel(8, 0), [0, 0, 0, 255]);
        assert_eq!(raster.pixel(8, 1), [0, 0, 0, 255]);
    }
}
