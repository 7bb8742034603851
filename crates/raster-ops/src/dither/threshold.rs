//! Point-wise thresholding dithers: fixed, random and brightness-preserving.

use rand::Rng;

use crate::raster::{intensity, Raster, BLUE, GREEN, RED};

use super::{BLACK, WHITE};

/// Luminance cutoff for [`Raster::dither_threshold`] and the random dither.
pub const MIDPOINT: u8 = 127;

/// Noise range added by [`Raster::dither_random`].
pub const NOISE_MIN: i32 = -51;
pub const NOISE_MAX: i32 = 50;

impl Raster {
    /// Binary threshold: luminance `>= 127` becomes white, otherwise black.
    pub fn dither_threshold(&mut self) {
        for px in self.pixels_mut() {
            let value = if intensity(px[RED], px[GREEN], px[BLUE]) >= MIDPOINT {
                WHITE
            } else {
                BLACK
            };
            px[..3].fill(value);
        }
    }

    /// Random dither with a thread-local RNG. See [`Raster::dither_random_with`].
    pub fn dither_random(&mut self) {
        self.dither_random_with(&mut rand::thread_rng());
    }

    /// Random dither: convert to grayscale, add uniform noise in
    /// `[-51, 50]` per pixel and threshold strictly above 127.
    pub fn dither_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.to_grayscale();
        for px in self.pixels_mut() {
            let noise = rng.gen_range(NOISE_MIN..=NOISE_MAX);
            let value = if px[RED] as i32 + noise > MIDPOINT as i32 {
                WHITE
            } else {
                BLACK
            };
            px[..3].fill(value);
        }
    }

    /// Brightness-preserving threshold.
    ///
    /// The cutoff is the intensity at rank `N * (255 - mean) / 255` of the
    /// sorted intensities, so the share of white pixels tracks the mean
    /// brightness. A black image (rank `N`) stays black.
    pub fn dither_bright(&mut self) {
        let intensities: Vec<u8> = self
            .pixels()
            .map(|px| intensity(px[RED], px[GREEN], px[BLUE]))
            .collect();
        let count = intensities.len();
        if count == 0 {
            return;
        }

        let sum: u64 = intensities.iter().map(|&v| v as u64).sum();
        let mean = sum / count as u64;

        let mut sorted = intensities.clone();
        sorted.sort_unstable();
        let rank = count as u64 * (255 - mean) / 255;
        let threshold = sorted.get(rank as usize).copied();
        tracing::debug!(mean, ?threshold, "Brightness-preserving threshold");

        for (px, value) in self.pixels_mut().zip(intensities) {
            let out = match threshold {
                Some(t) if value >= t => WHITE,
                _ => BLACK,
            };
            px[..3].fill(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ALPHA;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gradient(width: u32, height: u32) -> Raster {
        let mut raster = Raster::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) * 255 / (width * height - 1)) as u8;
                raster.set_pixel(x, y, [v, v, v, 200]);
            }
        }
        raster
    }

    #[test]
    fn test_threshold_cutoff() {
        let mut raster = Raster::new(2, 1);
        raster.set_pixel(0, 0, [127, 127, 127, 1]);
        raster.set_pixel(1, 0, [126, 126, 126, 2]);
        raster.dither_threshold();
        assert_eq!(raster.pixel(0, 0), [255, 255, 255, 1]);
        assert_eq!(raster.pixel(1, 0), [0, 0, 0, 2]);
    }

    #[test]
    fn test_random_is_seedable() {
        let mut a = gradient(16, 16);
        let mut b = a.clone();
        a.dither_random_with(&mut StdRng::seed_from_u64(7));
        b.dither_random_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_extremes_survive_noise() {
        let mut raster = Raster::new(2, 1);
        raster.set_pixel(0, 0, [255, 255, 255, 255]);
        raster.set_pixel(1, 0, [0, 0, 0, 255]);
        raster.dither_random_with(&mut StdRng::seed_from_u64(1));
        assert_eq!(raster.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(raster.pixel(1, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_random_outputs_binary_and_keeps_alpha() {
        let mut raster = gradient(8, 8);
        raster.dither_random();
        for px in raster.pixels() {
            assert!(px[0] == 0 || px[0] == 255);
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[ALPHA], 200);
        }
    }

    #[test]
    fn test_bright_tracks_mean() {
        let mut raster = gradient(16, 16);
        raster.dither_bright();
        let white = raster.pixels().filter(|px| px[0] == 255).count();
        let ratio = white as f64 / 256.0;
        assert!((ratio - 0.5).abs() < 0.05, "white ratio {ratio}");
    }

    #[test]
    fn test_bright_black_image_stays_black() {
        let mut raster = Raster::filled(3, 3, [0, 0, 0, 255]);
        raster.dither_bright();
        assert!(raster.pixels().all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_bright_white_image_stays_white() {
        let mut raster = Raster::filled(3, 3, [255, 255, 255, 255]);
        raster.dither_bright();
        assert!(raster.pixels().all(|px| px == [255, 255, 255, 255]));
    }
}
