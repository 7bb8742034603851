//! Color histogram for popularity quantization.

use crate::raster::{Raster, BLUE, GREEN, RED};

/// Quantization step applied before counting (32 levels per channel).
pub const LEVEL_STEP: u8 = 8;

/// One bucket per 5-bit-per-channel color.
pub const BUCKET_COUNT: usize = 32 * 32 * 32;

/// One histogram bucket: how often its color occurred, plus the color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistogramEntry {
    pub count: u32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HistogramEntry {
    #[inline]
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Occurrence counts keyed by quantized color.
#[derive(Debug, Clone)]
pub struct Histogram {
    buckets: Vec<HistogramEntry>,
}

impl Histogram {
    /// Bucket key of a color: `(r/8)*1024 + (g/8)*32 + b/8`.
    #[inline]
    pub fn bucket_index(r: u8, g: u8, b: u8) -> usize {
        let step = LEVEL_STEP as usize;
        (r as usize / step) * 1024 + (g as usize / step) * 32 + b as usize / step
    }

    /// Count every pixel of `raster`. Each bucket keeps the last color
    /// that landed in it as its representative.
    pub fn from_raster(raster: &Raster) -> Self {
        let mut buckets = vec![HistogramEntry::default(); BUCKET_COUNT];
        for px in raster.pixels() {
            let (r, g, b) = (px[RED], px[GREEN], px[BLUE]);
            let entry = &mut buckets[Self::bucket_index(r, g, b)];
            entry.count += 1;
            entry.r = r;
            entry.g = g;
            entry.b = b;
        }
        Self { buckets }
    }

    #[inline]
    pub fn entry(&self, index: usize) -> HistogramEntry {
        self.buckets[index]
    }

    /// Number of buckets that saw at least one pixel.
    pub fn occupied(&self) -> usize {
        self.buckets.iter().filter(|e| e.count > 0).count()
    }

    /// The `size` most frequent colors, most frequent first.
    ///
    /// Buckets are stable-sorted by ascending count and read from the top,
    /// so among equal counts the higher bucket index comes first. Empty
    /// buckets never enter the palette.
    pub fn into_palette(mut self, size: usize) -> Vec<[u8; 3]> {
        self.buckets.sort_by_key(|e| e.count);
        self.buckets
            .iter()
            .rev()
            .take_while(|e| e.count > 0)
            .take(size)
            .map(HistogramEntry::rgb)
            .collect()
    }
}

/// Index of the palette color nearest to `rgb` by squared Euclidean
/// distance. Ties keep the earliest entry.
///
/// # Panics
///
/// Panics if `palette` is empty.
pub fn nearest(palette: &[[u8; 3]], rgb: [u8; 3]) -> usize {
    let distance = |p: &[u8; 3]| -> i32 {
        p.iter()
            .zip(rgb.iter())
            .map(|(&a, &b)| {
                let d = a as i32 - b as i32;
                d * d
            })
            .sum()
    };

    let mut best = 0;
    let mut best_distance = distance(&palette[0]);
    for (i, candidate) in palette.iter().enumerate().skip(1) {
        let d = distance(candidate);
        if d < best_distance {
            best = i;
            best_distance = d;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_index() {
        assert_eq!(Histogram::bucket_index(0, 0, 0), 0);
        assert_eq!(Histogram::bucket_index(8, 0, 0), 1024);
        assert_eq!(Histogram::bucket_index(0, 8, 0), 32);
        assert_eq!(Histogram::bucket_index(0, 0, 8), 1);
        assert_eq!(Histogram::bucket_index(255, 255, 255), BUCKET_COUNT - 1);
    }

    #[test]
    fn test_counts_and_representative() {
        let mut raster = Raster::filled(3, 1, [16, 24, 32, 255]);
        raster.set_pixel(2, 0, [0, 0, 0, 255]);
        let histogram = Histogram::from_raster(&raster);

        let entry = histogram.entry(Histogram::bucket_index(16, 24, 32));
        assert_eq!(entry.count, 2);
        assert_eq!(entry.rgb(), [16, 24, 32]);
        assert_eq!(histogram.entry(0).count, 1);
        assert_eq!(histogram.occupied(), 2);
    }

    #[test]
    fn test_palette_ordered_by_popularity() {
        let mut raster = Raster::filled(4, 1, [8, 8, 8, 255]);
        raster.set_pixel(0, 0, [248, 0, 0, 255]);
        let palette = Histogram::from_raster(&raster).into_palette(256);
        assert_eq!(palette, vec![[8, 8, 8], [248, 0, 0]]);
    }

    #[test]
    fn test_palette_ties_prefer_higher_bucket() {
        let mut raster = Raster::filled(2, 1, [0, 0, 8, 255]);
        raster.set_pixel(1, 0, [8, 0, 0, 255]);
        let palette = Histogram::from_raster(&raster).into_palette(256);
        assert_eq!(palette, vec![[8, 0, 0], [0, 0, 8]]);
    }

    #[test]
    fn test_palette_truncates() {
        let mut raster = Raster::new(4, 1);
        for x in 0..4 {
            raster.set_pixel(x, 0, [(x * 8) as u8, 0, 0, 255]);
        }
        let palette = Histogram::from_raster(&raster).into_palette(2);
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_nearest_strict_tie_keeps_first() {
        let palette = [[0, 0, 0], [10, 0, 0], [0, 10, 0]];
        assert_eq!(nearest(&palette, [5, 0, 0]), 0);
        assert_eq!(nearest(&palette, [6, 0, 0]), 1);
        assert_eq!(nearest(&palette, [5, 5, 0]), 0);
        assert_eq!(nearest(&palette, [0, 9, 0]), 2);
    }
}
