//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use raster_ops::Raster;

/// Assert every pixel's R, G and B is 0 or 255 and the three agree
pub fn assert_binary(raster: &Raster) {
    for (i, px) in raster.pixels().enumerate() {
        assert!(
            (px[0] == 0 || px[0] == 255) && px[0] == px[1] && px[1] == px[2],
            "pixel {i} is not black or white: {px:?}"
        );
    }
}

/// Assert two rasters match, reporting dimensions first
pub fn assert_same_raster(actual: &Raster, expected: &Raster) {
    assert_eq!(actual.dimensions(), expected.dimensions(), "dimensions differ");
    assert_eq!(actual.as_bytes(), expected.as_bytes(), "pixel data differs");
}
