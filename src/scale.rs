//! Position and color scales.
//!
//! `BandScale` maps dense row/column indices to contiguous, equal-width
//! pixel bands. `ColorScale` maps data values to colors by piecewise-linear
//! interpolation over nine evenly spaced domain knots and a nine-swatch
//! palette; out-of-range values clamp to the end swatches.

use crate::colormap::{swatches, Rgb, Swatches, SWATCH_COUNT};

/// Nine evenly spaced values spanning `[start, end]`.
#[allow(clippy::cast_precision_loss)]
pub fn knots(start: f64, end: f64) -> [f64; SWATCH_COUNT] {
    let mut out = [0.0; SWATCH_COUNT];
    let step = (end - start) / (SWATCH_COUNT as f64 - 1.0);
    for (i, v) in out.iter_mut().enumerate() {
        *v = start + step * i as f64;
    }
    out
}

/// Ordinal scale: index -> pixel offset of a uniform band, zero padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    band: f64,
    len: usize,
}

impl BandScale {
    pub fn new(band: f64, len: usize) -> Self {
        Self { band, len }
    }

    /// Pixel offset of band `index`'s leading edge.
    #[allow(clippy::cast_precision_loss)]
    pub fn position(&self, index: usize) -> f64 {
        index as f64 * self.band
    }

    /// Uniform band width.
    pub fn band(&self) -> f64 {
        self.band
    }

    /// Total pixel extent covered by all bands.
    #[allow(clippy::cast_precision_loss)]
    pub fn span(&self) -> f64 {
        self.len as f64 * self.band
    }
}

/// Continuous value -> color scale over nine knots and nine swatches.
///
/// The domain and range are deliberately independent: contrast zoom rewrites
/// only the domain, palette cycling rewrites only the range, so the two
/// adjustments compose without resetting each other.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    domain: [f64; SWATCH_COUNT],
    range: Swatches,
}

impl ColorScale {
    /// Scale spanning `[zmin, zmax]` against the named palette.
    pub fn new(zmin: f64, zmax: f64, palette: &str) -> Self {
        Self {
            domain: knots(zmin, zmax),
            range: swatches(palette),
        }
    }

    /// Rewrite the domain for a contrast zoom scalar.
    ///
    /// Positive `scale` narrows the effective range around the data's center
    /// (more contrast); negative widens it. The caller clamps `scale` so the
    /// domain stays monotonic.
    pub fn set_contrast(&mut self, zmin: f64, zmax: f64, scale: f64) {
        let extent = zmax - zmin;
        self.domain = knots(zmin + extent * scale, zmax - extent * scale);
    }

    /// Swap the range to the named palette. The domain is untouched.
    pub fn set_palette(&mut self, name: &str) {
        self.range = swatches(name);
    }

    pub fn domain(&self) -> &[f64; SWATCH_COUNT] {
        &self.domain
    }

    /// Map a value to a color, clamping outside the domain.
    pub fn color(&self, z: f64) -> Rgb {
        let first = self.range.first().copied().unwrap_or_default();
        let last = self.range.last().copied().unwrap_or_default();
        match (self.domain.first(), self.domain.last()) {
            (Some(&lo), Some(&hi)) => {
                if z <= lo {
                    return first;
                }
                if z >= hi {
                    return last;
                }
            }
            _ => return first,
        }
        for (seg, colors) in self.domain.windows(2).zip(self.range.windows(2)) {
            if let ([d0, d1], [c0, c1]) = (seg, colors) {
                if z >= *d0 && z <= *d1 {
                    let t = if d1 > d0 { (z - d0) / (d1 - d0) } else { 0.0 };
                    return c0.blend(*c1, t);
                }
            }
        }
        last
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::colormap::DEFAULT_PALETTE;

    #[test]
    fn test_knots_are_evenly_spaced() {
        let k = knots(0.0, 8.0);
        assert_eq!(k, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_band_positions() {
        let s = BandScale::new(100.0, 2);
        assert_eq!(s.position(0), 0.0);
        assert_eq!(s.position(1), 100.0);
        assert_eq!(s.band(), 100.0);
        assert_eq!(s.span(), 200.0);
    }

    #[test]
    fn test_extremes_map_to_end_swatches() {
        let ramp = swatches(DEFAULT_PALETTE);
        let scale = ColorScale::new(1.0, 4.0, DEFAULT_PALETTE);
        assert_eq!(scale.color(1.0), ramp[0]);
        assert_eq!(scale.color(4.0), ramp[8]);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let ramp = swatches(DEFAULT_PALETTE);
        let scale = ColorScale::new(0.0, 10.0, DEFAULT_PALETTE);
        assert_eq!(scale.color(-5.0), ramp[0]);
        assert_eq!(scale.color(50.0), ramp[8]);
    }

    #[test]
    fn test_knot_values_map_to_their_swatch() {
        let ramp = swatches(DEFAULT_PALETTE);
        let scale = ColorScale::new(0.0, 8.0, DEFAULT_PALETTE);
        for (i, swatch) in ramp.iter().enumerate() {
            assert_eq!(scale.color(i as f64), *swatch);
        }
    }

    #[test]
    fn test_midsegment_interpolates() {
        let ramp = swatches(DEFAULT_PALETTE);
        let scale = ColorScale::new(0.0, 8.0, DEFAULT_PALETTE);
        assert_eq!(scale.color(0.5), ramp[0].blend(ramp[1], 0.5));
    }

    #[test]
    fn test_palette_swap_keeps_domain() {
        let mut scale = ColorScale::new(0.0, 8.0, "Purples");
        let before = *scale.domain();
        scale.set_palette("Reds");
        assert_eq!(*scale.domain(), before);
        assert_eq!(scale.color(8.0), swatches("Reds")[8]);
    }

    #[test]
    fn test_contrast_widens_and_narrows() {
        let mut scale = ColorScale::new(0.0, 10.0, DEFAULT_PALETTE);
        scale.set_contrast(0.0, 10.0, 0.4);
        assert_eq!(scale.domain()[0], 4.0);
        assert_eq!(scale.domain()[8], 6.0);
        scale.set_contrast(0.0, 10.0, -1.0);
        assert_eq!(scale.domain()[0], -10.0);
        assert_eq!(scale.domain()[8], 20.0);
    }

    #[test]
    fn test_degenerate_domain_does_not_panic() {
        let scale = ColorScale::new(5.0, 5.0, DEFAULT_PALETTE);
        let ramp = swatches(DEFAULT_PALETTE);
        assert_eq!(scale.color(5.0), ramp[0]);
        assert_eq!(scale.color(6.0), ramp[8]);
    }
}
