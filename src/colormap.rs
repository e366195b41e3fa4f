//! Color math and the built-in sequential palettes.
//!
//! Colors are handled as `Rgb` values internally and emitted as CSS
//! `rgba(...)` strings at the canvas boundary. The palettes are the
//! ColorBrewer 9-class sequential ramps; value-to-color interpolation over
//! them lives in [`crate::scale::ColorScale`].

/// Number of swatches per palette (and knots in the color domain).
pub const SWATCH_COUNT: usize = 9;

/// Palette cycling order for the horizontal arrow keys.
pub const PALETTE_NAMES: [&str; 6] = ["Purples", "Blues", "Greens", "Oranges", "Reds", "Greys"];

/// Palette used when none is named (or the name is unknown).
pub const DEFAULT_PALETTE: &str = "Purples";

/// RGB color with u8 components for efficient color manipulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Parse from a hex string (with or without #).
    /// Returns None if the format is invalid.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Convert to CSS hex string (#RRGGBB).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS `rgba(...)` string with the given alpha, clamped to [0, 1].
    pub fn rgba(self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }

    /// Linear blend toward `other`. `t` of 0.0 = self, 1.0 = other.
    pub fn blend(self, other: Self, t: f64) -> Self {
        Self {
            r: Self::blend_component(self.r, other.r, t),
            g: Self::blend_component(self.g, other.g, t),
            b: Self::blend_component(self.b, other.b, t),
        }
    }

    /// Blend a single color component toward a target.
    /// The cast is safe because we clamp to [0, 255] before converting.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn blend_component(from: u8, to: u8, t: f64) -> u8 {
        let from = f64::from(from);
        let to = f64::from(to);
        let blended = from + (to - from) * t.clamp(0.0, 1.0);
        blended.clamp(0.0, 255.0).round() as u8
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

/// One 9-swatch sequential ramp, light to dark.
pub type Swatches = [Rgb; SWATCH_COUNT];

const PURPLES: Swatches = [
    Rgb::new(0xFC, 0xFB, 0xFD),
    Rgb::new(0xEF, 0xED, 0xF5),
    Rgb::new(0xDA, 0xDA, 0xEB),
    Rgb::new(0xBC, 0xBD, 0xDC),
    Rgb::new(0x9E, 0x9A, 0xC8),
    Rgb::new(0x80, 0x7D, 0xBA),
    Rgb::new(0x6A, 0x51, 0xA3),
    Rgb::new(0x54, 0x27, 0x8F),
    Rgb::new(0x3F, 0x00, 0x7D),
];

const BLUES: Swatches = [
    Rgb::new(0xF7, 0xFB, 0xFF),
    Rgb::new(0xDE, 0xEB, 0xF7),
    Rgb::new(0xC6, 0xDB, 0xEF),
    Rgb::new(0x9E, 0xCA, 0xE1),
    Rgb::new(0x6B, 0xAE, 0xD6),
    Rgb::new(0x42, 0x92, 0xC6),
    Rgb::new(0x21, 0x71, 0xB5),
    Rgb::new(0x08, 0x51, 0x9C),
    Rgb::new(0x08, 0x30, 0x6B),
];

const GREENS: Swatches = [
    Rgb::new(0xF7, 0xFC, 0xF5),
    Rgb::new(0xE5, 0xF5, 0xE0),
    Rgb::new(0xC7, 0xE9, 0xC0),
    Rgb::new(0xA1, 0xD9, 0x9B),
    Rgb::new(0x74, 0xC4, 0x76),
    Rgb::new(0x41, 0xAB, 0x5D),
    Rgb::new(0x23, 0x8B, 0x45),
    Rgb::new(0x00, 0x6D, 0x2C),
    Rgb::new(0x00, 0x44, 0x1B),
];

const ORANGES: Swatches = [
    Rgb::new(0xFF, 0xF5, 0xEB),
    Rgb::new(0xFE, 0xE6, 0xCE),
    Rgb::new(0xFD, 0xD0, 0xA2),
    Rgb::new(0xFD, 0xAE, 0x6B),
    Rgb::new(0xFD, 0x8D, 0x3C),
    Rgb::new(0xF1, 0x69, 0x13),
    Rgb::new(0xD9, 0x48, 0x01),
    Rgb::new(0xA6, 0x36, 0x03),
    Rgb::new(0x7F, 0x27, 0x04),
];

const REDS: Swatches = [
    Rgb::new(0xFF, 0xF5, 0xF0),
    Rgb::new(0xFE, 0xE0, 0xD2),
    Rgb::new(0xFC, 0xBB, 0xA1),
    Rgb::new(0xFC, 0x92, 0x72),
    Rgb::new(0xFB, 0x6A, 0x4A),
    Rgb::new(0xEF, 0x3B, 0x2C),
    Rgb::new(0xCB, 0x18, 0x1D),
    Rgb::new(0xA5, 0x0F, 0x15),
    Rgb::new(0x67, 0x00, 0x0D),
];

const GREYS: Swatches = [
    Rgb::new(0xFF, 0xFF, 0xFF),
    Rgb::new(0xF0, 0xF0, 0xF0),
    Rgb::new(0xD9, 0xD9, 0xD9),
    Rgb::new(0xBD, 0xBD, 0xBD),
    Rgb::new(0x96, 0x96, 0x96),
    Rgb::new(0x73, 0x73, 0x73),
    Rgb::new(0x52, 0x52, 0x52),
    Rgb::new(0x25, 0x25, 0x25),
    Rgb::new(0x00, 0x00, 0x00),
];

/// Look up a palette by name. Unknown names fall back to the default ramp.
pub fn swatches(name: &str) -> Swatches {
    match name {
        "Blues" => BLUES,
        "Greens" => GREENS,
        "Oranges" => ORANGES,
        "Reds" => REDS,
        "Greys" => GREYS,
        _ => PURPLES,
    }
}

/// Index of a palette in the cycling order, if it is one of the built-ins.
pub fn palette_index(name: &str) -> Option<usize> {
    PALETTE_NAMES.iter().position(|&n| n == name)
}

/// Palette name at a cycling-order index, wrapping out-of-range indices.
pub fn palette_name(index: usize) -> &'static str {
    PALETTE_NAMES
        .get(index % PALETTE_NAMES.len())
        .copied()
        .unwrap_or(DEFAULT_PALETTE)
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

    #[test]
    fn test_from_hex_roundtrip() {
        let c = Rgb::from_hex("#6A51A3").unwrap();
        assert_eq!(c, Rgb::new(0x6A, 0x51, 0xA3));
        assert_eq!(c.to_hex(), "#6A51A3");
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(Rgb::from_hex("#FFF").is_none());
        assert!(Rgb::from_hex("not-a-color").is_none());
    }

    #[test]
    fn test_blend_midpoint() {
        let mid = Rgb::BLACK.blend(Rgb::WHITE, 0.5);
        assert_eq!(mid, Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(Rgb::BLACK.blend(Rgb::WHITE, 0.0), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.blend(Rgb::WHITE, 1.0), Rgb::WHITE);
    }

    #[test]
    fn test_rgba_clamps_alpha() {
        assert_eq!(Rgb::new(1, 2, 3).rgba(2.0), "rgba(1, 2, 3, 1)");
        assert_eq!(Rgb::new(1, 2, 3).rgba(0.2), "rgba(1, 2, 3, 0.2)");
    }

    #[test]
    fn test_unknown_palette_falls_back_to_default() {
        assert_eq!(swatches("Viridis"), swatches(DEFAULT_PALETTE));
    }

    #[test]
    fn test_palette_cycle_order() {
        assert_eq!(palette_index("Purples"), Some(0));
        assert_eq!(palette_index("Greys"), Some(5));
        assert_eq!(palette_name(6), "Purples");
    }

    #[test]
    fn test_ramps_run_light_to_dark() {
        for name in PALETTE_NAMES {
            let ramp = swatches(name);
            let lum = |c: Rgb| u32::from(c.r) + u32::from(c.g) + u32::from(c.b);
            assert!(lum(ramp[0]) > lum(ramp[8]), "{name} ramp not light-to-dark");
        }
    }
}
