//! SwatchColor type — the color value carried by both pickers.
//!
//! Stores straight (non-premultiplied) RGBA as 8-bit channels so that a color
//! read back from a hit raster compares exactly equal to the color that was
//! painted into it.

use floem::peniko::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 8-bit RGBA color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwatchColor {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl SwatchColor {
    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    /// Red component.
    pub fn r(&self) -> u8 {
        self.r
    }
    /// Green component.
    pub fn g(&self) -> u8 {
        self.g
    }
    /// Blue component.
    pub fn b(&self) -> u8 {
        self.b
    }
    /// Alpha component (0 = transparent, 255 = opaque).
    pub fn a(&self) -> u8 {
        self.a
    }
}

impl SwatchColor {
    /// Create from 0–255 RGBA values.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 0–255 RGB values with full opacity.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// A uniformly random opaque color.
    pub fn random_opaque<R: Rng>(rng: &mut R) -> Self {
        Self::from_rgb(rng.random(), rng.random(), rng.random())
    }

    /// Same RGB with the alpha channel bitwise-masked by `mask`.
    ///
    /// `with_alpha_mask(0x7f)` on an opaque color gives the ~50% halo tint.
    pub fn with_alpha_mask(self, mask: u8) -> Self {
        Self {
            a: self.a & mask,
            ..self
        }
    }

    pub fn is_transparent(&self) -> bool {
        *self == Self::TRANSPARENT
    }

    /// Channels as `[r, g, b, a]`, the byte order of an RGBA8 raster.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex string (with or without `#`, 3, 6, or 8 chars).
    ///
    /// 8-char hex is interpreted as RRGGBBAA. 3 and 6-char hex default to full opacity.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim_start_matches('#');
        if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&stripped[range], 16).ok();
        match stripped.len() {
            3 => {
                let r = byte(0..1)?;
                let g = byte(1..2)?;
                let b = byte(2..3)?;
                Some(Self::from_rgb(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::from_rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Some(Self::from_rgba8(
                byte(0..2)?,
                byte(2..4)?,
                byte(4..6)?,
                byte(6..8)?,
            )),
            _ => None,
        }
    }

    /// Format as uppercase hex (no `#` prefix).
    ///
    /// Returns 6 chars (RRGGBB) for opaque colors, 8 chars (RRGGBBAA) otherwise.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Convert for painting through the floem renderer.
    pub fn to_peniko(self) -> Color {
        Color::rgba8(self.r, self.g, self.b, self.a)
    }
}

/// `count` random opaque colors, reproducible when `seed` is given.
pub(crate) fn random_palette(count: usize, seed: Option<u64>) -> Vec<SwatchColor> {
    match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..count).map(|_| SwatchColor::random_opaque(&mut rng)).collect()
        }
        None => {
            let mut rng = rand::rng();
            (0..count).map(|_| SwatchColor::random_opaque(&mut rng)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_opaque() {
        let c = SwatchColor::from_hex("#3B82F6").unwrap();
        assert_eq!(c, SwatchColor::from_rgb(0x3B, 0x82, 0xF6));
        assert_eq!(c.to_hex(), "3B82F6");
    }

    #[test]
    fn test_hex_shorthand_and_alpha() {
        assert_eq!(
            SwatchColor::from_hex("f0a"),
            Some(SwatchColor::from_rgb(0xFF, 0x00, 0xAA))
        );
        let c = SwatchColor::from_hex("11223380").unwrap();
        assert_eq!(c.a(), 0x80);
        assert_eq!(c.to_hex(), "11223380");
        assert_eq!(SwatchColor::from_hex("12345"), None);
        assert_eq!(SwatchColor::from_hex("zzzzzz"), None);
    }

    #[test]
    fn test_alpha_mask() {
        let halo = SwatchColor::from_rgb(200, 100, 50).with_alpha_mask(0x7f);
        assert_eq!(halo, SwatchColor::from_rgba8(200, 100, 50, 0x7f));
        assert!(SwatchColor::TRANSPARENT.is_transparent());
        assert!(!SwatchColor::BLACK.is_transparent());
    }

    #[test]
    fn test_random_is_opaque_and_seeded() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            let ca = SwatchColor::random_opaque(&mut a);
            assert_eq!(ca.a(), 255);
            assert_eq!(ca, SwatchColor::random_opaque(&mut b));
        }
        assert_eq!(random_palette(5, Some(3)), random_palette(5, Some(3)));
        assert_eq!(random_palette(8, None).len(), 8);
    }
}
