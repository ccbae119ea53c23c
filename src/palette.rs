//! Icon color palette & helpers.
//! Single source of truth for the brand colors drawn into every icon.

use std::fmt;

use serde::Deserialize;

/// 8-bit sRGB color, written as `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(pub [u8; 3]);

impl HexColor {
    pub const WHITE: HexColor = HexColor([255, 255, 255]);
    pub const BLACK: HexColor = HexColor([0, 0, 0]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn parse(s: &str) -> Result<Self, String> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid hex color '{s}' (expected #rrggbb)"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("invalid hex color '{s}': {e}"))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Linear blend toward `other`; `t = 0` is `self`, `t = 1` is `other`.
    /// Each channel is rounded to the nearest integer.
    #[inline]
    pub fn lerp(self, other: HexColor, t: f32) -> HexColor {
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t).round() as u8;
        HexColor([
            mix(self.0[0], other.0[0]),
            mix(self.0[1], other.0[1]),
            mix(self.0[2], other.0[2]),
        ])
    }

    pub fn to_rgb(self) -> image::Rgb<u8> {
        image::Rgb(self.0)
    }

    /// RGBA pixel carrying `alpha` (0..=255) for blending onto a canvas.
    pub fn with_alpha(self, alpha: u8) -> image::Rgba<u8> {
        let [r, g, b] = self.0;
        image::Rgba([r, g, b, alpha])
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

// Brand palette (Bootstrap primary + violet gradient).
pub const PRIMARY: HexColor = HexColor::rgb(0x0d, 0x6e, 0xfd);
pub const SECONDARY: HexColor = HexColor::rgb(0x6c, 0x75, 0x7d);
pub const SUCCESS: HexColor = HexColor::rgb(0x19, 0x87, 0x54);
pub const GRADIENT_START: HexColor = HexColor::rgb(0x66, 0x7e, 0xea);
pub const GRADIENT_END: HexColor = HexColor::rgb(0x76, 0x4b, 0xa2);

/// Named colors used by the renderer.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub primary: HexColor,
    pub secondary: HexColor,
    pub success: HexColor,
    pub gradient_start: HexColor,
    pub gradient_end: HexColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: PRIMARY,
            secondary: SECONDARY,
            success: SUCCESS,
            gradient_start: GRADIENT_START,
            gradient_end: GRADIENT_END,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let c = HexColor::parse("#0d6efd").unwrap();
        assert_eq!(c, PRIMARY);
        assert_eq!(c.to_string(), "#0d6efd");
        assert_eq!(HexColor::parse("FFFFFF").unwrap(), HexColor::WHITE);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(HexColor::parse("#12345").is_err());
        assert!(HexColor::parse("#zz0000").is_err());
        assert!(HexColor::parse("#ééé").is_err());
        // from_str_radix alone would take the sign
        assert!(HexColor::parse("#+f+f+f").is_err());
        assert!(HexColor::parse("#-1ff00").is_err());
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = HexColor::rgb(0, 100, 255);
        let b = HexColor::rgb(255, 0, 1);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        // 127.5 rounds away from zero, 50 exact, 128 exact
        assert_eq!(a.lerp(b, 0.5), HexColor::rgb(128, 50, 128));
    }

    #[test]
    fn all_colors_distinct() {
        let p = Palette::default();
        let colors = [p.primary, p.secondary, p.success, p.gradient_start, p.gradient_end];
        for (i, c1) in colors.iter().enumerate() {
            for (j, c2) in colors.iter().enumerate() {
                if i != j {
                    assert_ne!(c1, c2, "palette contains duplicate colors at {i} and {j}");
                }
            }
        }
    }
}
