#![forbid(unsafe_code)]

//! Packed RGBA colors and source-over blending.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A non-premultiplied RGBA color packed as `0xRRGGBBAA`.
///
/// Serializes as a CSS-style hex string (`"#rrggbbaa"`), and parses both the
/// 6-digit and 8-digit forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from 8-bit channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Color from 8-bit channels including alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    /// Color with a floating-point opacity in `[0, 1]`, as CSS `rgba()` takes it.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Whether the color has zero alpha.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    /// Composite `self` over `dst` (Porter-Duff source-over).
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        let sa = u32::from(self.a());
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        let da = u32::from(dst.a());
        // Alpha in 0..=255*255 fixed point.
        let out_a = sa * 255 + da * (255 - sa);
        if out_a == 0 {
            return Self::TRANSPARENT;
        }
        let channel = |s: u8, d: u8| -> u8 {
            let num = u32::from(s) * sa * 255 + u32::from(d) * da * (255 - sa);
            ((num + out_a / 2) / out_a) as u8
        };
        Self::rgba(
            channel(self.r(), dst.r()),
            channel(self.g(), dst.g()),
            channel(self.b(), dst.b()),
            ((out_a + 127) / 255) as u8,
        )
    }

    /// CSS color string suitable for a canvas `fillStyle`.
    #[must_use]
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r(),
            self.g(),
            self.b(),
            f32::from(self.a()) / 255.0
        )
    }
}

impl fmt::Display for PackedRgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color: {:?}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for PackedRgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let err = || ParseColorError(s.to_string());
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        match hex.len() {
            6 => u32::from_str_radix(hex, 16)
                .map(|v| Self((v << 8) | 0xFF))
                .map_err(|_| err()),
            8 => u32::from_str_radix(hex, 16).map(Self).map_err(|_| err()),
            _ => Err(err()),
        }
    }
}

impl From<PackedRgba> for String {
    fn from(color: PackedRgba) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for PackedRgba {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_round_trip_through_packing() {
        let c = PackedRgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
    }

    #[test]
    fn opaque_source_replaces_destination() {
        let red = PackedRgba::rgb(255, 0, 0);
        assert_eq!(red.over(PackedRgba::WHITE), red);
    }

    #[test]
    fn transparent_source_keeps_destination() {
        assert_eq!(
            PackedRgba::TRANSPARENT.over(PackedRgba::WHITE),
            PackedRgba::WHITE
        );
    }

    #[test]
    fn translucent_white_over_black_lightens() {
        let visor = PackedRgba::rgb(250, 250, 250).with_opacity(0.2);
        let out = visor.over(PackedRgba::BLACK);
        assert_eq!(out.a(), 255);
        assert_eq!(out.r(), 50);
        assert_eq!(out.r(), out.g());
    }

    #[test]
    fn translucent_over_transparent_keeps_source_color() {
        let visor = PackedRgba::rgba(250, 250, 250, 51);
        assert_eq!(visor.over(PackedRgba::TRANSPARENT), visor);
    }

    #[test]
    fn hex_parse_accepts_short_and_long_forms() {
        assert_eq!("#ffffff".parse::<PackedRgba>(), Ok(PackedRgba::WHITE));
        assert_eq!(
            "#fafafa33".parse::<PackedRgba>(),
            Ok(PackedRgba::rgba(250, 250, 250, 0x33))
        );
        assert!("#fff".parse::<PackedRgba>().is_err());
        assert!("#gggggg".parse::<PackedRgba>().is_err());
    }

    #[test]
    fn display_is_eight_digit_hex() {
        assert_eq!(PackedRgba::BLACK.to_string(), "#000000ff");
    }

    #[test]
    fn css_string_uses_unit_alpha() {
        assert_eq!(PackedRgba::WHITE.to_css(), "rgba(255, 255, 255, 1)");
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&PackedRgba::WHITE).unwrap();
        assert_eq!(json, "\"#ffffffff\"");
        let back: PackedRgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PackedRgba::WHITE);
    }
}
