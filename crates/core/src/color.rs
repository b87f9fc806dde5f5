use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PointCloudError, Result};

/// Per-point color: red, green, blue, alpha, each in `[0, 1]`.
pub type Rgba = [f32; 4];

/// An opaque RGB color with components in `[0, 1]`.
///
/// Parses from `#RRGGBB`, `#RGB` or one of the palette names
/// (case-insensitive), and serializes as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const GREY: Color = Color::new(0.533333, 0.533333, 0.533333);
    pub const RED: Color = Color::new(0.988235, 0.384314, 0.333333);
    pub const GREEN: Color = Color::new(0.513725, 0.756863, 0.403922);
    pub const BLUE: Color = Color::new(0.345098, 0.768627, 0.866667);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
    pub const ORANGE: Color = Color::new(1.0, 0.525490, 0.184314);
    pub const PURPLE: Color = Color::new(0.603922, 0.447059, 0.674510);
    pub const PINK: Color = Color::new(0.819608, 0.278431, 0.741176);
    pub const TEAL: Color = Color::new(0.360784, 0.815686, 0.701961);

    const PALETTE: [(&'static str, Color); 11] = [
        ("WHITE", Color::WHITE),
        ("BLACK", Color::BLACK),
        ("GREY", Color::GREY),
        ("RED", Color::RED),
        ("GREEN", Color::GREEN),
        ("BLUE", Color::BLUE),
        ("YELLOW", Color::YELLOW),
        ("ORANGE", Color::ORANGE),
        ("PURPLE", Color::PURPLE),
        ("PINK", Color::PINK),
        ("TEAL", Color::TEAL),
    ];

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').ok_or_else(|| {
            PointCloudError::InvalidArgument(format!("color `{hex}` must start with '#'"))
        })?;
        let bad = || PointCloudError::InvalidArgument(format!("malformed hex color `{hex}`"));
        if !digits.is_ascii() {
            return Err(bad());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| bad());
        match digits.len() {
            6 => Ok(Self::from_rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc is shorthand for #aabbcc
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::from_rgb8(r * 17, g * 17, b * 17))
            }
            _ => Err(bad()),
        }
    }

    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }

    pub fn to_rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_rgba(&self, opacity: f32) -> Rgba {
        [self.r, self.g, self.b, opacity]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<[f32; 3]> for Color {
    fn from(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl FromStr for Color {
    type Err = PointCloudError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        Self::PALETTE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, color)| *color)
            .ok_or_else(|| PointCloudError::InvalidArgument(format!("unknown color `{s}`")))
    }
}

impl TryFrom<String> for Color {
    type Error = PointCloudError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

pub fn color_to_rgba(color: Color, opacity: f32) -> Rgba {
    color.to_rgba(opacity)
}

pub fn interpolate_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
    )
}

/// Spreads `len` colors evenly across the gradient through `stops`.
///
/// The first output is `stops[0]` and the last is the final stop. With a
/// single stop every output is that stop.
pub fn color_gradient(stops: &[Color], len: usize) -> Result<Vec<Color>> {
    if len == 0 {
        return Ok(Vec::new());
    }
    match stops {
        [] => Err(PointCloudError::InvalidArgument(
            "color gradient needs at least one color stop".to_string(),
        )),
        [only] => Ok(vec![*only; len]),
        _ => {
            let segments = stops.len() - 1;
            let out = (0..len)
                .map(|i| {
                    if i + 1 == len {
                        return stops[segments];
                    }
                    let alpha = i as f64 * segments as f64 / (len - 1) as f64;
                    let floor = (alpha.floor() as usize).min(segments - 1);
                    let t = (alpha - floor as f64) as f32;
                    interpolate_color(stops[floor], stops[floor + 1], t)
                })
                .collect();
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!("#FFFFFF".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#000".parse::<Color>().unwrap(), Color::BLACK);
        let c: Color = "#ff0080".parse().unwrap();
        assert_eq!(c, Color::from_rgb8(255, 0, 128));
    }

    #[test]
    fn parses_palette_names_case_insensitively() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::RED);
        assert_eq!(" Teal ".parse::<Color>().unwrap(), Color::TEAL);
        assert!(close(Color::from_hex("#FC6255").unwrap(), Color::RED));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "#12", "#GGGGGG", "#1234567", "chartreuse", "#ééé"] {
            assert!(
                matches!(bad.parse::<Color>(), Err(PointCloudError::InvalidArgument(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn hex_display_roundtrips() {
        let c = Color::from_rgb8(0x12, 0xAB, 0xEF);
        assert_eq!(c.to_string(), "#12ABEF");
        assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::WHITE).unwrap();
        assert_eq!(json, "\"#FFFFFF\"");
        let back: Color = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(back, Color::BLUE);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn color_to_rgba_appends_opacity() {
        assert_eq!(color_to_rgba(Color::BLACK, 0.25), [0.0, 0.0, 0.0, 0.25]);
    }

    #[test]
    fn gradient_hits_both_ends() {
        let g = color_gradient(&[Color::BLACK, Color::WHITE], 5).unwrap();
        assert_eq!(g.len(), 5);
        assert_eq!(g[0], Color::BLACK);
        assert!(close(g[2], Color::new(0.5, 0.5, 0.5)));
        assert_eq!(g[4], Color::WHITE);
    }

    #[test]
    fn gradient_passes_through_middle_stop() {
        let g = color_gradient(&[Color::BLACK, Color::WHITE, Color::BLACK], 5).unwrap();
        assert!(close(g[2], Color::WHITE));
        assert_eq!(g[4], Color::BLACK);
    }

    #[test]
    fn gradient_edge_cases() {
        assert!(color_gradient(&[], 0).unwrap().is_empty());
        assert!(color_gradient(&[], 3).is_err());
        assert_eq!(color_gradient(&[Color::RED], 3).unwrap(), vec![Color::RED; 3]);
        assert_eq!(
            color_gradient(&[Color::RED, Color::BLUE], 1).unwrap(),
            vec![Color::BLUE]
        );
    }

    proptest! {
        #[test]
        fn gradient_stays_within_stop_bounds(
            len in 1usize..300,
            stops in prop::collection::vec((0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0), 1..6),
        ) {
            let stops: Vec<Color> = stops.into_iter().map(|(r, g, b)| Color::new(r, g, b)).collect();
            let out = color_gradient(&stops, len).unwrap();
            prop_assert_eq!(out.len(), len);
            let lo = stops.iter().map(|c| c.r).fold(f32::INFINITY, f32::min) - 1e-5;
            let hi = stops.iter().map(|c| c.r).fold(f32::NEG_INFINITY, f32::max) + 1e-5;
            for c in &out {
                prop_assert!(c.r >= lo && c.r <= hi);
            }
        }
    }
}
