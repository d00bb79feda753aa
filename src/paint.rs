//! Colors and fill styles.

use std::fmt;

use crate::error::{Error, Result};

/// Stops of the default gradient palette, as hex strings.
pub const DEFAULT_GRADIENT_COLORS: &str = "#FEDA75,#FA7E1E,#D62976,#962FBF,#4F5BD5";

/// A color given as `#rgb` or `#rrggbb`.
///
/// The original spelling is kept so markup output repeats exactly what the
/// caller wrote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor {
    rgb: [u8; 3],
    text: String,
}

impl HexColor {
    pub fn parse(text: &str) -> Option<HexColor> {
        let text = text.trim();
        let digits = text.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let rgb = match digits.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    rgb[i] = v * 17;
                }
                rgb
            }
            6 => {
                let mut rgb = [0u8; 3];
                for (i, slot) in rgb.iter_mut().enumerate() {
                    *slot = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).ok()?;
                }
                rgb
            }
            _ => return None,
        };
        Some(HexColor {
            rgb,
            text: text.to_string(),
        })
    }

    /// A color whose spelling is already known to match `rgb`.
    pub(crate) fn known(rgb: [u8; 3], text: &str) -> HexColor {
        HexColor {
            rgb,
            text: text.to_string(),
        }
    }

    /// Parses `text`, reporting a configuration error that names `what`.
    pub fn parse_option(text: &str, what: &str) -> Result<HexColor> {
        HexColor::parse(text).ok_or_else(|| {
            Error::config(format!("{what} must be in hex format (e.g., #000000), got '{text}'"))
        })
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One color stop, `offset` in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: HexColor,
}

/// A linear gradient between two points in output units.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    /// A gradient across a `size` x `size` canvas at `angle_deg` (0 is
    /// horizontal, growing clockwise). The gradient line runs through the
    /// canvas center and is as long as the diagonal, so it covers corner to
    /// corner at every angle. Stops are spread evenly.
    pub fn spanning(size: f64, angle_deg: f64, colors: &[HexColor]) -> LinearGradient {
        let angle = angle_deg.to_radians();
        let center = size / 2.0;
        let half = (size * size * 2.0).sqrt() / 2.0;
        let (dx, dy) = (angle.cos() * half, angle.sin() * half);
        let last = colors.len().saturating_sub(1).max(1) as f64;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, color)| ColorStop {
                offset: i as f64 / last,
                color: color.clone(),
            })
            .collect();
        LinearGradient {
            x0: center - dx,
            y0: center - dy,
            x1: center + dx,
            y1: center + dy,
            stops,
        }
    }
}

/// How a shape is filled.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(HexColor),
    Gradient(LinearGradient),
}

/// Fill for a module: the eye override when the module sits in an eye zone
/// and an eye color is configured, the base fill otherwise.
pub fn resolve_color(is_eye: bool, eye_color: Option<&HexColor>, base: &Paint) -> Paint {
    match eye_color {
        Some(color) if is_eye => Paint::Solid(color.clone()),
        _ => base.clone(),
    }
}

/// Splits a comma separated list of hex colors.
pub fn parse_color_list(list: &str) -> Result<Vec<HexColor>> {
    list.split(',')
        .map(|c| {
            let c = c.trim();
            HexColor::parse(c).ok_or_else(|| {
                Error::config(format!("Invalid gradient color: {c}. Must be in hex format"))
            })
        })
        .collect()
}
