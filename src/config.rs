//! Render options.
//!
//! [`QrOptions`] is the loose, all-optional form that callers build or
//! deserialize from JSON. [`QrOptions::resolve`] fills in defaults, applies
//! the legacy `color` alias, validates everything and produces an immutable
//! [`RenderConfig`] plus the text to encode. Nothing is drawn until this
//! succeeds.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::matrix::ErrorCorrectionLevel;
use crate::paint::{parse_color_list, HexColor, DEFAULT_GRADIENT_COLORS};
use crate::payload::{DataType, Payload};

pub const DEFAULT_SIZE: u32 = 600;
pub const DEFAULT_MARGIN: u32 = 4;
pub const DEFAULT_PADDING: u32 = 40;
pub const DEFAULT_FOREGROUND: &str = "#000000";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_MODULE_RADIUS: f64 = 0.35;
pub const DEFAULT_GRADIENT_ANGLE: f64 = 45.0;
pub const DEFAULT_CORNER_RADIUS: f64 = 60.0;
pub const DEFAULT_LOGO_SIZE: u32 = 120;
pub const DEFAULT_LOGO_PADDING: f64 = 10.0;
pub const DEFAULT_LOGO_RADIUS: f64 = 20.0;

/// Shape of finder patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyeShape {
    /// Drawn like every other module.
    #[default]
    Default,
    /// Three concentric discs.
    Circle,
}

/// Backdrop behind the logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoShape {
    #[default]
    Circle,
    Square,
}

/// User-facing options. Every field is optional; see [`RenderConfig`] for
/// the resolved values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QrOptions {
    /// URL or plain text content.
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub data_type: Option<DataType>,
    /// Structured content for vcard/wifi/email/sms/geo.
    pub data: Option<Value>,
    /// Canvas side in pixels.
    pub size: Option<u32>,
    /// Quiet zone in modules.
    pub margin: Option<u32>,
    /// Canvas padding in pixels.
    pub padding: Option<u32>,
    pub foreground_color: Option<String>,
    /// Deprecated spelling of `foreground_color`.
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub rounded: Option<bool>,
    pub module_radius: Option<f64>,
    pub eye_color: Option<String>,
    pub eye_radius: Option<f64>,
    pub eye_shape: Option<EyeShape>,
    pub gradient: Option<bool>,
    /// Comma separated hex colors.
    pub gradient_colors: Option<String>,
    pub gradient_angle: Option<f64>,
    pub corner_radius: Option<f64>,
    /// Logo file path or `data:` URL.
    pub logo: Option<String>,
    pub logo_size: Option<u32>,
    pub logo_shape: Option<LogoShape>,
    pub logo_padding: Option<f64>,
    pub logo_radius: Option<f64>,
    pub logo_background_color: Option<String>,
    pub error_correction_level: Option<ErrorCorrectionLevel>,
}

/// Logo settings of a resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoConfig {
    pub source: String,
    /// Logo side in pixels.
    pub size: u32,
    pub shape: LogoShape,
    pub padding: f64,
    pub radius: f64,
    pub background: HexColor,
}

impl LogoConfig {
    pub fn side(&self) -> f64 {
        self.size as f64
    }
}

/// Validated, immutable settings for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub size: u32,
    pub margin: u32,
    pub padding: u32,
    pub foreground: HexColor,
    pub background: HexColor,
    pub rounded: bool,
    /// Corner radius as a fraction of the module size, in `[0, 0.5]`.
    pub module_radius: f64,
    pub eye_color: Option<HexColor>,
    /// Eye corner radius fraction; `0` inherits `module_radius`.
    pub eye_radius: f64,
    pub eye_shape: EyeShape,
    /// Gradient stops when the gradient fill is on.
    pub gradient: Option<Vec<HexColor>>,
    pub gradient_angle: f64,
    pub corner_radius: f64,
    pub logo: Option<LogoConfig>,
    pub error_correction: ErrorCorrectionLevel,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            size: DEFAULT_SIZE,
            margin: DEFAULT_MARGIN,
            padding: DEFAULT_PADDING,
            foreground: HexColor::known([0, 0, 0], DEFAULT_FOREGROUND),
            background: HexColor::known([255, 255, 255], DEFAULT_BACKGROUND),
            rounded: true,
            module_radius: DEFAULT_MODULE_RADIUS,
            eye_color: None,
            eye_radius: 0.0,
            eye_shape: EyeShape::Default,
            gradient: None,
            gradient_angle: DEFAULT_GRADIENT_ANGLE,
            corner_radius: DEFAULT_CORNER_RADIUS,
            logo: None,
            error_correction: ErrorCorrectionLevel::H,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn check_range(value: Option<f64>, lo: f64, hi: f64, message: &str) -> Result<()> {
    match value {
        Some(v) if !(lo..=hi).contains(&v) => Err(Error::config(message)),
        _ => Ok(()),
    }
}

impl QrOptions {
    /// Options carrying only `url` content.
    pub fn with_url(url: impl Into<String>) -> Self {
        QrOptions {
            url: Some(url.into()),
            ..QrOptions::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(format!("Invalid options JSON: {e}")))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Returns a new set of options: `patch` fields override `self` where set.
    ///
    /// A `color` in the patch replaces the foreground unless the patch also
    /// sets `foreground_color`.
    pub fn merge(&self, patch: &QrOptions) -> QrOptions {
        macro_rules! pick {
            ($($field:ident),* $(,)?) => {
                QrOptions { $($field: patch.$field.clone().or_else(|| self.$field.clone()),)* }
            };
        }
        let mut merged = pick!(
            url, data_type, data, size, margin, padding, foreground_color, color, background_color,
            rounded, module_radius, eye_color, eye_radius, eye_shape, gradient, gradient_colors,
            gradient_angle, corner_radius, logo, logo_size, logo_shape, logo_padding, logo_radius,
            logo_background_color, error_correction_level,
        );
        if patch.color.is_some() && patch.foreground_color.is_none() {
            merged.foreground_color = patch.color.clone();
        }
        merged
    }

    /// The text to encode, derived from `url` or structured `data`.
    pub fn content(&self) -> Result<String> {
        let data_type = self.data_type.unwrap_or_default();
        if !data_type.is_structured() {
            return non_empty(&self.url)
                .map(str::to_string)
                .ok_or_else(|| Error::config("URL, text content, or structured data is required"));
        }
        match &self.data {
            Some(data) if !data.is_null() => Ok(Payload::from_json(data_type, data)?.format()),
            _ => Err(Error::config(format!(
                "Structured data is required for type '{}'",
                data_type.name()
            ))),
        }
    }

    /// Applies defaults, validates every option and returns the resolved
    /// configuration together with the content to encode.
    pub fn resolve(&self) -> Result<(RenderConfig, String)> {
        let defaults = RenderConfig::default();

        let has_data = self.data.as_ref().is_some_and(|d| !d.is_null());
        if non_empty(&self.url).is_none() && !has_data {
            return Err(Error::config("URL, text content, or structured data is required"));
        }

        let size = self.size.unwrap_or(defaults.size);
        if !(100..=5000).contains(&size) {
            return Err(Error::config("Size must be between 100 and 5000 pixels"));
        }
        let margin = self.margin.unwrap_or(defaults.margin);
        if margin > 10 {
            return Err(Error::config("Margin must be between 0 and 10 modules"));
        }
        let padding = self.padding.unwrap_or(defaults.padding);
        if padding.saturating_mul(2) >= size {
            return Err(Error::config("Padding must be less than half the size"));
        }

        check_range(self.module_radius, 0.0, 0.5, "Module radius must be between 0.0 and 0.5")?;
        check_range(self.eye_radius, 0.0, 0.5, "Eye radius must be between 0.0 and 0.5")?;
        check_range(
            self.gradient_angle,
            0.0,
            360.0,
            "Gradient angle must be between 0 and 360 degrees",
        )?;
        if let Some(logo_size) = self.logo_size {
            if !(50..=500).contains(&logo_size) {
                return Err(Error::config("Logo size must be between 50 and 500 pixels"));
            }
        }
        for (value, what) in [
            (self.corner_radius, "Corner radius"),
            (self.logo_padding, "Logo padding"),
            (self.logo_radius, "Logo radius"),
        ] {
            if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
                return Err(Error::config(format!("{what} must be a non-negative number")));
            }
        }

        let foreground_text = match (non_empty(&self.foreground_color), non_empty(&self.color)) {
            (Some(fg), _) => fg,
            (None, Some(legacy)) => {
                warn!("option 'color' is deprecated, use 'foregroundColor'");
                legacy
            }
            (None, None) => DEFAULT_FOREGROUND,
        };
        let foreground = HexColor::parse_option(foreground_text, "Color")?;
        let eye_color = non_empty(&self.eye_color)
            .map(|c| HexColor::parse_option(c, "Eye color"))
            .transpose()?;
        let background = HexColor::parse_option(
            non_empty(&self.background_color).unwrap_or(DEFAULT_BACKGROUND),
            "Background color",
        )?;
        let logo_background = HexColor::parse_option(
            non_empty(&self.logo_background_color).unwrap_or(DEFAULT_BACKGROUND),
            "Logo background color",
        )?;
        let gradient_colors = parse_color_list(
            non_empty(&self.gradient_colors).unwrap_or(DEFAULT_GRADIENT_COLORS),
        )?;
        if gradient_colors.len() < 2 {
            return Err(Error::config("Gradient requires at least two colors"));
        }

        let content = self.content()?;

        let logo = non_empty(&self.logo).map(|source| LogoConfig {
            source: source.to_string(),
            size: self.logo_size.unwrap_or(DEFAULT_LOGO_SIZE),
            shape: self.logo_shape.unwrap_or_default(),
            padding: self.logo_padding.unwrap_or(DEFAULT_LOGO_PADDING),
            radius: self.logo_radius.unwrap_or(DEFAULT_LOGO_RADIUS),
            background: logo_background,
        });

        let config = RenderConfig {
            size,
            margin,
            padding,
            foreground,
            background,
            rounded: self.rounded.unwrap_or(defaults.rounded),
            module_radius: self.module_radius.unwrap_or(defaults.module_radius),
            eye_color,
            eye_radius: self.eye_radius.unwrap_or(defaults.eye_radius),
            eye_shape: self.eye_shape.unwrap_or_default(),
            gradient: self.gradient.unwrap_or(false).then_some(gradient_colors),
            gradient_angle: self.gradient_angle.unwrap_or(defaults.gradient_angle),
            corner_radius: self.corner_radius.unwrap_or(defaults.corner_radius),
            logo,
            error_correction: self.error_correction_level.unwrap_or_default(),
        };
        Ok((config, content))
    }
}
