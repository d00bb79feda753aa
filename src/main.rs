use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use qrstyled::{DataType, ErrorCorrectionLevel, EyeShape, LogoShape, QrGenerator, QrOptions};

/// Render a styled QR code to PNG, JPEG or SVG.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// URL or text for the QR code
    #[arg(short, long)]
    url: Option<String>,

    /// Content type: url, text, vcard, wifi, email, sms, geo
    #[arg(long = "type", value_parser = parse_data_type)]
    data_type: Option<DataType>,

    /// Structured data as JSON, e.g. '{"ssid":"Home","password":"secret"}'
    #[arg(long)]
    data: Option<String>,

    /// JSON file with options; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file; .svg, .jpg/.jpeg or .png
    #[arg(short, long, default_value = "qr.png")]
    out: PathBuf,

    /// Canvas size in pixels
    #[arg(long)]
    size: Option<u32>,

    /// Quiet zone in modules
    #[arg(long)]
    margin: Option<u32>,

    /// Padding around the QR code in pixels
    #[arg(long)]
    padding: Option<u32>,

    /// Module color (hex)
    #[arg(short = 'c', long = "color")]
    foreground_color: Option<String>,

    /// Background color (hex)
    #[arg(long)]
    background_color: Option<String>,

    /// Use rounded module corners
    #[arg(long)]
    rounded: Option<bool>,

    /// Module corner radius (0.0 - 0.5)
    #[arg(long)]
    module_radius: Option<f64>,

    /// Eye color (hex)
    #[arg(long)]
    eye_color: Option<String>,

    /// Eye corner radius (0.0 - 0.5), 0 inherits the module radius
    #[arg(long)]
    eye_radius: Option<f64>,

    /// Eye shape: default or circle
    #[arg(long, value_parser = parse_eye_shape)]
    eye_shape: Option<EyeShape>,

    /// Fill modules with a gradient
    #[arg(short, long)]
    gradient: bool,

    /// Comma-separated gradient colors
    #[arg(long)]
    gradient_colors: Option<String>,

    /// Gradient angle in degrees (0-360)
    #[arg(long)]
    gradient_angle: Option<f64>,

    /// Background corner radius in pixels
    #[arg(long)]
    corner_radius: Option<f64>,

    /// Logo image path or data URL
    #[arg(short, long)]
    logo: Option<String>,

    /// Logo size in pixels (default 120)
    #[arg(long)]
    logo_size: Option<u32>,

    /// Logo background shape: circle or square
    #[arg(long, value_parser = parse_logo_shape)]
    logo_shape: Option<LogoShape>,

    /// Padding around the logo
    #[arg(long)]
    logo_padding: Option<f64>,

    /// Corner radius of the square logo background
    #[arg(long)]
    logo_radius: Option<f64>,

    /// Logo background color (hex)
    #[arg(long)]
    logo_background_color: Option<String>,

    /// Error correction level: L, M, Q or H
    #[arg(short = 'e', long)]
    error_correction_level: Option<ErrorCorrectionLevel>,
}

fn parse_data_type(s: &str) -> Result<DataType, String> {
    s.parse().map_err(|e: qrstyled::Error| e.to_string())
}

fn parse_eye_shape(s: &str) -> Result<EyeShape, String> {
    match s {
        "default" => Ok(EyeShape::Default),
        "circle" => Ok(EyeShape::Circle),
        other => Err(format!("unknown eye shape '{other}'")),
    }
}

fn parse_logo_shape(s: &str) -> Result<LogoShape, String> {
    match s {
        "circle" => Ok(LogoShape::Circle),
        "square" => Ok(LogoShape::Square),
        other => Err(format!("Logo shape must be one of: circle, square (got '{other}')")),
    }
}

impl Args {
    fn options(&self) -> Result<QrOptions> {
        let data = self
            .data
            .as_deref()
            .map(serde_json::from_str::<serde_json::Value>)
            .transpose()
            .context("--data is not valid JSON")?;
        Ok(QrOptions {
            url: self.url.clone(),
            data_type: self.data_type,
            data,
            size: self.size,
            margin: self.margin,
            padding: self.padding,
            foreground_color: self.foreground_color.clone(),
            color: None,
            background_color: self.background_color.clone(),
            rounded: self.rounded,
            module_radius: self.module_radius,
            eye_color: self.eye_color.clone(),
            eye_radius: self.eye_radius,
            eye_shape: self.eye_shape,
            gradient: self.gradient.then_some(true),
            gradient_colors: self.gradient_colors.clone(),
            gradient_angle: self.gradient_angle,
            corner_radius: self.corner_radius,
            logo: self.logo.clone(),
            logo_size: self.logo_size,
            logo_shape: self.logo_shape,
            logo_padding: self.logo_padding,
            logo_radius: self.logo_radius,
            logo_background_color: self.logo_background_color.clone(),
            error_correction_level: self.error_correction_level,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let base = match &args.config {
        Some(path) => QrOptions::from_json_file(path)
            .with_context(|| format!("failed to read options from {}", path.display()))?,
        None => QrOptions::default(),
    };
    let options = base.merge(&args.options()?);

    info!("Generating QR code...");
    let generator = QrGenerator::new(options).context("invalid options")?;

    let is_svg = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    let written = if is_svg {
        generator.to_svg_file(&args.out)
    } else {
        generator.to_file(&args.out)
    };
    written.with_context(|| format!("failed to write {}", args.out.display()))?;

    info!("QR code generated successfully: {}", args.out.display());
    Ok(())
}
