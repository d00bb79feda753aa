//! The high-level entry point: options in, PNG/JPEG/SVG out.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, RgbaImage};
use log::info;

use crate::compositor::render;
use crate::config::{QrOptions, RenderConfig};
use crate::error::Result;
use crate::logo::load_logo;
use crate::matrix::{encode, ModuleMatrix};
use crate::raster::{encode_image, RasterSurface};
use crate::svg::SvgSurface;

/// Raster encodings offered for buffers, files and data URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterFormat {
    #[default]
    Png,
    Jpeg,
}

impl RasterFormat {
    fn image_format(self) -> ImageFormat {
        match self {
            RasterFormat::Png => ImageFormat::Png,
            RasterFormat::Jpeg => ImageFormat::Jpeg,
        }
    }

    fn mime_type(self) -> &'static str {
        match self {
            RasterFormat::Png => "image/png",
            RasterFormat::Jpeg => "image/jpeg",
        }
    }
}

/// A validated render job.
///
/// The generator never changes after construction; [`QrGenerator::with_options`]
/// returns a new one, so a generator can be shared between threads and
/// rendered concurrently.
///
/// # Example
///
/// ```rust
/// use qrstyled::{QrGenerator, QrOptions};
///
/// let generator = QrGenerator::new(QrOptions {
///     size: Some(300),
///     foreground_color: Some("#FF0000".into()),
///     ..QrOptions::with_url("https://example.com")
/// })
/// .unwrap();
/// let svg = generator.to_svg().unwrap();
/// assert!(svg.contains("#FF0000"));
/// ```
#[derive(Debug, Clone)]
pub struct QrGenerator {
    options: QrOptions,
    config: RenderConfig,
    content: String,
}

impl QrGenerator {
    /// Validates `options`. Fails with [`crate::Error::Configuration`] on
    /// any invalid option.
    pub fn new(options: QrOptions) -> Result<Self> {
        let (config, content) = options.resolve()?;
        Ok(QrGenerator {
            options,
            config,
            content,
        })
    }

    /// A new generator with `patch` merged over the current options.
    pub fn with_options(&self, patch: &QrOptions) -> Result<Self> {
        QrGenerator::new(self.options.merge(patch))
    }

    pub fn options(&self) -> &QrOptions {
        &self.options
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The text that gets encoded.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Encodes the content into a module matrix.
    pub fn matrix(&self) -> Result<ModuleMatrix> {
        encode(&self.content, self.config.error_correction)
    }

    fn logo(&self) -> Result<Option<RgbaImage>> {
        self.config
            .logo
            .as_ref()
            .map(|logo| load_logo(&logo.source))
            .transpose()
    }

    /// Renders onto a fresh RGBA canvas.
    pub fn generate(&self) -> Result<RgbaImage> {
        let matrix = self.matrix()?;
        let logo = self.logo()?;
        let mut surface = RasterSurface::new(self.config.size, self.config.size)?;
        render(&mut surface, &matrix, &self.config, logo.as_ref())?;
        Ok(surface.into_image())
    }

    /// Encoded image bytes.
    pub fn to_buffer(&self, format: RasterFormat) -> Result<Vec<u8>> {
        encode_image(&self.generate()?, format.image_format())
    }

    /// A `data:` URL holding the encoded image.
    pub fn to_data_url(&self, format: RasterFormat) -> Result<String> {
        let bytes = self.to_buffer(format)?;
        Ok(format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes)))
    }

    /// Writes the image to `path`; a `.jpg`/`.jpeg` extension selects JPEG.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => {
                RasterFormat::Jpeg
            }
            _ => RasterFormat::Png,
        };
        fs::write(path, self.to_buffer(format)?)?;
        info!("wrote {}", path.display());
        Ok(())
    }

    /// SVG markup of the same render.
    pub fn to_svg(&self) -> Result<String> {
        let matrix = self.matrix()?;
        let logo = self.logo()?;
        let mut surface = SvgSurface::new(self.config.size, self.config.size);
        render(&mut surface, &matrix, &self.config, logo.as_ref())?;
        Ok(surface.finish())
    }

    pub fn to_svg_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_svg()?)?;
        info!("wrote {}", path.display());
        Ok(())
    }
}
