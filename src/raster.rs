//! An anti-aliased RGBA canvas backed by a [`tiny_skia::Pixmap`].
//!
//! Shapes are lowered into `tiny_skia` paths and filled with the non-zero
//! winding rule. Clips are alpha masks rendered through the previous clip,
//! so nested clips intersect. The logo shadow is blurred with `image`
//! because `tiny_skia` has no blur filter.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgba, RgbaImage};
use tiny_skia::{
    Color, ColorU8, FillRule, GradientStop, Mask, MaskType, PathBuilder, Pixmap, PixmapPaint,
    Shader, SpreadMode, Transform,
};

use crate::error::{Error, Result};
use crate::geometry::{Path, PathCmd, Rect, Shape};
use crate::paint::{LinearGradient, Paint};
use crate::surface::{Shadow, Surface};

/// Largest canvas side accepted.
const MAX_SIDE: u32 = 16_384;

/// Raster drawing surface. Starts fully transparent.
pub struct RasterSurface {
    pixmap: Pixmap,
    clips: Vec<Mask>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = (width <= MAX_SIDE && height <= MAX_SIDE)
            .then(|| Pixmap::new(width, height))
            .flatten()
            .ok_or_else(|| Error::Surface(format!("cannot allocate a {width}x{height} canvas")))?;
        Ok(RasterSurface {
            pixmap,
            clips: Vec::new(),
        })
    }

    /// A straight-alpha copy of the canvas.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.pixmap.width(), self.pixmap.height(), |x, y| {
            match self.pixmap.pixel(x, y) {
                Some(p) => {
                    let c = p.demultiply();
                    Rgba([c.red(), c.green(), c.blue(), c.alpha()])
                }
                None => Rgba([0, 0, 0, 0]),
            }
        })
    }

    pub fn into_image(self) -> RgbaImage {
        self.to_image()
    }

    fn blit(&mut self, image: &Pixmap, left: i32, top: i32, opacity: f32) {
        let paint = PixmapPaint {
            opacity,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            left,
            top,
            image.as_ref(),
            &paint,
            Transform::identity(),
            self.clips.last(),
        );
    }

    fn cast_shadow(&mut self, image: &RgbaImage, left: i32, top: i32, shadow: &Shadow) -> Result<()> {
        let sigma = (shadow.blur / 2.0) as f32;
        let pad = (sigma * 3.0).ceil().max(0.0) as u32;
        let mut mask = GrayImage::new(image.width() + 2 * pad, image.height() + 2 * pad);
        for (x, y, p) in image.enumerate_pixels() {
            mask.put_pixel(x + pad, y + pad, Luma([p[3]]));
        }
        let blurred = if sigma > 0.0 {
            imageops::blur(&mask, sigma)
        } else {
            mask
        };
        let mut layer = blank_pixmap(blurred.width(), blurred.height())?;
        for (dst, p) in layer.pixels_mut().iter_mut().zip(blurred.pixels()) {
            *dst = ColorU8::from_rgba(0, 0, 0, p[0]).premultiply();
        }
        let ox = left - pad as i32 + shadow.offset_x.round() as i32;
        let oy = top - pad as i32 + shadow.offset_y.round() as i32;
        self.blit(&layer, ox, oy, shadow.opacity as f32);
        Ok(())
    }
}

impl Surface for RasterSurface {
    fn fill(&mut self, shape: &Shape, paint: &Paint) {
        if let Some(path) = skia_path(shape) {
            let paint = skia_paint(paint);
            self.pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                self.clips.last(),
            );
        }
    }

    fn push_clip(&mut self, shape: &Shape) {
        let mut layer = self.pixmap.clone();
        layer.fill(Color::TRANSPARENT);
        if let Some(path) = skia_path(shape) {
            let mut opaque = tiny_skia::Paint::default();
            opaque.set_color(Color::BLACK);
            layer.fill_path(
                &path,
                &opaque,
                FillRule::Winding,
                Transform::identity(),
                self.clips.last(),
            );
        }
        self.clips
            .push(Mask::from_pixmap(layer.as_ref(), MaskType::Alpha));
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Rect, shadow: Option<&Shadow>) -> Result<()> {
        let width = dest.width.round().max(1.0) as u32;
        let height = dest.height.round().max(1.0) as u32;
        let scaled = if image.dimensions() == (width, height) {
            image.clone()
        } else {
            imageops::resize(image, width, height, FilterType::Lanczos3)
        };
        let left = dest.x.round() as i32;
        let top = dest.y.round() as i32;
        if let Some(shadow) = shadow {
            self.cast_shadow(&scaled, left, top, shadow)?;
        }
        let mut layer = blank_pixmap(width, height)?;
        for (dst, p) in layer.pixels_mut().iter_mut().zip(scaled.pixels()) {
            *dst = ColorU8::from_rgba(p[0], p[1], p[2], p[3]).premultiply();
        }
        self.blit(&layer, left, top, 1.0);
        Ok(())
    }
}

fn blank_pixmap(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height)
        .ok_or_else(|| Error::Surface(format!("cannot allocate a {width}x{height} layer")))
}

/// Lowers `shape` into a `tiny_skia` path; `None` when it encloses no area.
fn skia_path(shape: &Shape) -> Option<tiny_skia::Path> {
    match shape {
        Shape::Circle { cx, cy, r } => PathBuilder::from_circle(*cx as f32, *cy as f32, *r as f32),
        Shape::Rect { rect, radius } => lower(&Path::rounded_rect(*rect, *radius)),
        Shape::Path(path) => lower(path),
    }
}

fn lower(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for cmd in path.commands() {
        match *cmd {
            PathCmd::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathCmd::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathCmd::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathCmd::Close => pb.close(),
        }
    }
    pb.finish()
}

fn skia_color(rgb: [u8; 3]) -> Color {
    Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255)
}

fn skia_paint(paint: &Paint) -> tiny_skia::Paint<'static> {
    let mut out = tiny_skia::Paint::default();
    match paint {
        Paint::Solid(color) => out.set_color(skia_color(color.rgb())),
        Paint::Gradient(gradient) => out.shader = skia_gradient(gradient),
    }
    out
}

fn skia_gradient(gradient: &LinearGradient) -> Shader<'static> {
    let stops = gradient
        .stops
        .iter()
        .map(|s| GradientStop::new(s.offset as f32, skia_color(s.color.rgb())))
        .collect();
    let fallback = gradient
        .stops
        .first()
        .map_or(Color::BLACK, |s| skia_color(s.color.rgb()));
    tiny_skia::LinearGradient::new(
        tiny_skia::Point::from_xy(gradient.x0 as f32, gradient.y0 as f32),
        tiny_skia::Point::from_xy(gradient.x1 as f32, gradient.y1 as f32),
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    )
    .unwrap_or(Shader::SolidColor(fallback))
}

/// Encodes `image` as PNG or JPEG bytes. JPEG drops the alpha channel.
pub fn encode_image(image: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image.clone()).to_rgb8())
                .write_to(&mut bytes, ImageFormat::Jpeg)?;
        }
        other => image.write_to(&mut bytes, other)?,
    }
    Ok(bytes.into_inner())
}
