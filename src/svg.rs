//! SVG markup surface.
//!
//! Emits one element per filled shape: `<rect>` (with `rx` when rounded),
//! `<circle>` and `<path>`. Gradients, clip paths and the logo shadow
//! filter are collected into a `<defs>` block.

use std::fmt::Write as _;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, RgbaImage};

use crate::error::Result;
use crate::geometry::{Path, PathCmd, Rect, Shape};
use crate::paint::{LinearGradient, Paint};
use crate::raster::encode_image;
use crate::surface::{Shadow, Surface};

/// Builds an SVG document of fixed pixel dimensions.
pub struct SvgSurface {
    width: u32,
    height: u32,
    defs: String,
    body: String,
    gradients: Vec<LinearGradient>,
    clip_count: usize,
    open_groups: usize,
    shadow_count: usize,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        SvgSurface {
            width,
            height,
            defs: String::new(),
            body: String::new(),
            gradients: Vec::new(),
            clip_count: 0,
            open_groups: 0,
            shadow_count: 0,
        }
    }

    /// Closes any open groups and returns the finished document.
    pub fn finish(mut self) -> String {
        for _ in 0..self.open_groups {
            self.body.push_str("</g>");
        }
        let mut svg = String::new();
        svg += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
        svg += &format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{1}\" viewBox=\"0 0 {0} {1}\">",
            self.width, self.height
        );
        if !self.defs.is_empty() {
            svg += "<defs>";
            svg += &self.defs;
            svg += "</defs>";
        }
        svg += &self.body;
        svg += "</svg>\n";
        svg
    }

    /// `fill` attribute value for `paint`, defining the gradient on first use.
    fn fill_value(&mut self, paint: &Paint) -> String {
        match paint {
            Paint::Solid(color) => color.to_string(),
            Paint::Gradient(gradient) => {
                let index = match self.gradients.iter().position(|g| g == gradient) {
                    Some(index) => index,
                    None => {
                        let index = self.gradients.len();
                        self.define_gradient(index, gradient);
                        self.gradients.push(gradient.clone());
                        index
                    }
                };
                format!("url(#fill-gradient-{index})")
            }
        }
    }

    fn define_gradient(&mut self, index: usize, g: &LinearGradient) {
        let _ = write!(
            self.defs,
            "<linearGradient id=\"fill-gradient-{index}\" gradientUnits=\"userSpaceOnUse\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">",
            num(g.x0),
            num(g.y0),
            num(g.x1),
            num(g.y1)
        );
        for stop in &g.stops {
            let _ = write!(
                self.defs,
                "<stop offset=\"{}\" stop-color=\"{}\"/>",
                num(stop.offset),
                stop.color
            );
        }
        self.defs.push_str("</linearGradient>");
    }
}

impl Surface for SvgSurface {
    fn fill(&mut self, shape: &Shape, paint: &Paint) {
        let fill = self.fill_value(paint);
        let element = shape_element(shape);
        let _ = write!(self.body, "<{element} fill=\"{fill}\"/>");
    }

    fn push_clip(&mut self, shape: &Shape) {
        let id = format!("clip-{}", self.clip_count);
        self.clip_count += 1;
        let element = shape_element(shape);
        let _ = write!(self.defs, "<clipPath id=\"{id}\"><{element}/></clipPath>");
        let _ = write!(self.body, "<g clip-path=\"url(#{id})\">");
        self.open_groups += 1;
    }

    fn pop_clip(&mut self) {
        if self.open_groups > 0 {
            self.body.push_str("</g>");
            self.open_groups -= 1;
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Rect, shadow: Option<&Shadow>) -> Result<()> {
        let png = encode_image(image, ImageFormat::Png)?;
        let filter = match shadow {
            Some(shadow) => {
                let id = format!("logo-shadow-{}", self.shadow_count);
                self.shadow_count += 1;
                let _ = write!(
                    self.defs,
                    "<filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\"><feDropShadow dx=\"{}\" dy=\"{}\" stdDeviation=\"{}\" flood-color=\"#000000\" flood-opacity=\"{}\"/></filter>",
                    num(shadow.offset_x),
                    num(shadow.offset_y),
                    num(shadow.blur / 2.0),
                    num(shadow.opacity)
                );
                format!(" filter=\"url(#{id})\"")
            }
            None => String::new(),
        };
        let _ = write!(
            self.body,
            "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" href=\"data:image/png;base64,{}\"{filter}/>",
            num(dest.x),
            num(dest.y),
            num(dest.width),
            num(dest.height),
            STANDARD.encode(png)
        );
        Ok(())
    }
}

/// Element name and geometry attributes, without the closing `/>`.
fn shape_element(shape: &Shape) -> String {
    match shape {
        Shape::Rect { rect, radius } => {
            let mut el = format!(
                "rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height)
            );
            if *radius > 0.0 {
                let _ = write!(el, " rx=\"{}\"", num(*radius));
            }
            el
        }
        Shape::Circle { cx, cy, r } => {
            format!("circle cx=\"{}\" cy=\"{}\" r=\"{}\"", num(*cx), num(*cy), num(*r))
        }
        Shape::Path(path) => format!("path d=\"{}\"", path_data(path)),
    }
}

/// SVG path data for `path`.
pub fn path_data(path: &Path) -> String {
    let mut d = String::new();
    for cmd in path.commands() {
        if !d.is_empty() {
            d.push(' ');
        }
        match cmd {
            PathCmd::MoveTo(p) => {
                let _ = write!(d, "M{},{}", num(p.x), num(p.y));
            }
            PathCmd::LineTo(p) => {
                let _ = write!(d, "L{},{}", num(p.x), num(p.y));
            }
            PathCmd::QuadTo(c, p) => {
                let _ = write!(d, "Q{},{} {},{}", num(c.x), num(c.y), num(p.x), num(p.y));
            }
            PathCmd::Close => d.push('Z'),
        }
    }
    d
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}
