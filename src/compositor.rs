//! Layering of one render onto a surface.
//!
//! Order: background card, clip to the card, modules (and circular eyes),
//! unclip, logo backdrop, logo with shadow.

use image::RgbaImage;
use log::debug;

use crate::adjacency::neighbors_of;
use crate::config::{EyeShape, RenderConfig};
use crate::error::Result;
use crate::eye::{draw_circular_eyes, Grid};
use crate::geometry::{Rect, Shape};
use crate::logo::{place_logo, LOGO_SHADOW};
use crate::matrix::ModuleMatrix;
use crate::module_path::build_module_path;
use crate::paint::{resolve_color, LinearGradient, Paint};
use crate::region::is_eye_region;
use crate::surface::Surface;

/// Grid placement for `matrix` under `config`: the area inside the padding
/// holds the symbol plus `margin` quiet modules on each side.
pub fn layout(config: &RenderConfig, matrix: &ModuleMatrix) -> Grid {
    let area = config.size as f64 - 2.0 * config.padding as f64;
    let count = matrix.size();
    let module_size = area / (count + 2 * config.margin as usize) as f64;
    let origin = config.padding as f64 + config.margin as f64 * module_size;
    Grid {
        origin_x: origin,
        origin_y: origin,
        module_size,
        count,
    }
}

/// The module fill: a flat foreground or a canvas-wide gradient.
pub fn base_paint(config: &RenderConfig) -> Paint {
    match &config.gradient {
        Some(colors) => Paint::Gradient(LinearGradient::spanning(
            config.size as f64,
            config.gradient_angle,
            colors,
        )),
        None => Paint::Solid(config.foreground.clone()),
    }
}

/// The rounded card behind the whole code, also used as the clip.
pub fn background_shape(config: &RenderConfig) -> Shape {
    let size = config.size as f64;
    Shape::Rect {
        rect: Rect::new(0.0, 0.0, size, size),
        radius: config.corner_radius,
    }
}

/// Draws every dark module. Eye zones are skipped when circular eyes are on.
pub fn draw_modules<S: Surface>(
    surface: &mut S,
    matrix: &ModuleMatrix,
    config: &RenderConfig,
    grid: &Grid,
    base: &Paint,
) {
    let n = matrix.size();
    let circle_eyes = config.eye_shape == EyeShape::Circle;
    for row in 0..n {
        for col in 0..n {
            if !matrix.get(row as isize, col as isize) {
                continue;
            }
            let is_eye = is_eye_region(row, col, n);
            if is_eye && circle_eyes {
                continue;
            }
            let (x, y) = grid.cell(row, col);
            let paint = resolve_color(is_eye, config.eye_color.as_ref(), base);
            let shape = if config.rounded {
                let fraction = if is_eye && config.eye_radius > 0.0 {
                    config.eye_radius
                } else {
                    config.module_radius
                };
                let neighbors = neighbors_of(matrix, row, col);
                build_module_path(
                    x,
                    y,
                    grid.module_size,
                    grid.module_size * fraction,
                    neighbors.corner_rounding(),
                    neighbors.edge_extension(),
                )
                .to_shape()
            } else {
                Shape::rect(Rect::new(x, y, grid.module_size, grid.module_size))
            };
            surface.fill(&shape, &paint);
        }
    }
}

/// Renders `matrix` with `config` onto `surface`. `logo` must already be
/// decoded when the config names one; it is skipped otherwise.
pub fn render<S: Surface>(
    surface: &mut S,
    matrix: &ModuleMatrix,
    config: &RenderConfig,
    logo: Option<&RgbaImage>,
) -> Result<()> {
    let grid = layout(config, matrix);
    debug!(
        "rendering {0}x{0} modules at {1:.3}px from origin {2:.3}",
        grid.count, grid.module_size, grid.origin_x
    );

    let card = background_shape(config);
    surface.fill(&card, &Paint::Solid(config.background.clone()));
    surface.push_clip(&card);

    let base = base_paint(config);
    draw_modules(surface, matrix, config, &grid, &base);
    if config.eye_shape == EyeShape::Circle {
        let eye_paint = match &config.eye_color {
            Some(color) => Paint::Solid(color.clone()),
            None => base.clone(),
        };
        draw_circular_eyes(surface, &grid, &eye_paint, &config.background);
    }

    surface.pop_clip();

    if let (Some(logo_config), Some(image)) = (&config.logo, logo) {
        let placement = place_logo(logo_config, config.size as f64);
        surface.fill(
            &placement.backdrop,
            &Paint::Solid(logo_config.background.clone()),
        );
        surface.draw_image(image, placement.image, Some(&LOGO_SHADOW))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QrOptions;
    use crate::raster::RasterSurface;
    use crate::surface::Shadow;
    use image::Rgba;

    /// Records what the compositor asks for.
    #[derive(Default)]
    struct Recorder {
        fills: Vec<(Shape, Paint)>,
        clip_depth: Vec<usize>,
        depth: usize,
        images: Vec<Rect>,
    }

    impl Surface for Recorder {
        fn fill(&mut self, shape: &Shape, paint: &Paint) {
            self.fills.push((shape.clone(), paint.clone()));
            self.clip_depth.push(self.depth);
        }
        fn push_clip(&mut self, _shape: &Shape) {
            self.depth += 1;
        }
        fn pop_clip(&mut self) {
            self.depth -= 1;
        }
        fn draw_image(&mut self, _image: &RgbaImage, dest: Rect, _shadow: Option<&Shadow>) -> Result<()> {
            self.images.push(dest);
            Ok(())
        }
    }

    fn config(options: QrOptions) -> RenderConfig {
        options.resolve().unwrap().0
    }

    fn checkerboard() -> ModuleMatrix {
        ModuleMatrix::from_fn(21, |r, c| (r + c) % 2 == 0).unwrap()
    }

    #[test]
    fn test_layout_honours_padding_and_margin() {
        let cfg = config(QrOptions { size: Some(500), padding: Some(40), margin: Some(2), ..QrOptions::with_url("x") });
        let grid = layout(&cfg, &checkerboard());
        assert!((grid.module_size - 420.0 / 25.0).abs() < 1e-9);
        assert!((grid.origin_x - (40.0 + 2.0 * 420.0 / 25.0)).abs() < 1e-9);
    }

    #[test]
    fn test_one_fill_per_dark_module_inside_clip() {
        let matrix = checkerboard();
        let cfg = config(QrOptions::with_url("x"));
        let mut rec = Recorder::default();
        render(&mut rec, &matrix, &cfg, None).unwrap();
        // Background plus each dark module.
        assert_eq!(rec.fills.len(), 1 + matrix.dark_count());
        assert_eq!(rec.clip_depth[0], 0);
        assert!(rec.clip_depth[1..].iter().all(|&d| d == 1));
        assert_eq!(rec.depth, 0);
        // Checkerboard modules are all isolated: fully rounded rects.
        assert!(rec.fills[1..]
            .iter()
            .all(|(s, _)| matches!(s, Shape::Rect { radius, .. } if *radius > 0.0)));
    }

    #[test]
    fn test_eye_color_and_radius_override() {
        let matrix = checkerboard();
        let cfg = config(QrOptions {
            eye_color: Some("#ff0000".into()),
            eye_radius: Some(0.5),
            ..QrOptions::with_url("x")
        });
        let mut rec = Recorder::default();
        render(&mut rec, &matrix, &cfg, None).unwrap();
        let grid = layout(&cfg, &matrix);
        let eye_fills: Vec<_> = rec.fills[1..]
            .iter()
            .filter(|(_, p)| matches!(p, Paint::Solid(c) if c.as_str() == "#ff0000"))
            .collect();
        let dark_eye_modules = (0..21)
            .flat_map(|r| (0..21).map(move |c| (r, c)))
            .filter(|&(r, c)| (r + c) % 2 == 0 && is_eye_region(r, c, 21))
            .count();
        assert_eq!(eye_fills.len(), dark_eye_modules);
        for (shape, _) in eye_fills {
            match shape {
                Shape::Rect { radius, .. } => assert!((radius - grid.module_size * 0.5).abs() < 1e-9),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_circular_eyes_replace_eye_modules() {
        let matrix = ModuleMatrix::from_fn(21, |_, _| true).unwrap();
        let cfg = config(QrOptions { eye_shape: Some(EyeShape::Circle), ..QrOptions::with_url("x") });
        let mut rec = Recorder::default();
        render(&mut rec, &matrix, &cfg, None).unwrap();
        let circles = rec.fills.iter().filter(|(s, _)| matches!(s, Shape::Circle { .. })).count();
        assert_eq!(circles, 9);
        assert_eq!(rec.fills.len(), 1 + (21 * 21 - 147) + 9);
    }

    #[test]
    fn test_square_modules_when_not_rounded() {
        let matrix = checkerboard();
        let cfg = config(QrOptions { rounded: Some(false), ..QrOptions::with_url("x") });
        let mut rec = Recorder::default();
        render(&mut rec, &matrix, &cfg, None).unwrap();
        assert!(rec.fills[1..]
            .iter()
            .all(|(s, _)| matches!(s, Shape::Rect { radius, .. } if *radius == 0.0)));
    }

    #[test]
    fn test_logo_drawn_after_clip_removed() {
        let matrix = checkerboard();
        let cfg = config(QrOptions { logo: Some("logo.png".into()), ..QrOptions::with_url("x") });
        let logo = RgbaImage::new(10, 10);
        let mut rec = Recorder::default();
        render(&mut rec, &matrix, &cfg, Some(&logo)).unwrap();
        assert_eq!(rec.images, vec![Rect::new(240.0, 240.0, 120.0, 120.0)]);
        assert_eq!(*rec.clip_depth.last().unwrap(), 0);
        assert!(matches!(rec.fills.last().unwrap().0, Shape::Circle { r, .. } if r == 65.0));
    }

    #[test]
    fn test_gradient_paint() {
        let cfg = config(QrOptions {
            gradient: Some(true),
            gradient_colors: Some("#ff0000,#00ff00".into()),
            ..QrOptions::with_url("x")
        });
        match base_paint(&cfg) {
            Paint::Gradient(g) => assert_eq!(g.stops.len(), 2),
            other => panic!("expected gradient, got {other:?}"),
        }
    }

    #[test]
    fn test_circular_eyes_follow_gradient_without_eye_color() {
        let matrix = ModuleMatrix::from_fn(21, |_, _| true).unwrap();
        let cfg = config(QrOptions {
            eye_shape: Some(EyeShape::Circle),
            gradient: Some(true),
            ..QrOptions::with_url("x")
        });
        let mut rec = Recorder::default();
        render(&mut rec, &matrix, &cfg, None).unwrap();
        let discs: Vec<&Paint> = rec
            .fills
            .iter()
            .filter(|(s, _)| matches!(s, Shape::Circle { .. }))
            .map(|(_, p)| p)
            .collect();
        assert_eq!(discs.len(), 9);
        for (i, paint) in discs.into_iter().enumerate() {
            if i % 3 == 1 {
                assert_eq!(*paint, Paint::Solid(cfg.background.clone()));
            } else {
                assert_eq!(*paint, base_paint(&cfg));
            }
        }
    }

    #[test]
    fn test_card_clip_cuts_corner_module() {
        let matrix = ModuleMatrix::from_fn(21, |_, _| true).unwrap();
        let cfg = config(QrOptions {
            size: Some(210),
            padding: Some(0),
            margin: Some(0),
            rounded: Some(false),
            corner_radius: Some(100.0),
            ..QrOptions::with_url("x")
        });
        let mut surface = RasterSurface::new(210, 210).unwrap();
        render(&mut surface, &matrix, &cfg, None).unwrap();
        let img = surface.into_image();
        // Module (0, 0) is a square over the canvas corner; only the clip removes it.
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(209, 0)[3], 0);
        assert_eq!(*img.get_pixel(105, 105), Rgba([0, 0, 0, 255]));
    }
}
