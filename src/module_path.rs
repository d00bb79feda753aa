//! Outline construction for a single dark module.

use crate::adjacency::{CornerRounding, EdgeExtension};
use crate::geometry::{Path, Rect, Shape};

/// Everything needed to outline one module: its cell, corner radius, which
/// corners round and how far each edge is pushed out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleShape {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub radius: f64,
    pub corners: CornerRounding,
    pub extension: EdgeExtension,
}

/// Builds the outline for the module cell at `(x, y)` with side `size`.
///
/// `radius` is in output units; it is capped at half the module size so
/// opposite corners never overlap.
pub fn build_module_path(
    x: f64,
    y: f64,
    size: f64,
    radius: f64,
    corners: CornerRounding,
    extension: EdgeExtension,
) -> ModuleShape {
    ModuleShape {
        x,
        y,
        size,
        radius: radius.clamp(0.0, size / 2.0),
        corners,
        extension,
    }
}

impl ModuleShape {
    /// The cell grown by the edge extensions.
    pub fn bounds(&self) -> Rect {
        let e = &self.extension;
        Rect::new(
            self.x - e.left,
            self.y - e.top,
            self.size + e.left + e.right,
            self.size + e.top + e.bottom,
        )
    }

    /// Corners that actually curve. A zero radius curves nothing.
    pub fn rounded_corners(&self) -> CornerRounding {
        if self.radius > 0.0 {
            self.corners
        } else {
            CornerRounding::NONE
        }
    }

    /// Closed outline, clockwise from the top-left, with a quadratic curve at
    /// each rounded corner and a sharp turn everywhere else.
    pub fn outline(&self) -> Path {
        let c = self.rounded_corners();
        Path::rounded_corners(
            self.bounds(),
            self.radius,
            [c.top_left, c.top_right, c.bottom_right, c.bottom_left],
        )
    }

    /// The simplest primitive with this outline: a plain or uniformly
    /// rounded rectangle when possible, the full outline otherwise.
    pub fn to_shape(&self) -> Shape {
        let c = self.rounded_corners();
        match c.count() {
            0 => Shape::rect(self.bounds()),
            4 => Shape::Rect {
                rect: self.bounds(),
                radius: self.radius,
            },
            _ => Shape::Path(self.outline()),
        }
    }
}
