//! Circular finder patterns.
//!
//! Each eye becomes three concentric discs centered on the zone's middle
//! module: a 7-module disc in the eye color, a 5-module disc in the
//! background color carving out the ring, and a 3-module dot.

use crate::geometry::Shape;
use crate::paint::{HexColor, Paint};
use crate::region::EyeRegion;
use crate::surface::Surface;

/// Radii of the three discs, in module widths, outermost first.
pub const OUTER_RADIUS: f64 = 3.5;
pub const GAP_RADIUS: f64 = 2.5;
pub const INNER_RADIUS: f64 = 1.5;

/// Placement of the module grid on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Canvas position of module `(0, 0)`'s top-left corner.
    pub origin_x: f64,
    pub origin_y: f64,
    pub module_size: f64,
    /// Side length in modules.
    pub count: usize,
}

impl Grid {
    /// Top-left corner of the cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.origin_x + col as f64 * self.module_size,
            self.origin_y + row as f64 * self.module_size,
        )
    }

    /// Center of the cell at `(row, col)`.
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        let (x, y) = self.cell(row, col);
        (x + self.module_size / 2.0, y + self.module_size / 2.0)
    }
}

/// The three discs for one eye, outermost first, each with its fill.
pub fn eye_discs(
    grid: &Grid,
    region: EyeRegion,
    eye_paint: &Paint,
    background: &HexColor,
) -> [(Shape, Paint); 3] {
    let (row, col) = region.center(grid.count);
    let (cx, cy) = grid.cell_center(row, col);
    let disc = |r: f64| Shape::Circle { cx, cy, r: r * grid.module_size };
    [
        (disc(OUTER_RADIUS), eye_paint.clone()),
        (disc(GAP_RADIUS), Paint::Solid(background.clone())),
        (disc(INNER_RADIUS), eye_paint.clone()),
    ]
}

/// Draws all three circular eyes.
pub fn draw_circular_eyes<S: Surface>(
    surface: &mut S,
    grid: &Grid,
    eye_paint: &Paint,
    background: &HexColor,
) {
    for region in EyeRegion::ALL {
        for (shape, paint) in eye_discs(grid, region, eye_paint, background) {
            surface.fill(&shape, &paint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discs_are_concentric_on_zone_center() {
        let grid = Grid { origin_x: 40.0, origin_y: 40.0, module_size: 10.0, count: 21 };
        let fg = Paint::Solid(HexColor::parse("#112233").unwrap());
        let bg = HexColor::parse("#ffffff").unwrap();
        let discs = eye_discs(&grid, EyeRegion::TopRight, &fg, &bg);
        let radii: Vec<f64> = discs
            .iter()
            .map(|(s, _)| match s {
                Shape::Circle { cx, cy, r } => {
                    // Column 17 center: 40 + 17.5 * 10; row 3 center: 40 + 3.5 * 10.
                    assert_eq!((*cx, *cy), (215.0, 75.0));
                    *r
                }
                other => panic!("unexpected shape {other:?}"),
            })
            .collect();
        assert_eq!(radii, vec![35.0, 25.0, 15.0]);
        assert_eq!(discs[1].1, Paint::Solid(bg));
        assert_eq!(discs[2].1, fg);
    }
}
