//! Points, rectangles and closed outlines shared by both output surfaces.
//!
//! These types only describe geometry. Each surface lowers them into its
//! own representation: SVG path data, or a `tiny_skia` path for raster.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// An axis-aligned rectangle in output units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    /// A square of side `size` centered on `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, size: f64) -> Self {
        Rect::new(cx - size / 2.0, cy - size / 2.0, size, size)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    Close,
}

/// Corners of a rectangle to round, clockwise from the top-left.
pub type Corners = [bool; 4];

/// A sequence of drawing commands forming one or more closed outlines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    cmds: Vec<PathCmd>,
}

impl Path {
    pub fn new() -> Self {
        Path::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.cmds.push(PathCmd::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.cmds.push(PathCmd::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.cmds
            .push(PathCmd::QuadTo(Point::new(cx, cy), Point::new(x, y)));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.cmds.push(PathCmd::Close);
        self
    }

    pub fn commands(&self) -> &[PathCmd] {
        &self.cmds
    }

    /// Number of curve segments in the path.
    pub fn curve_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|c| matches!(c, PathCmd::QuadTo(..)))
            .count()
    }

    /// Closed outline of `rect`, clockwise from the top-left, with a
    /// quadratic curve of radius `r` at each corner flagged in `corners` and
    /// a sharp turn at the others. `r` is not clamped here.
    pub fn rounded_corners(rect: Rect, r: f64, corners: Corners) -> Path {
        let [top_left, top_right, bottom_right, bottom_left] = corners.map(|c| c && r > 0.0);
        let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
        let mut path = Path::new();

        if top_left {
            path.move_to(left + r, top);
        } else {
            path.move_to(left, top);
        }

        if top_right {
            path.line_to(right - r, top);
            path.quad_to(right, top, right, top + r);
        } else {
            path.line_to(right, top);
        }

        if bottom_right {
            path.line_to(right, bottom - r);
            path.quad_to(right, bottom, right - r, bottom);
        } else {
            path.line_to(right, bottom);
        }

        if bottom_left {
            path.line_to(left + r, bottom);
            path.quad_to(left, bottom, left, bottom - r);
        } else {
            path.line_to(left, bottom);
        }

        if top_left {
            path.line_to(left, top + r);
            path.quad_to(left, top, left + r, top);
        } else {
            path.line_to(left, top);
        }

        path.close();
        path
    }

    /// `rect` with all four corners rounded by `r`, clamped to half the
    /// shorter side.
    pub fn rounded_rect(rect: Rect, r: f64) -> Path {
        let r = r.max(0.0).min(rect.width / 2.0).min(rect.height / 2.0);
        Path::rounded_corners(rect, r, [true; 4])
    }
}

/// A filled primitive handed to a drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Rectangle with an optional uniform corner radius.
    Rect { rect: Rect, radius: f64 },
    Circle { cx: f64, cy: f64, r: f64 },
    Path(Path),
}

impl Shape {
    pub fn rect(rect: Rect) -> Self {
        Shape::Rect { rect, radius: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_corners_have_no_curves() {
        let path = Path::rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0);
        assert_eq!(path.curve_count(), 0);
        // Move, four edges, close.
        assert_eq!(path.commands().len(), 6);
    }

    #[test]
    fn test_rounded_rect_radius_is_clamped() {
        let path = Path::rounded_rect(Rect::new(0.0, 0.0, 10.0, 4.0), 100.0);
        assert_eq!(path.curve_count(), 4);
        assert_eq!(path.commands()[0], PathCmd::MoveTo(Point::new(2.0, 0.0)));
        for cmd in path.commands() {
            if let PathCmd::LineTo(p) | PathCmd::QuadTo(_, p) = cmd {
                assert!((0.0..=10.0).contains(&p.x) && (0.0..=4.0).contains(&p.y));
            }
        }
    }

    #[test]
    fn test_selected_corners_only() {
        let path = Path::rounded_corners(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0, [false, true, false, false]);
        assert_eq!(path.curve_count(), 1);
        assert_eq!(
            path.commands()[2],
            PathCmd::QuadTo(Point::new(10.0, 0.0), Point::new(10.0, 2.0))
        );
    }
}
