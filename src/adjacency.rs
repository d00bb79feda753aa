//! Neighbor occupancy around a module, and the corner/edge decisions that
//! follow from it.
//!
//! A corner is only rounded when both sides meeting at that corner face
//! empty space. Runs of dark modules therefore merge into one smooth blob
//! whose outline is rounded only where it meets light modules.

use crate::matrix::ModuleMatrix;

/// How far an edge is pushed out (in output units) toward a dark neighbor,
/// so anti-aliased edges of adjacent modules overlap instead of leaving a seam.
pub const SEAM_GAP: f64 = 0.5;

/// Occupancy of the four orthogonal neighbors of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

/// Which corners of a module outline are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CornerRounding {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_right: bool,
    pub bottom_left: bool,
}

/// Outward offset applied to each side of a module outline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeExtension {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Reads the four neighbors of `(row, col)`. Cells outside the grid count
/// as light.
pub fn neighbors_of(matrix: &ModuleMatrix, row: usize, col: usize) -> Neighbors {
    let (r, c) = (row as isize, col as isize);
    Neighbors {
        top: matrix.get(r - 1, c),
        right: matrix.get(r, c + 1),
        bottom: matrix.get(r + 1, c),
        left: matrix.get(r, c - 1),
    }
}

impl Neighbors {
    /// Corners whose two adjoining sides are both free.
    pub fn corner_rounding(&self) -> CornerRounding {
        CornerRounding {
            top_left: !self.top && !self.left,
            top_right: !self.top && !self.right,
            bottom_right: !self.bottom && !self.right,
            bottom_left: !self.bottom && !self.left,
        }
    }

    /// [`SEAM_GAP`] on every side that touches a dark neighbor, zero elsewhere.
    pub fn edge_extension(&self) -> EdgeExtension {
        let gap = |set: bool| if set { SEAM_GAP } else { 0.0 };
        EdgeExtension {
            top: gap(self.top),
            right: gap(self.right),
            bottom: gap(self.bottom),
            left: gap(self.left),
        }
    }
}

impl CornerRounding {
    pub const NONE: CornerRounding = CornerRounding {
        top_left: false,
        top_right: false,
        bottom_right: false,
        bottom_left: false,
    };

    pub const ALL: CornerRounding = CornerRounding {
        top_left: true,
        top_right: true,
        bottom_right: true,
        bottom_left: true,
    };

    pub fn count(&self) -> usize {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
            .iter()
            .filter(|&&c| c)
            .count()
    }
}
