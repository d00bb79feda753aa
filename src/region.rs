//! Finder pattern ("eye") zones.
//!
//! Real symbols carry finder patterns in three corners only; there is no
//! bottom-right eye.

/// Side length of a finder pattern zone, in modules.
pub const EYE_SIZE: usize = 7;

/// One of the three finder pattern zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeRegion {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl EyeRegion {
    pub const ALL: [EyeRegion; 3] = [EyeRegion::TopLeft, EyeRegion::TopRight, EyeRegion::BottomLeft];

    /// `(row, col)` of the zone's top-left module in a symbol of side `n`.
    pub fn anchor(self, n: usize) -> (usize, usize) {
        let far = n.saturating_sub(EYE_SIZE);
        match self {
            EyeRegion::TopLeft => (0, 0),
            EyeRegion::TopRight => (0, far),
            EyeRegion::BottomLeft => (far, 0),
        }
    }

    /// `(row, col)` of the module at the middle of the zone.
    pub fn center(self, n: usize) -> (usize, usize) {
        let (row, col) = self.anchor(n);
        (row + EYE_SIZE / 2, col + EYE_SIZE / 2)
    }

    /// The zone containing `(row, col)`, if any.
    pub fn containing(row: usize, col: usize, n: usize) -> Option<EyeRegion> {
        let far = n.saturating_sub(EYE_SIZE);
        if row < EYE_SIZE && col < EYE_SIZE {
            Some(EyeRegion::TopLeft)
        } else if row < EYE_SIZE && col >= far {
            Some(EyeRegion::TopRight)
        } else if row >= far && col < EYE_SIZE {
            Some(EyeRegion::BottomLeft)
        } else {
            None
        }
    }
}

/// Returns whether `(row, col)` lies in one of the three eye zones of a
/// symbol with side `n`. Purely positional; module values are not consulted.
pub fn is_eye_region(row: usize, col: usize, n: usize) -> bool {
    EyeRegion::containing(row, col, n).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_region_count_is_independent_of_size() {
        for n in [21, 25, 57, 177] {
            let count = (0..n)
                .flat_map(|r| (0..n).map(move |c| (r, c)))
                .filter(|&(r, c)| is_eye_region(r, c, n))
                .count();
            assert_eq!(count, 3 * 49, "size {n}");
        }
    }

    #[test]
    fn test_no_bottom_right_eye() {
        let n = 25;
        for r in n - 7..n {
            for c in n - 7..n {
                assert!(!is_eye_region(r, c, n));
            }
        }
    }

    #[test]
    fn test_zone_boundaries() {
        let n = 21;
        assert!(is_eye_region(6, 6, n));
        assert!(!is_eye_region(7, 6, n));
        assert!(!is_eye_region(6, 13, n));
        assert!(is_eye_region(6, 14, n));
        assert!(is_eye_region(14, 0, n));
        assert!(!is_eye_region(13, 0, n));
    }

    #[test]
    fn test_centers() {
        assert_eq!(EyeRegion::TopLeft.center(21), (3, 3));
        assert_eq!(EyeRegion::TopRight.center(21), (3, 17));
        assert_eq!(EyeRegion::BottomLeft.center(21), (17, 3));
        assert_eq!(EyeRegion::containing(17, 3, 21), Some(EyeRegion::BottomLeft));
    }
}
