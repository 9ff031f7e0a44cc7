//! Planar coordinates on the site floor plan.
//!
//! Units are whatever the site files use (metres, pixels of a floor plan, ...).
//! Only relative distances matter to the assignment.

/// A position on the floor plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Create a new position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two positions.
    ///
    /// Non-negative, symmetric, and zero iff both points coincide.
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are finite (no NaN, no infinities).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pythagorean_triple() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn finiteness() {
        assert!(Position::new(1.0, -2.5).is_finite());
        assert!(!Position::new(f64::NAN, 0.0).is_finite());
        assert!(!Position::new(0.0, f64::INFINITY).is_finite());
    }

    fn coord() -> impl Strategy<Value = f64> {
        -1.0e6..1.0e6f64
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(ax in coord(), ay in coord(), bx in coord(), by in coord()) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            prop_assert_eq!(a.distance(&b), b.distance(&a));
        }

        #[test]
        fn distance_is_non_negative(ax in coord(), ay in coord(), bx in coord(), by in coord()) {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            prop_assert!(a.distance(&b) >= 0.0);
        }

        #[test]
        fn distance_to_self_is_zero(x in coord(), y in coord()) {
            let p = Position::new(x, y);
            prop_assert_eq!(p.distance(&p), 0.0);
        }

        #[test]
        fn distinct_points_are_apart(x in coord(), y in coord(), dx in 1.0..1.0e3f64) {
            let a = Position::new(x, y);
            let b = Position::new(x + dx, y);
            prop_assert!(a.distance(&b) > 0.0);
        }
    }
}
