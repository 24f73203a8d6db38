//! Axis-aligned rectangles and overlap tests
//!
//! Every interaction in the game reduces to "do these two boxes overlap".
//! Coordinates are world units with y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Anything with a world-space bounding box
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// True iff the rectangles intersect with positive area.
///
/// Strict comparisons on all four sides: boxes that only share an edge do
/// not overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Overlap test for any two bounded things
#[inline]
pub fn touching(a: &impl Bounded, b: &impl Bounded) -> bool {
    overlaps(&a.bounds(), &b.bounds())
}

/// How deep `a` sits inside `b`: the smaller of the two axis overlaps,
/// or zero when they are apart.
pub fn penetration(a: &Rect, b: &Rect) -> f32 {
    let x = a.right().min(b.right()) - a.x.max(b.x);
    let y = a.bottom().min(b.bottom()) - a.y.max(b.y);
    x.min(y).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_boxes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!((penetration(&a, &b) - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let corner = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
        assert!(!overlaps(&a, &corner));
        assert_eq!(penetration(&a, &right), 0.0);
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    // Whole-unit coordinates keep edge arithmetic exact
    fn rect() -> impl Strategy<Value = Rect> {
        (-500i32..500, -500i32..500, 1i32..200, 1i32..200)
            .prop_map(|(x, y, w, h)| Rect::new(x as f32, y as f32, w as f32, h as f32))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in rect(), b in rect()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn edge_neighbours_never_overlap(a in rect(), h in 1i32..200, dy in -100i32..100) {
            let (h, dy) = (h as f32, dy as f32);
            let right = Rect::new(a.right(), a.y + dy, 10.0, h);
            let left = Rect::new(a.x - 10.0, a.y + dy, 10.0, h);
            prop_assert!(!overlaps(&a, &right));
            prop_assert!(!overlaps(&a, &left));
        }

        #[test]
        fn penetration_positive_iff_overlap(a in rect(), b in rect()) {
            prop_assert_eq!(penetration(&a, &b) > 0.0, overlaps(&a, &b));
        }
    }
}
