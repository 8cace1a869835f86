// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stage-space rectangles (y up) and their integer snapping.

use kurbo::{Point, Rect};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Axis-aligned stage-space rectangle.
///
/// Stage space has y pointing up, so a well-formed rectangle has `top >= bottom`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StageRect {
    /// Smallest x.
    pub left: f64,
    /// Largest y.
    pub top: f64,
    /// Largest x.
    pub right: f64,
    /// Smallest y.
    pub bottom: f64,
}

impl StageRect {
    /// Create a rectangle from its edges.
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Zero-area rectangle at `p`.
    pub const fn at_point(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// `right - left`.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// `top - bottom`.
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// True if `other` lies inside `self`, edges included.
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.left <= other.left
            && self.right >= other.right
            && self.bottom <= other.bottom
            && self.top >= other.top
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.max(other.top),
            self.right.max(other.right),
            self.bottom.min(other.bottom),
        )
    }

    /// Limit the rectangle to `bounds`.
    ///
    /// A rectangle entirely outside `bounds` collapses onto the nearest edge, so the result
    /// always lies within `bounds`.
    pub fn clamp(&self, bounds: &Self) -> Self {
        let left = self.left.max(bounds.left).min(bounds.right);
        let right = self.right.min(bounds.right).max(bounds.left);
        let bottom = self.bottom.max(bounds.bottom).min(bounds.top);
        let top = self.top.min(bounds.top).max(bounds.bottom);
        Self::new(left, top, right, bottom)
    }

    /// Expand outward to integer edges.
    pub fn snap_to_int(&self) -> IntRect {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Stage coordinates are far inside the i32 range; `as` saturates otherwise."
        )]
        IntRect::new(
            self.left.floor() as i32,
            self.top.ceil() as i32,
            self.right.ceil() as i32,
            self.bottom.floor() as i32,
        )
    }

    /// The same rectangle as a kurbo [`Rect`] (`y0 = bottom`, `y1 = top`).
    pub fn to_kurbo(&self) -> Rect {
        Rect::new(self.left, self.bottom, self.right, self.top)
    }
}

impl From<Rect> for StageRect {
    fn from(r: Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y1, r.x1, r.y0)
    }
}

impl From<StageRect> for Rect {
    fn from(r: StageRect) -> Self {
        r.to_kurbo()
    }
}

/// Rectangle of integer stage coordinates with inclusive edges.
///
/// `IntRect::new(0, 1, 1, 0)` covers the four points (0, 0), (1, 0), (0, 1), and (1, 1).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntRect {
    /// Smallest x.
    pub left: i32,
    /// Largest y.
    pub top: i32,
    /// Largest x.
    pub right: i32,
    /// Smallest y.
    pub bottom: i32,
}

impl IntRect {
    /// Create a rectangle from its inclusive edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// True if no integer point lies inside.
    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.bottom > self.top
    }

    /// Overlap of both rectangles; `None` if they share no integer point.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let r = Self::new(
            self.left.max(other.left),
            self.top.min(other.top),
            self.right.min(other.right),
            self.bottom.max(other.bottom),
        );
        (!r.is_empty()).then_some(r)
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.max(other.top),
            self.right.max(other.right),
            self.bottom.min(other.bottom),
        )
    }

    /// Number of integer points inside.
    pub fn point_count(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let w = i64::from(self.right) - i64::from(self.left) + 1;
        let h = i64::from(self.top) - i64::from(self.bottom) + 1;
        w.unsigned_abs() * h.unsigned_abs()
    }

    /// Integer points in scan order: rows bottom to top, columns left to right.
    pub fn points(self) -> impl Iterator<Item = (i32, i32)> {
        let Self {
            left,
            top,
            right,
            bottom,
        } = self;
        (bottom..=top).flat_map(move |y| (left..=right).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_collapses_outside_rect_onto_edge() {
        let stage = StageRect::new(-240.0, 180.0, 240.0, -180.0);
        let inside = StageRect::new(-10.0, 5.0, 10.0, -5.0);
        assert_eq!(inside.clamp(&stage), inside);

        let overlapping = StageRect::new(200.0, 200.0, 300.0, 100.0);
        assert_eq!(
            overlapping.clamp(&stage),
            StageRect::new(200.0, 180.0, 240.0, 100.0)
        );

        let beyond = StageRect::new(300.0, 10.0, 400.0, 0.0);
        let clamped = beyond.clamp(&stage);
        assert_eq!(clamped.left, 240.0);
        assert_eq!(clamped.right, 240.0);
        assert!(stage.contains_rect(&clamped));
    }

    #[test]
    fn snapping_expands_outward() {
        let r = StageRect::new(-1.5, 2.25, 3.1, -0.5);
        assert_eq!(r.snap_to_int(), IntRect::new(-2, 3, 4, -1));
        let exact = StageRect::new(0.0, 3.0, 3.0, 0.0);
        assert_eq!(exact.snap_to_int(), IntRect::new(0, 3, 3, 0));
    }

    #[test]
    fn int_rect_edges_are_inclusive() {
        let a = IntRect::new(0, 3, 3, 0);
        let b = IntRect::new(3, 0, 6, -3);
        let corner = a.intersect(&b).unwrap();
        assert_eq!(corner, IntRect::new(3, 0, 3, 0));
        assert_eq!(corner.point_count(), 1);
        assert_eq!(corner.points().collect::<alloc::vec::Vec<_>>(), [(3, 0)]);

        let c = IntRect::new(4, 0, 6, -3);
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn scan_order_is_rows_bottom_up() {
        let r = IntRect::new(0, 1, 1, 0);
        let pts: alloc::vec::Vec<_> = r.points().collect();
        assert_eq!(pts, [(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(r.point_count(), 4);
    }

    #[test]
    fn kurbo_conversion_swaps_vertical_edges() {
        let r = StageRect::new(-2.0, 4.0, 2.0, -1.0);
        let k = r.to_kurbo();
        assert_eq!(k, Rect::new(-2.0, -1.0, 2.0, 4.0));
        assert_eq!(StageRect::from(k), r);
    }
}
