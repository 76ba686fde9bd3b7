//! Geometric primitives for diagram interchange.
//!
//! This module provides the geometric types used when synthesizing the
//! BPMN diagram block: shape bounds and edge waypoints.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! BPMN diagram interchange uses the same convention as SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use transit_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the top-left corner of the bounds.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_top_left(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Creates a square size
    pub fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the bottom-right corner as a Point
    pub fn max_point(self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Midpoint of the left edge
    pub fn left_mid(self) -> Point {
        Point::new(self.min_x, self.min_y + self.height() / 2.0)
    }

    /// Midpoint of the right edge
    pub fn right_mid(self) -> Point {
        Point::new(self.max_x, self.min_y + self.height() / 2.0)
    }

    /// Midpoint of the top edge
    pub fn top_mid(self) -> Point {
        Point::new(self.min_x + self.width() / 2.0, self.min_y)
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new_and_accessors() {
        let point = Point::new(10.0, 20.0);
        assert_approx_eq!(f32, point.x(), 10.0);
        assert_approx_eq!(f32, point.y(), 20.0);

        let moved = point.add_point(Point::new(5.0, -7.0));
        assert_approx_eq!(f32, moved.x(), 15.0);
        assert_approx_eq!(f32, moved.y(), 13.0);
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Point::new(100.0, 100.0).to_bounds(Size::new(120.0, 80.0));

        assert_approx_eq!(f32, bounds.min_x(), 100.0);
        assert_approx_eq!(f32, bounds.min_y(), 100.0);
        assert_eq!(bounds.max_point(), Point::new(220.0, 180.0));
        assert_eq!(bounds.to_size(), Size::new(120.0, 80.0));
    }

    #[test]
    fn test_bounds_from_center() {
        let bounds = Bounds::new_from_center(Point::new(220.0, 180.0), Size::square(36.0));

        assert_approx_eq!(f32, bounds.min_x(), 202.0);
        assert_approx_eq!(f32, bounds.min_y(), 162.0);
        assert_approx_eq!(f32, bounds.width(), 36.0);
        assert_approx_eq!(f32, bounds.height(), 36.0);
    }

    #[test]
    fn test_bounds_anchor_points() {
        let bounds = Bounds::new_from_top_left(Point::new(100.0, 100.0), Size::new(120.0, 80.0));

        assert_eq!(bounds.left_mid(), Point::new(100.0, 140.0));
        assert_eq!(bounds.right_mid(), Point::new(220.0, 140.0));
        assert_eq!(bounds.top_mid(), Point::new(160.0, 100.0));
        assert_eq!(bounds.max_point(), Point::new(220.0, 180.0));
        assert_eq!(bounds.center(), Point::new(160.0, 140.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (1.0f32..500.0, 1.0f32..500.0).prop_map(|(w, h)| Size::new(w, h))
    }

    /// Centering a box on a point keeps that point as the box center.
    fn check_center_roundtrip(center: Point, size: Size) -> Result<(), TestCaseError> {
        let bounds = Bounds::new_from_center(center, size);

        prop_assert!(approx_eq!(f32, bounds.center().x(), center.x(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, bounds.center().y(), center.y(), epsilon = 0.01));
        Ok(())
    }

    /// Anchor points lie on the box edges.
    fn check_anchors_on_edges(top_left: Point, size: Size) -> Result<(), TestCaseError> {
        let bounds = Bounds::new_from_top_left(top_left, size);

        prop_assert!(approx_eq!(f32, bounds.left_mid().x(), bounds.min_x()));
        prop_assert!(approx_eq!(f32, bounds.right_mid().x(), bounds.max_point().x()));
        prop_assert!(approx_eq!(f32, bounds.top_mid().y(), bounds.min_y()));
        prop_assert!(bounds.left_mid().y() >= bounds.min_y());
        prop_assert!(bounds.left_mid().y() <= bounds.max_point().y());
        Ok(())
    }

    proptest! {
        #[test]
        fn center_roundtrip(center in point_strategy(), size in size_strategy()) {
            check_center_roundtrip(center, size)?;
        }

        #[test]
        fn anchors_on_edges(top_left in point_strategy(), size in size_strategy()) {
            check_anchors_on_edges(top_left, size)?;
        }
    }
}
