//! Geometric primitives used by the layout engine and the snapshot exporter.
//!
//! - [`Point`] - a position or displacement in the plane
//! - [`Bounds`] - an axis-aligned rectangle given by its min/max corners
//! - [`Insets`] - per-side margins used to shrink a canvas into a drawing area
//! - [`Boundary`] - a containing shape that bodies must not leave

/// A point (or displacement vector) in 2D space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
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

    /// Returns a copy of the point with a different x-coordinate
    pub fn with_x(self, x: f32) -> Self {
        Self { x, ..self }
    }

    /// Returns a copy of the point with a different y-coordinate
    pub fn with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Checks that both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Angle of the vector from the origin, in radians
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Point at `distance` from `self` in the direction `angle` (radians)
    pub fn polar_offset(self, angle: f32, distance: f32) -> Self {
        Self {
            x: self.x + distance * angle.cos(),
            y: self.y + distance * angle.sin(),
        }
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
    /// Creates bounds from two opposite corners, in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates bounds covering a `width` x `height` canvas anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::from_corners(Point::default(), Point::new(width, height))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Merges two bounds into the smallest bounds containing both
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Shrinks the bounds by the given insets.
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x + insets.left(),
            min_y: self.min_y + insets.top(),
            max_x: self.max_x - insets.right(),
            max_y: self.max_y - insets.bottom(),
        }
    }

    /// Bounds of a circle
    pub fn around_circle(center: Point, radius: f32) -> Self {
        Self {
            min_x: center.x - radius,
            min_y: center.y - radius,
            max_x: center.x + radius,
            max_y: center.y + radius,
        }
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }
}

/// A containing shape that clamps body positions.
///
/// Both variants are hard constraints applied after every relaxation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// Bodies are kept so that `distance(center, body) + body.radius <= radius`.
    ///
    /// A body that leaves the circle is moved back along the ray from the
    /// center through its current position, keeping its angle.
    Circle { center: Point, radius: f32 },

    /// Bodies are kept inside an axis-aligned rectangle.
    ///
    /// With `inset_by_radius` the whole circle must stay inside, otherwise
    /// only the center is clamped.
    Rect { bounds: Bounds, inset_by_radius: bool },
}

impl Boundary {
    /// Circular boundary
    pub fn circle(center: Point, radius: f32) -> Self {
        Self::Circle { center, radius }
    }

    /// Rectangular boundary clamping whole circles
    pub fn rect(bounds: Bounds) -> Self {
        Self::Rect {
            bounds,
            inset_by_radius: true,
        }
    }

    /// Rectangular boundary clamping only body centers
    pub fn rect_centers(bounds: Bounds) -> Self {
        Self::Rect {
            bounds,
            inset_by_radius: false,
        }
    }

    /// Whether a body of `radius` can be placed inside this boundary at all.
    ///
    /// Bodies that are not admitted must be filtered out by the caller; the
    /// clamp has no meaningful answer for them.
    pub fn admits(&self, radius: f32) -> bool {
        match *self {
            Self::Circle {
                radius: boundary_radius,
                ..
            } => radius <= boundary_radius,
            Self::Rect {
                bounds,
                inset_by_radius,
            } => {
                !inset_by_radius
                    || (2.0 * radius <= bounds.width() && 2.0 * radius <= bounds.height())
            }
        }
    }

    /// Returns `position` moved back inside the boundary for a body of `radius`.
    ///
    /// Positions already inside are returned unchanged.
    pub fn clamp(&self, position: Point, radius: f32) -> Point {
        match *self {
            Self::Circle {
                center,
                radius: boundary_radius,
            } => {
                let offset = position.sub_point(center);
                let distance = offset.hypot();
                if distance + radius <= boundary_radius || distance == 0.0 {
                    return position;
                }
                let allowed = (boundary_radius - radius).max(0.0);
                center.polar_offset(offset.angle(), allowed)
            }
            Self::Rect {
                bounds,
                inset_by_radius,
            } => {
                let pad = if inset_by_radius { radius } else { 0.0 };
                Point::new(
                    clamp_axis(position.x(), bounds.min_x() + pad, bounds.max_x() - pad),
                    clamp_axis(position.y(), bounds.min_y() + pad, bounds.max_y() - pad),
                )
            }
        }
    }

    /// Whether a body of `radius` at `position` lies inside within `tolerance`.
    pub fn contains(&self, position: Point, radius: f32, tolerance: f32) -> bool {
        match *self {
            Self::Circle {
                center,
                radius: boundary_radius,
            } => position.distance(center) + radius <= boundary_radius + tolerance,
            Self::Rect {
                bounds,
                inset_by_radius,
            } => {
                let pad = if inset_by_radius { radius } else { 0.0 };
                position.x() - pad >= bounds.min_x() - tolerance
                    && position.x() + pad <= bounds.max_x() + tolerance
                    && position.y() - pad >= bounds.min_y() - tolerance
                    && position.y() + pad <= bounds.max_y() + tolerance
            }
        }
    }
}

/// Clamps `value` into `[lo, hi]`, collapsing to the midpoint when the
/// interval is empty.
fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        return (lo + hi) / 2.0;
    }
    value.max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_default_is_zero() {
        assert!(Point::default().is_zero());
        assert!(!Point::new(1.0, 0.0).is_zero());
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1.add_point(p2), Point::new(7.0, 11.0));
        assert_eq!(p1.sub_point(p2), Point::new(3.0, 5.0));
    }

    #[test]
    fn test_point_distance() {
        assert_eq!(Point::new(3.0, 4.0).hypot(), 5.0);
        assert_eq!(Point::new(1.0, 1.0).distance(Point::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn test_point_polar_offset() {
        let p = Point::new(1.0, 1.0).polar_offset(std::f32::consts::FRAC_PI_2, 2.0);
        assert_approx_eq!(f32, p.x(), 1.0, epsilon = 1e-6);
        assert_approx_eq!(f32, p.y(), 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f32::NAN, 2.0).is_finite());
    }

    #[test]
    fn test_bounds_from_corners_normalizes() {
        let bounds = Bounds::from_corners(Point::new(10.0, 2.0), Point::new(0.0, 8.0));
        assert_eq!(bounds.min_x(), 0.0);
        assert_eq!(bounds.min_y(), 2.0);
        assert_eq!(bounds.max_x(), 10.0);
        assert_eq!(bounds.max_y(), 8.0);
        assert_eq!(bounds.center(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_bounds_inset() {
        let bounds = Bounds::from_size(1100.0, 650.0).inset(Insets::new(30.0, 30.0, 30.0, 80.0));
        assert_eq!(bounds.min_x(), 80.0);
        assert_eq!(bounds.min_y(), 30.0);
        assert_eq!(bounds.max_x(), 1070.0);
        assert_eq!(bounds.max_y(), 620.0);
    }

    #[test]
    fn test_bounds_merge() {
        let a = Bounds::around_circle(Point::new(0.0, 0.0), 1.0);
        let b = Bounds::around_circle(Point::new(5.0, 5.0), 2.0);
        let merged = a.merge(&b);
        assert_eq!(merged.min_x(), -1.0);
        assert_eq!(merged.max_x(), 7.0);
    }

    #[test]
    fn test_circle_clamp_inside_is_identity() {
        let boundary = Boundary::circle(Point::new(250.0, 250.0), 200.0);
        let p = Point::new(260.0, 240.0);
        assert_eq!(boundary.clamp(p, 10.0), p);
    }

    #[test]
    fn test_circle_clamp_preserves_angle() {
        let boundary = Boundary::circle(Point::new(0.0, 0.0), 50.0);
        let clamped = boundary.clamp(Point::new(30.0, 40.0), 10.0);

        // Distance 50 + radius 10 exceeds 50, so the body lands at distance 40.
        assert_approx_eq!(f32, clamped.hypot(), 40.0, epsilon = 1e-4);
        assert_approx_eq!(f32, clamped.angle(), 40.0f32.atan2(30.0), epsilon = 1e-6);
        assert!(boundary.contains(clamped, 10.0, 1e-4));
    }

    #[test]
    fn test_circle_admits() {
        let boundary = Boundary::circle(Point::default(), 50.0);
        assert!(boundary.admits(50.0));
        assert!(!boundary.admits(60.0));
    }

    #[test]
    fn test_rect_clamp_with_and_without_radius() {
        let bounds = Bounds::from_size(100.0, 100.0);

        let whole = Boundary::rect(bounds).clamp(Point::new(-5.0, 120.0), 4.0);
        assert_eq!(whole, Point::new(4.0, 96.0));

        let centers = Boundary::rect_centers(bounds).clamp(Point::new(-5.0, 120.0), 4.0);
        assert_eq!(centers, Point::new(0.0, 100.0));
    }

    #[test]
    fn test_rect_clamp_narrow_rect_collapses_to_midpoint() {
        let boundary = Boundary::rect(Bounds::from_size(4.0, 100.0));
        let clamped = boundary.clamp(Point::new(0.0, 50.0), 5.0);
        assert_eq!(clamped.x(), 2.0);
    }
}
