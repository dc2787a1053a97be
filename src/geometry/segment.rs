//! Line segment queries: intersection, projection, distance and rotation
//!
//! Degenerate input (zero-length segments, parallel lines) never fails;
//! each routine documents the sentinel it returns instead.

use crate::geometry::point::{LENGTH_EPSILON, Point2D};

/// Intersection point of segments `a1-a2` and `b1-b2`
///
/// Solves `a1 + t·(a2 - a1) = b1 + u·(b2 - b1)` and accepts the solution only
/// when both `t` and `u` lie in `[0, 1]`. Parallel, collinear and
/// zero-length segments give `None`.
pub fn segment_intersection(
    a1: Point2D,
    a2: Point2D,
    b1: Point2D,
    b2: Point2D,
) -> Option<Point2D> {
    let r = a2 - a1;
    let s = b2 - b1;
    let determinant = r.perp_dot(s);

    if determinant.abs() < LENGTH_EPSILON {
        return None;
    }

    let offset = b1 - a1;
    let t = offset.perp_dot(s) / determinant;
    let u = offset.perp_dot(r) / determinant;

    ((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)).then(|| a1 + r * t)
}

/// Projection parameter of `p` onto `s1-s2`, clamped to `[0, 1]`
///
/// Returns `0.0` when the segment has no length.
pub fn projection_parameter(p: Point2D, s1: Point2D, s2: Point2D) -> f64 {
    let base = s2 - s1;
    let length_squared = base.dot(base);
    if length_squared < LENGTH_EPSILON {
        return 0.0;
    }
    ((p - s1).dot(base) / length_squared).clamp(0.0, 1.0)
}

/// Closest point to `p` on the segment `s1-s2`
pub fn project_onto_segment(p: Point2D, s1: Point2D, s2: Point2D) -> Point2D {
    s1.lerp(s2, projection_parameter(p, s1, s2))
}

/// Shortest distance from `p` to the segment `s1-s2`
///
/// A zero-length segment degrades to the distance from `p` to `s1`.
pub fn point_to_segment_distance(p: Point2D, s1: Point2D, s2: Point2D) -> f64 {
    p.distance(project_onto_segment(p, s1, s2))
}

/// Distance from `p` to the infinite line through `s1` and `s2`
///
/// Falls back to the distance from `p` to `s1` when the points coincide.
pub fn point_to_line_distance(p: Point2D, s1: Point2D, s2: Point2D) -> f64 {
    let base = s2 - s1;
    let length = base.length();
    if length < LENGTH_EPSILON {
        return p.distance(s1);
    }
    base.perp_dot(p - s1).abs() / length
}

/// Rotate `p` about `pivot` by `angle_deg` (positive turns +x towards +y)
pub fn rotate_point(p: Point2D, pivot: Point2D, angle_deg: f64) -> Point2D {
    pivot + Point2D::from_angle(angle_deg.to_radians()).rotate(p - pivot)
}

/// Normalize an angle in degrees to `(-180, 180]`
pub fn normalize_angle_deg(angle_deg: f64) -> f64 {
    let wrapped = angle_deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
