//! Convex polygon clipping for stroke-outline overlap
//!
//! Stroke outlines are decomposed into convex pieces, so the only boolean
//! operations needed are convex-convex intersection and convex difference.

use crate::geometry::point::{LENGTH_EPSILON, Point2D};

/// Closed polygon given by its vertices; the closing edge is implicit
pub type Polygon = Vec<Point2D>;

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Smallest corner
    pub min: Point2D,
    /// Largest corner
    pub max: Point2D,
}

impl Bounds {
    /// Bounding box of a point set, `None` when empty
    pub fn of<'a>(points: impl IntoIterator<Item = &'a Point2D>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(acc.map_or(Self { min: *p, max: *p }, |b: Self| Self {
                min: Point2D::new(b.min.x.min(p.x), b.min.y.min(p.y)),
                max: Point2D::new(b.max.x.max(p.x), b.max.y.max(p.y)),
            }))
        })
    }

    /// Whether two boxes share any area or boundary
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Box width
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Box height
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Signed area, positive for counter-clockwise vertex order in a y-up frame
pub fn signed_area(polygon: &[Point2D]) -> f64 {
    edges(polygon).map(|(a, b)| a.perp_dot(b)).sum::<f64>() / 2.0
}

/// Whether every turn along the boundary has the same sign
pub fn is_convex(polygon: &[Point2D]) -> bool {
    let count = polygon.len();
    if count < 3 {
        return false;
    }

    let mut sign = 0.0_f64;
    for index in 0..count {
        let (Some(a), Some(b), Some(c)) = (
            polygon.get(index),
            polygon.get((index + 1) % count),
            polygon.get((index + 2) % count),
        ) else {
            return false;
        };
        let turn = (*b - *a).perp_dot(*c - *b);
        if turn.abs() < LENGTH_EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = turn.signum();
        } else if turn.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

/// Copy of the polygon with positive signed area
pub fn counter_clockwise(polygon: &[Point2D]) -> Polygon {
    let mut oriented = polygon.to_vec();
    if signed_area(&oriented) < 0.0 {
        oriented.reverse();
    }
    oriented
}

/// Point-in-polygon test by ray casting; works for any simple polygon
pub fn contains_point(polygon: &[Point2D], point: Point2D) -> bool {
    let mut inside = false;
    for (a, b) in edges(polygon) {
        if (a.y > point.y) != (b.y > point.y) {
            let crossing_x = (b.x - a.x).mul_add((point.y - a.y) / (b.y - a.y), a.x);
            if point.x < crossing_x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Keep the part of `subject` on the left of the directed line `a -> b`
///
/// One Sutherland-Hodgman pass; `keep_left = false` keeps the right side.
pub fn clip_half_plane(subject: &[Point2D], a: Point2D, b: Point2D, keep_left: bool) -> Polygon {
    let direction = b - a;
    let side = |p: Point2D| {
        let value = direction.perp_dot(p - a);
        if keep_left { value } else { -value }
    };

    let mut output = Vec::with_capacity(subject.len() + 2);
    for (current, next) in edges(subject) {
        let current_side = side(current);
        let next_side = side(next);

        if current_side >= 0.0 {
            output.push(current);
        }
        if (current_side >= 0.0) != (next_side >= 0.0) {
            let t = current_side / (current_side - next_side);
            output.push(current.lerp(next, t));
        }
    }
    output
}

/// Intersection of a polygon with a convex clip polygon
///
/// Returns an empty polygon when the overlap has no area.
pub fn clip_convex(subject: &[Point2D], clip: &[Point2D]) -> Polygon {
    let clip = counter_clockwise(clip);
    let mut output = subject.to_vec();

    for (a, b) in edges(&clip) {
        if output.is_empty() {
            break;
        }
        output = clip_half_plane(&output, a, b, true);
    }

    if signed_area(&output).abs() < LENGTH_EPSILON {
        Vec::new()
    } else {
        output
    }
}

/// Convex pieces of `subject` lying outside the convex `hole`
///
/// Walks the hole's edges, peeling off the part of the remaining subject on
/// the far side of each edge; what is left at the end lies inside the hole
/// and is discarded.
pub fn subtract_convex(subject: &[Point2D], hole: &[Point2D]) -> Vec<Polygon> {
    let hole = counter_clockwise(hole);
    let mut remaining = subject.to_vec();
    let mut pieces = Vec::new();

    for (a, b) in edges(&hole) {
        if remaining.is_empty() {
            break;
        }
        let outside = clip_half_plane(&remaining, a, b, false);
        if signed_area(&outside).abs() >= LENGTH_EPSILON {
            pieces.push(outside);
        }
        remaining = clip_half_plane(&remaining, a, b, true);
    }

    pieces
}

/// Boundary edges as `(from, to)` pairs, including the closing edge
pub fn edges(polygon: &[Point2D]) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
    polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}
