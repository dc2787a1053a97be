//! Cubic bezier segments evaluated through `kurbo`

use crate::geometry::point::Point2D;
use kurbo::{CubicBez, ParamCurve, ParamCurveDeriv, Point};

/// Plane point as a `kurbo` point
pub const fn to_kurbo(point: Point2D) -> Point {
    Point::new(point.x, point.y)
}

/// `kurbo` point or vector as a plane point
pub const fn from_kurbo(point: Point) -> Point2D {
    Point2D::new(point.x, point.y)
}

/// Cubic bezier segment given by its four control points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    curve: CubicBez,
}

impl CubicBezier {
    /// Create a segment from its control points
    pub fn new(p0: Point2D, p1: Point2D, p2: Point2D, p3: Point2D) -> Self {
        Self {
            curve: CubicBez::new(to_kurbo(p0), to_kurbo(p1), to_kurbo(p2), to_kurbo(p3)),
        }
    }

    /// Curve start
    pub const fn start(&self) -> Point2D {
        from_kurbo(self.curve.p0)
    }

    /// Curve end
    pub const fn end(&self) -> Point2D {
        from_kurbo(self.curve.p3)
    }

    /// The underlying `kurbo` curve
    pub const fn as_kurbo(&self) -> &CubicBez {
        &self.curve
    }

    /// Point at parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point2D {
        from_kurbo(self.curve.eval(t))
    }

    /// First derivative at parameter `t`
    pub fn tangent_at(&self, t: f64) -> Point2D {
        from_kurbo(self.curve.deriv().eval(t))
    }

    /// Sample `segments + 1` evenly spaced points, endpoints included
    pub fn flatten(&self, segments: usize) -> Vec<Point2D> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|step| self.point_at(step as f64 / segments as f64))
            .collect()
    }
}
