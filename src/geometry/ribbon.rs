//! Ribbon outlines around centerlines and the disc caps drawn at strand ends

use crate::geometry::point::{PlaneExt, Point2D};
use crate::geometry::polygon::{Polygon, is_convex};

/// Four corners of an oriented rectangle, in boundary order
pub type Quad = [Point2D; 4];

/// Oriented rectangle of `width` centered on the segment `start-end`
///
/// Corners run `start + h`, `end + h`, `end - h`, `start - h` where `h` is the
/// unit perpendicular `(-dy, dx) / len` scaled by half the width. A
/// zero-length segment has no orientation and gives `None`.
pub fn ribbon_outline(start: Point2D, end: Point2D, width: f64) -> Option<Quad> {
    let normal = (end - start).perp().normalized()?;
    let half = normal * (width / 2.0);
    Some([start + half, end + half, end - half, start - half])
}

/// Left and right boundaries of a polyline stroked at `width`
///
/// Each vertex is offset along the averaged normal of its adjacent segments,
/// which gives mitred joins. Vertices closer together than the length
/// epsilon are skipped.
pub fn offset_polyline(points: &[Point2D], width: f64) -> (Vec<Point2D>, Vec<Point2D>) {
    let half_width = width / 2.0;
    let mut left = Vec::with_capacity(points.len());
    let mut right = Vec::with_capacity(points.len());

    for (index, point) in points.iter().enumerate() {
        let previous = index.checked_sub(1).and_then(|i| points.get(i));
        let next = points.get(index + 1);

        let incoming = previous.and_then(|p| (*point - *p).normalized());
        let outgoing = next.and_then(|n| (*n - *point).normalized());

        let tangent = match (incoming, outgoing) {
            (Some(a), Some(b)) => (a + b).normalized().unwrap_or(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => continue,
        };

        let normal = tangent.perp();
        // Mitre length grows as the turn sharpens; cap it to avoid spikes
        let miter_scale = incoming
            .map(|a| a.perp().dot(normal))
            .filter(|cos| *cos > 0.25)
            .map_or(1.0, |cos| 1.0 / cos);
        let offset = normal * (half_width * miter_scale);

        left.push(*point + offset);
        right.push(*point - offset);
    }

    (left, right)
}

/// Split a stroked polyline into convex pieces
///
/// Consecutive offset vertices form quads sharing edges exactly, so the
/// pieces tile the stroke without gaps. A quad bent past convexity is split
/// into two triangles.
pub fn stroke_pieces(points: &[Point2D], width: f64) -> Vec<Polygon> {
    let (left, right) = offset_polyline(points, width);
    let mut pieces = Vec::new();

    for index in 0..left.len().saturating_sub(1) {
        let (Some(l0), Some(l1), Some(r0), Some(r1)) = (
            left.get(index),
            left.get(index + 1),
            right.get(index),
            right.get(index + 1),
        ) else {
            continue;
        };

        let quad = vec![*l0, *l1, *r1, *r0];
        if is_convex(&quad) {
            pieces.push(quad);
        } else {
            pieces.push(vec![*l0, *l1, *r1]);
            pieces.push(vec![*l0, *r1, *r0]);
        }
    }

    pieces
}

/// Kind of cap drawn at a strand endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapShape {
    /// Complete circle marking an endpoint that accepts an attachment
    FullDisc,
    /// Half circle whose flat edge lies across the strand, merging with the attached neighbor
    HalfDisc,
}

/// Cap geometry at one strand endpoint
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndCap {
    /// Cap center, the endpoint itself
    pub center: Point2D,
    /// Cap radius
    pub radius: f64,
    /// Unit vector pointing from the strand body out through the endpoint
    pub facing: Point2D,
    /// Full or half disc
    pub shape: CapShape,
}

impl EndCap {
    /// Boundary polygon of the cap approximated with `segments` arc steps
    ///
    /// The half disc spans the side of the flat edge that faces `facing`.
    pub fn outline(&self, segments: usize) -> Polygon {
        let segments = segments.max(3);
        let (start_angle, sweep): (f64, f64) = match self.shape {
            CapShape::FullDisc => (0.0, 360.0),
            CapShape::HalfDisc => (self.facing.angle_deg() - 90.0, 180.0),
        };

        // An open arc needs its closing vertex; the diameter closes the polygon
        let steps = match self.shape {
            CapShape::FullDisc => segments,
            CapShape::HalfDisc => segments + 1,
        };
        (0..steps)
            .map(|step| {
                let angle = sweep.mul_add(step as f64 / segments as f64, start_angle);
                self.center + Point2D::from_polar(self.radius, angle)
            })
            .collect()
    }
}
