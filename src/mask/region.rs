//! Visible region of a mask as a set of convex pieces

use crate::geometry::Point2D;
use crate::geometry::polygon::{Bounds, Polygon, clip_convex, contains_point, signed_area, subtract_convex};
use crate::strand::curve::Strand;

/// Area where one strand's stroked outline overlaps another's
///
/// Stored as disjoint convex pieces so deletion rectangles can be cut out
/// with convex clipping alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaskRegion {
    pieces: Vec<Polygon>,
}

impl MaskRegion {
    /// Region made of the given convex pieces
    pub const fn from_pieces(pieces: Vec<Polygon>) -> Self {
        Self { pieces }
    }

    /// Overlap of two convex decompositions
    pub fn intersection(first: &[Polygon], second: &[Polygon]) -> Self {
        let second_bounds: Vec<Option<Bounds>> = second.iter().map(|p| Bounds::of(p)).collect();
        let mut pieces = Vec::new();

        for piece in first {
            let Some(piece_bounds) = Bounds::of(piece) else {
                continue;
            };
            for (other, other_bounds) in second.iter().zip(&second_bounds) {
                if !other_bounds.is_some_and(|b| b.overlaps(&piece_bounds)) {
                    continue;
                }
                let overlap = clip_convex(piece, other);
                if !overlap.is_empty() {
                    pieces.push(overlap);
                }
            }
        }

        Self { pieces }
    }

    /// Overlap of two strands stroked at full bordered width
    pub fn between(first: &Strand, second: &Strand) -> Self {
        Self::intersection(
            &first.stroke_pieces(2.0 * first.style.stroke_width),
            &second.stroke_pieces(2.0 * second.style.stroke_width),
        )
    }

    /// Cut a convex polygon out of the region
    pub fn subtract(&mut self, hole: &[Point2D]) {
        if hole.len() < 3 {
            return;
        }
        self.pieces = self
            .pieces
            .iter()
            .flat_map(|piece| subtract_convex(piece, hole))
            .collect();
    }

    /// Convex pieces of the region
    pub fn pieces(&self) -> &[Polygon] {
        &self.pieces
    }

    /// Whether nothing is visible
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Total area
    pub fn area(&self) -> f64 {
        self.pieces.iter().map(|piece| signed_area(piece).abs()).sum()
    }

    /// Whether `point` lies inside any piece
    pub fn contains(&self, point: Point2D) -> bool {
        self.pieces.iter().any(|piece| contains_point(piece, point))
    }

    /// Bounding box of all pieces
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(self.pieces.iter().flatten())
    }

    /// Visual center: mean of `grid`×`grid` cell centers that fall inside
    ///
    /// Thin regions that no sample hits fall back to the mean of all piece
    /// vertices. An empty region has no center.
    pub fn center_point(&self, grid: usize) -> Option<Point2D> {
        let bounds = self.bounds()?;
        let grid = grid.max(1);
        let step_x = bounds.width() / grid as f64;
        let step_y = bounds.height() / grid as f64;

        let mut sum = Point2D::ZERO;
        let mut count = 0usize;
        for row in 0..grid {
            for column in 0..grid {
                let sample = Point2D::new(
                    step_x.mul_add(column as f64 + 0.5, bounds.min.x),
                    step_y.mul_add(row as f64 + 0.5, bounds.min.y),
                );
                if self.contains(sample) {
                    sum += sample;
                    count += 1;
                }
            }
        }

        if count > 0 {
            return Some(sum * (1.0 / count as f64));
        }

        let vertices: Vec<&Point2D> = self.pieces.iter().flatten().collect();
        let total = vertices
            .iter()
            .fold(Point2D::ZERO, |acc, vertex| acc + **vertex);
        (!vertices.is_empty()).then(|| total * (1.0 / vertices.len() as f64))
    }
}
