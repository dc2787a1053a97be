//! Memoized stroke decompositions keyed on strand geometry

use crate::geometry::Point2D;
use crate::geometry::polygon::Polygon;
use crate::strand::controls::CurveControls;
use crate::strand::curve::Strand;

/// Everything a stroke decomposition depends on
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeKey {
    start: Point2D,
    end: Point2D,
    width: f64,
    extra: f64,
    controls: CurveControls,
}

impl ShapeKey {
    /// Key describing `strand` stroked `extra` wider than its ribbon
    pub const fn of(strand: &Strand, extra: f64) -> Self {
        Self {
            start: strand.start(),
            end: strand.end(),
            width: strand.width,
            extra,
            controls: strand.controls,
        }
    }
}

/// Caller-owned memo of one strand's stroke decomposition
///
/// Holds the pieces computed for the last seen geometry; a lookup with
/// unchanged geometry reuses them.
#[derive(Clone, Debug, Default)]
pub struct ShapeMemo {
    key: Option<ShapeKey>,
    pieces: Vec<Polygon>,
    /// Lookup statistics
    pub stats: MemoStats,
}

/// Hit and miss counts of a memo
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Lookups answered from the memo
    pub hits: usize,
    /// Lookups that recomputed
    pub misses: usize,
}

impl ShapeMemo {
    /// Create an empty memo
    pub fn new() -> Self {
        Self::default()
    }

    /// Stroke pieces of `strand` widened by `extra`, recomputed only on change
    pub fn stroke_pieces(&mut self, strand: &Strand, extra: f64) -> &[Polygon] {
        let key = ShapeKey::of(strand, extra);
        if self.key.as_ref() == Some(&key) {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            self.pieces = strand.stroke_pieces(extra);
            self.key = Some(key);
        }
        &self.pieces
    }

    /// Forget the memoized geometry
    pub fn clear(&mut self) {
        self.key = None;
        self.pieces.clear();
    }
}
