//! The editable strand: endpoints, width, style and derived outline

use crate::geometry::bezier::CubicBezier;
use crate::geometry::point::{LENGTH_EPSILON, PlaneExt, Point2D};
use crate::geometry::polygon::Polygon;
use crate::geometry::ribbon::{CapShape, EndCap, offset_polyline, ribbon_outline, stroke_pieces};
use crate::geometry::segment::rotate_point;
use crate::io::configuration::{
    CURVE_BASE_FRACTION, CURVE_DISTANCE_MULTIPLIER, CURVE_EXPONENT, CURVE_FRACTION_RANGE,
    CURVE_SAMPLES, DEFAULT_STRAND_WIDTH,
};
use crate::strand::controls::{CurveControls, NEUTRAL_BIAS};
use crate::strand::style::StrandStyle;

/// One end of a strand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The point the strand is drawn from
    Start,
    /// The point the strand is drawn to
    End,
}

impl Endpoint {
    /// The opposite end
    pub const fn other(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }

    /// Slot in two-element per-endpoint arrays, `0` for start
    pub const fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::End => 1,
        }
    }

    /// Inverse of [`Endpoint::index`]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Start),
            1 => Some(Self::End),
            _ => None,
        }
    }
}

/// A ribbon strand between two endpoints
///
/// Mutators leave the cached outline stale; call [`Strand::update_shape`]
/// before reading [`Strand::outline`].
#[derive(Clone, Debug, PartialEq)]
pub struct Strand {
    /// Unique `"{set}_{role}"` identifier
    pub layer_name: String,
    /// Set the strand belongs to
    pub set_number: u32,
    /// Ribbon width, not counting the border
    pub width: f64,
    /// Colors and border thickness
    pub style: StrandStyle,
    /// Centerline handles
    pub controls: CurveControls,
    /// Whether a cap is drawn at start and end
    pub has_circles: [bool; 2],
    start: Point2D,
    end: Point2D,
    outline: Polygon,
}

impl Strand {
    /// Straight strand with default width and style
    pub fn new(layer_name: impl Into<String>, set_number: u32, start: Point2D, end: Point2D) -> Self {
        let mut strand = Self {
            layer_name: layer_name.into(),
            set_number,
            width: DEFAULT_STRAND_WIDTH,
            style: StrandStyle::default(),
            controls: CurveControls::straight(start, end),
            has_circles: [false, false],
            start,
            end,
            outline: Vec::new(),
        };
        strand.update_shape();
        strand
    }

    /// Replace the width
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self.update_shape();
        self
    }

    /// Replace the style
    #[must_use]
    pub fn with_style(mut self, style: StrandStyle) -> Self {
        self.style = style;
        self
    }

    /// Start point
    pub const fn start(&self) -> Point2D {
        self.start
    }

    /// End point
    pub const fn end(&self) -> Point2D {
        self.end
    }

    /// Position of either end
    pub const fn endpoint(&self, which: Endpoint) -> Point2D {
        match which {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    /// Move one end; unlocked handles follow
    pub fn set_endpoint(&mut self, which: Endpoint, position: Point2D) {
        match which {
            Endpoint::Start => self.start = position,
            Endpoint::End => self.end = position,
        }
        self.controls.snap_unlocked(self.start, self.end);
    }

    /// Shift the whole strand, locked handles included
    pub fn translate(&mut self, delta: Point2D) {
        self.start += delta;
        self.end += delta;
        self.controls.transform_locked(|p| p + delta);
        self.controls.snap_unlocked(self.start, self.end);
    }

    /// Swing one end around the other to `angle_deg`, keeping the length
    ///
    /// `angle_deg` is the direction from the fixed end to the moving one.
    /// Locked handles rotate with the strand. Returns how far the moving
    /// end travelled.
    pub fn rotate_endpoint(&mut self, which: Endpoint, angle_deg: f64) -> Point2D {
        let pivot = self.endpoint(which.other());
        let old = self.endpoint(which);
        let offset = old - pivot;
        let delta_angle = angle_deg - offset.angle_deg();
        let new = pivot + Point2D::from_polar(offset.length(), angle_deg);

        match which {
            Endpoint::Start => self.start = new,
            Endpoint::End => self.end = new,
        }
        self.controls
            .transform_locked(|p| rotate_point(p, pivot, delta_angle));
        self.controls.snap_unlocked(self.start, self.end);
        new - old
    }

    /// Move the end along the current direction so the chord has `length`
    ///
    /// Locked handles keep their relative position along the strand. A
    /// zero-length strand has no direction and is left unchanged. Returns
    /// how far the end travelled.
    pub fn rescale(&mut self, length: f64) -> Point2D {
        let current = self.length();
        if current < LENGTH_EPSILON {
            return Point2D::ZERO;
        }
        let ratio = length / current;
        let start = self.start;
        let old = self.end;

        self.end = start + (old - start) * ratio;
        self.controls
            .transform_locked(|p| start + (p - start) * ratio);
        self.controls.snap_unlocked(self.start, self.end);
        self.end - old
    }

    /// Chord length from start to end
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Chord direction in degrees
    pub fn angle_deg(&self) -> f64 {
        (self.end - self.start).angle_deg()
    }

    /// Ribbon plus both borders
    pub fn stroked_width(&self) -> f64 {
        2.0f64.mul_add(self.style.stroke_width, self.width)
    }

    /// Whether the centerline is the straight chord
    pub const fn is_straight(&self) -> bool {
        !self.controls.any_locked()
    }

    /// Recompute the cached outline from the current geometry
    pub fn update_shape(&mut self) {
        self.outline = self.outline_at(self.width);
    }

    /// Fillable outline as of the last [`Strand::update_shape`]
    pub fn outline(&self) -> &[Point2D] {
        &self.outline
    }

    /// Boundary polygon of the centerline stroked at `width`
    ///
    /// A straight strand gives its four ribbon corners; a zero-length one
    /// gives an empty polygon.
    pub fn outline_at(&self, width: f64) -> Polygon {
        if self.is_straight() {
            return ribbon_outline(self.start, self.end, width).map_or_else(Vec::new, Vec::from);
        }
        let (left, mut right) = offset_polyline(&self.centerline(), width);
        right.reverse();
        left.into_iter().chain(right).collect()
    }

    /// Cubic segments making up a bent centerline, empty when straight
    ///
    /// With the center handle locked the curve is split at that handle into
    /// two segments sharing a tangent; otherwise it is one cubic through
    /// both handles.
    pub fn curve_segments(&self) -> Vec<CubicBezier> {
        if self.is_straight() {
            return Vec::new();
        }

        let first = self.controls.first.position;
        let second = self.controls.second.position;
        if !self.controls.center.locked {
            return vec![CubicBezier::new(self.start, first, second, self.end)];
        }

        let center = self.controls.center.position;
        let through = (second - first)
            .normalized()
            .or_else(|| (self.end - self.start).normalized())
            .unwrap_or(Point2D::new(1.0, 0.0));
        let fraction = self.handle_fraction(center);
        let leading = fraction * (NEUTRAL_BIAS + self.controls.triangle_bias);
        let trailing = fraction * (NEUTRAL_BIAS + self.controls.circle_bias);

        vec![
            CubicBezier::new(
                self.start,
                self.start.lerp(first, leading),
                center - through * (center.distance(self.start) * leading),
                center,
            ),
            CubicBezier::new(
                center,
                center + through * (center.distance(self.end) * trailing),
                self.end.lerp(second, trailing),
                self.end,
            ),
        ]
    }

    /// Sampled centerline from start to end
    pub fn centerline(&self) -> Vec<Point2D> {
        let segments = self.curve_segments();
        if segments.is_empty() {
            return vec![self.start, self.end];
        }

        let mut points = Vec::with_capacity(segments.len() * CURVE_SAMPLES + 1);
        for segment in &segments {
            let samples = segment.flatten(CURVE_SAMPLES);
            // Consecutive segments share their joining point
            let skip = usize::from(!points.is_empty());
            points.extend(samples.into_iter().skip(skip));
        }
        points
    }

    /// Convex decomposition of the outline stroked `extra` wider than the ribbon
    pub fn stroke_pieces(&self, extra: f64) -> Vec<Polygon> {
        stroke_pieces(&self.centerline(), self.width + extra)
    }

    /// Outer boundary lines of the bordered ribbon, left then right
    pub fn side_lines(&self) -> (Vec<Point2D>, Vec<Point2D>) {
        offset_polyline(&self.centerline(), self.stroked_width())
    }

    /// Unit direction leaving the strand through `which`
    pub fn outward_tangent(&self, which: Endpoint) -> Point2D {
        let segments = self.curve_segments();
        let derivative = match (which, segments.first(), segments.last()) {
            (Endpoint::Start, Some(first), _) => -first.tangent_at(0.0),
            (Endpoint::End, _, Some(last)) => last.tangent_at(1.0),
            _ => Point2D::ZERO,
        };
        let chord = match which {
            Endpoint::Start => self.start - self.end,
            Endpoint::End => self.end - self.start,
        };
        derivative
            .normalized()
            .or_else(|| chord.normalized())
            .unwrap_or(Point2D::new(1.0, 0.0))
    }

    /// Caps at both ends; `joined` marks ends merging with another strand
    ///
    /// Ends without the `has_circles` flag get no cap. Joined ends are
    /// drawn as half discs facing outward, free ends as full discs.
    pub fn end_caps(&self, joined: [bool; 2]) -> [Option<EndCap>; 2] {
        [Endpoint::Start, Endpoint::End].map(|which| {
            let index = which.index();
            let wants_cap = self.has_circles.get(index).copied().unwrap_or(false);
            wants_cap.then(|| EndCap {
                center: self.endpoint(which),
                radius: self.stroked_width() / 2.0,
                facing: self.outward_tangent(which),
                shape: if joined.get(index).copied().unwrap_or(false) {
                    CapShape::HalfDisc
                } else {
                    CapShape::FullDisc
                },
            })
        })
    }

    /// Handle length as a fraction of the distance to the center handle
    ///
    /// Grows with how far the center handle sits off the chord.
    fn handle_fraction(&self, center: Point2D) -> f64 {
        let chord = self.length();
        if chord < LENGTH_EPSILON {
            return CURVE_FRACTION_RANGE.0;
        }
        let offset = center.distance(self.start.midpoint(self.end));
        let relative = CURVE_DISTANCE_MULTIPLIER * offset / chord;
        (CURVE_BASE_FRACTION * relative.powf(CURVE_EXPONENT))
            .clamp(CURVE_FRACTION_RANGE.0, CURVE_FRACTION_RANGE.1)
    }
}
