//! Acceptance rules for generated patterns
//!
//! Along each axis the outermost strands of consecutive sets form a chain
//! of "links". Within a set the two outer strands are taken in the order
//! they sit across the axis; the chain runs from the middle of the leading
//! strand to the nearest point of the trailing one, then on to the leading
//! strand of the next set, and so on. A pattern repeats cleanly when all
//! links have about the same length, that length leaves room for the
//! strands between, and the links point the same way.
//!
//! Extended patterns also bound the span from the first set's `_4` to the
//! last set's `_5` by the number of sets crossing the axis.

use crate::geometry::{PlaneExt, Point2D};
use crate::geometry::segment::{point_to_line_distance, project_onto_segment};
use crate::io::configuration::{
    DEFAULT_CLEARANCE_WIDTH, DEFAULT_MIN_ALIGNMENT, DEFAULT_SPREAD_TOLERANCE,
};
use crate::pattern::config::{
    Axis, ROLE_EXTENSION_A, ROLE_EXTENSION_B, ROLE_TAIL_A, ROLE_TAIL_B,
};
use std::fmt;

/// Limits a pattern must respect
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidationConfig {
    /// Strand width the clearance band is expressed in
    pub clearance_width: f64,
    /// Largest allowed difference between the longest and shortest link
    pub spread_tolerance: f64,
    /// Dot product consecutive link directions must exceed
    pub min_alignment: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            clearance_width: DEFAULT_CLEARANCE_WIDTH,
            spread_tolerance: DEFAULT_SPREAD_TOLERANCE,
            min_alignment: DEFAULT_MIN_ALIGNMENT,
        }
    }
}

impl ValidationConfig {
    /// Shortest link allowed, two strand widths
    pub fn min_clearance(&self) -> f64 {
        2.0 * self.clearance_width
    }

    /// Longest shortest-link allowed, four strand widths
    pub fn max_clearance(&self) -> f64 {
        4.0 * self.clearance_width
    }

    /// Allowed extension span for an axis crossed by `crossing_sets` sets
    ///
    /// With `k` crossing sets and width `w` the span lies in
    /// `[k * w, (2k * w + 2k) * 4]`.
    pub fn span_bounds(&self, crossing_sets: usize) -> (f64, f64) {
        let doubled = 2.0 * crossing_sets as f64;
        let expected = doubled * self.clearance_width;
        (expected / 2.0, (expected + doubled) * 4.0)
    }
}

/// Strands closing each set on the outside
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OuterStrands {
    /// The `_2` and `_3` tails
    #[default]
    Tails,
    /// The `_4` and `_5` extensions
    Extensions,
}

impl OuterStrands {
    /// Roles of the two outer strands
    pub const fn roles(self) -> (u32, u32) {
        match self {
            Self::Tails => (ROLE_TAIL_A, ROLE_TAIL_B),
            Self::Extensions => (ROLE_EXTENSION_A, ROLE_EXTENSION_B),
        }
    }
}

/// Chord of a straight strand
pub type Chord = (Point2D, Point2D);

/// Outer strands of one set, as chords
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetLinks {
    /// Set number, used for ordering
    pub set_number: u32,
    /// Chord of the `_2` strand, or `_4` when extended
    pub outer_a: Chord,
    /// Chord of the `_3` strand, or `_5` when extended
    pub outer_b: Chord,
}

impl SetLinks {
    fn center(&self) -> Point2D {
        middle(self.outer_a).midpoint(middle(self.outer_b))
    }

    /// Both chords, the one further back along `across` first
    fn ordered(&self, across: Point2D) -> [Chord; 2] {
        if middle(self.outer_a).dot(across) <= middle(self.outer_b).dot(across) {
            [self.outer_a, self.outer_b]
        } else {
            [self.outer_b, self.outer_a]
        }
    }
}

/// Link measurements along one axis
#[derive(Clone, Debug, PartialEq)]
pub struct AxisReport {
    /// Axis measured
    pub axis: Axis,
    /// Link vectors in chain order
    pub links: Vec<Point2D>,
    /// Shortest link over consecutive pairs
    pub min_length: f64,
    /// Longest link over consecutive pairs
    pub max_length: f64,
    /// Smallest dot product of consecutive normalized links
    pub min_alignment: f64,
    /// Distance from the first set's `_4` to the last set's `_5`, when extended
    pub span: Option<f64>,
}

impl AxisReport {
    /// Difference between the longest and the shortest link
    pub fn spread(&self) -> f64 {
        self.max_length - self.min_length
    }

    /// Whether the chain has at least one consecutive pair to judge
    pub fn is_measurable(&self) -> bool {
        self.links.len() >= 2
    }
}

/// Rule a pattern broke
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Links differ in length by more than the tolerance
    Spread,
    /// The shortest link is shorter than two strand widths
    TooTight,
    /// The shortest link is longer than four strand widths
    TooLoose,
    /// Consecutive links turn too sharply
    Misaligned,
    /// The extensions span too little or too much of the axis
    ExtensionSpan,
}

/// One broken rule with the measured value and the limit it crossed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Violation {
    /// Axis the rule was broken on
    pub axis: Axis,
    /// Which rule
    pub kind: ViolationKind,
    /// Measured value
    pub measured: f64,
    /// Limit the value crossed
    pub limit: f64,
}

impl Violation {
    /// How far past the limit the value is, in units of the rule's scale
    ///
    /// Lengths are measured in strand widths and alignment in the distance
    /// from the threshold to a perfect match, so violations of different
    /// rules are comparable.
    pub fn severity(&self, config: &ValidationConfig) -> f64 {
        let excess = (self.measured - self.limit).abs();
        let scale = match self.kind {
            ViolationKind::Spread
            | ViolationKind::TooTight
            | ViolationKind::TooLoose
            | ViolationKind::ExtensionSpan => config.clearance_width,
            ViolationKind::Misaligned => 1.0 - config.min_alignment,
        };
        if scale > 0.0 { excess / scale } else { excess }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = match self.kind {
            ViolationKind::Spread => "link spread",
            ViolationKind::TooTight => "shortest link below minimum",
            ViolationKind::TooLoose => "shortest link above maximum",
            ViolationKind::Misaligned => "link alignment",
            ViolationKind::ExtensionSpan => "extension span",
        };
        write!(
            f,
            "{:?} {rule}: measured {:.3}, limit {:.3}",
            self.axis, self.measured, self.limit
        )
    }
}

/// Why a pattern was not accepted
#[derive(Clone, Debug, PartialEq)]
pub struct Rejection {
    /// Every broken rule
    pub violations: Vec<Violation>,
    /// Sum of the violations' severities
    pub severity: f64,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reasons: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        write!(f, "{} (severity {:.3})", reasons.join("; "), self.severity)
    }
}

/// Measure the link chain of one axis
///
/// Sets are ordered by set number and each set's chords by where they sit
/// along the direction from the first set to the last. Chains with fewer
/// than two links have nothing to compare and report neutral values.
pub fn measure_axis(axis: Axis, sets: &[SetLinks]) -> AxisReport {
    let mut ordered = sets.to_vec();
    ordered.sort_by_key(|set| set.set_number);
    let across = across_direction(&ordered);
    let chords: Vec<[Chord; 2]> = ordered.iter().map(|set| set.ordered(across)).collect();

    let mut links = Vec::with_capacity(chords.len() * 2);
    for (position, [leading, trailing]) in chords.iter().enumerate() {
        links.push(link(*leading, *trailing));
        if let Some([next, _]) = chords.get(position + 1) {
            links.push(link(*trailing, *next));
        }
    }

    let mut min_length = f64::INFINITY;
    let mut max_length = 0.0f64;
    let mut min_alignment = 1.0f64;
    for (current, next) in links.iter().zip(links.iter().skip(1)) {
        let (a, b) = (current.length(), next.length());
        min_length = min_length.min(a.min(b));
        max_length = max_length.max(a.max(b));
        let alignment = match (current.normalized(), next.normalized()) {
            (Some(u), Some(v)) => u.dot(v),
            _ => 0.0,
        };
        min_alignment = min_alignment.min(alignment);
    }
    if !min_length.is_finite() {
        min_length = 0.0;
    }

    AxisReport {
        axis,
        links,
        min_length,
        max_length,
        min_alignment,
        span: None,
    }
}

/// Distance from the middle of the first set's `outer_a` to the line
/// through the last set's `outer_b`, sets ordered by number
pub fn extension_span(sets: &[SetLinks]) -> Option<f64> {
    let first = sets.iter().min_by_key(|set| set.set_number)?;
    let last = sets.iter().max_by_key(|set| set.set_number)?;
    let (start, end) = last.outer_b;
    Some(point_to_line_distance(middle(first.outer_a), start, end))
}

/// Span rule for an axis crossed by `crossing_sets` sets
pub fn check_span(
    axis: Axis,
    span: f64,
    crossing_sets: usize,
    config: &ValidationConfig,
) -> Option<Violation> {
    let (low, high) = config.span_bounds(crossing_sets);
    let limit = if span < low {
        low
    } else if span > high {
        high
    } else {
        return None;
    };
    Some(Violation {
        axis,
        kind: ViolationKind::ExtensionSpan,
        measured: span,
        limit,
    })
}

/// Rules broken by one axis
pub fn check_axis(report: &AxisReport, config: &ValidationConfig) -> Vec<Violation> {
    if !report.is_measurable() {
        return Vec::new();
    }
    let mut violations = Vec::new();
    let mut flag = |kind, measured, limit| {
        violations.push(Violation {
            axis: report.axis,
            kind,
            measured,
            limit,
        });
    };

    if report.spread() > config.spread_tolerance {
        flag(ViolationKind::Spread, report.spread(), config.spread_tolerance);
    }
    if report.min_length < config.min_clearance() {
        flag(ViolationKind::TooTight, report.min_length, config.min_clearance());
    }
    if report.min_length > config.max_clearance() {
        flag(ViolationKind::TooLoose, report.min_length, config.max_clearance());
    }
    if report.min_alignment <= config.min_alignment {
        flag(ViolationKind::Misaligned, report.min_alignment, config.min_alignment);
    }
    violations
}

/// Judge both axes; `Ok` carries the reports, `Err` every broken rule
///
/// Extended patterns are also held to the span rule on each axis.
///
/// # Errors
///
/// Returns the rejection if any axis breaks a rule
pub fn validate(
    vertical: &[SetLinks],
    horizontal: &[SetLinks],
    outer: OuterStrands,
    config: &ValidationConfig,
) -> Result<[AxisReport; 2], Rejection> {
    let mut reports = [
        measure_axis(Axis::Vertical, vertical),
        measure_axis(Axis::Horizontal, horizontal),
    ];
    let mut violations: Vec<Violation> = reports
        .iter()
        .flat_map(|report| check_axis(report, config))
        .collect();

    if outer == OuterStrands::Extensions {
        let crossing = [horizontal.len(), vertical.len()];
        for ((report, sets), crossing_sets) in reports
            .iter_mut()
            .zip([vertical, horizontal])
            .zip(crossing)
        {
            report.span = extension_span(sets);
            if let Some(span) = report.span
                && let Some(violation) = check_span(report.axis, span, crossing_sets, config)
            {
                violations.push(violation);
            }
        }
    }

    if violations.is_empty() {
        Ok(reports)
    } else {
        let severity = violations.iter().map(|v| v.severity(config)).sum();
        Err(Rejection {
            violations,
            severity,
        })
    }
}

/// Unit vector from the first set toward the last
///
/// A lone set falls back to the normal of its first chord.
fn across_direction(sets: &[SetLinks]) -> Point2D {
    if let (Some(first), Some(last)) = (sets.first(), sets.last())
        && let Some(direction) = (last.center() - first.center()).normalized()
    {
        return direction;
    }
    sets.first()
        .and_then(|set| (set.outer_a.1 - set.outer_a.0).perp().normalized())
        .unwrap_or(Point2D::X)
}

fn middle((start, end): Chord) -> Point2D {
    start.midpoint(end)
}

/// Vector from the middle of `from` to its nearest point on `to`
fn link(from: Chord, to: Chord) -> Point2D {
    let from = middle(from);
    project_onto_segment(from, to.0, to.1) - from
}
