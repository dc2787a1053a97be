//! Bezier control points and the bias of the optional center handle
//!
//! A control point the user has never moved stays unlocked and follows the
//! straight-line default whenever the strand's endpoints change. Moving a
//! point locks it; locked points only change through explicit geometric
//! transforms (rotation, rescaling, translation).

use crate::geometry::Point2D;
use serde::{Deserialize, Serialize};

/// Neutral bias, leaving both halves of a center-bent curve symmetric
pub const NEUTRAL_BIAS: f64 = 0.5;

/// One control handle
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Current position
    pub position: Point2D,
    /// Whether the handle was placed deliberately
    pub locked: bool,
}

impl ControlPoint {
    /// Unlocked handle at `position`
    pub const fn unlocked(position: Point2D) -> Self {
        Self {
            position,
            locked: false,
        }
    }
}

/// Which handle of a strand an edit targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlHandle {
    /// Handle nearest the start
    First,
    /// Handle nearest the end
    Second,
    /// Center handle bending both halves
    Center,
}

/// Control handles of a strand's centerline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveControls {
    /// First cubic handle
    pub first: ControlPoint,
    /// Second cubic handle
    pub second: ControlPoint,
    /// Center handle, used when locked
    pub center: ControlPoint,
    /// Pull of the first half towards the center handle, in `[0, 1]`
    pub triangle_bias: f64,
    /// Pull of the second half towards the center handle, in `[0, 1]`
    pub circle_bias: f64,
}

impl CurveControls {
    /// Unlocked handles for a straight strand from `start` to `end`
    pub fn straight(start: Point2D, end: Point2D) -> Self {
        let (first, second) = default_positions(start, end);
        Self {
            first: ControlPoint::unlocked(first),
            second: ControlPoint::unlocked(second),
            center: ControlPoint::unlocked(first.midpoint(second)),
            triangle_bias: NEUTRAL_BIAS,
            circle_bias: NEUTRAL_BIAS,
        }
    }

    /// Move unlocked handles back to their straight-line defaults
    pub fn snap_unlocked(&mut self, start: Point2D, end: Point2D) {
        let (first, second) = default_positions(start, end);
        if !self.first.locked {
            self.first.position = first;
        }
        if !self.second.locked {
            self.second.position = second;
        }
        if !self.center.locked {
            self.center.position = self.first.position.midpoint(self.second.position);
        }
    }

    /// Place a handle and lock it
    pub fn place(&mut self, handle: ControlHandle, position: Point2D) {
        let point = self.handle_mut(handle);
        point.position = position;
        point.locked = true;
    }

    /// Release a handle so it follows the endpoints again
    pub fn release(&mut self, handle: ControlHandle, start: Point2D, end: Point2D) {
        self.handle_mut(handle).locked = false;
        self.snap_unlocked(start, end);
    }

    /// Whether any handle is locked, i.e. the curve may be bent
    pub const fn any_locked(&self) -> bool {
        self.first.locked || self.second.locked || self.center.locked
    }

    /// Apply `transform` to every locked handle
    pub fn transform_locked(&mut self, transform: impl Fn(Point2D) -> Point2D) {
        for point in [&mut self.first, &mut self.second, &mut self.center] {
            if point.locked {
                point.position = transform(point.position);
            }
        }
    }

    /// Set both center biases, clamped to `[0, 1]`
    pub fn set_bias(&mut self, triangle_bias: f64, circle_bias: f64) {
        self.triangle_bias = triangle_bias.clamp(0.0, 1.0);
        self.circle_bias = circle_bias.clamp(0.0, 1.0);
    }

    const fn handle_mut(&mut self, handle: ControlHandle) -> &mut ControlPoint {
        match handle {
            ControlHandle::First => &mut self.first,
            ControlHandle::Second => &mut self.second,
            ControlHandle::Center => &mut self.center,
        }
    }
}

/// Handles at one and two thirds of the chord
fn default_positions(start: Point2D, end: Point2D) -> (Point2D, Point2D) {
    (start.lerp(end, 1.0 / 3.0), start.lerp(end, 2.0 / 3.0))
}
