//! Stateless plane geometry
//!
//! This module contains the numeric kernel used by strands, masks and the
//! pattern generator:
//! - Point and vector arithmetic
//! - Segment intersection, projection and rotation
//! - Ribbon and cap outlines
//! - Cubic bezier evaluation
//! - Convex polygon clipping

/// Cubic bezier evaluation and flattening through `kurbo`
pub mod bezier;
/// Point and vector arithmetic
pub mod point;
/// Convex clipping, containment and bounds
pub mod polygon;
/// Ribbon outlines, stroke decomposition and end caps
pub mod ribbon;
/// Segment intersection, distance and rotation
pub mod segment;

pub use point::{PlaneExt, Point2D};
