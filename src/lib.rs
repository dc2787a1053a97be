//! Strand geometry, attachment graphs and over/under masking for woven knot diagrams
//!
//! Strands are ribbon curves that attach end to end and cross each other;
//! a mask drawn over each crossing decides which strand passes on top. The
//! pattern generator builds whole MxN weaves from a handful of parameters
//! and searches for configurations that tile cleanly.

#![forbid(unsafe_code)]

/// 2D points, segments, ribbons, curves and convex polygon clipping
pub mod geometry;
/// Attachment graph with cascading edits
pub mod graph;
/// Input/output operations and error handling
pub mod io;
/// Over/under masks where strands cross
pub mod mask;
/// MxN pattern generation, validation and search
pub mod pattern;
/// The strand curve model
pub mod strand;

pub use io::error::{Result, StrandError};
