//! The strand curve model
//!
//! A strand is one ribbon between two endpoints. Its centerline is straight
//! until a control handle is locked, after which it follows cubic bezier
//! segments. The outline is derived on demand from this state.

/// Control handles and center bias
pub mod controls;
/// Strand type, outline derivation and end caps
pub mod curve;
/// Layer naming conventions
pub mod layer;
/// Caller-owned memoization of stroke decompositions
pub mod memo;
/// Colors and border widths
pub mod style;

pub use curve::{Endpoint, Strand};
pub use layer::LayerName;
