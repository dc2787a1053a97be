//! Over/under masking
//!
//! A mask is the overlap of two strands' bordered outlines, drawn in the
//! upper strand's style on top of both so the upper strand appears to pass
//! over the lower one.

/// Mask entity, creation and refresh
pub mod masked;
/// Convex-piece overlap regions
pub mod region;

pub use masked::{MaskMemo, MaskRejected, MaskedStrand};
pub use region::MaskRegion;
