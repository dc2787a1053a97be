//! Attachment graph of strands
//!
//! Strands live in an arena and refer to each other through [`StrandId`]
//! handles. Attached strands are pinned by their start to a parent
//! endpoint; edits to a parent cascade to every descendant and to the masks
//! built on any strand that moved.

/// Slot arena, handles and render order
pub mod arena;
/// Attaching children to endpoints
pub mod attach;
/// Cascading deletion
pub mod delete;
/// Move, rotate and rescale with propagation
pub mod edit;
/// Uniform read-only view over strands and masks
pub mod strand_like;

pub use arena::{Attachment, Node, StrandGraph, StrandId, StrandNode};
pub use attach::AttachRejected;
pub use edit::LengthClamp;
pub use strand_like::{StrandKind, StrandLike};
