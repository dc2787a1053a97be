//! Common read-only view over strands and masks

use crate::graph::arena::{Node, StrandGraph, StrandId, StrandNode};
use crate::io::error::Result;
use crate::mask::masked::MaskedStrand;
use crate::strand::curve::Strand;
use crate::strand::style::StrandStyle;

/// Which variant a node is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrandKind {
    /// Free-standing strand
    Strand,
    /// Strand pinned to a parent endpoint
    Attached,
    /// Overlap of two strands
    Masked,
}

/// Properties every drawable entry exposes
pub trait StrandLike {
    /// Unique layer name
    fn layer_name(&self) -> &str;
    /// Set shown in layer panels
    fn set_number(&self) -> u32;
    /// Ribbon width
    fn width(&self) -> f64;
    /// Colors and border thickness
    fn style(&self) -> &StrandStyle;
    /// Whether caps are drawn at start and end
    fn has_circles(&self) -> [bool; 2];
    /// Variant of the entry
    fn kind(&self) -> StrandKind;
}

impl StrandLike for Strand {
    fn layer_name(&self) -> &str {
        &self.layer_name
    }

    fn set_number(&self) -> u32 {
        self.set_number
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn style(&self) -> &StrandStyle {
        &self.style
    }

    fn has_circles(&self) -> [bool; 2] {
        self.has_circles
    }

    fn kind(&self) -> StrandKind {
        StrandKind::Strand
    }
}

impl StrandLike for StrandNode {
    fn layer_name(&self) -> &str {
        &self.strand.layer_name
    }

    fn set_number(&self) -> u32 {
        self.strand.set_number
    }

    fn width(&self) -> f64 {
        self.strand.width
    }

    fn style(&self) -> &StrandStyle {
        &self.strand.style
    }

    fn has_circles(&self) -> [bool; 2] {
        self.strand.has_circles
    }

    fn kind(&self) -> StrandKind {
        if self.attachment.is_some() {
            StrandKind::Attached
        } else {
            StrandKind::Strand
        }
    }
}

/// A mask seen through its primary source
///
/// Appearance comes from the second source, the strand drawn on top; the
/// name and set belong to the mask itself.
#[derive(Clone, Copy, Debug)]
pub struct MaskView<'a> {
    /// The mask
    pub mask: &'a MaskedStrand,
    /// Source whose appearance the mask takes
    pub primary: &'a Strand,
}

impl StrandLike for MaskView<'_> {
    fn layer_name(&self) -> &str {
        &self.mask.layer_name
    }

    fn set_number(&self) -> u32 {
        self.mask.set_number
    }

    fn width(&self) -> f64 {
        self.primary.width
    }

    fn style(&self) -> &StrandStyle {
        &self.primary.style
    }

    fn has_circles(&self) -> [bool; 2] {
        [false, false]
    }

    fn kind(&self) -> StrandKind {
        StrandKind::Masked
    }
}

impl StrandGraph {
    /// Read-only view of any node
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or a mask's primary source is gone
    pub fn view(&self, id: StrandId) -> Result<Box<dyn StrandLike + '_>> {
        let view: Box<dyn StrandLike + '_> = match self.node(id)? {
            Node::Strand(node) => Box::new(node),
            Node::Mask(mask) => Box::new(MaskView {
                mask,
                primary: self.strand(mask.second)?,
            }),
        };
        Ok(view)
    }
}

impl<T: StrandLike + ?Sized> StrandLike for &T {
    fn layer_name(&self) -> &str {
        (**self).layer_name()
    }

    fn set_number(&self) -> u32 {
        (**self).set_number()
    }

    fn width(&self) -> f64 {
        (**self).width()
    }

    fn style(&self) -> &StrandStyle {
        (**self).style()
    }

    fn has_circles(&self) -> [bool; 2] {
        (**self).has_circles()
    }

    fn kind(&self) -> StrandKind {
        (**self).kind()
    }
}
