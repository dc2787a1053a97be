//! Masks: the over/under illusion where two strands cross

use crate::geometry::Point2D;
use crate::geometry::polygon::Polygon;
use crate::geometry::ribbon::Quad;
use crate::graph::arena::{Node, StrandGraph, StrandId};
use crate::io::configuration::MASK_CENTER_GRID;
use crate::io::error::{Result, StrandError};
use crate::mask::region::MaskRegion;
use crate::strand::curve::Strand;
use crate::strand::layer::{mask_layer_name, mask_set_number};
use crate::strand::memo::ShapeMemo;
use std::collections::HashMap;
use std::fmt;

/// Computed overlap of two strands, drawn in the second strand's style
///
/// Holds handles to both sources but no geometry of its own besides the
/// cached center point; the visible region is derived from the sources on
/// demand.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskedStrand {
    /// `"{first}_{second}"`, unique per source pair
    pub layer_name: String,
    /// Concatenated set numbers of both sources
    pub set_number: u32,
    /// Strand passing under
    pub first: StrandId,
    /// Strand passing over
    pub second: StrandId,
    /// Polygons cut out of the overlap so third strands show through
    pub deletion_rectangles: Vec<Quad>,
    /// Visual center as of the last source edit
    pub center_point: Option<Point2D>,
}

/// Why a mask was refused; the graph is left untouched
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaskRejected {
    /// A mask for this pair of strands already exists
    AlreadyExists {
        /// Layer name of the existing mask
        layer_name: String,
    },
    /// Both sources are the same strand
    SameStrand,
    /// A source is itself a mask
    NotAStrand {
        /// Layer name of the offending source
        layer_name: String,
    },
    /// A source handle is stale
    UnknownStrand,
}

impl fmt::Display for MaskRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists { layer_name } => write!(f, "mask '{layer_name}' already exists"),
            Self::SameStrand => write!(f, "a strand cannot mask itself"),
            Self::NotAStrand { layer_name } => write!(f, "'{layer_name}' is a mask, not a strand"),
            Self::UnknownStrand => write!(f, "source strand no longer exists"),
        }
    }
}

impl std::error::Error for MaskRejected {}

impl From<MaskRejected> for StrandError {
    fn from(rejection: MaskRejected) -> Self {
        Self::InvalidMask {
            reason: rejection.to_string(),
        }
    }
}

/// Caller-owned stroke memos for many strands
///
/// Reusing one memo across repeated region queries skips re-flattening
/// strands whose geometry did not change.
#[derive(Clone, Debug, Default)]
pub struct MaskMemo {
    shapes: HashMap<StrandId, ShapeMemo>,
}

impl MaskMemo {
    /// Create an empty memo
    pub fn new() -> Self {
        Self::default()
    }

    /// Bordered stroke pieces of `strand`, reused while its geometry is unchanged
    pub fn stroke_pieces(&mut self, id: StrandId, strand: &Strand) -> &[Polygon] {
        self.shapes
            .entry(id)
            .or_default()
            .stroke_pieces(strand, 2.0 * strand.style.stroke_width)
    }

    /// Total hits and misses over all strands
    pub fn hit_counts(&self) -> (usize, usize) {
        self.shapes.values().fold((0, 0), |(hits, misses), memo| {
            (hits + memo.stats.hits, misses + memo.stats.misses)
        })
    }
}

impl StrandGraph {
    /// Mask `first` under `second`
    ///
    /// # Errors
    ///
    /// Returns a rejection if a mask already exists for the pair (in either
    /// order) or the sources are not two distinct live strands
    pub fn create_mask(
        &mut self,
        first: StrandId,
        second: StrandId,
    ) -> std::result::Result<StrandId, MaskRejected> {
        self.create_mask_with(first, second, Vec::new())
    }

    /// Mask `first` under `second` with polygons cut out of the overlap
    ///
    /// # Errors
    ///
    /// Returns a rejection if a mask already exists for the pair (in either
    /// order) or the sources are not two distinct live strands
    pub fn create_mask_with(
        &mut self,
        first: StrandId,
        second: StrandId,
        deletion_rectangles: Vec<Quad>,
    ) -> std::result::Result<StrandId, MaskRejected> {
        if first == second {
            return Err(MaskRejected::SameStrand);
        }
        let first_strand = self.mask_source(first)?;
        let second_strand = self.mask_source(second)?;

        let layer_name = mask_layer_name(&first_strand.layer_name, &second_strand.layer_name);
        let reversed = mask_layer_name(&second_strand.layer_name, &first_strand.layer_name);
        if let Some(existing) = [&layer_name, &reversed]
            .into_iter()
            .find(|name| self.find(name).is_some())
        {
            return Err(MaskRejected::AlreadyExists {
                layer_name: existing.clone(),
            });
        }

        let mut mask = MaskedStrand {
            set_number: mask_set_number(first_strand.set_number, second_strand.set_number),
            layer_name,
            first,
            second,
            deletion_rectangles,
            center_point: None,
        };
        mask.center_point = visible_center(&mask, first_strand, second_strand);

        let name = mask.layer_name.clone();
        self.insert(Node::Mask(mask))
            .map_err(|_taken| MaskRejected::AlreadyExists { layer_name: name })
    }

    /// Handle of the mask of `first` under `second`, if any
    pub fn mask_between(&self, first: StrandId, second: StrandId) -> Option<StrandId> {
        let name = mask_layer_name(
            &self.strand(first).ok()?.layer_name,
            &self.strand(second).ok()?.layer_name,
        );
        self.find(&name)
    }

    /// Current visible region of a mask
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale, names a strand, or a source is gone
    pub fn mask_region(&self, id: StrandId) -> Result<MaskRegion> {
        self.mask_region_memoized(id, &mut MaskMemo::new())
    }

    /// Current visible region of a mask, reusing stroke work from `memo`
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale, names a strand, or a source is gone
    pub fn mask_region_memoized(&self, id: StrandId, memo: &mut MaskMemo) -> Result<MaskRegion> {
        let mask = self.mask(id)?;
        let first = memo
            .stroke_pieces(mask.first, self.strand(mask.first)?)
            .to_vec();
        let second = memo.stroke_pieces(mask.second, self.strand(mask.second)?);

        let mut region = MaskRegion::intersection(&first, second);
        for rectangle in &mask.deletion_rectangles {
            region.subtract(rectangle);
        }
        Ok(region)
    }

    /// Recompute the center of every mask built on a touched strand
    pub(crate) fn refresh_masks(&mut self, touched: &[StrandId]) -> Result<()> {
        let affected: Vec<StrandId> = self
            .masks()
            .filter(|(_, mask)| touched.contains(&mask.first) || touched.contains(&mask.second))
            .map(|(id, _)| id)
            .collect();

        for id in affected {
            let mask = self.mask(id)?;
            let center = visible_center(mask, self.strand(mask.first)?, self.strand(mask.second)?);
            if let Node::Mask(mask) = self.node_mut(id)? {
                mask.center_point = center;
            }
        }
        Ok(())
    }

    fn mask_source(&self, id: StrandId) -> std::result::Result<&Strand, MaskRejected> {
        match self.node(id) {
            Ok(Node::Strand(node)) => Ok(&node.strand),
            Ok(Node::Mask(mask)) => Err(MaskRejected::NotAStrand {
                layer_name: mask.layer_name.clone(),
            }),
            Err(_stale) => Err(MaskRejected::UnknownStrand),
        }
    }
}

/// Center of the visible region, or of the four source endpoints when nothing is visible
fn visible_center(mask: &MaskedStrand, first: &Strand, second: &Strand) -> Option<Point2D> {
    let mut region = MaskRegion::between(first, second);
    for rectangle in &mask.deletion_rectangles {
        region.subtract(rectangle);
    }
    region.center_point(MASK_CENTER_GRID).or_else(|| {
        let sum = first.start() + first.end() + second.start() + second.end();
        Some(sum * 0.25)
    })
}
