//! Mask emission where paired vertical and horizontal strands cross

use crate::geometry::polygon::clip_convex;
use crate::geometry::ribbon::{Quad, ribbon_outline};
use crate::geometry::segment::segment_intersection;
use crate::graph::arena::{StrandGraph, StrandId};
use crate::io::configuration::DELETION_RECTANGLE_INSET;
use crate::io::error::Result;
use crate::mask::region::MaskRegion;
use crate::pattern::builder::{Emission, GridSet};

/// Masks for every paired crossing between two axes
///
/// For each vertical and horizontal set and each `(vertical role,
/// horizontal role)` pair, the two strands' chords are intersected; a hit
/// yields a mask with the vertical strand under the horizontal one. With
/// `deletion_rectangles`, every other strand of the paired roles whose
/// inset ribbon overlaps the crossing is cut out of the mask.
///
/// # Errors
///
/// Returns an error if a handle in the working sets is stale
pub fn crossing_masks(
    graph: &StrandGraph,
    vertical: &[GridSet],
    horizontal: &[GridSet],
    pairs: &[(u32, u32)],
    deletion_rectangles: bool,
) -> Result<Vec<Emission>> {
    let tier = tier_members(vertical, horizontal, pairs);
    let mut masks = Vec::new();

    for v_set in vertical {
        for h_set in horizontal {
            for (v_role, h_role) in pairs {
                let (Some(first), Some(second)) = (v_set.get(*v_role), h_set.get(*h_role)) else {
                    continue;
                };
                let lower = graph.strand(first)?;
                let upper = graph.strand(second)?;
                if segment_intersection(lower.start(), lower.end(), upper.start(), upper.end())
                    .is_none()
                {
                    continue;
                }

                let cutouts = if deletion_rectangles {
                    let others: Vec<StrandId> = tier
                        .iter()
                        .copied()
                        .filter(|id| *id != first && *id != second)
                        .collect();
                    overlapping_ribbons(graph, first, second, &others)?
                } else {
                    Vec::new()
                };

                masks.push(Emission::Mask {
                    first,
                    second,
                    deletion_rectangles: cutouts,
                });
            }
        }
    }

    Ok(masks)
}

/// Strands carrying any role that takes part in the pairing
fn tier_members(vertical: &[GridSet], horizontal: &[GridSet], pairs: &[(u32, u32)]) -> Vec<StrandId> {
    let vertical_roles = pairs.iter().map(|(v, _)| *v);
    let horizontal_roles = pairs.iter().map(|(_, h)| *h);

    let mut members: Vec<StrandId> = vertical
        .iter()
        .flat_map(|set| vertical_roles.clone().filter_map(|role| set.get(role)))
        .chain(
            horizontal
                .iter()
                .flat_map(|set| horizontal_roles.clone().filter_map(|role| set.get(role))),
        )
        .collect();
    members.sort_unstable();
    members.dedup();
    members
}

/// Inset ribbons of `others` that overlap the crossing of `first` and `second`
fn overlapping_ribbons(
    graph: &StrandGraph,
    first: StrandId,
    second: StrandId,
    others: &[StrandId],
) -> Result<Vec<Quad>> {
    let region = MaskRegion::between(graph.strand(first)?, graph.strand(second)?);
    let mut cutouts = Vec::new();

    for other in others {
        let strand = graph.strand(*other)?;
        let Some(ribbon) = ribbon_outline(
            strand.start(),
            strand.end(),
            strand.width - DELETION_RECTANGLE_INSET,
        ) else {
            continue;
        };
        let touches = region
            .pieces()
            .iter()
            .any(|piece| !clip_convex(piece, &ribbon).is_empty());
        if touches {
            cutouts.push(ribbon);
        }
    }

    Ok(cutouts)
}
