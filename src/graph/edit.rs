//! Endpoint edits and their propagation through attached descendants
//!
//! Every edit is applied to the target strand, then to each child pinned to
//! the endpoint that moved (recursively), and finally to the masks built on
//! any strand that changed.

use crate::geometry::Point2D;
use crate::graph::arena::{StrandGraph, StrandId};
use crate::io::configuration::{MAX_RESCALE_FACTOR, MIN_ATTACHED_LENGTH};
use crate::io::error::{Result, StrandError, invalid_parameter};
use crate::strand::curve::Endpoint;

/// Length limits applied by [`StrandGraph::rescale_length`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LengthClamp {
    /// Use the requested length as is
    Unclamped,
    /// Interactive tool limits: at least the minimum attached length and at
    /// most twice the length the drag started from
    Interactive {
        /// Length when the drag started
        original_length: f64,
    },
}

impl LengthClamp {
    /// Apply the limits to a requested length
    pub fn apply(self, length: f64) -> f64 {
        match self {
            Self::Unclamped => length,
            Self::Interactive { original_length } => {
                let upper = (original_length * MAX_RESCALE_FACTOR).max(MIN_ATTACHED_LENGTH);
                length.clamp(MIN_ATTACHED_LENGTH, upper)
            }
        }
    }
}

impl StrandGraph {
    /// Move one endpoint of a strand to `position`
    ///
    /// Children pinned to that endpoint are carried along by the same
    /// displacement, together with their own descendants.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or names a mask, or if the
    /// endpoint is the pinned start of an attached strand
    pub fn move_endpoint(
        &mut self,
        id: StrandId,
        which: Endpoint,
        position: Point2D,
    ) -> Result<()> {
        self.ensure_free(id, which)?;
        let node = self.strand_node_mut(id)?;
        let old = node.strand.endpoint(which);
        node.strand.set_endpoint(which, position);
        self.finish_edit(id, which, position - old)
    }

    /// Swing an endpoint around the other end to `angle_deg`
    ///
    /// The length is preserved and locked control handles rotate by the
    /// same angle about the fixed end. Cascades like
    /// [`StrandGraph::move_endpoint`].
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or names a mask, or if the
    /// endpoint is the pinned start of an attached strand
    pub fn rotate_endpoint(&mut self, id: StrandId, which: Endpoint, angle_deg: f64) -> Result<()> {
        self.ensure_free(id, which)?;
        let delta = self
            .strand_node_mut(id)?
            .strand
            .rotate_endpoint(which, angle_deg);
        self.finish_edit(id, which, delta)
    }

    /// Move the end along the strand's direction to reach `length`
    ///
    /// The start stays fixed and locked handles scale proportionally from
    /// it.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or names a mask, or if the
    /// length is not a positive finite number
    pub fn rescale_length(&mut self, id: StrandId, length: f64, clamp: LengthClamp) -> Result<()> {
        if !length.is_finite() || length <= 0.0 {
            return Err(invalid_parameter(
                "length",
                &length,
                &"must be positive and finite",
            ));
        }
        let length = clamp.apply(length);
        let delta = self.strand_node_mut(id)?.strand.rescale(length);
        self.finish_edit(id, Endpoint::End, delta)
    }

    /// Reject edits to the pinned start of an attached strand
    fn ensure_free(&self, id: StrandId, which: Endpoint) -> Result<()> {
        let node = self.strand_node(id)?;
        if which == Endpoint::Start && node.attachment.is_some() {
            return Err(StrandError::PinnedEndpoint {
                layer_name: node.strand.layer_name.clone(),
            });
        }
        Ok(())
    }

    /// Refresh derived state after `which` of `id` moved by `delta`
    fn finish_edit(&mut self, id: StrandId, which: Endpoint, delta: Point2D) -> Result<()> {
        let node = self.strand_node_mut(id)?;
        node.strand.update_shape();
        if let Some(attachment) = node.attachment.as_mut() {
            attachment.angle_deg = node.strand.angle_deg();
            attachment.length = node.strand.length();
        }

        let mut touched = vec![id];
        let pinned: Vec<StrandId> = self
            .children(id)?
            .iter()
            .copied()
            .filter(|child| self.attachment(*child).is_some_and(|a| a.side == which))
            .collect();
        for child in pinned {
            touched.extend(self.follow_parent(child)?);
        }

        log::debug!(
            "edited {which:?} of {id:?} by ({:.3}, {:.3}), {} strands touched",
            delta.x,
            delta.y,
            touched.len()
        );
        self.refresh_masks(&touched)
    }

    /// Re-pin `child` to its parent endpoint, carrying its descendants along
    ///
    /// Angle and length are kept, so the whole subtree translates rigidly.
    fn follow_parent(&mut self, child: StrandId) -> Result<Vec<StrandId>> {
        let mut touched = Vec::new();
        let mut pending = vec![child];

        while let Some(current) = pending.pop() {
            let Some(attachment) = self.attachment(current) else {
                continue;
            };
            let anchor = self.strand(attachment.parent)?.endpoint(attachment.side);
            let node = self.strand_node_mut(current)?;
            let delta = anchor - node.strand.start();
            node.strand.translate(delta);
            node.strand.set_endpoint(Endpoint::Start, anchor);
            node.strand.update_shape();
            pending.extend(node.children.iter().copied());
            touched.push(current);
        }

        Ok(touched)
    }
}
