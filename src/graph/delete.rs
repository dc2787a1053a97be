//! Cascading deletion of strands, their descendants and dependent masks

use crate::graph::arena::{Node, StrandGraph, StrandId};
use crate::io::error::Result;
use std::collections::HashSet;

impl StrandGraph {
    /// Delete a node together with everything that depends on it
    ///
    /// Deleting a strand detaches it from its parent, deletes all of its
    /// descendants and every mask built on any of the deleted strands.
    /// Deleting a mask removes only the mask. Returns the layer names
    /// removed, in removal order.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale
    pub fn delete(&mut self, id: StrandId) -> Result<Vec<String>> {
        if let Node::Mask(_) = self.node(id)? {
            return Ok(self
                .remove(id)
                .map(|node| vec![node.layer_name().to_string()])
                .unwrap_or_default());
        }

        let doomed: HashSet<StrandId> = self.subtree(id)?.into_iter().collect();
        let dependent_masks: Vec<StrandId> = self
            .masks()
            .filter(|(_, mask)| doomed.contains(&mask.first) || doomed.contains(&mask.second))
            .map(|(mask_id, _)| mask_id)
            .collect();

        if let Some(attachment) = self.attachment(id)
            && let Ok(parent) = self.strand_node_mut(attachment.parent)
        {
            parent.children.retain(|child| *child != id);
        }

        let mut removed = Vec::with_capacity(doomed.len() + dependent_masks.len());
        for victim in dependent_masks.into_iter().chain(self.subtree(id)?) {
            if let Some(node) = self.remove(victim) {
                removed.push(node.layer_name().to_string());
            }
        }
        log::debug!("deleted {} nodes starting at {id:?}", removed.len());
        Ok(removed)
    }
}
