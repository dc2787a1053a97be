//! Slot arena owning every strand, addressed by generational handles

use crate::geometry::ribbon::EndCap;
use crate::io::error::{Result, StrandError};
use crate::mask::masked::MaskedStrand;
use crate::strand::curve::{Endpoint, Strand};
use std::collections::HashMap;
use std::fmt;

/// Stable handle to a strand in a [`StrandGraph`]
///
/// Handles stay valid until the strand is deleted. A slot reused after
/// deletion carries a new generation, so stale handles are detected rather
/// than silently aliasing the new occupant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrandId {
    index: u32,
    generation: u32,
}

impl fmt::Debug for StrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StrandId({}v{})", self.index, self.generation)
    }
}

/// How an attached strand hangs off its parent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attachment {
    /// Strand this one is attached to
    pub parent: StrandId,
    /// Parent endpoint the start is pinned to
    pub side: Endpoint,
    /// Direction from start to end, in degrees
    pub angle_deg: f64,
    /// Distance from start to end
    pub length: f64,
}

/// A drawable strand with its graph relations
#[derive(Clone, Debug)]
pub struct StrandNode {
    /// Geometry and appearance
    pub strand: Strand,
    /// Parent link, `None` for root strands
    pub attachment: Option<Attachment>,
    pub(crate) children: Vec<StrandId>,
}

impl StrandNode {
    /// Attached children in attachment order
    pub fn children(&self) -> &[StrandId] {
        &self.children
    }

    /// Whether the given end of this strand meets another strand
    pub fn is_joined(&self, which: Endpoint, graph: &StrandGraph) -> bool {
        let pinned = which == Endpoint::Start && self.attachment.is_some();
        pinned
            || self.children.iter().any(|child| {
                graph
                    .attachment(*child)
                    .is_some_and(|attachment| attachment.side == which)
            })
    }
}

/// Anything stored in the graph
#[derive(Clone, Debug)]
pub enum Node {
    /// Root or attached strand
    Strand(StrandNode),
    /// Computed overlap of two strands
    Mask(MaskedStrand),
}

impl Node {
    /// Layer name of the node
    pub fn layer_name(&self) -> &str {
        match self {
            Self::Strand(node) => &node.strand.layer_name,
            Self::Mask(mask) => &mask.layer_name,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Forest of strands plus the masks derived from them
///
/// Parent and child links are stored as handles, never references. Render
/// order is kept separately; later entries draw on top.
#[derive(Clone, Debug, Default)]
pub struct StrandGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<StrandId>,
    names: HashMap<String, StrandId>,
}

impl StrandGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes, masks included
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: StrandId) -> bool {
        self.slot(id).is_some()
    }

    /// Handles in render order, bottom first
    pub fn render_order(&self) -> &[StrandId] {
        &self.order
    }

    /// Position of `id` in render order
    pub fn render_index(&self, id: StrandId) -> Option<usize> {
        self.order.iter().position(|candidate| *candidate == id)
    }

    /// Handle of the node with this layer name
    pub fn find(&self, layer_name: &str) -> Option<StrandId> {
        self.names.get(layer_name).copied()
    }

    /// Live node behind `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale
    pub fn node(&self, id: StrandId) -> Result<&Node> {
        self.slot(id).ok_or_else(|| stale(id))
    }

    /// Strand node behind `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or names a mask
    pub fn strand_node(&self, id: StrandId) -> Result<&StrandNode> {
        match self.node(id)? {
            Node::Strand(node) => Ok(node),
            Node::Mask(mask) => Err(wrong_kind(&mask.layer_name, "strand")),
        }
    }

    /// Strand geometry behind `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or names a mask
    pub fn strand(&self, id: StrandId) -> Result<&Strand> {
        self.strand_node(id).map(|node| &node.strand)
    }

    /// Mask behind `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or names a strand
    pub fn mask(&self, id: StrandId) -> Result<&MaskedStrand> {
        match self.node(id)? {
            Node::Mask(mask) => Ok(mask),
            Node::Strand(node) => Err(wrong_kind(&node.strand.layer_name, "mask")),
        }
    }

    /// Parent link of `id`, `None` for roots, masks and stale handles
    pub fn attachment(&self, id: StrandId) -> Option<Attachment> {
        match self.slot(id)? {
            Node::Strand(node) => node.attachment,
            Node::Mask(_) => None,
        }
    }

    /// Attached children of `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or names a mask
    pub fn children(&self, id: StrandId) -> Result<&[StrandId]> {
        self.strand_node(id).map(StrandNode::children)
    }

    /// Caps to draw at both ends of a strand
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or names a mask
    pub fn end_caps(&self, id: StrandId) -> Result<[Option<EndCap>; 2]> {
        let node = self.strand_node(id)?;
        let joined = [Endpoint::Start, Endpoint::End].map(|which| node.is_joined(which, self));
        Ok(node.strand.end_caps(joined))
    }

    /// `id` followed by all its descendants, depth first
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale or names a mask
    pub fn subtree(&self, id: StrandId) -> Result<Vec<StrandId>> {
        let mut collected = Vec::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let node = self.strand_node(current)?;
            collected.push(current);
            pending.extend(node.children.iter().rev().copied());
        }
        Ok(collected)
    }

    /// Root strands in render order
    pub fn roots(&self) -> impl Iterator<Item = StrandId> + '_ {
        self.order.iter().copied().filter(|id| {
            matches!(self.slot(*id), Some(Node::Strand(node)) if node.attachment.is_none())
        })
    }

    /// Masks in render order
    pub fn masks(&self) -> impl Iterator<Item = (StrandId, &MaskedStrand)> + '_ {
        self.order.iter().filter_map(|id| match self.slot(*id) {
            Some(Node::Mask(mask)) => Some((*id, mask)),
            _ => None,
        })
    }

    /// Nodes in render order
    pub fn nodes(&self) -> impl Iterator<Item = (StrandId, &Node)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.slot(*id).map(|node| (*id, node)))
    }

    /// Add an unattached strand on top of the render order
    ///
    /// # Errors
    ///
    /// Returns an error if the layer name is taken
    pub fn add_strand(&mut self, strand: Strand) -> Result<StrandId> {
        self.insert(Node::Strand(StrandNode {
            strand,
            attachment: None,
            children: Vec::new(),
        }))
    }

    /// Store a node and append it to the render order
    pub(crate) fn insert(&mut self, node: Node) -> Result<StrandId> {
        let layer_name = node.layer_name().to_string();
        if self.names.contains_key(&layer_name) {
            return Err(StrandError::DuplicateLayerName { layer_name });
        }

        let id = if let Some(index) = self.free.pop() {
            let slot = self
                .slots
                .get_mut(index as usize)
                .ok_or_else(|| StrandError::StaleHandle {
                    handle: format!("slot {index}"),
                })?;
            slot.node = Some(node);
            StrandId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = u32::try_from(self.slots.len()).map_err(|_overflow| {
                StrandError::InvalidParameter {
                    parameter: "graph size",
                    value: self.slots.len().to_string(),
                    reason: "too many strands".to_string(),
                }
            })?;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            StrandId {
                index,
                generation: 0,
            }
        };

        self.names.insert(layer_name, id);
        self.order.push(id);
        Ok(id)
    }

    /// Take a node out, invalidating its handle
    pub(crate) fn remove(&mut self, id: StrandId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.names.remove(node.layer_name());
        self.order.retain(|candidate| *candidate != id);
        Some(node)
    }

    /// Mutable node behind `id`
    pub(crate) fn node_mut(&mut self, id: StrandId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or_else(|| stale(id))
    }

    /// Mutable strand node behind `id`
    pub(crate) fn strand_node_mut(&mut self, id: StrandId) -> Result<&mut StrandNode> {
        match self.node_mut(id)? {
            Node::Strand(node) => Ok(node),
            Node::Mask(mask) => Err(wrong_kind(&mask.layer_name, "strand")),
        }
    }

    /// Replace the render order with a permutation of the live handles
    pub(crate) fn reorder(&mut self, order: Vec<StrandId>) {
        if order.len() == self.order.len() && order.iter().all(|id| self.contains(*id)) {
            self.order = order;
        }
    }

    fn slot(&self, id: StrandId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }
}

fn stale(id: StrandId) -> StrandError {
    StrandError::StaleHandle {
        handle: format!("{id:?}"),
    }
}

fn wrong_kind(layer_name: &str, expected: &'static str) -> StrandError {
    StrandError::WrongKind {
        layer_name: layer_name.to_string(),
        expected,
    }
}
