//! Sequential emission of generated strands into a graph

use crate::geometry::ribbon::Quad;
use crate::graph::arena::{StrandGraph, StrandId};
use crate::io::error::{Result, StrandError};
use crate::strand::curve::{Endpoint, Strand};

/// One item handed to [`PatternBuilder::emit`]
#[derive(Clone, Debug)]
pub enum Emission {
    /// Free-standing strand
    Root(Strand),
    /// Strand pinned to a parent endpoint
    Attached {
        /// Parent strand
        parent: StrandId,
        /// Parent endpoint
        side: Endpoint,
        /// The child; its start is moved onto the parent endpoint
        strand: Strand,
    },
    /// Mask of `first` under `second`
    Mask {
        /// Lower strand
        first: StrandId,
        /// Upper strand
        second: StrandId,
        /// Polygons cut out of the overlap
        deletion_rectangles: Vec<Quad>,
    },
}

/// Result of an emission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Emitted {
    /// Render index assigned to the item
    pub index: usize,
    /// Handle of the item in the graph
    pub id: StrandId,
}

/// Owns the graph under construction and the running render index
///
/// Items are drawn in emission order, so later emissions end up on top.
#[derive(Debug, Default)]
pub struct PatternBuilder {
    graph: StrandGraph,
    next_index: usize,
}

impl PatternBuilder {
    /// Start with an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item on top of everything emitted so far
    ///
    /// # Errors
    ///
    /// Returns an error if the graph refuses the item (duplicate layer name,
    /// occupied endpoint, duplicate mask)
    pub fn emit(&mut self, emission: Emission) -> Result<Emitted> {
        let id = match emission {
            Emission::Root(strand) => self.graph.add_strand(strand)?,
            Emission::Attached {
                parent,
                side,
                strand,
            } => self.graph.attach_strand(parent, side, strand)?,
            Emission::Mask {
                first,
                second,
                deletion_rectangles,
            } => self
                .graph
                .create_mask_with(first, second, deletion_rectangles)?,
        };

        let index = self.next_index;
        if self.graph.render_index(id) != Some(index) {
            return Err(StrandError::Generation {
                stage: "emission",
                reason: format!("item {id:?} did not land at render index {index}"),
            });
        }
        self.next_index += 1;
        Ok(Emitted { index, id })
    }

    /// Graph built so far
    pub const fn graph(&self) -> &StrandGraph {
        &self.graph
    }

    /// Number of items emitted
    pub const fn len(&self) -> usize {
        self.next_index
    }

    /// Whether nothing has been emitted
    pub const fn is_empty(&self) -> bool {
        self.next_index == 0
    }

    /// Hand over the finished graph
    pub fn finish(self) -> StrandGraph {
        self.graph
    }
}

/// Working record of one set during generation: role to handle
///
/// Only lives while a pattern is being built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSet {
    /// Set number
    pub set_number: u32,
    /// Handles by role
    pub roles: std::collections::BTreeMap<u32, StrandId>,
}

impl GridSet {
    /// Empty record for `set_number`
    pub const fn new(set_number: u32) -> Self {
        Self {
            set_number,
            roles: std::collections::BTreeMap::new(),
        }
    }

    /// Handle of the strand with `role`
    pub fn get(&self, role: u32) -> Option<StrandId> {
        self.roles.get(&role).copied()
    }
}
