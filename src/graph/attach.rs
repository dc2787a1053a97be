//! Attaching new strands to a parent endpoint

use crate::geometry::{PlaneExt, Point2D};
use crate::graph::arena::{Attachment, Node, StrandGraph, StrandId, StrandNode};
use crate::io::configuration::DEFAULT_ATTACHED_LENGTH;
use crate::io::error::StrandError;
use crate::strand::curve::{Endpoint, Strand};
use crate::strand::layer::LayerName;
use std::fmt;

/// Why an attachment was refused; the graph is left untouched
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachRejected {
    /// Another child already hangs off this endpoint
    EndpointOccupied {
        /// Parent layer name
        parent: String,
        /// The occupied endpoint
        endpoint: Endpoint,
    },
    /// The endpoint cannot carry children
    ///
    /// The start of an attached strand is its parent's endpoint, and masks
    /// have no endpoints at all.
    NoSuchEndpoint {
        /// Parent layer name
        parent: String,
        /// The requested endpoint
        endpoint: Endpoint,
    },
    /// The parent handle is stale
    UnknownParent,
    /// The child's layer name is already taken
    LayerNameTaken {
        /// The contested name
        layer_name: String,
    },
}

impl fmt::Display for AttachRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndpointOccupied { parent, endpoint } => {
                write!(f, "{endpoint:?} of '{parent}' already has an attached strand")
            }
            Self::NoSuchEndpoint { parent, endpoint } => {
                write!(f, "'{parent}' has no attachable {endpoint:?}")
            }
            Self::UnknownParent => write!(f, "parent strand no longer exists"),
            Self::LayerNameTaken { layer_name } => {
                write!(f, "layer name '{layer_name}' is already in use")
            }
        }
    }
}

impl std::error::Error for AttachRejected {}

impl From<AttachRejected> for StrandError {
    fn from(rejection: AttachRejected) -> Self {
        Self::InvalidAttachment {
            reason: rejection.to_string(),
        }
    }
}

impl StrandGraph {
    /// Attach a new strand to `endpoint` of `parent`, pointing away from it
    ///
    /// The child continues the parent's direction at that end, has the
    /// default attached length, inherits width and style, and takes the next
    /// free role in the parent's set.
    ///
    /// # Errors
    ///
    /// Returns a rejection if the endpoint is occupied or cannot carry children
    pub fn attach(
        &mut self,
        parent: StrandId,
        endpoint: Endpoint,
    ) -> Result<StrandId, AttachRejected> {
        self.check_attachable(parent, endpoint)?;
        let angle = self
            .strand(parent)
            .map_err(|_stale| AttachRejected::UnknownParent)?
            .outward_tangent(endpoint)
            .angle_deg();
        self.attach_with(parent, endpoint, angle, DEFAULT_ATTACHED_LENGTH)
    }

    /// Attach a new strand with an explicit direction and length
    ///
    /// # Errors
    ///
    /// Returns a rejection if the endpoint is occupied or cannot carry children
    pub fn attach_with(
        &mut self,
        parent: StrandId,
        endpoint: Endpoint,
        angle_deg: f64,
        length: f64,
    ) -> Result<StrandId, AttachRejected> {
        self.check_attachable(parent, endpoint)?;
        let parent_strand = self
            .strand(parent)
            .map_err(|_stale| AttachRejected::UnknownParent)?;
        let start = parent_strand.endpoint(endpoint);
        let layer_name = LayerName::new(
            parent_strand.set_number,
            self.next_role(parent_strand.set_number),
        );
        let child = Strand::new(
            layer_name.to_string(),
            parent_strand.set_number,
            start,
            start + Point2D::from_polar(length, angle_deg),
        )
        .with_width(parent_strand.width)
        .with_style(parent_strand.style);

        self.attach_strand(parent, endpoint, child)
    }

    /// Attach an existing strand, pinning its start to the parent endpoint
    ///
    /// The child's end stays where it is; angle and length are read back
    /// from the resulting geometry.
    ///
    /// # Errors
    ///
    /// Returns a rejection if the endpoint is occupied, cannot carry
    /// children, or the child's layer name is taken
    pub fn attach_strand(
        &mut self,
        parent: StrandId,
        endpoint: Endpoint,
        mut child: Strand,
    ) -> Result<StrandId, AttachRejected> {
        self.check_attachable(parent, endpoint)?;
        if self.find(&child.layer_name).is_some() {
            return Err(AttachRejected::LayerNameTaken {
                layer_name: child.layer_name,
            });
        }

        let anchor = self
            .strand(parent)
            .map_err(|_stale| AttachRejected::UnknownParent)?
            .endpoint(endpoint);
        child.set_endpoint(Endpoint::Start, anchor);
        child.has_circles = [true, false];
        child.update_shape();

        let attachment = Attachment {
            parent,
            side: endpoint,
            angle_deg: child.angle_deg(),
            length: child.length(),
        };
        let layer_name = child.layer_name.clone();
        let id = self
            .insert(Node::Strand(StrandNode {
                strand: child,
                attachment: Some(attachment),
                children: Vec::new(),
            }))
            .map_err(|_taken| AttachRejected::LayerNameTaken { layer_name })?;

        if let Ok(node) = self.strand_node_mut(parent) {
            node.children.push(id);
            if let Some(flag) = node.strand.has_circles.get_mut(endpoint.index()) {
                *flag = true;
            }
        }
        log::debug!("attached {id:?} to {endpoint:?} of {parent:?}");
        Ok(id)
    }

    /// Whether a new child could be attached at `endpoint` of `parent`
    ///
    /// # Errors
    ///
    /// Returns the rejection an attachment there would produce
    pub fn check_attachable(
        &self,
        parent: StrandId,
        endpoint: Endpoint,
    ) -> Result<(), AttachRejected> {
        let node = match self.node(parent) {
            Ok(Node::Strand(node)) => node,
            Ok(Node::Mask(mask)) => {
                return Err(AttachRejected::NoSuchEndpoint {
                    parent: mask.layer_name.clone(),
                    endpoint,
                });
            }
            Err(_stale) => return Err(AttachRejected::UnknownParent),
        };

        let parent_name = node.strand.layer_name.clone();
        if endpoint == Endpoint::Start && node.attachment.is_some() {
            return Err(AttachRejected::NoSuchEndpoint {
                parent: parent_name,
                endpoint,
            });
        }
        let occupied = node
            .children
            .iter()
            .any(|child| self.attachment(*child).is_some_and(|a| a.side == endpoint));
        if occupied {
            return Err(AttachRejected::EndpointOccupied {
                parent: parent_name,
                endpoint,
            });
        }
        Ok(())
    }

    /// Smallest role above every strand already in `set_number`
    fn next_role(&self, set_number: u32) -> u32 {
        self.nodes()
            .filter_map(|(_, node)| LayerName::parse(node.layer_name()))
            .filter(|name| name.set_number == set_number)
            .map(|name| name.role)
            .max()
            .map_or(1, |role| role + 1)
    }
}
