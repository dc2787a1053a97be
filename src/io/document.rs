//! JSON document model
//!
//! A document lists every strand, attached strand and mask as a tagged
//! record. Records refer to each other by layer name; `index` is the
//! render position. Loading is handled by [`crate::io::loader`].

use crate::geometry::Point2D;
use crate::geometry::ribbon::Quad;
use crate::graph::arena::{Node, StrandGraph, StrandNode};
use crate::graph::strand_like::StrandLike;
use crate::io::error::{Result, WithContext};
use crate::strand::controls::{ControlPoint, CurveControls, NEUTRAL_BIAS};
use crate::strand::curve::Strand;
use crate::strand::style::{Rgba, StrandStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level persisted form of a graph
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Every node, in any order
    pub strands: Vec<StrandRecord>,
    /// Named selection sets, carried through untouched
    #[serde(default)]
    pub groups: serde_json::Map<String, serde_json::Value>,
}

/// One node of the graph
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StrandRecord {
    /// Free-standing strand
    Strand(StrandFields),
    /// Strand pinned to a parent endpoint
    AttachedStrand(AttachedFields),
    /// Mask of two strands
    MaskedStrand(MaskedFields),
}

/// Fields every record carries
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommonFields {
    /// Render position
    pub index: usize,
    /// Unique layer name
    pub layer_name: String,
    /// Set number
    pub set_number: u32,
    /// Fill color
    pub color: Rgba,
    /// Border color
    #[serde(default = "default_stroke_color")]
    pub stroke_color: Rgba,
    /// Border thickness
    pub stroke_width: f64,
    /// Ribbon width
    pub width: f64,
    /// Caps at start and end
    #[serde(default)]
    pub has_circles: [bool; 2],
}

/// Centerline of a strand record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveFields {
    /// Start point
    #[serde(with = "xy")]
    pub start: Point2D,
    /// End point
    #[serde(with = "xy")]
    pub end: Point2D,
    /// The two cubic handles
    #[serde(with = "xy_pair")]
    pub control_points: [Point2D; 2],
    /// Lock flags of the cubic handles
    #[serde(default)]
    pub control_points_locked: [bool; 2],
    /// Center handle
    #[serde(with = "xy")]
    pub control_point_center: Point2D,
    /// Lock flag of the center handle
    #[serde(default)]
    pub control_point_center_locked: bool,
    /// Pull of each half towards the center handle
    #[serde(default)]
    pub bias_control: BiasFields,
    /// Layer names of the children, in attachment order
    #[serde(default)]
    pub attached_strands: Vec<String>,
}

/// Bias of the center-bent curve halves
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiasFields {
    /// First half
    pub triangle_bias: f64,
    /// Second half
    pub circle_bias: f64,
}

impl Default for BiasFields {
    fn default() -> Self {
        Self {
            triangle_bias: NEUTRAL_BIAS,
            circle_bias: NEUTRAL_BIAS,
        }
    }
}

/// Record of a free-standing strand
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrandFields {
    /// Shared fields
    #[serde(flatten)]
    pub common: CommonFields,
    /// Geometry
    #[serde(flatten)]
    pub curve: CurveFields,
}

/// Record of an attached strand
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttachedFields {
    /// Shared fields
    #[serde(flatten)]
    pub common: CommonFields,
    /// Geometry
    #[serde(flatten)]
    pub curve: CurveFields,
    /// Layer name of the parent
    #[serde(alias = "attached_to")]
    pub parent_layer_name: String,
    /// Parent endpoint, 0 for start and 1 for end; inferred when absent
    #[serde(default)]
    pub attachment_side: Option<u8>,
    /// Direction of the strand in degrees
    #[serde(default)]
    pub angle: f64,
    /// Length of the strand
    #[serde(default)]
    pub length: f64,
}

/// Record of a mask
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaskedFields {
    /// Shared fields
    #[serde(flatten)]
    pub common: CommonFields,
    /// Layer name of the lower source
    pub first_selected_strand: String,
    /// Layer name of the upper source
    pub second_selected_strand: String,
    /// Cut-outs
    #[serde(default)]
    pub deletion_rectangles: Vec<DeletionRectangle>,
}

/// Four-cornered cut-out of a mask
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeletionRectangle {
    /// First corner
    #[serde(with = "xy")]
    pub top_left: Point2D,
    /// Second corner
    #[serde(with = "xy")]
    pub top_right: Point2D,
    /// Third corner
    #[serde(with = "xy")]
    pub bottom_right: Point2D,
    /// Fourth corner
    #[serde(with = "xy")]
    pub bottom_left: Point2D,
}

/// Points are stored as `{"x": .., "y": ..}` objects
#[derive(Clone, Copy, Serialize, Deserialize)]
struct Xy {
    x: f64,
    y: f64,
}

impl From<Point2D> for Xy {
    fn from(point: Point2D) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl From<Xy> for Point2D {
    fn from(point: Xy) -> Self {
        Self::new(point.x, point.y)
    }
}

mod xy {
    use super::{Point2D, Xy};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(point: &Point2D, serializer: S) -> Result<S::Ok, S::Error> {
        Xy::from(*point).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Point2D, D::Error> {
        Xy::deserialize(deserializer).map(Point2D::from)
    }
}

mod xy_pair {
    use super::{Point2D, Xy};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        points: &[Point2D; 2],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        points.map(Xy::from).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[Point2D; 2], D::Error> {
        <[Xy; 2]>::deserialize(deserializer).map(|points| points.map(Point2D::from))
    }
}

impl From<Quad> for DeletionRectangle {
    fn from([top_left, top_right, bottom_right, bottom_left]: Quad) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }
}

impl From<DeletionRectangle> for Quad {
    fn from(rectangle: DeletionRectangle) -> Self {
        [
            rectangle.top_left,
            rectangle.top_right,
            rectangle.bottom_right,
            rectangle.bottom_left,
        ]
    }
}

const fn default_stroke_color() -> Rgba {
    Rgba::BLACK
}

impl StrandRecord {
    /// Shared fields
    pub const fn common(&self) -> &CommonFields {
        match self {
            Self::Strand(fields) => &fields.common,
            Self::AttachedStrand(fields) => &fields.common,
            Self::MaskedStrand(fields) => &fields.common,
        }
    }

    /// Shared fields, mutably
    pub fn common_mut(&mut self) -> &mut CommonFields {
        match self {
            Self::Strand(fields) => &mut fields.common,
            Self::AttachedStrand(fields) => &mut fields.common,
            Self::MaskedStrand(fields) => &mut fields.common,
        }
    }

    /// Render position
    pub const fn index(&self) -> usize {
        self.common().index
    }

    /// Layer name
    pub fn layer_name(&self) -> &str {
        &self.common().layer_name
    }
}

impl CommonFields {
    fn of(index: usize, view: &dyn StrandLike) -> Self {
        let style = view.style();
        Self {
            index,
            layer_name: view.layer_name().to_string(),
            set_number: view.set_number(),
            color: style.color,
            stroke_color: style.stroke_color,
            stroke_width: style.stroke_width,
            width: view.width(),
            has_circles: view.has_circles(),
        }
    }

    /// Style described by the record
    pub const fn style(&self) -> StrandStyle {
        StrandStyle {
            color: self.color,
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
        }
    }
}

impl CurveFields {
    fn of(node: &StrandNode, graph: &StrandGraph) -> Result<Self> {
        let strand = &node.strand;
        let controls = &strand.controls;
        let attached_strands = node
            .children()
            .iter()
            .map(|child| graph.strand(*child).map(|child| child.layer_name.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            start: strand.start(),
            end: strand.end(),
            control_points: [controls.first.position, controls.second.position],
            control_points_locked: [controls.first.locked, controls.second.locked],
            control_point_center: controls.center.position,
            control_point_center_locked: controls.center.locked,
            bias_control: BiasFields {
                triangle_bias: controls.triangle_bias,
                circle_bias: controls.circle_bias,
            },
            attached_strands,
        })
    }

    /// Handles described by the record
    pub fn controls(&self) -> CurveControls {
        let [first, second] = self.control_points;
        let [first_locked, second_locked] = self.control_points_locked;
        let mut controls = CurveControls {
            first: ControlPoint {
                position: first,
                locked: first_locked,
            },
            second: ControlPoint {
                position: second,
                locked: second_locked,
            },
            center: ControlPoint {
                position: self.control_point_center,
                locked: self.control_point_center_locked,
            },
            ..CurveControls::straight(self.start, self.end)
        };
        controls.set_bias(self.bias_control.triangle_bias, self.bias_control.circle_bias);
        controls
    }

    /// Strand described by the record, without attachments
    pub fn strand(&self, common: &CommonFields) -> Strand {
        let mut strand = Strand::new(
            common.layer_name.clone(),
            common.set_number,
            self.start,
            self.end,
        )
        .with_width(common.width)
        .with_style(common.style());
        strand.controls = self.controls();
        strand.has_circles = common.has_circles;
        strand.update_shape();
        strand
    }
}

impl Document {
    /// Snapshot of `graph`, records in render order
    ///
    /// # Errors
    ///
    /// Returns an error if the graph holds a stale reference
    pub fn from_graph(graph: &StrandGraph) -> Result<Self> {
        let mut strands = Vec::with_capacity(graph.len());

        for (index, id) in graph.render_order().iter().enumerate() {
            let view = graph.view(*id)?;
            let common = CommonFields::of(index, view.as_ref());

            let record = match graph.node(*id)? {
                Node::Strand(node) => {
                    let curve = CurveFields::of(node, graph)?;
                    match node.attachment {
                        None => StrandRecord::Strand(StrandFields { common, curve }),
                        Some(attachment) => StrandRecord::AttachedStrand(AttachedFields {
                            common,
                            curve,
                            parent_layer_name: graph.strand(attachment.parent)?.layer_name.clone(),
                            attachment_side: u8::try_from(attachment.side.index()).ok(),
                            angle: attachment.angle_deg,
                            length: attachment.length,
                        }),
                    }
                }
                Node::Mask(mask) => StrandRecord::MaskedStrand(MaskedFields {
                    common,
                    first_selected_strand: graph.strand(mask.first)?.layer_name.clone(),
                    second_selected_strand: graph.strand(mask.second)?.layer_name.clone(),
                    deletion_rectangles: mask
                        .deletion_rectangles
                        .iter()
                        .copied()
                        .map(DeletionRectangle::from)
                        .collect(),
                }),
            };
            strands.push(record);
        }

        Ok(Self {
            strands,
            groups: serde_json::Map::new(),
        })
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid document
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a document from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_path(path, "read document")?;
        serde_json::from_str(&text).with_path(path, "parse document")
    }

    /// Write the document to disk, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn write(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).with_path(path, "serialize document")?;
        fs::write(path, text).with_path(path, "write document")
    }
}
