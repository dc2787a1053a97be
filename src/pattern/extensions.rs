//! Extension strands continuing the tails outward

use crate::geometry::{PlaneExt, Point2D};
use crate::graph::arena::StrandGraph;
use crate::io::error::{Result, generation_error};
use crate::pattern::builder::{Emission, GridSet};
use crate::pattern::config::{
    Axis, ExtensionAngles, ROLE_EXTENSION_A, ROLE_EXTENSION_B, ROLE_TAIL_A, ROLE_TAIL_B,
};
use crate::strand::curve::{Endpoint, Strand};
use crate::strand::layer::LayerName;

/// Tail role each extension continues
pub const EXTENSION_ROLES: [(u32, u32); 2] =
    [(ROLE_TAIL_A, ROLE_EXTENSION_A), (ROLE_TAIL_B, ROLE_EXTENSION_B)];

/// Offset of length `length` along a bearing measured clockwise from +y
pub fn bearing_offset(length: f64, bearing_deg: f64) -> Point2D {
    let (sin, cos) = bearing_deg.to_radians().sin_cos();
    Point2D::new(length * sin, length * cos)
}

/// Extensions for one set with their roles, attached to the free end of each tail
///
/// An extension is as long as its tail plus `extra_length` and inherits
/// the tail's width and style. Free ends are rounded to two decimals so
/// generated files stay stable across platforms.
///
/// # Errors
///
/// Returns an error if the set is missing a tail or a handle is stale
pub fn extension_emissions(
    graph: &StrandGraph,
    set: &GridSet,
    axis: Axis,
    angles: &ExtensionAngles,
    extra_length: f64,
) -> Result<Vec<(u32, Emission)>> {
    let mut emissions = Vec::with_capacity(EXTENSION_ROLES.len());

    for (tail_role, extension_role) in EXTENSION_ROLES {
        let tail_id = set.get(tail_role).ok_or_else(|| {
            generation_error(
                "extensions",
                &format!("set {} has no {tail_role} tail", set.set_number),
            )
        })?;
        let tail = graph.strand(tail_id)?;

        let start = tail.end();
        let length = tail.length() + extra_length;
        let end = (start + bearing_offset(length, angles.bearing(axis, extension_role))).rounded(2);

        let strand = Strand::new(
            LayerName::new(set.set_number, extension_role).to_string(),
            set.set_number,
            start,
            end,
        )
        .with_width(tail.width)
        .with_style(tail.style);

        emissions.push((
            extension_role,
            Emission::Attached {
                parent: tail_id,
                side: Endpoint::End,
                strand,
            },
        ));
    }

    Ok(emissions)
}
