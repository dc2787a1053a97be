//! Rebuilding a graph from a document
//!
//! Records may appear in any order. Each pass loads every record whose
//! references are already resolved and defers the rest; passes repeat until
//! nothing is left or a pass makes no progress.

use crate::graph::arena::{Node, StrandGraph, StrandId};
use crate::io::document::{AttachedFields, Document, MaskedFields, StrandRecord};
use crate::io::error::{Result, StrandError};
use crate::strand::curve::Endpoint;
use std::collections::HashMap;

/// Build the graph a document describes
///
/// The render order follows the records' `index`, ties broken by position
/// in the document. Masks keep the set number their record carries.
///
/// # Errors
///
/// Returns an error if:
/// - A record references a layer name no record provides
/// - Two records share a layer name
/// - An attachment targets an occupied or missing endpoint
pub fn load_graph(document: &Document) -> Result<StrandGraph> {
    let mut records: Vec<&StrandRecord> = document.strands.iter().collect();
    records.sort_by_key(|record| record.index());

    let mut graph = StrandGraph::new();
    let mut loaded: HashMap<&str, StrandId> = HashMap::with_capacity(records.len());
    let mut pending = records.clone();
    let mut pass = 0usize;

    while !pending.is_empty() {
        pass += 1;
        let before = pending.len();
        let mut deferred = Vec::new();

        for record in pending {
            match try_load(&mut graph, record)? {
                Some(id) => {
                    loaded.insert(record.layer_name(), id);
                }
                None => deferred.push(record),
            }
        }

        if deferred.len() == before {
            return Err(dangling(&graph, deferred.first().copied()));
        }
        if !deferred.is_empty() {
            log::debug!("pass {pass}: deferred {} records", deferred.len());
        }
        pending = deferred;
    }

    restore_children(&mut graph, &records, &loaded)?;
    restore_caps(&mut graph, &records, &loaded)?;

    let order: Vec<StrandId> = records
        .iter()
        .filter_map(|record| loaded.get(record.layer_name()).copied())
        .collect();
    graph.reorder(order);

    log::info!("loaded {} records in {pass} passes", records.len());
    Ok(graph)
}

/// Load one record, `None` if a reference is not loaded yet
fn try_load(graph: &mut StrandGraph, record: &StrandRecord) -> Result<Option<StrandId>> {
    match record {
        StrandRecord::Strand(fields) => graph
            .add_strand(fields.curve.strand(&fields.common))
            .map(Some),
        StrandRecord::AttachedStrand(fields) => load_attached(graph, fields),
        StrandRecord::MaskedStrand(fields) => load_mask(graph, fields),
    }
}

fn load_attached(graph: &mut StrandGraph, fields: &AttachedFields) -> Result<Option<StrandId>> {
    let Some(parent) = graph.find(&fields.parent_layer_name) else {
        return Ok(None);
    };
    let strand = fields.curve.strand(&fields.common);

    let side = match fields
        .attachment_side
        .and_then(|side| Endpoint::from_index(usize::from(side)))
    {
        Some(side) => side,
        None => {
            let parent_strand = graph.strand(parent)?;
            let to_start = parent_strand.start().distance(strand.start());
            let to_end = parent_strand.end().distance(strand.start());
            log::warn!(
                "'{}' has no attachment side; using the nearest endpoint of '{}'",
                fields.common.layer_name,
                fields.parent_layer_name
            );
            if to_start <= to_end {
                Endpoint::Start
            } else {
                Endpoint::End
            }
        }
    };

    Ok(Some(graph.attach_strand(parent, side, strand)?))
}

fn load_mask(graph: &mut StrandGraph, fields: &MaskedFields) -> Result<Option<StrandId>> {
    let (Some(first), Some(second)) = (
        graph.find(&fields.first_selected_strand),
        graph.find(&fields.second_selected_strand),
    ) else {
        return Ok(None);
    };
    let rectangles = fields
        .deletion_rectangles
        .iter()
        .copied()
        .map(Into::into)
        .collect();
    let id = graph.create_mask_with(first, second, rectangles)?;
    if let Node::Mask(mask) = graph.node_mut(id)? {
        mask.set_number = fields.common.set_number;
    }
    Ok(Some(id))
}

/// Error naming the first reference that never resolved
fn dangling(graph: &StrandGraph, record: Option<&StrandRecord>) -> StrandError {
    let unresolved = |name: &str| graph.find(name).is_none();
    let (missing, field) = match record {
        Some(StrandRecord::AttachedStrand(fields)) => {
            (fields.parent_layer_name.clone(), "parent_layer_name")
        }
        Some(StrandRecord::MaskedStrand(fields)) => {
            if unresolved(&fields.first_selected_strand) {
                (fields.first_selected_strand.clone(), "first_selected_strand")
            } else {
                (fields.second_selected_strand.clone(), "second_selected_strand")
            }
        }
        Some(StrandRecord::Strand(_)) | None => (String::new(), "strands"),
    };
    StrandError::DanglingReference {
        layer_name: record.map(|r| r.layer_name().to_string()).unwrap_or_default(),
        missing,
        field,
    }
}

/// Put children in the order their parent's record lists them
fn restore_children(
    graph: &mut StrandGraph,
    records: &[&StrandRecord],
    loaded: &HashMap<&str, StrandId>,
) -> Result<()> {
    for record in records {
        let curve = match record {
            StrandRecord::Strand(fields) => &fields.curve,
            StrandRecord::AttachedStrand(fields) => &fields.curve,
            StrandRecord::MaskedStrand(_) => continue,
        };
        let Some(id) = loaded.get(record.layer_name()) else {
            continue;
        };
        let listed: Vec<StrandId> = curve
            .attached_strands
            .iter()
            .filter_map(|name| loaded.get(name.as_str()).copied())
            .collect();

        let node = graph.strand_node_mut(*id)?;
        let mut current = node.children.clone();
        let mut wanted = listed.clone();
        current.sort_unstable();
        wanted.sort_unstable();
        if current == wanted {
            node.children = listed;
        } else {
            log::warn!(
                "children of '{}' do not match its attached_strands list",
                record.layer_name()
            );
        }
    }
    Ok(())
}

/// Attaching sets cap flags; the record's flags win
fn restore_caps(
    graph: &mut StrandGraph,
    records: &[&StrandRecord],
    loaded: &HashMap<&str, StrandId>,
) -> Result<()> {
    for record in records {
        if matches!(record, StrandRecord::MaskedStrand(_)) {
            continue;
        }
        if let Some(id) = loaded.get(record.layer_name()) {
            graph.strand_node_mut(*id)?.strand.has_circles = record.common().has_circles;
        }
    }
    Ok(())
}
