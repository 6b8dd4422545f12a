//! Drag-placement protocol
//!
//! Bridges the external palette (module list, "new idea" affordance) to
//! graph mutations: a drop event plus a dragged payload becomes a new
//! sticker node at the drop coordinate.
//!
//! Module status is snapshotted at placement time and never re-derived
//! afterward; already-placed stickers do not update when the registry
//! changes.

use crate::error::GraphError;
use crate::graph::GraphModel;
use crate::status::{resolve_status, RegistrySnapshot};
use crate::types::{ModuleId, Node, NodeId, Position, Sticker};

/// What is being dragged onto the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    /// A module from the registry palette
    Module {
        /// Registry module identifier
        module_id: ModuleId,
    },
    /// The "new idea" affordance; lands as a free sticker until the
    /// capture workflow backs it with a persisted idea
    Idea {
        /// Initial sticker label
        label: String,
    },
}

/// Place a dragged payload at a drop coordinate
///
/// For modules the completion status is resolved against `registry` at
/// this moment, the family provenance is attached when cataloged, and a
/// module already present on the canvas is rejected. The palette is
/// expected to disable the affordance, but placement rejects duplicates
/// itself rather than silently creating a second node.
///
/// # Errors
/// `DuplicateModule` if a sticker for the module already exists on the
/// active canvas.
pub fn place(
    graph: &mut GraphModel,
    registry: &RegistrySnapshot,
    payload: DragPayload,
    at: Position,
) -> Result<NodeId, GraphError> {
    match payload {
        DragPayload::Module { module_id } => {
            if graph.contains_module(&module_id) {
                return Err(GraphError::DuplicateModule(module_id));
            }
            let status = resolve_status(registry, &module_id);
            let label = registry
                .label_of(&module_id)
                .unwrap_or(module_id.as_str())
                .to_string();
            let family = registry.family_of(&module_id).map(|f| f.tag());
            let node = Node::sticker(at, Sticker::module(label, module_id, status, family));
            graph.add_node(node)
        }
        DragPayload::Idea { label } => {
            let node = Node::sticker(at, Sticker::free(label));
            graph.add_node(node)
        }
    }
}
