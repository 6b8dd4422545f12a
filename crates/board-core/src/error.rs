//! Error types for the board core
//!
//! Covers the local, synchronous invariant violations of the graph
//! model and the canvas hierarchy. Network-side failures live with the
//! collaborator crates. Nothing here is fatal: every error maps to
//! "the last action did not take effect, local state is intact".

use crate::types::{CanvasId, ModuleId, NodeId};

/// Graph model invariant violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Node rejected by an invariant (duplicate id, non-editable target, ...)
    #[error("invalid node: {0}")]
    InvalidNode(String),

    /// Referenced node is absent from the active canvas
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// The module is already placed on the active canvas
    #[error("module already placed on this canvas: {0}")]
    DuplicateModule(ModuleId),
}

impl GraphError {
    /// Whether this is a duplicate-placement rejection
    #[inline]
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateModule(_))
    }
}

/// Canvas hierarchy violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    /// Referenced canvas is not in the forest
    #[error("unknown canvas: {0}")]
    UnknownCanvas(CanvasId),

    /// Inserting the canvas would make the parent relation cyclic
    #[error("canvas parent chain would form a cycle at: {0}")]
    CycleDetected(CanvasId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_error_display() {
        let err = GraphError::DuplicateModule(ModuleId::from("M1"));
        assert!(err.to_string().contains("M1"));
        assert!(err.is_duplicate());
    }

    #[test]
    fn hierarchy_error_display() {
        let id = CanvasId::new();
        let err = HierarchyError::CycleDetected(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
