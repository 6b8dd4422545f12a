//! Graph model for the active canvas
//!
//! Holds the canonical in-memory node/edge collections and enforces the
//! node/edge invariants on every mutation. Every successful mutation
//! hands the full current snapshot to the subscribed [`MutationSink`]s,
//! which is how the autosave layer observes the model without the model
//! knowing anything about persistence.

use crate::error::GraphError;
use crate::types::{
    CanvasSnapshot, Edge, EdgeColor, EdgeId, ModuleId, Node, NodeId, NodePayload, Position,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Observer of graph mutations
///
/// Called synchronously after each successful mutation with the full
/// `(nodes, edges)` snapshot; implementations must be cheap (hand off,
/// do not persist inline).
pub trait MutationSink: Send + Sync {
    /// The graph changed; `snapshot` is the complete current content
    fn snapshot_changed(&self, snapshot: &CanvasSnapshot);
}

/// In-memory graph of the active canvas
#[derive(Default)]
pub struct GraphModel {
    nodes: HashMap<NodeId, Node>,
    edges: HashMap<EdgeId, Edge>,
    sinks: Vec<Arc<dyn MutationSink>>,
}

impl GraphModel {
    /// Empty model
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a mutation observer
    pub fn subscribe(&mut self, sink: Arc<dyn MutationSink>) {
        self.sinks.push(sink);
    }

    /// Replace the whole content with a loaded snapshot
    ///
    /// Used on canvas switch; loading is not a local mutation, so sinks
    /// are not notified (nothing new to persist).
    pub fn load(&mut self, snapshot: CanvasSnapshot) {
        self.nodes = snapshot.nodes.into_iter().map(|n| (n.id, n)).collect();
        self.edges = snapshot.edges.into_iter().map(|e| (e.id, e)).collect();
    }

    /// Full current content
    #[must_use]
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            nodes: self.nodes.values().cloned().collect(),
            edges: self.edges.values().cloned().collect(),
        }
    }

    /// Look up a node
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Number of nodes on the canvas
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges on the canvas
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether a module sticker for `module` is already on the canvas
    #[must_use]
    pub fn contains_module(&self, module: &ModuleId) -> bool {
        self.nodes.values().any(|n| n.module_id() == Some(module))
    }

    /// Add a node
    ///
    /// # Errors
    /// `InvalidNode` if the id is already present; `DuplicateModule` if
    /// a sticker for the same module is already on the canvas.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::InvalidNode(format!(
                "node id already present: {}",
                node.id
            )));
        }
        if let Some(module) = node.module_id() {
            if self.contains_module(module) {
                return Err(GraphError::DuplicateModule(module.clone()));
            }
        }
        let id = node.id;
        self.nodes.insert(id, node);
        self.notify();
        Ok(id)
    }

    /// Connect two nodes with the given color category
    ///
    /// Self-loops are permitted.
    ///
    /// # Errors
    /// `UnknownNode` if either endpoint is absent from the canvas.
    pub fn connect(
        &mut self,
        source: NodeId,
        target: NodeId,
        color: EdgeColor,
    ) -> Result<EdgeId, GraphError> {
        if !self.nodes.contains_key(&source) {
            return Err(GraphError::UnknownNode(source));
        }
        if !self.nodes.contains_key(&target) {
            return Err(GraphError::UnknownNode(target));
        }
        let edge = Edge::new(source, target, color);
        let id = edge.id;
        self.edges.insert(id, edge);
        self.notify();
        Ok(id)
    }

    /// Delete nodes, cascading to any edge touching a removed endpoint
    ///
    /// Idempotent: absent ids are skipped. Returns how many nodes were
    /// actually removed; sinks are notified only when something changed.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> usize {
        let mut removed = 0;
        for id in ids {
            if self.nodes.remove(id).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            let nodes = &self.nodes;
            self.edges
                .retain(|_, e| nodes.contains_key(&e.source) && nodes.contains_key(&e.target));
            tracing::debug!(removed, "deleted nodes with edge cascade");
            self.notify();
        }
        removed
    }

    /// Delete a single edge; absent ids are a no-op
    pub fn delete_edge(&mut self, id: EdgeId) -> bool {
        let removed = self.edges.remove(&id).is_some();
        if removed {
            self.notify();
        }
        removed
    }

    /// Reposition a node
    ///
    /// # Errors
    /// `UnknownNode` if the node is absent.
    pub fn move_node(&mut self, id: NodeId, position: Position) -> Result<(), GraphError> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::UnknownNode(id))?;
        node.position = position;
        self.notify();
        Ok(())
    }

    /// Edit the text of an editable sticker
    ///
    /// # Errors
    /// `UnknownNode` if the node is absent; `InvalidNode` for canvas
    /// links and module stickers (those mirror external state).
    pub fn edit_sticker_text(
        &mut self,
        id: NodeId,
        text: impl Into<String>,
    ) -> Result<(), GraphError> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::UnknownNode(id))?;
        match &mut node.payload {
            NodePayload::Sticker(sticker) if sticker.is_editable() => {
                sticker.text = Some(text.into());
            }
            NodePayload::Sticker(_) => {
                return Err(GraphError::InvalidNode(format!(
                    "module sticker is not editable: {id}"
                )));
            }
            NodePayload::CanvasLink { .. } => {
                return Err(GraphError::InvalidNode(format!(
                    "canvas link has no editable text: {id}"
                )));
            }
        }
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        if self.sinks.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for sink in &self.sinks {
            sink.snapshot_changed(&snapshot);
        }
    }
}
