//! Canvas hierarchy navigator
//!
//! Tracks which canvas is active and resolves the parent/child
//! affordances over the owned forest. Only the active canvas's content
//! is in memory; switching flushes pending autosave work first, then
//! replaces the graph snapshot wholesale.

use crate::active::ActiveCanvas;
use crate::autosave::AutosaveController;
use crate::error::BoardError;
use board_collab::CanvasStore;
use board_core::{CanvasForest, CanvasId, CanvasMeta, GraphModel};
use parking_lot::Mutex;
use std::sync::Arc;

/// Canvas tree navigation and active-canvas switching
pub struct Navigator {
    store: Arc<dyn CanvasStore>,
    forest: Mutex<CanvasForest>,
    active: Arc<ActiveCanvas>,
}

impl Navigator {
    /// Build the forest from the store's canvas listing
    ///
    /// # Errors
    /// `Persistence` when the listing fails; `Hierarchy` when the
    /// listed parent pointers do not form a forest.
    pub async fn load(
        store: Arc<dyn CanvasStore>,
        active: Arc<ActiveCanvas>,
    ) -> Result<Self, BoardError> {
        let metas = store.list_canvases().await?;
        let forest = CanvasForest::from_metas(metas)?;
        tracing::info!(canvases = forest.len(), "canvas forest loaded");
        Ok(Self {
            store,
            forest: Mutex::new(forest),
            active,
        })
    }

    /// Switch the active canvas
    ///
    /// Flushes any pending autosave for the canvas being left, loads
    /// the target's content and replaces the in-memory snapshot. A load
    /// response that arrives after the active canvas changed again is
    /// discarded.
    ///
    /// # Errors
    /// `Hierarchy(UnknownCanvas)` for an unknown target; `Persistence`
    /// when the load fails; `StaleCanvasResponse` when the response is
    /// discarded.
    pub async fn switch_to(
        &self,
        id: CanvasId,
        graph: &Mutex<GraphModel>,
        autosave: &AutosaveController,
    ) -> Result<(), BoardError> {
        if !self.forest.lock().contains(id) {
            return Err(board_core::HierarchyError::UnknownCanvas(id).into());
        }

        autosave.flush().await?;

        let generation = self.active.generation();
        let document = self.store.get_canvas(id).await?;
        if self.active.generation() != generation {
            tracing::warn!(canvas = %id, "discarding canvas load; active canvas changed mid-flight");
            return Err(BoardError::StaleCanvasResponse { canvas: id });
        }

        self.active.activate(id, document.name.clone());
        graph.lock().load(document.into_snapshot());
        tracing::info!(canvas = %id, "switched active canvas");
        Ok(())
    }

    /// Create a new root canvas
    ///
    /// # Errors
    /// `Persistence` when the store rejects the create.
    pub async fn create_root(&self, name: &str) -> Result<CanvasMeta, BoardError> {
        let meta = self.store.create_canvas(name, None).await?;
        self.forest.lock().insert(meta.clone())?;
        tracing::info!(canvas = %meta.id, "created root canvas");
        Ok(meta)
    }

    /// Create a new canvas linked under `from`
    ///
    /// Deliberately does not insert a canvas-link node into either
    /// canvas; placing the visual affordance is left to the operator.
    ///
    /// # Errors
    /// `Hierarchy(UnknownCanvas)` when `from` is unknown; `Persistence`
    /// when the store rejects the create.
    pub async fn link_child(&self, from: CanvasId, name: &str) -> Result<CanvasMeta, BoardError> {
        if !self.forest.lock().contains(from) {
            return Err(board_core::HierarchyError::UnknownCanvas(from).into());
        }
        let meta = self.store.create_canvas(name, Some(from)).await?;
        self.forest.lock().insert(meta.clone())?;
        tracing::info!(parent = %from, canvas = %meta.id, "created child canvas");
        Ok(meta)
    }

    /// Rename the active canvas in place
    ///
    /// The new name rides along with the next canvas save.
    ///
    /// # Errors
    /// `NoActiveCanvas` before any canvas is loaded.
    pub fn rename_active(&self, name: &str) -> Result<(), BoardError> {
        let id = self.active.id().ok_or(BoardError::NoActiveCanvas)?;
        self.forest.lock().rename(id, name)?;
        self.active.rename(name);
        Ok(())
    }

    /// Parent of a canvas, if any
    #[must_use]
    pub fn resolve_parent(&self, id: CanvasId) -> Option<CanvasMeta> {
        self.forest.lock().resolve_parent(id).cloned()
    }

    /// Children of a canvas
    #[must_use]
    pub fn resolve_children(&self, id: CanvasId) -> Vec<CanvasMeta> {
        let forest = self.forest.lock();
        forest
            .resolve_children(id)
            .iter()
            .filter_map(|child| forest.get(*child).cloned())
            .collect()
    }

    /// All root canvases
    #[must_use]
    pub fn roots(&self) -> Vec<CanvasMeta> {
        self.forest.lock().roots().into_iter().cloned().collect()
    }

    /// Metadata for one canvas
    #[must_use]
    pub fn canvas(&self, id: CanvasId) -> Option<CanvasMeta> {
        self.forest.lock().get(id).cloned()
    }

    /// Active canvas id, if any
    #[must_use]
    pub fn active_canvas(&self) -> Option<CanvasId> {
        self.active.id()
    }
}
