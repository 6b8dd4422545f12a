//! Canvas hierarchy
//!
//! Owned forest of canvas metadata: a map from canvas id to its meta
//! plus a derived children index recomputed on structural change, so
//! parent/child resolution does not rescan every canvas per lookup.
//! The parent relation is cycle-guarded on insert.

use crate::error::HierarchyError;
use crate::types::{CanvasId, CanvasMeta};
use std::collections::HashMap;

/// Forest of all known canvases
#[derive(Debug, Clone, Default)]
pub struct CanvasForest {
    canvases: HashMap<CanvasId, CanvasMeta>,
    children: HashMap<CanvasId, Vec<CanvasId>>,
}

impl CanvasForest {
    /// Empty forest
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from a store listing
    ///
    /// # Errors
    /// `CycleDetected` if the listed parent pointers do not form a
    /// forest; `UnknownCanvas` if a parent pointer dangles.
    pub fn from_metas(metas: Vec<CanvasMeta>) -> Result<Self, HierarchyError> {
        let mut forest = Self {
            canvases: metas.into_iter().map(|m| (m.id, m)).collect(),
            children: HashMap::new(),
        };
        for meta in forest.canvases.values() {
            if let Some(parent) = meta.parent_id {
                if !forest.canvases.contains_key(&parent) {
                    return Err(HierarchyError::UnknownCanvas(parent));
                }
            }
            forest.check_acyclic_from(meta.id)?;
        }
        forest.rebuild_children();
        Ok(forest)
    }

    /// Insert a new canvas
    ///
    /// # Errors
    /// `UnknownCanvas` if the parent is not in the forest;
    /// `CycleDetected` if the insert would make the parent chain cyclic.
    pub fn insert(&mut self, meta: CanvasMeta) -> Result<(), HierarchyError> {
        if let Some(parent) = meta.parent_id {
            if !self.canvases.contains_key(&parent) {
                return Err(HierarchyError::UnknownCanvas(parent));
            }
        }
        let id = meta.id;
        self.canvases.insert(id, meta);
        if let Err(e) = self.check_acyclic_from(id) {
            self.canvases.remove(&id);
            return Err(e);
        }
        self.rebuild_children();
        Ok(())
    }

    /// Rename a canvas in place
    ///
    /// # Errors
    /// `UnknownCanvas` if absent.
    pub fn rename(&mut self, id: CanvasId, name: impl Into<String>) -> Result<(), HierarchyError> {
        let meta = self
            .canvases
            .get_mut(&id)
            .ok_or(HierarchyError::UnknownCanvas(id))?;
        meta.name = name.into();
        Ok(())
    }

    /// Canvas metadata
    #[must_use]
    pub fn get(&self, id: CanvasId) -> Option<&CanvasMeta> {
        self.canvases.get(&id)
    }

    /// Whether the canvas is known
    #[must_use]
    pub fn contains(&self, id: CanvasId) -> bool {
        self.canvases.contains_key(&id)
    }

    /// Parent canvas metadata, if any
    #[must_use]
    pub fn resolve_parent(&self, id: CanvasId) -> Option<&CanvasMeta> {
        self.canvases
            .get(&id)
            .and_then(|m| m.parent_id)
            .and_then(|p| self.canvases.get(&p))
    }

    /// Child canvas ids (empty slice for leaves and unknown canvases)
    #[must_use]
    pub fn resolve_children(&self, id: CanvasId) -> &[CanvasId] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    /// All root canvases (no parent)
    #[must_use]
    pub fn roots(&self) -> Vec<&CanvasMeta> {
        self.canvases
            .values()
            .filter(|m| m.parent_id.is_none())
            .collect()
    }

    /// Number of known canvases
    #[must_use]
    pub fn len(&self) -> usize {
        self.canvases.len()
    }

    /// Whether the forest is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.canvases.is_empty()
    }

    /// Walk the parent chain; must reach a root within `len()` steps
    fn check_acyclic_from(&self, start: CanvasId) -> Result<(), HierarchyError> {
        let mut current = start;
        for _ in 0..=self.canvases.len() {
            match self.canvases.get(&current).and_then(|m| m.parent_id) {
                Some(parent) => current = parent,
                None => return Ok(()),
            }
        }
        Err(HierarchyError::CycleDetected(start))
    }

    fn rebuild_children(&mut self) {
        let mut children: HashMap<CanvasId, Vec<CanvasId>> = HashMap::new();
        for meta in self.canvases.values() {
            if let Some(parent) = meta.parent_id {
                children.entry(parent).or_default().push(meta.id);
            }
        }
        self.children = children;
    }
}
