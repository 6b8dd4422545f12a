//! Active canvas tracking
//!
//! Shared between the navigator (which switches canvases) and the
//! autosave controller (which must know where a snapshot belongs and
//! whether a late response is still current). The generation counter
//! advances on every activation change; work tagged with an older
//! generation is stale and must be discarded.

use board_core::CanvasId;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone)]
struct ActiveMeta {
    id: CanvasId,
    name: String,
}

/// Which canvas is currently loaded, and its activation generation
#[derive(Debug, Default)]
pub struct ActiveCanvas {
    inner: Mutex<Option<ActiveMeta>>,
    generation: AtomicU64,
}

impl ActiveCanvas {
    /// No canvas active yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the active canvas; returns the new generation
    pub fn activate(&self, id: CanvasId, name: impl Into<String>) -> u64 {
        let mut inner = self.inner.lock();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *inner = Some(ActiveMeta {
            id,
            name: name.into(),
        });
        generation
    }

    /// Clear the active canvas (board unmount)
    pub fn deactivate(&self) {
        let mut inner = self.inner.lock();
        self.generation.fetch_add(1, Ordering::SeqCst);
        *inner = None;
    }

    /// Rename the active canvas in place
    pub fn rename(&self, name: impl Into<String>) -> bool {
        let mut inner = self.inner.lock();
        match inner.as_mut() {
            Some(meta) => {
                meta.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Active canvas id, name and generation, if any canvas is loaded
    #[must_use]
    pub fn current(&self) -> Option<(CanvasId, String, u64)> {
        let inner = self.inner.lock();
        inner
            .as_ref()
            .map(|meta| (meta.id, meta.name.clone(), self.generation.load(Ordering::SeqCst)))
    }

    /// Active canvas id, if any
    #[must_use]
    pub fn id(&self) -> Option<CanvasId> {
        self.inner.lock().as_ref().map(|meta| meta.id)
    }

    /// Current activation generation
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
