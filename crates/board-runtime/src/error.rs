//! Runtime error type
//!
//! Unifies the local graph/hierarchy violations with network-side
//! failures. Nothing here is fatal to the process: every error means
//! "the user's last action did not take effect, local state is intact,
//! retry is allowed".

use board_collab::CollabError;
use board_core::{CanvasId, GraphError, HierarchyError};

/// Board runtime failure
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Graph invariant violation (rejected UI action)
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Canvas hierarchy violation
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    /// Network failure on save/create/promote; local state preserved
    #[error("persistence failed: {0}")]
    Persistence(#[from] CollabError),

    /// A response arrived after the active canvas changed; it was
    /// discarded instead of being applied to the wrong canvas
    #[error("stale response discarded for canvas {canvas}")]
    StaleCanvasResponse {
        /// Canvas the response belonged to
        canvas: CanvasId,
    },

    /// An operation needing an active canvas ran before any was loaded
    #[error("no active canvas")]
    NoActiveCanvas,

    /// The autosave task is no longer running
    #[error("autosave controller stopped")]
    ControllerStopped,
}

impl BoardError {
    /// Whether the failure is network-side (retry may succeed)
    #[inline]
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}
