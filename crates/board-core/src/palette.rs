//! Connector palette
//!
//! Tracks the "armed" connector color used for the next
//! connect-gesture. Re-arming never touches already-drawn edges.

use crate::error::GraphError;
use crate::graph::GraphModel;
use crate::types::{EdgeColor, EdgeId, NodeId};

/// Armed connector color for the next connect-gesture
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectorPalette {
    armed: EdgeColor,
}

impl ConnectorPalette {
    /// Palette armed with the default (general) color
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a color for subsequent connect-gestures
    pub fn arm(&mut self, color: EdgeColor) {
        self.armed = color;
    }

    /// Currently armed color
    #[inline]
    #[must_use]
    pub fn armed(&self) -> EdgeColor {
        self.armed
    }

    /// Connect two nodes using the armed color
    ///
    /// # Errors
    /// `UnknownNode` if either endpoint is absent.
    pub fn connect(
        &self,
        graph: &mut GraphModel,
        source: NodeId,
        target: NodeId,
    ) -> Result<EdgeId, GraphError> {
        graph.connect(source, target, self.armed)
    }
}
