//! Board Core
//!
//! The canonical data model of the visual board:
//! - Canvas/node/edge graph with invariant enforcement on every mutation
//! - Tagged sticker payloads (module / idea / free)
//! - Drag-placement of registry modules and ideas
//! - Connector palette and the fixed edge color categories
//! - Canvas hierarchy forest with a derived children index
//!
//! # Example
//!
//! ```rust
//! use board_core::{DragPayload, GraphModel, ModuleId, Position, RegistrySnapshot};
//!
//! let mut graph = GraphModel::new();
//! let registry = RegistrySnapshot::new();
//! let node = board_core::place(
//!     &mut graph,
//!     &registry,
//!     DragPayload::Module { module_id: ModuleId::from("orders") },
//!     Position::new(120.0, 80.0),
//! )?;
//! assert!(graph.node(node).is_some());
//! # Ok::<(), board_core::GraphError>(())
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod palette;
pub mod placement;
pub mod status;
pub mod types;

// Re-exports for convenience
pub use error::{GraphError, HierarchyError};
pub use graph::{GraphModel, MutationSink};
pub use hierarchy::CanvasForest;
pub use palette::ConnectorPalette;
pub use placement::{place, DragPayload};
pub use status::{resolve_status, ModuleEntry, ModuleFamily, RegistrySnapshot};
pub use types::{
    CanvasDocument, CanvasId, CanvasMeta, CanvasSnapshot, Edge, EdgeColor, EdgeId, FamilyTag,
    Idea, IdeaId, LinkType, ModuleId, ModuleStatus, Node, NodeId, NodePayload, Position, Sticker,
    StickerBacking, IDEA_AREAS,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the board core
    pub use crate::{
        CanvasForest, CanvasId, CanvasMeta, CanvasSnapshot, ConnectorPalette, DragPayload, Edge,
        EdgeColor, GraphError, GraphModel, Idea, IdeaId, ModuleId, ModuleStatus, MutationSink,
        Node, NodeId, Position, RegistrySnapshot, Sticker,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
