//! Board Runtime
//!
//! The interaction layer over the board core:
//! - Autosave controller (single debounce timer, manual save-now,
//!   flush on switch/unmount, stale-save discard)
//! - Idea capture & promotion workflow
//! - Canvas hierarchy navigator
//! - [`Board`] facade wiring it all together over the collaborators
//!
//! # Example
//!
//! ```rust,ignore
//! use board_collab::CollabConfig;
//! use board_runtime::{Board, BoardConfig, Collaborators};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let collaborators = Collaborators::http(CollabConfig::new(
//!     "https://api.example.test",
//!     std::env::var("BOARD_TOKEN")?,
//! ))?;
//! let board = Board::open(BoardConfig::new(), collaborators).await?;
//!
//! let first = board.roots().into_iter().next().expect("a root canvas");
//! board.switch_to(first.id).await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

// Runtime modules
pub mod active;
pub mod autosave;
pub mod board;
pub mod config;
pub mod error;
pub mod navigator;
pub mod workflow;

// Re-exports for convenience
pub use active::ActiveCanvas;
pub use autosave::AutosaveController;
pub use board::{Board, Collaborators};
pub use config::{BoardConfig, DEFAULT_DEBOUNCE};
pub use error::BoardError;
pub use navigator::Navigator;
pub use workflow::{CapturedIdea, IdeaDraft, IdeaWorkflow};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the board runtime
    pub use crate::{
        Board, BoardConfig, BoardError, CapturedIdea, Collaborators, IdeaDraft, IdeaWorkflow,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
