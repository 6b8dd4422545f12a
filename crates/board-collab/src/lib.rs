//! Board Collaborators
//!
//! Interfaces to the four external systems the board consumes:
//! - Module Registry (completion status + family catalog)
//! - Canvas Store (list/create/get/save)
//! - Idea Store (list/create)
//! - Roadmap Service (one-way idea promotion)
//!
//! All four are reachable only via network calls bearing a fixed
//! bearer credential; [`HttpCollab`] implements every trait against
//! one base URL.

#![warn(unreachable_pub)]

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{CanvasStore, IdeaStore, ModuleRegistry, RoadmapService};
pub use config::CollabConfig;
pub use error::CollabError;
pub use http::HttpCollab;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
