//! Idea capture & promotion workflow
//!
//! A draft moves through two states, encoded as types rather than
//! flags: an [`IdeaDraft`] is local only; [`capture`](IdeaWorkflow::capture)
//! persists it to the idea store synchronously, never through the
//! debounce, and adds the idea sticker to the graph, whose own save
//! then rides the normal debounced path. Promotion is a one-way
//! notification to
//! the roadmap collaborator: it never mutates the node or the idea, a
//! failure leaves the workflow in the captured state and retry is a
//! manual re-click.

use crate::error::BoardError;
use board_collab::{IdeaStore, RoadmapService};
use board_core::{GraphModel, Idea, Node, NodeId, Position, Sticker};
use parking_lot::Mutex;
use std::sync::Arc;

/// A composed but not yet persisted idea
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaDraft {
    /// Free-text category (suggested, not constrained)
    pub area: String,
    /// Idea body
    pub text: String,
}

impl IdeaDraft {
    /// New draft
    #[must_use]
    pub fn new(area: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            text: text.into(),
        }
    }
}

/// A persisted idea together with its sticker node
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedIdea {
    /// The persisted idea record
    pub idea: Idea,
    /// The sticker node backing it on the active canvas
    pub node: NodeId,
}

/// Drives idea capture and promotion against the external stores
pub struct IdeaWorkflow {
    ideas: Arc<dyn IdeaStore>,
    roadmap: Arc<dyn RoadmapService>,
}

impl IdeaWorkflow {
    /// New workflow over the two collaborators
    #[must_use]
    pub fn new(ideas: Arc<dyn IdeaStore>, roadmap: Arc<dyn RoadmapService>) -> Self {
        Self { ideas, roadmap }
    }

    /// Persist a draft and place its sticker at `at`
    ///
    /// The idea create is awaited before anything touches the graph; if
    /// it fails the canvas is untouched and the draft stays composable.
    ///
    /// # Errors
    /// `Persistence` when the idea store rejects the create; `Graph`
    /// when the sticker cannot be added.
    pub async fn capture(
        &self,
        graph: &Mutex<GraphModel>,
        draft: IdeaDraft,
        at: Position,
    ) -> Result<CapturedIdea, BoardError> {
        let idea = self.ideas.create_idea(&draft.area, &draft.text).await?;
        tracing::info!(idea = %idea.id, area = %idea.area, "idea captured");

        let sticker = Sticker::idea(idea.text.clone(), idea.id, idea.timestamp);
        let node = graph.lock().add_node(Node::sticker(at, sticker))?;
        Ok(CapturedIdea { idea, node })
    }

    /// Promote an idea to the roadmap
    ///
    /// Fire-and-forget from the graph's perspective: success changes
    /// nothing locally, the sticker keeps its `idea` status.
    ///
    /// # Errors
    /// `Persistence` when the roadmap call fails; the idea stays
    /// captured and the user may retry.
    pub async fn promote(&self, idea: &Idea, notes: Option<&str>) -> Result<(), BoardError> {
        self.roadmap
            .promote_idea(idea.id, &idea.text, &idea.area, notes)
            .await
            .map_err(|error| {
                tracing::error!(idea = %idea.id, %error, "idea promotion failed");
                BoardError::from(error)
            })?;
        tracing::info!(idea = %idea.id, "idea promoted to roadmap");
        Ok(())
    }
}
