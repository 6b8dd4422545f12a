//! Board facade
//!
//! One entry object wiring the graph model, autosave controller,
//! navigator, connector palette and idea workflow together over a set
//! of collaborators. All graph mutations are synchronous and
//! linearizable; the only asynchronous operations are the network
//! calls (idea create/promote awaited, canvas saves debounced).

use crate::active::ActiveCanvas;
use crate::autosave::AutosaveController;
use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::navigator::Navigator;
use crate::workflow::{CapturedIdea, IdeaDraft, IdeaWorkflow};
use board_collab::{
    CanvasStore, CollabConfig, CollabError, HttpCollab, IdeaStore, ModuleRegistry, RoadmapService,
};
use board_core::{
    place, CanvasId, CanvasMeta, CanvasSnapshot, ConnectorPalette, DragPayload, EdgeColor, EdgeId,
    GraphModel, Idea, LinkType, Node, NodeId, Position, RegistrySnapshot,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// The four external collaborators the board consumes
#[derive(Clone)]
pub struct Collaborators {
    /// Module registry (status + catalog)
    pub registry: Arc<dyn ModuleRegistry>,
    /// Canvas store
    pub canvases: Arc<dyn CanvasStore>,
    /// Idea store
    pub ideas: Arc<dyn IdeaStore>,
    /// Roadmap service
    pub roadmap: Arc<dyn RoadmapService>,
}

impl Collaborators {
    /// All four collaborators over one HTTP backend
    ///
    /// # Errors
    /// Transport error if the client cannot be constructed.
    pub fn http(config: CollabConfig) -> Result<Self, CollabError> {
        let collab = Arc::new(HttpCollab::new(config)?);
        Ok(Self {
            registry: collab.clone(),
            canvases: collab.clone(),
            ideas: collab.clone(),
            roadmap: collab,
        })
    }
}

/// The visual board: active canvas graph plus its interaction state
pub struct Board {
    graph: Mutex<GraphModel>,
    palette: Mutex<ConnectorPalette>,
    registry_snapshot: Mutex<RegistrySnapshot>,
    registry: Arc<dyn ModuleRegistry>,
    navigator: Navigator,
    autosave: AutosaveController,
    workflow: IdeaWorkflow,
    active: Arc<ActiveCanvas>,
}

impl Board {
    /// Open the board: fetch the registry snapshot, load the canvas
    /// forest and start the autosave controller
    ///
    /// # Errors
    /// `Persistence` when a collaborator is unreachable; `Hierarchy`
    /// when the stored canvas listing is malformed.
    pub async fn open(config: BoardConfig, collaborators: Collaborators) -> Result<Self, BoardError> {
        let registry_snapshot = collaborators.registry.snapshot().await?;
        let active = Arc::new(ActiveCanvas::new());
        let autosave = AutosaveController::spawn(
            collaborators.canvases.clone(),
            active.clone(),
            config.debounce,
        );
        let navigator = Navigator::load(collaborators.canvases.clone(), active.clone()).await?;
        let workflow = IdeaWorkflow::new(collaborators.ideas, collaborators.roadmap);

        let mut graph = GraphModel::new();
        graph.subscribe(autosave.sink());

        Ok(Self {
            graph: Mutex::new(graph),
            palette: Mutex::new(ConnectorPalette::new()),
            registry_snapshot: Mutex::new(registry_snapshot),
            registry: collaborators.registry,
            navigator,
            autosave,
            workflow,
            active,
        })
    }

    // ------------------------------------------------------------------
    // Synchronous graph interactions
    // ------------------------------------------------------------------

    /// Place a dragged payload at a drop coordinate
    ///
    /// # Errors
    /// `Graph(DuplicateModule)` when the module is already on the
    /// active canvas.
    pub fn drop_payload(&self, payload: DragPayload, at: Position) -> Result<NodeId, BoardError> {
        let registry = self.registry_snapshot.lock();
        let mut graph = self.graph.lock();
        Ok(place(&mut graph, &registry, payload, at)?)
    }

    /// Arm a connector color for subsequent connect-gestures
    pub fn arm_connector(&self, color: EdgeColor) {
        self.palette.lock().arm(color);
    }

    /// Currently armed connector color
    #[must_use]
    pub fn armed_connector(&self) -> EdgeColor {
        self.palette.lock().armed()
    }

    /// Connect two nodes with the armed color
    ///
    /// # Errors
    /// `Graph(UnknownNode)` when either endpoint is absent.
    pub fn connect(&self, source: NodeId, target: NodeId) -> Result<EdgeId, BoardError> {
        let palette = self.palette.lock();
        let mut graph = self.graph.lock();
        Ok(palette.connect(&mut graph, source, target)?)
    }

    /// Delete nodes (multi-select), cascading their edges
    pub fn delete_nodes(&self, ids: &[NodeId]) -> usize {
        self.graph.lock().delete_nodes(ids)
    }

    /// Reposition a node
    ///
    /// # Errors
    /// `Graph(UnknownNode)` when the node is absent.
    pub fn move_node(&self, id: NodeId, position: Position) -> Result<(), BoardError> {
        Ok(self.graph.lock().move_node(id, position)?)
    }

    /// Edit an editable sticker's text
    ///
    /// # Errors
    /// `Graph` when the node is absent or not editable.
    pub fn edit_sticker_text(&self, id: NodeId, text: &str) -> Result<(), BoardError> {
        Ok(self.graph.lock().edit_sticker_text(id, text)?)
    }

    /// Place a canvas-link affordance to another canvas
    ///
    /// # Errors
    /// `Hierarchy(UnknownCanvas)` when the target is unknown.
    pub fn add_canvas_link(
        &self,
        target: CanvasId,
        link_type: LinkType,
        at: Position,
    ) -> Result<NodeId, BoardError> {
        let meta = self
            .navigator
            .canvas(target)
            .ok_or(board_core::HierarchyError::UnknownCanvas(target))?;
        let node = Node::canvas_link(at, meta.id, meta.name, link_type);
        Ok(self.graph.lock().add_node(node)?)
    }

    /// Full current snapshot of the active canvas
    #[must_use]
    pub fn snapshot(&self) -> CanvasSnapshot {
        self.graph.lock().snapshot()
    }

    /// Current registry snapshot used for placement
    #[must_use]
    pub fn registry_snapshot(&self) -> RegistrySnapshot {
        self.registry_snapshot.lock().clone()
    }

    /// Re-fetch the registry snapshot for future placements
    ///
    /// Already-placed module stickers keep the status snapshotted when
    /// they were dropped.
    ///
    /// # Errors
    /// `Persistence` when the registry is unreachable.
    pub async fn refresh_registry(&self) -> Result<(), BoardError> {
        let snapshot = self.registry.snapshot().await?;
        *self.registry_snapshot.lock() = snapshot;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Idea workflow
    // ------------------------------------------------------------------

    /// Capture a draft idea and place its sticker
    ///
    /// # Errors
    /// `Persistence` when the idea store rejects the create.
    pub async fn capture_idea(
        &self,
        draft: IdeaDraft,
        at: Position,
    ) -> Result<CapturedIdea, BoardError> {
        self.workflow.capture(&self.graph, draft, at).await
    }

    /// Promote an idea to the roadmap (one-way, no local mutation)
    ///
    /// # Errors
    /// `Persistence` when the roadmap call fails; retry is manual.
    pub async fn promote_idea(&self, idea: &Idea, notes: Option<&str>) -> Result<(), BoardError> {
        self.workflow.promote(idea, notes).await
    }

    // ------------------------------------------------------------------
    // Persistence & navigation
    // ------------------------------------------------------------------

    /// Cancel any pending debounce and persist the snapshot immediately
    ///
    /// # Errors
    /// `NoActiveCanvas` before any canvas is loaded; `Persistence` when
    /// the save fails (local state stays authoritative).
    pub async fn save_now(&self) -> Result<(), BoardError> {
        let snapshot = self.graph.lock().snapshot();
        self.autosave.save_now(snapshot).await
    }

    /// Switch the active canvas (flushes pending autosave first)
    ///
    /// # Errors
    /// See [`Navigator::switch_to`].
    pub async fn switch_to(&self, id: CanvasId) -> Result<(), BoardError> {
        self.navigator.switch_to(id, &self.graph, &self.autosave).await
    }

    /// Create a new root canvas
    ///
    /// # Errors
    /// `Persistence` when the store rejects the create.
    pub async fn create_root_canvas(&self, name: &str) -> Result<CanvasMeta, BoardError> {
        self.navigator.create_root(name).await
    }

    /// Create a new child canvas under `from`
    ///
    /// # Errors
    /// See [`Navigator::link_child`].
    pub async fn link_child(&self, from: CanvasId, name: &str) -> Result<CanvasMeta, BoardError> {
        self.navigator.link_child(from, name).await
    }

    /// Rename the active canvas; the name rides the next save
    ///
    /// # Errors
    /// `NoActiveCanvas` before any canvas is loaded.
    pub fn rename_active(&self, name: &str) -> Result<(), BoardError> {
        self.navigator.rename_active(name)
    }

    /// Active canvas id, if any
    #[must_use]
    pub fn active_canvas(&self) -> Option<CanvasId> {
        self.active.id()
    }

    /// Parent of a canvas, if any
    #[must_use]
    pub fn resolve_parent(&self, id: CanvasId) -> Option<CanvasMeta> {
        self.navigator.resolve_parent(id)
    }

    /// Children of a canvas
    #[must_use]
    pub fn resolve_children(&self, id: CanvasId) -> Vec<CanvasMeta> {
        self.navigator.resolve_children(id)
    }

    /// All root canvases
    #[must_use]
    pub fn roots(&self) -> Vec<CanvasMeta> {
        self.navigator.roots()
    }

    /// Flush pending work and stop the autosave controller
    pub async fn close(self) {
        if let Err(error) = self.autosave.flush().await {
            tracing::error!(%error, "flush on close failed");
        }
        self.active.deactivate();
        self.autosave.shutdown().await;
    }
}
