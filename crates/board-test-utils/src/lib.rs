//! Testing utilities for the board workspace
//!
//! In-memory fakes of the four collaborator traits with call
//! recording, plus shared fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use board_collab::{CanvasStore, CollabError, IdeaStore, ModuleRegistry, RoadmapService};
use board_core::{
    CanvasDocument, CanvasId, CanvasMeta, CanvasSnapshot, Idea, IdeaId, ModuleEntry, ModuleFamily,
    ModuleId, ModuleStatus, RegistrySnapshot,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Registry fake answering from a fixed snapshot
pub struct StaticRegistry {
    snapshot: RegistrySnapshot,
}

impl StaticRegistry {
    pub fn new(snapshot: RegistrySnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl ModuleRegistry for StaticRegistry {
    async fn resolve_status(&self, module: &ModuleId) -> Result<ModuleStatus, CollabError> {
        Ok(board_core::resolve_status(&self.snapshot, module))
    }

    async fn list_families(&self) -> Result<Vec<ModuleFamily>, CollabError> {
        Ok(self.snapshot.families.clone())
    }

    async fn snapshot(&self) -> Result<RegistrySnapshot, CollabError> {
        Ok(self.snapshot.clone())
    }
}

/// One recorded `save_canvas` call
#[derive(Debug, Clone)]
pub struct SaveRecord {
    pub canvas: CanvasId,
    pub snapshot: CanvasSnapshot,
    pub name: Option<String>,
}

/// Canvas store fake with recorded saves and scriptable failure
#[derive(Default)]
pub struct FakeCanvasStore {
    canvases: Mutex<HashMap<CanvasId, (CanvasMeta, CanvasSnapshot)>>,
    saves: Mutex<Vec<SaveRecord>>,
    fail_next_save: AtomicBool,
}

impl FakeCanvasStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a canvas with content
    pub fn seed(&self, meta: CanvasMeta, snapshot: CanvasSnapshot) {
        self.canvases.lock().insert(meta.id, (meta, snapshot));
    }

    /// Make the next save fail with an HTTP 500
    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().len()
    }

    pub fn last_save(&self) -> Option<SaveRecord> {
        self.saves.lock().last().cloned()
    }

}

fn rejected(endpoint: &str) -> CollabError {
    CollabError::Status {
        endpoint: endpoint.to_string(),
        status: board_collab::error::StatusCode::INTERNAL_SERVER_ERROR,
        body: "scripted failure".to_string(),
    }
}

#[async_trait]
impl CanvasStore for FakeCanvasStore {
    async fn list_canvases(&self) -> Result<Vec<CanvasMeta>, CollabError> {
        Ok(self
            .canvases
            .lock()
            .values()
            .map(|(meta, _)| meta.clone())
            .collect())
    }

    async fn create_canvas(
        &self,
        name: &str,
        parent: Option<CanvasId>,
    ) -> Result<CanvasMeta, CollabError> {
        let meta = match parent {
            Some(p) => CanvasMeta::child_of(p, name),
            None => CanvasMeta::root(name),
        };
        self.canvases
            .lock()
            .insert(meta.id, (meta.clone(), CanvasSnapshot::new()));
        Ok(meta)
    }

    async fn get_canvas(&self, id: CanvasId) -> Result<CanvasDocument, CollabError> {
        let canvases = self.canvases.lock();
        let (meta, snapshot) = canvases
            .get(&id)
            .ok_or_else(|| rejected("canvases/{id}"))?;
        Ok(CanvasDocument {
            name: meta.name.clone(),
            nodes: snapshot.nodes.clone(),
            edges: snapshot.edges.clone(),
        })
    }

    async fn save_canvas(
        &self,
        id: CanvasId,
        snapshot: &CanvasSnapshot,
        name: Option<&str>,
    ) -> Result<(), CollabError> {
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(rejected("canvases/{id}"));
        }
        self.saves.lock().push(SaveRecord {
            canvas: id,
            snapshot: snapshot.clone(),
            name: name.map(str::to_string),
        });
        if let Some((meta, stored)) = self.canvases.lock().get_mut(&id) {
            *stored = snapshot.clone();
            if let Some(new_name) = name {
                meta.name = new_name.to_string();
            }
        }
        Ok(())
    }
}

/// Idea store fake, persisted synchronously like the real one
#[derive(Default)]
pub struct FakeIdeaStore {
    ideas: Mutex<Vec<Idea>>,
    fail_next_create: AtomicBool,
}

impl FakeIdeaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_create(&self) {
        self.fail_next_create.store(true, Ordering::SeqCst);
    }

    pub fn idea_count(&self) -> usize {
        self.ideas.lock().len()
    }
}

#[async_trait]
impl IdeaStore for FakeIdeaStore {
    async fn list_ideas(&self) -> Result<Vec<Idea>, CollabError> {
        Ok(self.ideas.lock().clone())
    }

    async fn create_idea(&self, area: &str, text: &str) -> Result<Idea, CollabError> {
        if self.fail_next_create.swap(false, Ordering::SeqCst) {
            return Err(CollabError::Status {
                endpoint: "ideas".to_string(),
                status: board_collab::error::StatusCode::INTERNAL_SERVER_ERROR,
                body: "scripted failure".to_string(),
            });
        }
        let idea = Idea::new(area, text);
        self.ideas.lock().push(idea.clone());
        Ok(idea)
    }
}

/// One recorded promotion call
#[derive(Debug, Clone)]
pub struct PromotionRecord {
    pub idea_id: IdeaId,
    pub idea_text: String,
    pub idea_area: String,
    pub notes: Option<String>,
}

/// Roadmap fake recording promotions, with scriptable failure
#[derive(Default)]
pub struct RecordingRoadmap {
    promotions: Mutex<Vec<PromotionRecord>>,
    fail_next: AtomicBool,
}

impl RecordingRoadmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn promotion_count(&self) -> usize {
        self.promotions.lock().len()
    }

    pub fn last_promotion(&self) -> Option<PromotionRecord> {
        self.promotions.lock().last().cloned()
    }
}

#[async_trait]
impl RoadmapService for RecordingRoadmap {
    async fn promote_idea(
        &self,
        idea_id: IdeaId,
        idea_text: &str,
        idea_area: &str,
        notes: Option<&str>,
    ) -> Result<(), CollabError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(CollabError::Status {
                endpoint: "roadmap/promotions".to_string(),
                status: board_collab::error::StatusCode::INTERNAL_SERVER_ERROR,
                body: "scripted failure".to_string(),
            });
        }
        self.promotions.lock().push(PromotionRecord {
            idea_id,
            idea_text: idea_text.to_string(),
            idea_area: idea_area.to_string(),
            notes: notes.map(str::to_string),
        });
        Ok(())
    }
}

/// Registry snapshot with one eCommerce family, `M1` pending and `M2`
/// completed
pub fn sample_registry() -> RegistrySnapshot {
    let mut statuses = HashMap::new();
    statuses.insert(ModuleId::from("M2"), ModuleStatus::CompletedDb);
    RegistrySnapshot {
        families: vec![ModuleFamily {
            id: "ecommerce".to_string(),
            label: "eCommerce".to_string(),
            color: "#8b5cf6".to_string(),
            modules: vec![
                ModuleEntry {
                    id: ModuleId::from("M1"),
                    label: "Orders".to_string(),
                },
                ModuleEntry {
                    id: ModuleId::from("M2"),
                    label: "Catalog".to_string(),
                },
            ],
        }],
        statuses,
    }
}

/// A seeded root canvas with empty content
pub fn seeded_root(store: &FakeCanvasStore, name: &str) -> CanvasMeta {
    let meta = CanvasMeta::root(name);
    store.seed(meta.clone(), CanvasSnapshot::new());
    meta
}
