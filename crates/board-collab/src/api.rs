//! Collaborator interfaces
//!
//! The four external systems the board core talks to, specified at
//! their interface only. Production code uses the HTTP implementations
//! in [`crate::http`]; tests substitute in-memory fakes.

use crate::error::CollabError;
use async_trait::async_trait;
use board_core::{
    CanvasDocument, CanvasId, CanvasMeta, CanvasSnapshot, Idea, IdeaId, ModuleFamily, ModuleId,
    ModuleStatus, RegistrySnapshot,
};
use std::collections::HashMap;

/// External registry classifying module completion
#[async_trait]
pub trait ModuleRegistry: Send + Sync {
    /// Completion status for one module
    async fn resolve_status(&self, module: &ModuleId) -> Result<ModuleStatus, CollabError>;

    /// Static family/module catalog
    async fn list_families(&self) -> Result<Vec<ModuleFamily>, CollabError>;

    /// Point-in-time snapshot combining catalog and statuses
    ///
    /// The default implementation composes the two listed operations;
    /// catalogs are small (tens of modules), so the per-module status
    /// calls are acceptable.
    async fn snapshot(&self) -> Result<RegistrySnapshot, CollabError> {
        let families = self.list_families().await?;
        let mut statuses = HashMap::new();
        for family in &families {
            for module in &family.modules {
                let status = self.resolve_status(&module.id).await?;
                statuses.insert(module.id.clone(), status);
            }
        }
        Ok(RegistrySnapshot { families, statuses })
    }
}

/// Remote store of canvases
#[async_trait]
pub trait CanvasStore: Send + Sync {
    /// All known canvases (metadata only; content is loaded lazily)
    async fn list_canvases(&self) -> Result<Vec<CanvasMeta>, CollabError>;

    /// Create a canvas, optionally linked under a parent
    async fn create_canvas(
        &self,
        name: &str,
        parent: Option<CanvasId>,
    ) -> Result<CanvasMeta, CollabError>;

    /// Full content of one canvas
    async fn get_canvas(&self, id: CanvasId) -> Result<CanvasDocument, CollabError>;

    /// Persist the whole snapshot (not a diff) for one canvas
    async fn save_canvas(
        &self,
        id: CanvasId,
        snapshot: &CanvasSnapshot,
        name: Option<&str>,
    ) -> Result<(), CollabError>;
}

/// Remote store of captured ideas
#[async_trait]
pub trait IdeaStore: Send + Sync {
    /// All captured ideas
    async fn list_ideas(&self) -> Result<Vec<Idea>, CollabError>;

    /// Persist a new idea
    async fn create_idea(&self, area: &str, text: &str) -> Result<Idea, CollabError>;
}

/// Roadmap system accepting promoted ideas
#[async_trait]
pub trait RoadmapService: Send + Sync {
    /// One-way notification that an idea should enter formal planning
    async fn promote_idea(
        &self,
        idea_id: IdeaId,
        idea_text: &str,
        idea_area: &str,
        notes: Option<&str>,
    ) -> Result<(), CollabError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::ModuleEntry;

    struct StaticRegistry;

    #[async_trait]
    impl ModuleRegistry for StaticRegistry {
        async fn resolve_status(&self, module: &ModuleId) -> Result<ModuleStatus, CollabError> {
            Ok(if module.as_str() == "orders" {
                ModuleStatus::CompletedDb
            } else {
                ModuleStatus::Pending
            })
        }

        async fn list_families(&self) -> Result<Vec<ModuleFamily>, CollabError> {
            Ok(vec![ModuleFamily {
                id: "ecommerce".to_string(),
                label: "eCommerce".to_string(),
                color: "#8b5cf6".to_string(),
                modules: vec![
                    ModuleEntry {
                        id: ModuleId::from("orders"),
                        label: "Orders".to_string(),
                    },
                    ModuleEntry {
                        id: ModuleId::from("catalog"),
                        label: "Catalog".to_string(),
                    },
                ],
            }])
        }
    }

    #[tokio::test]
    async fn default_snapshot_composes_catalog_and_statuses() {
        let snap = StaticRegistry.snapshot().await.unwrap();
        assert_eq!(snap.families.len(), 1);
        assert_eq!(
            snap.statuses.get(&ModuleId::from("orders")),
            Some(&ModuleStatus::CompletedDb)
        );
        assert_eq!(
            snap.statuses.get(&ModuleId::from("catalog")),
            Some(&ModuleStatus::Pending)
        );
    }
}
