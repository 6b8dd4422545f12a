//! Module status resolution
//!
//! Maps a module identifier to its tri-state completion status using a
//! snapshot of the external registry. Pure: the same snapshot and module
//! always resolve to the same status, and an unknown module is "not yet
//! built" ([`ModuleStatus::Pending`]), never an error.

use crate::types::{FamilyTag, ModuleId, ModuleStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One module entry in the registry catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Module identifier
    pub id: ModuleId,
    /// Display label
    pub label: String,
}

/// A module family (grouping) in the registry catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFamily {
    /// Family identifier
    pub id: String,
    /// Display label
    pub label: String,
    /// Family display color (hex)
    pub color: String,
    /// Modules in this family
    pub modules: Vec<ModuleEntry>,
}

impl ModuleFamily {
    /// Provenance tag carried onto stickers dragged from this family
    #[must_use]
    pub fn tag(&self) -> FamilyTag {
        FamilyTag {
            id: self.id.clone(),
            label: self.label.clone(),
            color: self.color.clone(),
        }
    }
}

/// Point-in-time view of the external module registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Static family/module catalog
    pub families: Vec<ModuleFamily>,
    /// Known completion statuses keyed by module
    pub statuses: HashMap<ModuleId, ModuleStatus>,
}

impl RegistrySnapshot {
    /// Empty snapshot (every module resolves to pending)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Family containing `module`, if cataloged
    #[must_use]
    pub fn family_of(&self, module: &ModuleId) -> Option<&ModuleFamily> {
        self.families
            .iter()
            .find(|f| f.modules.iter().any(|m| &m.id == module))
    }

    /// Catalog label for `module`, if cataloged
    #[must_use]
    pub fn label_of(&self, module: &ModuleId) -> Option<&str> {
        self.families
            .iter()
            .flat_map(|f| f.modules.iter())
            .find(|m| &m.id == module)
            .map(|m| m.label.as_str())
    }
}

/// Resolve a module's completion status against a registry snapshot
///
/// Unrecognized modules resolve to [`ModuleStatus::Pending`].
#[must_use]
pub fn resolve_status(snapshot: &RegistrySnapshot, module: &ModuleId) -> ModuleStatus {
    snapshot
        .statuses
        .get(module)
        .copied()
        .unwrap_or(ModuleStatus::Pending)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> RegistrySnapshot {
        let mut statuses = HashMap::new();
        statuses.insert(ModuleId::from("orders"), ModuleStatus::CompletedDb);
        statuses.insert(ModuleId::from("catalog"), ModuleStatus::UiOnly);
        RegistrySnapshot {
            families: vec![ModuleFamily {
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
            }],
            statuses,
        }
    }

    #[test]
    fn resolves_known_statuses() {
        let snap = snapshot();
        assert_eq!(
            resolve_status(&snap, &ModuleId::from("orders")),
            ModuleStatus::CompletedDb
        );
        assert_eq!(
            resolve_status(&snap, &ModuleId::from("catalog")),
            ModuleStatus::UiOnly
        );
    }

    #[test]
    fn unknown_module_is_pending_not_an_error() {
        let snap = snapshot();
        assert_eq!(
            resolve_status(&snap, &ModuleId::from("does-not-exist")),
            ModuleStatus::Pending
        );
    }

    #[test]
    fn family_lookup() {
        let snap = snapshot();
        let family = snap.family_of(&ModuleId::from("orders")).unwrap();
        assert_eq!(family.id, "ecommerce");
        assert_eq!(snap.label_of(&ModuleId::from("catalog")), Some("Catalog"));
        assert_eq!(snap.family_of(&ModuleId::from("nope")), None);
    }
}
