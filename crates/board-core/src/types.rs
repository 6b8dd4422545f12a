//! Core types for the board
//!
//! Defines the fundamental entities of the canvas graph:
//! - Canvas metadata and snapshots
//! - Nodes (module/idea stickers and canvas links)
//! - Edges and their color categories
//! - Captured ideas
//!
//! Sticker provenance is a tagged sum ([`StickerBacking`]), so the
//! "module xor idea" rule holds by construction rather than by runtime
//! checks over optional fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique canvas identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CanvasId(pub Uuid);

impl CanvasId {
    /// Generate new canvas ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CanvasId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CanvasId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Generate new node ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique edge identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub Uuid);

impl EdgeId {
    /// Generate new edge ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique idea identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdeaId(pub Uuid);

impl IdeaId {
    /// Generate new idea ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for IdeaId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for IdeaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a system module as known to the external registry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleId(pub String);

impl ModuleId {
    /// Wrap a registry module identifier
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D coordinate in canvas space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Create a position
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Tri-state completion status of a system module
///
/// Resolved from the registry at placement time; `idea` is deliberately
/// not representable here (idea stickers carry it via their backing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleStatus {
    /// A real, backend-integrated implementation exists
    #[serde(rename = "completed-db")]
    CompletedDb,
    /// A screen exists but is not wired to the backend
    #[serde(rename = "ui-only")]
    UiOnly,
    /// Not yet built (also the resolution for unknown modules)
    #[serde(rename = "pending")]
    Pending,
}

impl ModuleStatus {
    /// Wire string for this status
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CompletedDb => "completed-db",
            Self::UiOnly => "ui-only",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic relationship category for edges, with its display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeColor {
    /// Unqualified relationship
    General,
    /// Source depends on target
    Depends,
    /// Source blocks target
    Blocks,
    /// Source enables target
    Enables,
    /// Source is part of target
    PartOf,
}

impl EdgeColor {
    /// The full fixed palette
    pub const ALL: [EdgeColor; 5] = [
        Self::General,
        Self::Depends,
        Self::Blocks,
        Self::Enables,
        Self::PartOf,
    ];

    /// Wire string for this category
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Depends => "depends",
            Self::Blocks => "blocks",
            Self::Enables => "enables",
            Self::PartOf => "part_of",
        }
    }

    /// Display color (hex) for connectors of this category
    #[inline]
    #[must_use]
    pub fn display_color(self) -> &'static str {
        match self {
            Self::General => "#9ca3af",
            Self::Depends => "#f59e0b",
            Self::Blocks => "#ef4444",
            Self::Enables => "#22c55e",
            Self::PartOf => "#3b82f6",
        }
    }
}

impl Default for EdgeColor {
    fn default() -> Self {
        Self::General
    }
}

/// Provenance of the module family a sticker was dragged from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTag {
    /// Family identifier
    pub id: String,
    /// Display label
    pub label: String,
    /// Family display color (hex)
    pub color: String,
}

/// What a sticker stands for
///
/// Exactly one of module/idea backing can exist; free stickers carry
/// neither and are only expected to live through a manual edit until an
/// idea backs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StickerBacking {
    /// Backed by a registry module; status snapshotted at placement
    #[serde(rename_all = "camelCase")]
    Module {
        /// Registry module identifier
        module_id: ModuleId,
        /// Completion status captured when the sticker was placed
        status: ModuleStatus,
    },
    /// Backed by a captured idea
    #[serde(rename_all = "camelCase")]
    Idea {
        /// Backing idea identifier
        idea_id: IdeaId,
        /// Capture time
        timestamp: DateTime<Utc>,
    },
    /// Free-text sticker, not yet backed by anything
    Free {},
}

/// A sticker node payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticker {
    /// Display label
    pub label: String,
    /// Optional free-form body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Provenance of the module family, when dragged from the palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<FamilyTag>,
    /// What this sticker stands for
    #[serde(flatten)]
    pub backing: StickerBacking,
}

impl Sticker {
    /// Sticker for a placed registry module
    #[must_use]
    pub fn module(
        label: impl Into<String>,
        module_id: ModuleId,
        status: ModuleStatus,
        family: Option<FamilyTag>,
    ) -> Self {
        Self {
            label: label.into(),
            text: None,
            family,
            backing: StickerBacking::Module { module_id, status },
        }
    }

    /// Sticker for a captured idea
    #[must_use]
    pub fn idea(label: impl Into<String>, idea_id: IdeaId, timestamp: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            text: None,
            family: None,
            backing: StickerBacking::Idea { idea_id, timestamp },
        }
    }

    /// Free-text sticker with no backing yet
    #[must_use]
    pub fn free(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: None,
            family: None,
            backing: StickerBacking::Free {},
        }
    }

    /// With body text
    #[inline]
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Status label shown on the sticker, if it has one
    ///
    /// Module stickers report their snapshotted registry status, idea
    /// stickers always report `"idea"`, free stickers report nothing.
    #[must_use]
    pub fn status_label(&self) -> Option<&'static str> {
        match &self.backing {
            StickerBacking::Module { status, .. } => Some(status.as_str()),
            StickerBacking::Idea { .. } => Some("idea"),
            StickerBacking::Free {} => None,
        }
    }

    /// Whether the operator may edit this sticker's text in place
    ///
    /// Module stickers mirror the registry and are read-only.
    #[inline]
    #[must_use]
    pub fn is_editable(&self) -> bool {
        !matches!(self.backing, StickerBacking::Module { .. })
    }

    /// Backing module id, if module-backed
    #[must_use]
    pub fn module_id(&self) -> Option<&ModuleId> {
        match &self.backing {
            StickerBacking::Module { module_id, .. } => Some(module_id),
            _ => None,
        }
    }

    /// Backing idea id, if idea-backed
    #[must_use]
    pub fn idea_id(&self) -> Option<IdeaId> {
        match &self.backing {
            StickerBacking::Idea { idea_id, .. } => Some(*idea_id),
            _ => None,
        }
    }
}

/// Direction of a canvas link relative to the canvas it sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Link up to the parent canvas
    Parent,
    /// Link down to a child canvas
    Child,
}

/// Node payload variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodePayload {
    /// A module/idea/free sticker
    Sticker(Sticker),
    /// A navigation affordance to another canvas
    #[serde(rename_all = "camelCase")]
    CanvasLink {
        /// Target canvas
        canvas_id: CanvasId,
        /// Denormalized target name, refreshed on rename only via re-save
        canvas_name: String,
        /// Whether the target is this canvas's parent or child
        link_type: LinkType,
    },
}

/// A node on the active canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier
    pub id: NodeId,
    /// Placement in canvas space
    pub position: Position,
    /// Sticker or canvas-link payload
    #[serde(flatten)]
    pub payload: NodePayload,
}

impl Node {
    /// New sticker node at a position
    #[must_use]
    pub fn sticker(position: Position, sticker: Sticker) -> Self {
        Self {
            id: NodeId::new(),
            position,
            payload: NodePayload::Sticker(sticker),
        }
    }

    /// New canvas-link node at a position
    #[must_use]
    pub fn canvas_link(
        position: Position,
        canvas_id: CanvasId,
        canvas_name: impl Into<String>,
        link_type: LinkType,
    ) -> Self {
        Self {
            id: NodeId::new(),
            position,
            payload: NodePayload::CanvasLink {
                canvas_id,
                canvas_name: canvas_name.into(),
                link_type,
            },
        }
    }

    /// Sticker payload, if any
    #[must_use]
    pub fn as_sticker(&self) -> Option<&Sticker> {
        match &self.payload {
            NodePayload::Sticker(s) => Some(s),
            NodePayload::CanvasLink { .. } => None,
        }
    }

    /// Mutable sticker payload, if any
    pub fn as_sticker_mut(&mut self) -> Option<&mut Sticker> {
        match &mut self.payload {
            NodePayload::Sticker(s) => Some(s),
            NodePayload::CanvasLink { .. } => None,
        }
    }

    /// Backing module id, if this is a module sticker
    #[must_use]
    pub fn module_id(&self) -> Option<&ModuleId> {
        self.as_sticker().and_then(Sticker::module_id)
    }

    /// Backing idea id, if this is an idea sticker
    #[must_use]
    pub fn idea_id(&self) -> Option<IdeaId> {
        self.as_sticker().and_then(Sticker::idea_id)
    }
}

/// A typed, colored directed relationship between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Edge identifier
    pub id: EdgeId,
    /// Source node
    pub source: NodeId,
    /// Target node
    pub target: NodeId,
    /// Semantic relationship category
    #[serde(rename = "colorCategory")]
    pub color: EdgeColor,
}

impl Edge {
    /// New edge between two nodes
    #[must_use]
    pub fn new(source: NodeId, target: NodeId, color: EdgeColor) -> Self {
        Self {
            id: EdgeId::new(),
            source,
            target,
            color,
        }
    }
}

/// Canvas listing entry as known to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasMeta {
    /// Canvas identifier
    pub id: CanvasId,
    /// Display name
    pub name: String,
    /// Parent canvas, or none for a root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CanvasId>,
}

impl CanvasMeta {
    /// New root canvas metadata
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            id: CanvasId::new(),
            name: name.into(),
            parent_id: None,
        }
    }

    /// New child canvas metadata
    #[must_use]
    pub fn child_of(parent: CanvasId, name: impl Into<String>) -> Self {
        Self {
            id: CanvasId::new(),
            name: name.into(),
            parent_id: Some(parent),
        }
    }
}

/// Full graph content of one canvas
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    /// All nodes on the canvas
    pub nodes: Vec<Node>,
    /// All edges on the canvas
    pub edges: Vec<Edge>,
}

impl CanvasSnapshot {
    /// Empty snapshot
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Canvas content as returned by the store for one canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Display name
    pub name: String,
    /// All nodes on the canvas
    pub nodes: Vec<Node>,
    /// All edges on the canvas
    pub edges: Vec<Edge>,
}

impl CanvasDocument {
    /// Split into the graph snapshot, dropping the name
    #[must_use]
    pub fn into_snapshot(self) -> CanvasSnapshot {
        CanvasSnapshot {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// A captured idea
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Idea identifier
    pub id: IdeaId,
    /// Free-text category (suggested from [`IDEA_AREAS`], not constrained)
    pub area: String,
    /// Idea body
    pub text: String,
    /// Capture time
    pub timestamp: DateTime<Utc>,
}

impl Idea {
    /// New idea captured now
    #[must_use]
    pub fn new(area: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: IdeaId::new(),
            area: area.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Suggested idea areas offered by the capture form
pub const IDEA_AREAS: [&str; 6] = [
    "Logística",
    "Ventas",
    "Marketing",
    "Operaciones",
    "Producto",
    "Soporte",
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn node_id_generation() {
        let id1 = NodeId::new();
        let id2 = NodeId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn module_sticker_status_label() {
        let sticker = Sticker::module("Orders", ModuleId::from("M1"), ModuleStatus::UiOnly, None);
        assert_eq!(sticker.status_label(), Some("ui-only"));
        assert!(!sticker.is_editable());
        assert_eq!(sticker.module_id(), Some(&ModuleId::from("M1")));
        assert_eq!(sticker.idea_id(), None);
    }

    #[test]
    fn idea_sticker_status_label() {
        let idea = Idea::new("Logística", "Agregar tracking SMS");
        let sticker = Sticker::idea(idea.text.clone(), idea.id, idea.timestamp);
        assert_eq!(sticker.status_label(), Some("idea"));
        assert!(sticker.is_editable());
        assert_eq!(sticker.idea_id(), Some(idea.id));
        assert_eq!(sticker.module_id(), None);
    }

    #[test]
    fn free_sticker_is_editable_and_unlabeled() {
        let sticker = Sticker::free("scratch note").with_text("to be captured later");
        assert_eq!(sticker.status_label(), None);
        assert!(sticker.is_editable());
    }

    #[test]
    fn edge_color_palette_is_fixed() {
        assert_eq!(EdgeColor::ALL.len(), 5);
        assert_eq!(EdgeColor::Blocks.as_str(), "blocks");
        assert_eq!(EdgeColor::PartOf.as_str(), "part_of");
        assert!(EdgeColor::Depends.display_color().starts_with('#'));
        assert_eq!(EdgeColor::default(), EdgeColor::General);
    }

    #[test]
    fn node_serde_tags_sticker_and_canvas_link() {
        let sticker = Node::sticker(
            Position::new(120.0, 80.0),
            Sticker::module("Orders", ModuleId::from("M1"), ModuleStatus::Pending, None),
        );
        let value = serde_json::to_value(&sticker).unwrap();
        assert_eq!(value["type"], "sticker");
        assert_eq!(value["moduleId"], "M1");
        assert_eq!(value["status"], "pending");

        let link = Node::canvas_link(Position::new(0.0, 0.0), CanvasId::new(), "Detail", LinkType::Child);
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["type"], "canvasLink");
        assert_eq!(value["linkType"], "child");
    }

    #[test]
    fn node_serde_round_trips_backing() {
        let idea = Idea::new("Ventas", "Descuentos por volumen");
        let node = Node::sticker(
            Position::new(10.0, 20.0),
            Sticker::idea(idea.text.clone(), idea.id, idea.timestamp),
        );
        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
        assert_eq!(back.idea_id(), Some(idea.id));
    }

    #[test]
    fn edge_serializes_color_category() {
        let edge = Edge::new(NodeId::new(), NodeId::new(), EdgeColor::Blocks);
        let value = serde_json::to_value(&edge).unwrap();
        assert_eq!(value["colorCategory"], "blocks");
    }
}
