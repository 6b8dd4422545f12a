//! End-to-end facade scenarios over the in-memory collaborators.

use board_core::{
    DragPayload, EdgeColor, GraphError, LinkType, ModuleId, NodePayload, Position,
};
use board_runtime::{Board, BoardConfig, BoardError, Collaborators};
use board_test_utils::{
    sample_registry, seeded_root, FakeCanvasStore, FakeIdeaStore, RecordingRoadmap, StaticRegistry,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time;

async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

fn collaborators(store: &Arc<FakeCanvasStore>) -> Collaborators {
    Collaborators {
        registry: Arc::new(StaticRegistry::new(sample_registry())),
        canvases: store.clone(),
        ideas: Arc::new(FakeIdeaStore::new()),
        roadmap: Arc::new(RecordingRoadmap::new()),
    }
}

#[tokio::test(start_paused = true)]
async fn drop_module_places_a_snapshotted_sticker_once() {
    let store = Arc::new(FakeCanvasStore::new());
    let c1 = seeded_root(&store, "C1");
    let board = Board::open(BoardConfig::new(), collaborators(&store)).await.unwrap();
    board.switch_to(c1.id).await.unwrap();

    let payload = DragPayload::Module {
        module_id: ModuleId::from("M1"),
    };
    let node = board
        .drop_payload(payload.clone(), Position::new(120.0, 80.0))
        .unwrap();

    let snapshot = board.snapshot();
    let placed = snapshot.nodes.iter().find(|n| n.id == node).unwrap();
    assert_eq!(placed.module_id(), Some(&ModuleId::from("M1")));
    assert_eq!(placed.position, Position::new(120.0, 80.0));
    assert_eq!(
        placed.as_sticker().unwrap().status_label(),
        Some("pending")
    );

    // Dropping M1 again on the same canvas is rejected
    let err = board
        .drop_payload(payload, Position::new(10.0, 10.0))
        .unwrap_err();
    assert!(matches!(
        err,
        BoardError::Graph(GraphError::DuplicateModule(_))
    ));

    board.close().await;
}

#[tokio::test(start_paused = true)]
async fn connect_with_armed_color_then_delete_cascades() {
    let store = Arc::new(FakeCanvasStore::new());
    let c1 = seeded_root(&store, "C1");
    let board = Board::open(BoardConfig::new(), collaborators(&store)).await.unwrap();
    board.switch_to(c1.id).await.unwrap();

    let a = board
        .drop_payload(
            DragPayload::Module {
                module_id: ModuleId::from("M1"),
            },
            Position::new(0.0, 0.0),
        )
        .unwrap();
    let b = board
        .drop_payload(
            DragPayload::Module {
                module_id: ModuleId::from("M2"),
            },
            Position::new(100.0, 0.0),
        )
        .unwrap();

    board.arm_connector(EdgeColor::Blocks);
    board.connect(a, b).unwrap();
    let snapshot = board.snapshot();
    assert_eq!(snapshot.edges.len(), 1);
    assert_eq!(snapshot.edges[0].color, EdgeColor::Blocks);

    // Deleting B removes both the node and the edge
    assert_eq!(board.delete_nodes(&[b]), 1);
    let snapshot = board.snapshot();
    assert_eq!(snapshot.nodes.len(), 1);
    assert!(snapshot.edges.is_empty());

    board.close().await;
}

#[tokio::test(start_paused = true)]
async fn switching_canvases_flushes_the_pending_debounce() {
    let store = Arc::new(FakeCanvasStore::new());
    let c1 = seeded_root(&store, "C1");
    let c2 = seeded_root(&store, "C2");
    let board = Board::open(BoardConfig::new(), collaborators(&store)).await.unwrap();
    board.switch_to(c1.id).await.unwrap();

    board
        .drop_payload(
            DragPayload::Module {
                module_id: ModuleId::from("M1"),
            },
            Position::new(0.0, 0.0),
        )
        .unwrap();
    settle().await;

    // No window has elapsed, yet the switch must not drop the edit
    board.switch_to(c2.id).await.unwrap();
    assert_eq!(store.save_count(), 1);
    let save = store.last_save().unwrap();
    assert_eq!(save.canvas, c1.id);
    assert_eq!(save.snapshot.nodes.len(), 1);

    // The in-memory snapshot now belongs to C2
    assert!(board.snapshot().nodes.is_empty());
    assert_eq!(board.active_canvas(), Some(c2.id));

    board.close().await;
}

#[tokio::test(start_paused = true)]
async fn link_child_builds_the_tree_without_auto_link_nodes() {
    let store = Arc::new(FakeCanvasStore::new());
    let root = seeded_root(&store, "Mapa");
    let board = Board::open(BoardConfig::new(), collaborators(&store)).await.unwrap();
    board.switch_to(root.id).await.unwrap();

    let child = board.link_child(root.id, "Detalle").await.unwrap();
    assert_eq!(child.parent_id, Some(root.id));
    assert_eq!(board.resolve_parent(child.id).unwrap().id, root.id);
    assert_eq!(board.resolve_children(root.id).len(), 1);

    // Linking does not insert a canvas-link node; that is the operator's move
    assert!(board.snapshot().nodes.is_empty());

    let node = board
        .add_canvas_link(child.id, LinkType::Child, Position::new(200.0, 200.0))
        .unwrap();
    let snapshot = board.snapshot();
    let link = snapshot.nodes.iter().find(|n| n.id == node).unwrap();
    match &link.payload {
        NodePayload::CanvasLink {
            canvas_id,
            canvas_name,
            link_type,
        } => {
            assert_eq!(*canvas_id, child.id);
            assert_eq!(canvas_name, "Detalle");
            assert_eq!(*link_type, LinkType::Child);
        }
        NodePayload::Sticker(_) => panic!("expected a canvas link"),
    }

    board.close().await;
}

#[tokio::test(start_paused = true)]
async fn rename_rides_the_next_save() {
    let store = Arc::new(FakeCanvasStore::new());
    let c1 = seeded_root(&store, "C1");
    let board = Board::open(BoardConfig::new(), collaborators(&store)).await.unwrap();
    board.switch_to(c1.id).await.unwrap();

    board.rename_active("Mapa general").unwrap();
    board
        .drop_payload(
            DragPayload::Module {
                module_id: ModuleId::from("M1"),
            },
            Position::new(0.0, 0.0),
        )
        .unwrap();
    settle().await;
    time::advance(Duration::from_millis(1201)).await;
    settle().await;

    let save = store.last_save().unwrap();
    assert_eq!(save.name.as_deref(), Some("Mapa general"));

    board.close().await;
}

#[tokio::test(start_paused = true)]
async fn save_now_persists_immediately_without_duplicates() {
    let store = Arc::new(FakeCanvasStore::new());
    let c1 = seeded_root(&store, "C1");
    let board = Board::open(BoardConfig::new(), collaborators(&store)).await.unwrap();
    board.switch_to(c1.id).await.unwrap();

    board
        .drop_payload(
            DragPayload::Module {
                module_id: ModuleId::from("M2"),
            },
            Position::new(0.0, 0.0),
        )
        .unwrap();
    board.save_now().await.unwrap();
    assert_eq!(store.save_count(), 1);
    assert_eq!(
        store.last_save().unwrap().snapshot.nodes[0]
            .as_sticker()
            .unwrap()
            .status_label(),
        Some("completed-db")
    );

    time::advance(Duration::from_millis(5000)).await;
    settle().await;
    assert_eq!(store.save_count(), 1);

    board.close().await;
}

#[tokio::test(start_paused = true)]
async fn close_flushes_outstanding_edits() {
    let store = Arc::new(FakeCanvasStore::new());
    let c1 = seeded_root(&store, "C1");
    let board = Board::open(BoardConfig::new(), collaborators(&store)).await.unwrap();
    board.switch_to(c1.id).await.unwrap();

    board
        .drop_payload(
            DragPayload::Module {
                module_id: ModuleId::from("M1"),
            },
            Position::new(0.0, 0.0),
        )
        .unwrap();
    board.close().await;
    assert_eq!(store.save_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn switching_to_an_unknown_canvas_is_rejected() {
    let store = Arc::new(FakeCanvasStore::new());
    let _c1 = seeded_root(&store, "C1");
    let board = Board::open(BoardConfig::new(), collaborators(&store)).await.unwrap();

    let ghost = board_core::CanvasId::new();
    let err = board.switch_to(ghost).await.unwrap_err();
    assert!(matches!(err, BoardError::Hierarchy(_)));

    board.close().await;
}
