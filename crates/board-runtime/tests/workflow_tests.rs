//! Idea capture & promotion against the recorded fakes.

use board_core::{GraphModel, Position};
use board_runtime::{ActiveCanvas, AutosaveController, IdeaDraft, IdeaWorkflow};
use board_test_utils::{seeded_root, FakeCanvasStore, FakeIdeaStore, RecordingRoadmap};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;

const DEBOUNCE: Duration = Duration::from_millis(1200);

async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

struct Rig {
    store: Arc<FakeCanvasStore>,
    ideas: Arc<FakeIdeaStore>,
    roadmap: Arc<RecordingRoadmap>,
    workflow: IdeaWorkflow,
    graph: Mutex<GraphModel>,
    _autosave: AutosaveController,
}

fn rig() -> Rig {
    let store = Arc::new(FakeCanvasStore::new());
    let meta = seeded_root(&store, "Mapa");
    let active = Arc::new(ActiveCanvas::new());
    active.activate(meta.id, "Mapa");
    let autosave = AutosaveController::spawn(store.clone(), active, DEBOUNCE);
    let mut graph = GraphModel::new();
    graph.subscribe(autosave.sink());

    let ideas = Arc::new(FakeIdeaStore::new());
    let roadmap = Arc::new(RecordingRoadmap::new());
    let workflow = IdeaWorkflow::new(ideas.clone(), roadmap.clone());
    Rig {
        store,
        ideas,
        roadmap,
        workflow,
        graph: Mutex::new(graph),
        _autosave: autosave,
    }
}

#[tokio::test(start_paused = true)]
async fn capture_persists_idea_synchronously_then_debounces_canvas() {
    let rig = rig();
    let captured = rig
        .workflow
        .capture(
            &rig.graph,
            IdeaDraft::new("Logística", "Agregar tracking SMS"),
            Position::new(40.0, 60.0),
        )
        .await
        .unwrap();

    // Idea store was hit before any debounce window elapsed
    assert_eq!(rig.ideas.idea_count(), 1);
    assert_eq!(rig.store.save_count(), 0);
    assert_eq!(captured.idea.area, "Logística");

    let node = rig.graph.lock().node(captured.node).cloned().unwrap();
    assert_eq!(node.idea_id(), Some(captured.idea.id));
    assert_eq!(node.as_sticker().unwrap().status_label(), Some("idea"));
    assert_eq!(node.position, Position::new(40.0, 60.0));

    // The node mutation rides the normal debounced canvas save
    settle().await;
    time::advance(Duration::from_millis(1201)).await;
    settle().await;
    assert_eq!(rig.store.save_count(), 1);
    let save = rig.store.last_save().unwrap();
    assert!(save
        .snapshot
        .nodes
        .iter()
        .any(|n| n.idea_id() == Some(captured.idea.id)));
}

#[tokio::test(start_paused = true)]
async fn failed_capture_leaves_canvas_untouched() {
    let rig = rig();
    rig.ideas.fail_next_create();

    let err = rig
        .workflow
        .capture(
            &rig.graph,
            IdeaDraft::new("Ventas", "Descuentos por volumen"),
            Position::new(0.0, 0.0),
        )
        .await
        .unwrap_err();
    assert!(err.is_persistence());
    assert_eq!(rig.graph.lock().node_count(), 0);

    time::advance(Duration::from_millis(3000)).await;
    settle().await;
    assert_eq!(rig.store.save_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn promotion_notifies_roadmap_without_touching_the_node() {
    let rig = rig();
    let captured = rig
        .workflow
        .capture(
            &rig.graph,
            IdeaDraft::new("Logística", "Agregar tracking SMS"),
            Position::new(40.0, 60.0),
        )
        .await
        .unwrap();

    rig.workflow
        .promote(&captured.idea, Some("priorizar Q3"))
        .await
        .unwrap();

    let promotion = rig.roadmap.last_promotion().unwrap();
    assert_eq!(promotion.idea_id, captured.idea.id);
    assert_eq!(promotion.idea_text, "Agregar tracking SMS");
    assert_eq!(promotion.idea_area, "Logística");
    assert_eq!(promotion.notes.as_deref(), Some("priorizar Q3"));

    // Promotion is one-way: the sticker still reads as an idea
    let node = rig.graph.lock().node(captured.node).cloned().unwrap();
    assert_eq!(node.as_sticker().unwrap().status_label(), Some("idea"));
}

#[tokio::test(start_paused = true)]
async fn failed_promotion_stays_captured_and_retry_is_manual() {
    let rig = rig();
    let captured = rig
        .workflow
        .capture(
            &rig.graph,
            IdeaDraft::new("Soporte", "Chat en vivo"),
            Position::new(0.0, 0.0),
        )
        .await
        .unwrap();

    rig.roadmap.fail_next();
    let err = rig.workflow.promote(&captured.idea, None).await.unwrap_err();
    assert!(err.is_persistence());
    assert_eq!(rig.roadmap.promotion_count(), 0);

    // Manual retry (re-click) succeeds
    rig.workflow.promote(&captured.idea, None).await.unwrap();
    assert_eq!(rig.roadmap.promotion_count(), 1);
}
