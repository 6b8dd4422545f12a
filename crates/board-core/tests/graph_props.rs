use board_core::{
    CanvasForest, CanvasMeta, EdgeColor, GraphModel, ModuleId, ModuleStatus, Node, NodeId,
    Position, Sticker,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn sticker_node(idx: usize) -> Node {
    Node::sticker(
        Position::new(idx as f64, 0.0),
        Sticker::module(
            format!("m{idx}"),
            ModuleId::new(format!("m{idx}")),
            ModuleStatus::Pending,
            None,
        ),
    )
}

proptest! {
    #[test]
    fn prop_no_dangling_edges(
        node_count in 1..15usize,
        edges in proptest::collection::vec((0..15usize, 0..15usize), 0..40),
        deletions in proptest::collection::vec(0..15usize, 0..15),
    ) {
        let mut graph = GraphModel::new();
        let nodes: Vec<NodeId> = (0..node_count)
            .map(|i| graph.add_node(sticker_node(i)).unwrap())
            .collect();

        for (from_idx, to_idx) in edges {
            if from_idx < nodes.len() && to_idx < nodes.len() {
                graph.connect(nodes[from_idx], nodes[to_idx], EdgeColor::General).unwrap();
            }
        }

        for idx in deletions {
            if idx < nodes.len() {
                // Idempotent: repeated deletions of the same id are no-ops
                graph.delete_nodes(&[nodes[idx]]);
            }
        }

        // Invariant: every surviving edge has both endpoints present
        let snapshot = graph.snapshot();
        let present: HashSet<NodeId> = snapshot.nodes.iter().map(|n| n.id).collect();
        for edge in &snapshot.edges {
            prop_assert!(present.contains(&edge.source));
            prop_assert!(present.contains(&edge.target));
        }
    }

    #[test]
    fn prop_parent_chain_terminates(
        parent_links in proptest::collection::vec(proptest::option::of(0..10usize), 1..10)
    ) {
        // Build metas where each canvas may point at an earlier one; the
        // forest either accepts a valid shape or rejects it outright.
        let metas: Vec<CanvasMeta> = parent_links
            .iter()
            .enumerate()
            .map(|(i, _)| CanvasMeta::root(format!("c{i}")))
            .collect();
        let mut linked = metas.clone();
        for (i, parent) in parent_links.iter().enumerate() {
            if let Some(p) = parent {
                if *p < i {
                    linked[i].parent_id = Some(metas[*p].id);
                }
            }
        }

        let forest = CanvasForest::from_metas(linked).unwrap();

        // Following parent pointers reaches a root within |canvases| steps
        for meta in forest.roots() {
            prop_assert!(meta.parent_id.is_none());
        }
        for i in 0..forest.len() {
            let start = metas[i].id;
            let mut current = start;
            let mut steps = 0usize;
            while let Some(parent) = forest.get(current).unwrap().parent_id {
                current = parent;
                steps += 1;
                prop_assert!(steps <= forest.len());
            }
        }
    }
}
