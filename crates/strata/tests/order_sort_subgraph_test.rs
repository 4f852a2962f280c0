use strata::graph::{GraphOptions, NodeIx};
use strata::order::{ConstraintGraph, Relationship, build_layer_graph, sort_subgraph};
use strata::{EdgeLabel, GraphLabel, LayoutGraph, NodeLabel};

/// Fixed nodes "0".."4" sit on rank 0 with their name as order; movable nodes go on rank 1.
fn new_graph() -> LayoutGraph {
    let mut g = LayoutGraph::new(GraphOptions {
        multigraph: true,
        compound: true,
        ..Default::default()
    });
    g.set_graph(GraphLabel::default());
    for i in 0..5 {
        g.set_node(
            i.to_string(),
            NodeLabel {
                rank: Some(0),
                order: Some(i),
                ..Default::default()
            },
        );
    }
    g
}

fn movable(g: &mut LayoutGraph, id: &str) -> NodeIx {
    g.set_node(
        id,
        NodeLabel {
            rank: Some(1),
            ..Default::default()
        },
    )
}

fn subgraph(g: &mut LayoutGraph, id: &str) -> NodeIx {
    let sg = g.set_node(id, NodeLabel::default());
    let cluster = g[sg].cluster_entry().unwrap();
    cluster.min_rank = Some(1);
    cluster.max_rank = Some(1);
    sg
}

fn edge(g: &mut LayoutGraph, from: usize, to: &str, weight: f64) {
    g.set_edge_by_id(&from.to_string(), to, None, EdgeLabel::with_weight(1, weight));
}

fn sorted_ids(
    g: &LayoutGraph,
    v: Option<NodeIx>,
    cg: &ConstraintGraph,
    bias_right: bool,
) -> Vec<String> {
    let lg = build_layer_graph(g, 1, Relationship::InEdges);
    sort_subgraph(&lg, g, v, cg, bias_right)
        .vs
        .iter()
        .map(|&v| g.node_id(v).to_string())
        .collect()
}

#[test]
fn sorts_a_flat_layer_by_barycenter() {
    let mut g = new_graph();
    movable(&mut g, "x");
    movable(&mut g, "y");
    edge(&mut g, 3, "x", 1.0);
    edge(&mut g, 1, "y", 2.0);
    edge(&mut g, 4, "y", 1.0);
    assert_eq!(
        sorted_ids(&g, None, &ConstraintGraph::default(), false),
        vec!["y", "x"]
    );
}

#[test]
fn keeps_the_slot_of_a_node_without_neighbours() {
    let mut g = new_graph();
    for id in ["x", "y", "z"] {
        movable(&mut g, id);
    }
    edge(&mut g, 3, "x", 1.0);
    edge(&mut g, 1, "z", 1.0);
    assert_eq!(
        sorted_ids(&g, None, &ConstraintGraph::default(), false),
        vec!["z", "y", "x"]
    );
}

#[test]
fn bias_decides_ties() {
    let mut g = new_graph();
    movable(&mut g, "x");
    movable(&mut g, "y");
    edge(&mut g, 1, "x", 1.0);
    edge(&mut g, 1, "y", 1.0);
    let cg = ConstraintGraph::default();
    assert_eq!(sorted_ids(&g, None, &cg, false), vec!["x", "y"]);
    assert_eq!(sorted_ids(&g, None, &cg, true), vec!["y", "x"]);
}

#[test]
fn reports_the_subgraph_barycenter() {
    let mut g = new_graph();
    let sg = subgraph(&mut g, "sg");
    let x = movable(&mut g, "x");
    let y = movable(&mut g, "y");
    g.set_parent(x, sg).set_parent(y, sg);
    edge(&mut g, 3, "x", 1.0);
    edge(&mut g, 1, "y", 1.0);

    let lg = build_layer_graph(&g, 1, Relationship::InEdges);
    let result = sort_subgraph(&lg, &g, Some(sg), &ConstraintGraph::default(), false);
    assert_eq!(result.vs, vec![y, x]);
    assert_eq!((result.barycenter, result.weight), (Some(2.0), 2.0));
}

#[test]
fn nested_subgraph_without_barycenter_keeps_its_slot() {
    let mut g = new_graph();
    for id in ["x", "y", "z"] {
        movable(&mut g, id);
    }
    let sg = subgraph(&mut g, "sg");
    for id in ["a", "b", "c"] {
        let v = movable(&mut g, id);
        g.set_parent(v, sg);
    }
    edge(&mut g, 0, "x", 1.0);
    edge(&mut g, 1, "z", 1.0);
    edge(&mut g, 2, "y", 1.0);
    assert_eq!(
        sorted_ids(&g, None, &ConstraintGraph::default(), false),
        vec!["x", "z", "y", "a", "b", "c"]
    );
}

#[test]
fn nested_subgraph_sorts_by_its_contents() {
    let mut g = new_graph();
    movable(&mut g, "x");
    movable(&mut g, "y");
    let sg = subgraph(&mut g, "sg");
    for id in ["a", "b", "c"] {
        let v = movable(&mut g, id);
        g.set_parent(v, sg);
    }
    edge(&mut g, 0, "x", 1.0);
    edge(&mut g, 4, "y", 1.0);
    edge(&mut g, 2, "a", 1.0);
    edge(&mut g, 2, "b", 1.0);
    assert_eq!(
        sorted_ids(&g, None, &ConstraintGraph::default(), false),
        vec!["x", "a", "b", "c", "y"]
    );
}

#[test]
fn frames_a_subgraph_with_its_borders() {
    let mut g = new_graph();
    let sg = subgraph(&mut g, "sg");
    let a = movable(&mut g, "a");
    let b = movable(&mut g, "b");
    let bl = movable(&mut g, "bl");
    let br = movable(&mut g, "br");
    g.set_parent(a, sg)
        .set_parent(b, sg)
        .set_parent(bl, sg)
        .set_parent(br, sg);
    let cluster = g[sg].cluster_mut().unwrap();
    cluster.border_left = vec![None, Some(bl)];
    cluster.border_right = vec![None, Some(br)];
    edge(&mut g, 2, "a", 1.0);
    edge(&mut g, 0, "bl", 1.0);
    edge(&mut g, 4, "br", 1.0);

    let lg = build_layer_graph(&g, 1, Relationship::InEdges);
    let result = sort_subgraph(&lg, &g, Some(sg), &ConstraintGraph::default(), false);
    assert_eq!(result.vs, vec![bl, a, b, br]);
    assert_eq!(result.barycenter, Some((2.0 + 0.0 + 4.0) / 3.0));
    assert_eq!(result.weight, 3.0);
}

#[test]
fn constraints_keep_violating_nodes_together() {
    let mut g = new_graph();
    let x = movable(&mut g, "x");
    let y = movable(&mut g, "y");
    edge(&mut g, 3, "x", 1.0);
    edge(&mut g, 1, "y", 1.0);
    let mut cg = ConstraintGraph::default();
    cg.add_edge(x, y);
    assert_eq!(sorted_ids(&g, None, &cg, false), vec!["x", "y"]);
}
