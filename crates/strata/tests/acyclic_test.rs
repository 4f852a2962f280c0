use strata::graph::{GraphOptions, alg};
use strata::{Acyclicer, EdgeLabel, GraphLabel, LayoutGraph, NodeLabel, acyclic};

fn new_graph(acyclicer: Acyclicer) -> LayoutGraph {
    let mut g = LayoutGraph::new(GraphOptions {
        multigraph: true,
        ..Default::default()
    });
    g.set_graph(GraphLabel {
        acyclicer,
        ..Default::default()
    });
    g
}

fn add_path(g: &mut LayoutGraph, ids: &[&str]) {
    for id in ids {
        g.ensure_node(id);
    }
    for pair in ids.windows(2) {
        g.set_edge_by_id(pair[0], pair[1], None, EdgeLabel::default());
    }
}

fn edge_set(g: &LayoutGraph) -> Vec<(String, String, Option<String>, f64)> {
    let mut out: Vec<_> = g
        .edges()
        .map(|e| {
            let (v, w) = g.ends(e);
            (
                g.node_id(v).to_string(),
                g.node_id(w).to_string(),
                g.edge_name(e).map(str::to_string),
                g[e].weight,
            )
        })
        .collect();
    out.sort_by(|a, b| (&a.0, &a.1, &a.2).cmp(&(&b.0, &b.1, &b.2)));
    out
}

#[test]
fn dfs_breaks_a_four_cycle_with_one_reversed_edge() {
    let mut g = new_graph(Acyclicer::Dfs);
    add_path(&mut g, &["a", "b", "c", "d", "a"]);
    acyclic::run(&mut g);

    assert!(alg::find_cycles(&g).is_empty());
    let reversed = g.edges().filter(|&e| g[e].reversed).count();
    assert_eq!(reversed, 1);
    assert_eq!(g.edge_count(), 4);
}

#[test]
fn acyclic_graphs_are_left_alone() {
    for acyclicer in [Acyclicer::Dfs, Acyclicer::Greedy] {
        let mut g = new_graph(acyclicer);
        add_path(&mut g, &["a", "b", "d"]);
        add_path(&mut g, &["a", "c", "d"]);
        let before = edge_set(&g);
        acyclic::run(&mut g);
        assert_eq!(edge_set(&g), before);
    }
}

#[test]
fn greedy_breaks_cycles_on_the_lightest_edge() {
    let mut g = new_graph(Acyclicer::Greedy);
    for id in ["a", "b", "c", "d"] {
        g.set_node(id, NodeLabel::default());
    }
    g.set_edge_by_id("a", "b", None, EdgeLabel::with_weight(1, 2.0));
    g.set_edge_by_id("b", "c", None, EdgeLabel::with_weight(1, 2.0));
    g.set_edge_by_id("c", "d", None, EdgeLabel::with_weight(1, 1.0));
    g.set_edge_by_id("d", "a", None, EdgeLabel::with_weight(1, 2.0));
    acyclic::run(&mut g);

    assert!(alg::find_cycles(&g).is_empty());
    let reversed: Vec<_> = g
        .edges()
        .filter(|&e| g[e].reversed)
        .map(|e| {
            let (v, w) = g.ends(e);
            (g.node_id(v).to_string(), g.node_id(w).to_string())
        })
        .collect();
    assert_eq!(reversed, vec![("d".to_string(), "c".to_string())]);
}

#[test]
fn undo_restores_the_original_edges() {
    for acyclicer in [Acyclicer::Dfs, Acyclicer::Greedy] {
        let mut g = new_graph(acyclicer);
        add_path(&mut g, &["a", "b", "c", "a"]);
        g.set_edge_by_id("c", "a", Some("named"), EdgeLabel::with_weight(1, 3.0));
        let before = edge_set(&g);

        acyclic::run(&mut g);
        assert!(alg::is_acyclic(&g));
        acyclic::undo(&mut g);

        assert_eq!(edge_set(&g), before);
        assert!(g.edges().all(|e| !g[e].reversed));
    }
}

#[test]
fn self_loops_are_reported_as_feedback_by_dfs() {
    let mut g = new_graph(Acyclicer::Dfs);
    let a = g.set_node("a", NodeLabel::default());
    let e = g.set_edge(a, a, None, EdgeLabel::default());
    assert_eq!(acyclic::dfs_fas(&g), vec![e]);
}
