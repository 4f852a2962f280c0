use strata::graph::{GraphOptions, NodeIx};
use strata::order::cross_count;
use strata::{EdgeLabel, GraphLabel, LayoutGraph};

fn new_graph() -> LayoutGraph {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.set_graph(GraphLabel::default());
    g
}

fn layering(g: &LayoutGraph, layers: &[&[&str]]) -> Vec<Vec<NodeIx>> {
    layers
        .iter()
        .map(|layer| layer.iter().map(|id| g.node_ix(id).unwrap()).collect())
        .collect()
}

#[test]
fn empty_layering_has_no_crossings() {
    let g = new_graph();
    assert_eq!(cross_count(&g, &[]), 0.0);
}

#[test]
fn counts_a_single_crossing() {
    let mut g = new_graph();
    g.set_path(&["a1", "b1"]);
    g.set_path(&["a2", "b2"]);
    assert_eq!(cross_count(&g, &layering(&g, &[&["a1", "a2"], &["b1", "b2"]])), 0.0);
    assert_eq!(cross_count(&g, &layering(&g, &[&["a1", "a2"], &["b2", "b1"]])), 1.0);
}

#[test]
fn multiplies_edge_weights() {
    let mut g = new_graph();
    g.set_edge_by_id("a1", "b1", None, EdgeLabel::with_weight(1, 2.0));
    g.set_edge_by_id("a2", "b2", None, EdgeLabel::with_weight(1, 3.0));
    assert_eq!(cross_count(&g, &layering(&g, &[&["a1", "a2"], &["b2", "b1"]])), 6.0);
}

#[test]
fn sums_crossings_over_all_layers() {
    let mut g = new_graph();
    g.set_path(&["a1", "b1", "c1"]);
    g.set_path(&["a2", "b2", "c2"]);
    let l = layering(&g, &[&["a1", "a2"], &["b2", "b1"], &["c1", "c2"]]);
    assert_eq!(cross_count(&g, &l), 2.0);
}

#[test]
fn counts_crossings_of_a_small_graph() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c"]);
    g.set_path(&["d", "e", "c"]);
    g.set_path(&["a", "f", "i"]);
    g.set_path(&["a", "e"]);
    let l = layering(&g, &[&["a", "d"], &["b", "e", "f"], &["c", "i"]]);
    assert_eq!(cross_count(&g, &l), 1.0);
    let l = layering(&g, &[&["d", "a"], &["e", "b", "f"], &["c", "i"]]);
    assert_eq!(cross_count(&g, &l), 0.0);
}

#[test]
fn ignores_edges_leaving_the_layer_pair() {
    let mut g = new_graph();
    g.set_path(&["a1", "b1"]);
    g.set_path(&["a2", "b2"]);
    g.set_path(&["a1", "far"]);
    g.set_path(&["a2", "gone"]);
    let gone = g.node_ix("gone").unwrap();
    g.remove_node(gone);
    let layers = layering(&g, &[&["a1", "a2"], &["b2", "b1"]]);
    assert_eq!(cross_count(&g, &layers), 1.0);
}
