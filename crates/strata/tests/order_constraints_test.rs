use strata::graph::{GraphOptions, NodeIx};
use strata::order::{ConstraintGraph, Relationship, add_subgraph_constraints, build_layer_graph};
use strata::{GraphLabel, LayoutGraph, NodeLabel};

fn new_graph() -> LayoutGraph {
    let mut g = LayoutGraph::new(GraphOptions {
        multigraph: true,
        compound: true,
        ..Default::default()
    });
    g.set_graph(GraphLabel::default());
    g
}

fn leaf(g: &mut LayoutGraph, id: &str) -> NodeIx {
    g.set_node(
        id,
        NodeLabel {
            rank: Some(0),
            ..Default::default()
        },
    )
}

fn subgraph(g: &mut LayoutGraph, id: &str) -> NodeIx {
    let sg = g.set_node(id, NodeLabel::default());
    let cluster = g[sg].cluster_entry().unwrap();
    cluster.min_rank = Some(0);
    cluster.max_rank = Some(0);
    sg
}

fn constraints(g: &LayoutGraph, vs: &[NodeIx]) -> ConstraintGraph {
    let lg = build_layer_graph(g, 0, Relationship::InEdges);
    let mut cg = ConstraintGraph::default();
    add_subgraph_constraints(&lg, &mut cg, vs);
    cg
}

#[test]
fn flat_nodes_add_nothing() {
    let mut g = new_graph();
    let vs: Vec<NodeIx> = ["a", "b", "c"].iter().map(|id| leaf(&mut g, id)).collect();
    assert!(constraints(&g, &vs).is_empty());
}

#[test]
fn contiguous_subgraph_members_add_nothing() {
    let mut g = new_graph();
    let sg = subgraph(&mut g, "sg");
    let vs: Vec<NodeIx> = ["a", "b", "c"].iter().map(|id| leaf(&mut g, id)).collect();
    for &v in &vs {
        g.set_parent(v, sg);
    }
    assert!(constraints(&g, &vs).is_empty());
}

#[test]
fn adjacent_siblings_are_constrained() {
    let mut g = new_graph();
    let sg1 = subgraph(&mut g, "sg1");
    let sg2 = subgraph(&mut g, "sg2");
    let a = leaf(&mut g, "a");
    let b = leaf(&mut g, "b");
    g.set_parent(a, sg1).set_parent(b, sg2);

    let cg = constraints(&g, &[a, b]);
    assert_eq!(cg.edges(), &[(sg1, sg2)]);
    assert!(cg.has_edge(sg1, sg2));
    assert!(!cg.has_edge(sg2, sg1));
}

#[test]
fn constrains_the_lowest_differing_ancestors() {
    let mut g = new_graph();
    let sg1 = subgraph(&mut g, "sg1");
    let sg2 = subgraph(&mut g, "sg2");
    let sg3 = subgraph(&mut g, "sg3");
    let sg4 = subgraph(&mut g, "sg4");
    let a = leaf(&mut g, "a");
    let b = leaf(&mut g, "b");
    let c = leaf(&mut g, "c");
    g.set_parent(sg2, sg1)
        .set_parent(sg3, sg1)
        .set_parent(a, sg2)
        .set_parent(b, sg3)
        .set_parent(c, sg4);

    let cg = constraints(&g, &[a, b, c]);
    assert_eq!(cg.edges(), &[(sg2, sg3), (sg1, sg4)]);
}
