use strata::graph::{GraphOptions, NodeIx};
use strata::rank::network_simplex::{
    calc_cut_value, enter_edge, exchange_edges, init_cut_values, init_low_lim_values, leave_edge,
};
use strata::rank::util::{longest_path, slack};
use strata::rank::{Tree, TreeEdge, feasible_tree, network_simplex};
use strata::{EdgeLabel, GraphLabel, LayoutGraph, NodeLabel, Ranker, rank};

fn new_graph() -> LayoutGraph {
    let mut g = LayoutGraph::new(GraphOptions::default());
    g.set_graph(GraphLabel::default());
    g
}

fn new_tree() -> Tree {
    Tree::new(GraphOptions {
        directed: false,
        ..Default::default()
    })
}

fn rank_by_id(g: &LayoutGraph, id: &str) -> i32 {
    g.node_by_id(id).and_then(|n| n.rank).unwrap()
}

fn set_ranks(g: &mut LayoutGraph, ranks: &[(&str, i32)]) {
    for &(id, rank) in ranks {
        let v = g.ensure_node(id);
        g[v].rank = Some(rank);
    }
}

/// a -> b -> c -> d -> h, a -> e -> g -> h, a -> f -> g
fn gansner_graph() -> LayoutGraph {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c", "d", "h"]);
    g.set_path(&["a", "e", "g", "h"]);
    g.set_path(&["a", "f", "g"]);
    g
}

#[test]
fn longest_path_puts_sinks_at_zero() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c"]);
    g.set_edge_by_id("a", "d", None, EdgeLabel::with_weight(2, 1.0));
    longest_path(&mut g);
    assert_eq!(rank_by_id(&g, "a"), -2);
    assert_eq!(rank_by_id(&g, "b"), -1);
    assert_eq!(rank_by_id(&g, "c"), 0);
    assert_eq!(rank_by_id(&g, "d"), 0);
}

#[test]
fn network_simplex_ranks_a_single_node() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::default());
    network_simplex(&mut g);
    assert_eq!(rank_by_id(&g, "a"), 0);
}

#[test]
fn network_simplex_ranks_a_diamond() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "d"]);
    g.set_path(&["a", "c", "d"]);
    network_simplex(&mut g);
    let ranks: Vec<i32> = ["a", "b", "c", "d"]
        .iter()
        .map(|id| rank_by_id(&g, id))
        .collect();
    assert_eq!(ranks, vec![0, 1, 1, 2]);
}

#[test]
fn network_simplex_respects_minlen() {
    let mut g = new_graph();
    g.set_edge_by_id("a", "b", None, EdgeLabel::default());
    g.set_edge_by_id("b", "d", None, EdgeLabel::default());
    g.set_edge_by_id("a", "c", None, EdgeLabel::default());
    g.set_edge_by_id("c", "d", None, EdgeLabel::with_weight(2, 1.0));
    network_simplex(&mut g);
    assert_eq!(rank_by_id(&g, "a"), 0);
    assert_eq!(rank_by_id(&g, "c"), 1);
    assert_eq!(rank_by_id(&g, "d"), 3);
    assert!(g.edges().all(|e| slack(&g, e) >= 0));
}

#[test]
fn network_simplex_ranks_the_gansner_graph() {
    let mut g = gansner_graph();
    network_simplex(&mut g);
    for (id, expected) in [
        ("a", 0),
        ("b", 1),
        ("c", 2),
        ("d", 3),
        ("h", 4),
        ("e", 1),
        ("f", 1),
        ("g", 2),
    ] {
        assert_eq!(rank_by_id(&g, id), expected, "rank of {id}");
    }
}

#[test]
fn network_simplex_ranks_disconnected_graphs() {
    let mut g = new_graph();
    g.set_path(&["a", "b"]);
    g.set_path(&["c", "d", "e"]);
    network_simplex(&mut g);
    assert!(g.edges().all(|e| slack(&g, e) == 0));
    assert_eq!(g.nodes().filter_map(|v| g[v].rank).min(), Some(0));
}

#[test]
fn every_ranker_produces_a_feasible_ranking() {
    for ranker in [Ranker::NetworkSimplex, Ranker::TightTree, Ranker::LongestPath] {
        let mut g = gansner_graph();
        g.graph_mut().ranker = ranker;
        rank::rank(&mut g);
        assert!(
            g.edges().all(|e| slack(&g, e) >= 0),
            "{ranker:?} left an edge too short"
        );
    }
}

#[test]
fn feasible_tree_for_a_trivial_graph() {
    let mut g = new_graph();
    g.set_path(&["a", "b"]);
    set_ranks(&mut g, &[("a", 0), ("b", 1)]);
    let t = feasible_tree(&mut g);
    let (a, b) = (g.node_ix("a").unwrap(), g.node_ix("b").unwrap());
    assert_eq!(rank_by_id(&g, "b"), rank_by_id(&g, "a") + 1);
    assert_eq!(t.neighbors(a), vec![b]);
}

#[test]
fn feasible_tree_pulls_a_node_up() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c"]);
    g.set_path(&["a", "d"]);
    set_ranks(&mut g, &[("a", 0), ("b", 1), ("c", 2), ("d", 2)]);
    let t = feasible_tree(&mut g);
    let a = rank_by_id(&g, "a");
    assert_eq!(rank_by_id(&g, "b"), a + 1);
    assert_eq!(rank_by_id(&g, "c"), a + 2);
    assert_eq!(rank_by_id(&g, "d"), a + 1);
    assert_eq!(t.edge_count(), 3);
}

#[test]
fn feasible_tree_pulls_a_node_down() {
    let mut g = new_graph();
    g.set_path(&["a", "c"]);
    g.set_path(&["b", "c"]);
    set_ranks(&mut g, &[("a", 2), ("b", 0), ("c", 3)]);
    let t = feasible_tree(&mut g);
    let c = rank_by_id(&g, "c");
    assert_eq!(rank_by_id(&g, "a"), c - 1);
    assert_eq!(rank_by_id(&g, "b"), c - 1);
    assert_eq!(t.edge_count(), 2);
}

#[test]
fn low_lim_numbering_brackets_subtrees() {
    let mut t = new_tree();
    let ids = ["a", "b", "c", "d", "e"];
    let ix: Vec<NodeIx> = ids.iter().map(|id| t.ensure_node(id)).collect();
    let (a, b, c, d, e) = (ix[0], ix[1], ix[2], ix[3], ix[4]);
    for (v, w) in [(a, b), (a, c), (b, d), (b, e)] {
        t.set_edge(v, w, None, TreeEdge::default());
    }

    init_low_lim_values(&mut t, Some(a));

    assert_eq!((t[a].low, t[a].lim), (1, 5));
    assert_eq!(t[a].parent, None);
    assert_eq!(t[b].parent, Some(a));
    assert_eq!(t[d].parent, Some(b));
    let under = |x: NodeIx, y: NodeIx| t[y].low <= t[x].lim && t[x].lim <= t[y].lim;
    assert!(under(d, b) && under(e, b));
    assert!(!under(c, b));
    for leaf in [c, d, e] {
        assert_eq!(t[leaf].low, t[leaf].lim);
    }
}

fn cut_value_fixture(edges: &[(&str, &str, f64)], root: &str) -> (LayoutGraph, Tree) {
    let mut g = new_graph();
    let mut t = new_tree();
    for &(v, w, weight) in edges {
        g.set_edge_by_id(v, w, None, EdgeLabel::with_weight(1, weight));
    }
    for v in g.nodes() {
        t.set_node(g.node_id(v), Default::default());
    }
    for e in g.edges() {
        let (v, w) = g.ends(e);
        t.set_edge(v, w, None, TreeEdge::default());
    }
    let root = g.node_ix(root);
    init_low_lim_values(&mut t, root);
    (g, t)
}

#[test]
fn cut_value_of_a_two_node_tree() {
    for edges in [[("c", "p", 1.0)], [("p", "c", 1.0)]] {
        let (g, t) = cut_value_fixture(&edges, "p");
        let c = g.node_ix("c").unwrap();
        assert_eq!(calc_cut_value(&t, &g, c), 1.0);
    }
}

#[test]
fn cut_value_accounts_for_the_subtree_below() {
    let (g, mut t) = cut_value_fixture(&[("gc", "c", 3.0), ("c", "p", 1.0)], "p");
    let (gc, c) = (g.node_ix("gc").unwrap(), g.node_ix("c").unwrap());
    let e = t.edge_ix(gc, c, None).unwrap();
    t[e].cutvalue = 3.0;
    assert_eq!(calc_cut_value(&t, &g, c), 1.0);
}

fn ix(g: &LayoutGraph, id: &str) -> NodeIx {
    g.node_ix(id).unwrap()
}

/// Ranked nodes and unit edges, plus a tree over the same node indices following `tree_path`.
fn ranked_with_tree(
    nodes: &[(&str, i32)],
    edges: &[(&str, &str)],
    tree_path: &[&str],
) -> (LayoutGraph, Tree) {
    let mut g = new_graph();
    let mut t = new_tree();
    for &(id, rank) in nodes {
        g.set_node(
            id,
            NodeLabel {
                rank: Some(rank),
                ..Default::default()
            },
        );
        t.set_node(id, Default::default());
    }
    for &(v, w) in edges {
        g.set_edge_by_id(v, w, None, EdgeLabel::default());
    }
    for pair in tree_path.windows(2) {
        t.set_edge_by_id(pair[0], pair[1], None, TreeEdge::default());
    }
    (g, t)
}

#[test]
fn leave_edge_is_none_without_negative_cut_values() {
    let mut t = new_tree();
    t.set_edge_by_id("a", "b", None, TreeEdge { cutvalue: 1.0 });
    t.set_edge_by_id("b", "c", None, TreeEdge { cutvalue: 0.0 });
    assert_eq!(leave_edge(&t), None);
}

#[test]
fn leave_edge_picks_a_negative_tree_edge() {
    let mut t = new_tree();
    t.set_edge_by_id("a", "b", None, TreeEdge { cutvalue: 1.0 });
    let negative = t.set_edge_by_id("b", "c", None, TreeEdge { cutvalue: -1.0 });
    assert_eq!(leave_edge(&t), Some(negative));
}

#[test]
fn enter_edge_crosses_from_the_head_side_when_the_root_is_there() {
    let (g, mut t) = ranked_with_tree(
        &[("a", 0), ("b", 2), ("c", 3)],
        &[("a", "b"), ("b", "c"), ("a", "c")],
        &["b", "c", "a"],
    );
    init_low_lim_values(&mut t, Some(ix(&g, "c")));
    let leave = t.edge_ix(ix(&g, "b"), ix(&g, "c"), None).unwrap();
    let expected = g.edge_ix(ix(&g, "a"), ix(&g, "b"), None);
    assert_eq!(enter_edge(&t, &g, leave), expected);
}

#[test]
fn enter_edge_crosses_from_the_tail_side_when_the_root_is_there() {
    let (g, mut t) = ranked_with_tree(
        &[("a", 0), ("b", 2), ("c", 3)],
        &[("a", "b"), ("b", "c"), ("a", "c")],
        &["b", "c", "a"],
    );
    init_low_lim_values(&mut t, Some(ix(&g, "b")));
    let leave = t.edge_ix(ix(&g, "b"), ix(&g, "c"), None).unwrap();
    let expected = g.edge_ix(ix(&g, "a"), ix(&g, "b"), None);
    assert_eq!(enter_edge(&t, &g, leave), expected);
}

#[test]
fn enter_edge_prefers_the_least_slack() {
    let (g, mut t) = ranked_with_tree(
        &[("a", 0), ("b", 1), ("c", 3), ("d", 4)],
        &[("a", "d"), ("a", "c"), ("c", "d"), ("b", "c")],
        &["c", "d", "a", "b"],
    );
    init_low_lim_values(&mut t, Some(ix(&g, "a")));
    let leave = t.edge_ix(ix(&g, "c"), ix(&g, "d"), None).unwrap();
    let expected = g.edge_ix(ix(&g, "b"), ix(&g, "c"), None);
    assert_eq!(enter_edge(&t, &g, leave), expected);
}

fn initial_gansner_tree() -> (LayoutGraph, Tree) {
    let mut g = gansner_graph();
    longest_path(&mut g);
    let mut t = feasible_tree(&mut g);
    init_low_lim_values(&mut t, None);
    init_cut_values(&mut t, &g);
    (g, t)
}

#[test]
fn exchange_edges_renumbers_and_recomputes_cut_values() {
    let (mut g, mut t) = initial_gansner_tree();
    let leave = t.edge_ix(ix(&g, "g"), ix(&g, "h"), None).unwrap();
    let enter = g.edge_ix(ix(&g, "a"), ix(&g, "e"), None).unwrap();

    exchange_edges(&mut t, &mut g, leave, enter);

    for (v, w, expected) in [
        ("a", "b", 2.0),
        ("b", "c", 2.0),
        ("c", "d", 2.0),
        ("d", "h", 2.0),
        ("a", "e", 1.0),
        ("e", "g", 1.0),
        ("g", "f", 0.0),
    ] {
        let e = t.edge_ix(ix(&g, v), ix(&g, w), None).unwrap();
        assert_eq!(t[e].cutvalue, expected, "cut value of {v}-{w}");
    }
    let mut lims: Vec<i32> = t.nodes().map(|v| t[v].lim).collect();
    lims.sort_unstable();
    assert_eq!(lims, (1..=8).collect::<Vec<_>>());

    // Ranks follow the new tree: every tree edge is tight again.
    for te in t.edges() {
        let (v, w) = t.ends(te);
        let e = g.edge_ix(v, w, None).or_else(|| g.edge_ix(w, v, None)).unwrap();
        assert_eq!(slack(&g, e), 0);
    }
}

#[test]
fn pivoting_ends_without_negative_cut_values() {
    let (mut g, mut t) = initial_gansner_tree();
    assert_eq!(leave_edge(&t), t.edge_ix(ix(&g, "g"), ix(&g, "h"), None));
    let first_enter = enter_edge(&t, &g, leave_edge(&t).unwrap());
    assert_eq!(first_enter, g.edge_ix(ix(&g, "a"), ix(&g, "e"), None));

    let mut pivots = 0;
    while let Some(leave) = leave_edge(&t) {
        let enter = enter_edge(&t, &g, leave).unwrap();
        exchange_edges(&mut t, &mut g, leave, enter);
        pivots += 1;
        assert!(pivots <= g.edge_count(), "pivoting did not settle");
    }

    assert!(pivots > 0);
    assert!(t.edges().all(|e| t[e].cutvalue >= 0.0));
    assert_eq!(t.edge_count(), g.node_count() - 1);
    assert!(g.edges().all(|e| slack(&g, e) >= 0));
    let a = rank_by_id(&g, "a");
    for (id, expected) in [
        ("b", 1),
        ("c", 2),
        ("d", 3),
        ("h", 4),
        ("e", 1),
        ("f", 1),
        ("g", 2),
    ] {
        assert_eq!(rank_by_id(&g, id) - a, expected, "rank of {id}");
    }
}
