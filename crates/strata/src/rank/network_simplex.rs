//! Network simplex ranking.
//!
//! Starting from a feasible tight tree, tree edges with a negative cut value are repeatedly
//! swapped for the non-tree edge of minimum slack that crosses the same cut, until every cut
//! value is non-negative. Each swap shortens the weighted total edge length.

use super::feasible_tree::feasible_tree;
use super::tree::{Tree, TreeEdge};
use super::util::{longest_path, slack};
use crate::LayoutGraph;
use crate::graph::{EdgeIx, NodeIx, alg};
use crate::util::{normalize_ranks, simplify};

/// Ranks `g` (a DAG) with network simplex. The smallest resulting rank is 0.
pub fn network_simplex(g: &mut LayoutGraph) {
    let mut simplified = simplify(g);
    longest_path(&mut simplified);
    let mut t = feasible_tree(&mut simplified);
    init_low_lim_values(&mut t, None);
    init_cut_values(&mut t, &simplified);

    let mut pivots = 0usize;
    while let Some(e) = leave_edge(&t) {
        let Some(f) = enter_edge(&t, &simplified, e) else {
            tracing::debug!(?e, "no entering edge for a negative cut value");
            break;
        };
        exchange_edges(&mut t, &mut simplified, e, f);
        pivots += 1;
    }
    tracing::trace!(pivots, "network simplex converged");

    for v in simplified.nodes() {
        if let Some(n) = g.node_mut(v) {
            n.rank = simplified[v].rank;
        }
    }
    normalize_ranks(g);
}

/// Postorder numbering of the tree: `lim` is a node's own postorder number and `low` the
/// smallest number in its subtree, so `w` is under `v` iff `low(v) <= lim(w) <= lim(v)`.
pub fn init_low_lim_values(t: &mut Tree, root: Option<NodeIx>) {
    let mut visited = vec![false; t.node_bound()];
    let mut next_lim = 1;
    let roots: Vec<NodeIx> = root.into_iter().chain(t.nodes()).collect();
    let mut stack: Vec<(NodeIx, Option<NodeIx>, i32, Vec<NodeIx>, usize)> = Vec::new();

    for root in roots {
        if visited[root.index()] {
            continue;
        }
        visited[root.index()] = true;
        stack.push((root, None, next_lim, t.neighbors(root), 0));
        while let Some((v, parent, low, next, i)) = stack.last_mut() {
            if let Some(&w) = next.get(*i) {
                *i += 1;
                if !visited[w.index()] {
                    visited[w.index()] = true;
                    let parent = Some(*v);
                    stack.push((w, parent, next_lim, t.neighbors(w), 0));
                }
                continue;
            }
            let label = &mut t[*v];
            label.low = *low;
            label.lim = next_lim;
            label.parent = *parent;
            next_lim += 1;
            stack.pop();
        }
    }
}

/// Computes the cut value of every tree edge, children before parents.
pub fn init_cut_values(t: &mut Tree, g: &LayoutGraph) {
    let roots: Vec<NodeIx> = t.nodes().collect();
    for v in alg::postorder(t, &roots) {
        let Some(parent) = t[v].parent else {
            continue;
        };
        let cutvalue = calc_cut_value(t, g, v);
        if let Some(e) = t.edge_ix(v, parent, None) {
            t[e].cutvalue = cutvalue;
        }
    }
}

/// Cut value of the tree edge between `child` and its parent.
///
/// Relies on the cut values of the tree edges below `child` being up to date.
pub fn calc_cut_value(t: &Tree, g: &LayoutGraph, child: NodeIx) -> f64 {
    let Some(parent) = t[child].parent else {
        return 0.0;
    };
    let (graph_edge, child_is_tail) = match g.edge_ix(child, parent, None) {
        Some(e) => (Some(e), true),
        None => (g.edge_ix(parent, child, None), false),
    };
    let mut cut = graph_edge.map_or(0.0, |e| g[e].weight);

    for e in g.node_edges(child) {
        let (tail, head) = g.ends(e);
        let is_out = tail == child;
        let other = if is_out { head } else { tail };
        if other == parent {
            continue;
        }
        let points_to_head = is_out == child_is_tail;
        let weight = g[e].weight;
        cut += if points_to_head { weight } else { -weight };
        if let Some(te) = t.edge_ix(child, other, None) {
            let other_cut = t[te].cutvalue;
            cut += if points_to_head { -other_cut } else { other_cut };
        }
    }
    cut
}

/// First tree edge with a negative cut value.
pub fn leave_edge(t: &Tree) -> Option<EdgeIx> {
    t.edges().find(|&e| t[e].cutvalue < 0.0)
}

/// The minimum-slack graph edge that reconnects the two halves `leave` splits the tree into,
/// crossing the cut in the opposite direction.
pub fn enter_edge(t: &Tree, g: &LayoutGraph, leave: EdgeIx) -> Option<EdgeIx> {
    let (mut v, mut w) = t.ends(leave);
    if !g.has_edge(v, w, None) {
        std::mem::swap(&mut v, &mut w);
    }

    // The side without the root is the subtree under the endpoint with the smaller lim.
    let (tail, flip) = if t[v].lim > t[w].lim {
        (&t[w], true)
    } else {
        (&t[v], false)
    };
    let under_tail = |x: NodeIx| tail.low <= t[x].lim && t[x].lim <= tail.lim;

    let mut best: Option<(i32, EdgeIx)> = None;
    for e in g.edges() {
        let (ev, ew) = g.ends(e);
        if flip != under_tail(ev) || flip == under_tail(ew) {
            continue;
        }
        let s = slack(g, e);
        if best.is_none_or(|(min, _)| s < min) {
            best = Some((s, e));
        }
    }
    best.map(|(_, e)| e)
}

/// Replaces tree edge `leave` with graph edge `enter` and refreshes numbering, cut values and
/// ranks.
pub fn exchange_edges(t: &mut Tree, g: &mut LayoutGraph, leave: EdgeIx, enter: EdgeIx) {
    t.remove_edge(leave);
    let (v, w) = g.ends(enter);
    t.set_edge(v, w, None, TreeEdge::default());
    init_low_lim_values(t, None);
    init_cut_values(t, g);
    update_ranks(t, g);
}

fn update_ranks(t: &Tree, g: &mut LayoutGraph) {
    let roots: Vec<NodeIx> = t.nodes().filter(|&v| t[v].parent.is_none()).collect();
    for v in alg::preorder(t, &roots) {
        let Some(parent) = t[v].parent else {
            continue;
        };
        let parent_rank = g[parent].rank.unwrap_or(0);
        let rank = match g.edge_ix(v, parent, None) {
            Some(e) => parent_rank - g[e].minlen,
            None => match g.edge_ix(parent, v, None) {
                Some(e) => parent_rank + g[e].minlen,
                None => continue,
            },
        };
        g[v].rank = Some(rank);
    }
}
