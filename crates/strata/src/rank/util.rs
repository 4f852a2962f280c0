//! Longest-path ranking and slack.

use crate::LayoutGraph;
use crate::graph::{EdgeIx, NodeIx};

/// Pushes every node as far down as its out-edges allow: sinks get rank 0, everything else
/// `min(rank(w) - minlen)` over its out-edges.
///
/// Ranks are not normalized, so they are usually negative.
pub fn longest_path(g: &mut LayoutGraph) {
    let mut visited = vec![false; g.node_bound()];
    let mut stack: Vec<(NodeIx, usize)> = Vec::new();

    for source in g.sources() {
        if visited[source.index()] {
            continue;
        }
        visited[source.index()] = true;
        stack.push((source, 0));
        while let Some((v, i)) = stack.last_mut() {
            let v = *v;
            if let Some(&e) = g.out_edges(v).get(*i) {
                *i += 1;
                let w = g.ends(e).1;
                if !visited[w.index()] {
                    visited[w.index()] = true;
                    stack.push((w, 0));
                }
                continue;
            }
            stack.pop();
            let rank = g
                .out_edges(v)
                .iter()
                .map(|&e| rank_of(g, g.ends(e).1) - g[e].minlen)
                .min()
                .unwrap_or(0);
            g[v].rank = Some(rank);
        }
    }
}

pub(crate) fn rank_of(g: &LayoutGraph, v: NodeIx) -> i32 {
    g[v].rank.unwrap_or(0)
}

/// Length of `e` beyond its minimum; zero means the edge is tight.
pub fn slack(g: &LayoutGraph, e: EdgeIx) -> i32 {
    let (v, w) = g.ends(e);
    rank_of(g, w) - rank_of(g, v) - g[e].minlen
}
