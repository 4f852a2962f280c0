//! Break cycles by reversing a feedback arc set.
//!
//! Reversed edges remember their original name so [`undo`] can put them back.

use crate::graph::{EdgeIx, NodeIx};
use crate::{Acyclicer, EdgeLabel, LayoutGraph};

pub fn run(g: &mut LayoutGraph) {
    let fas = match g.graph().acyclicer {
        Acyclicer::Greedy => crate::greedy_fas::greedy_fas_with_weight(g, |e: &EdgeLabel| {
            if e.weight.is_finite() {
                e.weight.round() as i64
            } else {
                0
            }
        }),
        Acyclicer::Dfs => dfs_fas(g),
    };
    tracing::trace!(reversed = fas.len(), "feedback arc set");

    for e in fas {
        let (v, w) = g.ends(e);
        let name = g.edge_name(e).map(str::to_string);
        let Some(mut label) = g.remove_edge(e) else {
            continue;
        };
        label.forward_name = name;
        label.reversed = true;
        let rev = unique_rev_name(g, w, v);
        g.set_edge(w, v, Some(&rev), label);
    }
}

/// Restores every edge [`run`] reversed.
pub fn undo(g: &mut LayoutGraph) {
    let reversed: Vec<EdgeIx> = g.edges().filter(|&e| g[e].reversed).collect();
    for e in reversed {
        let (v, w) = g.ends(e);
        let Some(mut label) = g.remove_edge(e) else {
            continue;
        };
        let name = label.forward_name.take();
        label.reversed = false;
        g.set_edge(w, v, name.as_deref(), label);
    }
}

fn unique_rev_name(g: &mut LayoutGraph, v: NodeIx, w: NodeIx) -> String {
    loop {
        let name = g.graph_mut().ids.next_id("rev");
        if !g.has_edge(v, w, Some(&name)) {
            return name;
        }
    }
}

/// Back edges of a depth-first walk started from every node in insertion order.
pub fn dfs_fas(g: &LayoutGraph) -> Vec<EdgeIx> {
    let mut fas: Vec<EdgeIx> = Vec::new();
    let mut visited = vec![false; g.node_bound()];
    let mut on_stack = vec![false; g.node_bound()];
    let mut stack: Vec<(NodeIx, usize)> = Vec::new();

    for start in g.nodes() {
        if visited[start.index()] {
            continue;
        }
        visited[start.index()] = true;
        on_stack[start.index()] = true;
        stack.push((start, 0));

        while let Some((v, i)) = stack.last_mut() {
            let v = *v;
            let Some(&e) = g.out_edges(v).get(*i) else {
                on_stack[v.index()] = false;
                stack.pop();
                continue;
            };
            *i += 1;
            let w = g.ends(e).1;
            if on_stack[w.index()] {
                fas.push(e);
            } else if !visited[w.index()] {
                visited[w.index()] = true;
                on_stack[w.index()] = true;
                stack.push((w, 0));
            }
        }
    }
    fas
}
