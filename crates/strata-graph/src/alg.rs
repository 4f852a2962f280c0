//! Traversal helpers.
//!
//! Every walk here keeps its own stack, so arbitrarily deep graphs do not exhaust the call stack.
//! Directed graphs are walked along successors, undirected graphs along neighbors.

use crate::{Graph, NodeIx};

fn next_nodes<N, E, G>(g: &Graph<N, E, G>, v: NodeIx) -> Vec<NodeIx> {
    if g.is_directed() {
        g.successors(v)
    } else {
        g.neighbors(v)
    }
}

pub fn preorder<N, E, G>(g: &Graph<N, E, G>, roots: &[NodeIx]) -> Vec<NodeIx> {
    let mut visited = vec![false; g.node_bound()];
    let mut out: Vec<NodeIx> = Vec::new();
    let mut stack: Vec<(Vec<NodeIx>, usize)> = Vec::new();
    for &root in roots {
        if visited[root.index()] {
            continue;
        }
        visited[root.index()] = true;
        out.push(root);
        stack.push((next_nodes(g, root), 0));
        while let Some((next, i)) = stack.last_mut() {
            let Some(&w) = next.get(*i) else {
                stack.pop();
                continue;
            };
            *i += 1;
            if visited[w.index()] {
                continue;
            }
            visited[w.index()] = true;
            out.push(w);
            stack.push((next_nodes(g, w), 0));
        }
    }
    out
}

pub fn postorder<N, E, G>(g: &Graph<N, E, G>, roots: &[NodeIx]) -> Vec<NodeIx> {
    let mut visited = vec![false; g.node_bound()];
    let mut out: Vec<NodeIx> = Vec::new();
    let mut stack: Vec<(NodeIx, Vec<NodeIx>, usize)> = Vec::new();
    for &root in roots {
        if visited[root.index()] {
            continue;
        }
        visited[root.index()] = true;
        stack.push((root, next_nodes(g, root), 0));
        while let Some((v, next, i)) = stack.last_mut() {
            let Some(&w) = next.get(*i) else {
                out.push(*v);
                stack.pop();
                continue;
            };
            *i += 1;
            if visited[w.index()] {
                continue;
            }
            visited[w.index()] = true;
            stack.push((w, next_nodes(g, w), 0));
        }
    }
    out
}

/// Weakly connected components, each listed in discovery order.
pub fn components<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<NodeIx>> {
    let mut visited = vec![false; g.node_bound()];
    let mut out: Vec<Vec<NodeIx>> = Vec::new();
    for start in g.nodes() {
        if visited[start.index()] {
            continue;
        }
        let mut cmpt: Vec<NodeIx> = Vec::new();
        let mut stack = vec![start];
        visited[start.index()] = true;
        while let Some(v) = stack.pop() {
            cmpt.push(v);
            for w in g.neighbors(v) {
                if !visited[w.index()] {
                    visited[w.index()] = true;
                    stack.push(w);
                }
            }
        }
        out.push(cmpt);
    }
    out
}

/// Strongly connected components (Tarjan).
pub fn tarjan<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<NodeIx>> {
    const UNVISITED: usize = usize::MAX;

    let n = g.node_bound();
    let mut index = vec![UNVISITED; n];
    let mut low = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<NodeIx> = Vec::new();
    let mut next_index = 0usize;
    let mut out: Vec<Vec<NodeIx>> = Vec::new();

    let mut frames: Vec<(NodeIx, Vec<NodeIx>, usize)> = Vec::new();
    for root in g.nodes() {
        if index[root.index()] != UNVISITED {
            continue;
        }
        index[root.index()] = next_index;
        low[root.index()] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root.index()] = true;
        frames.push((root, g.successors(root), 0));

        while let Some((v, succs, i)) = frames.last_mut() {
            let v = *v;
            if let Some(&w) = succs.get(*i) {
                *i += 1;
                if index[w.index()] == UNVISITED {
                    index[w.index()] = next_index;
                    low[w.index()] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w.index()] = true;
                    frames.push((w, g.successors(w), 0));
                } else if on_stack[w.index()] {
                    low[v.index()] = low[v.index()].min(index[w.index()]);
                }
                continue;
            }

            frames.pop();
            if let Some((parent, _, _)) = frames.last() {
                low[parent.index()] = low[parent.index()].min(low[v.index()]);
            }
            if low[v.index()] == index[v.index()] {
                let mut cmpt: Vec<NodeIx> = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w.index()] = false;
                    cmpt.push(w);
                    if w == v {
                        break;
                    }
                }
                out.push(cmpt);
            }
        }
    }
    out
}

/// Strongly connected components that contain a cycle (including single-node self-loops).
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<NodeIx>> {
    tarjan(g)
        .into_iter()
        .filter(|cmpt| match cmpt.as_slice() {
            [v] => !g.out_edges_to(*v, *v).is_empty(),
            _ => cmpt.len() > 1,
        })
        .collect()
}

pub fn is_acyclic<N, E, G>(g: &Graph<N, E, G>) -> bool {
    find_cycles(g).is_empty()
}
