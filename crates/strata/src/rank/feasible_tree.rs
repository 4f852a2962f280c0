//! Feasible tight spanning tree (Gansner et al., "A Technique for Drawing Directed Graphs").

use super::tree::{Tree, TreeEdge, TreeNode};
use super::util::slack;
use crate::LayoutGraph;
use crate::graph::{EdgeIx, GraphOptions, NodeIx};

struct Growth {
    in_tree: Vec<bool>,
    members: Vec<NodeIx>,
}

impl Growth {
    fn add(&mut self, v: NodeIx) {
        self.in_tree[v.index()] = true;
        self.members.push(v);
    }

    fn contains(&self, v: NodeIx) -> bool {
        self.in_tree[v.index()]
    }
}

/// Builds a spanning tree of tight edges, shifting ranks of `g` until one exists.
///
/// `g` must already carry a feasible ranking (for example from `longest_path`). The returned tree
/// shares node indices with `g`. A disconnected `g` yields a spanning forest.
pub fn feasible_tree(g: &mut LayoutGraph) -> Tree {
    let mut t: Tree = g.filter_map(
        GraphOptions {
            directed: false,
            ..Default::default()
        },
        (),
        |_, _| Some(TreeNode::default()),
        |_, _| None::<TreeEdge>,
    );
    let Some(start) = g.nodes().next() else {
        return t;
    };
    let size = g.node_count();
    let mut growth = Growth {
        in_tree: vec![false; g.node_bound()],
        members: Vec::with_capacity(size),
    };
    growth.add(start);

    while tight_tree(&mut t, g, &mut growth) < size {
        match find_min_slack_edge(g, &growth) {
            Some(e) => {
                let (v, _) = g.ends(e);
                let delta = if growth.contains(v) {
                    slack(g, e)
                } else {
                    -slack(g, e)
                };
                for &m in &growth.members {
                    if let Some(rank) = g[m].rank.as_mut() {
                        *rank += delta;
                    }
                }
            }
            None => {
                let Some(next) = g.nodes().find(|&v| !growth.contains(v)) else {
                    break;
                };
                tracing::debug!(node = g.node_id(next), "graph is disconnected, growing a forest");
                growth.add(next);
            }
        }
    }
    t
}

/// Extends the tree along tight edges and returns its size.
fn tight_tree(t: &mut Tree, g: &LayoutGraph, growth: &mut Growth) -> usize {
    let roots = growth.members.clone();
    let mut stack: Vec<(NodeIx, Vec<EdgeIx>, usize)> = Vec::new();
    for root in roots {
        stack.push((root, g.node_edges(root), 0));
        while let Some((v, edges, i)) = stack.last_mut() {
            let v = *v;
            let Some(&e) = edges.get(*i) else {
                stack.pop();
                continue;
            };
            *i += 1;
            let (tail, head) = g.ends(e);
            let w = if tail == v { head } else { tail };
            if !growth.contains(w) && slack(g, e) == 0 {
                growth.add(w);
                t.set_edge(v, w, None, TreeEdge::default());
                stack.push((w, g.node_edges(w), 0));
            }
        }
    }
    growth.members.len()
}

fn find_min_slack_edge(g: &LayoutGraph, growth: &Growth) -> Option<EdgeIx> {
    let mut best: Option<(i32, EdgeIx)> = None;
    for e in g.edges() {
        let (v, w) = g.ends(e);
        if growth.contains(v) == growth.contains(w) {
            continue;
        }
        let s = slack(g, e);
        if best.is_none_or(|(min, _)| s < min) {
            best = Some((s, e));
        }
    }
    best.map(|(_, e)| e)
}
