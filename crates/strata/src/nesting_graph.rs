//! Nesting graph for compound layouts.
//!
//! Every subgraph gets a top and bottom border node, and nesting edges pull each subgraph's
//! contents between them. A synthetic root ties everything together so the ranker always sees a
//! connected graph. Edge minlens are scaled so that real nodes never share a rank with a border
//! node; the scale factor is kept as `node_rank_factor` for `remove_empty_ranks`.
//!
//! The construction follows Sander, "Layout of Compound Directed Graphs".

use crate::graph::NodeIx;
use crate::util::{add_border_node, add_dummy_node};
use crate::{BorderType, EdgeLabel, LayoutGraph, NodeKind, NodeLabel};

struct Nesting {
    root: NodeIx,
    node_sep: i32,
    weight: f64,
    height: i32,
    depths: Vec<i32>,
}

struct Frame {
    v: NodeIx,
    top: NodeIx,
    bottom: NodeIx,
    children: Vec<NodeIx>,
    next: usize,
}

impl Nesting {
    /// Adds border nodes for a subgraph, or links a leaf straight to the root.
    fn enter(&self, g: &mut LayoutGraph, v: NodeIx) -> Option<Frame> {
        let children = g.children(v).to_vec();
        if children.is_empty() {
            if v != self.root {
                g.set_edge(
                    self.root,
                    v,
                    None,
                    EdgeLabel::with_weight(self.node_sep, 0.0),
                );
            }
            return None;
        }

        let top = add_border_node(g, "_bt", BorderType::Top, None);
        let bottom = add_border_node(g, "_bb", BorderType::Bottom, None);
        g.set_parent(top, v);
        g.set_parent(bottom, v);
        if let Some(cluster) = g[v].cluster_entry() {
            cluster.border_top = Some(top);
            cluster.border_bottom = Some(bottom);
        }
        Some(Frame {
            v,
            top,
            bottom,
            children,
            next: 0,
        })
    }

    fn link(&self, g: &mut LayoutGraph, frame: &Frame, child: NodeIx) {
        let cluster = g[child].cluster();
        let child_top = cluster.and_then(|c| c.border_top).unwrap_or(child);
        let child_bottom = cluster.and_then(|c| c.border_bottom).unwrap_or(child);
        let weight = if child_top != child {
            self.weight
        } else {
            2.0 * self.weight
        };
        let minlen = if child_top != child_bottom {
            1
        } else {
            self.height - self.depths[frame.v.index()] + 1
        };
        let label = EdgeLabel {
            nesting_edge: true,
            ..EdgeLabel::with_weight(minlen, weight)
        };
        g.set_edge(frame.top, child_top, None, label.clone());
        g.set_edge(child_bottom, frame.bottom, None, label);
    }

    fn close(&self, g: &mut LayoutGraph, frame: &Frame) {
        if g.parent(frame.v).is_none() {
            let minlen = self.height + self.depths[frame.v.index()];
            g.set_edge(
                self.root,
                frame.top,
                None,
                EdgeLabel::with_weight(minlen, 0.0),
            );
        }
    }
}

/// Depth of every node in the hierarchy; top-level nodes have depth 1.
fn tree_depths(g: &LayoutGraph) -> Vec<i32> {
    let mut depths = vec![0; g.node_bound()];
    let mut stack: Vec<(NodeIx, i32)> = g.root_children().into_iter().map(|v| (v, 1)).collect();
    while let Some((v, depth)) = stack.pop() {
        depths[v.index()] = depth;
        stack.extend(g.children(v).iter().map(|&c| (c, depth + 1)));
    }
    depths
}

pub fn run(g: &mut LayoutGraph) {
    let root = add_dummy_node(g, "_root", NodeLabel::dummy(NodeKind::Root));
    let depths = tree_depths(g);
    let height = depths.iter().copied().max().unwrap_or(1) - 1;
    let node_sep = 2 * height + 1;

    g.graph_mut().nesting_root = Some(root);
    for e in g.edge_labels_mut() {
        e.minlen *= node_sep;
    }

    let weight = g.edges().map(|e| g[e].weight).sum::<f64>() + 1.0;
    let nesting = Nesting {
        root,
        node_sep,
        weight,
        height,
        depths,
    };

    for top_level in g.root_children() {
        let Some(frame) = nesting.enter(g, top_level) else {
            continue;
        };
        let mut stack = vec![frame];
        while let Some(frame) = stack.last_mut() {
            let Some(&child) = frame.children.get(frame.next) else {
                let Some(done) = stack.pop() else {
                    break;
                };
                nesting.close(g, &done);
                if let Some(parent) = stack.last() {
                    nesting.link(g, parent, done.v);
                }
                continue;
            };
            frame.next += 1;
            match nesting.enter(g, child) {
                Some(sub) => stack.push(sub),
                None => nesting.link(g, frame, child),
            }
        }
    }

    g.graph_mut().node_rank_factor = Some(node_sep);
}

/// Removes the nesting root and every nesting edge.
pub fn cleanup(g: &mut LayoutGraph) {
    if let Some(root) = g.graph_mut().nesting_root.take() {
        g.remove_node(root);
    }
    let nesting: Vec<_> = g.edges().filter(|&e| g[e].nesting_edge).collect();
    for e in nesting {
        g.remove_edge(e);
    }
}
