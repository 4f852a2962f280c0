//! Long edge normalization.
//!
//! [`run`] replaces every edge spanning more than one rank with a chain of dummy nodes, one per
//! intermediate rank, so that later phases only see edges between adjacent ranks. The dummy on
//! the edge's `label_rank` carries the label box. [`undo`] turns the positioned chain back into
//! the original edge's `points`.

use crate::graph::EdgeIx;
use crate::util::add_dummy_node;
use crate::{DummyChain, EdgeLabel, LayoutGraph, NodeKind, NodeLabel, Point};

pub fn run(g: &mut LayoutGraph) {
    g.graph_mut().dummy_chains.clear();
    let edges: Vec<EdgeIx> = g.edges().collect();
    for e in edges {
        normalize_edge(g, e);
    }
}

fn normalize_edge(g: &mut LayoutGraph, e: EdgeIx) {
    let (v, w) = g.ends(e);
    let v_rank = g[v].rank.unwrap_or(0);
    let w_rank = g[w].rank.unwrap_or(0);
    if w_rank <= v_rank + 1 {
        return;
    }

    let name = g.edge_name(e).map(str::to_string);
    let Some(mut label) = g.remove_edge(e) else {
        return;
    };
    label.points.clear();

    let mut prev = v;
    let mut head = None;
    for rank in v_rank + 1..w_rank {
        let mut dummy = NodeLabel {
            rank: Some(rank),
            ..NodeLabel::dummy(NodeKind::Edge)
        };
        if label.label_rank == Some(rank) {
            dummy.width = label.width;
            dummy.height = label.height;
            dummy.kind = NodeKind::EdgeLabel {
                labelpos: label.labelpos,
            };
        }
        let d = add_dummy_node(g, "_d", dummy);
        g.set_edge(prev, d, name.as_deref(), chain_edge(&label));
        if head.is_none() {
            head = Some(d);
        }
        prev = d;
    }
    g.set_edge(prev, w, name.as_deref(), chain_edge(&label));

    if let Some(head) = head {
        g.graph_mut().dummy_chains.push(DummyChain {
            head,
            v,
            w,
            name,
            label,
        });
    }
}

fn chain_edge(original: &EdgeLabel) -> EdgeLabel {
    EdgeLabel {
        weight: original.weight,
        ..Default::default()
    }
}

/// Removes every dummy chain and restores its edge, with one point per removed dummy.
pub fn undo(g: &mut LayoutGraph) {
    let chains = std::mem::take(&mut g.graph_mut().dummy_chains);
    for chain in chains {
        let DummyChain {
            head,
            v,
            w,
            name,
            mut label,
        } = chain;

        let mut cur = head;
        while cur != w && matches!(g[cur].kind, NodeKind::Edge | NodeKind::EdgeLabel { .. }) {
            let next = g.first_successor(cur);
            let Some(node) = g.remove_node(cur) else {
                break;
            };
            label.points.push(Point {
                x: node.x.unwrap_or(0.0),
                y: node.y.unwrap_or(0.0),
            });
            if node.labelpos().is_some() {
                label.x = node.x;
                label.y = node.y;
                label.width = node.width;
                label.height = node.height;
            }
            let Some(next) = next else {
                break;
            };
            cur = next;
        }
        g.set_edge(v, w, name.as_deref(), label);
    }
}
