//! Self-loops.
//!
//! Loops are parked on their node before ranking, come back as one dummy per loop right of the
//! node once the order is known, and are turned into a five-point curve after positioning.

use crate::graph::EdgeIx;
use crate::util::{add_dummy_node, build_layer_matrix};
use crate::{LayoutGraph, NodeKind, NodeLabel, Point, SelfEdge};

pub fn remove_self_edges(g: &mut LayoutGraph) {
    let loops: Vec<EdgeIx> = g
        .edges()
        .filter(|&e| {
            let (v, w) = g.ends(e);
            v == w
        })
        .collect();
    for e in loops {
        let v = g.ends(e).0;
        let name = g.edge_name(e).map(str::to_string);
        let Some(label) = g.remove_edge(e) else {
            continue;
        };
        if let Some(parked) = g[v].self_edges_mut() {
            parked.push(SelfEdge { name, label });
        }
    }
}

/// Shifts each layer's order to make room for one `_se` dummy per parked loop, directly right of
/// its node.
pub fn insert_self_edges(g: &mut LayoutGraph) {
    for layer in build_layer_matrix(g) {
        let mut shift = 0;
        for (i, &v) in layer.iter().enumerate() {
            g[v].order = Some(i + shift);
            let rank = g[v].rank;
            let parked = g[v].self_edges_mut().map(std::mem::take).unwrap_or_default();
            for edge in parked {
                shift += 1;
                let dummy = NodeLabel {
                    width: edge.label.width,
                    height: edge.label.height,
                    rank,
                    order: Some(i + shift),
                    ..NodeLabel::dummy(NodeKind::SelfEdge {
                        node: v,
                        edge: Box::new(edge),
                    })
                };
                add_dummy_node(g, "_se", dummy);
            }
        }
    }
}

/// Restores every loop with points that bulge from the node's right side out to its dummy.
pub fn position_self_edges(g: &mut LayoutGraph) {
    let dummies: Vec<_> = g
        .nodes()
        .filter(|&v| matches!(g[v].kind, NodeKind::SelfEdge { .. }))
        .collect();
    for d in dummies {
        let Some(dummy) = g.remove_node(d) else {
            continue;
        };
        let NodeKind::SelfEdge { node, edge } = dummy.kind else {
            continue;
        };
        let SelfEdge { name, mut label } = *edge;
        let owner = &g[node];
        let x = owner.x.unwrap_or(0.0) + owner.width / 2.0;
        let y = owner.y.unwrap_or(0.0);
        let dx = dummy.x.unwrap_or(0.0) - x;
        let dy = owner.height / 2.0;

        label.points = vec![
            Point {
                x: x + 2.0 * dx / 3.0,
                y: y - dy,
            },
            Point {
                x: x + 5.0 * dx / 6.0,
                y: y - dy,
            },
            Point { x: x + dx, y },
            Point {
                x: x + 5.0 * dx / 6.0,
                y: y + dy,
            },
            Point {
                x: x + 2.0 * dx / 3.0,
                y: y + dy,
            },
        ];
        label.x = dummy.x;
        label.y = dummy.y;
        g.set_edge(node, node, name.as_deref(), label);
    }
}
