//! Rank direction handling.
//!
//! The pipeline always lays out top-to-bottom. [`adjust`] swaps box dimensions for horizontal
//! directions before positioning, and [`undo`] mirrors and transposes the result afterwards.

use crate::{LayoutGraph, NodeKind, RankDir};

pub fn adjust(g: &mut LayoutGraph) {
    if g.graph().rankdir.is_horizontal() {
        swap_width_height(g);
    }
}

pub fn undo(g: &mut LayoutGraph) {
    let rankdir = g.graph().rankdir;
    if matches!(rankdir, RankDir::BT | RankDir::RL) {
        reverse_y(g);
    }
    if rankdir.is_horizontal() {
        swap_xy(g);
        swap_width_height(g);
    }
}

fn swap_width_height(g: &mut LayoutGraph) {
    for n in g.node_labels_mut() {
        (n.width, n.height) = (n.height, n.width);
        // Loop labels parked off-graph still come back through `undo`.
        match &mut n.kind {
            NodeKind::SelfEdge { edge, .. } => {
                (edge.label.width, edge.label.height) = (edge.label.height, edge.label.width);
            }
            NodeKind::Real(real) => {
                for se in &mut real.self_edges {
                    (se.label.width, se.label.height) = (se.label.height, se.label.width);
                }
            }
            _ => {}
        }
    }
    for e in g.edge_labels_mut() {
        (e.width, e.height) = (e.height, e.width);
    }
}

fn reverse_y(g: &mut LayoutGraph) {
    for n in g.node_labels_mut() {
        n.y = n.y.map(|y| -y);
    }
    for e in g.edge_labels_mut() {
        for p in &mut e.points {
            p.y = -p.y;
        }
        e.y = e.y.map(|y| -y);
    }
}

fn swap_xy(g: &mut LayoutGraph) {
    for n in g.node_labels_mut() {
        (n.x, n.y) = (n.y, n.x);
    }
    for e in g.edge_labels_mut() {
        for p in &mut e.points {
            (p.x, p.y) = (p.y, p.x);
        }
        if e.x.is_some() {
            (e.x, e.y) = (e.y, e.x);
        }
    }
}
