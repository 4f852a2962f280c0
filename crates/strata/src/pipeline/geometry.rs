//! Final geometry phases: translation, edge endpoints and reversed edges.

use crate::graph::EdgeIx;
use crate::util::{Rect, intersect_rect};
use crate::{LayoutGraph, Point, Result};

/// Moves the drawing so its top-left corner sits at (`marginx`, `marginy`) and records the
/// graph's total size.
pub(crate) fn translate_graph(g: &mut LayoutGraph) {
    let mut min_x = f64::INFINITY;
    let mut max_x: f64 = 0.0;
    let mut min_y = f64::INFINITY;
    let mut max_y: f64 = 0.0;
    let mut extend = |x: f64, y: f64, w: f64, h: f64| {
        min_x = min_x.min(x - w / 2.0);
        max_x = max_x.max(x + w / 2.0);
        min_y = min_y.min(y - h / 2.0);
        max_y = max_y.max(y + h / 2.0);
    };

    for v in g.nodes() {
        let n = &g[v];
        if let (Some(x), Some(y)) = (n.x, n.y) {
            extend(x, y, n.width, n.height);
        }
    }
    for e in g.edges() {
        let label = &g[e];
        if let (Some(x), Some(y)) = (label.x, label.y) {
            extend(x, y, label.width, label.height);
        }
    }
    if !min_x.is_finite() || !min_y.is_finite() {
        min_x = 0.0;
        min_y = 0.0;
    }

    let (margin_x, margin_y) = (g.graph().marginx, g.graph().marginy);
    let dx = min_x - margin_x;
    let dy = min_y - margin_y;

    for n in g.node_labels_mut() {
        n.x = n.x.map(|x| x - dx);
        n.y = n.y.map(|y| y - dy);
    }
    for e in g.edge_labels_mut() {
        for p in &mut e.points {
            p.x -= dx;
            p.y -= dy;
        }
        e.x = e.x.map(|x| x - dx);
        e.y = e.y.map(|y| y - dy);
    }

    let graph = g.graph_mut();
    graph.width = Some(max_x - dx + margin_x);
    graph.height = Some(max_y - dy + margin_y);
}

/// Clips every edge to its endpoint boxes by adding the border crossings as first and last
/// point.
pub(crate) fn assign_node_intersects(g: &mut LayoutGraph) -> Result<()> {
    let edges: Vec<EdgeIx> = g.edges().collect();
    for e in edges {
        let (v, w) = g.ends(e);
        let v_rect = Rect::from(&g[v]);
        let w_rect = Rect::from(&g[w]);
        let label = &mut g[e];
        let (p1, p2) = match (label.points.first(), label.points.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => (center(w_rect), center(v_rect)),
        };
        let start = intersect_rect(v_rect, p1)?;
        let end = intersect_rect(w_rect, p2)?;
        label.points.insert(0, start);
        label.points.push(end);
    }
    Ok(())
}

fn center(rect: Rect) -> Point {
    Point {
        x: rect.x,
        y: rect.y,
    }
}

pub(crate) fn reverse_points_for_reversed_edges(g: &mut LayoutGraph) {
    for e in g.edge_labels_mut() {
        if e.reversed {
            e.points.reverse();
        }
    }
}
