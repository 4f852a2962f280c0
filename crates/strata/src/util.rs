//! Helpers shared by the pipeline phases.

use crate::graph::{GraphOptions, NodeIx};
use crate::{BorderType, EdgeLabel, Error, LayoutGraph, NodeKind, NodeLabel, Point, Result};
use rustc_hash::FxHashMap;

/// Adds a dummy node under a fresh `prefix<n>` id and returns its index.
pub fn add_dummy_node(g: &mut LayoutGraph, prefix: &str, label: NodeLabel) -> NodeIx {
    loop {
        let id = g.graph_mut().ids.next_id(prefix);
        if !g.has_node(&id) {
            return g.set_node(id, label);
        }
    }
}

/// Adds a zero-sized border dummy, optionally pinned to `rank`.
pub fn add_border_node(
    g: &mut LayoutGraph,
    prefix: &str,
    border_type: BorderType,
    rank: Option<i32>,
) -> NodeIx {
    add_dummy_node(
        g,
        prefix,
        NodeLabel {
            rank,
            ..NodeLabel::dummy(NodeKind::Border { border_type })
        },
    )
}

/// Collapses parallel edges into one, summing weights and keeping the largest minlen.
pub fn simplify(g: &LayoutGraph) -> LayoutGraph {
    let mut simplified = g.filter_map(
        GraphOptions::default(),
        g.graph().clone(),
        |_, n| Some(n.clone()),
        |_, _| None::<EdgeLabel>,
    );
    for e in g.edges() {
        let (v, w) = g.ends(e);
        let label = &g[e];
        let merged = match simplified.edge_ix(v, w, None) {
            Some(existing) => {
                let prev = &simplified[existing];
                EdgeLabel::with_weight(prev.minlen.max(label.minlen), prev.weight + label.weight)
            }
            None => EdgeLabel::with_weight(label.minlen.max(1), label.weight),
        };
        simplified.set_edge(v, w, None, merged);
    }
    simplified
}

/// The graph without its subgraph nodes (and without hierarchy), sharing node indices with `g`.
pub fn as_non_compound_graph(g: &LayoutGraph) -> LayoutGraph {
    g.filter_map(
        GraphOptions {
            multigraph: g.is_multigraph(),
            compound: false,
            directed: true,
        },
        g.graph().clone(),
        |v, n| (!g.has_children(v)).then(|| n.clone()),
        |_, e| Some(e.clone()),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&NodeLabel> for Rect {
    fn from(n: &NodeLabel) -> Self {
        Self {
            x: n.x.unwrap_or(0.0),
            y: n.y.unwrap_or(0.0),
            width: n.width,
            height: n.height,
        }
    }
}

/// The point where the segment from the center of `rect` towards `point` leaves the rectangle.
pub fn intersect_rect(rect: Rect, point: Point) -> Result<Point> {
    let dx = point.x - rect.x;
    let dy = point.y - rect.y;
    let mut w = rect.width / 2.0;
    let mut h = rect.height / 2.0;

    if dx == 0.0 && dy == 0.0 {
        return Err(Error::DegenerateIntersection {
            x: rect.x,
            y: rect.y,
        });
    }

    let (sx, sy) = if dy.abs() * w > dx.abs() * h {
        if dy < 0.0 {
            h = -h;
        }
        (h * dx / dy, h)
    } else {
        if dx < 0.0 {
            w = -w;
        }
        (w, w * dy / dx)
    };

    Ok(Point {
        x: rect.x + sx,
        y: rect.y + sy,
    })
}

pub fn min_rank(g: &LayoutGraph) -> Option<i32> {
    g.nodes().filter_map(|v| g[v].rank).min()
}

pub fn max_rank(g: &LayoutGraph) -> Option<i32> {
    g.nodes().filter_map(|v| g[v].rank).max()
}

/// Nodes grouped by rank, each rank sorted by `order`. Nodes without a rank or order are skipped.
pub fn build_layer_matrix(g: &LayoutGraph) -> Vec<Vec<NodeIx>> {
    let Some(max) = max_rank(g) else {
        return Vec::new();
    };
    let len = usize::try_from(max + 1).unwrap_or(0);
    let mut layers: Vec<Vec<(usize, NodeIx)>> = vec![Vec::new(); len];
    for v in g.nodes() {
        let n = &g[v];
        let (Some(rank), Some(order)) = (n.rank, n.order) else {
            continue;
        };
        let Ok(rank) = usize::try_from(rank) else {
            continue;
        };
        layers[rank].push((order, v));
    }
    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|&(order, _)| order);
            layer.into_iter().map(|(_, v)| v).collect()
        })
        .collect()
}

/// Shifts ranks so the smallest one is 0.
pub fn normalize_ranks(g: &mut LayoutGraph) {
    let Some(min) = min_rank(g) else {
        return;
    };
    for n in g.node_labels_mut() {
        if let Some(rank) = n.rank.as_mut() {
            *rank -= min;
        }
    }
}

/// Closes up empty ranks, except those the nesting graph reserved (multiples of
/// `node_rank_factor`). Without a factor every empty rank goes.
pub fn remove_empty_ranks(g: &mut LayoutGraph) {
    let offset = min_rank(g).unwrap_or(0);
    let mut layers: FxHashMap<i32, Vec<NodeIx>> = FxHashMap::default();
    let mut top = -1;
    for v in g.nodes() {
        let Some(rank) = g[v].rank else {
            continue;
        };
        let r = rank - offset;
        layers.entry(r).or_default().push(v);
        top = top.max(r);
    }

    let factor = g.graph().node_rank_factor.filter(|&f| f > 0);
    let reserved = |i: i32| factor.is_some_and(|f| i % f == 0);
    let mut delta = 0;
    for i in 0..=top {
        match layers.get(&i) {
            None if !reserved(i) => delta -= 1,
            Some(vs) if delta != 0 => {
                for &v in vs {
                    if let Some(rank) = g[v].rank.as_mut() {
                        *rank += delta;
                    }
                }
            }
            _ => {}
        }
    }
}

/// Every node of the hierarchy, children before their parent, top-level nodes in insertion order.
pub fn hierarchy_postorder(g: &LayoutGraph) -> Vec<NodeIx> {
    let mut out = Vec::with_capacity(g.node_count());
    let mut stack: Vec<(NodeIx, usize)> = Vec::new();
    for top in g.root_children() {
        stack.push((top, 0));
        while let Some((v, i)) = stack.last_mut() {
            if let Some(&child) = g.children(*v).get(*i) {
                *i += 1;
                stack.push((child, 0));
                continue;
            }
            out.push(*v);
            stack.pop();
        }
    }
    out
}
