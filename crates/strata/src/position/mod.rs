//! Coordinate assignment.
//!
//! Ranks are stacked vertically, each as tall as its tallest node and `ranksep` apart; x comes
//! from Brandes & Köpf (see [`bk`]).

pub mod bk;

use crate::LayoutGraph;
use crate::util::build_layer_matrix;

pub fn position(g: &mut LayoutGraph) {
    position_y(g);
    for (v, x) in bk::position_x(g) {
        if let Some(n) = g.node_mut(v) {
            n.x = Some(x);
        }
    }
}

/// Sets `y` to the middle of each node's rank band. Subgraph nodes are not touched.
pub fn position_y(g: &mut LayoutGraph) {
    let rank_sep = g.graph().ranksep;
    let mut prev_y = 0.0;
    for layer in build_layer_matrix(g) {
        let max_height = layer
            .iter()
            .filter(|&&v| !g.has_children(v))
            .map(|&v| g[v].height)
            .fold(0.0, f64::max);
        for &v in &layer {
            if !g.has_children(v) {
                g[v].y = Some(prev_y + max_height / 2.0);
            }
        }
        prev_y += max_height + rank_sep;
    }
}
