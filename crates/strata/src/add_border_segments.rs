//! Left and right border chains for subgraphs.
//!
//! Every subgraph that spans ranks `min_rank..=max_rank` gets one left and one right border
//! dummy per rank, chained top to bottom. Ordering keeps the subgraph's contents between them
//! and positioning reads the subgraph's final width off them.

use crate::graph::NodeIx;
use crate::util::{add_border_node, hierarchy_postorder};
use crate::{BorderType, EdgeLabel, LayoutGraph};

pub fn add_border_segments(g: &mut LayoutGraph) {
    if !g.is_compound() {
        return;
    }
    for v in hierarchy_postorder(g) {
        if !g.has_children(v) {
            continue;
        }
        let Some((min_rank, max_rank)) = g[v].min_rank().zip(g[v].max_rank()) else {
            continue;
        };
        let len = usize::try_from(max_rank + 1).unwrap_or(0);
        if let Some(cluster) = g[v].cluster_mut() {
            cluster.border_left = vec![None; len];
            cluster.border_right = vec![None; len];
        }
        for rank in min_rank..=max_rank {
            add_segment(g, v, BorderType::Left, rank);
            add_segment(g, v, BorderType::Right, rank);
        }
    }
}

fn add_segment(g: &mut LayoutGraph, sg: NodeIx, side: BorderType, rank: i32) {
    let prefix = match side {
        BorderType::Left => "_bl",
        _ => "_br",
    };
    let prev = g[sg].cluster().and_then(|c| match side {
        BorderType::Left => c.border_left_at(rank - 1),
        _ => c.border_right_at(rank - 1),
    });

    let curr = add_border_node(g, prefix, side, Some(rank));
    if let (Some(cluster), Ok(idx)) = (g[sg].cluster_mut(), usize::try_from(rank)) {
        let chain = match side {
            BorderType::Left => &mut cluster.border_left,
            _ => &mut cluster.border_right,
        };
        if idx >= chain.len() {
            chain.resize(idx + 1, None);
        }
        chain[idx] = Some(curr);
    }
    g.set_parent(curr, sg);
    if let Some(prev) = prev {
        g.set_edge(prev, curr, None, EdgeLabel::with_weight(1, 1.0));
    }
}
