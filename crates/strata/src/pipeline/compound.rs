//! Subgraph extent phases.

use crate::LayoutGraph;
use crate::graph::NodeIx;

/// Records each subgraph's rank span from its top and bottom border nodes, and the overall
/// largest such rank on the graph.
pub(crate) fn assign_rank_min_max(g: &mut LayoutGraph) {
    let mut max_rank = 0;
    let subgraphs: Vec<(NodeIx, NodeIx, NodeIx)> = g
        .nodes()
        .filter_map(|v| {
            let cluster = g[v].cluster()?;
            Some((v, cluster.border_top?, cluster.border_bottom?))
        })
        .collect();
    for (v, top, bottom) in subgraphs {
        let min = g[top].rank.unwrap_or(0);
        let max = g[bottom].rank.unwrap_or(0);
        if let Some(cluster) = g[v].cluster_mut() {
            cluster.min_rank = Some(min);
            cluster.max_rank = Some(max);
        }
        max_rank = max_rank.max(max);
    }
    g.graph_mut().max_rank = Some(max_rank);
}

/// Sizes every subgraph from its positioned border nodes, then removes all border nodes.
pub(crate) fn remove_border_nodes(g: &mut LayoutGraph) {
    let subgraphs: Vec<NodeIx> = g.nodes().filter(|&v| g.has_children(v)).collect();
    for v in subgraphs {
        let Some(cluster) = g[v].cluster() else {
            continue;
        };
        let left = cluster.border_left.last().copied().flatten();
        let right = cluster.border_right.last().copied().flatten();
        let (Some(top), Some(bottom), Some(left), Some(right)) =
            (cluster.border_top, cluster.border_bottom, left, right)
        else {
            continue;
        };
        let coord = |n: NodeIx, y: bool| {
            let label = &g[n];
            let c = if y { label.y } else { label.x };
            c.unwrap_or(0.0)
        };
        let (t, b) = (coord(top, true), coord(bottom, true));
        let (l, r) = (coord(left, false), coord(right, false));

        let node = &mut g[v];
        node.width = (r - l).abs();
        node.height = (b - t).abs();
        node.x = Some(l + node.width / 2.0);
        node.y = Some(t + node.height / 2.0);
    }

    let borders: Vec<NodeIx> = g.nodes().filter(|&v| g[v].is_border()).collect();
    for v in borders {
        g.remove_node(v);
    }
}
