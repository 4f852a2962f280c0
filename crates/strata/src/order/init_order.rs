use crate::LayoutGraph;
use crate::graph::{NodeIx, alg};

/// Initial layering: a depth-first walk along successors, started from the leaf nodes in rank
/// order, appends every node to its rank the first time it is reached.
///
/// Subgraph nodes are never placed in a layer.
pub fn init_order(g: &LayoutGraph) -> Vec<Vec<NodeIx>> {
    let mut simple: Vec<NodeIx> = g.nodes().filter(|&v| !g.has_children(v)).collect();
    let Some(max_rank) = simple.iter().filter_map(|&v| g[v].rank).max() else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<NodeIx>> = vec![Vec::new(); usize::try_from(max_rank + 1).unwrap_or(0)];

    simple.sort_by_key(|&v| g[v].rank.unwrap_or(i32::MAX));
    for v in alg::preorder(g, &simple) {
        if g.has_children(v) {
            continue;
        }
        let Some(rank) = g[v].rank.and_then(|r| usize::try_from(r).ok()) else {
            continue;
        };
        if let Some(layer) = layers.get_mut(rank) {
            layer.push(v);
        }
    }
    layers
}
