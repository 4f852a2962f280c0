//! Per-rank views of the layout graph used while sweeping.

use crate::LayoutGraph;
use crate::graph::NodeIx;
use rustc_hash::FxHashMap;

/// Which side of a rank the barycenters are computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// The rank above (down sweeps).
    InEdges,
    /// The rank below (up sweeps).
    OutEdges,
}

/// The movable nodes of one rank with their hierarchy, plus the aggregated edges that tie them
/// to the fixed neighbouring rank.
///
/// Edges are always stored pointing into the movable node, whatever the [`Relationship`], so an
/// up sweep sees the rank below as "predecessors". Parallel edges are merged by summing weights
/// (a zero weight counts as one).
#[derive(Debug, Clone, Default)]
pub struct LayerGraph {
    pub rank: i32,
    /// Children by parent; `None` is the root of the layer.
    children: FxHashMap<Option<NodeIx>, Vec<NodeIx>>,
    parents: FxHashMap<NodeIx, Option<NodeIx>>,
    in_edges: FxHashMap<NodeIx, Vec<(NodeIx, f64)>>,
    borders: FxHashMap<NodeIx, (NodeIx, NodeIx)>,
}

impl LayerGraph {
    pub fn contains(&self, v: NodeIx) -> bool {
        self.parents.contains_key(&v)
    }

    pub fn children(&self, v: Option<NodeIx>) -> &[NodeIx] {
        self.children.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parent inside the layer; `None` for top-level nodes and for nodes not in the layer.
    pub fn parent(&self, v: NodeIx) -> Option<NodeIx> {
        self.parents.get(&v).copied().flatten()
    }

    /// Neighbours in the fixed rank with the merged edge weight.
    pub fn in_edges(&self, v: NodeIx) -> &[(NodeIx, f64)] {
        self.in_edges.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first_predecessor(&self, v: NodeIx) -> Option<NodeIx> {
        self.in_edges(v).first().map(|&(u, _)| u)
    }

    /// Left and right border nodes of subgraph `v` on this rank.
    pub fn borders(&self, v: Option<NodeIx>) -> Option<(NodeIx, NodeIx)> {
        v.and_then(|v| self.borders.get(&v).copied())
    }

    fn add_edge(&mut self, u: NodeIx, v: NodeIx, weight: f64) {
        let weight = if weight == 0.0 { 1.0 } else { weight };
        let edges = self.in_edges.entry(v).or_default();
        match edges.iter_mut().find(|(x, _)| *x == u) {
            Some((_, w)) => *w += weight,
            None => edges.push((u, weight)),
        }
    }
}

/// Collects the nodes of `rank` (and the subgraphs spanning it) with the edges selected by
/// `relationship`. Assumes every edge spans exactly one rank.
pub fn build_layer_graph(g: &LayoutGraph, rank: i32, relationship: Relationship) -> LayerGraph {
    let mut lg = LayerGraph {
        rank,
        ..Default::default()
    };

    for v in g.nodes() {
        let node = &g[v];
        let spans = node
            .min_rank()
            .zip(node.max_rank())
            .is_some_and(|(min, max)| min <= rank && rank <= max);
        if node.rank != Some(rank) && !spans {
            continue;
        }

        let parent = g.parent(v);
        lg.parents.insert(v, parent);
        lg.children.entry(parent).or_default().push(v);

        match relationship {
            Relationship::InEdges => {
                for &e in g.in_edges(v) {
                    lg.add_edge(g.ends(e).0, v, g[e].weight);
                }
            }
            Relationship::OutEdges => {
                for &e in g.out_edges(v) {
                    lg.add_edge(g.ends(e).1, v, g[e].weight);
                }
            }
        }

        if let Some(cluster) = node.cluster().filter(|_| spans) {
            if let Some(pair) = cluster.border_left_at(rank).zip(cluster.border_right_at(rank)) {
                lg.borders.insert(v, pair);
            }
        }
    }
    lg
}
