use super::LayerGraph;
use crate::graph::NodeIx;
use rustc_hash::{FxHashMap, FxHashSet};

/// Left-of constraints between sibling subgraphs, accumulated over one sweep.
#[derive(Debug, Clone, Default)]
pub struct ConstraintGraph {
    edges: Vec<(NodeIx, NodeIx)>,
    seen: FxHashSet<(NodeIx, NodeIx)>,
}

impl ConstraintGraph {
    pub fn add_edge(&mut self, v: NodeIx, w: NodeIx) {
        if self.seen.insert((v, w)) {
            self.edges.push((v, w));
        }
    }

    pub fn has_edge(&self, v: NodeIx, w: NodeIx) -> bool {
        self.seen.contains(&(v, w))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[(NodeIx, NodeIx)] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Records, for every pair of sibling subgraphs that ended up next to each other in `vs`, that
/// the left one stays left in later ranks of the same sweep.
pub fn add_subgraph_constraints(lg: &LayerGraph, cg: &mut ConstraintGraph, vs: &[NodeIx]) {
    let mut prev: FxHashMap<Option<NodeIx>, NodeIx> = FxHashMap::default();
    for &v in vs {
        let mut child = lg.parent(v);
        while let Some(c) = child {
            let parent = lg.parent(c);
            if let Some(prev_child) = prev.insert(parent, c) {
                if prev_child != c {
                    cg.add_edge(prev_child, c);
                    break;
                }
            }
            child = parent;
        }
    }
}
