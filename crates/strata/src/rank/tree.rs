//! Spanning tree labels shared by the feasible tree and network simplex.

use crate::graph::{Graph, NodeIx};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNode {
    pub low: i32,
    pub lim: i32,
    pub parent: Option<NodeIx>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeEdge {
    pub cutvalue: f64,
}

/// Undirected spanning tree over the ranked graph's node indices.
pub type Tree = Graph<TreeNode, TreeEdge, ()>;
