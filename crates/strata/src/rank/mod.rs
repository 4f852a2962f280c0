//! Rank assignment.
//!
//! All rankers expect a DAG whose edges carry `minlen` and `weight`; the result is written to
//! each node's `rank`.

pub mod feasible_tree;
pub mod network_simplex;
pub mod tree;
pub mod util;

use crate::{LayoutGraph, Ranker};

pub use feasible_tree::feasible_tree;
pub use network_simplex::network_simplex;
pub use tree::{Tree, TreeEdge, TreeNode};

/// Ranks `g` with the algorithm selected by its `ranker` setting.
pub fn rank(g: &mut LayoutGraph) {
    match g.graph().ranker {
        Ranker::NetworkSimplex => network_simplex(g),
        Ranker::TightTree => {
            util::longest_path(g);
            feasible_tree(g);
        }
        Ranker::LongestPath => util::longest_path(g),
    }
}
