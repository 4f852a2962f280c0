//! Arena-backed graph container used by `strata`.
//!
//! Nodes and edges are stored in dense slot vectors and addressed by [`NodeIx`] /
//! [`EdgeIx`]. String identifiers are only consulted at the boundary, through
//! [`Graph::node_ix`] and friends.

mod graph;
mod ix;
mod options;

pub mod alg;

pub use graph::Graph;
pub use ix::{EdgeIx, NodeIx};
pub use options::GraphOptions;
