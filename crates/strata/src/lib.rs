#![forbid(unsafe_code)]

//! Layered (Sugiyama-style) layout for directed graphs.
//!
//! Graphs may be cyclic and compound (nodes nested inside subgraph nodes). The layout assigns
//! every node a rank and an order within its rank, then x/y coordinates, and routes every edge
//! as a polyline.
//!
//! Two entry points exist: [`layout`] works on a caller graph whose labels are JSON attribute
//! maps, [`layout_graph`] runs the same pipeline on an already typed [`LayoutGraph`].

pub use strata_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod acyclic;
pub mod add_border_segments;
pub mod config;
pub mod coordinate_system;
pub mod error;
pub mod greedy_fas;
pub mod layout;
pub mod model;
pub mod nesting_graph;
pub mod normalize;
pub mod order;
pub mod parent_dummy_chains;
pub mod pipeline;
pub mod position;
pub mod rank;
pub mod self_edges;
pub mod util;

pub use config::{Attrs, GraphConfig, LayoutOptions};
pub use error::{Error, Result};
pub use layout::{build_layout_graph, layout, update_input_graph};
pub use model::{
    Acyclicer, Align, BorderType, Cluster, DummyChain, EdgeLabel, GraphLabel, IdGen, LabelPos,
    LayoutGraph, NodeKind, NodeLabel, Point, RankDir, Ranker, RealNode, SelfEdge,
};

/// Runs the full pipeline on a typed graph, leaving the results on its labels.
///
/// The graph must be a compound multigraph (see [`build_layout_graph`]); dummy nodes added along
/// the way are removed again before this returns.
pub fn layout_graph(g: &mut LayoutGraph) -> Result<()> {
    pipeline::run(g, &LayoutOptions::default())
}
