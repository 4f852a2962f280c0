//! The layout pipeline.
//!
//! Every phase takes the working graph by exclusive reference; phases that add dummy nodes are
//! paired with a later phase that removes them again. Each phase runs in its own `tracing` span,
//! and with [`LayoutOptions::debug_timing`] its wall-clock time is reported as a debug event.

mod compound;
mod geometry;
mod labels;

use crate::util::{as_non_compound_graph, normalize_ranks, remove_empty_ranks};
use crate::{
    LayoutGraph, LayoutOptions, Result, acyclic, add_border_segments, coordinate_system,
    nesting_graph, normalize, order, parent_dummy_chains, position, rank, self_edges,
};
use std::time::Instant;

struct Phases<'a> {
    g: &'a mut LayoutGraph,
    debug_timing: bool,
}

impl Phases<'_> {
    fn run<T>(&mut self, name: &'static str, phase: impl FnOnce(&mut LayoutGraph) -> T) -> T {
        let _span = tracing::debug_span!("phase", name).entered();
        let start = self.debug_timing.then(Instant::now);
        let out = phase(&mut *self.g);
        if let Some(start) = start {
            tracing::debug!(phase = name, elapsed = ?start.elapsed(), "timing");
        }
        out
    }
}

/// Runs every phase on `g`, leaving coordinates on its node and edge labels and the drawing size
/// on its graph label.
pub fn run(g: &mut LayoutGraph, opts: &LayoutOptions) -> Result<()> {
    let start = opts.debug_timing.then(Instant::now);
    tracing::debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        "running layout"
    );
    let mut p = Phases {
        g,
        debug_timing: opts.debug_timing,
    };

    p.run("make_space_for_edge_labels", labels::make_space_for_edge_labels);
    p.run("remove_self_edges", self_edges::remove_self_edges);
    p.run("acyclic", acyclic::run);
    p.run("nesting_graph", nesting_graph::run);
    p.run("rank", rank_non_compound);
    p.run("inject_edge_label_proxies", labels::inject_edge_label_proxies);
    p.run("remove_empty_ranks", remove_empty_ranks);
    p.run("nesting_graph_cleanup", nesting_graph::cleanup);
    p.run("normalize_ranks", normalize_ranks);
    p.run("assign_rank_min_max", compound::assign_rank_min_max);
    p.run("remove_edge_label_proxies", labels::remove_edge_label_proxies);
    p.run("normalize", normalize::run);
    p.run("parent_dummy_chains", parent_dummy_chains::parent_dummy_chains);
    p.run("add_border_segments", add_border_segments::add_border_segments);
    p.run("order", order::order);
    p.run("insert_self_edges", self_edges::insert_self_edges);
    p.run("adjust_coordinate_system", coordinate_system::adjust);
    p.run("position", position::position);
    p.run("position_self_edges", self_edges::position_self_edges);
    p.run("remove_border_nodes", compound::remove_border_nodes);
    p.run("normalize_undo", normalize::undo);
    p.run("fixup_edge_label_coords", labels::fixup_edge_label_coords);
    p.run("undo_coordinate_system", coordinate_system::undo);
    p.run("translate_graph", geometry::translate_graph);
    p.run("assign_node_intersects", geometry::assign_node_intersects)?;
    p.run(
        "reverse_points",
        geometry::reverse_points_for_reversed_edges,
    );
    p.run("acyclic_undo", acyclic::undo);

    if let Some(start) = start {
        tracing::debug!(elapsed = ?start.elapsed(), "layout done");
    }
    Ok(())
}

/// Ranks the graph without its subgraph nodes, which take no part in rank constraints.
fn rank_non_compound(g: &mut LayoutGraph) {
    let mut flat = as_non_compound_graph(g);
    rank::rank(&mut flat);
    for v in flat.nodes() {
        if let Some(n) = g.node_mut(v) {
            n.rank = flat[v].rank;
        }
    }
}
