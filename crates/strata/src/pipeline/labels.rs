//! Edge label placement phases.

use crate::graph::{EdgeIx, NodeIx};
use crate::util::add_dummy_node;
use crate::{LabelPos, LayoutGraph, NodeKind, NodeLabel};

/// Halves `ranksep` and doubles every minlen so a label can sit on the rank between an edge's
/// ends. Side labels also get `labeloffset` of extra room along the rank.
pub(crate) fn make_space_for_edge_labels(g: &mut LayoutGraph) {
    let graph = g.graph_mut();
    graph.ranksep /= 2.0;
    let horizontal = graph.rankdir.is_horizontal();
    for e in g.edge_labels_mut() {
        e.minlen *= 2;
        if e.labelpos != LabelPos::C {
            if horizontal {
                e.height += e.labeloffset;
            } else {
                e.width += e.labeloffset;
            }
        }
    }
}

/// Marks the rank halfway along every labelled edge with an `_ep` proxy node.
pub(crate) fn inject_edge_label_proxies(g: &mut LayoutGraph) {
    let labelled: Vec<(EdgeIx, i32)> = g
        .edges()
        .filter(|&e| g[e].width != 0.0 && g[e].height != 0.0)
        .filter_map(|e| {
            let (v, w) = g.ends(e);
            let (v_rank, w_rank) = (g[v].rank?, g[w].rank?);
            Some((e, (w_rank - v_rank) / 2 + v_rank))
        })
        .collect();
    for (edge, rank) in labelled {
        let proxy = NodeLabel {
            rank: Some(rank),
            ..NodeLabel::dummy(NodeKind::EdgeProxy { edge })
        };
        add_dummy_node(g, "_ep", proxy);
    }
}

/// Moves each proxy's rank onto its edge as `label_rank` and drops the proxy.
pub(crate) fn remove_edge_label_proxies(g: &mut LayoutGraph) {
    let proxies: Vec<(NodeIx, EdgeIx)> = g
        .nodes()
        .filter_map(|v| match g[v].kind {
            NodeKind::EdgeProxy { edge } => Some((v, edge)),
            _ => None,
        })
        .collect();
    for (v, edge) in proxies {
        let rank = g[v].rank;
        if let Some(label) = g.edge_mut(edge) {
            label.label_rank = rank;
        }
        g.remove_node(v);
    }
}

/// Takes the label offset back out and moves side labels off the edge line.
pub(crate) fn fixup_edge_label_coords(g: &mut LayoutGraph) {
    for e in g.edge_labels_mut() {
        let Some(x) = e.x else {
            continue;
        };
        match e.labelpos {
            LabelPos::L => {
                e.width -= e.labeloffset;
                e.x = Some(x - e.width / 2.0 - e.labeloffset);
            }
            LabelPos::R => {
                e.width -= e.labeloffset;
                e.x = Some(x + e.width / 2.0 + e.labeloffset);
            }
            LabelPos::C => {}
        }
    }
}
