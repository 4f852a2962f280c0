//! Attribute-graph entry point.
//!
//! Callers hand in a graph whose node, edge and graph labels are free-form JSON attribute maps.
//! A typed working graph is built from the recognized keys, laid out, and only the results are
//! written back.

use crate::config::CanonicalAttrs;
use crate::graph::{Graph, GraphOptions};
use crate::{
    Attrs, EdgeLabel, GraphConfig, LabelPos, LayoutGraph, LayoutOptions, NodeLabel, Result,
    pipeline,
};
use serde_json::{Value, json};

/// Lays out `g` in place.
///
/// Writes `x`/`y` on every node (plus `width`/`height` on subgraph nodes), `points` on every
/// edge (plus `x`/`y` on labelled ones) and `width`/`height` on the graph. Everything else on
/// the caller's labels is left alone.
pub fn layout(g: &mut Graph<Attrs, Attrs, Attrs>, opts: &LayoutOptions) -> Result<()> {
    let mut working = build_layout_graph(g);
    pipeline::run(&mut working, opts)?;
    update_input_graph(g, &working);
    Ok(())
}

/// The working graph for `input`: same node indices, a compound multigraph, defaults applied.
pub fn build_layout_graph(input: &Graph<Attrs, Attrs, Attrs>) -> LayoutGraph {
    let config = GraphConfig::from_attrs(input.graph());
    input.filter_map(
        GraphOptions {
            multigraph: true,
            compound: true,
            directed: true,
        },
        config.into(),
        |_, attrs| {
            let attrs = CanonicalAttrs::new(attrs);
            Some(NodeLabel::new(
                attrs.number("width").unwrap_or(0.0),
                attrs.number("height").unwrap_or(0.0),
            ))
        },
        |_, attrs| Some(edge_label(&CanonicalAttrs::new(attrs))),
    )
}

fn edge_label(attrs: &CanonicalAttrs<'_>) -> EdgeLabel {
    let mut label = EdgeLabel::default();
    if let Some(minlen) = attrs.number("minlen") {
        label.minlen = minlen.round() as i32;
    }
    for (key, slot) in [
        ("weight", &mut label.weight),
        ("width", &mut label.width),
        ("height", &mut label.height),
        ("labeloffset", &mut label.labeloffset),
    ] {
        if let Some(v) = attrs.number(key) {
            *slot = v;
        }
    }
    if let Some(pos) = attrs.string("labelpos") {
        label.labelpos = LabelPos::parse(pos);
    }
    label
}

/// Copies the layout results from `layout` back onto the caller's `input` graph.
pub fn update_input_graph(input: &mut Graph<Attrs, Attrs, Attrs>, layout: &LayoutGraph) {
    let nodes: Vec<_> = input.nodes().collect();
    for v in nodes {
        let Some(computed) = layout.node(v) else {
            continue;
        };
        let is_subgraph = layout.has_children(v);
        let attrs = &mut input[v];
        set_number(attrs, "x", computed.x);
        set_number(attrs, "y", computed.y);
        if is_subgraph {
            set_number(attrs, "width", Some(computed.width));
            set_number(attrs, "height", Some(computed.height));
        }
    }

    let edges: Vec<_> = input.edges().collect();
    for e in edges {
        let (v, w) = input.ends(e);
        let Some(le) = layout.edge_ix(v, w, input.edge_name(e)) else {
            continue;
        };
        let computed = &layout[le];
        let points: Vec<Value> = computed
            .points
            .iter()
            .map(|p| json!({ "x": p.x, "y": p.y }))
            .collect();
        let attrs = &mut input[e];
        attrs.insert("points".to_string(), Value::Array(points));
        if computed.x.is_some() {
            set_number(attrs, "x", computed.x);
            set_number(attrs, "y", computed.y);
        }
    }

    let size = (layout.graph().width, layout.graph().height);
    let graph = input.graph_mut();
    set_number(graph, "width", size.0);
    set_number(graph, "height", size.1);
}

fn set_number(attrs: &mut Attrs, key: &str, value: Option<f64>) {
    let Some(value) = value else {
        return;
    };
    attrs.insert(key.to_string(), json!(value));
}
