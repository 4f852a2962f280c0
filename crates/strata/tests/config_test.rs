use serde_json::{Value, json};
use strata::graph::{Graph, GraphOptions};
use strata::{Acyclicer, Align, Attrs, GraphConfig, LayoutOptions, RankDir, Ranker, layout};

fn attrs(value: Value) -> Attrs {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[test]
fn reads_graph_keys_case_insensitively() {
    let config = GraphConfig::from_attrs(&attrs(json!({
        "RankDir": "rl",
        "ALIGN": "dr",
        "nodeSep": "12.5",
        "ranksep": 7,
        "ranker": "Longest-Path",
        "acyclicer": "greedy",
    })));
    assert_eq!(config.rankdir, RankDir::RL);
    assert_eq!(config.align, Some(Align::DR));
    assert_eq!(config.nodesep, 12.5);
    assert_eq!(config.ranksep, 7.0);
    assert_eq!(config.ranker, Ranker::LongestPath);
    assert_eq!(config.acyclicer, Acyclicer::Greedy);
}

#[test]
fn unusable_numbers_keep_the_defaults() {
    let config = GraphConfig::from_attrs(&attrs(json!({
        "nodesep": "inf",
        "edgesep": "NaN",
        "ranksep": true,
        "marginx": "-infinity",
        "marginy": "wide",
    })));
    assert_eq!(config, GraphConfig::default());
}

#[test]
fn unknown_option_strings_fall_back() {
    let config = GraphConfig::from_attrs(&attrs(json!({
        "rankdir": "sideways",
        "align": "middle",
        "ranker": "magic",
        "acyclicer": "none",
    })));
    assert_eq!(config, GraphConfig::default());
}

#[test]
fn unusable_node_and_edge_numbers_keep_the_defaults() {
    let mut g: Graph<Attrs, Attrs, Attrs> = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
        ..Default::default()
    });
    g.set_graph(attrs(json!({ "ranksep": "NaN" })));
    g.set_node("a", attrs(json!({ "width": 50, "height": 100 })));
    g.set_node("b", attrs(json!({ "width": true, "height": 100 })));
    g.set_edge_by_id(
        "a",
        "b",
        None,
        attrs(json!({ "minlen": "inf", "weight": "NaN" })),
    );

    layout(&mut g, &LayoutOptions::default()).unwrap();

    let y = |id: &str| g.node_by_id(id).unwrap()["y"].as_f64().unwrap();
    assert_eq!(y("a"), 50.0);
    assert_eq!(y("b"), 200.0);
    assert_eq!(g.graph()["width"].as_f64(), Some(50.0));
}

#[test]
fn layout_options_read_camel_case_json() {
    let opts: LayoutOptions = serde_json::from_value(json!({ "debugTiming": true })).unwrap();
    assert!(opts.debug_timing);
    let opts: LayoutOptions = serde_json::from_value(json!({})).unwrap();
    assert!(!opts.debug_timing);
}
