//! Layout options and attribute-map parsing.
//!
//! Callers describe their graph with free-form JSON attribute maps. Only the keys listed on
//! [`GraphConfig`] (and the node/edge keys read by [`crate::layout`]) are recognized; keys are
//! matched case-insensitively and numbers may be given as JSON numbers or numeric strings.

use crate::model::{Acyclicer, Align, GraphLabel, RankDir, Ranker};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute map carried by nodes, edges and the graph itself on the caller's graph.
pub type Attrs = Map<String, Value>;

/// Per-call switches that do not affect the computed geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Report the wall-clock time of every pipeline phase as `tracing` debug events.
    pub debug_timing: bool,
}

/// Graph-level inputs recognized by the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub rankdir: RankDir,
    pub align: Option<Align>,
    pub nodesep: f64,
    pub edgesep: f64,
    pub ranksep: f64,
    pub marginx: f64,
    pub marginy: f64,
    pub acyclicer: Acyclicer,
    pub ranker: Ranker,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            align: None,
            nodesep: 50.0,
            edgesep: 20.0,
            ranksep: 50.0,
            marginx: 0.0,
            marginy: 0.0,
            acyclicer: Acyclicer::Dfs,
            ranker: Ranker::NetworkSimplex,
        }
    }
}

impl GraphConfig {
    pub fn from_attrs(attrs: &Attrs) -> Self {
        let attrs = CanonicalAttrs::new(attrs);
        let mut out = Self::default();

        for (key, slot) in [
            ("nodesep", &mut out.nodesep),
            ("edgesep", &mut out.edgesep),
            ("ranksep", &mut out.ranksep),
            ("marginx", &mut out.marginx),
            ("marginy", &mut out.marginy),
        ] {
            if let Some(v) = attrs.number(key) {
                *slot = v;
            }
        }

        if let Some(s) = attrs.string("rankdir") {
            out.rankdir = RankDir::parse(s);
        }
        if let Some(s) = attrs.string("align") {
            out.align = Align::try_parse(s);
        }
        if let Some(s) = attrs.string("acyclicer") {
            out.acyclicer = Acyclicer::parse(s);
        }
        if let Some(s) = attrs.string("ranker") {
            out.ranker = Ranker::parse(s);
        }
        out
    }
}

impl From<GraphConfig> for GraphLabel {
    fn from(config: GraphConfig) -> Self {
        Self {
            rankdir: config.rankdir,
            align: config.align,
            nodesep: config.nodesep,
            edgesep: config.edgesep,
            ranksep: config.ranksep,
            marginx: config.marginx,
            marginy: config.marginy,
            acyclicer: config.acyclicer,
            ranker: config.ranker,
            ..Default::default()
        }
    }
}

/// Lower-cased view over an attribute map. When two keys differ only by case the later one wins.
pub(crate) struct CanonicalAttrs<'a> {
    values: FxHashMap<String, &'a Value>,
}

impl<'a> CanonicalAttrs<'a> {
    pub(crate) fn new(attrs: &'a Attrs) -> Self {
        let values = attrs
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        Self { values }
    }

    pub(crate) fn number(&self, key: &str) -> Option<f64> {
        let value = self.values.get(key)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(v) if v.is_finite() => Some(v),
            _ => {
                tracing::debug!(key, %value, "ignoring non-numeric attribute");
                None
            }
        }
    }

    pub(crate) fn string(&self, key: &str) -> Option<&'a str> {
        self.values.get(key).and_then(|v| v.as_str())
    }
}
