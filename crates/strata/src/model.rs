//! Label types carried by the working layout graph.
//!
//! Real nodes and every kind of dummy node share [`NodeLabel`]; what differs between them lives in
//! the [`NodeKind`] tag so each dummy kind only carries the fields it actually needs.

use crate::graph::{EdgeIx, Graph, NodeIx};
use serde::{Deserialize, Serialize};

/// The graph every pipeline phase operates on.
pub type LayoutGraph = Graph<NodeLabel, EdgeLabel, GraphLabel>;

macro_rules! lenient_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(#[default] $default:ident => $default_str:literal,)?
            $($variant:ident => $s:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(from = "String", into = "&'static str")]
        pub enum $name {
            $(#[default] $default,)?
            $($variant,)*
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$default => $default_str,)?
                    $(Self::$variant => $s,)*
                }
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::parse(&value)
            }
        }
    };
}

lenient_enum! {
    /// Direction ranks flow in.
    pub enum RankDir {
        #[default] TB => "TB",
        BT => "BT",
        LR => "LR",
        RL => "RL",
    }
}

impl RankDir {
    /// Case-insensitive; anything unrecognized lays out top-to-bottom.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "bt" => Self::BT,
            "lr" => Self::LR,
            "rl" => Self::RL,
            _ => Self::TB,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LR | Self::RL)
    }
}

lenient_enum! {
    /// Which of the four Brandes-Köpf alignments to keep instead of balancing them.
    pub enum Align {
        #[default] UL => "UL",
        UR => "UR",
        DL => "DL",
        DR => "DR",
    }
}

impl Align {
    pub fn parse(s: &str) -> Self {
        Self::try_parse(s).unwrap_or_default()
    }

    /// `None` for unrecognized values, which select the balanced layout.
    pub fn try_parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ul" => Some(Self::UL),
            "ur" => Some(Self::UR),
            "dl" => Some(Self::DL),
            "dr" => Some(Self::DR),
            _ => None,
        }
    }
}

lenient_enum! {
    pub enum Ranker {
        #[default] NetworkSimplex => "network-simplex",
        TightTree => "tight-tree",
        LongestPath => "longest-path",
    }
}

impl Ranker {
    /// Unknown rankers fall back to network simplex.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "tight-tree" => Self::TightTree,
            "longest-path" => Self::LongestPath,
            "network-simplex" => Self::NetworkSimplex,
            other => {
                tracing::debug!(ranker = other, "unknown ranker, using network-simplex");
                Self::NetworkSimplex
            }
        }
    }
}

lenient_enum! {
    pub enum Acyclicer {
        #[default] Dfs => "dfs",
        Greedy => "greedy",
    }
}

impl Acyclicer {
    /// Only `"greedy"` selects the greedy heuristic; everything else uses the DFS breaker.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("greedy") {
            Self::Greedy
        } else {
            Self::Dfs
        }
    }
}

lenient_enum! {
    /// Where an edge label sits relative to its edge.
    pub enum LabelPos {
        #[default] R => "r",
        L => "l",
        C => "c",
    }
}

impl LabelPos {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" => Self::L,
            "c" => Self::C,
            _ => Self::R,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderType {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Generates dummy node identifiers for one layout run.
#[derive(Debug, Clone, Default)]
pub struct IdGen {
    counter: u64,
}

impl IdGen {
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}{}", self.counter)
    }
}

/// A long edge that `normalize::run` replaced with a chain of dummy nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct DummyChain {
    pub head: NodeIx,
    pub v: NodeIx,
    pub w: NodeIx,
    pub name: Option<String>,
    pub label: EdgeLabel,
}

#[derive(Debug, Clone)]
pub struct GraphLabel {
    pub rankdir: RankDir,
    pub align: Option<Align>,
    pub nodesep: f64,
    pub edgesep: f64,
    pub ranksep: f64,
    pub marginx: f64,
    pub marginy: f64,
    pub acyclicer: Acyclicer,
    pub ranker: Ranker,

    pub dummy_chains: Vec<DummyChain>,
    pub nesting_root: Option<NodeIx>,
    pub node_rank_factor: Option<i32>,
    pub max_rank: Option<i32>,
    pub ids: IdGen,

    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Default for GraphLabel {
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
            dummy_chains: Vec::new(),
            nesting_root: None,
            node_rank_factor: None,
            max_rank: None,
            ids: IdGen::default(),
            width: None,
            height: None,
        }
    }
}

/// Extent and border chains of a subgraph node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    pub border_top: Option<NodeIx>,
    pub border_bottom: Option<NodeIx>,
    /// Indexed by rank.
    pub border_left: Vec<Option<NodeIx>>,
    /// Indexed by rank.
    pub border_right: Vec<Option<NodeIx>>,
    pub min_rank: Option<i32>,
    pub max_rank: Option<i32>,
}

impl Cluster {
    pub fn border_left_at(&self, rank: i32) -> Option<NodeIx> {
        usize::try_from(rank)
            .ok()
            .and_then(|r| self.border_left.get(r).copied().flatten())
    }

    pub fn border_right_at(&self, rank: i32) -> Option<NodeIx> {
        usize::try_from(rank)
            .ok()
            .and_then(|r| self.border_right.get(r).copied().flatten())
    }
}

/// A self-loop parked on its node while the rest of the graph is laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfEdge {
    pub name: Option<String>,
    pub label: EdgeLabel,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RealNode {
    pub cluster: Option<Cluster>,
    pub self_edges: Vec<SelfEdge>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Real(RealNode),
    /// One rank-hop of a normalized long edge.
    Edge,
    /// The hop of a normalized long edge that carries its label box.
    EdgeLabel { labelpos: LabelPos },
    /// Temporary marker for the rank an edge label should land on.
    EdgeProxy { edge: EdgeIx },
    Border { border_type: BorderType },
    SelfEdge { node: NodeIx, edge: Box<SelfEdge> },
    /// Root of the nesting graph.
    Root,
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::Real(RealNode::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    pub rank: Option<i32>,
    pub order: Option<usize>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub kind: NodeKind,
}

impl NodeLabel {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn dummy(kind: NodeKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        !matches!(self.kind, NodeKind::Real(_))
    }

    pub fn is_border(&self) -> bool {
        matches!(self.kind, NodeKind::Border { .. })
    }

    pub fn border_type(&self) -> Option<BorderType> {
        match self.kind {
            NodeKind::Border { border_type } => Some(border_type),
            _ => None,
        }
    }

    /// Label position of an edge-label dummy.
    pub fn labelpos(&self) -> Option<LabelPos> {
        match self.kind {
            NodeKind::EdgeLabel { labelpos } => Some(labelpos),
            _ => None,
        }
    }

    pub fn cluster(&self) -> Option<&Cluster> {
        match &self.kind {
            NodeKind::Real(real) => real.cluster.as_ref(),
            _ => None,
        }
    }

    pub fn cluster_mut(&mut self) -> Option<&mut Cluster> {
        match &mut self.kind {
            NodeKind::Real(real) => real.cluster.as_mut(),
            _ => None,
        }
    }

    /// The cluster data of a real node, created on first use. `None` for dummies.
    pub fn cluster_entry(&mut self) -> Option<&mut Cluster> {
        match &mut self.kind {
            NodeKind::Real(real) => Some(real.cluster.get_or_insert_with(Cluster::default)),
            _ => None,
        }
    }

    pub fn min_rank(&self) -> Option<i32> {
        self.cluster().and_then(|c| c.min_rank)
    }

    pub fn max_rank(&self) -> Option<i32> {
        self.cluster().and_then(|c| c.max_rank)
    }

    pub fn self_edges_mut(&mut self) -> Option<&mut Vec<SelfEdge>> {
        match &mut self.kind {
            NodeKind::Real(real) => Some(&mut real.self_edges),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub minlen: i32,
    pub weight: f64,
    pub width: f64,
    pub height: f64,
    pub labelpos: LabelPos,
    pub labeloffset: f64,
    pub label_rank: Option<i32>,
    pub nesting_edge: bool,
    pub reversed: bool,
    pub forward_name: Option<String>,

    pub x: Option<f64>,
    pub y: Option<f64>,
    pub points: Vec<Point>,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            minlen: 1,
            weight: 1.0,
            width: 0.0,
            height: 0.0,
            labelpos: LabelPos::R,
            labeloffset: 10.0,
            label_rank: None,
            nesting_edge: false,
            reversed: false,
            forward_name: None,
            x: None,
            y: None,
            points: Vec::new(),
        }
    }
}

impl EdgeLabel {
    pub fn with_weight(minlen: i32, weight: f64) -> Self {
        Self {
            minlen,
            weight,
            ..Default::default()
        }
    }
}
