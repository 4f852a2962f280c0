//! Brandes & Köpf horizontal coordinate assignment.
//!
//! Four extreme alignments (up/down × left/right) are computed by aligning each node with a
//! median neighbour and compacting the resulting blocks; the final x is the alignment with the
//! smallest width, or the balanced median of all four.
//!
//! See Brandes and Köpf, "Fast and Simple Horizontal Coordinate Assignment". Compaction follows
//! a block graph with two longest-path passes instead of the paper's class-based scheme.

use crate::graph::{Graph, GraphOptions, NodeIx};
use crate::util::build_layer_matrix;
use crate::{Align, BorderType, LabelPos, LayoutGraph};
use rustc_hash::{FxHashMap, FxHashSet};

/// Unordered node pairs that must not be aligned with each other.
pub type Conflicts = FxHashSet<(NodeIx, NodeIx)>;

/// X coordinate per node.
pub type Xs = FxHashMap<NodeIx, f64>;

pub fn add_conflict(conflicts: &mut Conflicts, v: NodeIx, w: NodeIx) {
    conflicts.insert((v.min(w), v.max(w)));
}

pub fn has_conflict(conflicts: &Conflicts, v: NodeIx, w: NodeIx) -> bool {
    conflicts.contains(&(v.min(w), v.max(w)))
}

fn is_dummy(g: &LayoutGraph, v: NodeIx) -> bool {
    g[v].is_dummy()
}

fn order_of(g: &LayoutGraph, v: NodeIx) -> usize {
    g[v].order.unwrap_or(0)
}

/// Type-1 conflicts: a non-inner segment crossing an inner segment (an edge between two dummies).
/// The inner segment wins.
pub fn find_type1_conflicts(g: &LayoutGraph, layering: &[Vec<NodeIx>]) -> Conflicts {
    let mut conflicts = Conflicts::default();
    for pair in layering.windows(2) {
        let (prev_layer, layer) = (&pair[0], &pair[1]);
        let mut k0 = 0;
        let mut scan_pos = 0;
        let last = layer.len().saturating_sub(1);

        for (i, &v) in layer.iter().enumerate() {
            let w = other_inner_segment_node(g, v);
            let k1 = w.map_or(prev_layer.len(), |w| order_of(g, w));
            if w.is_none() && i != last {
                continue;
            }
            for &scan_node in &layer[scan_pos..=i] {
                for u in g.predecessors(scan_node) {
                    let u_pos = order_of(g, u);
                    if (u_pos < k0 || k1 < u_pos) && !(is_dummy(g, u) && is_dummy(g, scan_node)) {
                        add_conflict(&mut conflicts, u, scan_node);
                    }
                }
            }
            scan_pos = i + 1;
            k0 = k1;
        }
    }
    conflicts
}

/// Type-2 conflicts: two inner segments crossing, where one of them belongs to a subgraph border.
pub fn find_type2_conflicts(g: &LayoutGraph, layering: &[Vec<NodeIx>]) -> Conflicts {
    let mut conflicts = Conflicts::default();
    for pair in layering.windows(2) {
        let (north, south) = (&pair[0], &pair[1]);
        let mut prev_north_pos: Option<usize> = None;
        let mut next_north_pos: Option<usize> = None;
        let mut south_pos = 0;

        for (lookahead, &v) in south.iter().enumerate() {
            if !g[v].is_border() {
                continue;
            }
            let Some(&u) = g.predecessors(v).first() else {
                continue;
            };
            next_north_pos = Some(order_of(g, u));
            let window = Window {
                prev: prev_north_pos,
                next: next_north_pos,
            };
            scan(g, &mut conflicts, &south[south_pos..lookahead], window);
            south_pos = lookahead;
            prev_north_pos = next_north_pos;
        }

        let window = Window {
            prev: next_north_pos,
            next: Some(north.len()),
        };
        scan(g, &mut conflicts, &south[south_pos..], window);
    }
    conflicts
}

/// Range of north positions an inner segment may come from without crossing a border.
#[derive(Clone, Copy)]
struct Window {
    prev: Option<usize>,
    next: Option<usize>,
}

impl Window {
    fn excludes(self, pos: usize) -> bool {
        self.prev.is_some_and(|p| pos < p) || self.next.is_some_and(|n| pos > n)
    }
}

fn scan(g: &LayoutGraph, conflicts: &mut Conflicts, south: &[NodeIx], window: Window) {
    for &v in south {
        if !is_dummy(g, v) {
            continue;
        }
        for u in g.predecessors(v) {
            if is_dummy(g, u) && window.excludes(order_of(g, u)) {
                add_conflict(conflicts, u, v);
            }
        }
    }
}

fn other_inner_segment_node(g: &LayoutGraph, v: NodeIx) -> Option<NodeIx> {
    if !is_dummy(g, v) {
        return None;
    }
    g.predecessors(v).into_iter().find(|&u| is_dummy(g, u))
}

/// Blocks of vertically aligned nodes. `align` links the members of a block in a cycle and
/// `root` names its topmost member.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub root: FxHashMap<NodeIx, NodeIx>,
    pub align: FxHashMap<NodeIx, NodeIx>,
}

/// Aligns every node with a median neighbour from the previous layer of `layering`, unless the
/// pair conflicts or the alignment would cross one already made in this layer.
pub fn vertical_alignment(
    layering: &[Vec<NodeIx>],
    conflicts: &Conflicts,
    neighbors: impl Fn(NodeIx) -> Vec<NodeIx>,
) -> Alignment {
    let mut root: FxHashMap<NodeIx, NodeIx> = FxHashMap::default();
    let mut align: FxHashMap<NodeIx, NodeIx> = FxHashMap::default();
    let mut pos: FxHashMap<NodeIx, usize> = FxHashMap::default();
    for layer in layering {
        for (order, &v) in layer.iter().enumerate() {
            root.insert(v, v);
            align.insert(v, v);
            pos.insert(v, order);
        }
    }

    for layer in layering {
        let mut prev_idx: Option<usize> = None;
        for &v in layer {
            let mut ws: Vec<(usize, NodeIx)> = neighbors(v)
                .into_iter()
                .filter_map(|w| pos.get(&w).map(|&p| (p, w)))
                .collect();
            if ws.is_empty() {
                continue;
            }
            ws.sort_by_key(|&(p, _)| p);
            let mid = ws.len() - 1;
            for &(w_pos, w) in &ws[mid / 2..=mid.div_ceil(2)] {
                if align.get(&v) == Some(&v)
                    && prev_idx.is_none_or(|p| p < w_pos)
                    && !has_conflict(conflicts, v, w)
                {
                    let w_root = root.get(&w).copied().unwrap_or(w);
                    align.insert(w, v);
                    align.insert(v, w_root);
                    root.insert(v, w_root);
                    prev_idx = Some(w_pos);
                }
            }
        }
    }
    Alignment { root, align }
}

/// Minimum distance between the centers of `v` and its left neighbour `w`.
fn sep(g: &LayoutGraph, v: NodeIx, w: NodeIx, reverse: bool) -> f64 {
    let (node_sep, edge_sep) = (g.graph().nodesep, g.graph().edgesep);
    let (vl, wl) = (&g[v], &g[w]);
    let label_delta = |delta: f64| if reverse { delta } else { -delta };

    let mut sum = vl.width / 2.0;
    match vl.labelpos() {
        Some(LabelPos::L) => sum += label_delta(-vl.width / 2.0),
        Some(LabelPos::R) => sum += label_delta(vl.width / 2.0),
        _ => {}
    }
    sum += if vl.is_dummy() { edge_sep } else { node_sep } / 2.0;
    sum += if wl.is_dummy() { edge_sep } else { node_sep } / 2.0;
    sum += wl.width / 2.0;
    match wl.labelpos() {
        Some(LabelPos::L) => sum += label_delta(wl.width / 2.0),
        Some(LabelPos::R) => sum += label_delta(-wl.width / 2.0),
        _ => {}
    }
    sum
}

type BlockGraph = Graph<(), f64, ()>;

/// One node per block root; an edge between the roots of horizontally adjacent nodes carries the
/// largest separation any such pair needs.
fn build_block_graph(
    g: &LayoutGraph,
    layering: &[Vec<NodeIx>],
    root: &FxHashMap<NodeIx, NodeIx>,
    reverse: bool,
) -> BlockGraph {
    let roots: FxHashSet<NodeIx> = root.values().copied().collect();
    let mut block: BlockGraph = g.filter_map(
        GraphOptions::default(),
        (),
        |v, _| roots.contains(&v).then_some(()),
        |_, _| None::<f64>,
    );
    let root_of = |v: NodeIx| root.get(&v).copied().unwrap_or(v);

    for layer in layering {
        for pair in layer.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            let (u_root, v_root) = (root_of(u), root_of(v));
            let needed = sep(g, v, u, reverse);
            let prev = block
                .edge_ix(u_root, v_root, None)
                .map_or(0.0, |e| block[e]);
            block.set_edge(u_root, v_root, None, needed.max(prev));
        }
    }
    block
}

/// Places every block as far left as its separations allow, then pulls blocks right to close
/// unused gaps. Returns the x of every node in `layering`.
pub fn horizontal_compaction(
    g: &LayoutGraph,
    layering: &[Vec<NodeIx>],
    alignment: &Alignment,
    reverse: bool,
) -> Xs {
    let block = build_block_graph(g, layering, &alignment.root, reverse);
    let mut xs: Xs = Xs::default();
    let skip_border = if reverse {
        BorderType::Left
    } else {
        BorderType::Right
    };

    for v in topological(&block, |v| block.predecessors(v)) {
        let x = block
            .in_edges(v)
            .iter()
            .map(|&e| xs.get(&block.ends(e).0).copied().unwrap_or(0.0) + block[e])
            .fold(0.0, f64::max);
        xs.insert(v, x);
    }

    for v in topological(&block, |v| block.successors(v)) {
        let min = block
            .out_edges(v)
            .iter()
            .map(|&e| xs.get(&block.ends(e).1).copied().unwrap_or(0.0) - block[e])
            .fold(f64::INFINITY, f64::min);
        if min.is_finite() && g[v].border_type() != Some(skip_border) {
            let x = xs.entry(v).or_insert(0.0);
            *x = x.max(min);
        }
    }

    for (&v, r) in &alignment.root {
        let x = xs.get(r).copied().unwrap_or(0.0);
        xs.insert(v, x);
    }
    xs
}

/// Every block node, each one after all nodes `deps` returns for it.
fn topological(block: &BlockGraph, deps: impl Fn(NodeIx) -> Vec<NodeIx>) -> Vec<NodeIx> {
    let mut out: Vec<NodeIx> = Vec::with_capacity(block.node_count());
    let mut visited = vec![false; block.node_bound()];
    let mut done = vec![false; block.node_bound()];
    let mut stack: Vec<NodeIx> = block.nodes().collect();
    while let Some(v) = stack.pop() {
        if visited[v.index()] {
            if !done[v.index()] {
                done[v.index()] = true;
                out.push(v);
            }
            continue;
        }
        visited[v.index()] = true;
        stack.push(v);
        stack.extend(deps(v).into_iter().filter(|w| !visited[w.index()]));
    }
    out
}

/// The alignment whose nodes span the smallest horizontal extent; the first one on ties.
pub fn find_smallest_width_alignment(g: &LayoutGraph, xss: &[Xs; 4]) -> usize {
    let mut best = 0;
    let mut best_width = f64::INFINITY;
    for (i, xs) in xss.iter().enumerate() {
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for (&v, &x) in xs {
            let half = g[v].width / 2.0;
            max = max.max(x + half);
            min = min.min(x - half);
        }
        let width = max - min;
        if width < best_width {
            best_width = width;
            best = i;
        }
    }
    best
}

/// Shifts the left-biased alignments so their minimum matches `xss[align_to]`'s and the
/// right-biased ones so their maximum does.
pub fn align_coordinates(xss: &mut [Xs; 4], align_to: usize) {
    let bounds = |xs: &Xs| {
        xs.values().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        })
    };
    let (to_min, to_max) = bounds(&xss[align_to]);

    for (i, alignment) in ALIGNMENTS.iter().enumerate() {
        if i == align_to || xss[i].is_empty() {
            continue;
        }
        let (min, max) = bounds(&xss[i]);
        let delta = if matches!(alignment, Align::UL | Align::DL) {
            to_min - min
        } else {
            to_max - max
        };
        if delta != 0.0 && delta.is_finite() {
            for x in xss[i].values_mut() {
                *x += delta;
            }
        }
    }
}

/// Either the requested alignment, or the mean of the two median candidates per node.
pub fn balance(xss: &[Xs; 4], align: Option<Align>) -> Xs {
    xss[0]
        .keys()
        .map(|&v| {
            let x = match align {
                Some(a) => xss[alignment_index(a)].get(&v).copied().unwrap_or(0.0),
                None => {
                    let mut candidates: Vec<f64> =
                        xss.iter().map(|xs| xs.get(&v).copied().unwrap_or(0.0)).collect();
                    candidates.sort_by(f64::total_cmp);
                    (candidates[1] + candidates[2]) / 2.0
                }
            };
            (v, x)
        })
        .collect()
}

const ALIGNMENTS: [Align; 4] = [Align::UL, Align::UR, Align::DL, Align::DR];

fn alignment_index(align: Align) -> usize {
    match align {
        Align::UL => 0,
        Align::UR => 1,
        Align::DL => 2,
        Align::DR => 3,
    }
}

/// Horizontal coordinate of every ranked and ordered node.
pub fn position_x(g: &LayoutGraph) -> Xs {
    let layering = build_layer_matrix(g);
    let mut conflicts = find_type1_conflicts(g, &layering);
    conflicts.extend(find_type2_conflicts(g, &layering));

    let mut xss: [Xs; 4] = Default::default();
    for (i, alignment) in ALIGNMENTS.into_iter().enumerate() {
        let down = matches!(alignment, Align::DL | Align::DR);
        let right = matches!(alignment, Align::UR | Align::DR);

        let mut adjusted = layering.clone();
        if down {
            adjusted.reverse();
        }
        if right {
            for layer in &mut adjusted {
                layer.reverse();
            }
        }

        let aligned = if down {
            vertical_alignment(&adjusted, &conflicts, |v| g.successors(v))
        } else {
            vertical_alignment(&adjusted, &conflicts, |v| g.predecessors(v))
        };
        let mut xs = horizontal_compaction(g, &adjusted, &aligned, right);
        if right {
            for x in xs.values_mut() {
                *x = -*x;
            }
        }
        xss[i] = xs;
    }

    let smallest = find_smallest_width_alignment(g, &xss);
    align_coordinates(&mut xss, smallest);
    balance(&xss, g.graph().align)
}
