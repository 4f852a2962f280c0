use super::{
    BarycenterEntry, ConstraintGraph, LayerGraph, ResolvedEntry, SortResult, barycenter,
    resolve_conflicts, sort,
};
use crate::LayoutGraph;
use crate::graph::NodeIx;
use rustc_hash::FxHashMap;

/// Orders the children of `v` (`None` for the whole layer), nested subgraphs first.
///
/// A subgraph's contents are kept contiguous and framed by its left and right border nodes.
pub fn sort_subgraph(
    lg: &LayerGraph,
    g: &LayoutGraph,
    v: Option<NodeIx>,
    cg: &ConstraintGraph,
    bias_right: bool,
) -> SortResult {
    let mut results: FxHashMap<NodeIx, SortResult> = FxHashMap::default();
    for sg in nested_subgraphs(lg, v) {
        let result = sort_one(lg, g, Some(sg), cg, bias_right, &mut results);
        results.insert(sg, result);
    }
    sort_one(lg, g, v, cg, bias_right, &mut results)
}

/// Subgraphs below `v` in the layer, children before parents.
fn nested_subgraphs(lg: &LayerGraph, v: Option<NodeIx>) -> Vec<NodeIx> {
    let mut out: Vec<NodeIx> = Vec::new();
    let mut stack: Vec<(NodeIx, usize)> = lg
        .children(v)
        .iter()
        .rev()
        .filter(|&&c| !lg.children(Some(c)).is_empty())
        .map(|&c| (c, 0))
        .collect();
    while let Some((sg, i)) = stack.last_mut() {
        let sg = *sg;
        match lg.children(Some(sg)).get(*i) {
            Some(&c) => {
                *i += 1;
                if !lg.children(Some(c)).is_empty() {
                    stack.push((c, 0));
                }
            }
            None => {
                out.push(sg);
                stack.pop();
            }
        }
    }
    out
}

fn sort_one(
    lg: &LayerGraph,
    g: &LayoutGraph,
    v: Option<NodeIx>,
    cg: &ConstraintGraph,
    bias_right: bool,
    results: &mut FxHashMap<NodeIx, SortResult>,
) -> SortResult {
    let borders = lg.borders(v);
    let movable: Vec<NodeIx> = lg
        .children(v)
        .iter()
        .copied()
        .filter(|&w| borders.is_none_or(|(bl, br)| w != bl && w != br))
        .collect();

    let mut entries = barycenter(lg, g, &movable);
    for entry in &mut entries {
        if let Some(sub) = results.get(&entry.v) {
            if let Some(bc) = sub.barycenter {
                merge_barycenters(entry, bc, sub.weight);
            }
        }
    }

    let mut resolved = resolve_conflicts(&entries, cg);
    expand_subgraphs(&mut resolved, results);
    let mut result = sort(resolved, bias_right);

    if let Some((bl, br)) = borders {
        let mut vs = Vec::with_capacity(result.vs.len() + 2);
        vs.push(bl);
        vs.append(&mut result.vs);
        vs.push(br);
        result.vs = vs;

        if let Some(bl_pred) = lg.first_predecessor(bl) {
            let order = |u: NodeIx| g[u].order.unwrap_or(0) as f64;
            let br_order = lg.first_predecessor(br).map_or(0.0, order);
            let (bc, weight) = match result.barycenter {
                Some(bc) => (bc, result.weight),
                None => (0.0, 0.0),
            };
            result.barycenter = Some((bc * weight + order(bl_pred) + br_order) / (weight + 2.0));
            result.weight = weight + 2.0;
        }
    }
    result
}

fn merge_barycenters(target: &mut BarycenterEntry, bc: f64, weight: f64) {
    match target.barycenter {
        Some(own) => {
            target.barycenter =
                Some((own * target.weight + bc * weight) / (target.weight + weight));
            target.weight += weight;
        }
        None => {
            target.barycenter = Some(bc);
            target.weight = weight;
        }
    }
}

fn expand_subgraphs(entries: &mut [ResolvedEntry], results: &mut FxHashMap<NodeIx, SortResult>) {
    for entry in entries {
        let mut expanded = Vec::with_capacity(entry.vs.len());
        for &v in &entry.vs {
            match results.remove(&v) {
                Some(sub) => expanded.extend(sub.vs),
                None => expanded.push(v),
            }
        }
        entry.vs = expanded;
    }
}
