//! Merges barycenter entries whose order would violate a subgraph constraint.
//!
//! Constraint edges `v -> w` say `v` must end up left of `w`. Entries are walked in topological
//! order of the constraint graph; when a predecessor would sort at or after its successor the two
//! are coalesced into one entry (Forster, "A Fast and Simple Heuristic for Constrained Two-Level
//! Crossing Reduction").

use super::{BarycenterEntry, ConstraintGraph};
use crate::graph::NodeIx;
use rustc_hash::FxHashMap;

/// A group of nodes that sorts as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    pub vs: Vec<NodeIx>,
    /// Smallest original index among the merged entries.
    pub i: usize,
    pub barycenter: Option<f64>,
    pub weight: f64,
}

struct Slot {
    indegree: usize,
    ins: Vec<usize>,
    outs: Vec<usize>,
    vs: Vec<NodeIx>,
    i: usize,
    barycenter: Option<f64>,
    weight: f64,
    merged: bool,
}

pub fn resolve_conflicts(entries: &[BarycenterEntry], cg: &ConstraintGraph) -> Vec<ResolvedEntry> {
    let mut slots: Vec<Slot> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| Slot {
            indegree: 0,
            ins: Vec::new(),
            outs: Vec::new(),
            vs: vec![e.v],
            i,
            barycenter: e.barycenter,
            weight: if e.barycenter.is_some() { e.weight } else { 0.0 },
            merged: false,
        })
        .collect();
    let by_node: FxHashMap<NodeIx, usize> =
        entries.iter().enumerate().map(|(i, e)| (e.v, i)).collect();

    for &(v, w) in cg.edges() {
        if let (Some(&sv), Some(&sw)) = (by_node.get(&v), by_node.get(&w)) {
            slots[sw].indegree += 1;
            slots[sv].outs.push(sw);
        }
    }

    let mut sources: Vec<usize> = (0..slots.len())
        .filter(|&i| slots[i].indegree == 0)
        .collect();
    let mut processed: Vec<usize> = Vec::with_capacity(slots.len());

    while let Some(v) = sources.pop() {
        processed.push(v);
        let ins = std::mem::take(&mut slots[v].ins);
        for &u in ins.iter().rev() {
            if slots[u].merged {
                continue;
            }
            let violates = match (slots[u].barycenter, slots[v].barycenter) {
                (Some(ub), Some(vb)) => ub >= vb,
                _ => true,
            };
            if violates {
                merge(&mut slots, v, u);
            }
        }
        slots[v].ins = ins;

        let outs = slots[v].outs.clone();
        for w in outs {
            slots[w].ins.push(v);
            slots[w].indegree -= 1;
            if slots[w].indegree == 0 {
                sources.push(w);
            }
        }
    }

    let kept: Vec<usize> = processed
        .into_iter()
        .filter(|&i| !slots[i].merged)
        .collect();
    kept.into_iter()
        .map(|i| {
            let slot = &mut slots[i];
            ResolvedEntry {
                vs: std::mem::take(&mut slot.vs),
                i: slot.i,
                barycenter: slot.barycenter,
                weight: if slot.barycenter.is_some() {
                    slot.weight
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// Folds `source` into `target`; the source's nodes go first.
fn merge(slots: &mut [Slot], target: usize, source: usize) {
    let mut sum = 0.0;
    let mut weight = 0.0;
    for s in [&slots[target], &slots[source]] {
        if let Some(bc) = s.barycenter.filter(|_| s.weight != 0.0) {
            sum += bc * s.weight;
            weight += s.weight;
        }
    }

    let mut vs = std::mem::take(&mut slots[source].vs);
    vs.append(&mut slots[target].vs);
    let i = slots[source].i.min(slots[target].i);
    slots[source].merged = true;

    let t = &mut slots[target];
    t.vs = vs;
    t.i = i;
    // All-zero weights have no defined mean.
    t.barycenter = (weight != 0.0).then(|| sum / weight);
    t.weight = weight;
}
