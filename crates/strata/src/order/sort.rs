use super::ResolvedEntry;
use crate::graph::NodeIx;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortResult {
    pub vs: Vec<NodeIx>,
    pub barycenter: Option<f64>,
    pub weight: f64,
}

/// Orders entries by barycenter; entries without one keep their original index.
///
/// Barycenter ties go to the smaller index, or the larger one when `bias_right` is set.
pub fn sort(entries: Vec<ResolvedEntry>, bias_right: bool) -> SortResult {
    let (mut sortable, mut unsortable): (Vec<_>, Vec<_>) =
        entries.into_iter().partition(|e| e.barycenter.is_some());
    unsortable.sort_by(|a, b| b.i.cmp(&a.i));
    sortable.sort_by(|a, b| {
        let by_bc = a
            .barycenter
            .partial_cmp(&b.barycenter)
            .unwrap_or(Ordering::Equal);
        by_bc.then_with(|| {
            if bias_right {
                b.i.cmp(&a.i)
            } else {
                a.i.cmp(&b.i)
            }
        })
    });

    let mut vs: Vec<NodeIx> = Vec::new();
    let mut sum = 0.0;
    let mut weight = 0.0;
    let mut index = consume_unsortable(&mut vs, &mut unsortable, 0);

    for entry in sortable {
        index += entry.vs.len();
        vs.extend(entry.vs);
        sum += entry.barycenter.unwrap_or(0.0) * entry.weight;
        weight += entry.weight;
        index = consume_unsortable(&mut vs, &mut unsortable, index);
    }

    if weight != 0.0 {
        SortResult {
            vs,
            barycenter: Some(sum / weight),
            weight,
        }
    } else {
        SortResult {
            vs,
            barycenter: None,
            weight: 0.0,
        }
    }
}

/// Emits unsortable entries (stored by descending index) whose slot has been reached.
fn consume_unsortable(
    vs: &mut Vec<NodeIx>,
    unsortable: &mut Vec<ResolvedEntry>,
    mut index: usize,
) -> usize {
    while unsortable.last().is_some_and(|last| last.i <= index) {
        if let Some(last) = unsortable.pop() {
            vs.extend(last.vs);
            index += 1;
        }
    }
    index
}
