use strata::graph::NodeIx;
use strata::order::{ResolvedEntry, sort};

fn n(i: usize) -> NodeIx {
    NodeIx::new(i)
}

fn entry(vs: &[usize], i: usize, barycenter: Option<f64>, weight: f64) -> ResolvedEntry {
    ResolvedEntry {
        vs: vs.iter().copied().map(n).collect(),
        i,
        barycenter,
        weight,
    }
}

fn ids(vs: &[NodeIx]) -> Vec<usize> {
    vs.iter().map(|v| v.index()).collect()
}

#[test]
fn sorts_nodes_by_barycenter() {
    let result = sort(
        vec![entry(&[0], 0, Some(2.0), 3.0), entry(&[1], 1, Some(1.0), 2.0)],
        false,
    );
    assert_eq!(ids(&result.vs), vec![1, 0]);
    assert_eq!(result.barycenter, Some((2.0 * 3.0 + 1.0 * 2.0) / (3.0 + 2.0)));
    assert_eq!(result.weight, 5.0);
}

#[test]
fn sorts_merged_entries_as_a_unit() {
    let result = sort(
        vec![
            entry(&[0, 2, 3], 0, Some(2.0), 3.0),
            entry(&[1], 1, Some(1.0), 2.0),
        ],
        false,
    );
    assert_eq!(ids(&result.vs), vec![1, 0, 2, 3]);
}

#[test]
fn ties_go_left_unless_biased_right() {
    let entries = vec![entry(&[0], 0, Some(1.0), 1.0), entry(&[1], 1, Some(1.0), 1.0)];

    let left = sort(entries.clone(), false);
    assert_eq!(ids(&left.vs), vec![0, 1]);
    assert_eq!((left.barycenter, left.weight), (Some(1.0), 2.0));

    let right = sort(entries, true);
    assert_eq!(ids(&right.vs), vec![1, 0]);
}

#[test]
fn entries_without_barycenter_keep_their_slot() {
    let result = sort(
        vec![
            entry(&[0], 0, Some(2.0), 1.0),
            entry(&[1], 1, Some(6.0), 1.0),
            entry(&[2], 2, None, 0.0),
            entry(&[3], 3, Some(3.0), 1.0),
        ],
        false,
    );
    assert_eq!(ids(&result.vs), vec![0, 3, 2, 1]);
    assert_eq!(result.barycenter, Some((2.0 + 6.0 + 3.0) / 3.0));
    assert_eq!(result.weight, 3.0);
}

#[test]
fn handles_no_barycenters_at_all() {
    let result = sort(
        vec![
            entry(&[0], 0, None, 0.0),
            entry(&[1], 3, None, 0.0),
            entry(&[2], 2, None, 0.0),
            entry(&[3], 1, None, 0.0),
        ],
        false,
    );
    assert_eq!(ids(&result.vs), vec![0, 3, 2, 1]);
    assert_eq!(result.barycenter, None);
    assert_eq!(result.weight, 0.0);
}

#[test]
fn a_zero_barycenter_is_still_sortable() {
    let result = sort(
        vec![
            entry(&[0], 0, Some(0.0), 1.0),
            entry(&[1], 3, None, 0.0),
            entry(&[2], 2, None, 0.0),
            entry(&[3], 1, None, 0.0),
        ],
        false,
    );
    assert_eq!(ids(&result.vs), vec![0, 3, 2, 1]);
    assert_eq!((result.barycenter, result.weight), (Some(0.0), 1.0));
}
