use crate::LayoutGraph;
use crate::graph::NodeIx;
use rustc_hash::FxHashMap;

/// Weighted number of edge crossings between consecutive layers of `layering`.
pub fn cross_count(g: &LayoutGraph, layering: &[Vec<NodeIx>]) -> f64 {
    layering
        .windows(2)
        .map(|pair| two_layer_cross_count(g, &pair[0], &pair[1]))
        .sum()
}

/// Bilayer cross counting with an accumulator tree (Barth, Jünger and Mutzel, "Simple and
/// Efficient Bilayer Cross Counting").
fn two_layer_cross_count(g: &LayoutGraph, north: &[NodeIx], south: &[NodeIx]) -> f64 {
    if south.is_empty() {
        return 0.0;
    }
    let south_pos: FxHashMap<NodeIx, usize> =
        south.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    let mut entries: Vec<(usize, f64)> = Vec::new();
    for &v in north {
        let start = entries.len();
        for &e in g.out_edges(v) {
            let w = g.ends(e).1;
            let Some(&pos) = south_pos.get(&w) else {
                continue;
            };
            let weight = g[e].weight;
            entries.push((pos, if weight == 0.0 { 1.0 } else { weight }));
        }
        entries[start..].sort_by_key(|&(pos, _)| pos);
    }

    let mut first_index = south.len().next_power_of_two();
    let mut tree = vec![0.0; 2 * first_index - 1];
    first_index -= 1;

    let mut cc = 0.0;
    for (pos, weight) in entries {
        let mut index = pos + first_index;
        tree[index] += weight;
        let mut weight_sum = 0.0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += weight;
        }
        cc += weight * weight_sum;
    }
    cc
}
