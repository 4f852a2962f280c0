use super::LayerGraph;
use crate::LayoutGraph;
use crate::graph::NodeIx;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarycenterEntry {
    pub v: NodeIx,
    /// `None` when `v` has no edges into the fixed rank.
    pub barycenter: Option<f64>,
    pub weight: f64,
}

/// Weighted mean order of each movable node's neighbours in the fixed rank.
pub fn barycenter(lg: &LayerGraph, g: &LayoutGraph, movable: &[NodeIx]) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .map(|&v| {
            let edges = lg.in_edges(v);
            if edges.is_empty() {
                return BarycenterEntry {
                    v,
                    barycenter: None,
                    weight: 0.0,
                };
            }
            let (sum, weight) = edges.iter().fold((0.0, 0.0), |(sum, weight), &(u, w)| {
                let order = g[u].order.unwrap_or(0) as f64;
                (sum + w * order, weight + w)
            });
            BarycenterEntry {
                v,
                barycenter: Some(sum / weight),
                weight,
            }
        })
        .collect()
}
