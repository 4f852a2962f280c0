//! Moves every dummy of a long edge into the subgraph it passes through.
//!
//! The walk follows the hierarchy path from the edge's tail up to the lowest common ancestor of
//! both endpoints and back down to its head. Dummies stay in a subgraph while their rank is
//! inside it.

use crate::LayoutGraph;
use crate::graph::NodeIx;

#[derive(Debug, Clone, Copy, Default)]
struct LowLim {
    low: usize,
    lim: usize,
}

pub fn parent_dummy_chains(g: &mut LayoutGraph) {
    let numbers = postorder(g);
    let chains: Vec<(NodeIx, NodeIx, NodeIx)> = g
        .graph()
        .dummy_chains
        .iter()
        .map(|c| (c.head, c.v, c.w))
        .collect();

    for (head, v, w) in chains {
        let (path, lca) = find_path(g, &numbers, v, w);
        let mut path_idx = 0;
        let mut ascending = true;
        let mut cur = head;

        while cur != w {
            let rank = g[cur].rank.unwrap_or(0);
            let mut path_v = path.get(path_idx).copied().flatten();

            if ascending {
                while path_v != lca
                    && path_v
                        .and_then(|p| g[p].max_rank())
                        .is_some_and(|max| max < rank)
                {
                    path_idx += 1;
                    path_v = path.get(path_idx).copied().flatten();
                }
                if path_v == lca {
                    ascending = false;
                }
            }

            if !ascending {
                while path_idx + 1 < path.len()
                    && path[path_idx + 1]
                        .and_then(|p| g[p].min_rank())
                        .is_some_and(|min| min <= rank)
                {
                    path_idx += 1;
                }
                path_v = path.get(path_idx).copied().flatten();
            }

            match path_v {
                Some(parent) => g.set_parent(cur, parent),
                None => g.clear_parent(cur),
            };

            let Some(next) = g.first_successor(cur) else {
                break;
            };
            cur = next;
        }
    }
}

/// Hierarchy path from `v` up to the lowest common ancestor of `v` and `w`, then down to `w`'s
/// parent. `None` stands for the root of the hierarchy.
fn find_path(
    g: &LayoutGraph,
    numbers: &[LowLim],
    v: NodeIx,
    w: NodeIx,
) -> (Vec<Option<NodeIx>>, Option<NodeIx>) {
    let low = numbers[v.index()].low.min(numbers[w.index()].low);
    let lim = numbers[v.index()].lim.max(numbers[w.index()].lim);

    let mut path: Vec<Option<NodeIx>> = Vec::new();
    let mut cur = v;
    let lca = loop {
        let parent = g.parent(cur);
        path.push(parent);
        match parent {
            Some(p) if numbers[p.index()].low > low || lim > numbers[p.index()].lim => cur = p,
            _ => break parent,
        }
    };

    let mut down: Vec<Option<NodeIx>> = Vec::new();
    let mut cur = g.parent(w);
    while cur != lca {
        let Some(c) = cur else {
            break;
        };
        down.push(cur);
        cur = g.parent(c);
    }
    path.extend(down.into_iter().rev());
    (path, lca)
}

/// Postorder numbers of the hierarchy, children before their parent.
fn postorder(g: &LayoutGraph) -> Vec<LowLim> {
    let mut numbers = vec![LowLim::default(); g.node_bound()];
    let mut lim = 0;
    let mut stack: Vec<(NodeIx, usize, usize)> = Vec::new();
    for top in g.root_children() {
        stack.push((top, lim, 0));
        while let Some((v, low, i)) = stack.last_mut() {
            if let Some(&child) = g.children(*v).get(*i) {
                *i += 1;
                stack.push((child, lim, 0));
                continue;
            }
            numbers[v.index()] = LowLim { low: *low, lim };
            lim += 1;
            stack.pop();
        }
    }
    numbers
}
