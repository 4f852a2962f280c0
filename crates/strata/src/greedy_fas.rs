//! Greedy feedback arc set selection (Eades, Lin and Smyth), adapted for weighted multigraphs.
//!
//! Parallel edges are folded into one weighted edge while the heuristic runs and expanded back
//! into the original edges in the result.

use crate::graph::{EdgeIx, Graph, GraphOptions, NodeIx};

const NIL: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Entry {
    in_w: i64,
    out_w: i64,
    prev: usize,
    next: usize,
    bucket: usize,
}

/// Doubly linked bucket lists threaded through the entry table.
///
/// Entries are enqueued at the front and dequeued from the back, and an entry sits in at most
/// one bucket at a time.
struct Buckets {
    entries: Vec<Entry>,
    heads: Vec<usize>,
    tails: Vec<usize>,
    zero: i64,
}

impl Buckets {
    fn len(&self) -> usize {
        self.heads.len()
    }

    fn unlink(&mut self, i: usize) {
        let Entry {
            prev, next, bucket, ..
        } = self.entries[i];
        if bucket == NIL {
            return;
        }
        match prev {
            NIL => self.heads[bucket] = next,
            p => self.entries[p].next = next,
        }
        match next {
            NIL => self.tails[bucket] = prev,
            n => self.entries[n].prev = prev,
        }
        let e = &mut self.entries[i];
        e.prev = NIL;
        e.next = NIL;
        e.bucket = NIL;
    }

    fn enqueue(&mut self, bucket: usize, i: usize) {
        self.unlink(i);
        let head = self.heads[bucket];
        self.entries[i].next = head;
        self.entries[i].bucket = bucket;
        match head {
            NIL => self.tails[bucket] = i,
            h => self.entries[h].prev = i,
        }
        self.heads[bucket] = i;
    }

    fn dequeue(&mut self, bucket: usize) -> Option<usize> {
        let tail = self.tails[bucket];
        if tail == NIL {
            return None;
        }
        self.unlink(tail);
        Some(tail)
    }

    fn assign(&mut self, i: usize) {
        let Entry { in_w, out_w, .. } = self.entries[i];
        let bucket = if out_w == 0 {
            0
        } else if in_w == 0 {
            self.len() - 1
        } else {
            usize::try_from(out_w - in_w + self.zero)
                .unwrap_or(0)
                .min(self.len() - 1)
        };
        self.enqueue(bucket, i);
    }
}

pub fn greedy_fas<N, E, G>(g: &Graph<N, E, G>) -> Vec<EdgeIx> {
    greedy_fas_with_weight(g, |_| 1)
}

/// Returns edges of `g` whose removal leaves it acyclic, favoring light edges.
pub fn greedy_fas_with_weight<N, E, G>(
    g: &Graph<N, E, G>,
    weight_fn: impl Fn(&E) -> i64,
) -> Vec<EdgeIx> {
    if g.node_count() <= 1 {
        return Vec::new();
    }

    let mut fas: Graph<(), i64, ()> = g.filter_map(
        GraphOptions::default(),
        (),
        |_, _| Some(()),
        |_, _| None::<i64>,
    );
    let blank = Entry {
        in_w: 0,
        out_w: 0,
        prev: NIL,
        next: NIL,
        bucket: NIL,
    };
    let mut entries = vec![blank; g.node_bound()];
    let (mut max_in, mut max_out) = (0i64, 0i64);
    for e in g.edges() {
        let (v, w) = g.ends(e);
        let weight = weight_fn(&g[e]);
        let prev = fas.edge_ix(v, w, None).map_or(0, |f| fas[f]);
        fas.set_edge(v, w, None, prev + weight);

        entries[v.index()].out_w += weight;
        max_out = max_out.max(entries[v.index()].out_w);
        entries[w.index()].in_w += weight;
        max_in = max_in.max(entries[w.index()].in_w);
    }

    let bucket_count = usize::try_from(max_out + max_in + 3).unwrap_or(3);
    let mut buckets = Buckets {
        entries,
        heads: vec![NIL; bucket_count],
        tails: vec![NIL; bucket_count],
        zero: max_in + 1,
    };
    for v in fas.nodes() {
        buckets.assign(v.index());
    }

    let sources = bucket_count - 1;
    let mut removed: Vec<(NodeIx, NodeIx)> = Vec::new();
    while fas.node_count() > 0 {
        while let Some(i) = buckets.dequeue(0) {
            remove_node(&mut fas, &mut buckets, NodeIx::new(i), None);
        }
        while let Some(i) = buckets.dequeue(sources) {
            remove_node(&mut fas, &mut buckets, NodeIx::new(i), None);
        }
        if fas.node_count() == 0 {
            break;
        }
        let Some(i) = (1..sources).rev().find_map(|b| buckets.dequeue(b)) else {
            break;
        };
        remove_node(&mut fas, &mut buckets, NodeIx::new(i), Some(&mut removed));
    }

    removed
        .into_iter()
        .flat_map(|(v, w)| g.out_edges_to(v, w))
        .collect()
}

fn remove_node(
    fas: &mut Graph<(), i64, ()>,
    buckets: &mut Buckets,
    v: NodeIx,
    mut collect: Option<&mut Vec<(NodeIx, NodeIx)>>,
) {
    for &e in fas.in_edges(v) {
        let (u, _) = fas.ends(e);
        if let Some(out) = collect.as_deref_mut() {
            out.push((u, v));
        }
        buckets.entries[u.index()].out_w -= fas[e];
        buckets.assign(u.index());
    }
    for &e in fas.out_edges(v) {
        let (_, w) = fas.ends(e);
        buckets.entries[w.index()].in_w -= fas[e];
        buckets.assign(w.index());
    }
    fas.remove_node(v);
    buckets.unlink(v.index());
}
