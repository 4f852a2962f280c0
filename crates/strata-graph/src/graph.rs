//! The [`Graph`] container.

use crate::{EdgeIx, GraphOptions, NodeIx};
use hashbrown::HashMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::ops::{Index, IndexMut};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct NodeSlot<N> {
    id: String,
    label: N,
    parent: Option<NodeIx>,
    children: Vec<NodeIx>,
    out_edges: Vec<EdgeIx>,
    in_edges: Vec<EdgeIx>,
}

#[derive(Debug, Clone)]
struct EdgeSlot<E> {
    v: NodeIx,
    w: NodeIx,
    name: Option<String>,
    label: E,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EdgeKey {
    v: NodeIx,
    w: NodeIx,
    name: Option<String>,
}

/// Borrowed form of [`EdgeKey`] so lookups do not allocate.
#[derive(Clone, Copy, Hash)]
struct EdgeKeyRef<'a> {
    v: NodeIx,
    w: NodeIx,
    name: Option<&'a str>,
}

impl hashbrown::Equivalent<EdgeKey> for EdgeKeyRef<'_> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == self.v && key.w == self.w && key.name.as_deref() == self.name
    }
}

type LabelFactory<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// A directed or undirected, optionally multi-edge, optionally compound graph.
///
/// Removed nodes and edges leave tombstones behind; their indices are never handed out again.
/// Iteration always follows insertion order.
#[derive(Clone)]
pub struct Graph<N, E, G> {
    options: GraphOptions,
    label: G,
    default_node_label: LabelFactory<N>,
    default_edge_label: LabelFactory<E>,

    nodes: Vec<Option<NodeSlot<N>>>,
    node_count: usize,
    node_index: FxHashMap<String, NodeIx>,

    edges: Vec<Option<EdgeSlot<E>>>,
    edge_count: usize,
    edge_index: HashMap<EdgeKey, EdgeIx, FxBuildHasher>,
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            label: G::default(),
            default_node_label: Arc::new(N::default),
            default_edge_label: Arc::new(E::default),
            nodes: Vec::new(),
            node_count: 0,
            node_index: FxHashMap::default(),
            edges: Vec::new(),
            edge_count: 0,
            edge_index: HashMap::with_hasher(FxBuildHasher),
        }
    }
}

impl<N, E, G> Graph<N, E, G> {
    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn is_compound(&self) -> bool {
        self.options.compound
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.label
    }

    pub fn set_default_node_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> N + Send + Sync + 'static,
    {
        self.default_node_label = Arc::new(f);
        self
    }

    pub fn set_default_edge_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        self.default_edge_label = Arc::new(f);
        self
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Upper bound (exclusive) of every [`NodeIx::index`] ever handed out by this graph.
    pub fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    /// Upper bound (exclusive) of every [`EdgeIx::index`] ever handed out by this graph.
    pub fn edge_bound(&self) -> usize {
        self.edges.len()
    }

    // ---- nodes -------------------------------------------------------------------------------

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn contains_node(&self, v: NodeIx) -> bool {
        self.slot(v).is_some()
    }

    pub fn node_ix(&self, id: &str) -> Option<NodeIx> {
        self.node_index.get(id).copied()
    }

    /// The identifier `v` was created with. Empty for removed nodes.
    pub fn node_id(&self, v: NodeIx) -> &str {
        self.slot(v).map(|s| s.id.as_str()).unwrap_or_default()
    }

    /// Creates the node, or replaces its label when `id` already exists.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> NodeIx {
        let id = id.into();
        if let Some(v) = self.node_ix(&id) {
            if let Some(slot) = self.slot_mut(v) {
                slot.label = label;
            }
            return v;
        }
        let v = NodeIx::new(self.nodes.len());
        self.nodes.push(Some(NodeSlot {
            id: id.clone(),
            label,
            parent: None,
            children: Vec::new(),
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        }));
        self.node_index.insert(id, v);
        self.node_count += 1;
        v
    }

    /// Returns the node for `id`, creating it with the default label when missing.
    pub fn ensure_node(&mut self, id: &str) -> NodeIx {
        if let Some(v) = self.node_ix(id) {
            return v;
        }
        let label = (self.default_node_label)();
        self.set_node(id, label)
    }

    pub fn node(&self, v: NodeIx) -> Option<&N> {
        self.slot(v).map(|s| &s.label)
    }

    pub fn node_mut(&mut self, v: NodeIx) -> Option<&mut N> {
        self.slot_mut(v).map(|s| &mut s.label)
    }

    pub fn node_by_id(&self, id: &str) -> Option<&N> {
        self.node(self.node_ix(id)?)
    }

    pub fn node_by_id_mut(&mut self, id: &str) -> Option<&mut N> {
        let v = self.node_ix(id)?;
        self.node_mut(v)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeIx> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| NodeIx::new(i))
    }

    pub fn node_labels_mut(&mut self) -> impl Iterator<Item = &mut N> + '_ {
        self.nodes.iter_mut().flatten().map(|s| &mut s.label)
    }

    /// Removes `v` together with every incident edge. Its children are moved to the root.
    pub fn remove_node(&mut self, v: NodeIx) -> Option<N> {
        let slot = self.slot(v)?;
        let mut incident: Vec<EdgeIx> = slot.in_edges.clone();
        incident.extend(slot.out_edges.iter().copied());
        let children = slot.children.clone();
        for e in incident {
            self.remove_edge(e);
        }
        for c in children {
            if let Some(child) = self.slot_mut(c) {
                child.parent = None;
            }
        }
        self.detach_from_parent(v);

        let slot = self.nodes.get_mut(v.index())?.take()?;
        self.node_index.remove(&slot.id);
        self.node_count -= 1;
        Some(slot.label)
    }

    // ---- edges -------------------------------------------------------------------------------

    /// Creates the edge `v -> w` (named `name` in multigraphs), or replaces its label.
    pub fn set_edge(&mut self, v: NodeIx, w: NodeIx, name: Option<&str>, label: E) -> EdgeIx {
        let (v, w) = self.canonical_ends(v, w);
        let name = if self.options.multigraph { name } else { None };
        if let Some(e) = self.edge_index.get(&EdgeKeyRef { v, w, name }).copied() {
            if let Some(slot) = self.edges[e.index()].as_mut() {
                slot.label = label;
            }
            return e;
        }

        let e = EdgeIx::new(self.edges.len());
        let name = name.map(str::to_string);
        self.edges.push(Some(EdgeSlot {
            v,
            w,
            name: name.clone(),
            label,
        }));
        self.edge_index.insert(EdgeKey { v, w, name }, e);
        if let Some(slot) = self.slot_mut(v) {
            slot.out_edges.push(e);
        }
        if let Some(slot) = self.slot_mut(w) {
            slot.in_edges.push(e);
        }
        self.edge_count += 1;
        e
    }

    /// Identifier-based [`set_edge`](Self::set_edge); missing endpoints get default labels.
    pub fn set_edge_by_id(&mut self, v: &str, w: &str, name: Option<&str>, label: E) -> EdgeIx {
        let v = self.ensure_node(v);
        let w = self.ensure_node(w);
        self.set_edge(v, w, name, label)
    }

    /// Connects consecutive ids with default-labelled edges.
    pub fn set_path(&mut self, ids: &[&str]) -> &mut Self {
        for pair in ids.windows(2) {
            let label = (self.default_edge_label)();
            self.set_edge_by_id(pair[0], pair[1], None, label);
        }
        self
    }

    pub fn default_edge_label(&self) -> E {
        (self.default_edge_label)()
    }

    pub fn edge_ix(&self, v: NodeIx, w: NodeIx, name: Option<&str>) -> Option<EdgeIx> {
        let (v, w) = self.canonical_ends(v, w);
        let name = if self.options.multigraph { name } else { None };
        self.edge_index.get(&EdgeKeyRef { v, w, name }).copied()
    }

    pub fn edge_ix_by_id(&self, v: &str, w: &str, name: Option<&str>) -> Option<EdgeIx> {
        self.edge_ix(self.node_ix(v)?, self.node_ix(w)?, name)
    }

    pub fn has_edge(&self, v: NodeIx, w: NodeIx, name: Option<&str>) -> bool {
        self.edge_ix(v, w, name).is_some()
    }

    pub fn edge(&self, e: EdgeIx) -> Option<&E> {
        self.edge_slot(e).map(|s| &s.label)
    }

    pub fn edge_mut(&mut self, e: EdgeIx) -> Option<&mut E> {
        self.edges
            .get_mut(e.index())
            .and_then(Option::as_mut)
            .map(|s| &mut s.label)
    }

    pub fn edge_by_id(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        self.edge(self.edge_ix_by_id(v, w, name)?)
    }

    pub fn edge_by_id_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let e = self.edge_ix_by_id(v, w, name)?;
        self.edge_mut(e)
    }

    /// Tail and head of `e`.
    ///
    /// # Panics
    ///
    /// Panics when `e` was removed.
    pub fn ends(&self, e: EdgeIx) -> (NodeIx, NodeIx) {
        match self.edge_slot(e) {
            Some(slot) => (slot.v, slot.w),
            None => panic!("edge {e:?} is not in the graph"),
        }
    }

    pub fn edge_name(&self, e: EdgeIx) -> Option<&str> {
        self.edge_slot(e).and_then(|s| s.name.as_deref())
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeIx> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| EdgeIx::new(i))
    }

    pub fn edge_labels_mut(&mut self) -> impl Iterator<Item = &mut E> + '_ {
        self.edges.iter_mut().flatten().map(|s| &mut s.label)
    }

    pub fn remove_edge(&mut self, e: EdgeIx) -> Option<E> {
        let slot = self.edges.get_mut(e.index())?.take()?;
        self.edge_index.remove(&EdgeKeyRef {
            v: slot.v,
            w: slot.w,
            name: slot.name.as_deref(),
        });
        if let Some(v) = self.slot_mut(slot.v) {
            v.out_edges.retain(|&x| x != e);
        }
        if let Some(w) = self.slot_mut(slot.w) {
            w.in_edges.retain(|&x| x != e);
        }
        self.edge_count -= 1;
        Some(slot.label)
    }

    // ---- adjacency ---------------------------------------------------------------------------

    pub fn out_edges(&self, v: NodeIx) -> &[EdgeIx] {
        self.slot(v).map(|s| s.out_edges.as_slice()).unwrap_or(&[])
    }

    pub fn in_edges(&self, v: NodeIx) -> &[EdgeIx] {
        self.slot(v).map(|s| s.in_edges.as_slice()).unwrap_or(&[])
    }

    /// Every edge from `v` to `w` (all parallel edges in multigraphs).
    pub fn out_edges_to(&self, v: NodeIx, w: NodeIx) -> Vec<EdgeIx> {
        self.out_edges(v)
            .iter()
            .copied()
            .filter(|&e| self.ends(e).1 == w)
            .collect()
    }

    /// Every edge incident on `v`, in-edges first.
    pub fn node_edges(&self, v: NodeIx) -> Vec<EdgeIx> {
        let mut out = self.in_edges(v).to_vec();
        for &e in self.out_edges(v) {
            if !out.contains(&e) {
                out.push(e);
            }
        }
        out
    }

    /// Distinct heads of `v`'s out-edges. Undirected graphs report every neighbor.
    pub fn successors(&self, v: NodeIx) -> Vec<NodeIx> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        self.heads(v)
    }

    /// Distinct tails of `v`'s in-edges. Undirected graphs report every neighbor.
    pub fn predecessors(&self, v: NodeIx) -> Vec<NodeIx> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        self.tails(v)
    }

    /// Predecessors followed by successors, without duplicates.
    pub fn neighbors(&self, v: NodeIx) -> Vec<NodeIx> {
        let mut out = self.tails(v);
        for w in self.heads(v) {
            if !out.contains(&w) {
                out.push(w);
            }
        }
        out
    }

    pub fn first_successor(&self, v: NodeIx) -> Option<NodeIx> {
        self.out_edges(v).first().map(|&e| self.ends(e).1)
    }

    pub fn sources(&self) -> Vec<NodeIx> {
        self.nodes().filter(|&v| self.in_edges(v).is_empty()).collect()
    }

    pub fn sinks(&self) -> Vec<NodeIx> {
        self.nodes().filter(|&v| self.out_edges(v).is_empty()).collect()
    }

    // ---- hierarchy ---------------------------------------------------------------------------

    /// Moves `v` under `parent`.
    ///
    /// # Panics
    ///
    /// Panics for non-compound graphs and when the move would make the hierarchy cyclic.
    pub fn set_parent(&mut self, v: NodeIx, parent: NodeIx) -> &mut Self {
        assert!(
            self.options.compound,
            "cannot set a parent in a non-compound graph"
        );
        let mut ancestor = Some(parent);
        while let Some(a) = ancestor {
            assert!(a != v, "setting {parent:?} as parent of {v:?} would create a cycle");
            ancestor = self.parent(a);
        }
        self.detach_from_parent(v);
        if let Some(slot) = self.slot_mut(v) {
            slot.parent = Some(parent);
        }
        if let Some(slot) = self.slot_mut(parent) {
            slot.children.push(v);
        }
        self
    }

    /// Moves `v` back to the root of the hierarchy.
    pub fn clear_parent(&mut self, v: NodeIx) -> &mut Self {
        self.detach_from_parent(v);
        self
    }

    pub fn parent(&self, v: NodeIx) -> Option<NodeIx> {
        if !self.options.compound {
            return None;
        }
        self.slot(v).and_then(|s| s.parent)
    }

    pub fn children(&self, v: NodeIx) -> &[NodeIx] {
        if !self.options.compound {
            return &[];
        }
        self.slot(v).map(|s| s.children.as_slice()).unwrap_or(&[])
    }

    pub fn has_children(&self, v: NodeIx) -> bool {
        !self.children(v).is_empty()
    }

    /// Nodes without a parent, in insertion order.
    pub fn root_children(&self) -> Vec<NodeIx> {
        self.nodes().filter(|&v| self.parent(v).is_none()).collect()
    }

    // ---- derived graphs ----------------------------------------------------------------------

    /// Builds a graph over the same index space.
    ///
    /// Nodes (and edges) for which the closures return `None` become tombstones, so every kept
    /// node and edge keeps its index and results can be copied back without id lookups. Edges
    /// touching a dropped node are dropped. When `options` turns a multigraph into a simple
    /// graph, only the first of several parallel edges survives.
    pub fn filter_map<N2, E2, G2>(
        &self,
        options: GraphOptions,
        label: G2,
        mut node_fn: impl FnMut(NodeIx, &N) -> Option<N2>,
        mut edge_fn: impl FnMut(EdgeIx, &E) -> Option<E2>,
    ) -> Graph<N2, E2, G2>
    where
        N2: Default + 'static,
        E2: Default + 'static,
    {
        let mut out: Graph<N2, E2, G2> = Graph {
            options,
            label,
            default_node_label: Arc::new(N2::default),
            default_edge_label: Arc::new(E2::default),
            nodes: Vec::with_capacity(self.nodes.len()),
            node_count: 0,
            node_index: FxHashMap::default(),
            edges: Vec::with_capacity(self.edges.len()),
            edge_count: 0,
            edge_index: HashMap::with_hasher(FxBuildHasher),
        };

        for (i, slot) in self.nodes.iter().enumerate() {
            let mapped = slot.as_ref().and_then(|slot| {
                let label = node_fn(NodeIx::new(i), &slot.label)?;
                Some(NodeSlot {
                    id: slot.id.clone(),
                    label,
                    parent: None,
                    children: Vec::new(),
                    out_edges: Vec::new(),
                    in_edges: Vec::new(),
                })
            });
            if let Some(slot) = &mapped {
                out.node_index.insert(slot.id.clone(), NodeIx::new(i));
                out.node_count += 1;
            }
            out.nodes.push(mapped);
        }

        if options.compound && self.options.compound {
            for v in self.nodes() {
                let Some(parent) = self.parent(v) else {
                    continue;
                };
                if out.contains_node(v) && out.contains_node(parent) {
                    out.set_parent(v, parent);
                }
            }
        }

        for (i, slot) in self.edges.iter().enumerate() {
            let e = EdgeIx::new(i);
            let mapped = slot.as_ref().and_then(|slot| {
                if !out.contains_node(slot.v) || !out.contains_node(slot.w) {
                    return None;
                }
                let (v, w) = out.canonical_ends(slot.v, slot.w);
                let name = if options.multigraph {
                    slot.name.clone()
                } else {
                    None
                };
                let key = EdgeKeyRef {
                    v,
                    w,
                    name: name.as_deref(),
                };
                if out.edge_index.contains_key(&key) {
                    return None;
                }
                let label = edge_fn(e, &slot.label)?;
                Some(EdgeSlot { v, w, name, label })
            });
            if let Some(slot) = &mapped {
                out.edge_index.insert(
                    EdgeKey {
                        v: slot.v,
                        w: slot.w,
                        name: slot.name.clone(),
                    },
                    e,
                );
                if let Some(v) = out.slot_mut(slot.v) {
                    v.out_edges.push(e);
                }
                if let Some(w) = out.slot_mut(slot.w) {
                    w.in_edges.push(e);
                }
                out.edge_count += 1;
            }
            out.edges.push(mapped);
        }
        out
    }

    // ---- internals ---------------------------------------------------------------------------

    fn slot(&self, v: NodeIx) -> Option<&NodeSlot<N>> {
        self.nodes.get(v.index()).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, v: NodeIx) -> Option<&mut NodeSlot<N>> {
        self.nodes.get_mut(v.index()).and_then(Option::as_mut)
    }

    fn edge_slot(&self, e: EdgeIx) -> Option<&EdgeSlot<E>> {
        self.edges.get(e.index()).and_then(Option::as_ref)
    }

    fn heads(&self, v: NodeIx) -> Vec<NodeIx> {
        let mut out: Vec<NodeIx> = Vec::new();
        for &e in self.out_edges(v) {
            let w = self.ends(e).1;
            if !out.contains(&w) {
                out.push(w);
            }
        }
        out
    }

    fn tails(&self, v: NodeIx) -> Vec<NodeIx> {
        let mut out: Vec<NodeIx> = Vec::new();
        for &e in self.in_edges(v) {
            let u = self.ends(e).0;
            if !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }

    fn canonical_ends(&self, v: NodeIx, w: NodeIx) -> (NodeIx, NodeIx) {
        if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        }
    }

    fn detach_from_parent(&mut self, v: NodeIx) {
        let Some(parent) = self.slot(v).and_then(|s| s.parent) else {
            return;
        };
        if let Some(p) = self.slot_mut(parent) {
            p.children.retain(|&c| c != v);
        }
        if let Some(slot) = self.slot_mut(v) {
            slot.parent = None;
        }
    }
}

impl<N, E, G> Index<NodeIx> for Graph<N, E, G> {
    type Output = N;

    fn index(&self, v: NodeIx) -> &N {
        match self.slot(v) {
            Some(slot) => &slot.label,
            None => panic!("node {v:?} is not in the graph"),
        }
    }
}

impl<N, E, G> IndexMut<NodeIx> for Graph<N, E, G> {
    fn index_mut(&mut self, v: NodeIx) -> &mut N {
        match self.slot_mut(v) {
            Some(slot) => &mut slot.label,
            None => panic!("node {v:?} is not in the graph"),
        }
    }
}

impl<N, E, G> Index<EdgeIx> for Graph<N, E, G> {
    type Output = E;

    fn index(&self, e: EdgeIx) -> &E {
        match self.edge_slot(e) {
            Some(slot) => &slot.label,
            None => panic!("edge {e:?} is not in the graph"),
        }
    }
}

impl<N, E, G> IndexMut<EdgeIx> for Graph<N, E, G> {
    fn index_mut(&mut self, e: EdgeIx) -> &mut E {
        match self.edges.get_mut(e.index()).and_then(Option::as_mut) {
            Some(slot) => &mut slot.label,
            None => panic!("edge {e:?} is not in the graph"),
        }
    }
}

impl<N, E, G> std::fmt::Debug for Graph<N, E, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("options", &self.options)
            .field("nodes", &self.node_count)
            .field("edges", &self.edge_count)
            .finish()
    }
}
