use std::collections::HashMap;
use std::hash::Hash;

use crate::graph::{GraphView, Vertex};

/// Dense index space over the vertices of one algorithm call.
///
/// Indices follow the host's vertex enumeration order. The table is rebuilt
/// for every call and never outlives the borrow of the host graph.
pub struct IndexSpace<'g, L> {
    vertices: Vec<&'g Vertex<L>>,
    index_of: HashMap<L, usize>,
}

impl<'g, L: Clone + Ord + Hash> IndexSpace<'g, L> {
    pub fn new<G>(graph: &'g G) -> Self
    where
        G: GraphView<Label = L>,
    {
        let vertices = graph.vertices();
        let index_of = vertices
            .iter()
            .enumerate()
            .map(|(idx, vertex)| (vertex.label().clone(), idx))
            .collect();
        IndexSpace { vertices, index_of }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn index(&self, label: &L) -> Option<usize> {
        self.index_of.get(label).copied()
    }

    pub fn vertex(&self, idx: usize) -> &'g Vertex<L> {
        self.vertices[idx]
    }

    pub fn label(&self, idx: usize) -> &'g L {
        self.vertices[idx].label()
    }

    pub fn vertices(&self) -> &[&'g Vertex<L>] {
        &self.vertices
    }

    /// Neighbor lists of the symmetric closure: `u ~ v` iff the host stores
    /// `u -> v` or `v -> u`. Self-loops are dropped, lists are sorted.
    pub fn symmetric_adjacency<G>(&self, graph: &G) -> Vec<Vec<usize>>
    where
        G: GraphView<Label = L>,
    {
        let mut adj = vec![Vec::new(); self.len()];
        for edge in graph.edges() {
            if let (Some(u), Some(v)) = (self.index(edge.source()), self.index(edge.destination())) {
                if u != v {
                    adj[u].push(v);
                    adj[v].push(u);
                }
            }
        }
        for neighbors in adj.iter_mut() {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        adj
    }
}
