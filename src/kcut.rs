//! Minimum k-way cuts.
//!
//! Two producers share one result shape:
//! - [`k_cut_exact`] cuts the k-1 lightest edges of a Gomory–Hu tree. This is
//!   exact for k = 2 and a heuristic for larger k.
//! - [`k_cut_approx`] runs one randomized contraction trial. Repeating trials
//!   and keeping the lightest cut is left to the caller.

use std::collections::{HashMap, HashSet};

use crate::error::{PartitionError, Result};
use crate::graph::{Edge, GraphView, Vertex};
use crate::index::IndexSpace;

pub mod contraction;
pub mod gomory_hu;

pub use contraction::k_cut_approx;
pub use gomory_hu::{gomory_hu_tree, k_cut_exact, GomoryHuTree, TreeEdge};

/// Supernodes partitioning the vertex set, plus the original edges crossing
/// between different supernodes (each unordered endpoint pair once).
#[derive(Debug, Clone)]
pub struct KCutResult<'g, L> {
    pub supernodes: Vec<Vec<&'g Vertex<L>>>,
    pub cut_edges: Vec<&'g Edge<L>>,
    k: usize,
}

impl<'g, L: Clone + Ord> KCutResult<'g, L> {
    /// The requested number of supernodes.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Whether exactly `k` supernodes were produced. Contraction on a graph
    /// with more than `k` connected components stops short of the target.
    pub fn reached_target(&self) -> bool {
        self.supernodes.len() == self.k
    }

    /// Total weight of the cut edges.
    pub fn cut_weight(&self) -> f64 {
        self.cut_edges.iter().map(|e| e.weight()).sum()
    }

    /// Index of the supernode holding `label`.
    pub fn supernode_of(&self, label: &L) -> Option<usize> {
        self.supernodes
            .iter()
            .position(|group| group.iter().any(|v| v.label() == label))
    }
}

/// Reject k outside `2..=order`.
pub(crate) fn validate_k(order: usize, k: usize) -> Result<()> {
    if k < 2 || k > order {
        return Err(PartitionError::InvalidArgument { k, order });
    }
    Ok(())
}

/// Turn a vertex -> group assignment into supernodes, groups numbered in
/// first-seen order.
pub(crate) fn build_result<'g, G: GraphView>(
    graph: &'g G,
    space: &IndexSpace<'g, G::Label>,
    group_of: &[usize],
    k: usize,
    collect_cut: bool,
) -> KCutResult<'g, G::Label> {
    let mut renumber: HashMap<usize, usize> = HashMap::new();
    let mut supernodes: Vec<Vec<&'g Vertex<G::Label>>> = Vec::new();
    let mut dense = vec![0usize; group_of.len()];
    for (idx, &group) in group_of.iter().enumerate() {
        let id = *renumber.entry(group).or_insert_with(|| {
            supernodes.push(Vec::new());
            supernodes.len() - 1
        });
        supernodes[id].push(space.vertex(idx));
        dense[idx] = id;
    }

    let cut_edges = if collect_cut {
        crossing_edges(graph, space, &dense)
    } else {
        vec![]
    };
    KCutResult { supernodes, cut_edges, k }
}

/// Original edges whose endpoints sit in different groups. An undirected
/// edge and its mirror share one unordered key and are reported once.
pub(crate) fn crossing_edges<'g, G: GraphView>(
    graph: &'g G,
    space: &IndexSpace<'g, G::Label>,
    group_of: &[usize],
) -> Vec<&'g Edge<G::Label>> {
    let mut seen = HashSet::new();
    let mut cut = Vec::new();
    for edge in graph.edges() {
        let (u, v) = match (space.index(edge.source()), space.index(edge.destination())) {
            (Some(u), Some(v)) => (u, v),
            _ => continue,
        };
        if group_of[u] != group_of[v] && seen.insert(edge.unordered_key()) {
            cut.push(edge);
        }
    }
    cut
}

/// Union-find with path compression and union by rank.
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub(crate) fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub(crate) fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Compress the path.
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    pub(crate) fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

#[cfg(test)]
mod test_kcut {
    use crate::error::PartitionError;
    use crate::graph::{Graph, GraphProperties};
    use crate::index::IndexSpace;
    use crate::kcut::{build_result, validate_k, DisjointSet};

    #[test]
    fn test_validate_k() {
        assert!(validate_k(4, 2).is_ok());
        assert!(validate_k(4, 4).is_ok());
        assert_eq!(validate_k(4, 1), Err(PartitionError::InvalidArgument { k: 1, order: 4 }));
        assert_eq!(validate_k(4, 5), Err(PartitionError::InvalidArgument { k: 5, order: 4 }));
    }

    #[test]
    fn test_disjoint_set() {
        let mut ds = DisjointSet::new(5);
        ds.union(0, 1);
        ds.union(3, 4);
        ds.union(1, 4);
        assert_eq!(ds.find(0), ds.find(3));
        assert_ne!(ds.find(0), ds.find(2));
    }

    #[test]
    fn test_build_result_dedupes_mirrors() {
        let g = Graph::from_edges(
            GraphProperties::undirected(),
            vec![("a", "b"), ("b", "c"), ("c", "d")],
        );
        let space = IndexSpace::new(&g);
        // Indices follow label order: {a, b} | {c, d}.
        assert_eq!(space.index(&"c"), Some(2));
        let groups = vec![7, 7, 3, 3];
        let res = build_result(&g, &space, &groups, 2, true);
        assert!(res.reached_target());
        assert_eq!(res.supernodes.len(), 2);
        assert_eq!(res.cut_edges.len(), 1);
        assert_eq!(res.cut_edges[0].unordered_key(), ("b", "c"));
        assert_eq!(res.supernode_of(&"a"), res.supernode_of(&"b"));
        assert_eq!(res.cut_weight(), 1.0);
    }
}
