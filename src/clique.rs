//! Maximal clique enumeration (Bron–Kerbosch with pivoting).
//!
//! The search runs over a dense index space: adjacency becomes one bitset
//! per vertex, vertices are seeded in degeneracy order, and every frame owns
//! its candidate set `P` and excluded set `X`.
//!
//! Adjacency is taken symmetrically, `u ~ v` iff the host stores `u -> v` or
//! `v -> u`, so a directed host is enumerated as its underlying undirected
//! graph.

use fixedbitset::FixedBitSet;
use log::debug;

use crate::clique::bitset::{intersect, intersection_count, is_empty, BitsetAdjacency};
use crate::clique::degeneracy::{degeneracy_order, positions};
use crate::graph::{GraphView, Vertex};
use crate::index::IndexSpace;

pub(crate) mod bitset;
pub(crate) mod degeneracy;

/// A maximal clique, borrowed from the host graph.
pub type Clique<'g, L> = Vec<&'g Vertex<L>>;

/// Enumerate every maximal clique of `graph` exactly once.
///
/// The order of cliques, and of vertices inside a clique, is unspecified;
/// use [`normalize_cliques`] before comparing results. An isolated vertex is
/// reported as a clique of size one. An empty graph yields no clique.
pub fn maximal_cliques<G: GraphView>(graph: &G) -> Vec<Clique<'_, G::Label>> {
    maximal_cliques_with_min_size(graph, 1)
}

/// Same as [`maximal_cliques`], dropping cliques smaller than `min_size`.
pub fn maximal_cliques_with_min_size<G: GraphView>(
    graph: &G,
    min_size: usize,
) -> Vec<Clique<'_, G::Label>> {
    let space = IndexSpace::new(graph);
    if space.is_empty() {
        return vec![];
    }

    let adj = space.symmetric_adjacency(graph);
    let bits = BitsetAdjacency::from_adjacency(&adj);
    let order = degeneracy_order(&adj);
    let pos = positions(&order);

    let mut search = BronKerbosch {
        bits: &bits,
        cliques: Vec::new(),
    };
    for &v in &order {
        // P: neighbors later in the order, X: neighbors earlier.
        let mut p = bits.empty_set();
        let mut x = bits.empty_set();
        for &w in &adj[v] {
            if pos[w] > pos[v] {
                p.insert(w);
            } else {
                x.insert(w);
            }
        }
        let mut r = vec![v];
        search.expand(&mut r, p, x);
    }

    debug!(
        "Bron-Kerbosch: {} maximal cliques over {} vertices",
        search.cliques.len(),
        space.len()
    );

    search
        .cliques
        .into_iter()
        .filter(|clique| clique.len() >= min_size)
        .map(|clique| clique.into_iter().map(|idx| space.vertex(idx)).collect())
        .collect()
}

/// Sort every clique by label, then the clique list lexicographically.
pub fn normalize_cliques<L: Ord>(cliques: &mut [Clique<'_, L>]) {
    for clique in cliques.iter_mut() {
        clique.sort_by(|a, b| a.label().cmp(b.label()));
    }
    cliques.sort_by(|a, b| {
        a.iter()
            .map(|v| v.label())
            .cmp(b.iter().map(|v| v.label()))
    });
}

struct BronKerbosch<'a> {
    bits: &'a BitsetAdjacency,
    cliques: Vec<Vec<usize>>,
}

impl<'a> BronKerbosch<'a> {
    fn expand(&mut self, r: &mut Vec<usize>, mut p: FixedBitSet, mut x: FixedBitSet) {
        if is_empty(&p) && is_empty(&x) {
            self.cliques.push(r.clone());
            return;
        }

        let bits = self.bits;
        let candidates: Vec<usize> = match self.pivot(&p, &x) {
            Some(u) => p.difference(bits.row(u)).collect(),
            None => p.ones().collect(),
        };

        for v in candidates {
            let neighbors = bits.row(v);
            r.push(v);
            self.expand(r, intersect(&p, neighbors), intersect(&x, neighbors));
            r.pop();

            p.set(v, false);
            x.insert(v);
        }
    }

    /// Vertex of `P ∪ X` with the most neighbors in `P`, first index wins ties.
    fn pivot(&self, p: &FixedBitSet, x: &FixedBitSet) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for u in p.union(x) {
            let count = intersection_count(p, self.bits.row(u));
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((u, count));
            }
        }
        best.map(|(u, _)| u)
    }
}
