use std::collections::{HashSet, VecDeque};

use itertools::Itertools;
use log::{debug, trace};

use crate::error::{PartitionError, Result};
use crate::flow::FlowNetwork;
use crate::graph::{GraphView, Vertex};
use crate::index::IndexSpace;
use crate::kcut::{build_result, validate_k, DisjointSet, KCutResult};

/// One edge of a Gomory–Hu tree: `weight` is the minimum cut between its
/// endpoints in the original graph.
#[derive(Debug, Clone)]
pub struct TreeEdge<'g, L> {
    pub u: &'g Vertex<L>,
    pub v: &'g Vertex<L>,
    pub weight: f64,
}

/// Cut-equivalent tree over all vertices of a graph: `n - 1` edges, and for
/// any pair the minimum edge weight on the tree path equals their minimum cut.
pub struct GomoryHuTree<'g, L> {
    space: IndexSpace<'g, L>,
    edges: Vec<(usize, usize, f64)>,
}

impl<'g, L: Clone + Ord + std::hash::Hash> GomoryHuTree<'g, L> {
    pub fn edges(&self) -> Vec<TreeEdge<'g, L>> {
        self.edges
            .iter()
            .map(|&(u, v, weight)| TreeEdge {
                u: self.space.vertex(u),
                v: self.space.vertex(v),
                weight,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Minimum edge weight on the tree path between `a` and `b`, i.e. their
    /// minimum cut. `None` if either label is unknown or `a == b`.
    pub fn min_cut_between(&self, a: &L, b: &L) -> Option<f64> {
        let (s, t) = (self.space.index(a)?, self.space.index(b)?);
        if s == t {
            return None;
        }
        let n = self.space.len();
        let mut adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for &(u, v, weight) in &self.edges {
            adj[u].push((v, weight));
            adj[v].push((u, weight));
        }

        // Bottleneck along the unique tree path.
        let mut bottleneck = vec![None; n];
        let mut queue = VecDeque::new();
        bottleneck[s] = Some(f64::INFINITY);
        queue.push_back(s);
        while let Some(u) = queue.pop_front() {
            let through = bottleneck[u]?;
            for &(v, weight) in &adj[u] {
                if bottleneck[v].is_none() {
                    bottleneck[v] = Some(through.min(weight));
                    queue.push_back(v);
                }
            }
        }
        bottleneck[t]
    }
}

/// Build a Gomory–Hu tree with Gusfield's method: `n - 1` max-flow runs, each
/// on a residual network rebuilt from the original capacities.
pub fn gomory_hu_tree<G: GraphView>(graph: &G) -> Result<GomoryHuTree<'_, G::Label>> {
    if graph.order() == 0 {
        return Err(PartitionError::EmptyGraph);
    }
    let space = IndexSpace::new(graph);
    let n = space.len();
    let capacities = FlowNetwork::from_graph(graph, &space);

    let mut parent = vec![0usize; n];
    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    for i in 1..n {
        let t = parent[i];
        // Residual state must not leak across pairs.
        let mut network = capacities.clone();
        let value = network.max_flow(i, t);
        let reachable = network.reachable_from(i);
        trace!("Gomory-Hu: cut({}, {}) = {}", i, t, value);
        edges.push((i, t, value));

        for j in (i + 1)..n {
            if reachable[j] && parent[j] == t {
                parent[j] = i;
            }
        }
    }
    debug!("Gomory-Hu tree built: {} vertices, {} tree edges", n, edges.len());
    Ok(GomoryHuTree { space, edges })
}

/// k-cut from a Gomory–Hu tree: drop the `k - 1` lightest tree edges and take
/// the remaining tree components as supernodes.
///
/// Exact for `k = 2` (the lightest tree edge is a global minimum cut). For
/// larger `k` this is a heuristic and makes no optimality claim.
pub fn k_cut_exact<G: GraphView>(graph: &G, k: usize) -> Result<KCutResult<'_, G::Label>> {
    if graph.order() == 0 {
        return Err(PartitionError::EmptyGraph);
    }
    validate_k(graph.order(), k)?;

    let tree = gomory_hu_tree(graph)?;
    let removed: HashSet<usize> = tree
        .edges
        .iter()
        .enumerate()
        .sorted_by(|a, b| a.1 .2.total_cmp(&b.1 .2))
        .take(k - 1)
        .map(|(pos, _)| pos)
        .collect();

    let n = tree.space.len();
    let mut components = DisjointSet::new(n);
    for (pos, &(u, v, _)) in tree.edges.iter().enumerate() {
        if !removed.contains(&pos) {
            components.union(u, v);
        }
    }
    let group_of: Vec<usize> = (0..n).map(|idx| components.find(idx)).collect();

    let result = build_result(graph, &tree.space, &group_of, k, true);
    debug!(
        "Gomory-Hu {}-cut: {} supernodes, {} cut edges",
        k,
        result.supernodes.len(),
        result.cut_edges.len()
    );
    Ok(result)
}
