use std::collections::{HashMap, VecDeque};

use crate::graph::{Edge, GraphView};
use crate::index::IndexSpace;

/// Edge key over dense indices, smaller index first.
pub(crate) type PairKey = (usize, usize);

#[inline]
pub(crate) fn pair_key(u: usize, v: usize) -> PairKey {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

/// Brandes edge betweenness over an undirected neighbor list.
///
/// Every vertex serves as a BFS source; dependencies are pushed back along
/// predecessor lists in reverse visiting order. Each path is seen from both
/// of its endpoints, so the totals are halved at the end.
pub(crate) fn brandes(adj: &[Vec<usize>]) -> HashMap<PairKey, f64> {
    let n = adj.len();
    let mut scores: HashMap<PairKey, f64> = HashMap::new();

    let mut dist = vec![usize::MAX; n];
    let mut sigma = vec![0f64; n];
    let mut delta = vec![0f64; n];
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut stack = Vec::with_capacity(n);
    let mut queue = VecDeque::new();

    for s in 0..n {
        dist.fill(usize::MAX);
        sigma.fill(0.0);
        delta.fill(0.0);
        preds.iter_mut().for_each(Vec::clear);
        dist[s] = 0;
        sigma[s] = 1.0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in &adj[v] {
                if dist[w] == usize::MAX {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                let share = sigma[v] / sigma[w] * (1.0 + delta[w]);
                *scores.entry(pair_key(v, w)).or_insert(0.0) += share;
                delta[v] += share;
            }
        }
    }

    for score in scores.values_mut() {
        *score /= 2.0;
    }
    scores
}

/// Edge betweenness centrality of every logical edge of `graph`.
///
/// Paths are counted on the underlying undirected graph. Each edge appears
/// once, represented by one of its stored records; edges no shortest path
/// crosses (self-loops) are left out. Scores are raw path counts, not
/// normalized by the number of pairs.
pub fn edge_betweenness<G: GraphView>(graph: &G) -> Vec<(&Edge<G::Label>, f64)> {
    let space = IndexSpace::new(graph);
    let adj = space.symmetric_adjacency(graph);
    let scores = brandes(&adj);

    let mut result: Vec<(&Edge<G::Label>, f64)> = scores
        .into_iter()
        .filter_map(|((u, v), score)| {
            let (a, b) = (space.label(u), space.label(v));
            graph.edge(a, b).or_else(|| graph.edge(b, a)).map(|e| (e, score))
        })
        .collect();
    result.sort_by(|x, y| x.0.unordered_key().cmp(&y.0.unordered_key()));
    result
}
