use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Degeneracy order of an index-space graph: vertices are removed one at a
/// time, always the one with the smallest degree among those still present.
///
/// Degree updates push a fresh heap entry instead of decreasing a key; stale
/// entries are skipped when popped.
pub(crate) fn degeneracy_order(adj: &[Vec<usize>]) -> Vec<usize> {
    let n = adj.len();
    let mut degree: Vec<usize> = adj.iter().map(|neighbors| neighbors.len()).collect();
    let mut heap: BinaryHeap<Reverse<(usize, usize)>> = degree
        .iter()
        .enumerate()
        .map(|(v, &deg)| Reverse((deg, v)))
        .collect();

    let mut removed = vec![false; n];
    let mut order = Vec::with_capacity(n);

    while let Some(Reverse((deg, v))) = heap.pop() {
        if removed[v] || deg != degree[v] {
            continue;
        }
        removed[v] = true;
        order.push(v);
        for &w in &adj[v] {
            if removed[w] {
                continue;
            }
            degree[w] -= 1;
            heap.push(Reverse((degree[w], w)));
        }
    }
    order
}

/// `pos[v]` = position of `v` in `order`.
pub(crate) fn positions(order: &[usize]) -> Vec<usize> {
    let mut pos = vec![0; order.len()];
    for (idx, &v) in order.iter().enumerate() {
        pos[v] = idx;
    }
    pos
}
