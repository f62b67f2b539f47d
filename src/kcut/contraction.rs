use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{PartitionError, Result};
use crate::graph::GraphView;
use crate::index::IndexSpace;
use crate::kcut::{build_result, DisjointSet, KCutResult};

/// One trial of randomized edge contraction (Karger style).
///
/// Edges are visited in a random order and their endpoints merged until `k`
/// supernodes remain. On a graph with more than `k` connected components the
/// edges run out first; the result then holds more than `k` supernodes and
/// [`KCutResult::reached_target`] reports it. When no contraction was needed
/// (`k` equals the order) the cut edge list is empty.
///
/// A single trial carries no optimality guarantee.
pub fn k_cut_approx<'g, G, R>(graph: &'g G, k: usize, rng: &mut R) -> Result<KCutResult<'g, G::Label>>
where
    G: GraphView,
    R: Rng + ?Sized,
{
    let order = graph.order();
    if k < 2 || order < k {
        return Err(PartitionError::InvalidArgument { k, order });
    }

    let space = IndexSpace::new(graph);
    let mut pairs: Vec<(usize, usize)> = graph
        .edges()
        .into_iter()
        .filter_map(|edge| {
            match (space.index(edge.source()), space.index(edge.destination())) {
                (Some(u), Some(v)) if u != v => Some((u, v)),
                _ => None,
            }
        })
        .collect();
    pairs.shuffle(rng);

    let mut supernodes = DisjointSet::new(order);
    let mut remaining = order;
    let mut contractions = 0usize;
    for (u, v) in pairs {
        if remaining <= k {
            break;
        }
        // Both endpoints already merged.
        if supernodes.find(u) == supernodes.find(v) {
            continue;
        }
        supernodes.union(u, v);
        remaining -= 1;
        contractions += 1;
    }

    if remaining > k {
        warn!(
            "contraction stopped at {} supernodes, target was {} (graph has too few edges)",
            remaining, k
        );
    }
    debug!("contraction: {} merges, {} supernodes left", contractions, remaining);

    let group_of: Vec<usize> = (0..order).map(|idx| supernodes.find(idx)).collect();
    Ok(build_result(graph, &space, &group_of, k, contractions > 0))
}

#[cfg(test)]
mod test_contraction {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::error::PartitionError;
    use crate::graph::{Graph, GraphProperties, GraphView};
    use crate::kcut::contraction::k_cut_approx;

    fn ring(n: u32) -> Graph<u32> {
        Graph::from_edges(
            GraphProperties::undirected(),
            (0..n).map(|i| (i, (i + 1) % n)),
        )
    }

    #[test]
    fn test_partition_of_ring() {
        let g = ring(8);
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let res = k_cut_approx(&g, 3, &mut rng).unwrap();
            assert!(res.reached_target());
            assert_eq!(res.supernodes.len(), 3);

            let mut labels: Vec<u32> = res
                .supernodes
                .iter()
                .flat_map(|group| group.iter().map(|v| *v.label()))
                .collect();
            labels.sort_unstable();
            assert_eq!(labels, (0..8).collect::<Vec<u32>>());

            // A ring cut into 3 arcs crosses at least 3 edges.
            assert!(res.cut_edges.len() >= 3);
            for edge in &res.cut_edges {
                assert_ne!(
                    res.supernode_of(edge.source()),
                    res.supernode_of(edge.destination())
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_cut() {
        let g = ring(10);
        let a = k_cut_approx(&g, 2, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = k_cut_approx(&g, 2, &mut StdRng::seed_from_u64(42)).unwrap();
        let keys_a: Vec<(u32, u32)> = a.cut_edges.iter().map(|e| e.unordered_key()).collect();
        let keys_b: Vec<(u32, u32)> = b.cut_edges.iter().map(|e| e.unordered_key()).collect();
        assert_eq!(keys_a, keys_b);
        assert_eq!(a.supernodes.len(), 2);
    }

    #[test]
    fn test_k_equals_order() {
        let g = ring(4);
        let mut rng = StdRng::seed_from_u64(1);
        let res = k_cut_approx(&g, 4, &mut rng).unwrap();
        assert_eq!(res.supernodes.len(), 4);
        assert!(res.cut_edges.is_empty());
    }

    #[test]
    fn test_invalid_k() {
        let g = ring(4);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            k_cut_approx(&g, 1, &mut rng).unwrap_err(),
            PartitionError::InvalidArgument { k: 1, order: 4 }
        );
        assert!(k_cut_approx(&g, 5, &mut rng).is_err());

        let empty: Graph<u32> = Graph::new(GraphProperties::undirected());
        assert!(matches!(
            k_cut_approx(&empty, 2, &mut rng),
            Err(PartitionError::InvalidArgument { k: 2, order: 0 })
        ));
    }

    #[test]
    fn test_too_many_components() {
        let mut g = Graph::from_edges(GraphProperties::undirected(), vec![(1, 2)]);
        g.insert_vertex(3);
        g.insert_vertex(4);
        assert_eq!(g.order(), 4);

        let mut rng = StdRng::seed_from_u64(3);
        let res = k_cut_approx(&g, 2, &mut rng).unwrap();
        assert!(!res.reached_target());
        assert_eq!(res.supernodes.len(), 3);
        assert!(res.cut_edges.is_empty());
    }
}
