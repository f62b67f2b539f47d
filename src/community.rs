//! Girvan–Newman community detection.
//!
//! Edges of highest betweenness are peeled off a private working copy until
//! enough connected components appear. The communities handed back are
//! induced subgraphs of the caller's graph over the final vertex partition,
//! so they keep every original edge between their members, including edges
//! the peeling removed.

use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::community::betweenness::brandes;
use crate::error::{PartitionError, Result};
use crate::graph::{GraphMut, GraphView};
use crate::index::IndexSpace;

pub mod betweenness;

pub use betweenness::edge_betweenness;

/// [`girvan_newman`] behind an optional graph reference; `None` is reported
/// as [`PartitionError::NilInput`].
pub fn communities<G: GraphMut>(graph: Option<&G>, k: usize) -> Result<Vec<G>> {
    match graph {
        Some(graph) => girvan_newman(graph, k),
        None => Err(PartitionError::NilInput),
    }
}

/// Split `graph` into communities by repeated removal of the edges with the
/// highest betweenness.
///
/// Stops once there are at least `k` components, or, with `k == 0`, once the
/// working copy has no edge left. A graph that already has `k` components is
/// returned as is. Directed graphs are treated as their underlying undirected
/// graph. The caller's graph is never mutated.
pub fn girvan_newman<G: GraphMut>(graph: &G, k: usize) -> Result<Vec<G>> {
    let mut working = G::clone_from_view(graph);
    let mut iterations = 0usize;

    let partition: Vec<Vec<G::Label>> = loop {
        let space = IndexSpace::new(&working);
        let adj = space.symmetric_adjacency(&working);
        let components = connected_components(&adj);
        let labels = || -> Vec<Vec<G::Label>> {
            components
                .iter()
                .map(|members| members.iter().map(|&idx| space.label(idx).clone()).collect())
                .collect()
        };

        if k > 0 && components.len() >= k {
            break labels();
        }
        if k == 0 && working.size() == 0 {
            break labels();
        }

        let scores = brandes(&adj);
        if scores.is_empty() {
            // Only self-loops remain, nothing left to peel.
            if k > 0 {
                warn!(
                    "Girvan-Newman ran out of edges at {} components, {} requested",
                    components.len(),
                    k
                );
            }
            break labels();
        }

        // Every edge tied at the maximum goes in the same round.
        let max = scores.values().copied().fold(f64::NEG_INFINITY, f64::max);
        let doomed: Vec<(G::Label, G::Label)> = scores
            .iter()
            .filter(|(_, &score)| score == max)
            .map(|(&(u, v), _)| (space.label(u).clone(), space.label(v).clone()))
            .collect();

        iterations += 1;
        debug!(
            "Girvan-Newman round {}: {} components, removing {} edge(s) at betweenness {}",
            iterations,
            components.len(),
            doomed.len(),
            max
        );

        for (u, v) in doomed {
            working.remove_edge(&u, &v);
            if working.is_directed() {
                working.remove_edge(&v, &u);
            }
        }
    };

    info!(
        "Girvan-Newman: {} communities after {} rounds",
        partition.len(),
        iterations
    );
    Ok(partition
        .iter()
        .map(|members| induced_subgraph(graph, members))
        .collect())
}

/// Components of an undirected neighbor list, found by iterative BFS.
/// Members are listed in visiting order, components by smallest index.
pub(crate) fn connected_components(adj: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut seen = vec![false; adj.len()];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..adj.len() {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        queue.push_back(start);
        let mut members = Vec::new();
        while let Some(u) = queue.pop_front() {
            members.push(u);
            for &v in &adj[u] {
                if !seen[v] {
                    seen[v] = true;
                    queue.push_back(v);
                }
            }
        }
        components.push(members);
    }
    components
}

/// New graph holding `members` and every edge of `graph` between two members.
fn induced_subgraph<G: GraphMut>(graph: &G, members: &[G::Label]) -> G {
    let mut sub = G::with_properties(graph.properties());
    for label in members {
        let weight = graph.vertex(label).map_or(0.0, |v| v.weight());
        sub.add_vertex(label.clone(), weight);
    }
    for label in members {
        for edge in graph.edges_of(label) {
            let (src, dst) = (edge.source(), edge.destination());
            if sub.vertex(dst).is_none() || sub.edge(src, dst).is_some() {
                continue;
            }
            // Both endpoints are members, so insertion cannot fail.
            let _ = sub.add_edge(src.clone(), dst.clone(), edge.weight());
        }
    }
    sub
}

#[cfg(test)]
mod test_community {
    use crate::community::{communities, connected_components, girvan_newman};
    use crate::error::PartitionError;
    use crate::graph::{Graph, GraphProperties, GraphView};

    fn sorted_labels(g: &Graph<&'static str>) -> Vec<&'static str> {
        g.vertices().iter().map(|v| *v.label()).collect()
    }

    fn two_triangles() -> Graph<&'static str> {
        Graph::from_edges(
            GraphProperties::undirected(),
            vec![
                ("a", "b"),
                ("b", "c"),
                ("c", "a"),
                ("c", "d"),
                ("d", "e"),
                ("e", "f"),
                ("f", "d"),
            ],
        )
    }

    #[test]
    fn test_components() {
        let adj = vec![vec![1], vec![0], vec![], vec![4], vec![3]];
        assert_eq!(
            connected_components(&adj),
            vec![vec![0, 1], vec![2], vec![3, 4]]
        );
    }

    #[test]
    fn test_two_triangles_split() {
        let g = two_triangles();
        let parts = girvan_newman(&g, 2).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts.iter().map(|p| p.order()).sum::<usize>(), 6);
        assert_eq!(sorted_labels(&parts[0]), vec!["a", "b", "c"]);
        assert_eq!(sorted_labels(&parts[1]), vec!["d", "e", "f"]);
        // Each side keeps its triangle.
        assert_eq!(parts[0].size(), 3);
        assert_eq!(parts[1].size(), 3);
        // Caller's graph untouched.
        assert_eq!(g.size(), 7);
    }

    #[test]
    fn test_until_no_edges() {
        let g = Graph::from_edges(
            GraphProperties::undirected(),
            vec![("a", "b"), ("b", "c"), ("c", "a")],
        );
        let parts = girvan_newman(&g, 0).unwrap();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.order() == 1 && p.size() == 0));
    }

    #[test]
    fn test_already_split() {
        let mut g = Graph::from_edges(GraphProperties::undirected(), vec![("a", "b")]);
        g.insert_vertex("c");
        let parts = girvan_newman(&g, 2).unwrap();
        assert_eq!(parts.len(), 2);
        // Existing components come back unmodified.
        assert_eq!(parts[0].size(), 1);
        assert_eq!(sorted_labels(&parts[1]), vec!["c"]);
    }

    #[test]
    fn test_keeps_original_edges() {
        // x-y ties with both pendant edges and is peeled in the same round,
        // yet x and y stay together through z.
        let g = Graph::from_edges(
            GraphProperties::undirected(),
            vec![("p", "x"), ("x", "y"), ("y", "q"), ("x", "z"), ("z", "y")],
        );
        let parts = girvan_newman(&g, 2).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.iter().map(|p| p.order()).sum::<usize>(), 5);
        let core = &parts[2];
        assert_eq!(sorted_labels(core), vec!["x", "y", "z"]);
        assert_eq!(core.size(), 3);
        assert!(core.has_edge(&"x", &"y"));
    }

    #[test]
    fn test_directed_and_nil() {
        let g = Graph::from_edges(
            GraphProperties::directed(),
            vec![("a", "b"), ("b", "a"), ("b", "c"), ("c", "d"), ("d", "c")],
        );
        let parts = girvan_newman(&g, 2).unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.is_directed()));

        assert!(matches!(
            communities::<Graph<u8>>(None, 2),
            Err(PartitionError::NilInput)
        ));
        let empty: Graph<u8> = Graph::new(GraphProperties::undirected());
        assert!(communities(Some(&empty), 2).unwrap().is_empty());
    }
}
