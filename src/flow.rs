//! Maximum flow / minimum s-t cut with Dinic's blocking-flow phases.

use std::collections::{BTreeMap, HashSet, VecDeque};

use log::trace;

use crate::error::{PartitionError, Result};
use crate::graph::{GraphView, Vertex};
use crate::index::IndexSpace;

/// Outcome of a minimum s-t cut.
#[derive(Debug, Clone)]
pub struct MinCut<'g, L> {
    /// Maximum flow value, equal to the capacity of the minimum cut.
    pub value: f64,
    /// Vertices reachable from the source in the final residual network.
    pub source_side: Vec<&'g Vertex<L>>,
}

impl<'g, L: PartialEq> MinCut<'g, L> {
    pub fn on_source_side(&self, label: &L) -> bool {
        self.source_side.iter().any(|v| v.label() == label)
    }
}

/// Compute the maximum flow from `source` to `sink`, and the source side of
/// the corresponding minimum cut.
///
/// Edge weights are capacities (1.0 on unweighted hosts). An undirected edge
/// offers its weight in both directions.
pub fn min_cut<'g, G: GraphView>(
    graph: &'g G,
    source: &G::Label,
    sink: &G::Label,
) -> Result<MinCut<'g, G::Label>> {
    let space = IndexSpace::new(graph);
    let s = space
        .index(source)
        .ok_or_else(|| PartitionError::VertexNotFound(format!("{:?}", source)))?;
    let t = space
        .index(sink)
        .ok_or_else(|| PartitionError::VertexNotFound(format!("{:?}", sink)))?;
    if s == t {
        return Err(PartitionError::SameTerminal(format!("{:?}", source)));
    }

    let mut network = FlowNetwork::from_graph(graph, &space);
    let value = network.max_flow(s, t);
    let reachable = network.reachable_from(s);
    let source_side = (0..space.len())
        .filter(|&idx| reachable[idx])
        .map(|idx| space.vertex(idx))
        .collect();
    Ok(MinCut { value, source_side })
}

#[derive(Debug, Clone, Copy)]
struct Arc {
    to: usize,
    rev: usize, // Index of the paired arc in `arcs[to]`.
    residual: f64,
}

/// Residual network over a dense index space. Each ordered pair of adjacent
/// vertices shares one arc pair, so parallel capacities are merged.
#[derive(Debug, Clone)]
pub(crate) struct FlowNetwork {
    arcs: Vec<Vec<Arc>>,
}

impl FlowNetwork {
    pub(crate) fn from_graph<G: GraphView>(graph: &G, space: &IndexSpace<'_, G::Label>) -> Self {
        // (low, high) -> (capacity low -> high, capacity high -> low).
        let mut pairs: BTreeMap<(usize, usize), (f64, f64)> = BTreeMap::new();
        // Mirror records of an undirected edge describe the same capacity.
        let mut mirrored = HashSet::new();

        for edge in graph.edges() {
            let (u, v) = match (space.index(edge.source()), space.index(edge.destination())) {
                (Some(u), Some(v)) if u != v => (u, v),
                _ => continue,
            };
            let capacity = graph.capacity_of(edge);
            let entry = pairs.entry((u.min(v), u.max(v))).or_insert((0.0, 0.0));
            if graph.is_directed() {
                if u < v {
                    entry.0 += capacity;
                } else {
                    entry.1 += capacity;
                }
            } else if mirrored.insert((u.min(v), u.max(v))) {
                entry.0 += capacity;
                entry.1 += capacity;
            }
        }

        let mut network = FlowNetwork {
            arcs: vec![Vec::new(); space.len()],
        };
        for ((u, v), (forward, backward)) in pairs {
            network.add_arc_pair(u, v, forward, backward);
        }
        network
    }

    fn add_arc_pair(&mut self, u: usize, v: usize, forward: f64, backward: f64) {
        let u_pos = self.arcs[u].len();
        let v_pos = self.arcs[v].len();
        self.arcs[u].push(Arc { to: v, rev: v_pos, residual: forward });
        self.arcs[v].push(Arc { to: u, rev: u_pos, residual: backward });
    }

    /// Run Dinic until the sink is unreachable, returning the total flow.
    pub(crate) fn max_flow(&mut self, s: usize, t: usize) -> f64 {
        if s == t {
            return 0.0;
        }
        let mut total = 0.0;
        let mut phases = 0usize;
        while let Some(level) = self.levels(s, t) {
            phases += 1;
            // Current-arc pointers, reset every phase.
            let mut next = vec![0usize; self.arcs.len()];
            loop {
                let pushed = self.augment(s, t, f64::INFINITY, &level, &mut next);
                if pushed <= 0.0 {
                    break;
                }
                total += pushed;
            }
        }
        trace!("Dinic {} -> {}: flow {} after {} phases", s, t, total, phases);
        total
    }

    /// BFS levels over arcs with positive residual; `None` if `t` is unreachable.
    fn levels(&self, s: usize, t: usize) -> Option<Vec<usize>> {
        let mut level = vec![usize::MAX; self.arcs.len()];
        let mut queue = VecDeque::new();
        level[s] = 0;
        queue.push_back(s);
        while let Some(u) = queue.pop_front() {
            for arc in &self.arcs[u] {
                if arc.residual > 0.0 && level[arc.to] == usize::MAX {
                    level[arc.to] = level[u] + 1;
                    queue.push_back(arc.to);
                }
            }
        }
        if level[t] == usize::MAX {
            None
        } else {
            Some(level)
        }
    }

    /// Push one augmenting path along admissible arcs (`level + 1`).
    fn augment(&mut self, u: usize, t: usize, limit: f64, level: &[usize], next: &mut [usize]) -> f64 {
        if u == t {
            return limit;
        }
        while next[u] < self.arcs[u].len() {
            let idx = next[u];
            let arc = self.arcs[u][idx];
            if arc.residual > 0.0 && level[arc.to] == level[u] + 1 {
                let pushed = self.augment(arc.to, t, limit.min(arc.residual), level, next);
                if pushed > 0.0 {
                    self.arcs[u][idx].residual -= pushed;
                    self.arcs[arc.to][arc.rev].residual += pushed;
                    return pushed;
                }
            }
            next[u] += 1;
        }
        0.0
    }

    /// Vertices reachable from `s` through arcs with positive residual.
    pub(crate) fn reachable_from(&self, s: usize) -> Vec<bool> {
        let mut reached = vec![false; self.arcs.len()];
        let mut queue = VecDeque::new();
        reached[s] = true;
        queue.push_back(s);
        while let Some(u) = queue.pop_front() {
            for arc in &self.arcs[u] {
                if arc.residual > 0.0 && !reached[arc.to] {
                    reached[arc.to] = true;
                    queue.push_back(arc.to);
                }
            }
        }
        reached
    }
}

#[cfg(test)]
mod test_flow {
    use crate::error::PartitionError;
    use crate::flow::min_cut;
    use crate::graph::{Graph, GraphProperties};

    #[test]
    fn test_classic_network() {
        let g = Graph::from_weighted_edges(
            GraphProperties::directed().weighted(),
            vec![
                ("s", "v1", 16.0),
                ("s", "v2", 13.0),
                ("v1", "v3", 12.0),
                ("v2", "v1", 4.0),
                ("v2", "v4", 14.0),
                ("v3", "v2", 9.0),
                ("v3", "t", 20.0),
                ("v4", "v3", 7.0),
                ("v4", "t", 4.0),
            ],
        );
        let cut = min_cut(&g, &"s", &"t").unwrap();
        println!("Max flow: {}", cut.value);
        assert_eq!(cut.value, 23.0);

        let mut side: Vec<&str> = cut.source_side.iter().map(|v| *v.label()).collect();
        side.sort_unstable();
        assert_eq!(side, vec!["s", "v1", "v2", "v4"]);
        assert!(!cut.on_source_side(&"t"));
    }

    #[test]
    fn test_undirected_unit_capacity() {
        // Triangle A-B-C with a pendant D on C.
        let g = Graph::from_edges(
            GraphProperties::undirected(),
            vec![("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")],
        );
        assert_eq!(min_cut(&g, &"A", &"B").unwrap().value, 2.0);
        assert_eq!(min_cut(&g, &"B", &"A").unwrap().value, 2.0);

        let cut = min_cut(&g, &"A", &"D").unwrap();
        assert_eq!(cut.value, 1.0);
        assert!(cut.on_source_side(&"C"));
        assert!(!cut.on_source_side(&"D"));
    }

    #[test]
    fn test_direction_respected() {
        let g = Graph::from_edges(GraphProperties::directed(), vec![("a", "b"), ("b", "c")]);
        assert_eq!(min_cut(&g, &"a", &"c").unwrap().value, 1.0);
        let back = min_cut(&g, &"c", &"a").unwrap();
        assert_eq!(back.value, 0.0);
        assert_eq!(back.source_side.len(), 1);
    }

    #[test]
    fn test_disconnected_and_invalid() {
        let mut g = Graph::from_edges(GraphProperties::undirected(), vec![(1, 2)]);
        g.insert_vertex(3);
        assert_eq!(min_cut(&g, &1, &3).unwrap().value, 0.0);

        assert!(matches!(min_cut(&g, &1, &9), Err(PartitionError::VertexNotFound(_))));
        assert!(matches!(min_cut(&g, &1, &1), Err(PartitionError::SameTerminal(_))));
    }
}
