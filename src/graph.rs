use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

use crate::error::{PartitionError, Result};

/// Structural flags of a host graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphProperties {
    pub directed: bool,
    pub weighted: bool,
}

impl GraphProperties {
    pub fn undirected() -> Self {
        GraphProperties { directed: false, weighted: false }
    }

    pub fn directed() -> Self {
        GraphProperties { directed: true, weighted: false }
    }

    pub fn weighted(mut self) -> Self {
        self.weighted = true;
        self
    }
}

/// A vertex owned by the host graph: a unique label plus a weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<L> {
    label: L,
    weight: f64,
}

impl<L> Vertex<L> {
    pub fn new(label: L, weight: f64) -> Self {
        Vertex { label, weight }
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}

/// A stored edge record. Undirected hosts keep one record per direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<L> {
    source: L,
    destination: L,
    weight: f64,
}

impl<L: Clone + Ord> Edge<L> {
    pub fn new(source: L, destination: L, weight: f64) -> Self {
        Edge { source, destination, weight }
    }

    pub fn source(&self) -> &L {
        &self.source
    }

    pub fn destination(&self) -> &L {
        &self.destination
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Endpoint pair with the smaller label first, shared by an edge and its mirror.
    pub fn unordered_key(&self) -> (L, L) {
        if self.source <= self.destination {
            (self.source.clone(), self.destination.clone())
        } else {
            (self.destination.clone(), self.source.clone())
        }
    }
}

/// Read-only capability set the partitioning engine needs from a host graph.
///
/// Every method hands out shared references, so nothing returned here can be
/// used to mutate the host's adjacency. `vertices` must enumerate in the same
/// order for as long as the graph is not mutated.
pub trait GraphView {
    type Label: Clone + Ord + Hash + Debug;

    fn vertices(&self) -> Vec<&Vertex<Self::Label>>;

    fn vertex(&self, label: &Self::Label) -> Option<&Vertex<Self::Label>>;

    /// Out-neighbors for directed hosts, all neighbors otherwise.
    fn neighbors(&self, label: &Self::Label) -> Vec<&Vertex<Self::Label>>;

    fn edge(&self, from: &Self::Label, to: &Self::Label) -> Option<&Edge<Self::Label>>;

    /// Every stored edge record, including both mirrors of an undirected edge.
    fn edges(&self) -> Vec<&Edge<Self::Label>>;

    /// Records stored on `label`'s side.
    fn edges_of(&self, label: &Self::Label) -> Vec<&Edge<Self::Label>>;

    fn is_directed(&self) -> bool;

    fn is_weighted(&self) -> bool;

    /// Vertex count.
    fn order(&self) -> usize;

    /// Logical edge count, an undirected edge counts once.
    fn size(&self) -> usize;

    fn properties(&self) -> GraphProperties {
        GraphProperties {
            directed: self.is_directed(),
            weighted: self.is_weighted(),
        }
    }

    /// Capacity of an edge as seen by cut algorithms.
    fn capacity_of(&self, edge: &Edge<Self::Label>) -> f64 {
        if self.is_weighted() {
            edge.weight()
        } else {
            1.0
        }
    }
}

/// Construction capabilities, used to clone working copies and to build
/// community subgraphs.
pub trait GraphMut: GraphView + Sized {
    fn with_properties(properties: GraphProperties) -> Self;

    fn add_vertex(&mut self, label: Self::Label, weight: f64);

    fn add_edge(&mut self, from: Self::Label, to: Self::Label, weight: f64) -> Result<()>;

    /// Remove the edge, both mirror records for an undirected host.
    fn remove_edge(&mut self, from: &Self::Label, to: &Self::Label);

    /// Deep copy of vertices (with weights) and edges.
    fn clone_from_view<G>(graph: &G) -> Self
    where
        G: GraphView<Label = Self::Label>,
    {
        let mut copy = Self::with_properties(graph.properties());
        for vertex in graph.vertices() {
            copy.add_vertex(vertex.label().clone(), vertex.weight());
        }
        for edge in graph.edges() {
            // Mirror records collide with the first insertion on undirected hosts.
            if copy.edge(edge.source(), edge.destination()).is_none() {
                let _ = copy.add_edge(
                    edge.source().clone(),
                    edge.destination().clone(),
                    edge.weight(),
                );
            }
        }
        copy
    }
}

/// In-memory host graph keyed by label.
#[derive(Debug, Clone)]
pub struct Graph<L: Ord> {
    vertices: BTreeMap<L, Vertex<L>>,
    adj_map: BTreeMap<L, BTreeMap<L, Edge<L>>>,
    properties: GraphProperties,
    e_size: usize,
}

impl<L: Clone + Ord + Hash + Debug> Graph<L> {
    pub fn new(properties: GraphProperties) -> Self {
        // Create a new empty graph.
        Graph {
            vertices: BTreeMap::new(),
            adj_map: BTreeMap::new(),
            properties,
            e_size: 0,
        }
    }

    /// Build an unweighted graph from an edge list, skipping duplicate edges.
    pub fn from_edges<I>(properties: GraphProperties, edges: I) -> Self
    where
        I: IntoIterator<Item = (L, L)>,
    {
        Self::from_weighted_edges(properties, edges.into_iter().map(|(u, v)| (u, v, 1.0)))
    }

    /// Build a graph from a weighted edge list, skipping duplicate edges.
    pub fn from_weighted_edges<I>(properties: GraphProperties, edges: I) -> Self
    where
        I: IntoIterator<Item = (L, L, f64)>,
    {
        let mut graph = Graph::new(properties);
        for (u, v, weight) in edges {
            if graph.has_edge(&u, &v) {
                continue;
            }
            let _ = graph.insert_edge(u, v, weight);
        }
        graph
    }

    pub fn insert_vertex(&mut self, label: L) {
        self.insert_weighted_vertex(label, 0.0);
    }

    pub fn insert_weighted_vertex(&mut self, label: L, weight: f64) {
        if !self.vertices.contains_key(&label) {
            self.adj_map.insert(label.clone(), BTreeMap::new());
            self.vertices.insert(label.clone(), Vertex::new(label, weight));
        }
    }

    /// Insert an edge, creating missing endpoints.
    pub fn insert_edge(&mut self, u: L, v: L, weight: f64) -> Result<()> {
        if self.has_edge(&u, &v) {
            return Err(PartitionError::EdgeAlreadyExists(format!("{:?} -> {:?}", u, v)));
        }
        self.insert_vertex(u.clone());
        self.insert_vertex(v.clone());

        let weight = if self.properties.weighted { weight } else { 1.0 };
        // The successor direction.
        self.adj_map
            .entry(u.clone())
            .or_default()
            .insert(v.clone(), Edge::new(u.clone(), v.clone(), weight));
        // The mirror direction, stored independently.
        if !self.properties.directed && u != v {
            self.adj_map
                .entry(v.clone())
                .or_default()
                .insert(u.clone(), Edge::new(v, u, weight));
        }
        self.e_size += 1;
        Ok(())
    }

    /// Remove an existing edge from the graph, do nothing if it is absent.
    pub fn delete_edge(&mut self, u: &L, v: &L) {
        let removed = self
            .adj_map
            .get_mut(u)
            .and_then(|succ| succ.remove(v))
            .is_some();
        if removed {
            if !self.properties.directed {
                if let Some(pred) = self.adj_map.get_mut(v) {
                    pred.remove(u);
                }
            }
            self.e_size -= 1;
        }
    }

    /// If an edge exists in this graph.
    pub fn has_edge(&self, u: &L, v: &L) -> bool {
        self.adj_map
            .get(u)
            .map_or(false, |succ| succ.contains_key(v))
    }

    pub fn get_vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn get_edge_count(&self) -> usize {
        self.e_size
    }

    pub fn degree(&self, u: &L) -> usize {
        self.adj_map.get(u).map_or(0, |succ| succ.len())
    }

    pub fn vertex_mut(&mut self, label: &L) -> Option<&mut Vertex<L>> {
        self.vertices.get_mut(label)
    }
}

impl<L: Clone + Ord + Hash + Debug> GraphView for Graph<L> {
    type Label = L;

    fn vertices(&self) -> Vec<&Vertex<L>> {
        self.vertices.values().collect()
    }

    fn vertex(&self, label: &L) -> Option<&Vertex<L>> {
        self.vertices.get(label)
    }

    fn neighbors(&self, label: &L) -> Vec<&Vertex<L>> {
        match self.adj_map.get(label) {
            Some(succ) => succ.keys().filter_map(|v| self.vertices.get(v)).collect(),
            None => vec![],
        }
    }

    fn edge(&self, from: &L, to: &L) -> Option<&Edge<L>> {
        self.adj_map.get(from).and_then(|succ| succ.get(to))
    }

    fn edges(&self) -> Vec<&Edge<L>> {
        self.adj_map.values().flat_map(|succ| succ.values()).collect()
    }

    fn edges_of(&self, label: &L) -> Vec<&Edge<L>> {
        match self.adj_map.get(label) {
            Some(succ) => succ.values().collect(),
            None => vec![],
        }
    }

    fn is_directed(&self) -> bool {
        self.properties.directed
    }

    fn is_weighted(&self) -> bool {
        self.properties.weighted
    }

    fn order(&self) -> usize {
        self.vertices.len()
    }

    fn size(&self) -> usize {
        self.e_size
    }
}

impl<L: Clone + Ord + Hash + Debug> GraphMut for Graph<L> {
    fn with_properties(properties: GraphProperties) -> Self {
        Graph::new(properties)
    }

    fn add_vertex(&mut self, label: L, weight: f64) {
        self.insert_weighted_vertex(label, weight);
    }

    fn add_edge(&mut self, from: L, to: L, weight: f64) -> Result<()> {
        self.insert_edge(from, to, weight)
    }

    fn remove_edge(&mut self, from: &L, to: &L) {
        self.delete_edge(from, to);
    }
}

impl<L: Clone + Ord + Hash + Debug + Display> Display for Graph<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (vertex, succ) in &self.adj_map {
            write!(f, "{} ->", vertex)?;
            for edge in succ.values() {
                if self.properties.weighted {
                    write!(f, " {}({})", edge.destination(), edge.weight())?;
                } else {
                    write!(f, " {}", edge.destination())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
