//! Graph partitioning over an in-memory host graph: maximal cliques,
//! minimum k-way cuts (Gomory–Hu based and randomized contraction) and
//! Girvan–Newman communities.
//!
//! The host graph is consumed through [`GraphView`] and, where new graphs are
//! built, [`GraphMut`]. [`Graph`] is the bundled implementation.

pub mod clique;
pub mod community;
pub mod config;
pub mod error;
pub mod flow;
pub mod graph;
pub mod index;
pub mod kcut;
pub mod logger;
pub mod partitioner;

pub use clique::{maximal_cliques, maximal_cliques_with_min_size, normalize_cliques, Clique};
pub use community::{communities, edge_betweenness, girvan_newman};
pub use config::PartitionConfig;
pub use error::{PartitionError, Result};
pub use flow::{min_cut, MinCut};
pub use graph::{Edge, Graph, GraphMut, GraphProperties, GraphView, Vertex};
pub use kcut::{gomory_hu_tree, k_cut_approx, k_cut_exact, GomoryHuTree, KCutResult, TreeEdge};
pub use logger::init_logger;
pub use partitioner::Partitioner;
