//! Open multigraphs: directed graphs with ordered input and output ports and parallel edges.
//!
//! An [`OpenGraph`] is built imperatively with [`OpenGraph::add_node`] and
//! [`OpenGraph::add_edge`], and assembled from smaller graphs with the composition algebra
//! ([`OpenGraph::identity`], [`OpenGraph::parallel`], [`OpenGraph::compose`]).
//!
//! ```rust
//! use open_digraphs::graph::OpenGraph;
//!
//! // a single wire with a node in the middle: input → x → output
//! let mut f = OpenGraph::<&str>::empty();
//! let x = f.add_node("x", &[], &[]).unwrap();
//! f.add_input_node(x).unwrap();
//! f.add_output_node(x).unwrap();
//! assert!(f.is_well_formed());
//!
//! // compose f with itself, and put the result next to an identity wire
//! let ff = f.compose(&f).unwrap();
//! let g = OpenGraph::parallel([&ff, &OpenGraph::identity(1)]);
//! assert_eq!(g.inputs().len(), 2);
//! assert_eq!(g.len(), ff.len() + 2);
//! ```
pub mod category;
pub mod matrix;
pub mod namespace;
pub mod node;
pub mod open_graph;

pub use node::*;
pub use open_graph::*;
