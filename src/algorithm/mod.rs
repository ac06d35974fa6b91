//! Read-only queries over [`crate::graph::OpenGraph`].
pub mod acyclic;
pub mod components;
pub mod layer;
pub mod path;

pub use path::Direction;
