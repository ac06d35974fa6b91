//! # Open Digraphs
//!
//! An [OpenGraph](crate::graph::OpenGraph) is a directed multigraph with an ordered list of
//! *input* nodes and an ordered list of *output* nodes. Open graphs compose: the outputs of one
//! can be plugged into the inputs of another, and two graphs can be placed side by side.
//!
//! ```text
//!     ┌───┐
//! ────│   │          ┌───┐
//!     │ & │──────────│ ~ │────
//! ────│   │          └───┘
//!     └───┘
//! ```
//!
//! # Boolean circuits
//!
//! A [BoolCirc](crate::bool_circ::BoolCirc) is an acyclic open graph whose nodes are logic
//! gates. Circuits can be built from formulas and evaluated by local rewriting: constants are
//! pushed through the gates they feed until every output is fed by a constant.
//!
//! ```rust
//! use open_digraphs::prelude::*;
//!
//! // carry and sum of a half adder
//! let mut half_adder = BoolCirc::from_formula(&["(x0)&(x1)", "(x0)^(x1)"]).unwrap();
//! half_adder.set_input_bits("11").unwrap();
//! assert_eq!(half_adder.evaluate().unwrap(), "10");
//!
//! // NOT composed after the carry output, beside the sum output
//! let not = BoolCirc::from_formula(&["~(x0)"]).unwrap();
//! let negated = half_adder
//!     .compose(&BoolCirc::parallel([&not, &BoolCirc::identity(1)]))
//!     .unwrap();
//! assert_eq!(negated.evaluate().unwrap(), "00");
//! ```
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade and installs no logger of its own. Composition and
//! evaluation log at `debug`, individual rewrites at `trace`.

pub mod algorithm;
pub mod bool_circ;
pub mod category;
pub mod error;
pub mod graph;

pub use error::{Error, Result};

pub mod prelude {
    //! The types and traits needed to build and evaluate graphs and circuits.
    pub use crate::algorithm::Direction;
    pub use crate::bool_circ::{BoolCirc, EvalOptions, Gate};
    pub use crate::category::*;
    pub use crate::error::{Error, PortViolationKind};
    pub use crate::graph::{Node, NodeId, OpenGraph, OutputArity};
}
