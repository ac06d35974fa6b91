use crate::graph::NodeId;

use core::fmt;

/// Which port rule an operation would have broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortViolationKind {
    /// An output node was given as a parent.
    OutputAsParent,
    /// An input node was given as a child.
    InputAsChild,
    AlreadyInput,
    AlreadyOutput,
    /// The node cannot become (or merge with) an input because it has parents.
    HasParents,
    /// The node cannot become (or merge with) an output because it has children.
    HasChildren,
    NotSingleChild,
    NotSingleParent,
    /// The node is registered as both an input and an output.
    InputIsOutput,
    /// An output node has no parent to reconnect.
    MissingParent,
}

impl fmt::Display for PortViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PortViolationKind::*;
        let msg = match self {
            OutputAsParent => "is an output and cannot be a parent",
            InputAsChild => "is an input and cannot be a child",
            AlreadyInput => "is already an input",
            AlreadyOutput => "is already an output",
            HasParents => "has parents",
            HasChildren => "has children",
            NotSingleChild => "does not have exactly one child of multiplicity 1",
            NotSingleParent => "does not have exactly one parent of multiplicity 1",
            InputIsOutput => "is registered as both an input and an output",
            MissingParent => "is an output without a parent",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("no node with id {0}")]
    InvalidReference(NodeId),

    #[error("port violation: node {node} {kind}")]
    PortViolation {
        node: NodeId,
        kind: PortViolationKind,
    },

    #[error("arity mismatch: expected {expected}, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("graph is cyclic")]
    CyclicGraph,

    /// Evaluation halted while the parent of this output was not a constant.
    #[error("output {0} was not reduced to a constant")]
    NotFullyEvaluated(NodeId),

    #[error("invalid bit {0:?}, expected '0' or '1'")]
    InvalidBit(char),

    #[error("malformed formula: unbalanced parenthesis at byte {position}")]
    MalformedFormula { position: usize },
}

impl Error {
    pub(crate) fn port(node: NodeId, kind: PortViolationKind) -> Self {
        Error::PortViolation { node, kind }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
