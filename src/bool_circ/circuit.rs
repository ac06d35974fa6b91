use super::gate::Gate;
use crate::category::*;
use crate::error::{Error, Result};
use crate::graph::{Node, NodeId, OpenGraph};

use core::ops::{Deref, DerefMut};

/// A boolean circuit: an acyclic [`OpenGraph`] labelled by [`Gate`]s.
///
/// Acyclicity is checked on construction and preserved by the composition operations; the
/// gate arity rules are only checked on demand by [`BoolCirc::is_well_formed`], since a circuit
/// passes through arity-breaking states while it is being built. Read access to the graph goes
/// through `Deref`, so every graph query is available on a circuit directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "OpenGraph<Gate>", into = "OpenGraph<Gate>")
)]
pub struct BoolCirc {
    graph: OpenGraph<Gate>,
}

impl BoolCirc {
    /// Wrap `graph`, failing with [`Error::CyclicGraph`] if it has a cycle.
    pub fn new(graph: OpenGraph<Gate>) -> Result<Self> {
        if graph.is_cyclic() {
            return Err(Error::CyclicGraph);
        }
        Ok(BoolCirc { graph })
    }

    pub fn from_parts(
        inputs: Vec<NodeId>,
        outputs: Vec<NodeId>,
        nodes: impl IntoIterator<Item = Node<Gate>>,
    ) -> Result<Self> {
        Self::new(OpenGraph::from_parts(inputs, outputs, nodes))
    }

    pub fn empty() -> Self {
        BoolCirc::default()
    }

    pub fn graph(&self) -> &OpenGraph<Gate> {
        &self.graph
    }

    pub fn into_graph(self) -> OpenGraph<Gate> {
        self.graph
    }

    /// Graph well-formedness, acyclicity, and the gate rules on every non-port node:
    ///
    /// * copy nodes have exactly one incoming edge,
    /// * `&`, `|` and `^` have exactly one outgoing edge,
    /// * `~` has exactly one of each,
    /// * free variables appear on ports only.
    pub fn is_well_formed(&self) -> bool {
        self.graph.is_well_formed()
            && self.graph.is_acyclic()
            && self.graph.nodes().all(|node| {
                let id = node.id();
                self.graph.is_input(id) || self.graph.is_output(id) || gate_arity_ok(node)
            })
    }

    /// Label the input ports with `bits`, in input order.
    ///
    /// # Errors
    ///
    /// [`Error::ArityMismatch`] if `bits` has the wrong length, [`Error::InvalidBit`] on a
    /// character other than `0` or `1`. Nothing is relabelled on failure.
    pub fn set_input_bits(&mut self, bits: &str) -> Result<()> {
        let values = bits
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(Error::InvalidBit(other)),
            })
            .collect::<Result<Vec<bool>>>()?;
        if values.len() != self.graph.inputs().len() {
            return Err(Error::ArityMismatch {
                expected: self.graph.inputs().len(),
                found: values.len(),
            });
        }
        let inputs = self.graph.inputs().to_vec();
        for (i, v) in inputs.into_iter().zip(values) {
            self.graph.set_label(i, Gate::Const(v))?;
        }
        Ok(())
    }

    /// The input valuation as a bit string, or `None` while some input is not a constant.
    pub fn get_input_bits(&self) -> Option<String> {
        self.graph
            .inputs()
            .iter()
            .map(|&i| match self.graph.label(i)? {
                Gate::Const(true) => Some('1'),
                Gate::Const(false) => Some('0'),
                _ => None,
            })
            .collect()
    }

    pub fn identity(n: usize) -> Self {
        BoolCirc {
            graph: OpenGraph::identity(n),
        }
    }

    /// Circuits side by side, in order.
    pub fn parallel<'a>(circuits: impl IntoIterator<Item = &'a BoolCirc>) -> Self {
        BoolCirc {
            graph: OpenGraph::parallel(circuits.into_iter().map(|c| &c.graph)),
        }
    }

    /// Plug the outputs of `self` into the inputs of `other`.
    ///
    /// The input ports of `other` become internal copy wires, dropping any value or variable
    /// name they carried.
    pub fn compose(&self, other: &BoolCirc) -> Result<BoolCirc> {
        let mut rhs = other.graph.clone();
        for i in other.graph.inputs() {
            rhs.set_label(*i, Gate::Copy)?;
        }
        Ok(BoolCirc {
            graph: self.graph.compose(&rhs)?,
        })
    }
}

fn gate_arity_ok(node: &Node<Gate>) -> bool {
    let (indegree, outdegree) = (node.indegree(), node.outdegree());
    match node.label() {
        Gate::Copy => indegree == 1,
        Gate::And | Gate::Or | Gate::Xor => outdegree == 1,
        Gate::Not => indegree == 1 && outdegree == 1,
        Gate::Const(_) => true,
        Gate::Free(_) => false,
    }
}

impl Deref for BoolCirc {
    type Target = OpenGraph<Gate>;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

impl DerefMut for BoolCirc {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.graph
    }
}

impl TryFrom<OpenGraph<Gate>> for BoolCirc {
    type Error = Error;

    fn try_from(graph: OpenGraph<Gate>) -> Result<Self> {
        BoolCirc::new(graph)
    }
}

impl From<BoolCirc> for OpenGraph<Gate> {
    fn from(c: BoolCirc) -> Self {
        c.graph
    }
}

impl Arrow for BoolCirc {
    type Object = usize;

    fn source(&self) -> usize {
        self.graph.inputs().len()
    }

    fn target(&self) -> usize {
        self.graph.outputs().len()
    }

    fn identity(n: usize) -> Self {
        BoolCirc::identity(n)
    }

    fn compose(&self, other: &Self) -> Result<Self> {
        BoolCirc::compose(self, other)
    }
}

impl Monoidal for BoolCirc {
    fn unit() -> usize {
        0
    }

    fn tensor(&self, other: &Self) -> Self {
        BoolCirc::parallel([self, other])
    }
}
