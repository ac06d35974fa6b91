//! The composition algebra of open graphs: identities, parallel and sequential composition.
//!
//! Open graphs with `m` inputs and `n` outputs are arrows `m → n` of a category whose objects are
//! port counts. Composition `f ; g` plugs the outputs of `f` into the inputs of `g`; the parallel
//! composition `f ⊗ g` places two graphs side by side.
//!
//! ```text
//!     ┌───┐          ┌───┐
//! ────│   │──── ; ───│ g │───   =   ────[f]────[g]────
//!     │ f │          └───┘
//! ```
//!
//! Operands are never aliased: every result owns freshly renumbered copies of its operands' nodes.
use super::node::{Node, NodeId};
use super::open_graph::OpenGraph;
use crate::category::*;
use crate::error::{Error, PortViolationKind, Result};

use core::ops::{BitOr, Shr};
use log::debug;

impl<L: Default> OpenGraph<L> {
    /// The identity on `n` wires: `2n` nodes and `n` disjoint wires `input_i → output_i`.
    pub fn identity(n: usize) -> Self {
        let mut f = OpenGraph::empty();
        for _ in 0..n {
            let (i, o) = f.new_port_pair();
            f.inputs.push(i);
            f.outputs.push(o);
        }
        f
    }

    fn new_port_pair(&mut self) -> (NodeId, NodeId) {
        let i = NodeId(self.next_id);
        let o = NodeId(self.next_id + 1);
        self.next_id += 2;
        self.nodes.insert(i, Node::new(i, L::default(), [], [(o, 1)]));
        self.nodes.insert(o, Node::new(o, L::default(), [(i, 1)], []));
        (i, o)
    }
}

impl<L: Clone> OpenGraph<L> {
    /// Append copies of `graphs` beside `self`, in order.
    ///
    /// Each copy is shifted above the ids already present, so the disjoint union never merges
    /// nodes. Inputs and outputs are concatenated in argument order.
    pub fn iparallel<'a>(&mut self, graphs: impl IntoIterator<Item = &'a Self>)
    where
        L: 'a,
    {
        for g in graphs {
            let mut g = g.clone();
            g.separate_indices(self);
            self.next_id = self.next_id.max(g.next_id);
            self.nodes.append(&mut g.nodes);
            self.inputs.append(&mut g.inputs);
            self.outputs.append(&mut g.outputs);
        }
    }

    /// The parallel composition of `graphs`, in order. The empty list gives the empty graph.
    pub fn parallel<'a>(graphs: impl IntoIterator<Item = &'a Self>) -> Self
    where
        L: 'a,
    {
        let mut f = OpenGraph::empty();
        f.iparallel(graphs);
        f
    }

    /// Sequentially compose `other` after `self`, in place.
    ///
    /// Requires `self.outputs().len() == other.inputs().len()`. Each output `o_i` of `self` is
    /// deleted and its parent is wired straight to the `i`th input of `other`, which becomes an
    /// internal node. The outputs of the result are those of `other`.
    pub fn icompose(&mut self, other: &Self) -> Result<()> {
        if self.outputs.len() != other.inputs.len() {
            return Err(Error::ArityMismatch {
                expected: self.outputs.len(),
                found: other.inputs.len(),
            });
        }

        // find every parent before touching anything, so failure leaves `self` unchanged
        let parents = self
            .outputs
            .iter()
            .map(|&o| {
                self.try_node(o)?
                    .sole_parent()
                    .ok_or(Error::port(o, PortViolationKind::MissingParent))
            })
            .collect::<Result<Vec<NodeId>>>()?;

        let mut g = other.clone();
        g.separate_indices(self);
        self.next_id = self.next_id.max(g.next_id);
        self.nodes.append(&mut g.nodes);

        let outputs = std::mem::take(&mut self.outputs);
        self.remove_nodes_by_id(&outputs);
        for (p, i) in parents.into_iter().zip(g.inputs) {
            self.connect(p, i, 1);
        }
        self.outputs = g.outputs;
        Ok(())
    }

    /// Sequential composition `self ; other`, leaving both operands untouched.
    pub fn compose(&self, other: &Self) -> Result<Self> {
        let mut f = self.clone();
        f.icompose(other)?;
        debug!(
            "composed {} → {} graph: {} nodes",
            f.inputs.len(),
            f.outputs.len(),
            f.len()
        );
        Ok(f)
    }
}

impl<L: Clone + Default> Arrow for OpenGraph<L> {
    type Object = usize;

    fn source(&self) -> usize {
        self.inputs.len()
    }

    fn target(&self) -> usize {
        self.outputs.len()
    }

    fn identity(n: usize) -> Self {
        OpenGraph::identity(n)
    }

    fn compose(&self, other: &Self) -> Result<Self> {
        OpenGraph::compose(self, other)
    }
}

impl<L: Clone + Default> Monoidal for OpenGraph<L> {
    fn unit() -> usize {
        0
    }

    fn tensor(&self, other: &Self) -> Self {
        OpenGraph::parallel([self, other])
    }
}

// Syntactic sugar for composition and tensor
impl<L: Clone> Shr<&OpenGraph<L>> for &OpenGraph<L> {
    type Output = Result<OpenGraph<L>>;

    fn shr(self, rhs: &OpenGraph<L>) -> Self::Output {
        self.compose(rhs)
    }
}

impl<L: Clone> BitOr<&OpenGraph<L>> for &OpenGraph<L> {
    type Output = OpenGraph<L>;

    fn bitor(self, rhs: &OpenGraph<L>) -> Self::Output {
        OpenGraph::parallel([self, rhs])
    }
}
