use super::node::{Node, NodeId};
use crate::error::{Error, PortViolationKind, Result};

use log::trace;
use std::collections::{BTreeMap, BTreeSet};

/// How strictly [`OpenGraph::is_well_formed_with`] treats output ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputArity {
    /// Every output has exactly one parent of multiplicity 1.
    #[default]
    Strict,
    /// Outputs may also be parentless ("lonely"), as happens part way through an evaluation.
    Relaxed,
}

/// An open directed multigraph.
///
/// The graph exclusively owns its [`Node`]s, keyed by [`NodeId`], together with an ordered list
/// of *input* ports and an ordered list of *output* ports. Ids are issued by an internal
/// allocator and strictly increase over the lifetime of the graph.
///
/// # Invariants
///
/// A graph is *well formed* (see [`OpenGraph::is_well_formed`]) when
///
/// 1. every port id names a node,
/// 2. every input has no parent and one child of multiplicity 1,
/// 3. every output has no child and one parent of multiplicity 1,
/// 4. `j → i` with multiplicity `m` is recorded as child `i` of `j` *and* parent `j` of `i`,
/// 5. every key of the node map equals the id stored in its node.
///
/// Single-node mutations check their preconditions and leave the graph untouched on failure.
/// The bulk `*_by_id` removals skip unknown ids instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenGraph<L> {
    pub(crate) nodes: BTreeMap<NodeId, Node<L>>,
    pub(crate) inputs: Vec<NodeId>,
    pub(crate) outputs: Vec<NodeId>,
    pub(crate) next_id: usize,
}

impl<L> Default for OpenGraph<L> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<L> OpenGraph<L> {
    /// The graph with no nodes and no ports.
    pub fn empty() -> Self {
        OpenGraph {
            nodes: BTreeMap::new(),
            inputs: vec![],
            outputs: vec![],
            next_id: 0,
        }
    }

    /// Assemble a graph from already-built nodes.
    ///
    /// Nothing is validated; call [`OpenGraph::is_well_formed`] afterwards if the parts come
    /// from an untrusted source. Duplicate port ids are removed.
    pub fn from_parts(
        inputs: Vec<NodeId>,
        outputs: Vec<NodeId>,
        nodes: impl IntoIterator<Item = Node<L>>,
    ) -> Self {
        let nodes: BTreeMap<NodeId, Node<L>> = nodes.into_iter().map(|n| (n.id, n)).collect();
        let next_id = nodes.keys().next_back().map_or(0, |id| id.0 + 1);
        let mut g = OpenGraph {
            nodes,
            inputs: vec![],
            outputs: vec![],
            next_id,
        };
        g.set_input_ids(inputs);
        g.set_output_ids(outputs);
        g
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Getters

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<L>> {
        self.nodes.get(&id)
    }

    /// Like [`OpenGraph::node`], but fails with [`Error::InvalidReference`].
    pub fn try_node(&self, id: NodeId) -> Result<&Node<L>> {
        self.nodes.get(&id).ok_or(Error::InvalidReference(id))
    }

    pub fn label(&self, id: NodeId) -> Option<&L> {
        self.nodes.get(&id).map(|n| &n.label)
    }

    /// All nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<L>> + '_ {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn is_input(&self, id: NodeId) -> bool {
        self.inputs.contains(&id)
    }

    pub fn is_output(&self, id: NodeId) -> bool {
        self.outputs.contains(&id)
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Setters

    pub fn set_label(&mut self, id: NodeId, label: L) -> Result<()> {
        let node = self.nodes.get_mut(&id).ok_or(Error::InvalidReference(id))?;
        node.label = label;
        Ok(())
    }

    /// Replace the input list without validation. Duplicates are removed, keeping the first.
    pub fn set_input_ids(&mut self, inputs: Vec<NodeId>) {
        self.inputs = dedup(inputs);
    }

    /// Replace the output list without validation. Duplicates are removed, keeping the first.
    pub fn set_output_ids(&mut self, outputs: Vec<NodeId>) {
        self.outputs = dedup(outputs);
    }

    /// Register an existing node as an input port.
    ///
    /// Does nothing if `id` already is an input.
    pub fn add_input_id(&mut self, id: NodeId) -> Result<()> {
        let node = self.try_node(id)?;
        if node.indegree() > 0 {
            return Err(Error::port(id, PortViolationKind::HasParents));
        }
        if node.sole_child().is_none() {
            return Err(Error::port(id, PortViolationKind::NotSingleChild));
        }
        if self.is_output(id) {
            return Err(Error::port(id, PortViolationKind::InputIsOutput));
        }
        if !self.is_input(id) {
            self.inputs.push(id);
        }
        Ok(())
    }

    /// Register an existing node as an output port.
    ///
    /// Does nothing if `id` already is an output.
    pub fn add_output_id(&mut self, id: NodeId) -> Result<()> {
        let node = self.try_node(id)?;
        if node.outdegree() > 0 {
            return Err(Error::port(id, PortViolationKind::HasChildren));
        }
        if node.sole_parent().is_none() {
            return Err(Error::port(id, PortViolationKind::NotSingleParent));
        }
        if self.is_input(id) {
            return Err(Error::port(id, PortViolationKind::InputIsOutput));
        }
        if !self.is_output(id) {
            self.outputs.push(id);
        }
        Ok(())
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Mutation

    fn new_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Check that `src → tgt` may be added: both exist, `src` is no output, `tgt` is no input.
    fn check_edge(&self, src: NodeId, tgt: NodeId) -> Result<()> {
        for id in [src, tgt] {
            if !self.contains(id) {
                return Err(Error::InvalidReference(id));
            }
        }
        if self.is_output(src) {
            return Err(Error::port(src, PortViolationKind::OutputAsParent));
        }
        if self.is_input(tgt) {
            return Err(Error::port(tgt, PortViolationKind::InputAsChild));
        }
        Ok(())
    }

    /// Record `m` parallel edges `src → tgt` on both endpoints. Both must exist.
    pub(crate) fn connect(&mut self, src: NodeId, tgt: NodeId, m: usize) {
        if let Some(s) = self.nodes.get_mut(&src) {
            s.add_child_n(tgt, m);
        }
        if let Some(t) = self.nodes.get_mut(&tgt) {
            t.add_parent_n(src, m);
        }
    }

    /// Add a node labelled `label` and wire it to `parents` and `children`.
    ///
    /// An id repeated in `parents` (or `children`) adds one parallel edge per occurrence.
    /// Fails without modifying the graph if an id does not exist, a parent is an output, or a
    /// child is an input.
    pub fn add_node(&mut self, label: L, parents: &[NodeId], children: &[NodeId]) -> Result<NodeId> {
        for &p in parents {
            if !self.contains(p) {
                return Err(Error::InvalidReference(p));
            }
        }
        for &c in children {
            if !self.contains(c) {
                return Err(Error::InvalidReference(c));
            }
        }
        if let Some(&p) = parents.iter().find(|p| self.is_output(**p)) {
            return Err(Error::port(p, PortViolationKind::OutputAsParent));
        }
        if let Some(&c) = children.iter().find(|c| self.is_input(**c)) {
            return Err(Error::port(c, PortViolationKind::InputAsChild));
        }

        let id = self.new_id();
        self.nodes.insert(id, Node::new(id, label, [], []));
        for &p in parents {
            self.connect(p, id, 1);
        }
        for &c in children {
            self.connect(id, c, 1);
        }
        Ok(id)
    }

    /// Add one edge `src → tgt`.
    pub fn add_edge(&mut self, src: NodeId, tgt: NodeId) -> Result<()> {
        self.check_edge(src, tgt)?;
        self.connect(src, tgt, 1);
        Ok(())
    }

    /// Add every edge in `edges`, checking all of them before adding any.
    pub fn add_edges(&mut self, edges: &[(NodeId, NodeId)]) -> Result<()> {
        for &(src, tgt) in edges {
            self.check_edge(src, tgt)?;
        }
        for &(src, tgt) in edges {
            self.connect(src, tgt, 1);
        }
        Ok(())
    }

    /// Remove one edge `src → tgt`, failing if either node does not exist.
    pub fn remove_edge(&mut self, src: NodeId, tgt: NodeId) -> Result<()> {
        self.try_node(src)?;
        self.try_node(tgt)?;
        self.remove_edges(&[(src, tgt)]);
        Ok(())
    }

    /// Remove one edge for each pair `(src, tgt)`. Missing nodes or edges are skipped.
    pub fn remove_edges(&mut self, edges: &[(NodeId, NodeId)]) {
        for &(src, tgt) in edges {
            if !(self.contains(src) && self.contains(tgt)) {
                continue;
            }
            if let Some(s) = self.nodes.get_mut(&src) {
                s.remove_child_once(tgt);
            }
            if let Some(t) = self.nodes.get_mut(&tgt) {
                t.remove_parent_once(src);
            }
        }
    }

    /// Remove *all* edges between each pair, in both directions. Missing nodes are skipped.
    pub fn remove_parallel_edges(&mut self, pairs: &[(NodeId, NodeId)]) {
        for &(a, b) in pairs {
            if !(self.contains(a) && self.contains(b)) {
                continue;
            }
            for (src, tgt) in [(a, b), (b, a)] {
                if let Some(s) = self.nodes.get_mut(&src) {
                    s.remove_child(tgt);
                }
                if let Some(t) = self.nodes.get_mut(&tgt) {
                    t.remove_parent(src);
                }
            }
        }
    }

    /// Remove a single node, failing with [`Error::InvalidReference`] if it does not exist.
    pub fn remove_node_by_id(&mut self, id: NodeId) -> Result<()> {
        self.try_node(id)?;
        self.remove_nodes_by_id(&[id]);
        Ok(())
    }

    /// Remove nodes, severing their edges and dropping them from the port lists.
    ///
    /// Unknown ids are skipped, so removing the same set twice is a no-op.
    pub fn remove_nodes_by_id(&mut self, ids: &[NodeId]) {
        for &id in ids {
            let Some(node) = self.nodes.remove(&id) else {
                continue;
            };
            for p in node.parent_ids() {
                if let Some(parent) = self.nodes.get_mut(&p) {
                    parent.remove_child(id);
                }
            }
            for c in node.children_ids() {
                if let Some(child) = self.nodes.get_mut(&c) {
                    child.remove_parent(id);
                }
            }
            self.inputs.retain(|&i| i != id);
            self.outputs.retain(|&o| o != id);
        }
    }

    /// Fuse node `b` into node `a`.
    ///
    /// Every edge touching `b` is moved onto `a` (edges between `a` and `b` become loops on `a`),
    /// `b` is deleted, and `a` keeps its label and takes over the port slots of `b`. Fails without
    /// modifying the graph if the fused node could not stay a valid port.
    pub fn merge_nodes_by_id(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        self.fuse(a, b).map(drop)
    }

    /// Like [`OpenGraph::merge_nodes_by_id`], but the fused node takes the label of `b`.
    pub fn merge_nodes_taking_label(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        if let Some(label) = self.fuse(a, b)? {
            if let Some(node) = self.nodes.get_mut(&a) {
                node.label = label;
            }
        }
        Ok(())
    }

    // Returns the label of `b`, or None when `a == b`.
    fn fuse(&mut self, a: NodeId, b: NodeId) -> Result<Option<L>> {
        self.check_fusable(a, b)?;
        if a == b {
            return Ok(None);
        }

        let Some(node_b) = self.nodes.remove(&b) else {
            return Err(Error::InvalidReference(b));
        };
        let Node {
            label,
            parents,
            children,
            ..
        } = node_b;
        for (p, m) in parents {
            if p == b {
                // loop on b, becomes a loop on a
                self.connect(a, a, m);
                continue;
            }
            if let Some(parent) = self.nodes.get_mut(&p) {
                parent.remove_child(b);
            }
            self.connect(p, a, m);
        }
        for (c, m) in children {
            if c == b {
                continue;
            }
            if let Some(child) = self.nodes.get_mut(&c) {
                child.remove_parent(b);
            }
            self.connect(a, c, m);
        }
        for port in self.inputs.iter_mut().chain(self.outputs.iter_mut()) {
            if *port == b {
                *port = a;
            }
        }
        trace!("merged {} into {}", b, a);
        Ok(Some(label))
    }

    fn check_fusable(&self, a: NodeId, b: NodeId) -> Result<()> {
        let node_a = self.try_node(a)?;
        let node_b = self.try_node(b)?;
        if a == b {
            return Ok(());
        }

        // both endpoints of an a-b edge survive on the fused node, so degrees simply add
        let indegree = node_a.indegree() + node_b.indegree();
        let outdegree = node_a.outdegree() + node_b.outdegree();
        let (input_a, input_b) = (self.is_input(a), self.is_input(b));
        let (output_a, output_b) = (self.is_output(a), self.is_output(b));

        if input_a || input_b {
            if node_b.indegree() > 0 {
                return Err(Error::port(b, PortViolationKind::HasParents));
            }
            if node_a.indegree() > 0 {
                return Err(Error::port(a, PortViolationKind::HasParents));
            }
            if (input_a && input_b) || outdegree > 1 {
                let blamed = if input_a { b } else { a };
                return Err(Error::port(blamed, PortViolationKind::NotSingleChild));
            }
        }
        if output_a || output_b {
            if node_b.outdegree() > 0 {
                return Err(Error::port(b, PortViolationKind::HasChildren));
            }
            if node_a.outdegree() > 0 {
                return Err(Error::port(a, PortViolationKind::HasChildren));
            }
            if (output_a && output_b) || indegree > 1 {
                let blamed = if output_a { b } else { a };
                return Err(Error::port(blamed, PortViolationKind::NotSingleParent));
            }
        }
        Ok(())
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Well-formedness

    /// Check every invariant listed on [`OpenGraph`], with strict output arity.
    pub fn is_well_formed(&self) -> bool {
        self.is_well_formed_with(OutputArity::Strict)
    }

    pub fn is_well_formed_with(&self, arity: OutputArity) -> bool {
        for &i in &self.inputs {
            let Some(node) = self.nodes.get(&i) else {
                return false;
            };
            if node.indegree() != 0 || node.sole_child().is_none() {
                return false;
            }
        }

        for &o in &self.outputs {
            let Some(node) = self.nodes.get(&o) else {
                return false;
            };
            let lonely = arity == OutputArity::Relaxed && node.indegree() == 0;
            if node.outdegree() != 0 || !(lonely || node.sole_parent().is_some()) {
                return false;
            }
        }

        self.nodes.iter().all(|(&id, node)| {
            node.id == id
                && node.children().iter().all(|(c, &m)| {
                    self.nodes
                        .get(c)
                        .is_some_and(|child| child.parent_multiplicity(id) == m)
                })
                && node.parents().iter().all(|(p, &m)| {
                    self.nodes
                        .get(p)
                        .is_some_and(|parent| parent.child_multiplicity(id) == m)
                })
        })
    }
}

impl<L: Default> OpenGraph<L> {
    /// Add a fresh input port whose only child is `id`, returning the new port.
    ///
    /// Fails if `id` is an input, or an output that already has a parent.
    pub fn add_input_node(&mut self, id: NodeId) -> Result<NodeId> {
        let node = self.try_node(id)?;
        if self.is_input(id) {
            return Err(Error::port(id, PortViolationKind::AlreadyInput));
        }
        if self.is_output(id) && node.indegree() > 0 {
            return Err(Error::port(id, PortViolationKind::HasParents));
        }
        // `id` is no input, so this cannot fail
        let port = self.add_node(L::default(), &[], &[id])?;
        self.inputs.push(port);
        Ok(port)
    }

    /// Add a fresh output port whose only parent is `id`, returning the new port.
    ///
    /// Fails if `id` is an output, or an input that already has a child.
    pub fn add_output_node(&mut self, id: NodeId) -> Result<NodeId> {
        let node = self.try_node(id)?;
        if self.is_output(id) {
            return Err(Error::port(id, PortViolationKind::AlreadyOutput));
        }
        if self.is_input(id) && node.outdegree() > 0 {
            return Err(Error::port(id, PortViolationKind::HasChildren));
        }
        let port = self.add_node(L::default(), &[id], &[])?;
        self.outputs.push(port);
        Ok(port)
    }
}

fn dedup(ids: Vec<NodeId>) -> Vec<NodeId> {
    let mut seen = BTreeSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
