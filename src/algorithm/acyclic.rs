use crate::error::{Error, Result};
use crate::graph::{NodeId, OpenGraph};

use std::collections::{BTreeMap, VecDeque};

impl<L> OpenGraph<L> {
    /// Kahn's algorithm: repeatedly strip zero-indegree nodes.
    ///
    /// Returns the nodes in the order they were stripped, and the residue of nodes that could
    /// never be stripped. The residue is empty exactly when the graph is acyclic.
    pub(crate) fn kahn(&self) -> (Vec<NodeId>, Vec<NodeId>) {
        let mut indegree: BTreeMap<NodeId, usize> =
            self.nodes().map(|n| (n.id(), n.indegree())).collect();

        let mut frontier: VecDeque<NodeId> = indegree
            .iter()
            .filter(|(_, &d)| d == 0)
            .map(|(&id, _)| id)
            .collect();

        let mut order = Vec::with_capacity(self.len());
        while let Some(id) = frontier.pop_front() {
            order.push(id);
            for (c, &m) in self.nodes[&id].children() {
                if let Some(d) = indegree.get_mut(c).filter(|d| **d > 0) {
                    *d = d.saturating_sub(m);
                    if *d == 0 {
                        frontier.push_back(*c);
                    }
                }
            }
        }

        let residue = indegree
            .into_iter()
            .filter(|&(_, d)| d > 0)
            .map(|(id, _)| id)
            .collect();
        (order, residue)
    }

    /// Returns true if some node lies on a directed cycle (a self-loop counts).
    pub fn is_cyclic(&self) -> bool {
        let (_, residue) = self.kahn();
        !residue.is_empty()
    }

    pub fn is_acyclic(&self) -> bool {
        !self.is_cyclic()
    }

    /// A topological order of all nodes.
    ///
    /// # Errors
    ///
    /// [`Error::CyclicGraph`] if no such order exists.
    pub fn topological_order(&self) -> Result<Vec<NodeId>> {
        let (order, residue) = self.kahn();
        if residue.is_empty() {
            Ok(order)
        } else {
            Err(Error::CyclicGraph)
        }
    }
}
