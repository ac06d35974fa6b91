//! Breadth-first topological leveling of acyclic graphs.
//!
//! Level 0 holds the children of the inputs together with every parentless non-input node.
//! Level `k + 1` holds the children of level `k` not already placed; a node stays in the first
//! level that reaches it. Input ports belong to no level.
use crate::error::{Error, Result};
use crate::graph::{NodeId, OpenGraph};

use std::collections::BTreeSet;

impl<L> OpenGraph<L> {
    /// Compute the levels of an acyclic graph, each sorted by id.
    ///
    /// # Errors
    ///
    /// [`Error::CyclicGraph`] if the graph has a cycle.
    pub fn topological_sort(&self) -> Result<Vec<Vec<NodeId>>> {
        if self.is_cyclic() {
            return Err(Error::CyclicGraph);
        }

        let mut placed = BTreeSet::new();
        let mut place = |id: NodeId, level: &mut Vec<NodeId>| {
            if !self.is_input(id) && placed.insert(id) {
                level.push(id);
            }
        };

        let mut level = Vec::new();
        for &i in self.inputs() {
            for c in self.nodes[&i].children_ids() {
                place(c, &mut level);
            }
        }
        for node in self.nodes() {
            if node.indegree() == 0 {
                place(node.id(), &mut level);
            }
        }

        let mut levels = Vec::new();
        while !level.is_empty() {
            level.sort();
            let mut next = Vec::new();
            for id in &level {
                for c in self.nodes[id].children_ids() {
                    place(c, &mut next);
                }
            }
            levels.push(level);
            level = next;
        }
        Ok(levels)
    }

    /// The level of node `id`, or `None` for an input port.
    pub fn node_depth(&self, id: NodeId) -> Result<Option<usize>> {
        self.try_node(id)?;
        let levels = self.topological_sort()?;
        Ok(levels.iter().position(|level| level.contains(&id)))
    }

    /// The number of levels.
    pub fn depth(&self) -> Result<usize> {
        Ok(self.topological_sort()?.len())
    }
}
