//! Weakly connected components.
use crate::graph::{NodeId, OpenGraph};

use std::collections::{BTreeMap, BTreeSet};

impl<L> OpenGraph<L> {
    /// The number of connected components (ignoring edge direction) and the component index
    /// of every node.
    ///
    /// Components are numbered in ascending order of their smallest node id.
    pub fn connected_components(&self) -> (usize, BTreeMap<NodeId, usize>) {
        self.components_from(self.node_ids())
    }

    /// Flood from each seed not yet assigned. Renumbers at the end so the result does not
    /// depend on the seed order.
    fn components_from(&self, seeds: impl IntoIterator<Item = NodeId>) -> (usize, BTreeMap<NodeId, usize>) {
        let mut component: BTreeMap<NodeId, usize> = BTreeMap::new();
        let mut count = 0;
        for seed in seeds {
            if component.contains_key(&seed) || !self.contains(seed) {
                continue;
            }
            let mut stack = vec![seed];
            component.insert(seed, count);
            while let Some(u) = stack.pop() {
                let node = &self.nodes[&u];
                for v in node.children_ids().chain(node.parent_ids()) {
                    if component.insert(v, count).is_none() {
                        stack.push(v);
                    }
                }
            }
            count += 1;
        }

        // ascending keys: the first time an index shows up is at its smallest node
        let mut renumber = BTreeMap::new();
        for c in component.values_mut() {
            let next = renumber.len();
            *c = *renumber.entry(*c).or_insert(next);
        }
        (count, component)
    }
}

impl<L: Clone> OpenGraph<L> {
    /// Split the graph into one graph per connected component, in component order.
    ///
    /// Each part keeps the original ids and the relative order of its ports.
    pub fn split_components(&self) -> Vec<OpenGraph<L>> {
        let (count, component) = self.connected_components();
        let mut members = vec![BTreeSet::new(); count];
        for (&id, &c) in &component {
            members[c].insert(id);
        }

        members
            .into_iter()
            .map(|ids| {
                let keep = |ports: &[NodeId]| -> Vec<NodeId> {
                    ports.iter().copied().filter(|p| ids.contains(p)).collect()
                };
                let mut part = OpenGraph::from_parts(
                    keep(&self.inputs),
                    keep(&self.outputs),
                    ids.iter().map(|id| self.nodes[id].clone()),
                );
                part.next_id = self.next_id;
                part
            })
            .collect()
    }
}
