//! Distance queries. Every edge has weight 1, so a breadth-first search gives exact distances.
use crate::error::Result;
use crate::graph::{NodeId, OpenGraph};

use std::collections::{BTreeMap, VecDeque};

/// Which edges a search may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Follow edges forwards, from a node to its children.
    Children,
    /// Follow edges backwards, from a node to its parents.
    Parents,
    /// Ignore edge direction.
    #[default]
    Both,
}

/// Distance of every reached node from the source.
pub type Distances = BTreeMap<NodeId, usize>;

/// The node each reached node was first discovered from. The source has no entry.
pub type Predecessors = BTreeMap<NodeId, NodeId>;

impl<L> OpenGraph<L> {
    fn neighbours(&self, id: NodeId, direction: Direction) -> Vec<NodeId> {
        let node = &self.nodes[&id];
        match direction {
            Direction::Children => node.children_ids().collect(),
            Direction::Parents => node.parent_ids().collect(),
            Direction::Both => node.children_ids().chain(node.parent_ids()).collect(),
        }
    }

    /// Distances from `src` to every node reachable in `direction`.
    ///
    /// If `target` is given the search stops as soon as it is reached; distances of nodes
    /// discovered so far are still exact.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidReference`] if `src` or `target` name no node.
    pub fn distances(
        &self,
        src: NodeId,
        target: Option<NodeId>,
        direction: Direction,
    ) -> Result<(Distances, Predecessors)> {
        self.try_node(src)?;
        if let Some(t) = target {
            self.try_node(t)?;
        }

        let mut dist = BTreeMap::from([(src, 0)]);
        let mut prev = BTreeMap::new();
        let mut queue = VecDeque::from([src]);
        while let Some(u) = queue.pop_front() {
            if Some(u) == target {
                break;
            }
            let du = dist[&u];
            for v in self.neighbours(u, direction) {
                if !dist.contains_key(&v) {
                    dist.insert(v, du + 1);
                    prev.insert(v, u);
                    queue.push_back(v);
                }
            }
        }
        Ok((dist, prev))
    }

    /// A shortest directed path from `src` to `tgt`, both included, or `None` if `tgt` is
    /// unreachable.
    pub fn shortest_path(&self, src: NodeId, tgt: NodeId) -> Result<Option<Vec<NodeId>>> {
        let (_, prev) = self.distances(src, Some(tgt), Direction::Children)?;
        Ok(walk_back(&prev, src, tgt))
    }

    /// Strict common ancestors of `a` and `b`, mapped to their distances from `a` and from `b`.
    ///
    /// Port nodes are left out.
    pub fn common_ancestry(&self, a: NodeId, b: NodeId) -> Result<BTreeMap<NodeId, (usize, usize)>> {
        let (dist_a, prev_a) = self.distances(a, None, Direction::Parents)?;
        let (dist_b, prev_b) = self.distances(b, None, Direction::Parents)?;

        Ok(prev_a
            .keys()
            .filter(|id| prev_b.contains_key(*id))
            .filter(|&&id| !self.is_input(id) && !self.is_output(id))
            .map(|&id| (id, (dist_a[&id], dist_b[&id])))
            .collect())
    }

    /// A longest directed path from `src` to `tgt` and its number of edges, or `None` if `tgt`
    /// is unreachable.
    ///
    /// # Errors
    ///
    /// [`crate::Error::CyclicGraph`] if the graph has a cycle, where longest paths are unbounded.
    pub fn longest_path(&self, src: NodeId, tgt: NodeId) -> Result<Option<(Vec<NodeId>, usize)>> {
        self.try_node(src)?;
        self.try_node(tgt)?;
        let order = self.topological_order()?;

        let mut dist: BTreeMap<NodeId, usize> = BTreeMap::from([(src, 0)]);
        let mut prev = BTreeMap::new();
        for u in order.into_iter().skip_while(|&u| u != src) {
            let Some(&du) = dist.get(&u) else {
                continue;
            };
            if u == tgt {
                break;
            }
            for v in self.nodes[&u].children_ids() {
                if dist.get(&v).map_or(true, |&dv| dv < du + 1) {
                    dist.insert(v, du + 1);
                    prev.insert(v, u);
                }
            }
        }

        let Some(&length) = dist.get(&tgt) else {
            return Ok(None);
        };
        Ok(walk_back(&prev, src, tgt).map(|path| (path, length)))
    }
}

fn walk_back(prev: &Predecessors, src: NodeId, tgt: NodeId) -> Option<Vec<NodeId>> {
    let mut path = vec![tgt];
    let mut cur = tgt;
    while cur != src {
        cur = *prev.get(&cur)?;
        path.push(cur);
    }
    path.reverse();
    Some(path)
}
