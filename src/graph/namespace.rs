//! Id-range utilities used to merge independently built graphs without id collisions.
use super::node::NodeId;
use super::open_graph::OpenGraph;

use core::ops::RangeInclusive;
use log::trace;

impl<L> OpenGraph<L> {
    /// Smallest node id, if any.
    pub fn min_id(&self) -> Option<NodeId> {
        self.nodes.keys().next().copied()
    }

    /// Largest node id, if any.
    pub fn max_id(&self) -> Option<NodeId> {
        self.nodes.keys().next_back().copied()
    }

    /// The closed range of raw ids spanned by this graph's nodes.
    pub fn id_range(&self) -> Option<RangeInclusive<usize>> {
        Some(self.min_id()?.0..=self.max_id()?.0)
    }

    /// True when no id of `self` could collide with an id of `other`.
    pub fn is_id_disjoint(&self, other: &Self) -> bool {
        match (self.id_range(), other.id_range()) {
            (Some(a), Some(b)) => a.end() < b.start() || b.end() < a.start(),
            _ => true,
        }
    }

    /// Add `offset` to every id: node keys, stored ids, neighbour maps and port lists.
    pub fn shift_indices(&mut self, offset: usize) {
        if offset == 0 {
            return;
        }
        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = nodes
            .into_values()
            .map(|mut n| {
                n.shift(offset);
                (n.id, n)
            })
            .collect();
        self.inputs.iter_mut().for_each(|i| i.0 += offset);
        self.outputs.iter_mut().for_each(|o| o.0 += offset);
        self.next_id += offset;
        trace!("shifted ids by {}", offset);
    }

    /// Shift `self` so that all of its ids lie strictly above those of `other`.
    ///
    /// Does nothing when the ranges are already ordered that way. Returns the offset applied.
    pub fn separate_indices(&mut self, other: &Self) -> usize {
        let (Some(own_min), Some(other_max)) = (self.min_id(), other.max_id()) else {
            return 0;
        };
        // also clear other's allocator, so ids it issues later cannot collide either
        let floor = other_max.0.max(other.next_id.saturating_sub(1)) + 1;
        let offset = floor.saturating_sub(own_min.0);
        self.shift_indices(offset);
        offset
    }
}
