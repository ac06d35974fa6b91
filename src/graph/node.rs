use std::collections::BTreeMap;

use core::fmt;

/// An opaque node handle, unique within the [`crate::graph::OpenGraph`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N({})", self.0)
    }
}

/// A node of an open multigraph.
///
/// A node only keeps local bookkeeping: its label, and for each neighbour the number of
/// parallel edges (the *multiplicity*) connecting it. Zero multiplicities are never stored.
/// Nothing here checks that the neighbour agrees; keeping parent and child maps symmetric is
/// the job of the owning graph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node<L> {
    pub(crate) id: NodeId,
    pub(crate) label: L,
    pub(crate) parents: BTreeMap<NodeId, usize>,
    pub(crate) children: BTreeMap<NodeId, usize>,
}

impl<L> Node<L> {
    /// Create a node. Repeated neighbours add up their multiplicities and zeros are dropped.
    pub fn new(
        id: NodeId,
        label: L,
        parents: impl IntoIterator<Item = (NodeId, usize)>,
        children: impl IntoIterator<Item = (NodeId, usize)>,
    ) -> Self {
        Node {
            id,
            label,
            parents: tally(parents),
            children: tally(children),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn set_label(&mut self, label: L) {
        self.label = label;
    }

    pub fn parents(&self) -> &BTreeMap<NodeId, usize> {
        &self.parents
    }

    pub fn children(&self) -> &BTreeMap<NodeId, usize> {
        &self.children
    }

    pub fn parent_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.parents.keys().copied()
    }

    pub fn children_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.keys().copied()
    }

    /// Multiplicity of the edge `parent → self`, or 0.
    pub fn parent_multiplicity(&self, parent: NodeId) -> usize {
        self.parents.get(&parent).copied().unwrap_or(0)
    }

    /// Multiplicity of the edge `self → child`, or 0.
    pub fn child_multiplicity(&self, child: NodeId) -> usize {
        self.children.get(&child).copied().unwrap_or(0)
    }

    pub fn add_parent(&mut self, parent: NodeId) {
        self.add_parent_n(parent, 1);
    }

    pub fn add_child(&mut self, child: NodeId) {
        self.add_child_n(child, 1);
    }

    pub(crate) fn add_parent_n(&mut self, parent: NodeId, m: usize) {
        if m > 0 {
            *self.parents.entry(parent).or_insert(0) += m;
        }
    }

    pub(crate) fn add_child_n(&mut self, child: NodeId, m: usize) {
        if m > 0 {
            *self.children.entry(child).or_insert(0) += m;
        }
    }

    /// Remove a single edge from `parent`. Does nothing if there is none.
    pub fn remove_parent_once(&mut self, parent: NodeId) {
        decrement(&mut self.parents, parent);
    }

    /// Remove a single edge to `child`. Does nothing if there is none.
    pub fn remove_child_once(&mut self, child: NodeId) {
        decrement(&mut self.children, child);
    }

    /// Remove every edge from `parent`, returning the multiplicity removed.
    pub fn remove_parent(&mut self, parent: NodeId) -> usize {
        self.parents.remove(&parent).unwrap_or(0)
    }

    /// Remove every edge to `child`, returning the multiplicity removed.
    pub fn remove_child(&mut self, child: NodeId) -> usize {
        self.children.remove(&child).unwrap_or(0)
    }

    /// Number of incoming edges, counted with multiplicity.
    pub fn indegree(&self) -> usize {
        self.parents.values().sum()
    }

    /// Number of outgoing edges, counted with multiplicity.
    pub fn outdegree(&self) -> usize {
        self.children.values().sum()
    }

    pub fn degree(&self) -> usize {
        self.indegree() + self.outdegree()
    }

    /// The unique neighbour of a map with a single entry of multiplicity 1.
    pub(crate) fn sole_parent(&self) -> Option<NodeId> {
        sole(&self.parents)
    }

    pub(crate) fn sole_child(&self) -> Option<NodeId> {
        sole(&self.children)
    }

    /// Renumber this node and all of its neighbours by `offset`.
    pub(crate) fn shift(&mut self, offset: usize) {
        self.id = NodeId(self.id.0 + offset);
        self.parents = shift_keys(&self.parents, offset);
        self.children = shift_keys(&self.children, offset);
    }
}

fn tally(entries: impl IntoIterator<Item = (NodeId, usize)>) -> BTreeMap<NodeId, usize> {
    let mut map = BTreeMap::new();
    for (id, m) in entries {
        if m > 0 {
            *map.entry(id).or_insert(0) += m;
        }
    }
    map
}

fn decrement(map: &mut BTreeMap<NodeId, usize>, id: NodeId) {
    if let Some(m) = map.get_mut(&id) {
        if *m <= 1 {
            map.remove(&id);
        } else {
            *m -= 1;
        }
    }
}

fn sole(map: &BTreeMap<NodeId, usize>) -> Option<NodeId> {
    let mut entries = map.iter();
    match (entries.next(), entries.next()) {
        (Some((&id, &1)), None) => Some(id),
        _ => None,
    }
}

fn shift_keys(map: &BTreeMap<NodeId, usize>, offset: usize) -> BTreeMap<NodeId, usize> {
    map.iter()
        .map(|(id, &m)| (NodeId(id.0 + offset), m))
        .collect()
}
