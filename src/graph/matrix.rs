use super::node::{Node, NodeId};
use super::open_graph::OpenGraph;
use crate::error::{Error, Result};

impl<L> OpenGraph<L> {
    /// The adjacency matrix of the graph, rows and columns in ascending id order.
    ///
    /// Entry `[i][j]` is the multiplicity of the edge from the `i`th node to the `j`th.
    pub fn adjacency_matrix(&self) -> (Vec<NodeId>, Vec<Vec<usize>>) {
        let ids: Vec<NodeId> = self.node_ids().collect();
        let matrix = self
            .nodes()
            .map(|node| {
                ids.iter()
                    .map(|&j| node.child_multiplicity(j))
                    .collect::<Vec<_>>()
            })
            .collect();
        (ids, matrix)
    }
}

impl<L: Default> OpenGraph<L> {
    /// Build a port-less graph with one node per row of `matrix` and `matrix[i][j]` parallel edges
    /// from node `i` to node `j`. Node `i` gets id `NodeId(i)`.
    ///
    /// A row whose length differs from the number of rows is an [`Error::ArityMismatch`].
    pub fn from_adjacency_matrix(matrix: &[Vec<usize>]) -> Result<Self> {
        let n = matrix.len();
        if let Some(row) = matrix.iter().find(|row| row.len() != n) {
            return Err(Error::ArityMismatch {
                expected: n,
                found: row.len(),
            });
        }

        let mut g = OpenGraph::empty();
        for i in 0..n {
            let id = NodeId(i);
            g.nodes.insert(id, Node::new(id, L::default(), [], []));
        }
        g.next_id = n;
        for (i, row) in matrix.iter().enumerate() {
            for (j, &m) in row.iter().enumerate() {
                g.connect(NodeId(i), NodeId(j), m);
            }
        }
        Ok(g)
    }
}
