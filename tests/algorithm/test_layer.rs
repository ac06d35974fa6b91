use open_digraphs::prelude::*;

use crate::graph::strategy::arb_dag;
use crate::theory::graphs::ancestry;

use proptest::prelude::*;
use std::collections::BTreeSet;

fn ids(raw: &[usize]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId).collect()
}

#[test]
fn test_levels_of_ancestry_graph() {
    let g = ancestry();
    let levels = g.topological_sort().unwrap();
    assert_eq!(
        levels,
        vec![ids(&[0, 1, 2]), ids(&[3, 4, 5, 8]), ids(&[6, 7]), ids(&[9, 12])]
    );
    assert_eq!(g.depth().unwrap(), 4);
    assert_eq!(g.node_depth(NodeId(5)).unwrap(), Some(1));
    assert_eq!(g.node_depth(NodeId(12)).unwrap(), Some(3));
    // inputs are never placed
    assert_eq!(g.node_depth(NodeId(10)).unwrap(), None);
    assert_eq!(
        g.node_depth(NodeId(99)),
        Err(Error::InvalidReference(NodeId(99)))
    );
}

#[test]
fn test_empty_graph_has_no_levels() {
    let g: OpenGraph<()> = OpenGraph::empty();
    assert!(g.topological_sort().unwrap().is_empty());
    assert_eq!(g.depth().unwrap(), 0);
}

proptest! {
    #[test]
    fn test_levels_partition_non_inputs(g in arb_dag()) {
        let levels = g.topological_sort().unwrap();
        let placed: Vec<NodeId> = levels.iter().flatten().copied().collect();
        let unique: BTreeSet<NodeId> = placed.iter().copied().collect();
        prop_assert_eq!(placed.len(), unique.len());

        let expected: BTreeSet<NodeId> = g.node_ids().filter(|&id| !g.is_input(id)).collect();
        prop_assert_eq!(unique, expected);

        // every node past level 0 is reached from the level right above it
        for (k, level) in levels.iter().enumerate().skip(1) {
            for id in level {
                let parents: Vec<NodeId> = g.node(*id).unwrap().parent_ids().collect();
                prop_assert!(parents.iter().any(|p| levels[k - 1].contains(p)));
            }
        }
    }
}
