use open_digraphs::graph::OpenGraph;

use super::strategy::arb_open_graph;

use proptest::prelude::*;

proptest! {
    #[test]
    fn test_separate_indices_disjoint(f in arb_open_graph(), g in arb_open_graph()) {
        let mut g = g;
        let before = g.clone();
        g.separate_indices(&f);
        prop_assert!(g.is_id_disjoint(&f));
        prop_assert!(g.is_well_formed());
        prop_assert_eq!(g.len(), before.len());
        prop_assert_eq!(g.adjacency_matrix().1, before.adjacency_matrix().1);
    }

    #[test]
    fn test_shift_moves_every_id(g in arb_open_graph(), offset in 0..100usize) {
        let mut shifted = g.clone();
        shifted.shift_indices(offset);
        prop_assert_eq!(shifted.min_id().map(|i| i.0), g.min_id().map(|i| i.0 + offset));
        prop_assert_eq!(shifted.inputs().len(), g.inputs().len());
        prop_assert!(shifted.is_well_formed());
    }

    #[test]
    fn test_parallel_is_additive(f in arb_open_graph(), g in arb_open_graph()) {
        let fg = OpenGraph::parallel([&f, &g]);
        prop_assert!(fg.is_well_formed());
        prop_assert_eq!(fg.len(), f.len() + g.len());
        prop_assert_eq!(fg.inputs().len(), f.inputs().len() + g.inputs().len());
        prop_assert_eq!(fg.outputs().len(), f.outputs().len() + g.outputs().len());

        // f keeps its ids, and no edge crosses between the two copies
        prop_assert_eq!(&fg.inputs()[..f.inputs().len()], f.inputs());
        let edges = |h: &OpenGraph<()>| h.nodes().map(|n| n.outdegree()).sum::<usize>();
        prop_assert_eq!(edges(&fg), edges(&f) + edges(&g));
        let (count, _) = fg.connected_components();
        prop_assert_eq!(count, f.connected_components().0 + g.connected_components().0);
    }
}
