use open_digraphs::prelude::*;

use crate::theory::circuits::{parent_labels, RuleFixture};

use test_log::test;

#[test]
fn test_copy_duplicates_constant() {
    let RuleFixture {
        mut circ,
        in_copy,
        copy,
        and,
        or,
        ..
    } = RuleFixture::new();
    assert!(circ.rewrite_copy(in_copy).unwrap());

    assert!(!circ.contains(in_copy));
    assert!(!circ.contains(copy));
    assert_eq!(circ.node(and).unwrap().indegree(), 2);
    assert_eq!(circ.node(or).unwrap().indegree(), 2);
    assert_eq!(parent_labels(&circ, and), vec!["0", "1"]);
    assert_eq!(parent_labels(&circ, or), vec!["0", "1"]);
    assert!(circ.is_well_formed());
}

#[test]
fn test_copy_with_three_children() {
    let mut c = BoolCirc::empty();
    let src = c.add_node(Gate::Const(true), &[], &[]).unwrap();
    let copy = c.add_node(Gate::Copy, &[src], &[]).unwrap();
    let taps: Vec<NodeId> = (0..3)
        .map(|_| c.add_node(Gate::Copy, &[copy], &[]).unwrap())
        .collect();

    assert!(c.rewrite_copy(src).unwrap());
    assert!(!c.contains(copy));
    assert!(!c.contains(src));
    for t in taps {
        assert_eq!(parent_labels(&c, t), vec!["1"]);
        let p = c.node(t).unwrap().parent_ids().next().unwrap();
        assert!(c.is_source(p));
        assert_eq!(c.node(p).unwrap().outdegree(), 1);
    }
}

#[test]
fn test_rules_ignore_other_gates() {
    let mut f = RuleFixture::new();
    let before = f.circ.clone();
    // in_and feeds `&`, not a copy or a negation
    assert!(!f.circ.rewrite_copy(f.in_and).unwrap());
    assert!(!f.circ.rewrite_not(f.in_and).unwrap());
    assert!(!f.circ.rewrite_xor(f.in_and).unwrap());
    // not a source at all
    assert!(!f.circ.rewrite_source(f.and).unwrap());
    assert!(!f.circ.rewrite_source(NodeId(1000)).unwrap());
    assert_eq!(f.circ, before);
}

#[test]
fn test_not_negates() {
    for (bit, expected) in [(false, Gate::Const(true)), (true, Gate::Const(false))] {
        let mut f = RuleFixture::new();
        f.circ.set_label(f.in_copy, Gate::Const(bit)).unwrap();
        f.circ.set_label(f.copy, Gate::Not).unwrap();
        assert!(f.circ.rewrite_not(f.in_copy).unwrap());

        assert!(!f.circ.contains(f.in_copy));
        assert_eq!(f.circ.label(f.copy), Some(&expected));
        assert!(f.circ.is_well_formed());
    }
}

#[test]
fn test_and_absorbs_zero() {
    let mut f = RuleFixture::new();
    assert!(f.circ.rewrite_and_or(f.in_and).unwrap());

    assert!(!f.circ.contains(f.in_and));
    let and = f.circ.node(f.and).unwrap();
    assert_eq!(and.label(), &Gate::Const(false));
    assert_eq!(and.indegree(), 0);
    // the severed edge from the copy node now ends in a placeholder
    assert_eq!(f.circ.node(f.copy).unwrap().outdegree(), 2);
    assert!(f.circ.is_well_formed());

    assert_eq!(f.circ.remove_dead_ends(), 1);
    assert_eq!(f.circ.node(f.copy).unwrap().outdegree(), 1);
}

#[test]
fn test_and_drops_one() {
    let mut f = RuleFixture::new();
    f.circ.set_label(f.in_and, Gate::Const(true)).unwrap();
    assert!(f.circ.rewrite_and_or(f.in_and).unwrap());

    assert!(!f.circ.contains(f.in_and));
    let and = f.circ.node(f.and).unwrap();
    assert_eq!(and.label(), &Gate::And);
    assert_eq!(and.indegree(), 1);
    assert_eq!(f.circ.node(f.copy).unwrap().outdegree(), 2);
    assert!(f.circ.is_well_formed());
}

#[test]
fn test_or_absorbs_one() {
    let mut f = RuleFixture::new();
    f.circ.set_label(f.in_or, Gate::Const(true)).unwrap();
    assert!(f.circ.rewrite_and_or(f.in_or).unwrap());
    assert_eq!(f.circ.label(f.or), Some(&Gate::Const(true)));
    assert_eq!(f.circ.node(f.or).unwrap().indegree(), 0);
    assert!(f.circ.is_well_formed());
}

#[test]
fn test_xor_zero_is_dropped() {
    let mut f = RuleFixture::with_xor();
    assert!(f.circ.rewrite_xor(f.in_and).unwrap());
    assert!(!f.circ.contains(f.in_and));
    assert_eq!(f.circ.node(f.and).unwrap().children_ids().collect::<Vec<_>>(), vec![f.out_or]);
    assert!(f.circ.is_well_formed());
}

#[test]
fn test_xor_one_inserts_not() {
    let mut f = RuleFixture::with_xor();
    f.circ.set_label(f.in_and, Gate::Const(true)).unwrap();
    assert!(f.circ.rewrite_xor(f.in_and).unwrap());
    assert!(f.circ.is_well_formed());
    assert!(!f.circ.contains(f.in_and));

    let xor = f.circ.node(f.and).unwrap();
    assert_eq!((xor.indegree(), xor.outdegree()), (1, 1));
    let not = xor.children_ids().next().unwrap();
    assert_ne!(not, f.out_or);
    let not = f.circ.node(not).unwrap();
    assert_eq!(not.label(), &Gate::Not);
    assert_eq!(not.children_ids().collect::<Vec<_>>(), vec![f.out_or]);
}

#[test]
fn test_neutral_gates() {
    let mut c = BoolCirc::empty();
    let gates: Vec<NodeId> = [Gate::And, Gate::Or, Gate::Xor, Gate::Not]
        .into_iter()
        .map(|g| c.add_node(g, &[], &[]).unwrap())
        .collect();
    let fired: Vec<bool> = gates.iter().map(|&g| c.rewrite_neutral(g).unwrap()).collect();
    assert_eq!(fired, vec![true, true, true, false]);
    assert_eq!(c.label(gates[0]), Some(&Gate::Const(true)));
    assert_eq!(c.label(gates[1]), Some(&Gate::Const(false)));
    assert_eq!(c.label(gates[2]), Some(&Gate::Const(false)));

    // the fixture's gates all have arguments
    let mut f = RuleFixture::new();
    assert!(!f.circ.rewrite_neutral(f.and).unwrap());
    assert!(f.circ.is_well_formed());
}

#[test]
fn test_fan_out_splits_source() {
    let mut c = BoolCirc::empty();
    let src = c.add_node(Gate::Const(true), &[], &[]).unwrap();
    let and = c.add_node(Gate::And, &[src, src], &[]).unwrap();
    let not = c.add_node(Gate::Not, &[src], &[]).unwrap();

    assert!(c.rewrite_source(src).unwrap());
    assert!(!c.contains(src));
    assert_eq!(parent_labels(&c, and), vec!["1", "1"]);
    assert_eq!(parent_labels(&c, not), vec!["1"]);
    assert_eq!(c.sources().len(), 3);
}

#[test]
fn test_dead_end_cleanup_is_idempotent() {
    let mut f = RuleFixture::new();
    // cut the `~` gate loose from the output
    f.circ.remove_edges(&[(f.not, f.out_or)]);
    let removed = f.circ.remove_dead_ends();
    // `~`, `|`, and the input feeding it
    assert_eq!(removed, 3);
    let once = f.circ.clone();
    assert_eq!(f.circ.remove_dead_ends(), 0);
    assert_eq!(f.circ, once);
    assert!(f.circ.contains(f.copy));
}
