use open_digraphs::prelude::*;

use super::strategy::{bit_string, valuations};

use test_log::test;

const EXAMPLE: &str = "((x0)&((x1)&(x2)))|((x1)&(~(x2)))";
const SECOND: &str = "((x0)&(~(x1)))|(x2)";

fn input_names(c: &BoolCirc) -> Vec<String> {
    c.inputs()
        .iter()
        .map(|&i| c.label(i).unwrap().to_string())
        .collect()
}

#[test]
fn test_single_variable() {
    let c = BoolCirc::from_formula(&["(x0)"]).unwrap();
    assert_eq!(c.len(), 4);
    assert!(c.is_well_formed());
    assert_eq!(input_names(&c), vec!["x0"]);
}

#[test]
fn test_empty_formula_is_not_a_circuit() {
    let c = BoolCirc::from_formula(&[""]).unwrap();
    assert!(!c.is_well_formed());
}

#[test]
fn test_shared_variables_are_merged() {
    let c = BoolCirc::from_formula(&[EXAMPLE]).unwrap();
    assert!(c.is_well_formed());
    assert_eq!(c.len(), 12);
    assert_eq!(input_names(&c), vec!["x0", "x1", "x2"]);
    assert!(c.nodes().all(|n| c.is_input(n.id()) || !matches!(n.label(), Gate::Free(_))));

    let both = BoolCirc::from_formula(&[EXAMPLE, SECOND]).unwrap();
    assert!(both.is_well_formed());
    assert_eq!(both.len(), 16);
    assert_eq!(both.inputs().len(), 3);
    assert_eq!(both.outputs().len(), 2);
}

#[test]
fn test_formula_semantics() {
    let c = BoolCirc::from_formula(&[EXAMPLE, SECOND]).unwrap();
    for bits in valuations(3) {
        let [x0, x1, x2] = [bits[0], bits[1], bits[2]];
        let first = (x0 && x1 && x2) || (x1 && !x2);
        let second = (x0 && !x1) || x2;

        let mut c = c.clone();
        c.set_input_bits(&bit_string(&bits)).unwrap();
        assert_eq!(c.evaluate().unwrap(), bit_string(&[first, second]));
    }
}

#[test]
fn test_inputs_sorted_by_name() {
    let c = BoolCirc::from_formula(&["(x2)&(x10)"]).unwrap();
    assert_eq!(input_names(&c), vec!["x10", "x2"]);
}

#[test]
fn test_whitespace_is_ignored() {
    let spaced = BoolCirc::from_formula(&["( x0 ) & ( ~ ( x1 ) )"]).unwrap();
    let tight = BoolCirc::from_formula(&["(x0)&(~(x1))"]).unwrap();
    assert_eq!(spaced, tight);
}

#[test]
fn test_unbalanced_parentheses() {
    assert_eq!(
        BoolCirc::from_formula(&[")(x0)"]),
        Err(Error::MalformedFormula { position: 0 })
    );
    assert_eq!(
        BoolCirc::from_formula(&["((x0)"]),
        Err(Error::MalformedFormula { position: 5 })
    );
    assert_eq!(
        BoolCirc::from_formula(&["(x0)", "(x1))"]),
        Err(Error::MalformedFormula { position: 4 })
    );
}
