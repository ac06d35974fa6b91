use open_digraphs::prelude::*;

pub fn half_adder() -> BoolCirc {
    let mut c = BoolCirc::empty();
    let a = c.add_node(Gate::Copy, &[], &[]).unwrap();
    let b = c.add_node(Gate::Copy, &[], &[]).unwrap();
    let carry = c.add_node(Gate::And, &[a, b], &[]).unwrap();
    let sum = c.add_node(Gate::Xor, &[a, b], &[]).unwrap();
    c.add_input_node(a).unwrap();
    c.add_input_node(b).unwrap();
    c.add_output_node(carry).unwrap();
    c.add_output_node(sum).unwrap();
    c
}

/// Inputs `(a, b, carry_in)`, outputs `(carry, sum)`.
pub fn full_adder() -> BoolCirc {
    let mut c = BoolCirc::empty();
    let a = c.add_node(Gate::Copy, &[], &[]).unwrap();
    let b = c.add_node(Gate::Copy, &[], &[]).unwrap();
    let cin = c.add_node(Gate::Copy, &[], &[]).unwrap();

    let half = c.add_node(Gate::Xor, &[a, b], &[]).unwrap();
    let half_copy = c.add_node(Gate::Copy, &[half], &[]).unwrap();
    let sum = c.add_node(Gate::Xor, &[half_copy, cin], &[]).unwrap();

    let both = c.add_node(Gate::And, &[a, b], &[]).unwrap();
    let propagated = c.add_node(Gate::And, &[cin, half_copy], &[]).unwrap();
    let carry = c.add_node(Gate::Or, &[both, propagated], &[]).unwrap();

    for i in [a, b, cin] {
        c.add_input_node(i).unwrap();
    }
    c.add_output_node(carry).unwrap();
    c.add_output_node(sum).unwrap();
    c
}

/// `n` wires whose inputs hold the bits of `value`, most significant first.
pub fn register(n: usize, value: u64) -> BoolCirc {
    let mut c = BoolCirc::identity(n);
    let bits: String = (0..n)
        .rev()
        .map(|i| if (value >> i) & 1 == 1 { '1' } else { '0' })
        .collect();
    c.set_input_bits(&bits).unwrap();
    c
}

/// A small circuit with constant inputs, used to exercise single rewrite rules.
///
/// ```text
/// in_copy(1) → copy → and ← in_and(0)
///              copy → or  ← in_or(0)
/// and → out_or ← not ← or          out_or → output
/// ```
pub struct RuleFixture {
    pub circ: BoolCirc,
    pub copy: NodeId,
    pub and: NodeId,
    pub or: NodeId,
    pub not: NodeId,
    pub out_or: NodeId,
    pub in_and: NodeId,
    pub in_copy: NodeId,
    pub in_or: NodeId,
    pub output: NodeId,
}

impl RuleFixture {
    pub fn new() -> Self {
        let mut c = BoolCirc::empty();
        let copy = c.add_node(Gate::Copy, &[], &[]).unwrap();
        let and = c.add_node(Gate::And, &[], &[]).unwrap();
        let or = c.add_node(Gate::Or, &[], &[]).unwrap();
        let not = c.add_node(Gate::Not, &[], &[]).unwrap();
        let out_or = c.add_node(Gate::Or, &[], &[]).unwrap();
        c.add_edges(&[(copy, and), (copy, or), (and, out_or), (or, not), (not, out_or)])
            .unwrap();

        let in_and = c.add_input_node(and).unwrap();
        let in_copy = c.add_input_node(copy).unwrap();
        let in_or = c.add_input_node(or).unwrap();
        c.set_input_bits("010").unwrap();
        let output = c.add_output_node(out_or).unwrap();

        RuleFixture {
            circ: c,
            copy,
            and,
            or,
            not,
            out_or,
            in_and,
            in_copy,
            in_or,
            output,
        }
    }

    /// The same circuit with the `&` gate replaced by `^`.
    pub fn with_xor() -> Self {
        let mut f = Self::new();
        f.circ.set_label(f.and, Gate::Xor).unwrap();
        f
    }
}

impl Default for RuleFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The labels of the parents of `id`, sorted.
pub fn parent_labels(c: &BoolCirc, id: NodeId) -> Vec<String> {
    let mut labels: Vec<String> = c
        .node(id)
        .unwrap()
        .parent_ids()
        .map(|p| c.label(p).unwrap().to_string())
        .collect();
    labels.sort();
    labels
}
