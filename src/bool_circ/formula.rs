//! Building circuits from fully parenthesised formulas such as `((x0)&(x1))|(~(x2))`.
//!
//! Every sub-formula is wrapped in parentheses, operators sit between (or before) their
//! operands, and tokens starting with `x` are variables. The scan walks from the output
//! towards the inputs: `(` opens an operand above the current node, `)` returns to the node
//! the operand feeds.
use super::circuit::BoolCirc;
use super::gate::Gate;
use crate::error::{Error, Result};
use crate::graph::NodeId;

use log::debug;
use std::collections::BTreeMap;

fn is_variable(token: &str) -> bool {
    token.starts_with('x')
}

struct Builder {
    circ: BoolCirc,
    variables: BTreeMap<String, NodeId>,
}

impl Builder {
    /// Finish the pending token on `current`.
    ///
    /// Variables are folded into the node already standing for the same name. Returns the
    /// node that survives.
    fn close_token(&mut self, current: NodeId, token: &str) -> Result<NodeId> {
        if token.is_empty() {
            return Ok(current);
        }
        if !is_variable(token) {
            self.circ.set_label(current, Gate::parse(token))?;
            return Ok(current);
        }
        match self.variables.get(token) {
            Some(&existing) => {
                self.circ.merge_nodes_by_id(existing, current)?;
                Ok(existing)
            }
            None => {
                self.variables.insert(token.to_string(), current);
                Ok(current)
            }
        }
    }

    fn formula(&mut self, s: &str) -> Result<()> {
        let root = self.circ.add_node(Gate::Copy, &[], &[])?;
        self.circ.add_output_node(root)?;

        let mut current = root;
        let mut token = String::new();
        let mut depth = 0usize;
        for (position, ch) in s.char_indices() {
            match ch {
                '(' => {
                    if !token.is_empty() {
                        self.circ.set_label(current, Gate::parse(&token))?;
                        token.clear();
                    }
                    current = self.circ.add_node(Gate::Copy, &[], &[current])?;
                    depth += 1;
                }
                ')' => {
                    if depth == 0 {
                        return Err(Error::MalformedFormula { position });
                    }
                    depth -= 1;
                    let child = self
                        .circ
                        .try_node(current)?
                        .sole_child()
                        .ok_or(Error::MalformedFormula { position })?;
                    self.close_token(current, &token)?;
                    token.clear();
                    current = child;
                }
                c if c.is_whitespace() => {}
                c => token.push(c),
            }
        }
        if depth != 0 {
            return Err(Error::MalformedFormula { position: s.len() });
        }
        self.close_token(current, &token)?;
        Ok(())
    }
}

impl BoolCirc {
    /// The circuit computing `formulas`, one output per formula in order.
    ///
    /// Each distinct variable becomes one copy node fed by an input port labelled with the
    /// variable's name; inputs are sorted by name.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedFormula`] on unbalanced parentheses.
    pub fn from_formula(formulas: &[&str]) -> Result<BoolCirc> {
        let mut builder = Builder {
            circ: BoolCirc::empty(),
            variables: BTreeMap::new(),
        };
        for s in formulas {
            builder.formula(s)?;
        }

        let Builder {
            mut circ,
            variables,
        } = builder;
        for (name, var) in variables {
            circ.set_label(var, Gate::Copy)?;
            let port = circ.add_input_node(var)?;
            circ.set_label(port, Gate::Free(name))?;
        }
        debug!(
            "built circuit from {} formulas: {} inputs, {} nodes",
            formulas.len(),
            circ.inputs().len(),
            circ.len()
        );
        Ok(circ)
    }
}
