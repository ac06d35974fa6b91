//! The fixpoint driver: rewrite until nothing changes, then read the outputs.
use super::circuit::BoolCirc;
use super::gate::Gate;
use crate::error::{Error, Result};
use crate::graph::NodeId;

use log::{debug, trace};

/// Limits for [`BoolCirc::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvalOptions {
    /// Stop after this many passes. `None` runs until a pass changes nothing.
    pub max_passes: Option<usize>,
}

impl EvalOptions {
    pub fn with_max_passes(max_passes: usize) -> Self {
        EvalOptions {
            max_passes: Some(max_passes),
        }
    }
}

impl BoolCirc {
    /// One rewrite pass.
    ///
    /// Takes a snapshot of the sources and of the variadic gates without arguments, applies the
    /// matching rule to each entry that still qualifies, then removes dead ends. Returns whether
    /// anything changed.
    pub fn rewrite_pass(&mut self) -> Result<bool> {
        let sources = self.sources();
        let empty_gates: Vec<NodeId> = self
            .nodes()
            .filter(|n| n.indegree() == 0 && n.label().is_binary())
            .map(|n| n.id())
            .collect();

        let mut fired = 0;
        for s in sources {
            if self.rewrite_source(s)? {
                fired += 1;
            }
        }
        for g in empty_gates {
            if self.rewrite_neutral(g)? {
                fired += 1;
            }
        }
        let removed = self.remove_dead_ends();
        trace!("pass: {} rules fired, {} nodes removed", fired, removed);
        Ok(fired > 0 || removed > 0)
    }

    /// Run rewrite passes in place until one changes nothing or the pass limit is hit.
    ///
    /// Returns the number of passes that changed the circuit.
    pub fn normalize(&mut self, options: &EvalOptions) -> Result<usize> {
        let mut passes = 0;
        while options.max_passes.map_or(true, |max| passes < max) {
            if !self.rewrite_pass()? {
                break;
            }
            passes += 1;
        }
        Ok(passes)
    }

    /// Evaluate a circuit whose inputs all carry constants, returning one bit per output.
    pub fn evaluate(&self) -> Result<String> {
        self.evaluate_with(&EvalOptions::default())
    }

    /// Like [`BoolCirc::evaluate`], with explicit limits.
    ///
    /// The circuit itself is left untouched.
    ///
    /// # Errors
    ///
    /// [`Error::NotFullyEvaluated`] naming the first output whose parent is not a constant once
    /// rewriting stops.
    pub fn evaluate_with(&self, options: &EvalOptions) -> Result<String> {
        let mut work = self.clone();
        let passes = work.normalize(options)?;

        let bits = work
            .outputs()
            .iter()
            .map(|&o| {
                let value = work
                    .try_node(o)?
                    .sole_parent()
                    .and_then(|p| work.label(p))
                    .and_then(Gate::as_const);
                match value {
                    Some(true) => Ok('1'),
                    Some(false) => Ok('0'),
                    None => Err(Error::NotFullyEvaluated(o)),
                }
            })
            .collect::<Result<String>>()?;
        debug!("evaluated to {:?} in {} passes", bits, passes);
        Ok(bits)
    }
}
