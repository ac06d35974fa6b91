//! Local rewrite rules for circuits with constant inputs.
//!
//! Each rule fires on a *source*, a constant node without parents, and replaces it together
//! with the gate it feeds by a smaller equivalent circuit. A rule returns `Ok(false)` and leaves
//! the circuit untouched when its trigger does not match.
use super::circuit::BoolCirc;
use super::gate::Gate;
use crate::error::Result;
use crate::graph::NodeId;

use log::trace;

impl BoolCirc {
    /// True if `id` is a constant node without parents.
    pub fn is_source(&self, id: NodeId) -> bool {
        self.node(id)
            .is_some_and(|n| n.indegree() == 0 && n.label().as_const().is_some())
    }

    /// All sources, in ascending id order.
    pub fn sources(&self) -> Vec<NodeId> {
        self.node_ids().filter(|&id| self.is_source(id)).collect()
    }

    /// The value of source `s` and the gate it feeds, if `s` is a source with a single edge to
    /// a node other than an output.
    fn trigger(&self, s: NodeId) -> Option<(bool, NodeId)> {
        let node = self.node(s)?;
        let v = node.label().as_const()?;
        if node.indegree() != 0 {
            return None;
        }
        let c = node.sole_child()?;
        if self.is_output(c) {
            return None;
        }
        Some((v, c))
    }

    fn trigger_on(&self, s: NodeId, matches: impl Fn(&Gate) -> bool) -> Option<(bool, NodeId)> {
        self.trigger(s)
            .filter(|&(_, c)| self.label(c).is_some_and(&matches))
    }

    /// Copy: a constant feeding a copy node is duplicated onto every edge leaving it.
    pub fn rewrite_copy(&mut self, s: NodeId) -> Result<bool> {
        let Some((v, c)) = self.trigger_on(s, |g| *g == Gate::Copy) else {
            return Ok(false);
        };
        let copy = self.try_node(c)?;
        if copy.indegree() != 1 {
            return Ok(false);
        }

        if copy.outdegree() <= 1 {
            self.set_label(c, Gate::Const(v))?;
            self.remove_nodes_by_id(&[s]);
        } else {
            let targets: Vec<(NodeId, usize)> =
                copy.children().iter().map(|(&t, &m)| (t, m)).collect();
            self.remove_nodes_by_id(&[s, c]);
            for (t, m) in targets {
                for _ in 0..m {
                    self.add_node(Gate::Const(v), &[], &[t])?;
                }
            }
        }
        trace!("copy: {} = {} through {}", s, v, c);
        Ok(true)
    }

    /// Not: the constant is negated into the `~` node.
    pub fn rewrite_not(&mut self, s: NodeId) -> Result<bool> {
        let Some((v, c)) = self.trigger_on(s, |g| *g == Gate::Not) else {
            return Ok(false);
        };
        if self.try_node(c)?.indegree() != 1 {
            return Ok(false);
        }
        self.set_label(c, Gate::Const(!v))?;
        self.remove_nodes_by_id(&[s]);
        trace!("not: {} = {} into {}", s, v, c);
        Ok(true)
    }

    /// And/or: a neutral constant is dropped. An absorbing one turns the gate into that
    /// constant; every other incoming edge is redirected onto a fresh copy node with no
    /// children, which dead-end cleanup later removes.
    pub fn rewrite_and_or(&mut self, s: NodeId) -> Result<bool> {
        let Some((v, c)) = self.trigger_on(s, |g| matches!(g, Gate::And | Gate::Or)) else {
            return Ok(false);
        };
        let absorbing = self.label(c).and_then(Gate::absorbing);
        self.remove_nodes_by_id(&[s]);

        if absorbing == Some(v) {
            let others: Vec<(NodeId, usize)> = self
                .try_node(c)?
                .parents()
                .iter()
                .map(|(&p, &m)| (p, m))
                .collect();
            for (p, m) in others {
                self.remove_parallel_edges(&[(p, c)]);
                for _ in 0..m {
                    self.add_node(Gate::Copy, &[p], &[])?;
                }
            }
            self.set_label(c, Gate::Const(v))?;
        }
        trace!("and/or: {} = {} into {}", s, v, c);
        Ok(true)
    }

    /// Xor: `0` is dropped; `1` is dropped and a `~` is inserted on every edge leaving the gate.
    pub fn rewrite_xor(&mut self, s: NodeId) -> Result<bool> {
        let Some((v, c)) = self.trigger_on(s, |g| *g == Gate::Xor) else {
            return Ok(false);
        };
        self.remove_nodes_by_id(&[s]);

        if v {
            let targets: Vec<(NodeId, usize)> = self
                .try_node(c)?
                .children()
                .iter()
                .map(|(&t, &m)| (t, m))
                .collect();
            for (t, m) in targets {
                self.remove_parallel_edges(&[(c, t)]);
                for _ in 0..m {
                    self.add_node(Gate::Not, &[c], &[t])?;
                }
            }
        }
        trace!("xor: {} = {} into {}", s, v, c);
        Ok(true)
    }

    /// A variadic gate without arguments becomes its neutral constant.
    pub fn rewrite_neutral(&mut self, id: NodeId) -> Result<bool> {
        let Some(node) = self.node(id) else {
            return Ok(false);
        };
        let Some(v) = node.label().neutral() else {
            return Ok(false);
        };
        if node.indegree() != 0 {
            return Ok(false);
        }
        self.set_label(id, Gate::Const(v))?;
        trace!("neutral: {} = {}", id, v);
        Ok(true)
    }

    /// Fan-out: a source with several outgoing edges is split into one source per edge.
    pub fn rewrite_fan_out(&mut self, s: NodeId) -> Result<bool> {
        let Some(node) = self.node(s) else {
            return Ok(false);
        };
        let Some(v) = node.label().as_const() else {
            return Ok(false);
        };
        if node.indegree() != 0 || node.outdegree() <= 1 {
            return Ok(false);
        }

        let targets: Vec<(NodeId, usize)> =
            node.children().iter().map(|(&t, &m)| (t, m)).collect();
        self.remove_nodes_by_id(&[s]);
        for (t, m) in targets {
            for _ in 0..m {
                self.add_node(Gate::Const(v), &[], &[t])?;
            }
        }
        trace!("fan-out: {} = {}", s, v);
        Ok(true)
    }

    /// Apply whichever rule matches source `s`.
    pub fn rewrite_source(&mut self, s: NodeId) -> Result<bool> {
        if !self.is_source(s) {
            return Ok(false);
        }
        if self.try_node(s)?.outdegree() > 1 {
            return self.rewrite_fan_out(s);
        }
        let Some((_, c)) = self.trigger(s) else {
            return Ok(false);
        };
        match self.label(c) {
            Some(Gate::Copy) => self.rewrite_copy(s),
            Some(Gate::Not) => self.rewrite_not(s),
            Some(Gate::And | Gate::Or) => self.rewrite_and_or(s),
            Some(Gate::Xor) => self.rewrite_xor(s),
            Some(Gate::Const(_) | Gate::Free(_)) | None => Ok(false),
        }
    }

    /// Delete every node without children that is not an output, until none is left.
    ///
    /// Returns the number of nodes removed. A second call right after the first removes nothing.
    pub fn remove_dead_ends(&mut self) -> usize {
        let mut removed = 0;
        loop {
            let dead: Vec<NodeId> = self
                .nodes()
                .filter(|n| n.outdegree() == 0 && !self.is_output(n.id()))
                .map(|n| n.id())
                .collect();
            if dead.is_empty() {
                break;
            }
            removed += dead.len();
            self.remove_nodes_by_id(&dead);
        }
        if removed > 0 {
            trace!("removed {} dead ends", removed);
        }
        removed
    }
}
