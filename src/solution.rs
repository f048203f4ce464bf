//! Solution value object and Pareto dominance.

use crate::bitstring::Bitstring;
use crate::instance::RmnkInstance;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Pairwise dominance relation between objective vectors (maximization).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Componentwise >= with at least one strict >.
    Dominates,
    /// Componentwise equal.
    Equal,
    /// The other vector dominates this one.
    Dominated,
    /// Neither vector dominates the other.
    Incomparable,
}

/// Classify `a` against `b` (maximization).
pub fn dominance(a: &[f64], b: &[f64]) -> Dominance {
    debug_assert_eq!(a.len(), b.len());
    let mut relation = Dominance::Equal;
    for (&x, &y) in a.iter().zip(b) {
        if x < y {
            if relation == Dominance::Dominates {
                return Dominance::Incomparable;
            }
            relation = Dominance::Dominated;
        } else if x > y {
            if relation == Dominance::Dominated {
                return Dominance::Incomparable;
            }
            relation = Dominance::Dominates;
        }
    }
    relation
}

/// Whether `a` is componentwise >= `b`.
pub fn weakly_dominates(a: &[f64], b: &[f64]) -> bool {
    a.iter().zip(b).all(|(x, y)| x >= y)
}

/// A decision bitstring paired with its evaluated objective vector.
///
/// The objective vector is derived from the decision at construction and
/// never mutated independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    decision: Bitstring,
    objective: Vec<f64>,
}

impl Solution {
    /// Evaluate a decision vector against an instance.
    pub fn evaluated(instance: &RmnkInstance, decision: Bitstring) -> Self {
        let objective = instance.evaluate(&decision);
        Solution { decision, objective }
    }

    /// Pair a decision with an already-known objective vector.
    ///
    /// Useful for seeding drivers with externally evaluated points and
    /// for constructing fixtures in tests.
    pub fn from_parts(decision: Bitstring, objective: Vec<f64>) -> Self {
        Solution { decision, objective }
    }

    /// Draw and evaluate a uniformly random decision vector.
    pub fn random<R: Rng>(instance: &RmnkInstance, rng: &mut R) -> Self {
        Self::evaluated(instance, Bitstring::random(instance.bits(), rng))
    }

    /// Produce a child by flipping each parent bit independently with
    /// probability 1/N, then evaluating.
    pub fn uniform_flip<R: Rng>(instance: &RmnkInstance, rng: &mut R, parent: &Solution) -> Self {
        let mut decision = parent.decision.clone();
        let rate = 1.0 / decision.len() as f64;
        for i in 0..decision.len() {
            if rng.gen_bool(rate) {
                decision.flip(i);
            }
        }
        Self::evaluated(instance, decision)
    }

    /// Produce and evaluate the neighbor obtained by flipping bit `i`.
    pub fn flip_neighbor(instance: &RmnkInstance, parent: &Solution, i: usize) -> Self {
        let mut decision = parent.decision.clone();
        decision.flip(i);
        Self::evaluated(instance, decision)
    }

    /// The decision bitstring.
    pub fn decision(&self) -> &Bitstring {
        &self.decision
    }

    /// Mutable access to the decision for in-place variation operators.
    /// The objective is stale afterwards until [`Solution::reevaluate`]
    /// runs.
    pub(crate) fn decision_mut(&mut self) -> &mut Bitstring {
        &mut self.decision
    }

    /// Recompute the objective vector from the current decision.
    pub(crate) fn reevaluate(&mut self, instance: &RmnkInstance) {
        self.objective = instance.evaluate(&self.decision);
    }

    /// The evaluated objective vector.
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// Classify this solution's objectives against another's.
    pub fn dominance(&self, other: &Solution) -> Dominance {
        dominance(&self.objective, &other.objective)
    }
}
