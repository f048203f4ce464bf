//! Pluggable IBEA operators.
//!
//! Each operator family is a tagged union with a single entry point; the
//! driver resolves the variant once per call and passes its own random
//! generator by mutable reference, so one seed reproduces a whole run.

use crate::bitstring::Bitstring;
use crate::hypervolume::{point_volume, Hypervolume};
use crate::solution::weakly_dominates;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Individual;

/// Pairwise quality indicator I(a, b) over objective vectors
/// (maximization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Indicator {
    /// Additive epsilon: the smallest shift that makes `a` weakly
    /// dominate `b`, `max_m (b[m] - a[m])`.
    Epsilon,
    /// Hypervolume difference: the volume `b` loses to `a` under the
    /// run's reference point.
    HypervolumeDifference,
}

impl Indicator {
    /// Evaluate the indicator for the ordered pair `(a, b)`.
    ///
    /// `reference` is the run's hypervolume reference point; the epsilon
    /// indicator ignores it.
    pub fn evaluate(&self, a: &[f64], b: &[f64], reference: &[f64]) -> f64 {
        match self {
            Indicator::Epsilon => {
                let mut epsilon = f64::NEG_INFINITY;
                for (x, y) in a.iter().zip(b) {
                    epsilon = epsilon.max(y - x);
                }
                epsilon
            }
            Indicator::HypervolumeDifference => {
                if weakly_dominates(a, b) {
                    point_volume(b, reference) - point_volume(a, reference)
                } else {
                    let mut engine = Hypervolume::new(reference.to_vec());
                    engine.insert(a.to_vec());
                    engine.insert(b.to_vec());
                    engine.value() - point_volume(a, reference)
                }
            }
        }
    }
}

/// Crossover operator over two decision vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Crossover {
    /// With the given probability, swap each bit between the two
    /// children at rate 1/2.
    Uniform {
        /// Probability of applying the swap pass to a pair.
        probability: f64,
    },
    /// With the given probability, draw `points` crossover points
    /// sequentially and swap the bits of each `[p1, p2)` span.
    NPoint {
        /// Number of crossover points.
        points: usize,
        /// Probability of applying the swaps to a pair.
        probability: f64,
    },
}

impl Crossover {
    /// Recombine two decision vectors in place.
    pub fn apply<R: Rng>(&self, first: &mut Bitstring, second: &mut Bitstring, rng: &mut R) {
        debug_assert_eq!(first.len(), second.len());
        match self {
            Crossover::Uniform { probability } => {
                if rng.gen::<f64>() < *probability {
                    for i in 0..first.len() {
                        if rng.gen_bool(0.5) {
                            swap_bit(first, second, i);
                        }
                    }
                }
            }
            Crossover::NPoint { points, probability } => {
                if rng.gen::<f64>() < *probability {
                    let mut from = 0;
                    for _ in 0..*points {
                        let to = rng.gen_range(from..first.len());
                        for i in from..to {
                            swap_bit(first, second, i);
                        }
                        from = to;
                    }
                }
            }
        }
    }
}

/// Mutation operator over a decision vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Flip each bit independently with the given probability.
    Uniform {
        /// Per-bit flip probability.
        probability: f64,
    },
}

impl Mutation {
    /// Mutate a decision vector in place.
    pub fn apply<R: Rng>(&self, decision: &mut Bitstring, rng: &mut R) {
        let Mutation::Uniform { probability } = self;
        for i in 0..decision.len() {
            if rng.gen::<f64>() < *probability {
                decision.flip(i);
            }
        }
    }
}

/// Mating-pool selection operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// K-way tournament with replacement: each pool entry is the
    /// best-fitness member among `tournament_size` uniform draws.
    Tournament {
        /// Number of genotypes to select.
        pool_size: usize,
        /// Draws per tournament.
        tournament_size: usize,
    },
}

impl Selection {
    /// Select a mating pool from the population. Each entry is a copy of
    /// the winning member, fitness included, so later variation steps
    /// keep the parent's fitness.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> Vec<Individual> {
        assert!(!population.is_empty(), "cannot select from an empty population");
        let Selection::Tournament {
            pool_size,
            tournament_size,
        } = self;
        let mut pool = Vec::with_capacity(*pool_size);
        for _ in 0..*pool_size {
            let mut best = rng.gen_range(0..population.len());
            for _ in 1..*tournament_size {
                let other = rng.gen_range(0..population.len());
                if population[other].fitness > population[best].fitness {
                    best = other;
                }
            }
            pool.push(population[best].clone());
        }
        pool
    }
}

/// Exchange bit `i` between two bitstrings.
fn swap_bit(first: &mut Bitstring, second: &mut Bitstring, i: usize) {
    let (a, b) = (first.get(i), second.get(i));
    first.set(i, b);
    second.set(i, a);
}
