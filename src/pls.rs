//! PLS: Pareto local search.
//!
//! Maintains an archive of all nondominated solutions seen and a
//! frontier of nondominated solutions whose one-bit neighborhoods have
//! not been explored yet. Each step pops a random frontier member and
//! walks its neighbors in bit-index order, charging one evaluation per
//! neighbor.

use crate::anytime::AnytimeRecord;
use crate::archive::Archive;
use crate::config::{resolve_reference, Acceptance, Exploration, PlsConfig};
use crate::error::Error;
use crate::hypervolume::Hypervolume;
use crate::instance::RmnkInstance;
use crate::solution::{Dominance, Solution};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The PLS driver.
pub struct Pls {
    instance: RmnkInstance,
    config: PlsConfig,
    rng: StdRng,
    hypervolume: Hypervolume,
    archive: Archive,
    frontier: Archive,
    anytime: Vec<AnytimeRecord>,
}

impl Pls {
    /// Create a driver over a loaded instance.
    pub fn new(instance: RmnkInstance, config: PlsConfig) -> Result<Self, Error> {
        config.validate()?;
        let reference = resolve_reference(&config.reference, instance.objectives())?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Pls {
            instance,
            config,
            rng,
            hypervolume: Hypervolume::new(reference),
            archive: Archive::new(),
            frontier: Archive::new(),
            anytime: Vec::new(),
        })
    }

    /// Run until the budget is spent or the frontier empties (with the
    /// best-improvement restart when exploration is [`Exploration::Both`]).
    pub fn run(&mut self) {
        info!(
            "pls: starting run, budget {} evaluations, {:?}/{:?}",
            self.config.max_evaluations, self.config.acceptance, self.config.exploration
        );

        let seed_solution = Solution::random(&self.instance, &mut self.rng);
        self.hypervolume.insert(seed_solution.objective().to_vec());
        self.frontier.insert(seed_solution);
        self.archive = self.frontier.clone();

        let mut evaluation = 0;
        self.anytime.push(AnytimeRecord {
            evaluation,
            hypervolume: self.hypervolume.value(),
        });

        match self.config.exploration {
            Exploration::BestImprovement => self.search(&mut evaluation, false),
            Exploration::FirstImprovement => self.search(&mut evaluation, true),
            Exploration::Both => {
                self.search(&mut evaluation, true);
                debug!(
                    "pls: restarting with best-improvement, {} evaluations spent, frontier size {}",
                    evaluation,
                    self.frontier.len()
                );
                self.search(&mut evaluation, false);
            }
        }

        info!(
            "pls: done after {} evaluations, archive size {}, hypervolume {}",
            evaluation,
            self.archive.len(),
            self.hypervolume.value()
        );
    }

    /// Explore frontier members until the budget is spent or the
    /// frontier empties.
    fn search(&mut self, evaluation: &mut usize, first_improvement: bool) {
        let maxeval = self.config.max_evaluations;
        while *evaluation < maxeval && !self.frontier.is_empty() {
            let index = self.rng.gen_range(0..self.frontier.len());
            let origin = self.frontier.swap_remove(index);

            match self.config.acceptance {
                Acceptance::NonDominating => {
                    for i in 0..origin.decision().len() {
                        if *evaluation >= maxeval {
                            break;
                        }
                        let neighbor = Solution::flip_neighbor(&self.instance, &origin, i);
                        *evaluation += 1;
                        if self.accept(&neighbor, *evaluation) && first_improvement {
                            break;
                        }
                    }
                }
                Acceptance::Dominating => {
                    for i in 0..origin.decision().len() {
                        if *evaluation >= maxeval {
                            break;
                        }
                        let neighbor = Solution::flip_neighbor(&self.instance, &origin, i);
                        *evaluation += 1;
                        if neighbor.dominance(&origin) == Dominance::Dominates
                            && self.accept(&neighbor, *evaluation)
                            && first_improvement
                        {
                            break;
                        }
                    }
                }
                Acceptance::Both => {
                    let mut stash = Vec::with_capacity(origin.decision().len());
                    let mut use_stash = true;
                    for i in 0..origin.decision().len() {
                        if *evaluation >= maxeval {
                            break;
                        }
                        let neighbor = Solution::flip_neighbor(&self.instance, &origin, i);
                        *evaluation += 1;
                        if neighbor.dominance(&origin) == Dominance::Dominates
                            && self.accept(&neighbor, *evaluation)
                        {
                            use_stash = false;
                            if first_improvement {
                                break;
                            }
                        } else if use_stash {
                            stash.push(neighbor);
                        }
                    }
                    if use_stash {
                        // No dominating neighbor was accepted; replay
                        // the stashed neighbors with non-dominating
                        // acceptance. The evaluations were already paid.
                        for neighbor in stash {
                            if self.accept(&neighbor, *evaluation) && first_improvement {
                                break;
                            }
                        }
                    }
                }
            }
        }
    }

    /// Offer a neighbor to the archive; on acceptance update the
    /// hypervolume, extend the frontier, and log a row.
    fn accept(&mut self, neighbor: &Solution, evaluation: usize) -> bool {
        if !self.archive.insert(neighbor.clone()) {
            return false;
        }
        self.hypervolume.insert(neighbor.objective().to_vec());
        self.frontier.insert(neighbor.clone());
        self.anytime.push(AnytimeRecord {
            evaluation,
            hypervolume: self.hypervolume.value(),
        });
        true
    }

    /// The problem instance.
    pub fn instance(&self) -> &RmnkInstance {
        &self.instance
    }

    /// The nondominated archive built so far.
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// The unexplored frontier remaining after a run.
    pub fn frontier(&self) -> &Archive {
        &self.frontier
    }

    /// The anytime trace recorded so far.
    pub fn anytime(&self) -> &[AnytimeRecord] {
        &self.anytime
    }

    /// The hypervolume of the archive so far.
    pub fn hypervolume(&self) -> f64 {
        self.hypervolume.value()
    }
}
