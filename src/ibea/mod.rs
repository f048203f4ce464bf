//! IBEA: the indicator-based evolutionary algorithm.
//!
//! A generational (mu + mu) loop: tournament selection builds a mating
//! pool, consecutive pool pairs are recombined, every pool member is
//! mutated and re-evaluated, the children are merged into the population
//! (each merge costing one evaluation), and environmental selection
//! shrinks the population back to mu by repeatedly discarding the
//! minimum-fitness member.

pub mod operators;

use crate::anytime::GenerationRecord;
use crate::archive::Archive;
use crate::config::{resolve_reference, IbeaConfig};
use crate::error::Error;
use crate::hypervolume::Hypervolume;
use crate::instance::RmnkInstance;
use crate::solution::Solution;
use itertools::Itertools;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A population member: a solution with its indicator-based fitness.
///
/// Higher fitness is better.
#[derive(Debug, Clone)]
pub struct Individual {
    /// The evaluated solution.
    pub solution: Solution,
    /// Indicator-based fitness, assigned over the whole population.
    pub fitness: f64,
}

impl Individual {
    /// Wrap a solution with zero initial fitness.
    pub fn new(solution: Solution) -> Self {
        Individual {
            solution,
            fitness: 0.0,
        }
    }
}

/// The IBEA driver.
pub struct Ibea {
    instance: RmnkInstance,
    config: IbeaConfig,
    rng: StdRng,
    hypervolume: Hypervolume,
    archive: Archive,
    anytime: Vec<GenerationRecord>,
}

impl Ibea {
    /// Create a driver over a loaded instance.
    pub fn new(instance: RmnkInstance, config: IbeaConfig) -> Result<Self, Error> {
        config.validate()?;
        let reference = resolve_reference(&config.reference, instance.objectives())?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Ibea {
            instance,
            config,
            rng,
            hypervolume: Hypervolume::new(reference),
            archive: Archive::new(),
            anytime: Vec::new(),
        })
    }

    /// Run until the evaluation budget or the generation limit is hit.
    pub fn run(&mut self) {
        let maxeval = self.config.max_evaluations;
        let pop_max = self.config.population_size;
        info!(
            "ibea: starting run, budget {} evaluations, population {}, {} generations",
            maxeval, pop_max, self.config.generations
        );

        let mut evaluation = 0;
        let mut generation = 0;
        let mut factor = 1.0;

        let mut population: Vec<Individual> = Vec::with_capacity(pop_max);
        while population.len() < pop_max && evaluation < maxeval {
            let solution = Solution::random(&self.instance, &mut self.rng);
            if self.archive.insert(solution.clone()) {
                self.hypervolume.insert(solution.objective().to_vec());
                self.record(evaluation, generation);
            }
            population.push(Individual::new(solution));
            evaluation += 1;
        }

        if evaluation < maxeval {
            if self.config.adaptive {
                factor = self.adaptive_factor(&population);
            }
            self.assign_fitness(&mut population, self.config.scaling_factor * factor);
        }

        while evaluation < maxeval && generation < self.config.generations {
            let mut pool = self.config.selection.select(&population, &mut self.rng);

            let mut i = 0;
            while i + 1 < pool.len() {
                let (head, tail) = pool.split_at_mut(i + 1);
                self.config.crossover.apply(
                    head[i].solution.decision_mut(),
                    tail[0].solution.decision_mut(),
                    &mut self.rng,
                );
                i += 2;
            }

            // Pool members keep their selected parent's fitness through
            // variation; only the objective vector is refreshed.
            for individual in pool.iter_mut() {
                self.config.mutation.apply(individual.solution.decision_mut(), &mut self.rng);
                individual.solution.reevaluate(&self.instance);
            }

            // Scaling factor and fitness come from the pre-merge
            // population; the children join afterwards.
            if self.config.adaptive {
                factor = self.adaptive_factor(&population);
            }
            self.assign_fitness(&mut population, self.config.scaling_factor * factor);

            for child in pool {
                if self.archive.insert(child.solution.clone()) {
                    self.hypervolume.insert(child.solution.objective().to_vec());
                    self.record(evaluation, generation);
                }
                population.push(child);
                evaluation += 1;
            }

            self.environmental_selection(&mut population, self.config.scaling_factor * factor, pop_max);
            generation += 1;

            debug!(
                "ibea: generation {} done, {} evaluations spent, hypervolume {}",
                generation,
                evaluation,
                self.hypervolume.value()
            );
        }

        self.record(evaluation, generation);
        info!(
            "ibea: done after {} evaluations and {} generations, archive size {}, hypervolume {}",
            evaluation,
            generation,
            self.archive.len(),
            self.hypervolume.value()
        );
    }

    /// Append an anytime row at the current counters.
    fn record(&mut self, evaluation: usize, generation: usize) {
        self.anytime.push(GenerationRecord {
            evaluation,
            generation,
            hypervolume: self.hypervolume.value(),
        });
    }

    /// Assign `fit(i) = -sum over j != i of exp(-I(j, i) / k)` over the
    /// population.
    fn assign_fitness(&self, population: &mut [Individual], k: f64) {
        let fitnesses: Vec<f64> = (0..population.len())
            .map(|i| {
                let target = population[i].solution.objective();
                -population
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, other)| {
                        let indicator = self.config.indicator.evaluate(
                            other.solution.objective(),
                            target,
                            self.hypervolume.reference(),
                        );
                        (-indicator / k).exp()
                    })
                    .sum::<f64>()
            })
            .collect();
        for (individual, fitness) in population.iter_mut().zip(fitnesses) {
            individual.fitness = fitness;
        }
    }

    /// The adaptive scaling factor: the largest absolute pairwise
    /// indicator value over the population's scaled objectives, with
    /// `s[m] = (o[m] - ub) / (ub - lb)` for the global component bounds
    /// `[lb, ub]`.
    fn adaptive_factor(&self, population: &[Individual]) -> f64 {
        let (lb, ub) = population
            .iter()
            .flat_map(|individual| individual.solution.objective().iter().copied())
            .minmax()
            .into_option()
            .unwrap_or((0.0, 0.0));

        let scaled: Vec<Vec<f64>> = population
            .iter()
            .map(|individual| {
                individual
                    .solution
                    .objective()
                    .iter()
                    .map(|o| (o - ub) / (ub - lb))
                    .collect()
            })
            .collect();

        let mut factor = f64::NEG_INFINITY;
        for i in 0..scaled.len() {
            for j in 0..scaled.len() {
                if i != j {
                    let indicator = self.config.indicator.evaluate(
                        &scaled[i],
                        &scaled[j],
                        self.hypervolume.reference(),
                    );
                    factor = factor.max(indicator.abs());
                }
            }
        }
        factor
    }

    /// Shrink the population back to `pop_max` by discarding the
    /// minimum-fitness member, refunding its indicator term to the
    /// survivors each time.
    fn environmental_selection(&self, population: &mut Vec<Individual>, k: f64, pop_max: usize) {
        while population.len() > pop_max {
            let mut worst = 0;
            for i in 0..population.len() {
                if population[i].fitness < population[worst].fitness {
                    worst = i;
                }
            }
            let last = population.len() - 1;
            population.swap(worst, last);
            if let Some(removed) = population.pop() {
                for individual in population.iter_mut() {
                    let indicator = self.config.indicator.evaluate(
                        removed.solution.objective(),
                        individual.solution.objective(),
                        self.hypervolume.reference(),
                    );
                    individual.fitness += (-indicator / k).exp();
                }
            }
        }
    }

    /// The problem instance.
    pub fn instance(&self) -> &RmnkInstance {
        &self.instance
    }

    /// The nondominated archive built so far.
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// The anytime trace recorded so far.
    pub fn anytime(&self) -> &[GenerationRecord] {
        &self.anytime
    }

    /// The hypervolume of the archive so far.
    pub fn hypervolume(&self) -> f64 {
        self.hypervolume.value()
    }
}
