//! Driver configuration.

use crate::error::Error;
use crate::ibea::operators::{Crossover, Indicator, Mutation, Selection};
use serde::{Deserialize, Serialize};

/// Configuration for the GSEMO driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GsemoConfig {
    /// Child evaluations to perform after the seed solution.
    pub max_evaluations: usize,
    /// Seed for the driver's random generator; `None` draws one from
    /// system entropy.
    pub seed: Option<u64>,
    /// Hypervolume reference point; `None` uses the zero vector of
    /// length M.
    pub reference: Option<Vec<f64>>,
}

impl Default for GsemoConfig {
    fn default() -> Self {
        GsemoConfig {
            max_evaluations: 10_000,
            seed: None,
            reference: None,
        }
    }
}

impl GsemoConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        GsemoConfig::default()
    }

    /// Set the evaluation budget.
    pub fn with_max_evaluations(mut self, maxeval: usize) -> Self {
        self.max_evaluations = maxeval;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the hypervolume reference point.
    pub fn with_reference(mut self, reference: Vec<f64>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// Neighbor acceptance criterion for PLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Acceptance {
    /// Accept every neighbor the archive accepts.
    NonDominating,
    /// Accept only neighbors that dominate the explored solution.
    Dominating,
    /// Prefer dominating neighbors; when none is accepted for an
    /// explored solution, replay the remaining neighbors with
    /// non-dominating acceptance.
    Both,
}

/// Neighborhood exploration strategy for PLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exploration {
    /// Scan the full neighborhood of each explored solution.
    BestImprovement,
    /// Stop scanning a neighborhood at its first accepted neighbor.
    FirstImprovement,
    /// Run first-improvement until the frontier empties, then restart
    /// with best-improvement on whatever frontier remains.
    Both,
}

/// Configuration for the PLS driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlsConfig {
    /// Neighbor evaluations to perform after the seed solution.
    pub max_evaluations: usize,
    /// Seed for the driver's random generator; `None` draws one from
    /// system entropy.
    pub seed: Option<u64>,
    /// Hypervolume reference point; `None` uses the zero vector of
    /// length M.
    pub reference: Option<Vec<f64>>,
    /// Neighbor acceptance criterion.
    pub acceptance: Acceptance,
    /// Neighborhood exploration strategy.
    pub exploration: Exploration,
}

impl Default for PlsConfig {
    fn default() -> Self {
        PlsConfig {
            max_evaluations: 10_000,
            seed: None,
            reference: None,
            acceptance: Acceptance::NonDominating,
            exploration: Exploration::BestImprovement,
        }
    }
}

impl PlsConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        PlsConfig::default()
    }

    /// Set the evaluation budget.
    pub fn with_max_evaluations(mut self, maxeval: usize) -> Self {
        self.max_evaluations = maxeval;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the hypervolume reference point.
    pub fn with_reference(mut self, reference: Vec<f64>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Set the acceptance criterion.
    pub fn with_acceptance(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    /// Set the exploration strategy.
    pub fn with_exploration(mut self, exploration: Exploration) -> Self {
        self.exploration = exploration;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// Configuration for the IBEA driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbeaConfig {
    /// Evaluation budget, counting initialization and merged children.
    pub max_evaluations: usize,
    /// Seed for the driver's random generator; `None` draws one from
    /// system entropy.
    pub seed: Option<u64>,
    /// Hypervolume reference point; `None` uses the zero vector of
    /// length M.
    pub reference: Option<Vec<f64>>,
    /// Maximum population size (mu).
    pub population_size: usize,
    /// Maximum number of generations.
    pub generations: usize,
    /// Fitness scaling factor k.
    pub scaling_factor: f64,
    /// Whether to rescale the indicator by the adaptive factor each
    /// generation.
    pub adaptive: bool,
    /// Pairwise quality indicator.
    pub indicator: Indicator,
    /// Crossover operator.
    pub crossover: Crossover,
    /// Mutation operator.
    pub mutation: Mutation,
    /// Mating-pool selection operator.
    pub selection: Selection,
}

impl Default for IbeaConfig {
    fn default() -> Self {
        IbeaConfig {
            max_evaluations: 10_000,
            seed: None,
            reference: None,
            population_size: 100,
            generations: 100,
            scaling_factor: 0.05,
            adaptive: false,
            indicator: Indicator::Epsilon,
            crossover: Crossover::Uniform { probability: 0.9 },
            mutation: Mutation::Uniform { probability: 0.01 },
            selection: Selection::Tournament {
                pool_size: 100,
                tournament_size: 2,
            },
        }
    }
}

impl IbeaConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        IbeaConfig::default()
    }

    /// Set the evaluation budget.
    pub fn with_max_evaluations(mut self, maxeval: usize) -> Self {
        self.max_evaluations = maxeval;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the hypervolume reference point.
    pub fn with_reference(mut self, reference: Vec<f64>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Set the maximum population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the maximum number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the fitness scaling factor.
    pub fn with_scaling_factor(mut self, factor: f64) -> Self {
        self.scaling_factor = factor;
        self
    }

    /// Enable or disable adaptive indicator scaling.
    pub fn with_adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Set the pairwise indicator.
    pub fn with_indicator(mut self, indicator: Indicator) -> Self {
        self.indicator = indicator;
        self
    }

    /// Set the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Set the mutation operator.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Set the selection operator.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), Error> {
        if self.population_size == 0 {
            return Err(Error::InvalidConfiguration(
                "population_size must be at least 1".into(),
            ));
        }
        if self.scaling_factor <= 0.0 {
            return Err(Error::InvalidConfiguration(
                "scaling_factor must be positive".into(),
            ));
        }
        match self.crossover {
            Crossover::Uniform { probability } | Crossover::NPoint { probability, .. } => {
                if !(0.0..=1.0).contains(&probability) {
                    return Err(Error::InvalidConfiguration(
                        "crossover probability must lie in [0, 1]".into(),
                    ));
                }
            }
        }
        let Mutation::Uniform { probability } = self.mutation;
        if !(0.0..=1.0).contains(&probability) {
            return Err(Error::InvalidConfiguration(
                "mutation probability must lie in [0, 1]".into(),
            ));
        }
        let Selection::Tournament {
            pool_size,
            tournament_size,
        } = self.selection;
        if pool_size == 0 {
            return Err(Error::InvalidConfiguration(
                "mating pool size must be at least 1".into(),
            ));
        }
        if tournament_size == 0 {
            return Err(Error::InvalidConfiguration(
                "tournament size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Resolve a configured reference point against the instance dimension,
/// defaulting to the zero vector.
pub(crate) fn resolve_reference(
    reference: &Option<Vec<f64>>,
    objectives: usize,
) -> Result<Vec<f64>, Error> {
    match reference {
        Some(point) if point.len() != objectives => Err(Error::InvalidConfiguration(format!(
            "reference point has dimension {}, instance has {} objectives",
            point.len(),
            objectives
        ))),
        Some(point) => Ok(point.clone()),
        None => Ok(vec![0.0; objectives]),
    }
}
