//! GSEMO: the global simple evolutionary multi-objective optimizer.
//!
//! A single-population loop over the archive itself: pick a member
//! uniformly at random, flip each of its bits with probability 1/N, and
//! offer the child to the archive.

use crate::anytime::AnytimeRecord;
use crate::archive::Archive;
use crate::config::{resolve_reference, GsemoConfig};
use crate::error::Error;
use crate::hypervolume::Hypervolume;
use crate::instance::RmnkInstance;
use crate::solution::Solution;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The GSEMO driver.
pub struct Gsemo {
    instance: RmnkInstance,
    config: GsemoConfig,
    rng: StdRng,
    hypervolume: Hypervolume,
    archive: Archive,
    anytime: Vec<AnytimeRecord>,
}

impl Gsemo {
    /// Create a driver over a loaded instance.
    pub fn new(instance: RmnkInstance, config: GsemoConfig) -> Result<Self, Error> {
        config.validate()?;
        let reference = resolve_reference(&config.reference, instance.objectives())?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Gsemo {
            instance,
            config,
            rng,
            hypervolume: Hypervolume::new(reference),
            archive: Archive::new(),
            anytime: Vec::new(),
        })
    }

    /// Run until the evaluation budget is spent.
    pub fn run(&mut self) {
        info!(
            "gsemo: starting run, budget {} evaluations",
            self.config.max_evaluations
        );

        let seed_solution = Solution::random(&self.instance, &mut self.rng);
        self.hypervolume.insert(seed_solution.objective().to_vec());
        self.archive.insert(seed_solution);
        self.anytime.push(AnytimeRecord {
            evaluation: 0,
            hypervolume: self.hypervolume.value(),
        });

        for i in 0..self.config.max_evaluations {
            let index = self.rng.gen_range(0..self.archive.len());
            let child =
                Solution::uniform_flip(&self.instance, &mut self.rng, &self.archive.solutions()[index]);

            let objective = child.objective().to_vec();
            if self.archive.insert(child) {
                self.hypervolume.insert(objective);
                self.anytime.push(AnytimeRecord {
                    evaluation: i + 1,
                    hypervolume: self.hypervolume.value(),
                });
            }
        }

        info!(
            "gsemo: done, archive size {}, hypervolume {}",
            self.archive.len(),
            self.hypervolume.value()
        );
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
    pub fn anytime(&self) -> &[AnytimeRecord] {
        &self.anytime
    }

    /// The hypervolume of the archive so far.
    pub fn hypervolume(&self) -> f64 {
        self.hypervolume.value()
    }
}
