//! Run configuration
//!
//! A [`GaConfig`] is built once, validated before the first generation and
//! never changed while a run is in progress.

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};
use crate::genome::bounds::MultiBounds;
use crate::operators::mutation::MutationStep;

/// Configuration for a generational GA run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Per-gene search intervals
    pub bounds: MultiBounds,
    /// Population size, constant across generations
    pub population_size: usize,
    /// Number of generations to run
    pub generations: usize,
    /// Probability that a parent pair is recombined
    pub crossover_rate: f64,
    /// Per-gene probability of a gaussian perturbation
    pub mutation_rate: f64,
    /// Standard deviation policy of the perturbation
    pub mutation_step: MutationStep,
    /// Number of contestants per tournament
    pub tournament_size: usize,
    /// Multiplier on squared constraint violations
    pub penalty_factor: f64,
    /// Seed of the single random stream used by the run
    pub seed: u64,
    /// Evaluate fitness on the rayon pool (needs the `parallel` feature)
    #[serde(default)]
    pub parallel_evaluation: bool,
}

impl GaConfig {
    /// Default parameters over the given bounds
    pub fn new(bounds: MultiBounds) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// Set the search bounds
    pub fn with_bounds(mut self, bounds: MultiBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the population size
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of generations
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the crossover probability
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Set the per-gene mutation probability
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set the mutation standard deviation policy
    pub fn with_mutation_step(mut self, step: MutationStep) -> Self {
        self.mutation_step = step;
        self
    }

    /// Set the tournament size
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Set the penalty factor
    pub fn with_penalty_factor(mut self, factor: f64) -> Self {
        self.penalty_factor = factor;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable parallel evaluation
    pub fn with_parallel_evaluation(mut self, enabled: bool) -> Self {
        self.parallel_evaluation = enabled;
        self
    }

    /// Check every parameter; the first problem found is returned
    pub fn validate(&self) -> EvoResult<()> {
        self.bounds.validate()?;

        if self.population_size == 0 {
            return Err(EvolutionError::Configuration(
                "Population size must be positive".to_string(),
            ));
        }
        if self.generations == 0 {
            return Err(EvolutionError::Configuration(
                "Generation count must be positive".to_string(),
            ));
        }
        check_probability("crossover_rate", self.crossover_rate)?;
        check_probability("mutation_rate", self.mutation_rate)?;
        if self.tournament_size < 2 {
            return Err(EvolutionError::Configuration(format!(
                "Tournament size must be at least 2, got {}",
                self.tournament_size
            )));
        }
        if !(self.penalty_factor.is_finite() && self.penalty_factor > 0.0) {
            return Err(EvolutionError::Configuration(format!(
                "Penalty factor must be positive and finite, got {}",
                self.penalty_factor
            )));
        }
        self.mutation_step.validate(self.bounds.dimension())?;
        Ok(())
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> EvoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration as pretty JSON
    pub fn to_json(&self) -> EvoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            bounds: MultiBounds::default(),
            population_size: 50,
            generations: 100,
            crossover_rate: 0.8,
            mutation_rate: 0.3,
            mutation_step: MutationStep::Relative(0.3),
            tournament_size: 2,
            penalty_factor: 1e4,
            seed: 42,
            parallel_evaluation: false,
        }
    }
}

fn check_probability(name: &str, value: f64) -> EvoResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EvolutionError::Configuration(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )))
    }
}
