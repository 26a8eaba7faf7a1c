//! Run history and results
//!
//! One [`GenerationStats`] is appended per generation. Records are never
//! modified after they are appended; consumers (reports, plots) only read.

use serde::{Deserialize, Serialize};

use crate::error::EvoResult;
use crate::fitness::traits::Observables;
use crate::genome::real_vector::RealVector;
use crate::population::population::FitnessSummary;

/// Statistics for a single generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number
    pub generation: usize,
    /// Total fitness evaluations so far
    pub evaluations: usize,
    /// Best (lowest) fitness in this generation
    pub best_fitness: f64,
    /// Worst (highest) fitness in this generation
    pub worst_fitness: f64,
    /// Mean fitness
    pub mean_fitness: f64,
    /// Copy of the best genome
    pub best_genome: RealVector,
    /// Objective-reported quantities for the best genome
    pub observables: Observables,
}

impl GenerationStats {
    /// Build a record from a population summary
    pub fn new(
        generation: usize,
        evaluations: usize,
        summary: &FitnessSummary,
        best_genome: RealVector,
        observables: Observables,
    ) -> Self {
        Self {
            generation,
            evaluations,
            best_fitness: summary.best,
            worst_fitness: summary.worst,
            mean_fitness: summary.mean,
            best_genome,
            observables,
        }
    }
}

/// Append-only sequence of generation records
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    generations: Vec<GenerationStats>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history sized for `generations` records
    pub fn with_capacity(generations: usize) -> Self {
        Self {
            generations: Vec::with_capacity(generations),
        }
    }

    /// Record a generation's statistics
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// Number of generations recorded
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// All records in generation order
    pub fn generations(&self) -> &[GenerationStats] {
        &self.generations
    }

    /// Record of one generation
    pub fn get(&self, generation: usize) -> Option<&GenerationStats> {
        self.generations.get(generation)
    }

    /// Most recent record
    pub fn last(&self) -> Option<&GenerationStats> {
        self.generations.last()
    }

    /// Iterate over the records
    pub fn iter(&self) -> impl Iterator<Item = &GenerationStats> {
        self.generations.iter()
    }

    /// Best fitness per generation
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.best_fitness).collect()
    }

    /// Worst fitness per generation
    pub fn worst_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.worst_fitness).collect()
    }

    /// Mean fitness per generation
    pub fn mean_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.mean_fitness).collect()
    }

    /// One observable of the best genome per generation
    ///
    /// `None` where the objective did not report the quantity.
    pub fn observable_history(&self, key: &str) -> Vec<Option<f64>> {
        self.generations
            .iter()
            .map(|g| g.observables.get(key).copied())
            .collect()
    }

    /// Lowest best fitness over all generations
    pub fn best_fitness(&self) -> Option<f64> {
        self.generations
            .iter()
            .map(|g| g.best_fitness)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Get a summary of the evolution run
    pub fn summary(&self) -> String {
        let first = self.generations.first().map_or(f64::NAN, |g| g.best_fitness);
        let best = self.best_fitness().unwrap_or(f64::NAN);
        let evaluations = self.last().map_or(0, |g| g.evaluations);

        format!(
            "Evolution Summary:\n\
             - Generations: {}\n\
             - Evaluations: {}\n\
             - Initial best fitness: {:.6e}\n\
             - Best fitness: {:.6e}",
            self.len(),
            evaluations,
            first,
            best,
        )
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a GenerationStats;
    type IntoIter = std::slice::Iter<'a, GenerationStats>;

    fn into_iter(self) -> Self::IntoIter {
        self.generations.iter()
    }
}

/// Result of an evolution run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best genome of the final population
    pub best_genome: RealVector,
    /// Its fitness
    pub best_fitness: f64,
    /// Objective-reported quantities for the best genome
    pub observables: Observables,
    /// Number of generations completed
    pub generations: usize,
    /// Total fitness evaluations
    pub evaluations: usize,
    /// Per-generation records
    pub history: History,
}

impl EvolutionResult {
    /// Serialize the result, history included, as pretty JSON
    pub fn to_json(&self) -> EvoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable summary of the run
    pub fn summary(&self) -> String {
        let mut out = self.history.summary();
        out.push_str(&format!("\n - Final fitness: {:.6e}", self.best_fitness));
        for (key, value) in &self.observables {
            out.push_str(&format!("\n - {}: {:.6}", key, value));
        }
        out
    }
}

pub mod prelude {
    pub use super::{EvolutionResult, GenerationStats, History};
}
