//! Individual wrapper type
//!
//! Pairs a genome with its fitness. Fitness is `None` until the individual has
//! been scored in its own generation.

use serde::{Deserialize, Serialize};

use crate::genome::real_vector::RealVector;

/// An individual in the population
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// The genome of this individual
    pub genome: RealVector,
    /// The fitness value (None if not yet evaluated)
    pub fitness: Option<f64>,
    /// Generation when this individual was created
    pub birth_generation: usize,
}

impl Individual {
    /// Create a new individual with an unevaluated genome
    pub fn new(genome: RealVector) -> Self {
        Self {
            genome,
            fitness: None,
            birth_generation: 0,
        }
    }

    /// Create a new individual with birth generation
    pub fn with_generation(genome: RealVector, generation: usize) -> Self {
        Self {
            genome,
            fitness: None,
            birth_generation: generation,
        }
    }

    /// Check if this individual has been evaluated
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Set the fitness value
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Take the genome out of this individual
    pub fn into_genome(self) -> RealVector {
        self.genome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_individual_new() {
        let individual = Individual::new(RealVector::new(vec![1.0, 2.0]));
        assert!(!individual.is_evaluated());
        assert_eq!(individual.birth_generation, 0);
    }

    #[test]
    fn test_individual_set_fitness() {
        let mut individual = Individual::new(RealVector::new(vec![1.0]));
        individual.set_fitness(0.5);
        assert_eq!(individual.fitness, Some(0.5));
    }

    #[test]
    fn test_individual_with_generation() {
        let individual = Individual::with_generation(RealVector::new(vec![1.0]), 10);
        assert_eq!(individual.birth_generation, 10);
        assert!(!individual.is_evaluated());
    }

    #[test]
    fn test_individual_into_genome() {
        let genome = RealVector::new(vec![1.0, 2.0, 3.0]);
        let mut individual = Individual::new(genome.clone());
        individual.set_fitness(42.0);
        assert_eq!(individual.into_genome(), genome);
    }
}
