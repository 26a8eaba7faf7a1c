//! Population type
//!
//! A fixed-size buffer of individuals for one generation, plus the fitness
//! bookkeeping the engine needs (evaluation, best/worst/mean).

use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::fitness::traits::Objective;
use crate::genome::bounds::MultiBounds;
use crate::genome::real_vector::RealVector;
use crate::population::individual::Individual;

/// Best/worst/mean fitness of a population
///
/// Indices refer to positions in the population. Ties resolve to the lowest
/// index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitnessSummary {
    pub best_index: usize,
    pub worst_index: usize,
    pub best: f64,
    pub worst: f64,
    pub mean: f64,
}

/// A population of individuals
#[derive(Clone, Debug, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Create a population with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
        }
    }

    /// Create a population from a vector of individuals
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Create a random population
    ///
    /// Values are drawn gene by gene: all `size` values of gene 0 first, then
    /// gene 1, and so on, each uniform over its closed interval.
    pub fn random<R: Rng>(size: usize, bounds: &MultiBounds, rng: &mut R) -> Self {
        let mut genes = vec![Vec::with_capacity(bounds.dimension()); size];
        for b in bounds.iter() {
            for row in genes.iter_mut() {
                row.push(rng.gen_range(b.min..=b.max));
            }
        }
        Self::from_individuals(
            genes
                .into_iter()
                .map(|g| Individual::new(RealVector::new(g)))
                .collect(),
        )
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Add an individual to the population
    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    /// Get an iterator over the individuals
    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Fitness values in index order; unevaluated slots read as +inf
    pub fn fitness_values(&self) -> Vec<f64> {
        self.individuals
            .iter()
            .map(|i| i.fitness.unwrap_or(f64::INFINITY))
            .collect()
    }

    /// Evaluate all unevaluated individuals (sequential)
    ///
    /// Returns the number of objective calls made.
    pub fn evaluate<O>(&mut self, objective: &O, penalty_factor: f64) -> usize
    where
        O: Objective + ?Sized,
    {
        let mut evaluations = 0;
        for individual in self.individuals.iter_mut().filter(|i| !i.is_evaluated()) {
            individual.set_fitness(objective.evaluate(&individual.genome, penalty_factor));
            evaluations += 1;
        }
        evaluations
    }

    /// Best/worst/mean over evaluated individuals, `None` if there are none
    pub fn statistics(&self) -> Option<FitnessSummary> {
        let mut scored = self
            .individuals
            .iter()
            .enumerate()
            .filter_map(|(i, ind)| ind.fitness.map(|f| (i, f)));

        let (first_index, first) = scored.next()?;
        let mut summary = FitnessSummary {
            best_index: first_index,
            worst_index: first_index,
            best: first,
            worst: first,
            mean: 0.0,
        };
        let mut sum = first;
        let mut count = 1usize;

        for (i, f) in scored {
            if f < summary.best {
                summary.best = f;
                summary.best_index = i;
            }
            if f > summary.worst {
                summary.worst = f;
                summary.worst_index = i;
            }
            sum += f;
            count += 1;
        }
        summary.mean = sum / count as f64;
        Some(summary)
    }
}

/// Parallel evaluation support (requires `parallel` feature)
#[cfg(feature = "parallel")]
impl Population {
    /// Evaluate all unevaluated individuals on the rayon pool
    ///
    /// Each result is written back to its own slot, so index order is kept.
    pub fn evaluate_parallel<O>(&mut self, objective: &O, penalty_factor: f64) -> usize
    where
        O: Objective + ?Sized,
    {
        self.individuals
            .par_iter_mut()
            .filter(|i| !i.is_evaluated())
            .map(|individual| {
                individual.set_fitness(objective.evaluate(&individual.genome, penalty_factor));
            })
            .count()
    }
}

/// Sequential fallback for parallel evaluation (when `parallel` feature is disabled)
#[cfg(not(feature = "parallel"))]
impl Population {
    /// Evaluate all unevaluated individuals (sequential fallback)
    pub fn evaluate_parallel<O>(&mut self, objective: &O, penalty_factor: f64) -> usize
    where
        O: Objective + ?Sized,
    {
        self.evaluate(objective, penalty_factor)
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Individual;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<I: IntoIterator<Item = Individual>>(iter: I) -> Self {
        Self::from_individuals(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::traits::FnObjective;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scored(gene: f64, fitness: f64) -> Individual {
        let mut individual = Individual::new(RealVector::new(vec![gene]));
        individual.set_fitness(fitness);
        individual
    }

    fn create_test_population() -> Population {
        vec![
            scored(1.0, 30.0),
            scored(2.0, 10.0),
            scored(3.0, 50.0),
            scored(4.0, 10.0),
            scored(5.0, 50.0),
        ]
        .into_iter()
        .collect()
    }

    fn sum_of_genes() -> FnObjective<impl Fn(&RealVector, f64) -> f64 + Send + Sync> {
        FnObjective::new(|g: &RealVector, _| g.genes().iter().sum())
    }

    #[test]
    fn test_population_random() {
        let mut rng = StdRng::seed_from_u64(42);
        let bounds: MultiBounds = vec![(0.02, 0.084), (0.005, 0.08)].into_iter().collect();
        let pop = Population::random(25, &bounds, &mut rng);

        assert_eq!(pop.len(), 25);
        assert!(pop.iter().all(|i| !i.is_evaluated()));
        for ind in pop.iter() {
            assert_eq!(ind.genome.dimension(), 2);
            assert!(bounds.contains_vec(ind.genome.genes()));
        }
    }

    #[test]
    fn test_population_random_draws_column_major() {
        let bounds: MultiBounds = vec![(0.0, 1.0), (10.0, 11.0)].into_iter().collect();
        let pop = Population::random(3, &bounds, &mut StdRng::seed_from_u64(1));

        let mut rng = StdRng::seed_from_u64(1);
        let column0: Vec<f64> = (0..3).map(|_| rng.gen_range(0.0..=1.0)).collect();
        let column1: Vec<f64> = (0..3).map(|_| rng.gen_range(10.0..=11.0)).collect();
        for i in 0..3 {
            assert_eq!(pop[i].genome[0], column0[i]);
            assert_eq!(pop[i].genome[1], column1[i]);
        }
    }

    #[test]
    fn test_population_statistics_first_occurrence() {
        let pop = create_test_population();
        let stats = pop.statistics().unwrap();

        assert_eq!(stats.best_index, 1);
        assert_eq!(stats.worst_index, 2);
        assert_eq!(stats.best, 10.0);
        assert_eq!(stats.worst, 50.0);
        assert_eq!(stats.mean, 30.0);
    }

    #[test]
    fn test_population_statistics_empty() {
        assert!(Population::default().statistics().is_none());
        let unscored: Population = vec![Individual::new(RealVector::new(vec![1.0]))]
            .into_iter()
            .collect();
        assert!(unscored.statistics().is_none());
    }

    #[test]
    fn test_population_evaluate() {
        let mut rng = StdRng::seed_from_u64(42);
        let bounds: MultiBounds = vec![(0.0, 1.0); 3].into_iter().collect();
        let mut pop = Population::random(5, &bounds, &mut rng);

        assert_eq!(pop.evaluate(&sum_of_genes(), 1.0), 5);
        assert!(pop.iter().all(Individual::is_evaluated));
        // Already scored individuals are not re-evaluated
        assert_eq!(pop.evaluate(&sum_of_genes(), 1.0), 0);
    }

    #[test]
    fn test_population_evaluate_parallel_keeps_order() {
        let mut rng = StdRng::seed_from_u64(42);
        let bounds: MultiBounds = vec![(-5.0, 5.0); 3].into_iter().collect();
        let mut sequential = Population::random(100, &bounds, &mut rng);
        let mut parallel = sequential.clone();

        sequential.evaluate(&sum_of_genes(), 1.0);
        assert_eq!(parallel.evaluate_parallel(&sum_of_genes(), 1.0), 100);
        assert_eq!(sequential.fitness_values(), parallel.fitness_values());
    }

    #[test]
    fn test_fitness_values_unevaluated() {
        let pop: Population = vec![
            scored(1.0, 2.0),
            Individual::new(RealVector::new(vec![1.0])),
        ]
        .into_iter()
        .collect();
        assert_eq!(pop.fitness_values(), vec![2.0, f64::INFINITY]);
    }
}
