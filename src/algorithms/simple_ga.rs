//! Simple Genetic Algorithm
//!
//! A generational GA with single-individual elitism and a fixed generation
//! budget. Each generation is scored, recorded, and then fully replaced by the
//! elite copy plus offspring bred from tournament winners.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::GaConfig;
use crate::diagnostics::{EvolutionResult, GenerationStats, History};
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::penalty::SENTINEL_FITNESS;
use crate::fitness::traits::Objective;
use crate::genome::real_vector::RealVector;
use crate::operators::crossover::ArithmeticCrossover;
use crate::operators::mutation::GaussianMutation;
use crate::operators::selection::TournamentSelection;
use crate::operators::traits::{CrossoverOperator, MutationOperator, SelectionOperator};
use crate::population::individual::Individual;
use crate::population::population::Population;

/// Simple Genetic Algorithm
///
/// Operators default to the ones described by the [`GaConfig`]; any of them
/// can be swapped with `with_selection`, `with_crossover` or `with_mutation`.
pub struct SimpleGA<
    O,
    S = TournamentSelection,
    C = ArithmeticCrossover,
    M = GaussianMutation,
> {
    config: GaConfig,
    objective: O,
    selection: S,
    crossover: C,
    mutation: M,
}

impl<O: Objective> SimpleGA<O> {
    /// Validate the configuration and build the default operators from it
    pub fn new(config: GaConfig, objective: O) -> EvoResult<Self> {
        config.validate()?;
        Ok(Self {
            selection: TournamentSelection::new(config.tournament_size),
            crossover: ArithmeticCrossover::new(config.crossover_rate),
            mutation: GaussianMutation::new(config.mutation_rate, config.mutation_step.clone()),
            config,
            objective,
        })
    }
}

impl<O, S, C, M> SimpleGA<O, S, C, M> {
    /// Replace the selection operator
    pub fn with_selection<NewS: SelectionOperator>(self, selection: NewS) -> SimpleGA<O, NewS, C, M> {
        SimpleGA {
            config: self.config,
            objective: self.objective,
            selection,
            crossover: self.crossover,
            mutation: self.mutation,
        }
    }

    /// Replace the crossover operator
    pub fn with_crossover<NewC: CrossoverOperator>(self, crossover: NewC) -> SimpleGA<O, S, NewC, M> {
        SimpleGA {
            config: self.config,
            objective: self.objective,
            selection: self.selection,
            crossover,
            mutation: self.mutation,
        }
    }

    /// Replace the mutation operator
    pub fn with_mutation<NewM: MutationOperator>(self, mutation: NewM) -> SimpleGA<O, S, C, NewM> {
        SimpleGA {
            config: self.config,
            objective: self.objective,
            selection: self.selection,
            crossover: self.crossover,
            mutation,
        }
    }

    /// The validated run configuration
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The objective being minimized
    pub fn objective(&self) -> &O {
        &self.objective
    }
}

impl<O, S, C, M> SimpleGA<O, S, C, M>
where
    O: Objective,
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
{
    /// Run the genetic algorithm on a stream seeded from `config.seed`
    #[tracing::instrument(
        name = "simple_ga",
        skip_all,
        fields(
            population_size = self.config.population_size,
            generations = self.config.generations,
            seed = self.config.seed,
        )
    )]
    pub fn run(&self) -> EvoResult<EvolutionResult> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.run_with_rng(&mut rng)
    }

    /// Run the genetic algorithm on a caller-provided random stream
    ///
    /// Every stochastic step (initialization, tournaments, crossover and
    /// mutation draws) consumes `rng` in a fixed order, so the same stream
    /// state always produces the same result.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> EvoResult<EvolutionResult> {
        let config = &self.config;
        info!(
            dimension = config.bounds.dimension(),
            crossover_rate = config.crossover_rate,
            mutation_rate = config.mutation_rate,
            tournament_size = config.tournament_size,
            penalty_factor = config.penalty_factor,
            "Starting evolution"
        );

        let mut population = Population::random(config.population_size, &config.bounds, rng);
        let mut evaluations = self.evaluate(&mut population);
        let mut history = History::with_capacity(config.generations);

        for generation in 0..config.generations {
            let summary = population
                .statistics()
                .ok_or(EvolutionError::EmptyPopulation)?;
            let elite = population[summary.best_index].genome.clone();
            let observables = self.objective.observables(&elite);

            debug!(
                generation,
                best = summary.best,
                mean = summary.mean,
                worst = summary.worst,
                "Generation evaluated"
            );
            if summary.best >= SENTINEL_FITNESS {
                warn!(generation, best = summary.best, "No scorable individual in population");
            }

            history.record(GenerationStats::new(
                generation,
                evaluations,
                &summary,
                elite.clone(),
                observables,
            ));

            let mut offspring = self.breed(&population, elite, generation + 1, rng)?;
            evaluations += self.evaluate(&mut offspring);
            population = offspring;
        }

        let summary = population
            .statistics()
            .ok_or(EvolutionError::EmptyPopulation)?;
        let best = population[summary.best_index].clone();
        let best_fitness = best.fitness.unwrap_or(summary.best);
        let best_genome = best.into_genome();
        let observables = self.objective.observables(&best_genome);

        info!(
            best_fitness,
            evaluations,
            genes = ?best_genome.genes(),
            "Evolution finished"
        );

        Ok(EvolutionResult {
            best_genome,
            best_fitness,
            observables,
            generations: config.generations,
            evaluations,
            history,
        })
    }

    fn evaluate(&self, population: &mut Population) -> usize {
        if self.config.parallel_evaluation {
            population.evaluate_parallel(&self.objective, self.config.penalty_factor)
        } else {
            population.evaluate(&self.objective, self.config.penalty_factor)
        }
    }

    /// Build the next generation: the elite copy, then offspring pairs until
    /// the population is full. When a single slot is left the second child of
    /// the last pair is dropped.
    fn breed<R: Rng>(
        &self,
        population: &Population,
        elite: RealVector,
        birth_generation: usize,
        rng: &mut R,
    ) -> EvoResult<Population> {
        let size = self.config.population_size;
        let fitness = population.fitness_values();

        let mut offspring = Population::with_capacity(size);
        offspring.push(Individual::with_generation(elite, birth_generation));

        while offspring.len() < size {
            let parent1 = &population[self.selection.select(&fitness, rng)?].genome;
            let parent2 = &population[self.selection.select(&fitness, rng)?].genome;

            let (mut child1, mut child2) = self.crossover.crossover(parent1, parent2, rng)?;
            self.mutation.mutate(&mut child1, &self.config.bounds, rng);
            self.mutation.mutate(&mut child2, &self.config.bounds, rng);

            offspring.push(Individual::with_generation(child1, birth_generation));
            if offspring.len() < size {
                offspring.push(Individual::with_generation(child2, birth_generation));
            }
        }

        Ok(offspring)
    }
}

/// Validate `config` and run a [`SimpleGA`] with the default operators
pub fn run<O: Objective>(config: GaConfig, objective: O) -> EvoResult<EvolutionResult> {
    SimpleGA::new(config, objective)?.run()
}
