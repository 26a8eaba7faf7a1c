//! Mutation operators

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError, OperatorError};
use crate::genome::bounds::MultiBounds;
use crate::genome::real_vector::RealVector;
use crate::operators::traits::MutationOperator;

/// Standard deviation policy for gaussian mutation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MutationStep {
    /// `sigma_i = scale * (high_i - low_i)`
    Relative(f64),
    /// One absolute sigma per gene
    Absolute(Vec<f64>),
}

impl MutationStep {
    /// Standard deviation used for gene `index`
    pub fn sigma(&self, index: usize, bounds: &MultiBounds) -> f64 {
        match self {
            Self::Relative(scale) => bounds.get(index).map_or(0.0, |b| scale * b.range()),
            Self::Absolute(sigmas) => sigmas.get(index).copied().unwrap_or(0.0),
        }
    }

    /// Check the step against a genome dimension
    pub fn validate(&self, dimension: usize) -> EvoResult<()> {
        match self {
            Self::Relative(scale) => check_sigma(*scale),
            Self::Absolute(sigmas) => {
                if sigmas.len() != dimension {
                    return Err(EvolutionError::DimensionMismatch {
                        expected: dimension,
                        actual: sigmas.len(),
                    });
                }
                sigmas.iter().try_for_each(|&s| check_sigma(s))
            }
        }
    }
}

fn check_sigma(sigma: f64) -> EvoResult<()> {
    if sigma.is_finite() && sigma > 0.0 {
        Ok(())
    } else {
        Err(OperatorError::InvalidConfiguration(format!(
            "Mutation sigma must be positive and finite, got {}",
            sigma
        ))
        .into())
    }
}

/// Gaussian mutation
///
/// Each gene is independently perturbed with probability `mutation_rate` by
/// `N(0, sigma_i)` and then clamped into its bounds. Genes that are not
/// perturbed are left bit-for-bit unchanged.
#[derive(Clone, Debug)]
pub struct GaussianMutation {
    /// Per-gene mutation probability
    pub mutation_rate: f64,
    /// Standard deviation policy
    pub step: MutationStep,
}

impl GaussianMutation {
    /// Create a new Gaussian mutation
    pub fn new(mutation_rate: f64, step: MutationStep) -> Self {
        assert!(
            (0.0..=1.0).contains(&mutation_rate),
            "Probability must be in [0, 1]"
        );
        Self {
            mutation_rate,
            step,
        }
    }
}

impl MutationOperator for GaussianMutation {
    fn mutate<R: Rng>(&self, genome: &mut RealVector, bounds: &MultiBounds, rng: &mut R) {
        for (i, gene) in genome.genes_mut().iter_mut().enumerate() {
            if rng.gen::<f64>() < self.mutation_rate {
                let z: f64 = rng.sample(StandardNormal);
                *gene += self.step.sigma(i, bounds) * z;
                if let Some(bound) = bounds.get(i) {
                    *gene = bound.clamp(*gene);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds() -> MultiBounds {
        vec![(0.02, 0.084), (0.005, 0.08)].into_iter().collect()
    }

    #[test]
    fn test_zero_rate_leaves_genes_unchanged() {
        let mut rng = StdRng::seed_from_u64(9);
        let mutation = GaussianMutation::new(0.0, MutationStep::Relative(0.3));
        let original = RealVector::new(vec![0.05, 0.04]);
        for _ in 0..50 {
            let mut genome = original.clone();
            mutation.mutate(&mut genome, &bounds(), &mut rng);
            assert_eq!(genome, original);
        }
    }

    #[test]
    fn test_full_rate_changes_and_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let mutation = GaussianMutation::new(1.0, MutationStep::Relative(0.3));
        let original = RealVector::new(vec![0.05, 0.04]);
        let mut changed = 0;
        for _ in 0..200 {
            let mut genome = original.clone();
            mutation.mutate(&mut genome, &bounds(), &mut rng);
            assert!(bounds().contains_vec(genome.genes()));
            if genome != original {
                changed += 1;
            }
        }
        assert!(changed > 190);
    }

    #[test]
    fn test_large_sigma_hits_the_bounds_exactly() {
        let mut rng = StdRng::seed_from_u64(9);
        let mutation = GaussianMutation::new(1.0, MutationStep::Absolute(vec![10.0, 10.0]));
        let b = bounds();
        let mut clamped = 0;
        for _ in 0..100 {
            let mut genome = RealVector::new(vec![0.05, 0.04]);
            mutation.mutate(&mut genome, &b, &mut rng);
            for (i, &g) in genome.genes().iter().enumerate() {
                let bound = b.get(i).unwrap();
                if g == bound.min || g == bound.max {
                    clamped += 1;
                }
            }
        }
        assert!(clamped > 150);
    }

    #[test]
    fn test_sigma_policies() {
        let b = bounds();
        let relative = MutationStep::Relative(0.5);
        assert!((relative.sigma(0, &b) - 0.032).abs() < 1e-12);
        let absolute = MutationStep::Absolute(vec![0.002, 0.005]);
        assert_eq!(absolute.sigma(1, &b), 0.005);
    }

    #[test]
    fn test_step_validation() {
        assert!(MutationStep::Relative(0.3).validate(2).is_ok());
        assert!(MutationStep::Relative(0.0).validate(2).is_err());
        assert!(MutationStep::Absolute(vec![0.1, f64::NAN]).validate(2).is_err());
        assert!(MutationStep::Absolute(vec![0.1]).validate(2).is_err());
    }
}
