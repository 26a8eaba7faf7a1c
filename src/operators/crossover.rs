//! Crossover operators

use rand::Rng;

use crate::error::EvoResult;
use crate::genome::real_vector::RealVector;
use crate::operators::traits::CrossoverOperator;

/// Arithmetic crossover for real-valued genomes
///
/// With probability `crossover_rate`, draws one `alpha ~ U(0, 1)` shared by all
/// genes and returns `alpha * p1 + (1 - alpha) * p2` and
/// `(1 - alpha) * p1 + alpha * p2`. Otherwise the children are exact copies of
/// the parents. Each child gene lies between the two parent genes, so bounded
/// parents give bounded children.
#[derive(Clone, Debug)]
pub struct ArithmeticCrossover {
    /// Probability that a pairing is recombined
    pub crossover_rate: f64,
}

impl ArithmeticCrossover {
    /// Create a new arithmetic crossover with the given application rate
    pub fn new(crossover_rate: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&crossover_rate),
            "Crossover rate must be in [0, 1]"
        );
        Self { crossover_rate }
    }
}

impl CrossoverOperator for ArithmeticCrossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &RealVector,
        parent2: &RealVector,
        rng: &mut R,
    ) -> EvoResult<(RealVector, RealVector)> {
        if rng.gen::<f64>() >= self.crossover_rate {
            return Ok((parent1.clone(), parent2.clone()));
        }

        let alpha = rng.gen::<f64>();
        let child1 = parent1.blend(parent2, alpha)?;
        let child2 = parent2.blend(parent1, alpha)?;
        Ok((child1, child2))
    }
}
