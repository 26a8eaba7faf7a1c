//! Operator traits
//!
//! Selection, crossover and mutation seams used by the engine. Every method
//! takes the run's random stream explicitly.

use rand::Rng;

use crate::error::{EvoResult, OperatorError};
use crate::genome::bounds::MultiBounds;
use crate::genome::real_vector::RealVector;

/// Selection operator trait
///
/// Picks parents by fitness alone (lower = better).
pub trait SelectionOperator: Send + Sync {
    /// Select a single individual, returning its index into `fitness`
    fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> Result<usize, OperatorError>;
}

/// Crossover operator trait
///
/// Combines two parents into two children. The operator owns its own
/// application probability; when it declines, children are parent copies.
pub trait CrossoverOperator: Send + Sync {
    fn crossover<R: Rng>(
        &self,
        parent1: &RealVector,
        parent2: &RealVector,
        rng: &mut R,
    ) -> EvoResult<(RealVector, RealVector)>;
}

/// Mutation operator trait
///
/// Perturbs a genome in place. Implementations must leave every gene inside
/// `bounds`.
pub trait MutationOperator: Send + Sync {
    fn mutate<R: Rng>(&self, genome: &mut RealVector, bounds: &MultiBounds, rng: &mut R);
}
