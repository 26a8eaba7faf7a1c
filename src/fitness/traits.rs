//! Objective traits
//!
//! The engine only sees an [`Objective`]: a pure map from a genome to a scalar
//! cost, lower is better.

use std::collections::BTreeMap;

use crate::genome::real_vector::RealVector;

/// Named derived quantities reported alongside a genome (e.g. heat flow)
pub type Observables = BTreeMap<String, f64>;

/// Objective evaluation trait
///
/// Implementations must be deterministic and total: any gene vector, including
/// out-of-bounds or physically meaningless ones, maps to a finite value.
#[cfg(feature = "parallel")]
pub trait Objective: Send + Sync {
    /// Evaluate the penalized cost (lower = better)
    fn evaluate(&self, genome: &RealVector, penalty_factor: f64) -> f64;

    /// Derived quantities for reporting; not used for selection
    fn observables(&self, _genome: &RealVector) -> Observables {
        Observables::new()
    }
}

/// Objective evaluation trait (non-parallel version)
///
/// Implementations must be deterministic and total: any gene vector, including
/// out-of-bounds or physically meaningless ones, maps to a finite value.
#[cfg(not(feature = "parallel"))]
pub trait Objective {
    /// Evaluate the penalized cost (lower = better)
    fn evaluate(&self, genome: &RealVector, penalty_factor: f64) -> f64;

    /// Derived quantities for reporting; not used for selection
    fn observables(&self, _genome: &RealVector) -> Observables {
        Observables::new()
    }
}

/// Wraps a closure as an objective with no observables
pub struct FnObjective<F> {
    f: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&RealVector, f64) -> f64,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[cfg(feature = "parallel")]
impl<F> Objective for FnObjective<F>
where
    F: Fn(&RealVector, f64) -> f64 + Send + Sync,
{
    fn evaluate(&self, genome: &RealVector, penalty_factor: f64) -> f64 {
        (self.f)(genome, penalty_factor)
    }
}

#[cfg(not(feature = "parallel"))]
impl<F> Objective for FnObjective<F>
where
    F: Fn(&RealVector, f64) -> f64,
{
    fn evaluate(&self, genome: &RealVector, penalty_factor: f64) -> f64 {
        (self.f)(genome, penalty_factor)
    }
}

impl<T: Objective + ?Sized> Objective for &T {
    fn evaluate(&self, genome: &RealVector, penalty_factor: f64) -> f64 {
        (**self).evaluate(genome, penalty_factor)
    }

    fn observables(&self, genome: &RealVector) -> Observables {
        (**self).observables(genome)
    }
}
