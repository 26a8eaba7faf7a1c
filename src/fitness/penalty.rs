//! Constraint handling
//!
//! Inequality constraints are expressed as a violation amount (`g(x) - limit`,
//! positive when violated) and turned into a smooth quadratic penalty. Leaving
//! the physical domain is handled by a per-objective [`DomainPolicy`].

use serde::{Deserialize, Serialize};

/// Fitness assigned to candidates that cannot be scored meaningfully
pub const SENTINEL_FITNESS: f64 = 1e9;

/// Quadratic penalty for one inequality: `factor * max(0, violation)^2`
pub fn quadratic_penalty(violation: f64, penalty_factor: f64) -> f64 {
    let excess = violation.max(0.0);
    penalty_factor * excess * excess
}

/// Sum of quadratic penalties for several inequalities
pub fn total_penalty<I>(violations: I, penalty_factor: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    violations
        .into_iter()
        .map(|v| quadratic_penalty(v, penalty_factor))
        .sum()
}

/// Replace NaN and infinities with the sentinel
pub fn guard_finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        SENTINEL_FITNESS
    }
}

/// How an objective treats genes outside its physical domain
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DomainPolicy {
    /// Penalize the distance outside the domain like any other constraint
    Quadratic,
    /// Score any out-of-domain candidate with a fixed sentinel
    Reject {
        /// Fitness returned for rejected candidates
        sentinel: f64,
    },
}

impl DomainPolicy {
    /// Hard rejection with [`SENTINEL_FITNESS`]
    pub fn reject() -> Self {
        Self::Reject {
            sentinel: SENTINEL_FITNESS,
        }
    }

    /// Resolve the domain violations of a candidate
    ///
    /// Returns `Err(fitness)` when the candidate is rejected outright,
    /// otherwise `Ok(penalty)` to be added to its cost. A non-finite sentinel
    /// reads as [`SENTINEL_FITNESS`].
    pub fn apply<I>(&self, violations: I, penalty_factor: f64) -> Result<f64, f64>
    where
        I: IntoIterator<Item = f64>,
    {
        match *self {
            Self::Quadratic => Ok(total_penalty(violations, penalty_factor)),
            Self::Reject { sentinel } => {
                if violations.into_iter().any(|v| v > 0.0) {
                    Err(guard_finite(sentinel))
                } else {
                    Ok(0.0)
                }
            }
        }
    }
}

impl Default for DomainPolicy {
    fn default() -> Self {
        Self::Quadratic
    }
}
