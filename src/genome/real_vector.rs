//! Real-valued vector genome
//!
//! One gene per design variable. Gene order is fixed for a run; what each
//! position means is decided by the objective, not by the engine.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};

/// Fixed-length real-valued vector genome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealVector {
    genes: Vec<f64>,
}

impl RealVector {
    /// Create a new real vector with the given genes
    pub fn new(genes: Vec<f64>) -> Self {
        Self { genes }
    }

    /// Number of genes
    pub fn dimension(&self) -> usize {
        self.genes.len()
    }

    /// Borrow the genes
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Borrow the genes mutably
    pub fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    /// Convex combination `weight * self + (1 - weight) * other`
    ///
    /// Each gene is clamped to the interval spanned by its two parents, so
    /// rounding can never carry a child past a parent sitting on a bound.
    pub fn blend(&self, other: &Self, weight: f64) -> EvoResult<Self> {
        if self.genes.len() != other.genes.len() {
            return Err(EvolutionError::DimensionMismatch {
                expected: self.genes.len(),
                actual: other.genes.len(),
            });
        }
        Ok(Self {
            genes: self
                .genes
                .iter()
                .zip(&other.genes)
                .map(|(&a, &b)| {
                    let mixed = weight * a + (1.0 - weight) * b;
                    mixed.max(a.min(b)).min(a.max(b))
                })
                .collect(),
        })
    }
}

impl From<Vec<f64>> for RealVector {
    fn from(genes: Vec<f64>) -> Self {
        Self::new(genes)
    }
}

impl Index<usize> for RealVector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.genes[index]
    }
}

impl IndexMut<usize> for RealVector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.genes[index]
    }
}
