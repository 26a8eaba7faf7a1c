//! Selection operators

use rand::Rng;

use crate::error::OperatorError;
use crate::operators::traits::SelectionOperator;

/// Tournament selection operator
///
/// Draws `tournament_size` indices uniformly with replacement and keeps the
/// one with the lowest fitness. The same index may be drawn more than once;
/// among equal fitness values the earliest draw wins.
#[derive(Clone, Debug)]
pub struct TournamentSelection {
    /// Tournament size (number of draws)
    pub tournament_size: usize,
}

impl TournamentSelection {
    /// Create a new tournament selection with the given size
    pub fn new(tournament_size: usize) -> Self {
        assert!(tournament_size >= 1, "Tournament size must be at least 1");
        Self { tournament_size }
    }

    /// Create binary tournament selection (size = 2)
    pub fn binary() -> Self {
        Self::new(2)
    }
}

impl SelectionOperator for TournamentSelection {
    fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> Result<usize, OperatorError> {
        if fitness.is_empty() {
            return Err(OperatorError::SelectionFailed(
                "Population cannot be empty".to_string(),
            ));
        }

        let mut winner = rng.gen_range(0..fitness.len());
        for _ in 1..self.tournament_size {
            let challenger = rng.gen_range(0..fitness.len());
            if fitness[challenger] < fitness[winner] {
                winner = challenger;
            }
        }
        Ok(winner)
    }
}
