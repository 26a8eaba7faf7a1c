//! Evolutionary algorithms
//!
//! This module provides the generational genetic algorithm.

pub mod simple_ga;

pub mod prelude {
    pub use super::simple_ga::{run, SimpleGA};
}
