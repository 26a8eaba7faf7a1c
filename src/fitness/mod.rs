//! Objective functions
//!
//! The [`traits::Objective`] seam, penalty helpers, and the two insulation
//! models.

pub mod insulation;
pub mod penalty;
pub mod traits;

pub mod prelude {
    pub use super::insulation::*;
    pub use super::penalty::*;
    pub use super::traits::*;
}
