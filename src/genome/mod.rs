//! Genome representation
//!
//! Real-valued gene vectors and the per-gene bounds that constrain them.

pub mod bounds;
pub mod real_vector;

pub mod prelude {
    pub use super::bounds::*;
    pub use super::real_vector::*;
}
