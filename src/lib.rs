//! # insulation-evo
//!
//! A seeded, real-coded genetic algorithm for constrained engineering design,
//! with insulation-layer sizing models built in.
//!
//! ## Core Concepts
//!
//! - **Lower is better**: every objective returns a cost to minimize, with
//!   constraint violations folded in as quadratic penalties
//! - **Reproducible**: a run is fully determined by its [`config::GaConfig`],
//!   seed included
//! - **Elitist**: the best genome of each generation survives unchanged, so the
//!   recorded best fitness never rises
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use insulation_evo::prelude::*;
//!
//! let model = CylinderInsulation::new();
//! let result = run(model.config().with_seed(7), model)?;
//! println!("{}", result.summary());
//! ```

pub mod algorithms;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod population;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::config::GaConfig;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
}
