//! Insulation design objectives
//!
//! Two physical models of heat loss through a cylindrical insulation layer.
//! Both minimize a material cost subject to `Q(k, t) <= q_max`; they differ in
//! the heat-flow formula, the cost shape and the gene order.

use std::f64::consts::PI;

use crate::config::GaConfig;
use crate::fitness::penalty::{guard_finite, total_penalty, DomainPolicy, SENTINEL_FITNESS};
use crate::fitness::traits::{Objective, Observables};
use crate::genome::bounds::{Bounds, MultiBounds};
use crate::genome::real_vector::RealVector;
use crate::operators::mutation::MutationStep;

/// Observable key for the computed heat flow [W]
pub const HEAT_FLOW: &str = "heat_flow";
/// Observable key for the insulation thickness [m]
pub const THICKNESS: &str = "thickness";
/// Observable key for the material conductivity [W/m.K]
pub const CONDUCTIVITY: &str = "conductivity";

/// Decoded design variables
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsulationDesign {
    /// Insulation thickness [m]
    pub thickness: f64,
    /// Thermal conductivity [W/m.K]
    pub conductivity: f64,
}

impl InsulationDesign {
    fn observables(&self, heat_flow: Option<f64>) -> Observables {
        let mut obs = Observables::new();
        obs.insert(THICKNESS.to_string(), self.thickness);
        obs.insert(CONDUCTIVITY.to_string(), self.conductivity);
        if let Some(q) = heat_flow {
            obs.insert(HEAT_FLOW.to_string(), q);
        }
        obs
    }
}

/// Radial conduction through a cylindrical shell, no outer convection
///
/// `Q = 2π k L ΔT / ln((r1 + t) / r1)`. Cost is the thickness itself, with
/// quadratic penalties on `Q > q_max` and `k > k_max`.
///
/// Gene layout: `[k, t]`.
#[derive(Clone, Debug, PartialEq)]
pub struct CylinderInsulation {
    /// Inner radius [m]
    pub inner_radius: f64,
    /// Pipe length [m]
    pub length: f64,
    /// Temperature difference across the layer [K]
    pub delta_t: f64,
    /// Heat-flow limit [W]
    pub max_heat_flow: f64,
    /// Conductivity limit [W/m.K]
    pub max_conductivity: f64,
}

impl CylinderInsulation {
    /// Gene index of the conductivity
    pub const CONDUCTIVITY: usize = 0;
    /// Gene index of the thickness
    pub const THICKNESS: usize = 1;

    pub fn new() -> Self {
        Self {
            inner_radius: 0.5,
            length: 2.0,
            delta_t: 180.0,
            max_heat_flow: 120.0,
            max_conductivity: 0.084,
        }
    }

    /// Read the design variables out of a genome
    pub fn decode(&self, genome: &RealVector) -> InsulationDesign {
        InsulationDesign {
            thickness: genome[Self::THICKNESS],
            conductivity: genome[Self::CONDUCTIVITY],
        }
    }

    /// Heat flow through the layer, `None` when the geometry is degenerate
    pub fn heat_flow(&self, design: &InsulationDesign) -> Option<f64> {
        let outer = self.inner_radius + design.thickness;
        let log_ratio = (outer / self.inner_radius).ln();
        if !(log_ratio.is_finite() && log_ratio > 0.0) {
            return None;
        }
        let q = 2.0 * PI * design.conductivity * self.length * self.delta_t / log_ratio;
        q.is_finite().then_some(q)
    }

    /// Search bounds: `k ∈ [0.02, k_max]`, `t ∈ [5 mm, 80 mm]`
    pub fn bounds(&self) -> MultiBounds {
        MultiBounds::new(vec![
            Bounds::new(0.02, self.max_conductivity),
            Bounds::new(0.005, 0.08),
        ])
    }

    /// Run parameters this model is usually solved with
    pub fn config(&self) -> GaConfig {
        GaConfig::new(self.bounds())
            .with_population_size(50)
            .with_generations(100)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.3)
            .with_mutation_step(MutationStep::Relative(0.3))
            .with_tournament_size(2)
            .with_penalty_factor(1e4)
            .with_seed(42)
    }
}

impl Default for CylinderInsulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Objective for CylinderInsulation {
    fn evaluate(&self, genome: &RealVector, penalty_factor: f64) -> f64 {
        if genome.dimension() != 2 {
            return SENTINEL_FITNESS;
        }
        let design = self.decode(genome);
        let Some(q) = self.heat_flow(&design) else {
            return SENTINEL_FITNESS;
        };

        let penalty = total_penalty(
            [
                q - self.max_heat_flow,
                design.conductivity - self.max_conductivity,
            ],
            penalty_factor,
        );
        guard_finite(design.thickness + penalty)
    }

    fn observables(&self, genome: &RealVector) -> Observables {
        if genome.dimension() != 2 {
            return Observables::new();
        }
        let design = self.decode(genome);
        design.observables(self.heat_flow(&design))
    }
}

/// Conduction through the layer in series with outer-surface convection
///
/// `Q = 2π L ΔT / (ln(r_o / r_i) / k + 1 / (h r_o))` with `r_o = r_i + t`.
/// Cost is `t_norm + k_norm` (both min-max normalized over the domain), plus a
/// quadratic penalty on `Q > q_max`. Candidates outside the domain are handled
/// by [`DomainPolicy`], hard rejection by default.
///
/// Gene layout: `[t, k]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvectiveInsulation {
    /// Inner radius [m]
    pub inner_radius: f64,
    /// Pipe length [m]
    pub length: f64,
    /// Inner fluid temperature [°C]
    pub inner_temperature: f64,
    /// Ambient temperature [°C]
    pub ambient_temperature: f64,
    /// Outer convection coefficient [W/m².K]
    pub convection_coefficient: f64,
    /// Heat-flow limit [W]
    pub max_heat_flow: f64,
    /// Admissible thickness range [m]
    pub thickness_range: Bounds,
    /// Admissible conductivity range [W/m.K]
    pub conductivity_range: Bounds,
    /// Treatment of out-of-domain candidates
    pub domain_policy: DomainPolicy,
}

impl ConvectiveInsulation {
    /// Gene index of the thickness
    pub const THICKNESS: usize = 0;
    /// Gene index of the conductivity
    pub const CONDUCTIVITY: usize = 1;

    pub fn new() -> Self {
        Self {
            inner_radius: 0.03,
            length: 1.0,
            inner_temperature: 500.0,
            ambient_temperature: 75.0,
            convection_coefficient: 10.0,
            max_heat_flow: 120.0,
            thickness_range: Bounds::new(0.025, 0.2),
            conductivity_range: Bounds::new(0.05, 0.084),
            domain_policy: DomainPolicy::reject(),
        }
    }

    /// Replace the out-of-domain treatment
    pub fn with_domain_policy(mut self, policy: DomainPolicy) -> Self {
        self.domain_policy = policy;
        self
    }

    /// Read the design variables out of a genome
    pub fn decode(&self, genome: &RealVector) -> InsulationDesign {
        InsulationDesign {
            thickness: genome[Self::THICKNESS],
            conductivity: genome[Self::CONDUCTIVITY],
        }
    }

    /// Heat flow through layer and film, `None` when the model is degenerate
    pub fn heat_flow(&self, design: &InsulationDesign) -> Option<f64> {
        let outer = self.inner_radius + design.thickness;
        if outer <= 0.0 || design.conductivity <= 0.0 {
            return None;
        }
        let resistance = (outer / self.inner_radius).ln() / design.conductivity
            + 1.0 / (self.convection_coefficient * outer);
        if !(resistance.is_finite() && resistance > 0.0) {
            return None;
        }
        let delta_t = self.inner_temperature - self.ambient_temperature;
        let q = 2.0 * PI * self.length * delta_t / resistance;
        q.is_finite().then_some(q)
    }

    /// Search bounds equal to the physical domain, in gene order
    pub fn bounds(&self) -> MultiBounds {
        MultiBounds::new(vec![self.thickness_range, self.conductivity_range])
    }

    /// Run parameters this model is usually solved with
    pub fn config(&self) -> GaConfig {
        GaConfig::new(self.bounds())
            .with_population_size(16)
            .with_generations(100)
            .with_crossover_rate(0.9)
            .with_mutation_rate(0.1)
            .with_mutation_step(MutationStep::Absolute(vec![0.005, 0.002]))
            .with_tournament_size(3)
            .with_penalty_factor(1e6)
            .with_seed(42)
    }

    fn base_cost(&self, design: &InsulationDesign) -> f64 {
        self.thickness_range.normalize(design.thickness)
            + self.conductivity_range.normalize(design.conductivity)
    }
}

impl Default for ConvectiveInsulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Objective for ConvectiveInsulation {
    fn evaluate(&self, genome: &RealVector, penalty_factor: f64) -> f64 {
        if genome.dimension() != 2 {
            return SENTINEL_FITNESS;
        }
        let design = self.decode(genome);

        let domain_penalty = match self.domain_policy.apply(
            [
                self.thickness_range.violation(design.thickness),
                self.conductivity_range.violation(design.conductivity),
            ],
            penalty_factor,
        ) {
            Ok(penalty) => penalty,
            Err(rejected) => return rejected,
        };

        let Some(q) = self.heat_flow(&design) else {
            return SENTINEL_FITNESS;
        };

        let penalty = total_penalty([q - self.max_heat_flow], penalty_factor);
        guard_finite(self.base_cost(&design) + domain_penalty + penalty)
    }

    fn observables(&self, genome: &RealVector) -> Observables {
        if genome.dimension() != 2 {
            return Observables::new();
        }
        let design = self.decode(genome);
        design.observables(self.heat_flow(&design))
    }
}
