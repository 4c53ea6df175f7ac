//! # Allowable Stresses
//!
//! Design resistances shared by every diameter of a run:
//!
//! - `R1 = m·σ_y / (γ_my·γ_n)` - governed by yield
//! - `R2 = m·σ_u / (γ_mu·γ_n)` - governed by tensile strength
//! - `σ_eq,allow = 0.9·σ_y` - limit for the equivalent stress
//!
//! Zero reliability or responsibility factors are rejected by the input
//! layer; nothing here guards against them.

use serde::{Deserialize, Serialize};

use crate::parameters::PipelineParameters;

/// Code coefficient applied to yield strength for the equivalent stress limit.
pub const EQUIVALENT_STRESS_COEFFICIENT: f64 = 0.9;

/// Allowable stresses (MPa) derived from material and safety inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllowableStresses {
    /// R1 - design resistance governed by yield (MPa)
    pub yield_governed_mpa: f64,
    /// R2 - design resistance governed by tensile strength (MPa)
    pub strength_governed_mpa: f64,
    /// Allowable equivalent (von Mises) stress (MPa)
    pub equivalent_mpa: f64,
}

impl AllowableStresses {
    /// Derive the allowable stresses for a run.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pipeline_core::calculations::allowable::AllowableStresses;
    /// use pipeline_core::parameters::{PhysicalConstants, PipelineParameters};
    ///
    /// let params = PipelineParameters::new(10.0, 50.0, vec![219.0], PhysicalConstants::typical());
    /// let allowable = AllowableStresses::derive(&params);
    /// assert_eq!(allowable.yield_governed_mpa, 343.0);
    /// assert_eq!(allowable.strength_governed_mpa, 490.0);
    /// ```
    pub fn derive(params: &PipelineParameters) -> Self {
        let f = &params.factors;
        let c = &params.constants;

        let yield_governed_mpa = (f.operational_factor * c.yield_strength_mpa)
            / (f.yield_reliability * f.responsibility_factor);
        let strength_governed_mpa = (f.operational_factor * c.tensile_strength_mpa)
            / (f.strength_reliability * f.responsibility_factor);

        AllowableStresses {
            yield_governed_mpa,
            strength_governed_mpa,
            equivalent_mpa: EQUIVALENT_STRESS_COEFFICIENT * c.yield_strength_mpa,
        }
    }

    /// The smaller of R1 and R2, used for the starting wall thickness
    pub fn governing_mpa(&self) -> f64 {
        self.yield_governed_mpa.min(self.strength_governed_mpa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{PhysicalConstants, ReliabilityFactors};

    fn params_with(factors: ReliabilityFactors) -> PipelineParameters {
        PipelineParameters::new(10.0, 50.0, vec![219.0], PhysicalConstants::typical()).with_factors(factors)
    }

    #[test]
    fn test_neutral_factors_give_material_strengths() {
        let allowable = AllowableStresses::derive(&params_with(ReliabilityFactors::default()));
        assert_eq!(allowable.yield_governed_mpa, 343.0);
        assert_eq!(allowable.strength_governed_mpa, 490.0);
        assert!((allowable.equivalent_mpa - 308.7).abs() < 1e-9);
        assert_eq!(allowable.governing_mpa(), 343.0);
    }

    #[test]
    fn test_factors_scale_resistances() {
        let factors = ReliabilityFactors {
            operational_factor: 0.9,
            yield_reliability: 1.1,
            strength_reliability: 1.4,
            responsibility_factor: 1.05,
            pressure_reliability: 1.15,
        };
        let allowable = AllowableStresses::derive(&params_with(factors));

        // R1 = 0.9 * 343 / (1.1 * 1.05) = 267.27
        assert!((allowable.yield_governed_mpa - 267.27).abs() < 0.01);
        // R2 = 0.9 * 490 / (1.4 * 1.05) = 300.0
        assert!((allowable.strength_governed_mpa - 300.0).abs() < 0.01);
        // Equivalent limit ignores the factors
        assert!((allowable.equivalent_mpa - 308.7).abs() < 1e-9);
    }

    #[test]
    fn test_governing_picks_smaller() {
        let mut params = params_with(ReliabilityFactors::default());
        params.constants.tensile_strength_mpa = 200.0;
        let allowable = AllowableStresses::derive(&params);
        assert_eq!(allowable.governing_mpa(), 200.0);
    }
}
