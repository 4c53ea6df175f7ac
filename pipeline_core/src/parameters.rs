//! # Pipeline Parameters
//!
//! The fully populated input record consumed by the sizing engine.
//!
//! [`PipelineParameters`] is immutable once handed to the engine. It is
//! produced by the input layer ([`crate::input`]), which validates ranges and
//! decides where the physical constants come from. The engine itself is
//! agnostic to how the values were obtained.
//!
//! ## JSON Example
//!
//! Reliability factors and physical constants are flattened, so the record
//! serializes as a single flat object:
//!
//! ```json
//! {
//!   "pressure_mpa": 10.0,
//!   "mass_flow_kg_s": 50.0,
//!   "operational_factor": 1.0,
//!   "yield_reliability": 1.0,
//!   "strength_reliability": 1.0,
//!   "responsibility_factor": 1.0,
//!   "pressure_reliability": 1.0,
//!   "outer_diameters_mm": [219.0, 273.0, 530.0],
//!   "density_kg_m3": 850.0,
//!   "yield_strength_mpa": 343.0,
//!   "tensile_strength_mpa": 490.0,
//!   "fluid_bulk_modulus_mpa": 1300.0,
//!   "steel_young_modulus_mpa": 200000.0,
//!   "temperature_delta_c": 20.0,
//!   "poisson_ratio": 0.3,
//!   "thermal_expansion_per_c": 1.14e-5,
//!   "bend_radius_m": 0.0
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Dimensionless safety and condition coefficients.
///
/// Each is intended to lie in (0, 2]. The neutral value is 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityFactors {
    /// m - operating condition factor of the pipeline
    pub operational_factor: f64,
    /// γ_my - material reliability factor for yield
    pub yield_reliability: f64,
    /// γ_mu - material reliability factor for tensile strength
    pub strength_reliability: f64,
    /// γ_n - responsibility (importance) factor of the pipeline
    pub responsibility_factor: f64,
    /// γ_fp - load reliability factor for internal pressure
    pub pressure_reliability: f64,
}

impl Default for ReliabilityFactors {
    fn default() -> Self {
        ReliabilityFactors {
            operational_factor: 1.0,
            yield_reliability: 1.0,
            strength_reliability: 1.0,
            responsibility_factor: 1.0,
            pressure_reliability: 1.0,
        }
    }
}

impl ReliabilityFactors {
    /// Field names and values, in display order
    pub fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("operational_factor", self.operational_factor),
            ("yield_reliability", self.yield_reliability),
            ("strength_reliability", self.strength_reliability),
            ("responsibility_factor", self.responsibility_factor),
            ("pressure_reliability", self.pressure_reliability),
        ]
    }
}

/// Fluid, steel and layout constants.
///
/// Two construction strategies exist: [`PhysicalConstants::typical`] for the
/// typical-conditions preset, or any user-supplied set of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// ρ - density of the transported fluid (kg/m³)
    pub density_kg_m3: f64,
    /// σ_y - steel yield strength (MPa)
    pub yield_strength_mpa: f64,
    /// σ_u - steel tensile strength (MPa)
    pub tensile_strength_mpa: f64,
    /// E₀ - bulk modulus of the fluid (MPa)
    pub fluid_bulk_modulus_mpa: f64,
    /// E - Young's modulus of the pipe steel (MPa)
    pub steel_young_modulus_mpa: f64,
    /// Δt - temperature difference (°C), may be negative
    pub temperature_delta_c: f64,
    /// ν - Poisson's ratio of the steel
    pub poisson_ratio: f64,
    /// α - linear thermal expansion coefficient (1/°C)
    pub thermal_expansion_per_c: f64,
    /// r - elastic bend radius (m), 0 for a straight pipe
    pub bend_radius_m: f64,
}

impl PhysicalConstants {
    /// Typical conditions: crude oil in a straight low-alloy steel line.
    pub fn typical() -> Self {
        PhysicalConstants {
            density_kg_m3: 850.0,
            yield_strength_mpa: 343.0,
            tensile_strength_mpa: 490.0,
            fluid_bulk_modulus_mpa: 1300.0,
            steel_young_modulus_mpa: 200_000.0,
            temperature_delta_c: 20.0,
            poisson_ratio: 0.3,
            thermal_expansion_per_c: 11.4e-6,
            bend_radius_m: 0.0,
        }
    }

    /// Whether the layout includes an elastic bend
    pub fn is_bent(&self) -> bool {
        self.bend_radius_m > 0.0
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::typical()
    }
}

/// The complete input record for one sizing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineParameters {
    /// p - operating pressure (MPa)
    pub pressure_mpa: f64,

    /// G - mass flow rate of the transported fluid (kg/s)
    pub mass_flow_kg_s: f64,

    /// Safety and condition coefficients
    #[serde(flatten)]
    pub factors: ReliabilityFactors,

    /// Candidate outer diameters (mm), in the order they are evaluated
    pub outer_diameters_mm: Vec<f64>,

    /// Fluid, steel and layout constants
    #[serde(flatten)]
    pub constants: PhysicalConstants,
}

impl PipelineParameters {
    /// Build a record with neutral reliability factors.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pipeline_core::parameters::{PhysicalConstants, PipelineParameters};
    ///
    /// let params = PipelineParameters::new(10.0, 50.0, vec![219.0, 273.0], PhysicalConstants::typical());
    /// assert_eq!(params.factors.pressure_reliability, 1.0);
    /// assert_eq!(params.constants.yield_strength_mpa, 343.0);
    /// ```
    pub fn new(
        pressure_mpa: f64,
        mass_flow_kg_s: f64,
        outer_diameters_mm: Vec<f64>,
        constants: PhysicalConstants,
    ) -> Self {
        PipelineParameters {
            pressure_mpa,
            mass_flow_kg_s,
            factors: ReliabilityFactors::default(),
            outer_diameters_mm,
            constants,
        }
    }

    /// Replace the reliability factors
    pub fn with_factors(mut self, factors: ReliabilityFactors) -> Self {
        self.factors = factors;
        self
    }

    /// Copy of this record evaluating a different diameter list
    pub fn with_diameters(&self, outer_diameters_mm: Vec<f64>) -> Self {
        PipelineParameters {
            outer_diameters_mm,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typical_constants() {
        let c = PhysicalConstants::typical();
        assert_eq!(c.density_kg_m3, 850.0);
        assert_eq!(c.yield_strength_mpa, 343.0);
        assert_eq!(c.tensile_strength_mpa, 490.0);
        assert_eq!(c.steel_young_modulus_mpa, 200_000.0);
        assert!(!c.is_bent());
    }

    #[test]
    fn test_default_factors_are_neutral() {
        let f = ReliabilityFactors::default();
        assert!(f.named().iter().all(|(_, v)| *v == 1.0));
    }

    #[test]
    fn test_flat_serialization() {
        let params = PipelineParameters::new(10.0, 50.0, vec![530.0], PhysicalConstants::typical());
        let json = serde_json::to_string_pretty(&params).unwrap();

        // Flattened: no nested "factors" or "constants" objects
        assert!(!json.contains("\"factors\""));
        assert!(!json.contains("\"constants\""));
        assert!(json.contains("\"pressure_reliability\""));
        assert!(json.contains("\"bend_radius_m\""));

        let roundtrip: PipelineParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, roundtrip);
    }

    #[test]
    fn test_with_diameters_keeps_other_fields() {
        let params = PipelineParameters::new(8.0, 40.0, vec![219.0, 273.0], PhysicalConstants::typical());
        let reduced = params.with_diameters(vec![273.0]);
        assert_eq!(reduced.outer_diameters_mm, vec![273.0]);
        assert_eq!(reduced.pressure_mpa, 8.0);
        assert_eq!(reduced.constants, params.constants);
    }
}
