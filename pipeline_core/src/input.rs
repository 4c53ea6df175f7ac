//! # Input Collection
//!
//! Turns what a user enters into a validated [`PipelineParameters`] record.
//!
//! This layer owns everything the engine is allowed to assume:
//!
//! - at least one and at most [`MAX_DIAMETER_COUNT`] diameters
//! - every diameter within [`MIN_OUTER_DIAMETER_MM`]..=[`MAX_OUTER_DIAMETER_MM`]
//! - pressure, mass flow, reliability factors and custom physical constants
//!   within the bounds of the input form (`MIN_*` / `MAX_*` constants)
//! - where the physical constants come from ([`ConstantsMode`])
//!
//! ## Example
//!
//! ```rust
//! use pipeline_core::input::{parse_diameters, ConstantsMode, SizingRequest};
//!
//! let request = SizingRequest::new(10.0, 50.0, parse_diameters("219, 273, 530").unwrap())
//!     .with_mode(ConstantsMode::Typical);
//!
//! let params = request.to_parameters().unwrap();
//! assert_eq!(params.outer_diameters_mm, vec![219.0, 273.0, 530.0]);
//! assert_eq!(params.constants.density_kg_m3, 850.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::parameters::{PhysicalConstants, PipelineParameters, ReliabilityFactors};

/// Smallest outer diameter accepted from the user (mm)
pub const MIN_OUTER_DIAMETER_MM: f64 = 100.0;

/// Largest outer diameter accepted from the user (mm)
pub const MAX_OUTER_DIAMETER_MM: f64 = 1400.0;

/// Maximum number of candidate diameters per run
pub const MAX_DIAMETER_COUNT: usize = 10;

/// Bounds for every reliability / condition coefficient
pub const MIN_FACTOR: f64 = 0.1;
pub const MAX_FACTOR: f64 = 2.0;

/// Operating pressure bounds (MPa)
pub const MIN_PRESSURE_MPA: f64 = 0.1;
pub const MAX_PRESSURE_MPA: f64 = 20.0;

/// Mass flow bounds (kg/s)
pub const MIN_MASS_FLOW_KG_S: f64 = 1.0;
pub const MAX_MASS_FLOW_KG_S: f64 = 10_000.0;

/// Fluid density bounds (kg/m³)
pub const MIN_DENSITY_KG_M3: f64 = 700.0;
pub const MAX_DENSITY_KG_M3: f64 = 1000.0;

/// Bounds for yield and tensile strength (MPa)
pub const MIN_STRENGTH_MPA: f64 = 200.0;
pub const MAX_STRENGTH_MPA: f64 = 1000.0;

/// Bounds for the fluid bulk modulus and the steel Young's modulus (MPa)
pub const MIN_MODULUS_MPA: f64 = 1000.0;
pub const MAX_MODULUS_MPA: f64 = 250_000.0;

/// Temperature difference bounds (°C)
pub const MIN_TEMPERATURE_DELTA_C: f64 = -60.0;
pub const MAX_TEMPERATURE_DELTA_C: f64 = 60.0;

/// Poisson's ratio bounds
pub const MIN_POISSON_RATIO: f64 = 0.2;
pub const MAX_POISSON_RATIO: f64 = 0.4;

/// Linear thermal expansion bounds (1/°C)
pub const MIN_THERMAL_EXPANSION_PER_C: f64 = 1e-6;
pub const MAX_THERMAL_EXPANSION_PER_C: f64 = 20e-6;

/// Bend radius bounds (m); 0 is a straight pipe
pub const MIN_BEND_RADIUS_M: f64 = 0.0;
pub const MAX_BEND_RADIUS_M: f64 = 10_000.0;

/// Where the physical constants of a run come from.
///
/// ## JSON
///
/// ```json
/// { "mode": "Typical" }
/// { "mode": "Custom", "density_kg_m3": 870.0, "yield_strength_mpa": 360.0, ... }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum ConstantsMode {
    /// Preset values for typical conditions
    Typical,
    /// Values supplied by the user
    Custom(PhysicalConstants),
}

impl Default for ConstantsMode {
    fn default() -> Self {
        ConstantsMode::Typical
    }
}

impl ConstantsMode {
    /// Resolve the constants this mode stands for
    pub fn constants(&self) -> PhysicalConstants {
        match self {
            ConstantsMode::Typical => PhysicalConstants::typical(),
            ConstantsMode::Custom(constants) => *constants,
        }
    }

    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            ConstantsMode::Typical => "Typical conditions (preset constants)",
            ConstantsMode::Custom(_) => "Custom conditions (user-supplied constants)",
        }
    }
}

/// Everything a user supplies for one sizing run.
///
/// `factors` and `mode` may be omitted from JSON; they default to neutral
/// factors and the typical preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingRequest {
    /// Operating pressure (MPa)
    pub pressure_mpa: f64,

    /// Mass flow rate (kg/s)
    pub mass_flow_kg_s: f64,

    /// Reliability and condition coefficients
    #[serde(default)]
    pub factors: ReliabilityFactors,

    /// Candidate outer diameters (mm)
    pub outer_diameters_mm: Vec<f64>,

    /// Source of the physical constants
    #[serde(default)]
    pub constants: ConstantsMode,
}

impl SizingRequest {
    /// Create a request with neutral factors and typical constants
    pub fn new(pressure_mpa: f64, mass_flow_kg_s: f64, outer_diameters_mm: Vec<f64>) -> Self {
        SizingRequest {
            pressure_mpa,
            mass_flow_kg_s,
            factors: ReliabilityFactors::default(),
            outer_diameters_mm,
            constants: ConstantsMode::Typical,
        }
    }

    /// Set the reliability factors
    pub fn with_factors(mut self, factors: ReliabilityFactors) -> Self {
        self.factors = factors;
        self
    }

    /// Set the constants mode
    pub fn with_mode(mut self, mode: ConstantsMode) -> Self {
        self.constants = mode;
        self
    }

    /// Validate the request.
    ///
    /// Checks run in input-form order so the first offending field is the
    /// one reported.
    pub fn validate(&self) -> CalcResult<()> {
        require_range("pressure_mpa", self.pressure_mpa, MIN_PRESSURE_MPA, MAX_PRESSURE_MPA)?;
        require_range("mass_flow_kg_s", self.mass_flow_kg_s, MIN_MASS_FLOW_KG_S, MAX_MASS_FLOW_KG_S)?;

        for (field, value) in self.factors.named() {
            require_range(field, value, MIN_FACTOR, MAX_FACTOR)?;
        }

        validate_diameters(&self.outer_diameters_mm)?;

        if let ConstantsMode::Custom(constants) = &self.constants {
            validate_constants(constants)?;
        }

        Ok(())
    }

    /// Validate and convert into the engine's input record.
    pub fn to_parameters(&self) -> CalcResult<PipelineParameters> {
        self.validate()?;
        Ok(PipelineParameters::new(
            self.pressure_mpa,
            self.mass_flow_kg_s,
            self.outer_diameters_mm.clone(),
            self.constants.constants(),
        )
        .with_factors(self.factors))
    }
}

/// Parse a comma-separated diameter list such as `"530, 720, 820"`.
///
/// Empty entries are skipped. Range checks are left to
/// [`SizingRequest::validate`].
pub fn parse_diameters(text: &str) -> CalcResult<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>().map_err(|_| {
                CalcError::invalid_input("outer_diameters_mm", part, "Diameter is not a number")
            })
        })
        .collect()
}

fn validate_diameters(diameters: &[f64]) -> CalcResult<()> {
    if diameters.is_empty() {
        return Err(CalcError::missing_field("outer_diameters_mm"));
    }
    if diameters.len() > MAX_DIAMETER_COUNT {
        return Err(CalcError::invalid_input(
            "outer_diameters_mm",
            diameters.len().to_string(),
            format!("At most {} diameters may be evaluated at once", MAX_DIAMETER_COUNT),
        ));
    }
    for &d in diameters {
        // Also rejects NaN
        if !(MIN_OUTER_DIAMETER_MM..=MAX_OUTER_DIAMETER_MM).contains(&d) {
            return Err(CalcError::invalid_input(
                "outer_diameters_mm",
                d.to_string(),
                format!(
                    "Diameter outside the allowed range ({}-{} mm)",
                    MIN_OUTER_DIAMETER_MM, MAX_OUTER_DIAMETER_MM
                ),
            ));
        }
    }
    Ok(())
}

fn validate_constants(c: &PhysicalConstants) -> CalcResult<()> {
    require_range("density_kg_m3", c.density_kg_m3, MIN_DENSITY_KG_M3, MAX_DENSITY_KG_M3)?;
    require_range("yield_strength_mpa", c.yield_strength_mpa, MIN_STRENGTH_MPA, MAX_STRENGTH_MPA)?;
    require_range("tensile_strength_mpa", c.tensile_strength_mpa, MIN_STRENGTH_MPA, MAX_STRENGTH_MPA)?;
    require_range("fluid_bulk_modulus_mpa", c.fluid_bulk_modulus_mpa, MIN_MODULUS_MPA, MAX_MODULUS_MPA)?;
    require_range("steel_young_modulus_mpa", c.steel_young_modulus_mpa, MIN_MODULUS_MPA, MAX_MODULUS_MPA)?;
    require_range(
        "temperature_delta_c",
        c.temperature_delta_c,
        MIN_TEMPERATURE_DELTA_C,
        MAX_TEMPERATURE_DELTA_C,
    )?;
    require_range("poisson_ratio", c.poisson_ratio, MIN_POISSON_RATIO, MAX_POISSON_RATIO)?;
    require_range(
        "thermal_expansion_per_c",
        c.thermal_expansion_per_c,
        MIN_THERMAL_EXPANSION_PER_C,
        MAX_THERMAL_EXPANSION_PER_C,
    )?;
    require_range("bend_radius_m", c.bend_radius_m, MIN_BEND_RADIUS_M, MAX_BEND_RADIUS_M)
}

/// Inclusive range check; NaN and infinities fail it too
fn require_range(field: &str, value: f64, min: f64, max: f64) -> CalcResult<()> {
    if !(min..=max).contains(&value) {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SizingRequest {
        SizingRequest::new(10.0, 50.0, vec![219.0, 273.0, 530.0])
    }

    fn field_of(err: CalcError) -> String {
        match err {
            CalcError::InvalidInput { field, .. } => field,
            CalcError::MissingField { field } => field,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_diameters() {
        assert_eq!(parse_diameters("530, 720, 820").unwrap(), vec![530.0, 720.0, 820.0]);
        assert_eq!(parse_diameters(" 219,,273 , ").unwrap(), vec![219.0, 273.0]);
        assert!(parse_diameters("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_diameters_rejects_garbage() {
        let err = parse_diameters("530, abc").unwrap_err();
        assert_eq!(field_of(err), "outer_diameters_mm");
    }

    #[test]
    fn test_valid_request_converts() {
        let params = valid_request().to_parameters().unwrap();
        assert_eq!(params.pressure_mpa, 10.0);
        assert_eq!(params.constants, PhysicalConstants::typical());
    }

    #[test]
    fn test_empty_diameters_rejected() {
        let mut request = valid_request();
        request.outer_diameters_mm.clear();
        let err = request.validate().unwrap_err();
        assert_eq!(err, CalcError::missing_field("outer_diameters_mm"));
    }

    #[test]
    fn test_too_many_diameters_rejected() {
        let mut request = valid_request();
        request.outer_diameters_mm = vec![219.0; MAX_DIAMETER_COUNT + 1];
        assert!(request.validate().is_err());

        request.outer_diameters_mm.truncate(MAX_DIAMETER_COUNT);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_diameter_range_bounds() {
        let mut request = valid_request();
        request.outer_diameters_mm = vec![100.0, 1400.0];
        assert!(request.validate().is_ok());

        request.outer_diameters_mm = vec![99.9];
        assert!(request.validate().is_err());

        request.outer_diameters_mm = vec![1400.5];
        assert!(request.validate().is_err());

        request.outer_diameters_mm = vec![f64::NAN];
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_factor_range() {
        let mut request = valid_request();
        request.factors.responsibility_factor = 2.0;
        assert!(request.validate().is_ok());

        request.factors.responsibility_factor = 2.1;
        assert_eq!(field_of(request.validate().unwrap_err()), "responsibility_factor");

        request.factors.responsibility_factor = 0.0;
        assert_eq!(field_of(request.validate().unwrap_err()), "responsibility_factor");
    }

    #[test]
    fn test_non_positive_pressure_rejected() {
        let mut request = valid_request();
        request.pressure_mpa = 0.0;
        assert_eq!(field_of(request.validate().unwrap_err()), "pressure_mpa");
    }

    #[test]
    fn test_custom_constants_validated() {
        let mut constants = PhysicalConstants::typical();
        constants.temperature_delta_c = -40.0;
        constants.bend_radius_m = 0.0;
        let request = valid_request().with_mode(ConstantsMode::Custom(constants));
        assert!(request.validate().is_ok());

        constants.bend_radius_m = -1.0;
        let request = valid_request().with_mode(ConstantsMode::Custom(constants));
        assert_eq!(field_of(request.validate().unwrap_err()), "bend_radius_m");

        let mut constants = PhysicalConstants::typical();
        constants.steel_young_modulus_mpa = 0.0;
        let request = valid_request().with_mode(ConstantsMode::Custom(constants));
        assert_eq!(field_of(request.validate().unwrap_err()), "steel_young_modulus_mpa");
    }

    #[test]
    fn test_custom_mode_populates_record() {
        let mut constants = PhysicalConstants::typical();
        constants.density_kg_m3 = 900.0;
        constants.bend_radius_m = 500.0;
        let params = valid_request()
            .with_mode(ConstantsMode::Custom(constants))
            .to_parameters()
            .unwrap();
        assert_eq!(params.constants.density_kg_m3, 900.0);
        assert_eq!(params.constants.bend_radius_m, 500.0);
    }

    #[test]
    fn test_request_json_defaults() {
        let json = r#"{ "pressure_mpa": 7.5, "mass_flow_kg_s": 40.0, "outer_diameters_mm": [273.0] }"#;
        let request: SizingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.constants, ConstantsMode::Typical);
        assert_eq!(request.factors, ReliabilityFactors::default());
    }

    #[test]
    fn test_request_json_custom_mode() {
        let json = r#"{
            "pressure_mpa": 7.5,
            "mass_flow_kg_s": 40.0,
            "outer_diameters_mm": [273.0],
            "constants": {
                "mode": "Custom",
                "density_kg_m3": 870.0,
                "yield_strength_mpa": 360.0,
                "tensile_strength_mpa": 510.0,
                "fluid_bulk_modulus_mpa": 1400.0,
                "steel_young_modulus_mpa": 206000.0,
                "temperature_delta_c": -10.0,
                "poisson_ratio": 0.3,
                "thermal_expansion_per_c": 0.000012,
                "bend_radius_m": 0.0
            }
        }"#;
        let request: SizingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.constants.constants().yield_strength_mpa, 360.0);
        assert!(request.constants.label().starts_with("Custom"));
    }

    fn custom_request(constants: PhysicalConstants) -> SizingRequest {
        valid_request().with_mode(ConstantsMode::Custom(constants))
    }

    /// Checks min and max are accepted and a step beyond either is rejected
    fn assert_bounds(field: &str, min: f64, max: f64, step: f64, build: impl Fn(f64) -> SizingRequest) {
        assert!(build(min).validate().is_ok(), "{field} = {min} should pass");
        assert!(build(max).validate().is_ok(), "{field} = {max} should pass");
        assert_eq!(field_of(build(min - step).validate().unwrap_err()), field);
        assert_eq!(field_of(build(max + step).validate().unwrap_err()), field);
    }

    #[test]
    fn test_pressure_and_mass_flow_bounds() {
        assert_bounds("pressure_mpa", MIN_PRESSURE_MPA, MAX_PRESSURE_MPA, 0.01, |v| {
            SizingRequest::new(v, 50.0, vec![219.0])
        });
        assert_bounds("mass_flow_kg_s", MIN_MASS_FLOW_KG_S, MAX_MASS_FLOW_KG_S, 0.01, |v| {
            SizingRequest::new(10.0, v, vec![219.0])
        });
    }

    #[test]
    fn test_every_factor_bounds() {
        type Setter = fn(&mut ReliabilityFactors, f64);
        let setters: [(&str, Setter); 5] = [
            ("operational_factor", |f, v| f.operational_factor = v),
            ("yield_reliability", |f, v| f.yield_reliability = v),
            ("strength_reliability", |f, v| f.strength_reliability = v),
            ("responsibility_factor", |f, v| f.responsibility_factor = v),
            ("pressure_reliability", |f, v| f.pressure_reliability = v),
        ];
        for (field, set) in setters {
            assert_bounds(field, MIN_FACTOR, MAX_FACTOR, 0.001, |v| {
                let mut factors = ReliabilityFactors::default();
                set(&mut factors, v);
                valid_request().with_factors(factors)
            });
        }
    }

    #[test]
    fn test_custom_constant_bounds() {
        type Setter = fn(&mut PhysicalConstants, f64);
        let cases: [(&str, f64, f64, f64, Setter); 9] = [
            ("density_kg_m3", MIN_DENSITY_KG_M3, MAX_DENSITY_KG_M3, 0.1, |c, v| c.density_kg_m3 = v),
            ("yield_strength_mpa", MIN_STRENGTH_MPA, MAX_STRENGTH_MPA, 0.1, |c, v| c.yield_strength_mpa = v),
            ("tensile_strength_mpa", MIN_STRENGTH_MPA, MAX_STRENGTH_MPA, 0.1, |c, v| {
                c.tensile_strength_mpa = v
            }),
            ("fluid_bulk_modulus_mpa", MIN_MODULUS_MPA, MAX_MODULUS_MPA, 1.0, |c, v| {
                c.fluid_bulk_modulus_mpa = v
            }),
            ("steel_young_modulus_mpa", MIN_MODULUS_MPA, MAX_MODULUS_MPA, 1.0, |c, v| {
                c.steel_young_modulus_mpa = v
            }),
            ("temperature_delta_c", MIN_TEMPERATURE_DELTA_C, MAX_TEMPERATURE_DELTA_C, 0.1, |c, v| {
                c.temperature_delta_c = v
            }),
            ("poisson_ratio", MIN_POISSON_RATIO, MAX_POISSON_RATIO, 0.001, |c, v| c.poisson_ratio = v),
            ("thermal_expansion_per_c", MIN_THERMAL_EXPANSION_PER_C, MAX_THERMAL_EXPANSION_PER_C, 1e-8, |c, v| {
                c.thermal_expansion_per_c = v
            }),
            ("bend_radius_m", MIN_BEND_RADIUS_M, MAX_BEND_RADIUS_M, 0.1, |c, v| c.bend_radius_m = v),
        ];
        for (field, min, max, step, set) in cases {
            assert_bounds(field, min, max, step, |v| {
                let mut constants = PhysicalConstants::typical();
                set(&mut constants, v);
                custom_request(constants)
            });
        }
    }

    #[test]
    fn test_out_of_form_values_rejected() {
        let mut constants = PhysicalConstants::typical();
        constants.density_kg_m3 = 5.0;
        constants.poisson_ratio = 3.0;

        let request = SizingRequest::new(500.0, 0.001, vec![219.0]).with_mode(ConstantsMode::Custom(constants));
        assert_eq!(field_of(request.validate().unwrap_err()), "pressure_mpa");

        let request = SizingRequest { pressure_mpa: 10.0, ..request };
        assert_eq!(field_of(request.validate().unwrap_err()), "mass_flow_kg_s");

        let request = SizingRequest { mass_flow_kg_s: 50.0, ..request };
        assert_eq!(field_of(request.validate().unwrap_err()), "density_kg_m3");

        constants.density_kg_m3 = 850.0;
        let request = request.with_mode(ConstantsMode::Custom(constants));
        assert_eq!(field_of(request.validate().unwrap_err()), "poisson_ratio");
    }

    #[test]
    fn test_typical_preset_within_form_bounds() {
        assert!(custom_request(PhysicalConstants::typical()).validate().is_ok());
    }
}
