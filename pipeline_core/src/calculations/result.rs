//! # Per-Diameter Results
//!
//! One [`DiameterResult`] is produced for every candidate diameter, in input
//! order. Results are read-only for presentation; only `is_optimal` is
//! assigned after the thickness search, by diameter selection.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "diameter_mm": 219.0,
//!   "final_thickness_m": 0.0041924,
//!   "satisfies_flow_speed": true,
//!   "satisfies_hoop_stress": true,
//!   "satisfies_axial_stress": true,
//!   "satisfies_equivalent_stress": true,
//!   "flow_speed_m_s": 1.688,
//!   "safety_hoop": 1.313,
//!   "safety_axial": 14.95,
//!   "safety_equivalent": 1.252,
//!   "is_valid": true,
//!   "is_optimal": true,
//!   "outcome": "Accepted",
//!   "attempts": 2,
//!   "stresses": { "hoop_mpa": 261.2, "axial_mpa": 32.8, "equivalent_mpa": 246.5, ... }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{Meters, Millimeters};

/// Intermediate quantity at which a thickness attempt can break down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressStage {
    FlowSpeed,
    WaveSpeed,
    SurgeIncrement,
    SurgePressure,
    HoopStress,
    AxialStress,
    EquivalentStress,
}

impl StressStage {
    pub fn display_name(&self) -> &'static str {
        match self {
            StressStage::FlowSpeed => "flow speed",
            StressStage::WaveSpeed => "pressure-wave speed",
            StressStage::SurgeIncrement => "surge pressure increment",
            StressStage::SurgePressure => "surge pressure",
            StressStage::HoopStress => "hoop stress",
            StressStage::AxialStress => "axial stress",
            StressStage::EquivalentStress => "equivalent stress",
        }
    }
}

/// Why the thickness search for a diameter stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// A wall thickness passing every check was found
    Accepted,
    /// Diameter, mass flow or density was not positive
    InvalidInput,
    /// Flow speed fell outside the allowed band
    FlowSpeedOutOfRange,
    /// Wall thickness reached the pipe radius (or was not positive)
    ThicknessLimitReached,
    /// An intermediate value came out NaN or infinite
    NonFinite(StressStage),
}

impl SearchOutcome {
    /// Short explanation for reports
    pub fn describe(&self) -> String {
        match self {
            SearchOutcome::Accepted => "all checks satisfied".to_string(),
            SearchOutcome::InvalidInput => "diameter, mass flow or density is not positive".to_string(),
            SearchOutcome::FlowSpeedOutOfRange => "flow speed outside the allowed range".to_string(),
            SearchOutcome::ThicknessLimitReached => "wall thickness reached the pipe radius".to_string(),
            SearchOutcome::NonFinite(stage) => format!("{} is not a finite number", stage.display_name()),
        }
    }
}

/// Stress state of the last evaluated wall thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressState {
    /// Wall thickness the state was computed for (m)
    pub thickness_m: f64,
    /// Pressure-wave propagation speed c
    pub wave_speed_m_s: f64,
    /// Water-hammer pressure increment Δp (MPa)
    pub surge_increment_mpa: f64,
    /// Operating pressure plus surge (MPa)
    pub surge_pressure_mpa: f64,
    /// Hoop stress under surge (MPa)
    pub hoop_mpa: f64,
    /// Worst-case signed axial stress (MPa)
    pub axial_mpa: f64,
    /// Equivalent (von Mises) stress (MPa)
    pub equivalent_mpa: f64,
}

/// Presentation status of a diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiameterStatus {
    /// The selected diameter
    Optimal,
    /// Passes every check but was not selected
    Acceptable,
    /// Fails at least one check
    Rejected,
}

impl DiameterStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            DiameterStatus::Optimal => "OPTIMAL",
            DiameterStatus::Acceptable => "ACCEPTABLE",
            DiameterStatus::Rejected => "REJECTED",
        }
    }
}

/// Sizing result for one candidate outer diameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiameterResult {
    /// Outer diameter (mm), copied from the input
    pub diameter_mm: f64,

    /// Accepted wall thickness (m); 0 when no thickness was accepted
    pub final_thickness_m: f64,

    // === Checks ===
    /// Flow speed within the allowed band
    pub satisfies_flow_speed: bool,
    /// Hoop stress ≤ R1
    pub satisfies_hoop_stress: bool,
    /// Axial stress check against R2
    pub satisfies_axial_stress: bool,
    /// Equivalent stress ≤ allowable equivalent stress
    pub satisfies_equivalent_stress: bool,

    /// Flow speed of the last evaluated thickness (m/s)
    pub flow_speed_m_s: f64,

    // === Safety Factors (0 = not computed) ===
    /// R1 / σ_hoop
    pub safety_hoop: f64,
    /// R2 / σ_axial
    pub safety_axial: f64,
    /// σ_eq,allow / σ_eq
    pub safety_equivalent: f64,

    /// True only when all four checks pass
    pub is_valid: bool,

    /// True for at most one result of a run
    pub is_optimal: bool,

    // === Diagnostics ===
    /// Why the search stopped
    pub outcome: SearchOutcome,
    /// Number of wall thicknesses evaluated
    pub attempts: u32,
    /// Stresses at the last evaluated thickness, if stresses were reached
    pub stresses: Option<StressState>,
}

impl DiameterResult {
    /// Fresh result with every flag cleared.
    pub fn new(diameter_mm: f64) -> Self {
        DiameterResult {
            diameter_mm,
            final_thickness_m: 0.0,
            satisfies_flow_speed: false,
            satisfies_hoop_stress: false,
            satisfies_axial_stress: false,
            satisfies_equivalent_stress: false,
            flow_speed_m_s: 0.0,
            safety_hoop: 0.0,
            safety_axial: 0.0,
            safety_equivalent: 0.0,
            is_valid: false,
            is_optimal: false,
            outcome: SearchOutcome::InvalidInput,
            attempts: 0,
            stresses: None,
        }
    }

    /// Whether all four checks pass
    pub fn all_checks_pass(&self) -> bool {
        self.satisfies_flow_speed
            && self.satisfies_hoop_stress
            && self.satisfies_axial_stress
            && self.satisfies_equivalent_stress
    }

    /// Smallest of the three safety factors
    pub fn min_safety(&self) -> f64 {
        self.safety_hoop.min(self.safety_axial).min(self.safety_equivalent)
    }

    /// Accepted wall thickness in millimeters
    pub fn final_thickness_mm(&self) -> f64 {
        Millimeters::from(Meters(self.final_thickness_m)).value()
    }

    pub fn status(&self) -> DiameterStatus {
        if self.is_optimal {
            DiameterStatus::Optimal
        } else if self.is_valid {
            DiameterStatus::Acceptable
        } else {
            DiameterStatus::Rejected
        }
    }

    /// Name of the check with the smallest safety factor
    pub fn governing_check(&self) -> &'static str {
        if self.safety_hoop <= self.safety_axial && self.safety_hoop <= self.safety_equivalent {
            "Hoop"
        } else if self.safety_axial <= self.safety_equivalent {
            "Axial"
        } else {
            "Equivalent"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted() -> DiameterResult {
        DiameterResult {
            final_thickness_m: 0.0042,
            satisfies_flow_speed: true,
            satisfies_hoop_stress: true,
            satisfies_axial_stress: true,
            satisfies_equivalent_stress: true,
            flow_speed_m_s: 1.7,
            safety_hoop: 1.31,
            safety_axial: 14.9,
            safety_equivalent: 1.25,
            is_valid: true,
            outcome: SearchOutcome::Accepted,
            attempts: 2,
            ..DiameterResult::new(219.0)
        }
    }

    #[test]
    fn test_new_result_is_rejected() {
        let r = DiameterResult::new(530.0);
        assert!(!r.all_checks_pass());
        assert_eq!(r.status(), DiameterStatus::Rejected);
        assert_eq!(r.min_safety(), 0.0);
    }

    #[test]
    fn test_min_safety_and_governing() {
        let r = accepted();
        assert_eq!(r.min_safety(), 1.25);
        assert_eq!(r.governing_check(), "Equivalent");
        assert_eq!(r.status(), DiameterStatus::Acceptable);
    }

    #[test]
    fn test_thickness_in_millimeters() {
        assert!((accepted().final_thickness_mm() - 4.2).abs() < 1e-9);
    }

    #[test]
    fn test_outcome_descriptions() {
        assert_eq!(
            SearchOutcome::NonFinite(StressStage::WaveSpeed).describe(),
            "pressure-wave speed is not a finite number"
        );
        assert!(SearchOutcome::FlowSpeedOutOfRange.describe().contains("flow speed"));
    }

    #[test]
    fn test_result_serialization() {
        let r = accepted();
        let json = serde_json::to_string_pretty(&r).unwrap();
        assert!(json.contains("safety_equivalent"));
        assert!(json.contains("\"Accepted\""));

        let roundtrip: DiameterResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, roundtrip);
    }
}
