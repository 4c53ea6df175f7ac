//! # Wall-Thickness Search
//!
//! For one outer diameter, find the first wall thickness on an ascending
//! 1 mm grid that satisfies the flow-speed band and the hoop, axial and
//! equivalent stress checks under water-hammer surge pressure.
//!
//! ## Procedure
//!
//! Starting from the hoop-only minimum at nominal pressure
//! `δ₀ = γ_fp·p·D / (2·min(R1, R2))`, each attempt computes:
//!
//! 1. inner diameter `d = D − 2δ`
//! 2. flow speed `v = 4G / (ρ·π·d²)`; outside 1–3 m/s ends the search
//! 3. wave speed `c = 1 / √(ρ/E₀ + d/(E·δ))`
//! 4. surge `Δp = ρ·c·v` (Pa → MPa), `p_surge = p + Δp`
//! 5. hoop stress `σ_hoop = γ_fp·p_surge·D / (2δ)`
//! 6. axial stress: worst of `ν·σ_hoop − E·α·Δt ± E·D/(2r)`
//! 7. equivalent stress `σ_eq = √(σ_hoop² − σ_hoop·σ_axial + σ_axial²)`
//!
//! If any check fails the wall grows by [`THICKNESS_STEP_M`] until it would
//! reach the pipe radius. The grid is part of the contract: the reported
//! thickness is the first passing grid point, not the true minimum.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::allowable::AllowableStresses;
use super::result::{DiameterResult, SearchOutcome, StressStage, StressState};
use crate::parameters::PipelineParameters;
use crate::units::{MegaPascals, Meters, Millimeters, Pascals};

/// Lower bound of the allowed flow speed band (m/s)
pub const MIN_FLOW_SPEED_M_S: f64 = 1.0;

/// Upper bound of the allowed flow speed band (m/s)
pub const MAX_FLOW_SPEED_M_S: f64 = 3.0;

/// Wall thickness increment between attempts (m)
pub const THICKNESS_STEP_M: f64 = 0.001;

/// How the axial stress is compared with R2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxialCheck {
    /// `σ_axial ≤ R2` on the signed value.
    ///
    /// A large compressive axial stress passes this check even though it
    /// was picked as the worst case for its magnitude, and its safety
    /// factor is reported as 0.
    #[default]
    Signed,
    /// `|σ_axial| ≤ R2`, with the safety factor taken on the magnitude.
    Magnitude,
}

impl AxialCheck {
    fn passes(&self, axial_mpa: f64, allowable_mpa: f64) -> bool {
        match self {
            AxialCheck::Signed => axial_mpa <= allowable_mpa,
            AxialCheck::Magnitude => axial_mpa.abs() <= allowable_mpa,
        }
    }

    fn safety(&self, axial_mpa: f64, allowable_mpa: f64) -> f64 {
        let governing = match self {
            AxialCheck::Signed => axial_mpa,
            AxialCheck::Magnitude => axial_mpa.abs(),
        };
        safety_factor(allowable_mpa, governing)
    }
}

/// Tunable behavior of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SizingOptions {
    /// Axial stress comparison
    #[serde(default)]
    pub axial_check: AxialCheck,
}

/// Whether a flow speed lies in the allowed band
pub fn flow_speed_in_range(flow_speed_m_s: f64) -> bool {
    (MIN_FLOW_SPEED_M_S..=MAX_FLOW_SPEED_M_S).contains(&flow_speed_m_s)
}

/// Search the wall thickness for one outer diameter.
///
/// Never fails: inadmissible geometry, numeric breakdowns and flow-speed
/// violations end the search and are recorded in
/// [`DiameterResult::outcome`].
///
/// # Example
///
/// ```rust
/// use pipeline_core::calculations::allowable::AllowableStresses;
/// use pipeline_core::calculations::thickness::{search_wall_thickness, SizingOptions};
/// use pipeline_core::parameters::{PhysicalConstants, PipelineParameters};
///
/// let params = PipelineParameters::new(10.0, 50.0, vec![219.0], PhysicalConstants::typical());
/// let allowable = AllowableStresses::derive(&params);
/// let result = search_wall_thickness(&params, &allowable, 219.0, SizingOptions::default());
///
/// assert!(result.is_valid);
/// assert!(result.flow_speed_m_s >= 1.0 && result.flow_speed_m_s <= 3.0);
/// ```
pub fn search_wall_thickness(
    params: &PipelineParameters,
    allowable: &AllowableStresses,
    diameter_mm: f64,
    options: SizingOptions,
) -> DiameterResult {
    let mut result = DiameterResult::new(diameter_mm);
    let outer_m = Meters::from(Millimeters(diameter_mm)).value();

    if outer_m <= 0.0 || params.mass_flow_kg_s <= 0.0 || params.constants.density_kg_m3 <= 0.0 {
        debug!(diameter_mm, "skipping diameter: non-positive diameter, mass flow or density");
        return result;
    }

    let radius_m = outer_m / 2.0;
    let mut thickness_m = (params.factors.pressure_reliability * params.pressure_mpa * outer_m)
        / (2.0 * allowable.governing_mpa());

    result.outcome = loop {
        if thickness_m <= 0.0 || thickness_m >= radius_m {
            break SearchOutcome::ThicknessLimitReached;
        }

        let inner_m = outer_m - 2.0 * thickness_m;
        if inner_m <= 0.0 {
            break SearchOutcome::ThicknessLimitReached;
        }

        result.attempts += 1;

        let flow_speed = (4.0 * params.mass_flow_kg_s)
            / (params.constants.density_kg_m3 * PI * inner_m * inner_m);
        if !flow_speed.is_finite() {
            break SearchOutcome::NonFinite(StressStage::FlowSpeed);
        }

        result.flow_speed_m_s = flow_speed;
        result.satisfies_flow_speed = flow_speed_in_range(flow_speed);
        if !result.satisfies_flow_speed {
            // Thickening the wall does not bring the speed back into range
            result.satisfies_hoop_stress = false;
            result.satisfies_axial_stress = false;
            result.satisfies_equivalent_stress = false;
            debug!(diameter_mm, flow_speed, "flow speed outside allowed range");
            break SearchOutcome::FlowSpeedOutOfRange;
        }

        let state = match stress_state(params, outer_m, inner_m, thickness_m, flow_speed) {
            Ok(state) => state,
            Err(stage) => {
                warn!(diameter_mm, thickness_m, stage = stage.display_name(), "non-finite intermediate value");
                break SearchOutcome::NonFinite(stage);
            }
        };
        result.stresses = Some(state);

        result.satisfies_hoop_stress = state.hoop_mpa <= allowable.yield_governed_mpa;
        result.satisfies_axial_stress = options
            .axial_check
            .passes(state.axial_mpa, allowable.strength_governed_mpa);
        result.satisfies_equivalent_stress = state.equivalent_mpa <= allowable.equivalent_mpa;

        if result.satisfies_hoop_stress && result.satisfies_axial_stress && result.satisfies_equivalent_stress {
            result.safety_hoop = safety_factor(allowable.yield_governed_mpa, state.hoop_mpa);
            result.safety_axial = options
                .axial_check
                .safety(state.axial_mpa, allowable.strength_governed_mpa);
            result.safety_equivalent = safety_factor(allowable.equivalent_mpa, state.equivalent_mpa);
            result.final_thickness_m = thickness_m;
            result.is_valid = true;
            break SearchOutcome::Accepted;
        }

        debug!(
            diameter_mm,
            thickness_m,
            hoop = state.hoop_mpa,
            axial = state.axial_mpa,
            equivalent = state.equivalent_mpa,
            "stress check failed, increasing wall thickness"
        );
        thickness_m += THICKNESS_STEP_M;
        if thickness_m >= radius_m {
            break SearchOutcome::ThicknessLimitReached;
        }
    };

    result
}

/// Surge and stress state for one wall thickness.
///
/// Returns the first stage whose value is not finite.
fn stress_state(
    params: &PipelineParameters,
    outer_m: f64,
    inner_m: f64,
    thickness_m: f64,
    flow_speed_m_s: f64,
) -> Result<StressState, StressStage> {
    let c = &params.constants;

    let wave_speed_m_s = 1.0
        / (c.density_kg_m3 / c.fluid_bulk_modulus_mpa + inner_m / (c.steel_young_modulus_mpa * thickness_m))
            .sqrt();
    finite(wave_speed_m_s, StressStage::WaveSpeed)?;

    let surge_increment_mpa =
        MegaPascals::from(Pascals(c.density_kg_m3 * wave_speed_m_s * flow_speed_m_s)).value();
    finite(surge_increment_mpa, StressStage::SurgeIncrement)?;

    let surge_pressure_mpa = params.pressure_mpa + surge_increment_mpa;
    finite(surge_pressure_mpa, StressStage::SurgePressure)?;

    let hoop_mpa =
        (params.factors.pressure_reliability * surge_pressure_mpa * outer_m) / (2.0 * thickness_m);
    finite(hoop_mpa, StressStage::HoopStress)?;

    let axial_mpa = worst_axial_stress(params, outer_m, hoop_mpa);
    finite(axial_mpa, StressStage::AxialStress)?;

    let equivalent_mpa = (hoop_mpa * hoop_mpa - hoop_mpa * axial_mpa + axial_mpa * axial_mpa).sqrt();
    finite(equivalent_mpa, StressStage::EquivalentStress)?;

    Ok(StressState {
        thickness_m,
        wave_speed_m_s,
        surge_increment_mpa,
        surge_pressure_mpa,
        hoop_mpa,
        axial_mpa,
        equivalent_mpa,
    })
}

/// Signed axial stress of the load case with the largest magnitude.
///
/// Later candidates win ties.
fn worst_axial_stress(params: &PipelineParameters, outer_m: f64, hoop_mpa: f64) -> f64 {
    let c = &params.constants;
    let thermal = -c.steel_young_modulus_mpa * c.thermal_expansion_per_c * c.temperature_delta_c;
    let bend = if c.is_bent() {
        (c.steel_young_modulus_mpa * outer_m) / (2.0 * c.bend_radius_m)
    } else {
        0.0
    };

    let base = c.poisson_ratio * hoop_mpa + thermal;
    let candidates = [base + bend, base - bend];

    candidates
        .into_iter()
        .reduce(|worst, candidate| if candidate.abs() >= worst.abs() { candidate } else { worst })
        .unwrap_or(base)
}

fn safety_factor(allowable_mpa: f64, actual_mpa: f64) -> f64 {
    if actual_mpa > 0.0 {
        allowable_mpa / actual_mpa
    } else {
        0.0
    }
}

fn finite(value: f64, stage: StressStage) -> Result<(), StressStage> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(stage)
    }
}
