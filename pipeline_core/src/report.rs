//! # Text Report
//!
//! Renders a finished sizing run as a plain-text report, 80 columns wide:
//!
//! 1. header with engineer, date and constants mode
//! 2. input parameters (loads, diameters, factors, physical constants)
//! 3. one block per diameter with its status and safety factors
//! 4. the final verdict: the optimal diameter or `NOT FOUND`
//!
//! Rendering is pure; writing the text to disk is [`crate::file_io::save_report`].
//!
//! ## Example
//!
//! ```rust
//! use pipeline_core::calculations::evaluate;
//! use pipeline_core::parameters::{PhysicalConstants, PipelineParameters};
//! use pipeline_core::report::{render_text_report, ReportMetadata};
//!
//! let params = PipelineParameters::new(10.0, 50.0, vec![219.0, 530.0], PhysicalConstants::typical());
//! let results = evaluate(&params);
//!
//! let meta = ReportMetadata::new("J. Engineer", "Typical conditions (preset constants)");
//! let text = render_text_report(&meta, &params, &results);
//! assert!(text.contains("OPTIMAL DIAMETER: 219 mm"));
//! ```

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::result::{DiameterResult, SearchOutcome};
use crate::calculations::selection::optimal;
use crate::calculations::thickness::{MAX_FLOW_SPEED_M_S, MIN_FLOW_SPEED_M_S};
use crate::parameters::PipelineParameters;

/// Width of the report and its section separators
pub const REPORT_WIDTH: usize = 80;

/// Width of the separator between diameter blocks
const DIAMETER_SEPARATOR_WIDTH: usize = 60;

/// Who produced a report, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Unique report identifier
    pub id: Uuid,
    /// Name of the engineer running the calculation
    pub engineer: String,
    /// Creation time (UTC)
    pub created: DateTime<Utc>,
    /// Human-readable constants mode, e.g. "Typical conditions (preset constants)"
    pub mode_label: String,
}

impl ReportMetadata {
    /// New metadata stamped with a fresh id and the current time
    pub fn new(engineer: impl Into<String>, mode_label: impl Into<String>) -> Self {
        ReportMetadata {
            id: Uuid::new_v4(),
            engineer: engineer.into(),
            created: Utc::now(),
            mode_label: mode_label.into(),
        }
    }
}

/// Default report file name for a creation time: `sizing_results_YYYY-MM-DD_HH-MM.txt`
pub fn default_report_file_name(created: DateTime<Utc>) -> String {
    format!("sizing_results_{}.txt", created.format("%Y-%m-%d_%H-%M"))
}

/// Render the full text report.
pub fn render_text_report(
    meta: &ReportMetadata,
    params: &PipelineParameters,
    results: &[DiameterResult],
) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = write_header(&mut out, meta);
    let _ = write_inputs(&mut out, params);
    let _ = write_diameters(&mut out, results);
    let _ = write_verdict(&mut out, results);

    out
}

fn separator(symbol: char, width: usize) -> String {
    std::iter::repeat(symbol).take(width).collect()
}

fn section(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "{}", separator('-', REPORT_WIDTH))?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", separator('-', REPORT_WIDTH))?;
    writeln!(out)
}

fn write_header(out: &mut String, meta: &ReportMetadata) -> std::fmt::Result {
    writeln!(out, "{}", separator('=', REPORT_WIDTH))?;
    writeln!(out, "OPTIMAL PIPELINE DIAMETER CALCULATION RESULTS")?;
    writeln!(out, "{}", separator('=', REPORT_WIDTH))?;
    writeln!(out)?;
    writeln!(out, "Engineer: {}", meta.engineer)?;
    writeln!(out, "Date: {}", meta.created.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(out, "Mode: {}", meta.mode_label)?;
    writeln!(out, "Report ID: {}", meta.id)?;
    writeln!(out)
}

fn write_inputs(out: &mut String, params: &PipelineParameters) -> std::fmt::Result {
    section(out, "INPUT PARAMETERS")?;

    writeln!(out, "Operating pressure: {} MPa", params.pressure_mpa)?;
    writeln!(out, "Mass flow: {} kg/s", params.mass_flow_kg_s)?;
    writeln!(out, "Number of diameters: {}", params.outer_diameters_mm.len())?;
    let diameters: Vec<String> = params.outer_diameters_mm.iter().map(|d| d.to_string()).collect();
    writeln!(out, "Outer diameters (mm): {}", diameters.join(", "))?;
    writeln!(out)?;

    let f = &params.factors;
    writeln!(out, "Operational factor (m): {}", f.operational_factor)?;
    writeln!(out, "Yield reliability (gamma_my): {}", f.yield_reliability)?;
    writeln!(out, "Strength reliability (gamma_mu): {}", f.strength_reliability)?;
    writeln!(out, "Responsibility factor (gamma_n): {}", f.responsibility_factor)?;
    writeln!(out, "Pressure reliability (gamma_fp): {}", f.pressure_reliability)?;
    writeln!(out)?;

    let c = &params.constants;
    writeln!(out, "PHYSICAL CONSTANTS:")?;
    writeln!(out, "Density: {} kg/m3", c.density_kg_m3)?;
    writeln!(out, "Yield strength: {} MPa", c.yield_strength_mpa)?;
    writeln!(out, "Tensile strength: {} MPa", c.tensile_strength_mpa)?;
    writeln!(out, "Fluid bulk modulus: {} MPa", c.fluid_bulk_modulus_mpa)?;
    writeln!(out, "Steel Young's modulus: {} MPa", c.steel_young_modulus_mpa)?;
    writeln!(out, "Temperature delta: {} C", c.temperature_delta_c)?;
    writeln!(out, "Poisson's ratio: {}", c.poisson_ratio)?;
    writeln!(out, "Thermal expansion: {} 1/C", c.thermal_expansion_per_c)?;
    writeln!(out, "Bend radius: {} m", c.bend_radius_m)?;
    writeln!(out)
}

fn write_diameters(out: &mut String, results: &[DiameterResult]) -> std::fmt::Result {
    section(out, "RESULTS PER DIAMETER")?;

    for r in results {
        writeln!(out, "Diameter: {} mm", r.diameter_mm)?;
        writeln!(out, "Status: {}", r.status().display_name())?;

        let band = if r.satisfies_flow_speed { "within" } else { "outside" };
        writeln!(
            out,
            "Flow speed: {:.3} m/s ({} range {:.1}-{:.1} m/s)",
            r.flow_speed_m_s, band, MIN_FLOW_SPEED_M_S, MAX_FLOW_SPEED_M_S
        )?;

        if r.is_valid {
            write_safety(out, r)?;
        } else {
            writeln!(out, "Wall thickness: not calculated")?;
            writeln!(out, "Safety factors: not calculated ({})", r.outcome.describe())?;
            writeln!(out, "Minimum safety factor: not calculated")?;
        }

        writeln!(out)?;
        writeln!(out, "{}", separator('~', DIAMETER_SEPARATOR_WIDTH))?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_safety(out: &mut String, r: &DiameterResult) -> std::fmt::Result {
    writeln!(out, "Wall thickness: {:.3} mm", r.final_thickness_mm())?;
    writeln!(out, "Safety factor (hoop stress): {:.3}", r.safety_hoop)?;
    writeln!(out, "Safety factor (axial stress): {:.3}", r.safety_axial)?;
    writeln!(out, "Safety factor (equivalent stress): {:.3}", r.safety_equivalent)?;
    writeln!(
        out,
        "Minimum safety factor: {:.3} ({})",
        r.min_safety(),
        r.governing_check()
    )
}

fn write_verdict(out: &mut String, results: &[DiameterResult]) -> std::fmt::Result {
    section(out, "FINAL RESULT")?;

    match optimal(results) {
        Some(best) => {
            writeln!(out, "OPTIMAL DIAMETER: {} mm", best.diameter_mm)?;
            write_safety(out, best)?;
        }
        None => {
            writeln!(out, "OPTIMAL DIAMETER: NOT FOUND")?;
            writeln!(out, "None of the proposed diameters satisfies all conditions.")?;
            let flow_failures = results
                .iter()
                .filter(|r| r.outcome == SearchOutcome::FlowSpeedOutOfRange)
                .count();
            if flow_failures > 0 {
                writeln!(
                    out,
                    "{} of {} diameters failed the flow speed check.",
                    flow_failures,
                    results.len()
                )?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", separator('=', REPORT_WIDTH))?;
    writeln!(out, "CALCULATION COMPLETE")?;
    writeln!(out, "{}", separator('=', REPORT_WIDTH))
}
