//! # Pipeline Sizing CLI
//!
//! Terminal front end for `pipeline_core`: collects the operating conditions
//! (from a JSON file, flags, or interactive prompts), runs the sizing engine
//! and prints a per-diameter summary. Optionally writes the text report and
//! the JSON results.
//!
//! ```text
//! pipeline-sizing --pressure 10 --mass-flow 50 --diameters "219,273,530" --report
//! pipeline-sizing --input line_a.json --axial-check magnitude --json
//! pipeline-sizing            # interactive
//! ```

mod config;
mod logging;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use pipeline_core::calculations::{optimal, AxialCheck, DiameterResult, SizingEngine, SizingOptions};
use pipeline_core::errors::CalcError;
use pipeline_core::file_io::{load_request, save_report};
use pipeline_core::input::{parse_diameters, ConstantsMode, SizingRequest};
use pipeline_core::parameters::{PhysicalConstants, PipelineParameters, ReliabilityFactors};
use pipeline_core::report::{default_report_file_name, render_text_report, ReportMetadata};

use crate::config::Config;

const DEFAULT_PRESSURE_MPA: f64 = 10.0;
const DEFAULT_MASS_FLOW_KG_S: f64 = 50.0;

#[derive(Parser, Debug)]
#[command(name = "pipeline-sizing")]
#[command(version, about = "Wall thickness and optimal diameter sizing for steel pipelines", long_about = None)]
struct Cli {
    /// JSON sizing request
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    input: Option<PathBuf>,

    /// Operating pressure (MPa)
    #[arg(long)]
    pressure: Option<f64>,

    /// Mass flow rate (kg/s)
    #[arg(long = "mass-flow")]
    mass_flow: Option<f64>,

    /// Comma-separated outer diameters (mm), e.g. "219,273,530"
    #[arg(short = 'd', long)]
    diameters: Option<String>,

    /// How the axial stress is compared with its allowable value
    #[arg(long = "axial-check", value_enum)]
    axial_check: Option<AxialCheckArg>,

    /// Engineer name printed in the report
    #[arg(long)]
    engineer: Option<String>,

    /// Write the text report; without a path, a timestamped name is used
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    report: Option<Option<PathBuf>>,

    /// Print the results as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Config file (defaults to ./pipeline_sizing.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AxialCheckArg {
    Signed,
    Magnitude,
}

impl From<AxialCheckArg> for AxialCheck {
    fn from(arg: AxialCheckArg) -> Self {
        match arg {
            AxialCheckArg::Signed => AxialCheck::Signed,
            AxialCheckArg::Magnitude => AxialCheck::Magnitude,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(calc_error) = e.downcast_ref::<CalcError>() {
                if let Ok(json) = serde_json::to_string_pretty(calc_error) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref())?;
    logging::init_logging(config.log_level, cli.verbose)?;

    let request = build_request(&cli)?;
    let params = request.to_parameters()?;

    let options = SizingOptions {
        axial_check: cli.axial_check.map(AxialCheck::from).unwrap_or(config.axial_check),
    };
    info!(
        diameters = params.outer_diameters_mm.len(),
        axial_check = ?options.axial_check,
        "starting sizing run"
    );

    let results = SizingEngine::new(options).evaluate(&params);

    print_summary(&params, &results);

    if cli.json {
        println!();
        println!("JSON Output:");
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    if let Some(report_arg) = &cli.report {
        let engineer = cli.engineer.clone().unwrap_or_else(|| config.engineer.clone());
        let meta = ReportMetadata::new(engineer, request.constants.label());
        let path = report_path(report_arg.as_deref(), &config, &meta);
        let text = render_text_report(&meta, &params, &results);
        let written = save_report(&text, &path)
            .with_context(|| format!("Could not write report to {}", path.display()))?;
        println!();
        println!("Report saved to {}", written.display());
    }

    Ok(())
}

/// Assemble the request from the input file, flags, or prompts.
///
/// Flags override values read from the input file. Without an input file
/// and without `--diameters`, every value is prompted for, with
/// `--pressure` and `--mass-flow` used as the prompt defaults.
fn build_request(cli: &Cli) -> Result<SizingRequest> {
    let mut request = match &cli.input {
        Some(path) => load_request(path)?,
        None if cli.diameters.is_none() => {
            let (pressure, mass_flow) = prompt_defaults(cli);
            return prompt_request(pressure, mass_flow);
        }
        None => {
            let (Some(pressure), Some(mass_flow)) = (cli.pressure, cli.mass_flow) else {
                bail!("--pressure and --mass-flow are required with --diameters");
            };
            SizingRequest::new(pressure, mass_flow, Vec::new())
        }
    };

    if let Some(pressure) = cli.pressure {
        request.pressure_mpa = pressure;
    }
    if let Some(mass_flow) = cli.mass_flow {
        request.mass_flow_kg_s = mass_flow;
    }
    if let Some(text) = &cli.diameters {
        request.outer_diameters_mm = parse_diameters(text)?;
    }
    Ok(request)
}

/// Where the report goes: the given path, or the default name in the
/// configured report directory.
fn report_path(requested: Option<&Path>, config: &Config, meta: &ReportMetadata) -> PathBuf {
    match requested {
        Some(path) => path.to_path_buf(),
        None => {
            let name = default_report_file_name(meta.created);
            match &config.report_dir {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            }
        }
    }
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(&format!("{} [{}]: ", prompt, default))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Prompt defaults for pressure and mass flow; flags given without
/// `--diameters` pre-fill them
fn prompt_defaults(cli: &Cli) -> (f64, f64) {
    (
        cli.pressure.unwrap_or(DEFAULT_PRESSURE_MPA),
        cli.mass_flow.unwrap_or(DEFAULT_MASS_FLOW_KG_S),
    )
}

fn prompt_request(default_pressure: f64, default_mass_flow: f64) -> Result<SizingRequest> {
    println!("Pipeline Sizing - Wall Thickness and Optimal Diameter");
    println!("=====================================================");
    println!();
    println!("Constants mode:");
    println!("  1) Typical conditions (preset constants)");
    println!("  2) Custom conditions (enter every constant)");
    let custom = prompt_line("Select mode [1]: ").as_deref() == Some("2");
    println!();

    let pressure = prompt_f64("Operating pressure (MPa)", default_pressure);
    let mass_flow = prompt_f64("Mass flow (kg/s)", default_mass_flow);

    let defaults = ReliabilityFactors::default();
    let factors = ReliabilityFactors {
        operational_factor: prompt_f64("Operational factor m", defaults.operational_factor),
        yield_reliability: prompt_f64("Yield reliability gamma_my", defaults.yield_reliability),
        strength_reliability: prompt_f64("Strength reliability gamma_mu", defaults.strength_reliability),
        responsibility_factor: prompt_f64("Responsibility factor gamma_n", defaults.responsibility_factor),
        pressure_reliability: prompt_f64("Pressure reliability gamma_fp", defaults.pressure_reliability),
    };

    let Some(text) = prompt_line("Outer diameters (mm), comma-separated: ") else {
        bail!("No diameters entered");
    };
    let diameters = parse_diameters(&text)?;

    let mode = if custom {
        println!();
        println!("Physical constants (Enter keeps the typical value):");
        ConstantsMode::Custom(prompt_constants())
    } else {
        ConstantsMode::Typical
    };
    println!();

    Ok(SizingRequest::new(pressure, mass_flow, diameters)
        .with_factors(factors)
        .with_mode(mode))
}

fn prompt_constants() -> PhysicalConstants {
    let t = PhysicalConstants::typical();
    PhysicalConstants {
        density_kg_m3: prompt_f64("Density (kg/m3)", t.density_kg_m3),
        yield_strength_mpa: prompt_f64("Yield strength (MPa)", t.yield_strength_mpa),
        tensile_strength_mpa: prompt_f64("Tensile strength (MPa)", t.tensile_strength_mpa),
        fluid_bulk_modulus_mpa: prompt_f64("Fluid bulk modulus (MPa)", t.fluid_bulk_modulus_mpa),
        steel_young_modulus_mpa: prompt_f64("Steel Young's modulus (MPa)", t.steel_young_modulus_mpa),
        temperature_delta_c: prompt_f64("Temperature delta (C)", t.temperature_delta_c),
        poisson_ratio: prompt_f64("Poisson's ratio", t.poisson_ratio),
        thermal_expansion_per_c: prompt_f64("Thermal expansion (1/C)", t.thermal_expansion_per_c),
        bend_radius_m: prompt_f64("Bend radius (m), 0 for straight", t.bend_radius_m),
    }
}

fn print_summary(params: &PipelineParameters, results: &[DiameterResult]) {
    println!("═══════════════════════════════════════════════════════════════════════════");
    println!("  PIPELINE SIZING RESULTS");
    println!("═══════════════════════════════════════════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Pressure:   {} MPa", params.pressure_mpa);
    println!("  Mass flow:  {} kg/s", params.mass_flow_kg_s);
    println!();
    println!(
        "  {:>8}  {:<10}  {:>9}  {:>8}  {:>7}  {:>7}  {:>7}  {:>7}",
        "D (mm)", "Status", "v (m/s)", "t (mm)", "S_hoop", "S_axial", "S_eq", "S_min"
    );
    for r in results {
        if r.is_valid {
            println!(
                "  {:>8}  {:<10}  {:>9.3}  {:>8.3}  {:>7.3}  {:>7.3}  {:>7.3}  {:>7.3}",
                r.diameter_mm,
                r.status().display_name(),
                r.flow_speed_m_s,
                r.final_thickness_mm(),
                r.safety_hoop,
                r.safety_axial,
                r.safety_equivalent,
                r.min_safety()
            );
        } else {
            println!(
                "  {:>8}  {:<10}  {:>9.3}  {}",
                r.diameter_mm,
                r.status().display_name(),
                r.flow_speed_m_s,
                r.outcome.describe()
            );
        }
    }
    println!();

    for r in results {
        println!(
            "  {:>8} mm  flow {}  hoop {}  axial {}  equivalent {}",
            r.diameter_mm,
            status_icon(r.satisfies_flow_speed),
            status_icon(r.satisfies_hoop_stress),
            status_icon(r.satisfies_axial_stress),
            status_icon(r.satisfies_equivalent_stress)
        );
    }
    println!();

    println!("═══════════════════════════════════════════════════════════════════════════");
    match optimal(results) {
        Some(best) => println!(
            "  OPTIMAL: {} mm, wall {:.3} mm (min safety {:.3}, governs: {})",
            best.diameter_mm,
            best.final_thickness_mm(),
            best.min_safety(),
            best.governing_check()
        ),
        None => println!("  OPTIMAL: NOT FOUND (no diameter satisfies all conditions)"),
    }
    println!("═══════════════════════════════════════════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
