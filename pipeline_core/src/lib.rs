//! # pipeline_core - Pipeline Wall Thickness and Diameter Sizing Engine
//!
//! `pipeline_core` sizes the wall of a steel pipeline for each candidate outer
//! diameter and picks the diameter with the best worst-case safety margin.
//! For every diameter it searches the smallest wall thickness (on a 1 mm grid)
//! that keeps the flow speed in range and keeps hoop, axial and equivalent
//! stresses under water-hammer surge within their allowable values.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Graceful Degradation**: A failing diameter is reported, never an error
//! - **Rich Errors**: Structured error types for input and file handling
//!
//! ## Quick Start
//!
//! ```rust
//! use pipeline_core::calculations::evaluate;
//! use pipeline_core::input::{parse_diameters, SizingRequest};
//!
//! let request = SizingRequest::new(10.0, 50.0, parse_diameters("219, 273, 530").unwrap());
//! let params = request.to_parameters().unwrap();
//!
//! let results = evaluate(&params);
//! let best = results.iter().find(|r| r.is_optimal).unwrap();
//! assert_eq!(best.diameter_mm, 219.0);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&results).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Allowable stresses, thickness search, diameter selection
//! - [`parameters`] - Engine input record and the typical-conditions preset
//! - [`input`] - User input validation and constants mode
//! - [`report`] - Plain-text results report
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON request loading and atomic report saves

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod input;
pub mod parameters;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{evaluate, DiameterResult, SizingEngine, SizingOptions};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_request, save_report};
pub use input::{ConstantsMode, SizingRequest};
pub use parameters::{PhysicalConstants, PipelineParameters, ReliabilityFactors};
