//! # Pipeline Calculations
//!
//! The sizing pipeline, bottom-up:
//!
//! - [`allowable`] - Allowable stresses R1, R2 and the equivalent stress limit
//! - [`thickness`] - Per-diameter wall-thickness search (flow, surge, stress checks)
//! - [`selection`] - Optimal-diameter selection by max-min safety factor
//! - [`sizing`] - [`SizingEngine`] composing the three steps for a whole input record
//! - [`result`] - Per-diameter result record
//!
//! Every function here is pure: parameters in, results out, no I/O.

pub mod allowable;
pub mod result;
pub mod selection;
pub mod sizing;
pub mod thickness;

// Re-export commonly used types
pub use allowable::AllowableStresses;
pub use result::{DiameterResult, DiameterStatus, SearchOutcome, StressStage, StressState};
pub use selection::{diameters_match, find_by_diameter, optimal, select_optimal};
pub use sizing::{evaluate, SizingEngine};
pub use thickness::{search_wall_thickness, AxialCheck, SizingOptions};
