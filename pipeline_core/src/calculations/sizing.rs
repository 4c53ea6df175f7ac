//! # Sizing Engine
//!
//! Runs the whole calculation for one input record:
//!
//! 1. derive allowable stresses
//! 2. search the wall thickness of every diameter, in input order
//! 3. select the optimal diameter
//!
//! The engine holds no state between calls and performs no I/O. Identical
//! inputs produce identical outputs, and removing a diameter from the input
//! does not change the result computed for any other diameter.
//!
//! ## Example
//!
//! ```rust
//! use pipeline_core::calculations::sizing::SizingEngine;
//! use pipeline_core::parameters::{PhysicalConstants, PipelineParameters};
//!
//! let params = PipelineParameters::new(10.0, 50.0, vec![219.0, 273.0, 530.0], PhysicalConstants::typical());
//! let results = SizingEngine::default().evaluate(&params);
//!
//! assert_eq!(results.len(), 3);
//! let best = results.iter().find(|r| r.is_optimal).unwrap();
//! println!("Optimal: {} mm, wall {:.3} mm", best.diameter_mm, best.final_thickness_mm());
//! ```

use tracing::{debug, info_span};

use super::allowable::AllowableStresses;
use super::result::DiameterResult;
use super::selection::select_optimal;
use super::thickness::{search_wall_thickness, SizingOptions};
use crate::parameters::PipelineParameters;

/// Stateless sizing engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizingEngine {
    options: SizingOptions,
}

impl SizingEngine {
    pub fn new(options: SizingOptions) -> Self {
        SizingEngine { options }
    }

    pub fn options(&self) -> SizingOptions {
        self.options
    }

    /// Evaluate every candidate diameter and mark the optimal one.
    ///
    /// Returns one result per input diameter, in input order. An empty
    /// diameter list yields an empty collection.
    pub fn evaluate(&self, params: &PipelineParameters) -> Vec<DiameterResult> {
        let span = info_span!("evaluate", diameters = params.outer_diameters_mm.len());
        let _guard = span.enter();

        let allowable = AllowableStresses::derive(params);
        debug!(
            r1 = allowable.yield_governed_mpa,
            r2 = allowable.strength_governed_mpa,
            allowable_equivalent = allowable.equivalent_mpa,
            "allowable stresses"
        );

        let mut results: Vec<DiameterResult> = params
            .outer_diameters_mm
            .iter()
            .map(|&diameter_mm| search_wall_thickness(params, &allowable, diameter_mm, self.options))
            .collect();

        select_optimal(&mut results);
        results
    }
}

/// Evaluate with default options (signed axial check).
pub fn evaluate(params: &PipelineParameters) -> Vec<DiameterResult> {
    SizingEngine::default().evaluate(params)
}
