//! # Diameter Selection
//!
//! Picks the optimal diameter: among valid results, the one whose smallest
//! safety factor is largest. The first result wins a tie.

use tracing::info;

use super::result::DiameterResult;

/// Relative tolerance for matching diameters across representations.
///
/// Two diameters match when `|a − b|·1e12 ≤ min(|a|, |b|)`, which treats
/// values as equal when they are indistinguishable at ordinary double
/// precision for millimeter-scale diameters.
pub const DIAMETER_MATCH_TOLERANCE: f64 = 1e-12;

/// Approximate equality for diameters (mm).
///
/// # Example
///
/// ```rust
/// use pipeline_core::calculations::selection::diameters_match;
///
/// assert!(diameters_match(530.0, 530.0 + 1e-11));
/// assert!(!diameters_match(530.0, 530.001));
/// ```
pub fn diameters_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= DIAMETER_MATCH_TOLERANCE * a.abs().min(b.abs())
}

/// Mark the optimal result and return its index.
///
/// Clears `is_optimal` everywhere first, so at most one result carries the
/// flag afterwards. Returns `None` when no result is valid.
pub fn select_optimal(results: &mut [DiameterResult]) -> Option<usize> {
    for result in results.iter_mut() {
        result.is_optimal = false;
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, result) in results.iter().enumerate() {
        if !result.is_valid {
            continue;
        }
        let min_safety = result.min_safety();
        match best {
            Some((_, best_safety)) if min_safety <= best_safety => {}
            _ => best = Some((index, min_safety)),
        }
    }

    let (index, min_safety) = best?;
    results[index].is_optimal = true;
    info!(
        diameter_mm = results[index].diameter_mm,
        min_safety, "optimal diameter selected"
    );
    Some(index)
}

/// The result marked optimal, if any
pub fn optimal(results: &[DiameterResult]) -> Option<&DiameterResult> {
    results.iter().find(|r| r.is_optimal)
}

/// First result for a diameter, matched approximately
pub fn find_by_diameter(results: &[DiameterResult], diameter_mm: f64) -> Option<&DiameterResult> {
    results.iter().find(|r| diameters_match(r.diameter_mm, diameter_mm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::result::SearchOutcome;

    fn valid(diameter_mm: f64, hoop: f64, axial: f64, equivalent: f64) -> DiameterResult {
        DiameterResult {
            satisfies_flow_speed: true,
            satisfies_hoop_stress: true,
            satisfies_axial_stress: true,
            satisfies_equivalent_stress: true,
            safety_hoop: hoop,
            safety_axial: axial,
            safety_equivalent: equivalent,
            is_valid: true,
            outcome: SearchOutcome::Accepted,
            ..DiameterResult::new(diameter_mm)
        }
    }

    #[test]
    fn test_selects_max_min_safety() {
        let mut results = vec![
            valid(219.0, 1.31, 14.9, 1.25),
            DiameterResult::new(530.0),
            valid(273.0, 1.25, 13.4, 1.20),
            valid(325.0, 2.0, 1.4, 3.0),
        ];
        assert_eq!(select_optimal(&mut results), Some(3));
        assert_eq!(results.iter().filter(|r| r.is_optimal).count(), 1);
        assert_eq!(optimal(&results).unwrap().diameter_mm, 325.0);
    }

    #[test]
    fn test_tie_goes_to_first() {
        let mut results = vec![valid(219.0, 1.5, 2.0, 1.5), valid(273.0, 1.5, 1.5, 1.5)];
        assert_eq!(select_optimal(&mut results), Some(0));
        assert!(results[0].is_optimal);
        assert!(!results[1].is_optimal);
    }

    #[test]
    fn test_duplicate_diameters_mark_only_one() {
        let mut results = vec![valid(219.0, 1.3, 2.0, 1.25), valid(219.0, 1.3, 2.0, 1.25)];
        select_optimal(&mut results);
        assert_eq!(results.iter().filter(|r| r.is_optimal).count(), 1);
        assert!(results[0].is_optimal);
    }

    #[test]
    fn test_no_valid_result_clears_flags() {
        let mut stale = DiameterResult::new(530.0);
        stale.is_optimal = true;
        let mut results = vec![stale, DiameterResult::new(720.0)];

        assert_eq!(select_optimal(&mut results), None);
        assert!(results.iter().all(|r| !r.is_optimal));
        assert!(optimal(&results).is_none());
    }

    #[test]
    fn test_empty_results() {
        let mut results: Vec<DiameterResult> = Vec::new();
        assert_eq!(select_optimal(&mut results), None);
    }

    #[test]
    fn test_zero_min_safety_still_selectable() {
        // Signed axial check can accept with safety_axial = 0
        let mut results = vec![DiameterResult::new(159.0), valid(219.0, 2.3, 0.0, 1.02)];
        assert_eq!(select_optimal(&mut results), Some(1));
    }

    #[test]
    fn test_find_by_diameter() {
        let results = vec![valid(219.0, 1.3, 2.0, 1.25), DiameterResult::new(530.0)];
        let found = find_by_diameter(&results, 530.0 * (1.0 + 1e-15)).unwrap();
        assert_eq!(found.diameter_mm, 530.0);
        assert!(find_by_diameter(&results, 531.0).is_none());
    }

    #[test]
    fn test_diameters_match_zero() {
        assert!(diameters_match(0.0, 0.0));
        assert!(!diameters_match(0.0, 1e-300));
    }
}
