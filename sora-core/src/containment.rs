//! Containment requirement resolution
//!
//! Global invariants enforced:
//! - Unlisted (population, SAIL) cells require "low"
//! - Adjacent-area distance always lies within the policy bounds

use crate::error::TableError;
use crate::model::{PopulationCategory, Robustness, Sail};
use crate::tables::ContainmentMatrix;
use serde::{Deserialize, Serialize};

/// Required containment for cells missing from the matrix
pub const DEFAULT_REQUIRED_CONTAINMENT: Robustness = Robustness::Low;

/// Parameters of the adjacent-area distance rule
///
/// Distance = flight time at max speed, clamped to `[min_distance_m, max_distance_m]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjacentAreaPolicy {
    pub flight_seconds: f64,
    pub min_distance_m: f64,
    pub max_distance_m: f64,
}

impl Default for AdjacentAreaPolicy {
    fn default() -> Self {
        AdjacentAreaPolicy {
            flight_seconds: 180.0,
            min_distance_m: 5_000.0,
            max_distance_m: 35_000.0,
        }
    }
}

impl AdjacentAreaPolicy {
    /// Every parameter positive and finite, floor strictly below cap
    pub fn validate(&self) -> Result<(), TableError> {
        for (field, value) in [
            ("flight_seconds", self.flight_seconds),
            ("min_distance_m", self.min_distance_m),
            ("max_distance_m", self.max_distance_m),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TableError::InvalidAdjacentArea { field, value });
            }
        }
        if self.min_distance_m >= self.max_distance_m {
            return Err(TableError::AdjacentAreaBoundsUnordered {
                min: self.min_distance_m,
                max: self.max_distance_m,
            });
        }
        Ok(())
    }
}

/// Containment outcome for an in-scope or out-of-scope operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainmentAssessment {
    pub adjacent_population: PopulationCategory,
    pub adjacent_area_distance_m: f64,
    /// `None` when the operation is out of scope
    pub required: Option<Robustness>,
    pub achieved: Robustness,
    pub compliant: bool,
    pub evidence_provided: bool,
}

/// Required containment robustness for an adjacent-area population and SAIL
pub fn required_containment(
    matrix: &ContainmentMatrix,
    adjacent_population: PopulationCategory,
    sail: Sail,
) -> Robustness {
    matrix
        .get(adjacent_population, sail)
        .unwrap_or(DEFAULT_REQUIRED_CONTAINMENT)
}

pub fn is_containment_compliant(required: Robustness, achieved: Robustness) -> bool {
    achieved >= required
}

/// Adjacent-area distance with the default policy (180 s, 5 km..35 km)
pub fn adjacent_area_distance(max_speed_ms: f64) -> f64 {
    adjacent_area_distance_with_policy(max_speed_ms, &AdjacentAreaPolicy::default())
}

/// Adjacent-area distance with a custom policy
///
/// Negative or NaN speeds count as zero; infinite speeds hit the cap. An
/// unvalidated policy never panics: the cap wins over the floor.
pub fn adjacent_area_distance_with_policy(
    max_speed_ms: f64,
    policy: &AdjacentAreaPolicy,
) -> f64 {
    let speed = max_speed_ms.max(0.0);
    (speed * policy.flight_seconds)
        .max(policy.min_distance_m)
        .min(policy.max_distance_m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ReferenceTables;

    #[test]
    fn test_slow_ua_hits_floor() {
        assert_eq!(adjacent_area_distance(10.0), 5_000.0);
    }

    #[test]
    fn test_mid_speed_is_unclamped() {
        assert_eq!(adjacent_area_distance(150.0), 27_000.0);
    }

    #[test]
    fn test_fast_ua_hits_cap() {
        assert_eq!(adjacent_area_distance(250.0), 35_000.0);
        assert_eq!(adjacent_area_distance(f64::INFINITY), 35_000.0);
    }

    #[test]
    fn test_degenerate_speeds_stay_in_bounds() {
        assert_eq!(adjacent_area_distance(-20.0), 5_000.0);
        assert_eq!(adjacent_area_distance(f64::NAN), 5_000.0);
    }

    #[test]
    fn test_custom_policy() {
        let policy = AdjacentAreaPolicy {
            flight_seconds: 60.0,
            min_distance_m: 1_000.0,
            max_distance_m: 10_000.0,
        };
        assert_eq!(adjacent_area_distance_with_policy(50.0, &policy), 3_000.0);
    }

    #[test]
    fn test_policy_validation() {
        assert_eq!(AdjacentAreaPolicy::default().validate(), Ok(()));

        let unordered = AdjacentAreaPolicy {
            min_distance_m: 35_000.0,
            ..AdjacentAreaPolicy::default()
        };
        assert_eq!(
            unordered.validate(),
            Err(TableError::AdjacentAreaBoundsUnordered {
                min: 35_000.0,
                max: 35_000.0,
            })
        );

        let zero_time = AdjacentAreaPolicy {
            flight_seconds: 0.0,
            ..AdjacentAreaPolicy::default()
        };
        assert!(matches!(
            zero_time.validate(),
            Err(TableError::InvalidAdjacentArea {
                field: "flight_seconds",
                ..
            })
        ));

        let nan_cap = AdjacentAreaPolicy {
            max_distance_m: f64::NAN,
            ..AdjacentAreaPolicy::default()
        };
        assert!(nan_cap.validate().is_err());
    }

    #[test]
    fn test_unvalidated_policy_does_not_panic() {
        let inverted = AdjacentAreaPolicy {
            flight_seconds: 180.0,
            min_distance_m: 40_000.0,
            max_distance_m: 35_000.0,
        };
        assert_eq!(
            adjacent_area_distance_with_policy(10.0, &inverted),
            35_000.0
        );

        let nan_floor = AdjacentAreaPolicy {
            min_distance_m: f64::NAN,
            ..AdjacentAreaPolicy::default()
        };
        assert_eq!(
            adjacent_area_distance_with_policy(10.0, &nan_floor),
            1_800.0
        );
    }

    #[test]
    fn test_required_containment_lookup() {
        let tables = ReferenceTables::sora_2_5();
        assert_eq!(
            required_containment(&tables.containment, PopulationCategory::Assembly, Sail::I),
            Robustness::High
        );
        assert_eq!(
            required_containment(&tables.containment, PopulationCategory::Remote, Sail::III),
            Robustness::Low
        );
    }

    #[test]
    fn test_missing_cell_defaults_to_low() {
        let empty = ContainmentMatrix::default();
        assert_eq!(
            required_containment(&empty, PopulationCategory::HighDensity, Sail::VI),
            Robustness::Low
        );
    }

    #[test]
    fn test_compliance_is_ordinal() {
        assert!(is_containment_compliant(Robustness::Medium, Robustness::High));
        assert!(is_containment_compliant(Robustness::Medium, Robustness::Medium));
        assert!(!is_containment_compliant(Robustness::Medium, Robustness::Low));
        assert!(!is_containment_compliant(Robustness::Low, Robustness::None));
    }
}
