//! Assessment facade
//!
//! Composes the calculators into a single result snapshot:
//! input → ground risk → air risk → SAIL → {containment, OSO compliance}.
//!
//! Global invariants enforced:
//! - The result is a pure function of (input, tables, policy)
//! - Every evaluation recomputes from the full input; nothing is cached
//! - Out of scope short-circuits containment and OSO evaluation

use crate::air::{residual_arc, TmprSelection};
use crate::containment::{
    adjacent_area_distance_with_policy, is_containment_compliant, required_containment,
    AdjacentAreaPolicy, ContainmentAssessment,
};
use crate::error::TableError;
use crate::ground::{final_grc, intrinsic_grc, AppliedMitigation};
use crate::input::AssessmentInput;
use crate::model::{AirRiskClass, Grc, PopulationCategory, Robustness, Sail, UaCharacteristic};
use crate::oso::{check_all, OsoReport};
use crate::sail::sail;
use crate::tables::ReferenceTables;
use crate::warning::Warning;
use serde::{Deserialize, Serialize};

/// Everything derived from one input snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub revision: String,
    pub population: PopulationCategory,
    pub ua_characteristic: UaCharacteristic,
    pub intrinsic_grc: Grc,
    pub mitigations: Vec<AppliedMitigation>,
    pub final_grc: Grc,
    pub initial_arc: AirRiskClass,
    pub tmpr: TmprSelection,
    pub residual_arc: AirRiskClass,
    pub arc_steps_reduced: u8,
    /// `None` means out of scope: route to the certified category
    pub sail: Option<Sail>,
    pub out_of_scope: bool,
    pub containment: ContainmentAssessment,
    pub oso: OsoReport,
    /// Claims above "none" with no evidence text, across mitigations, TMPR,
    /// containment and OSOs
    pub missing_evidence: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<Warning>,
}

impl AssessmentResult {
    /// In scope, containment met and every required OSO met
    pub fn is_compliant(&self) -> bool {
        !self.out_of_scope && self.containment.compliant && self.oso.summary.overall_compliant
    }
}

/// Risk assessment engine over an injected table set
#[derive(Debug, Clone)]
pub struct SoraEngine {
    tables: ReferenceTables,
    adjacent_area: AdjacentAreaPolicy,
}

impl Default for SoraEngine {
    fn default() -> Self {
        Self::sora_2_5()
    }
}

impl SoraEngine {
    /// Engine over a validated table set
    pub fn new(tables: ReferenceTables) -> Result<Self, TableError> {
        tables.validate()?;
        Ok(SoraEngine {
            tables,
            adjacent_area: AdjacentAreaPolicy::default(),
        })
    }

    /// Engine over the built-in SORA 2.5 tables
    pub fn sora_2_5() -> Self {
        SoraEngine {
            tables: ReferenceTables::sora_2_5(),
            adjacent_area: AdjacentAreaPolicy::default(),
        }
    }

    /// Replace the adjacent-area rule; the policy is validated first
    pub fn with_adjacent_area(mut self, policy: AdjacentAreaPolicy) -> Result<Self, TableError> {
        policy.validate()?;
        self.adjacent_area = policy;
        Ok(self)
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn adjacent_area(&self) -> &AdjacentAreaPolicy {
        &self.adjacent_area
    }

    /// Evaluate an input snapshot
    pub fn evaluate(&self, input: &AssessmentInput) -> AssessmentResult {
        let tables = &self.tables;
        let (resolved, mut warnings) = input.resolve();

        for number in resolved.oso.keys() {
            if tables.oso_definition(*number).is_none() {
                warnings.push(Warning::UnknownKey {
                    field: "oso".to_string(),
                    value: format!("OSO#{:02}", number),
                    fallback: "ignored".to_string(),
                });
            }
        }

        let intrinsic = intrinsic_grc(tables, resolved.population, resolved.ua_characteristic);
        let ground = final_grc(tables, intrinsic, &resolved.mitigations);
        warnings.extend(ground.warnings);

        let air = residual_arc(tables, resolved.initial_arc, &resolved.tmpr);
        warnings.extend(air.warning);

        let sail_level = sail(&tables.sail, ground.final_grc, air.residual_arc);

        let distance = tables
            .ua(resolved.ua_characteristic)
            .map(|ua| adjacent_area_distance_with_policy(ua.max_speed_ms, &self.adjacent_area))
            .unwrap_or(self.adjacent_area.min_distance_m);

        let required = sail_level.map(|s| {
            required_containment(&tables.containment, resolved.adjacent_population, s)
        });
        let containment = ContainmentAssessment {
            adjacent_population: resolved.adjacent_population,
            adjacent_area_distance_m: distance,
            required,
            achieved: resolved.containment,
            compliant: required
                .map(|r| is_containment_compliant(r, resolved.containment))
                .unwrap_or(false),
            evidence_provided: resolved.containment_evidence,
        };

        let oso = match sail_level {
            Some(s) => check_all(&tables.oso, s, &resolved.oso),
            None => OsoReport::default(),
        };

        let tmpr = &resolved.tmpr;
        let tmpr_unsupported =
            tmpr.enabled && tmpr.robustness != Robustness::None && !tmpr.evidence_provided;
        let containment_unsupported =
            containment.achieved != Robustness::None && !containment.evidence_provided;
        let missing_evidence = ground
            .applied
            .iter()
            .filter(|m| !m.evidence_provided)
            .count()
            + usize::from(tmpr_unsupported)
            + usize::from(containment_unsupported)
            + oso.summary.missing_evidence;

        AssessmentResult {
            revision: tables.revision.clone(),
            population: resolved.population,
            ua_characteristic: resolved.ua_characteristic,
            intrinsic_grc: intrinsic,
            mitigations: ground.applied,
            final_grc: ground.final_grc,
            initial_arc: resolved.initial_arc,
            tmpr: resolved.tmpr,
            residual_arc: air.residual_arc,
            arc_steps_reduced: air.steps_reduced,
            sail: sail_level,
            out_of_scope: sail_level.is_none(),
            containment,
            oso,
            missing_evidence,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MitigationId, TmprType};

    #[test]
    fn test_default_input_evaluates() {
        let result = SoraEngine::sora_2_5().evaluate(&AssessmentInput::default());
        assert_eq!(result.intrinsic_grc, Grc::Class(4));
        assert_eq!(result.final_grc, Grc::Class(4));
        assert_eq!(result.residual_arc, AirRiskClass::B);
        assert_eq!(result.sail, Some(Sail::III));
        assert!(!result.out_of_scope);
        assert_eq!(result.containment.adjacent_area_distance_m, 5_000.0);
        assert_eq!(result.oso.results.len(), 17);
    }

    #[test]
    fn test_out_of_scope_skips_containment_and_oso() {
        let input = AssessmentInput {
            population: "assembly".to_string(),
            ua_characteristic: "20m_120ms".to_string(),
            ..Default::default()
        };
        let result = SoraEngine::sora_2_5().evaluate(&input);
        assert_eq!(result.intrinsic_grc, Grc::OutOfScope);
        assert_eq!(result.final_grc, Grc::OutOfScope);
        assert_eq!(result.sail, None);
        assert!(result.out_of_scope);
        assert_eq!(result.containment.required, None);
        assert!(!result.containment.compliant);
        assert!(result.oso.results.is_empty());
        assert!(!result.is_compliant());
    }

    #[test]
    fn test_grc_above_seven_is_out_of_scope() {
        let input = AssessmentInput {
            population: "high_density".to_string(),
            ua_characteristic: "20m_120ms".to_string(),
            ..Default::default()
        };
        let result = SoraEngine::sora_2_5().evaluate(&input);
        assert_eq!(result.final_grc, Grc::Class(9));
        assert!(result.out_of_scope);
    }

    #[test]
    fn test_mitigations_bring_operation_into_scope() {
        let mut input = AssessmentInput {
            population: "suburban".to_string(),
            ua_characteristic: "20m_120ms".to_string(),
            ..Default::default()
        };
        input.enable_mitigation(MitigationId::M1A, Robustness::Low);
        input.enable_mitigation(MitigationId::M2, Robustness::High);
        let result = SoraEngine::sora_2_5().evaluate(&input);
        assert_eq!(result.intrinsic_grc, Grc::Class(8));
        assert_eq!(result.final_grc, Grc::Class(5));
        assert_eq!(result.sail, Some(Sail::IV));
    }

    #[test]
    fn test_tmpr_lowers_sail() {
        let mut input = AssessmentInput {
            initial_arc: "ARC-c".to_string(),
            ..Default::default()
        };
        let without = SoraEngine::sora_2_5().evaluate(&input);
        assert_eq!(without.sail, Some(Sail::IV));

        input.enable_tmpr(TmprType::Vlos, Robustness::Low);
        let with = SoraEngine::sora_2_5().evaluate(&input);
        assert_eq!(with.residual_arc, AirRiskClass::B);
        assert_eq!(with.sail, Some(Sail::III));
    }

    #[test]
    fn test_unknown_catalog_oso_is_warned() {
        let mut input = AssessmentInput::default();
        input.declare_oso(10, Robustness::High, "");
        let result = SoraEngine::sora_2_5().evaluate(&input);
        assert!(result.warnings.contains(&Warning::UnknownKey {
            field: "oso".to_string(),
            value: "OSO#10".to_string(),
            fallback: "ignored".to_string(),
        }));
    }

    #[test]
    fn test_new_rejects_invalid_tables() {
        let mut tables = ReferenceTables::sora_2_5();
        tables.oso.clear();
        assert_eq!(
            SoraEngine::new(tables).unwrap_err(),
            TableError::EmptyOsoCatalog
        );
    }

    #[test]
    fn test_full_compliance() {
        let mut input = AssessmentInput::default();
        for oso in ReferenceTables::sora_2_5().oso {
            input.declare_oso(oso.number, Robustness::High, "manual section 4");
        }
        let result = SoraEngine::sora_2_5().evaluate(&input);
        assert_eq!(result.sail, Some(Sail::III));
        assert!(result.containment.compliant);
        assert!(result.oso.summary.overall_compliant);
        assert!(result.is_compliant());
    }

    #[test]
    fn test_claims_without_evidence_are_counted() {
        let mut bare = AssessmentInput::default();
        bare.enable_mitigation(MitigationId::M1A, Robustness::Low);
        bare.enable_tmpr(TmprType::Vlos, Robustness::Low);
        bare.containment.evidence = "geofence flight test".to_string();

        let mut documented = bare.clone();
        documented.mitigations.m1a.evidence = "sheltering study".to_string();
        documented.tmpr.evidence = "observer log".to_string();

        let engine = SoraEngine::sora_2_5();
        let bare_result = engine.evaluate(&bare);
        let documented_result = engine.evaluate(&documented);
        assert_ne!(bare_result, documented_result);

        assert_eq!(bare_result.missing_evidence, 2);
        assert!(!bare_result.mitigations[0].evidence_provided);
        assert!(!bare_result.tmpr.evidence_provided);

        assert_eq!(documented_result.missing_evidence, 0);
        assert!(documented_result.mitigations[0].evidence_provided);
        assert!(documented_result.tmpr.evidence_provided);
        // Evidence never changes the risk figures
        assert_eq!(bare_result.final_grc, documented_result.final_grc);
        assert_eq!(bare_result.sail, documented_result.sail);
    }

    #[test]
    fn test_with_adjacent_area_rejects_bad_policy() {
        let unordered = AdjacentAreaPolicy {
            flight_seconds: 180.0,
            min_distance_m: 40_000.0,
            max_distance_m: 35_000.0,
        };
        assert!(matches!(
            SoraEngine::sora_2_5().with_adjacent_area(unordered),
            Err(TableError::AdjacentAreaBoundsUnordered { .. })
        ));

        let nan_floor = AdjacentAreaPolicy {
            min_distance_m: f64::NAN,
            ..AdjacentAreaPolicy::default()
        };
        let rejected = SoraEngine::sora_2_5().with_adjacent_area(nan_floor);
        assert!(rejected.is_err());

        let custom = AdjacentAreaPolicy {
            flight_seconds: 60.0,
            ..AdjacentAreaPolicy::default()
        };
        let engine = SoraEngine::sora_2_5().with_adjacent_area(custom).unwrap();
        assert_eq!(engine.adjacent_area(), &custom);
    }
}
