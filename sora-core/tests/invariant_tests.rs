//! Invariant Tests
//!
//! Exhaustive checks over every cell of the shipped tables and every
//! combination of mitigation claims.

use sora_core::air::{residual_arc, TmprSelection};
use sora_core::containment::{adjacent_area_distance, required_containment};
use sora_core::ground::{final_grc, intrinsic_grc, MitigationSelection, MitigationSelections};
use sora_core::model::{
    AirRiskClass, Grc, MitigationId, OsoLevel, PopulationCategory, Robustness, Sail, TmprType,
    UaCharacteristic,
};
use sora_core::oso::{check_all, check_compliance};
use sora_core::sail::sail;
use sora_core::{render_json, AssessmentInput, ReferenceTables, SoraEngine};
use std::collections::BTreeMap;

/// Every mitigation claim: disabled, or enabled at each tier
fn claims() -> Vec<MitigationSelection> {
    let mut claims = vec![MitigationSelection::default()];
    claims.extend(Robustness::ALL.iter().map(|r| MitigationSelection::at(*r)));
    claims
}

fn all_selections() -> Vec<MitigationSelections> {
    let mut out = vec![MitigationSelections::default()];
    for id in MitigationId::ALL {
        let mut next = Vec::new();
        for base in &out {
            for claim in claims() {
                let mut s = *base;
                s.set(id, claim);
                next.push(s);
            }
        }
        out = next;
    }
    out
}

#[test]
fn test_intrinsic_grc_monotonic_in_population() {
    let tables = ReferenceTables::sora_2_5();
    for ua in UaCharacteristic::ALL {
        for pair in PopulationCategory::ALL.windows(2) {
            let lower = intrinsic_grc(&tables, pair[0], ua);
            let higher = intrinsic_grc(&tables, pair[1], ua);
            assert!(
                lower <= higher,
                "{} -> {} at {}: {} > {}",
                pair[0],
                pair[1],
                ua,
                lower,
                higher
            );
        }
    }
}

#[test]
fn test_intrinsic_grc_monotonic_in_ua() {
    let tables = ReferenceTables::sora_2_5();
    for population in PopulationCategory::ALL {
        for pair in UaCharacteristic::ALL.windows(2) {
            let lower = intrinsic_grc(&tables, population, pair[0]);
            let higher = intrinsic_grc(&tables, population, pair[1]);
            assert!(
                lower <= higher,
                "{}: {} -> {}",
                population,
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn test_sail_monotonic_over_grc_and_arc() {
    let matrix = ReferenceTables::sora_2_5().sail;
    for arc in AirRiskClass::ALL {
        for grc in 1..7u8 {
            let lower = sail(&matrix, Grc::Class(grc), arc);
            let higher = sail(&matrix, Grc::Class(grc + 1), arc);
            assert!(lower.is_some() && higher.is_some());
            assert!(lower <= higher, "{} at GRC {} -> {}", arc, grc, grc + 1);
        }
    }
    for grc in 1..=7u8 {
        for pair in AirRiskClass::ALL.windows(2) {
            let lower = sail(&matrix, Grc::Class(grc), pair[0]);
            let higher = sail(&matrix, Grc::Class(grc), pair[1]);
            assert!(lower <= higher, "GRC {}: {} -> {}", grc, pair[0], pair[1]);
        }
    }
}

#[test]
fn test_final_grc_never_below_one() {
    let tables = ReferenceTables::sora_2_5();
    let selections = all_selections();
    assert_eq!(selections.len(), 625);
    for population in PopulationCategory::ALL {
        for ua in UaCharacteristic::ALL {
            let intrinsic = intrinsic_grc(&tables, population, ua);
            for s in &selections {
                let outcome = final_grc(&tables, intrinsic, s);
                match outcome.final_grc {
                    Grc::Class(v) => assert!(v >= 1),
                    Grc::OutOfScope => assert_eq!(intrinsic, Grc::OutOfScope),
                }
                assert!(outcome.final_grc <= intrinsic);
            }
        }
    }
}

#[test]
fn test_out_of_scope_propagates() {
    let tables = ReferenceTables::sora_2_5();
    for population in PopulationCategory::ALL {
        for ua in UaCharacteristic::ALL {
            let intrinsic = intrinsic_grc(&tables, population, ua);
            if intrinsic != Grc::OutOfScope {
                continue;
            }
            for s in all_selections() {
                let outcome = final_grc(&tables, intrinsic, &s);
                assert_eq!(outcome.final_grc, Grc::OutOfScope);
                for arc in AirRiskClass::ALL {
                    assert_eq!(sail(&tables.sail, outcome.final_grc, arc), None);
                }
            }
        }
    }
}

#[test]
fn test_residual_arc_never_above_initial() {
    let tables = ReferenceTables::sora_2_5();
    for initial in AirRiskClass::ALL {
        for kind in TmprType::ALL {
            for robustness in Robustness::ALL {
                for enabled in [false, true] {
                    let tmpr = TmprSelection {
                        enabled,
                        kind,
                        robustness,
                        evidence_provided: false,
                    };
                    let outcome = residual_arc(&tables, initial, &tmpr);
                    assert!(outcome.residual_arc <= initial);
                    assert_eq!(
                        outcome.steps_reduced as usize,
                        initial.index() - outcome.residual_arc.index()
                    );
                }
            }
        }
    }
}

#[test]
fn test_adjacent_area_distance_bounds() {
    let speeds = [
        -10.0,
        0.0,
        0.5,
        10.0,
        27.7,
        150.0,
        194.4,
        500.0,
        f64::NAN,
        f64::INFINITY,
    ];
    for speed in speeds {
        let d = adjacent_area_distance(speed);
        assert!((5_000.0..=35_000.0).contains(&d), "{} -> {}", speed, d);
    }
}

#[test]
fn test_containment_defined_for_every_cell() {
    let tables = ReferenceTables::sora_2_5();
    for population in PopulationCategory::ALL {
        for pair in Sail::ALL.windows(2) {
            let lower = required_containment(&tables.containment, population, pair[0]);
            let higher = required_containment(&tables.containment, population, pair[1]);
            assert!(lower != Robustness::None);
            assert!(lower <= higher);
        }
    }
}

#[test]
fn test_optional_oso_always_compliant() {
    let tables = ReferenceTables::sora_2_5();
    let mut optional_cells = 0;
    for oso in &tables.oso {
        for s in Sail::ALL {
            if oso.required_for(s) != OsoLevel::Optional {
                continue;
            }
            optional_cells += 1;
            for declared in Robustness::ALL {
                let check = check_compliance(oso, s, declared);
                assert!(check.compliant);
                assert_eq!(check.gap, 0);
            }
        }
    }
    assert!(optional_cells > 0);
}

#[test]
fn test_check_all_order_is_stable() {
    let tables = ReferenceTables::sora_2_5();
    let declared = BTreeMap::new();
    let first = check_all(&tables.oso, Sail::IV, &declared);
    let second = check_all(&tables.oso, Sail::IV, &declared);
    assert_eq!(first, second);

    let ids: Vec<&str> = first.results.iter().map(|r| r.id.as_str()).collect();
    let catalog: Vec<String> = tables.oso.iter().map(|o| o.id()).collect();
    assert_eq!(ids, catalog);
}

#[test]
fn test_evaluation_is_idempotent() {
    let engine = SoraEngine::sora_2_5();
    let mut input = AssessmentInput {
        population: "lightly".to_string(),
        ua_characteristic: "8m_75ms".to_string(),
        initial_arc: "ARC-d".to_string(),
        ..Default::default()
    };
    input.enable_mitigation(MitigationId::M1B, Robustness::Medium);
    input.enable_tmpr(TmprType::Daa, Robustness::High);
    input.declare_oso(3, Robustness::Medium, "");

    let first = render_json(&engine.evaluate(&input));
    for _ in 0..10 {
        assert_eq!(render_json(&engine.evaluate(&input)), first);
    }
}
