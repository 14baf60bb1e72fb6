//! Residual air risk class calculation
//!
//! Global invariants enforced:
//! - A TMPR claim never raises the ARC
//! - Residual ARC never drops below the TMPR's floor

use crate::model::{AirRiskClass, Robustness, TmprType};
use crate::tables::ReferenceTables;
use crate::warning::Warning;
use serde::{Deserialize, Serialize};

/// Caller's tactical mitigation claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TmprSelection {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: TmprType,
    pub robustness: Robustness,
    /// Supporting evidence text was supplied with the claim
    #[serde(default)]
    pub evidence_provided: bool,
}

/// Residual ARC with the number of steps actually credited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirRiskOutcome {
    pub residual_arc: AirRiskClass,
    pub steps_reduced: u8,
    pub warning: Option<Warning>,
}

impl AirRiskOutcome {
    fn unchanged(initial: AirRiskClass) -> Self {
        AirRiskOutcome {
            residual_arc: initial,
            steps_reduced: 0,
            warning: None,
        }
    }
}

/// Apply a TMPR claim to the initial ARC
pub fn residual_arc(
    tables: &ReferenceTables,
    initial: AirRiskClass,
    tmpr: &TmprSelection,
) -> AirRiskOutcome {
    if !tmpr.enabled || tmpr.robustness == Robustness::None {
        return AirRiskOutcome::unchanged(initial);
    }

    let Some(definition) = tables.tmpr_definition(tmpr.kind) else {
        return AirRiskOutcome::unchanged(initial);
    };

    if tmpr.robustness < definition.min_robustness {
        return AirRiskOutcome {
            warning: Some(Warning::TmprRobustnessInsufficient {
                tmpr: tmpr.kind,
                declared: tmpr.robustness,
                minimum: definition.min_robustness,
            }),
            ..AirRiskOutcome::unchanged(initial)
        };
    }

    let current = initial.index();
    let floor = definition.floor.index();
    if current <= floor {
        return AirRiskOutcome::unchanged(initial);
    }

    let reduced = current
        .saturating_sub(definition.reduction as usize)
        .max(floor);
    let residual = AirRiskClass::from_index(reduced).unwrap_or(initial);

    AirRiskOutcome {
        residual_arc: residual,
        steps_reduced: (current - reduced) as u8,
        warning: None,
    }
}
