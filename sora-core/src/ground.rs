//! Ground risk class calculation
//!
//! Global invariants enforced:
//! - Out-of-scope intrinsic GRC propagates unchanged
//! - Mitigations only ever lower GRC, and never below 1
//! - No ceiling: a final GRC above 7 is the out-of-scope signal for SAIL

use crate::model::{Grc, MitigationId, PopulationCategory, Robustness, UaCharacteristic};
use crate::tables::ReferenceTables;
use crate::warning::Warning;
use serde::{Deserialize, Serialize};

/// Lowest reachable GRC (controlled ground area equivalent)
pub const GRC_FLOOR: u8 = 1;

/// Caller's claim for one ground mitigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MitigationSelection {
    pub enabled: bool,
    pub robustness: Robustness,
    /// Supporting evidence text was supplied with the claim
    #[serde(default)]
    pub evidence_provided: bool,
}

impl MitigationSelection {
    pub fn at(robustness: Robustness) -> Self {
        MitigationSelection {
            enabled: true,
            robustness,
            evidence_provided: false,
        }
    }

    pub fn with_evidence(mut self) -> Self {
        self.evidence_provided = true;
        self
    }

    fn is_claimed(&self) -> bool {
        self.enabled && self.robustness != Robustness::None
    }
}

/// Claims for all four ground mitigations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MitigationSelections {
    pub m1a: MitigationSelection,
    pub m1b: MitigationSelection,
    pub m1c: MitigationSelection,
    pub m2: MitigationSelection,
}

impl MitigationSelections {
    pub fn get(&self, id: MitigationId) -> MitigationSelection {
        match id {
            MitigationId::M1A => self.m1a,
            MitigationId::M1B => self.m1b,
            MitigationId::M1C => self.m1c,
            MitigationId::M2 => self.m2,
        }
    }

    pub fn set(&mut self, id: MitigationId, selection: MitigationSelection) {
        match id {
            MitigationId::M1A => self.m1a = selection,
            MitigationId::M1B => self.m1b = selection,
            MitigationId::M1C => self.m1c = selection,
            MitigationId::M2 => self.m2 = selection,
        }
    }
}

/// Credited contribution of one enabled mitigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMitigation {
    pub id: MitigationId,
    pub robustness: Robustness,
    /// Non-positive GRC adjustment actually credited
    pub reduction: i8,
    pub evidence_provided: bool,
}

/// Final GRC together with how it was reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundRiskOutcome {
    pub final_grc: Grc,
    pub applied: Vec<AppliedMitigation>,
    pub warnings: Vec<Warning>,
}

/// Intrinsic GRC for an operation, before any mitigation
pub fn intrinsic_grc(
    tables: &ReferenceTables,
    population: PopulationCategory,
    ua: UaCharacteristic,
) -> Grc {
    tables.intrinsic_grc.lookup(population, ua)
}

/// Apply enabled ground mitigations to an intrinsic GRC
///
/// Rules, in order:
/// 1. Out-of-scope input is returned as is
/// 2. Each claimed mitigation contributes its tier's reduction; a tier the
///    mitigation does not offer contributes zero and yields `UnsupportedTier`
/// 3. Exclusion rules zero the excluded mitigation and yield
///    `ConflictingMitigations` whenever it is enabled, even at "none"
/// 4. The sum is floored at `GRC_FLOOR`
pub fn final_grc(
    tables: &ReferenceTables,
    intrinsic: Grc,
    selections: &MitigationSelections,
) -> GroundRiskOutcome {
    let base = match intrinsic {
        Grc::Class(v) => v,
        Grc::OutOfScope => {
            return GroundRiskOutcome {
                final_grc: Grc::OutOfScope,
                applied: Vec::new(),
                warnings: Vec::new(),
            }
        }
    };

    let mut applied = Vec::new();
    let mut warnings = Vec::new();

    for id in MitigationId::ALL {
        let selection = selections.get(id);
        if !selection.is_claimed() {
            continue;
        }
        let Some(definition) = tables.mitigation(id) else {
            continue;
        };
        let reduction = match definition.tiers.reduction(selection.robustness) {
            Some(r) => r,
            None => {
                warnings.push(Warning::UnsupportedTier {
                    mitigation: id,
                    robustness: selection.robustness,
                    supported: definition.tiers.supported_tiers(),
                });
                0
            }
        };
        applied.push(AppliedMitigation {
            id,
            robustness: selection.robustness,
            reduction,
            evidence_provided: selection.evidence_provided,
        });
    }

    for rule in &tables.mitigation_exclusions {
        let primary = selections.get(rule.primary);
        if !primary.is_claimed() || primary.robustness != rule.primary_tier {
            continue;
        }
        if !selections.get(rule.excluded).enabled {
            continue;
        }
        if let Some(excluded) = applied.iter_mut().find(|a| a.id == rule.excluded) {
            excluded.reduction = 0;
        }
        warnings.push(Warning::ConflictingMitigations {
            kept: rule.primary,
            kept_robustness: primary.robustness,
            zeroed: rule.excluded,
        });
    }

    let total: i16 = applied.iter().map(|a| a.reduction as i16).sum();
    let value = (base as i16 + total).max(GRC_FLOOR as i16);

    GroundRiskOutcome {
        final_grc: Grc::Class(value as u8),
        applied,
        warnings,
    }
}
