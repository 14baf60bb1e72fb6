//! Caller-owned assessment input
//!
//! The input mirrors what an editing surface holds: plain string keys that may
//! be transiently incomplete. Resolution turns it into typed selections,
//! substituting documented defaults and recording an `UnknownKey` warning for
//! every key that does not match.

use crate::air::TmprSelection;
use crate::ground::{MitigationSelection, MitigationSelections};
use crate::model::{
    AirRiskClass, MitigationId, PopulationCategory, Robustness, TmprType, UaCharacteristic,
};
use crate::oso::OsoDeclaration;
use crate::warning::Warning;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_POPULATION: PopulationCategory = PopulationCategory::Sparsely;
pub const DEFAULT_UA: UaCharacteristic = UaCharacteristic::OneMetre;
pub const DEFAULT_ARC: AirRiskClass = AirRiskClass::B;
pub const DEFAULT_TMPR: TmprType = TmprType::Vlos;
/// Fallback for unrecognized (non-empty) robustness keys
pub const DEFAULT_ROBUSTNESS: Robustness = Robustness::Low;

/// One ground mitigation as entered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MitigationInput {
    pub enabled: bool,
    pub robustness: String,
    pub evidence: String,
}

impl Default for MitigationInput {
    fn default() -> Self {
        MitigationInput {
            enabled: false,
            robustness: Robustness::None.as_str().to_string(),
            evidence: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MitigationInputs {
    pub m1a: MitigationInput,
    pub m1b: MitigationInput,
    pub m1c: MitigationInput,
    pub m2: MitigationInput,
}

impl MitigationInputs {
    pub fn get(&self, id: MitigationId) -> &MitigationInput {
        match id {
            MitigationId::M1A => &self.m1a,
            MitigationId::M1B => &self.m1b,
            MitigationId::M1C => &self.m1c,
            MitigationId::M2 => &self.m2,
        }
    }

    pub fn get_mut(&mut self, id: MitigationId) -> &mut MitigationInput {
        match id {
            MitigationId::M1A => &mut self.m1a,
            MitigationId::M1B => &mut self.m1b,
            MitigationId::M1C => &mut self.m1c,
            MitigationId::M2 => &mut self.m2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TmprInput {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub robustness: String,
    pub evidence: String,
}

impl Default for TmprInput {
    fn default() -> Self {
        TmprInput {
            enabled: false,
            kind: DEFAULT_TMPR.as_str().to_string(),
            robustness: Robustness::None.as_str().to_string(),
            evidence: String::new(),
        }
    }
}

/// Robustness claim with its supporting evidence text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidencedRobustness {
    pub robustness: String,
    pub evidence: String,
}

impl Default for EvidencedRobustness {
    fn default() -> Self {
        EvidencedRobustness {
            robustness: Robustness::None.as_str().to_string(),
            evidence: String::new(),
        }
    }
}

impl EvidencedRobustness {
    pub fn new(robustness: Robustness, evidence: &str) -> Self {
        EvidencedRobustness {
            robustness: robustness.as_str().to_string(),
            evidence: evidence.to_string(),
        }
    }
}

/// Complete operational input snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentInput {
    pub population: String,
    pub ua_characteristic: String,
    pub mitigations: MitigationInputs,
    pub initial_arc: String,
    pub tmpr: TmprInput,
    pub adjacent_population: String,
    pub containment: EvidencedRobustness,
    /// Keyed by OSO identifier (`OSO#05`, `OSO05`, `5` are equivalent)
    pub oso: BTreeMap<String, EvidencedRobustness>,
}

impl Default for AssessmentInput {
    fn default() -> Self {
        AssessmentInput {
            population: DEFAULT_POPULATION.as_str().to_string(),
            ua_characteristic: DEFAULT_UA.as_str().to_string(),
            mitigations: MitigationInputs::default(),
            initial_arc: DEFAULT_ARC.as_str().to_string(),
            tmpr: TmprInput::default(),
            adjacent_population: DEFAULT_POPULATION.as_str().to_string(),
            containment: EvidencedRobustness::new(Robustness::Low, ""),
            oso: BTreeMap::new(),
        }
    }
}

/// Typed view of an `AssessmentInput`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub population: PopulationCategory,
    pub ua_characteristic: UaCharacteristic,
    pub mitigations: MitigationSelections,
    pub initial_arc: AirRiskClass,
    pub tmpr: TmprSelection,
    pub adjacent_population: PopulationCategory,
    pub containment: Robustness,
    pub containment_evidence: bool,
    /// Keyed by OSO number; ids that are not numbers are dropped with a warning
    pub oso: BTreeMap<u8, OsoDeclaration>,
}

/// Extract the OSO number from `OSO#05`, `oso-5`, `OSO05` or `5`
pub fn parse_oso_number(key: &str) -> Option<u8> {
    let upper = key.trim().to_ascii_uppercase();
    let digits = upper
        .strip_prefix("OSO")
        .unwrap_or(&upper)
        .trim_start_matches(&['#', '-', '_', ' '][..]);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn has_evidence(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Collects warnings while resolving keys
struct Resolver {
    warnings: Vec<Warning>,
}

impl Resolver {
    fn key<T: Copy>(
        &mut self,
        field: &str,
        value: &str,
        parse: impl Fn(&str) -> Option<T>,
        fallback: T,
        fallback_name: &str,
    ) -> T {
        match parse(value) {
            Some(v) => v,
            None => {
                self.warnings.push(Warning::UnknownKey {
                    field: field.to_string(),
                    value: value.to_string(),
                    fallback: fallback_name.to_string(),
                });
                fallback
            }
        }
    }

    /// Empty means "not selected yet" and is silently `none`
    fn robustness(&mut self, field: &str, value: &str) -> Robustness {
        if value.trim().is_empty() {
            return Robustness::None;
        }
        self.key(
            field,
            value,
            Robustness::parse,
            DEFAULT_ROBUSTNESS,
            DEFAULT_ROBUSTNESS.as_str(),
        )
    }
}

impl AssessmentInput {
    /// Resolve string keys into typed selections
    pub fn resolve(&self) -> (ResolvedInput, Vec<Warning>) {
        let mut r = Resolver {
            warnings: Vec::new(),
        };

        let population = r.key(
            "population",
            &self.population,
            PopulationCategory::parse,
            DEFAULT_POPULATION,
            DEFAULT_POPULATION.as_str(),
        );
        let ua_characteristic = r.key(
            "ua_characteristic",
            &self.ua_characteristic,
            UaCharacteristic::parse,
            DEFAULT_UA,
            DEFAULT_UA.as_str(),
        );

        let mut mitigations = MitigationSelections::default();
        for id in MitigationId::ALL {
            let entry = self.mitigations.get(id);
            let field = format!(
                "mitigations.{}.robustness",
                id.as_str().to_ascii_lowercase()
            );
            let robustness = r.robustness(&field, &entry.robustness);
            mitigations.set(
                id,
                MitigationSelection {
                    enabled: entry.enabled,
                    robustness,
                    evidence_provided: has_evidence(&entry.evidence),
                },
            );
        }

        let initial_arc = r.key(
            "initial_arc",
            &self.initial_arc,
            AirRiskClass::parse,
            DEFAULT_ARC,
            DEFAULT_ARC.as_str(),
        );

        let tmpr = TmprSelection {
            enabled: self.tmpr.enabled,
            kind: r.key(
                "tmpr.type",
                &self.tmpr.kind,
                TmprType::parse,
                DEFAULT_TMPR,
                DEFAULT_TMPR.as_str(),
            ),
            robustness: r.robustness("tmpr.robustness", &self.tmpr.robustness),
            evidence_provided: has_evidence(&self.tmpr.evidence),
        };

        let adjacent_population = r.key(
            "adjacent_population",
            &self.adjacent_population,
            PopulationCategory::parse,
            DEFAULT_POPULATION,
            DEFAULT_POPULATION.as_str(),
        );
        let containment = r.robustness("containment.robustness", &self.containment.robustness);

        let mut oso = BTreeMap::new();
        for (key, entry) in &self.oso {
            let Some(number) = parse_oso_number(key) else {
                r.warnings.push(Warning::UnknownKey {
                    field: "oso".to_string(),
                    value: key.clone(),
                    fallback: "ignored".to_string(),
                });
                continue;
            };
            let robustness = r.robustness(&format!("oso.{}.robustness", key), &entry.robustness);
            oso.insert(
                number,
                OsoDeclaration {
                    robustness,
                    evidence: entry.evidence.clone(),
                },
            );
        }

        let resolved = ResolvedInput {
            population,
            ua_characteristic,
            mitigations,
            initial_arc,
            tmpr,
            adjacent_population,
            containment,
            containment_evidence: has_evidence(&self.containment.evidence),
            oso,
        };
        (resolved, r.warnings)
    }

    /// Record an OSO claim, replacing any earlier one for the same OSO
    pub fn declare_oso(&mut self, number: u8, robustness: Robustness, evidence: &str) {
        self.oso.retain(|key, _| parse_oso_number(key) != Some(number));
        self.oso.insert(
            format!("OSO#{:02}", number),
            EvidencedRobustness::new(robustness, evidence),
        );
    }

    pub fn enable_mitigation(&mut self, id: MitigationId, robustness: Robustness) {
        let entry = self.mitigations.get_mut(id);
        entry.enabled = true;
        entry.robustness = robustness.as_str().to_string();
    }

    pub fn enable_tmpr(&mut self, kind: TmprType, robustness: Robustness) {
        self.tmpr.enabled = true;
        self.tmpr.kind = kind.as_str().to_string();
        self.tmpr.robustness = robustness.as_str().to_string();
    }
}
