//! Reference data tables
//!
//! One internally consistent table set ships with the crate: the SORA 2.5
//! tables returned by [`ReferenceTables::sora_2_5`]. Alternate sets (future
//! revisions, test fixtures) are loaded from JSON and validated before use.
//!
//! Global invariants enforced:
//! - Tables are immutable once constructed and injected explicitly
//! - Intrinsic GRC, SAIL and containment matrices are monotonic in both axes
//! - Lookups of missing cells fall back to a documented value, never panic

use crate::error::TableError;
use crate::model::{
    AirRiskClass, Grc, MitigationId, OsoLevel, PopulationCategory, Robustness, Sail, TmprType,
    UaCharacteristic,
};
use crate::oso_catalog;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Population density category description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationDefinition {
    pub category: PopulationCategory,
    pub label: String,
    /// Upper density bound in people/km² (`None` = unbounded)
    pub max_density: Option<u32>,
    pub description: String,
}

/// UA size/speed envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UaDefinition {
    pub class: UaCharacteristic,
    pub max_dimension_m: f64,
    pub max_speed_ms: f64,
}

/// (population × UA class) → intrinsic GRC
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntrinsicGrcMatrix(BTreeMap<PopulationCategory, BTreeMap<UaCharacteristic, Grc>>);

impl IntrinsicGrcMatrix {
    /// Build from rows whose cells follow `UaCharacteristic::ALL` order
    pub fn from_rows(rows: &[(PopulationCategory, [Grc; 5])]) -> Self {
        let mut cells = BTreeMap::new();
        for (population, row) in rows {
            let row_map = UaCharacteristic::ALL
                .iter()
                .copied()
                .zip(row.iter().copied())
                .collect();
            cells.insert(*population, row_map);
        }
        IntrinsicGrcMatrix(cells)
    }

    pub fn get(&self, population: PopulationCategory, ua: UaCharacteristic) -> Option<Grc> {
        self.0.get(&population).and_then(|row| row.get(&ua)).copied()
    }

    /// Cell value with missing entries treated as out of scope
    pub fn lookup(&self, population: PopulationCategory, ua: UaCharacteristic) -> Grc {
        self.get(population, ua).unwrap_or(Grc::OutOfScope)
    }

    pub fn set(&mut self, population: PopulationCategory, ua: UaCharacteristic, grc: Grc) {
        self.0.entry(population).or_default().insert(ua, grc);
    }

    pub fn remove(&mut self, population: PopulationCategory, ua: UaCharacteristic) -> Option<Grc> {
        self.0.get_mut(&population).and_then(|row| row.remove(&ua))
    }
}

/// (final GRC 1..=7 × residual ARC) → SAIL
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SailMatrix(BTreeMap<u8, BTreeMap<AirRiskClass, Sail>>);

impl SailMatrix {
    /// Build from rows whose cells follow `AirRiskClass::ALL` order
    pub fn from_rows(rows: &[(u8, [Sail; 4])]) -> Self {
        let mut cells = BTreeMap::new();
        for (grc, row) in rows {
            let row_map = AirRiskClass::ALL
                .iter()
                .copied()
                .zip(row.iter().copied())
                .collect();
            cells.insert(*grc, row_map);
        }
        SailMatrix(cells)
    }

    pub fn get(&self, grc: u8, arc: AirRiskClass) -> Option<Sail> {
        self.0.get(&grc).and_then(|row| row.get(&arc)).copied()
    }

    pub fn set(&mut self, grc: u8, arc: AirRiskClass, sail: Sail) {
        self.0.entry(grc).or_default().insert(arc, sail);
    }

    fn rows(&self) -> impl Iterator<Item = &u8> {
        self.0.keys()
    }
}

/// (adjacent population × SAIL) → required containment robustness
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainmentMatrix(BTreeMap<PopulationCategory, BTreeMap<Sail, Robustness>>);

impl ContainmentMatrix {
    /// Build from rows whose cells follow `Sail::ALL` order
    pub fn from_rows(rows: &[(PopulationCategory, [Robustness; 6])]) -> Self {
        let mut cells = BTreeMap::new();
        for (population, row) in rows {
            let row_map = Sail::ALL.iter().copied().zip(row.iter().copied()).collect();
            cells.insert(*population, row_map);
        }
        ContainmentMatrix(cells)
    }

    pub fn get(&self, population: PopulationCategory, sail: Sail) -> Option<Robustness> {
        self.0.get(&population).and_then(|row| row.get(&sail)).copied()
    }

    pub fn set(&mut self, population: PopulationCategory, sail: Sail, required: Robustness) {
        self.0.entry(population).or_default().insert(sail, required);
    }
}

/// Robustness tiers a ground mitigation offers, with their GRC reductions
///
/// Each variant carries only the tiers the mitigation supports, so a tier that
/// does not exist (e.g. sheltering at high) is absent rather than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "id")]
pub enum MitigationTiers {
    /// M1(A) strategic mitigation: sheltering
    #[serde(rename = "M1A")]
    Sheltering { low: i8, medium: i8 },
    /// M1(B) strategic mitigation: operational restrictions
    #[serde(rename = "M1B")]
    OperationalRestriction { medium: i8, high: i8 },
    /// M1(C) tactical mitigation: ground observation
    #[serde(rename = "M1C")]
    GroundObservation { low: i8 },
    /// M2 effects of ground impact are reduced
    #[serde(rename = "M2")]
    ImpactDynamics { medium: i8, high: i8 },
}

impl MitigationTiers {
    pub fn id(&self) -> MitigationId {
        match self {
            MitigationTiers::Sheltering { .. } => MitigationId::M1A,
            MitigationTiers::OperationalRestriction { .. } => MitigationId::M1B,
            MitigationTiers::GroundObservation { .. } => MitigationId::M1C,
            MitigationTiers::ImpactDynamics { .. } => MitigationId::M2,
        }
    }

    /// GRC reduction for a tier, `None` when the tier is not offered
    pub fn reduction(&self, tier: Robustness) -> Option<i8> {
        match (*self, tier) {
            (MitigationTiers::Sheltering { low, .. }, Robustness::Low) => Some(low),
            (MitigationTiers::Sheltering { medium, .. }, Robustness::Medium) => Some(medium),
            (MitigationTiers::OperationalRestriction { medium, .. }, Robustness::Medium) => {
                Some(medium)
            }
            (MitigationTiers::OperationalRestriction { high, .. }, Robustness::High) => Some(high),
            (MitigationTiers::GroundObservation { low }, Robustness::Low) => Some(low),
            (MitigationTiers::ImpactDynamics { medium, .. }, Robustness::Medium) => Some(medium),
            (MitigationTiers::ImpactDynamics { high, .. }, Robustness::High) => Some(high),
            _ => None,
        }
    }

    pub fn supports(&self, tier: Robustness) -> bool {
        self.reduction(tier).is_some()
    }

    /// Offered tiers in ascending robustness order
    pub fn supported_tiers(&self) -> Vec<Robustness> {
        Robustness::ALL
            .iter()
            .copied()
            .filter(|tier| self.supports(*tier))
            .collect()
    }

    fn reductions(&self) -> Vec<(&'static str, i8)> {
        match *self {
            MitigationTiers::Sheltering { low, medium } => vec![("low", low), ("medium", medium)],
            MitigationTiers::OperationalRestriction { medium, high } => {
                vec![("medium", medium), ("high", high)]
            }
            MitigationTiers::GroundObservation { low } => vec![("low", low)],
            MitigationTiers::ImpactDynamics { medium, high } => {
                vec![("medium", medium), ("high", high)]
            }
        }
    }
}

/// Ground mitigation catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationDefinition {
    pub name: String,
    #[serde(flatten)]
    pub tiers: MitigationTiers,
}

impl MitigationDefinition {
    pub fn id(&self) -> MitigationId {
        self.tiers.id()
    }
}

/// `primary` claimed at `primary_tier` forbids crediting `excluded`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MitigationExclusion {
    pub primary: MitigationId,
    pub primary_tier: Robustness,
    pub excluded: MitigationId,
}

/// Air risk class description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcDefinition {
    pub class: AirRiskClass,
    pub label: String,
    pub description: String,
}

/// Tactical mitigation definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmprDefinition {
    #[serde(rename = "type")]
    pub kind: TmprType,
    pub label: String,
    /// ARC steps removed when the claim is accepted
    pub reduction: u8,
    pub min_robustness: Robustness,
    /// Lowest residual ARC this mitigation can reach
    pub floor: AirRiskClass,
}

/// OSO responsible party
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsibleParty {
    Operator,
    Designer,
    TrainingOrganisation,
    OperatorAndDesigner,
}

impl ResponsibleParty {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponsibleParty::Operator => "operator",
            ResponsibleParty::Designer => "designer",
            ResponsibleParty::TrainingOrganisation => "training_organisation",
            ResponsibleParty::OperatorAndDesigner => "operator_and_designer",
        }
    }
}

/// OSO threat category, in catalog presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsoCategory {
    TechnicalIssue,
    ExternalSystems,
    HumanError,
    AdverseConditions,
}

impl OsoCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsoCategory::TechnicalIssue => "technical_issue",
            OsoCategory::ExternalSystems => "external_systems",
            OsoCategory::HumanError => "human_error",
            OsoCategory::AdverseConditions => "adverse_conditions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OsoCategory::TechnicalIssue => "Technical issue with the UAS",
            OsoCategory::ExternalSystems => "Deterioration of external systems",
            OsoCategory::HumanError => "Human error",
            OsoCategory::AdverseConditions => "Adverse operating conditions",
        }
    }
}

/// What evidence satisfies each robustness tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceGuidance {
    pub low: String,
    pub medium: String,
    pub high: String,
}

/// Operational safety objective catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsoDefinition {
    pub number: u8,
    pub category: OsoCategory,
    pub name: String,
    /// Required level for SAIL I..=VI
    pub required: [OsoLevel; 6],
    pub responsible: ResponsibleParty,
    pub guidance: EvidenceGuidance,
}

impl OsoDefinition {
    /// Canonical identifier, e.g. `OSO#05`
    pub fn id(&self) -> String {
        format!("OSO#{:02}", self.number)
    }

    pub fn required_for(&self, sail: Sail) -> OsoLevel {
        self.required[sail.index()]
    }

    pub fn guidance_for(&self, robustness: Robustness) -> Option<&str> {
        match robustness {
            Robustness::None => None,
            Robustness::Low => Some(&self.guidance.low),
            Robustness::Medium => Some(&self.guidance.medium),
            Robustness::High => Some(&self.guidance.high),
        }
    }
}

/// Every reference table the engine consults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceTables {
    pub revision: String,
    pub populations: Vec<PopulationDefinition>,
    pub ua_characteristics: Vec<UaDefinition>,
    pub intrinsic_grc: IntrinsicGrcMatrix,
    pub mitigations: Vec<MitigationDefinition>,
    #[serde(default)]
    pub mitigation_exclusions: Vec<MitigationExclusion>,
    pub air_risk_classes: Vec<ArcDefinition>,
    pub tmpr: Vec<TmprDefinition>,
    pub sail: SailMatrix,
    pub containment: ContainmentMatrix,
    pub oso: Vec<OsoDefinition>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::sora_2_5()
    }
}

impl ReferenceTables {
    /// The SORA 2.5 table set
    pub fn sora_2_5() -> Self {
        ReferenceTables {
            revision: "SORA 2.5".to_string(),
            populations: sora_2_5_populations(),
            ua_characteristics: sora_2_5_ua_characteristics(),
            intrinsic_grc: sora_2_5_intrinsic_grc(),
            mitigations: sora_2_5_mitigations(),
            mitigation_exclusions: vec![MitigationExclusion {
                primary: MitigationId::M1A,
                primary_tier: Robustness::Medium,
                excluded: MitigationId::M1B,
            }],
            air_risk_classes: sora_2_5_air_risk_classes(),
            tmpr: sora_2_5_tmpr(),
            sail: sora_2_5_sail(),
            containment: sora_2_5_containment(),
            oso: oso_catalog::sora_2_5_catalog(),
        }
    }

    /// Parse and validate a table set from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: ReferenceTables =
            serde_json::from_str(json).context("failed to parse reference tables")?;
        tables
            .validate()
            .context("reference tables failed validation")?;
        Ok(tables)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize reference tables")
    }

    pub fn population(&self, category: PopulationCategory) -> Option<&PopulationDefinition> {
        self.populations.iter().find(|p| p.category == category)
    }

    pub fn ua(&self, class: UaCharacteristic) -> Option<&UaDefinition> {
        self.ua_characteristics.iter().find(|u| u.class == class)
    }

    pub fn mitigation(&self, id: MitigationId) -> Option<&MitigationDefinition> {
        self.mitigations.iter().find(|m| m.id() == id)
    }

    pub fn tmpr_definition(&self, kind: TmprType) -> Option<&TmprDefinition> {
        self.tmpr.iter().find(|t| t.kind == kind)
    }

    pub fn oso_definition(&self, number: u8) -> Option<&OsoDefinition> {
        self.oso.iter().find(|o| o.number == number)
    }

    /// Check every structural invariant; the first violation is returned
    pub fn validate(&self) -> std::result::Result<(), TableError> {
        self.validate_populations()?;
        self.validate_ua()?;
        self.validate_intrinsic_grc()?;
        self.validate_mitigations()?;
        self.validate_tmpr()?;
        self.validate_sail()?;
        self.validate_containment()?;
        self.validate_oso()?;
        Ok(())
    }

    fn validate_populations(&self) -> std::result::Result<(), TableError> {
        let mut seen = BTreeSet::new();
        for p in &self.populations {
            if !seen.insert(p.category) {
                return Err(TableError::DuplicatePopulation(p.category));
            }
        }
        Ok(())
    }

    fn validate_ua(&self) -> std::result::Result<(), TableError> {
        for ua in &self.ua_characteristics {
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !valid(ua.max_dimension_m) || !valid(ua.max_speed_ms) {
                return Err(TableError::InvalidUaEnvelope(ua.class));
            }
        }
        Ok(())
    }

    fn validate_intrinsic_grc(&self) -> std::result::Result<(), TableError> {
        for population in PopulationCategory::ALL {
            for ua in UaCharacteristic::ALL {
                if let Some(Grc::Class(value)) = self.intrinsic_grc.get(population, ua) {
                    if !(1..=10).contains(&value) {
                        return Err(TableError::GrcOutOfRange {
                            population,
                            ua,
                            value,
                        });
                    }
                }
            }
        }

        // Denser population never lowers GRC
        for ua in UaCharacteristic::ALL {
            for pair in PopulationCategory::ALL.windows(2) {
                let lower = self.intrinsic_grc.lookup(pair[0], ua);
                let upper = self.intrinsic_grc.lookup(pair[1], ua);
                if upper < lower {
                    return Err(TableError::IntrinsicGrcNotMonotonic {
                        from: format!("{}/{}", pair[0], ua),
                        to: format!("{}/{}", pair[1], ua),
                    });
                }
            }
        }

        // Larger/faster UA never lowers GRC
        for population in PopulationCategory::ALL {
            for pair in UaCharacteristic::ALL.windows(2) {
                let lower = self.intrinsic_grc.lookup(population, pair[0]);
                let upper = self.intrinsic_grc.lookup(population, pair[1]);
                if upper < lower {
                    return Err(TableError::IntrinsicGrcNotMonotonic {
                        from: format!("{}/{}", population, pair[0]),
                        to: format!("{}/{}", population, pair[1]),
                    });
                }
            }
        }

        Ok(())
    }

    fn validate_mitigations(&self) -> std::result::Result<(), TableError> {
        let mut seen = BTreeSet::new();
        for m in &self.mitigations {
            let id = m.id();
            if !seen.insert(id) {
                return Err(TableError::DuplicateMitigation(id));
            }
            for (tier, value) in m.tiers.reductions() {
                if value > 0 {
                    return Err(TableError::PositiveReduction { id, tier, value });
                }
            }
        }
        for id in MitigationId::ALL {
            if !seen.contains(&id) {
                return Err(TableError::MissingMitigation(id));
            }
        }
        for rule in &self.mitigation_exclusions {
            if rule.primary == rule.excluded {
                return Err(TableError::SelfExclusion(rule.primary));
            }
        }
        Ok(())
    }

    fn validate_tmpr(&self) -> std::result::Result<(), TableError> {
        let mut seen = BTreeSet::new();
        for t in &self.tmpr {
            if !seen.insert(t.kind) {
                return Err(TableError::DuplicateTmpr(t.kind));
            }
            if t.reduction == 0 || t.min_robustness == Robustness::None {
                return Err(TableError::DegenerateTmpr { kind: t.kind });
            }
            if t.floor > AirRiskClass::C {
                return Err(TableError::UnreachableTmprFloor {
                    kind: t.kind,
                    floor: t.floor,
                });
            }
        }
        for kind in TmprType::ALL {
            if !seen.contains(&kind) {
                return Err(TableError::MissingTmpr(kind));
            }
        }
        Ok(())
    }

    fn validate_sail(&self) -> std::result::Result<(), TableError> {
        for grc in self.sail.rows() {
            if !(1..=7).contains(grc) {
                return Err(TableError::SailRowOutOfRange(*grc));
            }
        }

        // Missing cells resolve to out of scope, which ranks above SAIL VI
        let rank = |grc: u8, arc: AirRiskClass| {
            self.sail.get(grc, arc).map(|s| s.index()).unwrap_or(usize::MAX)
        };

        for arc in AirRiskClass::ALL {
            for grc in 1..7u8 {
                if rank(grc + 1, arc) < rank(grc, arc) {
                    return Err(TableError::SailNotMonotonic {
                        from: format!("GRC {}/{}", grc, arc),
                        to: format!("GRC {}/{}", grc + 1, arc),
                    });
                }
            }
        }
        for grc in 1..=7u8 {
            for pair in AirRiskClass::ALL.windows(2) {
                if rank(grc, pair[1]) < rank(grc, pair[0]) {
                    return Err(TableError::SailNotMonotonic {
                        from: format!("GRC {}/{}", grc, pair[0]),
                        to: format!("GRC {}/{}", grc, pair[1]),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_containment(&self) -> std::result::Result<(), TableError> {
        let cell = |p: PopulationCategory, s: Sail| {
            self.containment.get(p, s).unwrap_or(Robustness::Low)
        };

        for population in PopulationCategory::ALL {
            for sail in Sail::ALL {
                if self.containment.get(population, sail) == Some(Robustness::None) {
                    return Err(TableError::ContainmentRequiresNone { population, sail });
                }
            }
            for pair in Sail::ALL.windows(2) {
                if cell(population, pair[1]) < cell(population, pair[0]) {
                    return Err(TableError::ContainmentNotMonotonic {
                        from: format!("{}/SAIL {}", population, pair[0]),
                        to: format!("{}/SAIL {}", population, pair[1]),
                    });
                }
            }
        }
        for sail in Sail::ALL {
            for pair in PopulationCategory::ALL.windows(2) {
                if cell(pair[1], sail) < cell(pair[0], sail) {
                    return Err(TableError::ContainmentNotMonotonic {
                        from: format!("{}/SAIL {}", pair[0], sail),
                        to: format!("{}/SAIL {}", pair[1], sail),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_oso(&self) -> std::result::Result<(), TableError> {
        if self.oso.is_empty() {
            return Err(TableError::EmptyOsoCatalog);
        }
        let mut seen = BTreeSet::new();
        for oso in &self.oso {
            if !seen.insert(oso.number) {
                return Err(TableError::DuplicateOso(oso.number));
            }
            if oso.required.windows(2).any(|pair| pair[1] < pair[0]) {
                return Err(TableError::OsoNotMonotonic(oso.number));
            }
        }
        Ok(())
    }
}

/// Load and validate a table set from a JSON file
pub fn load_tables_file(path: &Path) -> Result<ReferenceTables> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read reference tables: {}", path.display()))?;
    let tables = ReferenceTables::from_json(&content)
        .with_context(|| format!("invalid reference tables in: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        revision = %tables.revision,
        osos = tables.oso.len(),
        "loaded reference tables"
    );
    Ok(tables)
}

fn sora_2_5_populations() -> Vec<PopulationDefinition> {
    let entry = |category, label: &str, max_density, description: &str| PopulationDefinition {
        category,
        label: label.to_string(),
        max_density,
        description: description.to_string(),
    };
    vec![
        entry(
            PopulationCategory::Controlled,
            "Controlled ground area",
            Some(0),
            "Only persons involved in the operation are present",
        ),
        entry(
            PopulationCategory::Remote,
            "Remote",
            Some(5),
            "Fewer than 5 people per km², e.g. deserts, open sea, high mountains",
        ),
        entry(
            PopulationCategory::Lightly,
            "Lightly populated",
            Some(50),
            "Fewer than 50 people per km², e.g. farmland with isolated dwellings",
        ),
        entry(
            PopulationCategory::Sparsely,
            "Sparsely populated",
            Some(500),
            "Fewer than 500 people per km², e.g. villages and rural residential areas",
        ),
        entry(
            PopulationCategory::Suburban,
            "Suburban",
            Some(5_000),
            "Fewer than 5,000 people per km², e.g. residential suburbs and small towns",
        ),
        entry(
            PopulationCategory::HighDensity,
            "High density metropolitan",
            Some(50_000),
            "Fewer than 50,000 people per km², e.g. city centres and dense districts",
        ),
        entry(
            PopulationCategory::Assembly,
            "Assemblies of people",
            None,
            "More than 50,000 people per km², e.g. stadiums, concerts, festivals",
        ),
    ]
}

fn sora_2_5_ua_characteristics() -> Vec<UaDefinition> {
    [
        (UaCharacteristic::OneMetre, 1.0, 25.0),
        (UaCharacteristic::ThreeMetres, 3.0, 35.0),
        (UaCharacteristic::EightMetres, 8.0, 75.0),
        (UaCharacteristic::TwentyMetres, 20.0, 120.0),
        (UaCharacteristic::FortyMetres, 40.0, 200.0),
    ]
    .into_iter()
    .map(|(class, max_dimension_m, max_speed_ms)| UaDefinition {
        class,
        max_dimension_m,
        max_speed_ms,
    })
    .collect()
}

fn sora_2_5_intrinsic_grc() -> IntrinsicGrcMatrix {
    use Grc::{Class as C, OutOfScope as X};
    use PopulationCategory::*;

    IntrinsicGrcMatrix::from_rows(&[
        (Controlled, [C(1), C(1), C(2), C(3), C(3)]),
        (Remote, [C(2), C(3), C(4), C(5), C(6)]),
        (Lightly, [C(3), C(4), C(5), C(6), C(7)]),
        (Sparsely, [C(4), C(5), C(6), C(7), C(8)]),
        (Suburban, [C(5), C(6), C(7), C(8), C(9)]),
        (HighDensity, [C(6), C(7), C(8), C(9), C(10)]),
        (Assembly, [C(7), C(8), X, X, X]),
    ])
}

fn sora_2_5_mitigations() -> Vec<MitigationDefinition> {
    vec![
        MitigationDefinition {
            name: "Strategic mitigation: sheltering".to_string(),
            tiers: MitigationTiers::Sheltering { low: -1, medium: -2 },
        },
        MitigationDefinition {
            name: "Strategic mitigation: operational restrictions".to_string(),
            tiers: MitigationTiers::OperationalRestriction { medium: -1, high: -2 },
        },
        MitigationDefinition {
            name: "Tactical mitigation: ground observation".to_string(),
            tiers: MitigationTiers::GroundObservation { low: -1 },
        },
        MitigationDefinition {
            name: "Effects of ground impact are reduced".to_string(),
            tiers: MitigationTiers::ImpactDynamics { medium: -1, high: -2 },
        },
    ]
}

fn sora_2_5_air_risk_classes() -> Vec<ArcDefinition> {
    let entry = |class, label: &str, description: &str| ArcDefinition {
        class,
        label: label.to_string(),
        description: description.to_string(),
    };
    vec![
        entry(
            AirRiskClass::A,
            "ARC-a",
            "Atypical or segregated airspace where manned encounters are negligible",
        ),
        entry(
            AirRiskClass::B,
            "ARC-b",
            "Low encounter likelihood, e.g. uncontrolled airspace below 500 ft over rural areas",
        ),
        entry(
            AirRiskClass::C,
            "ARC-c",
            "Medium encounter likelihood, e.g. controlled airspace or near aerodromes",
        ),
        entry(
            AirRiskClass::D,
            "ARC-d",
            "High encounter likelihood, e.g. airport environments above 500 ft",
        ),
    ]
}

fn sora_2_5_tmpr() -> Vec<TmprDefinition> {
    vec![
        TmprDefinition {
            kind: TmprType::Vlos,
            label: "Visual line of sight".to_string(),
            reduction: 1,
            min_robustness: Robustness::Low,
            floor: AirRiskClass::B,
        },
        TmprDefinition {
            kind: TmprType::Evlos,
            label: "Extended visual line of sight with airspace observers".to_string(),
            reduction: 1,
            min_robustness: Robustness::Medium,
            floor: AirRiskClass::B,
        },
        TmprDefinition {
            kind: TmprType::Daa,
            label: "Detect and avoid".to_string(),
            reduction: 2,
            min_robustness: Robustness::Medium,
            floor: AirRiskClass::A,
        },
    ]
}

fn sora_2_5_sail() -> SailMatrix {
    use Sail::*;

    SailMatrix::from_rows(&[
        (1, [I, II, IV, VI]),
        (2, [I, II, IV, VI]),
        (3, [II, II, IV, VI]),
        (4, [III, III, IV, VI]),
        (5, [IV, IV, IV, VI]),
        (6, [V, V, V, VI]),
        (7, [VI, VI, VI, VI]),
    ])
}

fn sora_2_5_containment() -> ContainmentMatrix {
    use PopulationCategory::*;
    use Robustness::{High as H, Low as L, Medium as M};

    ContainmentMatrix::from_rows(&[
        (Controlled, [L, L, L, L, L, L]),
        (Remote, [L, L, L, L, L, M]),
        (Lightly, [L, L, L, L, M, M]),
        (Sparsely, [L, L, L, M, M, H]),
        (Suburban, [L, L, M, M, H, H]),
        (HighDensity, [M, M, M, H, H, H]),
        (Assembly, [H, H, H, H, H, H]),
    ])
}
