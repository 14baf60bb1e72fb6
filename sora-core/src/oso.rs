//! OSO compliance evaluation
//!
//! Global invariants enforced:
//! - Results follow catalog order on every call
//! - An "O" requirement is always compliant and reported as optional
//! - Summaries are strictly derived from the per-OSO results

use crate::model::{OsoLevel, Robustness, Sail};
use crate::tables::{OsoCategory, OsoDefinition, ResponsibleParty};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Robustness the operator claims for one OSO
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OsoDeclaration {
    pub robustness: Robustness,
    #[serde(default)]
    pub evidence: String,
}

/// Single-OSO comparison of required and declared robustness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub required: OsoLevel,
    pub compliant: bool,
    /// Levels still missing (0 when compliant)
    pub gap: u8,
}

/// Partition an OSO falls into for a given SAIL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsoStatus {
    Compliant,
    NonCompliant,
    Optional,
}

impl OsoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsoStatus::Compliant => "compliant",
            OsoStatus::NonCompliant => "non_compliant",
            OsoStatus::Optional => "optional",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsoResult {
    pub id: String,
    pub name: String,
    pub category: OsoCategory,
    pub responsible: ResponsibleParty,
    pub required: OsoLevel,
    pub declared: Robustness,
    pub compliant: bool,
    pub gap: u8,
    pub status: OsoStatus,
    pub evidence_provided: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: OsoCategory,
    pub total: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub optional: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OsoSummary {
    pub total: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub optional: usize,
    /// Robustness claimed above "none" without any evidence text
    pub missing_evidence: usize,
    pub overall_compliant: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub non_compliant_ids: Vec<String>,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OsoReport {
    pub results: Vec<OsoResult>,
    pub summary: OsoSummary,
}

/// Compare a declared robustness against an OSO's requirement at a SAIL
pub fn check_compliance(
    definition: &OsoDefinition,
    sail: Sail,
    declared: Robustness,
) -> ComplianceCheck {
    let required = definition.required_for(sail);
    let required_level = required.level();
    let declared_level = declared.level();
    ComplianceCheck {
        required,
        compliant: required == OsoLevel::Optional || declared_level >= required_level,
        gap: required_level.saturating_sub(declared_level),
    }
}

/// Evaluate every catalog entry at a SAIL
///
/// OSOs absent from `declared` count as robustness "none".
pub fn check_all(
    catalog: &[OsoDefinition],
    sail: Sail,
    declared: &BTreeMap<u8, OsoDeclaration>,
) -> OsoReport {
    let results: Vec<OsoResult> = catalog
        .iter()
        .map(|definition| {
            let declaration = declared.get(&definition.number);
            let robustness = declaration.map(|d| d.robustness).unwrap_or_default();
            let evidence_provided = declaration
                .map(|d| !d.evidence.trim().is_empty())
                .unwrap_or(false);
            let check = check_compliance(definition, sail, robustness);
            let status = if check.required == OsoLevel::Optional {
                OsoStatus::Optional
            } else if check.compliant {
                OsoStatus::Compliant
            } else {
                OsoStatus::NonCompliant
            };
            OsoResult {
                id: definition.id(),
                name: definition.name.clone(),
                category: definition.category,
                responsible: definition.responsible,
                required: check.required,
                declared: robustness,
                compliant: check.compliant,
                gap: check.gap,
                status,
                evidence_provided,
            }
        })
        .collect();

    let summary = summarize(&results);
    OsoReport { results, summary }
}

/// Aggregate results overall and per category
pub fn summarize(results: &[OsoResult]) -> OsoSummary {
    let mut by_category: BTreeMap<OsoCategory, CategorySummary> = BTreeMap::new();
    let mut summary = OsoSummary {
        total: results.len(),
        ..Default::default()
    };

    for result in results {
        let entry = by_category
            .entry(result.category)
            .or_insert_with(|| CategorySummary {
                category: result.category,
                total: 0,
                compliant: 0,
                non_compliant: 0,
                optional: 0,
            });
        entry.total += 1;

        match result.status {
            OsoStatus::Compliant => {
                entry.compliant += 1;
                summary.compliant += 1;
            }
            OsoStatus::NonCompliant => {
                entry.non_compliant += 1;
                summary.non_compliant += 1;
                summary.non_compliant_ids.push(result.id.clone());
            }
            OsoStatus::Optional => {
                entry.optional += 1;
                summary.optional += 1;
            }
        }

        if result.declared != Robustness::None && !result.evidence_provided {
            summary.missing_evidence += 1;
        }
    }

    summary.overall_compliant = summary.non_compliant == 0;
    summary.categories = by_category.into_values().collect();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oso_catalog::sora_2_5_catalog;

    fn declare(robustness: Robustness, evidence: &str) -> OsoDeclaration {
        OsoDeclaration {
            robustness,
            evidence: evidence.to_string(),
        }
    }

    #[test]
    fn test_high_requirement_with_medium_declared() {
        let catalog = sora_2_5_catalog();
        // OSO#01 requires H at SAIL VI
        let check = check_compliance(&catalog[0], Sail::VI, Robustness::Medium);
        assert_eq!(check.required, OsoLevel::High);
        assert!(!check.compliant);
        assert_eq!(check.gap, 1);
    }

    #[test]
    fn test_optional_is_always_compliant() {
        let catalog = sora_2_5_catalog();
        let check = check_compliance(&catalog[0], Sail::I, Robustness::None);
        assert_eq!(check.required, OsoLevel::Optional);
        assert!(check.compliant);
        assert_eq!(check.gap, 0);
    }

    #[test]
    fn test_exceeding_requirement_has_no_gap() {
        let catalog = sora_2_5_catalog();
        let check = check_compliance(&catalog[0], Sail::II, Robustness::High);
        assert!(check.compliant);
        assert_eq!(check.gap, 0);
    }

    #[test]
    fn test_check_all_keeps_catalog_order() {
        let catalog = sora_2_5_catalog();
        let report = check_all(&catalog, Sail::III, &BTreeMap::new());
        let ids: Vec<String> = report.results.iter().map(|r| r.id.clone()).collect();
        let expected: Vec<String> = catalog.iter().map(|d| d.id()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_nothing_declared_at_sail_one() {
        let catalog = sora_2_5_catalog();
        let report = check_all(&catalog, Sail::I, &BTreeMap::new());
        let summary = &report.summary;
        assert_eq!(summary.total, 17);
        assert_eq!(
            summary.compliant + summary.non_compliant + summary.optional,
            17
        );
        assert!(!summary.overall_compliant);
        assert!(summary.non_compliant_ids.contains(&"OSO#03".to_string()));
        assert!(!summary.non_compliant_ids.contains(&"OSO#01".to_string()));
    }

    #[test]
    fn test_all_high_is_overall_compliant() {
        let catalog = sora_2_5_catalog();
        let declared: BTreeMap<u8, OsoDeclaration> = catalog
            .iter()
            .map(|d| (d.number, declare(Robustness::High, "audit report")))
            .collect();
        let report = check_all(&catalog, Sail::VI, &declared);
        assert!(report.summary.overall_compliant);
        assert_eq!(report.summary.non_compliant, 0);
        assert_eq!(report.summary.missing_evidence, 0);
    }

    #[test]
    fn test_missing_evidence_counted() {
        let catalog = sora_2_5_catalog();
        let mut declared = BTreeMap::new();
        declared.insert(3, declare(Robustness::Low, "  "));
        declared.insert(7, declare(Robustness::Low, "checklist v2"));
        let report = check_all(&catalog, Sail::I, &declared);
        assert_eq!(report.summary.missing_evidence, 1);
        let oso03 = report.results.iter().find(|r| r.id == "OSO#03").unwrap();
        assert_eq!(oso03.status, OsoStatus::Compliant);
        assert!(!oso03.evidence_provided);
    }

    #[test]
    fn test_category_summaries_add_up() {
        let catalog = sora_2_5_catalog();
        let report = check_all(&catalog, Sail::IV, &BTreeMap::new());
        let total: usize = report.summary.categories.iter().map(|c| c.total).sum();
        assert_eq!(total, report.summary.total);
        assert_eq!(
            report.summary.categories[0].category,
            OsoCategory::TechnicalIssue
        );
        assert_eq!(report.summary.categories.len(), 4);
    }
}
