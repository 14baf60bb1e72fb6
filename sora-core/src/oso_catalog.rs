//! SORA 2.5 operational safety objective catalog
//!
//! Entries are kept in catalog order; compliance output follows this order.

use crate::model::OsoLevel::{self, High as H, Low as L, Medium as M, Optional as O};
use crate::tables::{EvidenceGuidance, OsoCategory, OsoDefinition, ResponsibleParty};

struct Entry {
    number: u8,
    category: OsoCategory,
    name: &'static str,
    required: [OsoLevel; 6],
    responsible: ResponsibleParty,
    low: &'static str,
    medium: &'static str,
    high: &'static str,
}

const CATALOG: &[Entry] = &[
    Entry {
        number: 1,
        category: OsoCategory::TechnicalIssue,
        name: "Ensure the operator is competent and/or proven",
        required: [O, L, M, H, H, H],
        responsible: ResponsibleParty::Operator,
        low: "Operator declares knowledge of the UAS and has documented operational procedures",
        medium: "Operator holds an organisational structure and safety management adequate to the operation",
        high: "Competence validated by a competent third party (e.g. operator certificate)",
    },
    Entry {
        number: 2,
        category: OsoCategory::TechnicalIssue,
        name: "UAS manufactured by competent and/or proven entity",
        required: [O, O, L, M, H, H],
        responsible: ResponsibleParty::Designer,
        low: "Manufacturing procedures cover specification of materials and inspection",
        medium: "Manufacturing procedures additionally cover configuration control and traceability",
        high: "Manufacturing organisation approved by a competent third party",
    },
    Entry {
        number: 3,
        category: OsoCategory::TechnicalIssue,
        name: "UAS maintained by competent and/or proven entity",
        required: [L, L, M, M, H, H],
        responsible: ResponsibleParty::Operator,
        low: "Maintenance instructions defined; maintenance log kept; staff authorised",
        medium: "Maintenance programme and staff training records maintained",
        high: "Maintenance organisation validated by a competent third party",
    },
    Entry {
        number: 4,
        category: OsoCategory::TechnicalIssue,
        name: "UAS components essential to safe operations are designed to an airworthiness design standard",
        required: [O, O, O, L, M, H],
        responsible: ResponsibleParty::Designer,
        low: "Declaration of compliance with a recognised design standard",
        medium: "Design standard compliance supported by test and analysis evidence",
        high: "Design standard compliance validated by a competent third party",
    },
    Entry {
        number: 5,
        category: OsoCategory::TechnicalIssue,
        name: "UAS is designed considering system safety and reliability",
        required: [O, O, L, M, H, H],
        responsible: ResponsibleParty::Designer,
        low: "Functional hazard assessment identifies failure conditions",
        medium: "Safety analysis shows single failures cannot lead to catastrophic outcomes",
        high: "Quantitative safety assessment validated by a competent third party",
    },
    Entry {
        number: 6,
        category: OsoCategory::TechnicalIssue,
        name: "C3 link characteristics are appropriate for the operation",
        required: [O, L, L, M, H, H],
        responsible: ResponsibleParty::OperatorAndDesigner,
        low: "Link performance, spectrum use and environmental conditions are documented",
        medium: "Link performance demonstrated by test in representative conditions",
        high: "Link performance validated by a competent third party",
    },
    Entry {
        number: 7,
        category: OsoCategory::TechnicalIssue,
        name: "Conformity check of the UAS configuration",
        required: [L, L, M, M, H, H],
        responsible: ResponsibleParty::Operator,
        low: "Pre-flight procedure confirms the UAS matches the configuration in the ConOps",
        medium: "Conformity checks recorded and traceable to the approved configuration",
        high: "Conformity process validated by a competent third party",
    },
    Entry {
        number: 8,
        category: OsoCategory::TechnicalIssue,
        name: "Operational procedures are defined, validated and adhered to",
        required: [L, M, H, H, H, H],
        responsible: ResponsibleParty::Operator,
        low: "Normal, contingency and emergency procedures documented",
        medium: "Procedures validated against standards or by flight test/simulation",
        high: "Procedures validated by a competent third party",
    },
    Entry {
        number: 9,
        category: OsoCategory::TechnicalIssue,
        name: "Remote crew trained and current and able to control the abnormal situation",
        required: [L, L, M, M, H, H],
        responsible: ResponsibleParty::TrainingOrganisation,
        low: "Competency-based theoretical and practical training completed",
        medium: "Training programme documented and currency tracked",
        high: "Training programme validated by a competent third party",
    },
    Entry {
        number: 13,
        category: OsoCategory::ExternalSystems,
        name: "External services supporting UAS operations are adequate to the operation",
        required: [L, L, M, H, H, H],
        responsible: ResponsibleParty::Operator,
        low: "Required performance of external services defined and declared adequate",
        medium: "Service level agreements in place with the service providers",
        high: "Service performance validated by a competent third party",
    },
    Entry {
        number: 16,
        category: OsoCategory::HumanError,
        name: "Multi crew coordination",
        required: [L, L, M, M, H, H],
        responsible: ResponsibleParty::Operator,
        low: "Crew roles and communication procedures documented",
        medium: "Crew resource management training completed and recorded",
        high: "Multi crew coordination validated by a competent third party",
    },
    Entry {
        number: 17,
        category: OsoCategory::HumanError,
        name: "Remote crew is fit to operate",
        required: [L, L, M, M, H, H],
        responsible: ResponsibleParty::Operator,
        low: "Fitness-to-operate policy defined, covering fatigue and substance use",
        medium: "Duty, flight time and rest limits defined and recorded",
        high: "Fatigue risk management validated by a competent third party",
    },
    Entry {
        number: 18,
        category: OsoCategory::HumanError,
        name: "Automatic protection of the flight envelope from human errors",
        required: [O, O, L, M, H, H],
        responsible: ResponsibleParty::Designer,
        low: "Flight envelope protections described",
        medium: "Protections demonstrated by analysis, simulation or flight test",
        high: "Protections validated by a competent third party",
    },
    Entry {
        number: 19,
        category: OsoCategory::HumanError,
        name: "Safe recovery from human error",
        required: [O, O, L, M, M, H],
        responsible: ResponsibleParty::OperatorAndDesigner,
        low: "Procedures and checklists mitigate identified human errors",
        medium: "Recovery means demonstrated by simulation or flight test",
        high: "Recovery means validated by a competent third party",
    },
    Entry {
        number: 20,
        category: OsoCategory::HumanError,
        name: "A human factors evaluation has been performed and the HMI found appropriate for the mission",
        required: [O, L, L, M, M, H],
        responsible: ResponsibleParty::OperatorAndDesigner,
        low: "HMI evaluated by the operator for the intended mission",
        medium: "Human factors evaluation documented with representative users",
        high: "Human factors evaluation validated by a competent third party",
    },
    Entry {
        number: 23,
        category: OsoCategory::AdverseConditions,
        name: "Environmental conditions for safe operations defined, measurable and adhered to",
        required: [L, L, M, M, H, H],
        responsible: ResponsibleParty::Operator,
        low: "Environmental limits defined in the operations manual",
        medium: "Means to measure conditions in flight are available to the crew",
        high: "Environmental limits validated by a competent third party",
    },
    Entry {
        number: 24,
        category: OsoCategory::AdverseConditions,
        name: "UAS designed and qualified for adverse environmental conditions",
        required: [O, O, M, H, H, H],
        responsible: ResponsibleParty::Designer,
        low: "Declared environmental qualification of the UAS",
        medium: "Environmental qualification supported by test evidence",
        high: "Environmental qualification validated by a competent third party",
    },
];

/// The SORA 2.5 OSO catalog in catalog order
pub fn sora_2_5_catalog() -> Vec<OsoDefinition> {
    CATALOG
        .iter()
        .map(|e| OsoDefinition {
            number: e.number,
            category: e.category,
            name: e.name.to_string(),
            required: e.required,
            responsible: e.responsible,
            guidance: EvidenceGuidance {
                low: e.low.to_string(),
                medium: e.medium.to_string(),
                high: e.high.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sail;

    #[test]
    fn test_catalog_has_seventeen_objectives() {
        assert_eq!(sora_2_5_catalog().len(), 17);
    }

    #[test]
    fn test_catalog_numbers_ascend() {
        let numbers: Vec<u8> = sora_2_5_catalog().iter().map(|o| o.number).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn test_sail_vi_requires_high_for_operator_competence() {
        let catalog = sora_2_5_catalog();
        let oso01 = &catalog[0];
        assert_eq!(oso01.id(), "OSO#01");
        assert_eq!(oso01.required_for(Sail::I), OsoLevel::Optional);
        assert_eq!(oso01.required_for(Sail::VI), OsoLevel::High);
    }
}
