//! Structured warnings returned alongside assessment results
//!
//! Nothing here is fatal: every warning describes how the engine absorbed an
//! incomplete or conflicting input so presentation layers can surface it.

use crate::model::{MitigationId, Robustness, TmprType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// An input key did not match any reference table entry
    UnknownKey {
        field: String,
        value: String,
        fallback: String,
    },
    /// Two enabled mitigations may not be claimed together; `zeroed` contributes nothing
    ConflictingMitigations {
        kept: MitigationId,
        kept_robustness: Robustness,
        zeroed: MitigationId,
    },
    /// The declared tier is not offered by this mitigation; it contributes nothing
    UnsupportedTier {
        mitigation: MitigationId,
        robustness: Robustness,
        supported: Vec<Robustness>,
    },
    /// The TMPR claim is below the minimum robustness; ARC is not reduced
    TmprRobustnessInsufficient {
        tmpr: TmprType,
        declared: Robustness,
        minimum: Robustness,
    },
}

impl Warning {
    pub fn message(&self) -> String {
        match self {
            Warning::UnknownKey {
                field,
                value,
                fallback,
            } => format!("unknown {} '{}', using '{}'", field, value, fallback),
            Warning::ConflictingMitigations {
                kept,
                kept_robustness,
                zeroed,
            } => format!(
                "{} at {} robustness cannot be combined with {}; {} not credited",
                kept, kept_robustness, zeroed, zeroed
            ),
            Warning::UnsupportedTier {
                mitigation,
                robustness,
                supported,
            } => {
                let tiers = supported
                    .iter()
                    .map(|r| r.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{} has no {} robustness tier (offered: {}); no reduction applied",
                    mitigation, robustness, tiers
                )
            }
            Warning::TmprRobustnessInsufficient {
                tmpr,
                declared,
                minimum,
            } => format!(
                "{} requires at least {} robustness (declared {}); ARC not reduced",
                tmpr, minimum, declared
            ),
        }
    }
}
