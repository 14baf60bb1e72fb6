//! Reference table validation errors
//!
//! A malformed table set is a configuration/programmer error, never a user-data
//! error: engines refuse to start on one.

use crate::model::{
    AirRiskClass, MitigationId, PopulationCategory, Sail, TmprType, UaCharacteristic,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("intrinsic GRC cell {population}/{ua} holds {value}, outside 1..=10")]
    GrcOutOfRange {
        population: PopulationCategory,
        ua: UaCharacteristic,
        value: u8,
    },

    #[error("intrinsic GRC matrix decreases between {from} and {to}")]
    IntrinsicGrcNotMonotonic { from: String, to: String },

    #[error("SAIL matrix decreases between {from} and {to}")]
    SailNotMonotonic { from: String, to: String },

    #[error("SAIL matrix row for GRC {0} is outside 1..=7")]
    SailRowOutOfRange(u8),

    #[error("containment matrix decreases between {from} and {to}")]
    ContainmentNotMonotonic { from: String, to: String },

    #[error("containment cell {population}/SAIL {sail} requires robustness 'none'")]
    ContainmentRequiresNone {
        population: PopulationCategory,
        sail: Sail,
    },

    #[error("mitigation {0} is defined more than once")]
    DuplicateMitigation(MitigationId),

    #[error("mitigation {0} is missing from the table set")]
    MissingMitigation(MitigationId),

    #[error("mitigation {id} tier '{tier}' has a positive reduction ({value})")]
    PositiveReduction {
        id: MitigationId,
        tier: &'static str,
        value: i8,
    },

    #[error("exclusion rule references {0} against itself")]
    SelfExclusion(MitigationId),

    #[error("TMPR {0} is defined more than once")]
    DuplicateTmpr(TmprType),

    #[error("TMPR {0} is missing from the table set")]
    MissingTmpr(TmprType),

    #[error("TMPR {kind} must reduce by at least one step and require robustness above 'none'")]
    DegenerateTmpr { kind: TmprType },

    #[error("TMPR {kind} floor {floor} is above ARC-c and could never be reached")]
    UnreachableTmprFloor { kind: TmprType, floor: AirRiskClass },

    #[error("UA class {0} has a non-positive or non-finite dimension or speed")]
    InvalidUaEnvelope(UaCharacteristic),

    #[error("population category {0} is described more than once")]
    DuplicatePopulation(PopulationCategory),

    #[error("OSO #{0:02} is defined more than once")]
    DuplicateOso(u8),

    #[error("OSO #{0:02} requirement decreases as SAIL increases")]
    OsoNotMonotonic(u8),

    #[error("table set defines no OSOs")]
    EmptyOsoCatalog,

    #[error("adjacent_area.{field} must be positive and finite (got {value})")]
    InvalidAdjacentArea { field: &'static str, value: f64 },

    #[error("adjacent_area.min_distance_m ({min}) must be less than max_distance_m ({max})")]
    AdjacentAreaBoundsUnordered { min: f64, max: f64 },
}
