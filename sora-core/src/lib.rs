//! Sora core library - SORA 2.5 risk classification and compliance determination

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Every calculation is a pure function of (input, injected tables)
// - No global mutable state; reference tables are constructed, never ambient
// - No randomness, clocks, threads, or async
// - Representable input never fails: sentinels and warnings instead of errors
// - Deterministic ordering: identical input yields byte-for-byte identical output

pub mod air;
pub mod config;
pub mod containment;
pub mod engine;
pub mod error;
pub mod ground;
pub mod input;
pub mod model;
pub mod oso;
pub mod oso_catalog;
pub mod report;
pub mod sail;
pub mod tables;
pub mod warning;

pub use config::ResolvedConfig;
pub use engine::{AssessmentResult, SoraEngine};
pub use error::TableError;
pub use input::AssessmentInput;
pub use model::{
    AirRiskClass, Grc, MitigationId, OsoLevel, PopulationCategory, Robustness, Sail, TmprType,
    UaCharacteristic,
};
pub use report::{render_json, render_text, ReportFormat};
pub use tables::ReferenceTables;
pub use warning::Warning;

/// Evaluate an input against the built-in SORA 2.5 tables
pub fn evaluate(input: &AssessmentInput) -> AssessmentResult {
    SoraEngine::sora_2_5().evaluate(input)
}
