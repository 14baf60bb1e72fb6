//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output across runs

use crate::engine::AssessmentResult;
use crate::model::Grc;
use crate::oso::OsoStatus;
use serde::{Deserialize, Serialize};

/// Output format for rendered results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

/// Render a result as JSON output
pub fn render_json(result: &AssessmentResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}

/// Render several per-site results as one JSON array
pub fn render_json_batch(results: &[AssessmentResult]) -> String {
    serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
}

/// Render a result as text output
pub fn render_text(result: &AssessmentResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("SORA assessment ({})\n", result.revision));
    output.push_str(&format!(
        "  Ground: {} / {}  iGRC {}  final GRC {}\n",
        result.population, result.ua_characteristic, result.intrinsic_grc, result.final_grc
    ));
    for m in &result.mitigations {
        output.push_str(&format!(
            "    {:<4} {:<7} {:>3}{}\n",
            m.id.as_str(),
            m.robustness.as_str(),
            m.reduction,
            if m.evidence_provided { "" } else { "  (no evidence)" }
        ));
    }
    output.push_str(&format!(
        "  Air: {} -> {}",
        result.initial_arc, result.residual_arc
    ));
    if result.tmpr.enabled {
        output.push_str(&format!(
            "  ({} {}, -{})",
            result.tmpr.kind, result.tmpr.robustness, result.arc_steps_reduced
        ));
    }
    output.push('\n');

    match result.sail {
        Some(sail) => output.push_str(&format!("  SAIL: {}\n", sail)),
        None => {
            let reason = match result.final_grc {
                Grc::OutOfScope => "no intrinsic GRC for this population/UA pair".to_string(),
                grc => format!("final GRC {} exceeds 7", grc),
            };
            output.push_str(&format!(
                "  SAIL: out of scope ({}); certified category applies\n",
                reason
            ));
        }
    }

    let c = &result.containment;
    output.push_str(&format!(
        "  Containment: adjacent {} within {:.0} m, required {}, achieved {} -> {}\n",
        c.adjacent_population,
        c.adjacent_area_distance_m,
        c.required.map(|r| r.as_str()).unwrap_or("n/a"),
        c.achieved,
        if c.compliant { "ok" } else { "NOT MET" }
    ));

    if !result.oso.results.is_empty() {
        output.push('\n');
        output.push_str(&format!(
            "{:<8} {:<4} {:<8} {:<14} {}\n",
            "OSO", "REQ", "DECLARED", "STATUS", "NAME"
        ));
        for r in &result.oso.results {
            let status = match r.status {
                OsoStatus::NonCompliant => format!("gap {}", r.gap),
                other => other.as_str().to_string(),
            };
            output.push_str(&format!(
                "{:<8} {:<4} {:<8} {:<14} {}\n",
                r.id,
                r.required.as_str(),
                r.declared.as_str(),
                status,
                truncate_or_pad(&r.name, 60)
            ));
        }

        let s = &result.oso.summary;
        output.push_str(&format!(
            "\nOSOs: {} compliant, {} non-compliant, {} optional ({} missing evidence)\n",
            s.compliant, s.non_compliant, s.optional, s.missing_evidence
        ));
        for cat in &s.categories {
            output.push_str(&format!(
                "  {:<34} {}/{} met\n",
                cat.category.label(),
                cat.compliant + cat.optional,
                cat.total
            ));
        }
    }

    if !result.warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for w in &result.warnings {
            output.push_str(&format!("  - {}\n", w.message()));
        }
    }

    if result.missing_evidence > 0 {
        output.push_str(&format!(
            "\nClaims without evidence: {}\n",
            result.missing_evidence
        ));
    }

    output.push_str(&format!(
        "\nOverall: {}\n",
        if result.is_compliant() {
            "COMPLIANT"
        } else if result.out_of_scope {
            "OUT OF SCOPE"
        } else {
            "NOT COMPLIANT"
        }
    ));

    output
}

/// Truncate string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SoraEngine;
    use crate::input::AssessmentInput;
    use crate::model::{MitigationId, Robustness};

    #[test]
    fn test_render_text_default_assessment() {
        let result = SoraEngine::sora_2_5().evaluate(&AssessmentInput::default());
        let text = render_text(&result);
        assert!(text.contains("SAIL: III"));
        assert!(text.contains("OSO#01"));
        assert!(text.contains("Overall: NOT COMPLIANT"));
    }

    #[test]
    fn test_render_text_out_of_scope() {
        let input = AssessmentInput {
            population: "assembly".to_string(),
            ua_characteristic: "40m_200ms".to_string(),
            ..Default::default()
        };
        let result = SoraEngine::sora_2_5().evaluate(&input);
        let text = render_text(&result);
        assert!(text.contains("out of scope"));
        assert!(text.contains("Overall: OUT OF SCOPE"));
        assert!(!text.contains("OSO#01"));
    }

    #[test]
    fn test_render_text_flags_claims_without_evidence() {
        let mut input = AssessmentInput::default();
        input.enable_mitigation(MitigationId::M2, Robustness::Medium);
        input.containment.evidence = "geofence flight test".to_string();
        let result = SoraEngine::sora_2_5().evaluate(&input);
        let text = render_text(&result);
        assert!(text.contains("(no evidence)"));
        assert!(text.contains("Claims without evidence: 1"));

        input.mitigations.m2.evidence = "parachute test report".to_string();
        let text = render_text(&SoraEngine::sora_2_5().evaluate(&input));
        assert!(!text.contains("(no evidence)"));
        assert!(!text.contains("Claims without evidence"));
    }

    #[test]
    fn test_render_json_is_deterministic() {
        let engine = SoraEngine::sora_2_5();
        let input = AssessmentInput::default();
        let a = render_json(&engine.evaluate(&input));
        let b = render_json(&engine.evaluate(&input));
        assert_eq!(a, b);
        let value: serde_json::Value = serde_json::from_str(&a).unwrap();
        assert_eq!(value["sail"], "III");
        assert_eq!(value["final_grc"], 4);
        assert_eq!(value["residual_arc"], "ARC-b");
    }

    #[test]
    fn test_out_of_scope_serializes_null_sail() {
        let input = AssessmentInput {
            population: "assembly".to_string(),
            ua_characteristic: "8m_75ms".to_string(),
            ..Default::default()
        };
        let json = render_json(&SoraEngine::sora_2_5().evaluate(&input));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["sail"].is_null());
        assert_eq!(value["final_grc"], "out_of_scope");
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate_or_pad("abcdefgh", 6), "abc...");
        assert_eq!(truncate_or_pad("abc", 6), "abc");
    }
}
