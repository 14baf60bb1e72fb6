//! SAIL determination
//!
//! Global invariants enforced:
//! - Out-of-scope or GRC above 7 never yields a SAIL
//! - Result is monotonic non-decreasing in GRC and ARC

use crate::model::{AirRiskClass, Grc, Sail};
use crate::tables::SailMatrix;

/// Highest final GRC the SAIL matrix covers
pub const MAX_SAIL_GRC: u8 = 7;

/// Resolve SAIL from final GRC and residual ARC
///
/// Returns `None` when the operation is out of scope (sentinel GRC, GRC above
/// `MAX_SAIL_GRC`, or a cell the matrix does not list); callers route such
/// operations to the certified category.
pub fn sail(matrix: &SailMatrix, final_grc: Grc, residual_arc: AirRiskClass) -> Option<Sail> {
    let grc = match final_grc {
        Grc::Class(v) if v <= MAX_SAIL_GRC => v.max(1),
        _ => return None,
    };
    matrix.get(grc, residual_arc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ReferenceTables;

    #[test]
    fn test_grc_four_arc_b_is_sail_three() {
        let tables = ReferenceTables::sora_2_5();
        assert_eq!(
            sail(&tables.sail, Grc::Class(4), AirRiskClass::B),
            Some(Sail::III)
        );
    }

    #[test]
    fn test_above_seven_is_out_of_scope() {
        let tables = ReferenceTables::sora_2_5();
        assert_eq!(sail(&tables.sail, Grc::Class(8), AirRiskClass::A), None);
        assert_eq!(sail(&tables.sail, Grc::OutOfScope, AirRiskClass::A), None);
    }

    #[test]
    fn test_zero_is_clamped_to_one() {
        let tables = ReferenceTables::sora_2_5();
        assert_eq!(
            sail(&tables.sail, Grc::Class(0), AirRiskClass::A),
            Some(Sail::I)
        );
    }

    #[test]
    fn test_arc_d_is_always_sail_six() {
        let tables = ReferenceTables::sora_2_5();
        for grc in 1..=MAX_SAIL_GRC {
            assert_eq!(
                sail(&tables.sail, Grc::Class(grc), AirRiskClass::D),
                Some(Sail::VI)
            );
        }
    }
}
