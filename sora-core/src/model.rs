//! Domain vocabulary shared by every calculator
//!
//! Global invariants enforced:
//! - Every ordered axis derives `Ord` in least-to-most severe order
//! - Parsing never panics; unknown keys yield `None` so callers pick a fallback

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Normalize a caller-supplied key: lowercase, `-`/space folded to `_`
fn normalize_key(key: &str) -> String {
    key.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Ground population density category, least to most dense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationCategory {
    Controlled,
    Remote,
    Lightly,
    Sparsely,
    Suburban,
    HighDensity,
    Assembly,
}

impl PopulationCategory {
    pub const ALL: [PopulationCategory; 7] = [
        PopulationCategory::Controlled,
        PopulationCategory::Remote,
        PopulationCategory::Lightly,
        PopulationCategory::Sparsely,
        PopulationCategory::Suburban,
        PopulationCategory::HighDensity,
        PopulationCategory::Assembly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PopulationCategory::Controlled => "controlled",
            PopulationCategory::Remote => "remote",
            PopulationCategory::Lightly => "lightly",
            PopulationCategory::Sparsely => "sparsely",
            PopulationCategory::Suburban => "suburban",
            PopulationCategory::HighDensity => "high_density",
            PopulationCategory::Assembly => "assembly",
        }
    }

    /// Parse a population key, accepting the long regulatory names as aliases
    pub fn parse(key: &str) -> Option<Self> {
        match normalize_key(key).as_str() {
            "controlled" | "controlled_ground_area" => Some(PopulationCategory::Controlled),
            "remote" | "remote_area" => Some(PopulationCategory::Remote),
            "lightly" | "lightly_populated" => Some(PopulationCategory::Lightly),
            "sparsely" | "sparsely_populated" => Some(PopulationCategory::Sparsely),
            "suburban" | "suburban_populated" => Some(PopulationCategory::Suburban),
            "high_density" | "highdensity" | "high_density_metropolitan" => {
                Some(PopulationCategory::HighDensity)
            }
            "assembly" | "assemblies" | "assemblies_of_people" => {
                Some(PopulationCategory::Assembly)
            }
            _ => None,
        }
    }
}

impl fmt::Display for PopulationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UA size/speed class, ordered by physical envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UaCharacteristic {
    #[serde(rename = "1m_25ms")]
    OneMetre,
    #[serde(rename = "3m_35ms")]
    ThreeMetres,
    #[serde(rename = "8m_75ms")]
    EightMetres,
    #[serde(rename = "20m_120ms")]
    TwentyMetres,
    #[serde(rename = "40m_200ms")]
    FortyMetres,
}

impl UaCharacteristic {
    pub const ALL: [UaCharacteristic; 5] = [
        UaCharacteristic::OneMetre,
        UaCharacteristic::ThreeMetres,
        UaCharacteristic::EightMetres,
        UaCharacteristic::TwentyMetres,
        UaCharacteristic::FortyMetres,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UaCharacteristic::OneMetre => "1m_25ms",
            UaCharacteristic::ThreeMetres => "3m_35ms",
            UaCharacteristic::EightMetres => "8m_75ms",
            UaCharacteristic::TwentyMetres => "20m_120ms",
            UaCharacteristic::FortyMetres => "40m_200ms",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match normalize_key(key).as_str() {
            "1m_25ms" | "1m" => Some(UaCharacteristic::OneMetre),
            "3m_35ms" | "3m" => Some(UaCharacteristic::ThreeMetres),
            "8m_75ms" | "8m" => Some(UaCharacteristic::EightMetres),
            "20m_120ms" | "20m" => Some(UaCharacteristic::TwentyMetres),
            "40m_200ms" | "40m" => Some(UaCharacteristic::FortyMetres),
            _ => None,
        }
    }
}

impl fmt::Display for UaCharacteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Air risk class, increasing encounter likelihood
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AirRiskClass {
    #[serde(rename = "ARC-a")]
    A,
    #[serde(rename = "ARC-b")]
    B,
    #[serde(rename = "ARC-c")]
    C,
    #[serde(rename = "ARC-d")]
    D,
}

impl AirRiskClass {
    pub const ALL: [AirRiskClass; 4] = [
        AirRiskClass::A,
        AirRiskClass::B,
        AirRiskClass::C,
        AirRiskClass::D,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AirRiskClass::A => "ARC-a",
            AirRiskClass::B => "ARC-b",
            AirRiskClass::C => "ARC-c",
            AirRiskClass::D => "ARC-d",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of `index`; `None` past ARC-d
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn parse(key: &str) -> Option<Self> {
        let key = normalize_key(key);
        let letter = key.strip_prefix("arc_").unwrap_or(&key);
        match letter {
            "a" => Some(AirRiskClass::A),
            "b" => Some(AirRiskClass::B),
            "c" => Some(AirRiskClass::C),
            "d" => Some(AirRiskClass::D),
            _ => None,
        }
    }
}

impl fmt::Display for AirRiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specific Assurance and Integrity Level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sail {
    I,
    II,
    III,
    IV,
    V,
    VI,
}

impl Sail {
    pub const ALL: [Sail; 6] = [Sail::I, Sail::II, Sail::III, Sail::IV, Sail::V, Sail::VI];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sail::I => "I",
            Sail::II => "II",
            Sail::III => "III",
            Sail::IV => "IV",
            Sail::V => "V",
            Sail::VI => "VI",
        }
    }

    /// Zero-based position (SAIL I = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_uppercase();
        let key = key
            .strip_prefix("SAIL")
            .unwrap_or(&key)
            .trim_start_matches(&['_', '-', ' '][..]);
        match key {
            "I" | "1" => Some(Sail::I),
            "II" | "2" => Some(Sail::II),
            "III" | "3" => Some(Sail::III),
            "IV" | "4" => Some(Sail::IV),
            "V" | "5" => Some(Sail::V),
            "VI" | "6" => Some(Sail::VI),
            _ => None,
        }
    }
}

impl fmt::Display for Sail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared or required robustness, ordinal none < low < medium < high
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Robustness {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Robustness {
    pub const ALL: [Robustness; 4] = [
        Robustness::None,
        Robustness::Low,
        Robustness::Medium,
        Robustness::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Robustness::None => "none",
            Robustness::Low => "low",
            Robustness::Medium => "medium",
            Robustness::High => "high",
        }
    }

    /// Ordinal on the shared 0..=3 scale
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn parse(key: &str) -> Option<Self> {
        match normalize_key(key).as_str() {
            "none" | "n" | "no" => Some(Robustness::None),
            "low" | "l" => Some(Robustness::Low),
            "medium" | "med" | "m" => Some(Robustness::Medium),
            "high" | "h" => Some(Robustness::High),
            _ => None,
        }
    }
}

impl fmt::Display for Robustness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OSO robustness requirement letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OsoLevel {
    #[serde(rename = "O")]
    Optional,
    #[serde(rename = "L")]
    Low,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "H")]
    High,
}

impl OsoLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsoLevel::Optional => "O",
            OsoLevel::Low => "L",
            OsoLevel::Medium => "M",
            OsoLevel::High => "H",
        }
    }

    /// Ordinal on the shared 0..=3 scale (O=0, L=1, M=2, H=3)
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for OsoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ground mitigation identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MitigationId {
    M1A,
    M1B,
    M1C,
    M2,
}

impl MitigationId {
    pub const ALL: [MitigationId; 4] = [
        MitigationId::M1A,
        MitigationId::M1B,
        MitigationId::M1C,
        MitigationId::M2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MitigationId::M1A => "M1A",
            MitigationId::M1B => "M1B",
            MitigationId::M1C => "M1C",
            MitigationId::M2 => "M2",
        }
    }
}

impl fmt::Display for MitigationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tactical mitigation type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum TmprType {
    #[default]
    Vlos,
    Evlos,
    Daa,
}

impl TmprType {
    pub const ALL: [TmprType; 3] = [TmprType::Vlos, TmprType::Evlos, TmprType::Daa];

    pub fn as_str(&self) -> &'static str {
        match self {
            TmprType::Vlos => "VLOS",
            TmprType::Evlos => "EVLOS",
            TmprType::Daa => "DAA",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match normalize_key(key).as_str() {
            "vlos" => Some(TmprType::Vlos),
            "evlos" => Some(TmprType::Evlos),
            "daa" | "detect_and_avoid" => Some(TmprType::Daa),
            _ => None,
        }
    }
}

impl fmt::Display for TmprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialized tag for the out-of-scope GRC sentinel
pub const OUT_OF_SCOPE: &str = "out_of_scope";

/// Ground risk class: a concrete score or the out-of-scope sentinel
///
/// `OutOfScope` means the operation leaves the specific category and must be
/// routed to the certified-category process. It ranks above every score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grc {
    Class(u8),
    OutOfScope,
}

impl Grc {
    fn rank(self) -> u16 {
        match self {
            Grc::Class(v) => v as u16,
            Grc::OutOfScope => u16::MAX,
        }
    }

    pub fn is_out_of_scope(self) -> bool {
        matches!(self, Grc::OutOfScope)
    }

    pub fn value(self) -> Option<u8> {
        match self {
            Grc::Class(v) => Some(v),
            Grc::OutOfScope => None,
        }
    }
}

impl PartialOrd for Grc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Grc {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Grc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grc::Class(v) => write!(f, "{}", v),
            Grc::OutOfScope => f.write_str(OUT_OF_SCOPE),
        }
    }
}

impl Serialize for Grc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Grc::Class(v) => serializer.serialize_u8(*v),
            Grc::OutOfScope => serializer.serialize_str(OUT_OF_SCOPE),
        }
    }
}

impl<'de> Deserialize<'de> for Grc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Class(u8),
            Tag(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Class(v) => Ok(Grc::Class(v)),
            Repr::Tag(tag) if tag == OUT_OF_SCOPE => Ok(Grc::OutOfScope),
            Repr::Tag(tag) => Err(D::Error::custom(format!(
                "expected a GRC number or \"{}\", got \"{}\"",
                OUT_OF_SCOPE, tag
            ))),
        }
    }
}
