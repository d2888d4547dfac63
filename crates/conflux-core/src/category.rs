//! Research subfield categories.
//!
//! Serialization uses the human-readable label (`"Security and Privacy"`),
//! which is also what upstream curated data carries. The variant name
//! (`Security`) is the stable identifier used in the output artifact's
//! synthetic keys.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Research subfield of a conference series.
///
/// Acts as a disambiguation axis: the same short name can denote different
/// series in different categories (e.g. `FSE` in Security vs. Engineering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Category {
    #[serde(rename = "Security and Privacy")]
    Security,
    #[serde(rename = "Computer Engineering")]
    Architecture,
    #[serde(rename = "Networking and Distributed Systems")]
    Networking,
    #[serde(rename = "Theoretical Computer Science")]
    Theory,
    #[serde(rename = "Computer Graphics")]
    Graphics,
    #[serde(rename = "Software Engineering")]
    Engineering,
    #[serde(rename = "Databases")]
    Databases,
    #[serde(rename = "Artificial Intelligence")]
    ArtificialIntelligence,
    #[serde(rename = "Computer Human Interaction")]
    HumanInteraction,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in enumeration order.
    ///
    /// Name-only store lookups iterate this closed set explicitly, so the
    /// order here fixes the order of their results.
    pub const ALL: [Self; 10] = [
        Self::Security,
        Self::Architecture,
        Self::Networking,
        Self::Theory,
        Self::Graphics,
        Self::Engineering,
        Self::Databases,
        Self::ArtificialIntelligence,
        Self::HumanInteraction,
        Self::Other,
    ];

    /// Stable variant identifier, used in output artifact keys
    /// (`"{name}__CAT{key_name}"`).
    #[must_use]
    pub const fn key_name(self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Architecture => "Architecture",
            Self::Networking => "Networking",
            Self::Theory => "Theory",
            Self::Graphics => "Graphics",
            Self::Engineering => "Engineering",
            Self::Databases => "Databases",
            Self::ArtificialIntelligence => "ArtificialIntelligence",
            Self::HumanInteraction => "HumanInteraction",
            Self::Other => "Other",
        }
    }

    /// Human-readable label, identical to the serde representation.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Security => "Security and Privacy",
            Self::Architecture => "Computer Engineering",
            Self::Networking => "Networking and Distributed Systems",
            Self::Theory => "Theoretical Computer Science",
            Self::Graphics => "Computer Graphics",
            Self::Engineering => "Software Engineering",
            Self::Databases => "Databases",
            Self::ArtificialIntelligence => "Artificial Intelligence",
            Self::HumanInteraction => "Computer Human Interaction",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
