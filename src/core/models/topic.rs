//! Topic labels
//!
//! The closed set of subject categories a message can be assigned to.
//! Declaration order is the classifier's priority order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a label string is not part of its closed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}. Use: {expected}")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseLabelError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }

    /// The rejected input
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Subject category of a post or chat message
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TopicLabel {
    /// Permits and business licenses
    Permits,
    /// Grants, loans and relief funds
    Funding,
    /// Workshops, courses and boot camps
    Training,
    /// Business taxes and credits
    Taxes,
    /// General help; the catch-all label
    #[default]
    Support,
}

impl TopicLabel {
    /// Every label, in priority order
    pub const ALL: [Self; 5] = [
        Self::Permits,
        Self::Funding,
        Self::Training,
        Self::Taxes,
        Self::Support,
    ];

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permits => "permits",
            Self::Funding => "funding",
            Self::Training => "training",
            Self::Taxes => "taxes",
            Self::Support => "support",
        }
    }
}

impl std::fmt::Display for TopicLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TopicLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permits" => Ok(Self::Permits),
            "funding" => Ok(Self::Funding),
            "training" => Ok(Self::Training),
            "taxes" => Ok(Self::Taxes),
            "support" => Ok(Self::Support),
            _ => Err(ParseLabelError::new(
                "topic",
                s,
                "permits, funding, training, taxes, support",
            )),
        }
    }
}
