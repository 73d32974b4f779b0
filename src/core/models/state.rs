//! Conversation state

use serde::{Deserialize, Serialize};

/// Where a conversation session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A message was accepted and its response is being composed
    AwaitingClassification,
    /// The last message has been answered
    Responded,
}

impl ConversationState {
    /// Whether the typing indicator should be shown
    #[must_use]
    pub const fn is_composing(self) -> bool {
        matches!(self, Self::AwaitingClassification)
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::AwaitingClassification => write!(f, "awaiting_classification"),
            Self::Responded => write!(f, "responded"),
        }
    }
}
