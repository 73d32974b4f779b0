//! Conversation turns
//!
//! One atomic unit of dialogue. Turns are appended to a transcript and
//! never modified afterwards.

use serde::{Deserialize, Serialize};

use super::ResourceEntry;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The business owner typing into the chat
    User,
    /// The assistant
    System,
}

/// What a turn carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum TurnPayload {
    /// Free text
    Message(String),
    /// Ordered recommendation list
    Recommendations(Vec<ResourceEntry>),
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Author of the turn
    pub speaker: Speaker,
    /// Content of the turn
    pub payload: TurnPayload,
}

impl ConversationTurn {
    /// A message typed by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            payload: TurnPayload::Message(text.into()),
        }
    }

    /// A message from the assistant
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::System,
            payload: TurnPayload::Message(text.into()),
        }
    }

    /// A recommendation list from the assistant
    #[must_use]
    pub fn recommendations(entries: Vec<ResourceEntry>) -> Self {
        Self {
            speaker: Speaker::System,
            payload: TurnPayload::Recommendations(entries),
        }
    }

    /// Text of a message turn
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match &self.payload {
            TurnPayload::Message(text) => Some(text),
            TurnPayload::Recommendations(_) => None,
        }
    }

    /// Entries of a recommendation turn
    #[must_use]
    pub fn resources(&self) -> Option<&[ResourceEntry]> {
        match &self.payload {
            TurnPayload::Recommendations(entries) => Some(entries),
            TurnPayload::Message(_) => None,
        }
    }
}
