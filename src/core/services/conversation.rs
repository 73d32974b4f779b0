//! Conversation engine - turn-taking state machine for the resource chat
//!
//! ```text
//!            submit (non-empty)                 deadline reached
//!   Idle ─────────────────────▶ AwaitingClassification ─────────────▶ Responded
//!                                      ▲                                  │
//!                                      └──────── submit (non-empty) ──────┘
//! ```
//!
//! A submission appends the user's turn and starts the response delay.
//! While a response is pending the session is composing and further
//! submissions are rejected. Delivery classifies the text, looks up the
//! catalog and appends two system turns: an acknowledgment, then the
//! recommendation list.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::core::models::{ConversationState, ConversationTurn, TopicLabel};
use crate::core::ports::{Clock, SystemClock};

use super::{ResourceCatalog, TopicClassifier};

/// Greeting placed at the top of a new transcript
pub const DEFAULT_GREETING: &str =
    "Hi! 👋 I'm your County resource assistant. What do you need help with today?";

/// Message sent ahead of every recommendation list
pub const DEFAULT_ACKNOWLEDGMENT: &str =
    "Great question! Based on what you're looking for, here are some resources that can help:";

/// Errors returned by [`ConversationEngine::submit_message`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversationError {
    /// Text was empty or whitespace only
    #[error("message is empty")]
    EmptyMessage,

    /// A response is still being composed
    #[error("still composing a response to the previous message")]
    Busy,
}

/// How long the engine takes before answering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponsePolicy {
    /// Delay between accepting a message and delivering the response
    pub delay: Duration,
}

impl ResponsePolicy {
    /// Delay used when none is configured
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    /// Policy with the given delay
    #[must_use]
    pub const fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Respond on the next poll
    #[must_use]
    pub const fn immediate() -> Self {
        Self::with_delay(Duration::ZERO)
    }
}

impl Default for ResponsePolicy {
    fn default() -> Self {
        Self::with_delay(Self::DEFAULT_DELAY)
    }
}

/// Wording and timing of a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSettings {
    /// Response timing
    pub policy: ResponsePolicy,
    /// Opening system message; `None` starts with an empty transcript
    pub greeting: Option<String>,
    /// Message preceding each recommendation list
    pub acknowledgment: String,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            policy: ResponsePolicy::default(),
            greeting: Some(DEFAULT_GREETING.to_string()),
            acknowledgment: DEFAULT_ACKNOWLEDGMENT.to_string(),
        }
    }
}

/// A response that was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    /// Topic the message was classified as
    pub topic: TopicLabel,
    /// Time between submission and delivery
    pub latency: Duration,
}

#[derive(Debug, Clone)]
struct PendingMessage {
    text: String,
    submitted_at: Instant,
    deadline: Instant,
}

/// Single-session chat state machine
#[derive(Debug)]
pub struct ConversationEngine {
    classifier: Arc<TopicClassifier>,
    catalog: Arc<ResourceCatalog>,
    clock: Arc<dyn Clock>,
    settings: ConversationSettings,
    state: ConversationState,
    transcript: Vec<ConversationTurn>,
    pending: Option<PendingMessage>,
}

impl ConversationEngine {
    /// Create an engine in the idle state
    #[must_use]
    pub fn new(
        classifier: Arc<TopicClassifier>,
        catalog: Arc<ResourceCatalog>,
        clock: Arc<dyn Clock>,
        settings: ConversationSettings,
    ) -> Self {
        let transcript = settings
            .greeting
            .as_deref()
            .map(ConversationTurn::system)
            .into_iter()
            .collect();
        Self {
            classifier,
            catalog,
            clock,
            settings,
            state: ConversationState::Idle,
            transcript,
            pending: None,
        }
    }

    /// Engine with the built-in rules, catalog and wall clock
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::default(),
            Arc::default(),
            Arc::new(SystemClock),
            ConversationSettings::default(),
        )
    }

    /// Accept a user message and start composing the response
    ///
    /// Empty text and submissions while a response is pending leave the
    /// state and transcript untouched.
    pub fn submit_message(&mut self, text: &str) -> Result<(), ConversationError> {
        if text.trim().is_empty() {
            log::debug!("ignoring empty message");
            return Err(ConversationError::EmptyMessage);
        }
        if self.pending.is_some() {
            log::debug!("rejecting message while composing");
            return Err(ConversationError::Busy);
        }

        let now = self.clock.now();
        self.transcript.push(ConversationTurn::user(text));
        self.pending = Some(PendingMessage {
            text: text.to_string(),
            submitted_at: now,
            deadline: now + self.settings.policy.delay,
        });
        self.state = ConversationState::AwaitingClassification;
        log::debug!("message accepted, responding in {:?}", self.settings.policy.delay);
        Ok(())
    }

    /// Deliver the pending response if its delay has elapsed
    pub fn poll(&mut self) -> Option<Delivery> {
        let due = self.pending.as_ref().is_some_and(|p| self.clock.now() >= p.deadline);
        if due { self.deliver() } else { None }
    }

    /// Deliver the pending response now, regardless of the delay
    ///
    /// For schedulers that have already waited out the delay themselves.
    pub fn deliver(&mut self) -> Option<Delivery> {
        let pending = self.pending.take()?;
        let topic = self.classifier.classify(&pending.text);
        let resources = self.catalog.lookup(topic).to_vec();

        self.transcript.push(ConversationTurn::system(self.settings.acknowledgment.clone()));
        self.transcript.push(ConversationTurn::recommendations(resources));
        self.state = ConversationState::Responded;

        let latency = self.clock.now().saturating_duration_since(pending.submitted_at);
        log::info!("responded with {topic} resources after {latency:?}");
        Some(Delivery { topic, latency })
    }

    /// Remaining delay of the pending response, if any
    #[must_use]
    pub fn time_until_response(&self) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.deadline.saturating_duration_since(self.clock.now()))
    }

    /// Current state
    #[must_use]
    pub const fn current_state(&self) -> ConversationState {
        self.state
    }

    /// Whether the typing indicator should be shown
    #[must_use]
    pub const fn is_composing(&self) -> bool {
        self.state.is_composing()
    }

    /// Turns so far, oldest first
    #[must_use]
    pub fn transcript(&self) -> &[ConversationTurn] {
        &self.transcript
    }

    /// Response timing in effect
    #[must_use]
    pub const fn policy(&self) -> ResponsePolicy {
        self.settings.policy
    }

    /// Catalog used for recommendations
    #[must_use]
    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }
}
