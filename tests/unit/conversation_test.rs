//! Conversation engine tests on a manually driven clock

use std::sync::Arc;
use std::time::Duration;

use bizpulse::core::models::{ConversationState, Speaker, TopicLabel, TurnPayload};
use bizpulse::core::ports::Clock;
use bizpulse::core::services::{
    ConversationEngine, ConversationError, ConversationSettings, DEFAULT_ACKNOWLEDGMENT,
    DEFAULT_GREETING, ResourceCatalog, ResponsePolicy,
};

use crate::common::{ManualClock, engine_with_delay};

const DELAY: Duration = Duration::from_millis(1500);

#[test]
fn test_loan_question_gets_funding_resources() {
    let clock = ManualClock::new();
    let mut engine = engine_with_delay(&clock, DELAY);

    engine.submit_message("How do I get a loan?").unwrap();
    assert_eq!(engine.transcript().len(), 1);
    assert_eq!(engine.transcript()[0].speaker, Speaker::User);

    clock.advance(DELAY);
    let delivery = engine.poll().unwrap();
    assert_eq!(delivery.topic, TopicLabel::Funding);
    assert_eq!(delivery.latency, DELAY);

    let transcript = engine.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].speaker, Speaker::System);
    assert_eq!(transcript[1].message(), Some(DEFAULT_ACKNOWLEDGMENT));
    let expected = ResourceCatalog::default().lookup(TopicLabel::Funding).to_vec();
    assert_eq!(transcript[2].payload, TurnPayload::Recommendations(expected));
    assert_eq!(engine.current_state(), ConversationState::Responded);
}

#[test]
fn test_composing_until_deadline() {
    let clock = ManualClock::new();
    let mut engine = engine_with_delay(&clock, DELAY);
    assert!(!engine.is_composing());

    engine.submit_message("Where do I file sales tax?").unwrap();
    assert!(engine.is_composing());
    assert_eq!(engine.current_state(), ConversationState::AwaitingClassification);

    clock.advance(DELAY - Duration::from_millis(1));
    assert!(engine.poll().is_none());
    assert!(engine.is_composing());
    assert_eq!(engine.time_until_response(), Some(Duration::from_millis(1)));

    clock.advance(Duration::from_millis(1));
    assert!(engine.poll().is_some());
    assert!(!engine.is_composing());
    assert_eq!(engine.time_until_response(), None);
}

#[test]
fn test_empty_message_changes_nothing() {
    let clock = ManualClock::new();
    let mut engine = engine_with_delay(&clock, DELAY);

    assert_eq!(engine.submit_message("   \t "), Err(ConversationError::EmptyMessage));
    assert_eq!(engine.submit_message(""), Err(ConversationError::EmptyMessage));
    assert!(engine.transcript().is_empty());
    assert_eq!(engine.current_state(), ConversationState::Idle);
}

#[test]
fn test_second_message_while_composing_is_rejected() {
    let clock = ManualClock::new();
    let mut engine = engine_with_delay(&clock, DELAY);

    engine.submit_message("permit question").unwrap();
    assert_eq!(engine.submit_message("another one"), Err(ConversationError::Busy));
    assert_eq!(engine.transcript().len(), 1);

    clock.advance(DELAY);
    let delivery = engine.poll().unwrap();
    assert_eq!(delivery.topic, TopicLabel::Permits);

    engine.submit_message("another one").unwrap();
    assert_eq!(engine.transcript().len(), 4);
}

#[test]
fn test_deliver_ignores_the_delay() {
    let clock = ManualClock::new();
    let mut engine = engine_with_delay(&clock, DELAY);

    engine.submit_message("Any workshops?").unwrap();
    let delivery = engine.deliver().unwrap();
    assert_eq!(delivery.topic, TopicLabel::Training);
    assert_eq!(delivery.latency, Duration::ZERO);
    assert!(engine.deliver().is_none());
}

#[test]
fn test_immediate_policy_answers_on_first_poll() {
    let clock = ManualClock::new();
    let mut engine = engine_with_delay(&clock, ResponsePolicy::immediate().delay);

    engine.submit_message("hello").unwrap();
    assert_eq!(engine.poll().map(|d| d.topic), Some(TopicLabel::Support));
}

#[test]
fn test_default_greeting_opens_transcript() {
    let clock = ManualClock::new();
    let engine = ConversationEngine::new(
        Arc::default(),
        Arc::default(),
        Arc::clone(&clock) as Arc<dyn Clock>,
        ConversationSettings::default(),
    );

    assert_eq!(engine.policy(), ResponsePolicy::default());
    assert_eq!(engine.policy().delay, DELAY);
    assert_eq!(engine.transcript().len(), 1);
    assert_eq!(engine.transcript()[0].message(), Some(DEFAULT_GREETING));
    assert_eq!(engine.current_state(), ConversationState::Idle);
}
