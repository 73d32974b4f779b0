//! Shared test fixtures and helpers
//!
//! This module provides common utilities for testing bizpulse components.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use bizpulse::core::models::{ObservedAt, Post, SentimentLabel, TopicLabel};
use bizpulse::core::ports::Clock;
use bizpulse::core::services::{ConversationEngine, ConversationSettings, ResponsePolicy};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        })
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        reference() + TimeDelta::from_std(*self.offset.lock().unwrap()).unwrap()
    }
}

/// Engine on a manual clock with the given delay and no greeting
pub fn engine_with_delay(clock: &Arc<ManualClock>, delay: Duration) -> ConversationEngine {
    ConversationEngine::new(
        Arc::default(),
        Arc::default(),
        Arc::clone(clock) as Arc<dyn Clock>,
        ConversationSettings {
            policy: ResponsePolicy::with_delay(delay),
            greeting: None,
            ..ConversationSettings::default()
        },
    )
}

/// Fixed reference instant: Wednesday 2024-05-15 12:00 UTC
pub fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
}

/// Post observed at an absolute instant
pub fn post_at(
    id: &str,
    sentiment: SentimentLabel,
    topic: TopicLabel,
    at: DateTime<Utc>,
) -> Post {
    Post::new(id, format!("post {id}"), sentiment, topic, ObservedAt::At(at))
}
