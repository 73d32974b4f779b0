//! State shared by the API handlers

use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::core::models::Post;
use crate::core::ports::{Clock, SystemClock};
use crate::core::services::{
    ConversationEngine, ConversationSettings, Granularity, ResourceCatalog, SentimentAggregator,
    SentimentScorer, TopicClassifier,
};

/// Everything one API instance serves from
///
/// Owns a single aggregator and a single chat session.
#[derive(Debug)]
pub struct ApiContext {
    pub(super) classifier: Arc<TopicClassifier>,
    pub(super) catalog: Arc<ResourceCatalog>,
    pub(super) scorer: SentimentScorer,
    pub(super) aggregator: SentimentAggregator,
    pub(super) posts: Vec<Post>,
    pub(super) engine: ConversationEngine,
    pub(super) granularity: Granularity,
    pub(super) clock: Arc<dyn Clock>,
}

impl ApiContext {
    /// Context with explicit parts
    #[must_use]
    pub fn new(
        classifier: Arc<TopicClassifier>,
        catalog: Arc<ResourceCatalog>,
        settings: ConversationSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let engine = ConversationEngine::new(
            Arc::clone(&classifier),
            Arc::clone(&catalog),
            Arc::clone(&clock),
            settings,
        );
        Self {
            classifier,
            catalog,
            scorer: SentimentScorer::default(),
            aggregator: SentimentAggregator::new(clock.utc_now()),
            posts: Vec::new(),
            engine,
            granularity: Granularity::default(),
            clock,
        }
    }

    /// Context built from configuration, on the wall clock
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut context = Self::new(
            Arc::new(config.classifier()),
            Arc::new(config.catalog()?),
            config.conversation_settings(),
            Arc::new(SystemClock),
        );
        context.granularity = config.aggregator.granularity;
        Ok(context)
    }

    /// Ingest posts up front
    #[must_use]
    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        for post in posts {
            self.record(post);
        }
        self
    }

    pub(super) fn record(&mut self, post: Post) {
        self.aggregator.ingest_post(&post);
        self.posts.push(post);
    }

    /// The aggregator behind `/statistics` and `/trend`
    #[must_use]
    pub const fn aggregator(&self) -> &SentimentAggregator {
        &self.aggregator
    }

    /// The chat session behind `/chat`
    #[must_use]
    pub const fn engine(&self) -> &ConversationEngine {
        &self.engine
    }
}

impl Default for ApiContext {
    fn default() -> Self {
        Self::new(
            Arc::default(),
            Arc::default(),
            ConversationSettings::default(),
            Arc::new(SystemClock),
        )
    }
}
