//! Business logic services
//!
//! Pure logic operating on domain models. Nothing here performs I/O; time
//! is read through the [`Clock`](crate::core::ports::Clock) port.
//!
//! - [`classifier`] - Text to topic label
//! - [`catalog`] - Topic to resource list
//! - [`sentiment`] - Lexicon sentiment scoring
//! - [`recommender`] - Keyword-ranked resources for a query
//! - [`aggregator`] - Sentiment and topic statistics over posts
//! - [`conversation`] - Chat turn-taking state machine

pub mod aggregator;
pub mod catalog;
pub mod classifier;
pub mod conversation;
pub mod recommender;
pub mod sentiment;

pub use aggregator::{
    Distribution, Granularity, SentimentAggregator, SentimentDistribution, TopicDistribution,
    TrendPoint,
};
pub use catalog::{CatalogError, ResourceCatalog, builtin_entries};
pub use classifier::{TopicClassifier, TopicRule, classify, default_rules};
pub use conversation::{
    ConversationEngine, ConversationError, ConversationSettings, DEFAULT_ACKNOWLEDGMENT,
    DEFAULT_GREETING, Delivery, ResponsePolicy,
};
pub use recommender::{DEFAULT_LIMIT, Recommendation, Recommender};
pub use sentiment::{POLARITY_THRESHOLD, SentimentLexicon, SentimentScore, SentimentScorer};
