//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::{
    ConversationState, ConversationTurn, Post, ResourceEntry, SentimentLabel, TopicLabel,
};
use crate::core::services::{Granularity, Recommendation, SentimentScore, TrendPoint};

use super::error::ApiErrorData;

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for `/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Text to analyze
    #[serde(default)]
    pub text: String,
}

/// Request body for `/recommend`
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Free-text question
    #[serde(default)]
    pub query: String,
    /// Maximum number of recommendations (default 3)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request body for `POST /chat`
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Message typed by the user
    #[serde(default)]
    pub text: String,
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Health endpoint response data
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthData {
    /// Always `healthy` when the server answers
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Server time
    pub timestamp: DateTime<Utc>,
}

/// Analysis of one text
#[derive(Debug, Serialize)]
pub struct AnalyzeData {
    /// The analyzed text
    pub text: String,
    /// Sentiment label and polarity
    pub sentiment: SentimentScore,
    /// First-match topic
    pub topic: TopicLabel,
    /// Every matching topic, in rule order
    pub topics: Vec<TopicLabel>,
}

/// Recommendations for a query
#[derive(Debug, Serialize)]
pub struct RecommendData {
    /// The query
    pub query: String,
    /// Sentiment of the query
    pub sentiment: SentimentScore,
    /// Topics the query matched
    pub topics: Vec<TopicLabel>,
    /// Ranked resources, best first
    pub recommendations: Vec<Recommendation>,
}

/// Catalog entries for one topic
#[derive(Debug, Serialize)]
pub struct ResourcesData {
    /// Requested topic
    pub topic: TopicLabel,
    /// Entries in display order
    pub resources: Vec<ResourceEntry>,
}

/// Full catalog
#[derive(Debug, Serialize)]
pub struct CatalogData {
    /// Entries per topic
    pub topics: BTreeMap<TopicLabel, Vec<ResourceEntry>>,
}

/// Aggregate statistics
#[derive(Debug, Serialize)]
pub struct StatisticsData {
    /// Posts ingested
    pub total_posts: u64,
    /// Count per sentiment
    pub sentiment_breakdown: BTreeMap<SentimentLabel, u64>,
    /// Percent per sentiment
    pub sentiment_percentages: BTreeMap<SentimentLabel, f64>,
    /// Count per topic
    pub topic_breakdown: BTreeMap<TopicLabel, u64>,
    /// Sentiment counts within each topic
    pub sentiment_by_topic: BTreeMap<TopicLabel, BTreeMap<SentimentLabel, u64>>,
    /// Share of positive posts in percent
    pub overall_sentiment_percentage: f64,
}

/// Sentiment over time
#[derive(Debug, Serialize)]
pub struct TrendData {
    /// Bucket width
    pub granularity: Granularity,
    /// Chronological points
    pub points: Vec<TrendPoint>,
}

/// Ingested posts
#[derive(Debug, Serialize)]
pub struct PostsData {
    /// Posts, oldest ingestion first
    pub posts: Vec<Post>,
    /// Posts ingested in total
    pub total: usize,
}

/// Result of ingesting one post
#[derive(Debug, Serialize)]
pub struct IngestData {
    /// The post as stored, labels filled in
    pub post: Post,
    /// Posts ingested so far
    pub total_posts: u64,
}

/// Snapshot of the chat session
#[derive(Debug, Serialize)]
pub struct ChatData {
    /// Current state
    pub state: ConversationState,
    /// Whether to show the typing indicator
    pub composing: bool,
    /// Milliseconds until the pending response, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_in_ms: Option<u64>,
    /// Transcript, oldest first
    pub transcript: Vec<ConversationTurn>,
}
