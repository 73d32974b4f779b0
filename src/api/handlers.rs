//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take typed input and return `Result<T, ApiError>`.

use chrono::Utc;

use crate::VERSION;
use crate::core::models::TopicLabel;
use crate::core::services::{DEFAULT_LIMIT, Granularity, Recommender};
use crate::dataset::RawPost;

use super::context::ApiContext;
use super::error::ApiError;
use super::types::{
    AnalyzeData, AnalyzeRequest, CatalogData, ChatData, ChatRequest, HealthData, IngestData,
    PostsData, RecommendData, RecommendRequest, ResourcesData, StatisticsData, TrendData,
};

// =============================================================================
// HEALTH
// =============================================================================

/// Liveness probe
#[must_use]
pub fn health() -> HealthData {
    HealthData {
        status: "healthy",
        version: VERSION,
        timestamp: Utc::now(),
    }
}

// =============================================================================
// ANALYSIS
// =============================================================================

/// Score sentiment and extract topics
pub fn analyze(ctx: &ApiContext, req: &AnalyzeRequest) -> Result<AnalyzeData, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::bad_request("No text provided"));
    }

    Ok(AnalyzeData {
        text: req.text.clone(),
        sentiment: ctx.scorer.score(&req.text),
        topic: ctx.classifier.classify(&req.text),
        topics: ctx.classifier.matching_topics(&req.text),
    })
}

/// Rank resources for a question
pub fn recommend(ctx: &ApiContext, req: &RecommendRequest) -> Result<RecommendData, ApiError> {
    if req.query.trim().is_empty() {
        return Err(ApiError::bad_request("No query provided"));
    }

    let recommender = Recommender::new(&ctx.classifier, &ctx.catalog);
    let topics = recommender.topics(&req.query);
    let recommendations = recommender.rank(
        &req.query,
        &topics,
        req.limit.unwrap_or(DEFAULT_LIMIT),
    );

    Ok(RecommendData {
        query: req.query.clone(),
        sentiment: ctx.scorer.score(&req.query),
        topics,
        recommendations,
    })
}

// =============================================================================
// CATALOG
// =============================================================================

/// Resources for one topic
pub fn resources(ctx: &ApiContext, topic: &str) -> Result<ResourcesData, ApiError> {
    let topic: TopicLabel = topic
        .parse()
        .map_err(|_| ApiError::not_found(format!("Topic '{topic}' not found")))?;

    Ok(ResourcesData {
        topic,
        resources: ctx.catalog.lookup(topic).to_vec(),
    })
}

/// Every topic with its resources
#[must_use]
pub fn catalog(ctx: &ApiContext) -> CatalogData {
    CatalogData {
        topics: ctx.catalog.iter().map(|(topic, list)| (topic, list.to_vec())).collect(),
    }
}

// =============================================================================
// POSTS & STATISTICS
// =============================================================================

/// Ingested posts, at most `count`
#[must_use]
pub fn posts(ctx: &ApiContext, count: Option<usize>) -> PostsData {
    let count = count.unwrap_or(ctx.posts.len());
    PostsData {
        posts: ctx.posts.iter().take(count).cloned().collect(),
        total: ctx.posts.len(),
    }
}

/// Label and ingest one post
pub fn ingest_post(ctx: &mut ApiContext, raw: RawPost) -> Result<IngestData, ApiError> {
    let post = raw
        .label(&ctx.classifier, &ctx.scorer, ctx.clock.utc_now())
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    ctx.record(post.clone());

    Ok(IngestData {
        post,
        total_posts: ctx.aggregator.len(),
    })
}

/// Sentiment and topic breakdowns
#[must_use]
pub fn statistics(ctx: &ApiContext) -> StatisticsData {
    let aggregator = &ctx.aggregator;
    let overall = aggregator.overall_distribution();

    StatisticsData {
        total_posts: aggregator.len(),
        sentiment_breakdown: overall.counts().clone(),
        sentiment_percentages: overall.percentages(),
        topic_breakdown: aggregator.topic_distribution().counts().clone(),
        sentiment_by_topic: TopicLabel::ALL
            .into_iter()
            .map(|topic| (topic, aggregator.sentiment_by_topic(topic).counts().clone()))
            .collect(),
        overall_sentiment_percentage: aggregator.positive_percentage(),
    }
}

/// Sentiment trend at the requested or configured granularity
pub fn trend(ctx: &ApiContext, granularity: Option<&str>) -> Result<TrendData, ApiError> {
    let granularity = match granularity {
        Some(raw) => raw
            .parse::<Granularity>()
            .map_err(|e| ApiError::bad_request(e.to_string()))?,
        None => ctx.granularity,
    };

    Ok(TrendData {
        granularity,
        points: ctx.aggregator.trend(granularity),
    })
}

// =============================================================================
// CHAT
// =============================================================================

/// Submit a chat message
pub fn submit_chat(ctx: &mut ApiContext, req: &ChatRequest) -> Result<ChatData, ApiError> {
    ctx.engine.submit_message(&req.text)?;
    Ok(chat_snapshot(ctx))
}

/// Current chat session, delivering the pending response when due
pub fn chat_status(ctx: &mut ApiContext) -> ChatData {
    ctx.engine.poll();
    chat_snapshot(ctx)
}

fn chat_snapshot(ctx: &ApiContext) -> ChatData {
    let engine = &ctx.engine;
    ChatData {
        state: engine.current_state(),
        composing: engine.is_composing(),
        response_in_ms: engine
            .time_until_response()
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
        transcript: engine.transcript().to_vec(),
    }
}
