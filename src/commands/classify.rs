//! One-shot analysis commands

use anyhow::Context as _;

use bizpulse::api::{self, AnalyzeRequest, ApiContext, RecommendRequest};
use bizpulse::config::Config;
use bizpulse::output::OutputMode;

/// Classify topic and sentiment of a message
pub fn classify(config: &Config, text: &str, mode: OutputMode) -> anyhow::Result<()> {
    let ctx = ApiContext::from_config(config)?;
    let request = AnalyzeRequest {
        text: text.to_string(),
    };
    api::analyze(&ctx, &request).context("cannot classify")?.render(mode);
    Ok(())
}

/// Recommend resources for a question
pub fn recommend(config: &Config, query: &str, limit: usize, mode: OutputMode) -> anyhow::Result<()> {
    let ctx = ApiContext::from_config(config)?;
    let request = RecommendRequest {
        query: query.to_string(),
        limit: Some(limit),
    };
    api::recommend(&ctx, &request).context("cannot recommend")?.render(mode);
    Ok(())
}

/// List resources for one topic, or the whole catalog
pub fn resources(config: &Config, topic: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let ctx = ApiContext::from_config(config)?;
    match topic {
        Some(topic) => api::resources(&ctx, topic)?.render(mode),
        None => api::catalog(&ctx).render(mode),
    }
    Ok(())
}
