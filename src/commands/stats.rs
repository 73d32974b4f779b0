//! Statistics over a post dataset

use std::path::Path;

use chrono::Utc;

use bizpulse::api::{self, ApiContext};
use bizpulse::config::Config;
use bizpulse::core::services::SentimentScorer;
use bizpulse::dataset;
use bizpulse::output::{OutputMode, StatsReport};

/// Show sentiment, topic and trend statistics
pub fn stats(
    config: &Config,
    posts: Option<&Path>,
    granularity: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let ctx = ApiContext::from_config(config)?;
    let posts = match posts {
        Some(path) => dataset::load_posts(path, &config.classifier(), &SentimentScorer::default(), Utc::now())?,
        None => {
            log::info!("no posts file given, using demo posts");
            dataset::sample_posts()
        },
    };
    let ctx = ctx.with_posts(posts);

    StatsReport {
        statistics: api::statistics(&ctx),
        trend: api::trend(&ctx, granularity)?,
    }
    .render(mode);
    Ok(())
}
