//! HTTP API server command

use std::path::PathBuf;

use chrono::Utc;

use bizpulse::api::ApiContext;
use bizpulse::config::Config;
use bizpulse::core::services::SentimentScorer;
use bizpulse::dataset;

use crate::server::tiny_http;

/// Command-line overrides for `serve`
#[derive(Debug, Default)]
pub struct ServeOptions {
    /// Interface to bind
    pub host: Option<String>,
    /// Port to bind
    pub port: Option<u16>,
    /// Posts file to preload
    pub posts: Option<PathBuf>,
    /// Preload the demo posts
    pub sample: bool,
}

/// Serve the JSON API until interrupted
pub fn serve(config: &Config, options: ServeOptions) -> anyhow::Result<()> {
    let posts = match (&options.posts, options.sample) {
        (Some(path), _) => {
            dataset::load_posts(path, &config.classifier(), &SentimentScorer::default(), Utc::now())?
        },
        (None, true) => dataset::sample_posts(),
        (None, false) => Vec::new(),
    };
    let mut ctx = ApiContext::from_config(config)?.with_posts(posts);

    let host = options.host.unwrap_or_else(|| config.server.host.clone());
    let port = options.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    println!("Serving bizpulse API on http://{addr}/api");
    println!("Press Ctrl+C to stop");
    tiny_http::serve(&mut ctx, &addr)
}
