//! Post datasets
//!
//! Loads externally collected posts from disk and labels the ones that
//! arrive without a sentiment or topic. Accepted layouts:
//!
//! - a JSON array of posts
//! - a JSON object with a `posts` array
//! - JSON Lines (`.jsonl`), one post per line, blank lines skipped
//!
//! The timestamp field may be called `observed_at`, `created_at` or
//! `timestamp`, and holds either an RFC 3339 instant or a relative age
//! such as `"2h ago"`. Relative ages are pinned to an absolute instant
//! when the post is labeled, and posts without a timestamp are stamped
//! with that same instant.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::core::models::{ObservedAt, ObservedAtError, Post, SentimentLabel, TopicLabel};
use crate::core::services::{SentimentScorer, TopicClassifier};

/// Errors raised while loading posts
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid post JSON
    #[error("failed to parse {}{}: {source}", path.display(), line.map(|l| format!(" line {l}")).unwrap_or_default())]
    Parse {
        /// File that was parsed
        path: PathBuf,
        /// 1-based line for JSON Lines input
        line: Option<usize>,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A post has no text
    #[error("post {0} has empty text")]
    EmptyText(String),

    /// A post timestamp is unreadable
    #[error("post {id}: {source}")]
    Timestamp {
        /// Offending post
        id: String,
        /// Why the timestamp was rejected
        #[source]
        source: ObservedAtError,
    },
}

/// Post identifier as sources emit it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Numeric id (tweets, prototype data)
    Number(u64),
    /// String id (reddit, generated data)
    Text(String),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A post as found in a dataset file, labels optional
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawPost {
    /// Source identifier
    pub id: RawId,
    /// Post body
    pub text: String,
    /// Sentiment, when already labeled
    #[serde(default)]
    pub sentiment: Option<SentimentLabel>,
    /// Topic, when already labeled
    #[serde(default)]
    pub topic: Option<TopicLabel>,
    /// Absolute or relative timestamp
    #[serde(default, alias = "created_at", alias = "timestamp")]
    pub observed_at: Option<String>,
    /// Originating platform
    #[serde(default)]
    pub source: Option<String>,
}

impl RawPost {
    /// Fill in missing labels and validate
    ///
    /// `now` is the instant relative and missing timestamps are counted from.
    pub fn label(
        self,
        classifier: &TopicClassifier,
        scorer: &SentimentScorer,
        now: DateTime<Utc>,
    ) -> Result<Post, DatasetError> {
        let id = self.id.to_string();
        if self.text.trim().is_empty() {
            return Err(DatasetError::EmptyText(id));
        }
        let observed_at = match self.observed_at.as_deref() {
            Some(raw) => raw
                .parse::<ObservedAt>()
                .map_err(|source| DatasetError::Timestamp { id: id.clone(), source })?
                .resolve(now),
            None => now,
        };
        let sentiment = self.sentiment.unwrap_or_else(|| scorer.label(&self.text));
        let topic = self.topic.unwrap_or_else(|| classifier.classify(&self.text));

        let post = Post::new(id, self.text, sentiment, topic, ObservedAt::At(observed_at));
        Ok(match self.source {
            Some(source) => post.with_source(source),
            None => post,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    List(Vec<RawPost>),
    Wrapped { posts: Vec<RawPost> },
}

/// Read raw posts from a file without labeling them
pub fn read_raw(path: &Path) -> Result<Vec<RawPost>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl")) {
        return content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|source| DatasetError::Parse {
                    path: path.to_path_buf(),
                    line: Some(index + 1),
                    source,
                })
            })
            .collect();
    }

    let document: Document = serde_json::from_str(&content).map_err(|source| {
        DatasetError::Parse {
            path: path.to_path_buf(),
            line: None,
            source,
        }
    })?;
    Ok(match document {
        Document::List(posts) | Document::Wrapped { posts } => posts,
    })
}

/// Read and label every post of a file, pinning relative ages to `now`
pub fn load_posts(
    path: &Path,
    classifier: &TopicClassifier,
    scorer: &SentimentScorer,
    now: DateTime<Utc>,
) -> Result<Vec<Post>, DatasetError> {
    let posts = read_raw(path)?
        .into_iter()
        .map(|raw| raw.label(classifier, scorer, now))
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("loaded {} posts from {}", posts.len(), path.display());
    Ok(posts)
}

/// The eight labeled demo posts, with relative ages
#[must_use]
pub fn sample_posts() -> Vec<Post> {
    use SentimentLabel::{Negative, Positive};
    use TopicLabel::{Funding, Permits, Support, Taxes, Training};

    let rows: [(&str, SentimentLabel, TopicLabel, &str); 8] = [
        (
            "Just got my business license approved! The online portal made it so easy. Thank you Miami-Dade!",
            Positive,
            Permits,
            "2h ago",
        ),
        (
            "Still waiting on my permit approval. It's been 3 weeks. This is frustrating.",
            Negative,
            Permits,
            "5h ago",
        ),
        (
            "The small business grant workshop was incredibly helpful. Learned so much!",
            Positive,
            Funding,
            "1d ago",
        ),
        (
            "Why is the business tax process so complicated? Need more guidance.",
            Negative,
            Taxes,
            "1d ago",
        ),
        (
            "Attended the entrepreneur training session. Great resources available!",
            Positive,
            Training,
            "2d ago",
        ),
        (
            "County website is confusing. Can't find information about health permits.",
            Negative,
            Permits,
            "3d ago",
        ),
        (
            "Got connected with a business advisor through the county. Game changer!",
            Positive,
            Support,
            "3d ago",
        ),
        (
            "The pandemic relief program saved my restaurant. Forever grateful.",
            Positive,
            Funding,
            "4d ago",
        ),
    ];

    rows.into_iter()
        .enumerate()
        .filter_map(|(index, (text, sentiment, topic, age))| {
            let observed_at = age.parse().ok()?;
            Some(Post::new((index + 1).to_string(), text, sentiment, topic, observed_at))
        })
        .collect()
}
