//! Sentiment aggregator service - rolling statistics over labeled posts
//!
//! Each ingested post increments exactly one cell of the overall sentiment
//! distribution, one cell of the topic distribution, and one hour-aligned
//! trend cell. Coarser trend granularities are rolled up from the hourly
//! cells at read time, so a post only ever touches its own bucket.
//!
//! Posts are not deduplicated: ingesting the same id twice counts twice.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::{ParseLabelError, Post, SentimentLabel, TopicLabel};

/// Width of a trend bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per UTC hour
    Hour,
    /// One bucket per UTC day
    #[default]
    Day,
    /// One bucket per ISO week (Monday 00:00 UTC)
    Week,
}

impl Granularity {
    /// Start of the bucket containing `at`
    #[must_use]
    pub fn bucket_start(self, at: DateTime<Utc>) -> DateTime<Utc> {
        let date = at.date_naive();
        match self {
            Self::Hour => {
                let hour = NaiveTime::from_hms_opt(at.hour(), 0, 0).unwrap_or_default();
                date.and_time(hour).and_utc()
            },
            Self::Day => date.and_time(NaiveTime::default()).and_utc(),
            Self::Week => {
                let back = Days::new(u64::from(date.weekday().num_days_from_monday()));
                date.checked_sub_days(back)
                    .unwrap_or(date)
                    .and_time(NaiveTime::default())
                    .and_utc()
            },
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hour => write!(f, "hour"),
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hour" | "hourly" => Ok(Self::Hour),
            "day" | "daily" => Ok(Self::Day),
            "week" | "weekly" => Ok(Self::Week),
            _ => Err(ParseLabelError::new("granularity", s, "hour, day, week")),
        }
    }
}

/// Counts per label, every label present even at zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution<K: Ord> {
    counts: BTreeMap<K, u64>,
    total: u64,
}

impl<K: Ord + Copy> Distribution<K> {
    /// Distribution with a zero cell for each label
    pub fn zeroed(labels: impl IntoIterator<Item = K>) -> Self {
        Self {
            counts: labels.into_iter().map(|k| (k, 0)).collect(),
            total: 0,
        }
    }

    fn record(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
        self.total += 1;
    }

    /// Count for one label
    #[must_use]
    pub fn count(&self, key: K) -> u64 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Sum of all counts
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Share of one label in percent, one decimal; 0.0 when empty
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self, key: K) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let share = self.count(key) as f64 / self.total as f64 * 100.0;
        (share * 10.0).round() / 10.0
    }

    /// Percent share of every label
    #[must_use]
    pub fn percentages(&self) -> BTreeMap<K, f64> {
        self.counts.keys().map(|&k| (k, self.percentage(k))).collect()
    }

    /// Raw counts
    #[must_use]
    pub const fn counts(&self) -> &BTreeMap<K, u64> {
        &self.counts
    }

    /// `(label, count)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (K, u64)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }
}

/// Overall or per-topic sentiment counts
pub type SentimentDistribution = Distribution<SentimentLabel>;

/// Post counts per topic
pub type TopicDistribution = Distribution<TopicLabel>;

/// Sentiment counts for one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// Start of the bucket
    pub bucket: DateTime<Utc>,
    /// Counts per sentiment label
    pub counts: BTreeMap<SentimentLabel, u64>,
}

impl TrendPoint {
    fn empty(bucket: DateTime<Utc>) -> Self {
        Self {
            bucket,
            counts: SentimentLabel::ALL.into_iter().map(|s| (s, 0)).collect(),
        }
    }

    /// Count for one label in this bucket
    #[must_use]
    pub fn count(&self, sentiment: SentimentLabel) -> u64 {
        self.counts.get(&sentiment).copied().unwrap_or(0)
    }

    /// Posts in this bucket
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Streaming statistics over labeled posts
#[derive(Debug, Clone)]
pub struct SentimentAggregator {
    reference: DateTime<Utc>,
    overall: SentimentDistribution,
    topics: TopicDistribution,
    by_topic: BTreeMap<TopicLabel, SentimentDistribution>,
    hourly: BTreeMap<DateTime<Utc>, TrendPoint>,
}

impl SentimentAggregator {
    /// Empty aggregator; relative post ages resolve against `reference`
    #[must_use]
    pub fn new(reference: DateTime<Utc>) -> Self {
        Self {
            reference,
            overall: Distribution::zeroed(SentimentLabel::ALL),
            topics: Distribution::zeroed(TopicLabel::ALL),
            by_topic: TopicLabel::ALL
                .into_iter()
                .map(|t| (t, Distribution::zeroed(SentimentLabel::ALL)))
                .collect(),
            hourly: BTreeMap::new(),
        }
    }

    /// Instant that relative ages count back from
    #[must_use]
    pub const fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    /// Count one post
    pub fn ingest_post(&mut self, post: &Post) {
        let observed = post.observed_at.resolve(self.reference);
        let bucket = Granularity::Hour.bucket_start(observed);

        self.overall.record(post.sentiment);
        self.topics.record(post.topic);
        if let Some(dist) = self.by_topic.get_mut(&post.topic) {
            dist.record(post.sentiment);
        }
        let point = self.hourly.entry(bucket).or_insert_with(|| TrendPoint::empty(bucket));
        *point.counts.entry(post.sentiment).or_insert(0) += 1;

        log::debug!(
            "ingested post {} ({}, {}) into bucket {}",
            post.id,
            post.sentiment,
            post.topic,
            bucket.to_rfc3339()
        );
    }

    /// Count every post of an iterator
    pub fn ingest_all<'p>(&mut self, posts: impl IntoIterator<Item = &'p Post>) {
        for post in posts {
            self.ingest_post(post);
        }
    }

    /// Number of posts ingested
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.overall.total()
    }

    /// Whether nothing has been ingested
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.overall.total() == 0
    }

    /// Sentiment counts across all posts
    #[must_use]
    pub const fn overall_distribution(&self) -> &SentimentDistribution {
        &self.overall
    }

    /// Post counts per topic
    #[must_use]
    pub const fn topic_distribution(&self) -> &TopicDistribution {
        &self.topics
    }

    /// Sentiment counts restricted to one topic
    #[must_use]
    pub fn sentiment_by_topic(&self, topic: TopicLabel) -> SentimentDistribution {
        self.by_topic
            .get(&topic)
            .cloned()
            .unwrap_or_else(|| Distribution::zeroed(SentimentLabel::ALL))
    }

    /// Share of positive posts in percent, one decimal
    #[must_use]
    pub fn positive_percentage(&self) -> f64 {
        self.overall.percentage(SentimentLabel::Positive)
    }

    /// Chronological sentiment counts at the given bucket width
    #[must_use]
    pub fn trend(&self, granularity: Granularity) -> Vec<TrendPoint> {
        let mut rolled: BTreeMap<DateTime<Utc>, TrendPoint> = BTreeMap::new();
        for (hour, point) in &self.hourly {
            let bucket = granularity.bucket_start(*hour);
            let target = rolled.entry(bucket).or_insert_with(|| TrendPoint::empty(bucket));
            for (sentiment, count) in &point.counts {
                *target.counts.entry(*sentiment).or_insert(0) += count;
            }
        }
        rolled.into_values().collect()
    }
}

impl Default for SentimentAggregator {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}
