//! Post model
//!
//! A labeled social post, as produced by an external ingestion pipeline.
//! Posts are immutable once created; the aggregator only reads them.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{SentimentLabel, TopicLabel};

/// Errors that can occur when parsing an observation time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservedAtError {
    /// Input was empty
    #[error("empty timestamp")]
    Empty,

    /// Neither a timestamp nor a relative age like `2h ago`
    #[error("unrecognized timestamp: {0}")]
    Unrecognized(String),
}

/// Unit of a relative age
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeUnit {
    /// Minutes (`m`, `min`, `minutes`)
    Minutes,
    /// Hours (`h`, `hr`, `hours`)
    Hours,
    /// Days (`d`, `day`, `days`)
    Days,
    /// Weeks (`w`, `week`, `weeks`)
    Weeks,
}

impl AgeUnit {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "m" | "min" | "mins" | "minute" | "minutes" => Some(Self::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(Self::Hours),
            "d" | "day" | "days" => Some(Self::Days),
            "w" | "wk" | "week" | "weeks" => Some(Self::Weeks),
            _ => None,
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Self::Minutes => "m",
            Self::Hours => "h",
            Self::Days => "d",
            Self::Weeks => "w",
        }
    }
}

/// An age relative to some reference instant, e.g. `2h ago`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeAge {
    /// Number of units
    pub amount: u32,
    /// Unit of `amount`
    pub unit: AgeUnit,
}

impl RelativeAge {
    /// Create a relative age
    #[must_use]
    pub const fn new(amount: u32, unit: AgeUnit) -> Self {
        Self { amount, unit }
    }

    /// Age as a signed duration
    #[must_use]
    pub fn as_delta(self) -> TimeDelta {
        let amount = i64::from(self.amount);
        let delta = match self.unit {
            AgeUnit::Minutes => TimeDelta::try_minutes(amount),
            AgeUnit::Hours => TimeDelta::try_hours(amount),
            AgeUnit::Days => TimeDelta::try_days(amount),
            AgeUnit::Weeks => TimeDelta::try_weeks(amount),
        };
        delta.unwrap_or(TimeDelta::MAX)
    }

    /// The instant this age points at, counted back from `reference`
    #[must_use]
    pub fn before(self, reference: DateTime<Utc>) -> DateTime<Utc> {
        reference.checked_sub_signed(self.as_delta()).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    fn parse(input: &str) -> Option<Self> {
        let lowered = input.trim().to_lowercase();
        if lowered == "just now" || lowered == "now" {
            return Some(Self::new(0, AgeUnit::Minutes));
        }

        let body = lowered.strip_suffix("ago").unwrap_or(&lowered).trim();
        let digits_end = body.find(|c: char| !c.is_ascii_digit()).unwrap_or(body.len());
        if digits_end == 0 {
            return None;
        }
        let amount = body[..digits_end].parse().ok()?;
        let unit = AgeUnit::parse(body[digits_end..].trim())?;
        Some(Self::new(amount, unit))
    }
}

impl std::fmt::Display for RelativeAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{} ago", self.amount, self.unit.suffix())
    }
}

/// When a post was observed: an absolute instant or an age like `1d ago`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ObservedAt {
    /// Absolute UTC instant
    At(DateTime<Utc>),
    /// Age relative to the reader's reference instant
    Ago(RelativeAge),
}

impl ObservedAt {
    /// Resolve to an absolute instant, counting relative ages back from `reference`
    #[must_use]
    pub fn resolve(self, reference: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::At(at) => at,
            Self::Ago(age) => age.before(reference),
        }
    }
}

impl std::str::FromStr for ObservedAt {
    type Err = ObservedAtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ObservedAtError::Empty);
        }

        if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::At(at.with_timezone(&Utc)));
        }

        // Naive ISO timestamps (no offset) are taken as UTC
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self::At(naive.and_utc()));
        }

        RelativeAge::parse(trimmed)
            .map(Self::Ago)
            .ok_or_else(|| ObservedAtError::Unrecognized(trimmed.to_string()))
    }
}

impl TryFrom<String> for ObservedAt {
    type Error = ObservedAtError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ObservedAt> for String {
    fn from(value: ObservedAt) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for ObservedAt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::At(at) => f.write_str(&at.to_rfc3339()),
            Self::Ago(age) => write!(f, "{age}"),
        }
    }
}

impl From<DateTime<Utc>> for ObservedAt {
    fn from(value: DateTime<Utc>) -> Self {
        Self::At(value)
    }
}

/// A labeled post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Identifier assigned by the ingestion source
    pub id: String,

    /// Post body (non-empty)
    pub text: String,

    /// Sentiment label
    pub sentiment: SentimentLabel,

    /// Topic label
    pub topic: TopicLabel,

    /// When the post was observed
    pub observed_at: ObservedAt,

    /// Where the post came from (`twitter`, `reddit`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Post {
    /// Create a post without a source
    ///
    /// The text is stored as given. Callers that accept outside input go
    /// through [`RawPost::label`](crate::dataset::RawPost::label), which
    /// rejects blank text.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        sentiment: SentimentLabel,
        topic: TopicLabel,
        observed_at: ObservedAt,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            sentiment,
            topic,
            observed_at,
            source: None,
        }
    }

    /// Attach a source name
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
