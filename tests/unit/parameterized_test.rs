//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use bizpulse::core::models::{ObservedAt, SentimentLabel, TopicLabel};
use bizpulse::core::services::{Granularity, SentimentScorer, TopicClassifier, classify};
use test_case::test_case;

// =============================================================================
// Topic Classification
// =============================================================================

#[test_case("I need a business permit", TopicLabel::Permits ; "permit")]
#[test_case("When does my LICENSE expire?", TopicLabel::Permits ; "license uppercase")]
#[test_case("Any grants for bakeries?", TopicLabel::Funding ; "grant plural")]
#[test_case("How do I get a loan?", TopicLabel::Funding ; "loan")]
#[test_case("Is there a relief fund?", TopicLabel::Funding ; "fund")]
#[test_case("I want to learn bookkeeping", TopicLabel::Training ; "learn")]
#[test_case("Next workshop date?", TopicLabel::Training ; "workshop")]
#[test_case("Staff training options", TopicLabel::Training ; "train prefix")]
#[test_case("Sales tax question", TopicLabel::Taxes ; "tax")]
#[test_case("My store hours changed", TopicLabel::Support ; "catch all")]
#[test_case("", TopicLabel::Support ; "empty text")]
fn test_classify(text: &str, expected: TopicLabel) {
    assert_eq!(classify(text), expected);
}

#[test_case("I need a permit and also a grant", TopicLabel::Permits ; "permits beat funding")]
#[test_case("grant workshop", TopicLabel::Funding ; "funding beats training")]
#[test_case("training on taxes", TopicLabel::Training ; "training beats taxes")]
#[test_case("I don't need a permit", TopicLabel::Permits ; "negation ignored")]
fn test_classify_priority(text: &str, expected: TopicLabel) {
    assert_eq!(classify(text), expected);
}

#[test_case("tax loan permit", &[TopicLabel::Permits, TopicLabel::Funding, TopicLabel::Taxes] ; "rule order")]
#[test_case("grant or loan", &[TopicLabel::Funding] ; "deduplicated")]
#[test_case("hello", &[TopicLabel::Support] ; "fallback only")]
fn test_matching_topics(text: &str, expected: &[TopicLabel]) {
    assert_eq!(TopicClassifier::default().matching_topics(text), expected);
}

// =============================================================================
// Sentiment
// =============================================================================

#[test_case("This workshop was excellent", SentimentLabel::Positive ; "positive")]
#[test_case("The permit office is terrible", SentimentLabel::Negative ; "negative")]
#[test_case("Where is the permit office?", SentimentLabel::Neutral ; "no opinion")]
#[test_case("Not bad at all", SentimentLabel::Positive ; "negated negative")]
#[test_case("The portal is not helpful", SentimentLabel::Negative ; "negated positive")]
fn test_sentiment_label(text: &str, expected: SentimentLabel) {
    assert_eq!(SentimentScorer::default().label(text), expected);
}

// =============================================================================
// Label Parsing
// =============================================================================

#[test_case("permits", TopicLabel::Permits ; "lowercase")]
#[test_case("Funding", TopicLabel::Funding ; "capitalized")]
#[test_case(" TAXES ", TopicLabel::Taxes ; "padded uppercase")]
fn test_topic_parse(input: &str, expected: TopicLabel) {
    assert_eq!(input.parse::<TopicLabel>().unwrap(), expected);
}

#[test_case("zoning" ; "unknown topic")]
#[test_case("" ; "empty")]
fn test_topic_parse_rejects(input: &str) {
    assert!(input.parse::<TopicLabel>().is_err());
}

#[test_case("hour", Granularity::Hour ; "hour")]
#[test_case("daily", Granularity::Day ; "daily alias")]
#[test_case("Week", Granularity::Week ; "capitalized week")]
fn test_granularity_parse(input: &str, expected: Granularity) {
    assert_eq!(input.parse::<Granularity>().unwrap(), expected);
}

// =============================================================================
// Observation Times
// =============================================================================

#[test_case("2h ago", "2h ago" ; "hours")]
#[test_case("30m ago", "30m ago" ; "minutes")]
#[test_case("1d ago", "1d ago" ; "days")]
#[test_case("1w ago", "1w ago" ; "weeks")]
#[test_case("3 days ago", "3d ago" ; "long unit")]
#[test_case("2024-05-01T10:00:00Z", "2024-05-01T10:00:00+00:00" ; "rfc3339")]
fn test_observed_at_display(input: &str, expected: &str) {
    assert_eq!(input.parse::<ObservedAt>().unwrap().to_string(), expected);
}

#[test_case("soon" ; "word")]
#[test_case("h ago" ; "missing amount")]
#[test_case("5 fortnights ago" ; "unknown unit")]
fn test_observed_at_rejects(input: &str) {
    assert!(input.parse::<ObservedAt>().is_err());
}
