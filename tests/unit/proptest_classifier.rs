//! Property-based tests for classification and aggregation
//!
//! Uses proptest to verify properties that should hold for all inputs.

use bizpulse::core::models::{ObservedAt, Post, RelativeAge, AgeUnit, SentimentLabel, TopicLabel};
use bizpulse::core::services::{
    Granularity, ResourceCatalog, SentimentAggregator, SentimentScorer, TopicClassifier, classify,
};
use proptest::prelude::*;

use crate::common::reference;

fn sentiment() -> impl Strategy<Value = SentimentLabel> {
    prop::sample::select(SentimentLabel::ALL.to_vec())
}

fn topic() -> impl Strategy<Value = TopicLabel> {
    prop::sample::select(TopicLabel::ALL.to_vec())
}

fn post() -> impl Strategy<Value = Post> {
    (sentiment(), topic(), 0u32..500).prop_map(|(sentiment, topic, hours)| {
        let age = ObservedAt::Ago(RelativeAge::new(hours, AgeUnit::Hours));
        Post::new("p", "text", sentiment, topic, age)
    })
}

proptest! {
    /// Classification is a pure function of the text
    #[test]
    fn classify_is_deterministic(text in ".{0,80}") {
        prop_assert_eq!(classify(&text), classify(&text));
    }

    /// Case never changes the label
    #[test]
    fn classify_ignores_ascii_case(text in "[a-zA-Z ]{0,60}") {
        prop_assert_eq!(classify(&text.to_uppercase()), classify(&text.to_lowercase()));
    }

    /// Text without any trigger falls into support
    #[test]
    fn no_trigger_means_support(text in "[xyz0-9 ]{0,40}") {
        prop_assert_eq!(classify(&text), TopicLabel::Support);
    }

    /// The first matching topic is always among the matching topics
    #[test]
    fn first_match_is_listed(text in "(permit|grant|learn|tax|hello| ){0,8}") {
        let classifier = TopicClassifier::default();
        let all = classifier.matching_topics(&text);
        prop_assert_eq!(all.first().copied(), Some(classifier.classify(&text)));
    }

    /// Every classification result has resources to show
    #[test]
    fn every_label_has_resources(text in ".{0,80}") {
        let catalog = ResourceCatalog::default();
        prop_assert!(!catalog.lookup(classify(&text)).is_empty());
    }

    /// Polarity stays within [-1, 1] and matches its label
    #[test]
    fn polarity_is_bounded(text in "(good|bad|not|great|slow|the|permit| ){0,20}") {
        let score = SentimentScorer::default().score(&text);
        prop_assert!((-1.0..=1.0).contains(&score.polarity));
        prop_assert_eq!(score.sentiment, bizpulse::core::services::SentimentScore::label_for(score.polarity));
    }

    /// Overall counts always sum to the number of posts ingested
    #[test]
    fn aggregator_sum_invariant(posts in prop::collection::vec(post(), 0..60)) {
        let mut aggregator = SentimentAggregator::new(reference());
        aggregator.ingest_all(&posts);

        let overall: u64 = aggregator.overall_distribution().iter().map(|(_, c)| c).sum();
        let topics: u64 = aggregator.topic_distribution().iter().map(|(_, c)| c).sum();
        prop_assert_eq!(overall, posts.len() as u64);
        prop_assert_eq!(topics, posts.len() as u64);

        for granularity in [Granularity::Hour, Granularity::Day, Granularity::Week] {
            let trend: u64 = aggregator.trend(granularity).iter().map(|p| p.total()).sum();
            prop_assert_eq!(trend, posts.len() as u64);
        }
    }

    /// Trend points are strictly chronological
    #[test]
    fn trend_is_chronological(posts in prop::collection::vec(post(), 0..60)) {
        let mut aggregator = SentimentAggregator::new(reference());
        aggregator.ingest_all(&posts);
        let trend = aggregator.trend(Granularity::Day);
        prop_assert!(trend.windows(2).all(|w| w[0].bucket < w[1].bucket));
    }
}
