//! Recommender service - ranks catalog entries for a free-text query
//!
//! Candidates are the entries of every topic the query matches, in rule
//! order. Queries asking for help also draw from the support topic even
//! when another rule matched first. Each candidate scores one point per
//! keyword found in the query; candidates are then stably sorted by score
//! so ties keep catalog order.

use serde::Serialize;

use crate::core::models::{ResourceEntry, TopicLabel};

use super::{ResourceCatalog, TopicClassifier};

/// Number of recommendations returned when the caller does not say
pub const DEFAULT_LIMIT: usize = 3;

/// Words that pull the support topic into a recommendation
const SUPPORT_TRIGGERS: [&str; 8] =
    ["help", "support", "assistance", "advisor", "mentor", "guidance", "hotline", "question"];

/// A ranked catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// The resource
    #[serde(flatten)]
    pub entry: ResourceEntry,
    /// Topic the resource was drawn from
    pub topic: TopicLabel,
    /// Keyword hits against the query
    pub relevance_score: usize,
}

/// Ranks resources against queries
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    classifier: &'a TopicClassifier,
    catalog: &'a ResourceCatalog,
}

impl<'a> Recommender<'a> {
    /// Create a recommender over a classifier and catalog
    #[must_use]
    pub const fn new(classifier: &'a TopicClassifier, catalog: &'a ResourceCatalog) -> Self {
        Self {
            classifier,
            catalog,
        }
    }

    /// Top `limit` resources for `query`, best first
    #[must_use]
    pub fn recommend(&self, query: &str, limit: usize) -> Vec<Recommendation> {
        let topics = self.topics(query);
        self.rank(query, &topics, limit)
    }

    /// Topics `query` draws candidates from
    ///
    /// The classifier's matches, followed by [`TopicLabel::Support`] when
    /// the query asks for help and support is not already among them.
    #[must_use]
    pub fn topics(&self, query: &str) -> Vec<TopicLabel> {
        let mut topics = self.classifier.matching_topics(query);
        let lowered = query.to_lowercase();
        if !topics.contains(&TopicLabel::Support)
            && SUPPORT_TRIGGERS.iter().any(|t| lowered.contains(t))
        {
            topics.push(TopicLabel::Support);
        }
        topics
    }

    /// Top `limit` resources drawn from `topics`, best first
    #[must_use]
    pub fn rank(&self, query: &str, topics: &[TopicLabel], limit: usize) -> Vec<Recommendation> {
        let lowered = query.to_lowercase();
        let mut candidates: Vec<Recommendation> = topics
            .iter()
            .flat_map(|&topic| {
                self.catalog.lookup(topic).iter().map(move |entry| Recommendation {
                    entry: entry.clone(),
                    topic,
                    relevance_score: 0,
                })
            })
            .collect();

        for candidate in &mut candidates {
            candidate.relevance_score = candidate.entry.relevance(&lowered);
        }

        // sort_by is stable: equal scores keep topic/catalog order
        candidates.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
        candidates.truncate(limit);

        log::debug!(
            "recommend: {} candidate topic(s), returning {}",
            topics.len(),
            candidates.len()
        );
        candidates
    }
}
