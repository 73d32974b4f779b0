//! Topic classifier service - maps raw text to a topic label
//!
//! Classification is a single pass over an ordered rule table. Each rule is
//! a set of trigger substrings and the label it assigns; the first rule with
//! any trigger present in the lowercased text wins, and the fallback label
//! is returned when nothing matches.
//!
//! Matching is purely lexical: no stemming, no negation handling, no
//! language detection. `"I don't need a permit"` is still about permits.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::core::models::TopicLabel;

static DEFAULT_CLASSIFIER: LazyLock<TopicClassifier> = LazyLock::new(TopicClassifier::default);

/// One row of the rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRule {
    /// Label assigned when any trigger matches
    pub topic: TopicLabel,
    /// Substrings that trigger this rule (lowercase)
    pub triggers: Vec<String>,
}

impl TopicRule {
    /// Create a rule; triggers are lowercased and empty triggers dropped
    pub fn new<I, S>(topic: TopicLabel, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let triggers = triggers
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { topic, triggers }
    }

    /// Whether any trigger occurs in already-lowercased text
    #[must_use]
    pub fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(t.as_str()))
    }
}

/// Ordered keyword-rule classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicClassifier {
    rules: Vec<TopicRule>,
    fallback: TopicLabel,
}

impl TopicClassifier {
    /// Create a classifier from an ordered rule table and a catch-all label
    #[must_use]
    pub fn new(rules: Vec<TopicRule>, fallback: TopicLabel) -> Self {
        let rules = rules.into_iter().map(|r| TopicRule::new(r.topic, r.triggers)).collect();
        Self { rules, fallback }
    }

    /// The rule table, in priority order
    #[must_use]
    pub fn rules(&self) -> &[TopicRule] {
        &self.rules
    }

    /// Label returned when no rule matches
    #[must_use]
    pub const fn fallback(&self) -> TopicLabel {
        self.fallback
    }

    /// Classify text: first matching rule wins, otherwise the fallback
    #[must_use]
    pub fn classify(&self, text: &str) -> TopicLabel {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(self.fallback, |rule| rule.topic)
    }

    /// Every label whose rule matches, in rule order without duplicates
    ///
    /// Returns just the fallback when nothing matches, so the result is
    /// never empty and its first element always equals [`Self::classify`].
    #[must_use]
    pub fn matching_topics(&self, text: &str) -> Vec<TopicLabel> {
        let lowered = text.to_lowercase();
        let mut topics: Vec<TopicLabel> = Vec::new();
        for rule in &self.rules {
            if rule.matches(&lowered) && !topics.contains(&rule.topic) {
                topics.push(rule.topic);
            }
        }
        if topics.is_empty() {
            topics.push(self.fallback);
        }
        topics
    }
}

impl Default for TopicClassifier {
    fn default() -> Self {
        Self::new(default_rules(), TopicLabel::Support)
    }
}

/// The built-in rule table
///
/// Order matters: permits, then funding, then training, then taxes.
#[must_use]
pub fn default_rules() -> Vec<TopicRule> {
    vec![
        TopicRule::new(TopicLabel::Permits, ["permit", "license"]),
        TopicRule::new(TopicLabel::Funding, ["grant", "fund", "loan"]),
        TopicRule::new(TopicLabel::Training, ["train", "learn", "workshop"]),
        TopicRule::new(TopicLabel::Taxes, ["tax"]),
    ]
}

/// Classify text with the built-in rule table
#[must_use]
pub fn classify(text: &str) -> TopicLabel {
    DEFAULT_CLASSIFIER.classify(text)
}
