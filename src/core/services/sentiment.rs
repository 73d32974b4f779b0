//! Lexicon sentiment scorer
//!
//! Scores text by averaging the polarity of known opinion words. A negator
//! (`not`, `never`, `can't`, ...) shortly before an opinion word flips and
//! dampens it. The mean polarity is mapped to a label with a ±0.1 dead zone.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::core::models::SentimentLabel;

/// Polarity above which text is positive (and below whose negation, negative)
pub const POLARITY_THRESHOLD: f64 = 0.1;

/// How many tokens a negator reaches forward
const NEGATION_WINDOW: usize = 3;

/// Weight applied to a negated opinion word
const NEGATION_FACTOR: f64 = -0.5;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("token pattern is valid"));

/// (word, polarity)
const DEFAULT_TERMS: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("appreciate", 0.4),
    ("approved", 0.3),
    ("awesome", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("easier", 0.4),
    ("easy", 0.43),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("free", 0.4),
    ("good", 0.7),
    ("grateful", 0.6),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.6),
    ("improved", 0.4),
    ("love", 0.5),
    ("nice", 0.6),
    ("recommend", 0.3),
    ("saved", 0.3),
    ("smooth", 0.4),
    ("super", 0.33),
    ("thank", 0.4),
    ("thanks", 0.4),
    ("wonderful", 1.0),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("broken", -0.4),
    ("complicated", -0.5),
    ("confusing", -0.3),
    ("delay", -0.3),
    ("difficult", -0.5),
    ("disappointed", -0.75),
    ("expensive", -0.5),
    ("frustrated", -0.7),
    ("frustrating", -0.4),
    ("hard", -0.3),
    ("horrible", -1.0),
    ("impossible", -0.67),
    ("poor", -0.4),
    ("problem", -0.3),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("unfortunately", -0.5),
    ("useless", -0.5),
    ("waiting", -0.2),
    ("worst", -1.0),
];

const DEFAULT_NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "don't", "doesn't", "didn't", "isn't", "wasn't", "aren't",
    "can't", "cannot", "won't", "couldn't",
];

/// Result of scoring one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScore {
    /// Label derived from `polarity`
    pub sentiment: SentimentLabel,
    /// Mean polarity in `[-1, 1]`, rounded to two decimals
    pub polarity: f64,
    /// Number of opinion words that contributed
    pub matched_terms: usize,
}

impl SentimentScore {
    /// Map a polarity to a label using the ±0.1 dead zone
    #[must_use]
    pub fn label_for(polarity: f64) -> SentimentLabel {
        if polarity > POLARITY_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < -POLARITY_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Word polarities plus negators
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    terms: HashMap<String, f64>,
    negators: Vec<String>,
}

impl SentimentLexicon {
    /// Empty lexicon; everything scores neutral
    #[must_use]
    pub fn empty() -> Self {
        Self {
            terms: HashMap::new(),
            negators: Vec::new(),
        }
    }

    /// Add or replace a term; polarity is clamped to `[-1, 1]`
    #[must_use]
    pub fn with_term(mut self, word: &str, polarity: f64) -> Self {
        self.terms.insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
        self
    }

    /// Add a negator word
    #[must_use]
    pub fn with_negator(mut self, word: &str) -> Self {
        self.negators.push(word.to_lowercase());
        self
    }

    fn polarity(&self, word: &str) -> Option<f64> {
        self.terms.get(word).copied()
    }

    fn is_negator(&self, word: &str) -> bool {
        self.negators.iter().any(|n| n == word)
    }
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        let lexicon = DEFAULT_TERMS
            .iter()
            .fold(Self::empty(), |lex, (word, polarity)| lex.with_term(word, *polarity));
        DEFAULT_NEGATORS.iter().fold(lexicon, |lex, word| lex.with_negator(word))
    }
}

/// Rule-based sentiment scorer
#[derive(Debug, Clone, Default)]
pub struct SentimentScorer {
    lexicon: SentimentLexicon,
}

impl SentimentScorer {
    /// Create a scorer over a lexicon
    #[must_use]
    pub const fn new(lexicon: SentimentLexicon) -> Self {
        Self { lexicon }
    }

    /// Score a text
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self, text: &str) -> SentimentScore {
        let lowered = text.to_lowercase().replace('\u{2019}', "'");
        let mut sum = 0.0;
        let mut matched = 0usize;
        let mut negation_left = 0usize;

        for token in TOKEN.find_iter(&lowered).map(|m| m.as_str()) {
            if self.lexicon.is_negator(token) {
                negation_left = NEGATION_WINDOW;
                continue;
            }
            if let Some(polarity) = self.lexicon.polarity(token) {
                let weight = if negation_left > 0 {
                    polarity * NEGATION_FACTOR
                } else {
                    polarity
                };
                sum += weight;
                matched += 1;
                negation_left = 0;
            } else {
                negation_left = negation_left.saturating_sub(1);
            }
        }

        let polarity = if matched == 0 {
            0.0
        } else {
            round2(sum / matched as f64)
        };

        SentimentScore {
            sentiment: SentimentScore::label_for(polarity),
            polarity,
            matched_terms: matched,
        }
    }

    /// Shorthand for the label only
    #[must_use]
    pub fn label(&self, text: &str) -> SentimentLabel {
        self.score(text).sentiment
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
