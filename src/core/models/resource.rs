//! Resource entries
//!
//! A help resource shown to a business owner: a program, a portal, a hotline.

use serde::{Deserialize, Serialize};

/// One entry of the resource catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Display name
    pub name: String,

    /// One-line description
    pub description: String,

    /// Where to find it (opaque URI)
    pub link: String,

    /// Terms that make this entry more relevant to a query
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl ResourceEntry {
    /// Create an entry without relevance keywords
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            link: link.into(),
            keywords: Vec::new(),
        }
    }

    /// Attach relevance keywords (stored lowercase)
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = keywords.into_iter().map(|k| k.as_ref().to_lowercase()).collect();
        self
    }

    /// Number of keywords that occur in an already-lowercased query
    #[must_use]
    pub fn relevance(&self, lowered_query: &str) -> usize {
        self.keywords.iter().filter(|k| lowered_query.contains(k.as_str())).count()
    }
}
