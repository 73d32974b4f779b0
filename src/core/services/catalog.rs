//! Resource catalog service - help resources grouped by topic
//!
//! The catalog is an immutable value built once and shared. Every topic has
//! at least one entry; [`ResourceCatalog::from_entries`] rejects a table that
//! would leave a topic empty, which keeps [`ResourceCatalog::lookup`] total.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::models::{ResourceEntry, TopicLabel};

/// Errors raised while building a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A topic has no entries
    #[error("no resources defined for topic '{0}'")]
    EmptyTopic(TopicLabel),
}

/// Topic to ordered resource list mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCatalog {
    entries: BTreeMap<TopicLabel, Vec<ResourceEntry>>,
}

impl ResourceCatalog {
    /// Build a catalog, requiring a non-empty list for every topic
    pub fn from_entries(
        entries: BTreeMap<TopicLabel, Vec<ResourceEntry>>,
    ) -> Result<Self, CatalogError> {
        for topic in TopicLabel::ALL {
            if entries.get(&topic).is_none_or(Vec::is_empty) {
                return Err(CatalogError::EmptyTopic(topic));
            }
        }
        Ok(Self { entries })
    }

    /// Replace the lists of some topics, keeping the rest
    pub fn with_overrides(
        &self,
        overrides: BTreeMap<TopicLabel, Vec<ResourceEntry>>,
    ) -> Result<Self, CatalogError> {
        let mut entries = self.entries.clone();
        entries.extend(overrides);
        Self::from_entries(entries)
    }

    /// Resources for a topic, in display order
    #[must_use]
    pub fn lookup(&self, topic: TopicLabel) -> &[ResourceEntry] {
        self.entries.get(&topic).map_or(&[], Vec::as_slice)
    }

    /// All topics with their resources, in topic order
    pub fn iter(&self) -> impl Iterator<Item = (TopicLabel, &[ResourceEntry])> {
        self.entries.iter().map(|(topic, list)| (*topic, list.as_slice()))
    }

    /// Total number of entries across topics
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Always false for a validated catalog
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }
}

const PORTAL: &str = "https://business.miamidade.gov";

fn entry(name: &str, description: &str, path: &str, keywords: &[&str]) -> ResourceEntry {
    ResourceEntry::new(name, description, format!("{PORTAL}/{path}")).with_keywords(keywords)
}

/// The county's default resource directory
#[must_use]
pub fn builtin_entries() -> BTreeMap<TopicLabel, Vec<ResourceEntry>> {
    BTreeMap::from([
        (
            TopicLabel::Permits,
            vec![
                entry(
                    "Online Permit Portal",
                    "Fast-track your business permits online",
                    "permits",
                    &["permit", "license", "approval", "registration", "certificate", "zoning"],
                ),
                entry(
                    "Permit Assistance Program",
                    "Get help navigating the permit process",
                    "permit-help",
                    &["permit", "help", "guidance", "assistance"],
                ),
                entry(
                    "Virtual Permit Workshops",
                    "Weekly sessions on permit requirements",
                    "workshops",
                    &["permit", "training", "workshop", "learn"],
                ),
            ],
        ),
        (
            TopicLabel::Funding,
            vec![
                entry(
                    "Small Business Grant Program",
                    "Grants up to $50,000 for eligible businesses",
                    "grants",
                    &["grant", "funding", "money", "capital"],
                ),
                entry(
                    "Low-Interest Loan Program",
                    "Competitive rates for business expansion",
                    "loans",
                    &["loan", "financing", "credit", "expansion"],
                ),
                entry(
                    "Emergency Relief Fund",
                    "Support for businesses facing hardship",
                    "relief",
                    &["relief", "emergency", "hardship", "fund"],
                ),
            ],
        ),
        (
            TopicLabel::Training,
            vec![
                entry(
                    "Entrepreneur Boot Camp",
                    "12-week intensive business training",
                    "bootcamp",
                    &["training", "bootcamp", "entrepreneur", "course"],
                ),
                entry(
                    "Digital Marketing Workshop",
                    "Learn to market your business online",
                    "marketing",
                    &["marketing", "workshop", "online", "learn"],
                ),
                entry(
                    "Financial Planning Sessions",
                    "Master your business finances",
                    "finance-training",
                    &["finance", "planning", "budget", "accounting"],
                ),
            ],
        ),
        (
            TopicLabel::Taxes,
            vec![
                entry(
                    "Business Tax Calculator",
                    "Estimate your tax obligations",
                    "tax-calc",
                    &["tax", "calculate", "estimate", "obligation"],
                ),
                entry(
                    "Tax Filing Assistance",
                    "Free help with business tax returns",
                    "tax-help",
                    &["tax", "filing", "return", "help"],
                ),
                entry(
                    "Tax Credit Information",
                    "Discover available tax incentives",
                    "credits",
                    &["tax", "credit", "incentive", "deduction"],
                ),
            ],
        ),
        (
            TopicLabel::Support,
            vec![
                entry(
                    "Business Advisor Matching",
                    "Get paired with an expert advisor",
                    "advisors",
                    &["advisor", "consultant", "expert", "guidance"],
                ),
                entry(
                    "Mentorship Program",
                    "Connect with successful entrepreneurs",
                    "mentors",
                    &["mentor", "coach", "guidance", "support"],
                ),
                entry(
                    "24/7 Business Hotline",
                    "Call anytime for quick answers",
                    "hotline",
                    &["help", "support", "questions", "hotline"],
                ),
            ],
        ),
    ])
}
