//! Output formatting for human and JSON modes
//!
//! Command results can be rendered either as colored human-readable text or
//! as machine-parseable JSON. JSON output has the same shape as the data of
//! the matching HTTP endpoint.

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::api::{AnalyzeData, CatalogData, RecommendData, ResourcesData, StatisticsData, TrendData};
use crate::core::models::{ConversationTurn, ResourceEntry, SentimentLabel, Speaker, TurnPayload};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

/// `stats` command output
#[derive(Debug, Serialize)]
pub struct StatsReport {
    /// Aggregate counts
    pub statistics: StatisticsData,
    /// Sentiment over time
    pub trend: TrendData,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn paint(sentiment: SentimentLabel) -> ColoredString {
    match sentiment {
        SentimentLabel::Positive => sentiment.as_str().green(),
        SentimentLabel::Negative => sentiment.as_str().red(),
        SentimentLabel::Neutral => sentiment.as_str().yellow(),
    }
}

fn print_entry(index: usize, entry: &ResourceEntry) {
    println!("  {}. {}", index + 1, entry.name.bold());
    println!("     {}", entry.description);
    println!("     {}", entry.link.cyan());
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => print_json(self),
        }
    }
}

impl AnalyzeData {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("Topic:     {}", self.topic.as_str().bold());
                println!(
                    "Sentiment: {} ({:+.2})",
                    paint(self.sentiment.sentiment),
                    self.sentiment.polarity
                );
                if self.topics.len() > 1 {
                    let all: Vec<&str> = self.topics.iter().map(|t| t.as_str()).collect();
                    println!("Matches:   {}", all.join(", "));
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

impl RecommendData {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                let topics: Vec<&str> = self.topics.iter().map(|t| t.as_str()).collect();
                println!("Topics: {}\n", topics.join(", "));
                if self.recommendations.is_empty() {
                    println!("No recommendations.");
                    return;
                }
                for (i, rec) in self.recommendations.iter().enumerate() {
                    print_entry(i, &rec.entry);
                    println!("     [{}] relevance {}", rec.topic, rec.relevance_score);
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

impl ResourcesData {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("{}", self.topic.as_str().to_uppercase().bold());
                for (i, entry) in self.resources.iter().enumerate() {
                    print_entry(i, entry);
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

impl CatalogData {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                for (topic, entries) in &self.topics {
                    println!("{}", topic.as_str().to_uppercase().bold());
                    for (i, entry) in entries.iter().enumerate() {
                        print_entry(i, entry);
                    }
                    println!();
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

impl StatsReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let stats = &self.statistics;
        if stats.total_posts == 0 {
            println!("No posts.");
            return;
        }

        println!("{} posts, {}% positive\n", stats.total_posts, stats.overall_sentiment_percentage);

        println!("{}", "Sentiment".bold());
        for (sentiment, count) in &stats.sentiment_breakdown {
            let pct = stats.sentiment_percentages.get(sentiment).copied().unwrap_or_default();
            println!("  {:<10} {count:>5}  {pct:>5.1}%", paint(*sentiment));
        }

        println!("\n{}", "Topics".bold());
        for (topic, count) in &stats.topic_breakdown {
            println!("  {:<10} {count:>5}", topic.as_str());
        }

        println!("\n{} ({})", "Trend".bold(), self.trend.granularity);
        for point in &self.trend.points {
            println!(
                "  {}  +{} -{} ={}",
                point.bucket.format("%Y-%m-%d %H:%M"),
                point.count(SentimentLabel::Positive).to_string().green(),
                point.count(SentimentLabel::Negative).to_string().red(),
                point.count(SentimentLabel::Neutral).to_string().yellow(),
            );
        }
    }
}

/// Print one transcript turn
pub fn render_turn(turn: &ConversationTurn, mode: OutputMode) {
    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string(turn).unwrap_or_default());
        return;
    }

    let who = match turn.speaker {
        Speaker::User => "you".blue().bold(),
        Speaker::System => "assistant".magenta().bold(),
    };
    match &turn.payload {
        TurnPayload::Message(text) => println!("{who}: {text}"),
        TurnPayload::Recommendations(entries) => {
            for (i, entry) in entries.iter().enumerate() {
                print_entry(i, entry);
            }
        },
    }
}
