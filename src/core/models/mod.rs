//! Domain models for bizpulse
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`TopicLabel`] - Closed set of subject categories
//! - [`SentimentLabel`] - Positive / negative / neutral
//! - [`Post`] - A labeled social post
//! - [`ResourceEntry`] - A help resource in the catalog
//! - [`ConversationTurn`] - One transcript entry
//! - [`ConversationState`] - Where a chat session stands

mod post;
mod resource;
mod sentiment;
mod state;
mod topic;
mod turn;

pub use post::{AgeUnit, ObservedAt, ObservedAtError, Post, RelativeAge};
pub use resource::ResourceEntry;
pub use sentiment::SentimentLabel;
pub use state::ConversationState;
pub use topic::{ParseLabelError, TopicLabel};
pub use turn::{ConversationTurn, Speaker, TurnPayload};
