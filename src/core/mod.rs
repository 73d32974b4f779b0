//! Core domain logic for bizpulse
//!
//! Classification, resource lookup, aggregation and the conversation state
//! machine. No I/O; the wall clock is abstracted behind a port trait.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Post, TopicLabel, ResourceEntry, ConversationTurn)
//! - `services/` - Classifier, catalog, scorer, recommender, aggregator, engine
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
