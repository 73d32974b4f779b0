//! bizpulse - Sentiment and topic intelligence for county small-business services
//!
//! This library classifies short posts and chat messages by topic and
//! sentiment, aggregates them into statistics, and recommends help
//! resources through a turn-taking conversation engine.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod config;
pub mod core;
pub mod dataset;
pub mod output;
pub mod paths;
#[cfg(feature = "tokio")]
pub mod runtime;
