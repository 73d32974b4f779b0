//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure business logic
//! handlers that can be used by any HTTP server implementation (`tiny_http`, axum, etc.)
//! or directly by clients (CLI, dashboards, etc.).
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation
//! - **State is explicit**: Handlers read and mutate an [`ApiContext`]

mod context;
mod error;
mod handlers;
mod types;

pub use context::ApiContext;
pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{
    analyze, catalog, chat_status, health, ingest_post, posts, recommend, resources, statistics,
    submit_chat, trend,
};
pub use types::{
    AnalyzeData, AnalyzeRequest, ApiResponse, CatalogData, ChatData, ChatRequest, HealthData,
    IngestData, PostsData, RecommendData, RecommendRequest, ResourcesData, StatisticsData,
    TrendData,
};
