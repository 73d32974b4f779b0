//! Command implementations

#[cfg(feature = "tokio")]
mod chat;
mod classify;
mod init;
#[cfg(feature = "server")]
mod serve;
mod stats;
mod version;

#[cfg(feature = "tokio")]
pub use chat::chat;
pub use classify::{classify, recommend, resources};
pub use init::init;
#[cfg(feature = "server")]
pub use serve::{ServeOptions, serve};
pub use stats::stats;
pub use version::version;
