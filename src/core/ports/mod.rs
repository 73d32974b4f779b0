//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and the outside world. The only one the core needs is time.

mod clock;

pub use clock::{Clock, SystemClock};
