//! confpilot-coordinator — turns a sentence into a validated config change.
//!
//! # Pipeline
//!
//! ```text
//! handle_message(input)
//!   ├── classify   oracle picks chat | matchmaking | tournament
//!   ├── fetch      schema + current values, concurrently
//!   ├── propose    oracle returns {"path", "value"} (schema withheld)
//!   ├── apply      clean, parse, coerce, write the leaf
//!   └── validate   patched document against the schema
//! ```
//!
//! Stages run strictly in order. Any failure short-circuits with a
//! [`CoordinatorError`]; nothing is retried and no partial result escapes.
//! The patched document is returned, not written back to the values store.

pub mod coordinator;
pub mod error;

pub use coordinator::Coordinator;
pub use error::{CoordinatorError, CoordinatorResult};
