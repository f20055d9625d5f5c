//! skill-link-checker: checks the skill links listed in a README
//!
//! Extracts `- [name](url)` entries, HEAD-checks them with a bounded pool of
//! workers (GitHub tree URLs go through the REST API), and can delete the
//! lines whose link is dead.

pub mod app;
pub mod checker;
pub mod config;
pub mod error;
pub mod github;
pub mod prune;

// Re-export commonly used types
pub use app::{run, RunOptions, RunReport, Summary};
pub use checker::{CheckOutcome, LinkChecker, LinkEntry};
pub use config::{Settings, Throughput};
pub use error::{LinkCheckError, Result};
