// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - markdown: Extracts `- [name](url)` entries from the README
// - http: Checks a single link and classifies the result
// - concurrent: Runs the checker over all entries with a bounded pool
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `checker::check_all()` instead of
// `checker::concurrent::check_all()`.
// =============================================================================

mod concurrent;
mod http;
mod markdown;

pub use concurrent::{check_all, format_progress};
pub use http::{classify, CheckOutcome, LinkChecker, Probe, Verdict};
pub use markdown::{extract_links, parse_links, LinkEntry};
pub(crate) use markdown::line_text;
