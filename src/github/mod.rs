// src/github/mod.rs
// =============================================================================
// This module holds the GitHub-specific bits of link checking.
//
// Currently implements:
// - Rewriting github.com "tree" browse URLs into REST API content URLs,
//   which answer HEAD requests with honest status codes
// - Telling whether a URL lives on the GitHub web host (so we know when to
//   attach the token)
// =============================================================================

mod rewrite;

// Re-export so callers can write `github::normalize_url()`
pub use rewrite::{normalize_url, NormalizedUrl};
