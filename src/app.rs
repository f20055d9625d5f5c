// src/app.rs
// =============================================================================
// The whole run, start to finish:
// 1. Make sure the README exists
// 2. Extract the skill links
// 3. Check them all concurrently
// 4. Print a summary (and optionally delete the invalid lines)
// 5. Return the exit code (0 = all valid, 1 = invalid links found)
//
// main.rs only gathers the inputs (CLI, environment) and calls run().
// =============================================================================

use crate::checker::{self, CheckOutcome, LinkChecker};
use crate::config::{Settings, Throughput};
use crate::error::LinkCheckError;
use crate::prune;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Everything a run needs, resolved up front
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// The markdown document to check (and maybe rewrite)
    pub document: PathBuf,
    /// Delete lines with invalid links after checking
    pub delete: bool,
    /// GitHub token, if any
    pub token: Option<String>,
    pub settings: Settings,
    pub throughput: Throughput,
}

impl RunOptions {
    // Picks the throughput from whether we have a token
    pub fn new(document: PathBuf, delete: bool, token: Option<String>) -> Self {
        let throughput = Throughput::for_token(token.is_some());
        RunOptions {
            document,
            delete,
            token,
            settings: Settings::default(),
            throughput,
        }
    }
}

/// Valid/invalid counts for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub valid: usize,
    pub invalid: usize,
    /// Counted as valid, but only because of a 403/429
    pub rate_limited: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[CheckOutcome]) -> Self {
        let valid = outcomes.iter().filter(|o| o.is_valid()).count();
        Summary {
            valid,
            invalid: outcomes.len() - valid,
            rate_limited: outcomes.iter().filter(|o| o.is_rate_limited()).count(),
        }
    }

    pub fn completion_line(&self) -> String {
        format!("Check complete: {} valid, {} invalid", self.valid, self.invalid)
    }

    // Exit status reflects what we detected, even if --delete removed it
    pub fn exit_code(&self) -> i32 {
        if self.invalid > 0 {
            1
        } else {
            0
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunReport {
    /// The document wasn't there; nothing was checked
    MissingDocument,
    /// The document has no matching link lines
    NoLinks,
    /// Links were checked; `deleted` is set when --delete pruned lines
    Checked {
        summary: Summary,
        deleted: Option<usize>,
    },
}

impl RunReport {
    // 0 = no links or all valid, 1 = missing document or invalid links
    pub fn exit_code(&self) -> i32 {
        match self {
            RunReport::MissingDocument => 1,
            RunReport::NoLinks => 0,
            RunReport::Checked { summary, .. } => summary.exit_code(),
        }
    }
}

// Runs one check of the document
//
// Returns Err only when the document couldn't be read or rewritten.
pub async fn run(options: &RunOptions) -> Result<RunReport> {
    let document = &options.document;
    if !document.exists() {
        println!("Error: {}", LinkCheckError::MissingDocument(document.clone()));
        return Ok(RunReport::MissingDocument);
    }

    println!("Reading {}...", document.display());
    let entries = checker::extract_links(document, &options.settings.link_prefix)
        .with_context(|| format!("failed to read links from {}", document.display()))?;
    println!("Found {} links", entries.len());
    println!();

    if entries.is_empty() {
        println!("No links found");
        return Ok(RunReport::NoLinks);
    }

    let throughput = options.throughput;
    println!("Checking {} links...", entries.len());
    println!("Concurrency: {}", throughput.workers);
    println!(
        "GITHUB_TOKEN: {}",
        if options.token.is_some() { "set" } else { "not set (limit: 60/hour)" }
    );
    println!("{}", "-".repeat(60));

    let checker = LinkChecker::new(&options.settings, options.token.clone())
        .context("failed to build HTTP client")?;
    let outcomes =
        checker::check_all(&checker, &entries, throughput.workers, throughput.delay).await;

    let summary = Summary::from_outcomes(&outcomes);
    println!();
    println!("{}", "=".repeat(60));
    println!("{}", summary.completion_line());

    if summary.rate_limited > 0 {
        tracing::warn!(
            count = summary.rate_limited,
            has_token = checker.has_token(),
            "some links were only accepted because the host rate limited us"
        );
    }

    let mut deleted = None;
    if options.delete && summary.invalid > 0 {
        println!();
        println!("Deleting invalid links...");
        let count = prune::delete_invalid_lines(document, &outcomes)
            .with_context(|| format!("failed to rewrite {}", document.display()))?;
        println!("Deleted {count} lines");
        deleted = Some(count);
    }

    Ok(RunReport::Checked { summary, deleted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{LinkEntry, Probe};
    use std::time::Duration;

    fn outcome(probe: Probe) -> CheckOutcome {
        let entry = LinkEntry {
            name: "x".to_string(),
            url: "https://github.com/openclaw/skills/x".to_string(),
            line_number: 1,
            raw_line: "- [x](https://github.com/openclaw/skills/x)".to_string(),
        };
        CheckOutcome::from_probe(entry, &probe)
    }

    #[test]
    fn test_summary_counts() {
        let outcomes = vec![
            outcome(Probe::Success(200)),
            outcome(Probe::HttpError(404)),
            outcome(Probe::HttpError(403)),
            outcome(Probe::Timeout),
        ];
        let summary = Summary::from_outcomes(&outcomes);

        assert_eq!(summary.valid, 2);
        assert_eq!(summary.invalid, 2);
        assert_eq!(summary.rate_limited, 1);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_summary_all_valid_exits_zero() {
        let summary = Summary::from_outcomes(&[outcome(Probe::HttpError(429))]);
        assert_eq!(summary.exit_code(), 0);
        assert_eq!(Summary::default().exit_code(), 0);
    }

    #[test]
    fn test_options_pick_throughput_from_token() {
        let anonymous = RunOptions::new(PathBuf::from("README.md"), false, None);
        assert_eq!(anonymous.throughput.workers, 5);
        assert_eq!(anonymous.throughput.delay, Duration::from_millis(500));

        let authed = RunOptions::new(PathBuf::from("README.md"), true, Some("t".to_string()));
        assert_eq!(authed.throughput.workers, 20);
        assert!(authed.delete);
    }

    #[tokio::test]
    async fn test_missing_document_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions::new(dir.path().join("README.md"), false, None);
        let report = run(&options).await.unwrap();
        assert_eq!(report, RunReport::MissingDocument);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_report_exit_codes() {
        assert_eq!(RunReport::NoLinks.exit_code(), 0);

        let summary = Summary { valid: 2, invalid: 1, rate_limited: 1 };
        assert_eq!(summary.completion_line(), "Check complete: 2 valid, 1 invalid");

        let pruned = RunReport::Checked { summary, deleted: Some(1) };
        assert_eq!(pruned.exit_code(), 1);
    }
}
