// src/checker/concurrent.rs
// =============================================================================
// Runs the link checker over every entry with a bounded number of checks in
// flight.
//
// How it works:
// 1. Turn every entry into a future: check the link, then sleep `delay`
// 2. buffer_unordered(workers) keeps at most `workers` of them running
// 3. Results come out in COMPLETION order, not README order
// 4. We print one progress block per finished check as we drain the stream
//
// The sleep happens after every check, failed or not. It is our only
// throttle; GitHub's own rate limit is handled by classification.
// =============================================================================

use super::http::{CheckOutcome, LinkChecker};
use super::markdown::LinkEntry;
use futures::stream::{self, StreamExt};
use std::time::Duration;

// Checks all entries concurrently
//
// Parameters:
//   checker: shared HTTP checker (one client for all requests)
//   entries: the links to check
//   workers: max checks in flight (clamped to at least 1)
//   delay: pause after each check before its slot is freed
//
// Returns: exactly one CheckOutcome per entry, in completion order
pub async fn check_all(
    checker: &LinkChecker,
    entries: &[LinkEntry],
    workers: usize,
    delay: Duration,
) -> Vec<CheckOutcome> {
    let total = entries.len();
    let workers = workers.max(1);

    tracing::info!(total, workers, delay_ms = delay.as_millis() as u64, "checking links");

    let checks = entries.iter().map(|entry| async move {
        let outcome = checker.check(entry).await;
        tokio::time::sleep(delay).await;
        outcome
    });
    let mut pending = stream::iter(checks).buffer_unordered(workers);

    let mut outcomes = Vec::with_capacity(total);
    while let Some(outcome) = pending.next().await {
        println!("{}", format_progress(outcomes.len() + 1, total, &outcome));
        outcomes.push(outcome);
    }

    outcomes
}

// Formats the progress block for one finished check
//
// Example:
//   [3/120] ✗ weather - Not Found
//       https://github.com/openclaw/skills/tree/main/skills/a/weather
pub fn format_progress(completed: usize, total: usize, outcome: &CheckOutcome) -> String {
    let entry = outcome.entry();
    let headline = if outcome.is_valid() {
        format!("[{completed}/{total}] ✓ {}", entry.name)
    } else {
        let error_info = match (outcome.error(), outcome.status_code()) {
            (Some(error), _) => error.to_string(),
            (None, Some(status)) => format!("HTTP {status}"),
            (None, None) => "unknown error".to_string(),
        };
        format!("[{completed}/{total}] ✗ {} - {error_info}", entry.name)
    };

    format!("{headline}\n    {}", entry.url)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why buffer_unordered and not tokio::spawn per link?
//    - It never has more than `workers` checks alive at once
//    - All checks run inside this one task, so they can borrow `checker`
//
// 2. Why is the output order different from the README?
//    - A slow link doesn't hold back the fast ones behind it
//    - Each outcome still carries its LinkEntry (and line number)
// -----------------------------------------------------------------------------
