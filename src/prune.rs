// src/prune.rs
// =============================================================================
// Deletes the README lines whose link came back invalid.
//
// This is a plain read-filter-write of the whole file. It runs after all
// checks are done, so nothing else in this process touches the file at the
// same time. (Another process editing it meanwhile would be overwritten.)
//
// A line is only removed if it still reads exactly like the entry we
// extracted. Running the pruner again with the same outcomes is therefore
// a no-op: the lines are gone and whatever moved up into their place does
// not match.
// =============================================================================

use crate::checker::{line_text, CheckOutcome};
use crate::error::{LinkCheckError, Result};
use std::collections::HashMap;
use std::path::Path;

// Removes invalid-link lines from the document in place
//
// Returns: number of lines removed. With no invalid outcomes the file is
// not even read, and nothing is written unless at least one line goes.
pub fn delete_invalid_lines(path: &Path, outcomes: &[CheckOutcome]) -> Result<usize> {
    if outcomes.iter().all(CheckOutcome::is_valid) {
        return Ok(0);
    }

    let content = std::fs::read_to_string(path).map_err(|e| LinkCheckError::io(path, e))?;
    let (pruned, removed) = prune_lines(&content, outcomes);

    if removed > 0 {
        std::fs::write(path, pruned).map_err(|e| LinkCheckError::io(path, e))?;
        tracing::info!(path = %path.display(), removed, "rewrote document");
    } else {
        tracing::debug!(path = %path.display(), "no invalid lines left to remove");
    }

    Ok(removed)
}

// Drops the lines of `content` that belong to invalid outcomes
//
// Line terminators of the kept lines are preserved as-is.
pub fn prune_lines(content: &str, outcomes: &[CheckOutcome]) -> (String, usize) {
    let invalid: HashMap<usize, &str> = outcomes
        .iter()
        .filter(|outcome| !outcome.is_valid())
        .map(|outcome| (outcome.entry().line_number, outcome.entry().raw_line.as_str()))
        .collect();

    let mut kept = String::with_capacity(content.len());
    let mut removed = 0;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        if invalid.get(&(index + 1)) == Some(&line_text(line)) {
            removed += 1;
        } else {
            kept.push_str(line);
        }
    }

    (kept, removed)
}
