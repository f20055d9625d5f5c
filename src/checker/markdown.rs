// src/checker/markdown.rs
// =============================================================================
// This module extracts skill links from the README.
//
// We are NOT parsing full Markdown here. The README is a long list of
// entries shaped like:
//
//   - [skill-name](https://github.com/openclaw/skills/tree/main/skills/...)
//
// so a line-oriented regex is enough, and it gives us the line number of
// every entry for free (the pruner needs it to delete lines later).
//
// Rust concepts:
// - Regex: compiled once, reused for every line
// - Iterators: enumerate() + filter_map() to walk the lines
// - Owned vs borrowed: LinkEntry owns its strings so it can outlive the file
// =============================================================================

use crate::error::{LinkCheckError, Result};
use regex::Regex;
use std::path::Path;

// One link line found in the document
//
// Entries are produced in document order and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// Display name, the text inside [...]
    pub name: String,
    /// The URL inside (...)
    pub url: String,
    /// 1-based line number in the document
    pub line_number: usize,
    /// The full line, without its line terminator
    pub raw_line: String,
}

// Reads a document from disk and extracts its link entries
//
// Parameters:
//   path: the markdown file to read
//   link_prefix: only URLs starting with this are extracted
//
// Returns: entries in line order, or an IO error if the file can't be read
pub fn extract_links(path: &Path, link_prefix: &str) -> Result<Vec<LinkEntry>> {
    let content = std::fs::read_to_string(path).map_err(|e| LinkCheckError::io(path, e))?;
    let entries = parse_links(&content, link_prefix);

    tracing::debug!(
        path = %path.display(),
        count = entries.len(),
        "extracted link entries"
    );

    Ok(entries)
}

// Extracts link entries from document text
//
// A line qualifies if it contains `- [name](url)` with `url` starting with
// `link_prefix`. Only the first match on a line is used.
pub fn parse_links(content: &str, link_prefix: &str) -> Vec<LinkEntry> {
    let pattern = link_pattern(link_prefix);

    document_lines(content)
        .enumerate()
        .filter_map(|(index, line)| {
            let captures = pattern.captures(line)?;
            Some(LinkEntry {
                name: captures[1].to_string(),
                url: captures[2].to_string(),
                line_number: index + 1,
                raw_line: line.to_string(),
            })
        })
        .collect()
}

// Splits a document into the text of its lines
//
// Each line drops a trailing "\n" and, only together with it, one "\r".
// A lone "\r" at the end of the file stays part of the text. The pruner
// uses the same split, so raw_line always matches what it compares against.
fn document_lines(content: &str) -> impl Iterator<Item = &str> {
    content.split_inclusive('\n').map(line_text)
}

// The text of one line as yielded by split_inclusive('\n')
pub(crate) fn line_text(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(text) => text.strip_suffix('\r').unwrap_or(text),
        None => line,
    }
}

// Builds the list-entry pattern for a given URL prefix
//
// The prefix is escaped, so dots and slashes in it match literally.
fn link_pattern(link_prefix: &str) -> Regex {
    let pattern = format!(
        r"-\s+\[([^\]]+)\]\(({}[^)]+)\)",
        regex::escape(link_prefix)
    );

    // Only the escaped prefix varies, so the pattern is always valid
    Regex::new(&pattern).unwrap_or_else(|e| unreachable!("invalid link pattern: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PREFIX: &str = "https://github.com/openclaw/skills/";

    #[test]
    fn test_extract_single_entry() {
        let doc = "- [weather](https://github.com/openclaw/skills/tree/main/skills/a/weather/SKILL.md)";
        let entries = parse_links(doc, PREFIX);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "weather");
        assert_eq!(
            entries[0].url,
            "https://github.com/openclaw/skills/tree/main/skills/a/weather/SKILL.md"
        );
        assert_eq!(entries[0].line_number, 1);
        assert_eq!(entries[0].raw_line, doc);
    }

    #[test]
    fn test_line_numbers_follow_document() {
        let doc = r#"# Awesome skills

Some intro text.

- [one](https://github.com/openclaw/skills/tree/main/skills/x/one)
- [not a skill](https://example.com/other)
  - [two](https://github.com/openclaw/skills/tree/main/skills/x/two) - nested entry

- [three](https://github.com/openclaw/skills/blob/main/README.md)
"#;
        let entries = parse_links(doc, PREFIX);
        let lines: Vec<usize> = entries.iter().map(|e| e.line_number).collect();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(lines, vec![5, 7, 9]);
        assert_eq!(names, vec!["one", "two", "three"]);
        assert!(lines.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_skip_other_prefixes() {
        let doc = "- [fork](https://github.com/someone/skills/tree/main/x)\n\
                   [no dash](https://github.com/openclaw/skills/tree/main/x)\n\
                   -[no space](https://github.com/openclaw/skills/tree/main/x)";
        assert!(parse_links(doc, PREFIX).is_empty());
    }

    #[test]
    fn test_first_match_per_line_only() {
        let doc = "- [a](https://github.com/openclaw/skills/a) - [b](https://github.com/openclaw/skills/b)";
        let entries = parse_links(doc, PREFIX);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a");
    }

    #[test]
    fn test_prefix_is_literal() {
        // '.' in the prefix must not match arbitrary characters
        let doc = "- [x](https://githubXcom/openclaw/skills/tree/main/x)";
        assert!(parse_links(doc, PREFIX).is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = "intro\r\n- [a](https://github.com/openclaw/skills/a)\r\n";
        let entries = parse_links(doc, PREFIX);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].line_number, 2);
        assert_eq!(entries[0].raw_line, "- [a](https://github.com/openclaw/skills/a)");
    }

    #[test]
    fn test_stray_carriage_returns_stay_in_raw_line() {
        let doc = "intro\n- [a](https://github.com/openclaw/skills/a)\r\r\n- [b](https://github.com/openclaw/skills/b)\r";
        let entries = parse_links(doc, PREFIX);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].raw_line, "- [a](https://github.com/openclaw/skills/a)\r");
        assert_eq!(entries[1].line_number, 3);
        assert_eq!(entries[1].raw_line, "- [b](https://github.com/openclaw/skills/b)\r");
    }

    #[test]
    fn test_line_text() {
        assert_eq!(line_text("a\n"), "a");
        assert_eq!(line_text("a\r\n"), "a");
        assert_eq!(line_text("a\r\r\n"), "a\r");
        assert_eq!(line_text("a\r"), "a\r");
        assert_eq!(line_text("a"), "a");
    }

    #[test]
    fn test_extract_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# Title").unwrap();
        writeln!(file, "- [a](https://github.com/openclaw/skills/a)").unwrap();

        let entries = extract_links(file.path(), PREFIX).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].line_number, 2);
    }

    #[test]
    fn test_extract_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_links(&dir.path().join("README.md"), PREFIX);
        assert!(matches!(result, Err(LinkCheckError::Io { .. })));
    }
}
