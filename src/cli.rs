// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is exactly one flag (--delete). The document path is optional and
// defaults to the README.md that sits next to the executable.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to generate the parsing code
#[derive(Parser, Debug)]
#[command(
    name = "skill-link-checker",
    version,
    about = "Check the validity of skill links in README.md",
    long_about = "skill-link-checker sends a HEAD request for every skill link in the README \
                  and reports the broken ones. Set GITHUB_TOKEN to raise GitHub's rate limit \
                  (60 requests/hour without it, 5000 with it)."
)]
pub struct Cli {
    /// Delete lines with invalid links
    #[arg(long)]
    pub delete: bool,

    /// Markdown file to check (default: README.md next to the executable)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl Cli {
    // Resolves the document path once, at startup
    pub fn document(&self) -> PathBuf {
        match &self.file {
            Some(file) => file.clone(),
            None => default_document(),
        }
    }
}

// README.md in the directory of the running executable
//
// Falls back to the working directory if the executable path is unknown.
fn default_document() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
        .unwrap_or_default()
        .join("README.md")
}
