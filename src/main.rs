// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (stderr, controlled by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Read GITHUB_TOKEN and resolve the README path
// 4. Hand everything to app::run()
// 5. Exit with proper code (0 = all valid, 1 = invalid links or no README,
//    2 = unexpected error such as a failed rewrite)
// =============================================================================

mod cli;

use clap::Parser;
use cli::Cli;
use skill_link_checker::{config, RunOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    setup_logging();

    let cli = Cli::parse();
    let options = RunOptions::new(cli.document(), cli.delete, config::github_token());

    let exit_code = match skill_link_checker::run(&options).await {
        Ok(report) => report.exit_code(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout stays the progress report.
// Quiet by default; RUST_LOG=skill_link_checker=debug shows every request.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("skill_link_checker=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
