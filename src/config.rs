// src/config.rs
// =============================================================================
// Run configuration: which links we look for, where GitHub lives, and how
// hard we are allowed to hit it.
//
// Everything has a sensible default for the real README. Tests build their
// own Settings pointing at a mock server instead of github.com.
// =============================================================================

use std::time::Duration;

/// Only list entries whose URL starts with this prefix are checked
pub const DEFAULT_LINK_PREFIX: &str = "https://github.com/openclaw/skills/";

/// Host of the GitHub web UI (tree URLs live here)
pub const GITHUB_WEB_HOST: &str = "github.com";

/// Root of the GitHub REST API
pub const GITHUB_API_ROOT: &str = "https://api.github.com";

/// Environment variable holding a GitHub personal access token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Redirects followed before a 3xx is reported as an error
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Sent as the User-Agent header on every request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// GitHub allows 60 requests/hour without a token and 5000 with one.
// We don't count requests, we just slow down when unauthenticated.
const AUTHENTICATED_WORKERS: usize = 20;
const AUTHENTICATED_DELAY: Duration = Duration::from_millis(50);
const ANONYMOUS_WORKERS: usize = 5;
const ANONYMOUS_DELAY: Duration = Duration::from_millis(500);

/// Where the hosting provider lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Host name of the web UI, e.g. "github.com"
    pub web_host: String,
    /// Base URL of the API, without trailing slash
    pub api_root: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            web_host: GITHUB_WEB_HOST.to_string(),
            api_root: GITHUB_API_ROOT.to_string(),
        }
    }
}

/// Settings that stay fixed for a whole run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Required URL prefix for a line to count as a link entry
    pub link_prefix: String,
    pub endpoints: Endpoints,
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// How many checks run at once and how long each worker rests afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throughput {
    pub workers: usize,
    pub delay: Duration,
}

impl Throughput {
    // Authenticated requests get a much bigger budget from GitHub
    pub fn for_token(has_token: bool) -> Self {
        if has_token {
            Throughput {
                workers: AUTHENTICATED_WORKERS,
                delay: AUTHENTICATED_DELAY,
            }
        } else {
            Throughput {
                workers: ANONYMOUS_WORKERS,
                delay: ANONYMOUS_DELAY,
            }
        }
    }
}

/// Reads the GitHub token from the environment
///
/// An empty variable is treated the same as an unset one.
pub fn github_token() -> Option<String> {
    token_from(std::env::var(TOKEN_ENV_VAR).ok())
}

fn token_from(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
