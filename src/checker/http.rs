// src/checker/http.rs
// =============================================================================
// This module checks whether a single link is alive.
//
// Key functionality:
// - Rewrites GitHub tree URLs to API URLs (see github/rewrite.rs)
// - Makes ONE HTTP HEAD request per link (no body download, no retries)
// - Attaches the GitHub token only for github.com links
// - Turns whatever happened into a Probe, then classifies the Probe
//
// 403 and 429 are errors on the wire but count as valid links: they mean
// GitHub is throttling us, not that the file is gone. --delete must never
// remove such a line.
//
// Rust concepts:
// - Enums: Probe is a closed set of "what happened" cases
// - Pure functions: classify() has no I/O, so the policy is easy to test
// - async/await: for the network request itself
// =============================================================================

use super::markdown::LinkEntry;
use crate::config::{Endpoints, Settings};
use crate::error::Result;
use crate::github::normalize_url;
use reqwest::header::{ACCEPT, AUTHORIZATION, LOCATION};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

// What happened when we sent the request
//
// This is produced by the HTTP layer and consumed by classify().
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Got a response with status in [200, 400)
    Success(u16),
    /// Got a response with any other status
    HttpError(u16),
    /// The per-request timeout expired
    Timeout,
    /// Could not reach the host (DNS, connection refused, TLS)
    Transport(String),
    /// Anything else reqwest complained about
    Unexpected(String),
}

impl Probe {
    // Maps a received status code to Success or HttpError
    pub fn from_status(status: u16) -> Self {
        if (200..400).contains(&status) {
            Probe::Success(status)
        } else {
            Probe::HttpError(status)
        }
    }

    // Like from_status, but a 3xx that still points elsewhere means the
    // redirect limit stopped us: that is reported as HttpError(3xx)
    fn from_response(response: &reqwest::Response) -> Self {
        let status = response.status();
        if status.is_redirection() && response.headers().contains_key(LOCATION) {
            Probe::HttpError(status.as_u16())
        } else {
            Probe::from_status(status.as_u16())
        }
    }

    // Sorts a reqwest error into Timeout / Transport / Unexpected
    fn from_error(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Probe::Timeout
        } else if err.is_connect() || err.is_redirect() {
            Probe::Transport(root_cause(err))
        } else {
            Probe::Unexpected(err.to_string())
        }
    }
}

// The classification of a Probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status_code: Option<u16>,
    pub error: Option<String>,
    pub is_valid: bool,
}

// Classifies a Probe
//
// | Probe              | valid | message                    |
// |--------------------|-------|----------------------------|
// | Success(2xx/3xx)   | yes   | -                          |
// | HttpError(404)     | no    | Not Found                  |
// | HttpError(403)     | yes   | Forbidden (rate limited?)  |
// | HttpError(429)     | yes   | Too Many Requests          |
// | HttpError(other)   | no    | HTTP {status}              |
// |   (incl. a 3xx left over at the redirect limit)            |
// | Timeout            | no    | Timeout                    |
// | Transport(reason)  | no    | URL Error: {reason}        |
// | Unexpected(reason) | no    | Error: {reason}            |
pub fn classify(probe: &Probe) -> Verdict {
    match probe {
        Probe::Success(status) => Verdict {
            status_code: Some(*status),
            error: None,
            is_valid: true,
        },
        Probe::HttpError(status) => {
            let (message, is_valid) = match status {
                404 => ("Not Found".to_string(), false),
                403 => ("Forbidden (rate limited?)".to_string(), true),
                429 => ("Too Many Requests".to_string(), true),
                other => (format!("HTTP {other}"), false),
            };
            Verdict {
                status_code: Some(*status),
                error: Some(message),
                is_valid,
            }
        }
        Probe::Timeout => failure("Timeout".to_string()),
        Probe::Transport(reason) => failure(format!("URL Error: {reason}")),
        Probe::Unexpected(reason) => failure(format!("Error: {reason}")),
    }
}

fn failure(message: String) -> Verdict {
    Verdict {
        status_code: None,
        error: Some(message),
        is_valid: false,
    }
}

// The result of checking one LinkEntry
//
// Only built through from_probe(), so is_valid always agrees with the
// classification table above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    entry: LinkEntry,
    verdict: Verdict,
}

impl CheckOutcome {
    pub fn from_probe(entry: LinkEntry, probe: &Probe) -> Self {
        CheckOutcome {
            entry,
            verdict: classify(probe),
        }
    }

    pub fn entry(&self) -> &LinkEntry {
        &self.entry
    }

    pub fn status_code(&self) -> Option<u16> {
        self.verdict.status_code
    }

    pub fn error(&self) -> Option<&str> {
        self.verdict.error.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.verdict.is_valid
    }

    /// Valid only because the host throttled us (403/429)
    pub fn is_rate_limited(&self) -> bool {
        self.verdict.is_valid && matches!(self.verdict.status_code, Some(403 | 429))
    }
}

// Checks links against their hosts
//
// Holds one reqwest Client for the whole run (connection pooling).
#[derive(Debug, Clone)]
pub struct LinkChecker {
    client: Client,
    token: Option<String>,
    timeout: Duration,
    endpoints: Endpoints,
}

impl LinkChecker {
    pub fn new(settings: &Settings, token: Option<String>) -> Result<Self> {
        // Stop (instead of erroring) at the limit, so the last 3xx is kept
        let max_redirects = settings.max_redirects;
        let policy = Policy::custom(move |attempt| {
            if attempt.previous().len() > max_redirects {
                attempt.stop()
            } else {
                attempt.follow()
            }
        });

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .redirect(policy)
            .build()?;

        Ok(LinkChecker {
            client,
            token,
            timeout: settings.timeout,
            endpoints: settings.endpoints.clone(),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    // Checks one entry: normalize, HEAD, classify
    pub async fn check(&self, entry: &LinkEntry) -> CheckOutcome {
        let probe = self.probe(&entry.url).await;
        CheckOutcome::from_probe(entry.clone(), &probe)
    }

    // Sends the HEAD request for a README url and reports what happened
    //
    // Never fails: every error becomes a Probe variant.
    pub async fn probe(&self, url: &str) -> Probe {
        let target = normalize_url(url, &self.endpoints);

        let mut request = self.client.head(&target.url).timeout(self.timeout);
        if target.is_provider_host {
            if let Some(token) = &self.token {
                request = request
                    .header(AUTHORIZATION, format!("token {token}"))
                    .header(ACCEPT, GITHUB_ACCEPT);
            }
        }

        match request.send().await {
            Ok(response) => {
                tracing::debug!(url = %target.url, status = response.status().as_u16(), "head request finished");
                Probe::from_response(&response)
            }
            Err(err) => {
                tracing::warn!(url = %target.url, error = %err, "head request failed");
                Probe::from_error(&err)
            }
        }
    }
}

// Walks down to the innermost error ("Connection refused", "dns error", ...)
fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
