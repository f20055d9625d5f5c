// src/github/rewrite.rs
// =============================================================================
// This module turns GitHub browse URLs into API URLs.
//
// Strategy:
// - Parse the URL and compare its host with the GitHub web host
// - If the path looks like /{owner}/{repo}/tree/{branch}/{rest...}, build
//   {api}/repos/{owner}/{repo}/contents/{rest}?ref={branch}
// - Anything else is left alone
//
// Why the API?
// - github.com happily serves HTML pages (and odd redirects) for HEAD
// - The contents API returns a plain 404 for a missing file
// - It is also where the token raises the rate limit
//
// Example:
//   https://github.com/openclaw/skills/tree/main/skills/a/weather/SKILL.md
//   -> https://api.github.com/repos/openclaw/skills/contents/skills/a/weather/SKILL.md?ref=main
// =============================================================================

use crate::config::Endpoints;
use url::Url;

// Result of normalizing one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    /// The URL that should actually be requested
    pub url: String,
    /// True when the ORIGINAL url is on the GitHub web host. This decides
    /// whether auth headers are sent, whether or not a rewrite happened.
    pub is_provider_host: bool,
}

// Normalizes a URL for checking
//
// Parameters:
//   url: the URL as written in the README
//   endpoints: GitHub web host + API root
//
// Returns: the URL to request and the provider-host flag
pub fn normalize_url(url: &str, endpoints: &Endpoints) -> NormalizedUrl {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return passthrough(url, false),
    };

    let is_provider_host = authority(&parsed).as_deref() == Some(endpoints.web_host.as_str());
    if !is_provider_host {
        return passthrough(url, false);
    }

    match tree_to_api(&parsed, &endpoints.api_root) {
        Some(api_url) => {
            tracing::debug!(from = url, to = %api_url, "rewrote tree url");
            NormalizedUrl {
                url: api_url,
                is_provider_host,
            }
        }
        None => passthrough(url, is_provider_host),
    }
}

fn passthrough(url: &str, is_provider_host: bool) -> NormalizedUrl {
    NormalizedUrl {
        url: url.to_string(),
        is_provider_host,
    }
}

// host[:port], the way the URL spells it
fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

// Splits "/owner/repo/tree/branch/rest..." into its parts
//
// The leading '/' yields an empty first piece, so a usable path has at
// least 6 pieces with "tree" at index 3.
fn tree_to_api(url: &Url, api_root: &str) -> Option<String> {
    let parts: Vec<&str> = url.path().split('/').collect();
    if parts.len() < 6 || parts[3] != "tree" {
        return None;
    }

    let owner = parts[1];
    let repo = parts[2];
    let branch = parts[4];
    let file_path = parts[5..].join("/");

    Some(format!(
        "{}/repos/{}/{}/contents/{}?ref={}",
        api_root.trim_end_matches('/'),
        owner,
        repo,
        file_path,
        branch
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github() -> Endpoints {
        Endpoints::default()
    }

    #[test]
    fn test_rewrite_tree_url() {
        let result = normalize_url(
            "https://github.com/openclaw/skills/tree/main/skills/author/weather/SKILL.md",
            &github(),
        );
        assert_eq!(
            result.url,
            "https://api.github.com/repos/openclaw/skills/contents/skills/author/weather/SKILL.md?ref=main"
        );
        assert!(result.is_provider_host);
    }

    #[test]
    fn test_rewrite_keeps_branch_name() {
        let result = normalize_url("https://github.com/o/r/tree/dev-2/docs", &github());
        assert_eq!(result.url, "https://api.github.com/repos/o/r/contents/docs?ref=dev-2");
    }

    #[test]
    fn test_blob_url_not_rewritten_but_provider() {
        let url = "https://github.com/openclaw/skills/blob/main/README.md";
        let result = normalize_url(url, &github());
        assert_eq!(result.url, url);
        assert!(result.is_provider_host);
    }

    #[test]
    fn test_short_tree_url_not_rewritten() {
        // /owner/repo/tree/branch has only 5 pieces
        let url = "https://github.com/openclaw/skills/tree/main";
        let result = normalize_url(url, &github());
        assert_eq!(result.url, url);
        assert!(result.is_provider_host);
    }

    #[test]
    fn test_api_url_passes_through() {
        let url = "https://api.github.com/repos/openclaw/skills/contents/x?ref=main";
        let result = normalize_url(url, &github());
        assert_eq!(result.url, url);
        assert!(!result.is_provider_host);
    }

    #[test]
    fn test_other_host_passes_through() {
        let url = "https://gitlab.com/openclaw/skills/tree/main/skills/x";
        let result = normalize_url(url, &github());
        assert_eq!(result.url, url);
        assert!(!result.is_provider_host);
    }

    #[test]
    fn test_unparseable_url_passes_through() {
        let result = normalize_url("not a url", &github());
        assert_eq!(result.url, "not a url");
        assert!(!result.is_provider_host);
    }

    #[test]
    fn test_host_with_port() {
        let endpoints = Endpoints {
            web_host: "127.0.0.1:8080".to_string(),
            api_root: "http://127.0.0.1:8080/".to_string(),
        };
        let result = normalize_url("http://127.0.0.1:8080/o/r/tree/main/a/b", &endpoints);
        assert_eq!(result.url, "http://127.0.0.1:8080/repos/o/r/contents/a/b?ref=main");
        assert!(result.is_provider_host);

        // Same host, different port is a different provider
        let other = normalize_url("http://127.0.0.1:9090/o/r/tree/main/a/b", &endpoints);
        assert!(!other.is_provider_host);
    }
}
