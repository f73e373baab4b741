//! Authentication for GitHub
//!
//! Supports an explicit `github-token` input and the `GITHUB_TOKEN`
//! environment variable.

use crate::error::{Error, Result};

/// Environment variable consulted when no token input is given
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from the `github-token` input
    Input,
    /// Token from environment variable
    EnvVar,
}

/// Resolved GitHub credentials
#[derive(Clone, PartialEq, Eq)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve the GitHub token, preferring the explicit input over `GITHUB_TOKEN`
pub fn get_github_auth(input: Option<&str>) -> Result<GitHubAuthConfig> {
    let env_token = std::env::var(TOKEN_ENV_VAR).ok();
    resolve_token(input, env_token.as_deref())
}

fn resolve_token(input: Option<&str>, env_token: Option<&str>) -> Result<GitHubAuthConfig> {
    fn non_empty(t: Option<&str>) -> Option<&str> {
        t.map(str::trim).filter(|t| !t.is_empty())
    }

    if let Some(token) = non_empty(input) {
        return Ok(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::Input,
        });
    }
    if let Some(token) = non_empty(env_token) {
        return Ok(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::EnvVar,
        });
    }
    Err(Error::Auth(format!(
        "no GitHub token; set the github-token input or {TOKEN_ENV_VAR}"
    )))
}
