/*!
 * Git URL recognition and parsing
 */

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::error::{GitError, GitResult};

// Statically compiled regexes for better performance
static HTTP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?|git|ssh)://[^/]+/[^/]+/[^/]+(?:\.git)?/?$").unwrap()
});

static SSH_PARSE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^git@([^:]+):([^/]+)/([^/]+?)(?:\.git)?$").unwrap());

/// Components of a remote repository URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    /// Original URL as given on the command line
    pub url: String,
    /// Repository owner/namespace
    pub owner: String,
    /// Repository name without any `.git` suffix
    pub name: String,
}

impl std::fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoUrl {
    type Err = GitError;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        // Scheme-style URLs (https://host/owner/repo)
        if HTTP_REGEX.is_match(url) {
            if let Ok(parsed) = Url::parse(url) {
                let path = parsed.path();
                let path = path.strip_prefix('/').unwrap_or(path);
                let segments: Vec<&str> = path.trim_end_matches('/').split('/').collect();

                if segments.len() < 2 {
                    return Err(GitError::InvalidUrl(format!(
                        "Missing owner or repository in URL: {}",
                        url
                    )));
                }

                let owner = segments[0].to_string();
                let name = segments[1].trim_end_matches(".git").to_string();

                if owner.is_empty() || name.is_empty() {
                    return Err(GitError::InvalidUrl(url.to_string()));
                }

                return Ok(RepoUrl {
                    url: url.to_string(),
                    owner,
                    name,
                });
            }
        }

        // SCP-style SSH URLs (git@host:owner/repo.git)
        if let Some(captures) = SSH_PARSE_REGEX.captures(url) {
            if let (Some(owner), Some(name)) = (captures.get(2), captures.get(3)) {
                return Ok(RepoUrl {
                    url: url.to_string(),
                    owner: owner.as_str().to_string(),
                    name: name.as_str().to_string(),
                });
            }
        }

        Err(GitError::InvalidUrl(url.to_string()))
    }
}

/// Check if a source string is a Git repository URL rather than a local path
pub fn is_git_url(source: &str) -> bool {
    source.parse::<RepoUrl>().is_ok()
}

/// Parse a Git repository URL into components
pub fn parse_git_url(url: &str) -> GitResult<RepoUrl> {
    url.parse()
}
