//! Repository URL utilities.
//!
//! Turns the many ways a GitHub repository is written in the wild into an
//! `owner/name` pair, and builds the URLs a package manifest usually carries
//! (`homepage`, `bugs`, raw file links, CI badges).
//!
//! # Accepted Forms
//!
//! - `owner/name`
//! - `https://github.com/owner/name(.git)`, optionally `/blob/<branch>/...`
//!   or `/tree/<branch>`
//! - `git+https://…`, `git://…`, `ssh://git@…`
//! - `git@github.com:owner/name.git`
//! - `https://raw.githubusercontent.com/owner/name/<branch>/<file>`
//! - any of the above with a `#branch` suffix
//!
//! Hosts other than github.com are preserved, so `homepage` for a GitLab
//! remote stays on GitLab.
//!
//! # Examples
//!
//! ```rust
//! use normalize_pkg::repo;
//!
//! let parsed = repo::parse_url("git@github.com:jonschlinkert/micromatch.git").unwrap();
//! assert_eq!(parsed.repository(), "jonschlinkert/micromatch");
//! assert_eq!(repo::homepage("jonschlinkert/micromatch").unwrap(),
//!            "https://github.com/jonschlinkert/micromatch");
//! ```

mod git;
mod person;

pub use git::{
    GitConfig, GitConfigScope, git_config, git_config_path, git_user_email, git_user_name,
    remote_origin_url,
};
pub use person::Person;

use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::core::NormalizeError;

/// Host assumed when none is given.
pub const DEFAULT_HOST: &str = "github.com";

/// Branch assumed when none is given.
pub const DEFAULT_BRANCH: &str = "master";

const RAW_HOST: &str = "raw.githubusercontent.com";

const GITHUB_HOSTS: &[&str] =
    &["api.github.com", "gist.github.com", "github.com", "github.io", RAW_HOST];

/// A repository reference broken into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedUrl {
    /// Scheme without the trailing `:`, e.g. `https`
    pub protocol: String,
    /// Host name, e.g. `github.com`
    pub host: String,
    /// Repository owner
    pub owner: String,
    /// Repository name, without `.git`
    pub name: String,
    /// Branch from the URL, `master` when absent
    pub branch: String,
    /// The input as given
    pub href: String,
}

impl ParsedUrl {
    /// `owner/name`.
    #[must_use]
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Web URL of the repository on its host.
    #[must_use]
    pub fn homepage(&self) -> String {
        let host = if self.host == RAW_HOST {
            DEFAULT_HOST
        } else {
            self.host.as_str()
        };
        format!("https://{host}/{}", self.repository())
    }
}

/// Parse a repository path or URL.
///
/// # Errors
///
/// [`NormalizeError::InvalidRepository`] when no owner and name can be found.
pub fn parse_url(input: &str) -> Result<ParsedUrl, NormalizeError> {
    let invalid = || NormalizeError::InvalidRepository {
        input: input.to_string(),
    };
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let (rest, hash_branch) = match trimmed.split_once('#') {
        Some((rest, branch)) if !branch.is_empty() => (rest, Some(branch)),
        Some((rest, _)) => (rest, None),
        None => (trimmed, None),
    };

    let (protocol, host, path) = if let Some((scheme, after)) = rest.split_once("://") {
        let protocol = scheme.rsplit('+').next().unwrap_or(scheme);
        let protocol = if protocol == "git" || protocol == "ssh" {
            "https"
        } else {
            protocol
        };
        let (authority, path) = after.split_once('/').unwrap_or((after, ""));
        let host = authority.rsplit('@').next().unwrap_or(authority);
        let host = host.split(':').next().unwrap_or(host);
        (protocol, host, path)
    } else if let Some((user_host, path)) = rest.split_once(':')
        && user_host.contains('@')
    {
        let host = user_host.rsplit('@').next().unwrap_or(user_host);
        ("https", host, path)
    } else if let Some(path) = rest.strip_prefix("github:") {
        ("https", DEFAULT_HOST, path)
    } else {
        ("https", DEFAULT_HOST, rest)
    };

    if host.is_empty() {
        return Err(invalid());
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let (Some(owner), Some(name)) = (segments.first(), segments.get(1)) else {
        return Err(invalid());
    };
    let name = name.strip_suffix(".git").unwrap_or(name);
    if name.is_empty() {
        return Err(invalid());
    }

    let path_branch = if host == RAW_HOST {
        segments.get(2).copied()
    } else {
        match segments.get(2) {
            Some(&"blob" | &"tree") => segments.get(3).copied(),
            _ => None,
        }
    };
    let branch = hash_branch.or(path_branch).unwrap_or(DEFAULT_BRANCH);

    Ok(ParsedUrl {
        protocol: protocol.to_string(),
        host: host.to_string(),
        owner: (*owner).to_string(),
        name: name.to_string(),
        branch: branch.to_string(),
        href: input.to_string(),
    })
}

/// Build `owner/name`.
///
/// An `owner` that is itself a URL or `owner/name` path is parsed, and `name`
/// is then ignored.
pub fn repository(owner: &str, name: Option<&str>) -> Result<String, NormalizeError> {
    if owner.contains('/') || owner.contains(':') {
        return parse_url(owner).map(|parsed| parsed.repository());
    }
    if owner.is_empty() {
        return Err(NormalizeError::InvalidRepository {
            input: owner.to_string(),
        });
    }
    Ok(match name {
        Some(name) if !name.is_empty() => format!("{owner}/{name}"),
        _ => owner.to_string(),
    })
}

/// The `repository` value of a manifest as a string.
///
/// Accepts a string or an object with a `url` field.
#[must_use]
pub fn repository_string(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => obj.get("url").and_then(Value::as_str),
        _ => None,
    }
}

/// Web URL of a repository.
pub fn homepage(repository: &str) -> Result<String, NormalizeError> {
    parse_url(repository).map(|parsed| parsed.homepage())
}

/// Issue tracker URL of a repository.
pub fn issues(repository: &str) -> Result<String, NormalizeError> {
    homepage(repository).map(|url| format!("{url}/issues"))
}

/// Alias for [`issues`].
pub fn bugs(repository: &str) -> Result<String, NormalizeError> {
    issues(repository)
}

/// Web URL, pointing at `branch` unless it is `master`.
pub fn https(repository: &str, branch: Option<&str>) -> Result<String, NormalizeError> {
    let homepage = homepage(repository)?;
    Ok(match branch {
        Some(branch) if branch != DEFAULT_BRANCH => format!("{homepage}/blob/{branch}"),
        _ => homepage,
    })
}

/// Travis CI URL.
#[must_use]
pub fn travis(repository: &str, branch: Option<&str>) -> String {
    match branch {
        Some(branch) if branch != DEFAULT_BRANCH => {
            format!("https://travis-ci.org/{repository}?branch={branch}")
        }
        _ => format!("https://travis-ci.org/{repository}"),
    }
}

/// Web URL of a file in a repository.
pub fn file(repository: &str, branch: Option<&str>, path: &str) -> Result<String, NormalizeError> {
    let repository = self::repository(repository, None)?;
    let branch = branch.unwrap_or(DEFAULT_BRANCH);
    Ok(format!("https://github.com/{repository}/blob/{branch}/{path}"))
}

/// Raw content URL of a file in a repository.
pub fn raw(repository: &str, branch: Option<&str>, path: &str) -> Result<String, NormalizeError> {
    let repository = self::repository(repository, None)?;
    let branch = branch.unwrap_or(DEFAULT_BRANCH);
    Ok(format!("https://{RAW_HOST}/{repository}/{branch}/{path}"))
}

/// Whether `url` points at a GitHub host.
#[must_use]
pub fn is_github_url(url: &str) -> bool {
    let Some((_, after)) = url.split_once("://") else {
        return false;
    };
    let authority = after.split('/').next().unwrap_or(after);
    let host = authority.rsplit('@').next().unwrap_or(authority);
    GITHUB_HOSTS.contains(&host)
}

/// Every URL derivable from a repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpandedUrls {
    /// The parsed reference
    #[serde(flatten)]
    pub parsed: ParsedUrl,
    /// `owner/name`
    pub repository: String,
    /// API host
    pub host_api: String,
    /// API endpoint of the repository
    pub api: String,
    /// Tarball of the branch
    pub tarball: String,
    /// Clone URL
    pub clone: String,
    /// Zip archive of the branch
    pub zip: String,
    /// Web URL at the branch
    pub https: String,
    /// Travis CI URL
    pub travis: String,
    /// Web URL of `file`, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Raw URL of `file`, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// Parse `repository` and derive every URL for it.
///
/// `%20` in the name is decoded to a space.
pub fn expand_url(repository: &str, file: Option<&str>) -> Result<ExpandedUrls, NormalizeError> {
    let mut parsed = parse_url(repository)?;
    let repo = parsed.repository();
    let branch = parsed.branch.clone();

    let host_api = if parsed.host == DEFAULT_HOST || parsed.host == RAW_HOST {
        "api.github.com".to_string()
    } else {
        format!("{}/api/v3", parsed.host)
    };
    let api = format!("https://{host_api}/repos/{repo}");
    let clone = format!("https://github.com/{repo}");

    let urls = ExpandedUrls {
        tarball: format!("{api}/tarball/{branch}"),
        zip: format!("{clone}/archive/{branch}.zip"),
        https: https(&parsed.homepage(), Some(branch.as_str()))?,
        travis: travis(&repo, Some(branch.as_str())),
        file: file.map(|f| self::file(&repo, Some(branch.as_str()), f)).transpose()?,
        raw: file.map(|f| raw(&repo, Some(branch.as_str()), f)).transpose()?,
        repository: repo,
        host_api,
        api,
        clone,
        parsed: {
            parsed.name = parsed.name.replace("%20", " ");
            parsed
        },
    };
    Ok(urls)
}

/// Owner of a repository reference or of a manifest.
///
/// For an object, looks at `owner`, then `repository`, then `url`, then the
/// `author`'s URL, in that order.
#[must_use]
pub fn owner(config: &Value) -> Option<String> {
    match config {
        Value::String(s) => owner_of(s),
        Value::Object(obj) => {
            if let Some(owner) = obj.get("owner").and_then(Value::as_str) {
                return Some(owner.to_string());
            }
            let from_url = owner_of;
            obj.get("repository")
                .and_then(repository_string)
                .and_then(from_url)
                .or_else(|| obj.get("url").and_then(Value::as_str).and_then(from_url))
                .or_else(|| {
                    let author = obj.get("author").and_then(Person::from_value)?;
                    author.url.as_deref().and_then(from_url)
                })
        }
        _ => None,
    }
}

/// Owner from a repository reference, or the first path segment of a URL
/// that names only an owner, such as a profile link.
fn owner_of(s: &str) -> Option<String> {
    if let Ok(parsed) = parse_url(s) {
        return Some(parsed.owner);
    }
    let (_, after) = s.split_once("://")?;
    after.split('/').skip(1).find(|seg| !seg.is_empty()).map(str::to_string)
}

/// Project name from a repository reference or a directory.
///
/// `.` and `""` stand for `cwd`; an absolute path yields its last component.
#[must_use]
pub fn name(input: &str, cwd: &Path) -> Option<String> {
    if input.is_empty() || input == "." {
        return basename(cwd);
    }
    let path = Path::new(input);
    if path.is_absolute() {
        return basename(path);
    }
    repository(input, None).ok()?.rsplit('/').next().map(str::to_string)
}

fn basename(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// GitHub username of the manifest author.
///
/// Tries the author's `username`, then a GitHub author URL, then the git
/// `user.name`, then the owner of `repository` or `homepage`.
#[must_use]
pub fn username(config: &Value, cwd: &Path) -> Option<String> {
    let author = config.get("author").and_then(Person::from_value);
    if let Some(username) = author.as_ref().and_then(Person::username) {
        return Some(username);
    }
    if let Some(name) = git_user_name(cwd) {
        return Some(name);
    }
    ["repository", "homepage"]
        .iter()
        .filter_map(|key| config.get(*key).and_then(repository_string))
        .find_map(|s| parse_url(s).ok())
        .map(|parsed| parsed.owner)
}
