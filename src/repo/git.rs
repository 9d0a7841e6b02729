//! Reading git configuration files.
//!
//! Files are read with `git config --file <path> --includes --null --list`,
//! so comments, quoting, escapes and `[include]` behave exactly as they do
//! for git itself. Parsed files are cached for the lifetime of the process,
//! keyed by path.

use anyhow::{Context, Result, bail};
use dashmap::DashMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, LazyLock};
use tracing::{debug, trace};

static CACHE: LazyLock<DashMap<PathBuf, Arc<GitConfig>>> = LazyLock::new(DashMap::new);

/// Which git config file to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitConfigScope {
    /// `<cwd>/.git/config`, falling back to the global file when there is no
    /// local repository
    Local,
    /// `~/.gitconfig`
    Global,
}

/// A parsed git config file.
///
/// Entries are keyed the way git prints them: `section.subsection.key`, with
/// section and key lowercased, so `[remote "origin"] url` is `remote.origin.url`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitConfig {
    entries: HashMap<String, String>,
}

impl GitConfig {
    /// Read a config file through `git config`.
    pub fn read(path: &Path) -> Result<Self> {
        let output = Command::new(git_command())
            .arg("config")
            .arg("--file")
            .arg(path)
            .args(["--includes", "--null", "--list"])
            .output()
            .with_context(|| format!("Failed to execute git config --file {}", path.display()))?;

        if !output.status.success() {
            bail!(
                "git config --file {} failed: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(Self::from_list(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Parse the output of `git config --null --list`.
    ///
    /// Entries are NUL-terminated, with the key and value separated by a
    /// newline. A key without a newline is a bare boolean and reads as `true`.
    /// Later entries override earlier ones.
    #[must_use]
    pub fn from_list(output: &str) -> Self {
        let mut entries = HashMap::new();
        for entry in output.split('\0').filter(|e| !e.is_empty()) {
            let (key, value) = entry.split_once('\n').unwrap_or((entry, "true"));
            trace!("git config {key}");
            entries.insert(key.to_string(), value.to_string());
        }
        Self {
            entries,
        }
    }

    /// Look up `key` in `section` (e.g. `("remote.origin", "url")`).
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let (name, subsection) = match section.split_once('.') {
            Some((name, sub)) => (name.to_lowercase(), Some(sub)),
            None => (section.to_lowercase(), None),
        };
        let full = match subsection {
            Some(sub) => format!("{name}.{sub}.{}", key.to_lowercase()),
            None => format!("{name}.{}", key.to_lowercase()),
        };
        self.entries.get(&full).map(String::as_str)
    }

    /// Whether the file had no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const fn git_command() -> &'static str {
    if cfg!(windows) { "git.exe" } else { "git" }
}

/// Path of the git config file for `scope`, if it exists.
#[must_use]
pub fn git_config_path(scope: GitConfigScope, cwd: &Path) -> Option<PathBuf> {
    if scope == GitConfigScope::Local {
        let local = cwd.join(".git").join("config");
        if local.is_file() {
            return Some(local);
        }
    }
    let global = PathBuf::from(shellexpand::tilde("~/.gitconfig").into_owned());
    global.is_file().then_some(global)
}

/// Parsed git config for `scope`, read once per file per process.
#[must_use]
pub fn git_config(scope: GitConfigScope, cwd: &Path) -> Option<Arc<GitConfig>> {
    let path = git_config_path(scope, cwd)?;
    if let Some(cached) = CACHE.get(&path) {
        return Some(Arc::clone(&cached));
    }

    let config = match GitConfig::read(&path) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            debug!("Failed to read git config {}: {e:#}", path.display());
            return None;
        }
    };
    debug!("Loaded git config from {}", path.display());
    CACHE.insert(path, Arc::clone(&config));
    Some(config)
}

/// `user.name`, from the local config first and then the global one.
#[must_use]
pub fn git_user_name(cwd: &Path) -> Option<String> {
    user_value(cwd, "name")
}

/// `user.email`, from the local config first and then the global one.
#[must_use]
pub fn git_user_email(cwd: &Path) -> Option<String> {
    user_value(cwd, "email")
}

fn user_value(cwd: &Path, key: &str) -> Option<String> {
    [GitConfigScope::Local, GitConfigScope::Global]
        .into_iter()
        .filter_map(|scope| git_config(scope, cwd))
        .find_map(|config| config.get("user", key).map(str::to_string))
}

/// URL of the `origin` remote of the repository at `cwd`.
#[must_use]
pub fn remote_origin_url(cwd: &Path) -> Option<String> {
    let local = cwd.join(".git").join("config");
    if !local.is_file() {
        return None;
    }
    git_config(GitConfigScope::Local, cwd)?.get("remote.origin", "url").map(str::to_string)
}
