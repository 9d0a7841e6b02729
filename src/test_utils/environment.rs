//! Temporary project directories for tests.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::CONFIG_FILE;
use crate::pkg::PACKAGE_FILE;

/// A project directory named after the package, inside a temporary root.
///
/// The directory name matters: `name` defaults to it.
pub struct TestProject {
    pub temp_dir: TempDir,
    pub project_dir: PathBuf,
}

impl TestProject {
    /// Create an empty project directory called `name`.
    pub fn new(name: &str) -> Result<Self> {
        super::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join(name);
        fs::create_dir_all(&project_dir)?;

        Ok(Self {
            temp_dir,
            project_dir,
        })
    }

    /// Create a project with a `.git/config` whose origin is `url`.
    pub fn with_origin(name: &str, url: &str) -> Result<Self> {
        let project = Self::new(name)?;
        project.write_git_config(url)?;
        Ok(project)
    }

    /// Project directory path.
    pub fn path(&self) -> &Path {
        &self.project_dir
    }

    /// Write `.git/config` with an `origin` remote.
    pub fn write_git_config(&self, origin: &str) -> Result<PathBuf> {
        let content = format!(
            "[core]\n\trepositoryformatversion = 0\n\tbare = false\n[remote \"origin\"]\n\turl = {origin}\n\tfetch = +refs/heads/*:refs/remotes/origin/*\n"
        );
        self.create_file(".git/config", &content)
    }

    /// Write `package.json` from a JSON value.
    pub fn write_package(&self, value: &Value) -> Result<PathBuf> {
        self.create_file(PACKAGE_FILE, &serde_json::to_string_pretty(value)?)
    }

    /// Parse a JSON file in the project.
    pub fn read_json(&self, path: impl AsRef<Path>) -> Result<Value> {
        let content = self.read_file(path.as_ref())?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.as_ref().display()))
    }

    /// Write `.normalize-pkg.toml`.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        self.create_file(CONFIG_FILE, content)
    }

    /// Create a file, and its parent directories, relative to the project.
    pub fn create_file(&self, path: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let full_path = self.project_dir.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)
            .with_context(|| format!("Failed to write {}", full_path.display()))?;
        Ok(full_path)
    }

    /// Read a file relative to the project.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let full_path = self.project_dir.join(path);
        fs::read_to_string(&full_path)
            .with_context(|| format!("Failed to read {}", full_path.display()))
    }

    /// Whether a file exists relative to the project.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.project_dir.join(path).exists()
    }
}
