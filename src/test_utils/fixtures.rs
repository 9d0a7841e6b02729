//! Sample `package.json` documents.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pkg::PACKAGE_FILE;

/// A named manifest document.
#[derive(Clone, Debug)]
pub struct PackageFixture {
    pub name: String,
    pub content: Value,
}

impl PackageFixture {
    /// Just a name.
    pub fn minimal() -> Self {
        Self {
            name: "minimal".to_string(),
            content: json!({"name": "minimal"}),
        }
    }

    /// A manifest in the loose shapes people actually write.
    pub fn messy() -> Self {
        Self {
            name: "messy".to_string(),
            content: json!({
                "keywords": "parser, config, parser",
                "version": "v1.2.3",
                "name": "messy",
                "author": {"name": "Jon Schlinkert", "email": "jon@example.com", "url": "https://github.com/jonschlinkert"},
                "repository": {"type": "git", "url": "git+https://github.com/jonschlinkert/messy.git"},
                "licenses": [{"type": "MIT", "url": "https://opensource.org/licenses/MIT"}],
                "main": "./index.js",
                "files": "index.js",
                "engines": ">=18",
                "private": "false",
                "verb": {"toc": true, "related": "micromatch, braces", "plugin": "gulp-format-md"},
            }),
        }
    }

    /// A manifest whose `repository` cannot be parsed.
    pub fn bad_repository() -> Self {
        Self {
            name: "bad_repository".to_string(),
            content: json!({"name": "bad-repo", "repository": "not a repo"}),
        }
    }

    /// Write as `package.json` into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(PACKAGE_FILE);
        fs::write(&path, serde_json::to_string_pretty(&self.content)?)
            .with_context(|| format!("Failed to write fixture {}", self.name))?;
        Ok(path)
    }
}
