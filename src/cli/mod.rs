//! Command-line interface for `normalize-pkg`.
//!
//! The binary reads `package.json` from the working directory, normalizes
//! it and writes the result back out:
//!
//! ```bash
//! # Normalize ./package.json in place
//! normalize-pkg
//!
//! # Write the normalized manifest somewhere else
//! normalize-pkg --dest dist/package.json
//! normalize-pkg -d out.json
//! ```
//!
//! A missing `package.json` normalizes as `{}`, so running the binary in an
//! empty directory creates a manifest from defaults (name from the
//! directory, version `0.1.0`, repository from `.git/config`, ...).
//!
//! Warnings go to stderr and never change the exit code. Failures to read,
//! normalize or write exit with status 1 and a message from
//! [`user_friendly_error`](crate::core::user_friendly_error).
//!
//! # Configuration
//!
//! Schema options and a default destination are read from
//! `.normalize-pkg.toml` or `$NORMALIZE_PKG_CONFIG`; see [`crate::config`].
//! `--dest` takes precedence over the configured `dest`.


use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::NormalizeConfig;
use crate::pkg::{PACKAGE_FILE, normalize_package, read_package, write_package};
use crate::schema::{Normalized, Warning};

/// Normalize a project's `package.json`.
#[derive(Parser, Debug)]
#[command(
    name = "normalize-pkg",
    about = "Normalize the package.json in the current directory",
    long_about = "Reads package.json from the working directory, fills in defaults, \
                  cleans up field shapes and writes the normalized manifest."
)]
pub struct Cli {
    /// Where to write the normalized manifest, relative to the working
    /// directory (default: package.json).
    #[arg(short, long, value_name = "PATH")]
    dest: Option<PathBuf>,
}

/// Result of a run: where the manifest went and what was produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Path the manifest was written to.
    pub dest: PathBuf,
    /// Normalized manifest and its warnings.
    pub normalized: Normalized,
}

impl Cli {
    /// Destination given on the command line, if any.
    #[must_use]
    pub fn dest(&self) -> Option<&Path> {
        self.dest.as_deref()
    }

    /// Run in the process working directory, printing warnings and the
    /// written path.
    pub fn execute(self) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
        let outcome = self.run_in(&cwd)?;

        for warning in &outcome.normalized.warnings {
            eprintln!("{}", format_warning(warning));
        }
        println!("{} {}", "✓".green(), outcome.dest.display());
        Ok(())
    }

    /// Normalize `cwd/package.json` and write it to the destination.
    pub fn run_in(&self, cwd: &Path) -> Result<RunOutcome> {
        let config = NormalizeConfig::load(cwd)?;
        self.run_with_config(cwd, &config)
    }

    /// Same as [`run_in`](Self::run_in) with an already-loaded config.
    pub fn run_with_config(&self, cwd: &Path, config: &NormalizeConfig) -> Result<RunOutcome> {
        let source = cwd.join(PACKAGE_FILE);
        let dest = self.resolve_dest(cwd, config);
        debug!("Normalizing {} into {}", source.display(), dest.display());

        let manifest = read_package(&source)?;
        let normalized = normalize_package(manifest, cwd, config.schema_options(cwd))
            .with_context(|| format!("Failed to normalize {}", source.display()))?;

        write_package(&dest, &normalized.config.to_value())?;
        info!(warnings = normalized.warnings.len(), "Wrote {}", dest.display());

        Ok(RunOutcome {
            dest,
            normalized,
        })
    }

    fn resolve_dest(&self, cwd: &Path, config: &NormalizeConfig) -> PathBuf {
        let dest = self
            .dest
            .clone()
            .or_else(|| config.dest.clone())
            .unwrap_or_else(|| PathBuf::from(PACKAGE_FILE));
        if dest.is_absolute() {
            dest
        } else {
            cwd.join(dest)
        }
    }
}

/// One stderr line per warning.
#[must_use]
pub fn format_warning(warning: &Warning) -> String {
    format!("{} {warning}", "warning:".yellow().bold())
}
