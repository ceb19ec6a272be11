//! Batch configuration: which suites to generate, from where, into what.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::library::Library;

/// Environment variable overriding the template directory.
pub const TEMPLATE_DIR_ENV: &str = "SPATULA_TEMPLATE_DIR";

/// Default target: the component-accessor test source of the C++ project.
pub const DEFAULT_TARGET: &str = "test/vectors/test_get_component.cpp";

/// Templates shipped with this crate.
pub fn bundled_template_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// One regeneration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Suites to append, in order.
    pub libraries: Vec<Library>,
    /// Directory holding `<library>_case.cpp` templates.
    pub template_dir: PathBuf,
    /// Test source the cases are appended to.
    pub target: PathBuf,
    /// Fixed seed for reproducible values; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            libraries: Library::ALL.to_vec(),
            template_dir: bundled_template_dir(),
            target: PathBuf::from(DEFAULT_TARGET),
            seed: None,
        }
    }
}

impl BatchConfig {
    /// Parses a TOML document; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed TOML, unknown keys, or unknown library
    /// names.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Invalid batch configuration")
    }

    /// Reads and parses the TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("In {}", path.display()))
    }

    /// Applies [`TEMPLATE_DIR_ENV`] when it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var(TEMPLATE_DIR_ENV) {
            if !dir.is_empty() {
                self.template_dir = PathBuf::from(dir);
            }
        }
        self
    }

    /// Total cases one run appends.
    pub fn expected_case_count(&self) -> usize {
        self.libraries
            .iter()
            .map(|lib| lib.expected_case_count())
            .sum()
    }
}
