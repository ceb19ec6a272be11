//! `get-component-suites` — Appends freshly randomized `get_x`/`get_y`/`get_z`/`get_w`
//! cases for the glm, SFML and Eigen extensions to the component test source.
//!
//! **Output:**
//! - `<target>` — one suite per library appended, cases one blank line apart
//!
//! **Usage:**
//! ```
//! get-component-suites [--config <toml>] [--templates <dir>] [--target <path>]
//!                      [--library <glm|sfml|eigen>]... [--seed <n>]
//! ```
//!
//! With no arguments this appends the reference batch (glm, sfml, eigen) to
//! `test/vectors/test_get_component.cpp`. `SPATULA_TEMPLATE_DIR` overrides the
//! template directory unless `--templates` is given.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use spatula_fixtures::{generate, BatchConfig, Library};

/// Append randomized component-access test cases.
#[derive(Parser)]
#[command(
    name = "get-component-suites",
    about = "Append randomized component-access test cases to the vector test source"
)]
struct Args {
    /// TOML batch configuration; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the `<library>_case.cpp` templates.
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Test source to append to.
    #[arg(long)]
    target: Option<PathBuf>,

    /// Library suite to generate; repeat to select several, in order.
    #[arg(long = "library", value_enum)]
    libraries: Vec<Library>,

    /// Seed for reproducible values.
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> Result<BatchConfig> {
        let mut config = match &self.config {
            Some(path) => BatchConfig::from_file(path)?,
            None => BatchConfig::default(),
        }
        .with_env_overrides();

        if let Some(dir) = self.templates {
            config.template_dir = dir;
        }
        if let Some(target) = self.target {
            config.target = target;
        }
        if !self.libraries.is_empty() {
            config.libraries = self.libraries;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let config = Args::parse().into_config()?;

    println!(
        "Generating {} component cases from {}",
        config.expected_case_count(),
        config.template_dir.display()
    );

    let report = generate(&config)?;

    for suite in &report.suites {
        println!("  {}: {} cases", suite.library, suite.cases);
    }
    println!(
        "Appended {} cases to {}",
        report.total_cases(),
        report.target.display()
    );
    Ok(())
}
