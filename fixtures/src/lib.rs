//! spatula fixture generator.
//!
//! Regenerates the randomized component-accessor cases (`get_x`, `get_y`,
//! `get_z`, `get_w`) of the C++ vector test suite. For every configured
//! library the generator walks its vector dimensionalities and components,
//! samples fresh vectors, fills the library's case template, and appends the
//! result to the target test source.
//!
//! # Entry Points
//!
//! ```no_run
//! use spatula_fixtures::{generate, BatchConfig};
//!
//! let report = generate(&BatchConfig::default()).expect("Fixture generation failed");
//! println!("{} cases appended", report.total_cases());
//! ```
//!
//! # Templates
//!
//! ```text
//! templates/
//!   glm_case.cpp     ← ivec, uvec, fvec, dvec
//!   sfml_case.cpp    ← ivec, fvec
//!   eigen_case.cpp   ← ivec, fvec, dvec, cfvec, cdvec
//! ```
//!
//! Each template uses `${N}`, `${x}`, and `${<stem>str}` / `${<stem>_x}` for
//! every domain it exercises, and nothing else.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod component;
pub mod config;
pub mod domain;
pub mod format;
pub mod library;
pub mod suite;
pub mod template;
pub mod writer;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;

pub use config::BatchConfig;
pub use domain::{NumericDomain, Scalar, Synthesizer, Vector};
pub use library::{CaseRenderer, Library, RenderError};
pub use suite::{RenderedCase, Suite};
pub use template::{Substitutions, Template, TemplateError};
pub use writer::{append_suite, WriteError};

/// Cases appended for one library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteReport {
    /// The library.
    pub library: Library,
    /// Number of cases appended.
    pub cases: usize,
}

/// Report of what a run appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Target test source.
    pub target: PathBuf,
    /// Per-library results, in write order.
    pub suites: Vec<SuiteReport>,
}

impl GenerationReport {
    /// Cases appended across all suites.
    pub fn total_cases(&self) -> usize {
        self.suites.iter().map(|s| s.cases).sum()
    }
}

/// Appends one batch of suites as configured.
///
/// Values come from `config.seed` when set, otherwise from fresh entropy.
///
/// # Errors
///
/// See [`generate_with`].
pub fn generate(config: &BatchConfig) -> Result<GenerationReport> {
    match config.seed {
        Some(seed) => generate_with(config, &mut Synthesizer::seeded(seed)),
        None => generate_with(config, &mut Synthesizer::from_entropy()),
    }
}

/// Appends one batch of suites, sampling from `synth`.
///
/// Every template is loaded and checked before the target is touched, so a
/// bad template leaves the target unchanged. Suites are then appended one
/// library at a time in configured order.
///
/// # Errors
///
/// Returns an error if any template cannot be loaded or does not match its
/// library, or if appending to the target fails. Suites appended before an
/// append failure stay in the target.
pub fn generate_with<R: Rng>(
    config: &BatchConfig,
    synth: &mut Synthesizer<R>,
) -> Result<GenerationReport> {
    let renderers = load_renderers(&config.libraries, &config.template_dir)?;

    let mut suites = Vec::with_capacity(renderers.len());
    for renderer in &renderers {
        let library = renderer.library();
        let cases = append_suite(&config.target, renderer.suite(synth))
            .with_context(|| format!("Failed to append the {library} suite"))?;
        suites.push(SuiteReport { library, cases });
    }

    Ok(GenerationReport {
        target: config.target.clone(),
        suites,
    })
}

/// Loads and checks the case template of every library in `libraries`.
///
/// # Errors
///
/// Returns an error naming the first template that is missing, malformed,
/// or mismatched.
pub fn load_renderers(libraries: &[Library], template_dir: &Path) -> Result<Vec<CaseRenderer>> {
    libraries
        .iter()
        .map(|&library| {
            CaseRenderer::load(library, template_dir).with_context(|| {
                format!(
                    "Failed to prepare template: {}",
                    CaseRenderer::template_path(library, template_dir).display()
                )
            })
        })
        .collect()
}
