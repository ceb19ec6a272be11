//! Target vector libraries and their case renderers.
//!
//! Each [`Library`] names the numeric domains its template exercises and the
//! dimensionalities its vector types come in. A [`CaseRenderer`] binds a
//! library to its loaded template and turns `(N, i)` into one test case.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::component;
use crate::domain::{NumericDomain, Synthesizer};
use crate::suite::Suite;
use crate::template::{Substitutions, Template, TemplateError};

/// Placeholder receiving the dimensionality `N`.
pub const DIMENSION_KEY: &str = "N";

/// Placeholder receiving the component label.
pub const COMPONENT_KEY: &str = "x";

/// Errors raised while preparing or rendering a test case.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The library's template is missing, malformed, or does not use exactly
    /// the placeholders the renderer supplies.
    #[error("unusable {library} case template")]
    Template {
        /// Library whose template failed.
        library: Library,
        /// What was wrong with it.
        #[source]
        source: TemplateError,
    },
    /// A component index with no label or outside the vector.
    #[error("component {index} is out of range for a {dimension}-component vector")]
    ComponentOutOfRange {
        /// Requested component index.
        index: usize,
        /// Vector dimensionality.
        dimension: usize,
    },
}

/// A vector library with generated component-access cases.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Library {
    /// `glm::ivecN`, `uvecN`, `vecN`, `dvecN`.
    Glm,
    /// `sf::VectorNi`, `sf::VectorNf`.
    Sfml,
    /// `Eigen::VectorNi`, `f`, `d`, `cf`, `cd`.
    Eigen,
}

impl Library {
    /// Every library, in the reference batch order.
    pub const ALL: [Library; 3] = [Library::Glm, Library::Sfml, Library::Eigen];

    /// Lower-case library name.
    pub fn name(self) -> &'static str {
        match self {
            Library::Glm => "glm",
            Library::Sfml => "sfml",
            Library::Eigen => "eigen",
        }
    }

    /// Domains the library's template references, in placeholder order.
    pub fn domains(self) -> &'static [NumericDomain] {
        use NumericDomain::*;
        match self {
            Library::Glm => &[SignedInt, UnsignedInt, Float, Double],
            Library::Sfml => &[SignedInt, Float],
            Library::Eigen => &[SignedInt, Float, Double, ComplexFloat, ComplexDouble],
        }
    }

    /// Dimensionalities with generated cases.
    ///
    /// SFML only has 2- and 3-component vectors.
    pub fn dimensions(self) -> RangeInclusive<usize> {
        match self {
            Library::Glm | Library::Eigen => 2..=4,
            Library::Sfml => 2..=3,
        }
    }

    /// File name of the library's case template.
    pub fn template_file(self) -> String {
        format!("{}_case.cpp", self.name())
    }

    /// Every placeholder the library's template must use.
    pub fn placeholder_names(self) -> Vec<String> {
        let mut names = vec![DIMENSION_KEY.to_string(), COMPONENT_KEY.to_string()];
        for domain in self.domains() {
            names.push(domain.vector_placeholder());
            names.push(domain.component_placeholder());
        }
        names
    }

    /// `(N, i)` pairs in generation order: `N` ascending, then `i`.
    pub fn case_indices(self) -> Vec<(usize, usize)> {
        self.dimensions()
            .flat_map(|n| (0..n).map(move |i| (n, i)))
            .collect()
    }

    /// Number of cases in one suite: the sum of the dimensionalities.
    pub fn expected_case_count(self) -> usize {
        self.dimensions().sum()
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A library bound to its validated case template.
#[derive(Debug, Clone)]
pub struct CaseRenderer {
    library: Library,
    template: Template,
}

impl CaseRenderer {
    /// Binds `library` to an already parsed template.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] unless the template's placeholders are
    /// exactly [`Library::placeholder_names`].
    pub fn new(library: Library, template: Template) -> Result<Self, RenderError> {
        let names = library.placeholder_names();
        template
            .check_keys(names.iter().map(String::as_str))
            .map_err(|source| RenderError::Template { library, source })?;
        Ok(Self { library, template })
    }

    /// Loads `library`'s template from `template_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the file cannot be read or parsed,
    /// or does not match the library's placeholders.
    pub fn load(library: Library, template_dir: &Path) -> Result<Self, RenderError> {
        let template = Template::load(&Self::template_path(library, template_dir))
            .map_err(|source| RenderError::Template { library, source })?;
        Self::new(library, template)
    }

    /// Where [`CaseRenderer::load`] looks for `library`'s template.
    pub fn template_path(library: Library, template_dir: &Path) -> PathBuf {
        template_dir.join(library.template_file())
    }

    /// The bound library.
    pub fn library(&self) -> Library {
        self.library
    }

    /// Samples fresh vectors and builds the substitutions for case `(n, i)`.
    ///
    /// Real components are raw literals; complex components keep their
    /// `{re, im}` braces since a lone complex number needs them too.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ComponentOutOfRange`] unless `i < n` and `i`
    /// has a component label.
    pub fn substitutions<R: Rng>(
        &self,
        synth: &mut Synthesizer<R>,
        n: usize,
        i: usize,
    ) -> Result<Substitutions, RenderError> {
        let label = component::label(i)
            .filter(|_| i < n)
            .ok_or(RenderError::ComponentOutOfRange {
                index: i,
                dimension: n,
            })?;

        let mut subs = Substitutions::new();
        subs.insert(DIMENSION_KEY, n);
        subs.insert(COMPONENT_KEY, label);

        for &domain in self.library.domains() {
            let vector = synth.vector(domain, n);
            let selected = vector.get(i).ok_or(RenderError::ComponentOutOfRange {
                index: i,
                dimension: n,
            })?;
            subs.insert(domain.vector_placeholder(), &vector);
            subs.insert(domain.component_placeholder(), selected);
        }

        Ok(subs)
    }

    /// Renders case `(n, i)` with freshly sampled values.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ComponentOutOfRange`] for an invalid index, or
    /// [`RenderError::Template`] if substitution fails.
    pub fn render<R: Rng>(
        &self,
        synth: &mut Synthesizer<R>,
        n: usize,
        i: usize,
    ) -> Result<String, RenderError> {
        let subs = self.substitutions(synth, n, i)?;
        self.template
            .substitute(&subs)
            .map_err(|source| RenderError::Template {
                library: self.library,
                source,
            })
    }

    /// Lazily renders this library's whole suite.
    ///
    /// Each call enumerates the same `(N, i)` pairs with new values.
    pub fn suite<'a, R: Rng>(&'a self, synth: &'a mut Synthesizer<R>) -> Suite<'a, R> {
        Suite::new(self, synth)
    }
}
