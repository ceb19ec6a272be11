//! Lazy per-library case sequences.

use std::vec;

use rand::Rng;

use crate::component;
use crate::domain::Synthesizer;
use crate::library::{CaseRenderer, RenderError};

/// One rendered test case and the `(N, i)` it exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCase {
    /// Vector dimensionality `N`.
    pub dimension: usize,
    /// Component index `i`.
    pub index: usize,
    /// Filled template text, appended verbatim.
    pub text: String,
}

impl RenderedCase {
    /// Accessor label of the exercised component.
    pub fn component(&self) -> Option<&'static str> {
        component::label(self.index)
    }
}

impl AsRef<str> for RenderedCase {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Renders a library's cases in `N`-then-`i` order, sampling as it goes.
///
/// Produced by [`CaseRenderer::suite`]. Iteration stops after the first error.
pub struct Suite<'a, R> {
    renderer: &'a CaseRenderer,
    synth: &'a mut Synthesizer<R>,
    pending: vec::IntoIter<(usize, usize)>,
    failed: bool,
}

impl<'a, R: Rng> Suite<'a, R> {
    pub(crate) fn new(renderer: &'a CaseRenderer, synth: &'a mut Synthesizer<R>) -> Self {
        Self {
            renderer,
            synth,
            pending: renderer.library().case_indices().into_iter(),
            failed: false,
        }
    }
}

impl<R: Rng> Iterator for Suite<'_, R> {
    type Item = Result<RenderedCase, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (dimension, index) = self.pending.next()?;
        match self.renderer.render(self.synth, dimension, index) {
            Ok(text) => Some(Ok(RenderedCase {
                dimension,
                index,
                text,
            })),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            self.pending.size_hint()
        }
    }
}

impl<R: Rng> ExactSizeIterator for Suite<'_, R> {}
