//! `$name` / `${name}` placeholder templates.
//!
//! Substitution is strict in both directions: every placeholder needs a
//! value, and every supplied value must be referenced. `$$` renders a literal
//! `$`.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading, parsing, or filling a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template file could not be read.
    #[error("failed to read template {}", path.display())]
    Load {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A `$` that starts neither a placeholder nor a `$$` escape.
    #[error("invalid placeholder at line {line}, column {column}")]
    InvalidPlaceholder {
        /// 1-based line of the offending `$`.
        line: usize,
        /// 1-based column of the offending `$`.
        column: usize,
    },
    /// A placeholder with no substitution.
    #[error("placeholder `{0}` has no substitution")]
    MissingKey(String),
    /// A substitution that no placeholder references.
    #[error("substitution `{0}` matches no placeholder")]
    UnusedKey(String),
}

/// Placeholder name to replacement text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions(BTreeMap<String, String>);

impl Substitutions {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `name` to the display text of `value`, replacing any earlier entry.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.0.insert(name.into(), value.to_string());
    }

    /// Replacement text for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Placeholder names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Reads and parses the template at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Load`] if the file cannot be read, or
    /// [`TemplateError::InvalidPlaceholder`] if it contains a stray `$`.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let text = fs::read_to_string(path).map_err(|source| TemplateError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses template text.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidPlaceholder`] for a `$` not followed by
    /// `$`, an identifier, or `{identifier}`.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some(pos) = rest.find('$') {
            literal.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(tail) = after.strip_prefix('$') {
                literal.push('$');
                rest = tail;
                continue;
            }

            let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
                let len = identifier_len(braced);
                if len == 0 || !braced[len..].starts_with('}') {
                    return Err(invalid_at(text, rest, pos));
                }
                (&braced[..len], len + 2)
            } else {
                let len = identifier_len(after);
                if len == 0 {
                    return Err(invalid_at(text, rest, pos));
                }
                (&after[..len], len)
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(name.to_string()));
            rest = &after[consumed..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Placeholder names in first-appearance order, without duplicates.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(name) = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Checks that `names` is exactly this template's placeholder set.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingKey`] for the first placeholder absent
    /// from `names`, else [`TemplateError::UnusedKey`] for the first name no
    /// placeholder references.
    pub fn check_keys<'a, I>(&self, names: I) -> Result<(), TemplateError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = names.into_iter().collect();
        let placeholders = self.placeholders();

        if let Some(missing) = placeholders.iter().find(|p| !names.contains(*p)) {
            return Err(TemplateError::MissingKey((*missing).to_string()));
        }
        if let Some(unused) = names.iter().find(|n| !placeholders.contains(*n)) {
            return Err(TemplateError::UnusedKey((*unused).to_string()));
        }
        Ok(())
    }

    /// Fills every placeholder from `subs`.
    ///
    /// # Errors
    ///
    /// Fails as [`Template::check_keys`] does when `subs` and the template's
    /// placeholders differ; nothing is produced in that case.
    pub fn substitute(&self, subs: &Substitutions) -> Result<String, TemplateError> {
        self.check_keys(subs.keys())?;

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = subs
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingKey(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Byte length of the identifier (`[A-Za-z_][A-Za-z0-9_]*`) starting `s`.
fn identifier_len(s: &str) -> usize {
    let mut len = 0;
    for (i, c) in s.char_indices() {
        let ok = if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        if !ok {
            break;
        }
        len = i + c.len_utf8();
    }
    len
}

/// Builds an `InvalidPlaceholder` error for the `$` at `rest[pos]`.
fn invalid_at(text: &str, rest: &str, pos: usize) -> TemplateError {
    let offset = text.len() - rest.len() + pos;
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(nl) => before[nl + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    TemplateError::InvalidPlaceholder { line, column }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(pairs: &[(&str, &str)]) -> Substitutions {
        let mut s = Substitutions::new();
        for (k, v) in pairs {
            s.insert(*k, v);
        }
        s
    }

    #[test]
    fn bare_and_braced_placeholders() -> Result<(), TemplateError> {
        let t = Template::parse("glm::vec${N} v$x = $x;")?;
        assert_eq!(t.placeholders(), vec!["N", "x"]);
        let out = t.substitute(&subs(&[("N", "3"), ("x", "y")]))?;
        assert_eq!(out, "glm::vec3 vy = y;");
        Ok(())
    }

    #[test]
    fn braced_placeholder_may_touch_identifier_text() -> Result<(), TemplateError> {
        let t = Template::parse("get_${x}(v1)")?;
        let out = t.substitute(&subs(&[("x", "w")]))?;
        assert_eq!(out, "get_w(v1)");
        Ok(())
    }

    #[test]
    fn dollar_escape() -> Result<(), TemplateError> {
        let t = Template::parse("cost: $$5 for $item")?;
        assert_eq!(t.placeholders(), vec!["item"]);
        let out = t.substitute(&subs(&[("item", "tea")]))?;
        assert_eq!(out, "cost: $5 for tea");
        Ok(())
    }

    #[test]
    fn stray_dollar_reports_position() {
        let err = Template::parse("ok\n  $ 1").err();
        assert!(matches!(
            err,
            Some(TemplateError::InvalidPlaceholder { line: 2, column: 3 })
        ));
        assert!(Template::parse("${N").is_err());
        assert!(Template::parse("${}").is_err());
        assert!(Template::parse("${1x}").is_err());
        assert!(Template::parse("trailing $").is_err());
    }

    #[test]
    fn missing_key_is_rejected() -> Result<(), TemplateError> {
        let t = Template::parse("$a $b")?;
        let err = t.substitute(&subs(&[("a", "1")])).err();
        assert!(matches!(err, Some(TemplateError::MissingKey(k)) if k == "b"));
        Ok(())
    }

    #[test]
    fn unused_key_is_rejected() -> Result<(), TemplateError> {
        let t = Template::parse("$a")?;
        let err = t.substitute(&subs(&[("a", "1"), ("zz", "2")])).err();
        assert!(matches!(err, Some(TemplateError::UnusedKey(k)) if k == "zz"));
        Ok(())
    }

    #[test]
    fn repeated_placeholder_listed_once() -> Result<(), TemplateError> {
        let t = Template::parse("${x}${x}$x")?;
        assert_eq!(t.placeholders(), vec!["x"]);
        let out = t.substitute(&subs(&[("x", "z")]))?;
        assert_eq!(out, "zzz");
        Ok(())
    }

    #[test]
    fn missing_file_is_load_error() {
        let err = Template::load(Path::new("/nonexistent/spatula/glm_case.cpp")).err();
        assert!(matches!(err, Some(TemplateError::Load { .. })));
    }
}
